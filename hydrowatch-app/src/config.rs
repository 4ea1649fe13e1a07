use anyhow::{Context, Result};
use hydrowatch_core::telemetry::client::DEFAULT_BASE_URL;
use hydrowatch_schemas::limits::QualityLimits;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::Path};

/// Runtime settings for a monitoring session.
///
/// Loaded from an optional YAML file; every field has a default, so a partial
/// file (or no file at all) is valid. The channel id and API key can also be
/// supplied through `HYDROWATCH_CHANNEL_ID` and `THINGSPEAK_API_KEY`, which
/// take precedence over the file. Without a key the public-channel read path
/// is used.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub channel_id: String,
    pub api_key: Option<String>,
    pub base_url: String,
    pub request_timeout_secs: u64,
    pub tick_interval_secs: u64,
    pub history_capacity: usize,
    pub output_dir: String,
    pub limits: QualityLimits,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            channel_id: "3112165".to_string(),
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: 10,
            tick_interval_secs: 2,
            history_capacity: 60,
            output_dir: "./data/runs".to_string(),
            limits: QualityLimits::default(),
        }
    }
}

impl DashboardConfig {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                println!("Loading configuration from '{}'...", path.display());
                let content = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file {:?}", path))?;
                serde_yaml::from_str(&content)
                    .with_context(|| format!("Failed to parse YAML from {:?}", path))?
            }
            None => Self::default(),
        };

        if let Ok(channel) = env::var("HYDROWATCH_CHANNEL_ID") {
            if !channel.is_empty() {
                config.channel_id = channel;
            }
        }
        if let Ok(key) = env::var("THINGSPEAK_API_KEY") {
            if !key.is_empty() {
                config.api_key = Some(key);
            }
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_the_public_channel() {
        let config = DashboardConfig::default();
        assert_eq!(config.channel_id, "3112165");
        assert!(config.api_key.is_none());
        assert_eq!(config.tick_interval_secs, 2);
        assert_eq!(config.history_capacity, 60);
    }

    #[test]
    fn partial_yaml_keeps_defaults_for_missing_fields() {
        let config: DashboardConfig =
            serde_yaml::from_str("channel_id: \"42\"\nhistory_capacity: 10\n").unwrap();
        assert_eq!(config.channel_id, "42");
        assert_eq!(config.history_capacity, 10);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.limits, QualityLimits::default());
    }

    #[test]
    fn environment_overrides_take_precedence() {
        env::set_var("HYDROWATCH_CHANNEL_ID", "999001");
        env::set_var("THINGSPEAK_API_KEY", "TESTKEY123");

        let config = DashboardConfig::load(None).unwrap();
        assert_eq!(config.channel_id, "999001");
        assert_eq!(config.api_key.as_deref(), Some("TESTKEY123"));

        env::remove_var("HYDROWATCH_CHANNEL_ID");
        env::remove_var("THINGSPEAK_API_KEY");
    }
}
