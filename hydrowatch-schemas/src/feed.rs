use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Defaults applied when a feed entry is missing one of the core quality
/// fields. These mirror what the channel reports for an idle sensor.
pub const DEFAULT_TURBIDITY_NTU: f64 = 0.0;
pub const DEFAULT_PH: f64 = 7.0;
pub const DEFAULT_TEMPERATURE_C: f64 = 25.0;
pub const DEFAULT_DISSOLVED_SOLIDS_MG_L: f64 = 0.0;

/// Top-level payload of `GET /channels/{id}/feeds.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChannelFeed {
    pub channel: ChannelInfo,
    pub feeds: Vec<FeedEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChannelInfo {
    pub id: u64,
    pub name: Option<String>,
    pub last_entry_id: Option<u64>,
}

/// One row of a channel feed. ThingSpeak reports every sensor field as a
/// nullable string, so all numeric access goes through [`parse_field`].
///
/// Field mapping for the water quality channel:
/// field1 = turbidity (NTU), field2 = pH, field3 = temperature (C),
/// field4 = dissolved solids (mg/L), field5 = reservoir level (%),
/// field6 = flow rate (L/min). Fields 5 and 6 are absent on channels that
/// only carry the quality probe.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedEntry {
    pub created_at: DateTime<Utc>,
    pub entry_id: u64,
    pub field1: Option<String>,
    pub field2: Option<String>,
    pub field3: Option<String>,
    pub field4: Option<String>,
    pub field5: Option<String>,
    pub field6: Option<String>,
}

impl FeedEntry {
    pub fn turbidity_ntu(&self) -> Option<f64> {
        parse_field(&self.field1)
    }

    pub fn ph(&self) -> Option<f64> {
        parse_field(&self.field2)
    }

    pub fn temperature_c(&self) -> Option<f64> {
        parse_field(&self.field3)
    }

    pub fn dissolved_solids_mg_l(&self) -> Option<f64> {
        parse_field(&self.field4)
    }

    pub fn reservoir_level_pct(&self) -> Option<f64> {
        parse_field(&self.field5)
    }

    pub fn flow_rate_l_min(&self) -> Option<f64> {
        parse_field(&self.field6)
    }
}

/// Lenient numeric conversion for feed fields. Missing, empty, `"nan"`, and
/// unparseable values all read as absent; callers supply the defaults.
pub fn parse_field(raw: &Option<String>) -> Option<f64> {
    let text = raw.as_deref()?.trim();
    if text.is_empty() || text.eq_ignore_ascii_case("nan") {
        return None;
    }
    match text.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(field2: Option<&str>) -> FeedEntry {
        FeedEntry {
            created_at: Utc::now(),
            entry_id: 1,
            field1: Some("3.2".to_string()),
            field2: field2.map(str::to_string),
            field3: Some(" 24.5 ".to_string()),
            field4: None,
            field5: Some("".to_string()),
            field6: Some("not-a-number".to_string()),
        }
    }

    #[test]
    fn parses_numeric_fields_and_trims_whitespace() {
        let e = entry(Some("7.1"));
        assert_eq!(e.turbidity_ntu(), Some(3.2));
        assert_eq!(e.ph(), Some(7.1));
        assert_eq!(e.temperature_c(), Some(24.5));
    }

    #[test]
    fn missing_blank_and_garbage_fields_read_as_absent() {
        let e = entry(None);
        assert_eq!(e.ph(), None);
        assert_eq!(e.dissolved_solids_mg_l(), None);
        assert_eq!(e.reservoir_level_pct(), None);
        assert_eq!(e.flow_rate_l_min(), None);
    }

    #[test]
    fn nan_text_reads_as_absent() {
        assert_eq!(parse_field(&Some("nan".to_string())), None);
        assert_eq!(parse_field(&Some("NaN".to_string())), None);
    }

    #[test]
    fn deserializes_channel_feed_payload() {
        let payload = r#"{
            "channel": {"id": 3112165, "name": "water-quality", "last_entry_id": 42},
            "feeds": [
                {"created_at": "2025-12-08T23:56:59Z", "entry_id": 41,
                 "field1": "2.5", "field2": "7.4", "field3": "23.0", "field4": "310"},
                {"created_at": "2025-12-08T23:57:01Z", "entry_id": 42,
                 "field1": "2.6", "field2": "7.3", "field3": "23.1", "field4": "312",
                 "field5": "71.0", "field6": "4.8"}
            ]
        }"#;
        let feed: ChannelFeed = serde_json::from_str(payload).unwrap();
        assert_eq!(feed.channel.id, 3112165);
        assert_eq!(feed.feeds.len(), 2);
        assert_eq!(feed.feeds[0].reservoir_level_pct(), None);
        assert_eq!(feed.feeds[1].reservoir_level_pct(), Some(71.0));
        assert_eq!(feed.feeds[1].flow_rate_l_min(), Some(4.8));
    }
}
