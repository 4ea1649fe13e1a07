use crate::error::HydrowatchError;
use hydrowatch_schemas::feed::{ChannelFeed, FeedEntry};
use reqwest::blocking::Client;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.thingspeak.com/channels";

/// Blocking HTTP client for the ThingSpeak channel-read endpoints.
///
/// Both calls are a single unauthenticated GET unless an API key is
/// configured; there are no retries and no pagination. A request may block
/// the calling tick for up to the configured timeout.
pub struct TelemetryClient {
    http: Client,
    base_url: String,
    channel_id: String,
    api_key: Option<String>,
}

impl TelemetryClient {
    pub fn new(
        base_url: &str,
        channel_id: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, HydrowatchError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| HydrowatchError::Http(base_url.to_string(), e))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            channel_id: channel_id.to_string(),
            api_key,
        })
    }

    pub fn channel_id(&self) -> &str {
        &self.channel_id
    }

    /// `GET /channels/{id}/feeds.json?results=N` - the recent feed history.
    pub fn fetch_feed(&self, results: usize) -> Result<ChannelFeed, HydrowatchError> {
        let url = format!("{}/{}/feeds.json", self.base_url, self.channel_id);
        let mut request = self.http.get(&url).query(&[("results", results.to_string())]);
        if let Some(key) = &self.api_key {
            request = request.query(&[("api_key", key.as_str())]);
        }

        let response = request
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| HydrowatchError::Http(url.clone(), e))?;

        let feed: ChannelFeed = response
            .json()
            .map_err(|e| HydrowatchError::Http(url, e))?;

        if feed.feeds.is_empty() {
            return Err(HydrowatchError::EmptyFeed(self.channel_id.clone()));
        }
        Ok(feed)
    }

    /// `GET /channels/{id}/feeds/last.json` - the most recent entry only.
    pub fn fetch_last(&self) -> Result<FeedEntry, HydrowatchError> {
        let url = format!("{}/{}/feeds/last.json", self.base_url, self.channel_id);
        let mut request = self.http.get(&url);
        if let Some(key) = &self.api_key {
            request = request.query(&[("api_key", key.as_str())]);
        }

        let response = request
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| HydrowatchError::Http(url.clone(), e))?;

        response.json().map_err(|e| HydrowatchError::Http(url, e))
    }
}
