use crate::synthetic::SyntheticGenerator;
use crate::telemetry::client::TelemetryClient;
use chrono::{Duration, Utc};
use hydrowatch_schemas::feed::{
    FeedEntry, DEFAULT_DISSOLVED_SOLIDS_MG_L, DEFAULT_PH, DEFAULT_TEMPERATURE_C,
    DEFAULT_TURBIDITY_NTU,
};
use hydrowatch_schemas::reading::{Reading, TaggedReading};

/// The per-tick data source contract: always yields a complete reading.
///
/// Implementors must absorb every failure mode internally; the monitor loop
/// has no error path for fetching.
pub trait ReadingSource {
    fn next_reading(&mut self) -> TaggedReading;

    /// Chronological seed for the history charts, at most `capacity` entries
    /// spaced `step` apart when synthesized.
    fn seed_history(&mut self, capacity: usize, step: Duration) -> Vec<TaggedReading>;
}

/// Polls the remote channel and falls back to synthetic data on any failure.
/// One-shot unconditional fallback: no retry, no backoff, no circuit breaker.
pub struct RemoteSource {
    client: TelemetryClient,
    fallback: SyntheticGenerator,
}

impl RemoteSource {
    pub fn new(client: TelemetryClient, fallback: SyntheticGenerator) -> Self {
        Self { client, fallback }
    }

    fn reading_from_entry(&mut self, entry: &FeedEntry) -> Reading {
        Reading {
            timestamp: entry.created_at,
            turbidity_ntu: entry.turbidity_ntu().unwrap_or(DEFAULT_TURBIDITY_NTU),
            ph: entry.ph().unwrap_or(DEFAULT_PH),
            temperature_c: entry.temperature_c().unwrap_or(DEFAULT_TEMPERATURE_C),
            dissolved_solids_mg_l: entry
                .dissolved_solids_mg_l()
                .unwrap_or(DEFAULT_DISSOLVED_SOLIDS_MG_L),
            // The quality channel does not carry these two probes; absent
            // fields are backfilled locally.
            reservoir_level_pct: entry
                .reservoir_level_pct()
                .unwrap_or_else(|| self.fallback.reservoir_level_pct()),
            flow_rate_l_min: entry
                .flow_rate_l_min()
                .unwrap_or_else(|| self.fallback.flow_rate_l_min()),
        }
    }
}

impl ReadingSource for RemoteSource {
    fn next_reading(&mut self) -> TaggedReading {
        match self.client.fetch_last() {
            Ok(entry) => TaggedReading::authentic(self.reading_from_entry(&entry)),
            Err(err) => {
                println!("[Telemetry] Remote fetch failed ({err}); substituting synthetic reading");
                TaggedReading::synthetic(self.fallback.reading(Utc::now()))
            }
        }
    }

    fn seed_history(&mut self, capacity: usize, step: Duration) -> Vec<TaggedReading> {
        match self.client.fetch_feed(capacity) {
            Ok(feed) => {
                println!(
                    "[Telemetry] Seeded history with {} entries from channel {}",
                    feed.feeds.len(),
                    self.client.channel_id()
                );
                feed.feeds
                    .iter()
                    .map(|entry| TaggedReading::authentic(self.reading_from_entry(entry)))
                    .collect()
            }
            Err(err) => {
                println!("[Telemetry] Feed history unavailable ({err}); synthesizing trend");
                self.fallback
                    .history(Utc::now(), capacity, step)
                    .into_iter()
                    .map(TaggedReading::synthetic)
                    .collect()
            }
        }
    }
}

/// Offline source: every reading is synthetic. Used for demo runs and when
/// no channel is configured.
pub struct SyntheticSource {
    generator: SyntheticGenerator,
}

impl SyntheticSource {
    pub fn new(generator: SyntheticGenerator) -> Self {
        Self { generator }
    }
}

impl ReadingSource for SyntheticSource {
    fn next_reading(&mut self) -> TaggedReading {
        TaggedReading::synthetic(self.generator.reading(Utc::now()))
    }

    fn seed_history(&mut self, capacity: usize, step: Duration) -> Vec<TaggedReading> {
        self.generator
            .history(Utc::now(), capacity, step)
            .into_iter()
            .map(TaggedReading::synthetic)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hydrowatch_schemas::limits::SyntheticRanges;
    use hydrowatch_schemas::reading::Provenance;
    use std::time::Duration as StdDuration;

    // Nothing listens on this port; the connection is refused immediately,
    // which exercises the fallback branch without waiting on a timeout.
    const UNREACHABLE: &str = "http://127.0.0.1:9";

    fn unreachable_source() -> RemoteSource {
        let client = TelemetryClient::new(
            UNREACHABLE,
            "3112165",
            None,
            StdDuration::from_millis(250),
        )
        .unwrap();
        let generator = SyntheticGenerator::with_seed(SyntheticRanges::default(), 11);
        RemoteSource::new(client, generator)
    }

    #[test]
    fn unreachable_endpoint_yields_complete_synthetic_reading() {
        let mut source = unreachable_source();
        let sample = source.next_reading();

        assert_eq!(sample.provenance, Provenance::Synthetic);
        assert!(sample.reading.is_complete());
        assert!(sample.reading.ph >= 0.0 && sample.reading.ph <= 14.0);
        assert!(sample.reading.reservoir_level_pct >= 0.0);
        assert!(sample.reading.reservoir_level_pct <= 100.0);
    }

    #[test]
    fn unreachable_endpoint_still_seeds_a_full_history() {
        let mut source = unreachable_source();
        let history = source.seed_history(25, Duration::seconds(2));

        assert_eq!(history.len(), 25);
        assert!(history.iter().all(|s| s.is_synthetic()));
        assert!(history.iter().all(|s| s.reading.is_complete()));
    }

    #[test]
    fn feed_entry_values_pass_through_unchanged() {
        let mut source = unreachable_source();
        let entry = FeedEntry {
            created_at: Utc::now(),
            entry_id: 7,
            field1: Some("2.5".to_string()),
            field2: Some("7.4".to_string()),
            field3: Some("23.0".to_string()),
            field4: Some("310".to_string()),
            field5: Some("71.0".to_string()),
            field6: Some("4.8".to_string()),
        };

        let reading = source.reading_from_entry(&entry);
        assert_eq!(reading.turbidity_ntu, 2.5);
        assert_eq!(reading.ph, 7.4);
        assert_eq!(reading.temperature_c, 23.0);
        assert_eq!(reading.dissolved_solids_mg_l, 310.0);
        assert_eq!(reading.reservoir_level_pct, 71.0);
        assert_eq!(reading.flow_rate_l_min, 4.8);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults_and_backfill() {
        let mut source = unreachable_source();
        let entry = FeedEntry {
            created_at: Utc::now(),
            entry_id: 8,
            field1: None,
            field2: Some("".to_string()),
            field3: Some("nan".to_string()),
            field4: None,
            field5: None,
            field6: None,
        };

        let reading = source.reading_from_entry(&entry);
        assert_eq!(reading.turbidity_ntu, DEFAULT_TURBIDITY_NTU);
        assert_eq!(reading.ph, DEFAULT_PH);
        assert_eq!(reading.temperature_c, DEFAULT_TEMPERATURE_C);
        assert_eq!(reading.dissolved_solids_mg_l, DEFAULT_DISSOLVED_SOLIDS_MG_L);
        // Backfilled level/flow come from the generator's ranges.
        assert!(reading.reservoir_level_pct >= 30.0 && reading.reservoir_level_pct <= 95.0);
        assert!(reading.flow_rate_l_min >= 2.5 && reading.flow_rate_l_min <= 8.0);
    }
}
