use chrono::{DateTime, Utc};
use csv::Writer;
use hydrowatch_schemas::{
    alert::Severity,
    reading::{Provenance, TaggedReading},
};
use serde::Serialize;
use std::fs;
use std::io;

#[derive(Debug, Serialize)]
struct LogRecord {
    tick: u64,
    timestamp: DateTime<Utc>,
    provenance: Provenance,
    turbidity_ntu: f64,
    ph: f64,
    temperature_c: f64,
    dissolved_solids_mg_l: f64,
    reservoir_level_pct: f64,
    flow_rate_l_min: f64,
    quality_index: f64,
    severity: Severity,
}

/// Appends one CSV row per tick to the session log. Rows are flushed
/// immediately so the plotting stage can re-read the file mid-session.
pub struct TimeSeriesLogger {
    writer: Writer<fs::File>,
}

impl TimeSeriesLogger {
    pub fn new(path: &str) -> Result<Self, io::Error> {
        let writer = Writer::from_path(path)?;
        Ok(Self { writer })
    }

    pub fn log_reading(
        &mut self,
        tick: u64,
        sample: &TaggedReading,
        quality_index: f64,
        severity: Severity,
    ) -> Result<(), anyhow::Error> {
        let record = LogRecord {
            tick,
            timestamp: sample.reading.timestamp,
            provenance: sample.provenance,
            turbidity_ntu: sample.reading.turbidity_ntu,
            ph: sample.reading.ph,
            temperature_c: sample.reading.temperature_c,
            dissolved_solids_mg_l: sample.reading.dissolved_solids_mg_l,
            reservoir_level_pct: sample.reading.reservoir_level_pct,
            flow_rate_l_min: sample.reading.flow_rate_l_min,
            quality_index,
            severity,
        };

        self.writer.serialize(record)?;
        self.writer.flush()?;
        Ok(())
    }
}
