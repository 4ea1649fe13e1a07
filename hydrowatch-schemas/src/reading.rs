use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One timestamped snapshot across the six monitored water parameters.
///
/// Readings are never mutated after creation; they are appended to the sample
/// store and evicted oldest-first once its capacity is exceeded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub timestamp: DateTime<Utc>,
    pub turbidity_ntu: f64,
    pub ph: f64,
    pub temperature_c: f64,
    pub dissolved_solids_mg_l: f64,
    pub reservoir_level_pct: f64,
    pub flow_rate_l_min: f64,
}

impl Reading {
    /// True when every field holds a finite number. Both the remote parse
    /// path and the synthetic generator must uphold this.
    pub fn is_complete(&self) -> bool {
        [
            self.turbidity_ntu,
            self.ph,
            self.temperature_c,
            self.dissolved_solids_mg_l,
            self.reservoir_level_pct,
            self.flow_rate_l_min,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

/// Origin of a reading: parsed from the remote channel, or generated locally
/// because the remote fetch failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    Authentic,
    Synthetic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggedReading {
    pub reading: Reading,
    pub provenance: Provenance,
}

impl TaggedReading {
    pub fn authentic(reading: Reading) -> Self {
        Self {
            reading,
            provenance: Provenance::Authentic,
        }
    }

    pub fn synthetic(reading: Reading) -> Self {
        Self {
            reading,
            provenance: Provenance::Synthetic,
        }
    }

    pub fn is_synthetic(&self) -> bool {
        self.provenance == Provenance::Synthetic
    }
}
