use crate::reading::Reading;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Operational,
    Attention,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Operational => write!(f, "OPERATIONAL"),
            Severity::Attention => write!(f, "ATTENTION"),
            Severity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Composite quality band derived from the 0-100 quality index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityBand {
    Good,
    Fair,
    Poor,
    Bad,
}

impl fmt::Display for QualityBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QualityBand::Good => write!(f, "good"),
            QualityBand::Fair => write!(f, "fair"),
            QualityBand::Poor => write!(f, "poor"),
            QualityBand::Bad => write!(f, "bad"),
        }
    }
}

/// A threshold crossing recorded during a monitoring session. Alerts carry
/// the full reading snapshot so the report table can show every parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub severity: Severity,
    pub subject: String,
    pub reading: Reading,
    pub quality_index: f64,
}
