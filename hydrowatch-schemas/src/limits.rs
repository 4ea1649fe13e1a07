use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

/// Plausible value ranges per sensor field, used by the synthetic fallback
/// generator. These are the documented contract; the upstream firmware's
/// exact distributions are not reproduced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyntheticRanges {
    pub turbidity_ntu: Range,
    pub ph: Range,
    pub temperature_c: Range,
    pub dissolved_solids_mg_l: Range,
    pub reservoir_level_pct: Range,
    pub flow_rate_l_min: Range,
}

impl Default for SyntheticRanges {
    fn default() -> Self {
        Self {
            turbidity_ntu: Range::new(0.0, 10.0),
            ph: Range::new(6.0, 9.0),
            temperature_c: Range::new(15.0, 35.0),
            dissolved_solids_mg_l: Range::new(0.0, 2000.0),
            reservoir_level_pct: Range::new(30.0, 95.0),
            flow_rate_l_min: Range::new(2.5, 8.0),
        }
    }
}

/// Operational thresholds for classification and chart guide lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityLimits {
    pub synthetic: SyntheticRanges,

    /// Reservoir level below this is a critical condition.
    pub reservoir_critical_pct: f64,
    /// Reservoir level below this warrants attention.
    pub reservoir_attention_pct: f64,
    /// Water temperature at or above this raises an alert.
    pub temperature_alert_c: f64,
    /// Expected steady-state flow, used for the flow delta indicator.
    pub nominal_flow_l_min: f64,

    /// Quality index cutoffs: good / fair / poor bands.
    pub quality_good: f64,
    pub quality_fair: f64,
    pub quality_poor: f64,
}

impl Default for QualityLimits {
    fn default() -> Self {
        Self {
            synthetic: SyntheticRanges::default(),
            reservoir_critical_pct: 20.0,
            reservoir_attention_pct: 50.0,
            temperature_alert_c: 30.0,
            nominal_flow_l_min: 5.0,
            quality_good: 80.0,
            quality_fair: 60.0,
            quality_poor: 40.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_contains_is_inclusive() {
        let r = Range::new(6.0, 9.0);
        assert!(r.contains(6.0));
        assert!(r.contains(9.0));
        assert!(!r.contains(9.000001));
    }

    #[test]
    fn default_ranges_stay_within_physical_bounds() {
        let ranges = SyntheticRanges::default();
        assert!(ranges.ph.min >= 0.0 && ranges.ph.max <= 14.0);
        assert!(ranges.reservoir_level_pct.min >= 0.0);
        assert!(ranges.reservoir_level_pct.max <= 100.0);
        assert!(ranges.flow_rate_l_min.min >= 0.0);
    }
}
