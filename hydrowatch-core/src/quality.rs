use hydrowatch_schemas::{
    alert::{Alert, QualityBand, Severity},
    limits::QualityLimits,
    reading::Reading,
};

/// Composite 0-100 water quality index over turbidity, pH, temperature, and
/// dissolved solids. Each parameter is scored against its ideal window and
/// the index is the unweighted mean of the four scores.
pub fn quality_index(reading: &Reading) -> f64 {
    // Turbidity: ideal 0-1 NTU, acceptable up to 5 NTU.
    let turbidity_score = if reading.turbidity_ntu <= 5.0 {
        (100.0 - reading.turbidity_ntu * 20.0).max(0.0)
    } else {
        0.0
    };

    // pH: ideal 6.5-8.5, acceptable 6.0-9.0, penalized by distance from 7.0.
    let ph_score = if (6.0..=9.0).contains(&reading.ph) {
        100.0 - (reading.ph - 7.0).abs() * 20.0
    } else {
        0.0
    };

    // Temperature: ideal 20-25 C, acceptable 15-30 C.
    let temperature_score = if (15.0..=30.0).contains(&reading.temperature_c) {
        100.0 - (reading.temperature_c - 22.5).abs() * 4.0
    } else {
        0.0
    };

    // Dissolved solids: ideal below 500 mg/L, acceptable up to 1000 mg/L.
    let solids_score = if reading.dissolved_solids_mg_l <= 1000.0 {
        (100.0 - reading.dissolved_solids_mg_l / 10.0).max(0.0)
    } else {
        0.0
    };

    (turbidity_score + ph_score + temperature_score + solids_score) / 4.0
}

/// Operational status from reservoir level and water temperature.
pub fn classify(reading: &Reading, limits: &QualityLimits) -> Severity {
    if reading.reservoir_level_pct < limits.reservoir_critical_pct
        || reading.temperature_c >= limits.temperature_alert_c
    {
        Severity::Critical
    } else if reading.reservoir_level_pct < limits.reservoir_attention_pct {
        Severity::Attention
    } else {
        Severity::Operational
    }
}

pub fn quality_band(index: f64, limits: &QualityLimits) -> QualityBand {
    if index >= limits.quality_good {
        QualityBand::Good
    } else if index >= limits.quality_fair {
        QualityBand::Fair
    } else if index >= limits.quality_poor {
        QualityBand::Poor
    } else {
        QualityBand::Bad
    }
}

/// Produces an alert when the reading is out of its operational envelope.
pub fn evaluate_alert(reading: &Reading, limits: &QualityLimits) -> Option<Alert> {
    let severity = classify(reading, limits);
    let subject = match severity {
        Severity::Operational => return None,
        Severity::Attention => "Attention: reservoir level below nominal",
        Severity::Critical => "Critical alert: reservoir low or water overheating",
    };

    Some(Alert {
        severity,
        subject: subject.to_string(),
        quality_index: quality_index(reading),
        reading: reading.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn reading(turbidity: f64, ph: f64, temperature: f64, solids: f64) -> Reading {
        Reading {
            timestamp: Utc.with_ymd_and_hms(2025, 12, 8, 12, 0, 0).unwrap(),
            turbidity_ntu: turbidity,
            ph,
            temperature_c: temperature,
            dissolved_solids_mg_l: solids,
            reservoir_level_pct: 70.0,
            flow_rate_l_min: 5.0,
        }
    }

    #[test]
    fn ideal_water_scores_one_hundred() {
        let ideal = reading(0.0, 7.0, 22.5, 0.0);
        assert!((quality_index(&ideal) - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn index_matches_known_fixed_points() {
        // Scores: turbidity 60, pH 90, temperature 90, solids 60 => mean 75.
        let sample = reading(2.0, 7.5, 25.0, 400.0);
        assert!((quality_index(&sample) - 75.0).abs() < 1e-9);

        // Out-of-window parameters score zero individually.
        let murky = reading(6.0, 5.0, 40.0, 1500.0);
        assert_eq!(quality_index(&murky), 0.0);
    }

    #[test]
    fn classification_tiers() {
        let limits = QualityLimits::default();

        let mut ok = reading(1.0, 7.0, 22.0, 200.0);
        assert_eq!(classify(&ok, &limits), Severity::Operational);

        ok.reservoir_level_pct = 45.0;
        assert_eq!(classify(&ok, &limits), Severity::Attention);

        ok.reservoir_level_pct = 15.0;
        assert_eq!(classify(&ok, &limits), Severity::Critical);

        ok.reservoir_level_pct = 70.0;
        ok.temperature_c = 31.0;
        assert_eq!(classify(&ok, &limits), Severity::Critical);
    }

    #[test]
    fn quality_bands_follow_cutoffs() {
        let limits = QualityLimits::default();
        assert_eq!(quality_band(85.0, &limits), QualityBand::Good);
        assert_eq!(quality_band(65.0, &limits), QualityBand::Fair);
        assert_eq!(quality_band(45.0, &limits), QualityBand::Poor);
        assert_eq!(quality_band(10.0, &limits), QualityBand::Bad);
    }

    #[test]
    fn alerts_only_outside_operational_envelope() {
        let limits = QualityLimits::default();

        let ok = reading(1.0, 7.0, 22.0, 200.0);
        assert!(evaluate_alert(&ok, &limits).is_none());

        let mut low = ok.clone();
        low.reservoir_level_pct = 10.0;
        let alert = evaluate_alert(&low, &limits).unwrap();
        assert_eq!(alert.severity, Severity::Critical);
        assert_eq!(alert.reading.reservoir_level_pct, 10.0);
    }
}
