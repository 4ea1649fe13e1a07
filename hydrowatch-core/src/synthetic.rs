use chrono::{DateTime, Duration, Utc};
use hydrowatch_schemas::{
    limits::{Range, SyntheticRanges},
    reading::Reading,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Generates plausible random readings for the fallback path.
///
/// Values are drawn uniformly within the configured ranges. The ranges are
/// the contract here; no attempt is made to match the upstream sensors'
/// actual distributions.
pub struct SyntheticGenerator {
    ranges: SyntheticRanges,
    rng: StdRng,
}

impl SyntheticGenerator {
    pub fn new(ranges: SyntheticRanges) -> Self {
        Self {
            ranges,
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic generator for tests.
    pub fn with_seed(ranges: SyntheticRanges, seed: u64) -> Self {
        Self {
            ranges,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn reading(&mut self, timestamp: DateTime<Utc>) -> Reading {
        Reading {
            timestamp,
            turbidity_ntu: self.draw(self.ranges.turbidity_ntu),
            ph: self.draw(self.ranges.ph),
            temperature_c: self.draw(self.ranges.temperature_c),
            dissolved_solids_mg_l: self.draw(self.ranges.dissolved_solids_mg_l),
            reservoir_level_pct: self.draw(self.ranges.reservoir_level_pct),
            flow_rate_l_min: self.draw(self.ranges.flow_rate_l_min),
        }
    }

    /// Backfill draws for the two fields the quality channel does not carry.
    pub fn reservoir_level_pct(&mut self) -> f64 {
        self.draw(self.ranges.reservoir_level_pct)
    }

    pub fn flow_rate_l_min(&mut self) -> f64 {
        self.draw(self.ranges.flow_rate_l_min)
    }

    /// Synthesizes a chronological history ending at `end`: each field ramps
    /// from the middle of its range toward a fresh draw, with jitter, and is
    /// clipped back into range.
    pub fn history(&mut self, end: DateTime<Utc>, points: usize, step: Duration) -> Vec<Reading> {
        if points == 0 {
            return Vec::new();
        }

        let target = self.reading(end);
        let mut history = Vec::with_capacity(points);
        for i in 0..points {
            let frac = if points == 1 {
                1.0
            } else {
                i as f64 / (points - 1) as f64
            };
            let timestamp = end - step * (points - 1 - i) as i32;
            history.push(Reading {
                timestamp,
                turbidity_ntu: self.trend(self.ranges.turbidity_ntu, target.turbidity_ntu, frac),
                ph: self.trend(self.ranges.ph, target.ph, frac),
                temperature_c: self.trend(self.ranges.temperature_c, target.temperature_c, frac),
                dissolved_solids_mg_l: self.trend(
                    self.ranges.dissolved_solids_mg_l,
                    target.dissolved_solids_mg_l,
                    frac,
                ),
                reservoir_level_pct: self.trend(
                    self.ranges.reservoir_level_pct,
                    target.reservoir_level_pct,
                    frac,
                ),
                flow_rate_l_min: self.trend(self.ranges.flow_rate_l_min, target.flow_rate_l_min, frac),
            });
        }
        history
    }

    fn draw(&mut self, range: Range) -> f64 {
        self.rng.gen_range(range.min..=range.max)
    }

    fn trend(&mut self, range: Range, target: f64, frac: f64) -> f64 {
        let baseline = (range.min + range.max) / 2.0;
        let jitter_span = (range.max - range.min) * 0.05;
        let jitter = self.rng.gen_range(-jitter_span..=jitter_span);
        range.clamp(baseline + (target - baseline) * frac + jitter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hydrowatch_schemas::limits::SyntheticRanges;

    #[test]
    fn readings_stay_within_documented_ranges() {
        let ranges = SyntheticRanges::default();
        let mut generator = SyntheticGenerator::with_seed(ranges.clone(), 42);
        for _ in 0..500 {
            let reading = generator.reading(Utc::now());
            assert!(reading.is_complete());
            assert!(ranges.turbidity_ntu.contains(reading.turbidity_ntu));
            assert!(ranges.ph.contains(reading.ph));
            assert!(ranges.temperature_c.contains(reading.temperature_c));
            assert!(ranges.dissolved_solids_mg_l.contains(reading.dissolved_solids_mg_l));
            assert!(ranges.reservoir_level_pct.contains(reading.reservoir_level_pct));
            assert!(ranges.flow_rate_l_min.contains(reading.flow_rate_l_min));
            // Spec-level bounds implied by the defaults.
            assert!(reading.ph >= 0.0 && reading.ph <= 14.0);
            assert!(reading.reservoir_level_pct >= 0.0 && reading.reservoir_level_pct <= 100.0);
            assert!(reading.flow_rate_l_min >= 0.0);
        }
    }

    #[test]
    fn history_is_chronological_and_clipped() {
        let ranges = SyntheticRanges::default();
        let mut generator = SyntheticGenerator::with_seed(ranges.clone(), 7);
        let end = Utc::now();
        let history = generator.history(end, 60, Duration::seconds(2));

        assert_eq!(history.len(), 60);
        assert_eq!(history.last().unwrap().timestamp, end);
        for pair in history.windows(2) {
            assert!(pair[0].timestamp < pair[1].timestamp);
        }
        for reading in &history {
            assert!(ranges.ph.contains(reading.ph));
            assert!(ranges.reservoir_level_pct.contains(reading.reservoir_level_pct));
        }
    }

    #[test]
    fn empty_and_single_point_histories() {
        let mut generator = SyntheticGenerator::with_seed(SyntheticRanges::default(), 3);
        assert!(generator.history(Utc::now(), 0, Duration::seconds(2)).is_empty());
        let one = generator.history(Utc::now(), 1, Duration::seconds(2));
        assert_eq!(one.len(), 1);
    }
}
