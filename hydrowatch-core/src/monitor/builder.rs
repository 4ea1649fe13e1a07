use crate::{
    error::HydrowatchError,
    logger::TimeSeriesLogger,
    monitor::{cadence::TickCadence, engine::MonitorEngine},
    store::SampleStore,
    telemetry::adapter::ReadingSource,
};
use hydrowatch_schemas::limits::QualityLimits;
use std::time::Duration;

/// Default history depth: one chart-width of samples.
pub const DEFAULT_CAPACITY: usize = 60;
/// Default refresh cadence of the dashboard.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(2);

/// A fluent builder for constructing a `MonitorEngine`.
///
/// This builder provides a step-by-step API to configure the telemetry
/// source, history capacity, thresholds, cadence, and session logging.
pub struct MonitorBuilder {
    source: Option<Box<dyn ReadingSource>>,
    limits: QualityLimits,
    capacity: usize,
    tick_interval: Duration,
    log_path: Option<String>,
}

impl Default for MonitorBuilder {
    fn default() -> Self {
        Self {
            source: None,
            limits: QualityLimits::default(),
            capacity: DEFAULT_CAPACITY,
            tick_interval: DEFAULT_TICK_INTERVAL,
            log_path: None,
        }
    }
}

impl MonitorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the data source polled on every tick.
    pub fn with_source(mut self, source: Box<dyn ReadingSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Sets the operational thresholds used for classification and alerts.
    pub fn with_limits(mut self, limits: QualityLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Sets the sample store capacity (must be at least 1).
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the refresh cadence of the tick loop.
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    /// Configures the monitor to write time-series data to the specified CSV file.
    pub fn with_timeseries_logging_to_file(mut self, path: &str) -> Self {
        self.log_path = Some(path.to_string());
        self
    }

    /// Consumes the builder and returns a fully configured `MonitorEngine`.
    ///
    /// # Errors
    ///
    /// Returns a `HydrowatchError` if no source was provided, the capacity
    /// is zero, or the session log file cannot be created.
    pub fn build(self) -> Result<MonitorEngine, HydrowatchError> {
        let source = self.source.ok_or(HydrowatchError::SourceNotDefined)?;
        if self.capacity == 0 {
            return Err(HydrowatchError::ZeroCapacity);
        }

        let logger = match self.log_path {
            Some(path) => Some(
                TimeSeriesLogger::new(&path)
                    .map_err(|e| HydrowatchError::FileIO(path.clone(), e))?,
            ),
            None => None,
        };

        Ok(MonitorEngine {
            store: SampleStore::new(self.capacity),
            source,
            limits: self.limits,
            logger,
            cadence: TickCadence::new(self.tick_interval),
            alerts: Vec::new(),
            tick_count: 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthetic::SyntheticGenerator;
    use crate::telemetry::adapter::SyntheticSource;
    use hydrowatch_schemas::limits::SyntheticRanges;

    fn synthetic_source() -> Box<dyn ReadingSource> {
        Box::new(SyntheticSource::new(SyntheticGenerator::with_seed(
            SyntheticRanges::default(),
            1,
        )))
    }

    #[test]
    fn build_requires_a_source() {
        let err = MonitorBuilder::new().build().unwrap_err();
        assert!(matches!(err, HydrowatchError::SourceNotDefined));
    }

    #[test]
    fn build_rejects_zero_capacity() {
        let err = MonitorBuilder::new()
            .with_source(synthetic_source())
            .with_capacity(0)
            .build()
            .unwrap_err();
        assert!(matches!(err, HydrowatchError::ZeroCapacity));
    }

    #[test]
    fn build_applies_defaults() {
        let engine = MonitorBuilder::new()
            .with_source(synthetic_source())
            .build()
            .unwrap();
        assert_eq!(engine.store().capacity(), DEFAULT_CAPACITY);
        assert_eq!(engine.ticks_completed(), 0);
    }
}
