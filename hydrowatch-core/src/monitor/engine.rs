use crate::{
    error::HydrowatchError,
    logger::TimeSeriesLogger,
    monitor::cadence::TickCadence,
    quality,
    store::SampleStore,
    telemetry::adapter::ReadingSource,
};
use chrono::Duration as ChronoDuration;
use hydrowatch_schemas::{
    alert::{Alert, Severity},
    limits::QualityLimits,
    reading::TaggedReading,
};

/// Everything the presentation layer needs to know about one tick.
#[derive(Debug, Clone)]
pub struct TickReport {
    pub tick: u64,
    pub sample: TaggedReading,
    pub quality_index: f64,
    pub severity: Severity,
    pub alert: Option<Alert>,
}

/// Drives the linear pipeline: fetch-or-simulate, score, append, log.
///
/// Single-threaded and single-writer; one fetch per tick, immediately
/// consumed. Built via [`crate::monitor::builder::MonitorBuilder`].
pub struct MonitorEngine {
    pub(super) store: SampleStore,
    pub(super) source: Box<dyn ReadingSource>,
    pub(super) limits: QualityLimits,
    pub(super) logger: Option<TimeSeriesLogger>,
    pub(super) cadence: TickCadence,
    pub(super) alerts: Vec<Alert>,
    pub(super) tick_count: u64,
}

impl std::fmt::Debug for MonitorEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MonitorEngine")
            .field("source", &"<dyn ReadingSource>")
            .field("limits", &self.limits)
            .field("logger_enabled", &self.logger.is_some())
            .field("alerts", &self.alerts)
            .field("tick_count", &self.tick_count)
            .finish_non_exhaustive()
    }
}

impl MonitorEngine {
    /// Pre-fills the store from the source so the first redraw already has a
    /// history to chart. Seed rows are logged with tick 0 and never alert.
    pub fn seed_history(&mut self) -> Result<usize, HydrowatchError> {
        let step = ChronoDuration::from_std(self.cadence.interval())
            .unwrap_or_else(|_| ChronoDuration::seconds(2));
        let seeds = self.source.seed_history(self.store.capacity(), step);
        let count = seeds.len();

        for sample in seeds {
            let quality_index = quality::quality_index(&sample.reading);
            let severity = quality::classify(&sample.reading, &self.limits);
            if let Some(logger) = &mut self.logger {
                logger.log_reading(0, &sample, quality_index, severity)?;
            }
            self.store.append(sample);
        }
        Ok(count)
    }

    /// One pass of the pipeline. Fetching cannot fail; only the session log
    /// can surface an error here.
    pub fn tick(&mut self) -> Result<TickReport, HydrowatchError> {
        self.tick_count += 1;

        let sample = self.source.next_reading();
        let quality_index = quality::quality_index(&sample.reading);
        let severity = quality::classify(&sample.reading, &self.limits);

        if let Some(logger) = &mut self.logger {
            logger.log_reading(self.tick_count, &sample, quality_index, severity)?;
        }

        let alert = quality::evaluate_alert(&sample.reading, &self.limits);
        if let Some(alert) = &alert {
            self.alerts.push(alert.clone());
        }

        self.store.append(sample.clone());

        Ok(TickReport {
            tick: self.tick_count,
            sample,
            quality_index,
            severity,
            alert,
        })
    }

    /// Runs the refresh loop on the configured cadence. `ticks` of `None`
    /// runs until the process is interrupted; the observer is invoked after
    /// every tick with the report and the current history.
    pub fn run<F>(&mut self, ticks: Option<u64>, mut on_tick: F) -> Result<(), HydrowatchError>
    where
        F: FnMut(&TickReport, &SampleStore) -> Result<(), anyhow::Error>,
    {
        loop {
            if let Some(limit) = ticks {
                if self.tick_count >= limit {
                    break;
                }
            }

            let report = self.tick()?;
            on_tick(&report, &self.store)?;

            if ticks.map_or(true, |limit| self.tick_count < limit) {
                self.cadence.wait();
            }
        }
        Ok(())
    }

    pub fn store(&self) -> &SampleStore {
        &self.store
    }

    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    pub fn limits(&self) -> &QualityLimits {
        &self.limits
    }

    pub fn ticks_completed(&self) -> u64 {
        self.tick_count
    }
}
