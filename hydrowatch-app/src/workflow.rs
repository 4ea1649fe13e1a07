use crate::config::DashboardConfig;
use crate::plotting;
use anyhow::{Context, Result};
use hydrowatch_core::{
    monitor::{
        builder::MonitorBuilder,
        engine::{MonitorEngine, TickReport},
    },
    quality,
    store::SampleStore,
    synthetic::SyntheticGenerator,
    telemetry::{
        adapter::{ReadingSource, RemoteSource, SyntheticSource},
        client::TelemetryClient,
    },
};
use hydrowatch_schemas::{
    alert::{Alert, Severity},
    limits::QualityLimits,
    reading::Provenance,
};
use std::{fs, path::Path, time::Duration};

/// How often the charts are regenerated, in ticks.
const REDRAW_EVERY_TICKS: u64 = 5;

pub struct SessionOptions {
    pub ticks: Option<u64>,
    pub offline: bool,
}

/// Orchestrates a full monitoring session: source construction, history
/// seeding, the refresh loop with console indicators and chart redraws, and
/// the final reports.
pub fn run_monitoring_session(config: &DashboardConfig, options: &SessionOptions) -> Result<()> {
    println!("\n--- [Workflow] Starting Monitoring Session ---");

    let output_dir = format!(
        "{}/session_{}",
        config.output_dir,
        chrono::Utc::now().format("%Y%m%d_%H%M%S")
    );
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create output directory: {}", output_dir))?;

    // Copy the effective configuration into the run directory for traceability
    let effective = serde_yaml::to_string(config).context("Failed to serialize configuration")?;
    fs::write(Path::new(&output_dir).join("config.yaml"), effective)?;

    let source = build_source(config, options.offline)?;
    let log_path = Path::new(&output_dir).join("monitor_log.csv");
    let log_path_str = log_path
        .to_str()
        .context("Output path is not valid UTF-8")?
        .to_string();

    let mut engine = MonitorBuilder::new()
        .with_source(source)
        .with_limits(config.limits.clone())
        .with_capacity(config.history_capacity)
        .with_tick_interval(Duration::from_secs(config.tick_interval_secs))
        .with_timeseries_logging_to_file(&log_path_str)
        .build()?;

    let seeded = engine.seed_history()?;
    println!("[Workflow] History seeded with {} samples", seeded);

    let limits = engine.limits().clone();
    engine.run(options.ticks, |report, store| {
        print_indicators(report, store, &limits);
        if report.tick % REDRAW_EVERY_TICKS == 0 {
            plotting::generate_all_plots(&output_dir, &log_path_str, &limits)?;
        }
        Ok(())
    })?;

    plotting::generate_all_plots(&output_dir, &log_path_str, engine.limits())?;
    write_alerts_report(&output_dir, engine.alerts())?;
    print_summary_report(&engine);

    println!("\nMonitoring session complete. Results are in '{}'", output_dir);
    Ok(())
}

fn build_source(config: &DashboardConfig, offline: bool) -> Result<Box<dyn ReadingSource>> {
    let generator = SyntheticGenerator::new(config.limits.synthetic.clone());

    if offline {
        println!("[Workflow] Offline mode: all readings will be synthetic");
        return Ok(Box::new(SyntheticSource::new(generator)));
    }

    let client = TelemetryClient::new(
        &config.base_url,
        &config.channel_id,
        config.api_key.clone(),
        Duration::from_secs(config.request_timeout_secs),
    )?;
    println!(
        "[Workflow] Polling channel {} every {}s",
        config.channel_id, config.tick_interval_secs
    );
    Ok(Box::new(RemoteSource::new(client, generator)))
}

/// Current-value indicators for each field, printed once per tick.
fn print_indicators(report: &TickReport, store: &SampleStore, limits: &QualityLimits) {
    let r = &report.sample.reading;
    let band = quality::quality_band(report.quality_index, limits);
    let origin = match report.sample.provenance {
        Provenance::Authentic => "live",
        Provenance::Synthetic => "synthetic",
    };
    let flow_delta = r.flow_rate_l_min - limits.nominal_flow_l_min;

    println!(
        "[Monitor] tick {:>4} ({:>9}) | level {:>5.1} % | temp {:>4.1} °C | flow {:>4.2} L/min ({:+.2}) | turbidity {:>5.2} NTU | pH {:>4.2} | TDS {:>6.1} mg/L | quality {:>5.1}% ({}) | {} | history {}/{}",
        report.tick,
        origin,
        r.reservoir_level_pct,
        r.temperature_c,
        r.flow_rate_l_min,
        flow_delta,
        r.turbidity_ntu,
        r.ph,
        r.dissolved_solids_mg_l,
        report.quality_index,
        band,
        report.severity,
        store.len(),
        store.capacity(),
    );

    if let Some(alert) = &report.alert {
        println!("[Monitor]   !! {}", alert.subject);
    }
}

fn write_alerts_report(output_dir: &str, alerts: &[Alert]) -> Result<()> {
    let mut table = String::from(
        "| # | Subject | Turbidity (NTU) | pH | Temperature (°C) | TDS (mg/L) | Level (%) | Quality | When |\n",
    );
    table.push_str(
        "|---|---------|-----------------|----|------------------|------------|-----------|---------|------|\n",
    );

    if alerts.is_empty() {
        table.push_str("| - | *None* | | | | | | | |\n");
    }
    for (i, alert) in alerts.iter().enumerate() {
        table.push_str(&format!(
            "| {} | {} | {:.2} | {:.2} | {:.2} | {:.0} | {:.1} | {:.1}% | {} |\n",
            i + 1,
            alert.subject,
            alert.reading.turbidity_ntu,
            alert.reading.ph,
            alert.reading.temperature_c,
            alert.reading.dissolved_solids_mg_l,
            alert.reading.reservoir_level_pct,
            alert.quality_index,
            alert.reading.timestamp.format("%d/%m/%Y %H:%M:%S"),
        ));
    }

    fs::write(Path::new(output_dir).join("alerts_report.md"), table)?;
    Ok(())
}

fn print_summary_report(engine: &MonitorEngine) {
    let store = engine.store();
    let authentic = store
        .iter()
        .filter(|s| s.provenance == Provenance::Authentic)
        .count();
    let synthetic = store.len() - authentic;

    println!("\n\n--- [Final Summary Report] ---");
    println!("========================================");
    println!("Session Summary:");
    println!("  - Ticks completed:  {}", engine.ticks_completed());
    println!(
        "  - History retained: {} / {} samples",
        store.len(),
        store.capacity()
    );
    println!(
        "  - Sample origin:    {} live / {} synthetic",
        authentic, synthetic
    );

    if let Some(latest) = store.latest() {
        let r = &latest.reading;
        let index = quality::quality_index(r);
        let band = quality::quality_band(index, engine.limits());
        println!("\nLatest Reading:");
        println!("  - Turbidity:         {:>8.2} NTU", r.turbidity_ntu);
        println!("  - pH:                {:>8.2}", r.ph);
        println!("  - Temperature:       {:>8.1} °C", r.temperature_c);
        println!("  - Dissolved Solids:  {:>8.0} mg/L", r.dissolved_solids_mg_l);
        println!("  - Reservoir Level:   {:>8.1} %", r.reservoir_level_pct);
        println!("  - Flow Rate:         {:>8.2} L/min", r.flow_rate_l_min);
        println!("  - Quality Index:     {:>8.1} % ({})", index, band);
    }

    let critical = engine
        .alerts()
        .iter()
        .filter(|a| a.severity == Severity::Critical)
        .count();
    let attention = engine.alerts().len() - critical;
    println!("\nAlerts:");
    println!("  - Critical:  {}", critical);
    println!("  - Attention: {}", attention);

    println!("========================================");
}
