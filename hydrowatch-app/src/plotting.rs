//! This module is responsible for generating all charts from session log data.

use anyhow::Result;
use chrono::{DateTime, Utc};
use hydrowatch_schemas::{
    alert::Severity,
    limits::QualityLimits,
    reading::Provenance,
};
use plotters::prelude::*;
use serde::Deserialize;

const ORANGE: RGBColor = RGBColor(255, 165, 0);

/// One parsed row of the session log, as written by the core logger.
#[derive(Debug, Clone, Deserialize)]
struct LogRow {
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

/// The main function to generate and save all charts for a session.
pub fn generate_all_plots(output_dir: &str, log_path: &str, limits: &QualityLimits) -> Result<()> {
    println!("[Plotting] Generating charts from session data...");

    let data = parse_log_file(log_path)?;

    if data.is_empty() {
        println!("[Plotting] Warning: No data to plot.");
        return Ok(());
    }

    plot_single_parameter(
        output_dir,
        "1_turbidity.png",
        "Water Turbidity",
        "Turbidity (NTU)",
        &data,
        |d| d.turbidity_ntu,
        &[
            (1.0, GREEN, "Ideal (1 NTU)"),
            (5.0, ORANGE, "Acceptable (5 NTU)"),
        ],
    )?;
    plot_single_parameter(
        output_dir,
        "2_ph.png",
        "Water pH",
        "pH",
        &data,
        |d| d.ph,
        &[
            (7.0, GREEN, "Neutral (7.0)"),
            (6.5, ORANGE, "Lower limit (6.5)"),
            (8.5, ORANGE, "Upper limit (8.5)"),
        ],
    )?;
    plot_single_parameter(
        output_dir,
        "3_temperature.png",
        "Water Temperature",
        "Temperature (°C)",
        &data,
        |d| d.temperature_c,
        &[
            (22.5, GREEN, "Ideal (22.5°C)"),
            (25.0, ORANGE, "Upper limit (25°C)"),
        ],
    )?;
    plot_single_parameter(
        output_dir,
        "4_dissolved_solids.png",
        "Dissolved Solids (TDS)",
        "Dissolved Solids (mg/L)",
        &data,
        |d| d.dissolved_solids_mg_l,
        &[
            (500.0, GREEN, "Ideal (500 mg/L)"),
            (1000.0, ORANGE, "Acceptable (1000 mg/L)"),
        ],
    )?;
    plot_reservoir_and_flow(output_dir, &data, limits)?;
    plot_quality_index(output_dir, &data, limits)?;
    plot_alert_timeline(output_dir, &data)?;

    println!("[Plotting] Charts have been saved to '{}'.", output_dir);
    Ok(())
}

/// Parses the session log CSV file into a vector of `LogRow` structs.
fn parse_log_file(log_path: &str) -> Result<Vec<LogRow>> {
    let mut reader = csv::Reader::from_path(log_path)?;
    let mut data = Vec::new();

    for result in reader.deserialize() {
        let row: LogRow = result?;
        data.push(row);
    }

    Ok(data)
}

/// Line chart of one sensor parameter with dashed threshold guide lines.
fn plot_single_parameter(
    output_dir: &str,
    file_name: &str,
    caption: &str,
    y_desc: &str,
    data: &[LogRow],
    value: fn(&LogRow) -> f64,
    guides: &[(f64, RGBColor, &str)],
) -> Result<()> {
    let path = format!("{}/{}", output_dir, file_name);
    let root = BitMapBackend::new(&path, (1024, 768)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_index = data.len().saturating_sub(1).max(1) as u64;
    let max_value = data.iter().map(value).fold(0.0f64, f64::max);
    let guide_max = guides.iter().map(|g| g.0).fold(0.0f64, f64::max);
    let y_max = (max_value.max(guide_max) * 1.1).max(1.0);

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 50).into_font())
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_cartesian_2d(0u64..max_index, 0f64..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Sample")
        .y_desc(y_desc)
        .draw()?;

    chart
        .draw_series(LineSeries::new(
            data.iter().enumerate().map(|(i, d)| (i as u64, value(d))),
            BLUE.stroke_width(2),
        ))?
        .label(y_desc)
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE.filled()));

    for &(threshold, color, label) in guides {
        chart
            .draw_series(DashedLineSeries::new(
                (0..=max_index).map(move |x| (x, threshold)),
                5,
                5,
                (&color).into(),
            ))?
            .label(label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    root.present()?;
    Ok(())
}

/// Reservoir level and flow rate on a shared 0-100 axis, with the flow
/// scaled by ten to stay readable next to the percentage.
fn plot_reservoir_and_flow(output_dir: &str, data: &[LogRow], limits: &QualityLimits) -> Result<()> {
    let path = format!("{}/5_reservoir_and_flow.png", output_dir);
    let root = BitMapBackend::new(&path, (1024, 768)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_index = data.len().saturating_sub(1).max(1) as u64;

    let mut chart = ChartBuilder::on(&root)
        .caption("Reservoir Level and Flow Rate", ("sans-serif", 50).into_font())
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_cartesian_2d(0u64..max_index, 0f64..100f64)?;

    chart
        .configure_mesh()
        .x_desc("Sample")
        .y_desc("Value")
        .draw()?;

    chart
        .draw_series(LineSeries::new(
            data.iter()
                .enumerate()
                .map(|(i, d)| (i as u64, d.reservoir_level_pct)),
            BLUE.stroke_width(3),
        ))?
        .label("Reservoir Level (%)")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE.filled()));

    chart
        .draw_series(LineSeries::new(
            data.iter()
                .enumerate()
                .map(|(i, d)| (i as u64, d.flow_rate_l_min * 10.0)),
            GREEN.stroke_width(3),
        ))?
        .label("Flow Rate (L/min × 10)")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], GREEN.filled()));

    let attention = limits.reservoir_attention_pct;
    chart
        .draw_series(DashedLineSeries::new(
            (0..=max_index).map(move |x| (x, attention)),
            5,
            5,
            (&ORANGE).into(),
        ))?
        .label("Attention level")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], ORANGE.filled()));

    let critical = limits.reservoir_critical_pct;
    chart
        .draw_series(DashedLineSeries::new(
            (0..=max_index).map(move |x| (x, critical)),
            5,
            5,
            (&RED).into(),
        ))?
        .label("Critical level")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.filled()));

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    root.present()?;
    Ok(())
}

/// The composite quality index with its band cutoffs. The caption reports
/// how much of the window came from the synthetic fallback.
fn plot_quality_index(output_dir: &str, data: &[LogRow], limits: &QualityLimits) -> Result<()> {
    let path = format!("{}/6_quality_index.png", output_dir);
    let root = BitMapBackend::new(&path, (1024, 768)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_index = data.len().saturating_sub(1).max(1) as u64;
    let synthetic = data
        .iter()
        .filter(|d| d.provenance == Provenance::Synthetic)
        .count();
    let caption = format!(
        "Overall Water Quality ({} of {} samples synthetic)",
        synthetic,
        data.len()
    );

    let mut chart = ChartBuilder::on(&root)
        .caption(&caption, ("sans-serif", 50).into_font())
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_cartesian_2d(0u64..max_index, 0f64..100f64)?;

    chart
        .configure_mesh()
        .x_desc("Sample")
        .y_desc("Quality Index (%)")
        .draw()?;

    chart
        .draw_series(LineSeries::new(
            data.iter()
                .enumerate()
                .map(|(i, d)| (i as u64, d.quality_index)),
            BLUE.stroke_width(3),
        ))?
        .label("Quality Index")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE.filled()));

    let bands = [
        (limits.quality_good, GREEN, "Good quality"),
        (limits.quality_fair, ORANGE, "Fair quality"),
        (limits.quality_poor, RED, "Poor quality"),
    ];
    for (cutoff, color, label) in bands {
        chart
            .draw_series(DashedLineSeries::new(
                (0..=max_index).map(move |x| (x, cutoff)),
                5,
                5,
                (&color).into(),
            ))?
            .label(format!("{} ({:.0}%)", label, cutoff))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    root.present()?;
    Ok(())
}

/// Generates a timeline strip highlighting the samples that raised alerts.
fn plot_alert_timeline(output_dir: &str, data: &[LogRow]) -> Result<()> {
    let path = format!("{}/7_alert_timeline.png", output_dir);
    let root = BitMapBackend::new(&path, (1024, 256)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_index = data.len().saturating_sub(1).max(1) as u64;

    let mut chart = ChartBuilder::on(&root)
        .caption("Alert Events", ("sans-serif", 30).into_font())
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(20)
        .build_cartesian_2d(0u64..max_index, 0..2i32)?;

    chart
        .configure_mesh()
        .x_desc("Sample")
        .disable_y_axis()
        .draw()?;

    let alert_rows: Vec<u64> = data
        .iter()
        .enumerate()
        .filter_map(|(i, d)| {
            if d.severity != Severity::Operational {
                Some(i as u64)
            } else {
                None
            }
        })
        .collect();

    chart.draw_series(
        Histogram::vertical(&chart)
            .style(RED.filled())
            .data(alert_rows.iter().map(|row| (*row, 1))),
    )?;

    root.present()?;
    Ok(())
}
