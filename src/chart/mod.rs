//! Result visualization: one chart, entity count on x, seconds on y, one
//! line series per sweep.
//!
//! Rendering assumes well-formed, non-empty sweep results; callers filter
//! out empty sweeps before calling in. Output is an SVG file.

use crate::error::{Result, SimscaleError};
use crate::sweep::SweepResult;
use plotters::prelude::*;
use std::path::Path;

const CHART_SIZE: (u32, u32) = (1024, 768);

/// Render one labeled line series per sweep onto shared axes.
///
/// The label is the step count when multiple sweeps are combined; a legend
/// is drawn only when more than one series is present. Tick labels use
/// plain (non-scientific) formatting on both axes.
///
/// # Errors
///
/// Returns a configuration error when `series` is empty or holds only
/// empty sweeps, and a chart error if drawing fails.
pub fn render(series: &[(String, SweepResult)], out_path: &Path) -> Result<()> {
    let populated: Vec<&(String, SweepResult)> =
        series.iter().filter(|(_, r)| !r.is_empty()).collect();
    if populated.is_empty() {
        return Err(SimscaleError::Config(
            "no sweep results to chart".to_string(),
        ));
    }

    let x_max = populated
        .iter()
        .flat_map(|(_, r)| r.keys())
        .max()
        .copied()
        .unwrap_or(1) as f64;
    let y_max = populated
        .iter()
        .flat_map(|(_, r)| r.values())
        .fold(0.0_f64, |acc, &d| acc.max(d));
    let y_top = if y_max > 0.0 { y_max * 1.05 } else { 1.0 };

    let root = SVGBackend::new(out_path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Engine run time vs entity count", ("sans-serif", 28))
        .margin(16)
        .x_label_area_size(48)
        .y_label_area_size(72)
        .build_cartesian_2d(0.0..x_max * 1.05, 0.0..y_top)
        .map_err(draw_err)?;

    chart
        .configure_mesh()
        .x_desc("Entities")
        .y_desc("Duration (seconds)")
        .x_label_formatter(&|v| format!("{v:.0}"))
        .y_label_formatter(&|v| format!("{v:.2}"))
        .draw()
        .map_err(draw_err)?;

    for (i, (label, result)) in populated.iter().enumerate() {
        let color = Palette99::pick(i).to_rgba();
        chart
            .draw_series(LineSeries::new(
                result.iter().map(|(&n, &d)| (n as f64, d)),
                color.stroke_width(2),
            ))
            .map_err(draw_err)?
            .label(label.clone())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 18, y)], color));
    }

    if populated.len() > 1 {
        chart
            .configure_series_labels()
            .border_style(BLACK)
            .background_style(WHITE.mix(0.85))
            .draw()
            .map_err(draw_err)?;
    }

    root.present().map_err(draw_err)?;
    Ok(())
}

fn draw_err<E: std::error::Error>(e: E) -> SimscaleError {
    SimscaleError::Chart(e.to_string())
}
