//! Line chart of the aggregated summary, rendered to PNG with Plotters.
//!
//! Date keys are placed by their day offset from the first date, so gaps in
//! the data show as gaps on the axis. Any other key type (months, text) is
//! placed at its position in key order. Tick labels map x back to the key.

use std::path::Path;

use chrono::{Days, NaiveDate};
use plotters::prelude::*;

use crate::analysis::Summary;
use crate::config::PlotLabels;
use crate::error::{AppError, EXIT_INPUT, EXIT_OUTPUT};

pub mod color;

pub use color::parse_color;

/// Legend label of the plotted series.
pub const SERIES_LABEL: &str = "total_service_user";

/// Light grey grid lines.
const GRID_COLOR: RGBColor = RGBColor(0xb0, 0xb0, 0xb0);
const GRID_ALPHA: f64 = 0.6;

/// Everything needed to draw the chart apart from the data.
#[derive(Debug, Clone)]
pub struct ChartStyle<'a> {
    pub color: RGBColor,
    pub labels: &'a PlotLabels,
    pub width: u32,
    pub height: u32,
}

impl<'a> ChartStyle<'a> {
    /// Resolve the configured colour name.
    pub fn new(color: &str, labels: &'a PlotLabels, width: u32, height: u32) -> Result<Self, AppError> {
        let color = parse_color(color)
            .ok_or_else(|| AppError::new(EXIT_INPUT, format!("Unknown plot_color '{color}'")))?;
        Ok(Self {
            color,
            labels,
            width,
            height,
        })
    }
}

/// Draw `total_service_user` per group and save it as a PNG at `path`.
pub fn render_line_chart(path: &Path, summary: &Summary, style: &ChartStyle<'_>) -> Result<(), AppError> {
    draw(path, summary, style).map_err(|e| {
        AppError::new(
            EXIT_OUTPUT,
            format!("Failed to save the plot as {}: {e}", path.display()),
        )
    })
}

fn draw(path: &Path, summary: &Summary, style: &ChartStyle<'_>) -> Result<(), Box<dyn std::error::Error>> {
    let (axis, points) = XAxis::place(summary);
    let (x_range, y_range) = axis_ranges(&points);

    let root = BitMapBackend::new(path, (style.width, style.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&style.labels.title, ("sans-serif", 20))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, y_range)?;

    // The mesh is drawn before the series, which keeps the grid behind the line.
    let tick = |x: &f64| axis.tick_label(*x);
    chart
        .configure_mesh()
        .x_desc(&style.labels.xlabel)
        .y_desc(&style.labels.ylabel)
        .x_labels(points.len().clamp(2, 8))
        .x_label_formatter(&tick)
        .bold_line_style(&GRID_COLOR.mix(GRID_ALPHA))
        .light_line_style(&WHITE)
        .draw()?;

    let color = style.color;
    chart
        .draw_series(LineSeries::new(points, color.stroke_width(2)))?
        .label(SERIES_LABEL)
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

/// How group keys map to x positions.
#[derive(Debug, Clone, PartialEq)]
enum XAxis {
    /// Days since the first date.
    Dates(NaiveDate),
    /// Position in key order.
    Ordinal(Vec<String>),
}

impl XAxis {
    fn place(summary: &Summary) -> (XAxis, Vec<(f64, f64)>) {
        let dates: Option<Vec<NaiveDate>> = summary.rows.iter().map(|r| r.key.as_date()).collect();
        if let Some(first) = dates.as_ref().and_then(|d| d.iter().min().copied()) {
            let points = dates
                .into_iter()
                .flatten()
                .zip(summary.totals())
                .map(|(date, (_, total))| ((date - first).num_days() as f64, total))
                .collect();
            return (XAxis::Dates(first), points);
        }

        let labels = summary.rows.iter().map(|r| r.key.to_string()).collect();
        let points = summary
            .totals()
            .enumerate()
            .map(|(idx, (_, total))| (idx as f64, total))
            .collect();
        (XAxis::Ordinal(labels), points)
    }

    /// Label for `x`, empty unless `x` lands on a whole step.
    fn tick_label(&self, x: f64) -> String {
        let step = x.round();
        if (x - step).abs() > 1e-6 || step < 0.0 {
            return String::new();
        }
        match self {
            XAxis::Dates(first) => first
                .checked_add_days(Days::new(step as u64))
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            XAxis::Ordinal(labels) => labels.get(step as usize).cloned().unwrap_or_default(),
        }
    }
}

/// Axis ranges with a 5% margin. Degenerate inputs get a unit-sized range.
fn axis_ranges(points: &[(f64, f64)]) -> (std::ops::Range<f64>, std::ops::Range<f64>) {
    if points.is_empty() {
        return (0.0..1.0, 0.0..1.0);
    }

    let (x_min, x_max) = bounds(points.iter().map(|&(x, _)| x));
    let x_pad = (x_max - x_min).max(1.0) * 0.05;

    let (y_min, y_max) = bounds(points.iter().map(|&(_, y)| y));
    let y_pad = if y_max > y_min { (y_max - y_min) * 0.05 } else { y_max.abs().max(1.0) * 0.05 };

    (x_min - x_pad..x_max + x_pad, y_min - y_pad..y_max + y_pad)
}

fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)))
}
