//! Chart descriptions built from benchmark data.
//!
//! A [`Chart`] holds everything that ends up in an image: the plotted points,
//! their appearance, labels and axis ranges. Building one never touches the
//! filesystem, so the same input always yields an identical chart.

use crate::dataset::SpinlockDataset;
use crate::error::{PlotError, Result};
use crate::ingest::{Results, Series};
use crate::style::{self, LineStyle, Marker, Rgb};
use clap::ValueEnum;
use serde::Serialize;

/// Output resolution of every chart
pub const DPI: f64 = 150.0;

/// Figure size of the linked-list charts, in inches
const LIST_FIGURE: (f64, f64) = (8.0, 6.0);

/// Upper bound on the number of y tick labels
pub const Y_LABELS: usize = 10;

/// One plotted line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    pub label: String,
    pub points: Vec<(f64, f64)>,
    pub color: Rgb,
    pub opacity: f64,
    pub marker: Option<Marker>,
    /// Marker diameter in points
    pub marker_size: f64,
    /// Stroke width in points
    pub width: f64,
    pub style: LineStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub title: String,
    pub subtitle: Option<String>,
    pub x_desc: String,
    pub y_desc: String,
    /// Figure size in inches
    pub figure: (f64, f64),
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    /// Approximate number of x tick labels, `None` lets the renderer choose
    pub x_labels: Option<usize>,
    pub scientific_y: bool,
    pub lines: Vec<Line>,
}

impl Chart {
    /// Image size in pixels at [`DPI`]
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            (self.figure.0 * DPI).round() as u32,
            (self.figure.1 * DPI).round() as u32,
        )
    }
}

/// Which sample column is plotted on the y axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Statistic {
    #[default]
    Median,
    Avg,
}

impl Statistic {
    fn values(self, series: &Series) -> &[f64] {
        match self {
            Statistic::Median => &series.median,
            Statistic::Avg => &series.avg,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum XAxis {
    Threads,
    ContainsPct,
}

impl XAxis {
    fn values(self, series: &Series) -> Vec<f64> {
        let column = match self {
            XAxis::Threads => &series.threads,
            XAxis::ContainsPct => &series.contains_pct,
        };
        column.iter().map(|&v| f64::from(v)).collect()
    }
}

/// Throughput against thread count, one line per implementation in `order`
pub fn thread_scaling(
    results: &Results,
    order: &[&str],
    statistic: Statistic,
    title: &str,
    y_desc: &str,
) -> Result<Chart> {
    list_chart(results, order, statistic, XAxis::Threads, title, "threads", y_desc)
}

/// Throughput against contains percentage at a fixed thread count
pub fn contains_ratio(results: &Results, order: &[&str], statistic: Statistic) -> Result<Chart> {
    list_chart(
        results,
        order,
        statistic,
        XAxis::ContainsPct,
        "As Contains Ratio Increases",
        "% Contains()",
        "Ops/sec (28 threads/0 load)",
    )
}

fn list_chart(
    results: &Results,
    order: &[&str],
    statistic: Statistic,
    axis: XAxis,
    title: &str,
    x_desc: &str,
    y_desc: &str,
) -> Result<Chart> {
    let mut lines = Vec::new();

    for &name in order {
        let Some(series) = results.get(name) else {
            log::debug!("'{name}' not in results, skipping");
            continue;
        };
        let style = style::lookup(name)
            .ok_or_else(|| PlotError::UnknownImplementation(name.to_string()))?;

        let points = axis
            .values(series)
            .into_iter()
            .zip(statistic.values(series).iter().copied())
            .collect();

        lines.push(Line {
            label: style.label.to_string(),
            points,
            color: style.color,
            opacity: 1.0,
            marker: Some(style.marker),
            marker_size: 8.0,
            width: 2.0,
            style: style.line,
        });
    }

    let skipped: Vec<&String> = results
        .keys()
        .filter(|name| !order.contains(&name.as_str()))
        .collect();
    if !skipped.is_empty() {
        log::info!("not plotting implementations outside the rendering order: {skipped:?}");
    }

    let (x_range, y_range) = data_ranges(&lines);
    Ok(Chart {
        title: title.to_string(),
        subtitle: None,
        x_desc: x_desc.to_string(),
        y_desc: y_desc.to_string(),
        figure: LIST_FIGURE,
        x_range,
        y_range,
        x_labels: None,
        scientific_y: true,
        lines,
    })
}

/// Time against thread count for the embedded spinlock timings
pub fn spinlock(dataset: &SpinlockDataset) -> Result<Chart> {
    let threads: Vec<f64> = dataset.threads.iter().map(|&t| f64::from(t)).collect();
    let marker_size = if dataset.threads.len() > 8 { 6.0 } else { 8.0 };

    let mut lines = Vec::with_capacity(dataset.variants.len() + 1);
    for (i, variant) in dataset.variants.iter().enumerate() {
        if variant.times.len() != threads.len() {
            return Err(PlotError::LengthMismatch {
                label: variant.label.to_string(),
                expected: threads.len(),
                actual: variant.times.len(),
            });
        }
        lines.push(Line {
            label: variant.label.to_string(),
            points: threads.iter().copied().zip(variant.times.iter().copied()).collect(),
            color: style::PALETTE[i % style::PALETTE.len()],
            opacity: 1.0,
            marker: Some(variant.marker),
            marker_size,
            width: 2.0,
            style: LineStyle::Solid,
        });
    }

    // Ideal
    lines.push(Line {
        label: "Ideal".to_string(),
        points: threads.iter().map(|&t| (t, dataset.ideal)).collect(),
        color: style::GRAY,
        opacity: 0.7,
        marker: None,
        marker_size: 0.0,
        width: 2.0,
        style: LineStyle::Dashed,
    });

    let x_labels = match dataset.tick_step {
        Some(step) => {
            let last = dataset.threads.last().copied().unwrap_or(0);
            Some((last / step.max(1)) as usize + 1)
        }
        None => Some(threads.len()),
    };

    let (x_range, y_range) = data_ranges(&lines);
    Ok(Chart {
        title: dataset.title.to_string(),
        subtitle: Some(dataset.subtitle.to_string()),
        x_desc: "Threads".to_string(),
        y_desc: "Time (seconds)".to_string(),
        figure: dataset.figure,
        x_range,
        y_range,
        x_labels,
        scientific_y: false,
        lines,
    })
}

/// Axis ranges covering every point with a 5% margin on each side
fn data_ranges(lines: &[Line]) -> ((f64, f64), (f64, f64)) {
    let xs = lines.iter().flat_map(|l| l.points.iter().map(|p| p.0));
    let ys = lines.iter().flat_map(|l| l.points.iter().map(|p| p.1));
    (padded_range(xs), padded_range(ys))
}

fn padded_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if min > max {
        return (0.0, 1.0);
    }
    let span = max - min;
    let pad = if span > 0.0 {
        span * 0.05
    } else if max != 0.0 {
        max.abs() * 0.05
    } else {
        0.5
    };
    (min - pad, max + pad)
}

/// Scientific notation for an axis: labels are divided by `10^exponent`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SciScale {
    pub exponent: i32,
    /// Digits after the decimal point, enough to tell adjacent ticks apart
    pub decimals: usize,
}

impl SciScale {
    /// Pick the exponent from the largest magnitude on the axis and the
    /// precision from the finest tick step `labels` ticks can have.
    pub fn for_range(range: (f64, f64), labels: usize) -> Self {
        let max_abs = range.0.abs().max(range.1.abs());
        let exponent = if max_abs > 0.0 && max_abs.is_finite() {
            max_abs.log10().floor() as i32
        } else {
            0
        };

        // At most `labels` ticks fit in the range, so they are at least
        // span / (labels + 1) apart
        let step = (range.1 - range.0).abs() / (labels + 1) as f64 / 10f64.powi(exponent);
        let decimals = if step > 0.0 && step.is_finite() {
            (-step.log10().floor()).clamp(1.0, 9.0) as usize
        } else {
            1
        };
        Self { exponent, decimals }
    }

    pub fn format(&self, value: f64) -> String {
        format!("{:.*}", self.decimals, value / 10f64.powi(self.exponent))
    }

    /// Axis description with the multiplier appended
    pub fn describe(&self, desc: &str) -> String {
        if self.exponent == 0 {
            desc.to_string()
        } else {
            format!("{desc} (x1e{})", self.exponent)
        }
    }
}
