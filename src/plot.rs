//! Chart rendering to PNG or SVG files.

use crate::chart::{Chart, SciScale, DPI, Y_LABELS};
use crate::font;
use crate::style::Marker;
use anyhow::{Context, Result};
use clap::ValueEnum;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use plotters::style::FontStyle;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

type Plane = Cartesian2d<RangedCoordf64, RangedCoordf64>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ImageFormat {
    #[default]
    Png,
    Svg,
}

impl ImageFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Svg => "svg",
        }
    }
}

/// How charts are written to disk
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub format: ImageFormat,
    /// TrueType font for all chart text, system fonts when `None`
    pub font: Option<PathBuf>,
}

/// Path of an output file in `dir`, with the extension of `format`
pub fn output_path(dir: &Path, file_name: &str, format: ImageFormat) -> PathBuf {
    dir.join(file_name).with_extension(format.extension())
}

/// Convert a size in points to pixels at the chart resolution
fn px(points: f64) -> u32 {
    (points * DPI / 72.0).round() as u32
}

fn font_px(points: f64) -> f64 {
    f64::from(px(points))
}

/// Render a chart to `path`
pub fn render<P: AsRef<Path>>(chart: &Chart, path: P, options: &RenderOptions) -> Result<()> {
    let path = path.as_ref();
    font::ensure(options.font.as_deref())?;

    let size = chart.pixel_size();
    match options.format {
        ImageFormat::Png => {
            let root = BitMapBackend::new(path, size).into_drawing_area();
            draw(chart, &root)?;
            root.present()
                .with_context(|| format!("Failed to write image: {}", path.display()))?;
        }
        ImageFormat::Svg => {
            let root = SVGBackend::new(path, size).into_drawing_area();
            draw(chart, &root)?;
            root.present()
                .with_context(|| format!("Failed to write image: {}", path.display()))?;
        }
    }

    log::debug!("rendered {} lines to {}", chart.lines.len(), path.display());
    Ok(())
}

fn draw<DB: DrawingBackend>(chart: &Chart, root: &DrawingArea<DB, Shift>) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;

    let title_font = ("sans-serif", font_px(14.0)).into_font().style(FontStyle::Bold);
    let (area, caption) = match &chart.subtitle {
        Some(subtitle) => (root.titled(&chart.title, title_font.clone())?, subtitle.as_str()),
        None => (root.clone(), chart.title.as_str()),
    };

    let mut builder = ChartBuilder::on(&area);
    builder
        .caption(caption, title_font)
        .margin(px(8.0))
        .x_label_area_size(px(30.0))
        .y_label_area_size(px(40.0));
    let mut ctx = builder.build_cartesian_2d(
        chart.x_range.0..chart.x_range.1,
        chart.y_range.0..chart.y_range.1,
    )?;

    // Axes and grid
    let y_scale = SciScale::for_range(chart.y_range, Y_LABELS);
    let y_desc = if chart.scientific_y {
        y_scale.describe(&chart.y_desc)
    } else {
        chart.y_desc.clone()
    };
    let x_fmt = |x: &f64| integer_label(*x);
    let y_fmt = |y: &f64| y_scale.format(*y);

    let mut mesh = ctx.configure_mesh();
    mesh.x_desc(chart.x_desc.as_str())
        .y_desc(y_desc.as_str())
        .axis_desc_style(("sans-serif", font_px(12.0)))
        .label_style(("sans-serif", font_px(10.0)))
        .x_label_formatter(&x_fmt)
        .y_labels(Y_LABELS)
        .bold_line_style(BLACK.mix(0.12))
        .light_line_style(WHITE.mix(0.0));
    if let Some(count) = chart.x_labels {
        mesh.x_labels(count);
    }
    if chart.scientific_y {
        mesh.y_label_formatter(&y_fmt);
    }
    mesh.draw()?;

    // Data
    let legend_len = px(18.0) as i32;
    for line in &chart.lines {
        let color = RGBColor(line.color.0, line.color.1, line.color.2).mix(line.opacity);
        let stroke = color.stroke_width(px(line.width).max(1));

        let anno = match line.style.dash_pattern() {
            None => ctx.draw_series(LineSeries::new(line.points.clone(), stroke))?,
            Some((dash, gap)) => ctx.draw_series(DashedLineSeries::new(
                line.points.clone(),
                px(dash).max(1),
                px(gap).max(1),
                stroke,
            ))?,
        };
        anno.label(line.label.clone()).legend(move |(x, y)| {
            PathElement::new(vec![(x, y), (x + legend_len, y)], stroke)
        });

        if let Some(marker) = line.marker {
            let radius = (px(line.marker_size) / 2).max(1) as i32;
            draw_markers(&mut ctx, &line.points, marker, color.filled(), radius)?;
        }
    }

    if !chart.lines.is_empty() {
        ctx.configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .label_font(("sans-serif", font_px(10.0)))
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK.mix(0.3))
            .draw()?;
    }

    Ok(())
}

fn draw_markers<DB: DrawingBackend>(
    ctx: &mut ChartContext<'_, DB, Plane>,
    points: &[(f64, f64)],
    marker: Marker,
    fill: ShapeStyle,
    r: i32,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    match marker {
        Marker::Circle => {
            ctx.draw_series(points.iter().map(|&p| Circle::new(p, r, fill)))?;
        }
        Marker::Square => {
            ctx.draw_series(
                points
                    .iter()
                    .map(|&p| EmptyElement::at(p) + Rectangle::new([(-r, -r), (r, r)], fill)),
            )?;
        }
        Marker::TriangleUp => {
            ctx.draw_series(points.iter().map(|&p| TriangleMarker::new(p, r, fill)))?;
        }
        Marker::TriangleDown => {
            ctx.draw_series(points.iter().map(|&p| {
                EmptyElement::at(p) + Polygon::new(vec![(-r, -r), (r, -r), (0, r)], fill)
            }))?;
        }
        Marker::Diamond => {
            ctx.draw_series(points.iter().map(|&p| {
                EmptyElement::at(p) + Polygon::new(vec![(0, -r), (r, 0), (0, r), (-r, 0)], fill)
            }))?;
        }
    }
    Ok(())
}

/// Tick label for axes that only carry whole numbers (threads, percentages)
fn integer_label(value: f64) -> String {
    if (value - value.round()).abs() < 1e-9 {
        format!("{}", value.round() as i64)
    } else {
        String::new()
    }
}

/// Write the constructed charts as pretty JSON, keyed by output file name
pub fn write_dump<P: AsRef<Path>>(path: P, charts: &BTreeMap<String, Chart>) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)
        .with_context(|| format!("Failed to create dump file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, charts)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
