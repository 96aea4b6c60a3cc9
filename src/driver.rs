//! Linked-list chart generation from a results directory.

use crate::chart::{self, Chart, Statistic};
use crate::ingest::{self, Results};
use crate::plot::{self, RenderOptions};
use crate::style::PREFERRED_ORDER;
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy)]
enum ChartKind {
    ThreadScaling {
        title: &'static str,
        y_desc: &'static str,
    },
    ContainsRatio,
}

/// An expected results file and the chart drawn from it
#[derive(Debug, Clone, Copy)]
pub struct ListPlot {
    pub input: &'static str,
    pub output: &'static str,
    kind: ChartKind,
}

impl ListPlot {
    fn build(&self, results: &Results, order: &[&str], statistic: Statistic) -> Result<Chart> {
        let chart = match self.kind {
            ChartKind::ThreadScaling { title, y_desc } => {
                chart::thread_scaling(results, order, statistic, title, y_desc)?
            }
            ChartKind::ContainsRatio => chart::contains_ratio(results, order, statistic)?,
        };
        Ok(chart)
    }
}

pub const LIST_PLOTS: [ListPlot; 3] = [
    ListPlot {
        input: "high_contains.csv",
        output: "plot_high_contains.png",
        kind: ChartKind::ThreadScaling {
            title: "High Contains Ratio",
            y_desc: "Ops/sec (90% reads/0 load)",
        },
    },
    ListPlot {
        input: "low_contains.csv",
        output: "plot_low_contains.png",
        kind: ChartKind::ThreadScaling {
            title: "Low Contains Ratio",
            // Same description as the high-contains chart
            y_desc: "Ops/sec (90% reads/0 load)",
        },
    },
    ListPlot {
        input: "varying_contains.csv",
        output: "plot_varying_contains.png",
        kind: ChartKind::ContainsRatio,
    },
];

#[derive(Debug, Clone, Default)]
pub struct DriverConfig {
    pub results_dir: PathBuf,
    /// Where images go, the results directory when `None`
    pub output_dir: Option<PathBuf>,
    /// Rendering order of implementations, the preferred order when empty
    pub order: Vec<String>,
    pub statistic: Statistic,
    pub render: RenderOptions,
    pub dump: Option<PathBuf>,
}

impl DriverConfig {
    fn order(&self) -> Vec<&str> {
        if self.order.is_empty() {
            PREFERRED_ORDER.to_vec()
        } else {
            self.order.iter().map(String::as_str).collect()
        }
    }
}

/// What a driver run produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    pub generated: Vec<PathBuf>,
    pub missing: Vec<PathBuf>,
}

/// `results/` next to the directory holding the running executable
pub fn default_results_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("Failed to locate the running executable")?;
    let exe_dir = exe.parent().unwrap_or_else(|| Path::new("."));
    let base = exe_dir.parent().unwrap_or(exe_dir);
    Ok(base.join("results"))
}

/// Render every linked-list chart whose input file exists.
///
/// Missing inputs are reported and skipped. A missing results directory is
/// reported and yields an empty report, not an error.
pub fn run(config: &DriverConfig) -> Result<Report> {
    run_with_output(config, &mut std::io::stdout().lock())
}

/// [`run`], writing progress messages to `out`
pub fn run_with_output<W: Write>(config: &DriverConfig, out: &mut W) -> Result<Report> {
    let mut report = Report::default();

    if !config.results_dir.is_dir() {
        writeln!(
            out,
            "Error: Results directory not found: {}",
            config.results_dir.display()
        )?;
        return Ok(report);
    }

    let output_dir = config.output_dir.as_deref().unwrap_or(&config.results_dir);
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory: {}", output_dir.display()))?;

    writeln!(out, "Generating plots...")?;

    let order = config.order();
    let mut charts = BTreeMap::new();
    for plot in &LIST_PLOTS {
        let input = config.results_dir.join(plot.input);
        if !input.exists() {
            writeln!(out, "Warning: {} not found", input.display())?;
            report.missing.push(input);
            continue;
        }

        let results = ingest::read_results(&input)?;
        let chart = plot
            .build(&results, &order, config.statistic)
            .with_context(|| format!("Failed to build chart from {}", input.display()))?;

        let output = plot::output_path(output_dir, plot.output, config.render.format);
        plot::render(&chart, &output, &config.render)?;
        writeln!(out, "Saved {}", output.display())?;

        charts.insert(plot.output.to_string(), chart);
        report.generated.push(output);
    }

    if let Some(dump) = &config.dump {
        plot::write_dump(dump, &charts)?;
    }

    writeln!(out, "\nAll plots generated successfully!")?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::read_results_from;
    use crate::plot::ImageFormat;

    const HIGH: &str = "impl,threads,contains_pct,median,avg\n\
                        coarse,1,90,1.2e6,1.1e6\n\
                        coarse,2,90,0.9e6,0.9e6\n\
                        lazy,1,90,1.4e6,1.3e6\n\
                        lazy,2,90,2.6e6,2.5e6\n";

    fn config(dir: &Path) -> DriverConfig {
        DriverConfig {
            results_dir: dir.to_path_buf(),
            ..Default::default()
        }
    }

    fn run_captured(config: &DriverConfig) -> (Result<Report>, String) {
        let mut out = Vec::new();
        let result = run_with_output(config, &mut out);
        (result, String::from_utf8(out).expect("utf-8 output"))
    }

    #[test]
    fn missing_results_dir_produces_nothing() {
        let tmp = tempfile::tempdir().expect("temp dir");
        let results_dir = tmp.path().join("results");

        let (report, out) = run_captured(&config(&results_dir));

        assert_eq!(report.expect("driver run"), Report::default());
        assert_eq!(
            out,
            format!("Error: Results directory not found: {}\n", results_dir.display())
        );
        assert!(!results_dir.exists());
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
    }

    #[test]
    fn every_input_missing_is_three_warnings() {
        let tmp = tempfile::tempdir().expect("temp dir");

        let (report, out) = run_captured(&config(tmp.path()));
        let report = report.expect("driver run");

        assert!(report.generated.is_empty());
        assert_eq!(report.missing.len(), 3);
        assert_eq!(report.missing[0], tmp.path().join("high_contains.csv"));

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Generating plots...");
        assert_eq!(
            lines[1],
            format!("Warning: {} not found", tmp.path().join("high_contains.csv").display())
        );
        assert_eq!(lines.iter().filter(|l| l.starts_with("Warning: ")).count(), 3);
        assert_eq!(lines.last(), Some(&"All plots generated successfully!"));
    }

    #[test]
    #[ignore = "needs a TrueType font: set BENCHPLOT_FONT or install DejaVu Sans"]
    fn only_high_contains_renders_one_image() {
        let tmp = tempfile::tempdir().expect("temp dir");
        std::fs::write(tmp.path().join("high_contains.csv"), HIGH).expect("write csv");
        let dump = tmp.path().join("series.json");

        let (report, out) = run_captured(&DriverConfig {
            dump: Some(dump.clone()),
            ..config(tmp.path())
        });
        let report = report.expect("driver run");

        assert_eq!(report.generated, vec![tmp.path().join("plot_high_contains.png")]);
        assert_eq!(out.lines().filter(|l| l.starts_with("Warning: ")).count(), 2);
        assert!(out.contains("Saved "));
        assert_eq!(report.missing.len(), 2);
        assert!(tmp.path().join("plot_high_contains.png").is_file());
        assert!(!tmp.path().join("plot_low_contains.png").exists());

        let dumped: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(dump).unwrap()).unwrap();
        assert_eq!(dumped["plot_high_contains.png"]["lines"][1]["label"], "Lazy list");
    }

    #[test]
    #[ignore = "needs a TrueType font: set BENCHPLOT_FONT or install DejaVu Sans"]
    fn output_dir_and_svg_format() {
        let tmp = tempfile::tempdir().expect("temp dir");
        std::fs::write(tmp.path().join("low_contains.csv"), HIGH).expect("write csv");
        let out = tmp.path().join("charts");

        let report = run(&DriverConfig {
            output_dir: Some(out.clone()),
            render: RenderOptions {
                format: ImageFormat::Svg,
                font: None,
            },
            ..config(tmp.path())
        })
        .expect("driver run");

        assert_eq!(report.generated, vec![out.join("plot_low_contains.svg")]);
        assert!(out.join("plot_low_contains.svg").is_file());
    }

    #[test]
    fn malformed_csv_is_fatal() {
        let tmp = tempfile::tempdir().expect("temp dir");
        std::fs::write(
            tmp.path().join("high_contains.csv"),
            "impl,threads,contains_pct,median,avg\ncoarse,x,90,1.0,1.0\n",
        )
        .expect("write csv");

        let (result, _) = run_captured(&config(tmp.path()));
        let err = result.unwrap_err();
        assert!(format!("{err:#}").contains("line 2"));
    }

    #[test]
    fn unstyled_impl_in_custom_order_is_fatal() {
        let tmp = tempfile::tempdir().expect("temp dir");
        std::fs::write(
            tmp.path().join("varying_contains.csv"),
            "impl,threads,contains_pct,median,avg\nhazard,28,50,1.0,1.0\n",
        )
        .expect("write csv");

        let (result, _) = run_captured(&DriverConfig {
            order: vec!["hazard".to_string()],
            ..config(tmp.path())
        });
        let err = result.unwrap_err();
        assert!(format!("{err:#}").contains("hazard"));
    }

    #[test]
    fn both_thread_scaling_charts_describe_90_percent_reads() {
        let results = read_results_from(HIGH.as_bytes(), Path::new("low_contains.csv")).unwrap();
        for plot in &LIST_PLOTS[..2] {
            let chart = plot
                .build(&results, &PREFERRED_ORDER, Statistic::Median)
                .unwrap();
            assert_eq!(chart.y_desc, "Ops/sec (90% reads/0 load)");
        }
    }

    #[test]
    fn default_order_is_preferred_order() {
        let config = DriverConfig::default();
        assert_eq!(config.order(), PREFERRED_ORDER.to_vec());

        let custom = DriverConfig {
            order: vec!["lockfree".to_string(), "fine".to_string()],
            ..Default::default()
        };
        assert_eq!(custom.order(), vec!["lockfree", "fine"]);
    }

    #[test]
    fn default_results_dir_is_named_results() {
        let dir = default_results_dir().expect("results dir");
        assert_eq!(dir.file_name().and_then(|n| n.to_str()), Some("results"));
    }
}
