//! Benchmark plotter - renders spinlock and linked-list benchmark results.
//!
//! Spinlock timings are embedded in the binary. Linked-list results are read
//! from CSV files in a results directory.

mod chart;
mod dataset;
mod driver;
mod error;
mod font;
mod ingest;
mod plot;
mod style;
mod viewer;

use anyhow::{Context, Result};
use chart::Statistic;
use clap::{ArgAction, Parser, Subcommand};
use dataset::DatasetName;
use driver::DriverConfig;
use plot::{ImageFormat, RenderOptions};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Render concurrent data structure benchmark results as charts
#[derive(Parser, Debug)]
#[command(name = "benchplot")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Image format of the generated charts
    #[arg(long, value_enum, default_value_t = ImageFormat::Png, global = true)]
    format: ImageFormat,

    /// Directory for generated images (default depends on the subcommand)
    #[arg(short, long, global = true)]
    output_dir: Option<PathBuf>,

    /// TrueType font for chart text (default: $BENCHPLOT_FONT or a system font)
    #[arg(long, global = true)]
    font: Option<PathBuf>,

    /// Also write the plotted series as JSON to this file
    #[arg(long, global = true)]
    dump_series: Option<PathBuf>,

    /// More diagnostics on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plot the embedded spinlock timings (time vs threads)
    Spinlock {
        /// Which benchmark run to plot
        #[arg(short, long, value_enum, default_value_t = DatasetName::Laptop)]
        dataset: DatasetName,

        /// Open the saved image in the system viewer
        #[arg(long)]
        show: bool,
    },

    /// Plot linked-list throughput from the CSV files in a results directory
    Lists {
        /// Results directory (default: results/ next to the executable's directory)
        #[arg(short, long)]
        results_dir: Option<PathBuf>,

        /// Sample column plotted on the y axis
        #[arg(long, value_enum, default_value_t = Statistic::Median)]
        statistic: Statistic,

        /// Comma-separated implementations to plot, in legend order
        #[arg(long, value_delimiter = ',')]
        order: Vec<String>,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let render = RenderOptions {
        format: args.format,
        font: args.font.clone(),
    };

    match args.command {
        Command::Spinlock { dataset, show } => run_spinlock(&args, dataset, show, &render),
        Command::Lists {
            ref results_dir,
            statistic,
            ref order,
        } => {
            let results_dir = match results_dir {
                Some(dir) => dir.clone(),
                None => driver::default_results_dir()?,
            };
            let config = DriverConfig {
                results_dir,
                output_dir: args.output_dir.clone(),
                order: order.clone(),
                statistic,
                render,
                dump: args.dump_series.clone(),
            };
            driver::run(&config)?;
            Ok(())
        }
    }
}

fn run_spinlock(args: &Args, name: DatasetName, show: bool, render: &RenderOptions) -> Result<()> {
    let dataset = name.dataset();
    let chart = chart::spinlock(dataset)?;

    let output_dir = match &args.output_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir).with_context(|| {
                format!("Failed to create output directory: {}", dir.display())
            })?;
            dir.as_path()
        }
        None => Path::new(""),
    };
    let path = plot::output_path(output_dir, dataset.output, render.format);

    plot::render(&chart, &path, render)?;
    println!("Plot saved as {}", path.display());

    if let Some(dump) = &args.dump_series {
        let mut charts = BTreeMap::new();
        charts.insert(dataset.output.to_string(), chart);
        plot::write_dump(dump, &charts)?;
    }

    if show {
        viewer::show(&path);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn subcommands_run_without_arguments() {
        let args = Args::try_parse_from(["benchplot", "lists"]).expect("parse lists");
        match args.command {
            Command::Lists { results_dir, statistic, order } => {
                assert!(results_dir.is_none());
                assert_eq!(statistic, Statistic::Median);
                assert!(order.is_empty());
            }
            other => panic!("unexpected command: {other:?}"),
        }

        let args = Args::try_parse_from(["benchplot", "spinlock"]).expect("parse spinlock");
        assert!(matches!(
            args.command,
            Command::Spinlock { dataset: DatasetName::Laptop, show: false }
        ));
        assert_eq!(args.format, ImageFormat::Png);
    }

    #[test]
    fn options_parse() {
        let args = Args::try_parse_from([
            "benchplot",
            "lists",
            "--order",
            "lockfree,lazy",
            "--statistic",
            "avg",
            "--format",
            "svg",
            "-vv",
        ])
        .expect("parse");
        assert_eq!(args.format, ImageFormat::Svg);
        assert_eq!(args.verbose, 2);
        match args.command {
            Command::Lists { order, statistic, .. } => {
                assert_eq!(order, vec!["lockfree", "lazy"]);
                assert_eq!(statistic, Statistic::Avg);
            }
            other => panic!("unexpected command: {other:?}"),
        }

        let args = Args::try_parse_from(["benchplot", "spinlock", "--dataset", "turing24"])
            .expect("parse");
        assert!(matches!(
            args.command,
            Command::Spinlock { dataset: DatasetName::Turing24, .. }
        ));
    }
}
