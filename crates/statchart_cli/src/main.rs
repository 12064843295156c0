//! Statchart CLI
//!
//! Drives the chart interaction models from the command line:
//! - replay synthetic sessions and compare render strategies
//! - look up closest values and grid ticks
//! - step a range selector through a click script

mod config;
mod session;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use statchart_charts::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::config::{StatchartConfig, CONFIG_FILE_NAME};
use crate::session::ReplayReport;

/// Interactive statistical chart models
#[derive(Parser, Debug)]
#[command(name = "statchart")]
#[command(about = "Replay chart interaction sessions and inspect chart helpers")]
#[command(version)]
struct Cli {
    /// Configuration file (defaults to ./statchart.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay a synthetic session under each render strategy
    Compare {
        #[arg(long, value_enum, default_value_t = ChartKind::Both)]
        chart: ChartKind,

        /// Events per replay
        #[arg(long, default_value_t = 2_000)]
        events: usize,

        /// Samples in the synthetic time series
        #[arg(long, default_value_t = 20_000)]
        points: usize,

        /// Bars in the synthetic histogram
        #[arg(long, default_value_t = 24)]
        bars: usize,

        /// Print reports as JSON
        #[arg(long)]
        json: bool,
    },

    /// Find the index of the value closest to a needle
    Closest {
        /// Comma separated values
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
        values: Vec<f64>,

        #[arg(long, allow_hyphen_values = true)]
        needle: f64,

        /// Values are sorted ascending
        #[arg(long)]
        sorted: bool,
    },

    /// Print the grid ticks covering a range
    Ticks {
        #[arg(long, allow_hyphen_values = true)]
        min: f64,

        #[arg(long, allow_hyphen_values = true)]
        max: f64,

        #[arg(long, default_value_t = 5)]
        min_ticks: usize,

        /// Use `max` itself as the last tick
        #[arg(long)]
        value_as_max: bool,
    },

    /// Step a range selector through a script such as "e4 c4 e7 c7"
    Select {
        #[arg(long)]
        script: String,

        /// Number of selectable items
        #[arg(long, default_value_t = 10)]
        items: usize,
    },

    /// Write a default statchart.toml
    Init {
        /// Target directory or file
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ChartKind {
    Bar,
    TimeSeries,
    Both,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = if cli.verbose {
        EnvFilter::new(default_level)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Compare {
            chart,
            events,
            points,
            bars,
            json,
        } => {
            let config = StatchartConfig::load(cli.config.as_deref())?;
            cmd_compare(&config, chart, events, points, bars, json)
        }
        Commands::Closest {
            values,
            needle,
            sorted,
        } => cmd_closest(&values, needle, sorted),
        Commands::Ticks {
            min,
            max,
            min_ticks,
            value_as_max,
        } => cmd_ticks(min, max, min_ticks, value_as_max),
        Commands::Select { script, items } => cmd_select(&script, items),
        Commands::Init { path, force } => cmd_init(&path, force),
    }
}

fn cmd_compare(
    config: &StatchartConfig,
    chart: ChartKind,
    events: usize,
    points: usize,
    bars: usize,
    json: bool,
) -> Result<()> {
    let mut reports: Vec<ReplayReport> = Vec::new();

    if matches!(chart, ChartKind::Bar | ChartKind::Both) {
        let data = session::synthetic_bars(bars);
        let stream = session::bar_events(events, data.len());
        for strategy in RenderStrategy::ALL {
            reports.push(session::replay_bar(config, strategy, &data, &stream)?);
        }
    }

    if matches!(chart, ChartKind::TimeSeries | ChartKind::Both) {
        let series = session::synthetic_series(points)?;
        let style = config.canvas.chart_style();
        let stream =
            session::time_series_events(events, style.x_canvas_offset(), config.canvas.width);
        for strategy in RenderStrategy::ALL {
            reports.push(session::replay_time_series(
                config, strategy, &series, &stream,
            )?);
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    println!(
        "{:<12} {:<9} {:>7} {:>9} {:>8} {:>11}",
        "chart", "strategy", "frames", "rebuilds", "hits", "elapsed ms"
    );
    for r in &reports {
        println!(
            "{:<12} {:<9} {:>7} {:>9} {:>8} {:>11.2}",
            r.chart, r.strategy, r.frames, r.expensive_rebuilds, r.cache_hits, r.elapsed_ms
        );
    }
    Ok(())
}

fn cmd_closest(values: &[f64], needle: f64, sorted: bool) -> Result<()> {
    let index = find_closest_index(values, needle, sorted)?;
    println!("index {} (value {})", index, format_pretty(values[index]));
    Ok(())
}

fn cmd_ticks(min: f64, max: f64, min_ticks: usize, value_as_max: bool) -> Result<()> {
    let step = grid_tick_by_min_max(min, max, min_ticks)?;
    let ticks = grid_ticks_by_min_max(min, max, min_ticks, value_as_max)?;
    let formatter = TickFormatter::for_range(max - min);
    let labels: Vec<String> = ticks.iter().map(|&t| formatter.format(t)).collect();
    println!("step {}", format_pretty(step));
    println!("{}", labels.join(" "));
    Ok(())
}

fn cmd_select(script: &str, items: usize) -> Result<()> {
    let steps = session::parse_script(script)?;
    for trace in session::run_select_script(&steps, items)? {
        let range = match trace.range {
            Some(r) => format!("{}..={}", r.start, r.end),
            None => "-".to_string(),
        };
        println!(
            "{:<6} {:<10} {:<8} {}",
            format!("{:?}", trace.step),
            trace.mode.to_string(),
            range,
            trace.hint
        );
    }
    Ok(())
}

fn cmd_init(path: &Path, force: bool) -> Result<()> {
    let target = if path.is_dir() {
        path.join(CONFIG_FILE_NAME)
    } else {
        path.to_path_buf()
    };

    if target.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            target.display()
        );
    }

    let content = StatchartConfig::default().to_toml()?;
    fs::write(&target, content)
        .with_context(|| format!("Failed to write {}", target.display()))?;
    tracing::info!("wrote {}", target.display());
    Ok(())
}
