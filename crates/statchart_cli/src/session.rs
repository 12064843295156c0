//! Synthetic interaction sessions
//!
//! Deterministic data and event streams used to replay a user session
//! through the chart models, so the naive and memoized render strategies
//! can be compared on identical input.

use std::cell::Cell;
use std::num::ParseIntError;
use std::rc::Rc;
use std::str::FromStr;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;
use statchart_charts::{
    BarChartModel, BarDatum, RangeSelector, RenderStrategy, SelectMode, SelectionRange, Series,
    TimeSeriesChartModel,
};
use statchart_core::{ChartEvent, ItemEvent, PointerEvent, WheelEvent};
use thiserror::Error;

use crate::config::StatchartConfig;

const SECONDS_PER_SAMPLE: f64 = 6.0 * 3600.0;

/// Bins of a bell-shaped percentage histogram, summing to about 100.
pub fn synthetic_bars(count: usize) -> Vec<BarDatum> {
    let center = count as f64 / 2.0;
    let width = (count as f64 / 5.0).max(1.0);
    let weights: Vec<f64> = (0..count)
        .map(|i| (-((i as f64 - center) / width).powi(2)).exp())
        .collect();
    let total: f64 = weights.iter().sum();
    weights
        .iter()
        .enumerate()
        .map(|(i, w)| BarDatum::new(i as f64 * 0.5, 100.0 * w / total))
        .collect()
}

/// Six-hourly samples of a slow seasonal wave with a faster ripple.
pub fn synthetic_series(points: usize) -> Result<Series> {
    let x = (0..points).map(|i| i as f64 * SECONDS_PER_SAMPLE).collect();
    let y = (0..points)
        .map(|i| {
            let t = i as f64;
            3.0 + 2.0 * (t / 120.0).sin() + 0.4 * (t / 7.0).sin()
        })
        .collect();
    Series::new(x, y).context("failed to build synthetic series")
}

/// Hover sweeps across the bars with a click every few steps.
pub fn bar_events(count: usize, bars: usize) -> Vec<ChartEvent> {
    let bars = bars.max(1);
    (0..count)
        .map(|i| {
            let index = (i * 3 + i / bars) % bars;
            let pointer = PointerEvent::new(0.0, 40.0 + (i % 50) as f64);
            match i % 11 {
                5 => ChartEvent::ItemClick(ItemEvent::new(index, pointer)),
                10 => ChartEvent::PointerLeave,
                _ => ChartEvent::ItemEnter(ItemEvent::new(index, pointer)),
            }
        })
        .collect()
}

/// Mostly pointer moves, with periodic wheel zooms and short drags.
pub fn time_series_events(count: usize, x_offset: f64, canvas_width: f64) -> Vec<ChartEvent> {
    let mut events = Vec::with_capacity(count);
    let mut i = 0usize;
    while events.len() < count {
        let x = x_offset + (i as f64 * 13.0) % canvas_width;
        let e = match i % 40 {
            10 | 30 => {
                let delta_y = if i % 80 < 40 { -1.0 } else { 1.0 };
                ChartEvent::Wheel(WheelEvent::new(x, 100.0, delta_y))
            }
            20 => ChartEvent::PointerDown(PointerEvent::new(x, 100.0)),
            21..=24 => ChartEvent::PointerMove(PointerEvent::new(x - 15.0, 100.0)),
            25 => ChartEvent::PointerUp(PointerEvent::new(x, 100.0)),
            _ => ChartEvent::PointerMove(PointerEvent::new(x, 100.0)),
        };
        events.push(e);
        i += 1;
    }
    events
}

/// Outcome of replaying one event stream through one chart.
#[derive(Clone, Debug, Serialize)]
pub struct ReplayReport {
    pub chart: &'static str,
    pub strategy: String,
    pub events: usize,
    pub frames: u64,
    pub expensive_rebuilds: u64,
    pub cache_hits: u64,
    pub elapsed_ms: f64,
}

pub fn replay_bar(
    config: &StatchartConfig,
    strategy: RenderStrategy,
    data: &[BarDatum],
    events: &[ChartEvent],
) -> Result<ReplayReport> {
    let mut chart = BarChartModel::new(data.to_vec(), config.bar.layout())?
        .with_title(config.bar.title.clone())
        .with_units(config.bar.units.clone())
        .with_palette(config.theme.clone())
        .with_strategy(strategy);

    let started = Instant::now();
    for event in events {
        chart.handle_event(event)?;
        chart.render_frame()?;
    }
    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

    let stats = chart.stats();
    tracing::debug!(%strategy, ?stats, "bar replay finished");
    Ok(ReplayReport {
        chart: "bar",
        strategy: strategy.to_string(),
        events: events.len(),
        frames: stats.frames,
        expensive_rebuilds: stats.expensive_rebuilds,
        cache_hits: stats.cache_hits,
        elapsed_ms,
    })
}

pub fn replay_time_series(
    config: &StatchartConfig,
    strategy: RenderStrategy,
    series: &Series,
    events: &[ChartEvent],
) -> Result<ReplayReport> {
    let mut chart = TimeSeriesChartModel::with_style(
        series.clone(),
        config.canvas.size(),
        config.canvas.chart_style(),
    )?
    .with_labels("value", "")
    .with_palette(config.theme.clone())
    .with_strategy(strategy);

    let started = Instant::now();
    for event in events {
        chart.handle_event(event)?;
        chart.render_frame()?;
    }
    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

    let stats = chart.stats();
    tracing::debug!(%strategy, ?stats, "time series replay finished");
    Ok(ReplayReport {
        chart: "time-series",
        strategy: strategy.to_string(),
        events: events.len(),
        frames: stats.frames,
        expensive_rebuilds: stats.expensive_rebuilds,
        cache_hits: stats.cache_hits,
        elapsed_ms,
    })
}

/// One step of a range-selection script: `e<index>`, `c<index>` or `l`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectStep {
    Enter(usize),
    Click(usize),
    Leave,
}

#[derive(Debug, Error, PartialEq)]
pub enum ScriptError {
    #[error("unknown step '{0}': expected e<index>, c<index> or l")]
    UnknownStep(String),

    #[error("invalid index in step '{step}'")]
    BadIndex {
        step: String,
        #[source]
        source: ParseIntError,
    },
}

impl FromStr for SelectStep {
    type Err = ScriptError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let index = |rest: &str| {
            rest.parse::<usize>().map_err(|source| ScriptError::BadIndex {
                step: s.to_string(),
                source,
            })
        };
        let mut chars = s.chars();
        match (chars.next(), chars.as_str()) {
            (Some('l'), "") => Ok(SelectStep::Leave),
            (Some('e'), rest) => index(rest).map(SelectStep::Enter),
            (Some('c'), rest) => index(rest).map(SelectStep::Click),
            _ => Err(ScriptError::UnknownStep(s.to_string())),
        }
    }
}

/// Parse a whitespace or comma separated script such as `"e4 c4 e7 c7"`.
pub fn parse_script(script: &str) -> std::result::Result<Vec<SelectStep>, ScriptError> {
    script
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(str::parse)
        .collect()
}

/// Selector state after one step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectTrace {
    pub step: SelectStep,
    pub mode: SelectMode,
    pub range: Option<SelectionRange>,
    pub hint: &'static str,
}

/// Run `steps` through a selector over `items` items.
pub fn run_select_script(steps: &[SelectStep], items: usize) -> Result<Vec<SelectTrace>> {
    let completed = Rc::new(Cell::new(0usize));
    let completed_in_callback = Rc::clone(&completed);
    let mut selector = RangeSelector::new(items)?.on_click(move |event, mode| {
        if mode == SelectMode::Selected {
            completed_in_callback.set(completed_in_callback.get() + 1);
            tracing::info!(index = event.index, "selection completed");
        }
    });

    let mut trace = Vec::with_capacity(steps.len());
    for &step in steps {
        match step {
            SelectStep::Enter(i) => selector.handle_enter(&ItemEvent::at_index(i))?,
            SelectStep::Click(i) => {
                selector.handle_click(&ItemEvent::at_index(i))?;
            }
            SelectStep::Leave => selector.handle_leave(),
        }
        trace.push(SelectTrace {
            step,
            mode: selector.mode(),
            range: selector.range(),
            hint: selector.mode().hint(),
        });
    }
    tracing::debug!(completed = completed.get(), steps = steps.len(), "script finished");
    Ok(trace)
}
