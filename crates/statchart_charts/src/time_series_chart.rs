//! Zoomable, pannable time-series line chart.
//!
//! Wrapper layout (pixels, left to right): y axis (`axis_width`), canvas
//! offset, then the plotting canvas. Pointer coordinates arrive relative to
//! the wrapper; the line path and tick positions are canvas-local.

use std::sync::Arc;

use smallvec::smallvec;
use statchart_core::{ChartError, ChartEvent, Point, PointerEvent, Result, Size};
use statchart_theme::Palette;

use crate::axis::{build_bottom_ticks, build_left_ticks, thin_overlapping, AxisTick};
use crate::format::TickFormatter;
use crate::path::line_path_by_values;
use crate::scalable::{ScalableCanvasConfig, ScalableCanvasController};
use crate::scale::grid_ticks_by_min_max;
use crate::strategy::{Memo, RenderStats, RenderStrategy};
use crate::time_format::{
    format_timestamp, x_axis_options, DateFormat, XAxisOptions, SECONDS_PER_DAY,
};
use crate::time_series::Series;
use crate::tooltip::{
    place_tooltip, side_of_center, HorizontalSide, TooltipLine, TooltipLines, TooltipPlacement,
    TooltipStyle,
};
use crate::view::Domain1D;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct SceneKey {
    x_min: u64,
    x_max: u64,
    y_min: u64,
    y_max: u64,
    width: u64,
    height: u64,
}

impl SceneKey {
    fn new(x: Domain1D, y: Domain1D, canvas: Size) -> Self {
        let (x_min, x_max) = x.key();
        let (y_min, y_max) = y.key();
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
            width: canvas.width.to_bits(),
            height: canvas.height.to_bits(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TimeSeriesChartStyle {
    pub canvas_offset: f64,
    pub axis_width: f64,
    pub wheel_step_percent: f64,
    /// Narrowest zoom, in seconds
    pub min_domain_range: f64,
    pub tooltip_offset: Point,
    pub min_y_ticks: usize,
    pub x_tick_count: usize,
    /// Minimum gap between unrotated x labels
    pub label_gap_px: f64,
}

impl Default for TimeSeriesChartStyle {
    fn default() -> Self {
        Self {
            canvas_offset: 25.0,
            axis_width: 30.0,
            wheel_step_percent: 8.0,
            min_domain_range: SECONDS_PER_DAY,
            tooltip_offset: Point::new(10.0, -10.0),
            min_y_ticks: 8,
            x_tick_count: 10,
            label_gap_px: 4.0,
        }
    }
}

impl TimeSeriesChartStyle {
    /// Wrapper x of the canvas's left edge.
    pub fn x_canvas_offset(&self) -> f64 {
        self.axis_width + self.canvas_offset
    }

    /// Wrapper y of the canvas's top edge.
    pub fn y_canvas_offset(&self) -> f64 {
        self.canvas_offset
    }
}

/// Data point under the pointer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartPointer {
    pub index: usize,
    pub x_value: f64,
    pub y_value: f64,
    /// Point position in wrapper coordinates
    pub position: Point,
    pub tooltip_side: HorizontalSide,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TimeSeriesScene {
    pub path: String,
    pub x_options: XAxisOptions,
    pub x_ticks: Vec<AxisTick>,
    pub y_ticks: Vec<AxisTick>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TimeSeriesTooltip {
    pub lines: TooltipLines,
    pub placement: TooltipPlacement,
}

#[derive(Clone, Debug)]
pub struct TimeSeriesFrame {
    pub scene: Arc<TimeSeriesScene>,
    pub domain: Domain1D,
    pub pointer: Option<ChartPointer>,
    pub tooltip: Option<TimeSeriesTooltip>,
}

pub struct TimeSeriesChartModel {
    series: Series,
    canvas: Size,
    y_domain: Domain1D,
    y_ticks: Vec<f64>,
    controller: ScalableCanvasController,
    pub style: TimeSeriesChartStyle,
    pub palette: Palette,
    y_label: String,
    units: String,

    pointer: Option<ChartPointer>,

    strategy: RenderStrategy,
    stats: RenderStats,
    scene: Memo<SceneKey, Arc<TimeSeriesScene>>,
}

impl TimeSeriesChartModel {
    pub fn new(series: Series, canvas: Size) -> Result<Self> {
        Self::with_style(series, canvas, TimeSeriesChartStyle::default())
    }

    pub fn with_style(series: Series, canvas: Size, style: TimeSeriesChartStyle) -> Result<Self> {
        ChartError::check_domain(0.0, canvas.width)?;
        ChartError::check_domain(0.0, canvas.height)?;

        let (mut y_min, mut y_max) = series
            .y_min_max()
            .ok_or_else(|| ChartError::invalid_argument("series has no finite y values"))?;
        if y_max <= y_min {
            y_min -= 1.0;
            y_max += 1.0;
        }
        let y_ticks = grid_ticks_by_min_max(y_min, y_max, style.min_y_ticks, false)?;
        let y_top = y_ticks.last().copied().unwrap_or(y_max);
        let y_domain = Domain1D::try_new(y_min, y_top)?;

        let controller = ScalableCanvasController::new(
            ScalableCanvasConfig::new(canvas.width, series.x_extent()?)
                .wheel_step_percent(style.wheel_step_percent)
                .x_offset_px(style.x_canvas_offset())
                .min_domain_range(style.min_domain_range),
        )?;

        tracing::debug!(
            points = series.len(),
            y_min,
            y_top,
            "TimeSeriesChartModel::new"
        );

        Ok(Self {
            series,
            canvas,
            y_domain,
            y_ticks,
            controller,
            style,
            palette: Palette::default(),
            y_label: String::new(),
            units: String::new(),
            pointer: None,
            strategy: RenderStrategy::default(),
            stats: RenderStats::default(),
            scene: Memo::default(),
        })
    }

    /// Tooltip label and unit for y values.
    pub fn with_labels(mut self, y_label: impl Into<String>, units: impl Into<String>) -> Self {
        self.y_label = y_label.into();
        self.units = units.into();
        self
    }

    pub fn with_strategy(mut self, strategy: RenderStrategy) -> Self {
        self.set_strategy(strategy);
        self
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn series(&self) -> &Series {
        &self.series
    }

    pub fn canvas(&self) -> Size {
        self.canvas
    }

    pub fn domain(&self) -> Domain1D {
        self.controller.domain()
    }

    pub fn y_domain(&self) -> Domain1D {
        self.y_domain
    }

    pub fn y_ticks(&self) -> &[f64] {
        &self.y_ticks
    }

    pub fn controller(&self) -> &ScalableCanvasController {
        &self.controller
    }

    pub fn pointer(&self) -> Option<ChartPointer> {
        self.pointer
    }

    pub fn strategy(&self) -> RenderStrategy {
        self.strategy
    }

    /// Switch strategy; statistics and caches start over.
    pub fn set_strategy(&mut self, strategy: RenderStrategy) {
        self.strategy = strategy;
        self.stats = RenderStats::default();
        self.scene.invalidate();
    }

    pub fn stats(&self) -> RenderStats {
        self.stats
    }

    /// Feed one UI event. Returns `true` if anything visible changed.
    pub fn handle_event(&mut self, event: &ChartEvent) -> Result<bool> {
        match event {
            ChartEvent::Wheel(wheel) => Ok(self.controller.on_wheel(wheel)),
            ChartEvent::PointerDown(p) => {
                self.controller.on_drag_start(p);
                Ok(false)
            }
            ChartEvent::PointerMove(p) => {
                if self.controller.is_dragging() {
                    Ok(self.controller.on_drag_move(p))
                } else {
                    self.update_pointer(p)?;
                    Ok(true)
                }
            }
            ChartEvent::PointerUp(_) => {
                self.controller.on_drag_end();
                Ok(false)
            }
            ChartEvent::PointerLeave => Ok(self.pointer.take().is_some()),
            other => {
                tracing::trace!(event = other.name(), "time series chart ignores event");
                Ok(false)
            }
        }
    }

    /// Snap the pointer to the data point nearest in x.
    pub fn update_pointer(&mut self, event: &PointerEvent) -> Result<ChartPointer> {
        let c = &self.controller;
        let x_guess = c.canvas_to_domain(c.canvas_x(event.x));
        let index = self.series.nearest_by_x(x_guess)?;
        let x_value = self.series.x()[index];
        let y_value = self.series.y()[index];

        let canvas_x = c.domain_to_canvas(x_value);
        let y_scale = self.canvas.height / self.y_domain.span();
        let canvas_y = self.canvas.height - y_scale * (y_value - self.y_domain.min);
        let position = Point::new(
            self.style.x_canvas_offset() + canvas_x,
            self.style.y_canvas_offset() + canvas_y,
        );
        let center_x = self.style.x_canvas_offset() + 0.5 * self.canvas.width;

        let pointer = ChartPointer {
            index,
            x_value,
            y_value,
            position,
            tooltip_side: side_of_center(position.x, center_x),
        };
        self.pointer = Some(pointer);
        Ok(pointer)
    }

    pub fn tooltip(&self) -> Option<TimeSeriesTooltip> {
        let pointer = self.pointer?;
        let lines: TooltipLines = smallvec![
            TooltipLine::plain(format_timestamp(
                pointer.x_value,
                DateFormat::YearMonthDayHourMinute
            )),
            TooltipLine::bold(format!(
                "{}: {:.2} {}",
                self.y_label, pointer.y_value, self.units
            )),
        ];
        let style = TooltipStyle {
            offset: self.style.tooltip_offset,
            horizontal: pointer.tooltip_side,
            ..TooltipStyle::default()
        };
        let placement = place_tooltip(
            Point::new(pointer.position.x, 0.0),
            style.text_width(&lines),
            lines.len(),
            None,
            &style,
        );
        Some(TimeSeriesTooltip { lines, placement })
    }

    fn build_scene(
        series: &Series,
        y_ticks: &[f64],
        canvas: Size,
        domain: Domain1D,
        y_domain: Domain1D,
        style: &TimeSeriesChartStyle,
    ) -> Result<TimeSeriesScene> {
        let path = line_path_by_values(
            series.x(),
            series.y(),
            canvas,
            Some(domain),
            Some(y_domain),
        )?;

        let x_options = x_axis_options(domain.span());
        let mut x_ticks = build_bottom_ticks(domain, 0.0, canvas.width, style.x_tick_count, |v| {
            format_timestamp(v, x_options.date_format)
        });
        if x_options.tick.angle == 0.0 {
            x_ticks = thin_overlapping(x_ticks, style.label_gap_px);
        }

        let formatter = TickFormatter::for_range(y_domain.span());
        let y_ticks = build_left_ticks(y_domain, 0.0, canvas.height, y_ticks, |v| {
            formatter.format(v)
        });

        Ok(TimeSeriesScene {
            path,
            x_options,
            x_ticks,
            y_ticks,
        })
    }

    pub fn render_frame(&mut self) -> Result<TimeSeriesFrame> {
        self.stats.frames += 1;
        let domain = self.controller.domain();
        let key = SceneKey::new(domain, self.y_domain, self.canvas);
        let (series, y_ticks, canvas, y_domain, style) = (
            &self.series,
            &self.y_ticks,
            self.canvas,
            self.y_domain,
            &self.style,
        );
        let scene = self
            .scene
            .get_or_try_build(self.strategy, key, &mut self.stats, || {
                Self::build_scene(series, y_ticks, canvas, domain, y_domain, style).map(Arc::new)
            })?;

        Ok(TimeSeriesFrame {
            scene,
            domain,
            pointer: self.pointer,
            tooltip: self.tooltip(),
        })
    }
}

#[cfg(test)]
mod tests {
    use statchart_core::WheelEvent;

    use super::*;

    const DAY: f64 = SECONDS_PER_DAY;

    fn model() -> TimeSeriesChartModel {
        let x: Vec<f64> = (0..101).map(|i| i as f64 * DAY).collect();
        let y: Vec<f64> = (0..101).map(|i| (i % 10) as f64).collect();
        TimeSeriesChartModel::new(Series::new(x, y).unwrap(), Size::new(500.0, 400.0))
            .unwrap()
            .with_labels("peak factor", "s")
    }

    #[test]
    fn deep_zoom_without_minimum_keeps_rendering() {
        let x: Vec<f64> = (0..101).map(|i| i as f64 * DAY).collect();
        let y: Vec<f64> = (0..101).map(|i| (i % 10) as f64).collect();
        let style = TimeSeriesChartStyle {
            min_domain_range: 0.0,
            wheel_step_percent: 99.0,
            ..TimeSeriesChartStyle::default()
        };
        let mut m = TimeSeriesChartModel::with_style(
            Series::new(x, y).unwrap(),
            Size::new(500.0, 400.0),
            style,
        )
        .unwrap();

        for step in 0..40 {
            m.handle_event(&ChartEvent::Wheel(WheelEvent::new(300.0, 0.0, -1.0)))
                .unwrap();
            let frame = m.render_frame().unwrap_or_else(|e| panic!("step {step}: {e}"));
            assert!(frame.domain.is_valid(), "step {step}: {:?}", frame.domain);
        }
        m.handle_event(&ChartEvent::Wheel(WheelEvent::new(300.0, 0.0, 1.0)))
            .unwrap();
        assert!(m.render_frame().is_ok());
    }

    #[test]
    fn y_domain_extends_to_last_grid_tick() {
        let m = model();
        assert_eq!(m.y_domain().min, 0.0);
        assert_eq!(m.y_domain().max, *m.y_ticks().last().unwrap());
        assert!(m.y_domain().max >= 9.0);
    }

    #[test]
    fn pointer_snaps_to_nearest_point() {
        let mut m = model();
        // Canvas x 102 -> day 20.4 -> index 20.
        let x = m.style.x_canvas_offset() + 102.0;
        m.handle_event(&ChartEvent::PointerMove(PointerEvent::new(x, 10.0)))
            .unwrap();
        let p = m.pointer().unwrap();
        assert_eq!(p.index, 20);
        assert_eq!(p.x_value, 20.0 * DAY);
        assert!((p.position.x - (55.0 + 100.0)).abs() < 1e-9);
        assert_eq!(p.tooltip_side, HorizontalSide::Right);

        let tooltip = m.tooltip().unwrap();
        assert_eq!(tooltip.lines[1].text, "peak factor: 0.00 s");

        assert!(m.handle_event(&ChartEvent::PointerLeave).unwrap());
        assert!(m.pointer().is_none());
    }

    #[test]
    fn pointer_right_of_center_flips_tooltip() {
        let mut m = model();
        let p = m.update_pointer(&PointerEvent::new(55.0 + 400.0, 0.0)).unwrap();
        assert_eq!(p.tooltip_side, HorizontalSide::Left);
    }

    #[test]
    fn drag_suppresses_pointer_tracking() {
        let mut m = model();
        m.handle_event(&ChartEvent::Wheel(WheelEvent::new(305.0, 0.0, -1.0)))
            .unwrap();
        let zoomed = m.domain();
        assert!(zoomed.span() < 100.0 * DAY);

        m.handle_event(&ChartEvent::PointerDown(PointerEvent::new(300.0, 0.0)))
            .unwrap();
        assert!(m
            .handle_event(&ChartEvent::PointerMove(PointerEvent::new(310.0, 0.0)))
            .unwrap());
        assert!(m.pointer().is_none());
        assert!(m.domain().min < zoomed.min);

        m.handle_event(&ChartEvent::PointerUp(PointerEvent::new(310.0, 0.0)))
            .unwrap();
        assert!(!m.controller().is_dragging());
    }

    #[test]
    fn memoized_path_survives_pointer_moves() {
        let mut naive = model().with_strategy(RenderStrategy::Naive);
        let mut memo = model().with_strategy(RenderStrategy::Memoized);
        for m in [&mut naive, &mut memo] {
            for i in 0..10 {
                let e = ChartEvent::PointerMove(PointerEvent::new(60.0 + i as f64 * 40.0, 0.0));
                m.handle_event(&e).unwrap();
                m.render_frame().unwrap();
            }
            m.handle_event(&ChartEvent::Wheel(WheelEvent::new(300.0, 0.0, -1.0)))
                .unwrap();
            m.render_frame().unwrap();
        }
        assert_eq!(naive.stats().expensive_rebuilds, 11);
        assert_eq!(memo.stats().expensive_rebuilds, 2);
        assert_eq!(memo.stats().cache_hits, 9);
    }

    #[test]
    fn frame_contains_path_and_ticks() {
        let mut m = model();
        let frame = m.render_frame().unwrap();
        assert!(frame.scene.path.starts_with("M0,"));
        assert!(!frame.scene.x_ticks.is_empty());
        assert_eq!(frame.scene.y_ticks.len(), m.y_ticks().len());
        assert!(frame.tooltip.is_none());
    }

    #[test]
    fn rejects_degenerate_input() {
        let one = Series::new(vec![0.0], vec![1.0]).unwrap();
        assert!(TimeSeriesChartModel::new(one, Size::new(500.0, 400.0)).is_err());
        let s = Series::new(vec![0.0, DAY], vec![1.0, 2.0]).unwrap();
        assert!(TimeSeriesChartModel::new(s, Size::new(0.0, 400.0)).is_err());
    }
}
