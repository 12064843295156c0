//! Bar chart with click-driven range selection.
//!
//! The model turns item events into selection state, bar geometry and the
//! tooltip contents. Bar and grid geometry (the expensive part) is cached
//! according to the chart's [`RenderStrategy`]; selection overlays are
//! recomputed every frame.

use std::sync::Arc;

use smallvec::smallvec;
use statchart_core::{ChartError, ChartEvent, Color, ItemEvent, Point, Rect, Result};
use statchart_theme::{Palette, PaletteToken};

use crate::axis::{build_left_ticks, AxisTick};
use crate::format::{format_pretty, TickFormatter};
use crate::scale::{grid_ticks_by_min_max, BandScale};
use crate::selection::{occurrence_by_range, RangeSelector, SelectMode, SelectionRange};
use crate::strategy::{Memo, RenderStats, RenderStrategy};
use crate::tooltip::{place_tooltip, TooltipLine, TooltipLines, TooltipPlacement, TooltipStyle};
use crate::view::Domain1D;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct SceneKey {
    x_axis_left: u64,
    x_axis_width: u64,
    y_axis_height: u64,
    y_padding_top: u64,
    margin_top: u64,
    y_max_tick_value: u64,
}

impl SceneKey {
    fn new(layout: &BarLayout) -> Self {
        Self {
            x_axis_left: layout.x_axis_left.to_bits(),
            x_axis_width: layout.x_axis_width.to_bits(),
            y_axis_height: layout.y_axis_height.to_bits(),
            y_padding_top: layout.y_padding_top.to_bits(),
            margin_top: layout.margin_top.to_bits(),
            y_max_tick_value: layout.y_max_tick_value.to_bits(),
        }
    }
}

/// One bar: a bin starting at `x_value` holding `y_value` (a percentage).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarDatum {
    pub x_value: f64,
    pub y_value: f64,
}

impl BarDatum {
    pub const fn new(x_value: f64, y_value: f64) -> Self {
        Self { x_value, y_value }
    }
}

/// Plot area measurements, as produced by the layout engine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarLayout {
    pub x_axis_left: f64,
    pub x_axis_width: f64,
    pub y_axis_height: f64,
    /// Gap between the top of the y axis and its highest tick
    pub y_padding_top: f64,
    pub margin_top: f64,
    /// Value of the highest y tick
    pub y_max_tick_value: f64,
}

impl Default for BarLayout {
    fn default() -> Self {
        Self {
            x_axis_left: 60.0,
            x_axis_width: 500.0,
            y_axis_height: 280.0,
            y_padding_top: 0.0,
            margin_top: 20.0,
            y_max_tick_value: 100.0,
        }
    }
}

impl BarLayout {
    pub fn validate(&self) -> Result<()> {
        ChartError::check_domain(self.x_axis_left, self.x_axis_left + self.x_axis_width)?;
        ChartError::check_domain(self.y_padding_top, self.y_axis_height)?;
        ChartError::check_domain(0.0, self.y_max_tick_value)?;
        if !self.margin_top.is_finite() {
            return Err(ChartError::invalid_argument("top margin must be finite"));
        }
        Ok(())
    }

    /// Baseline of the bars.
    pub fn full_height(&self) -> f64 {
        self.margin_top + self.y_axis_height
    }

    pub fn y_max_tick_height(&self) -> f64 {
        self.y_axis_height - self.y_padding_top
    }

    /// Pixels per y unit.
    pub fn scale_division(&self) -> f64 {
        self.y_max_tick_height() / self.y_max_tick_value
    }

    /// Bottom-right corner a tooltip must stay inside.
    pub fn tooltip_limits(&self, inset: f64) -> Point {
        Point::new(
            self.x_axis_left + self.x_axis_width - inset,
            self.full_height() - inset,
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BarChartStyle {
    pub tooltip: TooltipStyle,
    /// Tooltip limits are inset by this many pixels
    pub limits_offset: f64,
    pub min_y_ticks: usize,
}

impl Default for BarChartStyle {
    fn default() -> Self {
        Self {
            tooltip: TooltipStyle::default(),
            limits_offset: 5.0,
            min_y_ticks: 5,
        }
    }
}

/// How a band reacts to the current selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BandState {
    /// Idle: every band reacts to hover
    Hoverable,
    /// Inside the range being selected
    Previewing,
    /// Inside the completed range
    Selected,
    Plain,
}

/// Static geometry: rebuilt only when the layout changes (or every frame
/// under the naive strategy).
#[derive(Clone, Debug, PartialEq)]
pub struct BarScene {
    pub bars: Vec<Rect>,
    pub y_ticks: Vec<AxisTick>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BarRect {
    pub index: usize,
    pub rect: Rect,
    /// Full-height interaction band behind the bar
    pub band: Rect,
    pub state: BandState,
    pub fill: Color,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BarTooltip {
    pub lines: TooltipLines,
    pub placement: TooltipPlacement,
}

#[derive(Clone, Debug)]
pub struct BarFrame {
    pub scene: Arc<BarScene>,
    pub bars: Vec<BarRect>,
    pub tooltip: Option<BarTooltip>,
}

pub struct BarChartModel {
    data: Vec<BarDatum>,
    values: Vec<f64>,
    title: String,
    x_units: String,
    layout: BarLayout,
    bands: BandScale,
    pub style: BarChartStyle,
    pub palette: Palette,

    selector: RangeSelector,
    tooltip_y: Option<f64>,

    strategy: RenderStrategy,
    stats: RenderStats,
    scene: Memo<SceneKey, Arc<BarScene>>,
}

impl BarChartModel {
    pub fn new(data: Vec<BarDatum>, layout: BarLayout) -> Result<Self> {
        if data.is_empty() {
            return Err(ChartError::invalid_argument(
                "bar chart requires at least 1 bar",
            ));
        }
        if data.iter().any(|d| !d.x_value.is_finite() || !d.y_value.is_finite()) {
            return Err(ChartError::invalid_argument("bar values must be finite"));
        }
        if data.iter().any(|d| d.y_value < 0.0) {
            return Err(ChartError::invalid_argument(
                "bar chart does not support negative values",
            ));
        }
        layout.validate()?;

        let selector = RangeSelector::new(data.len())?;
        let values = data.iter().map(|d| d.y_value).collect();
        Ok(Self {
            bands: band_scale(data.len(), &layout),
            values,
            data,
            title: String::new(),
            x_units: String::new(),
            layout,
            style: BarChartStyle::default(),
            palette: Palette::default(),
            selector,
            tooltip_y: None,
            strategy: RenderStrategy::default(),
            stats: RenderStats::default(),
            scene: Memo::default(),
        })
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Unit suffix for x values in the tooltip range text.
    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.x_units = units.into();
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

    /// Replace the selector, e.g. one with callbacks attached.
    pub fn with_selector(mut self, selector: RangeSelector) -> Result<Self> {
        if selector.item_count() != self.data.len() {
            return Err(ChartError::invalid_argument(format!(
                "selector covers {} items but the chart has {} bars",
                selector.item_count(),
                self.data.len()
            )));
        }
        self.selector = selector;
        Ok(self)
    }

    pub fn data(&self) -> &[BarDatum] {
        &self.data
    }

    pub fn layout(&self) -> &BarLayout {
        &self.layout
    }

    pub fn set_layout(&mut self, layout: BarLayout) -> Result<()> {
        layout.validate()?;
        self.bands = band_scale(self.data.len(), &layout);
        self.layout = layout;
        Ok(())
    }

    pub fn mode(&self) -> SelectMode {
        self.selector.mode()
    }

    pub fn range(&self) -> Option<SelectionRange> {
        self.selector.range()
    }

    pub fn tooltip_y(&self) -> Option<f64> {
        self.tooltip_y
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

    /// Bar width in whole pixels.
    pub fn band_width(&self) -> f64 {
        self.bands.band_width().floor()
    }

    pub fn band_x(&self, index: usize) -> Option<f64> {
        self.bands.band_start(index)
    }

    pub fn handle_event(&mut self, event: &ChartEvent) -> Result<()> {
        match event {
            ChartEvent::ItemEnter(item) => self.on_item_enter(item),
            ChartEvent::ItemClick(item) => self.on_item_click(item).map(|_| ()),
            ChartEvent::PointerLeave => {
                self.on_leave();
                Ok(())
            }
            other => {
                tracing::trace!(event = other.name(), "bar chart ignores event");
                Ok(())
            }
        }
    }

    pub fn on_item_enter(&mut self, event: &ItemEvent) -> Result<()> {
        let idle = self.selector.mode() == SelectMode::Idle;
        self.selector.handle_enter(event)?;
        // The tooltip stays at the height where the selection started.
        if idle {
            self.tooltip_y = Some(event.pointer.y);
        }
        Ok(())
    }

    pub fn on_item_click(&mut self, event: &ItemEvent) -> Result<SelectMode> {
        self.selector.handle_click(event)
    }

    pub fn on_leave(&mut self) {
        self.selector.handle_leave();
    }

    pub fn band_state(&self, index: usize) -> BandState {
        let in_range = self.selector.range().is_some_and(|r| r.contains(index));
        match (self.selector.mode(), in_range) {
            (SelectMode::Idle, _) => BandState::Hoverable,
            (SelectMode::Selecting, true) => BandState::Previewing,
            (SelectMode::Selected, true) => BandState::Selected,
            _ => BandState::Plain,
        }
    }

    fn build_scene(
        data: &[BarDatum],
        layout: &BarLayout,
        bands: &BandScale,
        min_ticks: usize,
    ) -> Result<BarScene> {
        let scale_division = layout.scale_division();
        let baseline = layout.full_height();
        let width = bands.band_width().floor();
        let bars = data
            .iter()
            .enumerate()
            .map(|(i, d)| {
                let height = d.y_value * scale_division;
                let x = bands.band_start(i).unwrap_or(layout.x_axis_left);
                Rect::new(x, baseline - height, width, height)
            })
            .collect();

        let tick_values = grid_ticks_by_min_max(0.0, layout.y_max_tick_value, min_ticks, true)?;
        let formatter = TickFormatter::for_range(layout.y_max_tick_value);
        let y_ticks = build_left_ticks(
            Domain1D::new(0.0, layout.y_max_tick_value),
            layout.margin_top + layout.y_padding_top,
            layout.y_max_tick_height(),
            &tick_values,
            |v| formatter.format(v),
        );
        Ok(BarScene { bars, y_ticks })
    }

    /// Bars with their selection state applied.
    pub fn bar_rects(&self, scene: &BarScene) -> Vec<BarRect> {
        let range = self.selector.range();
        let fill = self.palette.get(PaletteToken::BarFill);
        let highlight = self.palette.get(PaletteToken::BarHighlight);
        scene
            .bars
            .iter()
            .enumerate()
            .map(|(index, rect)| {
                let highlighted = range.is_some_and(|r| r.contains(index));
                BarRect {
                    index,
                    rect: *rect,
                    band: Rect::new(
                        rect.x(),
                        self.layout.margin_top,
                        rect.width(),
                        self.layout.y_axis_height,
                    ),
                    state: self.band_state(index),
                    fill: if highlighted { highlight } else { fill },
                }
            })
            .collect()
    }

    /// Title, range, occurrence and hint for `range`.
    pub fn tooltip_lines(&self, range: SelectionRange) -> Result<TooltipLines> {
        let r = range.ascending();
        let occurrence = occurrence_by_range(r, &self.values)?;
        let from = format_pretty(self.data[r.start].x_value);
        let units = &self.x_units;
        let range_text = match self.data.get(r.end + 1) {
            Some(next) => format!("[{from}{units} - {}{units}]", format_pretty(next.x_value)),
            None => format!(">= {from}{units}"),
        };
        Ok(smallvec![
            TooltipLine::bold(self.title.clone()),
            TooltipLine::plain(range_text),
            TooltipLine::bold(format!("Occurrence: {}%", format_pretty(occurrence))),
            TooltipLine::plain(self.selector.mode().hint()).wide(),
        ])
    }

    /// Tooltip for the current range, if any.
    pub fn tooltip(&self) -> Result<Option<BarTooltip>> {
        let Some(range) = self.selector.range() else {
            return Ok(None);
        };
        let lines = self.tooltip_lines(range)?;
        let anchor = Point::new(
            self.band_x(range.start).unwrap_or(self.layout.x_axis_left),
            self.tooltip_y.unwrap_or(0.0),
        );
        let placement = place_tooltip(
            anchor,
            self.style.tooltip.text_width(&lines),
            lines.len(),
            Some(self.layout.tooltip_limits(self.style.limits_offset)),
            &self.style.tooltip,
        );
        Ok(Some(BarTooltip { lines, placement }))
    }

    /// Produce everything needed to draw the current state.
    pub fn render_frame(&mut self) -> Result<BarFrame> {
        self.stats.frames += 1;
        let key = SceneKey::new(&self.layout);
        let (data, layout, bands, min_ticks) =
            (&self.data, &self.layout, &self.bands, self.style.min_y_ticks);
        let scene = self
            .scene
            .get_or_try_build(self.strategy, key, &mut self.stats, || {
                Self::build_scene(data, layout, bands, min_ticks).map(Arc::new)
            })?;

        Ok(BarFrame {
            bars: self.bar_rects(&scene),
            tooltip: self.tooltip()?,
            scene,
        })
    }
}

fn band_scale(count: usize, layout: &BarLayout) -> BandScale {
    BandScale::new(
        count,
        layout.x_axis_left,
        layout.x_axis_left + layout.x_axis_width,
        0.0,
        0.0,
    )
}

#[cfg(test)]
mod tests {
    use statchart_core::PointerEvent;

    use super::*;

    fn model() -> BarChartModel {
        let data = (0..5)
            .map(|i| BarDatum::new(i as f64 * 2.0, [5.0, 10.0, 20.0, 40.0, 25.0][i]))
            .collect();
        let layout = BarLayout {
            x_axis_left: 0.0,
            x_axis_width: 500.0,
            y_axis_height: 200.0,
            y_padding_top: 0.0,
            margin_top: 0.0,
            y_max_tick_value: 50.0,
        };
        BarChartModel::new(data, layout)
            .unwrap()
            .with_title("Significant wave height")
            .with_units("m")
    }

    fn enter(i: usize, y: f64) -> ChartEvent {
        ChartEvent::ItemEnter(ItemEvent::new(i, PointerEvent::new(0.0, y)))
    }

    fn click(i: usize) -> ChartEvent {
        ChartEvent::ItemClick(ItemEvent::at_index(i))
    }

    #[test]
    fn rejects_bad_data() {
        let layout = BarLayout::default();
        assert!(BarChartModel::new(vec![], layout).is_err());
        assert!(BarChartModel::new(vec![BarDatum::new(0.0, -1.0)], layout).is_err());
        assert!(BarChartModel::new(vec![BarDatum::new(0.0, f64::NAN)], layout).is_err());
        let flat = BarLayout {
            y_max_tick_value: 0.0,
            ..layout
        };
        assert!(BarChartModel::new(vec![BarDatum::new(0.0, 1.0)], flat).is_err());
    }

    #[test]
    fn bar_geometry_uses_scale_division() {
        let mut m = model();
        let frame = m.render_frame().unwrap();
        assert_eq!(m.band_width(), 100.0);
        let bar = frame.scene.bars[3];
        assert_eq!(bar.x(), 300.0);
        assert_eq!(bar.height(), 160.0);
        assert_eq!(bar.y(), 40.0);
        assert_eq!(frame.scene.y_ticks.first().map(|t| t.px), Some(200.0));
        assert!(frame.tooltip.is_none());
    }

    #[test]
    fn tooltip_follows_selection() {
        let mut m = model();
        m.handle_event(&enter(1, 120.0)).unwrap();
        m.handle_event(&click(1)).unwrap();
        m.handle_event(&enter(3, 10.0)).unwrap();
        assert_eq!(m.tooltip_y(), Some(120.0));
        m.handle_event(&click(3)).unwrap();

        let tooltip = m.tooltip().unwrap().unwrap();
        let texts: Vec<&str> = tooltip.lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "Significant wave height",
                "[2m - 8m]",
                "Occurrence: 70%",
                "Click to deselect the range",
            ]
        );
        assert!(tooltip.lines[0].bold && tooltip.lines[2].bold);
    }

    #[test]
    fn last_bar_range_is_open_ended() {
        let m = model();
        let lines = m.tooltip_lines(SelectionRange::single(4)).unwrap();
        assert_eq!(lines[1].text, ">= 8m");
        assert_eq!(lines[2].text, "Occurrence: 25%");
    }

    #[test]
    fn band_states_track_mode() {
        let mut m = model();
        m.handle_event(&enter(0, 0.0)).unwrap();
        assert_eq!(m.band_state(4), BandState::Hoverable);

        m.handle_event(&click(0)).unwrap();
        m.handle_event(&enter(2, 0.0)).unwrap();
        assert_eq!(m.band_state(1), BandState::Previewing);
        assert_eq!(m.band_state(3), BandState::Plain);

        m.handle_event(&click(2)).unwrap();
        assert_eq!(m.band_state(2), BandState::Selected);
        assert_eq!(m.band_state(4), BandState::Plain);

        let frame = m.render_frame().unwrap();
        let highlight = m.palette.get(PaletteToken::BarHighlight);
        assert_eq!(frame.bars[1].fill, highlight);
        assert_ne!(frame.bars[4].fill, highlight);
    }

    #[test]
    fn leave_clears_idle_hover_only() {
        let mut m = model();
        m.handle_event(&enter(2, 0.0)).unwrap();
        m.handle_event(&ChartEvent::PointerLeave).unwrap();
        assert!(m.range().is_none());
        assert!(m.render_frame().unwrap().tooltip.is_none());
    }

    #[test]
    fn memoized_scene_is_built_once() {
        let mut naive = model().with_strategy(RenderStrategy::Naive);
        let mut memo = model().with_strategy(RenderStrategy::Memoized);
        for i in 0..5 {
            for m in [&mut naive, &mut memo] {
                m.handle_event(&enter(i, 0.0)).unwrap();
                m.render_frame().unwrap();
            }
        }
        assert_eq!(naive.stats().expensive_rebuilds, 5);
        assert_eq!(memo.stats().expensive_rebuilds, 1);
        assert_eq!(memo.stats().cache_hits, 4);
        assert_eq!(memo.stats().frames, 5);
    }
}
