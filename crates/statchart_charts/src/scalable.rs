//! Wheel-zoom and drag-pan over the x domain of a fixed-width canvas.
//!
//! The visible domain always stays inside the extent the controller was
//! created with, and never gets narrower than `min_domain_range` or a tiny
//! fraction of the extent, whichever is larger.

use statchart_core::{ChartError, PointerEvent, Result, WheelEvent};

use crate::view::Domain1D;

/// Floor on the visible width relative to the extent. Keeps the span well
/// above float resolution so a zoom-out can always grow it again.
pub const MIN_RELATIVE_SPAN: f64 = 1e-9;

/// Construction parameters for [`ScalableCanvasController`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScalableCanvasConfig {
    /// Width of the plotting canvas in pixels
    pub canvas_width_px: f64,
    /// Percentage of the visible range removed (or added) per wheel step
    pub wheel_step_percent: f64,
    /// Distance from the wrapper's left edge to the canvas's left edge
    pub x_offset_px: f64,
    /// Full data extent; also the starting domain
    pub initial_domain: Domain1D,
    /// Zooming in further than this is refused
    pub min_domain_range: f64,
}

impl ScalableCanvasConfig {
    pub fn new(canvas_width_px: f64, initial_domain: Domain1D) -> Self {
        Self {
            canvas_width_px,
            wheel_step_percent: 8.0,
            x_offset_px: 0.0,
            initial_domain,
            min_domain_range: 0.0,
        }
    }

    pub fn wheel_step_percent(mut self, percent: f64) -> Self {
        self.wheel_step_percent = percent;
        self
    }

    pub fn x_offset_px(mut self, offset: f64) -> Self {
        self.x_offset_px = offset;
        self
    }

    pub fn min_domain_range(mut self, range: f64) -> Self {
        self.min_domain_range = range;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.canvas_width_px.is_finite() && self.canvas_width_px > 0.0) {
            return Err(ChartError::invalid_argument(format!(
                "canvas width must be positive, got {}",
                self.canvas_width_px
            )));
        }
        if !(self.wheel_step_percent.is_finite()
            && self.wheel_step_percent > 0.0
            && self.wheel_step_percent < 100.0)
        {
            return Err(ChartError::InvalidRange {
                value: self.wheel_step_percent,
                min: 0.0,
                max: 100.0,
            });
        }
        if !self.x_offset_px.is_finite() {
            return Err(ChartError::invalid_argument("x offset must be finite"));
        }
        if !(self.min_domain_range.is_finite() && self.min_domain_range >= 0.0) {
            return Err(ChartError::invalid_argument(format!(
                "minimum domain range must be non-negative, got {}",
                self.min_domain_range
            )));
        }
        ChartError::check_domain(self.initial_domain.min, self.initial_domain.max)
    }
}

#[derive(Clone, Debug)]
pub struct ScalableCanvasController {
    config: ScalableCanvasConfig,
    domain: Domain1D,
    drag_anchor_px: Option<f64>,
}

impl ScalableCanvasController {
    pub fn new(config: ScalableCanvasConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            domain: config.initial_domain,
            config,
            drag_anchor_px: None,
        })
    }

    pub fn config(&self) -> &ScalableCanvasConfig {
        &self.config
    }

    /// Currently visible domain.
    pub fn domain(&self) -> Domain1D {
        self.domain
    }

    /// Hard bounds (the full data extent).
    pub fn extent(&self) -> Domain1D {
        self.config.initial_domain
    }

    pub fn canvas_width(&self) -> f64 {
        self.config.canvas_width_px
    }

    /// Narrowest domain a zoom may commit.
    pub fn effective_min_range(&self) -> f64 {
        self.config
            .min_domain_range
            .max(self.extent().span() * MIN_RELATIVE_SPAN)
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_anchor_px.is_some()
    }

    /// Wrapper-local pixel x to canvas-local pixel x.
    pub fn canvas_x(&self, wrapper_x: f64) -> f64 {
        wrapper_x - self.config.x_offset_px
    }

    /// Pixels per domain unit at the current zoom.
    pub fn scale_division(&self) -> f64 {
        self.config.canvas_width_px / self.domain.span()
    }

    pub fn domain_to_canvas(&self, x: f64) -> f64 {
        (x - self.domain.min) * self.scale_division()
    }

    pub fn canvas_to_domain(&self, px: f64) -> f64 {
        self.domain.min + px / self.scale_division()
    }

    /// Zoom about the cursor. Returns `true` if the domain changed.
    pub fn on_wheel(&mut self, event: &WheelEvent) -> bool {
        if !event.delta_y.is_finite() || event.delta_y == 0.0 {
            return false;
        }
        let width = self.config.canvas_width_px;
        let left = (self.canvas_x(event.x) / width).clamp(0.0, 1.0);
        let right = 1.0 - left;
        let step = if event.delta_y < 0.0 {
            self.config.wheel_step_percent
        } else {
            -self.config.wheel_step_percent
        };

        let range = self.domain.span();
        let new_min = self.domain.min + range * left * step / 100.0;
        let new_max = self.domain.max - range * right * step / 100.0;

        let min_range = self.effective_min_range();
        if !(new_max - new_min >= min_range) {
            tracing::trace!(
                width = new_max - new_min,
                min = min_range,
                "zoom rejected: domain would be too narrow"
            );
            return false;
        }

        let next = Domain1D::new(new_min, new_max).clamped_to(&self.extent());
        self.commit(next, "wheel")
    }

    /// Start a pan gesture at the pointer.
    pub fn on_drag_start(&mut self, event: &PointerEvent) {
        self.drag_anchor_px = Some(event.x);
    }

    /// Pan by the pointer movement since the last call. The whole shift is
    /// refused when it would leave the data extent. Returns `true` if the
    /// domain changed.
    pub fn on_drag_move(&mut self, event: &PointerEvent) -> bool {
        let Some(anchor) = self.drag_anchor_px else {
            return false;
        };
        let pixel_delta = anchor - event.x;
        self.drag_anchor_px = Some(event.x);
        if pixel_delta == 0.0 || !pixel_delta.is_finite() {
            return false;
        }

        let fraction = pixel_delta / self.config.canvas_width_px;
        let next = self.domain.shifted(self.domain.span() * fraction);
        if !self.extent().contains_domain(&next) {
            tracing::trace!(
                min = next.min,
                max = next.max,
                "pan rejected: domain would leave the data extent"
            );
            return false;
        }
        self.commit(next, "drag")
    }

    pub fn on_drag_end(&mut self) {
        self.drag_anchor_px = None;
    }

    /// Back to the full extent.
    pub fn reset(&mut self) {
        self.drag_anchor_px = None;
        self.commit(self.extent(), "reset");
    }

    fn commit(&mut self, next: Domain1D, source: &'static str) -> bool {
        if next == self.domain {
            return false;
        }
        if !next.is_valid() {
            tracing::trace!(source, min = next.min, max = next.max, "degenerate domain rejected");
            return false;
        }
        tracing::debug!(source, min = next.min, max = next.max, "domain changed");
        self.domain = next;
        true
    }
}
