//! Interaction events
//!
//! The host UI delivers these one at a time, in order, on a single thread.
//! Pixel coordinates are local to the chart wrapper element (its top-left
//! corner is `(0, 0)`), not to the plotting canvas inside it.

use crate::geometry::Point;

/// Pointer position event (move, press, release)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerEvent {
    pub x: f64,
    pub y: f64,
}

impl PointerEvent {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Mouse wheel / trackpad scroll event.
///
/// `delta_y < 0` means scrolling up, which zooms in.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WheelEvent {
    pub x: f64,
    pub y: f64,
    pub delta_y: f64,
}

impl WheelEvent {
    pub const fn new(x: f64, y: f64, delta_y: f64) -> Self {
        Self { x, y, delta_y }
    }
}

/// Pointer event targeted at a discrete, indexed chart item (a bar).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemEvent {
    pub index: usize,
    pub pointer: PointerEvent,
}

impl ItemEvent {
    pub const fn new(index: usize, pointer: PointerEvent) -> Self {
        Self { index, pointer }
    }

    /// Item event without a meaningful pointer position.
    pub const fn at_index(index: usize) -> Self {
        Self {
            index,
            pointer: PointerEvent::new(0.0, 0.0),
        }
    }
}

/// A single UI event as consumed by the chart models.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ChartEvent {
    PointerMove(PointerEvent),
    PointerDown(PointerEvent),
    PointerUp(PointerEvent),
    /// Pointer left the interaction surface
    PointerLeave,
    Wheel(WheelEvent),
    ItemEnter(ItemEvent),
    ItemClick(ItemEvent),
}

impl ChartEvent {
    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            ChartEvent::PointerMove(_) => "pointer_move",
            ChartEvent::PointerDown(_) => "pointer_down",
            ChartEvent::PointerUp(_) => "pointer_up",
            ChartEvent::PointerLeave => "pointer_leave",
            ChartEvent::Wheel(_) => "wheel",
            ChartEvent::ItemEnter(_) => "item_enter",
            ChartEvent::ItemClick(_) => "item_click",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_names_are_stable() {
        assert_eq!(ChartEvent::PointerLeave.name(), "pointer_leave");
        assert_eq!(
            ChartEvent::ItemClick(ItemEvent::at_index(3)).name(),
            "item_click"
        );
        assert_eq!(
            PointerEvent::new(1.0, 2.0).position(),
            Point::new(1.0, 2.0)
        );
    }
}
