//! Click-driven range selection over discrete, indexed items (bars).
//!
//! Selection runs as a three-state cycle driven by clicks:
//!
//! ```text
//!   Idle --click--> Selecting --click--> Selected --click--> Idle
//! ```
//!
//! Hovering (`handle_enter`) previews: in `Idle` the range follows the hovered
//! item, in `Selecting` the range stretches from the anchor to the hovered
//! item, and in `Selected` the range is frozen.

use std::fmt;

use statchart_core::{ChartError, ItemEvent, Result};

use crate::format::in_range;

/// Current phase of the selection cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SelectMode {
    /// Hover follows the pointer; the next click anchors a range
    #[default]
    Idle,
    /// Anchored; hover previews, the next click completes the range
    Selecting,
    /// Range frozen until the next click clears it
    Selected,
}

impl SelectMode {
    pub const SEQUENCE: [SelectMode; 3] =
        [SelectMode::Idle, SelectMode::Selecting, SelectMode::Selected];

    /// Successor in the cycle.
    pub fn next(self) -> Self {
        match self {
            SelectMode::Idle => SelectMode::Selecting,
            SelectMode::Selecting => SelectMode::Selected,
            SelectMode::Selected => SelectMode::Idle,
        }
    }

    /// User-facing instruction for what the next click does.
    pub fn hint(self) -> &'static str {
        match self {
            SelectMode::Idle => "Click to start selection",
            SelectMode::Selecting => "Click to complete selection",
            SelectMode::Selected => "Click to deselect the range",
        }
    }
}

impl fmt::Display for SelectMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SelectMode::Idle => "idle",
            SelectMode::Selecting => "selecting",
            SelectMode::Selected => "selected",
        };
        f.write_str(name)
    }
}

/// Pair of item indices. `start` is the anchor and may exceed `end` while a
/// selection is dragged leftwards; use [`SelectionRange::ascending`] for
/// ordered bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SelectionRange {
    pub start: usize,
    pub end: usize,
}

impl SelectionRange {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub const fn single(index: usize) -> Self {
        Self::new(index, index)
    }

    pub fn ascending(self) -> Self {
        ascending_range(self.start, self.end)
    }

    /// Inclusive membership, regardless of direction.
    pub fn contains(&self, index: usize) -> bool {
        let r = self.ascending();
        in_range(index, r.start, r.end)
    }

    /// Number of items covered.
    pub fn count(&self) -> usize {
        let r = self.ascending();
        r.end - r.start + 1
    }

    pub fn is_single(&self) -> bool {
        self.start == self.end
    }
}

/// Order two indices into a range with `start <= end`.
pub fn ascending_range(a: usize, b: usize) -> SelectionRange {
    SelectionRange::new(a.min(b), a.max(b))
}

/// Called after an item enter, with the mode at the time of the event.
pub type EnterCallback = Box<dyn FnMut(&ItemEvent, SelectMode)>;
/// Called after a click, with the mode the click produced.
pub type ClickCallback = Box<dyn FnMut(&ItemEvent, SelectMode)>;
/// Called after the pointer leaves the items, with the current mode.
pub type LeaveCallback = Box<dyn FnMut(SelectMode)>;

/// Range selection state machine over `item_count` items.
pub struct RangeSelector {
    item_count: usize,
    mode: SelectMode,
    range: Option<SelectionRange>,
    on_enter: Option<EnterCallback>,
    on_click: Option<ClickCallback>,
    on_leave: Option<LeaveCallback>,
}

impl RangeSelector {
    pub fn new(item_count: usize) -> Result<Self> {
        if item_count == 0 {
            return Err(ChartError::invalid_argument(
                "range selection needs at least one item",
            ));
        }
        Ok(Self {
            item_count,
            mode: SelectMode::Idle,
            range: None,
            on_enter: None,
            on_click: None,
            on_leave: None,
        })
    }

    pub fn on_enter<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&ItemEvent, SelectMode) + 'static,
    {
        self.on_enter = Some(Box::new(callback));
        self
    }

    pub fn on_click<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&ItemEvent, SelectMode) + 'static,
    {
        self.on_click = Some(Box::new(callback));
        self
    }

    pub fn on_leave<F>(mut self, callback: F) -> Self
    where
        F: FnMut(SelectMode) + 'static,
    {
        self.on_leave = Some(Box::new(callback));
        self
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn mode(&self) -> SelectMode {
        self.mode
    }

    /// Range exactly as tracked (`start` is the anchor).
    pub fn raw_range(&self) -> Option<SelectionRange> {
        self.range
    }

    /// Range with `start <= end`.
    pub fn range(&self) -> Option<SelectionRange> {
        self.range.map(SelectionRange::ascending)
    }

    /// Pointer entered item `event.index`.
    pub fn handle_enter(&mut self, event: &ItemEvent) -> Result<()> {
        let index = self.check_index(event.index)?;
        match self.mode {
            SelectMode::Idle => self.range = Some(SelectionRange::single(index)),
            SelectMode::Selecting => {
                let anchor = self.range.map_or(index, |r| r.start);
                self.range = Some(SelectionRange::new(anchor, index));
            }
            SelectMode::Selected => {}
        }
        tracing::trace!(index, mode = %self.mode, range = ?self.range, "item enter");

        if let Some(callback) = self.on_enter.as_mut() {
            callback(event, self.mode);
        }
        Ok(())
    }

    /// Item `event.index` clicked; advances the cycle and returns the new mode.
    pub fn handle_click(&mut self, event: &ItemEvent) -> Result<SelectMode> {
        let index = self.check_index(event.index)?;
        let next = self.mode.next();
        self.range = match next {
            SelectMode::Selecting => Some(SelectionRange::single(index)),
            SelectMode::Selected => {
                let anchor = self.range.map_or(index, |r| r.start);
                Some(SelectionRange::new(anchor, index))
            }
            SelectMode::Idle => None,
        };
        tracing::debug!(index, from = %self.mode, to = %next, range = ?self.range, "item click");
        self.mode = next;

        if let Some(callback) = self.on_click.as_mut() {
            callback(event, next);
        }
        Ok(next)
    }

    /// Pointer left the items. Only an `Idle` hover range is dropped; an
    /// in-progress or completed selection survives.
    pub fn handle_leave(&mut self) {
        if self.mode == SelectMode::Idle {
            self.range = None;
        }
        if let Some(callback) = self.on_leave.as_mut() {
            callback(self.mode);
        }
    }

    /// Back to `Idle` with no range.
    pub fn reset(&mut self) {
        self.mode = SelectMode::Idle;
        self.range = None;
    }

    fn check_index(&self, index: usize) -> Result<usize> {
        if index < self.item_count {
            Ok(index)
        } else {
            Err(ChartError::invalid_argument(format!(
                "item index {index} out of bounds for {} items",
                self.item_count
            )))
        }
    }
}

impl fmt::Debug for RangeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RangeSelector")
            .field("item_count", &self.item_count)
            .field("mode", &self.mode)
            .field("range", &self.range)
            .finish_non_exhaustive()
    }
}

/// Aggregate of `values` over `range`: the single value for a one-item
/// range, the sum otherwise.
pub fn occurrence_by_range(range: SelectionRange, values: &[f64]) -> Result<f64> {
    let r = range.ascending();
    if r.end >= values.len() {
        return Err(ChartError::invalid_argument(format!(
            "range end {} out of bounds for {} values",
            r.end,
            values.len()
        )));
    }
    if r.is_single() {
        return Ok(values[r.start]);
    }
    Ok(values[r.start..=r.end].iter().sum())
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    fn at(i: usize) -> ItemEvent {
        ItemEvent::at_index(i)
    }

    #[test]
    fn modes_cycle_in_order() {
        assert_eq!(SelectMode::Idle.next(), SelectMode::Selecting);
        assert_eq!(SelectMode::Selecting.next(), SelectMode::Selected);
        assert_eq!(SelectMode::Selected.next(), SelectMode::Idle);
        for mode in SelectMode::SEQUENCE {
            assert!(!mode.hint().is_empty());
        }
    }

    #[test]
    fn idle_hover_follows_pointer() {
        let mut s = RangeSelector::new(10).unwrap();
        s.handle_enter(&at(4)).unwrap();
        assert_eq!(s.range(), Some(SelectionRange::single(4)));
        s.handle_enter(&at(6)).unwrap();
        assert_eq!(s.range(), Some(SelectionRange::single(6)));
    }

    #[test]
    fn selecting_stretches_from_anchor() {
        let mut s = RangeSelector::new(10).unwrap();
        s.handle_click(&at(7)).unwrap();
        s.handle_enter(&at(2)).unwrap();
        assert_eq!(s.raw_range(), Some(SelectionRange::new(7, 2)));
        assert_eq!(s.range(), Some(SelectionRange::new(2, 7)));
    }

    #[test]
    fn selected_range_is_frozen_until_next_click() {
        let mut s = RangeSelector::new(10).unwrap();
        s.handle_click(&at(2)).unwrap();
        assert_eq!(s.handle_click(&at(5)).unwrap(), SelectMode::Selected);
        s.handle_enter(&at(9)).unwrap();
        s.handle_leave();
        assert_eq!(s.range(), Some(SelectionRange::new(2, 5)));

        assert_eq!(s.handle_click(&at(9)).unwrap(), SelectMode::Idle);
        assert_eq!(s.range(), None);
    }

    #[test]
    fn leave_clears_only_idle_hover() {
        let mut s = RangeSelector::new(3).unwrap();
        s.handle_enter(&at(1)).unwrap();
        s.handle_leave();
        assert_eq!(s.range(), None);

        s.handle_click(&at(1)).unwrap();
        s.handle_leave();
        assert_eq!(s.range(), Some(SelectionRange::single(1)));
    }

    #[test]
    fn out_of_bounds_index_is_rejected_without_state_change() {
        let mut s = RangeSelector::new(3).unwrap();
        assert!(s.handle_click(&at(3)).is_err());
        assert!(s.handle_enter(&at(10)).is_err());
        assert_eq!(s.mode(), SelectMode::Idle);
        assert_eq!(s.range(), None);
        assert!(RangeSelector::new(0).is_err());
    }

    #[test]
    fn callbacks_observe_modes() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let enter_log = Rc::clone(&seen);
        let click_log = Rc::clone(&seen);
        let leave_log = Rc::clone(&seen);
        let mut s = RangeSelector::new(5)
            .unwrap()
            .on_enter(move |e, m| enter_log.borrow_mut().push(format!("enter {} {m}", e.index)))
            .on_click(move |e, m| click_log.borrow_mut().push(format!("click {} {m}", e.index)))
            .on_leave(move |m| leave_log.borrow_mut().push(format!("leave {m}")));

        s.handle_enter(&at(1)).unwrap();
        s.handle_click(&at(1)).unwrap();
        s.handle_leave();

        assert_eq!(
            *seen.borrow(),
            vec!["enter 1 idle", "click 1 selecting", "leave selecting"]
        );
    }

    #[test]
    fn occurrence_single_or_sum() {
        let ys = [10.0, 20.0, 30.0, 40.0];
        assert_eq!(occurrence_by_range(SelectionRange::single(2), &ys).unwrap(), 30.0);
        assert_eq!(occurrence_by_range(SelectionRange::new(3, 1), &ys).unwrap(), 90.0);
        assert!(occurrence_by_range(SelectionRange::new(0, 4), &ys).is_err());
    }

    #[test]
    fn range_count_and_contains() {
        let r = SelectionRange::new(5, 2);
        assert_eq!(r.count(), 4);
        assert!(r.contains(2) && r.contains(5));
        assert!(!r.contains(6));
    }
}
