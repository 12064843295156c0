//! statchart_charts
//!
//! Interaction models for statistical charts, independent of any renderer:
//!
//! - [`RangeSelector`]: click-driven range selection over bars
//! - [`ScalableCanvasController`]: wheel zoom and drag pan over an x domain
//! - [`find_closest_index`]: nearest value lookup for pointer snapping
//! - [`BarChartModel`] and [`TimeSeriesChartModel`]: charts assembled from
//!   the above, rendering through either a naive or a memoized strategy
//!
//! ```rust
//! use statchart_charts::prelude::*;
//!
//! let mut selector = RangeSelector::new(10).unwrap();
//! selector.handle_enter(&ItemEvent::at_index(4)).unwrap();
//! selector.handle_click(&ItemEvent::at_index(4)).unwrap();
//! selector.handle_enter(&ItemEvent::at_index(7)).unwrap();
//! assert_eq!(selector.handle_click(&ItemEvent::at_index(7)).unwrap(), SelectMode::Selected);
//! assert_eq!(selector.range(), Some(SelectionRange::new(4, 7)));
//!
//! assert_eq!(find_closest_index(&[1.0, 3.0, 7.0, 10.0], 8.0, true).unwrap(), 2);
//! ```

mod view;

pub mod axis;
pub mod bar;
pub mod closest;
pub mod format;
pub mod path;
pub mod scalable;
pub mod scale;
pub mod selection;
pub mod strategy;
pub mod time_format;
pub mod time_series;
pub mod time_series_chart;
pub mod tooltip;

pub use bar::{BarChartModel, BarChartStyle, BarDatum, BarLayout, BandState};
pub use closest::find_closest_index;
pub use scalable::{ScalableCanvasConfig, ScalableCanvasController};
pub use selection::{occurrence_by_range, RangeSelector, SelectMode, SelectionRange};
pub use strategy::{RenderStats, RenderStrategy};
pub use time_series::Series;
pub use time_series_chart::{TimeSeriesChartModel, TimeSeriesChartStyle};
pub use view::Domain1D;

/// Common imports for chart users.
pub mod prelude {
    pub use crate::bar::{
        BandState, BarChartModel, BarChartStyle, BarDatum, BarFrame, BarLayout, BarTooltip,
    };
    pub use crate::closest::find_closest_index;
    pub use crate::format::{float_round, format_pretty, pretty_number, TickFormatter};
    pub use crate::path::line_path_by_values;
    pub use crate::scalable::{ScalableCanvasConfig, ScalableCanvasController};
    pub use crate::scale::{grid_tick_by_min_max, grid_ticks_by_min_max, LinearScale};
    pub use crate::selection::{
        ascending_range, occurrence_by_range, RangeSelector, SelectMode, SelectionRange,
    };
    pub use crate::strategy::{RenderStats, RenderStrategy};
    pub use crate::time_series::Series;
    pub use crate::time_series_chart::{
        ChartPointer, TimeSeriesChartModel, TimeSeriesChartStyle, TimeSeriesFrame,
    };
    pub use crate::tooltip::{place_tooltip, HorizontalSide, TooltipLine, TooltipStyle};
    pub use crate::view::Domain1D;
    pub use statchart_core::{
        ChartError, ChartEvent, ItemEvent, PointerEvent, Point, Size, WheelEvent,
    };
}
