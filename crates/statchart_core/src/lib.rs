//! Statchart Core
//!
//! Foundational primitives shared by the statchart crates:
//!
//! - **Geometry**: points, sizes and rectangles in pixel or data space
//! - **Color**: RGBA colors parsed from CSS-style strings
//! - **Events**: pointer, wheel and item events delivered by the host UI
//! - **Errors**: the error taxonomy every chart helper reports through
//!
//! # Example
//!
//! ```rust
//! use statchart_core::{ChartError, Color, Point};
//!
//! let p = Point::new(10.0, 20.0);
//! assert_eq!(p.x, 10.0);
//!
//! let c = Color::parse("#2b809f").unwrap();
//! assert_eq!(c.to_hex_string(), "#2b809f");
//!
//! let err = ChartError::invalid_argument("needle is not finite");
//! assert!(err.to_string().contains("needle"));
//! ```

pub mod color;
pub mod error;
pub mod events;
pub mod geometry;

pub use color::Color;
pub use error::{ChartError, Result};
pub use events::{ChartEvent, ItemEvent, PointerEvent, WheelEvent};
pub use geometry::{Point, Rect, Size};
