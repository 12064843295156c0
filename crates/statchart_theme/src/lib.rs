//! Statchart Theme
//!
//! Chart colors as an explicitly constructed value. A [`Palette`] is built once
//! (defaults, a TOML file, or runtime overrides) and passed down to the chart
//! models that need it; there is no process-wide theme instance.
//!
//! ```rust
//! use statchart_theme::{Palette, PaletteToken};
//! use statchart_core::Color;
//!
//! let mut palette = Palette::default();
//! assert_eq!(palette.get(PaletteToken::BarFill).to_hex_string(), "#2b809f");
//!
//! palette.set_override(PaletteToken::BarFill, Color::from_hex(0xff5500));
//! assert_eq!(palette.get(PaletteToken::BarFill).to_hex_string(), "#ff5500");
//!
//! palette.clear_overrides();
//! assert_eq!(palette.get(PaletteToken::BarFill).to_hex_string(), "#2b809f");
//! ```

pub mod palette;

pub use palette::{Palette, PaletteColors, PaletteToken};
