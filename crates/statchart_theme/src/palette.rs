//! Palette tokens for chart rendering

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use statchart_core::Color;

/// Color token keys for dynamic access
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaletteToken {
    // Bars
    BarFill,
    BarHighlight,
    BarStroke,

    // Lines and grid
    Line,
    Grid,

    // Pointer
    PointerBorder,
    PointerFill,
    Cross,

    // Tooltip
    TooltipBackground,
    TooltipText,
}

impl PaletteToken {
    pub const ALL: [PaletteToken; 10] = [
        PaletteToken::BarFill,
        PaletteToken::BarHighlight,
        PaletteToken::BarStroke,
        PaletteToken::Line,
        PaletteToken::Grid,
        PaletteToken::PointerBorder,
        PaletteToken::PointerFill,
        PaletteToken::Cross,
        PaletteToken::TooltipBackground,
        PaletteToken::TooltipText,
    ];
}

/// Complete set of chart colors.
///
/// Every field has a default, so a TOML table only needs the colors it changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteColors {
    pub bar_fill: Color,
    /// Hovered, previewed and selected bands
    pub bar_highlight: Color,
    pub bar_stroke: Color,

    pub line: Color,
    pub grid: Color,

    pub pointer_border: Color,
    pub pointer_fill: Color,
    pub cross: Color,

    pub tooltip_bg: Color,
    pub tooltip_text: Color,
}

impl Default for PaletteColors {
    fn default() -> Self {
        Self {
            bar_fill: Color::from_hex(0x2b809f),
            bar_highlight: Color::from_hex(0x1d5a6d),
            bar_stroke: Color::from_hex(0xe5e5e5),
            line: Color::from_rgb8(49, 130, 189),
            grid: Color::from_hex(0xcccccc),
            pointer_border: Color::BLACK,
            pointer_fill: Color::WHITE,
            cross: Color::WHITE.with_alpha(0.7),
            tooltip_bg: Color::BLACK,
            tooltip_text: Color::from_hex(0x999999),
        }
    }
}

impl PaletteColors {
    /// Get a color by token key
    pub fn get(&self, token: PaletteToken) -> Color {
        match token {
            PaletteToken::BarFill => self.bar_fill,
            PaletteToken::BarHighlight => self.bar_highlight,
            PaletteToken::BarStroke => self.bar_stroke,
            PaletteToken::Line => self.line,
            PaletteToken::Grid => self.grid,
            PaletteToken::PointerBorder => self.pointer_border,
            PaletteToken::PointerFill => self.pointer_fill,
            PaletteToken::Cross => self.cross,
            PaletteToken::TooltipBackground => self.tooltip_bg,
            PaletteToken::TooltipText => self.tooltip_text,
        }
    }
}

/// Palette value passed down to chart models: base colors plus runtime overrides.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    #[serde(flatten)]
    colors: PaletteColors,
    overrides: FxHashMap<PaletteToken, Color>,
}

impl Palette {
    pub fn new(colors: PaletteColors) -> Self {
        Self {
            colors,
            overrides: FxHashMap::default(),
        }
    }

    /// Parse a palette from a TOML table, e.g. `bar_fill = "#2b809f"`.
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        let palette: Palette = toml::from_str(s)?;
        tracing::debug!(
            overrides = palette.overrides.len(),
            "Palette::from_toml_str - loaded palette"
        );
        Ok(palette)
    }

    pub fn colors(&self) -> &PaletteColors {
        &self.colors
    }

    /// Resolve a token, preferring an override when one is set.
    pub fn get(&self, token: PaletteToken) -> Color {
        self.overrides
            .get(&token)
            .copied()
            .unwrap_or_else(|| self.colors.get(token))
    }

    pub fn set_override(&mut self, token: PaletteToken, color: Color) {
        tracing::trace!(?token, color = %color.to_hex_string(), "palette override");
        self.overrides.insert(token, color);
    }

    pub fn remove_override(&mut self, token: PaletteToken) -> Option<Color> {
        self.overrides.remove(&token)
    }

    pub fn clear_overrides(&mut self) {
        self.overrides.clear();
    }

    pub fn has_overrides(&self) -> bool {
        !self.overrides.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_token_resolves() {
        let palette = Palette::default();
        for token in PaletteToken::ALL {
            assert_eq!(palette.get(token), palette.colors().get(token));
        }
    }

    #[test]
    fn toml_overrides_only_named_colors() {
        let palette = Palette::from_toml_str(
            r##"
            bar_fill = "#ff0000"

            [overrides]
            line = "rgb(0, 0, 255)"
            "##,
        )
        .unwrap();
        assert_eq!(palette.get(PaletteToken::BarFill).to_hex_string(), "#ff0000");
        assert_eq!(palette.get(PaletteToken::Line).to_hex_string(), "#0000ff");
        assert_eq!(
            palette.get(PaletteToken::BarStroke),
            PaletteColors::default().bar_stroke
        );
        assert!(palette.has_overrides());
    }

    #[test]
    fn invalid_color_is_a_parse_error() {
        assert!(Palette::from_toml_str(r#"bar_fill = "sky""#).is_err());
    }

    #[test]
    fn remove_override_restores_base_color() {
        let mut palette = Palette::default();
        palette.set_override(PaletteToken::Grid, Color::WHITE);
        assert_eq!(palette.get(PaletteToken::Grid), Color::WHITE);
        assert_eq!(palette.remove_override(PaletteToken::Grid), Some(Color::WHITE));
        assert_eq!(palette.get(PaletteToken::Grid), Color::from_hex(0xcccccc));
    }
}
