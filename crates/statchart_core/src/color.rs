//! RGBA colors

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, Result};

/// RGBA color with channels in `0.0..=1.0`.
///
/// Serialized as a CSS hex string (`#rrggbb` or `#rrggbbaa`), and parsed from
/// hex or `rgb()`/`rgba()` notation so palette files can reuse web colors.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let b = (hex & 0xFF) as f32 / 255.0;
        Self::rgb(r, g, b)
    }

    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.a = alpha;
        self
    }

    pub fn to_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Parse `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)` or `rgba(r, g, b, a)`.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return Self::parse_hex(hex).ok_or_else(|| invalid_color(s));
        }
        if let Some(body) = s
            .strip_prefix("rgba(")
            .or_else(|| s.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return Self::parse_functional(body).ok_or_else(|| invalid_color(s));
        }
        Err(invalid_color(s))
    }

    fn parse_hex(hex: &str) -> Option<Self> {
        let digits = match hex.len() {
            3 => hex.chars().flat_map(|c| [c, c]).collect::<String>(),
            6 | 8 => hex.to_string(),
            _ => return None,
        };
        let value = u32::from_str_radix(&digits, 16).ok()?;
        if digits.len() == 8 {
            Some(Self::from_hex(value >> 8).with_alpha((value & 0xFF) as f32 / 255.0))
        } else {
            Some(Self::from_hex(value))
        }
    }

    fn parse_functional(body: &str) -> Option<Self> {
        let parts: Vec<&str> = body.split(',').map(str::trim).collect();
        if parts.len() != 3 && parts.len() != 4 {
            return None;
        }
        let mut channels = [0u8; 3];
        for (slot, part) in channels.iter_mut().zip(&parts) {
            *slot = part.parse().ok()?;
        }
        let alpha = match parts.get(3) {
            Some(a) => a.parse::<f32>().ok().filter(|a| (0.0..=1.0).contains(a))?,
            None => 1.0,
        };
        Some(Self::from_rgb8(channels[0], channels[1], channels[2]).with_alpha(alpha))
    }

    /// Format as `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    pub fn to_hex_string(&self) -> String {
        let to_u8 = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        let (r, g, b, a) = (to_u8(self.r), to_u8(self.g), to_u8(self.b), to_u8(self.a));
        if a == 255 {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }
}

fn invalid_color(s: &str) -> ChartError {
    ChartError::invalid_argument(format!("unrecognized color '{s}'"))
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl TryFrom<String> for Color {
    type Error = ChartError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_forms() {
        assert_eq!(Color::parse("#fff").unwrap(), Color::WHITE);
        assert_eq!(Color::parse("#000000").unwrap(), Color::BLACK);
        let c = Color::parse("#2b809f").unwrap();
        assert_eq!(c.to_hex_string(), "#2b809f");
        let translucent = Color::parse("#00000080").unwrap();
        assert!((translucent.a - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn parses_functional_forms() {
        let c = Color::parse("rgb(49, 130, 189)").unwrap();
        assert_eq!(c.to_hex_string(), "#3182bd");
        let c = Color::parse("rgba(255,255,255,0.7)").unwrap();
        assert!((c.a - 0.7).abs() < 1e-6);
    }

    #[test]
    fn rejects_garbage() {
        assert!(Color::parse("blue").is_err());
        assert!(Color::parse("#12345").is_err());
        assert!(Color::parse("rgb(300, 0, 0)").is_err());
        assert!(Color::parse("rgba(0, 0, 0, 2)").is_err());
    }

    #[test]
    fn serde_round_trips_through_hex_strings() {
        let json = serde_json::to_string(&Color::from_hex(0xe5e5e5)).unwrap();
        assert_eq!(json, "\"#e5e5e5\"");
        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back.to_hex_string(), "#e5e5e5");
        assert!(serde_json::from_str::<Color>("\"nope\"").is_err());
    }
}
