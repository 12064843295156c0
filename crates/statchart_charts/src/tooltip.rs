//! Tooltip box layout
//!
//! Tooltips open to the right of and below their anchor, and flip to the
//! other side on any axis where the box would cross the limits.

use smallvec::SmallVec;
use statchart_core::{Point, Rect};

/// One line of tooltip text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TooltipLine {
    pub text: String,
    pub bold: bool,
    /// Extra letter spacing
    pub wide: bool,
}

impl TooltipLine {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
            wide: false,
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
            wide: false,
        }
    }

    pub fn wide(mut self) -> Self {
        self.wide = true;
        self
    }
}

pub type TooltipLines = SmallVec<[TooltipLine; 4]>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HorizontalSide {
    Left,
    #[default]
    Right,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum VerticalSide {
    Top,
    #[default]
    Bottom,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TooltipStyle {
    /// Gap between anchor and box
    pub offset: Point,
    pub padding: f64,
    pub font_size: f64,
    pub line_height: f64,
    pub fill_opacity: f64,
    pub horizontal: HorizontalSide,
    pub vertical: VerticalSide,
}

impl Default for TooltipStyle {
    fn default() -> Self {
        Self {
            offset: Point::new(0.0, 30.0),
            padding: 10.0,
            font_size: 14.0,
            line_height: 1.2,
            fill_opacity: 0.7,
            horizontal: HorizontalSide::Right,
            vertical: VerticalSide::Bottom,
        }
    }
}

impl TooltipStyle {
    /// Approximate width of the widest line.
    pub fn text_width(&self, lines: &[TooltipLine]) -> f64 {
        lines
            .iter()
            .map(|line| {
                let per_char = (if line.bold { 0.62 } else { 0.56 }) * self.font_size;
                let spacing = if line.wide { 0.1 * self.font_size } else { 0.0 };
                line.text.chars().count() as f64 * (per_char + spacing)
            })
            .fold(0.0, f64::max)
    }

    pub fn text_height(&self, line_count: usize) -> f64 {
        (self.line_height * line_count as f64 + 1.0) * self.font_size
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TooltipPlacement {
    /// Background box
    pub container: Rect,
    /// Top-left of the first text line
    pub text_origin: Point,
    pub horizontal: HorizontalSide,
    pub vertical: VerticalSide,
}

/// Lay out a `text_width` × `line_count` tooltip next to `anchor`.
pub fn place_tooltip(
    anchor: Point,
    text_width: f64,
    line_count: usize,
    limits: Option<Point>,
    style: &TooltipStyle,
) -> TooltipPlacement {
    let width = text_width + style.padding * 2.0;
    let height = style.text_height(line_count);
    let offset = style.offset;

    let mut horizontal = style.horizontal;
    let mut vertical = style.vertical;
    if let Some(limits) = limits {
        if anchor.x + offset.x + width > limits.x {
            horizontal = HorizontalSide::Left;
        }
        if anchor.y + offset.y + height > limits.y {
            vertical = VerticalSide::Top;
        }
    }

    let x = match horizontal {
        HorizontalSide::Right => anchor.x + offset.x,
        HorizontalSide::Left => anchor.x - (width + offset.x),
    };
    let y = match vertical {
        VerticalSide::Bottom => anchor.y + offset.y,
        VerticalSide::Top => anchor.y - (height + offset.y),
    };

    TooltipPlacement {
        container: Rect::new(x, y, width, height),
        text_origin: Point::new(x + style.padding, y + style.padding),
        horizontal,
        vertical,
    }
}

/// Side of the pointer a floating tooltip goes on, keeping it inside the
/// canvas: left of the pointer once it passes `center_x`.
pub fn side_of_center(pointer_x: f64, center_x: f64) -> HorizontalSide {
    if pointer_x > center_x {
        HorizontalSide::Left
    } else {
        HorizontalSide::Right
    }
}
