//! Options for the things that can be drawn inside grid cells.
//!
//! Every options struct has a sensible [Default]; construct one with struct
//! update syntax and override only what you need:
//!
//! ```
//! use pdf_grid::{Align, RectProps, TextProps, Pt};
//!
//! let logo = RectProps { center: true, percent: 80.0, ..RectProps::default() };
//! let title = TextProps { size: Pt(16.0), align: Align::Center, ..TextProps::default() };
//! ```

use crate::colour::{colours, Colour};
use crate::font::{FontStyle, TextStyle};
use crate::units::Pt;

/// Horizontal alignment inside a cell
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// How an image is fitted into its cell
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RectProps {
    /// Center the image both ways. Padding and alignment are ignored when set.
    pub center: bool,
    /// Percentage of the available space the image may occupy, in (0, 100]
    pub percent: f32,
    /// Horizontal alignment when not centered
    pub align: Align,
    /// Horizontal padding from the aligned edge when not centered
    pub left: Pt,
    /// Padding from the top of the cell when not centered
    pub top: Pt,
}

impl Default for RectProps {
    fn default() -> Self {
        RectProps {
            center: false,
            percent: 100.0,
            align: Align::Left,
            left: Pt(0.0),
            top: Pt(0.0),
        }
    }
}

impl RectProps {
    /// Percentages outside (0, 100] mean "fill the cell"
    pub fn clamp_percent(percent: f32) -> f32 {
        if percent > 0.0 && percent <= 100.0 {
            percent
        } else {
            100.0
        }
    }

    pub fn make_valid(&mut self) {
        self.percent = Self::clamp_percent(self.percent);
        if self.center {
            self.left = Pt(0.0);
            self.top = Pt(0.0);
        }
        if *self.left < 0.0 {
            self.left = Pt(0.0);
        }
        if *self.top < 0.0 {
            self.top = Pt(0.0);
        }
    }
}

/// How a piece of text is set inside its cell
#[derive(Debug, Clone, PartialEq)]
pub struct TextProps {
    /// Distance from the top of the cell to the top of the first line
    pub top: Pt,
    /// Padding from the left edge of the cell
    pub left: Pt,
    /// Padding from the right edge of the cell
    pub right: Pt,
    /// Font family; `None` uses the grid's default family
    pub family: Option<String>,
    pub style: FontStyle,
    pub size: Pt,
    pub align: Align,
    /// Never wrap; the text is drawn on a single line even if it overflows
    pub extrapolate: bool,
    pub colour: Colour,
}

impl Default for TextProps {
    fn default() -> Self {
        TextProps {
            top: Pt(0.0),
            left: Pt(0.0),
            right: Pt(0.0),
            family: None,
            style: FontStyle::Normal,
            size: Pt(10.0),
            align: Align::Left,
            extrapolate: false,
            colour: colours::BLACK,
        }
    }
}

impl TextProps {
    /// Resolve the font this text is set in
    pub fn text_style(&self, default_family: &str) -> TextStyle {
        TextStyle::new(
            self.family.as_deref().unwrap_or(default_family),
            self.style,
            self.size,
        )
    }

    /// Width left for text inside a cell `cell_width` wide
    pub fn text_width(&self, cell_width: Pt) -> Pt {
        (cell_width - self.left - self.right).max(Pt(0.0))
    }
}

/// Dash pattern of a stroked line
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum LineDash {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

/// How a separator line is stroked
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LineStyle {
    pub colour: Colour,
    pub width: Pt,
    pub dash: LineDash,
}

impl Default for LineStyle {
    fn default() -> Self {
        LineStyle {
            colour: colours::BLACK,
            width: Pt(0.5),
            dash: LineDash::Solid,
        }
    }
}
