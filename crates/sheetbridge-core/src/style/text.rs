//! Text formatting types

use super::Color;
use serde::{Deserialize, Serialize};

/// Horizontal text alignment within a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HorizontalAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical text alignment within a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum VerticalAlign {
    Top,
    #[default]
    Middle,
    Bottom,
}

/// Text formatting applied to a cell or range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    /// Font size in points
    pub size: f64,
    /// Font family name
    pub font: String,
    /// Font color
    pub color: Color,
    pub horizontal: HorizontalAlign,
    pub vertical: VerticalAlign,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            bold: false,
            italic: false,
            underline: false,
            size: 11.0,
            font: "Arial".to_string(),
            color: Color::BLACK,
            horizontal: HorizontalAlign::Left,
            vertical: VerticalAlign::Middle,
        }
    }
}

/// Cell-level formatting (everything that is not text or borders)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CellStyle {
    /// Solid background fill; `None` leaves the fill untouched
    pub background: Option<Color>,
}
