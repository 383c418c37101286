//! Border formatting types

use super::Color;
use serde::{Deserialize, Serialize};

/// Border line weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BorderWeight {
    #[default]
    Thin,
    Medium,
    Thick,
    Double,
}

/// Border line kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BorderLine {
    #[default]
    Solid,
    Dotted,
    Dashed,
}

/// Border formatting applied to the perimeter of a range.
///
/// The side flags select which perimeter edges are drawn; weight, line kind
/// and color apply to every selected side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BorderStyle {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
    pub weight: BorderWeight,
    pub line: BorderLine,
    pub color: Color,
}

impl Default for BorderStyle {
    fn default() -> Self {
        Self {
            left: false,
            right: false,
            top: false,
            bottom: false,
            weight: BorderWeight::Thin,
            line: BorderLine::Solid,
            color: Color::BLACK,
        }
    }
}

impl BorderStyle {
    /// A border on all four sides
    pub fn outline(weight: BorderWeight, line: BorderLine, color: Color) -> Self {
        Self {
            left: true,
            right: true,
            top: true,
            bottom: true,
            weight,
            line,
            color,
        }
    }

    /// Whether no side is selected
    pub fn is_empty(&self) -> bool {
        !(self.left || self.right || self.top || self.bottom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outline() {
        let border = BorderStyle::outline(BorderWeight::Medium, BorderLine::Solid, Color::BLACK);
        assert!(border.left && border.right && border.top && border.bottom);
        assert!(!border.is_empty());
        assert!(BorderStyle::default().is_empty());
    }
}
