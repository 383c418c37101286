//! Cell styling types and the fluent style builder

mod border;
mod color;
mod text;

pub use border::{BorderLine, BorderStyle, BorderWeight};
pub use color::Color;
pub use text::{CellStyle, HorizontalAlign, TextStyle, VerticalAlign};

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The style aggregate passed to [`apply_style`](crate::SheetWriter::apply_style).
///
/// Each part is optional: `None` leaves that aspect of the target cells
/// untouched. Borders are applied separately via
/// [`apply_border`](crate::SheetWriter::apply_border) because they target a
/// range's perimeter rather than every cell.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SheetStyle {
    pub text: Option<TextStyle>,
    pub cell: Option<CellStyle>,
}

impl SheetStyle {
    /// Start building a style fluently
    pub fn builder() -> StyleBuilder {
        StyleBuilder::new()
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Style(e.to_string()))
    }

    /// Deserialize from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Style(e.to_string()))
    }

    /// Write the style as JSON to a file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Load a style from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

/// Fluent builder for [`SheetStyle`].
///
/// ```
/// use sheetbridge_core::{Color, HorizontalAlign, SheetStyle, VerticalAlign};
///
/// let header = SheetStyle::builder()
///     .bold()
///     .font_size(14.0)
///     .text_color(Color::WHITE)
///     .background(Color::rgb(0, 0, 128))
///     .align(HorizontalAlign::Center, VerticalAlign::Middle)
///     .build();
/// assert!(header.text.unwrap().bold);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StyleBuilder {
    text: Option<TextStyle>,
    cell: Option<CellStyle>,
}

impl StyleBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn text_mut(&mut self) -> &mut TextStyle {
        self.text.get_or_insert_with(TextStyle::default)
    }

    pub fn bold(mut self) -> Self {
        self.text_mut().bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.text_mut().italic = true;
        self
    }

    pub fn underline(mut self) -> Self {
        self.text_mut().underline = true;
        self
    }

    pub fn font_size(mut self, size: f64) -> Self {
        self.text_mut().size = size;
        self
    }

    pub fn font<S: Into<String>>(mut self, name: S) -> Self {
        self.text_mut().font = name.into();
        self
    }

    pub fn text_color(mut self, color: Color) -> Self {
        self.text_mut().color = color;
        self
    }

    pub fn align(mut self, horizontal: HorizontalAlign, vertical: VerticalAlign) -> Self {
        let text = self.text_mut();
        text.horizontal = horizontal;
        text.vertical = vertical;
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.cell.get_or_insert_with(CellStyle::default).background = Some(color);
        self
    }

    pub fn build(self) -> SheetStyle {
        SheetStyle {
            text: self.text,
            cell: self.cell,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builder() {
        let style = SheetStyle::builder()
            .bold()
            .italic()
            .font("Courier New")
            .font_size(9.5)
            .text_color(Color::RED)
            .align(HorizontalAlign::Right, VerticalAlign::Bottom)
            .background(Color::YELLOW)
            .build();

        let text = style.text.expect("text part set");
        assert!(text.bold);
        assert!(text.italic);
        assert!(!text.underline);
        assert_eq!(text.font, "Courier New");
        assert_eq!(text.size, 9.5);
        assert_eq!(text.horizontal, HorizontalAlign::Right);
        assert_eq!(style.cell.expect("cell part set").background, Some(Color::YELLOW));
    }

    #[test]
    fn test_builder_untouched_parts_stay_none() {
        let style = SheetStyle::builder().background(Color::GRAY).build();
        assert!(style.text.is_none());
        assert!(style.cell.is_some());
    }

    #[test]
    fn test_json_roundtrip() {
        let style = SheetStyle::builder()
            .bold()
            .font_size(14.0)
            .background(Color::rgb(10, 20, 30))
            .build();

        let json = style.to_json().unwrap();
        let parsed = SheetStyle::from_json(&json).unwrap();
        assert_eq!(style, parsed);
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("header.style.json");

        let style = SheetStyle::builder().underline().build();
        style.save_to_file(&path).unwrap();

        let loaded = SheetStyle::load_from_file(&path).unwrap();
        assert_eq!(style, loaded);
    }

    #[test]
    fn test_load_missing_file() {
        assert!(SheetStyle::load_from_file("/nonexistent/style.json").is_err());
    }
}
