//! Conversion from sheetbridge style types to umya-spreadsheet structs

use sheetbridge_core::{
    BorderLine, BorderStyle, BorderWeight, Color, HorizontalAlign, SheetStyle, VerticalAlign,
};
use umya_spreadsheet::structs::{
    Border, HorizontalAlignmentValues, PatternValues, Style, VerticalAlignmentValues,
};

/// Build a full umya cell style from a [`SheetStyle`].
///
/// Absent parts are left at their defaults, matching how the backend treats
/// an untouched cell.
pub(crate) fn style_to_umya(style: &SheetStyle) -> Style {
    let mut out = Style::default();

    if let Some(text) = &style.text {
        let font = out.get_font_mut();
        font.set_bold(text.bold);
        font.set_italic(text.italic);
        if text.underline {
            font.set_underline("single");
        }
        font.set_size(text.size);
        font.set_name(text.font.as_str());
        font.get_color_mut().set_argb(argb(text.color));

        let alignment = out.get_alignment_mut();
        alignment.set_horizontal(horizontal_to_umya(text.horizontal));
        alignment.set_vertical(vertical_to_umya(text.vertical));
    }

    if let Some(cell) = &style.cell {
        if let Some(background) = cell.background {
            let fill = out.get_fill_mut().get_pattern_fill_mut();
            fill.set_pattern_type(PatternValues::Solid);
            fill.get_foreground_color_mut().set_argb(argb(background));
            fill.get_background_color_mut().set_argb(argb(background));
        }
    }

    out
}

/// Add the selected perimeter edges of `border` onto an existing cell style.
pub(crate) fn apply_border_edges(
    style: &mut Style,
    border: &BorderStyle,
    top: bool,
    bottom: bool,
    left: bool,
    right: bool,
) {
    let line = border_line_style(border.weight, border.line);
    let color = argb(border.color);
    let borders = style.get_borders_mut();

    if top && border.top {
        let edge = borders.get_top_mut();
        edge.set_border_style(line);
        edge.get_color_mut().set_argb(color.clone());
    }
    if bottom && border.bottom {
        let edge = borders.get_bottom_mut();
        edge.set_border_style(line);
        edge.get_color_mut().set_argb(color.clone());
    }
    if left && border.left {
        let edge = borders.get_left_mut();
        edge.set_border_style(line);
        edge.get_color_mut().set_argb(color.clone());
    }
    if right && border.right {
        let edge = borders.get_right_mut();
        edge.set_border_style(line);
        edge.get_color_mut().set_argb(color);
    }
}

/// Map weight + line kind onto the library's border style identifiers.
///
/// Dotted and dashed lines have no per-weight variants in OOXML, so weight
/// only differentiates solid lines.
pub(crate) fn border_line_style(weight: BorderWeight, line: BorderLine) -> &'static str {
    match line {
        BorderLine::Solid => match weight {
            BorderWeight::Thin => Border::BORDER_THIN,
            BorderWeight::Medium => Border::BORDER_MEDIUM,
            BorderWeight::Thick => Border::BORDER_THICK,
            BorderWeight::Double => Border::BORDER_DOUBLE,
        },
        BorderLine::Dotted => Border::BORDER_DOTTED,
        BorderLine::Dashed => Border::BORDER_DASHED,
    }
}

fn horizontal_to_umya(align: HorizontalAlign) -> HorizontalAlignmentValues {
    match align {
        HorizontalAlign::Left => HorizontalAlignmentValues::Left,
        HorizontalAlign::Center => HorizontalAlignmentValues::Center,
        HorizontalAlign::Right => HorizontalAlignmentValues::Right,
    }
}

fn vertical_to_umya(align: VerticalAlign) -> VerticalAlignmentValues {
    match align {
        VerticalAlign::Top => VerticalAlignmentValues::Top,
        VerticalAlign::Middle => VerticalAlignmentValues::Center,
        VerticalAlign::Bottom => VerticalAlignmentValues::Bottom,
    }
}

// Lowercase hex sidesteps umya's indexed-palette remapping of well-known
// ARGB values (see set_argb), so the file keeps an rgb="..." attribute.
fn argb(color: Color) -> String {
    color.to_argb_hex().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_border_line_style() {
        assert_eq!(
            border_line_style(BorderWeight::Thin, BorderLine::Solid),
            Border::BORDER_THIN
        );
        assert_eq!(
            border_line_style(BorderWeight::Double, BorderLine::Solid),
            Border::BORDER_DOUBLE
        );
        assert_eq!(
            border_line_style(BorderWeight::Thick, BorderLine::Dotted),
            Border::BORDER_DOTTED
        );
        assert_eq!(
            border_line_style(BorderWeight::Thin, BorderLine::Dashed),
            Border::BORDER_DASHED
        );
    }

    #[test]
    fn test_argb_is_lowercase() {
        assert_eq!(argb(Color::RED), "ffff0000");
    }

    #[test]
    fn test_style_to_umya_builds_full_style() {
        use sheetbridge_core::{HorizontalAlign, VerticalAlign};

        let style = SheetStyle::builder()
            .bold()
            .italic()
            .underline()
            .font("Courier New")
            .font_size(9.5)
            .text_color(Color::RED)
            .align(HorizontalAlign::Center, VerticalAlign::Top)
            .background(Color::YELLOW)
            .build();
        let converted = style_to_umya(&style);
        assert!(converted.get_font().is_some());
    }
}
