//! Conversion from sheetbridge style types to Sheets API request types

use google_sheets4::api::{
    Border, CellData, CellFormat, Color as ApiColor, GridRange, RepeatCellRequest, Request,
    TextFormat, UpdateBordersRequest,
};
use sheetbridge_core::{
    BorderLine, BorderStyle, BorderWeight, CellRange, Color, HorizontalAlign, SheetStyle,
    VerticalAlign,
};

/// Translate a [`CellRange`] into the API's half-open `GridRange`.
pub(crate) fn grid_range(range: CellRange, sheet_id: i32) -> GridRange {
    GridRange {
        sheet_id: Some(sheet_id),
        start_row_index: Some(range.start.row as i32),
        end_row_index: Some(range.end.row as i32 + 1),
        start_column_index: Some(range.start.col as i32),
        end_column_index: Some(range.end.col as i32 + 1),
    }
}

/// The API's unit-interval color form
pub(crate) fn api_color(color: Color) -> ApiColor {
    ApiColor {
        red: Some(color.r as f32 / 255.0),
        green: Some(color.g as f32 / 255.0),
        blue: Some(color.b as f32 / 255.0),
        alpha: None,
    }
}

pub(crate) fn horizontal_str(align: HorizontalAlign) -> &'static str {
    match align {
        HorizontalAlign::Left => "LEFT",
        HorizontalAlign::Center => "CENTER",
        HorizontalAlign::Right => "RIGHT",
    }
}

pub(crate) fn vertical_str(align: VerticalAlign) -> &'static str {
    match align {
        VerticalAlign::Top => "TOP",
        VerticalAlign::Middle => "MIDDLE",
        VerticalAlign::Bottom => "BOTTOM",
    }
}

/// Border style identifier for weight + line kind.
///
/// Only solid lines have weight variants in the API, mirroring the local
/// backend's mapping.
pub(crate) fn border_style_str(weight: BorderWeight, line: BorderLine) -> &'static str {
    match line {
        BorderLine::Solid => match weight {
            BorderWeight::Thin => "SOLID",
            BorderWeight::Medium => "SOLID_MEDIUM",
            BorderWeight::Thick => "SOLID_THICK",
            BorderWeight::Double => "DOUBLE",
        },
        BorderLine::Dotted => "DOTTED",
        BorderLine::Dashed => "DASHED",
    }
}

/// Build the `RepeatCell` requests for a style application.
///
/// The text and cell parts become separate requests with tight field masks so
/// an absent part leaves that formatting untouched, as on the local backend.
pub(crate) fn style_requests(style: &SheetStyle, range: GridRange) -> Vec<Request> {
    let mut requests = Vec::new();

    if let Some(text) = &style.text {
        let text_format = TextFormat {
            bold: Some(text.bold),
            italic: Some(text.italic),
            underline: Some(text.underline),
            font_size: Some(text.size.round() as i32),
            font_family: Some(text.font.clone()),
            foreground_color: Some(api_color(text.color)),
            ..Default::default()
        };

        let cell_format = CellFormat {
            text_format: Some(text_format),
            horizontal_alignment: Some(horizontal_str(text.horizontal).to_string()),
            vertical_alignment: Some(vertical_str(text.vertical).to_string()),
            ..Default::default()
        };

        requests.push(Request {
            repeat_cell: Some(RepeatCellRequest {
                range: Some(range.clone()),
                cell: Some(CellData {
                    user_entered_format: Some(cell_format),
                    ..Default::default()
                }),
                fields: Some(
                    "userEnteredFormat.textFormat,userEnteredFormat.horizontalAlignment,\
                     userEnteredFormat.verticalAlignment"
                        .to_string(),
                ),
            }),
            ..Default::default()
        });
    }

    if let Some(cell) = &style.cell {
        if let Some(background) = cell.background {
            let cell_format = CellFormat {
                background_color: Some(api_color(background)),
                ..Default::default()
            };

            requests.push(Request {
                repeat_cell: Some(RepeatCellRequest {
                    range: Some(range),
                    cell: Some(CellData {
                        user_entered_format: Some(cell_format),
                        ..Default::default()
                    }),
                    fields: Some("userEnteredFormat.backgroundColor".to_string()),
                }),
                ..Default::default()
            });
        }
    }

    requests
}

/// Build the `UpdateBorders` request for a perimeter border application.
pub(crate) fn border_request(border: &BorderStyle, range: GridRange) -> Request {
    let edge = Border {
        style: Some(border_style_str(border.weight, border.line).to_string()),
        color: Some(api_color(border.color)),
        ..Default::default()
    };

    let mut update = UpdateBordersRequest {
        range: Some(range),
        ..Default::default()
    };
    if border.top {
        update.top = Some(edge.clone());
    }
    if border.bottom {
        update.bottom = Some(edge.clone());
    }
    if border.left {
        update.left = Some(edge.clone());
    }
    if border.right {
        update.right = Some(edge);
    }

    Request {
        update_borders: Some(update),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetbridge_core::Addr;

    #[test]
    fn test_grid_range_is_half_open() {
        let range = CellRange::new(Addr::parse("B2").unwrap(), Addr::parse("C4").unwrap());
        let grid = grid_range(range, 7);
        assert_eq!(grid.sheet_id, Some(7));
        assert_eq!(grid.start_row_index, Some(1));
        assert_eq!(grid.end_row_index, Some(4));
        assert_eq!(grid.start_column_index, Some(1));
        assert_eq!(grid.end_column_index, Some(3));
    }

    #[test]
    fn test_api_color() {
        let c = api_color(Color::rgb(255, 0, 128));
        assert_eq!(c.red, Some(1.0));
        assert_eq!(c.green, Some(0.0));
        assert!((c.blue.unwrap() - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_border_style_str() {
        assert_eq!(border_style_str(BorderWeight::Thin, BorderLine::Solid), "SOLID");
        assert_eq!(
            border_style_str(BorderWeight::Medium, BorderLine::Solid),
            "SOLID_MEDIUM"
        );
        assert_eq!(
            border_style_str(BorderWeight::Double, BorderLine::Solid),
            "DOUBLE"
        );
        assert_eq!(
            border_style_str(BorderWeight::Thick, BorderLine::Dashed),
            "DASHED"
        );
    }

    #[test]
    fn test_style_requests_field_masks() {
        let style = SheetStyle::builder().bold().background(Color::YELLOW).build();
        let range = grid_range(CellRange::parse("A1:B2").unwrap(), 0);

        let requests = style_requests(&style, range);
        assert_eq!(requests.len(), 2);

        let text_fields = requests[0]
            .repeat_cell
            .as_ref()
            .unwrap()
            .fields
            .as_deref()
            .unwrap();
        assert!(text_fields.contains("textFormat"));

        let fill_fields = requests[1]
            .repeat_cell
            .as_ref()
            .unwrap()
            .fields
            .as_deref()
            .unwrap();
        assert_eq!(fill_fields, "userEnteredFormat.backgroundColor");
    }

    #[test]
    fn test_style_requests_empty_style() {
        let range = grid_range(CellRange::parse("A1").unwrap(), 0);
        assert!(style_requests(&SheetStyle::default(), range).is_empty());
    }

    #[test]
    fn test_border_request_sides() {
        let border = BorderStyle {
            top: true,
            bottom: true,
            ..Default::default()
        };
        let request = border_request(&border, grid_range(CellRange::parse("A1:C3").unwrap(), 0));
        let update = request.update_borders.unwrap();
        assert!(update.top.is_some());
        assert!(update.bottom.is_some());
        assert!(update.left.is_none());
        assert!(update.right.is_none());
        assert_eq!(update.top.unwrap().style.as_deref(), Some("SOLID"));
    }
}
