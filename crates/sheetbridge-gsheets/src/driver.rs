//! The Google Sheets driver

use crate::config::{quoted_sheet_title, spreadsheet_id_from_url, CredentialSource, GoogleSheetsConfig};
use crate::convert;
use crate::error::GoogleSheetsError;
use google_sheets4::api::{
    AddSheetRequest, BatchUpdateSpreadsheetRequest, BatchUpdateValuesRequest, DimensionProperties,
    DimensionRange, GridRange, MergeCellsRequest, Request, SheetProperties,
    Spreadsheet as ApiSpreadsheet, UpdateDimensionPropertiesRequest, ValueRange,
};
use google_sheets4::{hyper, hyper_rustls, oauth2, Sheets};
use serde_json::Value as Json;
use sheetbridge_core::{
    Addr, BorderStyle, CellRange, Error, Grid, Result, SheetController, SheetReader, SheetStyle,
    SheetWriter, SpreadsheetDriver,
};
use tokio::runtime::Runtime;
use tracing::debug;

type SheetsHub = Sheets<hyper_rustls::HttpsConnector<hyper::client::HttpConnector>>;

/// Column character units to screen pixels, per the rendered default font
const PIXELS_PER_CHAR: f64 = 8.0;

/// Row height points to screen pixels (96 dpi / 72 pt)
const PIXELS_PER_POINT: f64 = 4.0 / 3.0;

/// Driver for a cloud-hosted Google Sheets spreadsheet.
///
/// All API traffic goes through the generated `google-sheets4` client on a
/// driver-owned tokio runtime. See the crate docs for the batching model.
pub struct GoogleSheetsDriver {
    config: GoogleSheetsConfig,
    rt: Runtime,
    hub: Option<SheetsHub>,
    spreadsheet_id: Option<String>,
    active: Option<String>,
    sheet_id: Option<i32>,
    /// Structural/format requests waiting for `save()` (batch mode)
    pending_requests: Vec<Request>,
    /// Value updates waiting for `save()`, coalesced by target range
    pending_values: Vec<(String, ValueRange)>,
    /// Merged ranges of the active sheet, kept current across local merges
    cached_merges: Vec<GridRange>,
}

fn json_cell(value: &Json) -> String {
    match value {
        Json::String(s) => s.clone(),
        Json::Null => String::new(),
        other => other.to_string(),
    }
}

fn trim_trailing_empty(mut values: Vec<String>) -> Vec<String> {
    while values.last().is_some_and(String::is_empty) {
        values.pop();
    }
    values
}

impl GoogleSheetsDriver {
    /// Create a driver from a configuration. No network traffic happens
    /// until [`open`](SheetController::open).
    pub fn new(config: GoogleSheetsConfig) -> Result<Self> {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;

        Ok(Self {
            config,
            rt,
            hub: None,
            spreadsheet_id: None,
            active: None,
            sheet_id: None,
            pending_requests: Vec::new(),
            pending_values: Vec::new(),
            cached_merges: Vec::new(),
        })
    }

    fn hub(&self) -> Result<(&SheetsHub, &str)> {
        match (&self.hub, &self.spreadsheet_id) {
            (Some(hub), Some(id)) => Ok((hub, id)),
            _ => Err(Error::WorkbookNotLoaded),
        }
    }

    fn active_title(&self) -> Result<&str> {
        self.active.as_deref().ok_or(Error::NoActiveSheet)
    }

    fn active_sheet_id(&self) -> Result<i32> {
        self.sheet_id.ok_or(Error::NoActiveSheet)
    }

    /// "Title!A1:B2" style range string for the active sheet
    fn range_str(&self, range: CellRange) -> Result<String> {
        Ok(format!(
            "{}!{}",
            quoted_sheet_title(self.active_title()?),
            range.to_a1_string()
        ))
    }

    fn fetch_spreadsheet(&self) -> Result<ApiSpreadsheet> {
        let (hub, id) = self.hub()?;
        let (_, spreadsheet) = self
            .rt
            .block_on(hub.spreadsheets().get(id).doit())
            .map_err(GoogleSheetsError::api)?;
        Ok(spreadsheet)
    }

    /// Fetch the raw values for an A1 range string
    fn values_get(&self, range: &str) -> Result<Option<Vec<Vec<Json>>>> {
        let (hub, id) = self.hub()?;
        let (_, value_range) = self
            .rt
            .block_on(hub.spreadsheets().values_get(id, range).doit())
            .map_err(GoogleSheetsError::api)?;
        Ok(value_range.values)
    }

    fn values_update(&self, range: &str, values: ValueRange) -> Result<()> {
        let (hub, id) = self.hub()?;
        self.rt
            .block_on(
                hub.spreadsheets()
                    .values_update(values, id, range)
                    .value_input_option("RAW")
                    .doit(),
            )
            .map_err(GoogleSheetsError::api)?;
        Ok(())
    }

    fn execute_requests(&self, requests: Vec<Request>) -> Result<()> {
        let (hub, id) = self.hub()?;
        let batch = BatchUpdateSpreadsheetRequest {
            requests: Some(requests),
            ..Default::default()
        };
        self.rt
            .block_on(hub.spreadsheets().batch_update(batch, id).doit())
            .map_err(GoogleSheetsError::api)?;
        Ok(())
    }

    /// Queue a structural/format request, or execute it immediately when
    /// batching is off
    fn submit_request(&mut self, request: Request) -> Result<()> {
        if self.config.batch_writes {
            self.pending_requests.push(request);
            Ok(())
        } else {
            self.execute_requests(vec![request])
        }
    }

    /// Queue a value update (replacing any earlier update for the same
    /// range), or execute it immediately when batching is off
    fn submit_values(&mut self, range: String, values: ValueRange) -> Result<()> {
        if self.config.batch_writes {
            if let Some(entry) = self.pending_values.iter_mut().find(|(r, _)| *r == range) {
                entry.1 = values;
            } else {
                self.pending_values.push((range, values));
            }
            Ok(())
        } else {
            self.values_update(&range, values)
        }
    }

    /// Top-left anchor of the merged region containing `addr`, or `addr`
    /// itself. Writes into a merged region only land via its anchor.
    fn merge_anchor(&self, addr: Addr) -> Addr {
        let (row, col) = (addr.row as i32, addr.col as i32);
        for merge in &self.cached_merges {
            let (Some(sr), Some(er), Some(sc), Some(ec)) = (
                merge.start_row_index,
                merge.end_row_index,
                merge.start_column_index,
                merge.end_column_index,
            ) else {
                continue;
            };
            if sr <= row && row < er && sc <= col && col < ec {
                return Addr::new(sr as u32, sc as u32);
            }
        }
        addr
    }

    fn value_range(range: &str, values: Vec<Vec<Json>>) -> ValueRange {
        ValueRange {
            range: Some(range.to_string()),
            values: Some(values),
            ..Default::default()
        }
    }
}

impl SheetReader for GoogleSheetsDriver {
    fn read_cell(&mut self, addr: Addr) -> Result<Option<String>> {
        let range = self.range_str(CellRange::single(addr))?;
        let values = self.values_get(&range)?;

        let cell = values
            .as_ref()
            .and_then(|rows| rows.first())
            .and_then(|row| row.first())
            .map(json_cell);
        Ok(cell.filter(|s| !s.is_empty()))
    }

    fn read_row(&mut self, row: u32) -> Result<Vec<String>> {
        let title = quoted_sheet_title(self.active_title()?);
        let range = format!("{}!{}:{}", title, row + 1, row + 1);

        let values = self.values_get(&range)?.unwrap_or_default();
        let cells = values
            .into_iter()
            .next()
            .map(|row| row.iter().map(json_cell).collect())
            .unwrap_or_default();
        Ok(trim_trailing_empty(cells))
    }

    fn read_column(&mut self, col: u32) -> Result<Vec<String>> {
        let title = quoted_sheet_title(self.active_title()?);
        let letters = Addr::column_to_letters(col);
        let range = format!("{title}!{letters}:{letters}");

        let values = self.values_get(&range)?.unwrap_or_default();
        let cells = values
            .into_iter()
            .map(|row| row.first().map(json_cell).unwrap_or_default())
            .collect();
        Ok(trim_trailing_empty(cells))
    }

    fn read_range(&mut self, range: CellRange) -> Result<Grid> {
        let range_str = self.range_str(range)?;
        let values = self.values_get(&range_str)?.unwrap_or_default();

        let cols = range.col_count() as usize;
        let mut grid = Grid::with_letter_columns(range.start.col, range.col_count());
        for r in 0..range.row_count() as usize {
            let mut row: Vec<String> = values
                .get(r)
                .map(|cells| cells.iter().map(json_cell).collect())
                .unwrap_or_default();
            row.resize(cols, String::new());
            grid.push_row(row);
        }
        Ok(grid)
    }

    fn used_range(&mut self) -> Result<Option<CellRange>> {
        // A bare sheet title as the range returns the sheet's used extent
        let title = quoted_sheet_title(self.active_title()?);
        let values = self.values_get(&title)?.unwrap_or_default();

        let rows = values.len();
        let cols = values.iter().map(Vec::len).max().unwrap_or(0);
        if rows == 0 || cols == 0 {
            return Ok(None);
        }
        Ok(Some(CellRange::new(
            Addr::new(0, 0),
            Addr::new(rows as u32 - 1, cols as u32 - 1),
        )))
    }
}

impl SheetWriter for GoogleSheetsDriver {
    fn write_cell(&mut self, addr: Addr, value: &str) -> Result<()> {
        let anchor = self.merge_anchor(addr);
        let range = self.range_str(CellRange::single(anchor))?;
        let values = Self::value_range(&range, vec![vec![Json::String(value.to_string())]]);
        self.submit_values(range, values)
    }

    fn write_row(&mut self, start: Addr, values: &[String]) -> Result<()> {
        if values.is_empty() {
            return Ok(());
        }

        let extent = CellRange::new(start, start.right(values.len() as u32 - 1));
        let range = self.range_str(extent)?;
        let row = values.iter().map(|v| Json::String(v.clone())).collect();
        let values = Self::value_range(&range, vec![row]);
        self.submit_values(range, values)
    }

    fn write_column(&mut self, start: Addr, values: &[String]) -> Result<()> {
        if values.is_empty() {
            return Ok(());
        }

        let extent = CellRange::new(start, start.below(values.len() as u32 - 1));
        let range = self.range_str(extent)?;
        let rows = values
            .iter()
            .map(|v| vec![Json::String(v.clone())])
            .collect();
        let values = Self::value_range(&range, rows);
        self.submit_values(range, values)
    }

    fn write_grid(&mut self, start: Addr, grid: &Grid) -> Result<()> {
        if grid.is_empty() || grid.column_count() == 0 {
            return Ok(());
        }

        let extent = CellRange::new(
            start,
            start.offset(grid.row_count() as u32 - 1, grid.column_count() as u32 - 1),
        );
        let range = self.range_str(extent)?;
        let rows = grid
            .rows()
            .map(|row| row.iter().map(|v| Json::String(v.clone())).collect())
            .collect();
        let values = Self::value_range(&range, rows);
        self.submit_values(range, values)
    }

    fn apply_style(&mut self, range: CellRange, style: &SheetStyle) -> Result<()> {
        let grid_range = convert::grid_range(range, self.active_sheet_id()?);
        for request in convert::style_requests(style, grid_range) {
            self.submit_request(request)?;
        }
        Ok(())
    }

    fn apply_border(&mut self, range: CellRange, border: &BorderStyle) -> Result<()> {
        if border.is_empty() {
            return Ok(());
        }
        let grid_range = convert::grid_range(range, self.active_sheet_id()?);
        self.submit_request(convert::border_request(border, grid_range))
    }

    fn merge(&mut self, range: CellRange) -> Result<()> {
        let grid_range = convert::grid_range(range, self.active_sheet_id()?);
        let request = Request {
            merge_cells: Some(MergeCellsRequest {
                range: Some(grid_range.clone()),
                merge_type: Some("MERGE_ALL".to_string()),
            }),
            ..Default::default()
        };
        self.submit_request(request)?;
        self.cached_merges.push(grid_range);
        Ok(())
    }

    fn set_column_width(&mut self, col: u32, width: f64) -> Result<()> {
        let sheet_id = self.active_sheet_id()?;
        let request = Request {
            update_dimension_properties: Some(UpdateDimensionPropertiesRequest {
                range: Some(DimensionRange {
                    sheet_id: Some(sheet_id),
                    dimension: Some("COLUMNS".to_string()),
                    start_index: Some(col as i32),
                    end_index: Some(col as i32 + 1),
                }),
                properties: Some(DimensionProperties {
                    pixel_size: Some((width * PIXELS_PER_CHAR).round() as i32),
                    ..Default::default()
                }),
                fields: Some("pixelSize".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        self.submit_request(request)
    }

    fn set_row_height(&mut self, row: u32, height: f64) -> Result<()> {
        let sheet_id = self.active_sheet_id()?;
        let request = Request {
            update_dimension_properties: Some(UpdateDimensionPropertiesRequest {
                range: Some(DimensionRange {
                    sheet_id: Some(sheet_id),
                    dimension: Some("ROWS".to_string()),
                    start_index: Some(row as i32),
                    end_index: Some(row as i32 + 1),
                }),
                properties: Some(DimensionProperties {
                    pixel_size: Some((height * PIXELS_PER_POINT).round() as i32),
                    ..Default::default()
                }),
                fields: Some("pixelSize".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        self.submit_request(request)
    }

    fn autofit_columns(&mut self) -> Result<()> {
        // The values surface has no autofit; sizing stays caller-driven here.
        debug!("autofit_columns is a no-op on the google-sheets backend");
        Ok(())
    }
}

impl SheetController for GoogleSheetsDriver {
    fn open(&mut self) -> Result<()> {
        let id = spreadsheet_id_from_url(&self.config.spreadsheet_url)?;

        let key = match &self.config.credentials {
            CredentialSource::File(path) => self
                .rt
                .block_on(oauth2::read_service_account_key(path))
                .map_err(|e| GoogleSheetsError::Auth(e.to_string()))?,
            CredentialSource::Inline(json) => oauth2::parse_service_account_key(json)
                .map_err(|e| GoogleSheetsError::Auth(e.to_string()))?,
        };

        let auth = self
            .rt
            .block_on(oauth2::ServiceAccountAuthenticator::builder(key).build())
            .map_err(|e| GoogleSheetsError::Auth(e.to_string()))?;

        let connector = hyper_rustls::HttpsConnectorBuilder::new()
            .with_native_roots()
            .https_or_http()
            .enable_http1()
            .build();
        let client = hyper::Client::builder().build(connector);

        let mut hub = Sheets::new(client, auth);
        hub.user_agent(self.config.application_name.clone());

        self.hub = Some(hub);
        self.spreadsheet_id = Some(id.clone());
        self.active = None;
        self.sheet_id = None;
        self.pending_requests.clear();
        self.pending_values.clear();
        self.cached_merges.clear();

        debug!(spreadsheet_id = %id, "connected to spreadsheet");
        Ok(())
    }

    fn select_sheet(&mut self, name: &str) -> Result<()> {
        let spreadsheet = self.fetch_spreadsheet()?;
        let sheet = spreadsheet
            .sheets
            .unwrap_or_default()
            .into_iter()
            .find(|s| {
                s.properties
                    .as_ref()
                    .and_then(|p| p.title.as_deref())
                    .is_some_and(|title| title == name)
            })
            .ok_or_else(|| Error::SheetNotFound(name.to_string()))?;

        self.sheet_id = sheet.properties.as_ref().and_then(|p| p.sheet_id);
        self.cached_merges = sheet.merges.unwrap_or_default();
        self.active = Some(name.to_string());

        debug!(sheet = name, merges = self.cached_merges.len(), "selected sheet");
        Ok(())
    }

    fn create_sheets(&mut self, names: &[&str]) -> Result<()> {
        let spreadsheet = self.fetch_spreadsheet()?;
        let existing: Vec<String> = spreadsheet
            .sheets
            .unwrap_or_default()
            .into_iter()
            .filter_map(|s| s.properties.and_then(|p| p.title))
            .collect();

        // Creation is never deferred: later select_sheet calls need the
        // sheets to exist server-side.
        let requests: Vec<Request> = names
            .iter()
            .filter(|name| !existing.iter().any(|t| t == *name))
            .map(|name| Request {
                add_sheet: Some(AddSheetRequest {
                    properties: Some(SheetProperties {
                        title: Some(name.to_string()),
                        ..Default::default()
                    }),
                    ..Default::default()
                }),
                ..Default::default()
            })
            .collect();

        if requests.is_empty() {
            return Ok(());
        }
        self.execute_requests(requests)
    }

    fn sheet_names(&mut self) -> Result<Vec<String>> {
        let spreadsheet = self.fetch_spreadsheet()?;
        Ok(spreadsheet
            .sheets
            .unwrap_or_default()
            .into_iter()
            .filter_map(|s| s.properties.and_then(|p| p.title))
            .collect())
    }

    fn active_sheet(&self) -> Option<&str> {
        self.active.as_deref()
    }

    fn save(&mut self) -> Result<()> {
        if !self.pending_requests.is_empty() {
            debug!(count = self.pending_requests.len(), "flushing queued requests");
            self.execute_requests(self.pending_requests.clone())?;
            self.pending_requests.clear();
        }

        if !self.pending_values.is_empty() {
            debug!(count = self.pending_values.len(), "flushing queued value updates");
            let data: Vec<ValueRange> = self
                .pending_values
                .iter()
                .map(|(_, values)| values.clone())
                .collect();
            let batch = BatchUpdateValuesRequest {
                data: Some(data),
                value_input_option: Some("RAW".to_string()),
                ..Default::default()
            };

            let (hub, id) = self.hub()?;
            self.rt
                .block_on(hub.spreadsheets().values_batch_update(batch, id).doit())
                .map_err(GoogleSheetsError::api)?;
            self.pending_values.clear();
        }

        Ok(())
    }
}

impl SpreadsheetDriver for GoogleSheetsDriver {
    fn name(&self) -> &'static str {
        "google-sheets"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline_driver() -> GoogleSheetsDriver {
        let config = GoogleSheetsConfig::new(
            "https://docs.google.com/spreadsheets/d/abc123/edit",
            "unused.json",
        )
        .with_batch_writes(true);
        GoogleSheetsDriver::new(config).unwrap()
    }

    #[test]
    fn test_operations_require_open() {
        let mut driver = offline_driver();
        assert!(matches!(
            driver.read_cell(Addr::new(0, 0)),
            Err(Error::NoActiveSheet)
        ));
        assert!(matches!(driver.sheet_names(), Err(Error::WorkbookNotLoaded)));
        assert!(matches!(
            driver.apply_style(CellRange::parse("A1").unwrap(), &SheetStyle::default()),
            Err(Error::NoActiveSheet)
        ));
    }

    #[test]
    fn test_open_rejects_invalid_url() {
        let config = GoogleSheetsConfig::new("https://example.com/nope", "unused.json");
        let mut driver = GoogleSheetsDriver::new(config).unwrap();
        assert!(matches!(driver.open(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_json_cell() {
        assert_eq!(json_cell(&Json::String("x".into())), "x");
        assert_eq!(json_cell(&Json::Null), "");
        assert_eq!(json_cell(&serde_json::json!(42)), "42");
        assert_eq!(json_cell(&serde_json::json!(true)), "true");
    }

    #[test]
    fn test_trim_trailing_empty() {
        let values = vec!["a".to_string(), String::new(), "b".to_string(), String::new()];
        assert_eq!(trim_trailing_empty(values), vec!["a", "", "b"]);
    }

    #[test]
    fn test_merge_anchor() {
        let mut driver = offline_driver();
        driver.cached_merges.push(GridRange {
            sheet_id: Some(0),
            start_row_index: Some(1),
            end_row_index: Some(3),
            start_column_index: Some(1),
            end_column_index: Some(4),
        });

        // Inside the merged region -> anchored to B2
        assert_eq!(driver.merge_anchor(Addr::parse("C3").unwrap()), Addr::parse("B2").unwrap());
        assert_eq!(driver.merge_anchor(Addr::parse("B2").unwrap()), Addr::parse("B2").unwrap());
        // End indices are exclusive
        assert_eq!(driver.merge_anchor(Addr::parse("B4").unwrap()), Addr::parse("B4").unwrap());
        // Unrelated cell untouched
        assert_eq!(driver.merge_anchor(Addr::parse("A1").unwrap()), Addr::parse("A1").unwrap());
    }

    #[test]
    fn test_batched_value_writes_coalesce_by_range() {
        let mut driver = offline_driver();
        driver.active = Some("Sheet1".to_string());
        driver.sheet_id = Some(0);

        driver.write_cell(Addr::parse("A1").unwrap(), "first").unwrap();
        driver.write_cell(Addr::parse("A1").unwrap(), "second").unwrap();
        driver.write_cell(Addr::parse("B1").unwrap(), "other").unwrap();

        assert_eq!(driver.pending_values.len(), 2);
        let a1 = &driver.pending_values[0];
        assert_eq!(a1.0, "Sheet1!A1");
        assert_eq!(
            a1.1.values,
            Some(vec![vec![Json::String("second".to_string())]])
        );
    }

    #[test]
    fn test_batched_format_requests_queue() {
        let mut driver = offline_driver();
        driver.active = Some("Sheet1".to_string());
        driver.sheet_id = Some(5);

        let style = SheetStyle::builder().bold().build();
        driver
            .apply_style(CellRange::parse("A1:B2").unwrap(), &style)
            .unwrap();
        driver.merge(CellRange::parse("A1:B1").unwrap()).unwrap();
        driver.set_column_width(0, 20.0).unwrap();
        driver.set_row_height(0, 24.0).unwrap();

        assert_eq!(driver.pending_requests.len(), 4);
        assert!(driver.pending_requests[0].repeat_cell.is_some());
        assert!(driver.pending_requests[1].merge_cells.is_some());

        let width = driver.pending_requests[2]
            .update_dimension_properties
            .as_ref()
            .unwrap();
        assert_eq!(
            width.properties.as_ref().unwrap().pixel_size,
            Some((20.0 * PIXELS_PER_CHAR) as i32)
        );
        assert_eq!(
            width.range.as_ref().unwrap().dimension.as_deref(),
            Some("COLUMNS")
        );

        let height = driver.pending_requests[3]
            .update_dimension_properties
            .as_ref()
            .unwrap();
        assert_eq!(height.properties.as_ref().unwrap().pixel_size, Some(32));
    }

    #[test]
    fn test_merge_updates_local_cache() {
        let mut driver = offline_driver();
        driver.active = Some("Sheet1".to_string());
        driver.sheet_id = Some(0);

        driver.merge(CellRange::parse("A1:C1").unwrap()).unwrap();
        assert_eq!(driver.cached_merges.len(), 1);

        // A later cell write inside the merge lands on the anchor
        driver.write_cell(Addr::parse("B1").unwrap(), "title").unwrap();
        let entry = driver.pending_values.last().unwrap();
        assert_eq!(entry.0, "Sheet1!A1");
    }

    #[test]
    fn test_row_write_extent() {
        let mut driver = offline_driver();
        driver.active = Some("Q1 Report".to_string());
        driver.sheet_id = Some(0);

        let values = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        driver.write_row(Addr::parse("B2").unwrap(), &values).unwrap();

        let entry = driver.pending_values.last().unwrap();
        assert_eq!(entry.0, "'Q1 Report'!B2:D2");
    }
}
