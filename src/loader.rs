//! Loading spreadsheet and CSV sources into [`Table`]s

use calamine::{open_workbook_auto, Data, ExcelDateTime, Range, Reader};
use std::collections::HashSet;
use std::path::Path;

use crate::error::{KeymergeError, Result};
use crate::table::{CellValue, Table};

/// Spreadsheet extensions handled by calamine
const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Loader for the tabular sources accepted on the command line
pub struct TableLoader;

impl TableLoader {
    /// Load `sheet` from `path`, or the first sheet when no name is given.
    pub fn load(path: &Path, sheet: Option<&str>) -> Result<Table> {
        if !path.exists() {
            return Err(KeymergeError::file_not_found(path));
        }
        if !path.is_file() {
            return Err(KeymergeError::read(path, "path is not a regular file"));
        }

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();

        let table = if extension == "csv" {
            Self::load_csv(path, sheet)?
        } else if SPREADSHEET_EXTENSIONS.contains(&extension.as_str()) {
            Self::load_spreadsheet(path, sheet)?
        } else {
            return Err(KeymergeError::read(
                path,
                format!("unsupported file extension '{}'", extension),
            ));
        };

        log::debug!(
            "Loaded {} rows x {} columns from {}",
            table.row_count(),
            table.column_count(),
            path.display()
        );
        Ok(table)
    }

    fn load_spreadsheet(path: &Path, sheet: Option<&str>) -> Result<Table> {
        let mut workbook = open_workbook_auto(path).map_err(|e| KeymergeError::read(path, e))?;

        let range = match sheet {
            Some(name) => workbook
                .worksheet_range(name)
                .map_err(|e| KeymergeError::read(path, format!("sheet '{}': {}", name, e)))?,
            None => workbook
                .worksheet_range_at(0)
                .ok_or_else(|| KeymergeError::read(path, "workbook contains no sheets"))?
                .map_err(|e| KeymergeError::read(path, e))?,
        };

        Self::table_from_range(&range)
    }

    fn table_from_range(range: &Range<Data>) -> Result<Table> {
        let mut rows = range.rows();
        let header_cells = match rows.next() {
            Some(cells) => cells,
            None => return Ok(Table::new()),
        };

        let header = normalize_headers(header_cells.iter().map(cell_from_data).collect());
        let width = header.len();

        let data_rows = rows
            .map(|cells| {
                cells
                    .iter()
                    .take(width)
                    .map(cell_from_data)
                    .collect::<Vec<_>>()
            })
            .filter(|row| row.iter().any(|cell| !cell.is_absent()))
            .collect();

        Table::from_rows(header, data_rows)
    }

    fn load_csv(path: &Path, sheet: Option<&str>) -> Result<Table> {
        if let Some(name) = sheet {
            return Err(KeymergeError::read(
                path,
                format!("CSV sources have no named sheets (requested '{}')", name),
            ));
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(path)
            .map_err(|e| KeymergeError::read(path, e))?;

        let header_cells = reader
            .headers()
            .map_err(|e| KeymergeError::read(path, e))?
            .iter()
            .map(cell_from_text)
            .collect();
        let header = normalize_headers(header_cells);
        let width = header.len();

        let mut data_rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| KeymergeError::read(path, e))?;
            let row: Vec<CellValue> = record.iter().take(width).map(cell_from_text).collect();
            if row.iter().any(|cell| !cell.is_absent()) {
                data_rows.push(row);
            }
        }

        Table::from_rows(header, data_rows)
    }
}

/// Stringify and trim header cells, naming blanks and de-duplicating.
pub fn normalize_headers(cells: Vec<CellValue>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::with_capacity(cells.len());
    let mut names = Vec::with_capacity(cells.len());

    for (index, cell) in cells.into_iter().enumerate() {
        let trimmed = match cell {
            CellValue::Absent => String::new(),
            other => other.to_text().trim().to_string(),
        };
        let base = if trimmed.is_empty() {
            format!("Unnamed: {}", index)
        } else {
            trimmed
        };

        let mut name = base.clone();
        let mut counter = 1;
        while seen.contains(&name) {
            name = format!("{}.{}", base, counter);
            counter += 1;
        }
        seen.insert(name.clone());
        names.push(name);
    }

    names
}

fn cell_from_text(field: &str) -> CellValue {
    if field.is_empty() {
        CellValue::Absent
    } else {
        CellValue::Text(field.to_string())
    }
}

fn cell_from_data(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Absent,
        Data::String(s) if s.is_empty() => CellValue::Absent,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(n) => CellValue::Number(*n),
        Data::Int(n) => CellValue::Number(*n as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => cell_from_excel_datetime(dt),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Text(format!("#{:?}", e)),
    }
}

/// Date cells honour the workbook's date system; durations become `h:mm:ss` text.
fn cell_from_excel_datetime(dt: &ExcelDateTime) -> CellValue {
    if dt.is_duration() {
        return match dt.as_duration() {
            Some(duration) => CellValue::Text(format_duration(duration.num_seconds())),
            None => CellValue::Number(dt.as_f64()),
        };
    }
    match dt.as_datetime() {
        Some(value) => CellValue::DateTime(value),
        None => CellValue::Number(dt.as_f64()),
    }
}

fn format_duration(total_seconds: i64) -> String {
    let sign = if total_seconds < 0 { "-" } else { "" };
    let seconds = total_seconds.unsigned_abs();
    format!(
        "{}{}:{:02}:{:02}",
        sign,
        seconds / 3600,
        (seconds / 60) % 60,
        seconds % 60
    )
}
