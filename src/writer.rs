//! Writing the merge result as an xlsx workbook

use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::Path;

use crate::error::{KeymergeError, Result};
use crate::summary::{summary_table, SummaryRow};
use crate::table::{CellValue, Table};

/// Sheet holding the joined table
pub const MERGE_SHEET: &str = "merge";

/// Sheet holding the per-category counts
pub const SUMMARY_SHEET: &str = "summary";

/// Excel number format applied to date-time cells
pub const DATETIME_NUM_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

const MAX_ROWS: usize = 1_048_576;
const MAX_COLUMNS: usize = 16_384;

/// Write `joined` and `summary` to `path` as the `merge` and `summary` sheets.
///
/// Missing parent directories are created first.
pub fn write_workbook(joined: &Table, summary: &[SummaryRow], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| KeymergeError::write(path, e))?;
        }
    }

    let summary = summary_table(summary)?;
    let mut workbook = Workbook::new();
    let formats = SheetFormats {
        header: Format::new().set_bold(),
        datetime: Format::new().set_num_format(DATETIME_NUM_FORMAT),
    };

    for (name, table) in [(MERGE_SHEET, joined), (SUMMARY_SHEET, &summary)] {
        let worksheet = workbook
            .add_worksheet()
            .set_name(name)
            .map_err(|e| KeymergeError::write(path, format!("sheet '{}': {}", name, e)))?;
        write_sheet(worksheet, table, &formats)
            .map_err(|e| KeymergeError::write(path, format!("sheet '{}': {}", name, e)))?;
        log::debug!("Wrote sheet '{}' with {} rows", name, table.row_count());
    }

    workbook.save(path).map_err(|e| KeymergeError::write(path, e))?;
    Ok(())
}

struct SheetFormats {
    header: Format,
    datetime: Format,
}

/// Header in row 0, values below it; absent cells stay blank.
fn write_sheet(worksheet: &mut Worksheet, table: &Table, formats: &SheetFormats) -> std::result::Result<(), String> {
    if table.column_count() > MAX_COLUMNS {
        return Err(format!(
            "{} columns exceed the xlsx limit of {}",
            table.column_count(),
            MAX_COLUMNS
        ));
    }
    if table.row_count() + 1 > MAX_ROWS {
        return Err(format!(
            "{} rows exceed the xlsx limit of {}",
            table.row_count(),
            MAX_ROWS - 1
        ));
    }

    for (col_idx, (name, values)) in table.columns().enumerate() {
        let col = col_idx as u16;
        worksheet
            .write_string_with_format(0, col, name, &formats.header)
            .map_err(|e| e.to_string())?;

        for (row_idx, value) in values.iter().enumerate() {
            let row = row_idx as u32 + 1;
            match value {
                CellValue::Absent => {}
                CellValue::Text(s) => {
                    worksheet.write_string(row, col, s).map_err(|e| e.to_string())?;
                }
                CellValue::Number(n) => {
                    worksheet.write_number(row, col, *n).map_err(|e| e.to_string())?;
                }
                CellValue::Bool(b) => {
                    worksheet.write_boolean(row, col, *b).map_err(|e| e.to_string())?;
                }
                CellValue::DateTime(dt) => {
                    worksheet
                        .write_datetime_with_format(row, col, dt, &formats.datetime)
                        .map_err(|e| e.to_string())?;
                }
            }
        }
    }

    Ok(())
}
