//! Key column validation and normalization

use crate::error::{KeymergeError, Result};
use crate::table::{CellValue, Table};

/// Which input a table came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

/// Fail with the available column names when `key` is not a column of `table`.
pub fn ensure_key_column(table: &Table, key: &str, side: Side) -> Result<()> {
    if table.has_column(key) {
        return Ok(());
    }
    Err(KeymergeError::missing_key_column(
        key,
        side.as_str(),
        &table.column_names(),
    ))
}

/// Replace every value of the key column with its trimmed text form.
///
/// Both sides go through the same coercion, so a missing key on the left
/// compares equal to a missing key on the right.
pub fn normalize_key(table: &mut Table, key: &str) -> Result<()> {
    let values = table
        .column_mut(key)
        .ok_or_else(|| KeymergeError::join(format!("Key column '{}' is not present", key)))?;

    let mut changed = 0usize;
    for value in values.iter_mut() {
        let normalized = value.to_text().trim().to_string();
        if value.as_str() != Some(normalized.as_str()) {
            *value = CellValue::Text(normalized);
            changed += 1;
        }
    }

    log::debug!("Normalized key column '{}': {} values rewritten", key, changed);
    Ok(())
}
