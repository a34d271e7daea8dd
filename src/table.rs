//! In-memory tabular model shared by every merge stage

use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

use crate::error::{KeymergeError, Result};

/// Textual form of a missing value once coerced to text
pub const MISSING_TEXT: &str = "nan";

/// Format used whenever a date-time cell is rendered as text
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single cell value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CellValue {
    Absent,
    Text(String),
    Number(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
}

impl CellValue {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Coerce to text. Missing values become [`MISSING_TEXT`].
    pub fn to_text(&self) -> String {
        match self {
            Self::Absent => MISSING_TEXT.to_string(),
            Self::Text(s) => s.clone(),
            Self::Number(n) => format_number(*n),
            Self::Bool(true) => "True".to_string(),
            Self::Bool(false) => "False".to_string(),
            Self::DateTime(dt) => dt.format(DATETIME_FORMAT).to_string(),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_text())
    }
}

/// Integral numbers render without a fractional part
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// Ordered collection of named, equally long columns
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
    columns: IndexMap<String, Vec<CellValue>>,
    row_count: usize,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from a header and row-major values.
    ///
    /// Rows shorter than the header are padded with [`CellValue::Absent`],
    /// longer rows are truncated.
    pub fn from_rows<S: Into<String>>(header: Vec<S>, rows: Vec<Vec<CellValue>>) -> Result<Self> {
        let names: Vec<String> = header.into_iter().map(Into::into).collect();
        let mut columns: IndexMap<String, Vec<CellValue>> = IndexMap::with_capacity(names.len());
        for name in &names {
            if columns.insert(name.clone(), Vec::with_capacity(rows.len())).is_some() {
                return Err(KeymergeError::invalid_input(format!(
                    "Duplicate column name: {}",
                    name
                )));
            }
        }

        let row_count = rows.len();
        for mut row in rows {
            row.resize(names.len(), CellValue::Absent);
            for (values, cell) in columns.values_mut().zip(row) {
                values.push(cell);
            }
        }

        Ok(Self { columns, row_count })
    }

    /// Append a column; its length must match the current row count
    /// unless the table has no columns yet.
    pub fn push_column(&mut self, name: impl Into<String>, values: Vec<CellValue>) -> Result<()> {
        let name = name.into();
        if self.columns.contains_key(&name) {
            return Err(KeymergeError::invalid_input(format!(
                "Duplicate column name: {}",
                name
            )));
        }
        if !self.columns.is_empty() && values.len() != self.row_count {
            return Err(KeymergeError::invalid_input(format!(
                "Column '{}' has {} values, expected {}",
                name,
                values.len(),
                self.row_count
            )));
        }
        self.row_count = values.len();
        self.columns.insert(name, values);
        Ok(())
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.keys().map(String::as_str).collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    pub fn column(&self, name: &str) -> Option<&[CellValue]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    pub fn column_mut(&mut self, name: &str) -> Option<&mut Vec<CellValue>> {
        self.columns.get_mut(name)
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &[CellValue])> {
        self.columns.iter().map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    pub fn cell(&self, row: usize, column: &str) -> Option<&CellValue> {
        self.columns.get(column).and_then(|values| values.get(row))
    }

    /// Values of one row, in column order
    pub fn row(&self, row: usize) -> Option<Vec<&CellValue>> {
        if row >= self.row_count {
            return None;
        }
        Some(self.columns.values().map(|values| &values[row]).collect())
    }
}
