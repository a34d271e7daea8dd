//! Full outer join of two key-normalized tables with provenance tagging

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

use crate::error::{KeymergeError, Result};
use crate::table::{CellValue, Table};

/// Name of the column carrying each joined row's provenance tag
pub const PROVENANCE_COLUMN: &str = "_merge";

/// Where a joined row came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    Both,
    LeftOnly,
    RightOnly,
}

impl Provenance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provenance::Both => "both",
            Provenance::LeftOnly => "left_only",
            Provenance::RightOnly => "right_only",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "both" => Some(Provenance::Both),
            "left_only" => Some(Provenance::LeftOnly),
            "right_only" => Some(Provenance::RightOnly),
            _ => None,
        }
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Suffixes appended to non-key columns present on both sides
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suffixes {
    pub left: String,
    pub right: String,
}

impl Default for Suffixes {
    fn default() -> Self {
        Self {
            left: "_left".to_string(),
            right: "_right".to_string(),
        }
    }
}

/// Where an output column takes its values from
enum ColumnSource<'a> {
    Key,
    Left(&'a [CellValue]),
    Right(&'a [CellValue]),
}

/// Outer join engine keyed on a single column
#[derive(Debug, Clone)]
pub struct JoinEngine {
    key: String,
    suffixes: Suffixes,
}

impl JoinEngine {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            suffixes: Suffixes::default(),
        }
    }

    pub fn with_suffixes(mut self, suffixes: Suffixes) -> Self {
        self.suffixes = suffixes;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Full outer join of `left` and `right` on the key column.
    ///
    /// Distinct keys are emitted in lexicographic (byte) order. Within a key
    /// every left row is paired with every right row, left order major.
    /// The joined table ends with a [`PROVENANCE_COLUMN`] holding the tag.
    pub fn outer_join(&self, left: &Table, right: &Table) -> Result<Table> {
        let left_keys = self.key_texts(left, "left")?;
        let right_keys = self.key_texts(right, "right")?;

        let mut groups: BTreeMap<&str, (Vec<usize>, Vec<usize>)> = BTreeMap::new();
        for (row, key) in left_keys.iter().enumerate() {
            groups.entry(key.as_str()).or_default().0.push(row);
        }
        for (row, key) in right_keys.iter().enumerate() {
            groups.entry(key.as_str()).or_default().1.push(row);
        }

        let mut pairs: Vec<(&str, Option<usize>, Option<usize>, Provenance)> = Vec::new();
        for (key, (left_rows, right_rows)) in &groups {
            match (left_rows.is_empty(), right_rows.is_empty()) {
                (false, false) => {
                    for &l in left_rows {
                        for &r in right_rows {
                            pairs.push((*key, Some(l), Some(r), Provenance::Both));
                        }
                    }
                }
                (false, true) => {
                    pairs.extend(left_rows.iter().map(|&l| (*key, Some(l), None, Provenance::LeftOnly)));
                }
                (true, false) => {
                    pairs.extend(right_rows.iter().map(|&r| (*key, None, Some(r), Provenance::RightOnly)));
                }
                (true, true) => {}
            }
        }

        let layout = self.column_layout(left, right)?;
        let mut joined = Table::new();
        for (name, source) in layout {
            let values = pairs
                .iter()
                .map(|(key, l, r, _)| match &source {
                    ColumnSource::Key => CellValue::Text(key.to_string()),
                    ColumnSource::Left(values) => l.map_or(CellValue::Absent, |row| values[row].clone()),
                    ColumnSource::Right(values) => r.map_or(CellValue::Absent, |row| values[row].clone()),
                })
                .collect();
            joined.push_column(name, values)?;
        }
        joined.push_column(
            PROVENANCE_COLUMN,
            pairs
                .iter()
                .map(|(_, _, _, provenance)| CellValue::text(provenance.as_str()))
                .collect(),
        )?;

        log::debug!(
            "Outer join on '{}': {} distinct keys, {} rows, {} columns",
            self.key,
            groups.len(),
            joined.row_count(),
            joined.column_count()
        );
        Ok(joined)
    }

    fn key_texts(&self, table: &Table, side: &str) -> Result<Vec<String>> {
        let values = table.column(&self.key).ok_or_else(|| {
            KeymergeError::missing_key_column(self.key.as_str(), side, &table.column_names())
        })?;
        Ok(values
            .iter()
            .map(|value| match value.as_str() {
                Some(s) => s.to_string(),
                None => value.to_text(),
            })
            .collect())
    }

    /// Output column names in order, suffixing non-key names found on both sides.
    fn column_layout<'a>(
        &self,
        left: &'a Table,
        right: &'a Table,
    ) -> Result<Vec<(String, ColumnSource<'a>)>> {
        if left.has_column(PROVENANCE_COLUMN) || right.has_column(PROVENANCE_COLUMN) {
            return Err(KeymergeError::join(format!(
                "Input already contains a '{}' column",
                PROVENANCE_COLUMN
            )));
        }

        let left_names: HashSet<&str> = left.column_names().into_iter().collect();
        let overlapping = |name: &str| name != self.key && left_names.contains(name) && right.has_column(name);

        let mut layout = Vec::with_capacity(left.column_count() + right.column_count());
        for (name, values) in left.columns() {
            if name == self.key {
                layout.push((name.to_string(), ColumnSource::Key));
            } else if overlapping(name) {
                layout.push((format!("{}{}", name, self.suffixes.left), ColumnSource::Left(values)));
            } else {
                layout.push((name.to_string(), ColumnSource::Left(values)));
            }
        }
        for (name, values) in right.columns() {
            if name == self.key {
                continue;
            }
            let output = if overlapping(name) {
                format!("{}{}", name, self.suffixes.right)
            } else {
                name.to_string()
            };
            layout.push((output, ColumnSource::Right(values)));
        }

        let mut seen = HashSet::with_capacity(layout.len());
        for (name, _) in &layout {
            if !seen.insert(name.as_str()) {
                return Err(KeymergeError::join(format!(
                    "Column '{}' would appear twice in the joined table; choose different suffixes",
                    name
                )));
            }
        }

        Ok(layout)
    }
}
