//! Per-provenance row counts of a joined table

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{KeymergeError, Result};
use crate::join::{Provenance, PROVENANCE_COLUMN};
use crate::table::{CellValue, Table};

/// Header of the summary category column
pub const CATEGORY_HEADER: &str = "category";

/// Header of the summary count column
pub const COUNT_HEADER: &str = "count";

/// Number of joined rows carrying one provenance tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub category: String,
    pub count: usize,
}

/// Sort rank of a tag: the known tags first, anything else after them
fn precedence(tag: &str) -> u8 {
    match Provenance::parse(tag) {
        Some(Provenance::Both) => 0,
        Some(Provenance::LeftOnly) => 1,
        Some(Provenance::RightOnly) => 2,
        None => 99,
    }
}

/// Count tags in the given order of appearance and sort them by precedence,
/// unknown tags alphabetically.
pub fn summarize_tags<'a, I>(tags: I) -> Vec<SummaryRow>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for tag in tags {
        *counts.entry(tag).or_insert(0) += 1;
    }

    let mut rows: Vec<SummaryRow> = counts
        .into_iter()
        .map(|(category, count)| SummaryRow {
            category: category.to_string(),
            count,
        })
        .collect();
    rows.sort_by(|a, b| {
        precedence(&a.category)
            .cmp(&precedence(&b.category))
            .then_with(|| a.category.cmp(&b.category))
    });
    rows
}

/// Summarize the provenance column of a joined table.
pub fn build_summary(joined: &Table) -> Result<Vec<SummaryRow>> {
    let tags = joined.column(PROVENANCE_COLUMN).ok_or_else(|| {
        KeymergeError::join(format!(
            "Joined table has no '{}' column to summarize",
            PROVENANCE_COLUMN
        ))
    })?;

    let texts: Vec<String> = tags.iter().map(CellValue::to_text).collect();
    let summary = summarize_tags(texts.iter().map(String::as_str));

    for row in &summary {
        log::debug!("Summary {}: {}", row.category, row.count);
    }
    Ok(summary)
}

/// Render summary rows as a two-column table
pub fn summary_table(summary: &[SummaryRow]) -> Result<Table> {
    let mut table = Table::new();
    table.push_column(
        CATEGORY_HEADER,
        summary.iter().map(|row| CellValue::text(row.category.as_str())).collect(),
    )?;
    table.push_column(
        COUNT_HEADER,
        summary.iter().map(|row| CellValue::Number(row.count as f64)).collect(),
    )?;
    Ok(table)
}
