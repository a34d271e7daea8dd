//! The load → normalize → join → summarize → write sequence

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::join::{JoinEngine, Suffixes};
use crate::loader::TableLoader;
use crate::normalize::{ensure_key_column, normalize_key, Side};
use crate::progress::ProgressReporter;
use crate::summary::{build_summary, SummaryRow};
use crate::table::Table;
use crate::writer::write_workbook;
use crate::{DEFAULT_KEY_COLUMN, DEFAULT_OUTPUT};

/// Everything one merge run needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeConfig {
    pub left: PathBuf,
    pub right: PathBuf,
    pub output: PathBuf,
    pub key: String,
    pub left_sheet: Option<String>,
    pub right_sheet: Option<String>,
    pub suffixes: Suffixes,
}

impl MergeConfig {
    /// Config with the default key, output path and suffixes
    pub fn new(left: impl Into<PathBuf>, right: impl Into<PathBuf>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            key: DEFAULT_KEY_COLUMN.to_string(),
            left_sheet: None,
            right_sheet: None,
            suffixes: Suffixes::default(),
        }
    }
}

/// Outcome of a successful run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergeReport {
    pub rows: usize,
    pub columns: Vec<String>,
    pub output: PathBuf,
    pub summary: Vec<SummaryRow>,
}

/// Validate and normalize the key on both tables, then outer join them.
pub fn merge_tables(
    mut left: Table,
    mut right: Table,
    key: &str,
    suffixes: &Suffixes,
) -> Result<Table> {
    ensure_key_column(&left, key, Side::Left)?;
    ensure_key_column(&right, key, Side::Right)?;

    normalize_key(&mut left, key)?;
    normalize_key(&mut right, key)?;

    JoinEngine::new(key)
        .with_suffixes(suffixes.clone())
        .outer_join(&left, &right)
}

/// Run the whole merge and write the output workbook.
pub fn run_merge(config: &MergeConfig, progress: &mut ProgressReporter) -> Result<MergeReport> {
    progress.stage("Loading left table...");
    log::info!("Loading left table from {}", config.left.display());
    let left = TableLoader::load(&config.left, config.left_sheet.as_deref())?;

    progress.stage("Loading right table...");
    log::info!("Loading right table from {}", config.right.display());
    let right = TableLoader::load(&config.right, config.right_sheet.as_deref())?;

    progress.stage("Joining tables...");
    log::info!(
        "Joining {} left rows with {} right rows on '{}'",
        left.row_count(),
        right.row_count(),
        config.key
    );
    let joined = merge_tables(left, right, &config.key, &config.suffixes)?;

    progress.stage("Building summary...");
    let summary = build_summary(&joined)?;

    progress.stage("Writing output...");
    log::info!("Writing {} rows to {}", joined.row_count(), config.output.display());
    write_workbook(&joined, &summary, &config.output)?;

    let output = resolve_output_path(&config.output)?;
    progress.finish("Merge complete");

    Ok(MergeReport {
        rows: joined.row_count(),
        columns: joined.column_names().into_iter().map(String::from).collect(),
        output,
        summary,
    })
}

/// Absolute path of the written file
fn resolve_output_path(path: &Path) -> Result<PathBuf> {
    Ok(std::fs::canonicalize(path)?)
}
