//! # keymerge
//!
//! Reconciles two spreadsheets by a shared key column: a full outer join that
//! tags every row as `both`, `left_only` or `right_only`, written together
//! with a per-tag summary to a two-sheet xlsx workbook.

pub mod cli;
pub mod error;
pub mod table;
pub mod loader;
pub mod normalize;
pub mod join;
pub mod summary;
pub mod writer;
pub mod pipeline;
pub mod commands;
pub mod output;
pub mod progress;

pub use error::{KeymergeError, Result};
pub use join::{JoinEngine, Provenance, Suffixes, PROVENANCE_COLUMN};
pub use pipeline::{merge_tables, run_merge, MergeConfig, MergeReport};
pub use table::{CellValue, Table, MISSING_TEXT};

/// Key column used when none is given
pub const DEFAULT_KEY_COLUMN: &str = "MATRICULA";

/// Output workbook written when no path is given
pub const DEFAULT_OUTPUT: &str = "merge_result.xlsx";
