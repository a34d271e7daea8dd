//! Command-line interface for keymerge

use clap::Parser;
use std::path::PathBuf;

use crate::pipeline::MergeConfig;
use crate::{DEFAULT_KEY_COLUMN, DEFAULT_OUTPUT};

#[derive(Parser, Debug)]
#[command(name = "keymerge")]
#[command(about = "Full outer join of two spreadsheets on a key column, with a provenance summary")]
#[command(version)]
pub struct Cli {
    /// Left input spreadsheet
    #[arg(long)]
    pub left: PathBuf,

    /// Right input spreadsheet
    #[arg(long)]
    pub right: PathBuf,

    /// Output workbook path
    #[arg(long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Key column to join on
    #[arg(long, default_value = DEFAULT_KEY_COLUMN)]
    pub on: String,

    /// Sheet to read from the left file (defaults to the first sheet)
    #[arg(long)]
    pub left_sheet: Option<String>,

    /// Sheet to read from the right file (defaults to the first sheet)
    #[arg(long)]
    pub right_sheet: Option<String>,

    /// Output format: "pretty", "json"
    #[arg(long, default_value = "pretty")]
    pub format: String,

    /// Disable the progress spinner
    #[arg(long)]
    pub no_progress: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn to_config(&self) -> MergeConfig {
        let mut config = MergeConfig::new(&self.left, &self.right);
        config.output = self.output.clone();
        config.key = self.on.clone();
        config.left_sheet = self.left_sheet.clone();
        config.right_sheet = self.right_sheet.clone();
        config
    }
}

/// Parse output format string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputFormat {
    Pretty,
    Json,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid output format: {}. Use 'pretty' or 'json'", s)),
        }
    }
}
