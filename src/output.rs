//! Output formatting utilities

use crate::error::Result;
use crate::pipeline::MergeReport;

/// Pretty printer for keymerge output
pub struct PrettyPrinter;

impl PrettyPrinter {
    /// Confirmation line printed after a successful run
    pub fn confirmation_line(report: &MergeReport) -> String {
        format!(
            "Merge completed successfully. Rows: {} | Output: '{}'",
            report.rows,
            report.output.display()
        )
    }

    /// Print the confirmation and the summary tree
    pub fn print_report(report: &MergeReport) {
        println!("{}", Self::confirmation_line(report));
        if report.summary.is_empty() {
            println!("No rows to summarize.");
            return;
        }

        println!("📊 Summary:");
        for (i, row) in report.summary.iter().enumerate() {
            let prefix = if i == report.summary.len() - 1 { "└─" } else { "├─" };
            println!("{} {}: {}", prefix, row.category, row.count);
        }
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn format_report(report: &MergeReport) -> Result<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }
}
