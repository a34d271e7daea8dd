//! Command implementation for the keymerge CLI

use crate::cli::{Cli, OutputFormat};
use crate::error::{KeymergeError, Result};
use crate::output::{JsonFormatter, PrettyPrinter};
use crate::pipeline::{run_merge, MergeReport};
use crate::progress::ProgressReporter;

/// Execute a parsed command line and print the outcome
pub fn execute_command(cli: &Cli) -> Result<MergeReport> {
    let format = OutputFormat::parse(&cli.format).map_err(KeymergeError::invalid_input)?;
    let config = cli.to_config();

    let mut progress = if cli.no_progress || format == OutputFormat::Json {
        ProgressReporter::new_minimal()
    } else {
        ProgressReporter::new_for_merge()
    };

    let report = run_merge(&config, &mut progress)?;
    log::info!("Merge finished in {:.2?}", progress.elapsed());

    match format {
        OutputFormat::Pretty => PrettyPrinter::print_report(&report),
        OutputFormat::Json => println!("{}", JsonFormatter::format_report(&report)?),
    }

    Ok(report)
}
