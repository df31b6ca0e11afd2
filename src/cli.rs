use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use checker_lib::report::write_summary_csv;
use checker_lib::{BatchSummary, FileValidator, ERRORS_LOG_FILE};
use clap::{Parser, ValueEnum};

use crate::output::{write_json_report, write_text_report};

#[derive(Parser, Debug)]
#[command(name = "sheet-checker")]
#[command(about = "A tool to check catalogue exports (Référentiel and Promo sheets) before delivery")]
#[command(version)]
pub struct Args {
    /// Workbook files to check (.xlsb, .xlsx, .xls or .ods)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Format of the report printed on stdout
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Optional CSV file receiving one summary line per workbook
    #[arg(long)]
    pub summary_csv: Option<PathBuf>,

    /// File where the reports of non-conforming workbooks are appended
    #[arg(long, default_value = ERRORS_LOG_FILE)]
    pub errors_log: PathBuf,

    /// Do not write the errors log file
    #[arg(long)]
    pub no_errors_log: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Validate every file of `arguments`, print the report to `out` and write
/// the optional CSV summary.
pub fn run(arguments: &Args, out: &mut impl Write) -> anyhow::Result<BatchSummary> {
    let mut builder = FileValidator::builder();
    builder = if arguments.no_errors_log {
        builder.without_errors_log()
    } else {
        builder.errors_log(arguments.errors_log.clone())
    };
    let validator = builder.build();

    tracing::info!(files = arguments.files.len(), "checking workbooks");
    let (verdicts, summary) = validator.validate_paths(&arguments.files);

    match arguments.format {
        OutputFormat::Text => write_text_report(out, &verdicts, &summary)?,
        OutputFormat::Json => write_json_report(out, &verdicts, &summary)?,
    }

    if let Some(csv_path) = &arguments.summary_csv {
        write_summary_csv(csv_path, &verdicts)
            .with_context(|| format!("Failed to write CSV summary {}", csv_path.display()))?;
        tracing::info!(path = %csv_path.display(), "CSV summary written");
    }

    Ok(summary)
}
