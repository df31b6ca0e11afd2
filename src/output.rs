use std::io::Write;

use anyhow::Result;
use checker_lib::report::{format_batch_summary, format_file_report};
use checker_lib::schema::{VALID_CLIENT_CODES, REFERENTIEL_COLUMNS, PROMO_COLUMNS};
use checker_lib::utils::report_timestamp;
use checker_lib::{BatchSummary, FileVerdict};
use serde::Serialize;

#[derive(Serialize)]
struct JsonReport<'a> {
    summary: &'a BatchSummary,
    files: &'a [FileVerdict],
}

pub fn write_text_report(
    out: &mut impl Write,
    verdicts: &[FileVerdict],
    summary: &BatchSummary,
) -> Result<()> {
    writeln!(out, "📊 Export check")?;
    writeln!(
        out,
        "Processing date: {}",
        report_timestamp()
    )?;
    writeln!(
        out,
        "Required columns: Référentiel {} | Promo {}",
        REFERENTIEL_COLUMNS.len(),
        PROMO_COLUMNS.len()
    )?;
    writeln!(out, "Valid client codes: {}", VALID_CLIENT_CODES.join(", "))?;

    for verdict in verdicts {
        writeln!(out)?;
        write!(out, "{}", format_file_report(verdict))?;
    }

    writeln!(out)?;
    writeln!(out, "{}", format_batch_summary(summary))?;
    Ok(())
}

pub fn write_json_report(
    out: &mut impl Write,
    verdicts: &[FileVerdict],
    summary: &BatchSummary,
) -> Result<()> {
    let report = JsonReport {
        summary,
        files: verdicts,
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}
