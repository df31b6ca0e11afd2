//! Result types produced by the checks, plus the renderings used by the CLI
//! and the error log.
//!
//! Serialized key names follow the report format the export team already
//! consumes (`statut_global`, `colonnes_manquantes`, ...).

use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use crate::schema::SheetKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CheckStatus {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "ERREUR")]
    Error,
    /// The column the check needs is not in the header.
    #[serde(rename = "ABSENT")]
    Absent,
}

impl CheckStatus {
    pub fn from_errors(has_errors: bool) -> Self {
        if has_errors {
            CheckStatus::Error
        } else {
            CheckStatus::Ok
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, CheckStatus::Error)
    }

    pub fn label(&self) -> &'static str {
        match self {
            CheckStatus::Ok => "OK",
            CheckStatus::Error => "ERROR",
            CheckStatus::Absent => "ABSENT",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DuplicateColumnsCheck {
    #[serde(rename = "statut")]
    pub status: CheckStatus,
    #[serde(rename = "colonnes_dupliquees")]
    pub duplicate_columns: Vec<String>,
    pub details: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequiredColumnsCheck {
    #[serde(rename = "nom_feuille")]
    pub sheet_name: String,
    #[serde(rename = "colonnes_manquantes")]
    pub missing_columns: Vec<String>,
    #[serde(rename = "nb_colonnes_manquantes")]
    pub missing_count: usize,
    #[serde(rename = "nb_colonnes_totales")]
    pub required_count: usize,
    #[serde(rename = "statut")]
    pub status: CheckStatus,
}

/// Outcome of the client code check on one anchor column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientCodeCheck {
    #[serde(rename = "colonne")]
    pub column: String,
    #[serde(rename = "statut")]
    pub status: CheckStatus,
    pub details: String,
    #[serde(rename = "lignes_vides")]
    pub blank_rows: Vec<usize>,
    #[serde(rename = "lignes_invalides")]
    pub invalid_rows: Vec<usize>,
    #[serde(rename = "valeurs_invalides")]
    pub invalid_values: Vec<String>,
    /// Size of the analyzed region, when one could be resolved.
    #[serde(rename = "zone_analysee")]
    pub analyzed_rows: Option<usize>,
    /// Excel row number closing the analyzed region.
    #[serde(rename = "derniere_ligne_utile")]
    pub last_useful_row: Option<usize>,
}

impl ClientCodeCheck {
    pub(crate) fn without_region(column: &str, status: CheckStatus, details: String) -> Self {
        ClientCodeCheck {
            column: column.to_string(),
            status,
            details,
            blank_rows: Vec::new(),
            invalid_rows: Vec::new(),
            invalid_values: Vec::new(),
            analyzed_rows: None,
            last_useful_row: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericColumnCheck {
    #[serde(rename = "colonne")]
    pub column: String,
    #[serde(rename = "statut")]
    pub status: CheckStatus,
    #[serde(rename = "nb_erreurs")]
    pub error_count: usize,
    #[serde(rename = "lignes_erreur")]
    pub error_rows: Vec<usize>,
    /// At most ten distinct offending values, blanks left out.
    #[serde(rename = "valeurs_non_numeriques")]
    pub non_numeric_values: Vec<String>,
    #[serde(rename = "zone_analysee")]
    pub analyzed_rows: Option<usize>,
}

/// Every check run on one decoded sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SheetChecks {
    #[serde(rename = "colonnes_dupliquees")]
    pub duplicate_columns: DuplicateColumnsCheck,
    #[serde(rename = "colonnes")]
    pub required_columns: RequiredColumnsCheck,
    #[serde(rename = "codes_clients")]
    pub client_codes: ClientCodeCheck,
    #[serde(rename = "colonnes_numeriques")]
    pub numeric_columns: Vec<NumericColumnCheck>,
    #[serde(rename = "nb_lignes")]
    pub row_count: usize,
}

impl SheetChecks {
    pub fn has_errors(&self) -> bool {
        self.failed_check_count() > 0
    }

    /// Number of checks in ERROR state. ABSENT never counts.
    pub fn failed_check_count(&self) -> usize {
        let fixed = [
            self.duplicate_columns.status,
            self.required_columns.status,
            self.client_codes.status,
        ];
        fixed.iter().filter(|status| status.is_error()).count()
            + self
                .numeric_columns
                .iter()
                .filter(|check| check.status.is_error())
                .count()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SheetOutcome {
    Checked(SheetChecks),
    Unreadable {
        #[serde(rename = "erreur")]
        error: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SheetReport {
    #[serde(rename = "onglet")]
    pub kind: SheetKind,
    #[serde(rename = "nom_feuille")]
    pub sheet_name: String,
    #[serde(flatten)]
    pub outcome: SheetOutcome,
}

impl SheetReport {
    pub fn status(&self) -> CheckStatus {
        match &self.outcome {
            SheetOutcome::Checked(checks) => CheckStatus::from_errors(checks.has_errors()),
            SheetOutcome::Unreadable { .. } => CheckStatus::Error,
        }
    }

    pub fn checks(&self) -> Option<&SheetChecks> {
        match &self.outcome {
            SheetOutcome::Checked(checks) => Some(checks),
            SheetOutcome::Unreadable { .. } => None,
        }
    }

    fn failed_check_count(&self) -> usize {
        match &self.outcome {
            SheetOutcome::Checked(checks) => checks.failed_check_count(),
            SheetOutcome::Unreadable { .. } => 1,
        }
    }
}

/// Aggregated result for one workbook.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileVerdict {
    #[serde(rename = "nom_fichier")]
    pub file_name: String,
    #[serde(rename = "statut_global")]
    pub status: CheckStatus,
    #[serde(rename = "onglets")]
    pub sheets: Vec<SheetReport>,
    #[serde(rename = "erreur_generale", skip_serializing_if = "Option::is_none")]
    pub general_error: Option<String>,
}

impl FileVerdict {
    pub fn is_ok(&self) -> bool {
        self.status == CheckStatus::Ok
    }

    pub fn sheet(&self, kind: SheetKind) -> Option<&SheetReport> {
        self.sheets.iter().find(|sheet| sheet.kind == kind)
    }

    pub fn failed_check_count(&self) -> usize {
        self.sheets
            .iter()
            .map(SheetReport::failed_check_count)
            .sum::<usize>()
            + usize::from(self.general_error.is_some())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total_files: usize,
    pub conforming_files: usize,
    pub files_with_errors: usize,
}

impl BatchSummary {
    pub fn from_verdicts(verdicts: &[FileVerdict]) -> Self {
        let conforming_files = verdicts.iter().filter(|verdict| verdict.is_ok()).count();
        BatchSummary {
            total_files: verdicts.len(),
            conforming_files,
            files_with_errors: verdicts.len() - conforming_files,
        }
    }
}

/// Human readable report for one file, used on stdout and in the error log.
pub fn format_file_report(verdict: &FileVerdict) -> String {
    let mut report = String::new();

    let label = if verdict.is_ok() {
        "✅ CONFORMING"
    } else {
        "❌ NON-CONFORMING"
    };
    report.push_str(&format!("📄 {} - {}\n", verdict.file_name, label));

    for sheet in &verdict.sheets {
        report.push_str(&format!("\n  Sheet {}\n", sheet.sheet_name));
        match &sheet.outcome {
            SheetOutcome::Unreadable { error } => {
                report.push_str(&format!("    🔴 {}\n", error));
            }
            SheetOutcome::Checked(checks) => format_sheet_checks(&mut report, checks),
        }
    }

    if let Some(error) = &verdict.general_error {
        report.push_str(&format!("\n  🔴 General error: {}\n", error));
    }

    report
}

fn format_sheet_checks(report: &mut String, checks: &SheetChecks) {
    report.push_str(&format!("    Rows: {}\n", checks.row_count));

    let duplicates = &checks.duplicate_columns;
    report.push_str(&format!(
        "    {} Duplicate columns: {}\n",
        mark(duplicates.status),
        duplicates.details
    ));

    let columns = &checks.required_columns;
    if columns.status.is_error() {
        report.push_str(&format!(
            "    ❌ Columns: {} missing out of {}\n",
            columns.missing_count, columns.required_count
        ));
        for column in &columns.missing_columns {
            report.push_str(&format!("       • {}\n", column));
        }
    } else {
        report.push_str(&format!(
            "    ✅ Columns: all present ({})\n",
            columns.required_count
        ));
    }

    let codes = &checks.client_codes;
    report.push_str(&format!(
        "    {} {}: {}\n",
        mark(codes.status),
        codes.column,
        codes.details
    ));

    report.push_str("    Numeric columns:\n");
    for numeric in &checks.numeric_columns {
        match numeric.status {
            CheckStatus::Absent => {
                report.push_str(&format!("    ⚠️ {}: column missing\n", numeric.column));
            }
            CheckStatus::Ok => {
                report.push_str(&format!("    ✅ {}: numeric values\n", numeric.column));
            }
            CheckStatus::Error => {
                report.push_str(&format!(
                    "    ❌ {}: {} non-numeric values (Excel rows: {:?})\n",
                    numeric.column, numeric.error_count, numeric.error_rows
                ));
                if !numeric.non_numeric_values.is_empty() {
                    report.push_str(&format!(
                        "       Sample values: {:?}\n",
                        numeric.non_numeric_values
                    ));
                }
            }
        }
    }
}

fn mark(status: CheckStatus) -> &'static str {
    match status {
        CheckStatus::Ok => "✅",
        CheckStatus::Error => "❌",
        CheckStatus::Absent => "⚠️",
    }
}

pub fn format_batch_summary(summary: &BatchSummary) -> String {
    format!(
        "Total files: {} | ✅ Conforming: {} | ❌ With errors: {}",
        summary.total_files, summary.conforming_files, summary.files_with_errors
    )
}

/// Write one CSV line per file with the overall and per-sheet status.
pub fn write_summary_csv(csv_path: &Path, verdicts: &[FileVerdict]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Necessary)
        .from_path(csv_path)?;

    let mut headers = vec!["file".to_string(), "status".to_string()];
    headers.extend(SheetKind::ALL.iter().map(|kind| kind.sheet_name().to_string()));
    headers.push("failed_checks".to_string());
    wtr.write_record(&headers)?;

    for verdict in verdicts {
        let mut record = vec![verdict.file_name.clone(), verdict.status.label().to_string()];
        for kind in SheetKind::ALL {
            let status = verdict
                .sheet(kind)
                .map(|sheet| sheet.status().label())
                .unwrap_or("");
            record.push(status.to_string());
        }
        record.push(verdict.failed_check_count().to_string());
        wtr.write_record(&record)?;
    }

    wtr.flush()?;

    Ok(())
}
