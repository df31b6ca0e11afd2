use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::ERRORS_LOG_FILE;
use crate::report::{
    BatchSummary, CheckStatus, FileVerdict, SheetOutcome, SheetReport, format_file_report,
};
use crate::schema::SheetKind;
use crate::sheet_validator::SheetValidator;
use crate::source::{CalamineSource, TabularSource};
use crate::utils::write_error_to_log;

/// Validates whole workbooks: both sheets, every check, one verdict.
pub struct FileValidator {
    source: Box<dyn TabularSource>,
    errors_log: Option<PathBuf>,
}

pub struct FileValidatorBuilder {
    source: Box<dyn TabularSource>,
    errors_log: Option<PathBuf>,
}

impl Default for FileValidatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FileValidatorBuilder {
    /// Calamine decoding, failing reports appended to [`ERRORS_LOG_FILE`].
    pub fn new() -> Self {
        FileValidatorBuilder {
            source: Box::new(CalamineSource),
            errors_log: Some(PathBuf::from(ERRORS_LOG_FILE)),
        }
    }

    /// Replace the workbook decoder.
    pub fn source(mut self, source: impl TabularSource + 'static) -> Self {
        self.source = Box::new(source);
        self
    }

    /// Append failing reports to `path` instead of the default log file.
    pub fn errors_log(mut self, path: impl Into<PathBuf>) -> Self {
        self.errors_log = Some(path.into());
        self
    }

    pub fn without_errors_log(mut self) -> Self {
        self.errors_log = None;
        self
    }

    pub fn build(self) -> FileValidator {
        FileValidator {
            source: self.source,
            errors_log: self.errors_log,
        }
    }
}

impl FileValidator {
    pub fn builder() -> FileValidatorBuilder {
        FileValidatorBuilder::new()
    }

    /// Validate one workbook held in memory.
    ///
    /// An unreadable sheet, or one whose checks panic, only skips the checks
    /// of that sheet. A failure outside the per-sheet handling is kept as the
    /// general error of the verdict. Either way the file is reported, never
    /// propagated.
    pub fn validate(&self, file_name: &str, bytes: &[u8]) -> FileVerdict {
        let outcome = catch_unwind(AssertUnwindSafe(|| {
            SheetKind::ALL
                .iter()
                .map(|kind| self.check_sheet(*kind, bytes))
                .collect::<Vec<_>>()
        }));

        let verdict = match outcome {
            Ok(sheets) => Self::aggregate(file_name, sheets, None),
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                tracing::warn!(file = file_name, error = %message, "validation aborted");
                Self::aggregate(file_name, Vec::new(), Some(message))
            }
        };

        self.finish(verdict)
    }

    /// Read `path` and validate it. A file that cannot be read becomes a
    /// verdict carrying the read error.
    pub fn validate_path(&self, path: &Path) -> FileVerdict {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        match std::fs::read(path).with_context(|| format!("Unable to read {}", path.display())) {
            Ok(bytes) => self.validate(&file_name, &bytes),
            Err(e) => {
                tracing::warn!(file = %path.display(), error = %e, "file not readable");
                self.finish(Self::aggregate(&file_name, Vec::new(), Some(format!("{e:#}"))))
            }
        }
    }

    /// Validate every file in order. Verdicts come back in input order.
    pub fn validate_paths<P: AsRef<Path>>(&self, paths: &[P]) -> (Vec<FileVerdict>, BatchSummary) {
        let verdicts: Vec<FileVerdict> = paths
            .iter()
            .map(|path| self.validate_path(path.as_ref()))
            .collect();
        let summary = BatchSummary::from_verdicts(&verdicts);
        (verdicts, summary)
    }

    //////////////////////////////////////////////////////////////
    ///  Private methods
    //////////////////////////////////////////////////////////////

    /// Decode then check one sheet. A decode error or a panic while
    /// decoding or checking only marks this sheet unreadable.
    fn check_sheet(&self, kind: SheetKind, bytes: &[u8]) -> SheetReport {
        let checked = catch_unwind(AssertUnwindSafe(|| {
            self.source
                .decode(bytes, kind.sheet_name())
                .map(|sheet| SheetValidator::new(&sheet).run(kind))
                .map_err(|e| e.to_string())
        }))
        .unwrap_or_else(|payload| Err(panic_message(payload.as_ref())));

        let outcome = match checked {
            Ok(checks) => SheetOutcome::Checked(checks),
            Err(message) => {
                tracing::warn!(sheet = kind.sheet_name(), error = %message, "sheet not readable");
                SheetOutcome::Unreadable {
                    error: format!("Unable to read sheet {}: {}", kind.sheet_name(), message),
                }
            }
        };

        SheetReport {
            kind,
            sheet_name: kind.sheet_name().to_string(),
            outcome,
        }
    }

    fn aggregate(
        file_name: &str,
        sheets: Vec<SheetReport>,
        general_error: Option<String>,
    ) -> FileVerdict {
        let has_errors = general_error.is_some()
            || sheets.iter().any(|sheet| sheet.status().is_error());

        FileVerdict {
            file_name: file_name.to_string(),
            status: CheckStatus::from_errors(has_errors),
            sheets,
            general_error,
        }
    }

    fn finish(&self, verdict: FileVerdict) -> FileVerdict {
        tracing::info!(
            file = %verdict.file_name,
            status = verdict.status.label(),
            failed_checks = verdict.failed_check_count(),
            "file validated"
        );

        if !verdict.is_ok() {
            if let Some(log_path) = &self.errors_log {
                write_error_to_log(
                    log_path,
                    "Export Validation Error Report",
                    &format_file_report(&verdict),
                );
            }
        }

        verdict
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unexpected internal failure".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::{CellValue, Sheet};
    use crate::source::DecodeError;
    use crate::test_utils::{InMemorySource, SheetBuilder, conforming_sheet};

    /// Panics when asked for `sheet`, serves a conforming sheet otherwise.
    struct PanickingSource {
        sheet: &'static str,
    }

    impl TabularSource for PanickingSource {
        fn decode(&self, bytes: &[u8], sheet_name: &str) -> Result<Sheet, DecodeError> {
            if sheet_name == self.sheet {
                panic!("decoder blew up");
            }
            InMemorySource::conforming().decode(bytes, sheet_name)
        }
    }

    fn validator(source: impl TabularSource + 'static) -> FileValidator {
        FileValidator::builder()
            .source(source)
            .without_errors_log()
            .build()
    }

    #[test]
    fn test_conforming_workbook() {
        let verdict = validator(InMemorySource::conforming()).validate("ok.xlsb", b"");
        assert_eq!(verdict.status, CheckStatus::Ok);
        assert_eq!(verdict.file_name, "ok.xlsb");
        assert_eq!(verdict.sheets.len(), 2);
        assert_eq!(verdict.sheets[0].kind, SheetKind::Referentiel);
        assert_eq!(verdict.sheets[1].kind, SheetKind::Promo);
        assert!(verdict.general_error.is_none());

        let referentiel = verdict.sheet(SheetKind::Referentiel).unwrap();
        let checks = referentiel.checks().unwrap();
        assert_eq!(checks.row_count, 9);
        assert_eq!(checks.client_codes.analyzed_rows, Some(4));
        assert_eq!(checks.numeric_columns.len(), 4);
    }

    #[test]
    fn test_missing_promo_sheet() {
        let source =
            InMemorySource::new().with_sheet(conforming_sheet(SheetKind::Referentiel, 3));
        let verdict = validator(source).validate("no_promo.xlsb", b"");

        assert_eq!(verdict.status, CheckStatus::Error);
        let referentiel = verdict.sheet(SheetKind::Referentiel).unwrap();
        assert_eq!(referentiel.status(), CheckStatus::Ok);

        let promo = verdict.sheet(SheetKind::Promo).unwrap();
        assert_eq!(
            promo.outcome,
            SheetOutcome::Unreadable {
                error: "Unable to read sheet Promo: worksheet named 'Promo' not found".to_string()
            }
        );
    }

    #[test]
    fn test_single_failing_check_fails_the_file() {
        let template = conforming_sheet(SheetKind::Promo, 2);
        let headers: Vec<&str> = template.headers().iter().map(String::as_str).collect();
        let mut rows = template.rows().to_vec();
        let pcb = template.column_index("PCBPROMO").unwrap();
        rows[6][pcb] = CellValue::from("12 pieces");
        let promo = SheetBuilder::new("Promo").headers(&headers).rows(rows).build();

        let source = InMemorySource::new()
            .with_sheet(conforming_sheet(SheetKind::Referentiel, 2))
            .with_sheet(promo);
        let verdict = validator(source).validate("bad_pcb.xlsb", b"");

        assert_eq!(verdict.status, CheckStatus::Error);
        assert_eq!(verdict.failed_check_count(), 1);
        let checks = verdict.sheet(SheetKind::Promo).unwrap().checks().unwrap();
        let pcb_check = checks
            .numeric_columns
            .iter()
            .find(|check| check.column == "PCBPROMO")
            .unwrap();
        assert_eq!(pcb_check.error_rows, vec![8]);
        assert_eq!(pcb_check.non_numeric_values, vec!["12 pieces".to_string()]);
    }

    #[test]
    fn test_absent_numeric_column_does_not_fail_the_file() {
        let full = conforming_sheet(SheetKind::Referentiel, 2);
        let keep: Vec<usize> = full
            .headers()
            .iter()
            .enumerate()
            .filter(|(_, header)| *header != "PCBIMPLANT")
            .map(|(index, _)| index)
            .collect();
        let headers: Vec<&str> = keep.iter().map(|i| full.headers()[*i].as_str()).collect();
        let rows = full
            .rows()
            .iter()
            .map(|row| keep.iter().map(|i| row[*i].clone()).collect::<Vec<CellValue>>());
        let referentiel = SheetBuilder::new("Référentiel")
            .headers(&headers)
            .rows(rows)
            .build();

        let source = InMemorySource::new()
            .with_sheet(referentiel)
            .with_sheet(conforming_sheet(SheetKind::Promo, 2));
        let verdict = validator(source).validate("no_implant.xlsb", b"");

        // the presence check still fails, the numeric check only reports ABSENT
        let checks = verdict
            .sheet(SheetKind::Referentiel)
            .unwrap()
            .checks()
            .unwrap();
        let implant = checks.numeric_columns.last().unwrap();
        assert_eq!(implant.column, "PCBIMPLANT");
        assert_eq!(implant.status, CheckStatus::Absent);
        assert_eq!(checks.required_columns.missing_columns, vec!["PCBIMPLANT"]);
        assert_eq!(verdict.failed_check_count(), 1);
    }

    #[test]
    fn test_panic_in_one_sheet_keeps_the_other() {
        let verdict = validator(PanickingSource { sheet: "Promo" }).validate("broken.xlsb", b"");
        assert_eq!(verdict.status, CheckStatus::Error);
        assert!(verdict.general_error.is_none());
        assert_eq!(verdict.sheets.len(), 2);

        let referentiel = verdict.sheet(SheetKind::Referentiel).unwrap();
        assert!(referentiel.checks().is_some());
        assert_eq!(referentiel.status(), CheckStatus::Ok);

        let promo = verdict.sheet(SheetKind::Promo).unwrap();
        assert_eq!(
            promo.outcome,
            SheetOutcome::Unreadable {
                error: "Unable to read sheet Promo: decoder blew up".to_string()
            }
        );
        assert_eq!(verdict.failed_check_count(), 1);
    }

    #[test]
    fn test_panic_in_first_sheet_still_checks_promo() {
        let verdict =
            validator(PanickingSource { sheet: "Référentiel" }).validate("broken.xlsb", b"");
        assert_eq!(verdict.status, CheckStatus::Error);
        assert!(verdict.sheet(SheetKind::Referentiel).unwrap().checks().is_none());
        assert_eq!(
            verdict.sheet(SheetKind::Promo).unwrap().status(),
            CheckStatus::Ok
        );
    }

    #[test]
    fn test_unreadable_path() {
        let verdict = validator(InMemorySource::conforming())
            .validate_path(Path::new("/definitely/not/here.xlsb"));
        assert_eq!(verdict.file_name, "here.xlsb");
        assert_eq!(verdict.status, CheckStatus::Error);
        assert!(
            verdict
                .general_error
                .unwrap()
                .starts_with("Unable to read /definitely/not/here.xlsb")
        );
    }
}
