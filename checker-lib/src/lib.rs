#![allow(clippy::needless_return)]

//! Conformity checks for catalogue workbook exports.
//!
//! A workbook must carry a `Référentiel` and a `Promo` sheet. Each sheet is
//! checked for duplicate headers, required columns, valid client codes and
//! digits-only packing columns; [`FileValidator`] folds the results into one
//! [`FileVerdict`] per file.

mod file_validator;
pub mod region;
pub mod report;
pub mod schema;
pub mod sheet;
mod sheet_validator;
pub mod source;
pub mod utils;

// Test utilities - only compiled when testing or with test feature
// #[cfg(test)] alone doesn't work for integration tests (they're external crates)
// The feature flag makes it available to integration tests via dev-dependencies
#[cfg(any(test, feature = "test"))]
pub mod test_utils;

pub use file_validator::{FileValidator, FileValidatorBuilder};
pub use report::{BatchSummary, CheckStatus, FileVerdict, SheetOutcome, SheetReport};
pub use schema::SheetKind;
pub use sheet::{CellValue, Sheet};
pub use sheet_validator::SheetValidator;
pub use source::{CalamineSource, DecodeError, TabularSource};

pub const ERRORS_LOG_FILE: &str = "errors.log";
