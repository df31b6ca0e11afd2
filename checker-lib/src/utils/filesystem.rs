use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::utils::log_timestamp;

/// Append a timestamped entry to the errors log file
///
/// # Arguments
/// * `log_path` - The log file, created on first write
/// * `error_type` - A description of the error type/category (e.g., "Export Validation Error Report")
/// * `error_message` - The actual error message content
pub fn write_error_to_log(log_path: &Path, error_type: &str, error_message: &str) {
    let timestamp = log_timestamp();
    let log_entry = format!("\n[{}] {}:\n{}\n", timestamp, error_type, error_message);

    match OpenOptions::new().create(true).append(true).open(log_path) {
        Ok(mut file) => {
            if let Err(e) = writeln!(file, "{}", log_entry) {
                tracing::warn!(path = %log_path.display(), error = %e, "could not write errors log");
            }
        }
        Err(e) => {
            tracing::warn!(path = %log_path.display(), error = %e, "could not open errors log");
        }
    }
}
