use chrono::{DateTime, Local, Utc};

pub const REPORT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Processing date shown in the report header.
pub fn report_timestamp() -> String {
    format_local(Local::now())
}

/// RFC 3339 stamp prefixing each errors log entry.
pub fn log_timestamp() -> String {
    return Utc::now().to_rfc3339();
}

fn format_local(at: DateTime<Local>) -> String {
    at.format(REPORT_DATE_FORMAT).to_string()
}
