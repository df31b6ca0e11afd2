mod datetime;
mod filesystem;

pub use datetime::{REPORT_DATE_FORMAT, log_timestamp, report_timestamp};
pub use filesystem::write_error_to_log;
