//! Daily log files: selecting them for a period, reading them, and the
//! record model they produce.

mod loader;
mod record;
mod selection;

use std::path::PathBuf;

pub use loader::{load_all, load_log_file, load_log_files, load_period, parse_timestamp};
pub use record::{
    format_timestamp, LogRecord, LogTable, ReplyStatus, CANONICAL_COLUMNS, COL_ANSWERED,
    COL_CATEGORY, COL_FILE, COL_REASON, COL_REPLY, COL_SENDER, COL_TIMESTAMP, COMPLAINT_CATEGORY,
    DEFAULT_CATEGORY,
};
pub use selection::{
    day_file_names, log_file_name, parse_date, select_log_files, week_start, PeriodMode,
    PeriodSelector, LOG_FILE_EXTENSION, LOG_FILE_PREFIX,
};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Failed to read workbook: {0}")]
    Workbook(#[from] calamine::Error),
    #[error("Workbook has no worksheets: {0}")]
    EmptyWorkbook(PathBuf),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Invalid period mode: {0}")]
    InvalidPeriod(String),
}
