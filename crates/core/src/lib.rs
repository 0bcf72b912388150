//! MailMind core library
//!
//! Shared by the dashboard and the report daemon:
//! - Configuration loading (XDG-compliant)
//! - Daily log file selection and loading
//! - Aggregation and filtering
//! - Report exports (xlsx, pdf, charts, zip)

mod config;
pub mod export;
pub mod filter;
pub mod fs;
pub mod logs;
pub mod stats;

pub use config::{find_config_file, load_config, ConfigSource};
pub use filter::RecordFilter;
pub use fs::{ensure_dir_exists, file_name_of};

/// Application name used for config paths
pub const APP_NAME: &str = "mailmind";

/// Default dashboard port
pub const DEFAULT_DASHBOARD_PORT: u16 = 8501;

/// Default directory holding the daily log files
pub const DEFAULT_LOGS_DIR: &str = "./logs";

/// Default seconds between schedule checks of the report daemon
pub const DEFAULT_CHECK_INTERVAL: u64 = 60;

/// Default time of day the daily report is sent
pub const DEFAULT_SEND_AT: &str = "08:00";
