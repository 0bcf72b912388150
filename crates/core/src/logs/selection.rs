use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use time::{macros::format_description, Date, Duration};

use super::Error;

pub const LOG_FILE_PREFIX: &str = "mail_log_";
pub const LOG_FILE_EXTENSION: &str = ".xlsx";

/// Size of the reporting window around the selected date
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodMode {
    #[default]
    #[serde(alias = "dag")]
    Day,
    Week,
    #[serde(alias = "maand")]
    Month,
}

impl PeriodMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodMode::Day => "day",
            PeriodMode::Week => "week",
            PeriodMode::Month => "month",
        }
    }
}

impl fmt::Display for PeriodMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PeriodMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" | "dag" => Ok(PeriodMode::Day),
            "week" => Ok(PeriodMode::Week),
            "month" | "maand" => Ok(PeriodMode::Month),
            other => Err(Error::InvalidPeriod(other.to_string())),
        }
    }
}

/// Which log files a request covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodSelector {
    pub mode: PeriodMode,
    pub date: Date,
    /// Ignore `mode` and `date` and take every log file
    pub all_logs: bool,
}

impl PeriodSelector {
    pub fn new(mode: PeriodMode, date: Date) -> Self {
        Self {
            mode,
            date,
            all_logs: false,
        }
    }

    pub fn all(date: Date) -> Self {
        Self {
            mode: PeriodMode::Day,
            date,
            all_logs: true,
        }
    }

    /// Human readable description, used in report headers
    pub fn label(&self) -> String {
        if self.all_logs {
            return "all logs".to_string();
        }
        match self.mode {
            PeriodMode::Day => format!("day {}", self.date),
            PeriodMode::Week => {
                let start = week_start(self.date);
                format!("week {} to {}", start, start + Duration::days(6))
            }
            PeriodMode::Month => format!("month {}", month_prefix(self.date)),
        }
    }

    /// Dutch label printed on the emailed report
    pub fn report_label(&self) -> String {
        if self.all_logs {
            return "alle logs".to_string();
        }
        match self.mode {
            PeriodMode::Day => format!("dag {}", self.date),
            PeriodMode::Week => {
                let start = week_start(self.date);
                format!("week {} t/m {}", start, start + Duration::days(6))
            }
            PeriodMode::Month => format!("maand {}", month_prefix(self.date)),
        }
    }
}

/// `mail_log_YYYY-MM-DD.xlsx`
pub fn log_file_name(date: Date) -> String {
    format!("{}{}{}", LOG_FILE_PREFIX, date, LOG_FILE_EXTENSION)
}

/// Monday of the week containing `date`
pub fn week_start(date: Date) -> Date {
    date - Duration::days(date.weekday().number_days_from_monday() as i64)
}

fn month_prefix(date: Date) -> String {
    // Formatting a plain date with a static description cannot fail.
    date.format(format_description!("[year]-[month]"))
        .unwrap_or_else(|_| format!("{}-{:02}", date.year(), date.month() as u8))
}

/// Parse `YYYY-MM-DD`
pub fn parse_date(value: &str) -> Result<Date, Error> {
    Date::parse(value.trim(), format_description!("[year]-[month]-[day]"))
        .map_err(|e| Error::InvalidDate(format!("{}: {}", value, e)))
}

/// File names a day or week selection maps to. Month and all-logs selections
/// depend on what is on disk, see [`select_log_files`].
pub fn day_file_names(selector: &PeriodSelector) -> Vec<String> {
    match selector.mode {
        PeriodMode::Day => vec![log_file_name(selector.date)],
        PeriodMode::Week => {
            let start = week_start(selector.date);
            (0..7)
                .map(|offset| log_file_name(start + Duration::days(offset)))
                .collect()
        }
        PeriodMode::Month => Vec::new(),
    }
}

/// Resolve a selector to candidate log file paths inside `logs_dir`.
///
/// Day and week selections return the computed paths whether or not they
/// exist; the loader skips the missing ones. Month and all-logs selections
/// list what is on disk, sorted by name.
pub fn select_log_files(logs_dir: &Path, selector: &PeriodSelector) -> Vec<PathBuf> {
    if selector.all_logs {
        return glob_sorted(logs_dir, &format!("{}*{}", LOG_FILE_PREFIX, LOG_FILE_EXTENSION));
    }

    match selector.mode {
        PeriodMode::Day | PeriodMode::Week => day_file_names(selector)
            .into_iter()
            .map(|name| logs_dir.join(name))
            .collect(),
        PeriodMode::Month => glob_sorted(
            logs_dir,
            &format!(
                "{}{}-*{}",
                LOG_FILE_PREFIX,
                month_prefix(selector.date),
                LOG_FILE_EXTENSION
            ),
        ),
    }
}

fn glob_sorted(logs_dir: &Path, file_pattern: &str) -> Vec<PathBuf> {
    let escaped_dir = glob::Pattern::escape(&logs_dir.to_string_lossy());
    let pattern = format!("{}/{}", escaped_dir, file_pattern);
    debug!("listing log files matching {}", pattern);

    let mut paths: Vec<PathBuf> = match glob::glob(&pattern) {
        Ok(entries) => entries
            .filter_map(|entry| match entry {
                Ok(path) => Some(path),
                Err(e) => {
                    warn!("skipping unreadable log path: {}", e);
                    None
                }
            })
            .collect(),
        Err(e) => {
            warn!("invalid log file pattern {}: {}", pattern, e);
            Vec::new()
        }
    };
    paths.sort();
    paths
}
