use std::collections::BTreeMap;
use std::fmt;

use time::{macros::format_description, Date, PrimitiveDateTime};

/// Category assigned to records whose category cell is empty
pub const DEFAULT_CATEGORY: &str = "Onbekend";

/// Category counted as a complaint
pub const COMPLAINT_CATEGORY: &str = "Klacht";

/// Canonical column headers of a log file, in export order.
pub const COL_TIMESTAMP: &str = "Tijdstip";
pub const COL_SENDER: &str = "Afzender";
pub const COL_CATEGORY: &str = "Categorie";
pub const COL_ANSWERED: &str = "Beantwoord";
pub const COL_REPLY: &str = "Antwoord";
pub const COL_REASON: &str = "Reden";
pub const COL_FILE: &str = "Bestand";

pub const CANONICAL_COLUMNS: [&str; 7] = [
    COL_TIMESTAMP,
    COL_SENDER,
    COL_CATEGORY,
    COL_ANSWERED,
    COL_REPLY,
    COL_REASON,
    COL_FILE,
];

/// `YYYY-MM-DD HH:MM:SS`, the form timestamps are written back out in
pub fn format_timestamp(timestamp: &PrimitiveDateTime) -> String {
    timestamp
        .format(format_description!(
            "[year]-[month]-[day] [hour]:[minute]:[second]"
        ))
        .unwrap_or_default()
}

/// Whether an email got a reply
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ReplyStatus {
    Answered,
    #[default]
    Unanswered,
}

impl ReplyStatus {
    /// Lenient parse of a "Beantwoord" cell. Anything unrecognised is unanswered.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "ja" | "yes" | "y" | "true" | "1" => ReplyStatus::Answered,
            _ => ReplyStatus::Unanswered,
        }
    }

    /// The value as written in log files and exports
    pub fn as_str(&self) -> &'static str {
        match self {
            ReplyStatus::Answered => "Ja",
            ReplyStatus::Unanswered => "Nee",
        }
    }

    pub fn is_answered(&self) -> bool {
        matches!(self, ReplyStatus::Answered)
    }
}

impl fmt::Display for ReplyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One processed email
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogRecord {
    pub timestamp: Option<PrimitiveDateTime>,
    pub sender: String,
    pub category: String,
    pub reply_status: ReplyStatus,
    pub reply_text: Option<String>,
    pub fallback_reason: Option<String>,
    /// Name of the log file the record came from
    pub source_file: String,
    /// Columns without a dedicated field, keyed by header
    pub extra: BTreeMap<String, String>,
}

impl LogRecord {
    /// Apply the defaults for absent fields and derive the reply status from
    /// the reply text.
    pub fn normalize(&mut self) {
        if self.category.trim().is_empty() {
            self.category = DEFAULT_CATEGORY.to_string();
        }
        if self.has_reply_text() {
            self.reply_status = ReplyStatus::Answered;
        }
        if self
            .fallback_reason
            .as_deref()
            .is_some_and(|r| r.trim().is_empty())
        {
            self.fallback_reason = None;
        }
    }

    pub fn has_reply_text(&self) -> bool {
        self.reply_text
            .as_deref()
            .is_some_and(|t| !t.trim().is_empty())
    }

    /// A fallback is any record carrying a reason code
    pub fn is_fallback(&self) -> bool {
        self.fallback_reason
            .as_deref()
            .is_some_and(|r| !r.trim().is_empty())
    }

    pub fn is_complaint(&self) -> bool {
        self.category == COMPLAINT_CATEGORY
    }

    pub fn hour(&self) -> Option<u8> {
        self.timestamp.map(|t| t.hour())
    }

    pub fn date(&self) -> Option<Date> {
        self.timestamp.map(|t| t.date())
    }
}

/// Records loaded for one request, plus the names of any extra columns in
/// first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogTable {
    pub records: Vec<LogRecord>,
    pub extra_columns: Vec<String>,
}

impl LogTable {
    pub fn new(records: Vec<LogRecord>, extra_columns: Vec<String>) -> Self {
        Self {
            records,
            extra_columns,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Append another table, merging its extra columns.
    pub fn extend(&mut self, other: LogTable) {
        for column in other.extra_columns {
            if !self.extra_columns.contains(&column) {
                self.extra_columns.push(column);
            }
        }
        self.records.extend(other.records);
    }

    /// Table with the same columns holding only the records that pass `keep`.
    pub fn retain_cloned(&self, keep: impl Fn(&LogRecord) -> bool) -> LogTable {
        LogTable {
            records: self.records.iter().filter(|r| keep(r)).cloned().collect(),
            extra_columns: self.extra_columns.clone(),
        }
    }
}
