use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Data, Reader};
use log::{debug, warn};
use time::{
    format_description::BorrowedFormatItem, macros::format_description, Date, Duration, Month,
    PrimitiveDateTime, Time,
};

use super::{
    record::{format_timestamp, LogRecord, LogTable, ReplyStatus},
    selection::{select_log_files, PeriodSelector, LOG_FILE_EXTENSION, LOG_FILE_PREFIX},
    Error,
};
use crate::fs::file_name_of;

/// Known columns, matched case-insensitively against the header row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Timestamp,
    Sender,
    Category,
    Answered,
    Reply,
    Reason,
    File,
}

impl Column {
    fn from_header(header: &str) -> Option<Self> {
        match header.trim().to_lowercase().as_str() {
            "tijdstip" | "timestamp" | "time" => Some(Column::Timestamp),
            "afzender" | "sender" | "from" => Some(Column::Sender),
            "categorie" | "category" => Some(Column::Category),
            "beantwoord" | "answered" | "replied" => Some(Column::Answered),
            "antwoord" | "reply" | "response" => Some(Column::Reply),
            "reden" | "reason" | "fallback_reason" => Some(Column::Reason),
            "bestand" | "file" => Some(Column::File),
            _ => None,
        }
    }
}

enum Slot {
    Known(Column),
    Extra(String),
    Ignored,
}

const TIMESTAMP_FORMATS: &[&[BorrowedFormatItem<'static>]] = &[
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond]"),
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]"),
    format_description!("[year]-[month]-[day] [hour]:[minute]"),
    format_description!("[year]-[month]-[day]T[hour]:[minute]"),
];

/// Load every file the selector maps to.
pub fn load_period(logs_dir: &Path, selector: &PeriodSelector) -> LogTable {
    load_log_files(&select_log_files(logs_dir, selector))
}

/// Load every log file in `logs_dir`.
pub fn load_all(logs_dir: &Path) -> LogTable {
    let selector = PeriodSelector::all(Date::MIN);
    load_log_files(&select_log_files(logs_dir, &selector))
}

/// Concatenate the given files. Missing or unreadable files are skipped.
pub fn load_log_files(paths: &[PathBuf]) -> LogTable {
    let mut table = LogTable::default();
    for path in paths {
        if !path.exists() {
            debug!("log file not present: {}", path.display());
            continue;
        }
        match load_log_file(path) {
            Ok(loaded) => {
                debug!("loaded {} records from {}", loaded.len(), path.display());
                table.extend(loaded);
            }
            Err(e) => warn!("skipping log file {}: {}", path.display(), e),
        }
    }
    table
}

/// Read the first worksheet of one log file.
pub fn load_log_file(path: &Path) -> Result<LogTable, Error> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| Error::EmptyWorkbook(path.to_path_buf()))??;

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(LogTable::default());
    };

    let mut extra_columns = Vec::new();
    let slots: Vec<Slot> = header
        .iter()
        .map(|cell| {
            let name = cell_to_string(cell);
            match Column::from_header(&name) {
                Some(column) => Slot::Known(column),
                None if name.trim().is_empty() => Slot::Ignored,
                None => {
                    extra_columns.push(name.trim().to_string());
                    Slot::Extra(name.trim().to_string())
                }
            }
        })
        .collect();

    let file_name = file_name_of(path);
    let mut records = Vec::new();
    for row in rows {
        if row.iter().all(|c| matches!(c, Data::Empty)) {
            continue;
        }
        records.push(parse_row(row, &slots, &file_name));
    }

    Ok(LogTable::new(records, extra_columns))
}

fn parse_row(row: &[Data], slots: &[Slot], file_name: &str) -> LogRecord {
    let mut record = LogRecord {
        source_file: file_name.to_string(),
        ..Default::default()
    };
    let mut extra = BTreeMap::new();

    for (cell, slot) in row.iter().zip(slots) {
        match slot {
            Slot::Known(Column::Timestamp) => record.timestamp = cell_to_datetime(cell),
            Slot::Known(Column::Sender) => record.sender = cell_to_string(cell).trim().to_string(),
            Slot::Known(Column::Category) => {
                record.category = cell_to_string(cell).trim().to_string()
            }
            Slot::Known(Column::Answered) => {
                record.reply_status = match cell {
                    Data::Bool(true) => ReplyStatus::Answered,
                    other => ReplyStatus::parse(&cell_to_string(other)),
                }
            }
            Slot::Known(Column::Reply) => record.reply_text = non_empty(cell_to_string(cell)),
            Slot::Known(Column::Reason) => record.fallback_reason = non_empty(cell_to_string(cell)),
            Slot::Known(Column::File) => {
                if let Some(name) = non_empty(cell_to_string(cell)) {
                    record.source_file = name;
                }
            }
            Slot::Extra(name) => {
                extra.insert(name.clone(), cell_to_string(cell));
            }
            Slot::Ignored => {}
        }
    }

    record.extra = extra;
    record.normalize();
    record
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(n) => n.to_string(),
        Data::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::Error(e) => format!("#ERR({:?})", e),
        Data::DateTime(dt) => excel_serial_to_datetime(dt.as_f64())
            .map(|d| format_timestamp(&d))
            .unwrap_or_default(),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}

fn cell_to_datetime(cell: &Data) -> Option<PrimitiveDateTime> {
    match cell {
        Data::DateTime(dt) => excel_serial_to_datetime(dt.as_f64()),
        Data::Float(f) => excel_serial_to_datetime(*f),
        Data::Int(n) => excel_serial_to_datetime(*n as f64),
        Data::String(s) | Data::DateTimeIso(s) => parse_timestamp(s),
        _ => None,
    }
}

/// Excel stores datetimes as fractional days since 1899-12-30.
fn excel_serial_to_datetime(serial: f64) -> Option<PrimitiveDateTime> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    let epoch = Date::from_calendar_date(1899, Month::December, 30).ok()?;
    let seconds = (serial * 86_400.0).round() as i64;
    PrimitiveDateTime::new(epoch, Time::MIDNIGHT).checked_add(Duration::seconds(seconds))
}

/// Parse the textual timestamp forms found in log files. Unparsable values
/// become `None` rather than an error.
pub fn parse_timestamp(value: &str) -> Option<PrimitiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    for format in TIMESTAMP_FORMATS {
        if let Ok(parsed) = PrimitiveDateTime::parse(value, *format) {
            return Some(parsed);
        }
    }
    Date::parse(value, format_description!("[year]-[month]-[day]"))
        .ok()
        .map(|d| PrimitiveDateTime::new(d, Time::MIDNIGHT))
}
