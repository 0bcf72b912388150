use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook};

use super::Error;
use crate::logs::{format_timestamp, LogRecord, LogTable, CANONICAL_COLUMNS, COL_ANSWERED};

pub const XLSX_FILE_NAME: &str = "filtered_emails_export.xlsx";
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const SHEET_NAME: &str = "Log";
const HEADER_FILL: u32 = 0xD9E1F2;
const ANSWERED_FILL: u32 = 0xC6EFCE;
const UNANSWERED_FILL: u32 = 0xFFC7CE;

/// Write `table` to an in-memory workbook.
///
/// The header row is bold and shaded, every column is sized to its longest
/// value, and the reply-status column is coloured green or red per row.
pub fn export_xlsx(table: &LogTable) -> Result<Vec<u8>, Error> {
    let header: Vec<String> = CANONICAL_COLUMNS
        .iter()
        .map(|c| c.to_string())
        .chain(table.extra_columns.iter().cloned())
        .collect();
    let answered_col = CANONICAL_COLUMNS
        .iter()
        .position(|c| *c == COL_ANSWERED)
        .unwrap_or(3) as u16;

    let rows: Vec<Vec<String>> = table
        .records
        .iter()
        .map(|r| record_cells(r, &table.extra_columns))
        .collect();

    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(HEADER_FILL))
        .set_border(FormatBorder::Thin);
    let answered_format = Format::new().set_background_color(Color::RGB(ANSWERED_FILL));
    let unanswered_format = Format::new().set_background_color(Color::RGB(UNANSWERED_FILL));

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, name) in header.iter().enumerate() {
        let col = col as u16;
        sheet.write_string_with_format(0, col, name, &header_format)?;

        let longest = rows
            .iter()
            .map(|row| row[col as usize].chars().count())
            .max()
            .unwrap_or(0)
            .max(name.chars().count());
        sheet.set_column_width(col, (longest + 2) as f64)?;
    }

    for (idx, (row, record)) in rows.iter().zip(&table.records).enumerate() {
        let row_num = idx as u32 + 1;
        for (col, value) in row.iter().enumerate() {
            let col = col as u16;
            if col == answered_col {
                let format = if record.reply_status.is_answered() {
                    &answered_format
                } else {
                    &unanswered_format
                };
                sheet.write_string_with_format(row_num, col, value, format)?;
            } else if !value.is_empty() {
                sheet.write_string(row_num, col, value)?;
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

fn record_cells(record: &LogRecord, extra_columns: &[String]) -> Vec<String> {
    let mut cells = vec![
        record
            .timestamp
            .as_ref()
            .map(format_timestamp)
            .unwrap_or_default(),
        record.sender.clone(),
        record.category.clone(),
        record.reply_status.as_str().to_string(),
        record.reply_text.clone().unwrap_or_default(),
        record.fallback_reason.clone().unwrap_or_default(),
        record.source_file.clone(),
    ];
    cells.extend(
        extra_columns
            .iter()
            .map(|c| record.extra.get(c).cloned().unwrap_or_default()),
    );
    cells
}
