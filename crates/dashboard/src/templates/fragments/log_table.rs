use maud::{html, Markup};
use mailmind_core::logs::{format_timestamp, LogRecord, LogTable};

/// Row highlight: complaints yellow, unanswered red
pub fn row_class(record: &LogRecord) -> Option<&'static str> {
    if record.is_complaint() {
        Some("row-complaint")
    } else if !record.reply_status.is_answered() {
        Some("row-unanswered")
    } else {
        None
    }
}

pub fn log_table(table: &LogTable) -> Markup {
    html! {
        div class="box" {
            h2 class="title is-5 mb-4" { "Processed emails (" (table.len()) ")" }

            @if table.is_empty() {
                div class="has-text-centered has-text-grey py-4" {
                    p { "No records match the current filters." }
                }
            } @else {
                div class="table-container" {
                    table class="table is-fullwidth is-striped is-hoverable is-narrow" {
                        thead {
                            tr {
                                th { "Time" }
                                th { "Sender" }
                                th { "Category" }
                                th { "Answered" }
                                th class="is-hidden-mobile" { "Reply" }
                                th { "Fallback reason" }
                                th class="is-hidden-mobile" { "File" }
                                @for column in &table.extra_columns {
                                    th class="is-hidden-mobile" { (column) }
                                }
                            }
                        }
                        tbody {
                            @for record in &table.records {
                                tr class=[row_class(record)] {
                                    td class="is-family-monospace" {
                                        (record.timestamp.as_ref().map(format_timestamp).unwrap_or_default())
                                    }
                                    td { (record.sender) }
                                    td { (record.category) }
                                    td { (record.reply_status) }
                                    td class="is-hidden-mobile reply-text" {
                                        (record.reply_text.as_deref().unwrap_or_default())
                                    }
                                    td { (record.fallback_reason.as_deref().unwrap_or_default()) }
                                    td class="is-hidden-mobile" { (record.source_file) }
                                    @for column in &table.extra_columns {
                                        td class="is-hidden-mobile" {
                                            (record.extra.get(column).map(String::as_str).unwrap_or_default())
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
