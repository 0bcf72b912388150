use maud::{html, Markup};
use mailmind_core::export::{BUNDLE_FILE_NAME, PDF_FILE_NAME, XLSX_FILE_NAME};

use super::PeriodView;
use crate::templates::{
    components::{empty_notice, period_form},
    layouts::{base, CurrentPage, PageConfig},
};

/// Download links for the selected period and filters.
///
/// `charts` holds `(title, png link)` for every chart that has data.
pub fn export_page(period: &PeriodView, record_count: usize, charts: &[(String, String)]) -> Markup {
    let query = period.query.to_query_string();
    let config = PageConfig {
        title: "MailMind - Export",
        current_page: CurrentPage::Export,
        query: &query,
        refresh: period.query.refresh,
    };
    let link = |path: &str| period.query.link(path);

    let content = html! {
        (period_form("/export", &period.selector, &period.query))

        @if record_count == 0 {
            (empty_notice())
        } @else {
            div class="box" {
                h2 class="title is-5 mb-4" { "Reports" }
                p class="mb-4 has-text-grey" {
                    (record_count) " records in " (period.selector.label())
                }
                div class="buttons" {
                    a class="button is-success" href=(link("/export/xlsx")) {
                        "Excel (" (XLSX_FILE_NAME) ")"
                    }
                    a class="button is-danger" href=(link("/export/pdf")) {
                        "PDF summary (" (PDF_FILE_NAME) ")"
                    }
                    a class="button is-link" href=(link("/export/charts.zip")) {
                        "All charts (" (BUNDLE_FILE_NAME) ")"
                    }
                }
            }

            div class="box" {
                h2 class="title is-5 mb-4" { "Individual charts" }
                ul {
                    @for (title, href) in charts {
                        li { a href=(href) download { (title) } }
                    }
                }
            }
        }
    };

    base(&config, content)
}
