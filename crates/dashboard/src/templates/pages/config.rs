use maud::{html, Markup};

use super::PeriodView;
use crate::templates::{
    components::period_form,
    layouts::{base, CurrentPage, PageConfig},
};

/// One line of the effective configuration
#[derive(Clone)]
pub struct ConfigEntry {
    pub name: &'static str,
    pub value: String,
}

/// Read-only view of the running configuration. Secrets arrive masked.
pub fn config_page(period: &PeriodView, entries: &[ConfigEntry]) -> Markup {
    let query = period.query.to_query_string();
    let config = PageConfig {
        title: "MailMind - Configuration",
        current_page: CurrentPage::Config,
        query: &query,
        refresh: period.query.refresh,
    };

    base(
        &config,
        html! {
            (period_form("/config", &period.selector, &period.query))
            div class="box" {
                h2 class="title is-5 mb-4" { "Configuration" }
                table class="table is-fullwidth is-striped" {
                    tbody {
                        @for entry in entries {
                            tr {
                                th { (entry.name) }
                                td class="is-family-monospace" { (entry.value) }
                            }
                        }
                    }
                }
            }
        },
    )
}
