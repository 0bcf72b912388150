use maud::{html, Markup};
use mailmind_core::logs::PeriodSelector;

use crate::DashboardQuery;

/// Choices offered by the multi-selects, taken from the unfiltered period
#[derive(Default)]
pub struct FilterOptions {
    pub categories: Vec<String>,
    pub senders: Vec<String>,
    pub reasons: Vec<String>,
}

pub fn filter_form(
    action: &str,
    selector: &PeriodSelector,
    query: &DashboardQuery,
    options: &FilterOptions,
) -> Markup {
    html! {
        form class="box" method="get" action=(action) {
            h2 class="title is-6 mb-3" { "Filters" }
            input type="hidden" name="date" value=(selector.date);
            input type="hidden" name="mode" value=(selector.mode.as_str());
            @if selector.all_logs {
                input type="hidden" name="all" value="true";
            }
            @if query.refresh {
                input type="hidden" name="refresh" value="true";
            }

            div class="columns" {
                (multi_select("Category", "category", &options.categories, &query.categories))
                (multi_select("Sender", "sender", &options.senders, &query.senders))
                (multi_select("Fallback reason", "reason", &options.reasons, &query.reasons))
            }

            div class="buttons" {
                button class="button is-link is-small" type="submit" { "Apply" }
                a class="button is-light is-small" href=(clear_link(action, query)) { "Clear" }
            }
        }
    }
}

fn multi_select(label: &str, name: &str, options: &[String], selected: &[String]) -> Markup {
    html! {
        div class="column" {
            label class="label is-small" { (label) }
            div class="select is-multiple is-small is-fullwidth" {
                select name=(name) multiple size="5" {
                    @for choice in options {
                        option value=(choice) selected[selected.contains(choice)] { (choice) }
                    }
                }
            }
        }
    }
}

fn clear_link(action: &str, query: &DashboardQuery) -> String {
    let cleared = DashboardQuery {
        categories: Vec::new(),
        senders: Vec::new(),
        reasons: Vec::new(),
        ..query.clone()
    };
    cleared.link(action)
}
