use maud::{html, Markup};
use mailmind_core::logs::{PeriodMode, PeriodSelector};

use crate::DashboardQuery;

pub const EMPTY_MESSAGE: &str = "No data available for the selected period.";

/// Date, range and refresh controls. Submitting keeps the active filters.
pub fn period_form(action: &str, selector: &PeriodSelector, query: &DashboardQuery) -> Markup {
    let modes = [PeriodMode::Day, PeriodMode::Week, PeriodMode::Month];
    html! {
        form class="box" method="get" action=(action) {
            div class="columns is-vcentered is-multiline" {
                div class="column is-narrow" {
                    label class="label is-small" for="date" { "Date" }
                    input class="input is-small" type="date" id="date" name="date"
                          value=(selector.date);
                }
                div class="column is-narrow" {
                    label class="label is-small" for="mode" { "Period" }
                    div class="select is-small" {
                        select id="mode" name="mode" {
                            @for mode in modes {
                                option value=(mode.as_str()) selected[selector.mode == mode] {
                                    (mode.as_str())
                                }
                            }
                        }
                    }
                }
                div class="column is-narrow" {
                    label class="checkbox" {
                        input type="checkbox" name="all" value="true" checked[selector.all_logs];
                        " All logs"
                    }
                }
                div class="column is-narrow" {
                    label class="checkbox" {
                        input type="checkbox" name="refresh" value="true" checked[query.refresh];
                        " Auto refresh (60s)"
                    }
                }
                @for value in &query.categories {
                    input type="hidden" name="category" value=(value);
                }
                @for value in &query.senders {
                    input type="hidden" name="sender" value=(value);
                }
                @for value in &query.reasons {
                    input type="hidden" name="reason" value=(value);
                }
                div class="column is-narrow" {
                    button class="button is-link is-small" type="submit" { "Show" }
                }
                div class="column has-text-right has-text-grey is-size-7" {
                    (selector.label())
                }
            }
        }
    }
}

pub fn empty_notice() -> Markup {
    html! {
        div class="notification is-warning is-light" { (EMPTY_MESSAGE) }
    }
}
