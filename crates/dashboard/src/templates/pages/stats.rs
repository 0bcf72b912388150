use maud::html;

use super::PeriodView;
use crate::templates::{
    components::period_form,
    fragments::{stats_panel, StatsView},
    layouts::{base, CurrentPage, PageConfig},
};

pub fn stats_page(period: &PeriodView, stats: &StatsView) -> maud::Markup {
    let query = period.query.to_query_string();
    let config = PageConfig {
        title: "MailMind - Statistics",
        current_page: CurrentPage::Statistics,
        query: &query,
        refresh: period.query.refresh,
    };

    base(
        &config,
        html! {
            (period_form("/", &period.selector, &period.query))
            (stats_panel(stats))
        },
    )
}
