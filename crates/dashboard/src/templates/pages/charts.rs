use maud::{html, Markup};

use super::PeriodView;
use crate::templates::{
    components::{empty_notice, period_form},
    fragments::{chart_card, ChartCard},
    layouts::{base, CurrentPage, PageConfig},
};

pub fn charts_page(period: &PeriodView, charts: &[ChartCard]) -> Markup {
    chart_grid_page(period, charts, CurrentPage::Charts, "MailMind - Charts")
}

pub fn trends_page(period: &PeriodView, charts: &[ChartCard]) -> Markup {
    chart_grid_page(period, charts, CurrentPage::Trends, "MailMind - Trends")
}

fn chart_grid_page(
    period: &PeriodView,
    charts: &[ChartCard],
    current_page: CurrentPage,
    title: &str,
) -> Markup {
    let query = period.query.to_query_string();
    let config = PageConfig {
        title,
        current_page,
        query: &query,
        refresh: period.query.refresh,
    };

    base(
        &config,
        html! {
            (period_form(current_page.path(), &period.selector, &period.query))
            @if charts.is_empty() {
                (empty_notice())
            } @else {
                div class="columns is-multiline" {
                    @for card in charts {
                        (chart_card(card))
                    }
                }
            }
        },
    )
}
