use maud::{html, Markup};
use mailmind_core::logs::LogTable;

use super::PeriodView;
use crate::templates::{
    components::{empty_notice, period_form},
    fragments::{chart_card, filter_form, log_table, ChartCard, FilterOptions},
    layouts::{base, CurrentPage, PageConfig},
};

pub struct LogsView {
    /// Records after filtering
    pub table: LogTable,
    pub options: FilterOptions,
    /// Whether the period had any records before filtering
    pub period_has_data: bool,
    pub reasons_chart: Option<ChartCard>,
}

pub fn logs_page(period: &PeriodView, view: &LogsView) -> Markup {
    let query = period.query.to_query_string();
    let config = PageConfig {
        title: "MailMind - Logs",
        current_page: CurrentPage::Logs,
        query: &query,
        refresh: period.query.refresh,
    };

    let content = html! {
        (period_form("/logs", &period.selector, &period.query))

        @if !view.period_has_data {
            (empty_notice())
        } @else {
            (filter_form("/logs", &period.selector, &period.query, &view.options))
            (log_table(&view.table))

            @if let Some(card) = &view.reasons_chart {
                div class="columns" {
                    (chart_card(card))
                }
            }
        }
    };

    base(&config, content)
}
