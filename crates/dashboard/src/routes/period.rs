use axum::http::StatusCode;
use log::error;
use mailmind_core::{export::ChartKind, logs::LogTable};

use crate::{today, templates::ChartCard, AppState, DashboardQuery, PeriodView};

/// Records of the requested period, before and after the filters
pub struct LoadedPeriod {
    pub view: PeriodView,
    pub unfiltered: LogTable,
    pub table: LogTable,
}

pub async fn load_period(
    state: &AppState,
    pairs: Vec<(String, String)>,
) -> Result<LoadedPeriod, (StatusCode, String)> {
    let query = DashboardQuery::from_pairs(pairs);
    let selector = query
        .to_selector(today())
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    let unfiltered = state
        .log_store
        .load_period(selector)
        .await
        .map_err(|e| {
            error!("error loading logs for {}: {}", selector.label(), e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to load logs: {}", e),
            )
        })?;
    let table = query.to_filter().apply(&unfiltered);

    Ok(LoadedPeriod {
        view: PeriodView { selector, query },
        unfiltered,
        table,
    })
}

pub fn chart_cards(kinds: &[ChartKind], period: &LoadedPeriod) -> Vec<ChartCard> {
    kinds
        .iter()
        .filter_map(|kind| {
            kind.render(&period.table.records).map(|svg| ChartCard {
                title: kind.title().to_string(),
                svg,
                png_href: png_href(*kind, &period.view.query),
            })
        })
        .collect()
}

pub fn png_href(kind: ChartKind, query: &DashboardQuery) -> String {
    query.link(&format!("/charts/{}", kind.png_file_name()))
}
