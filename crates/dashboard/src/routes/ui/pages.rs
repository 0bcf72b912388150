use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
};
use log::warn;
use mailmind_core::{
    export::ChartKind,
    stats::{distinct_categories, distinct_reasons, distinct_senders, Averages, Summary},
};

use crate::routes::period::{chart_cards, load_period, png_href, LoadedPeriod};
use crate::{
    templates::{
        charts_page, export_page, logs_page, stats_page, trends_page, FilterOptions, LogsView,
        StatsView,
    },
    AppState,
};

pub const CHARTS_TAB: [ChartKind; 5] = [
    ChartKind::CategoryBar,
    ChartKind::CategoryPie,
    ChartKind::ReplyStatus,
    ChartKind::AiVsFallback,
    ChartKind::Hourly,
];

pub const TRENDS_TAB: [ChartKind; 2] = [ChartKind::Daily, ChartKind::DailyComplaints];

type PageResult = Result<Html<String>, (StatusCode, String)>;

/// Handler for the statistics tab (GET /)
pub async fn stats_handler(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> PageResult {
    let period = load_period(&state, pairs).await?;
    let stats = build_stats_view(&state, &period).await;
    Ok(Html(stats_page(&period.view, &stats).into_string()))
}

pub(crate) async fn build_stats_view(state: &AppState, period: &LoadedPeriod) -> StatsView {
    let averages = if period.view.selector.all_logs {
        None
    } else {
        match state.log_store.load_all().await {
            Ok(all) => Averages::from_records(&all.records),
            Err(e) => {
                warn!("skipping averages over all logs: {}", e);
                None
            }
        }
    };

    StatsView {
        summary: Summary::from_records(&period.table.records),
        averages,
        refresh_url: period
            .view
            .query
            .refresh
            .then(|| period.view.query.link("/fragments/stats")),
    }
}

/// Handler for the logs tab (GET /logs)
pub async fn logs_handler(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> PageResult {
    let period = load_period(&state, pairs).await?;
    let reasons_chart = chart_cards(&[ChartKind::FallbackReasons], &period).pop();

    let records = &period.unfiltered.records;
    let view = LogsView {
        options: FilterOptions {
            categories: distinct_categories(records),
            senders: distinct_senders(records),
            reasons: distinct_reasons(records),
        },
        period_has_data: !period.unfiltered.is_empty(),
        reasons_chart,
        table: period.table,
    };

    Ok(Html(
        logs_page(&period.view, &view).into_string(),
    ))
}

/// Handler for the charts tab (GET /charts)
pub async fn charts_handler(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> PageResult {
    let period = load_period(&state, pairs).await?;
    let charts = chart_cards(&CHARTS_TAB, &period);
    Ok(Html(
        charts_page(&period.view, &charts).into_string(),
    ))
}

/// Handler for the trends tab (GET /trends)
pub async fn trends_handler(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> PageResult {
    let period = load_period(&state, pairs).await?;
    let charts = chart_cards(&TRENDS_TAB, &period);
    Ok(Html(
        trends_page(&period.view, &charts).into_string(),
    ))
}

/// Handler for the export tab (GET /export)
pub async fn export_page_handler(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> PageResult {
    let period = load_period(&state, pairs).await?;
    let charts: Vec<(String, String)> = ChartKind::ALL
        .into_iter()
        .filter(|kind| kind.render(&period.table.records).is_some())
        .map(|kind| {
            (
                kind.title().to_string(),
                png_href(kind, &period.view.query),
            )
        })
        .collect();

    Ok(Html(
        export_page(&period.view, period.table.len(), &charts).into_string(),
    ))
}
