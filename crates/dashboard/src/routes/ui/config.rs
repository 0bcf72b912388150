use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
};

use crate::{templates::config_page, today, AppState, DashboardQuery, PeriodView};

/// Handler for the configuration tab (GET /config)
pub async fn config_handler(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Html<String>, (StatusCode, String)> {
    let query = DashboardQuery::from_pairs(pairs);
    let selector = query
        .to_selector(today())
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    let period = PeriodView { selector, query };
    Ok(Html(
        config_page(&period, &state.config_entries).into_string(),
    ))
}
