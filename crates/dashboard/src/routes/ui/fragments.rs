use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
};

use crate::routes::period::load_period;
use super::pages::build_stats_view;
use crate::{templates::stats_panel, AppState};

/// Handler for the auto-refreshing statistics panel (GET /fragments/stats)
pub async fn stats_fragment_handler(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Html<String>, (StatusCode, String)> {
    let period = load_period(&state, pairs).await?;
    let stats = build_stats_view(&state, &period).await;
    Ok(Html(stats_panel(&stats).into_string()))
}
