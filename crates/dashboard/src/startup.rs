use crate::{
    chart_png_handler, charts_handler, config_handler, export_charts_handler,
    export_page_handler, export_pdf_handler, export_xlsx_handler, login_form_handler,
    login_handler, logout_handler, logs_handler, session_token, stats_fragment_handler,
    stats_handler, templates::ConfigEntry, trends_handler, Auth, Cli, FileLogStore, LogStore,
};
use axum::{
    body::Body,
    extract::{Request, State},
    http::{HeaderValue, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Router,
};
use log::info;
use std::sync::Arc;
use tower_http::services::ServeDir;

#[derive(Clone)]
pub struct AppState {
    pub static_dir: String,
    pub log_store: Arc<dyn LogStore>,
    pub auth: Arc<Auth>,
    /// Shown on the configuration tab
    pub config_entries: Vec<ConfigEntry>,
}

pub fn build_app_state(cli: &Cli) -> AppState {
    let log_store = Arc::new(FileLogStore::new(cli.logs_dir()));
    let auth = Arc::new(Auth::new(cli.credentials()));

    AppState {
        static_dir: cli.static_dir(),
        log_store,
        auth,
        config_entries: config_entries(cli),
    }
}

/// Effective settings with the password masked
pub fn config_entries(cli: &Cli) -> Vec<ConfigEntry> {
    let entry = |name, value| ConfigEntry { name, value };
    let not_set = || "(not set)".to_string();

    vec![
        entry("Logs directory", cli.logs_dir()),
        entry("Listen address", format!("{}:{}", cli.host(), cli.port())),
        entry("Static files", cli.static_dir()),
        entry(
            "Login user",
            cli.auth_username.clone().unwrap_or_else(not_set),
        ),
        entry(
            "Login password",
            cli.auth_password
                .as_ref()
                .map(|_| "********".to_string())
                .unwrap_or_else(not_set),
        ),
        entry(
            "Log level",
            cli.level.clone().unwrap_or_else(|| "info".to_string()),
        ),
    ]
}

pub fn app(app_state: AppState) -> Router {
    let serve_static = ServeDir::new(&app_state.static_dir);
    let state = Arc::new(app_state);

    let protected = Router::new()
        // Tabs
        .route("/", get(stats_handler))
        .route("/logs", get(logs_handler))
        .route("/charts", get(charts_handler))
        .route("/trends", get(trends_handler))
        .route("/export", get(export_page_handler))
        .route("/config", get(config_handler))
        // HTMX fragment routes
        .route("/fragments/stats", get(stats_fragment_handler))
        // Downloads
        .route("/export/xlsx", get(export_xlsx_handler))
        .route("/export/pdf", get(export_pdf_handler))
        .route("/export/charts.zip", get(export_charts_handler))
        .route("/charts/{file_name}", get(chart_png_handler))
        .route("/logout", post(logout_handler))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_session));

    Router::new()
        .route("/login", get(login_form_handler).post(login_handler))
        .merge(protected)
        .with_state(state)
        .layer(middleware::from_fn(log_request))
        .nest_service("/static", serve_static)
}

/// Send anyone without a live session to the login page.
///
/// HTMX requests get a plain `200` carrying `HX-Redirect`. A 3xx would be
/// followed by the browser before htmx sees the header, and the login page
/// would be swapped into the fragment.
async fn require_session(
    State(state): State<Arc<AppState>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if let Some(token) = session_token(request.headers()) {
        if state.auth.is_valid(&token).await {
            return next.run(request).await;
        }
    }

    if request.headers().contains_key("hx-request") {
        return (
            StatusCode::OK,
            [("hx-redirect", HeaderValue::from_static("/login"))],
        )
            .into_response();
    }
    Redirect::to("/login").into_response()
}

async fn log_request(request: Request<Body>, next: Next) -> impl IntoResponse {
    let now = time::OffsetDateTime::now_utc();
    let path = request
        .uri()
        .path_and_query()
        .map(|p| p.as_str())
        .unwrap_or_default();
    info!(target: "http_request", "new request, {} {}", request.method().as_str(), path);

    let response = next.run(request).await;
    let response_time = time::OffsetDateTime::now_utc() - now;
    info!(
        target: "http_response",
        "response, code: {}, time: {}",
        response.status().as_str(),
        response_time
    );

    response
}
