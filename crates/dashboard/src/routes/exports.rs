use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderValue, StatusCode},
};
use hyper::{
    header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    HeaderMap,
};
use log::{error, info};
use mailmind_core::export::{
    self, chart_bundle, export_pdf, export_xlsx, render_all, svg_to_png, ChartKind,
    ReportSummary, BUNDLE_FILE_NAME, PDF_FILE_NAME, XLSX_CONTENT_TYPE, XLSX_FILE_NAME,
};

use crate::{routes::period::load_period, templates::components::EMPTY_MESSAGE, today, AppState};

type Download = Result<(HeaderMap, Vec<u8>), (StatusCode, String)>;

/// Handler for the filtered spreadsheet (GET /export/xlsx)
pub async fn export_xlsx_handler(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Download {
    let period = load_period(&state, pairs).await?;
    if period.table.is_empty() {
        return Err((StatusCode::NOT_FOUND, EMPTY_MESSAGE.to_string()));
    }
    let table = period.table;

    let bytes = build("xlsx", move || export_xlsx(&table)).await?;
    info!("exported {} as {}", period.view.selector.label(), XLSX_FILE_NAME);
    Ok((attachment(XLSX_CONTENT_TYPE, XLSX_FILE_NAME)?, bytes))
}

/// Handler for the summary report (GET /export/pdf)
pub async fn export_pdf_handler(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Download {
    let period = load_period(&state, pairs).await?;
    if period.table.is_empty() {
        return Err((StatusCode::NOT_FOUND, EMPTY_MESSAGE.to_string()));
    }
    let report = ReportSummary::new(today(), &period.view.selector, &period.table.records);

    let bytes = build("pdf", move || export_pdf(&report)).await?;
    Ok((attachment("application/pdf", PDF_FILE_NAME)?, bytes))
}

/// Handler for every chart as PNG in one archive (GET /export/charts.zip)
pub async fn export_charts_handler(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Download {
    let period = load_period(&state, pairs).await?;
    let charts = render_all(&period.table.records);
    if charts.is_empty() {
        return Err((StatusCode::NOT_FOUND, EMPTY_MESSAGE.to_string()));
    }

    let bytes = build("chart bundle", move || chart_bundle(&charts)).await?;
    Ok((attachment("application/zip", BUNDLE_FILE_NAME)?, bytes))
}

/// Handler for a single chart image (GET /charts/{name}.png)
pub async fn chart_png_handler(
    State(state): State<Arc<AppState>>,
    Path(file_name): Path<String>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Download {
    let kind = file_name
        .strip_suffix(".png")
        .and_then(ChartKind::from_name)
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("Unknown chart: {}", file_name)))?;

    let period = load_period(&state, pairs).await?;
    let svg = kind
        .render(&period.table.records)
        .ok_or_else(|| (StatusCode::NOT_FOUND, EMPTY_MESSAGE.to_string()))?;

    let bytes = build("chart png", move || svg_to_png(&svg)).await?;
    Ok((attachment("image/png", &kind.png_file_name())?, bytes))
}

/// Run an exporter off the async runtime
async fn build<F>(what: &'static str, job: F) -> Result<Vec<u8>, (StatusCode, String)>
where
    F: FnOnce() -> Result<Vec<u8>, export::Error> + Send + 'static,
{
    tokio::task::spawn_blocking(job)
        .await
        .map_err(|e| {
            error!("{} export task failed: {}", what, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to build {}", what),
            )
        })?
        .map_err(|e| {
            error!("error building {}: {}", what, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to build {}: {}", what, e),
            )
        })
}

fn attachment(content_type: &'static str, file_name: &str) -> Result<HeaderMap, (StatusCode, String)> {
    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{}\"", file_name))
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    headers.insert(CONTENT_DISPOSITION, disposition);
    Ok(headers)
}
