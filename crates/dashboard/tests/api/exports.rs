use crate::helpers::{body_bytes, mock_log_table, spawn_app, MockLogAccess};
use hyper::{header, Method, StatusCode};
use mailmind_core::logs::{load_log_file, LogTable};
use std::{io::Cursor, sync::Arc};

fn store_with_data(calls: usize) -> MockLogAccess {
    let mut log_store = MockLogAccess::new();
    log_store
        .expect_load_period()
        .times(calls)
        .returning(|_| Ok(mock_log_table()));
    log_store
}

/// The spreadsheet holds only the filtered records and reads back as a log file
#[tokio::test]
async fn xlsx_export_contains_filtered_records() {
    let test_app = spawn_app(Arc::new(store_with_data(1))).await;
    let response = test_app
        .authed(Method::GET, "/export/xlsx?category=Vraag")
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"filtered_emails_export.xlsx\""
    );

    let bytes = body_bytes(response).await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("export.xlsx");
    std::fs::write(&path, bytes).unwrap();

    let table = load_log_file(&path).unwrap();
    assert_eq!(table.len(), 3);
    assert!(table.records.iter().all(|r| r.category == "Vraag"));
}

#[tokio::test]
async fn pdf_export_is_a_pdf() {
    let test_app = spawn_app(Arc::new(store_with_data(1))).await;
    let response = test_app.authed(Method::GET, "/export/pdf").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"rapport.pdf\""
    );
    assert!(body_bytes(response).await.starts_with(b"%PDF"));
}

#[tokio::test]
async fn chart_bundle_has_a_png_per_chart() {
    let test_app = spawn_app(Arc::new(store_with_data(1))).await;
    let response = test_app.authed(Method::GET, "/export/charts.zip").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/zip");

    let bytes = body_bytes(response).await;
    let archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let names: Vec<&str> = archive.file_names().collect();
    assert!(names.contains(&"categorie_balk.png"));
    assert!(names.contains(&"fallback_redenen.png"));
    assert!(names.contains(&"dagelijks.png"));
}

#[tokio::test]
async fn single_chart_is_served_as_png() {
    let test_app = spawn_app(Arc::new(store_with_data(1))).await;
    let response = test_app
        .authed(Method::GET, "/charts/categorie_taart.png?date=2024-05-06")
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
    assert!(body_bytes(response).await.starts_with(b"\x89PNG"));
}

#[tokio::test]
async fn unknown_chart_is_not_found() {
    let test_app = spawn_app(Arc::new(store_with_data(0))).await;

    let response = test_app.authed(Method::GET, "/charts/taartje.png").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = test_app.authed(Method::GET, "/charts/categorie_balk").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn empty_period_has_nothing_to_download() {
    let mut log_store = MockLogAccess::new();
    log_store
        .expect_load_period()
        .times(2)
        .returning(|_| Ok(LogTable::default()));

    let test_app = spawn_app(Arc::new(log_store)).await;

    let response = test_app.authed(Method::GET, "/export/xlsx").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = test_app.authed(Method::GET, "/export/charts.zip").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
