use crate::helpers::{body_string, mock_log_table, spawn_app, MockLogAccess};
use hyper::{Method, StatusCode};
use mailmind_core::logs::{LogTable, PeriodMode};
use std::sync::Arc;
use time::macros::date;

/// The statistics tab loads the requested week and the long-run averages
#[tokio::test]
async fn stats_page_shows_summary_for_selected_week() {
    let mut log_store = MockLogAccess::new();

    log_store
        .expect_load_period()
        .withf(|selector| {
            selector.mode == PeriodMode::Week
                && selector.date == date!(2024 - 05 - 08)
                && !selector.all_logs
        })
        .times(1)
        .returning(|_| Ok(mock_log_table()));

    log_store
        .expect_load_all()
        .times(1)
        .returning(|| Ok(mock_log_table()));

    let test_app = spawn_app(Arc::new(log_store)).await;
    let response = test_app
        .authed(Method::GET, "/?date=2024-05-08&mode=week")
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;

    assert!(html.contains("Total emails"));
    assert!(html.contains("Unique senders"));
    // 3 of 5 answered, 2 of 5 fallback
    assert!(html.contains("60.0%"));
    assert!(html.contains("40.0%"));
    assert!(html.contains("AI vs fallback"));
    assert!(html.contains("3/2"));
    // 1 complaint in 5 is above the 10% threshold
    assert!(html.contains("High share of complaints!"));
    assert!(html.contains("Average over all logs"));
}

#[tokio::test]
async fn empty_period_shows_warning() {
    let mut log_store = MockLogAccess::new();

    log_store
        .expect_load_period()
        .times(1)
        .returning(|_| Ok(LogTable::default()));
    log_store
        .expect_load_all()
        .times(1)
        .returning(|| Ok(LogTable::default()));

    let test_app = spawn_app(Arc::new(log_store)).await;
    let response = test_app.authed(Method::GET, "/?date=2030-01-01").await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("No data available for the selected period."));
    assert!(!html.contains("Average over all logs"));
}

#[tokio::test]
async fn all_logs_mode_skips_averages() {
    let mut log_store = MockLogAccess::new();

    log_store
        .expect_load_period()
        .withf(|selector| selector.all_logs)
        .times(1)
        .returning(|_| Ok(mock_log_table()));
    log_store.expect_load_all().times(0);

    let test_app = spawn_app(Arc::new(log_store)).await;
    let response = test_app.authed(Method::GET, "/?all=true").await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("all logs"));
    assert!(!html.contains("Average over all logs"));
}

#[tokio::test]
async fn invalid_date_is_rejected() {
    let mut log_store = MockLogAccess::new();
    log_store.expect_load_period().times(0);

    let test_app = spawn_app(Arc::new(log_store)).await;
    let response = test_app.authed(Method::GET, "/logs?date=08-05-2024").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Filters narrow the table, while the choices still come from the whole period
#[tokio::test]
async fn logs_page_filters_and_highlights_rows() {
    let mut log_store = MockLogAccess::new();

    log_store
        .expect_load_period()
        .times(1)
        .returning(|_| Ok(mock_log_table()));

    let test_app = spawn_app(Arc::new(log_store)).await;
    let response = test_app
        .authed(Method::GET, "/logs?date=2024-05-06&category=Klacht")
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;

    assert!(html.contains("Processed emails (1)"));
    assert!(html.contains("row-complaint"));
    assert!(!html.contains("row-unanswered"));
    assert!(html.contains("klant@bakkerij.nl"));
    // Offered as a filter option even though it is filtered out
    assert!(html.contains(r#"<option value="Offerte">"#));
    assert!(html.contains(r#"<option value="Klacht" selected>"#));
}

#[tokio::test]
async fn logs_page_marks_unanswered_rows() {
    let mut log_store = MockLogAccess::new();

    log_store
        .expect_load_period()
        .times(1)
        .returning(|_| Ok(mock_log_table()));

    let test_app = spawn_app(Arc::new(log_store)).await;
    let response = test_app
        .authed(Method::GET, "/logs?sender=info%40garage.nl")
        .await;

    let html = body_string(response).await;
    assert!(html.contains("Processed emails (2)"));
    assert!(html.contains("row-unanswered"));
    assert!(html.contains("no_template"));
    assert!(html.contains("Fallbacks per reason"));
}

#[tokio::test]
async fn charts_and_trends_embed_svg() {
    let mut log_store = MockLogAccess::new();

    log_store
        .expect_load_period()
        .times(2)
        .returning(|_| Ok(mock_log_table()));

    let test_app = spawn_app(Arc::new(log_store)).await;

    let html = body_string(test_app.authed(Method::GET, "/charts").await).await;
    assert!(html.contains("<svg"));
    assert!(html.contains("/charts/categorie_balk.png"));
    assert!(html.contains("/charts/tijdlijn_per_uur.png"));

    let html = body_string(test_app.authed(Method::GET, "/trends").await).await;
    assert!(html.contains("Emails per day"));
    assert!(html.contains("/charts/klachten_per_dag.png"));
}

#[tokio::test]
async fn stats_fragment_polls_when_refresh_is_on() {
    let mut log_store = MockLogAccess::new();

    log_store
        .expect_load_period()
        .times(1)
        .returning(|_| Ok(mock_log_table()));
    log_store
        .expect_load_all()
        .times(1)
        .returning(|| Ok(mock_log_table()));

    let test_app = spawn_app(Arc::new(log_store)).await;
    let response = test_app
        .authed(Method::GET, "/fragments/stats?refresh=true")
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.starts_with(r#"<div id="stats-panel""#));
    assert!(html.contains(r#"hx-trigger="every 60s""#));
    assert!(html.contains("/fragments/stats?refresh=true"));
    assert!(!html.contains("<html"));
}

#[tokio::test]
async fn other_tabs_reload_main_content_when_refresh_is_on() {
    let mut log_store = MockLogAccess::new();

    log_store
        .expect_load_period()
        .times(4)
        .returning(|_| Ok(mock_log_table()));

    let test_app = spawn_app(Arc::new(log_store)).await;

    let html = body_string(
        test_app
            .authed(Method::GET, "/logs?date=2024-05-06&refresh=true")
            .await,
    )
    .await;
    assert!(html.contains(r#"hx-get="/logs?date=2024-05-06&amp;refresh=true""#));
    assert!(html.contains(r##"hx-select="#main-content""##));
    assert!(html.contains(r#"hx-trigger="every 60s""#));

    for tab in ["/charts", "/trends"] {
        let html = body_string(
            test_app
                .authed(Method::GET, &format!("{}?refresh=true", tab))
                .await,
        )
        .await;
        assert!(html.contains(&format!(r#"hx-get="{}?refresh=true""#, tab)), "{}", tab);
    }

    let html = body_string(test_app.authed(Method::GET, "/logs").await).await;
    assert!(!html.contains("every 60s"));
}

#[tokio::test]
async fn export_page_lists_downloads() {
    let mut log_store = MockLogAccess::new();

    log_store
        .expect_load_period()
        .times(1)
        .returning(|_| Ok(mock_log_table()));

    let test_app = spawn_app(Arc::new(log_store)).await;
    let html = body_string(
        test_app
            .authed(Method::GET, "/export?date=2024-05-06&mode=week")
            .await,
    )
    .await;

    assert!(html.contains("/export/xlsx?date=2024-05-06&amp;mode=week"));
    assert!(html.contains("/export/pdf?"));
    assert!(html.contains("/export/charts.zip?"));
    assert!(html.contains("filtered_emails_export.xlsx"));
}

#[tokio::test]
async fn config_page_does_not_read_logs() {
    let mut log_store = MockLogAccess::new();
    log_store.expect_load_period().times(0);

    let test_app = spawn_app(Arc::new(log_store)).await;
    let response = test_app.authed(Method::GET, "/config").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("Configuration"));
}
