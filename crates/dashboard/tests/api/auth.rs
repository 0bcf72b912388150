use crate::helpers::{body_string, spawn_app, MockLogAccess};
use axum::{body::Body, http::Request};
use dashboard::SESSION_COOKIE;
use hyper::{header, Method, StatusCode};
use std::sync::Arc;
use tower::ServiceExt;

fn request(method: Method, uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = cookie {
        builder = builder.header(header::COOKIE, format!("{}={}", SESSION_COOKIE, token));
    }
    builder.body(Body::empty()).unwrap()
}

#[tokio::test]
async fn pages_redirect_to_login_without_session() {
    let test_app = spawn_app(Arc::new(MockLogAccess::new())).await;

    for uri in ["/", "/logs", "/export/xlsx", "/charts/dagelijks.png", "/fragments/stats"] {
        let response = test_app
            .app
            .clone()
            .oneshot(request(Method::GET, uri, None))
            .await
            .expect("Failed to execute request.");

        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{}", uri);
        assert_eq!(response.headers()[header::LOCATION], "/login");
    }
}

#[tokio::test]
async fn unknown_session_is_rejected() {
    let test_app = spawn_app(Arc::new(MockLogAccess::new())).await;

    let response = test_app
        .app
        .clone()
        .oneshot(request(Method::GET, "/", Some("made-up-token")))
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn htmx_requests_get_a_full_page_redirect() {
    let test_app = spawn_app(Arc::new(MockLogAccess::new())).await;

    let request = Request::builder()
        .method(Method::GET)
        .uri("/fragments/stats")
        .header("HX-Request", "true")
        .body(Body::empty())
        .unwrap();

    let response = test_app
        .app
        .clone()
        .oneshot(request)
        .await
        .expect("Failed to execute request.");

    assert!(!response.status().is_redirection());
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::LOCATION).is_none());
    assert_eq!(response.headers()["hx-redirect"], "/login");
    assert!(body_string(response).await.is_empty());
}

#[tokio::test]
async fn login_page_and_static_files_are_public() {
    let test_app = spawn_app(Arc::new(MockLogAccess::new())).await;

    let response = test_app
        .app
        .clone()
        .oneshot(request(Method::GET, "/login", None))
        .await
        .expect("Failed to execute request.");
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains(r#"name="password""#));

    let response = test_app
        .app
        .clone()
        .oneshot(request(Method::GET, "/static/styles.css", None))
        .await
        .expect("Failed to execute request.");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn successful_login_sets_session_cookie() {
    let test_app = spawn_app(Arc::new(MockLogAccess::new())).await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/login")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("username=manager&password=geheim"))
        .unwrap();

    let response = test_app
        .app
        .clone()
        .oneshot(request)
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/");

    let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
    assert!(cookie.starts_with("mailmind_session="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
}

#[tokio::test]
async fn wrong_password_shows_error() {
    let test_app = spawn_app(Arc::new(MockLogAccess::new())).await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/login")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("username=manager&password=fout"))
        .unwrap();

    let response = test_app
        .app
        .clone()
        .oneshot(request)
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
    assert!(body_string(response)
        .await
        .contains("Invalid username or password."));
}

#[tokio::test]
async fn logout_ends_the_session() {
    let test_app = spawn_app(Arc::new(MockLogAccess::new())).await;
    let token = test_app.login().await;

    let response = test_app
        .app
        .clone()
        .oneshot(request(Method::POST, "/logout", Some(&token)))
        .await
        .expect("Failed to execute request.");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/login");

    let response = test_app
        .app
        .clone()
        .oneshot(request(Method::GET, "/config", Some(&token)))
        .await
        .expect("Failed to execute request.");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}
