use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, Response},
    Router,
};
use dashboard::{app, AppState, Auth, Error, LogStore, SESSION_COOKIE};
use hyper::{header, Method};
use mailmind_core::logs::{LogRecord, LogTable, PeriodSelector, ReplyStatus};
use mockall::mock;
use std::sync::Arc;
use time::macros::datetime;
use tower::ServiceExt;

pub const USERNAME: &str = "manager";
pub const PASSWORD: &str = "geheim";

mock! {
    pub LogAccess {}

    #[async_trait]
    impl LogStore for LogAccess {
        async fn load_period(&self, selector: PeriodSelector) -> Result<LogTable, Error>;
        async fn load_all(&self) -> Result<LogTable, Error>;
    }
}

pub struct TestApp {
    pub app: Router,
}

impl TestApp {
    /// Send `request` with a fresh session cookie
    pub async fn authed(&self, method: Method, uri: &str) -> Response<Body> {
        let cookie = self.login().await;
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::COOKIE, format!("{}={}", SESSION_COOKIE, cookie))
            .body(Body::empty())
            .unwrap();

        self.app
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request.")
    }

    /// Log in with the test credentials and return the session token
    pub async fn login(&self) -> String {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/login")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(format!(
                "username={}&password={}",
                USERNAME, PASSWORD
            )))
            .unwrap();

        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request.");

        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .expect("login should set a cookie")
            .to_str()
            .unwrap();
        cookie
            .split(';')
            .next()
            .and_then(|pair| pair.split_once('='))
            .map(|(_, token)| token.to_string())
            .unwrap()
    }
}

pub async fn spawn_app(log_store: Arc<dyn LogStore>) -> TestApp {
    let app_state = AppState {
        static_dir: "./static".to_string(),
        log_store,
        auth: Arc::new(Auth::new(Some((
            USERNAME.to_string(),
            PASSWORD.to_string(),
        )))),
        config_entries: Vec::new(),
    };

    TestApp { app: app(app_state) }
}

pub async fn body_string(response: Response<Body>) -> String {
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

/// Two days of mail: 5 records, 1 complaint, 2 fallbacks, 3 answered
pub fn mock_log_table() -> LogTable {
    let rows = [
        ("klant@bakkerij.nl", "Klacht", ReplyStatus::Unanswered, None, datetime!(2024-05-06 09:12)),
        ("info@garage.nl", "Vraag", ReplyStatus::Answered, None, datetime!(2024-05-06 10:30)),
        ("info@garage.nl", "Offerte", ReplyStatus::Unanswered, Some("no_template"), datetime!(2024-05-06 13:05)),
        ("jan@example.com", "Vraag", ReplyStatus::Answered, None, datetime!(2024-05-07 08:45)),
        ("piet@example.com", "Vraag", ReplyStatus::Answered, Some("low_confidence"), datetime!(2024-05-07 15:20)),
    ];
    let records = rows
        .into_iter()
        .map(|(sender, category, status, reason, ts)| LogRecord {
            timestamp: Some(ts),
            sender: sender.to_string(),
            category: category.to_string(),
            reply_status: status,
            fallback_reason: reason.map(str::to_string),
            source_file: format!("mail_log_{}.xlsx", ts.date()),
            ..Default::default()
        })
        .collect();
    LogTable::new(records, Vec::new())
}
