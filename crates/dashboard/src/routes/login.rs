use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use hyper::{header::SET_COOKIE, HeaderMap};
use serde::Deserialize;

use crate::{
    auth::{expired_session_cookie, session_cookie, session_token},
    templates::login_page,
    AppState,
};

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Handler for the login form (GET /login)
pub async fn login_form_handler(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    if let Some(token) = session_token(&headers) {
        if state.auth.is_valid(&token).await {
            return Redirect::to("/").into_response();
        }
    }
    Html(login_page(None).into_string()).into_response()
}

/// Handler for login submissions (POST /login)
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    Form(form): Form<LoginForm>,
) -> Response {
    match state.auth.login(form.username.trim(), &form.password).await {
        Some(token) => ([(SET_COOKIE, session_cookie(&token))], Redirect::to("/")).into_response(),
        None => (
            StatusCode::UNAUTHORIZED,
            Html(login_page(Some("Invalid username or password.")).into_string()),
        )
            .into_response(),
    }
}

/// Handler for logging out (POST /logout)
pub async fn logout_handler(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    if let Some(token) = session_token(&headers) {
        state.auth.logout(&token).await;
    }
    (
        [(SET_COOKIE, expired_session_cookie())],
        Redirect::to("/login"),
    )
        .into_response()
}
