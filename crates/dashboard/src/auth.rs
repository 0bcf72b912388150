use hyper::{header::COOKIE, HeaderMap};
use log::{debug, info, warn};
use std::collections::HashMap;
use time::{Duration, OffsetDateTime};
use tokio::sync::RwLock;
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "mailmind_session";
pub const SESSION_TTL: Duration = Duration::hours(12);

/// Single-user login with an in-memory session map.
///
/// Sessions expire after `SESSION_TTL` and are lost on restart.
/// When no credentials are configured every login attempt is refused.
pub struct Auth {
    credentials: Option<(String, String)>,
    session_ttl: Duration,
    /// Token to issued-at time
    sessions: RwLock<HashMap<String, OffsetDateTime>>,
}

impl Auth {
    pub fn new(credentials: Option<(String, String)>) -> Self {
        Self {
            credentials,
            session_ttl: SESSION_TTL,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub fn with_session_ttl(mut self, session_ttl: Duration) -> Self {
        self.session_ttl = session_ttl;
        self
    }

    /// Check the submitted login and open a session, returning its token
    pub async fn login(&self, username: &str, password: &str) -> Option<String> {
        let Some((user, pass)) = &self.credentials else {
            warn!("login attempt for '{}' refused: no credentials configured", username);
            return None;
        };
        if username != user || password != pass {
            warn!("failed login attempt for '{}'", username);
            return None;
        }

        let now = OffsetDateTime::now_utc();
        let token = Uuid::now_v7().to_string();
        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, issued_at| now - *issued_at < self.session_ttl);
        sessions.insert(token.clone(), now);
        info!("user '{}' logged in", username);
        Some(token)
    }

    /// Whether `token` is a live session. Expired tokens are dropped.
    pub async fn is_valid(&self, token: &str) -> bool {
        let now = OffsetDateTime::now_utc();
        let issued_at = match self.sessions.read().await.get(token) {
            Some(issued_at) => *issued_at,
            None => return false,
        };
        if now - issued_at < self.session_ttl {
            return true;
        }

        self.sessions.write().await.remove(token);
        debug!("session expired");
        false
    }

    pub async fn logout(&self, token: &str) {
        if self.sessions.write().await.remove(token).is_some() {
            info!("session closed");
        }
    }

    #[cfg(test)]
    async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

/// Session token from the request's `Cookie` header(s)
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, token)| token.to_string())
        .filter(|token| !token.is_empty())
}

pub fn session_cookie(token: &str) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax",
        SESSION_COOKIE, token
    )
}

pub fn expired_session_cookie() -> String {
    format!(
        "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
        SESSION_COOKIE
    )
}
