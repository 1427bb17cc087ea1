//! Signed session cookie.
//!
//! Value format: `{uuid}.{sig}` where `sig` is the first 32 hex chars of
//! `sha256("{secret}:{uuid}")`. A cookie that fails to parse or verify is
//! treated as absent, which starts a fresh session.

use std::sync::Arc;

use axum::http::{HeaderMap, header};
use sha2::{Digest, Sha256};
use tracing::{debug, warn};
use uuid::Uuid;

pub const COOKIE_NAME: &str = "courtside_session";

/// Used when `SECRET_KEY` is unset. Fine for local use only.
pub const DEV_SECRET: &str = "courtside-dev-secret-change-me";

const SIG_LEN: usize = 32;

#[derive(Clone)]
pub struct SessionCookies {
    secret: Arc<str>,
}

impl SessionCookies {
    pub fn new(secret: &str) -> Self {
        Self { secret: Arc::from(secret) }
    }

    /// Use `secret` when provided, otherwise fall back to [`DEV_SECRET`] with a warning.
    pub fn from_secret(secret: Option<&str>) -> Self {
        match secret.filter(|s| !s.is_empty()) {
            Some(secret) => Self::new(secret),
            None => {
                warn!("SECRET_KEY not set; session cookies are signed with the development default");
                Self::new(DEV_SECRET)
            }
        }
    }

    /// Issue a new random session id.
    pub fn new_session_id() -> String {
        Uuid::new_v4().to_string()
    }

    fn sign(&self, session_id: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.secret.as_bytes());
        hasher.update(b":");
        hasher.update(session_id.as_bytes());
        let mut sig = hex::encode(hasher.finalize());
        sig.truncate(SIG_LEN);
        sig
    }

    /// Cookie value for `session_id`.
    pub fn encode(&self, session_id: &str) -> String {
        format!("{session_id}.{}", self.sign(session_id))
    }

    /// Verify a cookie value and return the session id it carries.
    pub fn decode(&self, value: &str) -> Option<String> {
        let (id, sig) = value.split_once('.')?;
        Uuid::parse_str(id).ok()?;
        if self.sign(id) == sig {
            Some(id.to_string())
        } else {
            debug!("session cookie signature mismatch");
            None
        }
    }

    /// Verified session id from the request's `Cookie` headers, if any.
    pub fn session_from_headers(&self, headers: &HeaderMap) -> Option<String> {
        headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(|v| v.split(';'))
            .filter_map(|pair| pair.trim().strip_prefix(COOKIE_NAME)?.strip_prefix('='))
            .find_map(|value| self.decode(value))
    }

    /// `Set-Cookie` header value for `session_id`.
    pub fn set_cookie(&self, session_id: &str) -> String {
        format!("{COOKIE_NAME}={}; HttpOnly; Path=/; SameSite=Lax", self.encode(session_id))
    }
}
