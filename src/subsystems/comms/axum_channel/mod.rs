//! Axum-based HTTP channel — the web chat front.
//!
//! Implements [`Component`] so it slots into the comms subsystem lifecycle:
//! `run()` drives the axum event loop and the shared [`CancellationToken`]
//! is wired to axum's graceful shutdown.
//!
//! ## URL layout
//!
//! ```text
//! GET  /               → chat page
//! GET  /favicon.ico    → 204
//! GET  /history        → this session's transcript (JSON array)
//! POST /get_response   → {"message": "..."} ⇒ {"response": "..."}
//! ```
//!
//! Sessions are keyed by a signed cookie; see [`session`].

mod api;
pub mod session;
mod ui;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::error::AppError;
use crate::subsystems::runtime::{Component, ComponentFuture};

use super::state::CommsState;
use self::session::SessionCookies;

// ── Shared request state ──────────────────────────────────────────────────────

/// Axum router state injected into every handler via [`axum::extract::State`].
///
/// Cheap to clone — all fields are reference-counted.
#[derive(Clone)]
pub(crate) struct AxumState {
    /// Channel identifier used in log fields.
    pub channel_id: Arc<str>,
    /// Comms subsystem capabilities (message routing, history).
    pub comms: Arc<CommsState>,
    pub cookies: SessionCookies,
}

// ── AxumChannel ───────────────────────────────────────────────────────────────

pub struct AxumChannel {
    channel_id: String,
    bind_addr: String,
    state: Arc<CommsState>,
    cookies: SessionCookies,
}

impl AxumChannel {
    pub fn new(
        channel_id: impl Into<String>,
        bind_addr: impl Into<String>,
        state: Arc<CommsState>,
        cookies: SessionCookies,
    ) -> Self {
        Self {
            channel_id: channel_id.into(),
            bind_addr: bind_addr.into(),
            state,
            cookies,
        }
    }
}

impl Component for AxumChannel {
    fn id(&self) -> &str {
        &self.channel_id
    }

    fn run(self: Box<Self>, shutdown: CancellationToken) -> ComponentFuture {
        Box::pin(run_axum(
            self.channel_id,
            self.bind_addr,
            self.state,
            self.cookies,
            shutdown,
        ))
    }
}

// ── Server loop ───────────────────────────────────────────────────────────────

async fn run_axum(
    channel_id: String,
    bind_addr: String,
    comms: Arc<CommsState>,
    cookies: SessionCookies,
    shutdown: CancellationToken,
) -> Result<(), AppError> {
    let router = router(&channel_id, comms, cookies);

    let listener = TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| AppError::Comms(format!("axum bind failed on {bind_addr}: {e}")))?;

    info!(%channel_id, %bind_addr, "axum channel listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|e| AppError::Comms(format!("axum server error: {e}")))?;

    info!(%channel_id, "axum channel shut down");
    Ok(())
}

// ── Router ────────────────────────────────────────────────────────────────────

/// Build the chat router. Public so it can be driven in-process by tests.
pub fn router(channel_id: &str, comms: Arc<CommsState>, cookies: SessionCookies) -> Router {
    let state = AxumState {
        channel_id: Arc::from(channel_id),
        comms,
        cookies,
    };

    Router::new()
        .route("/",             get(ui::root))
        .route("/favicon.ico",  get(ui::favicon))
        .route("/history",      get(api::history))
        .route("/get_response", post(api::get_response))
        .with_state(state)
}
