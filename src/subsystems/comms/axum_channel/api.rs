//! Axum handlers for the chat API.
//!
//! Each handler receives [`AxumState`] via [`axum::extract::State`] and
//! returns an axum [`Response`]. Internal error detail is logged, never
//! sent to the client.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info, warn};

use crate::subsystems::comms::state::CommsEvent;

use super::AxumState;
use super::session::SessionCookies;

// ── Request types ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub(super) struct MessageRequest {
    #[serde(default)]
    message: Option<String>,
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn no_message() -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": "No message provided" }))).into_response()
}

fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "An internal error occurred" })),
    )
        .into_response()
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// POST /get_response
pub(super) async fn get_response(
    State(state): State<AxumState>,
    headers: HeaderMap,
    body: Result<Json<MessageRequest>, JsonRejection>,
) -> Response {
    let message = match body {
        Ok(Json(MessageRequest { message: Some(m) })) if !m.is_empty() => m,
        Ok(_) => {
            warn!(channel_id = %state.channel_id, "request without message");
            return no_message();
        }
        Err(rejection) => {
            warn!(channel_id = %state.channel_id, error = %rejection.body_text(), "unreadable request body");
            return no_message();
        }
    };

    let (session_id, is_new) = match state.cookies.session_from_headers(&headers) {
        Some(id) => (id, false),
        None => (SessionCookies::new_session_id(), true),
    };

    info!(channel_id = %state.channel_id, %session_id, "message received");

    match state
        .comms
        .send_message(&state.channel_id, Some(&session_id), message)
        .await
    {
        Ok(reply) => {
            let mut resp = (StatusCode::OK, Json(json!({ "response": reply }))).into_response();
            if is_new {
                match HeaderValue::from_str(&state.cookies.set_cookie(&session_id)) {
                    Ok(value) => {
                        resp.headers_mut().insert(header::SET_COOKIE, value);
                    }
                    Err(e) => warn!("cannot encode session cookie: {e}"),
                }
                state.comms.report_event(CommsEvent::SessionStarted {
                    channel_id: state.channel_id.to_string(),
                    session_id,
                });
            }
            resp
        }
        Err(e) => {
            error!(channel_id = %state.channel_id, %session_id, "message handling failed: {e}");
            internal_error()
        }
    }
}

/// GET /history — this session's transcript, or `[]`.
pub(super) async fn history(State(state): State<AxumState>, headers: HeaderMap) -> Response {
    let Some(session_id) = state.cookies.session_from_headers(&headers) else {
        return (StatusCode::OK, Json(json!([]))).into_response();
    };

    match state.comms.history(&session_id).await {
        Ok(entries) => (StatusCode::OK, Json(entries)).into_response(),
        Err(e) => {
            error!(channel_id = %state.channel_id, %session_id, "history read failed: {e}");
            internal_error()
        }
    }
}
