//! Comms subsystem — manages all external I/O channels.
//!
//! # Architecture
//!
//! Each channel (HTTP via axum, PTY console) implements
//! [`runtime::Component`] and is spawned as an independent concurrent task by
//! [`start`] via [`runtime::spawn_components`]. Channels capture their shared
//! [`Arc<CommsState>`] at construction time. No state is passed through the
//! generic `Component::run` signature.
//!
//! An intra-subsystem [`mpsc`] channel lets running channels signal the
//! comms manager (lifecycle events, session tracking). This is drained in a
//! short-lived background task that dies naturally when all channel senders
//! are dropped.
//!
//! # Starting
//!
//! [`start`] is synchronous. It returns a [`SubsystemHandle`] as soon as
//! the tasks are spawned. The caller decides when (or whether) to await it.
//!
//! [`runtime::Component`]: crate::subsystems::runtime::Component
//! [`runtime::spawn_components`]: crate::subsystems::runtime::spawn_components

#[cfg(feature = "channel-axum")]
pub mod axum_channel;
#[cfg(feature = "channel-pty")]
pub mod pty;
mod state;

pub use state::{CommsEvent, CommsState};

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::config::Config;
use crate::subsystems::agents::Assistant;
use crate::subsystems::memory::{ChatLog, SessionStore};
use crate::subsystems::runtime::{Component, SubsystemHandle, spawn_components};

/// Which front the process serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Web chat on `comms.http.bind`.
    Http,
    /// stdin/stdout console (`-i`).
    Console,
}

// ── start ───────────────────────────────────────────────────────────────────

/// Spawn the channel for `mode` and return a [`SubsystemHandle`].
///
/// If the channel exits with an error the shared `shutdown` token is
/// cancelled. The handle resolves when the channel has exited.
pub fn start(
    config: &Config,
    assistant: Arc<Assistant>,
    sessions: Arc<SessionStore>,
    mode: Mode,
    shutdown: CancellationToken,
) -> SubsystemHandle {
    // Intra-subsystem event channel: channels → manager.
    let (event_tx, event_rx) = mpsc::channel::<CommsEvent>(32);
    let chat_log = ChatLog::new(config.memory.chat_log.clone());
    let state = Arc::new(CommsState::new(assistant, sessions, chat_log, event_tx));

    let mut components: Vec<Box<dyn Component>> = Vec::new();

    match mode {
        #[cfg(feature = "channel-axum")]
        Mode::Http => {
            info!(bind = %config.comms.http.bind, "loading axum channel");
            let cookies = axum_channel::session::SessionCookies::from_secret(
                config.session_secret.as_deref(),
            );
            components.push(Box::new(axum_channel::AxumChannel::new(
                "http0",
                config.comms.http.bind.clone(),
                state.clone(),
                cookies,
            )));
        }
        #[cfg(feature = "channel-pty")]
        Mode::Console => {
            info!("loading pty channel");
            components.push(Box::new(pty::PtyChannel::new("pty0", state.clone())));
        }
        #[allow(unreachable_patterns)]
        other => info!(?other, "channel not compiled in"),
    }

    // Monitoring-only drain; ends once every channel (and its sender) is gone.
    drop(state);
    tokio::spawn(async move {
        let mut rx = event_rx;
        while let Some(event) = rx.recv().await {
            match event {
                CommsEvent::ChannelShutdown { ref channel_id } => {
                    debug!(channel_id, "channel reported shutdown");
                }
                CommsEvent::SessionStarted { ref channel_id, ref session_id } => {
                    info!(channel_id, session_id, "session started");
                }
            }
        }
    });

    spawn_components(components, shutdown)
}
