//! Shared state for the Comms subsystem — capability boundary for channels.
//!
//! Channels receive an `Arc<CommsState>` and are restricted to the typed
//! methods below. The assistant, session store and chat log are private;
//! channels cannot reach past [`CommsState::send_message`] and
//! [`CommsState::history`].
//!
//! # Intra-subsystem events
//!
//! [`CommsState::report_event`] lets a running channel signal the comms
//! subsystem manager (e.g. "I shut down", "new session started"). The
//! manager owns the receiver end.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::error::AppError;
use crate::subsystems::agents::Assistant;
use crate::subsystems::memory::{ChatLog, SessionStore, TranscriptEntry};

// ── Events ────────────────────────────────────────────────────────────────────

/// Events a channel sends back to the comms subsystem manager.
#[derive(Debug)]
pub enum CommsEvent {
    /// Channel has stopped (clean exit, `quit` or EOF).
    ChannelShutdown { channel_id: String },
    /// A new session was issued on the channel.
    SessionStarted { channel_id: String, session_id: String },
}

// ── State ─────────────────────────────────────────────────────────────────────

/// Shared state passed as `Arc<CommsState>` to every channel task.
pub struct CommsState {
    assistant: Arc<Assistant>,
    sessions: Arc<SessionStore>,
    chat_log: ChatLog,
    /// Back-channel to the comms subsystem manager.
    event_tx: mpsc::Sender<CommsEvent>,
}

impl CommsState {
    pub fn new(
        assistant: Arc<Assistant>,
        sessions: Arc<SessionStore>,
        chat_log: ChatLog,
        event_tx: mpsc::Sender<CommsEvent>,
    ) -> Self {
        Self { assistant, sessions, chat_log, event_tx }
    }

    /// Route `content` from `channel_id` through the assistant and return the
    /// reply.
    ///
    /// Routing runs in its own task so a panic surfaces as an error instead
    /// of tearing down the channel. With a `session_id` the exchange is
    /// appended to that session's transcript; a transcript failure is an
    /// error. The chat log is written best-effort either way. File I/O runs
    /// on the blocking pool.
    pub async fn send_message(
        &self,
        channel_id: &str,
        session_id: Option<&str>,
        content: String,
    ) -> Result<String, AppError> {
        let assistant = self.assistant.clone();
        let input = content.clone();
        let reply = tokio::spawn(async move { assistant.route(&input).await })
            .await
            .map_err(|e| AppError::Comms(format!("routing task failed: {e}")))?;

        let sessions = self.sessions.clone();
        let chat_log = self.chat_log.clone();
        let session_id = session_id.map(str::to_string);
        let logged = reply.clone();
        tokio::task::spawn_blocking(move || {
            if let Some(session_id) = session_id {
                sessions.append(&session_id, TranscriptEntry::new(content.as_str(), logged.as_str()))?;
            }
            chat_log.record(&content, &logged);
            Ok::<_, AppError>(())
        })
        .await
        .map_err(|e| AppError::Memory(format!("transcript task failed: {e}")))??;

        debug!(channel_id, reply_len = reply.len(), "reply ready");
        Ok(reply)
    }

    /// Transcript of `session_id`, oldest first.
    pub async fn history(&self, session_id: &str) -> Result<Vec<TranscriptEntry>, AppError> {
        let sessions = self.sessions.clone();
        let session_id = session_id.to_string();
        tokio::task::spawn_blocking(move || sessions.history(&session_id))
            .await
            .map_err(|e| AppError::Memory(format!("history task failed: {e}")))?
    }

    /// Report an event to the comms subsystem manager.
    ///
    /// Non-blocking: drops the event and logs a warning if the manager is not
    /// keeping up (channel full) or has already exited (closed).
    pub fn report_event(&self, event: CommsEvent) {
        if let Err(e) = self.event_tx.try_send(event) {
            warn!("comms event dropped: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::LlmProvider;
    use crate::llm::providers::dummy::DummyProvider;
    use crate::subsystems::agents::intent;
    use crate::subsystems::agents::roster::Roster;
    use tempfile::TempDir;

    fn state(dir: &std::path::Path) -> (CommsState, mpsc::Receiver<CommsEvent>) {
        let assistant = Arc::new(Assistant::new(Roster::default(), LlmProvider::Dummy(DummyProvider)));
        let (tx, rx) = mpsc::channel(4);
        let state = CommsState::new(
            assistant,
            Arc::new(SessionStore::in_memory()),
            ChatLog::new(dir.join("chat_history.txt")),
            tx,
        );
        (state, rx)
    }

    #[tokio::test]
    async fn send_message_records_transcript_and_log() {
        let tmp = TempDir::new().unwrap();
        let (state, _rx) = state(tmp.path());
        let sid = uuid::Uuid::new_v4().to_string();

        let reply = state.send_message("test", Some(&sid), "hello".into()).await.unwrap();
        assert_eq!(reply, intent::GREETING_REPLY);
        assert_eq!(state.history(&sid).await.unwrap(), vec![TranscriptEntry::new("hello", reply.as_str())]);

        let log = std::fs::read_to_string(tmp.path().join("chat_history.txt")).unwrap();
        assert_eq!(log, format!("You: hello\nBot: {reply}\n\n"));
    }

    #[tokio::test]
    async fn without_session_only_the_log_is_written() {
        let tmp = TempDir::new().unwrap();
        let (state, _rx) = state(tmp.path());
        state.send_message("console", None, "bye".into()).await.unwrap();
        assert!(tmp.path().join("chat_history.txt").exists());
    }

    #[tokio::test]
    async fn bad_session_id_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let (state, _rx) = state(tmp.path());
        let err = state.send_message("test", Some("nope"), "hi".into()).await.unwrap_err();
        assert!(matches!(err, AppError::Memory(_)));
    }

    #[tokio::test]
    async fn events_reach_the_manager() {
        let tmp = TempDir::new().unwrap();
        let (state, mut rx) = state(tmp.path());
        state.report_event(CommsEvent::ChannelShutdown { channel_id: "pty0".into() });
        assert!(matches!(rx.recv().await, Some(CommsEvent::ChannelShutdown { .. })));
    }
}
