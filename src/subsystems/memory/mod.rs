//! Memory subsystem — per-session transcripts and the shared chat log.
//!
//! Two independent stores:
//!
//! - [`SessionStore`] — session id → ordered `{user, bot}` entries. Always
//!   held in memory; optionally written through to disk so transcripts
//!   survive a restart.
//! - [`ChatLog`] — a single append-only plaintext file shared by every
//!   session and channel.
//!
//! ```text
//! {session_dir}/
//! ├── 3f1c…-….json      [{"user": "...", "bot": "..."}, …]
//! └── …
//! {chat_log}            You: …\nBot: …\n\n  (appended per exchange)
//! ```

pub mod chat_log;
pub mod session_store;

pub use chat_log::ChatLog;
pub use session_store::SessionStore;

use serde::{Deserialize, Serialize};

/// One user/bot exchange in a session transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub user: String,
    pub bot: String,
}

impl TranscriptEntry {
    pub fn new(user: impl Into<String>, bot: impl Into<String>) -> Self {
        Self { user: user.into(), bot: bot.into() }
    }
}
