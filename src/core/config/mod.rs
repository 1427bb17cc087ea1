//! Configuration loading with env-var overrides.
//!
//! Reads `config/default.toml` relative to the current working directory
//! (or the `-f` path), then applies `COURTSIDE_LOG_LEVEL` and
//! `COURTSIDE_BIND`. Secrets (`LLM_API_KEY` / `OPENAI_API_KEY`,
//! `SECRET_KEY`) only ever come from the environment.
//!
//! # Module layout
//!
//! - **types** — resolved structs consumed by subsystems.
//! - **raw** — TOML deserialization types with serde defaults; private.
//! - **load** — `load`, `load_from`, `expand_home`.

mod load;
mod raw;
mod types;

pub use load::{EnvOverrides, expand_home, load, load_from};
pub use types::*;

// ── test helpers ──────────────────────────────────────────────────────────────

/// `Config` for unit tests: dummy LLM, no API keys, paths under `work_dir`.
#[cfg(test)]
impl Config {
    pub fn test_default(work_dir: &std::path::Path) -> Self {
        Self {
            bot_name: "test".into(),
            log_level: "info".into(),
            log_file: None,
            roster: RosterConfig {
                path: work_dir.join("players.csv"),
            },
            comms: CommsConfig {
                http: HttpConfig { bind: raw::default_http_bind() },
            },
            memory: MemoryConfig {
                chat_log: work_dir.join("chat_history.txt"),
                session_dir: None,
                transcript_cap: None,
            },
            llm: LlmConfig {
                provider: "dummy".into(),
                openai: OpenAiConfig {
                    api_base_url: "http://localhost:0/v1/chat/completions".into(),
                    model: "test-model".into(),
                    temperature: 0.0,
                    max_tokens: 16,
                    timeout_seconds: 1,
                },
            },
            llm_api_key: None,
            session_secret: Some("test-secret".into()),
        }
    }
}
