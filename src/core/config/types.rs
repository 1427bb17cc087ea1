//! Resolved configuration types — what the rest of the crate consumes.

use std::path::PathBuf;

/// HTTP channel configuration.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Socket address to bind the axum listener to.
    pub bind: String,
}

/// Comms subsystem configuration.
#[derive(Debug, Clone)]
pub struct CommsConfig {
    pub http: HttpConfig,
}

/// Roster dataset location.
#[derive(Debug, Clone)]
pub struct RosterConfig {
    /// CSV file with one row per player (already expanded, no `~`).
    pub path: PathBuf,
}

/// Session transcript and chat log settings.
#[derive(Debug, Clone)]
pub struct MemoryConfig {
    /// Shared append-only plaintext transcript log.
    pub chat_log: PathBuf,
    /// When set, session transcripts are written through to `{dir}/{id}.json`.
    pub session_dir: Option<PathBuf>,
    /// Maximum entries kept per session transcript; `None` = unbounded.
    pub transcript_cap: Option<usize>,
}

/// OpenAI / OpenAI-compatible provider configuration.
/// Populated from `[llm.openai]` in the TOML.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// Full chat completions endpoint URL.
    pub api_base_url: String,
    /// Model name passed in the request body.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Response length cap sent as `max_tokens`.
    pub max_tokens: u32,
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
}

/// LLM subsystem configuration.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Which provider is active (`"openai"`, `"openai-compatible"`, `"dummy"`).
    pub provider: String,
    pub openai: OpenAiConfig,
}

/// Fully-resolved application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub bot_name: String,
    pub log_level: String,
    /// Optional log file; logs always go to stderr as well.
    pub log_file: Option<PathBuf>,
    pub roster: RosterConfig,
    pub comms: CommsConfig,
    pub memory: MemoryConfig,
    pub llm: LlmConfig,
    /// API key from `LLM_API_KEY` (or `OPENAI_API_KEY`). Never sourced from TOML.
    pub llm_api_key: Option<String>,
    /// Cookie signing secret from `SECRET_KEY`. Never sourced from TOML.
    pub session_secret: Option<String>,
}
