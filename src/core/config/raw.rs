//! Raw TOML shape — `serde` target before resolution.
//!
//! Every section is optional; missing keys fall back to the `default_*`
//! functions below, which are also the built-in defaults used when no
//! config file exists at all.

use serde::Deserialize;

#[derive(Deserialize, Default)]
pub(super) struct RawConfig {
    #[serde(default)]
    pub supervisor: RawSupervisor,
    #[serde(default)]
    pub roster: RawRoster,
    #[serde(default)]
    pub comms: RawComms,
    #[serde(default)]
    pub memory: RawMemory,
    #[serde(default)]
    pub llm: RawLlm,
}

#[derive(Deserialize)]
pub(super) struct RawSupervisor {
    #[serde(default = "default_bot_name")]
    pub bot_name: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_file: Option<String>,
}

impl Default for RawSupervisor {
    fn default() -> Self {
        Self {
            bot_name: default_bot_name(),
            log_level: default_log_level(),
            log_file: None,
        }
    }
}

#[derive(Deserialize)]
pub(super) struct RawRoster {
    #[serde(default = "default_roster_path")]
    pub path: String,
}

impl Default for RawRoster {
    fn default() -> Self {
        Self { path: default_roster_path() }
    }
}

#[derive(Deserialize, Default)]
pub(super) struct RawComms {
    #[serde(default)]
    pub http: RawHttp,
}

#[derive(Deserialize)]
pub(super) struct RawHttp {
    #[serde(default = "default_http_bind")]
    pub bind: String,
}

impl Default for RawHttp {
    fn default() -> Self {
        Self { bind: default_http_bind() }
    }
}

#[derive(Deserialize)]
pub(super) struct RawMemory {
    #[serde(default = "default_chat_log")]
    pub chat_log: String,
    #[serde(default)]
    pub session_dir: Option<String>,
    #[serde(default)]
    pub transcript_cap: Option<usize>,
}

impl Default for RawMemory {
    fn default() -> Self {
        Self {
            chat_log: default_chat_log(),
            session_dir: None,
            transcript_cap: None,
        }
    }
}

#[derive(Deserialize)]
pub(super) struct RawLlm {
    /// Maps to `default = "..."` in `[llm]`.
    #[serde(rename = "default", default = "default_llm_provider")]
    pub provider: String,
    #[serde(default)]
    pub openai: RawOpenAiConfig,
}

impl Default for RawLlm {
    fn default() -> Self {
        Self { provider: default_llm_provider(), openai: RawOpenAiConfig::default() }
    }
}

#[derive(Deserialize)]
pub(super) struct RawOpenAiConfig {
    #[serde(default = "default_openai_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_openai_model")]
    pub model: String,
    #[serde(default = "default_openai_temperature")]
    pub temperature: f32,
    #[serde(default = "default_openai_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_openai_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for RawOpenAiConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_openai_api_base_url(),
            model: default_openai_model(),
            temperature: default_openai_temperature(),
            max_tokens: default_openai_max_tokens(),
            timeout_seconds: default_openai_timeout_seconds(),
        }
    }
}

fn default_bot_name() -> String { "courtside".to_string() }
fn default_log_level() -> String { "info".to_string() }
fn default_roster_path() -> String { "data/NBA-playerlist.csv".to_string() }
pub(super) fn default_http_bind() -> String { "127.0.0.1:5000".to_string() }
fn default_chat_log() -> String { "chat_history.txt".to_string() }
fn default_llm_provider() -> String { "openai".to_string() }
fn default_openai_api_base_url() -> String { "https://api.openai.com/v1/chat/completions".to_string() }
fn default_openai_model() -> String { "gpt-4".to_string() }
fn default_openai_temperature() -> f32 { 0.7 }
fn default_openai_max_tokens() -> u32 { 150 }
fn default_openai_timeout_seconds() -> u64 { 60 }
