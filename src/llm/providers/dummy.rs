//! Dummy LLM provider — echoes input back prefixed with `[echo]`.
//! Used for offline runs and tests without a real API key.

use crate::llm::{LlmResponse, ProviderError};

#[derive(Debug, Clone)]
pub struct DummyProvider;

impl DummyProvider {
    pub async fn complete(&self, content: &str, _system: Option<&str>) -> Result<LlmResponse, ProviderError> {
        Ok(LlmResponse { text: format!("[echo] {content}"), usage: None })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn complete_prefixes_echo() {
        let p = DummyProvider;
        assert_eq!(p.complete("hello", None).await.unwrap().text, "[echo] hello");
    }

    #[tokio::test]
    async fn complete_ignores_system() {
        let p = DummyProvider;
        let resp = p.complete("", Some("be brief")).await.unwrap();
        assert_eq!(resp.text, "[echo] ");
        assert!(resp.usage.is_none());
    }
}
