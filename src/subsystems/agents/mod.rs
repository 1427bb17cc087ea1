//! Agents subsystem — the basketball assistant.
//!
//! [`Assistant`] owns the read-only roster and the LLM delegate and turns a
//! free-text utterance into a reply:
//!
//! ```text
//! utterance ─► intent::classify ─┬─ Delegate  ─► LlmDelegate
//!                                ├─ Champion  ─► champions::answer
//!                                ├─ Greeting / SmallTalk / Farewell ─► fixed text
//!                                └─ Player    ─► player_query::plan
//!                                                 ├─ Delegate ─► LlmDelegate
//!                                                 └─ Lookup   ─► Roster ─► answer | fallback
//! ```
//!
//! The assistant holds no mutable state; share it as `Arc<Assistant>`.

pub mod champions;
pub mod delegate;
pub mod intent;
pub mod player_query;
pub mod roster;

use tracing::debug;

use crate::llm::LlmProvider;

use self::delegate::LlmDelegate;
use self::intent::Intent;
use self::player_query::{Plan, QueryMiss};
use self::roster::Roster;

pub struct Assistant {
    roster: Roster,
    delegate: LlmDelegate,
}

impl Assistant {
    pub fn new(roster: Roster, provider: LlmProvider) -> Self {
        let delegate = LlmDelegate::new(provider, &roster);
        Self { roster, delegate }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Produce the reply for one user utterance.
    pub async fn route(&self, utterance: &str) -> String {
        let normalized = intent::normalize(utterance);
        let intent = intent::classify(&normalized);
        debug!(?intent, "utterance classified");

        match intent {
            Intent::Delegate => {
                let prompt = intent::strip_ai_prefix(utterance).unwrap_or(normalized.as_str());
                self.delegate.complete(prompt).await
            }
            Intent::Champion => champions::answer(&normalized),
            Intent::Greeting => intent::GREETING_REPLY.to_string(),
            Intent::SmallTalk => intent::SMALL_TALK_REPLY.to_string(),
            Intent::Farewell => intent::FAREWELL_REPLY.to_string(),
            Intent::Player => match self.resolve(utterance).await {
                Ok(reply) => reply,
                Err(miss) => {
                    debug!(%miss, "player resolver missed");
                    intent::FALLBACK_REPLY.to_string()
                }
            },
        }
    }

    /// Player resolver with typed misses.
    pub async fn resolve(&self, utterance: &str) -> Result<String, QueryMiss> {
        match player_query::plan(utterance)? {
            Plan::Delegate(prompt) => Ok(self.delegate.complete(&prompt).await),
            Plan::Lookup { name, kind } => {
                debug!(%name, ?kind, "roster lookup");
                player_query::answer_lookup(&self.roster, &name, kind)
            }
        }
    }

    /// Player resolver rendered as text; misses become their sentinel messages.
    pub async fn answer(&self, utterance: &str) -> String {
        self.resolve(utterance)
            .await
            .unwrap_or_else(|miss| miss.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::providers::dummy::DummyProvider;

    fn assistant() -> Assistant {
        let roster = Roster::parse(
            "DISPLAY_FIRST_LAST,TEAM_CITY,TEAM_NAME,FROM_YEAR,TO_YEAR,ROSTERSTATUS,OTHERLEAGUE_EXPERIENCE_CH\n\
             LeBron James,Los Angeles,Lakers,2003,2024,1,00\n\
             Tim Duncan,San Antonio,Spurs,1997,2015,0,00\n",
        )
        .unwrap();
        Assistant::new(roster, LlmProvider::Dummy(DummyProvider))
    }

    #[tokio::test]
    async fn greeting() {
        assert_eq!(assistant().route("Hello there").await, intent::GREETING_REPLY);
    }

    #[tokio::test]
    async fn champion_year() {
        assert_eq!(
            assistant().route("Who won in 2023?").await,
            "The NBA champion in 2023 was the Denver Nuggets."
        );
    }

    #[tokio::test]
    async fn champion_listing() {
        let reply = assistant().route("nba champions").await;
        for year in ["2022", "2023", "2024"] {
            assert!(reply.contains(year), "{reply}");
        }
    }

    #[tokio::test]
    async fn ai_prefix_reaches_delegate_even_with_greeting() {
        assert_eq!(assistant().route("ai: Hello, what is a triple-double?").await, "[echo] Hello, what is a triple-double?");
    }

    #[tokio::test]
    async fn predictive_goes_through_resolver_to_delegate() {
        assert_eq!(
            assistant().route("Predict the 2025 MVP").await,
            "[echo] Based on basketball knowledge and current trends, Predict the 2025 MVP"
        );
    }

    #[tokio::test]
    async fn player_lookup() {
        assert_eq!(
            assistant().route("When did Tim Duncan play").await,
            "Tim Duncan played from 1997 to 2015."
        );
        assert!(assistant().route("LeBron James").await.starts_with("Name: LeBron James | Career: 2003 to 2024"));
    }

    #[tokio::test]
    async fn misses_fall_back() {
        assert_eq!(assistant().route("tell me everything about zion williamson").await, intent::FALLBACK_REPLY);
        assert_eq!(assistant().route("basketball").await, intent::FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn answer_renders_sentinels() {
        let a = assistant();
        assert!(a.answer("basketball").await.starts_with("I couldn't understand"));
        assert!(a.answer("tell me everything about zion").await.starts_with("I couldn't find any information about zion."));
    }
}
