//! LLM delegate — open-ended and predictive questions.
//!
//! Builds the system instruction (persona, optional roster grounding,
//! optional champion table) and makes a single completion call. Provider
//! failures never escape: they are logged and replaced by [`DEGRADED_REPLY`].

use tracing::{debug, error};

use crate::llm::LlmProvider;

use super::champions;
use super::roster::Roster;

pub const DEGRADED_REPLY: &str = "I'm having trouble accessing my advanced features right now.";

const PERSONA: &str = "You are a knowledgeable basketball assistant. ";
const OWN_KNOWLEDGE: &str = "Use your own intelligence and knowledge of basketball trends and statistics. ";

pub struct LlmDelegate {
    provider: LlmProvider,
    /// Flattened `"name: team"` roster, computed once.
    roster_context: String,
}

impl LlmDelegate {
    pub fn new(provider: LlmProvider, roster: &Roster) -> Self {
        Self { provider, roster_context: roster.context_listing() }
    }

    /// Complete `prompt`, degrading to a fixed reply on any provider failure.
    pub async fn complete(&self, prompt: &str) -> String {
        let system = system_instruction(prompt, &self.roster_context);
        debug!(provider = self.provider.name(), system_len = system.len(), "delegating to llm");

        match self.provider.complete(prompt, Some(&system)).await {
            Ok(resp) => {
                if let Some(usage) = &resp.usage {
                    debug!(
                        input_tokens = usage.input_tokens,
                        output_tokens = usage.output_tokens,
                        "llm usage"
                    );
                }
                resp.text
            }
            Err(e) => {
                error!(error = %e, "llm completion failed");
                DEGRADED_REPLY.to_string()
            }
        }
    }
}

/// Assemble the system message for `prompt`.
pub fn system_instruction(prompt: &str, roster_context: &str) -> String {
    let lower = prompt.to_lowercase();
    let mut system = String::from(PERSONA);

    if lower.contains("use csv") {
        system.push_str("Use the following player data from the CSV file to answer questions accurately:\n");
        system.push_str(roster_context);
        system.push('\n');
    } else {
        system.push_str(OWN_KNOWLEDGE);
    }

    if lower.contains("nba champion") || lower.contains("who won") {
        system.push_str(&champions::heading());
        system.push('\n');
        system.push_str(&champions::listing());
        system.push('\n');
    }

    system
}
