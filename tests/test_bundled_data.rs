//! Checks against the shipped dataset and default config.

use std::path::Path;

use courtside::config::{self, EnvOverrides};
use courtside::llm::LlmProvider;
use courtside::llm::providers::dummy::DummyProvider;
use courtside::subsystems::agents::roster::Roster;
use courtside::subsystems::agents::{Assistant, intent};

const DATASET: &str = "data/NBA-playerlist.csv";

fn assistant() -> Assistant {
    Assistant::new(Roster::load(Path::new(DATASET)), LlmProvider::Dummy(DummyProvider))
}

#[test]
fn default_config_parses() {
    let cfg = config::load_from(Path::new("config/default.toml"), &EnvOverrides::default()).unwrap();
    assert_eq!(cfg.bot_name, "courtside");
    assert_eq!(cfg.roster.path, Path::new(DATASET));
    assert_eq!(cfg.comms.http.bind, "127.0.0.1:5000");
    assert_eq!(cfg.llm.provider, "openai");
    assert_eq!(cfg.llm.openai.model, "gpt-4");
    assert_eq!(cfg.llm.openai.max_tokens, 150);
    assert!(cfg.llm_api_key.is_none());
}

#[test]
fn dataset_loads_with_quoted_commas() {
    let roster = Roster::try_load(Path::new(DATASET)).unwrap();
    assert_eq!(roster.len(), 9);
    let lebron = roster.find_by_name("LeBron James").unwrap();
    assert_eq!(lebron.get("DISPLAY_LAST_COMMA_FIRST"), Some("James, LeBron"));
    assert_eq!(lebron.team(), "Los Angeles Lakers");
}

#[test]
fn exact_match_beats_substring_and_order_decides_ties() {
    let roster = Roster::load(Path::new(DATASET));
    assert_eq!(roster.find_by_name("james harden").unwrap().display_name(), "James Harden");
    // "james" is a substring of both; dataset order picks LeBron.
    assert_eq!(roster.find_by_name("james").unwrap().display_name(), "LeBron James");
}

#[tokio::test]
async fn player_questions_over_sample() {
    let a = assistant();
    assert_eq!(
        a.route("What team did Stephen Curry play for?").await,
        "Stephen Curry played for the Golden State Warriors."
    );
    assert_eq!(a.route("When did Michael Jordan play").await, "Michael Jordan played from 1984 to 2002.");
    assert_eq!(a.route("did dwight howard play in other leagues").await, "Dwight Howard has experience in other leagues.");
    assert_eq!(
        a.route("tell me everything about kobe bryant").await,
        "Name: Kobe Bryant | Career: 1996 to 2015 | Team: an unknown team | Current Status: Inactive | No experience in other leagues"
    );
}

#[tokio::test]
async fn rule_order_over_sample() {
    let a = assistant();
    assert_eq!(a.route("Hey!").await, intent::GREETING_REPLY);
    assert_eq!(a.route("how are you").await, intent::SMALL_TALK_REPLY);
    assert_eq!(a.route("Who won in 2024?").await, "The NBA champion in 2024 was the Boston Celtics.");
    assert_eq!(a.route("ai: who won in 2024?").await, "[echo] who won in 2024?");
    assert_eq!(a.route("what about zion williamson").await, intent::FALLBACK_REPLY);
}

#[test]
fn missing_dataset_gives_empty_roster() {
    let roster = Roster::load(Path::new("data/does-not-exist.csv"));
    assert!(roster.is_empty());
    assert!(roster.load_error().is_some());
}
