//! Intent routing — an ordered rule table over the normalized utterance.
//!
//! Rules are checked top to bottom and the first match wins. Keywords match
//! as plain substrings, so "hi" also fires inside "which" or "this". That
//! imprecision is long-standing behaviour and is kept as-is.

/// What the assistant should do with an utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// `ai:` prefix: hand the remainder straight to the LLM.
    Delegate,
    Champion,
    Greeting,
    SmallTalk,
    Farewell,
    /// Nothing matched; try the player resolver, then the fallback text.
    Player,
}

pub const AI_PREFIX: &str = "ai:";

pub const GREETING_REPLY: &str = "Hey there! I'm your basketball knowledge assistant. Ask me about players, their teams, or get predictions about upcoming games and seasons!";
pub const SMALL_TALK_REPLY: &str = "I'm great, thanks for asking! Ready to talk basketball!";
pub const FAREWELL_REPLY: &str = "Goodbye! Come back anytime to talk basketball!";
pub const FALLBACK_REPLY: &str = "I'm not sure how to answer that. Try asking about a specific player's team, career years, active status, or get predictions about upcoming games!";

enum Trigger {
    Prefix(&'static str),
    AnyOf(&'static [&'static str]),
}

impl Trigger {
    fn matches(&self, text: &str) -> bool {
        match self {
            Trigger::Prefix(p) => text.starts_with(p),
            Trigger::AnyOf(words) => words.iter().any(|w| text.contains(w)),
        }
    }
}

struct Rule {
    trigger: Trigger,
    intent: Intent,
}

const RULES: &[Rule] = &[
    Rule { trigger: Trigger::Prefix(AI_PREFIX), intent: Intent::Delegate },
    Rule { trigger: Trigger::AnyOf(&["nba champion", "who won"]), intent: Intent::Champion },
    Rule { trigger: Trigger::AnyOf(&["hello", "hi", "hey"]), intent: Intent::Greeting },
    Rule {
        trigger: Trigger::AnyOf(&["how are you", "how's it going", "how you doing"]),
        intent: Intent::SmallTalk,
    },
    Rule { trigger: Trigger::AnyOf(&["bye", "goodbye"]), intent: Intent::Farewell },
];

/// Lower-case and trim. Every rule is evaluated against this form.
pub fn normalize(utterance: &str) -> String {
    utterance.trim().to_lowercase()
}

/// Classify an already-normalized utterance.
pub fn classify(normalized: &str) -> Intent {
    RULES
        .iter()
        .find(|rule| rule.trigger.matches(normalized))
        .map(|rule| rule.intent)
        .unwrap_or(Intent::Player)
}

/// Strip a case-insensitive `ai:` prefix, returning the trimmed remainder.
pub fn strip_ai_prefix(utterance: &str) -> Option<&str> {
    let trimmed = utterance.trim_start();
    let head = trimmed.get(..AI_PREFIX.len())?;
    head.eq_ignore_ascii_case(AI_PREFIX)
        .then(|| trimmed[AI_PREFIX.len()..].trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intent_of(s: &str) -> Intent {
        classify(&normalize(s))
    }

    #[test]
    fn greetings() {
        for s in ["Hello!", "hi", "  HEY there  "] {
            assert_eq!(intent_of(s), Intent::Greeting, "{s}");
        }
    }

    #[test]
    fn champion_beats_greeting() {
        assert_eq!(intent_of("Hi, who won in 2023?"), Intent::Champion);
        assert_eq!(intent_of("NBA champions"), Intent::Champion);
    }

    #[test]
    fn ai_prefix_beats_everything() {
        assert_eq!(intent_of("ai: hello, who won the nba championship?"), Intent::Delegate);
        assert_eq!(intent_of("  AI: hey"), Intent::Delegate);
    }

    #[test]
    fn substring_matching_is_not_word_based() {
        // "which" contains "hi"
        assert_eq!(intent_of("which team did lebron james play for"), Intent::Greeting);
    }

    #[test]
    fn small_talk_and_farewell() {
        assert_eq!(intent_of("how are you"), Intent::SmallTalk);
        assert_eq!(intent_of("how's it going"), Intent::SmallTalk);
        assert_eq!(intent_of("goodbye"), Intent::Farewell);
        assert_eq!(intent_of("bye now"), Intent::Farewell);
    }

    #[test]
    fn everything_else_goes_to_player_lookup() {
        assert_eq!(intent_of("lebron james"), Intent::Player);
        assert_eq!(intent_of("when did kobe bryant play"), Intent::Player);
        assert_eq!(intent_of(""), Intent::Player);
    }

    #[test]
    fn strip_prefix_keeps_original_case() {
        assert_eq!(strip_ai_prefix("AI:  Who is the GOAT? "), Some("Who is the GOAT?"));
        assert_eq!(strip_ai_prefix("ai:"), Some(""));
        assert_eq!(strip_ai_prefix("tell me about ai: stuff"), None);
        assert_eq!(strip_ai_prefix("a"), None);
    }
}
