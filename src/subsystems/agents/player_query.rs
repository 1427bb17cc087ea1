//! Player question resolver.
//!
//! [`plan`] turns an utterance into either an LLM hand-off or a roster
//! lookup. Names are pulled out with fixed phrase templates by substring
//! removal, not by tokenizing; a player whose name contains a template
//! keyword ("is", "did", "play") can misparse, and template order is the
//! only precedence.

use thiserror::Error;

use super::intent::strip_ai_prefix;
use super::roster::{PlayerRecord, Roster};

const PREDICTIVE_KEYWORDS: &[&str] = &["predict", "prediction", "future", "next season", "upcoming"];
const PREDICTIVE_FRAMING: &str = "Based on basketball knowledge and current trends, ";

/// A question the roster could not answer. `Display` is the user-facing text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryMiss {
    #[error("I couldn't understand which player you're asking about. Please include a player's name in your question.")]
    NotUnderstood,
    #[error("I couldn't find any information about {0}. Please check the spelling or try a different player name.")]
    NotFound(String),
}

/// Which fact the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    Team,
    Career,
    Status,
    OtherLeagues,
    Everything,
}

impl QuestionKind {
    /// Ordered checks on the lower-cased utterance. Deliberately looser than
    /// the name templates: "what team did X play" (no "for") still asks for a team.
    pub fn classify(lower: &str) -> Self {
        if lower.contains("what team did") || lower.contains("which team did") {
            QuestionKind::Team
        } else if lower.contains("when did") {
            QuestionKind::Career
        } else if lower.contains("is") && lower.contains("active") {
            QuestionKind::Status
        } else if lower.contains("did") && lower.contains("play in other leagues") {
            QuestionKind::OtherLeagues
        } else {
            QuestionKind::Everything
        }
    }

    pub fn render(self, player: &PlayerRecord) -> String {
        let name = player.display_name();
        match self {
            QuestionKind::Team => format!("{name} played for the {}.", player.team()),
            QuestionKind::Career => format!("{name} played from {}.", player.career()),
            QuestionKind::Status => format!("{name} is {}.", player.status()),
            QuestionKind::OtherLeagues => {
                format!("{name} {}.", player.other_leagues().to_lowercase())
            }
            QuestionKind::Everything => player.summary(),
        }
    }
}

/// What to do with a player-directed utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    /// Forward this prompt to the LLM delegate.
    Delegate(String),
    /// Look `name` up in the roster and answer `kind`.
    Lookup { name: String, kind: QuestionKind },
}

// ── Name templates ────────────────────────────────────────────────────────────

enum Extract {
    /// Text between the end of the first keyword and the start of the second.
    Between(&'static str, &'static str),
    /// The whole utterance with every occurrence of each keyword removed.
    Remove(&'static [&'static str]),
}

struct Template {
    requires: &'static [&'static str],
    extract: Extract,
}

const TEMPLATES: &[Template] = &[
    Template {
        requires: &["what team did", "play for"],
        extract: Extract::Between("what team did", "play for"),
    },
    Template {
        requires: &["which team did", "play for"],
        extract: Extract::Between("which team did", "play for"),
    },
    Template {
        requires: &["when did", "play"],
        extract: Extract::Remove(&["when did", "play"]),
    },
    Template {
        requires: &["is", "active"],
        extract: Extract::Remove(&["is", "active"]),
    },
    Template {
        requires: &["did", "play in other leagues"],
        extract: Extract::Remove(&["did", "play in other leagues"]),
    },
    Template {
        requires: &["tell me everything about"],
        extract: Extract::Remove(&["tell me everything about"]),
    },
];

impl Extract {
    fn apply(&self, lower: &str) -> String {
        match self {
            Extract::Between(start, end) => {
                let from = lower.find(start).map(|i| i + start.len());
                let to = lower.find(end);
                match (from, to) {
                    (Some(from), Some(to)) if from <= to => lower[from..to].trim().to_string(),
                    _ => String::new(),
                }
            }
            Extract::Remove(words) => words
                .iter()
                .fold(lower.to_string(), |acc, w| acc.replace(w, ""))
                .trim()
                .to_string(),
        }
    }
}

/// Candidate player name from the lower-cased utterance, if any.
pub fn extract_name(lower: &str) -> Option<String> {
    let name = match TEMPLATES
        .iter()
        .find(|t| t.requires.iter().all(|kw| lower.contains(kw)))
    {
        Some(template) => template.extract.apply(lower),
        None if lower.split_whitespace().count() >= 2 => lower.trim().to_string(),
        None => String::new(),
    };
    (!name.is_empty()).then_some(name)
}

// ── Planning & answering ──────────────────────────────────────────────────────

/// Decide how to handle `utterance`.
pub fn plan(utterance: &str) -> Result<Plan, QueryMiss> {
    let trimmed = utterance.trim();
    if let Some(rest) = strip_ai_prefix(trimmed) {
        return Ok(Plan::Delegate(rest.to_string()));
    }

    let lower = trimmed.to_lowercase();
    if PREDICTIVE_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
        return Ok(Plan::Delegate(format!("{PREDICTIVE_FRAMING}{trimmed}")));
    }

    let name = extract_name(&lower).ok_or(QueryMiss::NotUnderstood)?;
    Ok(Plan::Lookup { name, kind: QuestionKind::classify(&lower) })
}

/// Answer a lookup plan against the roster.
pub fn answer_lookup(roster: &Roster, name: &str, kind: QuestionKind) -> Result<String, QueryMiss> {
    roster
        .find_by_name(name)
        .map(|player| kind.render(player))
        .ok_or_else(|| QueryMiss::NotFound(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Roster {
        Roster::parse(
            "DISPLAY_FIRST_LAST,TEAM_CITY,TEAM_NAME,FROM_YEAR,TO_YEAR,ROSTERSTATUS,OTHERLEAGUE_EXPERIENCE_CH\n\
             LeBron James,Los Angeles,Lakers,2003,2024,1,00\n\
             Kobe Bryant,,,1996,2015,0,00\n\
             Nikola Jokic,Denver,Nuggets,2015,2024,1,01\n",
        )
        .unwrap()
    }

    fn lookup(utterance: &str) -> Result<String, QueryMiss> {
        match plan(utterance)? {
            Plan::Lookup { name, kind } => answer_lookup(&roster(), &name, kind),
            Plan::Delegate(p) => panic!("unexpected delegate: {p}"),
        }
    }

    #[test]
    fn sentinel_texts() {
        assert!(QueryMiss::NotUnderstood.to_string().starts_with("I couldn't understand"));
        assert_eq!(
            QueryMiss::NotFound("zion".into()).to_string(),
            "I couldn't find any information about zion. Please check the spelling or try a different player name."
        );
    }

    #[test]
    fn ai_prefix_delegates_remainder() {
        assert_eq!(plan("ai: Who is the GOAT?").unwrap(), Plan::Delegate("Who is the GOAT?".into()));
    }

    #[test]
    fn predictive_keywords_delegate_with_framing() {
        assert_eq!(
            plan("Predict the MVP").unwrap(),
            Plan::Delegate("Based on basketball knowledge and current trends, Predict the MVP".into())
        );
        assert!(matches!(plan("who wins next season").unwrap(), Plan::Delegate(_)));
    }

    #[test]
    fn what_team_template() {
        assert_eq!(
            plan("What team did LeBron James play for?").unwrap(),
            Plan::Lookup { name: "lebron james".into(), kind: QuestionKind::Team }
        );
        assert_eq!(
            lookup("what team did lebron james play for").unwrap(),
            "LeBron James played for the Los Angeles Lakers."
        );
    }

    #[test]
    fn inverted_between_yields_no_name() {
        assert_eq!(plan("play for what team did").unwrap_err(), QueryMiss::NotUnderstood);
    }

    #[test]
    fn career_template() {
        assert_eq!(lookup("when did kobe bryant play").unwrap(), "Kobe Bryant played from 1996 to 2015.");
    }

    #[test]
    fn status_template_strips_every_is() {
        assert_eq!(lookup("is nikola jokic active").unwrap(), "Nikola Jokic is Active.");
        // "chris" loses its "is" too
        assert_eq!(extract_name("is chris paul active").as_deref(), Some("chr paul"));
    }

    #[test]
    fn other_leagues_template() {
        assert_eq!(
            lookup("did nikola jokic play in other leagues").unwrap(),
            "Nikola Jokic has experience in other leagues."
        );
    }

    #[test]
    fn everything_template_and_bare_name() {
        let expected = "Name: Kobe Bryant | Career: 1996 to 2015 | Team: an unknown team | Current Status: Inactive | No experience in other leagues";
        assert_eq!(lookup("tell me everything about kobe bryant").unwrap(), expected);
        assert_eq!(lookup("Kobe Bryant").unwrap(), expected);
    }

    #[test]
    fn single_word_without_template_is_not_understood() {
        assert_eq!(plan("kobe").unwrap_err(), QueryMiss::NotUnderstood);
        assert_eq!(plan("").unwrap_err(), QueryMiss::NotUnderstood);
    }

    #[test]
    fn unknown_player_is_not_found() {
        assert_eq!(
            lookup("what team did zion williamson play for").unwrap_err(),
            QueryMiss::NotFound("zion williamson".into())
        );
    }

    #[test]
    fn question_kind_is_looser_than_templates() {
        assert_eq!(QuestionKind::classify("what team did kobe bryant play"), QuestionKind::Team);
        assert_eq!(QuestionKind::classify("lebron james"), QuestionKind::Everything);
    }
}
