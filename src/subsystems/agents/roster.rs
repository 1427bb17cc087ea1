//! Roster store — read-only player table loaded from a CSV file.
//!
//! The file has a header row; every row becomes a [`PlayerRecord`] keyed by
//! the (trimmed) header names. Quoted fields follow RFC 4180, so the
//! `"James, LeBron"` style columns in the NBA player list parse correctly.
//!
//! [`Roster::load`] never fails: a missing or malformed file produces an
//! empty roster, a `warn!`, and a [`Roster::load_error`] for diagnostics.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

// ── Column names ──────────────────────────────────────────────────────────────

pub const COL_DISPLAY_NAME: &str = "DISPLAY_FIRST_LAST";
pub const COL_TEAM_NAME: &str = "TEAM_NAME";
pub const COL_TEAM_CITY: &str = "TEAM_CITY";
pub const COL_FROM_YEAR: &str = "FROM_YEAR";
pub const COL_TO_YEAR: &str = "TO_YEAR";
pub const COL_ROSTER_STATUS: &str = "ROSTERSTATUS";
pub const COL_OTHER_LEAGUE: &str = "OTHERLEAGUE_EXPERIENCE_CH";

const UNKNOWN_TEAM: &str = "an unknown team";
const UNKNOWN_YEARS: &str = "unknown years";
const UNKNOWN: &str = "Unknown";

// ── Errors ────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unterminated quoted field starting on line {line}")]
    UnterminatedQuote { line: usize },
}

// ── PlayerRecord ──────────────────────────────────────────────────────────────

/// One dataset row: column name → trimmed value.
///
/// Rows shorter than the header get empty strings for the missing trailing
/// columns, so a column is only *absent* when the header lacks it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerRecord {
    fields: HashMap<String, String>,
}

impl PlayerRecord {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    /// Raw field value, `None` when the column does not exist.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    fn non_empty(&self, column: &str) -> Option<&str> {
        self.get(column).filter(|v| !v.is_empty())
    }

    pub fn display_name(&self) -> &str {
        self.get(COL_DISPLAY_NAME).unwrap_or_default()
    }

    /// `"{city} {name}"`, or just the name when the city is blank.
    pub fn team(&self) -> String {
        match (self.non_empty(COL_TEAM_NAME), self.non_empty(COL_TEAM_CITY)) {
            (Some(name), Some(city)) => format!("{city} {name}"),
            (Some(name), None) => name.to_string(),
            (None, _) => UNKNOWN_TEAM.to_string(),
        }
    }

    pub fn career(&self) -> String {
        match (self.non_empty(COL_FROM_YEAR), self.non_empty(COL_TO_YEAR)) {
            (Some(from), Some(to)) => format!("{from} to {to}"),
            _ => UNKNOWN_YEARS.to_string(),
        }
    }

    pub fn status(&self) -> &'static str {
        match self.get(COL_ROSTER_STATUS) {
            Some("1") => "Active",
            Some(_) => "Inactive",
            None => UNKNOWN,
        }
    }

    pub fn other_leagues(&self) -> &'static str {
        match self.get(COL_OTHER_LEAGUE) {
            Some(code) if !code.is_empty() && code != "00" => "Has experience in other leagues",
            Some(_) => "No experience in other leagues",
            None => UNKNOWN,
        }
    }

    /// Pipe-joined one-line profile used for "tell me everything" and bare-name queries.
    pub fn summary(&self) -> String {
        [
            format!("Name: {}", self.display_name()),
            format!("Career: {}", self.career()),
            format!("Team: {}", self.team()),
            format!("Current Status: {}", self.status()),
            self.other_leagues().to_string(),
        ]
        .join(" | ")
    }
}

// ── Roster ────────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct Roster {
    players: Vec<PlayerRecord>,
    load_error: Option<String>,
}

impl Roster {
    pub fn new(players: Vec<PlayerRecord>) -> Self {
        Self { players, load_error: None }
    }

    /// Load the roster from `path`, degrading to an empty roster on failure.
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(roster) => {
                info!(path = %path.display(), players = roster.len(), "roster loaded");
                roster
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "roster unavailable, continuing with an empty roster");
                Self { players: Vec::new(), load_error: Some(e.to_string()) }
            }
        }
    }

    pub fn try_load(path: &Path) -> Result<Self, RosterError> {
        let text = fs::read_to_string(path)
            .map_err(|source| RosterError::Read { path: path.to_path_buf(), source })?;
        Self::parse(&text)
    }

    /// Parse CSV text with a header row.
    pub fn parse(text: &str) -> Result<Self, RosterError> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut rows = parse_rows(text)?.into_iter();

        let Some(header) = rows.next() else {
            return Ok(Self::default());
        };
        let header: Vec<String> = header.iter().map(|h| h.trim().to_string()).collect();

        let players = rows
            .filter(|row| !is_blank(row))
            .map(|row| {
                let mut cells = row.into_iter();
                PlayerRecord::from_pairs(header.iter().map(|column| {
                    let value = cells.next().map(|c| c.trim().to_string()).unwrap_or_default();
                    (column.clone(), value)
                }))
            })
            .collect();

        Ok(Self::new(players))
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn players(&self) -> &[PlayerRecord] {
        &self.players
    }

    /// Why the last [`Roster::load`] came back empty, if it failed.
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// Case-insensitive lookup: exact display-name match first, then the
    /// first display name containing the query. Dataset order breaks ties.
    pub fn find_by_name(&self, query: &str) -> Option<&PlayerRecord> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return None;
        }
        self.players
            .iter()
            .find(|p| p.display_name().to_lowercase() == query)
            .or_else(|| {
                self.players
                    .iter()
                    .find(|p| p.display_name().to_lowercase().contains(&query))
            })
    }

    /// `"{name}: {team}"` per player, newline-joined. Grounding context for the LLM.
    pub fn context_listing(&self) -> String {
        self.players
            .iter()
            .map(|p| format!("{}: {}", p.display_name(), p.get(COL_TEAM_NAME).unwrap_or_default()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

// ── CSV ───────────────────────────────────────────────────────────────────────

fn is_blank(row: &[String]) -> bool {
    row.iter().all(|cell| cell.trim().is_empty())
}

/// Split CSV text into rows of raw (untrimmed) cells.
///
/// Handles quoted fields with embedded commas, newlines and `""` escapes.
/// A quote appearing mid-field opens a quoted section, matching the lenient
/// behaviour of common CSV readers.
fn parse_rows(text: &str) -> Result<Vec<Vec<String>>, RosterError> {
    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut line = 1usize;
    let mut quote_line = 0usize;

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' => {
                in_quotes = true;
                quote_line = line;
            }
            ',' => row.push(std::mem::take(&mut field)),
            '\r' => {}
            '\n' => {
                line += 1;
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(RosterError::UnterminatedQuote { line: quote_line });
    }
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }
    Ok(rows)
}
