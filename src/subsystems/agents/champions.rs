//! Hardcoded NBA champions. The table is closed.

/// Season year → champion, ascending by year.
const CHAMPIONS: &[(u16, &str)] = &[
    (2022, "Golden State Warriors"),
    (2023, "Denver Nuggets"),
    (2024, "Boston Celtics"),
];

pub fn iter() -> impl Iterator<Item = (u16, &'static str)> {
    CHAMPIONS.iter().copied()
}

/// `"Here are the NBA champions from 2022-2024:"`
pub fn heading() -> String {
    match (CHAMPIONS.first(), CHAMPIONS.last()) {
        (Some((first, _)), Some((last, _))) => {
            format!("Here are the NBA champions from {first}-{last}:")
        }
        _ => "Here are the NBA champions:".to_string(),
    }
}

/// `"{year}: {team}"` lines, newline-joined.
pub fn listing() -> String {
    iter()
        .map(|(year, team)| format!("{year}: {team}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Answer a champion question: the single season when a known year is
/// mentioned anywhere in `text`, otherwise the full table.
pub fn answer(text: &str) -> String {
    match iter().find(|(year, _)| text.contains(&year.to_string())) {
        Some((year, team)) => format!("The NBA champion in {year} was the {team}."),
        None => format!("{}\n{}", heading(), listing()),
    }
}
