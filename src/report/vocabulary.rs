//! Sheet header and trigger-phrase vocabulary.
//!
//! The header is a schema contract with the production spreadsheet: the
//! literal Russian column strings and their order must match the sheet's
//! first row byte-for-byte across restarts.

use std::sync::LazyLock;

/// The character that introduces a report payload.
pub const MARKER: char = '+';

/// Sheet header, first row, in order.
pub const HEADER: [&str; 17] = [
    "время отметки",
    "дата отметки",
    "ID водителя",
    "организация",
    "наличные",
    "+",
    "+ мк",
    "+ мк синяя",
    "+ мк красная",
    "+ мк оранжевая",
    "+ мк салатовая",
    "+ мк коричневая",
    "+ мк светло-серая",
    "+ мк розовая",
    "+ мк темно-серая",
    "+ мк голубая",
    "габ",
];

/// Fixed prefix columns before the trigger columns: time, date, driver id,
/// organization, cash.
pub const PREFIX_COLUMNS: usize = 5;

/// Index of the marker-presence column (`+`) within the trigger columns.
/// Set by marker presence alone, never by phrase search.
pub const MARKER_COLUMN: usize = 0;

/// Trigger columns in canonical order — everything after the fixed prefix.
pub fn trigger_columns() -> &'static [&'static str] {
    &HEADER[PREFIX_COLUMNS..]
}

/// Phrase → trigger-column pairs searched in the payload. The `+` column has
/// no phrase here.
const TRIGGER_PHRASES: [(&str, &str); 11] = [
    ("мк", "+ мк"),
    ("мк синяя", "+ мк синяя"),
    ("мк красная", "+ мк красная"),
    ("мк оранжевая", "+ мк оранжевая"),
    ("мк салатовая", "+ мк салатовая"),
    ("мк коричневая", "+ мк коричневая"),
    ("мк светло-серая", "+ мк светло-серая"),
    ("мк розовая", "+ мк розовая"),
    ("мк темно-серая", "+ мк темно-серая"),
    ("мк голубая", "+ мк голубая"),
    ("габ", "габ"),
];

/// Phrases paired with their trigger-column index, longest phrase first.
///
/// Longer phrases are evaluated before the bare "мк" so a qualified variant
/// matches independently of the base phrase's own outcome. Containment tests
/// are independent, so the base column still fires whenever its phrase is
/// present (every qualified phrase contains it).
pub static ORDERED_PHRASES: LazyLock<Vec<(&'static str, usize)>> = LazyLock::new(|| {
    let columns = trigger_columns();
    let mut phrases: Vec<(&'static str, usize)> = TRIGGER_PHRASES
        .iter()
        .map(|(phrase, column)| {
            let index = columns
                .iter()
                .position(|c| c == column)
                .expect("trigger phrase maps to a header column");
            (*phrase, index)
        })
        .collect();
    phrases.sort_by_key(|(phrase, _)| std::cmp::Reverse(phrase.chars().count()));
    phrases
});
