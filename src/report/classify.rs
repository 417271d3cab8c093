//! Message classification — raw chat text to a structured shift report.
//!
//! Pure and synchronous: no I/O, identical input always yields identical
//! output. Returns `None` for anything that is not a report so callers can
//! drop chatter without producing a row.

use std::sync::LazyLock;

use regex::Regex;

use crate::report::vocabulary::{self, MARKER};

/// First standalone run of decimal digits in the payload — the cash token.
static CASH_TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\d+\b").unwrap());

/// A classified shift report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftReport {
    /// Cash amount; 0 when the payload carries no standalone number.
    pub cash: u64,
    /// One 0/1 per trigger column, aligned with
    /// [`vocabulary::trigger_columns`].
    pub flags: Vec<u8>,
}

impl ShiftReport {
    /// Look up a flag by its header column name.
    pub fn flag(&self, column: &str) -> Option<u8> {
        vocabulary::trigger_columns()
            .iter()
            .position(|c| *c == column)
            .map(|index| self.flags[index])
    }
}

/// Classify a raw message text.
///
/// A message qualifies as a report only if it contains the `+` marker; empty
/// or marker-less text returns `None`. Only the payload — the text strictly
/// after the first marker — is inspected for the cash amount and trigger
/// phrases. Text before the marker is the driver's name or chatter and is
/// discarded.
pub fn classify(text: &str) -> Option<ShiftReport> {
    let text = text.trim().to_lowercase();
    if text.is_empty() {
        return None;
    }

    let (_, payload) = text.split_once(MARKER)?;
    let payload = payload.trim();

    let mut flags = vec![0u8; vocabulary::trigger_columns().len()];
    // Marker presence alone sets the `+` column, even for an empty payload.
    flags[vocabulary::MARKER_COLUMN] = 1;

    for (phrase, index) in vocabulary::ORDERED_PHRASES.iter() {
        if payload.contains(phrase) {
            flags[*index] = 1;
        }
    }

    Some(ShiftReport {
        cash: first_number(payload),
        flags,
    })
}

/// First whole-word decimal number in the payload; 0 when absent.
///
/// Word boundaries mean digits glued to letters ("150мк") do not count, and
/// only the first matching token is taken.
fn first_number(payload: &str) -> u64 {
    CASH_TOKEN
        .find(payload)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags_set(report: &ShiftReport) -> Vec<&'static str> {
        vocabulary::trigger_columns()
            .iter()
            .zip(&report.flags)
            .filter(|(_, flag)| **flag == 1)
            .map(|(column, _)| *column)
            .collect()
    }

    // ── Delimiter gate ──────────────────────────────────────────────

    #[test]
    fn no_marker_is_not_a_report() {
        assert!(classify("привет всем").is_none());
    }

    #[test]
    fn empty_text_is_not_a_report() {
        assert!(classify("").is_none());
    }

    #[test]
    fn whitespace_only_is_not_a_report() {
        assert!(classify("   \n\t ").is_none());
    }

    #[test]
    fn bare_marker_is_a_report_with_marker_flag_only() {
        let report = classify("+").unwrap();
        assert_eq!(report.cash, 0);
        assert_eq!(flags_set(&report), vec!["+"]);
    }

    #[test]
    fn marker_flag_always_set_once_marker_found() {
        for text in ["+", "иван +", "+ 200", "болтовня + мк красная"] {
            let report = classify(text).unwrap();
            assert_eq!(report.flag("+"), Some(1), "text: {text:?}");
        }
    }

    // ── Payload extraction ──────────────────────────────────────────

    #[test]
    fn text_before_marker_is_ignored() {
        // The name on the left carries a number and a phrase; neither counts.
        let report = classify("мк 99 иванов + габ").unwrap();
        assert_eq!(report.cash, 0);
        assert_eq!(flags_set(&report), vec!["+", "габ"]);
    }

    #[test]
    fn payload_starts_after_first_marker_only() {
        let report = classify("иван + 100 + мк").unwrap();
        assert_eq!(report.cash, 100);
        assert_eq!(report.flag("+ мк"), Some(1));
    }

    #[test]
    fn classification_is_case_insensitive() {
        let report = classify("Иван + 150 МК Синяя ГАБ").unwrap();
        assert_eq!(report.cash, 150);
        assert_eq!(report.flag("+ мк синяя"), Some(1));
        assert_eq!(report.flag("габ"), Some(1));
    }

    // ── Cash extraction ─────────────────────────────────────────────

    #[test]
    fn first_number_wins() {
        let report = classify("+ 150 мк 200").unwrap();
        assert_eq!(report.cash, 150);
    }

    #[test]
    fn no_number_means_zero_cash() {
        let report = classify("+ мк красная").unwrap();
        assert_eq!(report.cash, 0);
    }

    #[test]
    fn digits_glued_to_letters_are_not_cash() {
        let report = classify("+ 150мк").unwrap();
        assert_eq!(report.cash, 0);
    }

    #[test]
    fn cash_extraction_is_idempotent() {
        assert_eq!(first_number("150 мк синяя габ"), first_number("150 мк синяя габ"));
        assert_eq!(first_number("150 мк синяя габ"), 150);
    }

    // ── Trigger flags ───────────────────────────────────────────────

    #[test]
    fn qualified_variant_sets_base_and_variant() {
        let report = classify("+ 150 мк синяя габ").unwrap();
        assert_eq!(report.cash, 150);
        assert_eq!(
            flags_set(&report),
            vec!["+", "+ мк", "+ мк синяя", "габ"]
        );
    }

    #[test]
    fn base_phrase_alone_sets_only_base() {
        let report = classify("+ мк красная").unwrap();
        assert_eq!(flags_set(&report), vec!["+", "+ мк", "+ мк красная"]);
    }

    #[test]
    fn unrelated_color_columns_stay_zero() {
        let report = classify("+ мк синяя").unwrap();
        assert_eq!(report.flag("+ мк красная"), Some(0));
        assert_eq!(report.flag("+ мк голубая"), Some(0));
        assert_eq!(report.flag("габ"), Some(0));
    }

    #[test]
    fn hyphenated_color_variant_matches() {
        let report = classify("+ мк светло-серая").unwrap();
        assert_eq!(report.flag("+ мк светло-серая"), Some(1));
        assert_eq!(report.flag("+ мк"), Some(1));
    }

    #[test]
    fn every_flag_is_zero_or_one() {
        let report = classify("+ 150 мк синяя габ мк красная").unwrap();
        assert_eq!(report.flags.len(), vocabulary::trigger_columns().len());
        assert!(report.flags.iter().all(|flag| *flag <= 1));
    }

    #[test]
    fn substring_containment_is_literal() {
        // Plain containment, no word boundaries: "мк" inside a longer word
        // still fires. Matches production behavior.
        let report = classify("+ мкад").unwrap();
        assert_eq!(report.flag("+ мк"), Some(1));
    }

    // ── Determinism ─────────────────────────────────────────────────

    #[test]
    fn classify_is_deterministic() {
        let a = classify("вася + 150 мк синяя габ");
        let b = classify("вася + 150 мк синяя габ");
        assert_eq!(a, b);
    }
}
