//! OCR text normalization.
//!
//! Lowercases, collapses whitespace, then corrects the two character
//! confusions that most often break numbers on printed labels: `o` read for
//! `0` and `|` read for `1`. The steps run in that order and the result is
//! stable under re-normalization.

use nutriscan_core::SubstitutionMode;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// A candidate numeric window: starts the text or follows whitespace or `:`,
/// and is directly followed by a gram or milligram unit.
static NUMERIC_WINDOW_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(^|[\s:])([0-9o|][0-9o|.]*)(\s*m?g)\b").unwrap());

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeOptions {
    pub substitution: SubstitutionMode,
}

/// Normalize with the default (global) substitution.
pub fn normalize(text: &str) -> String {
    normalize_with(text, &NormalizeOptions::default())
}

pub fn normalize_with(text: &str, options: &NormalizeOptions) -> String {
    let lowered = text.to_lowercase();
    let collapsed = lowered.split_whitespace().collect::<Vec<_>>().join(" ");

    match options.substitution {
        SubstitutionMode::Global => substitute(&collapsed),
        SubstitutionMode::NumericContext => NUMERIC_WINDOW_RE
            .replace_all(&collapsed, |caps: &Captures| {
                format!("{}{}{}", &caps[1], substitute(&caps[2]), &caps[3])
            })
            .into_owned(),
        SubstitutionMode::Off => collapsed,
    }
}

fn substitute(s: &str) -> String {
    s.replace('o', "0").replace('|', "1")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scoped() -> NormalizeOptions {
        NormalizeOptions {
            substitution: SubstitutionMode::NumericContext,
        }
    }

    #[test]
    fn lowercases_and_collapses_whitespace() {
        assert_eq!(normalize("  TOTAL\n\tFAT   1|g  "), "t0tal fat 11g");
    }

    #[test]
    fn empty_input_is_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \n\t "), "");
    }

    #[test]
    fn is_idempotent() {
        let samples = [
            "Total Fat: 10g Saturated Fat: 25g Sodium: 2500mg Protein 5g",
            "  CHOLESTEROL |5 mg\n\nsugars 1o g ",
            "\u{0}\u{7f} ||| ooo ÄÖÜ",
            "",
        ];
        for options in [NormalizeOptions::default(), scoped()] {
            for s in samples {
                let once = normalize_with(s, &options);
                assert_eq!(normalize_with(&once, &options), once, "input: {s:?}");
            }
        }
    }

    #[test]
    fn numeric_context_leaves_words_alone() {
        let out = normalize_with("Sodium 2o0mg protein |5g good source", &scoped());
        assert_eq!(out, "sodium 200mg protein 15g good source");
    }

    #[test]
    fn numeric_context_handles_colon_and_spaced_unit() {
        let out = normalize_with("Total Fat:1o g", &scoped());
        assert_eq!(out, "total fat:10 g");
    }

    #[test]
    fn off_mode_only_canonicalizes_case_and_spacing() {
        let options = NormalizeOptions {
            substitution: SubstitutionMode::Off,
        };
        assert_eq!(normalize_with("Sodium  |o mg", &options), "sodium |o mg");
    }
}
