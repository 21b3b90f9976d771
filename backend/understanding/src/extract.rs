//! Nutrient extraction from normalized label text.
//!
//! One pattern per [`NutrientKey`]: the label phrase, an optional `:` and
//! whitespace, a plain ASCII decimal number, and the unit suffix for that key.
//! Only the first match per key counts.

use nutriscan_core::{NutrientKey, NutritionData};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

static NUTRIENT_PATTERNS: Lazy<Vec<(NutrientKey, Regex)>> = Lazy::new(|| {
    NutrientKey::ALL
        .into_iter()
        .map(|key| (key, Regex::new(&label_pattern(key)).unwrap()))
        .collect()
});

/// Builds the regex source for one nutrient.
///
/// Spaces in the label accept any run of whitespace (including none) and each
/// `o` also accepts `0`, since normalization may have rewritten it.
fn label_pattern(key: NutrientKey) -> String {
    let mut label = String::new();
    for c in key.label().chars() {
        match c {
            ' ' => label.push_str(r"\s*"),
            'o' => label.push_str("[o0]"),
            other => label.push_str(&regex::escape(&other.to_string())),
        }
    }
    format!(r"{label}[:\s]*([0-9]+\.?[0-9]*)\s*{}", key.unit().suffix())
}

/// Extract every nutrient found in `text`. Never fails; no matches yields an empty map.
pub fn extract(text: &str) -> NutritionData {
    let mut data = NutritionData::new();

    for (key, re) in NUTRIENT_PATTERNS.iter() {
        for caps in re.captures_iter(text) {
            let raw = &caps[1];
            match raw.parse::<f64>() {
                Ok(value) => {
                    data.insert_first(*key, value);
                    break;
                }
                Err(e) => {
                    debug!(nutrient = %key, raw, error = %e, "Skipping unparsable nutrient value")
                }
            }
        }
    }

    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;

    fn extract_raw(text: &str) -> NutritionData {
        extract(&normalize(text))
    }

    #[test]
    fn extracts_reference_label() {
        let data = extract_raw("Total Fat: 10g Saturated Fat: 25g Sodium: 2500mg Protein 5g");
        assert_eq!(data.len(), 4);
        assert_eq!(data.get(NutrientKey::TotalFat), Some(10.0));
        assert_eq!(data.get(NutrientKey::SaturatedFat), Some(25.0));
        assert_eq!(data.get(NutrientKey::Sodium), Some(2500.0));
        assert_eq!(data.get(NutrientKey::Protein), Some(5.0));
        assert!(!data.contains(NutrientKey::Cholesterol));
    }

    #[test]
    fn every_key_matches_with_loose_spacing_and_case() {
        for key in NutrientKey::ALL {
            for value in ["0", "7", "12.5", "300"] {
                let label = key.label().to_uppercase().replace(' ', "   ");
                let text = format!("Serving 1 cup {label} :  {value}  {}", key.unit().suffix());
                let data = extract_raw(&text);
                assert_eq!(data.get(key), Some(value.parse().unwrap()), "text: {text}");
            }
        }
    }

    #[test]
    fn first_occurrence_wins() {
        let data = extract_raw("Sodium 140mg per serving ... Sodium 280mg per container");
        assert_eq!(data.get(NutrientKey::Sodium), Some(140.0));
    }

    #[test]
    fn non_ascii_digits_do_not_hide_later_values() {
        let data = extract_raw("Sodium \u{ff15}mg ... Sodium 140mg");
        assert_eq!(data.get(NutrientKey::Sodium), Some(140.0));

        let data = extract_raw("Protein \u{0665}g");
        assert!(!data.contains(NutrientKey::Protein));
    }

    #[test]
    fn recovers_ocr_confused_digits() {
        let data = extract_raw("Sodium 2|o mg Dietary Fiber 1o g");
        assert_eq!(data.get(NutrientKey::Sodium), Some(210.0));
        assert_eq!(data.get(NutrientKey::DietaryFiber), Some(10.0));
    }

    #[test]
    fn wrong_unit_does_not_match() {
        let data = extract_raw("Sodium 25g Protein 5mg");
        assert!(data.is_empty());
    }

    #[test]
    fn label_words_may_run_together() {
        let data = extract_raw("TOTALCARBOHYDRATE 31g");
        assert_eq!(data.get(NutrientKey::TotalCarbohydrate), Some(31.0));
    }

    #[test]
    fn empty_and_garbage_input_yield_empty_map() {
        assert!(extract_raw("").is_empty());
        assert!(extract_raw("\u{fffd}\u{0}\u{1b}[31m ÿþ%%%% g mg : .").is_empty());
        assert!(extract("").is_empty());
    }

    #[test]
    fn works_on_unsubstituted_text() {
        let data = extract("total fat 3g cholesterol 5mg");
        assert_eq!(data.get(NutrientKey::TotalFat), Some(3.0));
        assert_eq!(data.get(NutrientKey::Cholesterol), Some(5.0));
    }
}
