//! The closed set of tracked nutrients and the extracted value map.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Unit implied by a nutrient key. Never stored alongside values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Gram,
    Milligram,
}

impl Unit {
    /// Suffix printed on labels ("g" / "mg").
    pub fn suffix(self) -> &'static str {
        match self {
            Unit::Gram => "g",
            Unit::Milligram => "mg",
        }
    }
}

/// A tracked nutrient.
///
/// Declaration order is the catalog order: extraction populates keys in this
/// order and every map keyed by `NutrientKey` iterates in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NutrientKey {
    TotalFat,
    SaturatedFat,
    Cholesterol,
    Sodium,
    TotalCarbohydrate,
    DietaryFiber,
    Sugars,
    Protein,
}

impl NutrientKey {
    pub const ALL: [NutrientKey; 8] = [
        NutrientKey::TotalFat,
        NutrientKey::SaturatedFat,
        NutrientKey::Cholesterol,
        NutrientKey::Sodium,
        NutrientKey::TotalCarbohydrate,
        NutrientKey::DietaryFiber,
        NutrientKey::Sugars,
        NutrientKey::Protein,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NutrientKey::TotalFat => "total_fat",
            NutrientKey::SaturatedFat => "saturated_fat",
            NutrientKey::Cholesterol => "cholesterol",
            NutrientKey::Sodium => "sodium",
            NutrientKey::TotalCarbohydrate => "total_carbohydrate",
            NutrientKey::DietaryFiber => "dietary_fiber",
            NutrientKey::Sugars => "sugars",
            NutrientKey::Protein => "protein",
        }
    }

    /// Label phrase as printed on a nutrition facts panel, lowercased.
    pub fn label(self) -> &'static str {
        match self {
            NutrientKey::TotalFat => "total fat",
            NutrientKey::SaturatedFat => "saturated fat",
            NutrientKey::Cholesterol => "cholesterol",
            NutrientKey::Sodium => "sodium",
            NutrientKey::TotalCarbohydrate => "total carbohydrate",
            NutrientKey::DietaryFiber => "dietary fiber",
            NutrientKey::Sugars => "sugars",
            NutrientKey::Protein => "protein",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            NutrientKey::TotalCarbohydrate => "carbohydrate",
            NutrientKey::DietaryFiber => "fiber",
            NutrientKey::Sugars => "sugar",
            other => other.label(),
        }
    }

    pub fn unit(self) -> Unit {
        match self {
            NutrientKey::Cholesterol | NutrientKey::Sodium => Unit::Milligram,
            _ => Unit::Gram,
        }
    }

    /// Position in the catalog; used to index fixed-size tables.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for NutrientKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NutrientKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        NutrientKey::ALL
            .into_iter()
            .find(|k| k.as_str() == wanted)
            .ok_or_else(|| format!("unknown nutrient: {s}"))
    }
}

/// Nutrient values found in a label. Absent keys were not detected; they are
/// not zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NutritionData(BTreeMap<NutrientKey, f64>);

impl NutritionData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a value unless the key is already present; the first occurrence wins.
    pub fn insert_first(&mut self, key: NutrientKey, value: f64) -> bool {
        if self.0.contains_key(&key) {
            return false;
        }
        self.0.insert(key, value);
        true
    }

    pub fn get(&self, key: NutrientKey) -> Option<f64> {
        self.0.get(&key).copied()
    }

    pub fn contains(&self, key: NutrientKey) -> bool {
        self.0.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (NutrientKey, f64)> + '_ {
        self.0.iter().map(|(k, v)| (*k, *v))
    }
}

impl FromIterator<(NutrientKey, f64)> for NutritionData {
    fn from_iter<I: IntoIterator<Item = (NutrientKey, f64)>>(iter: I) -> Self {
        let mut data = NutritionData::new();
        for (key, value) in iter {
            data.insert_first(key, value);
        }
        data
    }
}
