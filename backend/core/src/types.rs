use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

use crate::nutrient::{NutrientKey, NutritionData};

/// Whether an extracted value exceeds its reference target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RdvStatus {
    WithinRange,
    AboveTarget,
}

impl RdvStatus {
    /// Strictly greater than 100% is above target; exactly 100% is not.
    pub fn classify(percentage: f64) -> Self {
        if percentage > 100.0 {
            RdvStatus::AboveTarget
        } else {
            RdvStatus::WithinRange
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            RdvStatus::WithinRange => "Within normal range",
            RdvStatus::AboveTarget => "Higher than RDV",
        }
    }
}

/// Percent-of-target for one reported nutrient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RdvEntry {
    /// Unrounded `value / target * 100`. Serialized with one decimal digit, e.g. `"108.7%"`.
    #[serde(serialize_with = "serialize_percentage")]
    pub percentage: f64,
    pub status: RdvStatus,
}

impl RdvEntry {
    pub fn new(percentage: f64) -> Self {
        Self {
            percentage,
            status: RdvStatus::classify(percentage),
        }
    }

    pub fn rendered(&self) -> String {
        format!("{:.1}%", self.percentage)
    }
}

fn serialize_percentage<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("{value:.1}%"))
}

/// Per-nutrient comparison; only ever holds keys present in the analyzed data.
pub type RdvAnalysis = BTreeMap<NutrientKey, RdvEntry>;

/// A user-facing warning tied to one nutrient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    pub nutrient: NutrientKey,
    pub message: String,
}

impl Alert {
    pub fn above_target(nutrient: NutrientKey) -> Self {
        Self {
            nutrient,
            message: format!("High {} content detected.", nutrient.display_name()),
        }
    }
}

/// How OCR confusion characters (`o` → `0`, `|` → `1`) are corrected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubstitutionMode {
    /// Rewrite every occurrence in the whole text.
    #[default]
    Global,
    /// Rewrite only inside numeric windows that precede a `g`/`mg` unit.
    NumericContext,
    Off,
}

/// Result handed to the serving layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisPayload {
    pub nutrition_data: NutritionData,
    pub rdv_analysis: RdvAnalysis,
    pub alerts: Vec<String>,
}

impl AnalysisPayload {
    pub fn empty() -> Self {
        Self {
            nutrition_data: NutritionData::new(),
            rdv_analysis: RdvAnalysis::new(),
            alerts: Vec::new(),
        }
    }
}
