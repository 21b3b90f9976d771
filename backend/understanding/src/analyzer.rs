//! Text-to-analysis pipeline: normalize → extract → compare.

use nutriscan_core::{
    join_fragments, AnalysisPayload, Demographic, DemographicSelection, SubstitutionMode,
};
use tracing::debug;

use crate::compare::{compare_with_policy, AlertPolicy};
use crate::extract::extract;
use crate::normalize::{normalize_with, NormalizeOptions};
use crate::reference::reference_for;

/// Everything produced for one label.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    pub selection: DemographicSelection,
    pub normalized_text: String,
    pub payload: AnalysisPayload,
}

/// Stateless analyzer; one instance can serve any number of concurrent requests.
#[derive(Debug, Clone, Default)]
pub struct NutritionAnalyzer {
    normalize: NormalizeOptions,
    alerts: AlertPolicy,
}

impl NutritionAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_substitution(mut self, substitution: SubstitutionMode) -> Self {
        self.normalize.substitution = substitution;
        self
    }

    pub fn with_alert_policy(mut self, policy: AlertPolicy) -> Self {
        self.alerts = policy;
        self
    }

    pub fn substitution(&self) -> SubstitutionMode {
        self.normalize.substitution
    }

    pub fn alert_policy(&self) -> &AlertPolicy {
        &self.alerts
    }

    /// Analyze raw OCR text for the given demographic (defaults to male).
    pub fn analyze_text(&self, raw: &str, gender: Option<&str>) -> AnalysisReport {
        let selection = Demographic::resolve(gender);
        let normalized_text = normalize_with(raw, &self.normalize);
        let nutrition_data = extract(&normalized_text);
        let reference = reference_for(selection.demographic);
        let comparison = compare_with_policy(&nutrition_data, reference, &self.alerts);

        debug!(
            nutrients = nutrition_data.len(),
            alerts = comparison.alerts.len(),
            demographic = %selection.demographic,
            defaulted = selection.defaulted,
            "Analyzed label text"
        );

        AnalysisReport {
            selection,
            normalized_text,
            payload: AnalysisPayload {
                alerts: comparison.alert_messages(),
                rdv_analysis: comparison.analysis,
                nutrition_data,
            },
        }
    }

    /// Analyze OCR fragments after joining them with single spaces.
    pub fn analyze_fragments<S: AsRef<str>>(
        &self,
        fragments: &[S],
        gender: Option<&str>,
    ) -> AnalysisReport {
        self.analyze_text(&join_fragments(fragments), gender)
    }
}
