//! Reference-value comparison and alerting.

use nutriscan_core::{Alert, NutrientKey, NutritionData, RdvAnalysis, RdvEntry, RdvStatus};
use std::collections::BTreeSet;

use crate::reference::ReferenceTable;

/// Nutrients that raise an alert when above target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertPolicy {
    alert_worthy: BTreeSet<NutrientKey>,
}

impl Default for AlertPolicy {
    fn default() -> Self {
        Self::new([NutrientKey::SaturatedFat, NutrientKey::Sodium])
    }
}

impl AlertPolicy {
    pub fn new(keys: impl IntoIterator<Item = NutrientKey>) -> Self {
        Self {
            alert_worthy: keys.into_iter().collect(),
        }
    }

    pub fn is_alert_worthy(&self, key: NutrientKey) -> bool {
        self.alert_worthy.contains(&key)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub analysis: RdvAnalysis,
    pub alerts: Vec<Alert>,
}

impl Comparison {
    pub fn alert_messages(&self) -> Vec<String> {
        self.alerts.iter().map(|a| a.message.clone()).collect()
    }
}

/// Compare with the default alert policy.
pub fn compare(data: &NutritionData, reference: &ReferenceTable) -> Comparison {
    compare_with_policy(data, reference, &AlertPolicy::default())
}

/// Percent-of-target for each nutrient present in `data`, plus alerts in
/// catalog order. Nutrients absent from `data` are never analyzed.
pub fn compare_with_policy(
    data: &NutritionData,
    reference: &ReferenceTable,
    policy: &AlertPolicy,
) -> Comparison {
    let mut analysis = RdvAnalysis::new();
    let mut alerts = Vec::new();

    for (key, value) in data.iter() {
        let entry = RdvEntry::new(value / reference.get(key) * 100.0);
        if entry.status == RdvStatus::AboveTarget && policy.is_alert_worthy(key) {
            alerts.push(Alert::above_target(key));
        }
        analysis.insert(key, entry);
    }

    Comparison { analysis, alerts }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::{FEMALE_REFERENCE, MALE_REFERENCE};

    fn data(pairs: &[(NutrientKey, f64)]) -> NutritionData {
        pairs.iter().copied().collect()
    }

    #[test]
    fn reference_label_against_male_table() {
        let input = data(&[
            (NutrientKey::TotalFat, 10.0),
            (NutrientKey::SaturatedFat, 25.0),
            (NutrientKey::Sodium, 2500.0),
            (NutrientKey::Protein, 5.0),
        ]);
        let result = compare(&input, &MALE_REFERENCE);

        let entry = |k: NutrientKey| result.analysis[&k];
        assert_eq!(entry(NutrientKey::SaturatedFat).rendered(), "125.0%");
        assert_eq!(entry(NutrientKey::SaturatedFat).status, RdvStatus::AboveTarget);
        assert_eq!(entry(NutrientKey::Sodium).rendered(), "108.7%");
        assert_eq!(entry(NutrientKey::Sodium).status, RdvStatus::AboveTarget);
        assert_eq!(entry(NutrientKey::TotalFat).rendered(), "12.8%");
        assert_eq!(entry(NutrientKey::TotalFat).status, RdvStatus::WithinRange);
        assert_eq!(entry(NutrientKey::Protein).rendered(), "8.9%");
        assert_eq!(entry(NutrientKey::Protein).status, RdvStatus::WithinRange);
        assert_eq!(
            result.alert_messages(),
            vec!["High saturated fat content detected.", "High sodium content detected."]
        );
    }

    #[test]
    fn exactly_at_target_is_within_range() {
        let result = compare(&data(&[(NutrientKey::Sodium, 2300.0)]), &MALE_REFERENCE);
        assert_eq!(result.analysis[&NutrientKey::Sodium].status, RdvStatus::WithinRange);
        assert_eq!(result.analysis[&NutrientKey::Sodium].rendered(), "100.0%");
        assert!(result.alerts.is_empty());
    }

    #[test]
    fn above_target_without_alert_for_non_alert_worthy() {
        let result = compare(&data(&[(NutrientKey::Sugars, 75.0)]), &MALE_REFERENCE);
        assert_eq!(result.analysis[&NutrientKey::Sugars].status, RdvStatus::AboveTarget);
        assert!(result.alerts.is_empty());
    }

    #[test]
    fn only_present_nutrients_are_analyzed() {
        let result = compare(&data(&[(NutrientKey::Protein, 23.0)]), &FEMALE_REFERENCE);
        assert_eq!(result.analysis.len(), 1);
        assert_eq!(result.analysis[&NutrientKey::Protein].rendered(), "50.0%");
        assert!(compare(&NutritionData::new(), &MALE_REFERENCE).analysis.is_empty());
    }

    #[test]
    fn custom_policy_extends_alerts() {
        let policy = AlertPolicy::new([NutrientKey::Sugars, NutrientKey::Sodium]);
        let input = data(&[
            (NutrientKey::SaturatedFat, 40.0),
            (NutrientKey::Sodium, 5000.0),
            (NutrientKey::Sugars, 60.0),
        ]);
        let result = compare_with_policy(&input, &MALE_REFERENCE, &policy);
        let nutrients: Vec<_> = result.alerts.iter().map(|a| a.nutrient).collect();
        assert_eq!(nutrients, vec![NutrientKey::Sodium, NutrientKey::Sugars]);
    }

    #[test]
    fn alert_raised_once_per_nutrient() {
        let input = data(&[(NutrientKey::SaturatedFat, 21.0), (NutrientKey::SaturatedFat, 99.0)]);
        let result = compare(&input, &MALE_REFERENCE);
        assert_eq!(result.alerts.len(), 1);
        assert_eq!(result.analysis[&NutrientKey::SaturatedFat].rendered(), "105.0%");
    }
}
