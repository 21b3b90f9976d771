//! Reference daily values for a 2,000-calorie diet.

use nutriscan_core::{Demographic, NutrientKey};

/// Target value for every nutrient, in the unit implied by the key.
///
/// Values are indexed by [`NutrientKey::index`], so a table is complete by
/// construction.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceTable {
    pub demographic: Demographic,
    values: [f64; 8],
}

pub static MALE_REFERENCE: ReferenceTable = ReferenceTable {
    demographic: Demographic::Male,
    // total_fat, saturated_fat, cholesterol(mg), sodium(mg),
    // total_carbohydrate, dietary_fiber, sugars, protein
    values: [78.0, 20.0, 300.0, 2300.0, 275.0, 33.0, 50.0, 56.0],
};

pub static FEMALE_REFERENCE: ReferenceTable = ReferenceTable {
    demographic: Demographic::Female,
    values: [78.0, 20.0, 300.0, 2300.0, 275.0, 25.0, 50.0, 46.0],
};

impl ReferenceTable {
    pub fn get(&self, key: NutrientKey) -> f64 {
        self.values[key.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (NutrientKey, f64)> + '_ {
        NutrientKey::ALL.into_iter().map(|k| (k, self.get(k)))
    }
}

pub fn reference_for(demographic: Demographic) -> &'static ReferenceTable {
    match demographic {
        Demographic::Male => &MALE_REFERENCE,
        Demographic::Female => &FEMALE_REFERENCE,
    }
}
