pub mod demographic;
pub mod error;
pub mod nutrient;
pub mod traits;
pub mod types;

pub use demographic::{Demographic, DemographicSelection};
pub use error::NutriError;
pub use nutrient::{NutrientKey, NutritionData, Unit};
pub use traits::{join_fragments, OcrEngine};
pub use types::{Alert, AnalysisPayload, RdvAnalysis, RdvEntry, RdvStatus, SubstitutionMode};
