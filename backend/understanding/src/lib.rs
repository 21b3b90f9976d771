pub mod analyzer;
pub mod compare;
pub mod extract;
pub mod image_format;
pub mod normalize;
pub mod ocr;
pub mod reference;

pub use analyzer::{AnalysisReport, NutritionAnalyzer};
pub use compare::{compare, compare_with_policy, AlertPolicy, Comparison};
pub use extract::extract;
pub use image_format::ImageFormat;
pub use normalize::{normalize, normalize_with, NormalizeOptions};
pub use ocr::{DisabledOcrEngine, HttpOcrEngine};
pub use reference::{reference_for, ReferenceTable, FEMALE_REFERENCE, MALE_REFERENCE};
