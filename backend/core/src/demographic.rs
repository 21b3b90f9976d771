use serde::{Deserialize, Serialize};
use std::fmt;

/// Which reference table to compare against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Demographic {
    #[default]
    Male,
    Female,
}

/// Outcome of resolving a caller-supplied demographic string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DemographicSelection {
    pub demographic: Demographic,
    /// True when the input was missing or unrecognized and the default was used.
    pub defaulted: bool,
}

impl Demographic {
    pub fn as_str(self) -> &'static str {
        match self {
            Demographic::Male => "male",
            Demographic::Female => "female",
        }
    }

    /// Case-insensitive lookup; `None` for anything that is not a known demographic.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "male" => Some(Demographic::Male),
            "female" => Some(Demographic::Female),
            _ => None,
        }
    }

    /// Resolves caller input, falling back to [`Demographic::Male`].
    pub fn resolve(input: Option<&str>) -> DemographicSelection {
        match input.and_then(Demographic::parse) {
            Some(demographic) => DemographicSelection {
                demographic,
                defaulted: false,
            },
            None => DemographicSelection {
                demographic: Demographic::default(),
                defaulted: true,
            },
        }
    }
}

impl fmt::Display for Demographic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
