//! Gender value shared by entity and transfer records.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    /// Lowercase label used for storage, display and console input.
    pub fn label(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
        }
    }

    /// Inverse of [`Gender::label`]; exact match only.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|gender| gender.label() == label)
    }
}
