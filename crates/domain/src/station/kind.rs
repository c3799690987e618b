//! Station type and cosmetic material.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// What a station does to the health of whoever touches it.
///
/// Parsing is strict: anything other than `HEAL` or `DAMAGE` (in any case)
/// is rejected instead of falling through to one of the two behaviours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum StationType {
    Heal,
    Damage,
}

impl StationType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Heal => "HEAL",
            Self::Damage => "DAMAGE",
        }
    }
}

impl fmt::Display for StationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StationType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("heal") {
            Ok(Self::Heal)
        } else if s.eq_ignore_ascii_case("damage") {
            Ok(Self::Damage)
        } else {
            Err(ValidationError::UnknownStationType(s.to_string()))
        }
    }
}

impl TryFrom<String> for StationType {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Surface material of the trigger volume. Purely cosmetic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Material {
    Plastic,
    SmoothPlastic,
    #[default]
    Neon,
    ForceField,
    Glass,
}
