//! RGB colors and the named palette used by stations and feedback labels.

use serde::{Deserialize, Serialize};

/// 8-bit RGB triple. Serialized as `[r, g, b]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Color3 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color3 {
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<[u8; 3]> for Color3 {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl From<Color3> for [u8; 3] {
    fn from(c: Color3) -> Self {
        [c.r, c.g, c.b]
    }
}

impl std::fmt::Display for Color3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Station body color for healing stations.
pub const HEAL_COLOR: Color3 = Color3::rgb(85, 255, 127);

/// Station body color for damaging stations.
pub const DAMAGE_COLOR: Color3 = Color3::rgb(255, 65, 68);

/// Label color shown after a heal. Deliberately not the body color.
pub const HEAL_FEEDBACK_COLOR: Color3 = Color3::rgb(0, 255, 127);

/// Label color shown after damage. Deliberately not the body color.
pub const DAMAGE_FEEDBACK_COLOR: Color3 = Color3::rgb(255, 85, 85);
