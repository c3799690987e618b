//! Tunables shared by every station and feedback effect.

use std::time::Duration;

use healstation_domain::color::{Color3, DAMAGE_COLOR, HEAL_COLOR};
use healstation_domain::easing::Easing;
use healstation_domain::error::ValidationError;
use healstation_domain::geometry::Vec3;
use healstation_domain::station::{Material, StationType};

use crate::ports::scene::{Font, UiSize};

/// Default trigger volume footprint, in studs.
pub const DEFAULT_PART_SIZE: Vec3 = Vec3::new(6.0, 1.0, 6.0);

/// Default time between a trigger and the station re-arming.
pub const COOLDOWN_TIME: Duration = Duration::from_millis(1200);

/// Default lifetime of a feedback label.
pub const ANIMATION_DURATION: Duration = Duration::from_secs(1);

/// Station placement and cooldown settings.
#[derive(Debug, Clone, PartialEq)]
pub struct StationSettings {
    pub part_size: Vec3,
    pub heal_color: Color3,
    pub damage_color: Color3,
    pub cooldown: Duration,
    pub default_material: Material,
}

impl Default for StationSettings {
    fn default() -> Self {
        Self {
            part_size: DEFAULT_PART_SIZE,
            heal_color: HEAL_COLOR,
            damage_color: DAMAGE_COLOR,
            cooldown: COOLDOWN_TIME,
            default_material: Material::default(),
        }
    }
}

impl StationSettings {
    #[must_use]
    pub fn body_color(&self, station_type: StationType) -> Color3 {
        match station_type {
            StationType::Heal => self.heal_color,
            StationType::Damage => self.damage_color,
        }
    }

    /// # Errors
    ///
    /// Returns [`ValidationError::NonPositivePartSize`] if any dimension of
    /// `part_size` is zero, negative or not finite.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.part_size.is_finite() || !self.part_size.is_positive() {
            return Err(ValidationError::NonPositivePartSize);
        }
        Ok(())
    }
}

/// Look and timing of the floating feedback label.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackSettings {
    pub animation_duration: Duration,
    /// Vertical offset above the anchor when the label appears.
    pub offset_start: f64,
    /// Vertical offset the label rises to.
    pub offset_end: f64,
    pub size: UiSize,
    pub font: Font,
    pub easing: Easing,
    pub stroke_color: Color3,
}

impl Default for FeedbackSettings {
    fn default() -> Self {
        Self {
            animation_duration: ANIMATION_DURATION,
            offset_start: 2.0,
            offset_end: 5.0,
            size: UiSize {
                width: 200,
                height: 50,
            },
            font: Font::FredokaOne,
            easing: Easing::BackOut,
            stroke_color: Color3::rgb(0, 0, 0),
        }
    }
}
