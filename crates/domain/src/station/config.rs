//! Station configuration: immutable input supplied at creation.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::geometry::Vec3;

use super::kind::{Material, StationType};

/// Everything needed to place one station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationConfig {
    /// Optional label used in logs.
    #[serde(default)]
    pub name: Option<String>,
    pub position: Vec3,
    /// Magnitude of the health change; always positive.
    pub amount: f64,
    pub station_type: StationType,
    #[serde(default)]
    pub material: Option<Material>,
}

impl StationConfig {
    #[must_use]
    pub fn new(position: Vec3, amount: f64, station_type: StationType) -> Self {
        Self {
            name: None,
            position,
            amount,
            station_type,
            material: None,
        }
    }

    #[must_use]
    pub fn heal(position: Vec3, amount: f64) -> Self {
        Self::new(position, amount, StationType::Heal)
    }

    #[must_use]
    pub fn damage(position: Vec3, amount: f64) -> Self {
        Self::new(position, amount, StationType::Damage)
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_material(mut self, material: Material) -> Self {
        self.material = Some(material);
        self
    }

    /// Name for logs: the configured one, or the type and position.
    #[must_use]
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("{}@{}", self.station_type, self.position),
        }
    }

    /// Check the invariants a station relies on.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::NonPositiveAmount`] if `amount` is not a finite
    ///   number greater than zero.
    /// - [`ValidationError::NonFinitePosition`] if any coordinate is NaN or
    ///   infinite.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(ValidationError::NonPositiveAmount(self.amount));
        }
        if !self.position.is_finite() {
            return Err(ValidationError::NonFinitePosition);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_accept_valid_config() {
        let config = StationConfig::damage(Vec3::new(0.0, 0.5, -10.0), 20.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_reject_zero_amount() {
        let config = StationConfig::heal(Vec3::ZERO, 0.0);
        assert_eq!(
            config.validate(),
            Err(ValidationError::NonPositiveAmount(0.0))
        );
    }

    #[test]
    fn should_reject_negative_amount() {
        let config = StationConfig::heal(Vec3::ZERO, -5.0);
        assert!(matches!(
            config.validate(),
            Err(ValidationError::NonPositiveAmount(_))
        ));
    }

    #[test]
    fn should_reject_nan_amount() {
        let config = StationConfig::heal(Vec3::ZERO, f64::NAN);
        assert!(matches!(
            config.validate(),
            Err(ValidationError::NonPositiveAmount(_))
        ));
    }

    #[test]
    fn should_reject_non_finite_position() {
        let config = StationConfig::damage(Vec3::new(f64::NAN, 0.0, 0.0), 10.0);
        assert_eq!(config.validate(), Err(ValidationError::NonFinitePosition));
    }

    #[test]
    fn should_use_name_when_displaying() {
        let config = StationConfig::heal(Vec3::ZERO, 10.0).with_name("fountain");
        assert_eq!(config.display_name(), "fountain");
    }

    #[test]
    fn should_fall_back_to_type_and_position_when_unnamed() {
        let config = StationConfig::heal(Vec3::new(1.0, 2.0, 3.0), 10.0);
        assert_eq!(config.display_name(), "HEAL@(1, 2, 3)");
    }

    #[test]
    fn should_deserialize_with_optional_fields_missing() {
        let json = r#"{"position": [0.0, 0.5, -10.0], "amount": 20.0, "station_type": "DAMAGE"}"#;
        let config: StationConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.station_type, StationType::Damage);
        assert!(config.material.is_none());
        assert!(config.name.is_none());
    }
}
