//! Vitals: the health pair exposed by a living target.

use crate::error::ValidationError;

/// Current and maximum health of a living target.
///
/// Health always lies within `[0, max_health]`: [`Vitals::new`] is the only
/// way in, and every update goes through a clamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vitals {
    health: f64,
    max_health: f64,
}

impl Vitals {
    /// Build vitals, clamping `health` into `[0, max_health]`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NonPositiveMaxHealth`] when `max_health`
    /// is not a finite positive number.
    pub fn new(health: f64, max_health: f64) -> Result<Self, ValidationError> {
        if !max_health.is_finite() || max_health <= 0.0 {
            return Err(ValidationError::NonPositiveMaxHealth(max_health));
        }
        Ok(Self {
            health: clamp_health(health, max_health),
            max_health,
        })
    }

    #[must_use]
    pub fn health(&self) -> f64 {
        self.health
    }

    #[must_use]
    pub fn max_health(&self) -> f64 {
        self.max_health
    }

    /// Same maximum, health replaced and clamped into range.
    #[must_use]
    pub fn with_health(self, health: f64) -> Self {
        Self {
            health: clamp_health(health, self.max_health),
            ..self
        }
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    /// `min(max_health, health + amount)`, never below 0.
    #[must_use]
    pub fn healed(&self, amount: f64) -> f64 {
        clamp_health(self.health + amount, self.max_health)
    }

    /// `max(0, health - amount)`, never above `max_health`.
    #[must_use]
    pub fn damaged(&self, amount: f64) -> f64 {
        clamp_health(self.health - amount, self.max_health)
    }
}

/// NaN collapses to 0 so a bad write never leaves health unreadable.
fn clamp_health(health: f64, max_health: f64) -> f64 {
    if health.is_nan() {
        0.0
    } else {
        health.clamp(0.0, max_health)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_clamp_heal_to_max_health() {
        let v = Vitals::new(90.0, 100.0).unwrap();
        assert!((v.healed(20.0) - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn should_clamp_damage_to_zero() {
        let v = Vitals::new(10.0, 100.0).unwrap();
        assert!(v.damaged(50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn should_subtract_damage_when_health_suffices() {
        let v = Vitals::new(50.0, 100.0).unwrap();
        assert!((v.damaged(20.0) - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn should_clamp_initial_health_into_range() {
        let v = Vitals::new(150.0, 100.0).unwrap();
        assert!((v.health() - 100.0).abs() < f64::EPSILON);
        let v = Vitals::new(-5.0, 100.0).unwrap();
        assert!(v.health().abs() < f64::EPSILON);
        assert!(!v.is_alive());
    }

    #[test]
    fn should_clamp_replaced_health_into_range() {
        let v = Vitals::new(50.0, 100.0).unwrap();
        assert!((v.with_health(130.0).health() - 100.0).abs() < f64::EPSILON);
        assert!(v.with_health(-1.0).health().abs() < f64::EPSILON);
        assert!(v.with_health(f64::NAN).health().abs() < f64::EPSILON);
        assert!((v.with_health(70.0).max_health() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn should_stay_in_range_when_amount_is_negative() {
        let v = Vitals::new(95.0, 100.0).unwrap();
        assert!((v.damaged(-20.0) - 100.0).abs() < f64::EPSILON);
        assert!(v.healed(-200.0).abs() < f64::EPSILON);
    }

    #[test]
    fn should_reject_non_positive_max_health() {
        assert_eq!(
            Vitals::new(0.0, 0.0),
            Err(ValidationError::NonPositiveMaxHealth(0.0))
        );
    }
}
