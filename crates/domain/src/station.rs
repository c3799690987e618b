//! Station: a placed trigger volume that heals or damages on contact.
//!
//! A station is armed (`is_active`) until it fires. Firing locks it before
//! any health is touched; only the re-arm after the cooldown unlocks it.

mod config;
mod kind;

pub use config::StationConfig;
pub use kind::{Material, StationType};

use serde::{Deserialize, Serialize};

use crate::feedback::FeedbackEffect;
use crate::id::{ActorId, NodeId, StationId};
use crate::vitals::Vitals;

/// Why a contact did not trigger a station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    /// The touched volume is not bound to any station.
    UnknownVolume,
    /// The touching body does not belong to a living target.
    NoLivingTarget,
    /// The station fired recently and has not re-armed yet.
    CoolingDown,
    /// The target is already at zero health, or its health is unreadable.
    TargetDead,
}

impl std::fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::UnknownVolume => "unknown volume",
            Self::NoLivingTarget => "no living target",
            Self::CoolingDown => "cooling down",
            Self::TargetDead => "target dead",
        };
        f.write_str(s)
    }
}

/// The health change computed by a trigger, plus the label describing it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthChange {
    pub prior_health: f64,
    pub resulting_health: f64,
    pub effect: FeedbackEffect,
}

/// One placed heal or damage station.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub id: StationId,
    pub config: StationConfig,
    /// Trigger volume owned by this station.
    pub volume: NodeId,
    is_active: bool,
}

impl Station {
    /// A freshly placed station is armed.
    #[must_use]
    pub fn new(id: StationId, config: StationConfig, volume: NodeId) -> Self {
        Self {
            id,
            config,
            volume,
            is_active: true,
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    #[must_use]
    pub fn station_type(&self) -> StationType {
        self.config.station_type
    }

    /// Decide whether a living target with `vitals` may trigger this station.
    ///
    /// The cooldown is checked before health so that a locked station never
    /// reads from its target.
    ///
    /// # Errors
    ///
    /// Returns the [`IgnoreReason`] when the contact must be a no-op.
    pub fn check_contact(&self, vitals: Option<Vitals>) -> Result<Vitals, IgnoreReason> {
        if !self.is_active {
            return Err(IgnoreReason::CoolingDown);
        }
        match vitals {
            Some(v) if v.is_alive() => Ok(v),
            _ => Err(IgnoreReason::TargetDead),
        }
    }

    /// Fire the station against `target`.
    ///
    /// Locks the station first, then computes the feedback label and the
    /// resulting health, clamped into `[0, max_health]`. Writing the health
    /// back is the caller's job.
    pub fn trigger(&mut self, target: ActorId, vitals: Vitals) -> HealthChange {
        self.is_active = false;

        let amount = self.config.amount;
        let resulting_health = match self.config.station_type {
            StationType::Heal => vitals.healed(amount),
            StationType::Damage => vitals.damaged(amount),
        };

        HealthChange {
            prior_health: vitals.health(),
            resulting_health,
            effect: FeedbackEffect::for_trigger(self.config.station_type, amount, target),
        }
    }

    /// Unlock the station once its cooldown has elapsed.
    pub fn rearm(&mut self) {
        self.is_active = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Vec3;

    fn damage_station(amount: f64) -> Station {
        Station::new(
            StationId::new(),
            StationConfig::damage(Vec3::ZERO, amount),
            NodeId::new(),
        )
    }

    fn heal_station(amount: f64) -> Station {
        Station::new(
            StationId::new(),
            StationConfig::heal(Vec3::ZERO, amount),
            NodeId::new(),
        )
    }

    fn vitals(health: f64) -> Vitals {
        Vitals::new(health, 100.0).unwrap()
    }

    #[test]
    fn should_start_active() {
        assert!(damage_station(20.0).is_active());
    }

    #[test]
    fn should_damage_and_lock_when_triggered() {
        let mut station = damage_station(20.0);
        let change = station.trigger(ActorId::new(), vitals(50.0));

        assert!(!station.is_active());
        assert!((change.prior_health - 50.0).abs() < f64::EPSILON);
        assert!((change.resulting_health - 30.0).abs() < f64::EPSILON);
        assert_eq!(change.effect.text, "-20");
    }

    #[test]
    fn should_keep_health_in_range_when_built_over_max() {
        let mut station = damage_station(20.0);
        let change = station.trigger(ActorId::new(), Vitals::new(150.0, 100.0).unwrap());

        assert!((change.prior_health - 100.0).abs() < f64::EPSILON);
        assert!((change.resulting_health - 80.0).abs() < f64::EPSILON);
    }

    #[test]
    fn should_clamp_heal_at_max_health() {
        let mut station = heal_station(20.0);
        let change = station.trigger(ActorId::new(), vitals(90.0));

        assert!((change.resulting_health - 100.0).abs() < f64::EPSILON);
        assert_eq!(change.effect.text, "+20");
    }

    #[test]
    fn should_clamp_damage_at_zero() {
        let mut station = damage_station(50.0);
        let change = station.trigger(ActorId::new(), vitals(10.0));

        assert!(change.resulting_health.abs() < f64::EPSILON);
    }

    #[test]
    fn should_anchor_effect_to_target() {
        let actor = ActorId::new();
        let mut station = heal_station(5.0);
        let change = station.trigger(actor, vitals(10.0));
        assert_eq!(change.effect.anchor, actor);
    }

    #[test]
    fn should_ignore_contact_when_cooling_down() {
        let mut station = damage_station(20.0);
        station.trigger(ActorId::new(), vitals(50.0));

        assert_eq!(
            station.check_contact(Some(vitals(50.0))),
            Err(IgnoreReason::CoolingDown)
        );
    }

    #[test]
    fn should_report_cooldown_before_dead_target() {
        let mut station = damage_station(20.0);
        station.trigger(ActorId::new(), vitals(50.0));

        assert_eq!(
            station.check_contact(Some(vitals(0.0))),
            Err(IgnoreReason::CoolingDown)
        );
    }

    #[test]
    fn should_ignore_contact_when_target_is_dead() {
        let station = heal_station(20.0);
        assert_eq!(
            station.check_contact(Some(vitals(0.0))),
            Err(IgnoreReason::TargetDead)
        );
    }

    #[test]
    fn should_ignore_contact_when_vitals_unreadable() {
        let station = heal_station(20.0);
        assert_eq!(station.check_contact(None), Err(IgnoreReason::TargetDead));
    }

    #[test]
    fn should_accept_contact_after_rearm() {
        let mut station = damage_station(20.0);
        station.trigger(ActorId::new(), vitals(50.0));
        station.rearm();

        assert!(station.is_active());
        assert!(station.check_contact(Some(vitals(30.0))).is_ok());
    }

    #[test]
    fn should_display_ignore_reason() {
        assert_eq!(IgnoreReason::CoolingDown.to_string(), "cooling down");
    }
}
