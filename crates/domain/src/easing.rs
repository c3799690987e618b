//! Easing curves and tween sampling.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Overshoot constant of the "back" family of easing curves.
const BACK_OVERSHOOT: f64 = 1.701_58;

/// Maps normalized time `t ∈ [0, 1]` to animation progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Easing {
    Linear,
    QuadOut,
    /// Ease-out with overshoot: passes 1 before settling back.
    #[default]
    BackOut,
}

impl Easing {
    /// Progress at normalized time `t`; `t` is clamped to `[0, 1]`.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            Self::BackOut => {
                let s = BACK_OVERSHOOT;
                let u = t - 1.0;
                1.0 + (s + 1.0) * u * u * u + s * u * u
            }
        }
    }
}

/// A scalar interpolation from `from` to `to` over `duration`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub from: f64,
    pub to: f64,
    pub duration: Duration,
    pub easing: Easing,
}

impl Tween {
    /// Interpolated value `elapsed` after the tween started.
    ///
    /// A zero-length tween jumps straight to `to`.
    #[must_use]
    pub fn value_at(&self, elapsed: Duration) -> f64 {
        let t = if self.duration.is_zero() {
            1.0
        } else {
            elapsed.as_secs_f64() / self.duration.as_secs_f64()
        };
        self.from + (self.to - self.from) * self.easing.apply(t)
    }

    #[must_use]
    pub fn is_complete(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn should_start_at_zero_and_end_at_one_for_every_curve() {
        for easing in [Easing::Linear, Easing::QuadOut, Easing::BackOut] {
            assert!(approx(easing.apply(0.0), 0.0), "{easing:?} at 0");
            assert!(approx(easing.apply(1.0), 1.0), "{easing:?} at 1");
        }
    }

    #[test]
    fn should_overshoot_before_settling_when_back_out() {
        let peak = (1..100)
            .map(|i| Easing::BackOut.apply(f64::from(i) / 100.0))
            .fold(f64::MIN, f64::max);
        assert!(peak > 1.0);
    }

    #[test]
    fn should_clamp_time_outside_unit_range() {
        assert!(approx(Easing::BackOut.apply(2.0), 1.0));
        assert!(approx(Easing::QuadOut.apply(-1.0), 0.0));
    }

    #[test]
    fn should_interpolate_offset_tween() {
        let tween = Tween {
            from: 2.0,
            to: 5.0,
            duration: Duration::from_secs(1),
            easing: Easing::Linear,
        };
        assert!(approx(tween.value_at(Duration::from_millis(500)), 3.5));
        assert!(approx(tween.value_at(Duration::from_secs(3)), 5.0));
        assert!(tween.is_complete(Duration::from_secs(1)));
        assert!(!tween.is_complete(Duration::from_millis(999)));
    }

    #[test]
    fn should_jump_to_end_when_duration_is_zero() {
        let tween = Tween {
            from: 0.0,
            to: 1.0,
            duration: Duration::ZERO,
            easing: Easing::BackOut,
        };
        assert!(approx(tween.value_at(Duration::ZERO), 1.0));
    }
}
