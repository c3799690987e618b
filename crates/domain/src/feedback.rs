//! Feedback effect: the floating label shown over a character after a trigger.

use serde::{Deserialize, Serialize};

use crate::color::{Color3, DAMAGE_FEEDBACK_COLOR, HEAL_FEEDBACK_COLOR};
use crate::id::ActorId;
use crate::station::StationType;

/// Description of a label to display; rendering lives behind the scene port.
///
/// The effect only refers to its anchor. It never owns the character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackEffect {
    pub text: String,
    pub color: Color3,
    pub anchor: ActorId,
}

impl FeedbackEffect {
    /// Build the label for a trigger of `station_type` with magnitude `amount`.
    ///
    /// Integral amounts render without a fractional part (`"+20"`, `"-20"`);
    /// fractional ones keep it (`"-7.5"`).
    #[must_use]
    pub fn for_trigger(station_type: StationType, amount: f64, anchor: ActorId) -> Self {
        let (text, color) = match station_type {
            StationType::Heal => (format!("+{amount}"), HEAL_FEEDBACK_COLOR),
            StationType::Damage => (format!("-{amount}"), DAMAGE_FEEDBACK_COLOR),
        };
        Self {
            text,
            color,
            anchor,
        }
    }
}
