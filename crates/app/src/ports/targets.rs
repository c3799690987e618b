//! Living targets port: characters that carry health.

use std::sync::Arc;

use healstation_domain::error::StationError;
use healstation_domain::id::{ActorId, NodeId};
use healstation_domain::vitals::Vitals;

/// Lookup and mutation of health-bearing characters in the scene.
pub trait LivingTargets {
    /// Map a touching body part to the character it belongs to.
    ///
    /// Returns `None` for props, projectiles and anything else without health.
    fn resolve(&self, body: NodeId) -> Option<ActorId>;

    /// Current vitals, or `None` if the actor left the scene.
    fn vitals(&self, actor: ActorId) -> Option<Vitals>;

    /// Overwrite the actor's current health.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::UnknownActor`](healstation_domain::error::SceneError::UnknownActor)
    /// if the actor is gone.
    fn set_health(&self, actor: ActorId, health: f64) -> Result<(), StationError>;

    /// Node feedback labels attach to (the head), if the actor still has one.
    fn anchor(&self, actor: ActorId) -> Option<NodeId>;
}

impl<T: LivingTargets + ?Sized> LivingTargets for Arc<T> {
    fn resolve(&self, body: NodeId) -> Option<ActorId> {
        (**self).resolve(body)
    }

    fn vitals(&self, actor: ActorId) -> Option<Vitals> {
        (**self).vitals(actor)
    }

    fn set_health(&self, actor: ActorId, health: f64) -> Result<(), StationError> {
        (**self).set_health(actor, health)
    }

    fn anchor(&self, actor: ActorId) -> Option<NodeId> {
        (**self).anchor(actor)
    }
}
