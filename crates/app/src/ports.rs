//! Port definitions: traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the host
//! engine. They are defined here (in `app`) so that both the use-case layer
//! and the adapter layer can depend on them without creating circular
//! dependencies.

pub mod scene;
pub mod targets;

pub use scene::SceneGateway;
pub use targets::LivingTargets;
