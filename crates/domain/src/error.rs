//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`StationError`] via `#[from]`.

use crate::id::{ActorId, NodeId};

/// Top-level error for station operations.
#[derive(Debug, thiserror::Error)]
pub enum StationError {
    #[error("validation error")]
    Validation(#[from] ValidationError),

    #[error("not found")]
    NotFound(#[from] NotFoundError),

    #[error("scene error")]
    Scene(#[from] SceneError),
}

/// A configuration or domain invariant was violated.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// Station amount must be a finite, strictly positive number.
    #[error("station amount must be positive, got {0}")]
    NonPositiveAmount(f64),

    /// Station position has a NaN or infinite coordinate.
    #[error("station position must be finite")]
    NonFinitePosition,

    /// Station type string is neither `HEAL` nor `DAMAGE`.
    #[error("unknown station type {0:?}")]
    UnknownStationType(String),

    /// Every trigger volume dimension must be strictly positive.
    #[error("part size must be positive on every axis")]
    NonPositivePartSize,

    /// Cooldown and animation durations cannot be negative or NaN.
    #[error("duration must be a finite, non-negative number of seconds")]
    NegativeDuration,

    /// Maximum health of a living target must be positive.
    #[error("max health must be positive, got {0}")]
    NonPositiveMaxHealth(f64),
}

/// The requested object does not exist.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} {id} not found")]
pub struct NotFoundError {
    pub kind: &'static str,
    pub id: String,
}

/// A scene-graph operation could not be performed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SceneError {
    /// The parent node was destroyed or never existed.
    #[error("parent node {0} does not exist")]
    MissingParent(NodeId),

    /// The node was destroyed or never existed.
    #[error("node {0} does not exist")]
    MissingNode(NodeId),

    /// The actor is not (or no longer) part of the scene.
    #[error("actor {0} is not in the scene")]
    UnknownActor(ActorId),
}
