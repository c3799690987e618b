//! Contact: the world event that arms a station.

use serde::{Deserialize, Serialize};

use crate::id::NodeId;

/// A body part started touching a trigger volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Contact {
    /// The trigger volume that was touched.
    pub volume: NodeId,
    /// The part that touched it. May or may not belong to a living target.
    pub body: NodeId,
}
