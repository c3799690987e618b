//! Virtual characters: a model root with legs, torso and head.

use healstation_domain::geometry::Vec3;
use healstation_domain::id::NodeId;
use healstation_domain::vitals::Vitals;

/// Body parts every actor gets, as `(name, offset from feet, size)`.
pub const RIG: [(&str, Vec3, Vec3); 3] = [
    ("Legs", Vec3::new(0.0, 1.0, 0.0), Vec3::new(2.0, 2.0, 1.0)),
    ("Torso", Vec3::new(0.0, 3.0, 0.0), Vec3::new(2.0, 2.0, 1.0)),
    ("Head", Vec3::new(0.0, 4.5, 0.0), Vec3::new(1.0, 1.0, 1.0)),
];

/// Name of the rig part feedback labels attach to.
pub const ANCHOR_PART: &str = "Head";

#[derive(Debug, Clone)]
pub struct Actor {
    pub name: String,
    pub root: NodeId,
    pub head: Option<NodeId>,
    /// Position of the actor's feet.
    pub position: Vec3,
    pub vitals: Vitals,
}
