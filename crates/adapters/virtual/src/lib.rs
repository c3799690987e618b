//! # healstation-adapter-virtual
//!
//! In-memory stand-in for a host engine, used by tests and the demo daemon.
//!
//! ## Provided behaviour
//!
//! | Concern | Behaviour |
//! |---------|-----------|
//! | Scene graph | Nodes with one parent; destroying a node destroys its subtree |
//! | Actors | Model root with `Legs`, `Torso` and `Head` parts plus vitals |
//! | Contacts | Overlap between a body part and a trigger volume, reported once when it begins |
//! | Tweens | Progressed by [`VirtualScene::advance`]; dropped when finished or when their node is gone |
//!
//! ## Dependency rule
//!
//! Depends on `healstation-app` (port traits) and `healstation-domain` only.

mod actor;
mod graph;
mod tweens;

pub use graph::{NodeKind, PartSpec};

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use healstation_app::ports::scene::{BillboardSpec, LabelSpec, TweenSpec, VolumeSpec};
use healstation_app::ports::{LivingTargets, SceneGateway};
use healstation_domain::contact::Contact;
use healstation_domain::error::{SceneError, StationError};
use healstation_domain::geometry::{Aabb, Vec3};
use healstation_domain::id::{ActorId, NodeId};
use healstation_domain::vitals::Vitals;

use actor::{ANCHOR_PART, Actor, RIG};
use graph::SceneGraph;
use tweens::ActiveTween;

#[derive(Debug, Default)]
struct SceneState {
    graph: SceneGraph,
    actors: HashMap<ActorId, Actor>,
    tweens: Vec<ActiveTween>,
    /// `(volume, body)` pairs overlapping at the last detection.
    touching: HashSet<(NodeId, NodeId)>,
    clock: Duration,
}

impl SceneState {
    fn part_bounds(&self, id: NodeId, part: &PartSpec) -> Option<Aabb> {
        let origin = match self.graph.owning_actor(id) {
            Some(actor) => self.actors.get(&actor)?.position,
            None => Vec3::ZERO,
        };
        Some(Aabb::new(origin + part.offset, part.size))
    }

    fn forget(&mut self, removed: &[(NodeId, NodeKind)]) {
        let ids: HashSet<NodeId> = removed.iter().map(|(id, _)| *id).collect();
        for (id, kind) in removed {
            if let NodeKind::Model(actor) = kind {
                self.actors.remove(actor);
            }
            for actor in self.actors.values_mut() {
                if actor.head == Some(*id) {
                    actor.head = None;
                }
            }
        }
        self.tweens.retain(|t| !ids.contains(&t.node));
        self.touching
            .retain(|(volume, body)| !ids.contains(volume) && !ids.contains(body));
    }
}

/// Virtual scene implementing both [`SceneGateway`] and [`LivingTargets`].
///
/// All state sits behind one mutex so the scene can be shared through an
/// `Arc` between the station service and whoever drives the world.
#[derive(Debug, Default)]
pub struct VirtualScene {
    state: Mutex<SceneState>,
}

impl VirtualScene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, SceneState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add a character with the standard rig, feet at `position`.
    pub fn spawn_actor(&self, name: impl Into<String>, position: Vec3, vitals: Vitals) -> ActorId {
        let mut state = self.lock();
        let id = ActorId::new();
        let root = state.graph.insert_root(NodeKind::Model(id));
        let mut head = None;
        for (part_name, offset, size) in RIG {
            let part = PartSpec {
                name: part_name.to_string(),
                offset,
                size,
            };
            let node = state.graph.insert_child(root, NodeKind::Part(part));
            if part_name == ANCHOR_PART {
                head = node.ok();
            }
        }
        let name = name.into();
        tracing::debug!(actor = %id, %name, "actor spawned");
        state.actors.insert(
            id,
            Actor {
                name,
                root,
                head,
                position,
                vitals,
            },
        );
        id
    }

    /// Add a lifeless part (a crate, a ball) at a world position.
    pub fn spawn_prop(&self, name: impl Into<String>, position: Vec3, size: Vec3) -> NodeId {
        let mut state = self.lock();
        let part = PartSpec {
            name: name.into(),
            offset: position,
            size,
        };
        state.graph.insert_root(NodeKind::Part(part))
    }

    /// Body parts of `actor`, head included.
    #[must_use]
    pub fn body_parts(&self, actor: ActorId) -> Vec<NodeId> {
        let state = self.lock();
        let Some(root) = state.actors.get(&actor).map(|a| a.root) else {
            return Vec::new();
        };
        state
            .graph
            .get(root)
            .map(|node| node.children.clone())
            .unwrap_or_default()
    }

    /// Teleport `actor` so its feet are at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::UnknownActor`] if the actor is gone.
    pub fn move_actor(&self, actor: ActorId, position: Vec3) -> Result<(), SceneError> {
        let mut state = self.lock();
        let entry = state
            .actors
            .get_mut(&actor)
            .ok_or(SceneError::UnknownActor(actor))?;
        entry.position = position;
        Ok(())
    }

    #[must_use]
    pub fn position(&self, actor: ActorId) -> Option<Vec3> {
        self.lock().actors.get(&actor).map(|a| a.position)
    }

    #[must_use]
    pub fn actor_name(&self, actor: ActorId) -> Option<String> {
        self.lock().actors.get(&actor).map(|a| a.name.clone())
    }

    /// Remove the actor and its whole model, including anything attached to it.
    pub fn remove_actor(&self, actor: ActorId) -> bool {
        let root = self.lock().actors.get(&actor).map(|a| a.root);
        root.is_some_and(|root| self.destroy(root))
    }

    /// Report body/volume overlaps that began since the previous call.
    ///
    /// Contacts are sorted by volume then body so runs are reproducible.
    pub fn detect_contacts(&self) -> Vec<Contact> {
        let mut state = self.lock();

        let mut volumes = Vec::new();
        let mut bodies = Vec::new();
        for (id, node) in state.graph.iter() {
            match &node.kind {
                NodeKind::Volume(spec) => volumes.push((id, Aabb::new(spec.position, spec.size))),
                NodeKind::Part(part) => {
                    if let Some(bounds) = state.part_bounds(id, part) {
                        bodies.push((id, bounds));
                    }
                }
                NodeKind::Billboard(_) | NodeKind::Label(_) | NodeKind::Model(_) => {}
            }
        }

        let mut current = HashSet::new();
        for (volume, volume_bounds) in &volumes {
            for (body, body_bounds) in &bodies {
                if volume_bounds.overlaps(body_bounds) {
                    current.insert((*volume, *body));
                }
            }
        }

        let mut began: Vec<Contact> = current
            .difference(&state.touching)
            .map(|(volume, body)| Contact {
                volume: *volume,
                body: *body,
            })
            .collect();
        began.sort_by_key(|c| (c.volume, c.body));
        state.touching = current;
        began
    }

    /// Move the scene clock forward and progress running tweens.
    pub fn advance(&self, dt: Duration) {
        let mut state = self.lock();
        state.clock = state.clock.saturating_add(dt);
        let now = state.clock;
        let SceneState { graph, tweens, .. } = &mut *state;
        tweens.retain(|tween| tween.apply(graph, now));
    }

    #[must_use]
    pub fn now(&self) -> Duration {
        self.lock().clock
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.lock().graph.node_count()
    }

    #[must_use]
    pub fn active_tweens(&self) -> usize {
        self.lock().tweens.len()
    }

    /// Every live billboard.
    #[must_use]
    pub fn billboards(&self) -> Vec<NodeId> {
        let state = self.lock();
        let mut ids: Vec<NodeId> = state
            .graph
            .iter()
            .filter(|(_, node)| matches!(node.kind, NodeKind::Billboard(_)))
            .map(|(id, _)| id)
            .collect();
        ids.sort();
        ids
    }

    /// Current (possibly animated) state of a billboard.
    #[must_use]
    pub fn billboard(&self, node: NodeId) -> Option<BillboardSpec> {
        match &self.lock().graph.get(node)?.kind {
            NodeKind::Billboard(spec) => Some(spec.clone()),
            _ => None,
        }
    }

    /// Parent of a node, `None` for roots and unknown nodes.
    #[must_use]
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.lock().graph.get(node)?.parent
    }

    /// The first label inside `billboard`.
    #[must_use]
    pub fn label_of(&self, billboard: NodeId) -> Option<LabelSpec> {
        let state = self.lock();
        state
            .graph
            .get(billboard)?
            .children
            .iter()
            .find_map(|child| match &state.graph.get(*child)?.kind {
                NodeKind::Label(spec) => Some(spec.clone()),
                _ => None,
            })
    }

    #[must_use]
    pub fn volume(&self, node: NodeId) -> Option<VolumeSpec> {
        match &self.lock().graph.get(node)?.kind {
            NodeKind::Volume(spec) => Some(spec.clone()),
            _ => None,
        }
    }
}

impl SceneGateway for VirtualScene {
    fn create_volume(&self, spec: VolumeSpec) -> Result<NodeId, StationError> {
        tracing::trace!(name = %spec.name, position = %spec.position, "creating volume");
        Ok(self.lock().graph.insert_root(NodeKind::Volume(spec)))
    }

    fn create_billboard(
        &self,
        parent: NodeId,
        spec: BillboardSpec,
    ) -> Result<NodeId, StationError> {
        Ok(self
            .lock()
            .graph
            .insert_child(parent, NodeKind::Billboard(spec))?)
    }

    fn create_label(&self, parent: NodeId, spec: LabelSpec) -> Result<NodeId, StationError> {
        Ok(self.lock().graph.insert_child(parent, NodeKind::Label(spec))?)
    }

    fn play_tween(&self, node: NodeId, spec: TweenSpec) -> Result<(), StationError> {
        let mut state = self.lock();
        if !state.graph.contains(node) {
            return Err(SceneError::MissingNode(node).into());
        }
        let tween = ActiveTween {
            node,
            spec,
            started: state.clock,
        };
        let now = state.clock;
        if tween.apply(&mut state.graph, now) {
            state.tweens.push(tween);
        }
        Ok(())
    }

    fn destroy(&self, node: NodeId) -> bool {
        let mut state = self.lock();
        let removed = state.graph.remove(node);
        if removed.is_empty() {
            return false;
        }
        state.forget(&removed);
        true
    }

    fn exists(&self, node: NodeId) -> bool {
        self.lock().graph.contains(node)
    }
}

impl LivingTargets for VirtualScene {
    fn resolve(&self, body: NodeId) -> Option<ActorId> {
        let state = self.lock();
        state
            .graph
            .owning_actor(body)
            .filter(|actor| state.actors.contains_key(actor))
    }

    fn vitals(&self, actor: ActorId) -> Option<Vitals> {
        self.lock().actors.get(&actor).map(|a| a.vitals)
    }

    fn set_health(&self, actor: ActorId, health: f64) -> Result<(), StationError> {
        let mut state = self.lock();
        let entry = state
            .actors
            .get_mut(&actor)
            .ok_or(SceneError::UnknownActor(actor))?;
        entry.vitals = entry.vitals.with_health(health);
        Ok(())
    }

    fn anchor(&self, actor: ActorId) -> Option<NodeId> {
        let state = self.lock();
        state
            .actors
            .get(&actor)?
            .head
            .filter(|head| state.graph.contains(*head))
    }
}
