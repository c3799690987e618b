//! Node tree backing the virtual scene.
//!
//! Every node has at most one parent; destroying a node destroys its whole
//! subtree, the way a host engine tears down a model and its attachments.

use std::collections::HashMap;

use healstation_app::ports::scene::{BillboardSpec, LabelSpec, VolumeSpec};
use healstation_domain::error::SceneError;
use healstation_domain::geometry::Vec3;
use healstation_domain::id::{ActorId, NodeId};

/// A physical part that is not a trigger volume (limbs, props).
#[derive(Debug, Clone, PartialEq)]
pub struct PartSpec {
    pub name: String,
    /// Offset from the owning actor's position, or the world position for
    /// parts that do not belong to an actor.
    pub offset: Vec3,
    pub size: Vec3,
}

/// What a node is.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Volume(VolumeSpec),
    Billboard(BillboardSpec),
    Label(LabelSpec),
    /// Root of an actor's model.
    Model(ActorId),
    Part(PartSpec),
}

#[derive(Debug, Clone)]
pub struct Node {
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub kind: NodeKind,
}

#[derive(Debug, Default)]
pub struct SceneGraph {
    nodes: HashMap<NodeId, Node>,
}

impl SceneGraph {
    pub fn insert_root(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId::new();
        self.nodes.insert(
            id,
            Node {
                parent: None,
                children: Vec::new(),
                kind,
            },
        );
        id
    }

    pub fn insert_child(&mut self, parent: NodeId, kind: NodeKind) -> Result<NodeId, SceneError> {
        let id = NodeId::new();
        self.nodes
            .get_mut(&parent)
            .ok_or(SceneError::MissingParent(parent))?
            .children
            .push(id);
        self.nodes.insert(
            id,
            Node {
                parent: Some(parent),
                children: Vec::new(),
                kind,
            },
        );
        Ok(id)
    }

    /// Remove `id` and its descendants, returning what was removed.
    ///
    /// Unknown ids remove nothing.
    pub fn remove(&mut self, id: NodeId) -> Vec<(NodeId, NodeKind)> {
        let Some(root) = self.nodes.get(&id) else {
            return Vec::new();
        };
        let parent = root.parent;
        if let Some(parent) = parent.and_then(|p| self.nodes.get_mut(&p)) {
            parent.children.retain(|child| *child != id);
        }

        let mut removed = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.remove(&current) {
                stack.extend(node.children);
                removed.push((current, node.kind));
            }
        }
        removed
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The actor owning `id`, found by walking up to the nearest model root.
    pub fn owning_actor(&self, id: NodeId) -> Option<ActorId> {
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.nodes.get(&node_id)?;
            if let NodeKind::Model(actor) = node.kind {
                return Some(actor);
            }
            current = node.parent;
        }
        None
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().map(|(id, node)| (*id, node))
    }
}
