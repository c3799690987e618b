//! Scene gateway port: the slice of the host engine a station needs.
//!
//! Implementations own the actual scene graph (a game engine, or the
//! in-memory virtual scene). Node handles are opaque [`NodeId`]s.

use std::sync::Arc;

use healstation_domain::color::Color3;
use healstation_domain::easing::Tween;
use healstation_domain::error::StationError;
use healstation_domain::geometry::Vec3;
use healstation_domain::id::NodeId;
use healstation_domain::station::Material;
use serde::Deserialize;

/// A visible box placed in the world.
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeSpec {
    pub name: String,
    pub position: Vec3,
    pub size: Vec3,
    pub color: Color3,
    pub material: Material,
    /// Fixed in place, unaffected by physics.
    pub anchored: bool,
    /// `false` lets bodies pass through while still reporting contacts.
    pub can_collide: bool,
}

/// On-screen size of a UI surface, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiSize {
    pub width: u32,
    pub height: u32,
}

/// A UI surface that follows a node in the world.
#[derive(Debug, Clone, PartialEq)]
pub struct BillboardSpec {
    /// Offset from the parent node, in studs.
    pub offset: Vec3,
    pub size: UiSize,
    /// Render above any geometry that would occlude it.
    pub always_on_top: bool,
}

/// Label typeface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum Font {
    #[default]
    FredokaOne,
    SourceSans,
    Arcade,
}

/// A text element filling its parent surface.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelSpec {
    pub text: String,
    pub text_color: Color3,
    pub stroke_color: Color3,
    /// 0 is opaque, 1 is invisible.
    pub text_transparency: f64,
    pub stroke_transparency: f64,
    pub background_transparency: f64,
    pub text_scaled: bool,
    pub font: Font,
}

/// Animated property of a UI node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TweenProperty {
    /// Vertical component of a billboard offset.
    OffsetY,
    TextTransparency,
    StrokeTransparency,
}

/// One property animation to play on a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenSpec {
    pub property: TweenProperty,
    pub tween: Tween,
}

/// Creates and destroys scene nodes on behalf of the application.
pub trait SceneGateway {
    /// Place a trigger volume that reports contacts.
    ///
    /// # Errors
    ///
    /// Returns a scene error if the host refuses to create the node.
    fn create_volume(&self, spec: VolumeSpec) -> Result<NodeId, StationError>;

    /// Attach a billboard surface to `parent`.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::MissingParent`](healstation_domain::error::SceneError::MissingParent)
    /// when `parent` no longer exists.
    fn create_billboard(&self, parent: NodeId, spec: BillboardSpec)
    -> Result<NodeId, StationError>;

    /// Add a text label inside a billboard.
    ///
    /// # Errors
    ///
    /// Returns a scene error when `parent` no longer exists.
    fn create_label(&self, parent: NodeId, spec: LabelSpec) -> Result<NodeId, StationError>;

    /// Start a fire-and-forget property animation on `node`.
    ///
    /// # Errors
    ///
    /// Returns a scene error when `node` no longer exists.
    fn play_tween(&self, node: NodeId, spec: TweenSpec) -> Result<(), StationError>;

    /// Destroy `node` and all of its descendants.
    ///
    /// Destroying a node that is already gone is a no-op returning `false`.
    fn destroy(&self, node: NodeId) -> bool;

    fn exists(&self, node: NodeId) -> bool;
}

impl<T: SceneGateway + ?Sized> SceneGateway for Arc<T> {
    fn create_volume(&self, spec: VolumeSpec) -> Result<NodeId, StationError> {
        (**self).create_volume(spec)
    }

    fn create_billboard(
        &self,
        parent: NodeId,
        spec: BillboardSpec,
    ) -> Result<NodeId, StationError> {
        (**self).create_billboard(parent, spec)
    }

    fn create_label(&self, parent: NodeId, spec: LabelSpec) -> Result<NodeId, StationError> {
        (**self).create_label(parent, spec)
    }

    fn play_tween(&self, node: NodeId, spec: TweenSpec) -> Result<(), StationError> {
        (**self).play_tween(node, spec)
    }

    fn destroy(&self, node: NodeId) -> bool {
        (**self).destroy(node)
    }

    fn exists(&self, node: NodeId) -> bool {
        (**self).exists(node)
    }
}
