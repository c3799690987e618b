//! Running property animations.

use std::time::Duration;

use healstation_app::ports::scene::{TweenProperty, TweenSpec};
use healstation_domain::id::NodeId;

use crate::graph::{NodeKind, SceneGraph};

#[derive(Debug, Clone, Copy)]
pub struct ActiveTween {
    pub node: NodeId,
    pub spec: TweenSpec,
    pub started: Duration,
}

impl ActiveTween {
    /// Write the tween's value at `now` into its node.
    ///
    /// Returns `false` once the tween has finished or its node is gone, so
    /// callers can drop it.
    pub fn apply(&self, graph: &mut SceneGraph, now: Duration) -> bool {
        let Some(node) = graph.get_mut(self.node) else {
            return false;
        };
        let elapsed = now.saturating_sub(self.started);
        let value = self.spec.tween.value_at(elapsed);
        match (&mut node.kind, self.spec.property) {
            (NodeKind::Billboard(billboard), TweenProperty::OffsetY) => {
                billboard.offset.y = value;
            }
            (NodeKind::Label(label), TweenProperty::TextTransparency) => {
                label.text_transparency = value;
            }
            (NodeKind::Label(label), TweenProperty::StrokeTransparency) => {
                label.stroke_transparency = value;
            }
            (kind, property) => {
                tracing::trace!(node = %self.node, ?property, ?kind, "tween does not apply to node");
                return false;
            }
        }
        !self.spec.tween.is_complete(elapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use healstation_app::ports::scene::{BillboardSpec, UiSize};
    use healstation_domain::easing::{Easing, Tween};
    use healstation_domain::geometry::Vec3;

    fn billboard(graph: &mut SceneGraph) -> NodeId {
        graph.insert_root(NodeKind::Billboard(BillboardSpec {
            offset: Vec3::new(0.0, 2.0, 0.0),
            size: UiSize {
                width: 200,
                height: 50,
            },
            always_on_top: true,
        }))
    }

    fn rise(node: NodeId) -> ActiveTween {
        ActiveTween {
            node,
            spec: TweenSpec {
                property: TweenProperty::OffsetY,
                tween: Tween {
                    from: 2.0,
                    to: 5.0,
                    duration: Duration::from_secs(1),
                    easing: Easing::Linear,
                },
            },
            started: Duration::ZERO,
        }
    }

    fn offset_y(graph: &SceneGraph, node: NodeId) -> f64 {
        match &graph.get(node).unwrap().kind {
            NodeKind::Billboard(b) => b.offset.y,
            other => panic!("not a billboard: {other:?}"),
        }
    }

    #[test]
    fn should_move_billboard_while_running() {
        let mut graph = SceneGraph::default();
        let node = billboard(&mut graph);

        assert!(rise(node).apply(&mut graph, Duration::from_millis(500)));
        assert!((offset_y(&graph, node) - 3.5).abs() < 1e-9);
    }

    #[test]
    fn should_finish_at_target_value() {
        let mut graph = SceneGraph::default();
        let node = billboard(&mut graph);

        assert!(!rise(node).apply(&mut graph, Duration::from_secs(1)));
        assert!((offset_y(&graph, node) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn should_stop_when_node_is_gone() {
        let mut graph = SceneGraph::default();
        let node = billboard(&mut graph);
        graph.remove(node);

        assert!(!rise(node).apply(&mut graph, Duration::from_millis(100)));
    }
}
