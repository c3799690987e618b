//! Feedback service: builds the floating label shown after a trigger.
//!
//! The label rises from the anchor while fading out. Cleanup is not tied to
//! the animation: the caller schedules destruction of the returned
//! billboard after [`FeedbackService::lifetime`].

use std::time::Duration;

use healstation_domain::easing::Tween;
use healstation_domain::error::StationError;
use healstation_domain::feedback::FeedbackEffect;
use healstation_domain::geometry::Vec3;
use healstation_domain::id::NodeId;

use crate::ports::SceneGateway;
use crate::ports::scene::{BillboardSpec, LabelSpec, TweenProperty, TweenSpec};
use crate::settings::FeedbackSettings;

/// Application service that turns a [`FeedbackEffect`] into scene nodes.
#[derive(Debug, Clone, Default)]
pub struct FeedbackService {
    settings: FeedbackSettings,
}

impl FeedbackService {
    #[must_use]
    pub fn new(settings: FeedbackSettings) -> Self {
        Self { settings }
    }

    /// How long a label stays in the scene before it is destroyed.
    #[must_use]
    pub fn lifetime(&self) -> Duration {
        self.settings.animation_duration
    }

    /// Show `effect` above `anchor` and start its animations.
    ///
    /// Returns the billboard root; destroying it removes the whole effect.
    ///
    /// # Errors
    ///
    /// Returns a scene error if the anchor vanished or a node could not be
    /// created. Any partially built billboard is destroyed first.
    pub fn show(
        &self,
        scene: &impl SceneGateway,
        anchor: NodeId,
        effect: &FeedbackEffect,
    ) -> Result<NodeId, StationError> {
        let billboard = scene.create_billboard(
            anchor,
            BillboardSpec {
                offset: Vec3::new(0.0, self.settings.offset_start, 0.0),
                size: self.settings.size,
                always_on_top: true,
            },
        )?;

        if let Err(err) = self.decorate(scene, billboard, effect) {
            scene.destroy(billboard);
            return Err(err);
        }
        Ok(billboard)
    }

    fn decorate(
        &self,
        scene: &impl SceneGateway,
        billboard: NodeId,
        effect: &FeedbackEffect,
    ) -> Result<(), StationError> {
        let label = scene.create_label(
            billboard,
            LabelSpec {
                text: effect.text.clone(),
                text_color: effect.color,
                stroke_color: self.settings.stroke_color,
                text_transparency: 0.0,
                stroke_transparency: 0.0,
                background_transparency: 1.0,
                text_scaled: true,
                font: self.settings.font,
            },
        )?;

        scene.play_tween(
            billboard,
            self.tween(TweenProperty::OffsetY, self.settings.offset_start, self.settings.offset_end),
        )?;
        scene.play_tween(label, self.tween(TweenProperty::TextTransparency, 0.0, 1.0))?;
        scene.play_tween(label, self.tween(TweenProperty::StrokeTransparency, 0.0, 1.0))?;
        Ok(())
    }

    fn tween(&self, property: TweenProperty, from: f64, to: f64) -> TweenSpec {
        TweenSpec {
            property,
            tween: Tween {
                from,
                to,
                duration: self.settings.animation_duration,
                easing: self.settings.easing,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Mutex;

    use healstation_domain::error::SceneError;
    use healstation_domain::id::ActorId;
    use healstation_domain::station::StationType;

    use crate::ports::scene::VolumeSpec;

    /// Records every call; refuses to parent anything to unknown nodes.
    #[derive(Default)]
    struct RecordingScene {
        alive: Mutex<HashSet<NodeId>>,
        labels: Mutex<Vec<LabelSpec>>,
        billboards: Mutex<Vec<BillboardSpec>>,
        tweens: Mutex<Vec<(NodeId, TweenSpec)>>,
        fail_labels: bool,
    }

    impl RecordingScene {
        fn with_node(node: NodeId) -> Self {
            let scene = Self::default();
            scene.alive.lock().unwrap().insert(node);
            scene
        }

        fn spawn(&self, parent: NodeId) -> Result<NodeId, StationError> {
            let mut alive = self.alive.lock().unwrap();
            if !alive.contains(&parent) {
                return Err(SceneError::MissingParent(parent).into());
            }
            let id = NodeId::new();
            alive.insert(id);
            Ok(id)
        }
    }

    impl SceneGateway for RecordingScene {
        fn create_volume(&self, _spec: VolumeSpec) -> Result<NodeId, StationError> {
            let id = NodeId::new();
            self.alive.lock().unwrap().insert(id);
            Ok(id)
        }

        fn create_billboard(
            &self,
            parent: NodeId,
            spec: BillboardSpec,
        ) -> Result<NodeId, StationError> {
            let id = self.spawn(parent)?;
            self.billboards.lock().unwrap().push(spec);
            Ok(id)
        }

        fn create_label(&self, parent: NodeId, spec: LabelSpec) -> Result<NodeId, StationError> {
            if self.fail_labels {
                return Err(SceneError::MissingParent(parent).into());
            }
            let id = self.spawn(parent)?;
            self.labels.lock().unwrap().push(spec);
            Ok(id)
        }

        fn play_tween(&self, node: NodeId, spec: TweenSpec) -> Result<(), StationError> {
            self.tweens.lock().unwrap().push((node, spec));
            Ok(())
        }

        fn destroy(&self, node: NodeId) -> bool {
            self.alive.lock().unwrap().remove(&node)
        }

        fn exists(&self, node: NodeId) -> bool {
            self.alive.lock().unwrap().contains(&node)
        }
    }

    fn heal_effect() -> FeedbackEffect {
        FeedbackEffect::for_trigger(StationType::Heal, 20.0, ActorId::new())
    }

    #[test]
    fn should_create_billboard_above_anchor() {
        let head = NodeId::new();
        let scene = RecordingScene::with_node(head);
        let service = FeedbackService::default();

        let billboard = service.show(&scene, head, &heal_effect()).unwrap();

        assert!(scene.exists(billboard));
        let billboards = scene.billboards.lock().unwrap();
        assert_eq!(billboards.len(), 1);
        assert!(billboards[0].always_on_top);
        assert!((billboards[0].offset.y - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn should_create_label_with_effect_text_and_color() {
        let head = NodeId::new();
        let scene = RecordingScene::with_node(head);
        let effect = heal_effect();

        FeedbackService::default().show(&scene, head, &effect).unwrap();

        let labels = scene.labels.lock().unwrap();
        assert_eq!(labels[0].text, "+20");
        assert_eq!(labels[0].text_color, effect.color);
        assert!(labels[0].text_scaled);
        assert!((labels[0].background_transparency - 1.0).abs() < f64::EPSILON);
        assert!(labels[0].stroke_transparency.abs() < f64::EPSILON);
    }

    #[test]
    fn should_animate_rise_and_fade_over_animation_duration() {
        let head = NodeId::new();
        let scene = RecordingScene::with_node(head);

        let billboard = FeedbackService::default()
            .show(&scene, head, &heal_effect())
            .unwrap();

        let tweens = scene.tweens.lock().unwrap();
        assert_eq!(tweens.len(), 3);
        let (node, rise) = tweens[0];
        assert_eq!(node, billboard);
        assert_eq!(rise.property, TweenProperty::OffsetY);
        assert!((rise.tween.to - 5.0).abs() < f64::EPSILON);

        let properties: HashSet<TweenProperty> = tweens.iter().map(|(_, t)| t.property).collect();
        assert!(properties.contains(&TweenProperty::TextTransparency));
        assert!(properties.contains(&TweenProperty::StrokeTransparency));
        for (_, spec) in tweens.iter() {
            assert_eq!(spec.tween.duration, Duration::from_secs(1));
        }
    }

    #[test]
    fn should_fail_when_anchor_is_gone() {
        let scene = RecordingScene::default();
        let result = FeedbackService::default().show(&scene, NodeId::new(), &heal_effect());
        assert!(matches!(
            result,
            Err(StationError::Scene(SceneError::MissingParent(_)))
        ));
    }

    #[test]
    fn should_destroy_billboard_when_label_creation_fails() {
        let head = NodeId::new();
        let scene = RecordingScene {
            fail_labels: true,
            ..RecordingScene::with_node(head)
        };

        let result = FeedbackService::default().show(&scene, head, &heal_effect());

        assert!(result.is_err());
        assert_eq!(scene.alive.lock().unwrap().len(), 1);
    }

    #[test]
    fn should_report_configured_lifetime() {
        let service = FeedbackService::new(FeedbackSettings {
            animation_duration: Duration::from_millis(250),
            ..FeedbackSettings::default()
        });
        assert_eq!(service.lifetime(), Duration::from_millis(250));
    }
}
