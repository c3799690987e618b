//! Station service: placing stations and reacting to contacts.
//!
//! The service owns every station, the volume → station bindings and the
//! task scheduler. All methods take `&mut self`: the host loop is single
//! threaded, and the cooldown flag set at the start of a trigger is the only
//! guard against a second contact in the same tick.

use std::collections::HashMap;
use std::time::Duration;

use healstation_domain::contact::Contact;
use healstation_domain::error::{NotFoundError, StationError};
use healstation_domain::id::{ActorId, NodeId, StationId};
use healstation_domain::station::{HealthChange, IgnoreReason, Station, StationConfig, StationType};
use healstation_domain::vitals::Vitals;

use crate::ports::scene::VolumeSpec;
use crate::ports::{LivingTargets, SceneGateway};
use crate::scheduler::{ScheduledTask, TaskOwner, TaskScheduler};
use crate::services::feedback_service::FeedbackService;
use crate::settings::StationSettings;

/// Result of a successful trigger.
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerOutcome {
    pub station_id: StationId,
    pub actor: ActorId,
    pub station_type: StationType,
    pub change: HealthChange,
    /// Billboard of the feedback label, `None` when it could not be shown.
    pub feedback: Option<NodeId>,
}

/// What a contact did.
#[derive(Debug, Clone, PartialEq)]
pub enum ContactOutcome {
    Triggered(TriggerOutcome),
    Ignored(IgnoreReason),
}

impl ContactOutcome {
    #[must_use]
    pub fn is_triggered(&self) -> bool {
        matches!(self, Self::Triggered(_))
    }
}

/// Application service for station placement, triggers and cooldowns.
pub struct StationService<S, T> {
    scene: S,
    targets: T,
    settings: StationSettings,
    feedback: FeedbackService,
    stations: HashMap<StationId, Station>,
    volumes: HashMap<NodeId, StationId>,
    scheduler: TaskScheduler,
}

impl<S: SceneGateway, T: LivingTargets> StationService<S, T> {
    /// Create a new service driving the given scene.
    pub fn new(scene: S, targets: T, settings: StationSettings, feedback: FeedbackService) -> Self {
        Self {
            scene,
            targets,
            settings,
            feedback,
            stations: HashMap::new(),
            volumes: HashMap::new(),
            scheduler: TaskScheduler::new(),
        }
    }

    /// Place a new, armed station.
    ///
    /// # Errors
    ///
    /// Returns [`StationError::Validation`] if the config is invalid, or a
    /// scene error if the trigger volume could not be created.
    pub fn create_station(&mut self, config: StationConfig) -> Result<StationId, StationError> {
        config.validate()?;

        let volume = self.scene.create_volume(VolumeSpec {
            name: config.display_name(),
            position: config.position,
            size: self.settings.part_size,
            color: self.settings.body_color(config.station_type),
            material: config.material.unwrap_or(self.settings.default_material),
            anchored: true,
            can_collide: false,
        })?;

        let id = StationId::new();
        tracing::info!(
            station = %config.display_name(),
            station_id = %id,
            kind = %config.station_type,
            amount = config.amount,
            position = %config.position,
            "station placed"
        );
        self.volumes.insert(volume, id);
        self.stations.insert(id, Station::new(id, config, volume));
        Ok(id)
    }

    /// Handle a body part starting to touch a trigger volume.
    ///
    /// Never fails: contacts that must not trigger are reported as
    /// [`ContactOutcome::Ignored`], and scene failures after the trigger are
    /// logged.
    pub fn on_contact(&mut self, contact: Contact) -> ContactOutcome {
        let Some(station) = self.station_for_volume(contact.volume) else {
            return Self::ignored(IgnoreReason::UnknownVolume, contact);
        };
        let Some(actor) = self.targets.resolve(contact.body) else {
            return Self::ignored(IgnoreReason::NoLivingTarget, contact);
        };
        let station_id = station.id;
        // Cooldown is checked before the target's health is read.
        let vitals = if station.is_active() {
            self.targets.vitals(actor)
        } else {
            None
        };
        let vitals = match station.check_contact(vitals) {
            Ok(vitals) => vitals,
            Err(reason) => return Self::ignored(reason, contact),
        };
        match self.trigger_effect(station_id, actor, vitals) {
            Some(outcome) => ContactOutcome::Triggered(outcome),
            None => Self::ignored(IgnoreReason::UnknownVolume, contact),
        }
    }

    fn ignored(reason: IgnoreReason, contact: Contact) -> ContactOutcome {
        tracing::trace!(%reason, volume = %contact.volume, body = %contact.body, "contact ignored");
        ContactOutcome::Ignored(reason)
    }

    fn trigger_effect(
        &mut self,
        station_id: StationId,
        actor: ActorId,
        vitals: Vitals,
    ) -> Option<TriggerOutcome> {
        let station = self.stations.get_mut(&station_id)?;
        // Lock first: nothing below may observe the station as armed.
        let change = station.trigger(actor, vitals);
        let station_type = station.station_type();

        if let Err(error) = self.targets.set_health(actor, change.resulting_health) {
            tracing::warn!(%station_id, %actor, %error, "failed to write target health");
        }

        let feedback = self.spawn_feedback(station_id, actor, &change);

        self.scheduler.schedule(
            TaskOwner::Station(station_id),
            self.settings.cooldown,
            ScheduledTask::RearmStation(station_id),
        );

        tracing::debug!(
            %station_id,
            %actor,
            kind = %station_type,
            from = change.prior_health,
            to = change.resulting_health,
            "station triggered"
        );

        Some(TriggerOutcome {
            station_id,
            actor,
            station_type,
            change,
            feedback,
        })
    }

    fn spawn_feedback(
        &mut self,
        station_id: StationId,
        actor: ActorId,
        change: &HealthChange,
    ) -> Option<NodeId> {
        let Some(anchor) = self.targets.anchor(actor) else {
            tracing::debug!(%station_id, %actor, "target has no anchor, skipping feedback");
            return None;
        };
        match self.feedback.show(&self.scene, anchor, &change.effect) {
            Ok(billboard) => {
                self.scheduler.schedule(
                    TaskOwner::Feedback(billboard),
                    self.feedback.lifetime(),
                    ScheduledTask::DestroyFeedback(billboard),
                );
                Some(billboard)
            }
            Err(error) => {
                tracing::warn!(%station_id, %actor, %error, "failed to show feedback");
                None
            }
        }
    }

    /// Move time forward, re-arming stations and removing expired feedback.
    ///
    /// Returns the number of tasks that ran.
    pub fn advance(&mut self, dt: Duration) -> usize {
        let due = self.scheduler.advance(dt);
        let count = due.len();
        for task in due {
            self.run_task(task);
        }
        count
    }

    fn run_task(&mut self, task: ScheduledTask) {
        match task {
            ScheduledTask::RearmStation(id) => {
                if let Some(station) = self.stations.get_mut(&id) {
                    station.rearm();
                    tracing::debug!(station_id = %id, "station re-armed");
                }
            }
            ScheduledTask::DestroyFeedback(node) => {
                if !self.scene.destroy(node) {
                    tracing::trace!(%node, "feedback already gone");
                }
            }
        }
    }

    /// Remove a station: cancel its pending re-arm and destroy its volume.
    ///
    /// Feedback it already spawned is left to expire on its own.
    ///
    /// # Errors
    ///
    /// Returns [`StationError::NotFound`] if no station has this id.
    pub fn destroy_station(&mut self, id: StationId) -> Result<(), StationError> {
        let station = self.stations.remove(&id).ok_or_else(|| NotFoundError {
            kind: "Station",
            id: id.to_string(),
        })?;
        let cancelled = self.scheduler.cancel_owner(TaskOwner::Station(id));
        self.volumes.remove(&station.volume);
        self.scene.destroy(station.volume);
        tracing::info!(station_id = %id, cancelled, "station removed");
        Ok(())
    }

    /// Remove every station and immediately destroy all live feedback.
    pub fn shutdown(&mut self) {
        let ids: Vec<StationId> = self.stations.keys().copied().collect();
        for id in ids {
            if let Err(error) = self.destroy_station(id) {
                tracing::warn!(station_id = %id, %error, "failed to remove station");
            }
        }
        for task in self.scheduler.drain() {
            self.run_task(task);
        }
    }

    /// Look up a station by id.
    ///
    /// # Errors
    ///
    /// Returns [`StationError::NotFound`] when no station with `id` exists.
    pub fn station(&self, id: StationId) -> Result<&Station, StationError> {
        self.stations.get(&id).ok_or_else(|| {
            NotFoundError {
                kind: "Station",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// Station bound to a trigger volume, if any.
    #[must_use]
    pub fn station_for_volume(&self, volume: NodeId) -> Option<&Station> {
        self.volumes.get(&volume).and_then(|id| self.stations.get(id))
    }

    pub fn stations(&self) -> impl Iterator<Item = &Station> {
        self.stations.values()
    }

    #[must_use]
    pub fn scheduler(&self) -> &TaskScheduler {
        &self.scheduler
    }
}
