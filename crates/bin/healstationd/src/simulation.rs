//! Demo world: the configured stations plus one character walking between
//! them, driven at a fixed tick.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use healstation_adapter_virtual::VirtualScene;
use healstation_app::ports::LivingTargets;
use healstation_app::services::feedback_service::FeedbackService;
use healstation_app::services::station_service::{ContactOutcome, StationService};
use healstation_domain::error::StationError;
use healstation_domain::geometry::Vec3;
use healstation_domain::id::ActorId;
use healstation_domain::vitals::Vitals;
use tokio::time::MissedTickBehavior;

use crate::config::Config;

/// Where the walker (re)appears.
pub const SPAWN_POINT: Vec3 = Vec3::ZERO;

/// Distance in front of a pad where the walker steps off before moving on.
const STEP_OFF: f64 = 8.0;

const WALKER_MAX_HEALTH: f64 = 100.0;

type Service = StationService<Arc<VirtualScene>, Arc<VirtualScene>>;

/// What happened during one tick.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub contacts: usize,
    pub triggered: usize,
    pub tasks: usize,
    pub respawned: bool,
}

/// Totals for a whole run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub elapsed: Duration,
    pub ticks: u64,
    pub triggers: usize,
    pub respawns: usize,
}

#[derive(Debug, Clone, Copy)]
struct Walker {
    actor: ActorId,
    next: usize,
}

pub struct Simulation {
    scene: Arc<VirtualScene>,
    service: Service,
    route: Vec<Vec3>,
    speed: f64,
    walker_vitals: Vitals,
    walker: Option<Walker>,
    summary: RunSummary,
}

impl Simulation {
    /// Build the scene and place every configured station.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings are invalid or a station could not
    /// be placed.
    pub fn new(config: &Config) -> Result<Self, StationError> {
        let scene = Arc::new(VirtualScene::new());
        let settings = config.station_settings()?;
        settings.validate()?;
        let feedback = FeedbackService::new(config.feedback_settings()?);
        let mut service = StationService::new(
            Arc::clone(&scene),
            Arc::clone(&scene),
            settings,
            feedback,
        );

        let mut route = Vec::new();
        for placement in config.placements() {
            let pad = Vec3::new(placement.position.x, 0.0, placement.position.z);
            service.create_station(placement)?;
            route.push(pad);
            route.push(pad + Vec3::new(0.0, 0.0, STEP_OFF));
        }

        Ok(Self {
            scene,
            service,
            route,
            speed: config.simulation.walker_speed,
            walker_vitals: Vitals::new(WALKER_MAX_HEALTH, WALKER_MAX_HEALTH)?,
            walker: None,
            summary: RunSummary::default(),
        })
    }

    /// Put a full-health walker at [`SPAWN_POINT`], replacing any previous one.
    pub fn spawn_walker(&mut self) -> ActorId {
        if let Some(walker) = self.walker.take() {
            self.scene.remove_actor(walker.actor);
        }
        let actor = self
            .scene
            .spawn_actor("walker", SPAWN_POINT, self.walker_vitals);
        self.walker = Some(Walker { actor, next: 0 });
        actor
    }

    /// Advance the world by `dt`: move, resolve contacts, run due tasks and
    /// progress animations.
    pub fn tick(&mut self, dt: Duration) -> TickReport {
        let mut report = TickReport::default();
        self.walk(dt);

        for contact in self.scene.detect_contacts() {
            report.contacts += 1;
            if let ContactOutcome::Triggered(outcome) = self.service.on_contact(contact) {
                report.triggered += 1;
                tracing::info!(
                    actor = %outcome.actor,
                    kind = %outcome.station_type,
                    label = %outcome.change.effect.text,
                    from = outcome.change.prior_health,
                    to = outcome.change.resulting_health,
                    "health changed"
                );
            }
        }

        if self.walker_is_dead() {
            tracing::info!("walker died, respawning");
            self.spawn_walker();
            report.respawned = true;
        }

        report.tasks = self.service.advance(dt);
        self.scene.advance(dt);

        self.summary.elapsed = self.summary.elapsed.saturating_add(dt);
        self.summary.ticks += 1;
        self.summary.triggers += report.triggered;
        self.summary.respawns += usize::from(report.respawned);
        report
    }

    fn walk(&mut self, dt: Duration) {
        let Some(walker) = self.walker.as_mut() else {
            return;
        };
        let Some(&target) = self.route.get(walker.next) else {
            return;
        };
        let Some(position) = self.scene.position(walker.actor) else {
            return;
        };

        let delta = target - position;
        let distance = delta.length();
        let step = self.speed * dt.as_secs_f64();
        let next = if distance <= step {
            walker.next = (walker.next + 1) % self.route.len();
            target
        } else {
            position + delta.scale(step / distance)
        };
        if let Err(error) = self.scene.move_actor(walker.actor, next) {
            tracing::warn!(%error, "walker lost");
            self.walker = None;
        }
    }

    fn walker_is_dead(&self) -> bool {
        self.walker.is_some_and(|walker| {
            self.scene
                .vitals(walker.actor)
                .is_none_or(|vitals| !vitals.is_alive())
        })
    }

    /// Remove every station, pending feedback and the walker.
    pub fn shutdown(&mut self) {
        self.service.shutdown();
        if let Some(walker) = self.walker.take() {
            self.scene.remove_actor(walker.actor);
        }
    }

    #[must_use]
    pub fn walker(&self) -> Option<ActorId> {
        self.walker.map(|walker| walker.actor)
    }

    #[must_use]
    pub fn route(&self) -> &[Vec3] {
        &self.route
    }

    #[must_use]
    pub fn scene(&self) -> &VirtualScene {
        &self.scene
    }

    #[must_use]
    pub fn service(&self) -> &Service {
        &self.service
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.summary.elapsed
    }

    #[must_use]
    pub fn summary(&self) -> RunSummary {
        self.summary
    }
}

/// Run the demo world until `shutdown` resolves or the configured run time
/// has elapsed, then clean the scene up.
///
/// The world advances by exactly one configured tick per timer tick, so a
/// slow host slows the world down instead of making it skip.
///
/// # Errors
///
/// Returns an error if the world could not be built.
pub async fn run(
    config: &Config,
    shutdown: impl Future<Output = ()>,
) -> Result<RunSummary, StationError> {
    let mut simulation = Simulation::new(config)?;
    simulation.spawn_walker();

    let tick = config.tick();
    let deadline = config.run_for();
    let mut interval = tokio::time::interval(tick);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                simulation.tick(tick);
                if deadline.is_some_and(|deadline| simulation.elapsed() >= deadline) {
                    tracing::info!("run time elapsed");
                    break;
                }
            }
            () = &mut shutdown => {
                tracing::info!("shutdown requested");
                break;
            }
        }
    }

    let summary = simulation.summary();
    simulation.shutdown();
    Ok(summary)
}
