//! # healstationd: healing and damage station daemon
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Initialise structured logging
//! - Place the configured stations in a virtual scene
//! - Drive the world at a fixed tick until interrupted or the run time is up
//! - Remove every station and pending feedback on exit

use healstationd::config::Config;
use healstationd::simulation;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    let filter =
        EnvFilter::try_new(&config.logging.filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!(
        stations = config.placements().len(),
        tick_hz = config.simulation.tick_hz,
        "healstationd starting"
    );
    tracing::info!(
        cooldown_secs = config.stations.cooldown_secs,
        animation_secs = config.feedback.animation_secs,
        "station timings"
    );
    match config.run_for() {
        Some(limit) => tracing::info!(run_secs = limit.as_secs_f64(), "running for a fixed time"),
        None => tracing::info!("running until interrupted"),
    }

    let summary = simulation::run(&config, interrupted()).await?;

    tracing::info!(
        elapsed_secs = summary.elapsed.as_secs_f64(),
        ticks = summary.ticks,
        triggers = summary.triggers,
        respawns = summary.respawns,
        "healstationd stopped"
    );
    Ok(())
}

async fn interrupted() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(%error, "cannot listen for ctrl-c, running until the run time elapses");
        std::future::pending::<()>().await;
    }
}
