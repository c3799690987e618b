//! # healstation-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `SceneGateway`: create trigger volumes, billboards, labels, tweens; destroy nodes
//!   - `LivingTargets`: resolve touching parts to characters, read/write health
//! - Define **driving/inbound** use-cases:
//!   - `StationService`: place stations, react to contacts, run cooldowns
//!   - `FeedbackService`: build the floating label animation
//! - Provide **in-process infrastructure** (the cancellable task scheduler)
//!   that doesn't need IO
//!
//! ## Dependency rule
//! Depends on `healstation-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod scheduler;
pub mod services;
pub mod settings;
