//! # healstation-domain
//!
//! Pure domain model for heal/damage stations placed in a 3D world.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, geometry, colors
//! - Define **Stations** (trigger volumes that heal or damage on contact)
//! - Define **Vitals** (the health pair of a living target)
//! - Define **Feedback effects** (the floating label shown after a trigger)
//! - Define **Easing** curves used to animate feedback
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;

pub mod color;
pub mod contact;
pub mod easing;
pub mod feedback;
pub mod geometry;
pub mod station;
pub mod vitals;
