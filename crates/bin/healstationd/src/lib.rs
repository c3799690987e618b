//! # healstationd
//!
//! Composition root: wires the virtual scene into the station service and
//! drives the demo world loop.
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer: no station logic belongs here.

pub mod config;
pub mod simulation;
