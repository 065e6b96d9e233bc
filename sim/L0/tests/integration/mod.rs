//! Integration tests for the sim-* crate ecosystem.
//!
//! These tests drive whole models through the public API:
//! - Setup lifecycle → setup failures surfaced to the caller
//! - Ligament forces on a prescribed slider
//! - Sampled reporting through the model's event loop
//! - Three-phase geometry scaling

pub mod common;
pub mod ligament_pipeline;
pub mod reporting;
pub mod scaling;
pub mod setup;
