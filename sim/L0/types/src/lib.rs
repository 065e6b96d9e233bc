//! Core types shared by the staged force-element crates.
//!
//! This crate provides the data the lifecycle, force and reporting crates
//! exchange with the surrounding simulation:
//!
//! - [`SimState`] - Time, generalized coordinates, body poses and typed
//!   extension slots owned by the caller
//! - [`SystemLayout`] - Slot reservations made while a model is assembled
//! - [`BodyForces`] - The per-step spatial force accumulator
//! - [`ScaleSet`] - Per-body geometric scale factors
//! - [`Kinematics`] - The narrow contract to the multibody engine
//!
//! # Design Philosophy
//!
//! The simulation state is **externally owned**. Components never construct
//! or retain it; they receive it by reference for the duration of one call.
//! Quantities a component needs to keep per state (a disabled flag, a scratch
//! length) live in extension slots reserved once during system assembly and
//! addressed afterwards by an opaque index, never by name.
//!
//! # Layer 0
//!
//! This is a Layer 0 crate with **zero Bevy dependencies**.
//!
//! # Example
//!
//! ```
//! use sim_types::{BodyId, SimState, SliderKinematics, SystemLayout, Kinematics};
//! use nalgebra::Vector3;
//!
//! let kinematics = SliderKinematics::new()
//!     .with_slider(Vector3::new(1.0, 0.0, 0.0), Vector3::x());
//!
//! let mut layout = SystemLayout::new();
//! let scratch = layout.reserve_real("scratch", 0.0);
//!
//! let mut state = SimState::new(&layout, kinematics.num_coordinates(), kinematics.num_bodies());
//! state.set_real(scratch, 2.5);
//! state.realize_position(&kinematics);
//!
//! assert_eq!(state.real(scratch), 2.5);
//! assert_eq!(state.body_pose(BodyId::new(1)).translation.vector.x, 1.0);
//! ```

#![doc(html_root_url = "https://docs.rs/sim-types/0.7.0")]
#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(
    clippy::missing_const_for_fn,
    clippy::suboptimal_flops,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::missing_errors_doc
)]

mod body;
mod config;
mod error;
mod kinematics;
mod scale;
mod state;

pub use body::{BodyForces, BodyId, CoordinateId, SpatialForce};
pub use config::SimulationConfig;
pub use error::SimError;
pub use kinematics::{Kinematics, Slider, SliderKinematics};
pub use scale::ScaleSet;
pub use state::{FlagSlot, RealSlot, SimState, Stage, SystemLayout};

// Re-export math types for convenience
pub use nalgebra::{DVector, Isometry3, Point3, Vector3};

/// Result type for simulation operations.
pub type Result<T> = std::result::Result<T, SimError>;
