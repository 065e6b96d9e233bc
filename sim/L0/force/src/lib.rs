//! Path-based ligament force element for multibody simulation.
//!
//! A ligament is a passive, tension-only element routed along a geometry path
//! between bodies. Its tension follows a configurable constitutive curve of
//! strain, and it keeps its strain state when the model geometry is rescaled.
//!
//! - [`ForceLengthCurve`] - Strain to normalized force (spline, linear, constant)
//! - [`GeometryPath`] / [`PointPath`] - Length and force decomposition of a path
//! - [`Force`] - Capability of contributing body forces each step
//! - [`Scalable`] - Pre/scale/post hooks of a geometry rescale
//! - [`Ligament`] - The force element
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use nalgebra::{DVector, Point3, Vector3};
//! use sim_component::{Component, ModelContext, OutputDirectory};
//! use sim_force::{Force, Ligament, PointPath};
//! use sim_types::{BodyForces, BodyId, Kinematics, SimState, SliderKinematics, SystemLayout};
//!
//! let kinematics = Arc::new(
//!     SliderKinematics::new().with_slider(Vector3::new(1.0, 0.0, 0.0), Vector3::x()),
//! );
//! let model = Arc::new(ModelContext::new("demo", kinematics.clone(), OutputDirectory::default()));
//!
//! let path = PointPath::straight(BodyId::GROUND, Point3::origin(), BodyId::new(1), Point3::origin());
//! let mut spring = Ligament::new("spring", path).with_linear_stiffness(100.0, 0.8);
//!
//! let mut layout = SystemLayout::new();
//! spring.connect_to_model(Some(&model)).unwrap();
//! spring.add_to_system(&mut layout).unwrap();
//! let mut state = SimState::new(&layout, kinematics.num_coordinates(), kinematics.num_bodies());
//! spring.init_state_from_properties(&mut state).unwrap();
//! state.realize_position(kinematics.as_ref());
//!
//! let mut forces = BodyForces::zeros(kinematics.num_bodies());
//! spring.compute_force(&state, &mut forces, &mut DVector::zeros(1));
//!
//! assert!((spring.tension(&state) - 20.0).abs() < 1e-12);
//! assert!((forces.get(BodyId::new(1)).unwrap().force.x + 20.0).abs() < 1e-12);
//! ```
//!
//! # Layer 0
//!
//! This is a Layer 0 crate with **zero Bevy dependencies**.

#![doc(html_root_url = "https://docs.rs/sim-force/0.7.0")]
#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions,
    clippy::suboptimal_flops,
    clippy::missing_errors_doc
)]

pub mod curve;
mod error;
mod force;
mod ligament;
pub mod path;
mod scale;

pub use curve::{CubicSpline, ForceLengthCurve, LinearFunction, SplinePoints};
pub use error::CurveError;
pub use force::{Force, apply_force_to_point, apply_generalized_force, apply_torque};
pub use ligament::{Ligament, LigamentConfig};
pub use path::{GeometryPath, PathPoint, PointForceDirection, PointPath};
pub use scale::Scalable;
