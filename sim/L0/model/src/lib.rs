//! Model orchestration for staged force elements and reporters.
//!
//! A [`Model`] owns the kinematics, the force elements and the reporters of
//! one system. It drives the setup lifecycle, sums forces, offers candidate
//! reporting events and runs the three-phase geometry scaling pass.
//!
//! # Example
//!
//! ```
//! use nalgebra::{DVector, Point3, Vector3};
//! use sim_force::{Ligament, PointPath};
//! use sim_model::Model;
//! use sim_report::{Reporter, ReporterConfig, TableReporter};
//! use sim_types::{BodyId, SimulationConfig, SliderKinematics};
//!
//! let kinematics = SliderKinematics::new().with_slider(Vector3::new(1.0, 0.0, 0.0), Vector3::x());
//! let path = PointPath::straight(BodyId::GROUND, Point3::origin(), BodyId::new(1), Point3::origin());
//!
//! let mut model = Model::new("demo", kinematics)
//!     .with_force(Ligament::new("spring", path).with_linear_stiffness(50.0, 1.0))
//!     .with_reporter(TableReporter::new(
//!         "probe",
//!         ReporterConfig::new().with_interval(0.5).with_output("spring/tension"),
//!     ));
//!
//! let mut state = model.init_system().unwrap();
//! let config = SimulationConfig::with_timestep(0.25).span(0.0, 1.0);
//! model
//!     .simulate_prescribed(&mut state, &config, |t| DVector::from_vec(vec![t]))
//!     .unwrap();
//!
//! let table = model.reporter("probe").unwrap().report_table();
//! assert_eq!(table.times(), &[0.0, 0.5, 1.0]);
//! assert_eq!(table.column("spring/tension"), Some(vec![0.0, 25.0, 50.0]));
//! ```
//!
//! # Layer 0
//!
//! This is a Layer 0 crate with **zero Bevy dependencies**.

#![doc(html_root_url = "https://docs.rs/sim-model/0.7.0")]
#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions,
    clippy::missing_errors_doc
)]

mod error;
mod model;

pub use error::ModelError;
pub use model::Model;

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
