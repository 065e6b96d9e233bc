//! Staged component lifecycle for multibody force elements and reporters.
//!
//! Every structural element in a model passes through the same ordered
//! setup protocol before any numeric computation is valid:
//!
//! ```text
//!  construct ──► connect_to_model ──► add_to_system ──► init_state_from_properties
//!  (defaults)    (wiring, checks)     (state slots)     (state values)
//! ```
//!
//! - [`Component`] - The capability trait with the lifecycle hooks
//! - [`ComponentBase`] - Name, stage and weak owning-model reference
//! - [`ModelContext`] - What a connected component may ask of its model
//! - [`OutputDirectory`] / [`OutputRef`] - Named outputs resolved to tree
//!   positions during connection
//!
//! Propagation to owned subcomponents is explicit: each component lists its
//! children and each stage walks that list through a helper such as
//! [`connect_subcomponents`].
//!
//! # Layer 0
//!
//! This is a Layer 0 crate with **zero Bevy dependencies**.

#![doc(html_root_url = "https://docs.rs/sim-component/0.7.0")]
#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions,
    clippy::missing_errors_doc
)]

mod component;
mod error;
mod lifecycle;
mod model;
mod output;

pub use component::{
    Component, add_subcomponents_to_system, connect_subcomponents, init_subcomponents,
    is_tree_ready, reset_lifecycle,
};
pub use error::ComponentError;
pub use lifecycle::{ComponentBase, LifecycleStage};
pub use model::ModelContext;
pub use output::{OutputDirectory, OutputRef, OutputSource};

/// Result type for component setup.
pub type Result<T> = std::result::Result<T, ComponentError>;
