//! Time-interval-gated sampling of named outputs into time-series tables.
//!
//! A reporter is offered candidate events by the orchestrator (typically one
//! per accepted step). It records a row of its bound inputs when it is
//! enabled in the state and enough time has passed since its last row.
//!
//! - [`Reporter`] - The capability trait; gating and table access are
//!   provided, [`Reporter::implement_report`] is the extension point
//! - [`ReporterBase`] - Configuration, resolved inputs, disabled slot, table
//! - [`TableReporter`] / [`LogReporter`] - Concrete reporters
//! - [`TimeSeriesTable`] - The recorded rows
//!
//! Inputs name outputs by component path (`acl/tension`, `acl/path/length`)
//! and are resolved once while the model is connected. An input that does
//! not resolve fails setup; report time assumes every binding is valid.
//!
//! # Layer 0
//!
//! This is a Layer 0 crate with **zero Bevy dependencies**.

#![doc(html_root_url = "https://docs.rs/sim-report/0.7.0")]
#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions,
    clippy::missing_errors_doc
)]

mod config;
mod error;
mod log_reporter;
mod reporter;
mod table;
mod table_reporter;

pub use config::ReporterConfig;
pub use error::ReportError;
pub use log_reporter::LogReporter;
pub use reporter::{Reporter, ReporterBase, ReporterStatus};
pub use table::TimeSeriesTable;
pub use table_reporter::TableReporter;

/// Result type for table operations.
pub type Result<T> = std::result::Result<T, ReportError>;
