//! The sampled reporter capability and the bookkeeping every reporter shares.
//!
//! # Gating
//!
//! At each candidate event the orchestrator offers, a reporter records a row
//! when it is enabled and
//!
//! ```text
//! interval < 0  or  interval is NaN  or  t − t_last ≥ interval
//! ```
//!
//! `t_last` starts at −∞, so the first enabled event always records. An
//! event at the same time as the last row replaces that row; an event before
//! it is dropped.
//!
//! # Disabled Flag
//!
//! Whether a reporter is disabled lives in the simulation state, in a flag
//! slot reserved while the system is assembled. The same reporter can be
//! enabled in one run and disabled in another.

use std::cmp::Ordering;
use std::sync::Arc;

use sim_component::{
    Component, ComponentBase, ComponentError, ModelContext, OutputRef, OutputSource, Result,
};
use sim_types::{FlagSlot, SimState, SystemLayout};
use tracing::{debug, warn};

use crate::config::ReporterConfig;
use crate::table::TimeSeriesTable;

/// Relative slack allowed when comparing elapsed time with the interval.
const INTERVAL_TOLERANCE: f64 = 1e-9;

/// Where a reporter stands with respect to a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReporterStatus {
    /// Setup has not completed.
    Idle,
    /// Ready, nothing recorded yet.
    Armed,
    /// Ready, at least one row recorded.
    Recording,
    /// The state's disabled flag is set.
    Disabled,
}

/// State every reporter carries: configuration, resolved inputs, the
/// disabled slot and the table.
#[derive(Debug, Clone)]
pub struct ReporterBase {
    component: ComponentBase,
    config: ReporterConfig,
    inputs: Vec<OutputRef>,
    disabled_slot: Option<FlagSlot>,
    last_report_time: f64,
    table: TimeSeriesTable,
}

impl ReporterBase {
    /// Create a reporter base with an empty table.
    #[must_use]
    pub fn new(name: impl Into<String>, config: ReporterConfig) -> Self {
        let table = TimeSeriesTable::new(config.output_names.clone());
        Self {
            component: ComponentBase::new(name),
            config,
            inputs: Vec::new(),
            disabled_slot: None,
            last_report_time: f64::NEG_INFINITY,
            table,
        }
    }

    /// Component bookkeeping.
    #[must_use]
    pub fn component(&self) -> &ComponentBase {
        &self.component
    }

    /// Component bookkeeping, mutably.
    pub fn component_mut(&mut self) -> &mut ComponentBase {
        &mut self.component
    }

    /// Configuration.
    #[must_use]
    pub fn config(&self) -> &ReporterConfig {
        &self.config
    }

    /// Set the report interval.
    pub fn set_report_time_interval(&mut self, interval: f64) {
        self.config.report_time_interval = interval;
    }

    /// Time of the last recorded row, or −∞.
    #[must_use]
    pub fn last_report_time(&self) -> f64 {
        self.last_report_time
    }

    /// Resolved inputs, in column order.
    #[must_use]
    pub fn inputs(&self) -> &[OutputRef] {
        &self.inputs
    }

    /// The recorded table.
    #[must_use]
    pub fn table(&self) -> &TimeSeriesTable {
        &self.table
    }

    /// Drop every recorded row and restart gating.
    pub fn clear(&mut self) {
        self.table.clear();
        self.last_report_time = f64::NEG_INFINITY;
    }

    /// Resolve every output name against the model's directory.
    ///
    /// Without a model, inputs are left unresolved and nothing is checked.
    pub fn resolve_inputs(&mut self, model: Option<&Arc<ModelContext>>) -> Result<()> {
        self.inputs.clear();
        let Some(model) = model else {
            return Ok(());
        };

        let name = self.component.name();
        self.inputs = self
            .config
            .output_names
            .iter()
            .map(|output| {
                model
                    .outputs()
                    .resolve(output)
                    .cloned()
                    .ok_or_else(|| ComponentError::unresolved_input(name, output.as_str()))
            })
            .collect::<Result<_>>()?;

        if self.table.labels() != self.config.output_names.as_slice() {
            if !self.table.is_empty() {
                return Err(ComponentError::invalid_property(
                    name,
                    "output_names",
                    "cannot change columns of a table that already holds rows",
                ));
            }
            self.table = TimeSeriesTable::new(self.config.output_names.clone());
        }

        debug!(reporter = %name, inputs = self.inputs.len(), "reporter inputs resolved");
        Ok(())
    }

    /// Reserve the disabled flag.
    pub fn reserve_slots(&mut self, layout: &mut SystemLayout) {
        let label = format!("{}/is_disabled", self.component.name());
        self.disabled_slot = Some(layout.reserve_flag(label, self.config.is_disabled));
    }

    /// Write the object-level disabled default into `state`.
    pub fn init_state(&self, state: &mut SimState) {
        if let Some(slot) = self.disabled_slot {
            state.set_flag(slot, self.config.is_disabled);
        }
    }

    /// Copy the state's disabled flag back into the object-level default.
    pub fn set_properties_from_state(&mut self, state: &SimState) {
        if let Some(slot) = self.disabled_slot {
            self.config.is_disabled = state.flag(slot);
        }
    }

    /// Whether reporting is disabled in `state`.
    ///
    /// Falls back to the object-level default before a slot exists.
    #[must_use]
    pub fn is_disabled(&self, state: &SimState) -> bool {
        self.disabled_slot
            .map_or(self.config.is_disabled, |slot| state.flag(slot))
    }

    /// Disable or enable reporting in `state`.
    ///
    /// Before a slot exists this sets the object-level default instead.
    pub fn set_disabled(&mut self, state: &mut SimState, disabled: bool) {
        match self.disabled_slot {
            Some(slot) => state.set_flag(slot, disabled),
            None => self.config.is_disabled = disabled,
        }
    }

    /// Whether an event at `state` passes the gate.
    ///
    /// The elapsed time is compared with a relative tolerance so events
    /// generated as `start + i * step` with `step` equal to the interval all
    /// pass despite rounding.
    #[must_use]
    pub fn is_due(&self, state: &SimState) -> bool {
        if self.is_disabled(state) {
            return false;
        }
        if self.config.is_every_step() {
            return true;
        }
        let interval = self.config.report_time_interval;
        let tolerance = INTERVAL_TOLERANCE * interval.max(f64::EPSILON);
        state.time() - self.last_report_time >= interval - tolerance
    }

    /// Sample every input at `state` and record a row.
    ///
    /// Returns whether a row was written.
    pub fn record(&mut self, state: &SimState, source: &OutputSource<'_>) -> bool {
        let time = state.time();
        let values: Vec<f64> = self
            .inputs
            .iter()
            .map(|input| source.value(input, state).unwrap_or(f64::NAN))
            .collect();

        let written = match self.table.last_time().map(|last| time.partial_cmp(&last)) {
            Some(Some(Ordering::Equal)) => self.table.replace_last_row(values),
            Some(Some(Ordering::Less) | None) => {
                warn!(
                    reporter = %self.component.name(),
                    time,
                    last = self.last_report_time,
                    "report event precedes the last recorded row; skipped"
                );
                return false;
            }
            _ => self.table.append_row(time, values),
        };

        match written {
            Ok(()) => {
                self.last_report_time = time;
                true
            }
            Err(err) => {
                warn!(reporter = %self.component.name(), %err, "report row rejected");
                false
            }
        }
    }
}

/// A component that samples outputs into a table at candidate events.
///
/// Implementors provide access to their [`ReporterBase`]; gating, the
/// disabled flag and table access come for free. Override
/// [`Reporter::implement_report`] to customize what happens when a row is
/// due.
pub trait Reporter: Component {
    /// Shared reporter state.
    fn reporter_base(&self) -> &ReporterBase;

    /// Shared reporter state, mutably.
    fn reporter_base_mut(&mut self) -> &mut ReporterBase;

    /// Offer a candidate event; returns whether a row was recorded.
    ///
    /// Only valid once the reporter's lifecycle has completed.
    fn report(&mut self, state: &SimState, source: &OutputSource<'_>) -> bool {
        debug_assert!(
            self.base().is_ready(),
            "reporter '{}' offered an event before its lifecycle completed",
            self.name()
        );
        if !self.reporter_base().is_due(state) {
            return false;
        }
        self.implement_report(state, source)
    }

    /// Record a row for an event that passed the gate.
    fn implement_report(&mut self, state: &SimState, source: &OutputSource<'_>) -> bool {
        self.reporter_base_mut().record(state, source)
    }

    /// The recorded table.
    fn report_table(&self) -> &TimeSeriesTable {
        self.reporter_base().table()
    }

    /// Whether reporting is disabled in `state`.
    fn is_disabled(&self, state: &SimState) -> bool {
        self.reporter_base().is_disabled(state)
    }

    /// Disable or enable reporting in `state`.
    fn set_disabled(&mut self, state: &mut SimState, disabled: bool) {
        self.reporter_base_mut().set_disabled(state, disabled);
    }

    /// Status with respect to `state`.
    fn status(&self, state: &SimState) -> ReporterStatus {
        if !self.base().is_ready() {
            ReporterStatus::Idle
        } else if self.is_disabled(state) {
            ReporterStatus::Disabled
        } else if self.report_table().is_empty() {
            ReporterStatus::Armed
        } else {
            ReporterStatus::Recording
        }
    }

    /// View as a plain component.
    fn as_component(&self) -> &dyn Component;

    /// View as a plain component, mutably.
    fn as_component_mut(&mut self) -> &mut dyn Component;
}

/// Implements [`Component`] for a reporter struct holding its
/// [`ReporterBase`] in a field named `reporter`.
///
/// Reporters own no subcomponents; each stage does the reporter's own work
/// and then advances the lifecycle.
macro_rules! impl_reporter_component {
    ($ty:ty) => {
        impl ::sim_component::Component for $ty {
            fn base(&self) -> &::sim_component::ComponentBase {
                self.reporter.component()
            }

            fn base_mut(&mut self) -> &mut ::sim_component::ComponentBase {
                self.reporter.component_mut()
            }

            fn connect_to_model(
                &mut self,
                model: Option<&::std::sync::Arc<::sim_component::ModelContext>>,
            ) -> ::sim_component::Result<()> {
                self.reporter.resolve_inputs(model)?;
                ::sim_component::connect_subcomponents(self, model)
            }

            fn add_to_system(
                &mut self,
                layout: &mut ::sim_types::SystemLayout,
            ) -> ::sim_component::Result<()> {
                self.reporter.reserve_slots(layout);
                ::sim_component::add_subcomponents_to_system(self, layout)
            }

            fn init_state_from_properties(
                &mut self,
                state: &mut ::sim_types::SimState,
            ) -> ::sim_component::Result<()> {
                self.reporter.init_state(state);
                ::sim_component::init_subcomponents(self, state)
            }

            fn set_properties_from_state(&mut self, state: &::sim_types::SimState) {
                self.reporter.set_properties_from_state(state);
            }
        }
    };
}

pub(crate) use impl_reporter_component;
