//! Configuration for stepping a simulation.

use crate::error::SimError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Timing configuration for a step-driven run.
///
/// Every accepted step is offered to the model's reporters as a candidate
/// reporting event.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SimulationConfig {
    /// Fixed step size (seconds).
    pub timestep: f64,
    /// Start time (seconds).
    pub start_time: f64,
    /// End time (seconds), inclusive.
    pub end_time: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            timestep: 1.0 / 240.0, // 240 Hz - typical for physics
            start_time: 0.0,
            end_time: 1.0,
        }
    }
}

impl SimulationConfig {
    /// Create a new simulation config with the given timestep.
    #[must_use]
    pub fn with_timestep(timestep: f64) -> Self {
        Self {
            timestep,
            ..Default::default()
        }
    }

    /// Set the time window.
    #[must_use]
    pub fn span(mut self, start_time: f64, end_time: f64) -> Self {
        self.start_time = start_time;
        self.end_time = end_time;
        self
    }

    /// Number of steps needed to cover the window, the start event included.
    #[must_use]
    pub fn num_events(&self) -> usize {
        let steps = ((self.end_time - self.start_time) / self.timestep + 1e-9).floor();
        steps.max(0.0) as usize + 1
    }

    /// Time of the `i`th event.
    #[must_use]
    pub fn event_time(&self, i: usize) -> f64 {
        self.start_time + i as f64 * self.timestep
    }

    /// Validate the configuration.
    pub fn validate(&self) -> crate::Result<()> {
        if !self.timestep.is_finite() || self.timestep <= 0.0 {
            return Err(SimError::InvalidTimestep(self.timestep));
        }

        if !self.start_time.is_finite() || !self.end_time.is_finite() {
            return Err(SimError::invalid_config("time window must be finite"));
        }

        if self.end_time < self.start_time {
            return Err(SimError::invalid_config("end time precedes start time"));
        }

        Ok(())
    }
}
