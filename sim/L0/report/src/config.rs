//! Persisted reporter properties.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Reporter configuration.
///
/// # Example
///
/// ```
/// use sim_report::ReporterConfig;
///
/// let config = ReporterConfig::new()
///     .with_interval(0.01)
///     .with_output("acl/tension")
///     .with_output("acl/path/length");
///
/// assert_eq!(config.output_names.len(), 2);
/// assert!(!config.is_every_step());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReporterConfig {
    /// Minimum time between recorded rows (s).
    ///
    /// Negative or NaN records at every offered event.
    pub report_time_interval: f64,

    /// Object-level default of the state-scoped disabled flag.
    pub is_disabled: bool,

    /// Output paths to sample, in column order.
    pub output_names: Vec<String>,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            report_time_interval: 0.0,
            is_disabled: false,
            output_names: Vec::new(),
        }
    }
}

impl ReporterConfig {
    /// Interval value that records at every offered event.
    pub const EVERY_STEP: f64 = -1.0;

    /// Default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the report interval.
    #[must_use]
    pub fn with_interval(mut self, interval: f64) -> Self {
        self.report_time_interval = interval;
        self
    }

    /// Record at every offered event.
    #[must_use]
    pub fn every_step(self) -> Self {
        self.with_interval(Self::EVERY_STEP)
    }

    /// Set the object-level disabled default.
    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.is_disabled = disabled;
        self
    }

    /// Append an output path.
    #[must_use]
    pub fn with_output(mut self, name: impl Into<String>) -> Self {
        self.output_names.push(name.into());
        self
    }

    /// Append several output paths.
    #[must_use]
    pub fn with_outputs<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.output_names.extend(names.into_iter().map(Into::into));
        self
    }

    /// Whether every offered event is recorded.
    #[must_use]
    pub fn is_every_step(&self) -> bool {
        self.report_time_interval.is_nan() || self.report_time_interval < 0.0
    }
}
