//! Per-body geometric scale factors.

use std::collections::HashMap;

use nalgebra::Vector3;

use crate::body::BodyId;
use crate::error::SimError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// XYZ scale factors keyed by body.
///
/// Bodies without an entry are unscaled.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScaleSet {
    factors: HashMap<BodyId, Vector3<f64>>,
}

impl ScaleSet {
    /// An empty scale set (every body unscaled).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scale `body` by per-axis factors.
    #[must_use]
    pub fn with_body(mut self, body: BodyId, factors: Vector3<f64>) -> Self {
        self.factors.insert(body, factors);
        self
    }

    /// Scale `body` uniformly.
    #[must_use]
    pub fn with_uniform(self, body: BodyId, factor: f64) -> Self {
        self.with_body(body, Vector3::repeat(factor))
    }

    /// Factors for `body` (ones when the body is not listed).
    #[must_use]
    pub fn factors(&self, body: BodyId) -> Vector3<f64> {
        self.factors
            .get(&body)
            .copied()
            .unwrap_or_else(|| Vector3::repeat(1.0))
    }

    /// Bodies with explicit factors.
    pub fn bodies(&self) -> impl Iterator<Item = BodyId> + '_ {
        self.factors.keys().copied()
    }

    /// Whether no body is listed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    /// Every factor must be positive and finite.
    pub fn validate(&self) -> crate::Result<()> {
        for (body, factors) in &self.factors {
            if let Some(bad) = factors.iter().find(|f| !f.is_finite() || **f <= 0.0) {
                return Err(SimError::InvalidScaleFactor {
                    body: body.raw(),
                    factor: *bad,
                });
            }
        }
        Ok(())
    }
}
