//! Passive ligament: a path-based force element with a constitutive curve.
//!
//! # Model
//!
//! ```text
//! strain  = (L − L₀) / L₀
//! tension = curve(strain) · F_pcsa      for L > L₀
//!         = 0                           otherwise (slack)
//! ```
//!
//! Where:
//! - `L` is the current path length
//! - `L₀` is the resting length
//! - `F_pcsa` is the force scale (force per unit normalized curve value)
//!
//! Tension is projected onto the bodies through the path's point force
//! directions. A ligament can only pull: a slack ligament contributes nothing
//! and tension is never negative.
//!
//! # Scaling
//!
//! When the model geometry is rescaled, the resting length is rescaled by the
//! same ratio as the path length so the ligament keeps its strain.

use std::any::Any;
use std::sync::Arc;

use nalgebra::DVector;
use sim_component::{
    Component, ComponentBase, ComponentError, ModelContext, Result, connect_subcomponents,
};
use sim_types::{BodyForces, CoordinateId, ScaleSet, SimState};
use tracing::debug;

use crate::curve::ForceLengthCurve;
use crate::force::{Force, apply_force_to_point};
use crate::path::GeometryPath;
use crate::scale::Scalable;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Persisted ligament properties.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LigamentConfig {
    /// Length at which the ligament starts to carry load (m).
    pub resting_length: f64,

    /// Force scale applied to the curve (N).
    pub pcsa_force: f64,

    /// Strain to normalized force.
    pub force_length_curve: ForceLengthCurve,
}

impl Default for LigamentConfig {
    fn default() -> Self {
        Self {
            resting_length: 0.0,
            pcsa_force: 0.0,
            force_length_curve: ForceLengthCurve::default(),
        }
    }
}

impl LigamentConfig {
    /// Create a config with the default curve.
    #[must_use]
    pub fn new(resting_length: f64, pcsa_force: f64) -> Self {
        Self {
            resting_length,
            pcsa_force,
            ..Default::default()
        }
    }

    /// A linear spring of `stiffness` (N/m) that goes slack below
    /// `resting_length`.
    ///
    /// The curve is `f(x) = L₀·x`, so `tension = K·(L − L₀)`.
    #[must_use]
    pub fn linear_stiffness(stiffness: f64, resting_length: f64) -> Self {
        Self {
            resting_length,
            pcsa_force: stiffness,
            force_length_curve: ForceLengthCurve::linear(resting_length),
        }
    }

    /// Set the curve.
    #[must_use]
    pub fn with_force_length_curve(mut self, curve: ForceLengthCurve) -> Self {
        self.force_length_curve = curve;
        self
    }

    /// Check the invariants a connected ligament must hold.
    pub fn validate(&self, component: &str) -> Result<()> {
        if !(self.resting_length.is_finite() && self.resting_length > 0.0) {
            return Err(ComponentError::invalid_property(
                component,
                "resting_length",
                format!("must be positive, got {}", self.resting_length),
            ));
        }
        if !(self.pcsa_force.is_finite() && self.pcsa_force >= 0.0) {
            return Err(ComponentError::invalid_property(
                component,
                "pcsa_force",
                format!("must be non-negative, got {}", self.pcsa_force),
            ));
        }
        Ok(())
    }
}

/// A passive, tension-only force element along a geometry path.
///
/// # Example
///
/// ```
/// use sim_force::{Ligament, LigamentConfig, PointPath};
/// use sim_types::BodyId;
/// use nalgebra::Point3;
///
/// let path = PointPath::straight(
///     BodyId::GROUND,
///     Point3::origin(),
///     BodyId::new(1),
///     Point3::origin(),
/// );
/// let acl = Ligament::new("acl", path).with_config(LigamentConfig::new(0.03, 1500.0));
///
/// assert_eq!(acl.resting_length(), 0.03);
/// ```
#[derive(Debug)]
pub struct Ligament {
    base: ComponentBase,
    config: LigamentConfig,
    path: Box<dyn GeometryPath>,
}

impl Ligament {
    const OUTPUTS: &'static [&'static str] =
        &["length", "tension", "strain", "resting_length", "stiffness"];

    /// Create a ligament with default properties along `path`.
    #[must_use]
    pub fn new(name: impl Into<String>, path: impl GeometryPath + 'static) -> Self {
        Self {
            base: ComponentBase::new(name),
            config: LigamentConfig::default(),
            path: Box::new(path),
        }
    }

    /// Replace all properties.
    #[must_use]
    pub fn with_config(mut self, config: LigamentConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the resting length.
    #[must_use]
    pub fn with_resting_length(mut self, resting_length: f64) -> Self {
        self.config.resting_length = resting_length;
        self
    }

    /// Set the force scale.
    #[must_use]
    pub fn with_max_isometric_force(mut self, force: f64) -> Self {
        self.config.pcsa_force = force;
        self
    }

    /// Set the curve.
    #[must_use]
    pub fn with_force_length_curve(mut self, curve: ForceLengthCurve) -> Self {
        self.config.force_length_curve = curve;
        self
    }

    /// Configure as a linear spring.
    #[must_use]
    pub fn with_linear_stiffness(mut self, stiffness: f64, resting_length: f64) -> Self {
        self.set_linear_stiffness(stiffness, resting_length);
        self
    }

    /// Current properties.
    #[must_use]
    pub fn config(&self) -> &LigamentConfig {
        &self.config
    }

    /// Resting length (m).
    #[must_use]
    pub fn resting_length(&self) -> f64 {
        self.config.resting_length
    }

    /// Set the resting length.
    pub fn set_resting_length(&mut self, resting_length: f64) {
        self.config.resting_length = resting_length;
    }

    /// Force scale (N).
    #[must_use]
    pub fn max_isometric_force(&self) -> f64 {
        self.config.pcsa_force
    }

    /// Set the force scale.
    pub fn set_max_isometric_force(&mut self, force: f64) {
        self.config.pcsa_force = force;
    }

    /// The constitutive curve.
    #[must_use]
    pub fn force_length_curve(&self) -> &ForceLengthCurve {
        &self.config.force_length_curve
    }

    /// Replace the constitutive curve.
    pub fn set_force_length_curve(&mut self, curve: ForceLengthCurve) {
        self.config.force_length_curve = curve;
    }

    /// Configure curve, resting length and force scale together as a linear
    /// spring: `tension = stiffness · (L − resting_length)` when taut.
    pub fn set_linear_stiffness(&mut self, stiffness: f64, resting_length: f64) {
        self.config = LigamentConfig::linear_stiffness(stiffness, resting_length);
    }

    /// The path.
    #[must_use]
    pub fn path(&self) -> &dyn GeometryPath {
        self.path.as_ref()
    }

    /// The path, mutably.
    pub fn path_mut(&mut self) -> &mut dyn GeometryPath {
        self.path.as_mut()
    }

    /// Current path length.
    #[must_use]
    pub fn length(&self, state: &SimState) -> f64 {
        self.path.length(state)
    }

    /// Current strain; negative when slack.
    #[must_use]
    pub fn strain(&self, state: &SimState) -> f64 {
        let rest = self.config.resting_length;
        (self.length(state) - rest) / rest
    }

    /// Scalar tension (N).
    #[must_use]
    pub fn tension(&self, state: &SimState) -> f64 {
        self.debug_assert_ready();
        let length = self.length(state);
        let rest = self.config.resting_length;
        if length <= rest {
            return 0.0;
        }
        let strain = (length - rest) / rest;
        (self.config.force_length_curve.evaluate(strain) * self.config.pcsa_force).max(0.0)
    }

    /// Slope of tension with respect to length (N/m).
    #[must_use]
    pub fn stiffness(&self, state: &SimState) -> f64 {
        if self.tension(state) <= 0.0 {
            return 0.0;
        }
        let rest = self.config.resting_length;
        self.config.force_length_curve.derivative(self.strain(state)) * self.config.pcsa_force
            / rest
    }

    /// Moment arm about `coordinate`, from the path.
    pub fn compute_moment_arm(&self, state: &SimState, coordinate: CoordinateId) -> Result<f64> {
        self.path.compute_moment_arm(state, coordinate)
    }

    fn debug_assert_ready(&self) {
        debug_assert!(
            self.base.is_ready() && self.path.base().is_ready(),
            "ligament '{}' evaluated before its lifecycle completed",
            self.base.name()
        );
    }
}

impl Component for Ligament {
    fn base(&self) -> &ComponentBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ComponentBase {
        &mut self.base
    }

    fn subcomponents(&self) -> Vec<&dyn Component> {
        vec![self.path.as_component()]
    }

    fn subcomponents_mut(&mut self) -> Vec<&mut dyn Component> {
        vec![self.path.as_component_mut()]
    }

    fn connect_to_model(&mut self, model: Option<&Arc<ModelContext>>) -> Result<()> {
        self.path.base_mut().set_owner(self.base.name());
        connect_subcomponents(self, model)?;

        if model.is_none() {
            return Ok(());
        }
        self.config.validate(self.base.name())?;
        debug!(
            ligament = %self.base.name(),
            resting_length = self.config.resting_length,
            pcsa_force = self.config.pcsa_force,
            "ligament connected"
        );
        Ok(())
    }

    fn outputs(&self) -> &'static [&'static str] {
        Self::OUTPUTS
    }

    fn calc_output(&self, index: usize, state: &SimState) -> Option<f64> {
        match index {
            0 => Some(self.length(state)),
            1 => Some(self.tension(state)),
            2 => Some(self.strain(state)),
            3 => Some(self.config.resting_length),
            4 => Some(self.stiffness(state)),
            _ => None,
        }
    }
}

impl Scalable for Ligament {
    fn pre_scale(&mut self, state: &mut SimState, scale_set: &ScaleSet) -> Result<()> {
        self.path.pre_scale(state, scale_set)
    }

    fn scale(&mut self, state: &SimState, scale_set: &ScaleSet) -> Result<()> {
        self.path.scale(state, scale_set)
    }

    fn post_scale(&mut self, state: &mut SimState, scale_set: &ScaleSet) -> Result<()> {
        self.path.post_scale(state, scale_set)?;

        let pre_scale_length = self.path.pre_scale_length(state);
        if pre_scale_length > 0.0 {
            let factor = self.path.length(state) / pre_scale_length;
            self.config.resting_length *= factor;
            debug!(
                ligament = %self.base.name(),
                factor,
                resting_length = self.config.resting_length,
                "resting length rescaled"
            );
        }
        self.path.set_pre_scale_length(state, 0.0);
        Ok(())
    }
}

impl Force for Ligament {
    fn compute_force(
        &self,
        state: &SimState,
        body_forces: &mut BodyForces,
        _generalized_forces: &mut DVector<f64>,
    ) {
        let tension = self.tension(state);
        if tension <= 0.0 {
            return;
        }

        for pfd in self.path.point_force_directions(state) {
            let force = pfd.direction.into_inner() * tension;
            apply_force_to_point(state, pfd.body, &pfd.point, &force, body_forces);
        }
    }

    fn as_scalable_mut(&mut self) -> Option<&mut dyn Scalable> {
        Some(self)
    }

    fn as_component(&self) -> &dyn Component {
        self
    }

    fn as_component_mut(&mut self) -> &mut dyn Component {
        self
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
