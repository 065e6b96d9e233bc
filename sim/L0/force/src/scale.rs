//! Hooks for model-wide geometry rescaling.
//!
//! A scaling pass runs in three phases over every participating element:
//!
//! ```text
//!  pre_scale (all) ──► scale (all) ──► realize positions ──► post_scale (all)
//! ```
//!
//! `pre_scale` records whatever the element needs from the unscaled
//! geometry, `scale` rewrites the geometry, and `post_scale` reconciles the
//! element's own properties against the rescaled geometry.

use sim_component::Result;
use sim_types::{ScaleSet, SimState};

/// Participation in a geometry rescale.
pub trait Scalable {
    /// Record pre-scale quantities into `state`.
    fn pre_scale(&mut self, state: &mut SimState, scale_set: &ScaleSet) -> Result<()>;

    /// Apply the geometric rescale.
    fn scale(&mut self, state: &SimState, scale_set: &ScaleSet) -> Result<()>;

    /// Reconcile properties with the rescaled geometry.
    fn post_scale(&mut self, state: &mut SimState, scale_set: &ScaleSet) -> Result<()>;
}
