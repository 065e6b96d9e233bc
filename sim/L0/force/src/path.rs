//! Geometry paths that route a force element between bodies.
//!
//! A path supplies three things to the element that owns it:
//!
//! - its current length,
//! - a scratch pre-scale length kept in the simulation state,
//! - a decomposition into `(body, point, direction)` triples used to project
//!   a scalar tension into body forces.
//!
//! [`PointPath`] is the straight-line implementation: an origin, optional via
//! points and an insertion, each fixed in a body frame.
//!
//! ```text
//!  L = Σᵢ ‖pᵢ₊₁ − pᵢ‖
//! ```
//!
//! Each point `pᵢ` is its body-local location mapped through the body pose.

use std::sync::Arc;

use nalgebra::{DVector, Point3, Unit, Vector3};
use sim_component::{
    Component, ComponentBase, ComponentError, ModelContext, Result, add_subcomponents_to_system,
    connect_subcomponents,
};
use sim_types::{BodyId, CoordinateId, Kinematics, RealSlot, ScaleSet, SimState, SystemLayout};
use tracing::debug;

use crate::scale::Scalable;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Step used for finite-difference moment arms (coordinate units).
const MOMENT_ARM_STEP: f64 = 1e-6;

/// Segments shorter than this carry no direction.
const MIN_SEGMENT_LENGTH: f64 = 1e-10;

/// One element of a path's force decomposition.
///
/// A tension `T` applies `T · direction` at `point` on `body`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointForceDirection {
    /// Body the point is fixed in.
    pub body: BodyId,
    /// Point in the body frame.
    pub point: Point3<f64>,
    /// Unit direction in ground.
    pub direction: Unit<Vector3<f64>>,
}

/// The contract a force element needs from its path.
pub trait GeometryPath: Component + Scalable {
    /// Current length.
    fn length(&self, state: &SimState) -> f64;

    /// Length recorded by the last `pre_scale`, or zero.
    fn pre_scale_length(&self, state: &SimState) -> f64;

    /// Overwrite the recorded pre-scale length.
    fn set_pre_scale_length(&self, state: &mut SimState, length: f64);

    /// Decomposition of the path for force projection.
    fn point_force_directions(&self, state: &SimState) -> Vec<PointForceDirection>;

    /// Moment arm about `coordinate`: `−∂L/∂q`.
    fn compute_moment_arm(&self, state: &SimState, coordinate: CoordinateId) -> Result<f64>;

    /// View as a plain component.
    fn as_component(&self) -> &dyn Component;

    /// View as a plain component, mutably.
    fn as_component_mut(&mut self) -> &mut dyn Component;
}

/// A point fixed in a body frame.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PathPoint {
    /// The body this point is fixed in.
    pub body: BodyId,

    /// Location in the body's frame.
    pub location: Point3<f64>,
}

impl PathPoint {
    /// Create a path point.
    #[must_use]
    pub fn new(body: BodyId, location: Point3<f64>) -> Self {
        Self { body, location }
    }

    /// A path point at the body origin.
    #[must_use]
    pub fn at_origin(body: BodyId) -> Self {
        Self::new(body, Point3::origin())
    }

    /// Location in ground at `state`.
    #[must_use]
    pub fn ground_location(&self, state: &SimState) -> Point3<f64> {
        state.body_pose(self.body) * self.location
    }
}

/// Straight segments through body-fixed points.
///
/// # Example
///
/// ```
/// use sim_force::{PathPoint, PointPath};
/// use sim_types::BodyId;
/// use nalgebra::Point3;
///
/// let path = PointPath::new(
///     PathPoint::new(BodyId::GROUND, Point3::new(0.0, 0.0, 0.1)),
///     PathPoint::new(BodyId::new(1), Point3::new(0.0, 0.0, -0.1)),
/// )
/// .with_via_point(PathPoint::new(BodyId::GROUND, Point3::new(0.05, 0.0, 0.0)));
///
/// assert_eq!(path.num_points(), 3);
/// assert_eq!(path.num_segments(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct PointPath {
    base: ComponentBase,
    points: Vec<PathPoint>,
    pre_scale_slot: Option<RealSlot>,
}

impl PointPath {
    /// Component name every path is published under.
    pub const NAME: &'static str = "path";

    /// Output names.
    const OUTPUTS: &'static [&'static str] = &["length"];

    /// Create a path from origin to insertion.
    #[must_use]
    pub fn new(origin: PathPoint, insertion: PathPoint) -> Self {
        Self {
            base: ComponentBase::new(Self::NAME),
            points: vec![origin, insertion],
            pre_scale_slot: None,
        }
    }

    /// Create a straight path between two bodies.
    #[must_use]
    pub fn straight(
        origin_body: BodyId,
        origin: Point3<f64>,
        insertion_body: BodyId,
        insertion: Point3<f64>,
    ) -> Self {
        Self::new(
            PathPoint::new(origin_body, origin),
            PathPoint::new(insertion_body, insertion),
        )
    }

    /// Insert a via point just before the insertion.
    #[must_use]
    pub fn with_via_point(mut self, via: PathPoint) -> Self {
        let insertion = self.points.len() - 1;
        self.points.insert(insertion, via);
        self
    }

    /// Insert several via points just before the insertion.
    #[must_use]
    pub fn with_via_points(self, vias: impl IntoIterator<Item = PathPoint>) -> Self {
        vias.into_iter().fold(self, Self::with_via_point)
    }

    /// Number of points, origin and insertion included.
    #[must_use]
    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    /// Number of straight segments.
    #[must_use]
    pub fn num_segments(&self) -> usize {
        self.points.len() - 1
    }

    /// All points, origin first.
    #[must_use]
    pub fn points(&self) -> &[PathPoint] {
        &self.points
    }

    /// The origin point.
    #[must_use]
    pub fn origin(&self) -> &PathPoint {
        &self.points[0]
    }

    /// The insertion point.
    #[must_use]
    pub fn insertion(&self) -> &PathPoint {
        &self.points[self.points.len() - 1]
    }

    /// Distinct bodies the path touches, in path order.
    #[must_use]
    pub fn bodies(&self) -> Vec<BodyId> {
        let mut bodies = Vec::with_capacity(self.points.len());
        for point in &self.points {
            if !bodies.contains(&point.body) {
                bodies.push(point.body);
            }
        }
        bodies
    }

    /// Points in ground at `state`.
    #[must_use]
    pub fn ground_locations(&self, state: &SimState) -> Vec<Point3<f64>> {
        self.points.iter().map(|p| p.ground_location(state)).collect()
    }

    fn length_at(&self, kinematics: &dyn Kinematics, q: &DVector<f64>) -> f64 {
        let locations: Vec<Point3<f64>> = self
            .points
            .iter()
            .map(|p| kinematics.body_pose(p.body, q) * p.location)
            .collect();
        polyline_length(&locations)
    }

    fn check_bodies(&self, model: &ModelContext) -> Result<()> {
        let num_bodies = model.kinematics().num_bodies();
        match self.points.iter().find(|p| p.body.index() >= num_bodies) {
            Some(point) => Err(ComponentError::invalid_property(
                self.base.name(),
                "body",
                format!("{} is not one of the model's {num_bodies} bodies", point.body),
            )),
            None => Ok(()),
        }
    }
}

fn polyline_length(locations: &[Point3<f64>]) -> f64 {
    locations.windows(2).map(|w| (w[1] - w[0]).norm()).sum()
}

impl Component for PointPath {
    fn base(&self) -> &ComponentBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ComponentBase {
        &mut self.base
    }

    fn connect_to_model(&mut self, model: Option<&Arc<ModelContext>>) -> Result<()> {
        if let Some(model) = model {
            self.check_bodies(model)?;
        }
        connect_subcomponents(self, model)
    }

    fn add_to_system(&mut self, layout: &mut SystemLayout) -> Result<()> {
        let label = match self.base.owner() {
            Some(owner) => format!("{owner}/{}/pre_scale_length", self.base.name()),
            None => format!("{}/pre_scale_length", self.base.name()),
        };
        self.pre_scale_slot = Some(layout.reserve_real(label, 0.0));
        add_subcomponents_to_system(self, layout)
    }

    fn outputs(&self) -> &'static [&'static str] {
        Self::OUTPUTS
    }

    fn calc_output(&self, index: usize, state: &SimState) -> Option<f64> {
        match index {
            0 => Some(self.length(state)),
            _ => None,
        }
    }
}

impl Scalable for PointPath {
    fn pre_scale(&mut self, state: &mut SimState, _scale_set: &ScaleSet) -> Result<()> {
        let length = self.length(state);
        self.set_pre_scale_length(state, length);
        Ok(())
    }

    fn scale(&mut self, _state: &SimState, scale_set: &ScaleSet) -> Result<()> {
        for point in &mut self.points {
            let factors = scale_set.factors(point.body);
            point.location = Point3::from(point.location.coords.component_mul(&factors));
        }
        debug!(
            path = ?self.base.owner(),
            points = self.points.len(),
            "path points rescaled"
        );
        Ok(())
    }

    fn post_scale(&mut self, _state: &mut SimState, _scale_set: &ScaleSet) -> Result<()> {
        Ok(())
    }
}

impl GeometryPath for PointPath {
    fn length(&self, state: &SimState) -> f64 {
        polyline_length(&self.ground_locations(state))
    }

    fn pre_scale_length(&self, state: &SimState) -> f64 {
        self.pre_scale_slot.map_or(0.0, |slot| state.real(slot))
    }

    fn set_pre_scale_length(&self, state: &mut SimState, length: f64) {
        debug_assert!(
            self.pre_scale_slot.is_some(),
            "pre-scale length written before the path was added to the system"
        );
        if let Some(slot) = self.pre_scale_slot {
            state.set_real(slot, length);
        }
    }

    fn point_force_directions(&self, state: &SimState) -> Vec<PointForceDirection> {
        let locations = self.ground_locations(state);
        let mut directions = Vec::with_capacity(2 * self.num_segments());

        for (pair, ends) in self.points.windows(2).zip(locations.windows(2)) {
            let Some(forward) = Unit::try_new(ends[1] - ends[0], MIN_SEGMENT_LENGTH) else {
                continue;
            };
            directions.push(PointForceDirection {
                body: pair[0].body,
                point: pair[0].location,
                direction: forward,
            });
            directions.push(PointForceDirection {
                body: pair[1].body,
                point: pair[1].location,
                direction: -forward,
            });
        }

        directions
    }

    fn compute_moment_arm(&self, state: &SimState, coordinate: CoordinateId) -> Result<f64> {
        let model = self.base.require_model()?;
        let kinematics = model.kinematics();
        let value = state.coordinate(coordinate)?;

        let mut q = state.q().clone();
        q[coordinate.index()] = value + MOMENT_ARM_STEP;
        let longer = self.length_at(kinematics, &q);
        q[coordinate.index()] = value - MOMENT_ARM_STEP;
        let shorter = self.length_at(kinematics, &q);

        Ok(-(longer - shorter) / (2.0 * MOMENT_ARM_STEP))
    }

    fn as_component(&self) -> &dyn Component {
        self
    }

    fn as_component_mut(&mut self) -> &mut dyn Component {
        self
    }
}
