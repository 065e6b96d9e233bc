//! The model: owner of kinematics, force elements and reporters.

use std::collections::HashSet;
use std::sync::Arc;

use nalgebra::DVector;
use sim_component::{
    Component, ComponentError, ModelContext, OutputDirectory, OutputSource, reset_lifecycle,
};
use sim_force::Force;
use sim_report::Reporter;
use sim_types::{BodyForces, Kinematics, ScaleSet, SimState, SimulationConfig, SystemLayout};
use tracing::{debug, info, warn};

use crate::Result;
use crate::error::ModelError;

/// Owns the components of one model and drives them through setup,
/// force evaluation, reporting and scaling.
///
/// # Setup
///
/// [`Model::init_system`] runs one full setup cycle and returns a fresh
/// state:
///
/// ```text
///  reset ──► collect outputs ──► connect ──► add to system ──► allocate state ──► init state
/// ```
///
/// Any structural error aborts setup and is returned to the caller.
#[derive(Debug)]
pub struct Model {
    name: String,
    kinematics: Arc<dyn Kinematics>,
    forces: Vec<Box<dyn Force>>,
    reporters: Vec<Box<dyn Reporter>>,
    context: Option<Arc<ModelContext>>,
    layout: SystemLayout,
}

impl Model {
    /// Create an empty model over `kinematics`.
    #[must_use]
    pub fn new(name: impl Into<String>, kinematics: impl Kinematics + 'static) -> Self {
        Self {
            name: name.into(),
            kinematics: Arc::new(kinematics),
            forces: Vec::new(),
            reporters: Vec::new(),
            context: None,
            layout: SystemLayout::new(),
        }
    }

    /// Model name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The kinematics.
    #[must_use]
    pub fn kinematics(&self) -> &dyn Kinematics {
        self.kinematics.as_ref()
    }

    /// Add a force element. Invalidates any previous setup.
    pub fn add_force(&mut self, force: impl Force + 'static) -> &mut Self {
        self.forces.push(Box::new(force));
        self.context = None;
        self
    }

    /// Add a reporter. Invalidates any previous setup.
    pub fn add_reporter(&mut self, reporter: impl Reporter + 'static) -> &mut Self {
        self.reporters.push(Box::new(reporter));
        self.context = None;
        self
    }

    /// Add a force element.
    #[must_use]
    pub fn with_force(mut self, force: impl Force + 'static) -> Self {
        self.add_force(force);
        self
    }

    /// Add a reporter.
    #[must_use]
    pub fn with_reporter(mut self, reporter: impl Reporter + 'static) -> Self {
        self.add_reporter(reporter);
        self
    }

    /// Force elements, in insertion order.
    pub fn forces(&self) -> impl Iterator<Item = &(dyn Force + 'static)> {
        self.forces.iter().map(AsRef::as_ref)
    }

    /// Reporters, in insertion order.
    pub fn reporters(&self) -> impl Iterator<Item = &(dyn Reporter + 'static)> {
        self.reporters.iter().map(AsRef::as_ref)
    }

    /// Force element by name.
    #[must_use]
    pub fn force(&self, name: &str) -> Option<&dyn Force> {
        self.forces().find(|f| f.name() == name)
    }

    /// Force element by name, downcast to its concrete type.
    #[must_use]
    pub fn force_as<T: Force + 'static>(&self, name: &str) -> Option<&T> {
        self.force(name)?.as_any().downcast_ref()
    }

    /// Force element by name, downcast to its concrete type, mutably.
    ///
    /// Changing properties takes effect for numeric evaluation immediately;
    /// run [`Model::init_system`] again if the change must be validated.
    pub fn force_as_mut<T: Force + 'static>(&mut self, name: &str) -> Option<&mut T> {
        self.forces
            .iter_mut()
            .find(|f| f.name() == name)?
            .as_any_mut()
            .downcast_mut()
    }

    /// Reporter by name.
    #[must_use]
    pub fn reporter(&self, name: &str) -> Option<&dyn Reporter> {
        self.reporters().find(|r| r.name() == name)
    }

    /// Reporter by name, mutably.
    pub fn reporter_mut(&mut self, name: &str) -> Option<&mut (dyn Reporter + 'static)> {
        self.reporters
            .iter_mut()
            .find(|r| r.name() == name)
            .map(AsMut::as_mut)
    }

    /// Whether `init_system` has completed since the last structural change.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.context.is_some()
    }

    /// Slot layout of the last setup.
    #[must_use]
    pub fn layout(&self) -> &SystemLayout {
        &self.layout
    }

    /// Every output published by the model.
    pub fn output_paths(&self) -> Result<Vec<String>> {
        let context = self.require_context()?;
        Ok(context.outputs().paths().map(str::to_owned).collect())
    }

    /// Run one setup cycle over every component and return a fresh state.
    pub fn init_system(&mut self) -> Result<SimState> {
        self.context = None;
        for force in &mut self.forces {
            reset_lifecycle(force.as_component_mut());
        }
        for reporter in &mut self.reporters {
            reset_lifecycle(reporter.as_component_mut());
        }

        let roots: Vec<&dyn Component> = self.forces.iter().map(|f| f.as_component()).collect();
        let outputs = OutputDirectory::collect(&roots)?;
        self.check_reporter_names()?;

        let context = Arc::new(ModelContext::new(
            self.name.clone(),
            Arc::clone(&self.kinematics),
            outputs,
        ));

        for force in &mut self.forces {
            force.connect_to_model(Some(&context))?;
        }
        for reporter in &mut self.reporters {
            reporter.connect_to_model(Some(&context))?;
        }

        let mut layout = SystemLayout::new();
        for force in &mut self.forces {
            force.add_to_system(&mut layout)?;
        }
        for reporter in &mut self.reporters {
            reporter.add_to_system(&mut layout)?;
        }

        let mut state = SimState::new(
            &layout,
            self.kinematics.num_coordinates(),
            self.kinematics.num_bodies(),
        );
        for force in &mut self.forces {
            force.init_state_from_properties(&mut state)?;
        }
        for reporter in &mut self.reporters {
            reporter.init_state_from_properties(&mut state)?;
        }
        state.realize_position(self.kinematics.as_ref());

        info!(
            model = %self.name,
            forces = self.forces.len(),
            reporters = self.reporters.len(),
            outputs = context.outputs().len(),
            state_reals = layout.num_reals(),
            state_flags = layout.num_flags(),
            "model initialized"
        );

        self.layout = layout;
        self.context = Some(context);
        Ok(state)
    }

    fn check_reporter_names(&self) -> std::result::Result<(), ComponentError> {
        let mut names: HashSet<&str> = self.forces.iter().map(|f| f.name()).collect();
        for reporter in &self.reporters {
            if !names.insert(reporter.name()) {
                return Err(ComponentError::DuplicateName {
                    path: reporter.name().to_owned(),
                });
            }
        }
        Ok(())
    }

    fn require_context(&self) -> Result<&Arc<ModelContext>> {
        self.context.as_ref().ok_or_else(|| ModelError::NotInitialized {
            model: self.name.clone(),
        })
    }

    fn output_source(&self) -> OutputSource<'_> {
        OutputSource::new(self.forces.iter().map(|f| f.as_component()).collect())
    }

    /// Set coordinates and realize body poses.
    pub fn set_coordinates(&self, state: &mut SimState, q: DVector<f64>) -> Result<()> {
        state.set_q(q)?;
        state.realize_position(self.kinematics.as_ref());
        Ok(())
    }

    /// Sum every force element's contribution at `state`.
    #[must_use]
    pub fn compute_forces(&self, state: &SimState) -> (BodyForces, DVector<f64>) {
        debug_assert!(self.is_initialized(), "forces computed before init_system");
        let mut body_forces = BodyForces::zeros(self.kinematics.num_bodies());
        let mut generalized = DVector::zeros(self.kinematics.num_coordinates());
        for force in &self.forces {
            force.compute_force(state, &mut body_forces, &mut generalized);
        }
        (body_forces, generalized)
    }

    /// Total potential energy stored in force elements.
    #[must_use]
    pub fn potential_energy(&self, state: &SimState) -> f64 {
        self.forces
            .iter()
            .map(|f| f.compute_potential_energy(state))
            .sum()
    }

    /// Value of the output at `path` (for example `acl/tension`).
    pub fn output_value(&self, path: &str, state: &SimState) -> Result<f64> {
        let context = self.require_context()?;
        let output = context
            .outputs()
            .resolve(path)
            .ok_or_else(|| ModelError::UnknownOutput {
                path: path.to_owned(),
            })?;
        self.output_source()
            .value(output, state)
            .ok_or_else(|| ModelError::UnknownOutput {
                path: path.to_owned(),
            })
    }

    /// Offer `state` to every reporter as a candidate event.
    ///
    /// Returns how many reporters recorded the event, either as a new row or
    /// by replacing a row at the same time.
    pub fn realize_report(&mut self, state: &SimState) -> usize {
        debug_assert!(self.is_initialized(), "report realized before init_system");
        let source = OutputSource::new(self.forces.iter().map(|f| f.as_component()).collect());
        let mut recorded = 0;
        for reporter in &mut self.reporters {
            if reporter.report(state, &source) {
                recorded += 1;
            }
        }
        recorded
    }

    fn total_rows(&self) -> usize {
        self.reporters
            .iter()
            .map(|r| r.report_table().num_rows())
            .sum()
    }

    /// Copy state-scoped values back into every component's properties.
    pub fn set_properties_from_state(&mut self, state: &SimState) {
        for force in &mut self.forces {
            force.set_properties_from_state(state);
        }
        for reporter in &mut self.reporters {
            reporter.set_properties_from_state(state);
        }
    }

    /// Rescale the model geometry.
    ///
    /// Every scalable force element records its pre-scale quantities, then
    /// every element rescales its geometry, positions are realized again, and
    /// finally every element reconciles its properties.
    pub fn scale(&mut self, state: &mut SimState, scale_set: &ScaleSet) -> Result<()> {
        self.require_context()?;
        scale_set.validate()?;

        let num_bodies = self.kinematics.num_bodies();
        for body in scale_set.bodies().filter(|b| b.index() >= num_bodies) {
            warn!(model = %self.name, %body, "scale set names a body outside the model");
        }

        for force in &mut self.forces {
            if let Some(scalable) = force.as_scalable_mut() {
                scalable.pre_scale(state, scale_set)?;
            }
        }
        for force in &mut self.forces {
            if let Some(scalable) = force.as_scalable_mut() {
                scalable.scale(state, scale_set)?;
            }
        }
        state.realize_position(self.kinematics.as_ref());
        for force in &mut self.forces {
            if let Some(scalable) = force.as_scalable_mut() {
                scalable.post_scale(state, scale_set)?;
            }
        }

        debug!(model = %self.name, bodies = scale_set.bodies().count(), "model scaled");
        Ok(())
    }

    /// Step through `config`'s event times along a prescribed coordinate
    /// trajectory, offering each event to the reporters.
    ///
    /// Returns the number of rows added across all reporters. Events that
    /// replace a row recorded at the same time are not counted.
    pub fn simulate_prescribed<F>(
        &mut self,
        state: &mut SimState,
        config: &SimulationConfig,
        mut trajectory: F,
    ) -> Result<usize>
    where
        F: FnMut(f64) -> DVector<f64>,
    {
        self.require_context()?;
        config.validate()?;

        let rows_before = self.total_rows();
        for i in 0..config.num_events() {
            let time = config.event_time(i);
            state.set_time(time);
            self.set_coordinates(state, trajectory(time))?;
            self.realize_report(state);
        }
        let recorded = self.total_rows().saturating_sub(rows_before);

        debug!(
            model = %self.name,
            events = config.num_events(),
            recorded,
            "prescribed run complete"
        );
        Ok(recorded)
    }
}
