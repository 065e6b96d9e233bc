//! Named scalar outputs and their resolution to tree positions.
//!
//! Outputs are addressed by slash-separated component paths such as
//! `acl/tension` or `acl/path/length`. A path is resolved once, while the
//! model is connected, into an [`OutputRef`] holding positions in the
//! component tree. Evaluating an output afterwards walks those positions
//! and never looks a name up.

use std::collections::{BTreeMap, HashSet};

use sim_types::SimState;

use crate::Result;
use crate::component::Component;
use crate::error::ComponentError;

/// A resolved output: root index, child indices below it, output index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OutputRef {
    root: usize,
    children: Vec<usize>,
    output: usize,
}

impl OutputRef {
    /// Index of the root component.
    #[must_use]
    pub fn root(&self) -> usize {
        self.root
    }

    /// Depth below the root.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.children.len()
    }
}

/// Every output path published by a component forest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutputDirectory {
    entries: BTreeMap<String, OutputRef>,
}

impl OutputDirectory {
    /// Walk `roots` and record every published output.
    ///
    /// Fails if two roots share a name or two outputs share a path.
    pub fn collect(roots: &[&dyn Component]) -> Result<Self> {
        let mut directory = Self::default();
        let mut names = HashSet::new();

        for (index, root) in roots.iter().enumerate() {
            if !names.insert(root.name().to_owned()) {
                return Err(ComponentError::DuplicateName {
                    path: root.name().to_owned(),
                });
            }
            directory.visit(*root, root.name().to_owned(), index, Vec::new())?;
        }

        Ok(directory)
    }

    fn visit(
        &mut self,
        component: &dyn Component,
        prefix: String,
        root: usize,
        children: Vec<usize>,
    ) -> Result<()> {
        for (output, name) in component.outputs().iter().enumerate() {
            let path = format!("{prefix}/{name}");
            let entry = OutputRef {
                root,
                children: children.clone(),
                output,
            };
            if self.entries.insert(path.clone(), entry).is_some() {
                return Err(ComponentError::DuplicateName { path });
            }
        }

        for (index, sub) in component.subcomponents().into_iter().enumerate() {
            let mut path = children.clone();
            path.push(index);
            self.visit(sub, format!("{prefix}/{}", sub.name()), root, path)?;
        }

        Ok(())
    }

    /// Resolve an output path.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<&OutputRef> {
        self.entries.get(path)
    }

    /// All known output paths, sorted.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of outputs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no outputs are published.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Evaluates resolved outputs against a component forest.
///
/// Must be built over the same roots, in the same order, as the directory
/// the refs came from.
#[derive(Debug)]
pub struct OutputSource<'a> {
    roots: Vec<&'a dyn Component>,
}

impl<'a> OutputSource<'a> {
    /// Wrap a component forest.
    #[must_use]
    pub fn new(roots: Vec<&'a dyn Component>) -> Self {
        Self { roots }
    }

    /// Value of `output` at `state`, or `None` if the ref no longer points
    /// at an output.
    #[must_use]
    pub fn value(&self, output: &OutputRef, state: &SimState) -> Option<f64> {
        let mut component = *self.roots.get(output.root)?;
        for &child in &output.children {
            component = component.subcomponents().into_iter().nth(child)?;
        }
        component.calc_output(output.output, state)
    }
}
