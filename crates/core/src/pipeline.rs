// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pipeline definitions: a set of solids, their dependency structure, and
//! the named context definitions a run can select from.
//!
//! Topological ordering of solids is nominally an external collaborator,
//! but a minimal ordering utility lives here so the crate is runnable
//! end to end — see `DESIGN.md`.

use crate::context::{ContextFactory, ContextCreationInfo, ResourceCreationInfo, ResourceValue};
use crate::dependency::{DependencyStructure, InputHandle};
use crate::error::CoreError;
use crate::scoped::Factory;
use crate::solid::{Solid, SolidDefinition};
use indexmap::IndexMap;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

pub type ContextFn = Arc<dyn Fn(ContextCreationInfo) -> Result<ContextFactory, CoreError> + Send + Sync>;
pub type ResourceFn =
    Arc<dyn Fn(ResourceCreationInfo) -> Result<Factory<ResourceValue>, CoreError> + Send + Sync>;

/// A named, scoped dependency constructed by a user-provided factory with
/// guaranteed teardown (GLOSSARY "Resource").
#[derive(Clone)]
pub struct ResourceDefinition {
    pub name: String,
    pub resource_fn: ResourceFn,
}

impl ResourceDefinition {
    pub fn new(
        name: impl Into<String>,
        resource_fn: impl Fn(ResourceCreationInfo) -> Result<Factory<ResourceValue>, CoreError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            resource_fn: Arc::new(resource_fn),
        }
    }
}

/// A template declaring how to construct a runtime context: the user
/// factory, and the resources (if any) the framework builds on its behalf
/// (GLOSSARY "Context Definition").
#[derive(Clone)]
pub struct ContextDefinition {
    pub name: String,
    pub context_fn: ContextFn,
    pub resources: IndexMap<String, ResourceDefinition>,
}

impl ContextDefinition {
    pub fn new(
        name: impl Into<String>,
        context_fn: impl Fn(ContextCreationInfo) -> Result<ContextFactory, CoreError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            context_fn: Arc::new(context_fn),
            resources: IndexMap::new(),
        }
    }

    pub fn with_resource(mut self, resource: ResourceDefinition) -> Self {
        self.resources.insert(resource.name.clone(), resource);
        self
    }
}

/// A directed acyclic graph of solids, their dependency structure, and the
/// context definitions a run can select from. Immutable after construction.
#[derive(Clone)]
pub struct PipelineDefinition {
    pub name: String,
    pub solids: Vec<Solid>,
    pub solid_definitions: Vec<Arc<SolidDefinition>>,
    pub dependency_structure: DependencyStructure,
    pub context_definitions: IndexMap<String, ContextDefinition>,
}

impl std::fmt::Debug for PipelineDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineDefinition")
            .field("name", &self.name)
            .field("solids", &self.solids.iter().map(|s| &s.name).collect::<Vec<_>>())
            .finish()
    }
}

impl PipelineDefinition {
    pub fn has_solid(&self, name: &str) -> bool {
        self.solids.iter().any(|s| s.name == name)
    }

    pub fn solid_named(&self, name: &str) -> Option<&Solid> {
        self.solids.iter().find(|s| s.name == name)
    }

    /// Solid instance names in topological order: a solid appears only
    /// after every solid that produces one of its inputs.
    pub fn topological_solid_names(&self) -> Vec<String> {
        let mut in_degree: IndexMap<&str, usize> =
            self.solids.iter().map(|s| (s.name.as_str(), 0usize)).collect();

        for solid in &self.solids {
            for input in solid.definition.inputs.iter() {
                let handle = InputHandle::new(solid.name.clone(), input.name.clone());
                if self.dependency_structure.has_dep(&handle) {
                    if let Some(deg) = in_degree.get_mut(solid.name.as_str()) {
                        *deg += 1;
                    }
                }
            }
        }

        let mut ready: VecDeque<&str> = in_degree
            .iter()
            .filter(|(_, deg)| **deg == 0)
            .map(|(name, _)| *name)
            .collect();
        let mut ready_sorted: Vec<&str> = ready.drain(..).collect();
        ready_sorted.sort_unstable();
        let mut queue: VecDeque<&str> = ready_sorted.into();

        let mut order = Vec::with_capacity(self.solids.len());
        let mut remaining = in_degree;

        while let Some(name) = queue.pop_front() {
            order.push(name.to_string());
            let Some(solid) = self.solid_named(name) else {
                continue;
            };
            let mut newly_ready = Vec::new();
            for dependent_input in self.dependency_structure.dependents_of(name) {
                if let Some(deg) = remaining.get_mut(dependent_input.solid_name.as_str()) {
                    *deg -= 1;
                    if *deg == 0 {
                        newly_ready.push(dependent_input.solid_name.clone());
                    }
                }
            }
            let _ = &solid.name;
            newly_ready.sort();
            for name in newly_ready {
                if let Some((key, _)) = remaining.get_key_value(name.as_str()) {
                    queue.push_back(key);
                }
            }
        }

        order
    }
}

/// Builder validating invariant 1: every dependency edge references a
/// solid present in the pipeline.
pub struct PipelineDefinitionBuilder {
    name: String,
    solids: Vec<Solid>,
    dependency_structure: DependencyStructure,
    context_definitions: IndexMap<String, ContextDefinition>,
}

impl PipelineDefinitionBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            solids: Vec::new(),
            dependency_structure: DependencyStructure::new(),
            context_definitions: IndexMap::new(),
        }
    }

    pub fn solid(mut self, solid: Solid) -> Self {
        self.solids.push(solid);
        self
    }

    pub fn dependency(
        mut self,
        input_solid: impl Into<String>,
        input_name: impl Into<String>,
        output_solid: impl Into<String>,
        output_name: impl Into<String>,
    ) -> Self {
        self.dependency_structure.add(
            InputHandle::new(input_solid, input_name),
            crate::dependency::OutputHandle::new(output_solid, output_name),
        );
        self
    }

    pub fn context(mut self, context_definition: ContextDefinition) -> Self {
        self.context_definitions
            .insert(context_definition.name.clone(), context_definition);
        self
    }

    pub fn build(self) -> Result<PipelineDefinition, CoreError> {
        let solid_names: HashSet<&str> = self.solids.iter().map(|s| s.name.as_str()).collect();

        for (input, output) in self.dependency_structure.iter() {
            if !solid_names.contains(input.solid_name.as_str()) {
                return Err(CoreError::invariant(format!(
                    "dependency references unknown solid '{}' (input side)",
                    input.solid_name
                )));
            }
            if !solid_names.contains(output.solid_name.as_str()) {
                return Err(CoreError::invariant(format!(
                    "dependency references unknown solid '{}' (output side)",
                    output.solid_name
                )));
            }
        }

        let mut seen_defs = HashSet::new();
        let mut solid_definitions = Vec::new();
        for solid in &self.solids {
            if seen_defs.insert(solid.definition.name.clone()) {
                solid_definitions.push(Arc::clone(&solid.definition));
            }
        }

        Ok(PipelineDefinition {
            name: self.name,
            solids: self.solids,
            solid_definitions,
            dependency_structure: self.dependency_structure,
            context_definitions: self.context_definitions,
        })
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
