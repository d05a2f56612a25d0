// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Derives a pipeline containing only a named subset of solids, rewriting
//! the dependency structure consistently.

use flowcore_core::{CoreError, DependencyStructure, PipelineDefinition};
use std::collections::HashSet;
use std::sync::Arc;

/// Builds the sub-pipeline of `pipeline` containing exactly `solid_names`
/// (duplicates collapsed). An input edge is retained iff its producing
/// solid is also in the subset; otherwise it is dropped and the caller must
/// seed that input externally (e.g. via `SubsetInfo`).
pub fn build_sub_pipeline(pipeline: &PipelineDefinition, solid_names: &[String]) -> Result<PipelineDefinition, CoreError> {
    let subset: HashSet<&str> = solid_names.iter().map(String::as_str).collect();

    for name in &subset {
        if !pipeline.has_solid(name) {
            return Err(CoreError::invariant(format!("subset references unknown solid '{name}'")));
        }
    }

    let solids: Vec<_> = pipeline.solids.iter().filter(|s| subset.contains(s.name.as_str())).cloned().collect();

    let mut dependency_structure = DependencyStructure::new();
    for (input, output) in pipeline.dependency_structure.iter() {
        if subset.contains(input.solid_name.as_str()) && subset.contains(output.solid_name.as_str()) {
            dependency_structure.add(input.clone(), output.clone());
        }
    }

    let mut seen_defs = HashSet::new();
    let mut solid_definitions = Vec::new();
    for solid in &solids {
        if seen_defs.insert(solid.definition.name.clone()) {
            solid_definitions.push(Arc::clone(&solid.definition));
        }
    }

    Ok(PipelineDefinition {
        name: pipeline.name.clone(),
        solids,
        solid_definitions,
        dependency_structure,
        context_definitions: pipeline.context_definitions.clone(),
    })
}

#[cfg(test)]
#[path = "subset_tests.rs"]
mod tests;
