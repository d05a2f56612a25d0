// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Result Aggregator: groups a run's step results by owning solid and
//! presents them in the pipeline's topological order. A solid with no
//! accumulated results (never reached, e.g. an unresolved upstream input)
//! is absent from the output rather than reported empty.

use flowcore_core::{PipelineDefinition, SolidExecutionResult, StepResult};
use std::collections::HashMap;

pub fn aggregate_step_results(pipeline: &PipelineDefinition, step_results: Vec<StepResult>) -> Vec<SolidExecutionResult> {
    let mut by_solid: HashMap<String, Vec<StepResult>> = HashMap::new();
    for result in step_results {
        by_solid.entry(result.solid_name().to_string()).or_default().push(result);
    }

    pipeline
        .topological_solid_names()
        .into_iter()
        .filter_map(|name| {
            let results = by_solid.remove(&name)?;
            let solid = pipeline.solid_named(&name)?;
            Some(SolidExecutionResult::from_results(name, results, solid.definition.clone()))
        })
        .collect()
}

#[cfg(test)]
#[path = "aggregator_tests.rs"]
mod tests;
