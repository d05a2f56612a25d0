// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Execution plans: the concrete, ordered sequence of steps derived from a
//! pipeline definition.
//!
//! Building the plan's step graph from a [`crate::pipeline::PipelineDefinition`]
//! is nominally an external collaborator; a direct, single-threaded
//! planner lives here so the crate is runnable end to end — see `DESIGN.md`.

use crate::dependency::InputHandle;
use crate::pipeline::PipelineDefinition;
use crate::solid::DEFAULT_OUTPUT;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::fmt;

/// The three kinds of work a step performs, in the order they occur for a
/// given solid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKind {
    InputExpectation,
    Transform,
    OutputExpectation,
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepKind::InputExpectation => write!(f, "input_expectation"),
            StepKind::Transform => write!(f, "transform"),
            StepKind::OutputExpectation => write!(f, "output_expectation"),
        }
    }
}

/// An upstream value a step consumes, addressed by the step key that
/// produces it and the output name on that step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepInput {
    pub name: String,
    pub source_step_key: String,
    pub source_output_name: String,
}

/// A value a step produces, consumed by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutput {
    pub name: String,
}

/// A single unit of work within an [`ExecutionPlan`].
#[derive(Debug, Clone)]
pub struct ExecutionStep {
    pub key: String,
    pub solid_name: String,
    pub kind: StepKind,
    pub inputs: Vec<StepInput>,
    pub outputs: Vec<StepOutput>,
}

impl ExecutionStep {
    pub fn step_key_for(solid_name: &str, kind: StepKind) -> String {
        format!("{solid_name}.{kind}")
    }
}

/// The ordered plan derived from a pipeline: one or more steps per solid,
/// wired together by step key rather than solid name.
#[derive(Debug, Clone)]
pub struct ExecutionPlan {
    pub pipeline_name: String,
    pub steps: IndexMap<String, ExecutionStep>,
}

impl ExecutionPlan {
    pub fn step(&self, key: &str) -> Option<&ExecutionStep> {
        self.steps.get(key)
    }

    pub fn step_keys(&self) -> impl Iterator<Item = &String> {
        self.steps.keys()
    }

    /// Builds the transform-only plan for a pipeline: one transform step
    /// per solid, wired by the pipeline's dependency structure. Input and
    /// output expectation steps are added only for solids that declare
    /// expectations, bracketing the transform step for that solid.
    pub fn from_pipeline(pipeline: &PipelineDefinition) -> Self {
        let mut steps = IndexMap::new();

        for solid_name in pipeline.topological_solid_names() {
            let Some(solid) = pipeline.solid_named(&solid_name) else {
                continue;
            };
            let definition = &solid.definition;

            if !definition.input_expectations.is_empty() {
                let key = ExecutionStep::step_key_for(&solid_name, StepKind::InputExpectation);
                let inputs = transform_step_inputs(pipeline, &solid_name);
                let outputs = definition
                    .inputs
                    .iter()
                    .map(|i| StepOutput { name: i.name.clone() })
                    .collect();
                steps.insert(
                    key.clone(),
                    ExecutionStep {
                        key,
                        solid_name: solid_name.clone(),
                        kind: StepKind::InputExpectation,
                        inputs,
                        outputs,
                    },
                );
            }

            let transform_key = ExecutionStep::step_key_for(&solid_name, StepKind::Transform);
            let transform_inputs = if definition.input_expectations.is_empty() {
                transform_step_inputs(pipeline, &solid_name)
            } else {
                let expectation_key = ExecutionStep::step_key_for(&solid_name, StepKind::InputExpectation);
                definition
                    .inputs
                    .iter()
                    .map(|i| StepInput {
                        name: i.name.clone(),
                        source_step_key: expectation_key.clone(),
                        source_output_name: i.name.clone(),
                    })
                    .collect()
            };
            let transform_outputs = definition
                .outputs
                .iter()
                .map(|o| StepOutput { name: o.name.clone() })
                .collect();
            steps.insert(
                transform_key.clone(),
                ExecutionStep {
                    key: transform_key.clone(),
                    solid_name: solid_name.clone(),
                    kind: StepKind::Transform,
                    inputs: transform_inputs,
                    outputs: transform_outputs,
                },
            );

            if !definition.output_expectations.is_empty() {
                let key = ExecutionStep::step_key_for(&solid_name, StepKind::OutputExpectation);
                let inputs = definition
                    .outputs
                    .iter()
                    .map(|o| StepInput {
                        name: o.name.clone(),
                        source_step_key: transform_key.clone(),
                        source_output_name: o.name.clone(),
                    })
                    .collect();
                let outputs = definition
                    .outputs
                    .iter()
                    .map(|o| StepOutput { name: o.name.clone() })
                    .collect();
                steps.insert(
                    key.clone(),
                    ExecutionStep {
                        key,
                        solid_name: solid_name.clone(),
                        kind: StepKind::OutputExpectation,
                        inputs,
                        outputs,
                    },
                );
            }
        }

        Self {
            pipeline_name: pipeline.name.clone(),
            steps,
        }
    }
}

fn transform_step_inputs(pipeline: &PipelineDefinition, solid_name: &str) -> Vec<StepInput> {
    let Some(solid) = pipeline.solid_named(solid_name) else {
        return Vec::new();
    };
    solid
        .definition
        .inputs
        .iter()
        .filter_map(|input_def| {
            let handle = InputHandle::new(solid_name, input_def.name.clone());
            let step_input = if let Some(output_handle) = pipeline.dependency_structure.get_dep(&handle) {
                let producer = pipeline.solid_named(&output_handle.solid_name)?;
                let source_step_key = if producer.definition.output_expectations.is_empty() {
                    ExecutionStep::step_key_for(&output_handle.solid_name, StepKind::Transform)
                } else {
                    ExecutionStep::step_key_for(&output_handle.solid_name, StepKind::OutputExpectation)
                };
                StepInput {
                    name: input_def.name.clone(),
                    source_step_key,
                    source_output_name: output_handle.output_name.clone(),
                }
            } else {
                StepInput {
                    name: input_def.name.clone(),
                    source_step_key: String::new(),
                    source_output_name: DEFAULT_OUTPUT.to_string(),
                }
            };
            Some(step_input)
        })
        .collect()
}

/// Seeds an externalized run of a subset of a plan's steps with already-
/// materialized input values, bypassing any upstream step that would
/// normally produce them.
#[derive(Debug, Clone, Default)]
pub struct SubsetInfo {
    pub included_step_keys: Vec<String>,
    pub inputs: HashMap<String, HashMap<String, crate::runtime_type::RuntimeValue>>,
}

impl SubsetInfo {
    pub fn new(included_step_keys: Vec<String>) -> Self {
        Self {
            included_step_keys,
            inputs: HashMap::new(),
        }
    }

    pub fn with_input(
        mut self,
        step_key: impl Into<String>,
        input_name: impl Into<String>,
        value: crate::runtime_type::RuntimeValue,
    ) -> Self {
        self.inputs
            .entry(step_key.into())
            .or_default()
            .insert(input_name.into(), value);
        self
    }

    pub fn includes(&self, step_key: &str) -> bool {
        self.included_step_keys.iter().any(|k| k == step_key)
    }
}

#[cfg(test)]
#[path = "plan_tests.rs"]
mod tests;
