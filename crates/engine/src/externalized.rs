// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Externalized Plan Runner: runs a named subset of an already-built plan,
//! seeding excluded upstream steps from marshalled inputs and persisting
//! selected outputs back out, all before/after a single scoped context.

use crate::context_builder::build_context;
use crate::error::EngineError;
use crate::plan_core::{create_execution_plan_core, execute_plan_core};
use flowcore_config::create_typed_environment;
use flowcore_core::{ExecutionMetadata, ExecutionPlan, PipelineDefinition, RuntimeValue, StepResult, SubsetInfo, TeardownStack};
use std::collections::HashMap;

/// One entry of `outputs_to_marshal`: persist `output` from a step to `path`.
#[derive(Debug, Clone)]
pub struct MarshalOutputRequest {
    pub output: String,
    pub path: String,
}

fn validate_requests(
    plan: &ExecutionPlan,
    inputs_to_marshal: &HashMap<String, HashMap<String, String>>,
    outputs_to_marshal: &HashMap<String, Vec<MarshalOutputRequest>>,
) -> Result<(), EngineError> {
    for (step_key, inputs) in inputs_to_marshal {
        let step = plan
            .step(step_key)
            .ok_or_else(|| EngineError::ExecutionStepNotFound { step_key: step_key.clone() })?;
        for input_name in inputs.keys() {
            if !step.inputs.iter().any(|i| &i.name == input_name) {
                return Err(EngineError::UnmarshalInputNotFound {
                    step_key: step_key.clone(),
                    input_name: input_name.clone(),
                });
            }
        }
    }

    for (step_key, requests) in outputs_to_marshal {
        let step = plan
            .step(step_key)
            .ok_or_else(|| EngineError::ExecutionStepNotFound { step_key: step_key.clone() })?;
        for request in requests {
            if !step.outputs.iter().any(|o| o.name == request.output) {
                return Err(EngineError::MarshalOutputNotFound {
                    step_key: step_key.clone(),
                    output_name: request.output.clone(),
                });
            }
        }
    }

    Ok(())
}

/// Runs `step_keys` out of `plan`, unmarshalling `inputs_to_marshal` to seed
/// excluded upstream steps and marshalling `outputs_to_marshal` once each
/// requested step succeeds. Returns every step result, successful and
/// failed alike — the caller inspects.
#[allow(clippy::too_many_arguments)]
pub fn execute_externalized_plan(
    pipeline: &PipelineDefinition,
    plan: &ExecutionPlan,
    step_keys: &[String],
    inputs_to_marshal: Option<HashMap<String, HashMap<String, String>>>,
    outputs_to_marshal: Option<HashMap<String, Vec<MarshalOutputRequest>>>,
    env: Option<RuntimeValue>,
    meta: Option<ExecutionMetadata>,
    throw_on_user_error: bool,
) -> Result<Vec<StepResult>, EngineError> {
    let inputs_to_marshal = inputs_to_marshal.unwrap_or_default();
    let outputs_to_marshal = outputs_to_marshal.unwrap_or_default();
    validate_requests(plan, &inputs_to_marshal, &outputs_to_marshal)?;

    let env = create_typed_environment(pipeline, env)?;
    let meta = meta.unwrap_or_default();
    let mut teardown = TeardownStack::new();
    let built = match build_context(pipeline, &env, &meta, &mut teardown) {
        Ok(built) => built,
        Err(err) => {
            let _ = teardown.unwind();
            return Err(err);
        }
    };

    let result = (|| -> Result<Vec<StepResult>, EngineError> {
        let mut loaded_inputs: HashMap<String, HashMap<String, RuntimeValue>> = HashMap::new();
        for (step_key, inputs) in &inputs_to_marshal {
            let step = plan
                .step(step_key)
                .ok_or_else(|| EngineError::ExecutionStepNotFound { step_key: step_key.clone() })?;
            for (input_name, path) in inputs {
                let solid = pipeline.solid_named(&step.solid_name).ok_or_else(|| {
                    EngineError::UnmarshalInputNotFound {
                        step_key: step_key.clone(),
                        input_name: input_name.clone(),
                    }
                })?;
                let input_def = solid.definition.input(input_name).ok_or_else(|| EngineError::UnmarshalInputNotFound {
                    step_key: step_key.clone(),
                    input_name: input_name.clone(),
                })?;
                let strategy = input_def.runtime_type.serialization_strategy.as_deref().ok_or_else(|| {
                    EngineError::NoInputSerializationStrategy {
                        step_key: step_key.clone(),
                        input_name: input_name.clone(),
                    }
                })?;
                let value = built.persistence_policy.read_value(strategy, path).map_err(|source| EngineError::UnmarshalInput {
                    step_key: step_key.clone(),
                    input_name: input_name.clone(),
                    source,
                })?;
                loaded_inputs.entry(step_key.clone()).or_default().insert(input_name.clone(), value);
            }
        }

        let mut subset_info = SubsetInfo::new(step_keys.to_vec());
        for (step_key, inputs) in loaded_inputs {
            for (input_name, value) in inputs {
                subset_info = subset_info.with_input(step_key.clone(), input_name, value);
            }
        }

        let rebuilt_plan = create_execution_plan_core(pipeline, Some(&subset_info));
        let step_results = execute_plan_core(pipeline, &built.context, &rebuilt_plan, throw_on_user_error, Some(&subset_info))?;

        for result in &step_results {
            let StepResult::Success { step_key, solid_name, data } = result else {
                continue;
            };
            let Some(requests) = outputs_to_marshal.get(step_key) else {
                continue;
            };
            let solid = pipeline.solid_named(solid_name).ok_or_else(|| {
                flowcore_core::CoreError::invariant(format!("solid '{solid_name}' named by a produced step result not found"))
            })?;
            for request in requests {
                let Some(value) = data.output_values.get(&request.output) else {
                    continue;
                };
                let output_def = solid.definition.output(&request.output).ok_or_else(|| EngineError::MarshalOutputNotFound {
                    step_key: step_key.clone(),
                    output_name: request.output.clone(),
                })?;
                let strategy = output_def.runtime_type.serialization_strategy.as_deref().ok_or_else(|| {
                    EngineError::NoOutputSerializationStrategy {
                        step_key: step_key.clone(),
                        output_name: request.output.clone(),
                    }
                })?;
                built.persistence_policy.write_value(strategy, &request.path, value).map_err(|source| EngineError::MarshalOutput {
                    step_key: step_key.clone(),
                    output_name: request.output.clone(),
                    source,
                })?;
            }
        }

        Ok(step_results)
    })();

    let teardown_result = teardown.unwind();
    match (result, teardown_result) {
        (Ok(results), Ok(())) => Ok(results),
        (Ok(_), Err(teardown_err)) => Err(teardown_err.into()),
        (Err(err), _) => Err(err),
    }
}

#[cfg(test)]
#[path = "externalized_tests.rs"]
mod tests;
