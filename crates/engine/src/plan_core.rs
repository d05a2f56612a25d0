// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Minimal, direct, single-threaded stand-ins for the plan builder
//! (`create_execution_plan_core`) and the step engine
//! (`execute_plan_core`). Neither is the design focus of this crate — they
//! exist so the crate is runnable end to end; see `DESIGN.md`.

use flowcore_core::{
    Expectation, ExecutionPlan, PipelineDefinition, RuntimeExecutionContext, RuntimeValue, SolidTransformContext,
    StepKind, StepResult, SubsetInfo, UserError,
};
use std::collections::HashMap;

/// Builds the execution plan for `pipeline`, optionally narrowing it to
/// `subset_info.included_step_keys` so the planner elides upstream steps
/// that a prior externalized run already computed.
pub fn create_execution_plan_core(pipeline: &PipelineDefinition, subset_info: Option<&SubsetInfo>) -> ExecutionPlan {
    let mut plan = ExecutionPlan::from_pipeline(pipeline);
    if let Some(subset) = subset_info {
        plan.steps.retain(|key, _| subset.includes(key));
    }
    plan
}

/// Runs every step of `plan` in order, resolving each step's inputs either
/// from a prior step's recorded output or (for steps with no recorded
/// upstream, e.g. a seeded externalized-plan boundary) from
/// `subset_info.inputs`. A step whose inputs cannot be resolved is skipped
/// (its upstream did not run or did not succeed) rather than producing a
/// result.
///
/// When `throw_on_user_error` is true, the first step failure aborts the
/// run and its [`UserError`] is returned directly; the caller sees no
/// partial results. When false, failures are recorded in the returned
/// `StepResult`s and execution continues.
pub fn execute_plan_core(
    pipeline: &PipelineDefinition,
    context: &RuntimeExecutionContext,
    plan: &ExecutionPlan,
    throw_on_user_error: bool,
    subset_info: Option<&SubsetInfo>,
) -> Result<Vec<StepResult>, UserError> {
    let mut outputs: HashMap<(String, String), RuntimeValue> = HashMap::new();
    let mut results = Vec::new();

    for key in plan.step_keys() {
        let Some(step) = plan.step(key) else {
            continue;
        };
        let Some(solid) = pipeline.solid_named(&step.solid_name) else {
            context.debug(&format!("skipping step '{}': owning solid not found in pipeline", step.key));
            continue;
        };

        let mut input_values = HashMap::with_capacity(step.inputs.len());
        let mut resolvable = true;
        for input in &step.inputs {
            if let Some(value) = subset_info.and_then(|s| s.inputs.get(&step.key)).and_then(|m| m.get(&input.name)) {
                input_values.insert(input.name.clone(), value.clone());
                continue;
            }
            if !input.source_step_key.is_empty() {
                if let Some(value) = outputs.get(&(input.source_step_key.clone(), input.source_output_name.clone())) {
                    input_values.insert(input.name.clone(), value.clone());
                    continue;
                }
            }
            resolvable = false;
        }

        if !resolvable {
            context.debug(&format!("skipping step '{}': an upstream input is unavailable", step.key));
            continue;
        }

        context.log(flowcore_core::LogLevel::Debug, &format!("running step '{}'", step.key));
        context.emit(flowcore_core::PipelineEvent::StepStart {
            run_id: context.run_id.clone(),
            step_key: step.key.clone(),
        });

        let transform_context = SolidTransformContext {
            run_id: &context.run_id,
            resources: &context.resources,
            loggers: &context.loggers,
        };

        match step.kind {
            StepKind::Transform => match (solid.definition.transform)(&transform_context, &input_values) {
                Ok(output_values) => {
                    for (name, value) in &output_values {
                        outputs.insert((step.key.clone(), name.clone()), value.clone());
                    }
                    context.emit(flowcore_core::PipelineEvent::StepSuccess {
                        run_id: context.run_id.clone(),
                        step_key: step.key.clone(),
                    });
                    results.push(StepResult::success(step.key.clone(), step.solid_name.clone(), output_values));
                }
                Err(error) => {
                    context.emit(flowcore_core::PipelineEvent::StepFailure {
                        run_id: context.run_id.clone(),
                        step_key: step.key.clone(),
                        message: error.message.clone(),
                    });
                    if throw_on_user_error {
                        return Err(error);
                    }
                    results.push(StepResult::user_failure(step.key.clone(), step.solid_name.clone(), error));
                }
            },
            StepKind::InputExpectation | StepKind::OutputExpectation => {
                let expectations = match step.kind {
                    StepKind::InputExpectation => &solid.definition.input_expectations,
                    _ => &solid.definition.output_expectations,
                };
                match run_expectations(expectations, &input_values) {
                    Ok(()) => {
                        for (name, value) in &input_values {
                            outputs.insert((step.key.clone(), name.clone()), value.clone());
                        }
                        context.emit(flowcore_core::PipelineEvent::StepSuccess {
                            run_id: context.run_id.clone(),
                            step_key: step.key.clone(),
                        });
                        results.push(StepResult::success(step.key.clone(), step.solid_name.clone(), input_values));
                    }
                    Err((expectation_name, message)) => {
                        context.emit(flowcore_core::PipelineEvent::StepFailure {
                            run_id: context.run_id.clone(),
                            step_key: step.key.clone(),
                            message: message.clone(),
                        });
                        if throw_on_user_error {
                            return Err(UserError {
                                solid: step.solid_name.clone(),
                                message: format!("expectation '{expectation_name}' failed: {message}"),
                            });
                        }
                        results.push(StepResult::expectation_failure(
                            step.key.clone(),
                            step.solid_name.clone(),
                            expectation_name,
                            message,
                        ));
                    }
                }
            }
        }
    }

    Ok(results)
}

/// Runs every expectation registered against a value present in `values`,
/// keyed by the same name the step input/output carries. Returns the first
/// failure encountered, if any.
fn run_expectations(
    expectations: &HashMap<String, Vec<Expectation>>,
    values: &HashMap<String, RuntimeValue>,
) -> Result<(), (String, String)> {
    for (name, checks) in expectations {
        let Some(value) = values.get(name) else {
            continue;
        };
        for expectation in checks {
            let result = (expectation.predicate)(value);
            if !result.success {
                return Err((expectation.name.clone(), result.message.unwrap_or_default()));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "plan_core_tests.rs"]
mod tests;
