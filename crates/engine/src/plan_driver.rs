// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Plan Driver: runs a pipeline (optionally over a named subset of its
//! solids) to completion, or exposes the same run as a sequence the caller
//! drains one solid result at a time. Both share one inner routine.

use crate::aggregator::aggregate_step_results;
use crate::context_builder::{build_context, BuiltContext};
use crate::error::EngineError;
use crate::plan_core::{create_execution_plan_core, execute_plan_core};
use crate::subset::build_sub_pipeline;
use flowcore_config::{create_typed_environment, EnvironmentConfig};
use flowcore_core::{
    CoreError, ExecutionMetadata, PipelineDefinition, PipelineEvent, PipelineExecutionResult, RuntimeValue,
    SolidExecutionResult, TeardownStack,
};
use std::collections::VecDeque;
use tracing::instrument;

fn resolve_environment(pipeline: &PipelineDefinition, env: Option<RuntimeValue>) -> Result<EnvironmentConfig, EngineError> {
    Ok(create_typed_environment(pipeline, env)?)
}

/// Runs `pipeline` (or its named subset) to completion, opening and closing
/// a scoped context and emitting the full event sequence for the run.
#[instrument(skip(pipeline, env, meta, solid_subset), fields(pipeline = %pipeline.name))]
pub fn execute_pipeline(
    pipeline: &PipelineDefinition,
    env: Option<RuntimeValue>,
    throw_on_user_error: bool,
    meta: Option<ExecutionMetadata>,
    solid_subset: Option<&[String]>,
) -> Result<PipelineExecutionResult, EngineError> {
    let mut run = PipelineRun::open(pipeline, env, throw_on_user_error, meta, solid_subset)?;
    let mut solid_results = Vec::new();
    while let Some(result) = run.next_solid_result() {
        solid_results.push(result);
    }
    let run_id = run.run_id.clone();
    let pipeline_name = run.pipeline_name.clone();
    run.close()?;
    Ok(PipelineExecutionResult::new(run_id, pipeline_name, solid_results))
}

/// A scoped, drainable pipeline run. The context opened for this run stays
/// alive until every solid result has been produced and [`PipelineRun::close`]
/// releases it — matching "the scoped context remains open for the lifetime
/// of the sequence". Results are computed eagerly by the underlying step
/// engine (see `plan_core`, not the design focus of this crate) and handed
/// out one at a time; the scope is torn down on `close`, or on drop if the
/// caller abandons the run without draining it.
pub struct PipelineRun {
    run_id: flowcore_core::RunId,
    pipeline_name: String,
    context: BuiltContext,
    teardown: TeardownStack,
    pending: VecDeque<SolidExecutionResult>,
    pipeline_success: bool,
    closed: bool,
}

impl PipelineRun {
    pub fn open(
        pipeline: &PipelineDefinition,
        env: Option<RuntimeValue>,
        throw_on_user_error: bool,
        meta: Option<ExecutionMetadata>,
        solid_subset: Option<&[String]>,
    ) -> Result<Self, EngineError> {
        let meta = meta.unwrap_or_default();
        let working_pipeline = match solid_subset {
            Some(names) => build_sub_pipeline(pipeline, names)?,
            None => pipeline.clone(),
        };

        let env = resolve_environment(&working_pipeline, env)?;
        let mut teardown = TeardownStack::new();
        let built = match build_context(&working_pipeline, &env, &meta, &mut teardown) {
            Ok(built) => built,
            Err(err) => {
                let _ = teardown.unwind();
                return Err(err);
            }
        };

        built.context.emit(PipelineEvent::PipelineStart {
            run_id: built.context.run_id.clone(),
            pipeline_name: working_pipeline.name.clone(),
        });

        let plan = create_execution_plan_core(&working_pipeline, None);
        if plan.steps.is_empty() {
            built.context.debug("execution plan has no nodes");
            built.context.emit(PipelineEvent::PipelineSuccess {
                run_id: built.context.run_id.clone(),
                pipeline_name: working_pipeline.name.clone(),
            });
            return Ok(Self {
                run_id: built.context.run_id.clone(),
                pipeline_name: working_pipeline.name.clone(),
                context: built,
                teardown,
                pending: VecDeque::new(),
                pipeline_success: true,
                closed: false,
            });
        }

        let Some(first_step) = plan.steps.values().next() else {
            let err: EngineError = CoreError::invariant("execution plan has steps but no first step").into();
            let _ = teardown.unwind();
            return Err(err);
        };
        if !first_step.inputs.is_empty() {
            let err: EngineError =
                CoreError::invariant("the first topologically ordered step must have no step inputs").into();
            let _ = teardown.unwind();
            return Err(err);
        }

        let step_results = match execute_plan_core(&working_pipeline, &built.context, &plan, throw_on_user_error, None) {
            Ok(results) => results,
            Err(user_error) => {
                built.context.emit(PipelineEvent::PipelineFailure {
                    run_id: built.context.run_id.clone(),
                    pipeline_name: working_pipeline.name.clone(),
                });
                let _ = teardown.unwind();
                return Err(user_error.into());
            }
        };

        let solid_results = aggregate_step_results(&working_pipeline, step_results);
        let pipeline_success = solid_results.iter().all(SolidExecutionResult::success);
        built.context.emit(if pipeline_success {
            PipelineEvent::PipelineSuccess {
                run_id: built.context.run_id.clone(),
                pipeline_name: working_pipeline.name.clone(),
            }
        } else {
            PipelineEvent::PipelineFailure {
                run_id: built.context.run_id.clone(),
                pipeline_name: working_pipeline.name.clone(),
            }
        });

        Ok(Self {
            run_id: built.context.run_id.clone(),
            pipeline_name: working_pipeline.name.clone(),
            context: built,
            teardown,
            pending: solid_results.into(),
            pipeline_success,
            closed: false,
        })
    }

    pub fn run_id(&self) -> &flowcore_core::RunId {
        &self.run_id
    }

    pub fn success_so_far(&self) -> bool {
        self.pipeline_success
    }

    pub fn next_solid_result(&mut self) -> Option<SolidExecutionResult> {
        self.pending.pop_front()
    }

    /// Releases every resource acquired for this run, in reverse acquisition
    /// order. Must be called (directly, or implicitly via drop) once the
    /// caller is done with the sequence.
    pub fn close(mut self) -> Result<(), EngineError> {
        self.closed = true;
        Ok(self.teardown.unwind()?)
    }
}

impl Drop for PipelineRun {
    fn drop(&mut self) {
        if !self.closed {
            let _ = self.teardown.unwind();
        }
    }
}

#[cfg(test)]
#[path = "plan_driver_tests.rs"]
mod tests;
