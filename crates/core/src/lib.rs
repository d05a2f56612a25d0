// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! flowcore-core: types and invariants for the pipeline execution core —
//! solids, dependency structures, execution plans, scoped resource
//! contexts, and the result types a run produces.

pub mod context;
pub mod dependency;
pub mod error;
pub mod event;
pub mod id;
pub mod pipeline;
pub mod pipeline_result;
pub mod plan;
pub mod runtime_type;
pub mod scoped;
pub mod solid;
pub mod solid_result;
pub mod step_result;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use context::{
    ContextCreationInfo, ContextFactory, EventLogger, ExecutionContext, ExecutionMetadata, Logger,
    ResourceCreationInfo, ResourceValue, Resources, RuntimeExecutionContext, SolidTransformContext,
    TracingLogger,
};
pub use dependency::{DependencyStructure, InputHandle, OutputHandle};
pub use error::CoreError;
pub use event::{EventSink, LogLevel, NoopEventSink, PipelineEvent, RecordingEventSink};
pub use id::{IdGen, RunId, SequentialIdGen, ShortId, StepKey, UuidIdGen};
pub use pipeline::{
    ContextDefinition, ContextFn, PipelineDefinition, PipelineDefinitionBuilder, ResourceDefinition, ResourceFn,
};
pub use pipeline_result::PipelineExecutionResult;
pub use plan::{ExecutionPlan, ExecutionStep, StepInput, StepKind, StepOutput, SubsetInfo};
pub use runtime_type::{RuntimeType, RuntimeValue, SerializationError, SerializationStrategy};
pub use scoped::{Factory, TeardownStack};
pub use solid::{
    Expectation, ExpectationResult, InputDefinition, OutputDefinition, Solid, SolidDefinition,
    SolidDefinitionBuilder, TransformFn, UserError, DEFAULT_OUTPUT,
};
pub use solid_result::SolidExecutionResult;
pub use step_result::{FailureData, FailureReason, StepResult, SuccessData};
