// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::pipeline::{ContextDefinition, PipelineDefinition, PipelineDefinitionBuilder};
use crate::runtime_type::RuntimeType;
use crate::scoped::Factory;
use crate::solid::{InputDefinition, OutputDefinition, Solid, SolidDefinition, SolidDefinitionBuilder, DEFAULT_OUTPUT};
use std::collections::HashMap;
use std::sync::Arc;

/// A zero-input solid definition producing a constant integer output.
pub fn constant_solid_def(name: &str, value: i64) -> Arc<SolidDefinition> {
    SolidDefinitionBuilder::new(name)
        .output(OutputDefinition::new(DEFAULT_OUTPUT, RuntimeType::any("any")))
        .transform(move |_ctx, _inputs| {
            let mut out = HashMap::new();
            out.insert(DEFAULT_OUTPUT.to_string(), serde_json::json!(value));
            Ok(out)
        })
}

/// A one-input, one-output solid definition that forwards its input
/// unchanged.
pub fn passthrough_solid_def(name: &str) -> Arc<SolidDefinition> {
    SolidDefinitionBuilder::new(name)
        .input(InputDefinition::new("in", RuntimeType::any("any")))
        .output(OutputDefinition::new(DEFAULT_OUTPUT, RuntimeType::any("any")))
        .transform(|_ctx, inputs| {
            let mut out = HashMap::new();
            out.insert(DEFAULT_OUTPUT.to_string(), inputs["in"].clone());
            Ok(out)
        })
}

/// `source -> sink` pipeline (`sink.in` <- `source.result`), both solids
/// named after their role.
pub fn linear_pipeline(name: &str) -> PipelineDefinition {
    PipelineDefinitionBuilder::new(name)
        .solid(Solid::new("source", constant_solid_def("source_def", 1)))
        .solid(Solid::new("sink", passthrough_solid_def("sink_def")))
        .dependency("sink", "in", "source", DEFAULT_OUTPUT)
        .build()
        .expect("linear_pipeline is a valid fixture")
}

/// A no-op context definition usable anywhere a pipeline needs at least one
/// context to select from.
pub fn noop_context_definition(name: &str) -> ContextDefinition {
    ContextDefinition::new(name, |_info| Ok(Factory::direct(crate::context::ExecutionContext::new())))
}
