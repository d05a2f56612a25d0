// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scoped acquisition of every resource declared by a context definition,
//! stacked for LIFO teardown.

use crate::error::EngineError;
use flowcore_core::{CoreError, PipelineDefinition, ResourceCreationInfo, Resources, RunId, TeardownStack};

/// Builds the `resources` aggregate for `context_name`, entering each
/// declared resource's factory onto `teardown` in declaration order.
///
/// If the context definition declares no resources, `user_resources` (the
/// user context factory's own return value) passes through unchanged. If it
/// does declare resources, `user_resources` must be empty — a user factory
/// may not hand back its own resources when the framework is building them.
pub fn build_resources(
    pipeline: &PipelineDefinition,
    context_name: &str,
    resource_configs: &indexmap::IndexMap<String, flowcore_core::RuntimeValue>,
    run_id: &RunId,
    user_resources: Resources,
    teardown: &mut TeardownStack,
) -> Result<Resources, EngineError> {
    let context_definition = pipeline
        .context_definitions
        .get(context_name)
        .ok_or_else(|| CoreError::invariant(format!("unknown context definition '{context_name}'")))?;

    if context_definition.resources.is_empty() {
        return Ok(user_resources);
    }

    if !user_resources.is_empty() {
        return Err(CoreError::invariant(
            "user context factory must not return resources when the context definition declares them",
        )
        .into());
    }

    let mut resources = Resources::new();
    for (name, resource_def) in context_definition.resources.iter() {
        let config = resource_configs.get(name).cloned().unwrap_or(flowcore_core::RuntimeValue::Null);
        let info = ResourceCreationInfo {
            config,
            run_id: run_id.clone(),
        };
        let factory = (resource_def.resource_fn)(info)?;
        let handle = teardown.enter(factory)?;
        resources.insert(name.clone(), (*handle).clone());
    }

    Ok(resources)
}

#[cfg(test)]
#[path = "resource_scope_tests.rs"]
mod tests;
