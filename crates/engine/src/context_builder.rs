// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scoped construction of the [`RuntimeExecutionContext`] that is carried
//! through a pipeline or externalized run.

use crate::error::EngineError;
use crate::resource_scope::build_resources;
use flowcore_config::EnvironmentConfig;
use flowcore_core::{
    ContextCreationInfo, CoreError, EventLogger, ExecutionMetadata, IdGen, Logger, PipelineDefinition, RunId,
    RuntimeExecutionContext, TeardownStack, UuidIdGen,
};
use flowcore_storage::{FilePersistencePolicy, PersistencePolicy};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::instrument;

/// The outcome of the Context Builder: the system-owned execution context
/// plus the single persistence policy bound for the run's lifetime.
///
/// `RuntimeExecutionContext` itself (`flowcore-core`) carries no persistence
/// policy field — doing so would have `flowcore-core` depend on
/// `flowcore-storage`, inverting the crate dependency graph. The two travel
/// together as a pair instead; see `DESIGN.md`.
pub struct BuiltContext {
    pub context: RuntimeExecutionContext,
    pub persistence_policy: Arc<dyn PersistencePolicy>,
}

/// Opens a scoped `RuntimeExecutionContext` for `pipeline` under `env`,
/// pushing every acquired resource and the user context's own teardown (if
/// any) onto `teardown` in acquisition order.
#[instrument(skip(pipeline, env, meta, teardown), fields(pipeline = %pipeline.name))]
pub fn build_context(
    pipeline: &PipelineDefinition,
    env: &EnvironmentConfig,
    meta: &ExecutionMetadata,
    teardown: &mut TeardownStack,
) -> Result<BuiltContext, EngineError> {
    let context_definition = pipeline
        .context_definitions
        .get(&env.context.name)
        .ok_or_else(|| CoreError::invariant(format!("unknown context definition '{}'", env.context.name)))?;

    let run_id = meta.run_id.clone().unwrap_or_else(|| RunId::new(UuidIdGen.next()));

    let creation_info = ContextCreationInfo {
        config: env.context.config.clone(),
        pipeline_name: pipeline.name.clone(),
        run_id: run_id.clone(),
    };
    let factory = (context_definition.context_fn)(creation_info)?;
    let user_context = teardown.enter(factory)?;

    let resources = build_resources(
        pipeline,
        &env.context.name,
        &env.context.resources,
        &run_id,
        user_context.resources.clone(),
        teardown,
    )?;

    let loggers = merge_loggers(&user_context.loggers, meta, &run_id);
    let tags = merge_tags(&pipeline.name, &user_context.tags, &meta.tags)?;

    let (persistence_key, _persistence_config) = &env.context.persistence;
    let persistence_policy: Arc<dyn PersistencePolicy> = match persistence_key.as_str() {
        "file" => Arc::new(FilePersistencePolicy),
        other => return Err(CoreError::invariant(format!("unsupported persistence policy '{other}'")).into()),
    };

    let context = RuntimeExecutionContext {
        run_id,
        loggers,
        resources,
        tags,
        event_sink: meta.event_sink.clone(),
        original_config: env.raw.clone(),
    };

    Ok(BuiltContext {
        context,
        persistence_policy,
    })
}

/// When both `event_sink` and extra `loggers` are set on metadata, the
/// event-logger adapter wins and the extra loggers are ignored.
fn merge_loggers(user_loggers: &[Arc<dyn Logger>], meta: &ExecutionMetadata, run_id: &RunId) -> Vec<Arc<dyn Logger>> {
    let mut loggers: Vec<Arc<dyn Logger>> = user_loggers.to_vec();
    if let Some(sink) = &meta.event_sink {
        loggers.push(Arc::new(EventLogger::new(run_id.clone(), sink.clone())));
    } else {
        loggers.extend(meta.loggers.iter().cloned());
    }
    loggers
}

/// Merges `{"pipeline": name} ∪ user_tags ∪ meta_tags`, rejecting any
/// overlap between `user_tags` and `meta_tags`. The `pipeline` key is never
/// overridable by either side.
fn merge_tags(
    pipeline_name: &str,
    user_tags: &HashMap<String, String>,
    meta_tags: &HashMap<String, String>,
) -> Result<HashMap<String, String>, EngineError> {
    for key in meta_tags.keys() {
        if key != "pipeline" && user_tags.contains_key(key) {
            return Err(CoreError::invariant(format!("tag '{key}' set by both the user context and execution metadata")).into());
        }
    }

    let mut tags = HashMap::new();
    tags.insert("pipeline".to_string(), pipeline_name.to_string());
    for (key, value) in user_tags {
        if key != "pipeline" {
            tags.insert(key.clone(), value.clone());
        }
    }
    for (key, value) in meta_tags {
        if key != "pipeline" {
            tags.insert(key.clone(), value.clone());
        }
    }
    Ok(tags)
}

#[cfg(test)]
#[path = "context_builder_tests.rs"]
mod tests;
