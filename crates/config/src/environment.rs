// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Turns a raw environment mapping into a validated [`EnvironmentConfig`],
//! or fails with a structured, numbered-message error.

use crate::error::{ConfigError, PipelineConfigEvaluationError};
use crate::evaluate::{evaluate_config_value, EnvironmentConfig};
use crate::schema::EnvironmentSchema;
use flowcore_core::{PipelineDefinition, RuntimeValue};

/// Validates `raw_env` (or an empty mapping, if absent) against `pipeline`'s
/// environment schema, producing a typed [`EnvironmentConfig`].
pub fn create_typed_environment(
    pipeline: &PipelineDefinition,
    raw_env: Option<RuntimeValue>,
) -> Result<EnvironmentConfig, ConfigError> {
    let schema = EnvironmentSchema::from_pipeline(pipeline);
    let raw = raw_env.unwrap_or(RuntimeValue::Object(Default::default()));

    evaluate_config_value(&schema, &raw)
        .map_err(|errors| ConfigError::Evaluation(PipelineConfigEvaluationError::new(pipeline.name.clone(), errors, raw)))
}

#[cfg(test)]
#[path = "environment_tests.rs"]
mod tests;
