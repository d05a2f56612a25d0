// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Config evaluation errors.

use serde_json::Value;
use thiserror::Error;

/// A single structured failure produced while evaluating a raw environment
/// mapping against a pipeline's [`crate::schema::EnvironmentSchema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvaluationError {
    MissingContextName { available: Vec<String> },
    UnknownContext { name: String, available: Vec<String> },
    UnknownResource { context_name: String, resource_name: String },
    InvalidPersistence { reason: String },
}

impl std::fmt::Display for EvaluationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EvaluationError::MissingContextName { available } => {
                write!(f, "environment.context.name is required (available: {})", available.join(", "))
            }
            EvaluationError::UnknownContext { name, available } => {
                write!(f, "unknown context '{name}' (available: {})", available.join(", "))
            }
            EvaluationError::UnknownResource { context_name, resource_name } => {
                write!(f, "context '{context_name}' does not declare resource '{resource_name}'")
            }
            EvaluationError::InvalidPersistence { reason } => write!(f, "invalid environment.context.persistence: {reason}"),
        }
    }
}

/// Raised when a raw environment mapping fails evaluation against a
/// pipeline's schema.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct PipelineConfigEvaluationError {
    pub pipeline_name: String,
    pub errors: Vec<EvaluationError>,
    pub raw: Value,
    pub message: String,
}

impl PipelineConfigEvaluationError {
    pub fn new(pipeline_name: impl Into<String>, errors: Vec<EvaluationError>, raw: Value) -> Self {
        let pipeline_name = pipeline_name.into();
        let message = format_errors(&pipeline_name, &errors);
        Self {
            pipeline_name,
            errors,
            raw,
            message,
        }
    }
}

fn format_errors(pipeline_name: &str, errors: &[EvaluationError]) -> String {
    let mut out = format!("invalid config for pipeline '{pipeline_name}':\n");
    for (i, error) in errors.iter().enumerate() {
        out.push_str(&format!("  {}. {error}\n", i + 1));
    }
    out
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error(transparent)]
    Evaluation(#[from] PipelineConfigEvaluationError),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
