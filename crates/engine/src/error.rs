// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The engine's error taxonomy: composes [`CoreError`] and [`ConfigError`]
//! with the externalized-plan and in-step failure kinds that need a
//! persistence policy or solid transform to actually occur.

use flowcore_config::ConfigError;
use flowcore_core::{CoreError, UserError};
use flowcore_storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("error in solid '{0}'", .0.solid)]
    User(#[from] UserError),

    #[error("execution step not found: {step_key}")]
    ExecutionStepNotFound { step_key: String },

    #[error("input '{input_name}' not found on execution step '{step_key}'")]
    UnmarshalInputNotFound { step_key: String, input_name: String },

    #[error("input '{input_name}' on step '{step_key}' has no serialization strategy")]
    NoInputSerializationStrategy { step_key: String, input_name: String },

    #[error("failed to unmarshal input '{input_name}' on step '{step_key}'")]
    UnmarshalInput {
        step_key: String,
        input_name: String,
        #[source]
        source: StorageError,
    },

    #[error("output '{output_name}' not found on execution step '{step_key}'")]
    MarshalOutputNotFound { step_key: String, output_name: String },

    #[error("output '{output_name}' on step '{step_key}' has no serialization strategy")]
    NoOutputSerializationStrategy { step_key: String, output_name: String },

    #[error("failed to marshal output '{output_name}' on step '{step_key}'")]
    MarshalOutput {
        step_key: String,
        output_name: String,
        #[source]
        source: StorageError,
    },
}
