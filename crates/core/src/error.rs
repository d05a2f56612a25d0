// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Framework-level error taxonomy.
//!
//! Errors that originate from API misuse or plan bookkeeping, as opposed to
//! config evaluation (`flowcore-config`), marshalling I/O, or in-step user
//! errors (both `flowcore-engine`, since they need a persistence policy /
//! solid transform to actually fail). Invariant violations are not wrapped
//! with an underlying cause — there isn't one, by construction.

use thiserror::Error;

/// Framework/API misuse: missing solid, overlapping tags, unsupported
/// persistence key, an empty result list, and similar conditions the caller
/// is expected never to hit in correct usage.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    #[error("execution step not found: {step_key}")]
    ExecutionStepNotFound { step_key: String },

    #[error("input {input_name} does not exist on execution step {step_key}")]
    UnmarshalInputNotFound {
        input_name: String,
        step_key: String,
    },

    #[error("execution step {step_key} does not declare output {output_name}")]
    MarshalOutputNotFound {
        step_key: String,
        output_name: String,
    },
}

impl CoreError {
    pub fn invariant(message: impl Into<String>) -> Self {
        CoreError::InvariantViolation(message.into())
    }
}
