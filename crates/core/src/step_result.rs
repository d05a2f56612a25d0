// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The outcome of running a single [`crate::plan::ExecutionStep`].

use crate::runtime_type::RuntimeValue;
use crate::solid::UserError;
use std::collections::HashMap;

/// The output values produced by a successful step.
#[derive(Debug, Clone, Default)]
pub struct SuccessData {
    pub output_values: HashMap<String, RuntimeValue>,
}

/// Why a step failed: either the user's transform/expectation code raised,
/// or an expectation evaluated to failure.
#[derive(Debug, Clone)]
pub enum FailureReason {
    UserError(UserError),
    ExpectationFailed { expectation_name: String, message: String },
}

#[derive(Debug, Clone)]
pub struct FailureData {
    pub reason: FailureReason,
}

/// One of the two terminal outcomes of running a step.
#[derive(Debug, Clone)]
pub enum StepResult {
    Success {
        step_key: String,
        solid_name: String,
        data: SuccessData,
    },
    Failure {
        step_key: String,
        solid_name: String,
        data: FailureData,
    },
}

impl StepResult {
    pub fn step_key(&self) -> &str {
        match self {
            StepResult::Success { step_key, .. } => step_key,
            StepResult::Failure { step_key, .. } => step_key,
        }
    }

    pub fn solid_name(&self) -> &str {
        match self {
            StepResult::Success { solid_name, .. } => solid_name,
            StepResult::Failure { solid_name, .. } => solid_name,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, StepResult::Success { .. })
    }

    pub fn success(step_key: impl Into<String>, solid_name: impl Into<String>, output_values: HashMap<String, RuntimeValue>) -> Self {
        StepResult::Success {
            step_key: step_key.into(),
            solid_name: solid_name.into(),
            data: SuccessData { output_values },
        }
    }

    pub fn user_failure(step_key: impl Into<String>, solid_name: impl Into<String>, error: UserError) -> Self {
        StepResult::Failure {
            step_key: step_key.into(),
            solid_name: solid_name.into(),
            data: FailureData {
                reason: FailureReason::UserError(error),
            },
        }
    }

    pub fn expectation_failure(
        step_key: impl Into<String>,
        solid_name: impl Into<String>,
        expectation_name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        StepResult::Failure {
            step_key: step_key.into(),
            solid_name: solid_name.into(),
            data: FailureData {
                reason: FailureReason::ExpectationFailed {
                    expectation_name: expectation_name.into(),
                    message: message.into(),
                },
            },
        }
    }
}

#[cfg(test)]
#[path = "step_result_tests.rs"]
mod tests;
