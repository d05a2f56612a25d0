// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Aggregates every [`crate::step_result::StepResult`] belonging to one
//! solid into a single outcome.

use crate::error::CoreError;
use crate::runtime_type::RuntimeValue;
use crate::solid::SolidDefinition;
use crate::step_result::StepResult;
use std::sync::Arc;

/// The aggregated outcome of every step belonging to one solid instance. A
/// solid fails as a whole if any of its steps failed.
#[derive(Debug, Clone)]
pub struct SolidExecutionResult {
    pub solid_name: String,
    pub step_results: Vec<StepResult>,
    definition: Arc<SolidDefinition>,
}

impl SolidExecutionResult {
    /// Groups step results that share `solid_name` into one aggregate.
    /// `definition` is the solid's own definition, carried so
    /// [`Self::transformed_value`] can tell an undeclared output from one
    /// that simply wasn't produced. Panics if `step_results` is empty or
    /// mixes solid names — both are programmer errors in the caller (the
    /// Result Aggregator groups by solid name before calling this).
    pub fn from_results(solid_name: impl Into<String>, step_results: Vec<StepResult>, definition: Arc<SolidDefinition>) -> Self {
        let solid_name = solid_name.into();
        debug_assert!(!step_results.is_empty(), "a solid result needs at least one step result");
        debug_assert!(
            step_results.iter().all(|r| r.solid_name() == solid_name),
            "step results must all belong to the same solid"
        );
        Self {
            solid_name,
            step_results,
            definition,
        }
    }

    pub fn transforms(&self) -> impl Iterator<Item = &StepResult> {
        self.step_results
            .iter()
            .filter(|r| matches!(self.kind_of(r), crate::plan::StepKind::Transform))
    }

    pub fn input_expectations(&self) -> impl Iterator<Item = &StepResult> {
        self.step_results
            .iter()
            .filter(|r| matches!(self.kind_of(r), crate::plan::StepKind::InputExpectation))
    }

    pub fn output_expectations(&self) -> impl Iterator<Item = &StepResult> {
        self.step_results
            .iter()
            .filter(|r| matches!(self.kind_of(r), crate::plan::StepKind::OutputExpectation))
    }

    fn kind_of(&self, result: &StepResult) -> crate::plan::StepKind {
        if result.step_key().ends_with(".transform") {
            crate::plan::StepKind::Transform
        } else if result.step_key().ends_with(".input_expectation") {
            crate::plan::StepKind::InputExpectation
        } else {
            crate::plan::StepKind::OutputExpectation
        }
    }

    pub fn success(&self) -> bool {
        self.step_results.iter().all(StepResult::is_success)
    }

    /// All output values produced by this solid's transform step(s), keyed
    /// by output name. Empty unless the solid succeeded overall.
    pub fn transformed_values(&self) -> std::collections::HashMap<String, RuntimeValue> {
        if !self.success() {
            return std::collections::HashMap::new();
        }
        let mut values = std::collections::HashMap::new();
        for result in self.transforms() {
            if let StepResult::Success { data, .. } = result {
                values.extend(data.output_values.clone());
            }
        }
        values
    }

    /// The named output's value. Fails with an invariant violation if
    /// `output_name` is not declared on this solid; returns `Ok(None)` if
    /// the output is declared but the solid did not succeed overall.
    pub fn transformed_value(&self, output_name: &str) -> Result<Option<RuntimeValue>, CoreError> {
        if !self.definition.has_output(output_name) {
            return Err(CoreError::invariant(format!(
                "solid '{}' has no declared output '{output_name}'",
                self.solid_name
            )));
        }
        Ok(self.transformed_values().get(output_name).cloned())
    }
}

#[cfg(test)]
#[path = "solid_result_tests.rs"]
mod tests;
