// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Solids: named compute nodes with typed inputs/outputs, a transform, and
//! optional input/output expectations.

use crate::context::SolidTransformContext;
use crate::runtime_type::{RuntimeType, RuntimeValue};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Raised by user transform or expectation code.
#[derive(Debug, Clone)]
pub struct UserError {
    pub solid: String,
    pub message: String,
}

impl fmt::Display for UserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error in solid '{}': {}", self.solid, self.message)
    }
}

impl std::error::Error for UserError {}

/// A named, typed input port on a solid.
#[derive(Clone)]
pub struct InputDefinition {
    pub name: String,
    pub runtime_type: RuntimeType,
}

impl InputDefinition {
    pub fn new(name: impl Into<String>, runtime_type: RuntimeType) -> Self {
        Self {
            name: name.into(),
            runtime_type,
        }
    }
}

/// A named, typed output port on a solid.
#[derive(Clone)]
pub struct OutputDefinition {
    pub name: String,
    pub runtime_type: RuntimeType,
}

impl OutputDefinition {
    pub fn new(name: impl Into<String>, runtime_type: RuntimeType) -> Self {
        Self {
            name: name.into(),
            runtime_type,
        }
    }
}

pub const DEFAULT_OUTPUT: &str = "result";

/// Outcome of evaluating an expectation against a value.
#[derive(Debug, Clone)]
pub struct ExpectationResult {
    pub success: bool,
    pub message: Option<String>,
}

impl ExpectationResult {
    pub fn passed() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

/// A named check run against an input or output value before/after the
/// transform.
#[derive(Clone)]
pub struct Expectation {
    pub name: String,
    pub predicate: Arc<dyn Fn(&RuntimeValue) -> ExpectationResult + Send + Sync>,
}

impl Expectation {
    pub fn new(
        name: impl Into<String>,
        predicate: impl Fn(&RuntimeValue) -> ExpectationResult + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            predicate: Arc::new(predicate),
        }
    }
}

/// The user-supplied compute: maps input values to output values.
pub type TransformFn = Arc<
    dyn Fn(&SolidTransformContext, &HashMap<String, RuntimeValue>) -> Result<HashMap<String, RuntimeValue>, UserError>
        + Send
        + Sync,
>;

/// Declares a solid's shape: its ports, expectations, and transform. A
/// single definition may be instantiated multiple times under distinct
/// [`crate::solid::Solid`] names within one pipeline.
#[derive(Clone)]
pub struct SolidDefinition {
    pub name: String,
    pub inputs: Vec<InputDefinition>,
    pub outputs: Vec<OutputDefinition>,
    pub input_expectations: HashMap<String, Vec<Expectation>>,
    pub output_expectations: HashMap<String, Vec<Expectation>>,
    pub transform: TransformFn,
}

impl fmt::Debug for SolidDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SolidDefinition")
            .field("name", &self.name)
            .field("inputs", &self.inputs.iter().map(|i| &i.name).collect::<Vec<_>>())
            .field("outputs", &self.outputs.iter().map(|o| &o.name).collect::<Vec<_>>())
            .finish()
    }
}

impl SolidDefinition {
    pub fn has_input(&self, name: &str) -> bool {
        self.inputs.iter().any(|i| i.name == name)
    }

    pub fn has_output(&self, name: &str) -> bool {
        self.outputs.iter().any(|o| o.name == name)
    }

    pub fn input(&self, name: &str) -> Option<&InputDefinition> {
        self.inputs.iter().find(|i| i.name == name)
    }

    pub fn output(&self, name: &str) -> Option<&OutputDefinition> {
        self.outputs.iter().find(|o| o.name == name)
    }
}

/// Builder for [`SolidDefinition`], mirroring the ergonomics of the
/// teacher's config/event builders.
pub struct SolidDefinitionBuilder {
    name: String,
    inputs: Vec<InputDefinition>,
    outputs: Vec<OutputDefinition>,
    input_expectations: HashMap<String, Vec<Expectation>>,
    output_expectations: HashMap<String, Vec<Expectation>>,
}

impl SolidDefinitionBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            input_expectations: HashMap::new(),
            output_expectations: HashMap::new(),
        }
    }

    pub fn input(mut self, input: InputDefinition) -> Self {
        self.inputs.push(input);
        self
    }

    pub fn output(mut self, output: OutputDefinition) -> Self {
        self.outputs.push(output);
        self
    }

    pub fn input_expectation(mut self, input_name: impl Into<String>, expectation: Expectation) -> Self {
        self.input_expectations
            .entry(input_name.into())
            .or_default()
            .push(expectation);
        self
    }

    pub fn output_expectation(mut self, output_name: impl Into<String>, expectation: Expectation) -> Self {
        self.output_expectations
            .entry(output_name.into())
            .or_default()
            .push(expectation);
        self
    }

    pub fn transform(
        self,
        transform: impl Fn(&SolidTransformContext, &HashMap<String, RuntimeValue>) -> Result<HashMap<String, RuntimeValue>, UserError>
            + Send
            + Sync
            + 'static,
    ) -> Arc<SolidDefinition> {
        Arc::new(SolidDefinition {
            name: self.name,
            inputs: self.inputs,
            outputs: self.outputs,
            input_expectations: self.input_expectations,
            output_expectations: self.output_expectations,
            transform: Arc::new(transform),
        })
    }
}

/// An instance of a [`SolidDefinition`] within a pipeline, under a unique
/// name. A definition may back several instances.
#[derive(Clone, Debug)]
pub struct Solid {
    pub name: String,
    pub definition: Arc<SolidDefinition>,
}

impl Solid {
    pub fn new(name: impl Into<String>, definition: Arc<SolidDefinition>) -> Self {
        Self {
            name: name.into(),
            definition,
        }
    }
}

#[cfg(test)]
#[path = "solid_tests.rs"]
mod tests;
