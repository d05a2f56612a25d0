// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dependency structure: which output handle feeds which input handle.

use std::collections::HashMap;
use std::fmt;

/// A solid's named input port, addressed by solid instance name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InputHandle {
    pub solid_name: String,
    pub input_name: String,
}

impl InputHandle {
    pub fn new(solid_name: impl Into<String>, input_name: impl Into<String>) -> Self {
        Self {
            solid_name: solid_name.into(),
            input_name: input_name.into(),
        }
    }
}

impl fmt::Display for InputHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.solid_name, self.input_name)
    }
}

/// A solid's named output port, addressed by solid instance name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OutputHandle {
    pub solid_name: String,
    pub output_name: String,
}

impl OutputHandle {
    pub fn new(solid_name: impl Into<String>, output_name: impl Into<String>) -> Self {
        Self {
            solid_name: solid_name.into(),
            output_name: output_name.into(),
        }
    }
}

impl fmt::Display for OutputHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.solid_name, self.output_name)
    }
}

/// Records which [`OutputHandle`] feeds a given [`InputHandle`].
#[derive(Debug, Clone, Default)]
pub struct DependencyStructure {
    deps: HashMap<InputHandle, OutputHandle>,
}

impl DependencyStructure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, input: InputHandle, output: OutputHandle) {
        self.deps.insert(input, output);
    }

    pub fn has_dep(&self, input: &InputHandle) -> bool {
        self.deps.contains_key(input)
    }

    pub fn get_dep(&self, input: &InputHandle) -> Option<&OutputHandle> {
        self.deps.get(input)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&InputHandle, &OutputHandle)> {
        self.deps.iter()
    }

    /// All input handles that depend on a solid producing `solid_name`.
    pub fn dependents_of(&self, solid_name: &str) -> Vec<&InputHandle> {
        self.deps
            .iter()
            .filter(|(_, out)| out.solid_name == solid_name)
            .map(|(input, _)| input)
            .collect()
    }
}

#[cfg(test)]
#[path = "dependency_tests.rs"]
mod tests;
