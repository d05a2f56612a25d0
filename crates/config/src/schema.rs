// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The environment schema a pipeline publishes: which context definitions
//! exist and which resources each declares. The config type system proper
//! (per-field validation of `config` payloads) is out of scope; the schema
//! only records names so the evaluator can reject unknown context/resource
//! selection.

use flowcore_core::PipelineDefinition;
use indexmap::IndexMap;

/// Declares a resource name a context definition exposes. Carries no shape
/// information beyond the name — the config type system that would give it
/// one is out of scope.
#[derive(Debug, Clone, Default)]
pub struct ResourceSchema {
    pub name: String,
}

/// The schema for one named context definition: which resource names it
/// declares.
#[derive(Debug, Clone, Default)]
pub struct ContextSchema {
    pub resources: IndexMap<String, ResourceSchema>,
}

/// The full environment schema for a pipeline: one [`ContextSchema`] per
/// named context definition.
#[derive(Debug, Clone, Default)]
pub struct EnvironmentSchema {
    pub contexts: IndexMap<String, ContextSchema>,
}

impl EnvironmentSchema {
    pub fn from_pipeline(pipeline: &PipelineDefinition) -> Self {
        let contexts = pipeline
            .context_definitions
            .iter()
            .map(|(name, definition)| {
                let resources = definition
                    .resources
                    .keys()
                    .map(|resource_name| {
                        (
                            resource_name.clone(),
                            ResourceSchema {
                                name: resource_name.clone(),
                            },
                        )
                    })
                    .collect();
                (name.clone(), ContextSchema { resources })
            })
            .collect();

        Self { contexts }
    }

    pub fn has_context(&self, name: &str) -> bool {
        self.contexts.contains_key(name)
    }

    pub fn context(&self, name: &str) -> Option<&ContextSchema> {
        self.contexts.get(name)
    }

    /// The lone context name, if the schema declares exactly one. Used to
    /// pick a default when the raw environment omits `context.name`.
    pub fn default_context_name(&self) -> Option<&str> {
        if self.contexts.len() == 1 {
            self.contexts.keys().next().map(String::as_str)
        } else {
            None
        }
    }
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
