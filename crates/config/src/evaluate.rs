// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The (in-scope, minimal) config evaluator: turns a raw `environment.context`
//! mapping into a [`SelectedContext`], or a list of [`EvaluationError`]s.

use crate::error::EvaluationError;
use crate::schema::EnvironmentSchema;
use flowcore_core::RuntimeValue;
use indexmap::IndexMap;

/// The validated selection of one context definition plus its resource and
/// persistence configuration.
#[derive(Debug, Clone)]
pub struct SelectedContext {
    pub name: String,
    pub config: RuntimeValue,
    pub resources: IndexMap<String, RuntimeValue>,
    pub persistence: (String, RuntimeValue),
}

/// The validated configuration produced by [`evaluate_config_value`].
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub context: SelectedContext,
    pub raw: RuntimeValue,
}

fn object_field<'a>(value: &'a RuntimeValue, field: &str) -> Option<&'a RuntimeValue> {
    value.as_object().and_then(|obj| obj.get(field))
}

/// Validates `raw` against `schema`, selecting a context definition and its
/// resource/persistence configuration. Errors accumulate rather than
/// short-circuiting, so a caller sees every problem in one pass.
pub fn evaluate_config_value(schema: &EnvironmentSchema, raw: &RuntimeValue) -> Result<EnvironmentConfig, Vec<EvaluationError>> {
    let mut errors = Vec::new();
    let empty = RuntimeValue::Object(Default::default());
    let context_value = object_field(raw, "context").unwrap_or(&empty);

    let available: Vec<String> = schema.contexts.keys().cloned().collect();

    let name = match object_field(context_value, "name").and_then(RuntimeValue::as_str) {
        Some(name) => Some(name.to_string()),
        None => schema.default_context_name().map(str::to_string),
    };

    let name = match name {
        Some(name) => name,
        None => {
            errors.push(EvaluationError::MissingContextName { available: available.clone() });
            return Err(errors);
        }
    };

    let context_schema = match schema.context(&name) {
        Some(schema) => schema,
        None => {
            errors.push(EvaluationError::UnknownContext { name, available });
            return Err(errors);
        }
    };

    let config = object_field(context_value, "config").cloned().unwrap_or(RuntimeValue::Null);

    let mut resources = IndexMap::new();
    if let Some(declared) = object_field(context_value, "resources").and_then(RuntimeValue::as_object) {
        for (resource_name, resource_value) in declared {
            if !context_schema.resources.contains_key(resource_name) {
                errors.push(EvaluationError::UnknownResource {
                    context_name: name.clone(),
                    resource_name: resource_name.clone(),
                });
                continue;
            }
            let config = object_field(resource_value, "config").cloned().unwrap_or(RuntimeValue::Null);
            resources.insert(resource_name.clone(), config);
        }
    }
    for resource_name in context_schema.resources.keys() {
        resources.entry(resource_name.clone()).or_insert(RuntimeValue::Null);
    }

    let persistence = match object_field(context_value, "persistence").and_then(RuntimeValue::as_object) {
        None => ("file".to_string(), RuntimeValue::Null),
        Some(map) if map.len() == 1 => match map.iter().next() {
            Some((key, value)) => (key.clone(), value.clone()),
            None => ("file".to_string(), RuntimeValue::Null),
        },
        Some(map) if map.is_empty() => {
            errors.push(EvaluationError::InvalidPersistence {
                reason: "must have exactly one entry, found none".to_string(),
            });
            ("file".to_string(), RuntimeValue::Null)
        }
        Some(map) => {
            errors.push(EvaluationError::InvalidPersistence {
                reason: format!("must have exactly one entry, found {}", map.len()),
            });
            ("file".to_string(), RuntimeValue::Null)
        }
    };

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(EnvironmentConfig {
        context: SelectedContext {
            name,
            config,
            resources,
            persistence,
        },
        raw: raw.clone(),
    })
}

#[cfg(test)]
#[path = "evaluate_tests.rs"]
mod tests;
