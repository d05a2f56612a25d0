// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runtime types and the serialization-strategy registry referenced at
//! externalized-plan boundaries. The registry itself is an external
//! collaborator; this module only defines the trait seam the persistence
//! policy marshals through.

use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// A boundary value flowing between steps. Dynamically typed because the
/// config/type system that would give it a static shape is out of scope.
pub type RuntimeValue = Value;

/// Serializes/deserializes a [`RuntimeValue`] to and from a persistence
/// policy location. Implementations live in `flowcore-storage`.
pub trait SerializationStrategy: fmt::Debug + Send + Sync {
    fn name(&self) -> &str;
    fn serialize(&self, value: &RuntimeValue) -> Result<Vec<u8>, SerializationError>;
    fn deserialize(&self, bytes: &[u8]) -> Result<RuntimeValue, SerializationError>;
}

#[derive(Debug, thiserror::Error)]
#[error("serialization error ({strategy}): {message}")]
pub struct SerializationError {
    pub strategy: String,
    pub message: String,
}

/// The declared type of a solid input or output.
#[derive(Clone)]
pub struct RuntimeType {
    pub name: String,
    pub serialization_strategy: Option<Arc<dyn SerializationStrategy>>,
}

impl fmt::Debug for RuntimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuntimeType")
            .field("name", &self.name)
            .field("has_serialization_strategy", &self.serialization_strategy.is_some())
            .finish()
    }
}

impl RuntimeType {
    /// A type with no declared serialization strategy — cannot be marshalled
    /// at an externalized-plan boundary.
    pub fn any(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            serialization_strategy: None,
        }
    }

    pub fn with_strategy(name: impl Into<String>, strategy: Arc<dyn SerializationStrategy>) -> Self {
        Self {
            name: name.into(),
            serialization_strategy: Some(strategy),
        }
    }
}
