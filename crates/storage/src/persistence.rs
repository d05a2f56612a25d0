// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `PersistencePolicy` reads/writes boundary values at externalized-plan
//! marshalling points. One concrete variant, `file`, is in scope.

use crate::error::StorageError;
use flowcore_core::{RuntimeValue, SerializationStrategy};
use std::fmt;
use std::path::Path;

/// Reads/writes a single boundary value at a caller-supplied location,
/// using a type's serialization strategy.
pub trait PersistencePolicy: fmt::Debug + Send + Sync {
    fn read_value(&self, strategy: &dyn SerializationStrategy, location: &str) -> Result<RuntimeValue, StorageError>;
    fn write_value(&self, strategy: &dyn SerializationStrategy, location: &str, value: &RuntimeValue) -> Result<(), StorageError>;
}

/// Reads/writes values as files on the local filesystem. `location` is an
/// arbitrary path supplied by the caller; this policy owns no on-disk
/// layout of its own.
#[derive(Debug, Default)]
pub struct FilePersistencePolicy;

impl PersistencePolicy for FilePersistencePolicy {
    fn read_value(&self, strategy: &dyn SerializationStrategy, location: &str) -> Result<RuntimeValue, StorageError> {
        let bytes = std::fs::read(location).map_err(|source| StorageError::Read {
            location: location.to_string(),
            source,
        })?;
        tracing::debug!(location, strategy = strategy.name(), "read persisted value");
        Ok(strategy.deserialize(&bytes)?)
    }

    fn write_value(&self, strategy: &dyn SerializationStrategy, location: &str, value: &RuntimeValue) -> Result<(), StorageError> {
        let bytes = strategy.serialize(value)?;
        if let Some(parent) = Path::new(location).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|source| StorageError::Write {
                    location: location.to_string(),
                    source,
                })?;
            }
        }
        std::fs::write(location, bytes).map_err(|source| StorageError::Write {
            location: location.to_string(),
            source,
        })?;
        tracing::debug!(location, strategy = strategy.name(), "wrote persisted value");
        Ok(())
    }
}

#[cfg(test)]
#[path = "persistence_tests.rs"]
mod tests;
