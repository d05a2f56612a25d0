// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors raised by [`crate::persistence::PersistencePolicy`] implementations.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read '{location}': {source}")]
    Read { location: String, #[source] source: std::io::Error },

    #[error("failed to write '{location}': {source}")]
    Write { location: String, #[source] source: std::io::Error },

    #[error("serialization error: {0}")]
    Serialization(#[from] flowcore_core::SerializationError),
}
