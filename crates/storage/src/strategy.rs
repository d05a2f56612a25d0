// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! [`SerializationStrategy`] implementations used at externalized-plan
//! marshalling boundaries.

use flowcore_core::{RuntimeValue, SerializationError, SerializationStrategy};

/// Serializes any [`RuntimeValue`] as JSON text.
#[derive(Debug, Default)]
pub struct JsonSerializationStrategy;

impl SerializationStrategy for JsonSerializationStrategy {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, value: &RuntimeValue) -> Result<Vec<u8>, SerializationError> {
        serde_json::to_vec(value).map_err(|e| SerializationError {
            strategy: self.name().to_string(),
            message: e.to_string(),
        })
    }

    fn deserialize(&self, bytes: &[u8]) -> Result<RuntimeValue, SerializationError> {
        serde_json::from_slice(bytes).map_err(|e| SerializationError {
            strategy: self.name().to_string(),
            message: e.to_string(),
        })
    }
}

/// Serializes a `RuntimeValue::String` as its raw UTF-8 bytes, with no JSON
/// envelope. Any other value shape is a serialization error.
#[derive(Debug, Default)]
pub struct RawBytesSerializationStrategy;

impl SerializationStrategy for RawBytesSerializationStrategy {
    fn name(&self) -> &str {
        "bytes"
    }

    fn serialize(&self, value: &RuntimeValue) -> Result<Vec<u8>, SerializationError> {
        value
            .as_str()
            .map(|s| s.as_bytes().to_vec())
            .ok_or_else(|| SerializationError {
                strategy: self.name().to_string(),
                message: "raw-bytes strategy requires a string value".to_string(),
            })
    }

    fn deserialize(&self, bytes: &[u8]) -> Result<RuntimeValue, SerializationError> {
        std::str::from_utf8(bytes)
            .map(|s| RuntimeValue::String(s.to_string()))
            .map_err(|e| SerializationError {
                strategy: self.name().to_string(),
                message: e.to_string(),
            })
    }
}

#[cfg(test)]
#[path = "strategy_tests.rs"]
mod tests;
