// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! flowcore-config: the Config Typing Adapter — validates a raw environment
//! mapping against a pipeline's schema and produces a typed
//! [`evaluate::EnvironmentConfig`].

pub mod environment;
pub mod error;
pub mod evaluate;
pub mod schema;

pub use environment::create_typed_environment;
pub use error::{ConfigError, EvaluationError, PipelineConfigEvaluationError};
pub use evaluate::{evaluate_config_value, EnvironmentConfig, SelectedContext};
pub use schema::{ContextSchema, EnvironmentSchema, ResourceSchema};
