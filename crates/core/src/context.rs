// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Execution context types.
//!
//! `ExecutionContext` is what a user context factory returns. It is then
//! combined by the Context Builder with resources, merged loggers and tags,
//! and a persistence policy into a system-owned [`RuntimeExecutionContext`]
//! that is carried through a run.

use crate::event::{EventSink, LogLevel};
use crate::id::RunId;
use crate::runtime_type::RuntimeValue;
use crate::scoped::Factory;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A user-pluggable log sink. `loggers` on both [`ExecutionContext`] and
/// [`crate::context::ExecutionMetadata`] are merged by the Context Builder.
pub trait Logger: fmt::Debug + Send + Sync {
    fn log(&self, level: LogLevel, message: &str);
}

/// Forwards `tracing` events at the given target. The teacher's engine logs
/// this way throughout (`engine::executor`'s `tracing::info!`/`error!` at
/// span entry/exit); this is the library's default logger.
#[derive(Debug, Clone)]
pub struct TracingLogger {
    pub target: String,
}

impl TracingLogger {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }
}

impl Logger for TracingLogger {
    fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Debug => tracing::debug!(target: "flowcore", logger = %self.target, "{message}"),
            LogLevel::Info => tracing::info!(target: "flowcore", logger = %self.target, "{message}"),
            LogLevel::Warn => tracing::warn!(target: "flowcore", logger = %self.target, "{message}"),
            LogLevel::Error => tracing::error!(target: "flowcore", logger = %self.target, "{message}"),
        }
    }
}

/// Adapts an [`EventSink`] into a [`Logger`], used when `event_callback` is
/// set on execution metadata.
pub struct EventLogger {
    run_id: RunId,
    sink: Arc<dyn EventSink>,
}

impl fmt::Debug for EventLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventLogger").field("run_id", &self.run_id).finish()
    }
}

impl EventLogger {
    pub fn new(run_id: RunId, sink: Arc<dyn EventSink>) -> Self {
        Self { run_id, sink }
    }
}

impl Logger for EventLogger {
    fn log(&self, level: LogLevel, message: &str) {
        self.sink.emit(crate::event::PipelineEvent::Log {
            run_id: self.run_id.clone(),
            level,
            message: message.to_string(),
        });
    }
}

/// Type-erased resource value. Concrete resource types are recovered with
/// [`Resources::get`].
pub type ResourceValue = Arc<dyn Any + Send + Sync>;

/// The aggregate of named, scoped resources available during a run.
/// Read-only from the framework's perspective.
#[derive(Clone, Default)]
pub struct Resources {
    values: indexmap::IndexMap<String, ResourceValue>,
}

impl fmt::Debug for Resources {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resources")
            .field("names", &self.values.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Resources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: ResourceValue) {
        self.values.insert(name.into(), value);
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get<T: Send + Sync + 'static>(&self, name: &str) -> Option<Arc<T>> {
        self.values.get(name).and_then(|v| v.clone().downcast::<T>().ok())
    }
}

/// Passed to a context factory.
#[derive(Debug, Clone)]
pub struct ContextCreationInfo {
    pub config: RuntimeValue,
    pub pipeline_name: String,
    pub run_id: RunId,
}

/// Passed to a resource factory.
#[derive(Debug, Clone)]
pub struct ResourceCreationInfo {
    pub config: RuntimeValue,
    pub run_id: RunId,
}

/// What a user context factory produces. Invariant: if the owning context
/// definition declares resources, this must NOT carry its own.
#[derive(Clone, Default)]
pub struct ExecutionContext {
    pub loggers: Vec<Arc<dyn Logger>>,
    pub resources: Resources,
    pub tags: HashMap<String, String>,
}

impl fmt::Debug for ExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionContext")
            .field("logger_count", &self.loggers.len())
            .field("resources", &self.resources)
            .field("tags", &self.tags)
            .finish()
    }
}

impl ExecutionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tags(mut self, tags: HashMap<String, String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.loggers.push(logger);
        self
    }

    pub fn with_resources(mut self, resources: Resources) -> Self {
        self.resources = resources;
        self
    }
}

/// A user context factory: either returns an [`ExecutionContext`] directly,
/// or a setup/teardown pair around one.
pub type ContextFactory = Factory<ExecutionContext>;

/// System-owned context carried through a pipeline/externalized run.
/// Exactly one persistence policy is bound (invariant 2).
pub struct RuntimeExecutionContext {
    pub run_id: RunId,
    pub loggers: Vec<Arc<dyn Logger>>,
    pub resources: Resources,
    pub tags: HashMap<String, String>,
    pub event_sink: Option<Arc<dyn EventSink>>,
    pub original_config: RuntimeValue,
}

impl fmt::Debug for RuntimeExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuntimeExecutionContext")
            .field("run_id", &self.run_id)
            .field("tags", &self.tags)
            .finish()
    }
}

impl RuntimeExecutionContext {
    pub fn log(&self, level: LogLevel, message: &str) {
        for logger in &self.loggers {
            logger.log(level, message);
        }
    }

    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    pub fn emit(&self, event: crate::event::PipelineEvent) {
        if let Some(sink) = &self.event_sink {
            sink.emit(event);
        }
    }
}

/// A slim, read-only view into the running context handed to solid
/// transforms — deliberately narrower than [`RuntimeExecutionContext`] so
/// user code cannot reach the persistence policy or event sink directly.
pub struct SolidTransformContext<'a> {
    pub run_id: &'a RunId,
    pub resources: &'a Resources,
    pub loggers: &'a [Arc<dyn Logger>],
}

impl SolidTransformContext<'_> {
    pub fn log(&self, level: LogLevel, message: &str) {
        for logger in self.loggers {
            logger.log(level, message);
        }
    }
}

/// Caller-supplied run identity and side-channel hooks.
#[derive(Clone, Default)]
pub struct ExecutionMetadata {
    pub run_id: Option<RunId>,
    pub tags: HashMap<String, String>,
    pub event_sink: Option<Arc<dyn EventSink>>,
    pub loggers: Vec<Arc<dyn Logger>>,
}

impl fmt::Debug for ExecutionMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionMetadata")
            .field("run_id", &self.run_id)
            .field("tags", &self.tags)
            .field("has_event_sink", &self.event_sink.is_some())
            .field("logger_count", &self.loggers.len())
            .finish()
    }
}

impl ExecutionMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_run_id(mut self, run_id: impl Into<String>) -> Self {
        self.run_id = Some(RunId::new(run_id));
        self
    }

    pub fn with_tags(mut self, tags: HashMap<String, String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.event_sink = Some(sink);
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.loggers.push(logger);
        self
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
