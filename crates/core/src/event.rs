// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Structured events emitted over the lifetime of a pipeline run. If an
//! `event_callback` is configured on [`crate::context::ExecutionMetadata`],
//! every event is delivered exactly once, in emission order.

use crate::id::RunId;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// A single structured event. `pipeline_start` strictly precedes every
/// step event; `pipeline_success`/`pipeline_failure` strictly follows every
/// step event.
#[derive(Debug, Clone)]
pub enum PipelineEvent {
    PipelineStart {
        run_id: RunId,
        pipeline_name: String,
    },
    PipelineSuccess {
        run_id: RunId,
        pipeline_name: String,
    },
    PipelineFailure {
        run_id: RunId,
        pipeline_name: String,
    },
    StepStart {
        run_id: RunId,
        step_key: String,
    },
    StepSuccess {
        run_id: RunId,
        step_key: String,
    },
    StepFailure {
        run_id: RunId,
        step_key: String,
        message: String,
    },
    Log {
        run_id: RunId,
        level: LogLevel,
        message: String,
    },
}

/// An optional side-channel sink for [`PipelineEvent`]s (design note "Event
/// callback"). The core never checks for presence at each emission site —
/// absence is represented by [`NoopEventSink`].
pub trait EventSink: fmt::Debug + Send + Sync {
    fn emit(&self, event: PipelineEvent);
}

#[derive(Debug, Default)]
pub struct NoopEventSink;

impl EventSink for NoopEventSink {
    fn emit(&self, _event: PipelineEvent) {}
}

/// Collects every emitted event in order — used by tests and by callers who
/// want to inspect the full event stream after a run.
#[derive(Debug, Default)]
pub struct RecordingEventSink {
    events: parking_lot::Mutex<Vec<PipelineEvent>>,
}

impl RecordingEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<PipelineEvent> {
        self.events.lock().clone()
    }
}

impl EventSink for RecordingEventSink {
    fn emit(&self, event: PipelineEvent) {
        self.events.lock().push(event);
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
