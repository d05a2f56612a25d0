// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scoped acquisition of generator-shaped factories.
//!
//! A factory is either a plain value (no teardown needed) or a setup/
//! teardown pair around a single acquired value — the Rust stand-in for a
//! Python context-manager generator that yields exactly once. Either shape
//! is pushed onto a LIFO [`TeardownStack`] by [`enter`]; the stack unwinds
//! in reverse acquisition order regardless of whether the scope closed
//! normally or because of an error further down the stack.

use crate::error::CoreError;
use std::sync::Arc;

type SetupFn<T> = Box<dyn FnOnce() -> Result<T, CoreError> + Send>;
type TeardownFn<T> = Box<dyn FnOnce(T) -> Result<(), CoreError> + Send>;

/// Either a ready-made value, or a setup/teardown pair to acquire one.
pub enum Factory<T> {
    /// The factory already produced its value; there is nothing to tear down.
    Direct(T),
    /// Acquire `T` via `setup`, and release it via `teardown` on scope exit.
    Scoped(SetupFn<T>, TeardownFn<T>),
}

impl<T> Factory<T> {
    pub fn direct(value: T) -> Self {
        Factory::Direct(value)
    }

    pub fn scoped<S, D>(setup: S, teardown: D) -> Self
    where
        S: FnOnce() -> Result<T, CoreError> + Send + 'static,
        D: FnOnce(T) -> Result<(), CoreError> + Send + 'static,
    {
        Factory::Scoped(Box::new(setup), Box::new(teardown))
    }
}

/// A LIFO stack of pending teardowns, run in reverse acquisition order.
#[derive(Default)]
pub struct TeardownStack {
    entries: Vec<Box<dyn FnOnce() -> Result<(), CoreError> + Send>>,
}

impl TeardownStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a teardown to run when [`TeardownStack::unwind`] is called.
    /// Teardowns registered later run first.
    pub fn push<F>(&mut self, teardown: F)
    where
        F: FnOnce() -> Result<(), CoreError> + Send + 'static,
    {
        self.entries.push(Box::new(teardown));
    }

    /// Acquire a resource from `factory`, registering its teardown (if any).
    /// Resources are handed back behind an `Arc` so the teardown closure can
    /// hold its own reference without fighting the caller for ownership; by
    /// the time `unwind` runs, the caller's reference must have been dropped
    /// (the scope is closing) or teardown is skipped with a warning.
    pub fn enter<T: Send + Sync + 'static>(
        &mut self,
        factory: Factory<T>,
    ) -> Result<Arc<T>, CoreError> {
        match factory {
            Factory::Direct(value) => Ok(Arc::new(value)),
            Factory::Scoped(setup, teardown) => {
                let value = Arc::new(setup()?);
                let handle = Arc::clone(&value);
                self.push(move || match Arc::try_unwrap(handle) {
                    Ok(inner) => teardown(inner),
                    Err(_) => {
                        tracing::warn!(
                            "resource still referenced at teardown time; skipping teardown"
                        );
                        Ok(())
                    }
                });
                Ok(value)
            }
        }
    }

    /// Run every registered teardown in reverse order. Every teardown runs
    /// even if an earlier one fails; the first error encountered is
    /// returned to the caller once all have run.
    pub fn unwind(&mut self) -> Result<(), CoreError> {
        let mut first_error = None;
        while let Some(teardown) = self.entries.pop() {
            if let Err(err) = teardown() {
                tracing::error!(error = %err, "resource teardown failed");
                if first_error.is_none() {
                    first_error = Some(err);
                }
            }
        }
        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl Drop for TeardownStack {
    fn drop(&mut self) {
        if !self.entries.is_empty() {
            let _ = self.unwind();
        }
    }
}

#[cfg(test)]
#[path = "scoped_tests.rs"]
mod tests;
