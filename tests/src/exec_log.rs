use crate::logging_session::SessionOp;

use cassette::cql::Statement;

use std::sync::{Arc, Mutex};

/// A wrapper around the statement log that provides a clean API for tests
pub struct ExecLog {
    ops: Arc<Mutex<Vec<SessionOp>>>,
}

impl ExecLog {
    pub(crate) fn new(ops: Arc<Mutex<Vec<SessionOp>>>) -> Self {
        Self { ops }
    }

    /// Get the number of logged statements
    pub fn len(&self) -> usize {
        self.ops.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.lock().unwrap().is_empty()
    }

    /// Check if any statement matches the given predicate
    pub fn any<F>(&self, predicate: F) -> bool
    where
        F: Fn(&Statement) -> bool,
    {
        self.ops
            .lock()
            .unwrap()
            .iter()
            .any(|op| predicate(&op.statement))
    }

    /// Count statements matching the given predicate
    pub fn count<F>(&self, predicate: F) -> usize
    where
        F: Fn(&Statement) -> bool,
    {
        self.ops
            .lock()
            .unwrap()
            .iter()
            .filter(|op| predicate(&op.statement))
            .count()
    }

    /// Rendered CQL of every logged statement, oldest first
    pub fn cql(&self) -> Vec<String> {
        self.ops
            .lock()
            .unwrap()
            .iter()
            .map(|op| op.statement.to_string())
            .collect()
    }

    /// Number of statements the inner session rejected
    pub fn failures(&self) -> usize {
        self.ops
            .lock()
            .unwrap()
            .iter()
            .filter(|op| !op.succeeded)
            .count()
    }

    pub fn clear(&mut self) {
        self.ops.lock().unwrap().clear();
    }

    /// Remove and return the first statement from the log
    pub fn pop(&mut self) -> Option<Statement> {
        let mut ops = self.ops.lock().unwrap();
        if ops.is_empty() {
            None
        } else {
            Some(ops.remove(0).statement)
        }
    }
}
