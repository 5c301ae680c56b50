use cassette::{
    cql::Statement,
    driver::{Response, Session},
    Result,
};
use async_trait::async_trait;

use std::sync::{Arc, Mutex};

/// A session wrapper that records every statement it forwards.
#[derive(Debug)]
pub struct LoggingSession {
    inner: Arc<dyn Session>,

    /// Log of all statements executed through this session, shared with
    /// [`ExecLog`](crate::ExecLog) handles
    log: Arc<Mutex<Vec<SessionOp>>>,
}

#[derive(Debug)]
pub struct SessionOp {
    pub statement: Statement,

    /// Whether the inner session accepted the statement
    pub succeeded: bool,
}

impl LoggingSession {
    pub fn new(inner: Arc<dyn Session>) -> Self {
        Self {
            inner,
            log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get a handle to access the statement log
    pub fn log_handle(&self) -> Arc<Mutex<Vec<SessionOp>>> {
        self.log.clone()
    }
}

#[async_trait]
impl Session for LoggingSession {
    async fn exec(&self, stmt: Statement) -> Result<Response> {
        let statement = stmt.clone();
        let res = self.inner.exec(stmt).await;

        self.log
            .lock()
            .expect("Failed to acquire statement log lock")
            .push(SessionOp {
                statement,
                succeeded: res.is_ok(),
            });

        res
    }
}
