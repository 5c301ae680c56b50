mod response;
pub use response::{Response, Rows};

use crate::{async_trait, cql::Statement};

use std::fmt::Debug;

/// A connection to a keyspace-aware CQL store.
#[async_trait]
pub trait Session: Debug + Send + Sync + 'static {
    /// Execute a single statement
    async fn exec(&self, stmt: Statement) -> crate::Result<Response>;
}
