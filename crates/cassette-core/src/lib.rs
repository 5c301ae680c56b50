pub mod cql;
pub use cql::CqlIdentifier;

pub mod driver;
pub use driver::Session;

mod error;
pub use error::Error;

pub mod schema;

pub mod stmt;

/// A Result type alias that uses Cassette's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

pub use async_trait::async_trait;
