use cassette_core::CqlIdentifier;

pub(crate) type StoreResult<T> = std::result::Result<T, StoreError>;

#[derive(Debug, thiserror::Error)]
pub(crate) enum StoreError {
    #[error("no keyspace has been specified")]
    NoKeyspace,

    #[error("keyspace {0} does not exist")]
    UnknownKeyspace(CqlIdentifier),

    #[error("keyspace {0} already exists")]
    KeyspaceExists(CqlIdentifier),

    #[error("unconfigured table {0}")]
    UnknownTable(CqlIdentifier),

    #[error("table {0} already exists")]
    TableExists(CqlIdentifier),

    #[error("undefined column name {column} in table {table}")]
    UnknownColumn {
        table: CqlIdentifier,
        column: CqlIdentifier,
    },

    #[error("missing primary key column {column} in table {table}")]
    MissingKey {
        table: CqlIdentifier,
        column: CqlIdentifier,
    },

    #[error("invalid table definition for {table}: {reason}")]
    InvalidTable {
        table: CqlIdentifier,
        reason: &'static str,
    },
}
