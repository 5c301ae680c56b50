use super::{CqlIdentifier, Ordering};
use crate::stmt::{Type, Value};

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    CreateKeyspace(CreateKeyspace),
    CreateTable(CreateTable),
    DropTable(DropTable),
    Insert(Insert),
    Select(Select),
    Delete(Delete),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateKeyspace {
    pub name: CqlIdentifier,
    pub replication_factor: u32,
    pub if_not_exists: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateTable {
    pub keyspace: Option<CqlIdentifier>,

    /// Name of the table
    pub name: CqlIdentifier,

    /// Column definitions
    pub columns: Vec<ColumnDef>,

    /// Partition key columns, in key order
    pub partition_key: Vec<CqlIdentifier>,

    /// Clustering columns, in key order
    pub clustering_key: Vec<(CqlIdentifier, Ordering)>,

    pub if_not_exists: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    pub name: CqlIdentifier,
    pub ty: Type,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DropTable {
    pub keyspace: Option<CqlIdentifier>,
    pub name: CqlIdentifier,
    pub if_exists: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    pub keyspace: Option<CqlIdentifier>,
    pub table: CqlIdentifier,
    pub values: Vec<(CqlIdentifier, Value)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    pub keyspace: Option<CqlIdentifier>,
    pub table: CqlIdentifier,

    /// Selected columns; empty selects every column
    pub columns: Vec<CqlIdentifier>,

    pub filter: Filter,
    pub limit: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Delete {
    pub keyspace: Option<CqlIdentifier>,
    pub table: CqlIdentifier,
    pub filter: Filter,
}

/// A conjunction of `column = value` restrictions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    pub eq: Vec<(CqlIdentifier, Value)>,
}

impl Filter {
    pub fn is_empty(&self) -> bool {
        self.eq.is_empty()
    }

    pub fn matches(&self, row: &super::Row) -> bool {
        self.eq
            .iter()
            .all(|(column, value)| row.get(column).unwrap_or(&Value::Null) == value)
    }
}

impl Statement {
    /// The table the statement targets, if any.
    pub fn table(&self) -> Option<&CqlIdentifier> {
        match self {
            Statement::CreateKeyspace(_) => None,
            Statement::CreateTable(stmt) => Some(&stmt.name),
            Statement::DropTable(stmt) => Some(&stmt.name),
            Statement::Insert(stmt) => Some(&stmt.table),
            Statement::Select(stmt) => Some(&stmt.table),
            Statement::Delete(stmt) => Some(&stmt.table),
        }
    }

    pub fn is_query(&self) -> bool {
        matches!(self, Statement::Select(_))
    }
}

impl From<CreateKeyspace> for Statement {
    fn from(value: CreateKeyspace) -> Self {
        Self::CreateKeyspace(value)
    }
}

impl From<CreateTable> for Statement {
    fn from(value: CreateTable) -> Self {
        Self::CreateTable(value)
    }
}

impl From<DropTable> for Statement {
    fn from(value: DropTable) -> Self {
        Self::DropTable(value)
    }
}

impl From<Insert> for Statement {
    fn from(value: Insert) -> Self {
        Self::Insert(value)
    }
}

impl From<Select> for Statement {
    fn from(value: Select) -> Self {
        Self::Select(value)
    }
}

impl From<Delete> for Statement {
    fn from(value: Delete) -> Self {
        Self::Delete(value)
    }
}
