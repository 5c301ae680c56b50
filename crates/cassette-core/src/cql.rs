mod identifier;
pub use identifier::CqlIdentifier;

mod keyword;
pub use keyword::is_reserved;

mod row;
pub use row::Row;

mod serializer;

mod statement;
pub use statement::{
    ColumnDef, CreateKeyspace, CreateTable, Delete, DropTable, Filter, Insert, Select, Statement,
};

/// Clustering order of a clustering column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Ordering {
    #[default]
    Ascending,
    Descending,
}

impl Ordering {
    pub const fn as_cql(self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }
}
