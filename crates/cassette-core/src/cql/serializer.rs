use super::{
    CqlIdentifier, CreateKeyspace, CreateTable, Delete, DropTable, Filter, Insert, Select,
    Statement,
};
use crate::stmt::Value;

use std::fmt::{self, Display, Formatter};

/// Renders `items` separated by `", "`.
struct Comma<I>(I);

impl<I, T> Display for Comma<I>
where
    I: Clone + IntoIterator<Item = T>,
    T: Display,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut s = "";
        for item in self.0.clone() {
            write!(f, "{s}{item}")?;
            s = ", ";
        }
        Ok(())
    }
}

struct Literal<'a>(&'a Value);

impl Display for Literal<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.0.fmt_cql(f)
    }
}

/// A keyspace-qualified table name.
struct Qualified<'a>(Option<&'a CqlIdentifier>, &'a CqlIdentifier);

impl Display for Qualified<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(keyspace) => write!(f, "{keyspace}.{}", self.1),
            None => write!(f, "{}", self.1),
        }
    }
}

impl Display for Filter {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut s = " WHERE ";
        for (column, value) in &self.eq {
            write!(f, "{s}{column} = {}", Literal(value))?;
            s = " AND ";
        }
        Ok(())
    }
}

impl Display for CreateKeyspace {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("CREATE KEYSPACE ")?;
        if self.if_not_exists {
            f.write_str("IF NOT EXISTS ")?;
        }
        write!(
            f,
            "{} WITH replication = {{'class': 'SimpleStrategy', 'replication_factor': {}}};",
            self.name, self.replication_factor
        )
    }
}

impl Display for CreateTable {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("CREATE TABLE ")?;
        if self.if_not_exists {
            f.write_str("IF NOT EXISTS ")?;
        }
        write!(f, "{} (", Qualified(self.keyspace.as_ref(), &self.name))?;

        for column in &self.columns {
            write!(f, "{} {}, ", column.name, column.ty)?;
        }

        let partition_key = Comma(&self.partition_key);
        let clustering = Comma(self.clustering_key.iter().map(|(column, _)| column));

        match (self.partition_key.len(), self.clustering_key.is_empty()) {
            (1, true) => write!(f, "PRIMARY KEY ({partition_key}))")?,
            (1, false) => write!(f, "PRIMARY KEY ({partition_key}, {clustering}))")?,
            (_, true) => write!(f, "PRIMARY KEY (({partition_key})))")?,
            (_, false) => write!(f, "PRIMARY KEY (({partition_key}), {clustering}))")?,
        }

        let descending = self
            .clustering_key
            .iter()
            .any(|(_, ordering)| *ordering == super::Ordering::Descending);

        if descending {
            let order = Comma(
                self.clustering_key
                    .iter()
                    .map(|(column, ordering)| format!("{column} {}", ordering.as_cql())),
            );
            write!(f, " WITH CLUSTERING ORDER BY ({order})")?;
        }

        f.write_str(";")
    }
}

impl Display for DropTable {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("DROP TABLE ")?;
        if self.if_exists {
            f.write_str("IF EXISTS ")?;
        }
        write!(f, "{};", Qualified(self.keyspace.as_ref(), &self.name))
    }
}

impl Display for Insert {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let columns = Comma(self.values.iter().map(|(column, _)| column));
        let values = Comma(self.values.iter().map(|(_, value)| Literal(value)));

        write!(
            f,
            "INSERT INTO {} ({columns}) VALUES ({values});",
            Qualified(self.keyspace.as_ref(), &self.table)
        )
    }
}

impl Display for Select {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("SELECT ")?;
        if self.columns.is_empty() {
            f.write_str("*")?;
        } else {
            write!(f, "{}", Comma(&self.columns))?;
        }
        write!(
            f,
            " FROM {}{}",
            Qualified(self.keyspace.as_ref(), &self.table),
            self.filter
        )?;
        if let Some(limit) = self.limit {
            write!(f, " LIMIT {limit}")?;
        }
        f.write_str(";")
    }
}

impl Display for Delete {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DELETE FROM {}{};",
            Qualified(self.keyspace.as_ref(), &self.table),
            self.filter
        )
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Statement::CreateKeyspace(stmt) => stmt.fmt(f),
            Statement::CreateTable(stmt) => stmt.fmt(f),
            Statement::DropTable(stmt) => stmt.fmt(f),
            Statement::Insert(stmt) => stmt.fmt(f),
            Statement::Select(stmt) => stmt.fmt(f),
            Statement::Delete(stmt) => stmt.fmt(f),
        }
    }
}
