use crate::cql::Row;

#[derive(Debug)]
pub struct Response {
    pub rows: Rows,
}

#[derive(Debug)]
pub enum Rows {
    /// Number of rows impacted by the operation
    Count(u64),

    /// Rows returned by a query
    Values(Vec<Row>),
}

impl Response {
    pub fn count(count: u64) -> Self {
        Self {
            rows: Rows::Count(count),
        }
    }

    pub fn values(rows: Vec<Row>) -> Self {
        Self {
            rows: Rows::Values(rows),
        }
    }

    /// Returns the rows of a query response; a count response yields none.
    pub fn into_rows(self) -> Vec<Row> {
        match self.rows {
            Rows::Values(rows) => rows,
            Rows::Count(_) => vec![],
        }
    }
}
