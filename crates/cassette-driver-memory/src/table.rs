use crate::error::{StoreError, StoreResult};

use cassette_core::{
    cql::{ColumnDef, CreateTable, Filter, Row},
    stmt::Value,
    CqlIdentifier,
};
use indexmap::IndexMap;

#[derive(Debug)]
pub(crate) struct Table {
    columns: Vec<ColumnDef>,

    /// Partition key then clustering columns
    primary_key: Vec<CqlIdentifier>,

    /// Rows keyed by their primary key values, in insertion order
    rows: IndexMap<Vec<Value>, Row>,
}

impl Table {
    pub(crate) fn new(stmt: &CreateTable) -> StoreResult<Self> {
        if stmt.partition_key.is_empty() {
            return Err(StoreError::InvalidTable {
                table: stmt.name.clone(),
                reason: "no partition key",
            });
        }

        let primary_key: Vec<_> = stmt
            .partition_key
            .iter()
            .chain(stmt.clustering_key.iter().map(|(column, _)| column))
            .cloned()
            .collect();

        for column in &primary_key {
            if !stmt.columns.iter().any(|def| def.name == *column) {
                return Err(StoreError::UnknownColumn {
                    table: stmt.name.clone(),
                    column: column.clone(),
                });
            }
        }

        Ok(Self {
            columns: stmt.columns.clone(),
            primary_key,
            rows: IndexMap::new(),
        })
    }

    pub(crate) fn len(&self) -> usize {
        self.rows.len()
    }

    /// Inserts `row`, merging it into any row with the same primary key.
    pub(crate) fn upsert(&mut self, name: &CqlIdentifier, row: Row) -> StoreResult<()> {
        for column in row.columns() {
            self.check_column(name, column)?;
        }

        let mut key = Vec::with_capacity(self.primary_key.len());

        for column in &self.primary_key {
            match row.get(column) {
                Some(value) if !value.is_null() => key.push(value.clone()),
                _ => {
                    return Err(StoreError::MissingKey {
                        table: name.clone(),
                        column: column.clone(),
                    })
                }
            }
        }

        match self.rows.get_mut(&key) {
            Some(existing) => {
                for (column, value) in row {
                    existing.insert(column, value);
                }
            }
            None => {
                let columns: Vec<_> = self.columns.iter().map(|def| def.name.clone()).collect();
                self.rows.insert(key, row.project(&columns));
            }
        }

        Ok(())
    }

    pub(crate) fn select(
        &self,
        name: &CqlIdentifier,
        columns: &[CqlIdentifier],
        filter: &Filter,
        limit: Option<u64>,
    ) -> StoreResult<Vec<Row>> {
        for column in columns.iter().chain(filter.eq.iter().map(|(column, _)| column)) {
            self.check_column(name, column)?;
        }

        let limit = limit.map_or(usize::MAX, |limit| limit as usize);

        Ok(self
            .rows
            .values()
            .filter(|row| filter.matches(row))
            .take(limit)
            .map(|row| {
                if columns.is_empty() {
                    row.clone()
                } else {
                    row.project(columns)
                }
            })
            .collect())
    }

    /// Removes matching rows, returning how many were removed.
    pub(crate) fn delete(&mut self, name: &CqlIdentifier, filter: &Filter) -> StoreResult<u64> {
        for (column, _) in &filter.eq {
            self.check_column(name, column)?;
        }

        let before = self.rows.len();
        self.rows.retain(|_, row| !filter.matches(row));
        Ok((before - self.rows.len()) as u64)
    }

    fn check_column(&self, name: &CqlIdentifier, column: &CqlIdentifier) -> StoreResult<()> {
        if self.columns.iter().any(|def| def.name == *column) {
            Ok(())
        } else {
            Err(StoreError::UnknownColumn {
                table: name.clone(),
                column: column.clone(),
            })
        }
    }
}
