mod error;
use error::{StoreError, StoreResult};

mod table;
use table::Table;

use cassette_core::{
    async_trait,
    cql::{CreateKeyspace, CreateTable, Delete, DropTable, Insert, Row, Select, Statement},
    driver::{Response, Session},
    CqlIdentifier, Error, Result,
};

use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard, PoisonError},
};

/// A [`Session`] that keeps every keyspace in process memory.
///
/// Rows are upserted by primary key and queries filter by column equality,
/// so any restriction is accepted whether or not it targets key columns.
#[derive(Debug, Default)]
pub struct MemorySession {
    /// Keyspace used by statements that do not name one
    keyspace: Option<CqlIdentifier>,

    state: Mutex<HashMap<CqlIdentifier, Keyspace>>,
}

#[derive(Debug)]
struct Keyspace {
    replication_factor: u32,
    tables: HashMap<CqlIdentifier, Table>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session whose unqualified statements use `keyspace`, as
    /// after `USE keyspace`.
    pub fn with_keyspace(keyspace: CqlIdentifier) -> Self {
        Self {
            keyspace: Some(keyspace),
            state: Mutex::default(),
        }
    }

    /// Names of the tables in `keyspace`, sorted.
    pub fn table_names(&self, keyspace: &CqlIdentifier) -> Vec<CqlIdentifier> {
        let state = self.lock();
        let mut names: Vec<_> = state
            .get(keyspace)
            .map(|keyspace| keyspace.tables.keys().cloned().collect())
            .unwrap_or_default();
        names.sort_by_key(|name| name.to_cql());
        names
    }

    /// Replication factor the keyspace was created with.
    pub fn replication_factor(&self, keyspace: &CqlIdentifier) -> Option<u32> {
        self.lock()
            .get(keyspace)
            .map(|keyspace| keyspace.replication_factor)
    }

    /// Number of rows stored in a table, if it exists.
    pub fn row_count(&self, keyspace: &CqlIdentifier, table: &CqlIdentifier) -> Option<usize> {
        self.lock()
            .get(keyspace)
            .and_then(|keyspace| keyspace.tables.get(table))
            .map(Table::len)
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<CqlIdentifier, Keyspace>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn exec_create_keyspace(&self, stmt: CreateKeyspace) -> StoreResult<Response> {
        let mut state = self.lock();

        if state.contains_key(&stmt.name) {
            if stmt.if_not_exists {
                return Ok(Response::count(0));
            }
            return Err(StoreError::KeyspaceExists(stmt.name));
        }

        state.insert(
            stmt.name,
            Keyspace {
                replication_factor: stmt.replication_factor,
                tables: HashMap::new(),
            },
        );

        Ok(Response::count(0))
    }

    fn exec_create_table(&self, stmt: CreateTable) -> StoreResult<Response> {
        let mut state = self.lock();
        let keyspace = self.keyspace_mut(&mut state, stmt.keyspace.as_ref())?;

        if keyspace.tables.contains_key(&stmt.name) {
            if stmt.if_not_exists {
                return Ok(Response::count(0));
            }
            return Err(StoreError::TableExists(stmt.name));
        }

        let table = Table::new(&stmt)?;
        keyspace.tables.insert(stmt.name, table);

        Ok(Response::count(0))
    }

    fn exec_drop_table(&self, stmt: DropTable) -> StoreResult<Response> {
        let mut state = self.lock();
        let keyspace = self.keyspace_mut(&mut state, stmt.keyspace.as_ref())?;

        if keyspace.tables.remove(&stmt.name).is_none() && !stmt.if_exists {
            return Err(StoreError::UnknownTable(stmt.name));
        }

        Ok(Response::count(0))
    }

    fn exec_insert(&self, stmt: Insert) -> StoreResult<Response> {
        let mut state = self.lock();
        let table = self.table_mut(&mut state, stmt.keyspace.as_ref(), &stmt.table)?;

        let row: Row = stmt.values.into_iter().collect();
        table.upsert(&stmt.table, row)?;

        Ok(Response::count(1))
    }

    fn exec_select(&self, stmt: Select) -> StoreResult<Response> {
        let mut state = self.lock();
        let table = self.table_mut(&mut state, stmt.keyspace.as_ref(), &stmt.table)?;

        let rows = table.select(&stmt.table, &stmt.columns, &stmt.filter, stmt.limit)?;
        Ok(Response::values(rows))
    }

    fn exec_delete(&self, stmt: Delete) -> StoreResult<Response> {
        let mut state = self.lock();
        let table = self.table_mut(&mut state, stmt.keyspace.as_ref(), &stmt.table)?;

        let count = table.delete(&stmt.table, &stmt.filter)?;
        Ok(Response::count(count))
    }

    fn keyspace_mut<'a>(
        &self,
        state: &'a mut HashMap<CqlIdentifier, Keyspace>,
        keyspace: Option<&CqlIdentifier>,
    ) -> StoreResult<&'a mut Keyspace> {
        let name = keyspace
            .or(self.keyspace.as_ref())
            .ok_or(StoreError::NoKeyspace)?;

        state
            .get_mut(name)
            .ok_or_else(|| StoreError::UnknownKeyspace(name.clone()))
    }

    fn table_mut<'a>(
        &self,
        state: &'a mut HashMap<CqlIdentifier, Keyspace>,
        keyspace: Option<&CqlIdentifier>,
        table: &CqlIdentifier,
    ) -> StoreResult<&'a mut Table> {
        self.keyspace_mut(state, keyspace)?
            .tables
            .get_mut(table)
            .ok_or_else(|| StoreError::UnknownTable(table.clone()))
    }
}

#[async_trait]
impl Session for MemorySession {
    async fn exec(&self, stmt: Statement) -> Result<Response> {
        tracing::trace!(cql = %stmt, "memory session exec");

        let res = match stmt {
            Statement::CreateKeyspace(stmt) => self.exec_create_keyspace(stmt),
            Statement::CreateTable(stmt) => self.exec_create_table(stmt),
            Statement::DropTable(stmt) => self.exec_drop_table(stmt),
            Statement::Insert(stmt) => self.exec_insert(stmt),
            Statement::Select(stmt) => self.exec_select(stmt),
            Statement::Delete(stmt) => self.exec_delete(stmt),
        };

        res.map_err(Error::driver)
    }
}
