//! Entity-level operations against a [`Session`].
//!
//! Every operation resolves the physical table through the entity's mapping:
//! writes go to the table selected by the instance's discriminators, key
//! lookups to the table selected by the key, and scans fan out across every
//! table of the entity.

use crate::{Config, Entity, Error, MappingContext, MappingConverter, Result};

use cassette_core::{
    cql::{ColumnDef, CreateKeyspace, CreateTable, Delete, DropTable, Insert, Select, Statement},
    driver::Response,
    schema::{Builder, PersistentEntity, PropertyKind},
    CqlIdentifier, Session,
};

use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Template {
    session: Arc<dyn Session>,
    converter: MappingConverter,

    /// Keyspace statements are qualified with; unset uses the session's
    /// current keyspace
    keyspace: Option<CqlIdentifier>,
}

impl Template {
    pub fn new(session: Arc<dyn Session>, converter: MappingConverter) -> Self {
        Self {
            session,
            converter,
            keyspace: None,
        }
    }

    /// Creates a template for the configured keyspace with a fresh mapping
    /// context.
    pub fn from_config(session: Arc<dyn Session>, config: &Config) -> Result<Self> {
        let mut builder = Builder::new();
        if let Some(prefix) = &config.table_name_prefix {
            builder.table_name_prefix(prefix);
        }

        let context = Arc::new(MappingContext::with_builder(builder));
        let template = Self::new(session, MappingConverter::new(context));
        Ok(template.with_keyspace(config.keyspace()?))
    }

    pub fn with_keyspace(mut self, keyspace: CqlIdentifier) -> Self {
        self.keyspace = Some(keyspace);
        self
    }

    pub fn keyspace(&self) -> Option<&CqlIdentifier> {
        self.keyspace.as_ref()
    }

    pub fn converter(&self) -> &MappingConverter {
        &self.converter
    }

    pub fn session(&self) -> &Arc<dyn Session> {
        &self.session
    }

    /// Creates the template's keyspace if it does not exist.
    pub async fn create_keyspace(&self, replication_factor: u32) -> Result<()> {
        let Some(name) = self.keyspace.clone() else {
            return Err(crate::err!("no keyspace configured"));
        };

        self.exec(
            CreateKeyspace {
                name,
                replication_factor,
                if_not_exists: true,
            }
            .into(),
        )
        .await?;

        Ok(())
    }

    /// Creates every physical table of `E`.
    pub async fn create_tables<E: Entity>(&self) -> Result<()> {
        let entity = self.persistent_entity::<E>()?;

        for table in entity.table_names() {
            self.exec(self.create_table(&entity, table).into()).await?;
        }

        Ok(())
    }

    /// Drops every physical table of `E`.
    pub async fn drop_tables<E: Entity>(&self) -> Result<()> {
        let entity = self.persistent_entity::<E>()?;

        for table in entity.table_names() {
            self.exec(
                DropTable {
                    keyspace: self.keyspace.clone(),
                    name: table.clone(),
                    if_exists: true,
                }
                .into(),
            )
            .await?;
        }

        Ok(())
    }

    /// Inserts `entity`, replacing any row with the same primary key.
    pub async fn insert<E: Entity>(&self, entity: &E) -> Result<()> {
        let (table, row) = self.converter.write(entity)?;

        self.exec(
            Insert {
                keyspace: self.keyspace.clone(),
                table,
                values: row.into_iter().collect(),
            }
            .into(),
        )
        .await?;

        Ok(())
    }

    /// Loads the entity identified by `key`. Every discriminator of `E` must
    /// live in its key class.
    pub async fn select_one_by_id<E: Entity>(&self, key: &E::Key) -> Result<Option<E>> {
        let (table, filter) = self.converter.key_filter::<E>(key)?;

        let response = self
            .exec(
                Select {
                    keyspace: self.keyspace.clone(),
                    table: table.clone(),
                    columns: vec![],
                    filter,
                    limit: Some(1),
                }
                .into(),
            )
            .await?;

        response
            .into_rows()
            .into_iter()
            .next()
            .map(|row| self.converter.read(&table, row))
            .transpose()
    }

    /// Like [`select_one_by_id`](Self::select_one_by_id), failing when no row
    /// matches.
    pub async fn get_by_id<E: Entity>(&self, key: &E::Key) -> Result<E> {
        match self.select_one_by_id::<E>(key).await? {
            Some(entity) => Ok(entity),
            None => {
                let entity = self.persistent_entity::<E>()?;
                let (table, _) = self.converter.key_filter::<E>(key)?;
                Err(Error::record_not_found(format!(
                    "entity={} table={table}",
                    entity.name
                )))
            }
        }
    }

    pub async fn exists_by_id<E: Entity>(&self, key: &E::Key) -> Result<bool> {
        let (table, filter) = self.converter.key_filter::<E>(key)?;

        let response = self
            .exec(
                Select {
                    keyspace: self.keyspace.clone(),
                    table,
                    columns: vec![],
                    filter,
                    limit: Some(1),
                }
                .into(),
            )
            .await?;

        Ok(!response.into_rows().is_empty())
    }

    /// Loads every instance of `E` across all of its tables.
    pub async fn select_all<E: Entity>(&self) -> Result<Vec<E>> {
        let entity = self.persistent_entity::<E>()?;
        let mut ret = vec![];

        for table in entity.table_names() {
            let response = self
                .exec(
                    Select {
                        keyspace: self.keyspace.clone(),
                        table: table.clone(),
                        columns: vec![],
                        filter: Default::default(),
                        limit: None,
                    }
                    .into(),
                )
                .await?;

            for row in response.into_rows() {
                ret.push(self.converter.read(table, row)?);
            }
        }

        Ok(ret)
    }

    /// Deletes the row of `entity` from the table its discriminators select.
    pub async fn delete<E: Entity>(&self, entity: &E) -> Result<()> {
        let (table, filter) = self.converter.entity_filter(entity)?;
        self.exec_delete(table, filter).await
    }

    pub async fn delete_by_id<E: Entity>(&self, key: &E::Key) -> Result<()> {
        let (table, filter) = self.converter.key_filter::<E>(key)?;
        self.exec_delete(table, filter).await
    }

    async fn exec_delete(
        &self,
        table: CqlIdentifier,
        filter: cassette_core::cql::Filter,
    ) -> Result<()> {
        self.exec(
            Delete {
                keyspace: self.keyspace.clone(),
                table,
                filter,
            }
            .into(),
        )
        .await?;

        Ok(())
    }

    async fn exec(&self, stmt: Statement) -> Result<Response> {
        tracing::debug!(cql = %stmt, "executing statement");
        self.session.exec(stmt).await
    }

    fn persistent_entity<E: Entity>(&self) -> Result<Arc<PersistentEntity>> {
        self.converter.context().persistent_entity::<E>()
    }

    fn create_table(&self, entity: &PersistentEntity, table: &CqlIdentifier) -> CreateTable {
        CreateTable {
            keyspace: self.keyspace.clone(),
            name: table.clone(),
            columns: entity
                .properties
                .iter()
                .map(|property| ColumnDef {
                    name: property.column.clone(),
                    ty: property.ty,
                })
                .collect(),
            partition_key: entity
                .partition_key()
                .map(|property| property.column.clone())
                .collect(),
            clustering_key: entity
                .clustering_key()
                .map(|property| match property.kind {
                    PropertyKind::ClusteringKey { ordering, .. } => {
                        (property.column.clone(), ordering)
                    }
                    _ => (property.column.clone(), Default::default()),
                })
                .collect(),
            if_not_exists: true,
        }
    }
}
