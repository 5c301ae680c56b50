use crate::{Entity, Error, MappingContext, PrimaryKey, Result};

use cassette_core::{
    cql::{Filter, Row},
    schema::{EntityTable, PersistentEntity},
    stmt::Record,
    CqlIdentifier,
};

use std::sync::Arc;

/// Translates between entity instances and table rows.
#[derive(Debug, Clone)]
pub struct MappingConverter {
    context: Arc<MappingContext>,
}

impl MappingConverter {
    pub fn new(context: Arc<MappingContext>) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &Arc<MappingContext> {
        &self.context
    }

    /// Returns the table `entity` is stored in and its column values.
    pub fn write<E: Entity>(&self, entity: &E) -> Result<(CqlIdentifier, Row)> {
        let persistent = self.context.persistent_entity::<E>()?;
        let table = persistent.table_name_for(entity)?.clone();

        let mut record = Record::new();
        entity.write(&mut record);

        let mut row = Row::new();

        for property in &persistent.properties {
            let value = record.get(&property.name).cloned().unwrap_or_default();

            if value.is_null() && property.is_primary_key() {
                return Err(Error::mapping(format!(
                    "primary key column `{}` of entity `{}` is null",
                    property.column, persistent.name
                )));
            }

            row.insert(property.column.clone(), value);
        }

        tracing::trace!(entity = %persistent.name, %table, columns = row.len(), "wrote row");
        Ok((table, row))
    }

    /// Loads an entity from a row of `table`. Discriminator fields are
    /// restored from the table name.
    pub fn read<E: Entity>(&self, table: &CqlIdentifier, mut row: Row) -> Result<E> {
        let persistent = self.context.persistent_entity::<E>()?;
        let mut record = Record::new();

        for property in &persistent.properties {
            let value = row.remove(&property.column).unwrap_or_default();
            record.insert(property.name.clone(), value);
        }

        match &persistent.table {
            EntityTable::Single(name) => {
                if name != table {
                    return Err(Error::mapping(format!(
                        "`{table}` is not the table of entity `{}`",
                        persistent.name
                    )));
                }
            }
            EntityTable::Discriminated(discriminator) => {
                let key = discriminator.discriminator_key(table).ok_or_else(|| {
                    Error::mapping(format!(
                        "`{table}` is not a table of entity `{}`",
                        persistent.name
                    ))
                })?;

                for (field, part) in discriminator.fields().iter().zip(key.parts()) {
                    record.insert(field.field.clone(), field.field_value(&part.value)?);
                }
            }
        }

        E::load(&mut record).map_err(|err| {
            err.context(Error::mapping(format!(
                "cannot load entity `{}` from `{table}`",
                persistent.name
            )))
        })
    }

    /// Returns the table holding the row identified by `key` and a filter
    /// selecting it.
    pub fn key_filter<E: Entity>(&self, key: &E::Key) -> Result<(CqlIdentifier, Filter)> {
        let persistent = self.context.persistent_entity::<E>()?;
        let table = persistent.table_name_for_id(key)?.clone();
        let filter = Self::filter_for_key(&persistent, key)?;
        Ok((table, filter))
    }

    /// Like [`key_filter`](Self::key_filter), resolving the table from the
    /// full instance. Works for entities whose discriminators live outside
    /// the key.
    pub fn entity_filter<E: Entity>(&self, entity: &E) -> Result<(CqlIdentifier, Filter)> {
        let persistent = self.context.persistent_entity::<E>()?;
        let table = persistent.table_name_for(entity)?.clone();
        let filter = Self::filter_for_key(&persistent, entity.key())?;
        Ok((table, filter))
    }

    fn filter_for_key<K: PrimaryKey>(persistent: &PersistentEntity, key: &K) -> Result<Filter> {
        let field = match &persistent.primary_key.key_class {
            Some(class) => class.field.as_str(),
            None => persistent.properties[persistent.primary_key.partition[0]]
                .name
                .as_str(),
        };

        let mut record = Record::new();
        key.write_key(field, &mut record);

        let mut filter = Filter::default();

        for property in persistent.primary_key_properties() {
            match record.get(&property.name) {
                Some(value) if !value.is_null() => {
                    filter.eq.push((property.column.clone(), value.clone()));
                }
                _ => {
                    return Err(Error::mapping(format!(
                        "primary key column `{}` of entity `{}` is null",
                        property.column, persistent.name
                    )))
                }
            }
        }

        Ok(filter)
    }
}
