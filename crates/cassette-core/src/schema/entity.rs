use super::{Discriminable, Name, PersistentProperty, PrimaryKey, TableDiscriminator};
use crate::{CqlIdentifier, Error, Result};

use std::any::TypeId;

/// Describes how an entity type maps to its table or tables.
#[derive(Debug, Clone)]
pub struct PersistentEntity {
    /// TypeId of the entity type
    pub type_id: TypeId,

    /// Name of the entity
    pub name: Name,

    /// Column-mapped properties; key properties first
    pub properties: Vec<PersistentProperty>,

    pub primary_key: PrimaryKey,

    pub table: EntityTable,
}

#[derive(Debug, Clone)]
pub enum EntityTable {
    /// Every instance lives in one table
    Single(CqlIdentifier),

    /// Instances are spread across a family of tables
    Discriminated(TableDiscriminator),
}

impl PersistentEntity {
    /// The table of an entity that is not discriminated.
    pub fn table_name(&self) -> Option<&CqlIdentifier> {
        match &self.table {
            EntityTable::Single(name) => Some(name),
            EntityTable::Discriminated(_) => None,
        }
    }

    pub fn discriminator(&self) -> Option<&TableDiscriminator> {
        match &self.table {
            EntityTable::Single(_) => None,
            EntityTable::Discriminated(discriminator) => Some(discriminator),
        }
    }

    pub fn is_discriminated(&self) -> bool {
        matches!(self.table, EntityTable::Discriminated(_))
    }

    /// Every table the entity is stored in.
    pub fn table_names(&self) -> Vec<&CqlIdentifier> {
        match &self.table {
            EntityTable::Single(name) => vec![name],
            EntityTable::Discriminated(discriminator) => discriminator.table_names().collect(),
        }
    }

    /// The table `entity` is stored in.
    pub fn table_name_for<E: Discriminable>(&self, entity: &E) -> Result<&CqlIdentifier> {
        match &self.table {
            EntityTable::Single(name) => {
                self.check_type::<E>(self.type_id)?;
                Ok(name)
            }
            EntityTable::Discriminated(discriminator) => discriminator.table_name_for(entity),
        }
    }

    /// The table the row identified by `key` is stored in.
    pub fn table_name_for_id<K: Discriminable>(&self, key: &K) -> Result<&CqlIdentifier> {
        match &self.table {
            EntityTable::Single(name) => {
                self.check_type::<K>(self.primary_key.type_id)?;
                Ok(name)
            }
            EntityTable::Discriminated(discriminator) => discriminator.table_name_for_id(key),
        }
    }

    pub fn property(&self, name: &str) -> Option<&PersistentProperty> {
        self.properties.iter().find(|property| property.name == name)
    }

    pub fn property_by_column(&self, column: &CqlIdentifier) -> Option<&PersistentProperty> {
        self.properties
            .iter()
            .find(|property| property.column == *column)
    }

    pub fn partition_key(&self) -> impl ExactSizeIterator<Item = &PersistentProperty> + '_ {
        self.primary_key
            .partition
            .iter()
            .map(|index| &self.properties[*index])
    }

    pub fn clustering_key(&self) -> impl ExactSizeIterator<Item = &PersistentProperty> + '_ {
        self.primary_key
            .clustering
            .iter()
            .map(|index| &self.properties[*index])
    }

    /// Partition key then clustering properties.
    pub fn primary_key_properties(&self) -> impl Iterator<Item = &PersistentProperty> + '_ {
        self.primary_key
            .properties()
            .map(|index| &self.properties[index])
    }

    fn check_type<T: 'static>(&self, expected: TypeId) -> Result<()> {
        if TypeId::of::<T>() == expected {
            Ok(())
        } else {
            Err(Error::mapping(format!(
                "`{}` does not belong to entity `{}`",
                std::any::type_name::<T>(),
                self.name
            )))
        }
    }
}
