use crate::{Entity, Result};

use cassette_core::schema::{Builder, PersistentEntity};

use std::{
    any::TypeId,
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock},
};

/// Registry of persistent entity metadata.
///
/// Entities are built on first use and cached for the lifetime of the
/// context.
#[derive(Debug, Default)]
pub struct MappingContext {
    builder: Builder,
    entities: RwLock<HashMap<TypeId, Arc<PersistentEntity>>>,
}

impl MappingContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context that builds entities with the given options.
    pub fn with_builder(builder: Builder) -> Self {
        Self {
            builder,
            entities: RwLock::default(),
        }
    }

    /// Returns the metadata for `E`, building it if needed.
    pub fn persistent_entity<E: Entity>(&self) -> Result<Arc<PersistentEntity>> {
        match self.get(TypeId::of::<E>()) {
            Some(entity) => Ok(entity),
            None => self.register::<E>(),
        }
    }

    /// Builds and caches the metadata for `E`. Registering an entity twice
    /// keeps the first build.
    pub fn register<E: Entity>(&self) -> Result<Arc<PersistentEntity>> {
        let entity = Arc::new(self.builder.build(E::schema())?);

        let mut entities = self
            .entities
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        let entity = entities.entry(TypeId::of::<E>()).or_insert(entity).clone();

        tracing::debug!(
            entity = %entity.name,
            tables = ?entity.table_names().iter().map(|name| name.to_cql()).collect::<Vec<_>>(),
            "registered persistent entity"
        );

        Ok(entity)
    }

    pub fn get(&self, type_id: TypeId) -> Option<Arc<PersistentEntity>> {
        self.entities
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .cloned()
    }

    pub fn contains<E: Entity>(&self) -> bool {
        self.get(TypeId::of::<E>()).is_some()
    }

    /// Every entity registered so far, in no particular order.
    pub fn persistent_entities(&self) -> Vec<Arc<PersistentEntity>> {
        self.entities
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect()
    }
}
