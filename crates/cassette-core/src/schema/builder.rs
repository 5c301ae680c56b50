use super::def::{DiscriminatorDef, EntityDef, KeyDef, PropertyDef};
use super::{
    DiscriminatorField, EntityTable, FieldLocation, KeyClass, Name, Owner, PersistentEntity,
    PersistentProperty, PrimaryKey, PropertyKind, TableDiscriminator, TableNamePattern,
    TypedDiscriminatorConverter, MAX_TABLE_NAME_LEN,
};
use crate::{CqlIdentifier, Error, Result};

use std::sync::Arc;

/// Resolves entity definitions into [`PersistentEntity`] metadata.
#[derive(Debug, Default, Clone)]
pub struct Builder {
    /// If set, prefix all table names with this string
    table_name_prefix: Option<String>,
}

/// Used to track state while one entity is built
struct BuildEntity {
    name: Name,

    properties: Vec<PersistentProperty>,

    discriminators: Vec<DiscriminatorField>,
}

impl Builder {
    pub fn new() -> Self {
        Self {
            table_name_prefix: None,
        }
    }

    pub fn table_name_prefix(&mut self, prefix: &str) -> &mut Self {
        self.table_name_prefix = Some(prefix.to_string());
        self
    }

    pub fn build(&self, def: EntityDef) -> Result<PersistentEntity> {
        let mut build = BuildEntity {
            name: def.name.clone(),
            properties: vec![],
            discriminators: vec![],
        };

        // Key columns come first so that the primary key reads in column order.
        let key_class = match def.key {
            KeyDef::Simple(property) => {
                if !matches!(property.kind, PropertyKind::PartitionKey { .. }) {
                    return Err(Error::mapping(format!(
                        "simple primary key `{}` of entity `{}` must be a partition key",
                        property.name, build.name
                    )));
                }

                build.push_property(property, Owner::Entity)?;
                None
            }
            KeyDef::Composite(class) => {
                for property in class.properties {
                    if property.kind == PropertyKind::Regular {
                        return Err(Error::mapping(format!(
                            "field `{}` of key class `{}` is not a primary key column",
                            property.name, class.name
                        )));
                    }

                    build.push_property(property, Owner::KeyClass)?;
                }

                for discriminator in class.discriminators {
                    build.push_discriminator(discriminator, FieldLocation::KeyClass)?;
                }

                Some(KeyClass {
                    name: class.name,
                    field: class.field,
                })
            }
        };

        for property in def.properties {
            if property.kind != PropertyKind::Regular {
                return Err(Error::mapping(format!(
                    "primary key column `{}` of entity `{}` must be declared on a key class",
                    property.name, build.name
                )));
            }

            build.push_property(property, Owner::Entity)?;
        }

        for discriminator in def.discriminators {
            build.push_discriminator(discriminator, FieldLocation::Entity)?;
        }

        let primary_key = build.build_primary_key(def.key_type_id, key_class)?;

        let (template, force_quote) = match def.table {
            Some(table) => (table.template, table.force_quote),
            None => (build.name.snake_case(), false),
        };

        let template = match &self.table_name_prefix {
            Some(prefix) => format!("{prefix}{template}"),
            None => template,
        };

        let table = build.build_table(template, force_quote, def.type_id, def.key_type_id)?;

        let entity = PersistentEntity {
            type_id: def.type_id,
            name: build.name,
            properties: build.properties,
            primary_key,
            table,
        };

        tracing::debug!(
            entity = %entity.name,
            tables = entity.table_names().len(),
            discriminated = entity.is_discriminated(),
            "built persistent entity"
        );

        Ok(entity)
    }
}

impl BuildEntity {
    fn push_property(&mut self, def: PropertyDef, owner: Owner) -> Result<()> {
        let column_name = def.column.as_deref().unwrap_or(&def.name);
        let column = CqlIdentifier::unquoted(column_name).map_err(|err| {
            err.context(Error::mapping(format!(
                "invalid column for field `{}` of entity `{}`",
                def.name, self.name
            )))
        })?;

        if self.is_field_taken(&def.name) {
            return Err(Error::mapping(format!(
                "entity `{}` declares field `{}` more than once",
                self.name, def.name
            )));
        }

        if self.properties.iter().any(|property| property.column == column) {
            return Err(Error::mapping(format!(
                "entity `{}` maps more than one field to column `{column}`",
                self.name
            )));
        }

        self.properties.push(PersistentProperty {
            name: def.name,
            column,
            ty: def.ty,
            nullable: def.nullable,
            kind: def.kind,
            owner,
        });

        Ok(())
    }

    fn push_discriminator(&mut self, def: DiscriminatorDef, location: FieldLocation) -> Result<()> {
        if self.is_field_taken(&def.field) {
            return Err(Error::mapping(format!(
                "discriminator `{}` of entity `{}` is also mapped as a column or declared twice",
                def.field, self.name
            )));
        }

        if def.values.is_empty() {
            return Err(Error::mapping(format!(
                "discriminator `{}` of entity `{}` declares no values",
                def.field, self.name
            )));
        }

        if def.values.iter().any(String::is_empty) {
            return Err(Error::mapping(format!(
                "discriminator `{}` of entity `{}` declares an empty value",
                def.field, self.name
            )));
        }

        let converter = def
            .converter
            .unwrap_or_else(|| Arc::new(TypedDiscriminatorConverter::new(def.ty)));

        let field = DiscriminatorField::new(def.field, location, def.ty, def.values, converter)
            .map_err(|err| {
                err.context(Error::mapping(format!(
                    "invalid discriminator of entity `{}`",
                    self.name
                )))
            })?;

        // Distinct declarations may still convert to the same field value,
        // e.g. `1` and `01`
        let canonical = field.canonical_values();
        for (i, value) in canonical.iter().enumerate() {
            if canonical[..i]
                .iter()
                .any(|other| other.eq_ignore_ascii_case(value))
            {
                return Err(Error::mapping(format!(
                    "discriminator `{}` of entity `{}` declares {:?} more than once",
                    field.field, self.name, field.values[i]
                )));
            }
        }

        self.discriminators.push(field);

        Ok(())
    }

    fn is_field_taken(&self, field: &str) -> bool {
        self.properties.iter().any(|property| property.name == field)
            || self
                .discriminators
                .iter()
                .any(|discriminator| discriminator.field == field)
    }

    fn build_primary_key(
        &self,
        type_id: std::any::TypeId,
        key_class: Option<KeyClass>,
    ) -> Result<PrimaryKey> {
        let mut partition = vec![];
        let mut clustering = vec![];

        for (index, property) in self.properties.iter().enumerate() {
            match property.kind {
                PropertyKind::Regular => {}
                PropertyKind::PartitionKey { .. } => partition.push(index),
                PropertyKind::ClusteringKey { .. } => clustering.push(index),
            }
        }

        if partition.is_empty() {
            return Err(Error::mapping(format!(
                "entity `{}` has no partition key column",
                self.name
            )));
        }

        self.sort_by_ordinal(&mut partition, "partition key")?;
        self.sort_by_ordinal(&mut clustering, "clustering")?;

        Ok(PrimaryKey {
            type_id,
            partition,
            clustering,
            key_class,
        })
    }

    fn sort_by_ordinal(&self, indices: &mut [usize], what: &str) -> Result<()> {
        indices.sort_by_key(|index| self.properties[*index].kind.ordinal());

        for pair in indices.windows(2) {
            let (a, b) = (&self.properties[pair[0]], &self.properties[pair[1]]);

            if a.kind.ordinal() == b.kind.ordinal() {
                return Err(Error::mapping(format!(
                    "{what} columns `{}` and `{}` of entity `{}` share ordinal {}",
                    a.name,
                    b.name,
                    self.name,
                    a.kind.ordinal().unwrap_or_default()
                )));
            }
        }

        Ok(())
    }

    fn build_table(
        &mut self,
        template: String,
        force_quote: bool,
        type_id: std::any::TypeId,
        key_type_id: std::any::TypeId,
    ) -> Result<EntityTable> {
        if self.discriminators.is_empty() {
            if template.contains('@') {
                return Err(Error::mapping(format!(
                    "table name template `{template}` of entity `{}` has placeholders but the \
                     entity declares no discriminator",
                    self.name
                )));
            }

            let name = CqlIdentifier::new(&template, force_quote).map_err(|err| {
                err.context(Error::mapping(format!(
                    "invalid table name for entity `{}`",
                    self.name
                )))
            })?;
            self.check_table_name(&name)?;

            return Ok(EntityTable::Single(name));
        }

        let fields: Vec<&str> = self
            .discriminators
            .iter()
            .map(|discriminator| discriminator.field.as_str())
            .collect();
        let pattern = TableNamePattern::compile(&template, &fields)?;

        let discriminator = TableDiscriminator::new(
            self.name.clone(),
            type_id,
            key_type_id,
            std::mem::take(&mut self.discriminators),
            pattern,
            force_quote,
        )?;

        for name in discriminator.table_names() {
            self.check_table_name(name)?;
        }

        Ok(EntityTable::Discriminated(discriminator))
    }

    fn check_table_name(&self, name: &CqlIdentifier) -> Result<()> {
        let limit = MAX_TABLE_NAME_LEN;

        if name.as_str().len() > limit {
            return Err(Error::mapping(format!(
                "table name `{name}` of entity `{}` is longer than {limit} characters",
                self.name
            )));
        }

        Ok(())
    }
}
