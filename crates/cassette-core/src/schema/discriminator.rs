use super::{Discriminable, DiscriminatorConverter, Name, TableNamePattern};
use crate::{stmt::Type, stmt::Value, CqlIdentifier, Error, Result};

use std::{any::TypeId, collections::HashMap, fmt, sync::Arc};

/// Resolves which physical table an instance of a discriminated entity
/// belongs to.
///
/// The entity's table name template is expanded with every combination of
/// enumerated discriminator values; each combination names one physical table.
#[derive(Debug, Clone)]
pub struct TableDiscriminator {
    /// Entity the discriminator belongs to
    entity: Name,

    entity_type: TypeId,

    key_type: TypeId,

    fields: Vec<DiscriminatorField>,

    pattern: TableNamePattern,

    /// Cross product of the discriminator values; the first field varies
    /// slowest.
    tables: Vec<DiscriminatedTable>,

    by_name: HashMap<CqlIdentifier, usize>,
}

/// A field whose value selects the physical table.
#[derive(Debug, Clone)]
pub struct DiscriminatorField {
    /// Field name
    pub field: String,

    pub location: FieldLocation,

    pub ty: Type,

    /// Enumerated discriminator values, as declared
    pub values: Vec<String>,

    pub converter: Arc<dyn DiscriminatorConverter>,

    /// `values` as the converter renders them, e.g. `1` for a declared `01`
    canonical: Vec<String>,
}

/// Where a discriminator field is declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldLocation {
    Entity,
    KeyClass,
}

/// One physical table of a discriminated entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscriminatedTable {
    pub name: CqlIdentifier,
    pub key: DiscriminatorKey,
}

/// The discriminator values that select one physical table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscriminatorKey {
    parts: Vec<DiscriminatorPart>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscriminatorPart {
    /// Discriminator field name
    pub field: String,

    /// Discriminator value as declared, e.g. `A`
    pub value: String,

    /// The value as it appears in the table identifier, e.g. `a`
    pub segment: String,
}

impl TableDiscriminator {
    /// Expands `pattern` over every combination of the fields' values.
    ///
    /// Fails if two combinations produce the same table identifier, or if a
    /// produced name is not a valid identifier.
    pub(crate) fn new(
        entity: Name,
        entity_type: TypeId,
        key_type: TypeId,
        fields: Vec<DiscriminatorField>,
        pattern: TableNamePattern,
        force_quote: bool,
    ) -> Result<Self> {
        assert!(!fields.is_empty(), "discriminated entity without fields");

        let count: usize = fields.iter().map(|field| field.values.len()).product();
        let mut tables = Vec::with_capacity(count);
        let mut by_name = HashMap::with_capacity(count);

        for index in 0..count {
            let selection = Self::selection(&fields, index);
            let values: Vec<&str> = fields
                .iter()
                .zip(&selection)
                .map(|(field, i)| field.values[*i].as_str())
                .collect();

            let name = CqlIdentifier::new(pattern.render(&values), force_quote).map_err(|err| {
                err.context(Error::mapping(format!(
                    "table name template `{}` of entity `{entity}` produces an invalid table name",
                    pattern.template()
                )))
            })?;

            let parts = fields
                .iter()
                .zip(&values)
                .map(|(field, value)| DiscriminatorPart {
                    field: field.field.clone(),
                    value: value.to_string(),
                    segment: if name.is_quoted() {
                        value.to_string()
                    } else {
                        value.to_ascii_lowercase()
                    },
                })
                .collect();

            if let Some(previous) = by_name.insert(name.clone().normalize(), index) {
                let previous: &DiscriminatedTable = &tables[previous];
                return Err(Error::mapping(format!(
                    "entity `{entity}` maps discriminators {} and {} to the same table `{name}`",
                    previous.key,
                    DiscriminatorKey { parts }
                )));
            }

            tables.push(DiscriminatedTable {
                name,
                key: DiscriminatorKey { parts },
            });
        }

        Ok(Self {
            entity,
            entity_type,
            key_type,
            fields,
            pattern,
            tables,
            by_name,
        })
    }

    /// Decomposes a table index into one value index per field.
    fn selection(fields: &[DiscriminatorField], mut index: usize) -> Vec<usize> {
        let mut selection = vec![0; fields.len()];

        for (slot, field) in selection.iter_mut().zip(fields).rev() {
            *slot = index % field.values.len();
            index /= field.values.len();
        }

        selection
    }

    pub fn fields(&self) -> &[DiscriminatorField] {
        &self.fields
    }

    pub fn pattern(&self) -> &TableNamePattern {
        &self.pattern
    }

    pub fn tables(&self) -> &[DiscriminatedTable] {
        &self.tables
    }

    /// Every physical table name of the entity.
    pub fn table_names(&self) -> impl ExactSizeIterator<Item = &CqlIdentifier> + '_ {
        self.tables.iter().map(|table| &table.name)
    }

    /// Resolves the table for a single-discriminator entity.
    pub fn table_name_for_value(&self, value: impl Into<Value>) -> Result<&CqlIdentifier> {
        if self.fields.len() != 1 {
            return Err(Error::mapping(format!(
                "entity `{}` has {} discriminators; a single value cannot select a table",
                self.entity,
                self.fields.len()
            )));
        }

        self.table_name_for_values(&[value.into()])
    }

    /// Resolves the table for one value per discriminator, in declaration
    /// order.
    pub fn table_name_for_values(&self, values: &[Value]) -> Result<&CqlIdentifier> {
        if values.len() != self.fields.len() {
            return Err(Error::mapping(format!(
                "entity `{}` expects {} discriminator values, got {}",
                self.entity,
                self.fields.len(),
                values.len()
            )));
        }

        let mut index = 0;

        for (field, value) in self.fields.iter().zip(values) {
            index = index * field.values.len() + self.value_index(field, value)?;
        }

        let table = &self.tables[index];
        tracing::trace!(entity = %self.entity, table = %table.name, "resolved discriminated table");
        Ok(&table.name)
    }

    /// Resolves the table an entity instance belongs to.
    pub fn table_name_for<E: Discriminable>(&self, entity: &E) -> Result<&CqlIdentifier> {
        if TypeId::of::<E>() != self.entity_type {
            return Err(Error::mapping(format!(
                "expected an instance of `{}`, got `{}`",
                self.entity,
                std::any::type_name::<E>()
            )));
        }

        let values = self
            .fields
            .iter()
            .map(|field| self.read_value(field, entity))
            .collect::<Result<Vec<_>>>()?;

        self.table_name_for_values(&values)
    }

    /// Resolves the table from a primary key instance. Every discriminator
    /// must be declared on the key class.
    pub fn table_name_for_id<K: Discriminable>(&self, key: &K) -> Result<&CqlIdentifier> {
        if TypeId::of::<K>() != self.key_type {
            return Err(Error::mapping(format!(
                "expected a primary key of `{}`, got `{}`",
                self.entity,
                std::any::type_name::<K>()
            )));
        }

        if let Some(field) = self
            .fields
            .iter()
            .find(|field| field.location != FieldLocation::KeyClass)
        {
            return Err(Error::mapping(format!(
                "discriminator `{}` of entity `{}` is not part of the primary key; \
                 the table cannot be resolved from a key",
                field.field, self.entity
            )));
        }

        let values = self
            .fields
            .iter()
            .map(|field| self.read_value(field, key))
            .collect::<Result<Vec<_>>>()?;

        self.table_name_for_values(&values)
    }

    /// Maps a physical table name back to its discriminator values.
    pub fn parse_table_name(&self, name: &str) -> Result<&DiscriminatorKey> {
        CqlIdentifier::parse(name)
            .ok()
            .and_then(|name| self.discriminator_key(&name))
            .ok_or_else(|| {
                Error::mapping(format!(
                    "`{name}` is not a table of entity `{}`",
                    self.entity
                ))
            })
    }

    /// Like [`parse_table_name`](Self::parse_table_name) for an identifier.
    /// Quotes that CQL would ignore are ignored here too.
    pub fn discriminator_key(&self, name: &CqlIdentifier) -> Option<&DiscriminatorKey> {
        self.by_name
            .get(&name.clone().normalize())
            .map(|index| &self.tables[*index].key)
    }

    fn read_value<T: Discriminable>(&self, field: &DiscriminatorField, src: &T) -> Result<Value> {
        match src.discriminator_value(&field.field) {
            Some(value) if !value.is_null() => Ok(value),
            _ => Err(Error::mapping(format!(
                "discriminator `{}` of entity `{}` is not set",
                field.field, self.entity
            ))),
        }
    }

    fn value_index(&self, field: &DiscriminatorField, value: &Value) -> Result<usize> {
        let discriminator = field.converter.to_discriminator(value).map_err(|err| {
            err.context(Error::mapping(format!(
                "cannot convert discriminator `{}` of entity `{}`",
                field.field, self.entity
            )))
        })?;

        field
            .canonical
            .iter()
            .position(|canonical| canonical.eq_ignore_ascii_case(&discriminator))
            .ok_or_else(|| {
                Error::mapping(format!(
                    "unknown discriminator value {discriminator:?} for `{}.{}`; expected one of {:?}",
                    self.entity, field.field, field.values
                ))
            })
    }
}

impl DiscriminatorField {
    /// Creates a field, checking that the converter accepts every declared
    /// value.
    pub fn new(
        field: impl Into<String>,
        location: FieldLocation,
        ty: Type,
        values: Vec<String>,
        converter: Arc<dyn DiscriminatorConverter>,
    ) -> Result<Self> {
        let field = field.into();

        let canonical = values
            .iter()
            .map(|declared| {
                converter
                    .from_discriminator(declared)
                    .and_then(|value| converter.to_discriminator(&value))
                    .map_err(|err| {
                        err.context(Error::mapping(format!(
                            "discriminator `{field}` declares {declared:?}, which its converter rejects"
                        )))
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            field,
            location,
            ty,
            values,
            converter,
            canonical,
        })
    }

    /// Declared values as the converter renders field values, in declaration
    /// order.
    pub fn canonical_values(&self) -> &[String] {
        &self.canonical
    }

    /// Converts a declared discriminator value back into a field value.
    pub fn field_value(&self, declared: &str) -> Result<Value> {
        self.converter.from_discriminator(declared)
    }
}

impl DiscriminatorKey {
    pub fn parts(&self) -> &[DiscriminatorPart] {
        &self.parts
    }

    /// The table segment of a single-discriminator key.
    pub fn single(&self) -> Option<&str> {
        match &self.parts[..] {
            [part] => Some(&part.segment),
            _ => None,
        }
    }

    pub fn get(&self, field: &str) -> Option<&DiscriminatorPart> {
        self.parts.iter().find(|part| part.field == field)
    }
}

impl fmt::Display for DiscriminatorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        let mut s = "";
        for part in &self.parts {
            write!(f, "{s}{}: {:?}", part.field, part.value)?;
            s = ", ";
        }
        f.write_str("}")
    }
}
