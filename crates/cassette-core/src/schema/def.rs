//! Entity definitions as known at compile time.
//!
//! The derive macros emit these; [`Builder`](super::Builder) resolves them into
//! [`PersistentEntity`](super::PersistentEntity) metadata. Column identifiers,
//! key ordering and table names are not validated until then.

use super::{DiscriminatorConverter, Name, PropertyKind};
use crate::stmt::Type;

use std::{any::TypeId, sync::Arc};

#[derive(Debug, Clone)]
pub struct EntityDef {
    /// TypeId of the entity type
    pub type_id: TypeId,

    /// Name of the entity type
    pub name: Name,

    /// Table name template, defaults to the snake-cased type name
    pub table: Option<TableDef>,

    /// Regular columns declared on the entity
    pub properties: Vec<PropertyDef>,

    /// Discriminators declared on the entity
    pub discriminators: Vec<DiscriminatorDef>,

    /// TypeId of the `#[primary_key]` field's type
    pub key_type_id: TypeId,

    pub key: KeyDef,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDef {
    /// Table name, possibly with `@field` discriminator placeholders
    pub template: String,

    /// Keep the case of the produced table names
    pub force_quote: bool,
}

#[derive(Debug, Clone)]
pub enum KeyDef {
    /// A single partition key column
    Simple(PropertyDef),

    /// A composite key class
    Composite(KeyClassDef),
}

#[derive(Debug, Clone)]
pub struct KeyClassDef {
    pub name: Name,

    /// Entity field holding the key
    pub field: String,

    /// Key columns
    pub properties: Vec<PropertyDef>,

    /// Discriminators declared on the key class
    pub discriminators: Vec<DiscriminatorDef>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDef {
    /// Field name
    pub name: String,

    /// Column name override
    pub column: Option<String>,

    pub ty: Type,

    pub nullable: bool,

    pub kind: PropertyKind,
}

#[derive(Debug, Clone)]
pub struct DiscriminatorDef {
    /// Field name
    pub field: String,

    pub ty: Type,

    /// Enumerated discriminator values, as they appear in table names before
    /// case folding
    pub values: Vec<String>,

    /// Converts field values to and from discriminator values. When unset, a
    /// [`TypedDiscriminatorConverter`](super::TypedDiscriminatorConverter) for
    /// `ty` is used.
    pub converter: Option<Arc<dyn DiscriminatorConverter>>,
}

impl PropertyDef {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            column: None,
            ty,
            nullable: false,
            kind: PropertyKind::Regular,
        }
    }

    pub fn column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn kind(mut self, kind: PropertyKind) -> Self {
        self.kind = kind;
        self
    }
}

impl DiscriminatorDef {
    pub fn new<I, S>(field: impl Into<String>, ty: Type, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            field: field.into(),
            ty,
            values: values.into_iter().map(Into::into).collect(),
            converter: None,
        }
    }

    pub fn converter(mut self, converter: impl DiscriminatorConverter + 'static) -> Self {
        self.converter = Some(Arc::new(converter));
        self
    }
}

impl TableDef {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            force_quote: false,
        }
    }
}
