mod builder;
pub use builder::Builder;

mod converter;
pub use converter::{DiscriminatorConverter, StringDiscriminatorConverter, TypedDiscriminatorConverter};

pub mod def;

mod discriminable;
pub use discriminable::Discriminable;

mod discriminator;
pub use discriminator::{
    DiscriminatedTable, DiscriminatorField, DiscriminatorKey, DiscriminatorPart, FieldLocation,
    TableDiscriminator,
};

mod entity;
pub use entity::{EntityTable, PersistentEntity};

mod name;
pub use name::Name;

mod pattern;
pub use pattern::TableNamePattern;

mod primary_key;
pub use primary_key::{KeyClass, PrimaryKey};

mod property;
pub use property::{Owner, PersistentProperty, PropertyKind};

/// Longest table name Cassandra accepts.
pub const MAX_TABLE_NAME_LEN: usize = 48;
