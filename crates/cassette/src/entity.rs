use crate::Result;

use cassette_core::{
    schema::{
        def::{EntityDef, KeyDef, PropertyDef},
        Discriminable, PropertyKind,
    },
    stmt::{Primitive, Record},
};

/// A type mapped to one table, or to a family of discriminated tables.
///
/// Implemented with `#[derive(Entity)]`.
pub trait Entity: Discriminable + Sized + Send + Sync + 'static {
    /// Type of the `#[primary_key]` field
    type Key: PrimaryKey;

    /// Compile-time description of the entity's mapping.
    fn schema() -> EntityDef;

    /// The instance's primary key.
    fn key(&self) -> &Self::Key;

    /// Writes every column-mapped field, key columns included. Discriminator
    /// fields are not written; the table name carries them.
    fn write(&self, out: &mut Record);

    /// Loads an instance. Discriminator fields are expected in `record`
    /// alongside the column values.
    fn load(record: &mut Record) -> Result<Self>;
}

/// The type of an entity's `#[primary_key]` field.
///
/// Primitives map to a single partition key column named after the entity
/// field. Composite keys are implemented with `#[derive(PrimaryKeyClass)]`.
pub trait PrimaryKey: Discriminable + Sized + Send + Sync + 'static {
    /// Describes the key when held by the entity field `field`.
    fn key_def(field: &str) -> KeyDef;

    fn write_key(&self, field: &str, out: &mut Record);

    fn load_key(field: &str, record: &mut Record) -> Result<Self>;
}

macro_rules! impl_simple_key {
    ( $($t:ty),+ ) => {
        $(
            impl PrimaryKey for $t {
                fn key_def(field: &str) -> KeyDef {
                    KeyDef::Simple(
                        PropertyDef::new(field, <$t as Primitive>::TYPE)
                            .kind(PropertyKind::PartitionKey { ordinal: 0 }),
                    )
                }

                fn write_key(&self, field: &str, out: &mut Record) {
                    out.insert(field, Primitive::to_value(self));
                }

                fn load_key(field: &str, record: &mut Record) -> Result<Self> {
                    record.take(field)
                }
            }
        )+
    };
}

impl_simple_key!(bool, i32, i64, String, uuid::Uuid);
