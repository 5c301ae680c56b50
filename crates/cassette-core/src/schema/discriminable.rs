use crate::stmt::Value;

/// Exposes the discriminator fields of an entity or key instance.
///
/// Implementations are generated by `#[derive(Entity)]` and
/// `#[derive(PrimaryKeyClass)]`. An entity forwards lookups it cannot answer
/// to its primary key.
pub trait Discriminable: 'static {
    /// Returns the current value of the named discriminator field, or `None`
    /// if the type has no such field.
    fn discriminator_value(&self, field: &str) -> Option<Value>;
}

macro_rules! impl_no_discriminator {
    ( $($t:ty),+ ) => {
        $(
            impl Discriminable for $t {
                fn discriminator_value(&self, _field: &str) -> Option<Value> {
                    None
                }
            }
        )+
    };
}

// Simple primary keys carry no discriminator.
impl_no_discriminator!(bool, i32, i64, String, uuid::Uuid);
