use super::Name;

use std::any::TypeId;

/// Primary key layout of a persistent entity.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimaryKey {
    /// Type of the entity's `#[primary_key]` field
    pub type_id: TypeId,

    /// Indices of partition key properties, ordered by ordinal
    pub partition: Vec<usize>,

    /// Indices of clustering properties, ordered by ordinal
    pub clustering: Vec<usize>,

    /// Set when the key is a composite key class
    pub key_class: Option<KeyClass>,
}

/// A composite primary key type.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyClass {
    pub name: Name,

    /// Entity field that holds the key
    pub field: String,
}

impl PrimaryKey {
    pub fn is_composite(&self) -> bool {
        self.key_class.is_some()
    }

    /// Partition then clustering property indices.
    pub fn properties(&self) -> impl Iterator<Item = usize> + '_ {
        self.partition.iter().chain(self.clustering.iter()).copied()
    }
}
