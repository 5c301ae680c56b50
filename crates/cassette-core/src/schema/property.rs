use crate::{cql::Ordering, stmt::Type, CqlIdentifier};

/// A column-mapped field of an entity or of its composite key.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistentProperty {
    /// Field name, unique across the entity and its key class
    pub name: String,

    /// Column the field is stored in
    pub column: CqlIdentifier,

    pub ty: Type,

    pub nullable: bool,

    pub kind: PropertyKind,

    /// Where the field is declared
    pub owner: Owner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    /// A plain column
    Regular,

    /// Part of the partition key
    PartitionKey { ordinal: u32 },

    /// A clustering column
    ClusteringKey { ordinal: u32, ordering: Ordering },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Owner {
    /// Declared directly on the entity
    Entity,

    /// Declared on the entity's composite primary key class
    KeyClass,
}

impl PersistentProperty {
    pub fn is_primary_key(&self) -> bool {
        !matches!(self.kind, PropertyKind::Regular)
    }

    pub fn is_partition_key(&self) -> bool {
        matches!(self.kind, PropertyKind::PartitionKey { .. })
    }

    pub fn is_clustering_key(&self) -> bool {
        matches!(self.kind, PropertyKind::ClusteringKey { .. })
    }
}

impl PropertyKind {
    pub(crate) fn ordinal(self) -> Option<u32> {
        match self {
            Self::Regular => None,
            Self::PartitionKey { ordinal } | Self::ClusteringKey { ordinal, .. } => Some(ordinal),
        }
    }
}
