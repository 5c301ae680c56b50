mod config;
pub use config::Config;

mod convert;
pub use convert::MappingConverter;

mod entity;
pub use entity::{Entity, PrimaryKey};

mod mapping;
pub use mapping::MappingContext;

pub mod template;
pub use template::Template;

pub use cassette_core::{
    bail, cql, driver, err, schema, stmt, CqlIdentifier, Error, Result, Session,
};

pub use cassette_macros::{Entity, PrimaryKeyClass};

#[doc(hidden)]
pub mod codegen_support {
    pub use crate::{Entity, PrimaryKey, Result};
    pub use cassette_core::{
        cql::Ordering,
        schema::{
            def::{DiscriminatorDef, EntityDef, KeyClassDef, KeyDef, PropertyDef, TableDef},
            Discriminable, Name, PropertyKind,
        },
        stmt::{Primitive, Record, Value},
    };
    pub use std::{
        any::TypeId,
        default::Default,
        option::Option,
        string::{String, ToString},
        vec::Vec,
    };
}
