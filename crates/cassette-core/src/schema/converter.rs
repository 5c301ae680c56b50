use crate::{stmt::Type, stmt::Value, Error, Result};

use std::fmt::Debug;

/// Converts between a discriminator field's value and the discriminator value
/// used to build table names.
pub trait DiscriminatorConverter: Debug + Send + Sync {
    /// Field value to discriminator value
    fn to_discriminator(&self, value: &Value) -> Result<String>;

    /// Discriminator value to field value
    fn from_discriminator(&self, discriminator: &str) -> Result<Value>;
}

/// Accepts string field values only and uses them unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct StringDiscriminatorConverter;

impl DiscriminatorConverter for StringDiscriminatorConverter {
    fn to_discriminator(&self, value: &Value) -> Result<String> {
        match value {
            Value::String(value) => Ok(value.clone()),
            value => Err(Error::mapping(format!(
                "string discriminator converter cannot convert {value:?}"
            ))),
        }
    }

    fn from_discriminator(&self, discriminator: &str) -> Result<Value> {
        Ok(Value::String(discriminator.to_string()))
    }
}

/// Renders a field value by its type: strings unchanged, integers in decimal,
/// booleans as `true`/`false` (parsed in any case), UUIDs in simple (unhyphenated) form.
#[derive(Debug, Clone, Copy)]
pub struct TypedDiscriminatorConverter {
    ty: Type,
}

impl TypedDiscriminatorConverter {
    pub const fn new(ty: Type) -> Self {
        Self { ty }
    }
}

impl DiscriminatorConverter for TypedDiscriminatorConverter {
    fn to_discriminator(&self, value: &Value) -> Result<String> {
        match (self.ty, value) {
            (Type::String, Value::String(v)) => Ok(v.clone()),
            (Type::I32, Value::I32(v)) => Ok(v.to_string()),
            (Type::I64, Value::I64(v)) => Ok(v.to_string()),
            (Type::I64, Value::I32(v)) => Ok(v.to_string()),
            (Type::Bool, Value::Bool(v)) => Ok(v.to_string()),
            (Type::Uuid, Value::Uuid(v)) => Ok(v.simple().to_string()),
            (ty, value) => Err(Error::mapping(format!(
                "cannot use {value:?} as a discriminator of type {ty}"
            ))),
        }
    }

    fn from_discriminator(&self, discriminator: &str) -> Result<Value> {
        let parsed = match self.ty {
            Type::String => return Ok(Value::String(discriminator.to_string())),
            Type::I32 => discriminator.parse().map(Value::I32).ok(),
            Type::I64 => discriminator.parse().map(Value::I64).ok(),
            Type::Bool => discriminator
                .to_ascii_lowercase()
                .parse()
                .map(Value::Bool)
                .ok(),
            Type::Uuid => uuid::Uuid::parse_str(discriminator).map(Value::Uuid).ok(),
        };

        parsed.ok_or_else(|| {
            Error::mapping(format!(
                "discriminator value {discriminator:?} is not a valid {}",
                self.ty
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_converter_rejects_non_strings() {
        let err = StringDiscriminatorConverter
            .to_discriminator(&Value::I32(1))
            .unwrap_err();
        assert!(err.is_mapping());
    }

    #[test]
    fn typed_converter_round_trip() {
        let converter = TypedDiscriminatorConverter::new(Type::I32);
        assert_eq!(converter.to_discriminator(&Value::I32(7)).unwrap(), "7");
        assert_eq!(converter.from_discriminator("7").unwrap(), Value::I32(7));
        assert!(converter.from_discriminator("x").unwrap_err().is_mapping());
    }

    #[test]
    fn typed_converter_type_mismatch() {
        let converter = TypedDiscriminatorConverter::new(Type::Bool);
        assert!(converter
            .to_discriminator(&Value::from("true"))
            .unwrap_err()
            .is_mapping());
    }

    #[test]
    fn uuid_discriminator_is_unhyphenated() {
        let id = uuid::Uuid::nil();
        let converter = TypedDiscriminatorConverter::new(Type::Uuid);
        let discriminator = converter.to_discriminator(&Value::Uuid(id)).unwrap();
        assert_eq!(discriminator, "00000000000000000000000000000000");
        assert_eq!(
            converter.from_discriminator(&discriminator).unwrap(),
            Value::Uuid(id)
        );
    }
}
