use super::Type;
use crate::{Error, Result};

use std::fmt;

#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Value {
    /// Null value
    #[default]
    Null,

    /// Boolean value
    Bool(bool),

    /// Signed 32-bit integer
    I32(i32),

    /// Signed 64-bit integer
    I64(i64),

    /// String value
    String(String),

    /// UUID value
    Uuid(uuid::Uuid),
}

impl Value {
    pub const fn null() -> Self {
        Self::Null
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the type of the value, `None` for null.
    pub const fn ty(&self) -> Option<Type> {
        match self {
            Self::Null => None,
            Self::Bool(_) => Some(Type::Bool),
            Self::I32(_) => Some(Type::I32),
            Self::I64(_) => Some(Type::I64),
            Self::String(_) => Some(Type::String),
            Self::Uuid(_) => Some(Type::Uuid),
        }
    }

    pub(crate) const fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "Null",
            Self::Bool(_) => "Bool",
            Self::I32(_) => "I32",
            Self::I64(_) => "I64",
            Self::String(_) => "String",
            Self::Uuid(_) => "Uuid",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn to_bool(self) -> Result<bool> {
        match self {
            Self::Bool(v) => Ok(v),
            _ => Err(Error::type_conversion(self, "bool")),
        }
    }

    pub fn to_i32(self) -> Result<i32> {
        match self {
            Self::I32(v) => Ok(v),
            Self::I64(v) => match i32::try_from(v) {
                Ok(v) => Ok(v),
                Err(_) => Err(Error::type_conversion(self, "i32")),
            },
            _ => Err(Error::type_conversion(self, "i32")),
        }
    }

    pub fn to_i64(self) -> Result<i64> {
        match self {
            Self::I32(v) => Ok(v.into()),
            Self::I64(v) => Ok(v),
            _ => Err(Error::type_conversion(self, "i64")),
        }
    }

    pub fn to_string_value(self) -> Result<String> {
        match self {
            Self::String(v) => Ok(v),
            _ => Err(Error::type_conversion(self, "String")),
        }
    }

    pub fn to_uuid(self) -> Result<uuid::Uuid> {
        match self {
            Self::Uuid(v) => Ok(v),
            _ => Err(Error::type_conversion(self, "Uuid")),
        }
    }

    /// Writes the value as a CQL literal.
    pub fn fmt_cql(&self, f: &mut impl fmt::Write) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::I32(v) => write!(f, "{v}"),
            Self::I64(v) => write!(f, "{v}"),
            Self::String(v) => {
                f.write_char('\'')?;
                for c in v.chars() {
                    if c == '\'' {
                        f.write_char('\'')?;
                    }
                    f.write_char(c)?;
                }
                f.write_char('\'')
            }
            Self::Uuid(v) => write!(f, "{}", v.hyphenated()),
        }
    }
}

impl From<bool> for Value {
    fn from(src: bool) -> Self {
        Self::Bool(src)
    }
}

impl From<i32> for Value {
    fn from(src: i32) -> Self {
        Self::I32(src)
    }
}

impl From<i64> for Value {
    fn from(src: i64) -> Self {
        Self::I64(src)
    }
}

impl From<String> for Value {
    fn from(src: String) -> Self {
        Self::String(src)
    }
}

impl From<&String> for Value {
    fn from(src: &String) -> Self {
        Self::String(src.clone())
    }
}

impl From<&str> for Value {
    fn from(src: &str) -> Self {
        Self::String(src.to_string())
    }
}

impl From<uuid::Uuid> for Value {
    fn from(src: uuid::Uuid) -> Self {
        Self::Uuid(src)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(src: Option<T>) -> Self {
        match src {
            Some(value) => value.into(),
            None => Self::Null,
        }
    }
}
