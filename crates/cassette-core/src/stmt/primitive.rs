use super::{Type, Value};
use crate::Result;

/// A Rust type that maps to a single column value.
pub trait Primitive: Sized {
    const TYPE: Type;
    const NULLABLE: bool = false;

    fn load(value: Value) -> Result<Self>;

    fn to_value(&self) -> Value;
}

impl Primitive for bool {
    const TYPE: Type = Type::Bool;

    fn load(value: Value) -> Result<Self> {
        value.to_bool()
    }

    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl Primitive for i32 {
    const TYPE: Type = Type::I32;

    fn load(value: Value) -> Result<Self> {
        value.to_i32()
    }

    fn to_value(&self) -> Value {
        Value::I32(*self)
    }
}

impl Primitive for i64 {
    const TYPE: Type = Type::I64;

    fn load(value: Value) -> Result<Self> {
        value.to_i64()
    }

    fn to_value(&self) -> Value {
        Value::I64(*self)
    }
}

impl Primitive for String {
    const TYPE: Type = Type::String;

    fn load(value: Value) -> Result<Self> {
        value.to_string_value()
    }

    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }
}

impl Primitive for uuid::Uuid {
    const TYPE: Type = Type::Uuid;

    fn load(value: Value) -> Result<Self> {
        value.to_uuid()
    }

    fn to_value(&self) -> Value {
        Value::Uuid(*self)
    }
}

impl<T: Primitive> Primitive for Option<T> {
    const TYPE: Type = T::TYPE;
    const NULLABLE: bool = true;

    fn load(value: Value) -> Result<Self> {
        if value.is_null() {
            Ok(None)
        } else {
            Ok(Some(T::load(value)?))
        }
    }

    fn to_value(&self) -> Value {
        match self {
            Some(value) => value.to_value(),
            None => Value::Null,
        }
    }
}
