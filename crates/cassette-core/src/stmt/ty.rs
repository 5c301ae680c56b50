use std::fmt;

/// The type of a mapped column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    /// Boolean value
    Bool,

    /// Signed 32-bit integer
    I32,

    /// Signed 64-bit integer
    I64,

    /// UTF-8 text
    String,

    /// 128-bit universally unique identifier
    Uuid,
}

impl Type {
    /// Name of the matching CQL native type
    pub const fn cql_name(self) -> &'static str {
        match self {
            Self::Bool => "boolean",
            Self::I32 => "int",
            Self::I64 => "bigint",
            Self::String => "text",
            Self::Uuid => "uuid",
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.cql_name())
    }
}
