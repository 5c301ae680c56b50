use super::Error;

/// Error when a type cannot be mapped to, or resolved against, its tables.
///
/// This occurs when:
/// - An entity definition is invalid (missing primary key, duplicate columns,
///   malformed table template)
/// - A discriminator value is outside its enumerated set
/// - A table name does not belong to a discriminated entity
/// - An instance of the wrong type is handed to an entity's resolver
#[derive(Debug)]
pub(super) struct MappingError {
    message: Box<str>,
}

impl std::error::Error for MappingError {}

impl core::fmt::Display for MappingError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "mapping error: {}", self.message)
    }
}

impl Error {
    /// Creates a mapping error.
    pub fn mapping(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Mapping(MappingError {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is a mapping error.
    pub fn is_mapping(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::Mapping(_)))
    }
}
