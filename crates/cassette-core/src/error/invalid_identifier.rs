use super::Error;

/// Error when text cannot be used as a CQL identifier.
#[derive(Debug)]
pub(super) struct InvalidIdentifierError {
    identifier: Box<str>,
    reason: Box<str>,
}

impl std::error::Error for InvalidIdentifierError {}

impl core::fmt::Display for InvalidIdentifierError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "invalid CQL identifier `{}`: {}",
            self.identifier, self.reason
        )
    }
}

impl Error {
    /// Creates an invalid identifier error.
    pub fn invalid_identifier(identifier: impl Into<String>, reason: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidIdentifier(InvalidIdentifierError {
            identifier: identifier.into().into(),
            reason: reason.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid identifier error.
    pub fn is_invalid_identifier(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::InvalidIdentifier(_)))
    }
}
