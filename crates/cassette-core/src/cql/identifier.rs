use super::is_reserved;
use crate::{Error, Result};

use std::fmt;

/// An identifier (keyspace, table, or column name) as understood by CQL.
///
/// Unquoted identifiers are case-insensitive and therefore stored folded to
/// lower case. Quoted identifiers keep their case. An unquoted identifier that
/// is spelled like a reserved keyword becomes quoted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CqlIdentifier {
    name: String,
    quoted: bool,
}

impl CqlIdentifier {
    /// Creates an unquoted identifier, folding it to lower case.
    pub fn unquoted(name: impl AsRef<str>) -> Result<Self> {
        let name = name.as_ref();
        validate_unquoted(name)?;

        if is_reserved(name) {
            return Ok(Self {
                name: name.to_string(),
                quoted: true,
            });
        }

        Ok(Self {
            name: name.to_ascii_lowercase(),
            quoted: false,
        })
    }

    /// Creates a quoted identifier, preserving case.
    pub fn quoted(name: impl AsRef<str>) -> Result<Self> {
        let name = name.as_ref();

        if name.is_empty() {
            return Err(Error::invalid_identifier(name, "identifier is empty"));
        }

        Ok(Self {
            name: name.to_string(),
            quoted: true,
        })
    }

    /// Creates an identifier, quoted or not.
    pub fn new(name: impl AsRef<str>, force_quote: bool) -> Result<Self> {
        if force_quote {
            Self::quoted(name)
        } else {
            Self::unquoted(name)
        }
    }

    /// Parses an identifier as it would appear in a CQL statement:
    /// `"Name"` is quoted (with `""` as an escaped quote), anything else is
    /// unquoted.
    pub fn parse(src: &str) -> Result<Self> {
        match src
            .strip_prefix('"')
            .and_then(|rest| rest.strip_suffix('"'))
        {
            Some(inner) => {
                let mut name = String::with_capacity(inner.len());
                let mut chars = inner.chars().peekable();

                while let Some(c) = chars.next() {
                    if c == '"' {
                        if chars.next_if_eq(&'"').is_none() {
                            return Err(Error::invalid_identifier(src, "unescaped quote"));
                        }
                    }
                    name.push(c);
                }

                Self::quoted(name)
            }
            None => Self::unquoted(src),
        }
    }

    /// The identifier's name; lower case when unquoted.
    pub fn as_str(&self) -> &str {
        &self.name
    }

    pub fn is_quoted(&self) -> bool {
        self.quoted
    }

    /// Drops the quotes from a quoted identifier that CQL would read the same
    /// way unquoted, so `"t_a"` and `t_a` compare equal. `"T_A"` stays quoted.
    pub fn normalize(self) -> Self {
        match Self::unquoted(&self.name) {
            Ok(unquoted) if unquoted.name == self.name => unquoted,
            _ => self,
        }
    }

    /// Renders the identifier the way it must appear in a CQL statement.
    pub fn to_cql(&self) -> String {
        self.to_string()
    }
}

fn validate_unquoted(name: &str) -> Result<()> {
    let mut chars = name.chars();

    match chars.next() {
        None => return Err(Error::invalid_identifier(name, "identifier is empty")),
        Some(c) if !c.is_ascii_alphabetic() => {
            return Err(Error::invalid_identifier(
                name,
                "unquoted identifiers must start with a letter",
            ))
        }
        Some(_) => {}
    }

    if let Some(c) = chars.find(|c| !(c.is_ascii_alphanumeric() || *c == '_')) {
        return Err(Error::invalid_identifier(
            name,
            format!("unquoted identifiers cannot contain {c:?}"),
        ));
    }

    Ok(())
}

impl fmt::Display for CqlIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.quoted {
            return f.write_str(&self.name);
        }

        f.write_str("\"")?;
        for c in self.name.chars() {
            if c == '"' {
                f.write_str("\"")?;
            }
            write!(f, "{c}")?;
        }
        f.write_str("\"")
    }
}

impl PartialEq<str> for CqlIdentifier {
    fn eq(&self, other: &str) -> bool {
        self.to_cql() == other
    }
}

impl PartialEq<&str> for CqlIdentifier {
    fn eq(&self, other: &&str) -> bool {
        self.to_cql() == *other
    }
}
