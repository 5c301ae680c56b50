use crate::{Error, Result};

/// Marks a discriminator placeholder in a table name template.
const PLACEHOLDER: char = '@';

/// A compiled table name template such as `T_@discriminator_magic`.
///
/// A placeholder is `@` followed by the name of a discriminator field. Field
/// names are matched longest first, so `@discriminator_magic` resolves to the
/// `discriminator` field followed by the literal `_magic` unless a field named
/// `discriminator_magic` exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableNamePattern {
    template: String,
    parts: Vec<Part>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
    Literal(String),

    /// Index of the discriminator field
    Placeholder(usize),
}

impl TableNamePattern {
    /// Compiles `template` against the entity's discriminator field names.
    ///
    /// Every field must be referenced at least once.
    pub fn compile(template: &str, fields: &[&str]) -> Result<Self> {
        let mut parts = vec![];
        let mut literal = String::new();
        let mut rest = template;

        while let Some(pos) = rest.find(PLACEHOLDER) {
            literal.push_str(&rest[..pos]);
            let after = &rest[pos + PLACEHOLDER.len_utf8()..];

            let Some((index, field)) = fields
                .iter()
                .enumerate()
                .filter(|(_, field)| !field.is_empty() && after.starts_with(**field))
                .max_by_key(|(_, field)| field.len())
            else {
                return Err(Error::mapping(format!(
                    "table name template `{template}` references an unknown discriminator at `{}`",
                    &rest[pos..]
                )));
            };

            if !literal.is_empty() {
                parts.push(Part::Literal(std::mem::take(&mut literal)));
            }
            parts.push(Part::Placeholder(index));
            rest = &after[field.len()..];
        }

        literal.push_str(rest);
        if !literal.is_empty() {
            parts.push(Part::Literal(literal));
        }

        for (index, field) in fields.iter().enumerate() {
            if !parts.contains(&Part::Placeholder(index)) {
                return Err(Error::mapping(format!(
                    "table name template `{template}` does not reference discriminator `{field}`; \
                     expected `{PLACEHOLDER}{field}`"
                )));
            }
        }

        Ok(Self {
            template: template.to_string(),
            parts,
        })
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Returns `true` if the template contains placeholders.
    pub fn has_placeholders(&self) -> bool {
        self.parts
            .iter()
            .any(|part| matches!(part, Part::Placeholder(_)))
    }

    /// Substitutes `segments[i]` for every placeholder of discriminator `i`.
    pub fn render(&self, segments: &[&str]) -> String {
        let mut out = String::with_capacity(self.template.len());

        for part in &self.parts {
            match part {
                Part::Literal(literal) => out.push_str(literal),
                Part::Placeholder(index) => out.push_str(segments[*index]),
            }
        }

        out
    }
}
