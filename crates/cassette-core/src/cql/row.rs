use super::CqlIdentifier;
use crate::stmt::Value;

use indexmap::IndexMap;

/// Column values of one table row.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Row {
    columns: IndexMap<CqlIdentifier, Value>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, column: CqlIdentifier, value: impl Into<Value>) {
        self.columns.insert(column, value.into());
    }

    pub fn get(&self, column: &CqlIdentifier) -> Option<&Value> {
        self.columns.get(column)
    }

    pub fn remove(&mut self, column: &CqlIdentifier) -> Option<Value> {
        self.columns.shift_remove(column)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn columns(&self) -> impl Iterator<Item = &CqlIdentifier> + '_ {
        self.columns.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CqlIdentifier, &Value)> + '_ {
        self.columns.iter()
    }

    /// Keeps only the listed columns, in the listed order. Columns missing
    /// from the row are filled with null.
    pub fn project(&self, columns: &[CqlIdentifier]) -> Row {
        Row {
            columns: columns
                .iter()
                .map(|column| {
                    let value = self.columns.get(column).cloned().unwrap_or_default();
                    (column.clone(), value)
                })
                .collect(),
        }
    }
}

impl FromIterator<(CqlIdentifier, Value)> for Row {
    fn from_iter<I: IntoIterator<Item = (CqlIdentifier, Value)>>(iter: I) -> Self {
        Row {
            columns: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Row {
    type Item = (CqlIdentifier, Value);
    type IntoIter = indexmap::map::IntoIter<CqlIdentifier, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.into_iter()
    }
}
