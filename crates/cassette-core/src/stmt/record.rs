use super::{Primitive, Value};
use crate::Result;

use indexmap::IndexMap;

/// Property values of one entity instance, keyed by property name.
///
/// Generated `Entity` implementations write into and load from a `Record`;
/// the converter translates between records and column-keyed rows.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Record {
    values: IndexMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Removes the named value and loads it as `T`. A missing value loads as
    /// null.
    pub fn take<T: Primitive>(&mut self, name: &str) -> Result<T> {
        let value = self.values.shift_remove(name).unwrap_or_default();
        T::load(value).map_err(|err| err.context(crate::err!("loading property `{name}`")))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl IntoIterator for Record {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}
