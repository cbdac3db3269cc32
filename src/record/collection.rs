//! Homogeneous batches of records

use serde_json::Value;

use super::{Record, csv::to_csv_table, json::to_json_value};

/// An ordered sequence of records of a single entity kind
#[derive(Debug, Clone, PartialEq)]
pub struct Collection<R> {
    items: Vec<R>,
}

impl<R> Default for Collection<R> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<R> Collection<R> {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the collection holds no records
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Record at position `index`
    pub fn get(&self, index: usize) -> Option<&R> {
        self.items.get(index)
    }

    /// Append a record
    pub fn push(&mut self, record: R) {
        self.items.push(record);
    }

    /// Iterate over the records in order
    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.items.iter()
    }

    /// Records as a slice
    pub fn as_slice(&self) -> &[R] {
        &self.items
    }

    /// Take the records out of the collection
    pub fn into_vec(self) -> Vec<R> {
        self.items
    }
}

impl<R: Record> Collection<R> {
    /// Render as an indented JSON array of record objects; `[]` when empty
    pub fn to_json(&self) -> String {
        if self.is_empty() {
            return "[]".to_string();
        }
        let array = Value::Array(self.iter().map(to_json_value).collect());
        serde_json::to_string_pretty(&array)
            .unwrap_or_else(|e| format!("error converting {} list to JSON: {}", R::NAME, e))
    }

    /// Render as a CSV table with a header line; empty string when empty
    pub fn to_csv(&self) -> String {
        to_csv_table(self.iter())
    }
}

impl<R> From<Vec<R>> for Collection<R> {
    fn from(items: Vec<R>) -> Self {
        Self { items }
    }
}

impl<R> FromIterator<R> for Collection<R> {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<R> Extend<R> for Collection<R> {
    fn extend<I: IntoIterator<Item = R>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl<R> IntoIterator for Collection<R> {
    type Item = R;
    type IntoIter = std::vec::IntoIter<R>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, R> IntoIterator for &'a Collection<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
