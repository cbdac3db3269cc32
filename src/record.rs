//! # Record Serialization Module
//!
//! Every scraped entity is plain data plus a static table of field descriptors.
//! The generic renderers in this module walk that table to produce a CSV row, a
//! CSV header or a JSON document, so header and row can be generated
//! independently and still line up column for column.
//!
//! ## Key Components
//!
//! - `Record`: implemented by each entity kind, exposes its descriptor table
//! - `FieldSpec`: one field's JSON key, CSV key and value accessor
//! - `FieldValue`: the supported value kinds (text, count, flag)
//! - `Collection`: an ordered, homogeneous batch of records
//!
//! ## Rendering rules
//!
//! - Declared descriptor order is the JSON property order, the CSV header order
//!   and the CSV row order
//! - A key of `Key::Omit` drops the field from that output
//! - CSV cells replace the `|` separator with a space and render a zero count
//!   as an empty cell; JSON keeps zero values
//! - CSV cells holding quotes or line breaks are quoted, so a record is always
//!   one logical row

mod collection;
mod csv;
mod json;

pub use collection::Collection;
pub use self::csv::{CSV_SEPARATOR, to_csv_header, to_csv_row, to_csv_table};
pub use json::{to_json, to_json_value};

/// Output key of a field, or the marker that excludes it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Emit the field under this key
    Named(&'static str),
    /// Leave the field out
    Omit,
}

impl Key {
    /// The key name, unless omitted
    pub fn name(&self) -> Option<&'static str> {
        match self {
            Key::Named(name) => Some(name),
            Key::Omit => None,
        }
    }
}

/// Borrowed value of a single record field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    /// Free text
    Text(&'a str),
    /// Non-negative integer count
    Count(u64),
    /// Boolean flag
    Flag(bool),
}

/// Descriptor for one field of a record type
pub struct FieldSpec<R> {
    /// Field name, used in diagnostics
    pub name: &'static str,
    /// Key used in JSON output
    pub json: Key,
    /// Column key used in CSV output
    pub csv: Key,
    /// Accessor for the field value
    pub get: fn(&R) -> FieldValue<'_>,
}

impl<R> FieldSpec<R> {
    /// A field emitted under the same key in JSON and CSV
    pub const fn new(key: &'static str, get: fn(&R) -> FieldValue<'_>) -> Self {
        Self {
            name: key,
            json: Key::Named(key),
            csv: Key::Named(key),
            get,
        }
    }

    /// A field with explicit JSON and CSV keys
    pub const fn with_keys(
        name: &'static str,
        json: Key,
        csv: Key,
        get: fn(&R) -> FieldValue<'_>,
    ) -> Self {
        Self {
            name,
            json,
            csv,
            get,
        }
    }

    /// Read this field from a record
    pub fn value<'a>(&self, record: &'a R) -> FieldValue<'a> {
        (self.get)(record)
    }
}

/// A structured scrape result with a fixed field layout
pub trait Record: Sized + 'static {
    /// Lowercase entity name, used as the output file prefix
    const NAME: &'static str;

    /// Field descriptors in declared order
    fn schema() -> &'static [FieldSpec<Self>];

    /// Render this record as a `|`-separated CSV row
    fn csv_row(&self) -> String {
        to_csv_row(self)
    }

    /// Render the CSV header for this record type
    fn csv_header() -> String {
        to_csv_header::<Self>()
    }

    /// Render this record as an indented JSON object
    fn json(&self) -> String {
        to_json(self)
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{Sample, sample};
    use super::*;

    #[test]
    fn test_key_name() {
        assert_eq!(Key::Named("name").name(), Some("name"));
        assert_eq!(Key::Omit.name(), None);
    }

    #[test]
    fn test_trait_methods_delegate_to_renderers() {
        let record = sample("John", 30, true);
        assert_eq!(record.csv_row(), to_csv_row(&record));
        assert_eq!(Sample::csv_header(), to_csv_header::<Sample>());
        assert_eq!(record.json(), to_json(&record));
    }

    #[test]
    fn test_field_spec_value() {
        let record = sample("Jane", 25, false);
        let values: Vec<_> = Sample::schema().iter().map(|f| f.value(&record)).collect();
        assert_eq!(
            values,
            vec![
                FieldValue::Text("Jane"),
                FieldValue::Count(25),
                FieldValue::Flag(false),
                FieldValue::Text("hidden"),
            ]
        );
    }
}
