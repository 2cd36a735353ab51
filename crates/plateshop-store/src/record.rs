//! Sanitized-key view of a product row.

use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::schema::{Schema, sanitize_key};

/// Incoming field values keyed by (possibly unsanitized) field name.
pub type FieldMap = BTreeMap<String, String>;

/// One product row as the API sees it.
///
/// Keys are sanitized column names, kept in file column order. Serializes as
/// a JSON object in that same order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    /// Build a record from a schema and the row's cells.
    ///
    /// Cells beyond the schema are dropped; missing cells become empty strings.
    pub fn from_row<'a, I>(schema: &Schema, cells: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut cells = cells.into_iter();
        let fields = schema
            .keys()
            .map(|key| (key, cells.next().unwrap_or_default().to_string()))
            .collect();
        Self { fields }
    }

    /// Value of a field by sanitized comparison.
    pub fn get(&self, key: &str) -> Option<&str> {
        let key = sanitize_key(key);
        self.fields
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate `(key, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Copy the record into a [`FieldMap`].
    pub fn to_field_map(&self) -> FieldMap {
        self.fields.iter().cloned().collect()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
