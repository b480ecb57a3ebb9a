//! Row representation - the format handed from the loader to the writer.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// All rows parsed from one CSV file, in file order.
pub type RowSequence = Vec<Row>;

/// A single CSV data row.
///
/// `Row` maps column names to cell text. Columns keep the order in which
/// they were pushed (header order for rows built by the loader), and that
/// order is kept when the row is serialized as a JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    /// Field values (column name -> cell text)
    fields: Vec<(String, String)>,
}

impl Row {
    /// Create an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty row with room for `capacity` columns.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: Vec::with_capacity(capacity),
        }
    }

    /// Build a row from pairs whose column names are already distinct.
    ///
    /// Unlike [`Row::push`] this does not look for existing columns, so it is
    /// linear in the number of pairs. Callers must not pass repeated names.
    pub fn from_distinct_pairs(fields: Vec<(String, String)>) -> Self {
        Self { fields }
    }

    /// Set a column's value.
    ///
    /// A column that is already present keeps its position and takes the
    /// new value, so a header that repeats a name yields the last value.
    pub fn push(&mut self, column: impl Into<String>, value: impl Into<String>) {
        let column = column.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(name, _)| *name == column) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((column, value)),
        }
    }

    /// Get a cell value by column name.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    /// Column names in order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// Cell values in column order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(_, value)| value.as_str())
    }

    /// Iterate over `(column, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Consume the row, returning its `(column, value)` pairs.
    pub fn into_pairs(self) -> Vec<(String, String)> {
        self.fields
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (column, value) in iter {
            row.push(column, value);
        }
        row
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (column, value) in &self.fields {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

struct RowVisitor;

impl<'de> Visitor<'de> for RowVisitor {
    type Value = Row;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object mapping column names to string values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Row, A::Error> {
        let mut row = Row::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((column, value)) = access.next_entry::<String, String>()? {
            row.push(column, value);
        }
        Ok(row)
    }
}

impl<'de> Deserialize<'de> for Row {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RowVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_keeps_column_order() {
        let mut row = Row::new();
        row.push("zeta", "1");
        row.push("alpha", "2");
        row.push("mid", "3");

        assert_eq!(row.columns().collect::<Vec<_>>(), vec!["zeta", "alpha", "mid"]);
        assert_eq!(row.values().collect::<Vec<_>>(), vec!["1", "2", "3"]);
        assert_eq!(row.len(), 3);
    }

    #[test]
    fn test_duplicate_column_last_value_wins() {
        let mut row = Row::new();
        row.push("id", "1");
        row.push("name", "Alice");
        row.push("id", "2");

        assert_eq!(row.len(), 2);
        assert_eq!(row.get("id"), Some("2"));
        assert_eq!(row.columns().collect::<Vec<_>>(), vec!["id", "name"]);
    }

    #[test]
    fn test_from_distinct_pairs_keeps_order() {
        let row = Row::from_distinct_pairs(vec![
            ("b".to_string(), "2".to_string()),
            ("a".to_string(), "1".to_string()),
        ]);
        assert_eq!(row.columns().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(row.get("a"), Some("1"));
    }

    #[test]
    fn test_get_missing_column() {
        let row: Row = [("a", "1")].into_iter().collect();
        assert_eq!(row.get("b"), None);
        assert!(!row.is_empty());
        assert!(Row::new().is_empty());
    }

    #[test]
    fn test_serialize_as_ordered_object() {
        let row: Row = [("b", "2"), ("a", "1")].into_iter().collect();
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"b":"2","a":"1"}"#);
    }

    #[test]
    fn test_deserialize_from_object() {
        let row: Row = serde_json::from_str(r#"{"x":"42","y":""}"#).unwrap();
        assert_eq!(row.get("x"), Some("42"));
        assert_eq!(row.get("y"), Some(""));
        assert_eq!(
            row.into_pairs(),
            vec![
                ("x".to_string(), "42".to_string()),
                ("y".to_string(), String::new())
            ]
        );
    }

    #[test]
    fn test_deserialize_rejects_non_string_values() {
        let result: Result<Row, _> = serde_json::from_str(r#"{"x":42}"#);
        assert!(result.is_err());
    }
}
