use serde::ser::{Serialize, SerializeMap, Serializer};

use super::Value;

static MISSING: Value = Value::Missing;

/// One record of tabular data: an insertion-ordered mapping from column key
/// to [`Value`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    fields: Vec<(String, Value)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Row::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set a field, keeping its original position if the key already exists.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((key, value)),
        }
    }

    /// Field lookup. Absent keys read as [`Value::Missing`].
    pub fn get(&self, key: &str) -> &Value {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
            .unwrap_or(&MISSING)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.iter().any(|(k, _)| k == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Projection of a typed entity into a [`Row`] at the page boundary.
pub trait ToRow {
    fn to_row(&self) -> Row;
}

impl ToRow for Row {
    fn to_row(&self) -> Row {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_preserves_key_order() {
        let row = Row::new()
            .with("competitor", "Uber")
            .with("commission_rate", 25.0)
            .with("competitor", "Didi");

        assert_eq!(row.keys().collect::<Vec<_>>(), vec!["competitor", "commission_rate"]);
        assert_eq!(row.get("competitor"), &Value::Text("Didi".into()));
    }

    #[test]
    fn test_absent_key_reads_missing() {
        let row = Row::new().with("a", 1.0);
        assert!(row.get("b").is_missing());
        assert!(!row.contains_key("b"));
    }

    #[test]
    fn test_serializes_as_ordered_object() {
        let row = Row::new().with("b", "x").with("a", 2.0);
        assert_eq!(serde_json::to_string(&row).unwrap(), r#"{"b":"x","a":2.0}"#);
    }
}
