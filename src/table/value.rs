//! Primitive cell values carried by rows.

use std::fmt;

use serde::ser::{Serialize, SerializeSeq, Serializer};

/// One primitive field of a [`Row`](super::Row).
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    Text(String),
    Number(f64),
    /// ISO-8601 date or timestamp, kept as the backend sent it
    Date(String),
    List(Vec<String>),
    #[default]
    Missing,
}

impl Value {
    /// Finite numeric content, if any. Text that happens to look numeric is
    /// not treated as a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) if n.is_finite() => Some(*n),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    /// The raw string representation used for lexicographic sorting,
    /// equality filters and exports.
    pub fn raw_text(&self) -> String {
        match self {
            Value::Text(s) | Value::Date(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::List(items) => items.join(", "),
            Value::Missing => String::new(),
        }
    }

    /// Whether a selected filter value matches this field.
    ///
    /// Lists match on membership, everything else on exact equality of the
    /// raw text.
    pub fn matches(&self, selected: &str) -> bool {
        match self {
            Value::List(items) => items.iter().any(|item| item == selected),
            Value::Missing => false,
            other => other.raw_text() == selected,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw_text())
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Text(s) | Value::Date(s) => serializer.serialize_str(s),
            Value::Number(n) => serializer.serialize_f64(*n),
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Missing => serializer.serialize_none(),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Text(b.to_string())
    }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Value::List(items)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Missing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_text_of_numbers_drops_trailing_zero() {
        assert_eq!(Value::Number(25.0).raw_text(), "25");
        assert_eq!(Value::Number(3.5).raw_text(), "3.5");
    }

    #[test]
    fn test_as_number_ignores_text_and_nan() {
        assert_eq!(Value::Number(1.5).as_number(), Some(1.5));
        assert_eq!(Value::Text("10".into()).as_number(), None);
        assert_eq!(Value::Number(f64::NAN).as_number(), None);
        assert_eq!(Value::Missing.as_number(), None);
    }

    #[test]
    fn test_list_matches_on_membership() {
        let categories = Value::List(vec!["ux_ui".into(), "safety".into()]);
        assert!(categories.matches("safety"));
        assert!(!categories.matches("pricing"));
    }

    #[test]
    fn test_missing_never_matches() {
        assert!(!Value::Missing.matches(""));
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(Value::from(None::<f64>), Value::Missing);
        assert_eq!(Value::from(Some(2.0)), Value::Number(2.0));
    }

    #[test]
    fn test_serialize_missing_as_null() {
        let json = serde_json::to_string(&vec![Value::Missing, Value::Number(1.0)]).unwrap();
        assert_eq!(json, "[null,1.0]");
    }
}
