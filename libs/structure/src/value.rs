//! Field addressing and null-tolerant accessors

use std::fmt;

use serde_json::Value;

/// Address of a field inside an entry: an object key or a positional index
/// (OHLCV-style rows are plain arrays).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key<'a> {
    Name(&'a str),
    Index(usize),
}

impl fmt::Display for Key<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => write!(f, "{name}"),
            Self::Index(index) => write!(f, "{index}"),
        }
    }
}

/// Resolve a field, collapsing both "key absent" and "value is null" to
/// `None`.
pub fn safe_value<'v>(entry: &'v Value, key: Key<'_>) -> Option<&'v Value> {
    let found = match key {
        Key::Name(name) => entry.get(name),
        Key::Index(index) => entry.get(index),
    };
    found.filter(|value| !value.is_null())
}

/// Resolve a field as a string. JSON numbers render as their decimal
/// literal, so a venue that returns `"cost": 0.15` and one that returns
/// `"cost": "0.15"` compare identically downstream.
pub fn safe_string(entry: &Value, key: Key<'_>) -> Option<String> {
    match safe_value(entry, key)? {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn resolves_names_and_indices() {
        let object = json!({ "price": "100.5" });
        let row = json!([1609459200000i64, "open"]);

        assert_eq!(
            safe_value(&object, Key::Name("price")),
            Some(&json!("100.5"))
        );
        assert_eq!(
            safe_value(&row, Key::Index(0)),
            Some(&json!(1609459200000i64))
        );
        assert_eq!(safe_value(&row, Key::Index(5)), None);
        assert_eq!(safe_value(&object, Key::Name("missing")), None);
    }

    #[test]
    fn null_collapses_to_none() {
        let entry = json!({ "fee": null });
        assert_eq!(safe_value(&entry, Key::Name("fee")), None);
        assert_eq!(safe_string(&entry, Key::Name("fee")), None);
    }

    #[test]
    fn numbers_render_as_decimal_literals() {
        let entry = json!({ "a": "1.5", "b": 1.5, "c": 42, "d": [1] });
        assert_eq!(safe_string(&entry, Key::Name("a")), Some("1.5".into()));
        assert_eq!(safe_string(&entry, Key::Name("b")), Some("1.5".into()));
        assert_eq!(safe_string(&entry, Key::Name("c")), Some("42".into()));
        // structured values have no string view
        assert_eq!(safe_string(&entry, Key::Name("d")), None);
    }
}
