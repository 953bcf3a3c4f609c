//! Value category classification
//!
//! Different runtimes hand the same logical field back with different native
//! types: integers where another API returns floats, 0/1 where another
//! returns a real boolean. Conformance checks therefore compare coarse
//! *categories* of values, never native types.

use std::fmt;

use serde_json::Value;

/// Coarse category of an untyped response value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueCategory {
    Null,
    String,
    Numeric,
    Boolean,
    Array,
    Object,
}

impl fmt::Display for ValueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::String => write!(f, "string"),
            Self::Numeric => write!(f, "numeric"),
            Self::Boolean => write!(f, "boolean"),
            Self::Array => write!(f, "array"),
            Self::Object => write!(f, "object"),
        }
    }
}

/// Classify a value into its category tag.
pub fn classify(value: &Value) -> ValueCategory {
    match value {
        Value::Null => ValueCategory::Null,
        Value::String(_) => ValueCategory::String,
        Value::Number(_) => ValueCategory::Numeric,
        Value::Bool(_) => ValueCategory::Boolean,
        Value::Array(_) => ValueCategory::Array,
        Value::Object(_) => ValueCategory::Object,
    }
}

/// Whether an entry field's category is acceptable for a format exemplar.
///
/// Null on either side always matches: null is the universal "not
/// applicable" value and required-ness is checked separately. Boolean on
/// either side always matches as well, because booleans have no portable
/// representation across venue runtimes (0/1, truthy primitives, or a real
/// bool are all in circulation). The check only discriminates among string,
/// numeric, array, and object.
pub fn compatible(entry: ValueCategory, format: ValueCategory) -> bool {
    use ValueCategory::*;
    match (entry, format) {
        (Null, _) | (_, Null) => true,
        (Boolean, _) | (_, Boolean) => true,
        (String, String) | (Numeric, Numeric) | (Array, Array) | (Object, Object) => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn classifies_every_variant() {
        assert_eq!(classify(&Value::Null), ValueCategory::Null);
        assert_eq!(classify(&json!("x")), ValueCategory::String);
        assert_eq!(classify(&json!(1)), ValueCategory::Numeric);
        assert_eq!(classify(&json!(1.5)), ValueCategory::Numeric);
        assert_eq!(classify(&json!(true)), ValueCategory::Boolean);
        assert_eq!(classify(&json!([])), ValueCategory::Array);
        assert_eq!(classify(&json!({})), ValueCategory::Object);
    }

    #[test]
    fn null_matches_everything() {
        use ValueCategory::*;
        for category in [Null, String, Numeric, Boolean, Array, Object] {
            assert!(compatible(Null, category));
            assert!(compatible(category, Null));
        }
    }

    #[test]
    fn boolean_matches_everything() {
        use ValueCategory::*;
        for category in [Null, String, Numeric, Boolean, Array, Object] {
            assert!(compatible(Boolean, category));
            assert!(compatible(category, Boolean));
        }
    }

    #[test]
    fn non_wildcard_categories_must_agree() {
        use ValueCategory::*;
        assert!(compatible(String, String));
        assert!(compatible(Numeric, Numeric));
        assert!(compatible(Array, Array));
        assert!(compatible(Object, Object));

        assert!(!compatible(String, Numeric));
        assert!(!compatible(Numeric, String));
        assert!(!compatible(Array, Object));
        assert!(!compatible(Object, Array));
        assert!(!compatible(String, Array));
        assert!(!compatible(Numeric, Object));
    }
}
