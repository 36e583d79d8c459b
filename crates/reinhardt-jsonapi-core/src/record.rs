//! Helpers for reading caller-supplied records
//!
//! Records are plain `serde_json` values owned by the caller. Nothing in this
//! module mutates them; every helper answers a question about a value or a
//! field of a value.

use serde_json::{Map, Value};

/// A single caller-supplied record: a mapping of field name to value.
pub type Record = Map<String, Value>;

/// Look up `name` on a record.
///
/// Returns `None` when `record` is not an object or when the field is absent.
///
/// # Examples
///
/// ```
/// use reinhardt_jsonapi_core::record::field;
/// use serde_json::json;
///
/// let person = json!({"id": 1, "name": "Jo"});
/// assert_eq!(field(&person, "name"), Some(&json!("Jo")));
/// assert_eq!(field(&person, "age"), None);
/// assert_eq!(field(&json!(5), "id"), None);
/// ```
pub fn field<'a>(record: &'a Value, name: &str) -> Option<&'a Value> {
	record.as_object()?.get(name)
}

/// Truthiness of a reference value.
///
/// `null`, `false`, `0`, and the empty string are falsy. Every other value,
/// including empty collections, is truthy.
///
/// # Examples
///
/// ```
/// use reinhardt_jsonapi_core::record::is_truthy;
/// use serde_json::json;
///
/// assert!(is_truthy(&json!(1)));
/// assert!(is_truthy(&json!("abc")));
/// assert!(!is_truthy(&json!(0)));
/// assert!(!is_truthy(&json!("")));
/// assert!(!is_truthy(&json!(null)));
/// ```
pub fn is_truthy(value: &Value) -> bool {
	match value {
		Value::Null => false,
		Value::Bool(b) => *b,
		Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
		Value::String(s) => !s.is_empty(),
		Value::Array(_) | Value::Object(_) => true,
	}
}

/// Whether a value carries no content.
///
/// Empty collections, empty strings and `null` are blank. Scalars that are not
/// strings (numbers and booleans) are blank as well since they hold no members.
pub fn is_blank(value: &Value) -> bool {
	match value {
		Value::Null | Value::Bool(_) | Value::Number(_) => true,
		Value::String(s) => s.is_empty(),
		Value::Array(items) => items.is_empty(),
		Value::Object(map) => map.is_empty(),
	}
}

/// Strict equality between two reference values.
///
/// Numbers compare by numeric value so that `1` and `1.0` are equal. No other
/// coercion happens: `"1"` never equals `1`.
///
/// # Examples
///
/// ```
/// use reinhardt_jsonapi_core::record::strict_eq;
/// use serde_json::json;
///
/// assert!(strict_eq(&json!(1), &json!(1.0)));
/// assert!(strict_eq(&json!("a"), &json!("a")));
/// assert!(!strict_eq(&json!("1"), &json!(1)));
/// ```
pub fn strict_eq(left: &Value, right: &Value) -> bool {
	match (left, right) {
		(Value::Number(l), Value::Number(r)) => {
			if let (Some(l), Some(r)) = (l.as_i64(), r.as_i64()) {
				return l == r;
			}
			if let (Some(l), Some(r)) = (l.as_u64(), r.as_u64()) {
				return l == r;
			}
			match (l.as_f64(), r.as_f64()) {
				(Some(l), Some(r)) => l == r,
				_ => false,
			}
		}
		_ => left == right,
	}
}

/// Coerce a reference value into the string form used for resource identifiers.
///
/// Integral floats drop their fraction and `-0.0` becomes `"0"`. Floats are
/// always written in plain decimal, so magnitudes that JavaScript would print
/// in exponent form (`1e+21`, `1.5e-7`) come out in full digits instead.
///
/// # Examples
///
/// ```
/// use reinhardt_jsonapi_core::record::coerce_id;
/// use serde_json::json;
///
/// assert_eq!(coerce_id(&json!(42)), "42");
/// assert_eq!(coerce_id(&json!(3.0)), "3");
/// assert_eq!(coerce_id(&json!(2.5)), "2.5");
/// assert_eq!(coerce_id(&json!("abc")), "abc");
/// assert_eq!(coerce_id(&json!(true)), "true");
/// ```
pub fn coerce_id(value: &Value) -> String {
	match value {
		Value::String(s) => s.clone(),
		Value::Number(n) => {
			if n.is_i64() || n.is_u64() {
				n.to_string()
			} else {
				match n.as_f64() {
					Some(f) if f == 0.0 => "0".to_string(),
					Some(f) if f.fract() == 0.0 => format!("{:.0}", f),
					Some(f) => f.to_string(),
					None => n.to_string(),
				}
			}
		}
		Value::Bool(b) => b.to_string(),
		Value::Null => "null".to_string(),
		other => other.to_string(),
	}
}
