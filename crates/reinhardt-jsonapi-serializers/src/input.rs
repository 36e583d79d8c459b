//! Serializer input
//!
//! [`DocumentInput`] carries everything a `serialize` call consumes. `None`
//! means the member was not supplied at all, which is distinct from an
//! explicit JSON `null`.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Keeps an explicit `null` as `Some(Value::Null)` instead of collapsing it to
/// `None`; an absent key still falls back to `None` through `#[serde(default)]`.
fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
	D: Deserializer<'de>,
{
	Value::deserialize(deserializer).map(Some)
}

/// Input of [`ResourceSerializer::serialize`](crate::ResourceSerializer::serialize)
///
/// # Examples
///
/// ```
/// use reinhardt_jsonapi_serializers::DocumentInput;
/// use serde_json::json;
///
/// let input = DocumentInput::new()
///     .with_data(json!({"id": 1, "name": "Jo"}))
///     .with_included("address", json!([{"id": 9, "personId": 1}]))
///     .with_link("self", json!("/people/1"));
///
/// assert!(input.data.is_some());
/// assert!(input.included.as_ref().unwrap().contains_key("address"));
///
/// let parsed: DocumentInput = serde_json::from_str(r#"{"data": null}"#).unwrap();
/// assert_eq!(parsed.data, Some(json!(null)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DocumentInput {
	/// Primary record or records
	#[serde(default, deserialize_with = "deserialize_present")]
	pub data: Option<Value>,

	/// Candidate related records keyed by relationship name
	#[serde(default)]
	pub included: Option<Map<String, Value>>,

	/// Passed through verbatim
	#[serde(default, deserialize_with = "deserialize_present")]
	pub meta: Option<Value>,

	/// Top-level links keyed by link name
	#[serde(default)]
	pub links: Option<Map<String, Value>>,

	/// Passed through verbatim
	#[serde(default, deserialize_with = "deserialize_present")]
	pub errors: Option<Value>,
}

impl DocumentInput {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_data(mut self, data: Value) -> Self {
		self.data = Some(data);
		self
	}

	/// Add the candidate records of one relationship
	pub fn with_included(mut self, relationship: impl Into<String>, records: Value) -> Self {
		self.included
			.get_or_insert_with(Map::new)
			.insert(relationship.into(), records);
		self
	}

	pub fn with_meta(mut self, meta: Value) -> Self {
		self.meta = Some(meta);
		self
	}

	/// Add a single top-level link
	pub fn with_link(mut self, name: impl Into<String>, link: Value) -> Self {
		self.links
			.get_or_insert_with(Map::new)
			.insert(name.into(), link);
		self
	}

	pub fn with_errors(mut self, errors: Value) -> Self {
		self.errors = Some(errors);
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_absent_and_null_data_differ() {
		let absent: DocumentInput = serde_json::from_str("{}").unwrap();
		let null: DocumentInput = serde_json::from_str(r#"{"data": null}"#).unwrap();

		assert_eq!(absent.data, None);
		assert_eq!(null.data, Some(Value::Null));
	}

	#[rstest]
	fn test_deserialize_full_input() {
		let input: DocumentInput = serde_json::from_value(json!({
			"data": [{"id": 1}],
			"included": {"address": {"id": 2}},
			"meta": {"count": 1},
			"links": {"self": "/people"},
			"errors": []
		}))
		.unwrap();

		assert_eq!(input.data, Some(json!([{"id": 1}])));
		assert_eq!(input.included.unwrap()["address"], json!({"id": 2}));
		assert_eq!(input.meta, Some(json!({"count": 1})));
		assert_eq!(input.links.unwrap()["self"], json!("/people"));
		assert_eq!(input.errors, Some(json!([])));
	}

	#[rstest]
	fn test_builder_accumulates_included() {
		let input = DocumentInput::new()
			.with_included("address", json!([]))
			.with_included("phone", json!({"id": 3}));

		assert_eq!(input.included.unwrap().len(), 2);
	}
}
