//! Serializer configuration
//!
//! Only two options exist: the name of the reference field on records, and
//! the registry used to resolve serializers referenced by name.

use serde::{Deserialize, Serialize};

use crate::registry::SerializerRegistry;

/// Default name of the field holding a record's unique identifier
pub const DEFAULT_REF_FIELD: &str = "id";

fn default_ref_field() -> String {
	DEFAULT_REF_FIELD.to_string()
}

/// Configuration of a [`ResourceSerializer`](crate::ResourceSerializer)
///
/// The registry defaults to the process-wide [`SerializerRegistry::global`]
/// handle. Only `ref_field` takes part in (de)serialization, so a config can be
/// loaded from a settings file; the registry is always the shared default after
/// loading.
///
/// # Examples
///
/// ```
/// use reinhardt_jsonapi_serializers::{SerializerConfig, SerializerRegistry};
///
/// let registry = SerializerRegistry::new();
/// let config = SerializerConfig::new()
///     .with_ref_field("uuid")
///     .with_registry(registry.clone());
///
/// assert_eq!(config.ref_field, "uuid");
/// assert!(config.registry.shares_storage_with(&registry));
///
/// let loaded: SerializerConfig = serde_json::from_str("{}").unwrap();
/// assert_eq!(loaded.ref_field, "id");
/// ```
#[non_exhaustive]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerializerConfig {
	/// Field on each record holding its unique identifier
	#[serde(default = "default_ref_field")]
	pub ref_field: String,

	/// Registry used for relationships that name their serializer
	#[serde(skip, default = "SerializerRegistry::global")]
	pub registry: SerializerRegistry,
}

impl Default for SerializerConfig {
	fn default() -> Self {
		Self {
			ref_field: default_ref_field(),
			registry: SerializerRegistry::global(),
		}
	}
}

impl SerializerConfig {
	/// Create a configuration with default values
	pub fn new() -> Self {
		Self::default()
	}

	/// Use `ref_field` as the identifier field
	pub fn with_ref_field(mut self, ref_field: impl Into<String>) -> Self {
		self.ref_field = ref_field.into();
		self
	}

	/// Resolve named serializers through `registry`
	///
	/// Registering the resulting serializer in that same registry creates an
	/// `Arc` cycle; see [`SerializerRegistry`].
	pub fn with_registry(mut self, registry: SerializerRegistry) -> Self {
		self.registry = registry;
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_default_config() {
		let config = SerializerConfig::default();

		assert_eq!(config.ref_field, DEFAULT_REF_FIELD);
		assert!(config.registry.shares_storage_with(&SerializerRegistry::global()));
	}

	#[rstest]
	fn test_deserialize_ref_field() {
		let config: SerializerConfig = serde_json::from_str(r#"{"ref_field": "slug"}"#).unwrap();

		assert_eq!(config.ref_field, "slug");
		assert!(config.registry.shares_storage_with(&SerializerRegistry::global()));
	}

	#[rstest]
	fn test_serialize_omits_registry() {
		let config = SerializerConfig::new().with_ref_field("uuid");

		let value = serde_json::to_value(&config).unwrap();

		assert_eq!(value, serde_json::json!({"ref_field": "uuid"}));
	}
}
