//! Resource and relationship schemas
//!
//! A [`ResourceSchema`] declares which attributes a resource exposes, which
//! relationships it has and which links it computes. It is built once and
//! reused across every `serialize` call of the serializer that owns it.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use reinhardt_jsonapi_core::relations::Relationship;
use reinhardt_jsonapi_core::{JsonApiError, JsonApiResult, Record};
use serde_json::Value;

use crate::config::SerializerConfig;
use crate::registry::SerializerRegistry;
use crate::serializer::ResourceSerializer;

/// Computes a link value from the record being serialized
pub type LinkFn = Arc<dyn Fn(&Record) -> Value + Send + Sync>;

/// Attributes, relationships and links of one resource type
///
/// # Examples
///
/// ```
/// use reinhardt_jsonapi_core::relations;
/// use reinhardt_jsonapi_serializers::{RelationshipSchema, ResourceSchema};
/// use serde_json::json;
///
/// let schema = ResourceSchema::new()
///     .attributes(["name", "email"])
///     .relationship("address", RelationshipSchema::new("address", relations::has_many("personId")))
///     .link("self", |record| json!(format!("/people/{}", record["id"])));
///
/// assert_eq!(schema.attribute_list(), ["name", "email"]);
/// assert!(schema.relationship_schema("address").is_some());
/// ```
#[derive(Clone, Default)]
pub struct ResourceSchema {
	attributes: Vec<String>,
	relationships: BTreeMap<String, RelationshipSchema>,
	links: BTreeMap<String, LinkFn>,
}

impl ResourceSchema {
	pub fn new() -> Self {
		Self::default()
	}

	/// Expose every field in `names` as an attribute
	pub fn attributes<I, S>(mut self, names: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.attributes.extend(names.into_iter().map(Into::into));
		self
	}

	/// Expose a single field as an attribute
	pub fn attribute(mut self, name: impl Into<String>) -> Self {
		self.attributes.push(name.into());
		self
	}

	/// Declare a relationship under `name`
	pub fn relationship(mut self, name: impl Into<String>, schema: RelationshipSchema) -> Self {
		self.relationships.insert(name.into(), schema);
		self
	}

	/// Declare a link computed from each record
	pub fn link<F>(mut self, name: impl Into<String>, link: F) -> Self
	where
		F: Fn(&Record) -> Value + Send + Sync + 'static,
	{
		self.links.insert(name.into(), Arc::new(link));
		self
	}

	pub fn attribute_list(&self) -> &[String] {
		&self.attributes
	}

	pub fn relationships(&self) -> &BTreeMap<String, RelationshipSchema> {
		&self.relationships
	}

	pub fn relationship_schema(&self, name: &str) -> Option<&RelationshipSchema> {
		self.relationships.get(name)
	}

	pub fn links(&self) -> &BTreeMap<String, LinkFn> {
		&self.links
	}
}

impl fmt::Debug for ResourceSchema {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ResourceSchema")
			.field("attributes", &self.attributes)
			.field("relationships", &self.relationships)
			.field("links", &self.links.keys().collect::<Vec<_>>())
			.finish()
	}
}

/// A relationship declaration: how to find the related serializer and how to
/// match related records
#[derive(Debug, Clone)]
pub struct RelationshipSchema {
	serializer: SerializerRef,
	relationship: Relationship,
}

impl RelationshipSchema {
	pub fn new(serializer: impl Into<SerializerRef>, relationship: Relationship) -> Self {
		Self {
			serializer: serializer.into(),
			relationship,
		}
	}

	pub fn serializer(&self) -> &SerializerRef {
		&self.serializer
	}

	pub fn relationship(&self) -> &Relationship {
		&self.relationship
	}
}

/// Serializer definition built on demand from an inline schema
#[derive(Debug, Clone)]
pub struct InlineSerializer {
	pub resource_type: String,
	pub schema: ResourceSchema,
	pub config: SerializerConfig,
}

/// Where the serializer on the related side of a relationship comes from
#[derive(Debug, Clone)]
pub enum SerializerRef {
	/// A serializer instance embedded directly in the schema
	Embedded(Arc<ResourceSerializer>),
	/// A serializer looked up by case-insensitive name at serialize time
	Named(String),
	/// A serializer constructed from an inline definition at serialize time
	Inline(Box<InlineSerializer>),
}

impl SerializerRef {
	/// Refer to a registered serializer by name
	pub fn named(name: impl Into<String>) -> Self {
		SerializerRef::Named(name.into())
	}

	/// Define the related serializer inline with the default configuration
	pub fn inline(resource_type: impl Into<String>, schema: ResourceSchema) -> Self {
		Self::inline_with_config(resource_type, schema, SerializerConfig::default())
	}

	/// Define the related serializer inline with its own configuration
	pub fn inline_with_config(
		resource_type: impl Into<String>,
		schema: ResourceSchema,
		config: SerializerConfig,
	) -> Self {
		SerializerRef::Inline(Box::new(InlineSerializer {
			resource_type: resource_type.into(),
			schema,
			config,
		}))
	}

	/// Produce the serializer this reference points at
	///
	/// Named references are looked up in `registry`; a missing name fails with
	/// [`JsonApiError::SerializerNotRegistered`].
	pub fn resolve(&self, registry: &SerializerRegistry) -> JsonApiResult<Arc<ResourceSerializer>> {
		match self {
			SerializerRef::Embedded(serializer) => Ok(Arc::clone(serializer)),
			SerializerRef::Named(name) => match registry.get(name) {
				Some(serializer) => {
					tracing::debug!(name = %name, resource_type = serializer.resource_type(), "resolved named serializer");
					Ok(serializer)
				}
				None => {
					tracing::warn!(name = %name, "serializer is not registered");
					Err(JsonApiError::serializer_not_registered(name.as_str()))
				}
			},
			SerializerRef::Inline(inline) => Ok(Arc::new(ResourceSerializer::with_config(
				inline.resource_type.clone(),
				inline.schema.clone(),
				inline.config.clone(),
			))),
		}
	}
}

impl From<Arc<ResourceSerializer>> for SerializerRef {
	fn from(serializer: Arc<ResourceSerializer>) -> Self {
		SerializerRef::Embedded(serializer)
	}
}

impl From<ResourceSerializer> for SerializerRef {
	fn from(serializer: ResourceSerializer) -> Self {
		SerializerRef::Embedded(Arc::new(serializer))
	}
}

impl From<&str> for SerializerRef {
	fn from(name: &str) -> Self {
		SerializerRef::named(name)
	}
}

impl From<String> for SerializerRef {
	fn from(name: String) -> Self {
		SerializerRef::Named(name)
	}
}

impl From<InlineSerializer> for SerializerRef {
	fn from(inline: InlineSerializer) -> Self {
		SerializerRef::Inline(Box::new(inline))
	}
}
