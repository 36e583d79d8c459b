//! Resource serializer
//!
//! [`ResourceSerializer`] turns plain records into a top-level document. A
//! `serialize` call runs in stages, each of which is public so hosts can reuse
//! them on their own:
//!
//! 1. [`process_data`](ResourceSerializer::process_data) builds resource
//!    objects from the primary records and resolves their relationship
//!    linkages against the `included` bag;
//! 2. [`process_included`](ResourceSerializer::process_included) serializes
//!    the candidate related records with each relationship's own serializer
//!    and deduplicates them by `(type, id)`;
//! 3. [`process_top_level_links`](ResourceSerializer::process_top_level_links)
//!    keeps only the recognised top-level link names;
//! 4. the document is assembled and validated.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use reinhardt_jsonapi_core::document::{RESOURCE_LINK_NAMES, TOP_LEVEL_LINK_NAMES};
use reinhardt_jsonapi_core::record::{coerce_id, is_blank, is_truthy};
use reinhardt_jsonapi_core::relations::{Relationship, TargetIdentity};
use reinhardt_jsonapi_core::{
	JsonApiError, JsonApiResult, PrimaryData, Record, RelationshipLinkage, ResourceObject,
	TopLevelDocument,
};
use serde_json::{Map, Value};

use crate::config::SerializerConfig;
use crate::input::DocumentInput;
use crate::registry::SerializerRegistry;
use crate::schema::{RelationshipSchema, ResourceSchema};

/// A relationship whose related serializer has been resolved for one call
struct ResolvedRelationship<'a> {
	name: &'a str,
	relationship: &'a Relationship,
	serializer: Arc<ResourceSerializer>,
	candidates: &'a Value,
}

/// Serializer for one resource type
///
/// # Examples
///
/// ```
/// use reinhardt_jsonapi_core::relations;
/// use reinhardt_jsonapi_serializers::{
///     DocumentInput, RelationshipSchema, ResourceSchema, ResourceSerializer, SerializerRef,
/// };
/// use serde_json::json;
///
/// let address = ResourceSerializer::new("address", ResourceSchema::new());
/// let person = ResourceSerializer::new(
///     "person",
///     ResourceSchema::new().attributes(["name"]).relationship(
///         "address",
///         RelationshipSchema::new(address, relations::has_many("personId")),
///     ),
/// );
///
/// let document = person
///     .serialize(
///         &DocumentInput::new()
///             .with_data(json!({"id": 1, "name": "Jo"}))
///             .with_included("address", json!([{"id": 9, "personId": 1}])),
///     )
///     .unwrap();
///
/// assert_eq!(
///     document.to_value().unwrap(),
///     json!({
///         "data": {
///             "type": "person",
///             "id": "1",
///             "attributes": {"name": "Jo"},
///             "relationships": {"address": {"data": [{"type": "address", "id": "9"}]}}
///         },
///         "included": [{"type": "address", "id": "9"}]
///     })
/// );
/// ```
#[derive(Debug, Clone)]
pub struct ResourceSerializer {
	resource_type: String,
	schema: ResourceSchema,
	config: SerializerConfig,
}

impl ResourceSerializer {
	/// Create a serializer with the default configuration
	pub fn new(resource_type: impl Into<String>, schema: ResourceSchema) -> Self {
		Self::with_config(resource_type, schema, SerializerConfig::default())
	}

	/// Create a serializer with an explicit configuration
	pub fn with_config(
		resource_type: impl Into<String>,
		schema: ResourceSchema,
		config: SerializerConfig,
	) -> Self {
		Self {
			resource_type: resource_type.into(),
			schema,
			config,
		}
	}

	pub fn resource_type(&self) -> &str {
		&self.resource_type
	}

	pub fn ref_field(&self) -> &str {
		&self.config.ref_field
	}

	pub fn attributes(&self) -> &[String] {
		self.schema.attribute_list()
	}

	pub fn relationships(&self) -> &BTreeMap<String, RelationshipSchema> {
		self.schema.relationships()
	}

	pub fn schema(&self) -> &ResourceSchema {
		&self.schema
	}

	pub fn config(&self) -> &SerializerConfig {
		&self.config
	}

	pub fn registry(&self) -> &SerializerRegistry {
		&self.config.registry
	}

	/// Type and ref field other serializers use to identify this resource
	pub fn target_identity(&self) -> TargetIdentity<'_> {
		TargetIdentity::new(&self.resource_type, &self.config.ref_field)
	}

	/// Serialize `input` into a validated top-level document
	///
	/// Fails with [`JsonApiError::DataReference`] when a primary or included
	/// record lacks the ref field, [`JsonApiError::SerializerNotRegistered`]
	/// when a named serializer is missing, and
	/// [`JsonApiError::TopLevelDocument`] when none of `data`, `errors`, `meta`
	/// would be present.
	pub fn serialize(&self, input: &DocumentInput) -> JsonApiResult<TopLevelDocument> {
		let included_bag = input.included.as_ref();

		let data = self.process_data(input.data.as_ref(), included_bag)?;
		let included = self.process_included(included_bag)?;
		let links = self.process_top_level_links(input.links.as_ref());

		tracing::debug!(
			resource_type = %self.resource_type,
			has_data = data.is_some(),
			included = included.as_ref().map_or(0, Vec::len),
			"assembling document"
		);

		TopLevelDocument::assemble(
			data,
			included,
			input.meta.clone(),
			links,
			input.errors.clone(),
		)
	}

	/// Build the primary data of a document
	///
	/// - absent input stays absent;
	/// - a collection is serialized member by member, keeping its shape (an
	///   empty one stays empty, `null` members stay `null`, nested collections
	///   recurse);
	/// - any other blank value (`null`, `{}`, `""`, numbers, booleans) becomes
	///   `null`;
	/// - anything else is serialized as a single record.
	pub fn process_data(
		&self,
		data: Option<&Value>,
		included: Option<&Map<String, Value>>,
	) -> JsonApiResult<Option<PrimaryData>> {
		let Some(data) = data else {
			return Ok(None);
		};

		let related = if is_blank(data) {
			Vec::new()
		} else {
			self.resolve_relationships(included)?
		};
		self.process_value(data, &related).map(Some)
	}

	fn process_value(
		&self,
		data: &Value,
		related: &[ResolvedRelationship<'_>],
	) -> JsonApiResult<PrimaryData> {
		match data {
			Value::Array(items) => items
				.iter()
				.map(|item| self.process_value(item, related))
				.collect::<JsonApiResult<Vec<_>>>()
				.map(PrimaryData::Many),
			blank if is_blank(blank) => Ok(PrimaryData::Null),
			record => self.process_record(record, related).map(PrimaryData::Single),
		}
	}

	/// Serialize every relationship's candidate records with that
	/// relationship's serializer, flattened and deduplicated by `(type, id)`
	///
	/// Only relationships declared in the schema and present in the bag are
	/// considered. Returns `None` when nothing is left to include.
	pub fn process_included(
		&self,
		included: Option<&Map<String, Value>>,
	) -> JsonApiResult<Option<Vec<ResourceObject>>> {
		let related = self.resolve_relationships(included)?;

		let mut seen = HashSet::new();
		let mut resources = Vec::new();
		for relation in related {
			let Some(primary) = relation.serializer.process_data(Some(relation.candidates), None)?
			else {
				continue;
			};
			for resource in primary.into_resources() {
				if seen.insert(resource.identifier()) {
					resources.push(resource);
				}
			}
		}

		Ok((!resources.is_empty()).then_some(resources))
	}

	/// Keep only the recognised top-level links
	pub fn process_top_level_links(
		&self,
		links: Option<&Map<String, Value>>,
	) -> Option<Map<String, Value>> {
		let links = links?;
		let selected: Map<String, Value> = TOP_LEVEL_LINK_NAMES
			.iter()
			.filter_map(|name| links.get(*name).map(|link| (name.to_string(), link.clone())))
			.collect();

		(!selected.is_empty()).then_some(selected)
	}

	/// Resolve the serializers of the relationships present in `included`
	fn resolve_relationships<'a>(
		&'a self,
		included: Option<&'a Map<String, Value>>,
	) -> JsonApiResult<Vec<ResolvedRelationship<'a>>> {
		let Some(included) = included else {
			return Ok(Vec::new());
		};

		self.schema
			.relationships()
			.iter()
			.filter_map(|(name, schema)| included.get(name).map(|candidates| (name, schema, candidates)))
			.map(|(name, schema, candidates)| -> JsonApiResult<ResolvedRelationship<'a>> {
				Ok(ResolvedRelationship {
					name,
					relationship: schema.relationship(),
					serializer: schema.serializer().resolve(self.registry())?,
					candidates,
				})
			})
			.collect()
	}

	/// Build the resource object of a single record
	fn process_record(
		&self,
		record: &Value,
		related: &[ResolvedRelationship<'_>],
	) -> JsonApiResult<ResourceObject> {
		let ref_field = self.ref_field();
		let object = record
			.as_object()
			.ok_or_else(|| JsonApiError::data_reference(ref_field))?;
		let ref_value = object
			.get(ref_field)
			.filter(|value| is_truthy(value))
			.ok_or_else(|| JsonApiError::data_reference(ref_field))?;

		let attributes: Map<String, Value> = self
			.schema
			.attribute_list()
			.iter()
			.filter_map(|name| object.get(name).map(|value| (name.clone(), value.clone())))
			.collect();

		Ok(
			ResourceObject::new(&self.resource_type, ref_field, coerce_id(ref_value))
				.with_attributes(attributes)
				.with_relationships(self.process_relationships(record, related))
				.with_links(self.process_resource_links(object)),
		)
	}

	/// Resolve the linkage of every relationship for one record, dropping
	/// relationships without a match
	fn process_relationships(
		&self,
		record: &Value,
		related: &[ResolvedRelationship<'_>],
	) -> BTreeMap<String, RelationshipLinkage> {
		related
			.iter()
			.filter_map(|relation| {
				let referencee = relation.relationship.referencee(record, self.ref_field());
				let linkage = relation.relationship.resolve(
					&relation.serializer.target_identity(),
					referencee,
					relation.candidates,
				);
				match linkage {
					Some(linkage) if !linkage.is_empty() => Some((relation.name.to_string(), linkage)),
					_ => {
						tracing::trace!(relationship = relation.name, "no related records matched");
						None
					}
				}
			})
			.collect()
	}

	/// Evaluate the resource-level links declared in the schema
	fn process_resource_links(&self, record: &Record) -> Map<String, Value> {
		let links = self.schema.links();
		RESOURCE_LINK_NAMES
			.iter()
			.filter_map(|name| links.get(*name).map(|link| (name.to_string(), link(record))))
			.collect()
	}
}
