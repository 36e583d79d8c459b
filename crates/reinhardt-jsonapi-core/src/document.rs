//! Top-level document model
//!
//! The types in this module are the output side of serialization: resource
//! objects, relationship linkages and the top-level document that wraps them.
//! Absent optional members are never rendered, not even as `null`.

use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{JsonApiError, JsonApiResult};
use crate::record::is_blank;

/// Link names recognised at the top level of a document
pub const TOP_LEVEL_LINK_NAMES: [&str; 7] = [
	"self",
	"related",
	"pagination",
	"first",
	"last",
	"prev",
	"next",
];

/// Link names evaluated for each resource object
pub const RESOURCE_LINK_NAMES: [&str; 2] = ["self", "related"];

/// Identity of a related resource: its type and string id
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResourceIdentifier {
	#[serde(rename = "type")]
	pub resource_type: String,
	pub id: String,
}

impl ResourceIdentifier {
	/// Create a new identifier
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_jsonapi_core::document::ResourceIdentifier;
	///
	/// let identifier = ResourceIdentifier::new("person", "3");
	/// assert_eq!(identifier.resource_type, "person");
	/// assert_eq!(identifier.id, "3");
	/// ```
	pub fn new(resource_type: impl Into<String>, id: impl Into<String>) -> Self {
		Self {
			resource_type: resource_type.into(),
			id: id.into(),
		}
	}
}

/// The `data` member of a relationship linkage
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LinkageData {
	/// To-one linkage
	Single(ResourceIdentifier),
	/// To-many linkage, deduplicated by `(type, id)`
	Many(Vec<ResourceIdentifier>),
}

/// Relationship linkage: `{"data": identifier | [identifier]}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelationshipLinkage {
	pub data: LinkageData,
}

impl RelationshipLinkage {
	/// Linkage to a single related resource
	pub fn single(identifier: ResourceIdentifier) -> Self {
		Self {
			data: LinkageData::Single(identifier),
		}
	}

	/// Linkage to a collection of related resources
	pub fn many(identifiers: Vec<ResourceIdentifier>) -> Self {
		Self {
			data: LinkageData::Many(identifiers),
		}
	}

	/// True for a to-many linkage without any identifiers
	pub fn is_empty(&self) -> bool {
		matches!(&self.data, LinkageData::Many(ids) if ids.is_empty())
	}

	/// Iterate over the identifiers held by this linkage
	pub fn identifiers(&self) -> impl Iterator<Item = &ResourceIdentifier> {
		let ids: &[ResourceIdentifier] = match &self.data {
			LinkageData::Single(id) => std::slice::from_ref(id),
			LinkageData::Many(ids) => ids.as_slice(),
		};
		ids.iter()
	}
}

/// A serialized resource: type, identifier and optional members
///
/// The identifier is rendered under the configured reference field name, so a
/// serializer configured with `ref_field = "uuid"` emits `{"type": .., "uuid": ..}`.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceObject {
	resource_type: String,
	ref_field: String,
	id: String,
	attributes: Option<Map<String, Value>>,
	relationships: Option<BTreeMap<String, RelationshipLinkage>>,
	links: Option<Map<String, Value>>,
}

impl ResourceObject {
	/// Create a resource object with no optional members
	pub fn new(
		resource_type: impl Into<String>,
		ref_field: impl Into<String>,
		id: impl Into<String>,
	) -> Self {
		Self {
			resource_type: resource_type.into(),
			ref_field: ref_field.into(),
			id: id.into(),
			attributes: None,
			relationships: None,
			links: None,
		}
	}

	/// Set the attributes member; an empty map leaves it absent
	pub fn with_attributes(mut self, attributes: Map<String, Value>) -> Self {
		self.attributes = (!attributes.is_empty()).then_some(attributes);
		self
	}

	/// Set the relationships member; an empty map leaves it absent
	pub fn with_relationships(mut self, relationships: BTreeMap<String, RelationshipLinkage>) -> Self {
		self.relationships = (!relationships.is_empty()).then_some(relationships);
		self
	}

	/// Set the links member; an empty map leaves it absent
	pub fn with_links(mut self, links: Map<String, Value>) -> Self {
		self.links = (!links.is_empty()).then_some(links);
		self
	}

	pub fn resource_type(&self) -> &str {
		&self.resource_type
	}

	pub fn ref_field(&self) -> &str {
		&self.ref_field
	}

	pub fn id(&self) -> &str {
		&self.id
	}

	pub fn attributes(&self) -> Option<&Map<String, Value>> {
		self.attributes.as_ref()
	}

	pub fn relationships(&self) -> Option<&BTreeMap<String, RelationshipLinkage>> {
		self.relationships.as_ref()
	}

	pub fn links(&self) -> Option<&Map<String, Value>> {
		self.links.as_ref()
	}

	/// The `(type, id)` pair identifying this resource
	pub fn identifier(&self) -> ResourceIdentifier {
		ResourceIdentifier::new(&self.resource_type, &self.id)
	}
}

impl Serialize for ResourceObject {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		let len = 2
			+ usize::from(self.attributes.is_some())
			+ usize::from(self.relationships.is_some())
			+ usize::from(self.links.is_some());
		let mut map = serializer.serialize_map(Some(len))?;
		map.serialize_entry("type", &self.resource_type)?;
		map.serialize_entry(&self.ref_field, &self.id)?;
		if let Some(attributes) = &self.attributes {
			map.serialize_entry("attributes", attributes)?;
		}
		if let Some(relationships) = &self.relationships {
			map.serialize_entry("relationships", relationships)?;
		}
		if let Some(links) = &self.links {
			map.serialize_entry("links", links)?;
		}
		map.end()
	}
}

/// Primary data of a document
///
/// `Null` is a legitimate value (a missing single resource) and is distinct
/// from an absent `data` member, which is represented by `Option::None` on the
/// document. A collection keeps the shape of its input, so members may be
/// `null` or nested collections.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PrimaryData {
	Null,
	Single(ResourceObject),
	Many(Vec<PrimaryData>),
}

impl PrimaryData {
	/// True for `null` and for an empty collection
	pub fn is_empty(&self) -> bool {
		match self {
			PrimaryData::Null => true,
			PrimaryData::Single(_) => false,
			PrimaryData::Many(items) => items.is_empty(),
		}
	}

	/// Flatten into a list of resource objects, descending into nested
	/// collections; `null` entries yield none
	pub fn into_resources(self) -> Vec<ResourceObject> {
		let mut resources = Vec::new();
		self.collect_resources(&mut resources);
		resources
	}

	fn collect_resources(self, resources: &mut Vec<ResourceObject>) {
		match self {
			PrimaryData::Null => {}
			PrimaryData::Single(resource) => resources.push(resource),
			PrimaryData::Many(items) => {
				for item in items {
					item.collect_resources(resources);
				}
			}
		}
	}
}

/// The top-level document produced by a serializer
///
/// Construct it through [`TopLevelDocument::assemble`], which enforces the
/// structural rules of the format:
///
/// - at least one of `data`, `errors`, `meta` is present;
/// - `included` is present only alongside non-empty `data`;
/// - absent members are omitted from the rendered output.
///
/// # Examples
///
/// ```
/// use reinhardt_jsonapi_core::document::TopLevelDocument;
/// use serde_json::json;
///
/// let document = TopLevelDocument::assemble(None, None, Some(json!({"total": 0})), None, None)
///     .unwrap();
/// assert_eq!(document.to_value().unwrap(), json!({"meta": {"total": 0}}));
///
/// assert!(TopLevelDocument::assemble(None, None, None, None, None).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopLevelDocument {
	#[serde(skip_serializing_if = "Option::is_none")]
	data: Option<PrimaryData>,
	#[serde(skip_serializing_if = "Option::is_none")]
	included: Option<Vec<ResourceObject>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	meta: Option<Value>,
	#[serde(skip_serializing_if = "Option::is_none")]
	links: Option<Map<String, Value>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	errors: Option<Value>,
}

impl TopLevelDocument {
	/// Assemble a document from its members, validating the structural rules
	///
	/// `meta` and `errors` only count towards the "one of data, errors, meta"
	/// rule when they carry content.
	pub fn assemble(
		data: Option<PrimaryData>,
		included: Option<Vec<ResourceObject>>,
		meta: Option<Value>,
		links: Option<Map<String, Value>>,
		errors: Option<Value>,
	) -> JsonApiResult<Self> {
		let has_errors = errors.as_ref().is_some_and(|e| !is_blank(e));
		let has_meta = meta.as_ref().is_some_and(|m| !is_blank(m));

		if data.is_none() && !has_errors && !has_meta {
			return Err(JsonApiError::TopLevelDocument);
		}

		let included = match &data {
			Some(primary) if !primary.is_empty() => included,
			_ => None,
		};

		Ok(Self {
			data,
			included,
			meta,
			links,
			errors,
		})
	}

	pub fn data(&self) -> Option<&PrimaryData> {
		self.data.as_ref()
	}

	pub fn included(&self) -> Option<&[ResourceObject]> {
		self.included.as_deref()
	}

	pub fn meta(&self) -> Option<&Value> {
		self.meta.as_ref()
	}

	pub fn links(&self) -> Option<&Map<String, Value>> {
		self.links.as_ref()
	}

	pub fn errors(&self) -> Option<&Value> {
		self.errors.as_ref()
	}

	/// Render the document as a `serde_json::Value`
	pub fn to_value(&self) -> JsonApiResult<Value> {
		Ok(serde_json::to_value(self)?)
	}

	/// Render the document as compact JSON text
	pub fn to_json(&self) -> JsonApiResult<String> {
		Ok(serde_json::to_string(self)?)
	}

	/// Render the document as pretty-printed JSON text
	pub fn to_json_pretty(&self) -> JsonApiResult<String> {
		Ok(serde_json::to_string_pretty(self)?)
	}
}
