//! # Reinhardt JSON:API
//!
//! JSON:API document serialization for Reinhardt, in the spirit of Django REST
//! Framework serializers.
//!
//! Given a schema describing a resource type (which attributes to expose, which
//! relationships exist and how they are keyed, which links to compute) plus the
//! primary records and a bag of candidate related records, a
//! [`ResourceSerializer`] produces a complete top-level document:
//!
//! - resource objects with string identifiers, picked attributes and links;
//! - relationship linkages resolved by matching reference values;
//! - side-loaded `included` resources, deduplicated by `(type, id)`;
//! - the structural rules of the format enforced on every document.
//!
//! Records are never fetched, stored or validated beyond structural checks:
//! related records must be supplied by the caller.
//!
//! ## Crates
//!
//! - [`core`] (`reinhardt-jsonapi-core`) - document model, errors, reference
//!   matching and relationship resolution
//! - [`serializers`] (`reinhardt-jsonapi-serializers`) - schemas,
//!   configuration, the serializer engine and the named serializer registry
//!
//! ## Quick Example
//!
//! ```rust
//! use reinhardt_jsonapi::prelude::*;
//! use serde_json::json;
//!
//! let address = ResourceSerializer::new("address", ResourceSchema::new());
//! let person = ResourceSerializer::new(
//!     "person",
//!     ResourceSchema::new()
//!         .attributes(["name"])
//!         .relationship("address", RelationshipSchema::new(address, relations::has_many("personId"))),
//! );
//!
//! let document = person
//!     .serialize(
//!         &DocumentInput::new()
//!             .with_data(json!({"id": 1, "name": "Jo"}))
//!             .with_included("address", json!([{"id": 9, "personId": 1}])),
//!     )
//!     .unwrap();
//!
//! assert_eq!(document.included().unwrap().len(), 1);
//! ```

pub use reinhardt_jsonapi_core as core;
pub use reinhardt_jsonapi_serializers as serializers;

pub use reinhardt_jsonapi_core::{
	Cardinality, JsonApiError, JsonApiErrorKind, JsonApiResult, LinkageData, PrimaryData,
	RESOURCE_LINK_NAMES, Record, Relationship, RelationshipLinkage, ResourceIdentifier,
	ResourceObject, TOP_LEVEL_LINK_NAMES, TargetIdentity, TopLevelDocument, relations,
};
pub use reinhardt_jsonapi_serializers::{
	DEFAULT_REF_FIELD, DocumentInput, InlineSerializer, LinkFn, RelationshipSchema, ResourceSchema,
	ResourceSerializer, SerializerConfig, SerializerRef, SerializerRegistry,
};

/// Re-exports of commonly used types
pub mod prelude {
	pub use crate::{
		Cardinality, DocumentInput, JsonApiError, JsonApiErrorKind, JsonApiResult, PrimaryData,
		Relationship, RelationshipSchema, ResourceObject, ResourceSchema, ResourceSerializer,
		SerializerConfig, SerializerRef, SerializerRegistry, TopLevelDocument, relations,
	};

	// External
	pub use serde::{Deserialize, Serialize};
}
