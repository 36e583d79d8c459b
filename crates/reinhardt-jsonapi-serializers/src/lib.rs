//! # reinhardt-jsonapi-serializers
//!
//! Schema-driven serializers that turn plain records into JSON:API documents.
//!
//! ## Features
//!
//! - **Resource schemas**: attributes, relationships and computed links per type
//! - **Relationship resolution**: `BelongsTo`, `HasMany` and `BelongsToMany`
//!   linkages matched against caller-supplied related records
//! - **Included resources**: related records serialized by their own
//!   serializers and deduplicated by `(type, id)`
//! - **Serializer registry**: relationships can name their serializer and have
//!   it looked up case-insensitively at serialize time
//!
//! ## Examples
//!
//! ```rust
//! use reinhardt_jsonapi_core::relations;
//! use reinhardt_jsonapi_serializers::{
//!     DocumentInput, RelationshipSchema, ResourceSchema, ResourceSerializer, SerializerConfig,
//!     SerializerRegistry,
//! };
//! use serde_json::json;
//!
//! let registry = SerializerRegistry::new();
//! registry.register("person", ResourceSerializer::new("person", ResourceSchema::new()));
//!
//! let article = ResourceSerializer::with_config(
//!     "article",
//!     ResourceSchema::new()
//!         .attributes(["title"])
//!         .relationship("author", RelationshipSchema::new("Person", relations::belongs_to("authorId"))),
//!     SerializerConfig::new().with_registry(registry),
//! );
//!
//! let document = article
//!     .serialize(
//!         &DocumentInput::new()
//!             .with_data(json!({"id": 1, "title": "Hello", "authorId": 3}))
//!             .with_included("author", json!([{"id": 3}])),
//!     )
//!     .unwrap();
//!
//! assert_eq!(
//!     document.to_value().unwrap()["data"]["relationships"]["author"],
//!     json!({"data": {"type": "person", "id": "3"}})
//! );
//! ```

pub mod config;
pub mod input;
pub mod registry;
pub mod schema;
pub mod serializer;

pub use config::{DEFAULT_REF_FIELD, SerializerConfig};
pub use input::DocumentInput;
pub use registry::SerializerRegistry;
pub use schema::{InlineSerializer, LinkFn, RelationshipSchema, ResourceSchema, SerializerRef};
pub use serializer::ResourceSerializer;
