//! # reinhardt-jsonapi-core
//!
//! Building blocks for JSON:API document serialization in Reinhardt.
//!
//! This crate is independent of any serializer configuration. It provides:
//!
//! - **Records**: helpers for reading caller-supplied `serde_json` records
//! - **Document model**: resource objects, relationship linkages and the
//!   top-level document with its structural rules
//! - **Relations**: reference matching per cardinality and relationship
//!   resolution with `(type, id)` deduplication
//! - **Errors**: the error kinds a serialization can fail with
//!
//! ## Examples
//!
//! ```rust
//! use reinhardt_jsonapi_core::relations::{self, TargetIdentity};
//! use serde_json::json;
//!
//! let addresses = relations::has_many("personId");
//! let target = TargetIdentity::new("address", "id");
//!
//! let linkage = addresses
//!     .resolve(&target, &json!(1), &json!([{"id": 9, "personId": 1}]))
//!     .unwrap();
//! assert_eq!(linkage.identifiers().count(), 1);
//! ```

pub mod document;
pub mod error;
pub mod record;
pub mod relations;

pub use document::{
	LinkageData, PrimaryData, RESOURCE_LINK_NAMES, RelationshipLinkage, ResourceIdentifier,
	ResourceObject, TOP_LEVEL_LINK_NAMES, TopLevelDocument,
};
pub use error::{JsonApiError, JsonApiErrorKind, JsonApiResult};
pub use record::Record;
pub use relations::{Cardinality, Relationship, TargetIdentity};
