//! Reference matching predicates
//!
//! One predicate per cardinality kind. Each answers whether a candidate record
//! relates to a referencee and, if it does, returns the candidate's
//! [`ResourceIdentifier`] built from the target type and the target ref field.

use std::fmt;

use serde_json::Value;

use crate::document::ResourceIdentifier;
use crate::record::{coerce_id, field, strict_eq};

/// Cardinality of a relationship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinality {
	/// Many-to-one: the referencee holds the related record's ref value
	BelongsTo,
	/// One-to-many: related records hold the referencee's ref value
	HasMany,
	/// Many-to-many
	BelongsToMany,
}

impl Cardinality {
	/// Whether the resolver receives the referencee's ref value rather than the
	/// whole referencee record
	pub fn matches_on_ref_value(self) -> bool {
		!matches!(self, Cardinality::BelongsTo)
	}
}

impl fmt::Display for Cardinality {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Cardinality::BelongsTo => "BelongsTo",
			Cardinality::HasMany => "HasMany",
			Cardinality::BelongsToMany => "BelongsToMany",
		};
		f.write_str(name)
	}
}

/// Type and ref field of the serializer on the related side of a relationship
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetIdentity<'a> {
	pub resource_type: &'a str,
	pub ref_field: &'a str,
}

impl<'a> TargetIdentity<'a> {
	pub fn new(resource_type: &'a str, ref_field: &'a str) -> Self {
		Self {
			resource_type,
			ref_field,
		}
	}

	/// Build the identifier of `candidate`, if it carries the target ref field
	pub fn identify(&self, candidate: &Value) -> Option<ResourceIdentifier> {
		let ref_value = field(candidate, self.ref_field)?;
		Some(ResourceIdentifier::new(self.resource_type, coerce_id(ref_value)))
	}
}

/// Match a candidate for a `BelongsTo` relationship
///
/// The value at `local_field` on the referencee must strictly equal the value
/// at the target ref field on the candidate. An absent value on either side
/// never matches.
///
/// # Examples
///
/// ```
/// use reinhardt_jsonapi_core::relations::matcher::{match_belongs_to, TargetIdentity};
/// use serde_json::json;
///
/// let target = TargetIdentity::new("person", "id");
/// let referencee = json!({"id": 1, "personId": 3});
///
/// let identifier = match_belongs_to("personId", &target, &referencee, &json!({"id": 3})).unwrap();
/// assert_eq!(identifier.id, "3");
/// assert!(match_belongs_to("personId", &target, &referencee, &json!({"id": 4})).is_none());
/// ```
pub fn match_belongs_to(
	local_field: &str,
	target: &TargetIdentity<'_>,
	referencee: &Value,
	candidate: &Value,
) -> Option<ResourceIdentifier> {
	let local = field(referencee, local_field)?;
	let remote = field(candidate, target.ref_field)?;

	if !strict_eq(local, remote) {
		return None;
	}

	target.identify(candidate)
}

/// Match a candidate for a `HasMany` relationship
///
/// Reads `relation_field` on the candidate. A collection matches when it
/// contains `ref_value`; a scalar matches on strict equality. An absent field
/// never matches.
///
/// # Examples
///
/// ```
/// use reinhardt_jsonapi_core::relations::matcher::{match_has_many, TargetIdentity};
/// use serde_json::json;
///
/// let target = TargetIdentity::new("address", "id");
///
/// assert!(match_has_many("personId", &target, &json!(1), &json!({"personId": [1, 2], "id": 1})).is_some());
/// assert!(match_has_many("personId", &target, &json!(1), &json!({"personId": [2, 3], "id": 1})).is_none());
/// assert!(match_has_many("personId", &target, &json!(1), &json!({"id": 1})).is_none());
/// ```
pub fn match_has_many(
	relation_field: &str,
	target: &TargetIdentity<'_>,
	ref_value: &Value,
	candidate: &Value,
) -> Option<ResourceIdentifier> {
	let related = field(candidate, relation_field)?;

	let matched = match related {
		Value::Array(values) => values.iter().any(|v| strict_eq(v, ref_value)),
		scalar => strict_eq(scalar, ref_value),
	};

	if !matched {
		return None;
	}

	target.identify(candidate)
}

/// Match a candidate for a `BelongsToMany` relationship
///
/// Every candidate that carries the target ref field is accepted; membership is
/// not checked on this path.
pub fn match_belongs_to_many(
	_relation_field: &str,
	target: &TargetIdentity<'_>,
	_ref_value: &Value,
	candidate: &Value,
) -> Option<ResourceIdentifier> {
	target.identify(candidate)
}
