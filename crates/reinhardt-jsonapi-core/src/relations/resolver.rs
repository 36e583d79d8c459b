//! Relationship resolution
//!
//! A [`Relationship`] pairs a cardinality with the field used for matching and
//! turns a bag of candidate records into a relationship linkage. Resolution
//! never fails: "no relationship" is `None`, and to-many kinds may return an
//! explicit empty collection.

use std::collections::HashSet;

use serde_json::Value;

use super::matcher::{
	Cardinality, TargetIdentity, match_belongs_to, match_belongs_to_many, match_has_many,
};
use crate::document::{RelationshipLinkage, ResourceIdentifier};
use crate::record::field;

static ABSENT: Value = Value::Null;

/// A relationship resolver tagged with its cardinality
///
/// # Examples
///
/// ```
/// use reinhardt_jsonapi_core::relations::{Relationship, TargetIdentity};
/// use serde_json::json;
///
/// let belongs_to = Relationship::belongs_to("personId");
/// let target = TargetIdentity::new("person", "id");
///
/// let linkage = belongs_to
///     .resolve(&target, &json!({"id": 1, "personId": 3}), &json!({"id": 3}))
///     .unwrap();
/// assert_eq!(
///     serde_json::to_value(&linkage).unwrap(),
///     json!({"data": {"type": "person", "id": "3"}})
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Relationship {
	kind: Cardinality,
	field: String,
}

impl Relationship {
	pub fn new(kind: Cardinality, field: impl Into<String>) -> Self {
		Self {
			kind,
			field: field.into(),
		}
	}

	/// `field` names the referencee's field holding the related ref value
	pub fn belongs_to(field: impl Into<String>) -> Self {
		Self::new(Cardinality::BelongsTo, field)
	}

	/// `field` names the related record's field holding the referencee's ref value
	pub fn has_many(field: impl Into<String>) -> Self {
		Self::new(Cardinality::HasMany, field)
	}

	/// `field` names the related record's field used for many-to-many pairing
	pub fn belongs_to_many(field: impl Into<String>) -> Self {
		Self::new(Cardinality::BelongsToMany, field)
	}

	pub fn kind(&self) -> Cardinality {
		self.kind
	}

	pub fn field(&self) -> &str {
		&self.field
	}

	/// Select what the matcher compares against for this kind
	///
	/// `BelongsTo` needs the whole referencee record; the other kinds only need
	/// the referencee's ref value. An absent ref value is reported as `null`.
	pub fn referencee<'a>(&self, record: &'a Value, ref_field: &str) -> &'a Value {
		if self.kind.matches_on_ref_value() {
			field(record, ref_field).unwrap_or(&ABSENT)
		} else {
			record
		}
	}

	/// Apply the matcher of this kind to a single candidate
	pub fn match_candidate(
		&self,
		target: &TargetIdentity<'_>,
		referencee: &Value,
		candidate: &Value,
	) -> Option<ResourceIdentifier> {
		match self.kind {
			Cardinality::BelongsTo => match_belongs_to(&self.field, target, referencee, candidate),
			Cardinality::HasMany => match_has_many(&self.field, target, referencee, candidate),
			Cardinality::BelongsToMany => {
				match_belongs_to_many(&self.field, target, referencee, candidate)
			}
		}
	}

	/// Resolve the linkage between `referencee` and the candidate data
	///
	/// `referencee` is the value returned by [`Relationship::referencee`].
	/// `candidates` may be a single record or a collection of records:
	///
	/// - a single record yields a to-one linkage or `None`;
	/// - an empty collection yields `None`;
	/// - otherwise every candidate is matched, duplicates by `(type, id)` are
	///   dropped, and `BelongsTo` collapses to the first survivor (or `None`)
	///   while the to-many kinds return the whole list, possibly empty.
	pub fn resolve(
		&self,
		target: &TargetIdentity<'_>,
		referencee: &Value,
		candidates: &Value,
	) -> Option<RelationshipLinkage> {
		let Value::Array(candidates) = candidates else {
			return self
				.match_candidate(target, referencee, candidates)
				.map(RelationshipLinkage::single);
		};

		if candidates.is_empty() {
			return None;
		}

		let mut seen = HashSet::new();
		let identifiers: Vec<ResourceIdentifier> = candidates
			.iter()
			.filter_map(|candidate| self.match_candidate(target, referencee, candidate))
			.filter(|identifier| seen.insert(identifier.clone()))
			.collect();

		tracing::trace!(
			kind = %self.kind,
			field = %self.field,
			target = target.resource_type,
			candidates = candidates.len(),
			matched = identifiers.len(),
			"resolved relationship candidates"
		);

		match self.kind {
			Cardinality::BelongsTo => identifiers.into_iter().next().map(RelationshipLinkage::single),
			Cardinality::HasMany | Cardinality::BelongsToMany => {
				Some(RelationshipLinkage::many(identifiers))
			}
		}
	}
}
