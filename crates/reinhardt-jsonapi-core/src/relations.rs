//! Relationship matching and resolution
//!
//! [`matcher`] holds the per-cardinality predicates; [`resolver`] aggregates
//! their results into relationship linkages. The free constructors below are
//! the public namespace for declaring relationships.

pub mod matcher;
pub mod resolver;

pub use matcher::{Cardinality, TargetIdentity};
pub use resolver::Relationship;

/// Declare a many-to-one relationship keyed by `field` on the referencee
pub fn belongs_to(field: impl Into<String>) -> Relationship {
	Relationship::belongs_to(field)
}

/// Declare a one-to-many relationship keyed by `field` on the related records
pub fn has_many(field: impl Into<String>) -> Relationship {
	Relationship::has_many(field)
}

/// Declare a many-to-many relationship keyed by `field` on the related records
pub fn belongs_to_many(field: impl Into<String>) -> Relationship {
	Relationship::belongs_to_many(field)
}
