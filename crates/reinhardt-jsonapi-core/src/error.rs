//! Error types for document serialization
//!
//! Every failure is fatal to the `serialize` call that produced it: no partial
//! document is returned. Callers match on [`JsonApiError`] (or its
//! [`JsonApiErrorKind`]) instead of inspecting messages.

/// Errors raised while building a top-level document
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JsonApiError {
	/// A record lacks the configured reference field, or its value is falsy.
	#[error("{ref_field} property must be defined within data")]
	DataReference { ref_field: String },

	/// A relationship names a serializer that is absent from the registry.
	#[error("{name} is not a registered serializer.")]
	SerializerNotRegistered { name: String },

	/// The document would contain none of `data`, `errors`, `meta`.
	#[error("One of the following must be included data, errors, meta")]
	TopLevelDocument,

	/// Rendering the document to JSON text failed.
	#[error("JSON rendering error: {message}")]
	Json { message: String },
}

/// Fieldless discriminant of [`JsonApiError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonApiErrorKind {
	DataReference,
	SerializerNotRegistered,
	TopLevelDocument,
	Json,
}

/// Result alias used throughout the JSON:API crates
pub type JsonApiResult<T> = Result<T, JsonApiError>;

impl JsonApiError {
	/// Create a data reference error for the given ref field
	pub fn data_reference(ref_field: impl Into<String>) -> Self {
		JsonApiError::DataReference {
			ref_field: ref_field.into(),
		}
	}

	/// Create a not-registered error naming the missing serializer
	pub fn serializer_not_registered(name: impl Into<String>) -> Self {
		JsonApiError::SerializerNotRegistered { name: name.into() }
	}

	/// Returns the kind of this error
	pub fn kind(&self) -> JsonApiErrorKind {
		match self {
			JsonApiError::DataReference { .. } => JsonApiErrorKind::DataReference,
			JsonApiError::SerializerNotRegistered { .. } => JsonApiErrorKind::SerializerNotRegistered,
			JsonApiError::TopLevelDocument => JsonApiErrorKind::TopLevelDocument,
			JsonApiError::Json { .. } => JsonApiErrorKind::Json,
		}
	}

	/// Check if this is a data reference error
	pub fn is_data_reference_error(&self) -> bool {
		matches!(self, JsonApiError::DataReference { .. })
	}

	/// Check if this is a serializer-not-registered error
	pub fn is_serializer_not_registered_error(&self) -> bool {
		matches!(self, JsonApiError::SerializerNotRegistered { .. })
	}

	/// Check if this is a top-level document error
	pub fn is_top_level_document_error(&self) -> bool {
		matches!(self, JsonApiError::TopLevelDocument)
	}
}

impl From<serde_json::Error> for JsonApiError {
	fn from(err: serde_json::Error) -> Self {
		JsonApiError::Json {
			message: err.to_string(),
		}
	}
}
