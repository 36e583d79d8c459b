//! Named serializer registry
//!
//! Maps case-insensitive names to serializers so a relationship can refer to
//! its related serializer by name. A registry is an explicit handle: clones
//! share the same storage, and [`SerializerRegistry::global`] hands out the
//! process-wide instance used by default configurations.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use crate::serializer::ResourceSerializer;

type Entries = HashMap<String, Arc<ResourceSerializer>>;

/// Process-wide registry shared by default configurations.
static GLOBAL_REGISTRY: Lazy<SerializerRegistry> = Lazy::new(SerializerRegistry::new);

fn normalize(name: &str) -> String {
	name.to_lowercase()
}

/// Case-insensitive mapping from name to serializer
///
/// Registered serializers are held by strong `Arc`s. A serializer whose own
/// config points back at the registry it is registered in forms a reference
/// cycle, so that registry's storage lives until the entry is removed with
/// [`remove`](SerializerRegistry::remove) or [`empty`](SerializerRegistry::empty).
///
/// # Examples
///
/// ```
/// use reinhardt_jsonapi_serializers::{ResourceSchema, ResourceSerializer, SerializerRegistry};
///
/// let registry = SerializerRegistry::new();
/// registry
///     .register("Address", ResourceSerializer::new("address", ResourceSchema::new()))
///     .register("phone", ResourceSerializer::new("phone", ResourceSchema::new()));
///
/// assert!(registry.has("address"));
/// assert_eq!(registry.get("ADDRESS").unwrap().resource_type(), "address");
/// assert!(registry.get("email").is_none());
/// ```
#[derive(Clone, Default)]
pub struct SerializerRegistry {
	entries: Arc<RwLock<Entries>>,
}

impl SerializerRegistry {
	/// Create a new, empty registry
	pub fn new() -> Self {
		Self::default()
	}

	/// Handle to the process-wide registry
	pub fn global() -> Self {
		GLOBAL_REGISTRY.clone()
	}

	/// Register a serializer under `name`, replacing any previous entry
	pub fn register(
		&self,
		name: impl AsRef<str>,
		serializer: impl Into<Arc<ResourceSerializer>>,
	) -> &Self {
		let key = normalize(name.as_ref());
		let serializer = serializer.into();
		tracing::debug!(name = %key, resource_type = serializer.resource_type(), "registering serializer");
		self.entries.write().insert(key, serializer);
		self
	}

	/// Look up a serializer by name
	pub fn get(&self, name: impl AsRef<str>) -> Option<Arc<ResourceSerializer>> {
		self.entries.read().get(&normalize(name.as_ref())).cloned()
	}

	/// Check whether a serializer is registered under `name`
	pub fn has(&self, name: impl AsRef<str>) -> bool {
		self.entries.read().contains_key(&normalize(name.as_ref()))
	}

	/// Remove the serializer registered under `name`, if any
	pub fn remove(&self, name: impl AsRef<str>) -> &Self {
		self.entries.write().remove(&normalize(name.as_ref()));
		self
	}

	/// Snapshot of every registered serializer, keyed by normalized name
	pub fn all(&self) -> HashMap<String, Arc<ResourceSerializer>> {
		self.entries.read().clone()
	}

	/// Remove every registered serializer
	pub fn empty(&self) -> &Self {
		self.entries.write().clear();
		self
	}

	/// Returns the number of registered serializers
	pub fn len(&self) -> usize {
		self.entries.read().len()
	}

	/// Returns true if no serializers are registered
	pub fn is_empty(&self) -> bool {
		self.entries.read().is_empty()
	}

	/// Whether both handles point at the same storage
	pub fn shares_storage_with(&self, other: &SerializerRegistry) -> bool {
		Arc::ptr_eq(&self.entries, &other.entries)
	}
}

impl fmt::Debug for SerializerRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut names: Vec<String> = self.entries.read().keys().cloned().collect();
		names.sort();
		f.debug_struct("SerializerRegistry")
			.field("names", &names)
			.finish()
	}
}
