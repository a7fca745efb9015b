//! Factory registry owned by a seeder.
//!
//! Each [`Seeder`](crate::seeder::Seeder) holds its own registry, so several
//! seeders with different factory sets can coexist in one process.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::warn;

use super::Factory;
use crate::error::{SeedingError, SeedingResult};

/// Registered factories, in registration order.
#[derive(Default)]
pub struct FactoryRegistry {
	factories: RwLock<Vec<Arc<dyn Factory>>>,
}

impl FactoryRegistry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a batch of factories atomically.
	///
	/// Fails with [`SeedingError::DuplicateFactory`] if any name is already
	/// registered or appears twice in the batch; nothing is registered then.
	pub fn register(
		&self,
		factories: impl IntoIterator<Item = Arc<dyn Factory>>,
	) -> SeedingResult<()> {
		let incoming: Vec<Arc<dyn Factory>> = factories.into_iter().collect();
		let mut registered = self.factories.write();

		for (index, factory) in incoming.iter().enumerate() {
			let name = factory.name();
			let taken = registered.iter().any(|f| f.name() == name)
				|| incoming[..index].iter().any(|f| f.name() == name);
			if taken {
				warn!(factory = name, "rejecting factory batch with duplicate name");
				return Err(SeedingError::DuplicateFactory(name.to_string()));
			}
		}

		registered.extend(incoming);
		Ok(())
	}

	/// Gets a factory by name.
	pub fn get(&self, name: &str) -> SeedingResult<Arc<dyn Factory>> {
		self.factories
			.read()
			.iter()
			.find(|f| f.name() == name)
			.cloned()
			.ok_or_else(|| SeedingError::FactoryNotFound(name.to_string()))
	}

	/// Checks if a factory is registered.
	pub fn contains(&self, name: &str) -> bool {
		self.factories.read().iter().any(|f| f.name() == name)
	}

	/// Returns all registered names in registration order.
	pub fn names(&self) -> Vec<String> {
		self.factories
			.read()
			.iter()
			.map(|f| f.name().to_string())
			.collect()
	}

	/// Returns table names for the named factories, or for every factory
	/// when `names` is empty. Unknown names are skipped.
	pub fn table_names(&self, names: &[&str]) -> Vec<String> {
		self.factories
			.read()
			.iter()
			.filter(|f| names.is_empty() || names.iter().any(|name| *name == f.name()))
			.map(|f| f.table_name().to_string())
			.collect()
	}

	/// Returns the number of registered factories.
	pub fn len(&self) -> usize {
		self.factories.read().len()
	}

	/// Returns true if no factories are registered.
	pub fn is_empty(&self) -> bool {
		self.factories.read().is_empty()
	}
}

impl std::fmt::Debug for FactoryRegistry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("FactoryRegistry")
			.field("factories", &self.names())
			.finish()
	}
}
