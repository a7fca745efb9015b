//! The seeding engine.
//!
//! A [`Seeder`] owns a factory registry and a writer. Seeding a factory
//! first resolves its refs (recursively seeding or reusing the referenced
//! factories), then runs the factory's hooks and provider and persists the
//! row.
//!
//! # Example
//!
//! ```ignore
//! let writer = Arc::new(MemoryWriter::new());
//! let seeder = Seeder::with_writer(writer.clone());
//!
//! seeder.register(FactoryDefinition::new("channel", "channels", "channelID"));
//! seeder.register(
//!     FactoryDefinition::new("user", "users", "userID")
//!         .with_ref(Ref::new("channel", "channelID")),
//! );
//!
//! let user = seeder.seed("user", SeedArgs::new()).await?;
//! assert_eq!(writer.count("channels"), 1);
//! assert_eq!(user.get("channelID"), Some(&json!(1)));
//! ```

mod options;
mod resolve;

pub use options::SeedOptions;
pub use resolve::ResolvedRefs;

use std::fmt;
use std::sync::Arc;

use futures::future::try_join_all;
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::args::SeedArgs;
use crate::error::{SeedingError, SeedingResult};
use crate::factory::{Factory, FactoryRegistry};
use crate::record::{Context, Record, SeedResult};
use crate::writer::Writer;

#[derive(Default)]
struct SeederState {
	registry: FactoryRegistry,
	writer: RwLock<Option<Arc<dyn Writer>>>,
}

/// Dependency-resolving seeder.
///
/// Cloning is cheap and clones share the registry and writer, which is how
/// hooks and deferred arguments call back into the seeder.
#[derive(Clone, Default)]
pub struct Seeder {
	state: Arc<SeederState>,
}

impl Seeder {
	/// Creates a seeder without a writer.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a seeder using `writer`.
	pub fn with_writer<W: Writer + 'static>(writer: Arc<W>) -> Self {
		let seeder = Self::new();
		seeder.set_writer(writer);
		seeder
	}

	/// Replaces the writer.
	pub fn set_writer<W: Writer + 'static>(&self, writer: Arc<W>) {
		*self.state.writer.write() = Some(writer as Arc<dyn Writer>);
	}

	/// Returns the factory registry.
	pub fn registry(&self) -> &FactoryRegistry {
		&self.state.registry
	}

	/// Registers a factory. Returns false if the name is already taken.
	pub fn register<F: Factory + 'static>(&self, factory: F) -> bool {
		self.try_register(factory).is_ok()
	}

	/// Registers a factory, reporting a name collision as an error.
	pub fn try_register<F: Factory + 'static>(&self, factory: F) -> SeedingResult<()> {
		self.state.registry.register([Arc::new(factory) as Arc<dyn Factory>])
	}

	/// Registers several factories at once. If any name collides, nothing is
	/// registered and false is returned.
	pub fn register_all(&self, factories: impl IntoIterator<Item = Arc<dyn Factory>>) -> bool {
		self.try_register_all(factories).is_ok()
	}

	/// Registers several factories at once, reporting the first collision.
	pub fn try_register_all(
		&self,
		factories: impl IntoIterator<Item = Arc<dyn Factory>>,
	) -> SeedingResult<()> {
		self.state.registry.register(factories)
	}

	/// Checks if a factory is registered.
	pub fn has_factory(&self, name: &str) -> bool {
		self.state.registry.contains(name)
	}

	/// Returns registered factory names in registration order.
	pub fn factory_names(&self) -> Vec<String> {
		self.state.registry.names()
	}

	/// Seeds one record, reusing references.
	pub async fn seed(&self, name: &str, args: impl Into<SeedArgs>) -> SeedingResult<SeedResult> {
		self.seed_with(name, args, true).await
	}

	/// Seeds one record with explicit reference reuse.
	pub async fn seed_with(
		&self,
		name: &str,
		args: impl Into<SeedArgs>,
		reuse_refs: bool,
	) -> SeedingResult<SeedResult> {
		let options = SeedOptions::new(1)
			.with_args(args)
			.with_reuse_refs(reuse_refs);
		let mut results = self.seed_many(name, options).await?;
		results
			.pop()
			.ok_or_else(|| SeedingError::FactoryError(format!("no record seeded for \"{}\"", name)))
	}

	/// Seeds one record and returns only the record.
	pub async fn seed_object(&self, name: &str, args: impl Into<SeedArgs>) -> SeedingResult<Record> {
		Ok(self.seed(name, args).await?.into_record())
	}

	/// Seeds one record and deserializes it into `T`.
	pub async fn seed_object_as<T: DeserializeOwned>(
		&self,
		name: &str,
		args: impl Into<SeedArgs>,
	) -> SeedingResult<T> {
		self.seed(name, args).await?.deserialize()
	}

	/// Seeds `options.count` records.
	///
	/// With `reuse_refs`, references are resolved once and every record
	/// shares them. Without it, each record gets its own dependency chain and
	/// runs deferred arguments again.
	/// Results are returned in creation order. A failure aborts the batch;
	/// rows inserted before the failure stay.
	pub async fn seed_many(
		&self,
		name: &str,
		options: SeedOptions,
	) -> SeedingResult<Vec<SeedResult>> {
		let writer = self.writer()?;
		let factory = self.state.registry.get(name)?;
		let SeedOptions {
			args,
			count,
			reuse_refs,
		} = options;

		debug!(factory = name, count, reuse_refs, "seeding records");
		if count == 0 {
			return Ok(Vec::new());
		}

		let resolved = if reuse_refs {
			Some(
				self.resolve_refs_with(&writer, factory.refs(), &args, Context::new(), true)
					.await?,
			)
		} else {
			None
		};

		// Without reuse every record also gets its own deferred values.
		let records = (0..count).map(|_| {
			let args = if reuse_refs { args.clone() } else { args.fresh() };
			self.seed_factory(
				&writer,
				factory.clone(),
				args,
				resolved.clone(),
				Context::new(),
				reuse_refs,
			)
		});
		try_join_all(records).await
	}

	/// Resolves a factory's references without inserting the factory's own
	/// row. Referenced rows are created or reused exactly as `seed` would.
	pub async fn resolve_refs(
		&self,
		name: &str,
		args: impl Into<SeedArgs>,
		reuse_refs: bool,
	) -> SeedingResult<ResolvedRefs> {
		let writer = self.writer()?;
		let factory = self.state.registry.get(name)?;
		let args = args.into();
		self.resolve_refs_with(&writer, factory.refs(), &args, Context::new(), reuse_refs)
			.await
	}

	/// Clears the tables of the named factories, or of every registered
	/// factory when `names` is empty.
	pub async fn clean_up(&self, names: &[&str]) -> SeedingResult<()> {
		let writer = self.writer()?;
		let tables = self.state.registry.table_names(names);
		debug!(?tables, "cleaning up tables");
		writer.clean_up(Some(&tables)).await
	}

	fn writer(&self) -> SeedingResult<Arc<dyn Writer>> {
		self.state
			.writer
			.read()
			.clone()
			.ok_or(SeedingError::WriterNotSet)
	}
}

impl fmt::Debug for Seeder {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Seeder")
			.field("factories", &self.state.registry.names())
			.field("writer", &self.state.writer.read().is_some())
			.finish()
	}
}
