//! Caller arguments for seed operations.
//!
//! Arguments are passed to providers and may also pin foreign keys. A
//! foreign-key argument can be a bare id, a previously seeded record, or JSON
//! `null` for optional refs. Any argument can be a [`Deferred`] computation
//! producing its value just in time.

use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use serde_json::Value;
use tokio::sync::OnceCell;

use crate::error::{SeedingError, SeedingResult};
use crate::record::Record;

type DeferredInit = Arc<dyn Fn() -> BoxFuture<'static, SeedingResult<Value>> + Send + Sync>;

/// Deferred argument value.
///
/// The computation runs at most once per resolution tree, the first time the
/// engine needs the field. Clones share the cached outcome, so an argument
/// propagated into nested seeds never triggers the computation twice.
/// [`Deferred::fresh`] returns a copy with its own empty cache; batches
/// seeded without reference reuse use it to run the computation once per
/// record.
///
/// A failure is cached as well: later calls report the first error's message
/// instead of running the computation again.
///
/// # Example
///
/// ```ignore
/// let handle = seeder.clone();
/// let args = SeedArgs::new().defer("channelID", move || {
///     let handle = handle.clone();
///     async move { handle.seed("channel", SeedArgs::new()).await.map(Value::from) }
/// });
/// ```
#[derive(Clone)]
pub struct Deferred {
	init: DeferredInit,
	outcome: Arc<OnceCell<Result<Value, String>>>,
}

impl Deferred {
	/// Wraps a computation producing the argument value.
	pub fn new<F, Fut>(init: F) -> Self
	where
		F: Fn() -> Fut + Send + Sync + 'static,
		Fut: Future<Output = SeedingResult<Value>> + Send + 'static,
	{
		Self {
			init: Arc::new(move || init().boxed()),
			outcome: Arc::new(OnceCell::new()),
		}
	}

	/// Returns a copy sharing the computation but not its cached outcome.
	pub fn fresh(&self) -> Self {
		Self {
			init: self.init.clone(),
			outcome: Arc::new(OnceCell::new()),
		}
	}

	/// Runs the computation on first call and returns its cached value.
	pub async fn resolve(&self) -> SeedingResult<Value> {
		let mut first_error = None;
		let slot = &mut first_error;
		let init = self.init.clone();
		let outcome = self
			.outcome
			.get_or_init(move || async move {
				init().await.map_err(|error| {
					let message = error.to_string();
					*slot = Some(error);
					message
				})
			})
			.await;

		match outcome {
			Ok(value) => Ok(value.clone()),
			Err(message) => Err(first_error.unwrap_or_else(|| {
				SeedingError::FactoryError(format!("deferred value failed earlier: {}", message))
			})),
		}
	}

	/// Returns true once the computation has completed, successfully or not.
	pub fn is_resolved(&self) -> bool {
		self.outcome.initialized()
	}
}

impl fmt::Debug for Deferred {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Deferred")
			.field("outcome", &self.outcome.get())
			.finish()
	}
}

/// A single argument entry.
#[derive(Debug, Clone)]
pub enum Arg {
	/// Plain JSON value.
	Value(Value),
	/// Value computed on first use.
	Deferred(Deferred),
}

/// Arguments for a seed call.
///
/// # Example
///
/// ```ignore
/// let channel = seeder.seed("channel", SeedArgs::new()).await?;
/// let args = SeedArgs::new()
///     .set("name", "John Doe")
///     .set("channelID", &channel);
/// seeder.seed("user", args).await?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct SeedArgs {
	entries: BTreeMap<String, Arg>,
}

impl SeedArgs {
	/// Creates empty arguments.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets `field` to a plain value.
	pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
		self.insert(field, Arg::Value(value.into()));
		self
	}

	/// Sets `field` to a value computed on first use.
	pub fn defer<F, Fut>(mut self, field: impl Into<String>, init: F) -> Self
	where
		F: Fn() -> Fut + Send + Sync + 'static,
		Fut: Future<Output = SeedingResult<Value>> + Send + 'static,
	{
		self.insert(field, Arg::Deferred(Deferred::new(init)));
		self
	}

	/// Inserts an entry, replacing any previous value for `field`.
	pub fn insert(&mut self, field: impl Into<String>, arg: Arg) {
		self.entries.insert(field.into(), arg);
	}

	/// Returns the entry for `field`.
	pub fn get(&self, field: &str) -> Option<&Arg> {
		self.entries.get(field)
	}

	/// Returns true if `field` has an entry.
	pub fn contains(&self, field: &str) -> bool {
		self.entries.contains_key(field)
	}

	/// Returns the number of entries.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns true if there are no entries.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Copy whose deferred entries have their own cache, see
	/// [`Deferred::fresh`].
	pub fn fresh(&self) -> Self {
		Self {
			entries: self
				.entries
				.iter()
				.map(|(field, arg)| {
					let arg = match arg {
						Arg::Value(value) => Arg::Value(value.clone()),
						Arg::Deferred(deferred) => Arg::Deferred(deferred.fresh()),
					};
					(field.clone(), arg)
				})
				.collect(),
		}
	}

	/// All entries as a record, awaiting deferred ones.
	pub(crate) async fn resolve_record(&self) -> SeedingResult<Record> {
		let mut record = Record::new();
		for (field, arg) in &self.entries {
			let value = match arg {
				Arg::Value(value) => value.clone(),
				Arg::Deferred(deferred) => deferred.resolve().await?,
			};
			record.insert(field.clone(), value);
		}
		Ok(record)
	}
}

impl From<Record> for SeedArgs {
	fn from(record: Record) -> Self {
		Self {
			entries: record
				.into_iter()
				.map(|(field, value)| (field, Arg::Value(value)))
				.collect(),
		}
	}
}
