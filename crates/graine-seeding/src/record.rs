//! Record, context and result types.
//!
//! Rows travel through the engine as JSON objects. A [`Context`] collects the
//! rows produced while resolving one top-level seed call so that dependent
//! factories can reuse them.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::SeedingResult;

/// Field name to value mapping for a single row.
pub type Record = Map<String, Value>;

/// Identifier generated by a [`Writer`](crate::writer::Writer) for an inserted row.
pub type SeedId = i64;

/// Rows produced within one resolution tree, keyed by factory name.
///
/// Merging is last-write-wins: a later record for the same factory replaces
/// the earlier one, other entries are kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
	records: HashMap<String, Record>,
}

impl Context {
	/// Creates an empty context.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the most recent record produced by `factory_name`.
	pub fn get(&self, factory_name: &str) -> Option<&Record> {
		self.records.get(factory_name)
	}

	/// Returns true if a record was produced by `factory_name`.
	pub fn contains(&self, factory_name: &str) -> bool {
		self.records.contains_key(factory_name)
	}

	/// Returns the number of factories with a record in this context.
	pub fn len(&self) -> usize {
		self.records.len()
	}

	/// Returns true if the context holds no records.
	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}

	/// Iterates over `(factory_name, record)` pairs in arbitrary order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &Record)> {
		self.records.iter().map(|(name, record)| (name.as_str(), record))
	}

	/// Returns this context with `record` stored under `factory_name`.
	pub fn with(mut self, factory_name: impl Into<String>, record: Record) -> Self {
		self.insert(factory_name, record);
		self
	}

	pub(crate) fn insert(&mut self, factory_name: impl Into<String>, record: Record) {
		self.records.insert(factory_name.into(), record);
	}

	/// Merges `other` into this context; entries from `other` win.
	pub(crate) fn merge(&mut self, other: Context) {
		self.records.extend(other.records);
	}
}

/// Outcome of seeding a single record.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedResult {
	id: SeedId,
	record: Record,
	context: Context,
}

impl SeedResult {
	pub(crate) fn new(id: SeedId, record: Record, context: Context) -> Self {
		Self {
			id,
			record,
			context,
		}
	}

	/// Identifier returned by the writer for the inserted row.
	pub fn id(&self) -> SeedId {
		self.id
	}

	/// Final record, including foreign keys and the primary key.
	pub fn record(&self) -> &Record {
		&self.record
	}

	/// Context accumulated while producing this record.
	pub fn context(&self) -> &Context {
		&self.context
	}

	/// Returns a single field of the record.
	pub fn get(&self, field: &str) -> Option<&Value> {
		self.record.get(field)
	}

	/// Consumes the result and returns the record.
	pub fn into_record(self) -> Record {
		self.record
	}

	/// Consumes the result and returns `(id, record, context)`.
	pub fn into_parts(self) -> (SeedId, Record, Context) {
		(self.id, self.record, self.context)
	}

	/// Deserializes the record into `T`.
	pub fn deserialize<T: DeserializeOwned>(&self) -> SeedingResult<T> {
		Ok(serde_json::from_value(Value::Object(self.record.clone()))?)
	}
}

impl From<SeedResult> for Value {
	fn from(result: SeedResult) -> Self {
		Value::Object(result.record)
	}
}

impl From<&SeedResult> for Value {
	fn from(result: &SeedResult) -> Self {
		Value::Object(result.record.clone())
	}
}
