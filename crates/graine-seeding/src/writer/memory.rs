//! In-memory writer.

use std::collections::BTreeMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use super::Writer;
use crate::error::SeedingResult;
use crate::record::{Record, SeedId};

/// Writer keeping rows in per-table vectors.
///
/// Ids are assigned per table as `row count + 1`, so they start at 1 and
/// restart after the table is cleaned up.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use graine_seeding::writer::MemoryWriter;
///
/// let writer = Arc::new(MemoryWriter::new());
/// assert_eq!(writer.count("users"), 0);
/// ```
#[derive(Debug, Default)]
pub struct MemoryWriter {
	tables: Mutex<BTreeMap<String, Vec<Record>>>,
}

impl MemoryWriter {
	/// Creates an empty writer.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns a copy of every row in `table_name`.
	pub fn rows(&self, table_name: &str) -> Vec<Record> {
		self.tables
			.lock()
			.get(table_name)
			.cloned()
			.unwrap_or_default()
	}

	/// Returns the row at `index` in `table_name`.
	pub fn row(&self, table_name: &str, index: usize) -> Option<Record> {
		self.tables
			.lock()
			.get(table_name)
			.and_then(|rows| rows.get(index).cloned())
	}

	/// Returns the number of rows in `table_name`.
	pub fn count(&self, table_name: &str) -> usize {
		self.tables.lock().get(table_name).map_or(0, Vec::len)
	}

	/// Returns the names of tables that received rows or were cleaned up.
	pub fn table_names(&self) -> Vec<String> {
		self.tables.lock().keys().cloned().collect()
	}
}

#[async_trait]
impl Writer for MemoryWriter {
	async fn insert(
		&self,
		table_name: &str,
		primary_key: &str,
		record: &Record,
	) -> SeedingResult<SeedId> {
		let mut tables = self.tables.lock();
		let rows = tables.entry(table_name.to_string()).or_default();
		let id = rows.len() as SeedId + 1;

		let mut row = record.clone();
		row.insert(primary_key.to_string(), Value::from(id));
		rows.push(row);

		Ok(id)
	}

	async fn clean_up(&self, tables: Option<&[String]>) -> SeedingResult<()> {
		let mut stored = self.tables.lock();
		match tables {
			None => stored.clear(),
			Some(names) => {
				for name in names {
					stored.insert(name.clone(), Vec::new());
				}
			}
		}
		Ok(())
	}
}
