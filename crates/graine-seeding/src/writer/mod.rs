//! Persistence contract used by the seeder.

mod memory;

pub use memory::MemoryWriter;

use async_trait::async_trait;

use crate::error::SeedingResult;
use crate::record::{Record, SeedId};

/// Persists seeded rows.
///
/// Implement this trait over the database under test. The seeder never
/// locks around writer calls; implementations that need mutual exclusion
/// provide it themselves.
///
/// # Example
///
/// ```ignore
/// struct PgWriter { pool: PgPool }
///
/// #[async_trait]
/// impl Writer for PgWriter {
///     async fn insert(&self, table_name: &str, primary_key: &str, record: &Record) -> SeedingResult<SeedId> {
///         // INSERT ... RETURNING primary_key
///         todo!()
///     }
///
///     async fn clean_up(&self, tables: Option<&[String]>) -> SeedingResult<()> {
///         // TRUNCATE the given tables
///         todo!()
///     }
/// }
/// ```
#[async_trait]
pub trait Writer: Send + Sync {
	/// Inserts `record` into `table_name` and returns the generated id for
	/// `primary_key`. Ids must be unique per table.
	async fn insert(&self, table_name: &str, primary_key: &str, record: &Record)
	-> SeedingResult<SeedId>;

	/// Clears the given tables, or every table when `tables` is `None`.
	async fn clean_up(&self, tables: Option<&[String]>) -> SeedingResult<()>;
}
