//! Options for batch seeding.

use crate::args::SeedArgs;

/// Options for [`Seeder::seed_many`](super::Seeder::seed_many).
///
/// # Example
///
/// ```
/// use graine_seeding::args::SeedArgs;
/// use graine_seeding::seeder::SeedOptions;
///
/// let options = SeedOptions::new(10)
///     .with_args(SeedArgs::new().set("name", "John Doe"))
///     .with_reuse_refs(false);
/// assert_eq!(options.count, 10);
/// assert!(!options.reuse_refs);
/// ```
#[derive(Debug, Clone)]
pub struct SeedOptions {
	/// Arguments shared by every record.
	pub args: SeedArgs,

	/// Number of records to create.
	pub count: usize,

	/// Share one resolved dependency chain between all records, and reuse
	/// rows already present in the context.
	pub reuse_refs: bool,
}

impl Default for SeedOptions {
	fn default() -> Self {
		Self {
			args: SeedArgs::new(),
			count: 1,
			reuse_refs: true,
		}
	}
}

impl SeedOptions {
	/// Creates options for `count` records with reuse enabled.
	pub fn new(count: usize) -> Self {
		Self {
			count,
			..Self::default()
		}
	}

	/// Sets the arguments.
	pub fn with_args(mut self, args: impl Into<SeedArgs>) -> Self {
		self.args = args.into();
		self
	}

	/// Sets the record count.
	pub fn with_count(mut self, count: usize) -> Self {
		self.count = count;
		self
	}

	/// Sets reference reuse.
	pub fn with_reuse_refs(mut self, reuse_refs: bool) -> Self {
		self.reuse_refs = reuse_refs;
		self
	}
}
