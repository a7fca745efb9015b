//! # Graine
//!
//! Dependency-resolving test data seeding for Rust.
//!
//! Describe each kind of row once as a factory, declare which other factories
//! it points at, and let the seeder create the whole dependency graph in the
//! right order. Rows created while seeding one record are reused by its other
//! references, so a single call yields a consistent set of rows.
//!
//! ## Feature Flags
//!
//! - `seeding` (default) - factories, seeder and writers
//!
//! ## Quick Example
//!
//! ```rust,ignore
//! use graine::prelude::*;
//!
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
//! ```

#[cfg(feature = "seeding")]
pub mod seeding;

#[cfg(feature = "seeding")]
pub use graine_seeding::{
	Factory, FactoryDefinition, MemoryWriter, Ref, SeedArgs, SeedOptions, SeedResult, Seeder,
	SeedingError, SeedingResult, Writer,
};

/// Convenience re-exports for common usage.
pub mod prelude {
	#[cfg(feature = "seeding")]
	pub use graine_seeding::prelude::*;
}
