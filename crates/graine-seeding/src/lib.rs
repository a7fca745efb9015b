//! Dependency-resolving test data seeding.
//!
//! This crate seeds interrelated rows for tests. Each kind of row is described
//! by a factory that names its table, its primary key and the other factories
//! it references through foreign keys. Seeding a factory creates whatever it
//! depends on first, reusing rows already produced in the same call unless
//! asked not to.
//!
//! - **Factories**: [`Factory`] trait or closure-based [`FactoryDefinition`]
//! - **References**: [`Ref`] declares a foreign key, optionally nullable
//! - **Seeder**: [`Seeder`] resolves references, runs hooks and persists rows
//! - **Writer**: [`Writer`] is the storage contract, [`MemoryWriter`] an
//!   in-memory implementation
//!
//! # Quick Start
//!
//! ```ignore
//! use graine_seeding::prelude::*;
//!
//! let writer = Arc::new(MemoryWriter::new());
//! let seeder = Seeder::with_writer(writer.clone());
//!
//! seeder.register(
//!     FactoryDefinition::new("channel", "channels", "channelID")
//!         .provider(|_, _| json!({ "name": "general" })),
//! );
//! seeder.register(
//!     FactoryDefinition::new("user", "users", "userID")
//!         .with_ref(Ref::new("channel", "channelID"))
//!         .provider(|args, _| json!({ "name": args.get("name") })),
//! );
//!
//! // One channel, two users pointing at it.
//! let users = seeder
//!     .seed_many("user", SeedOptions::new(2).with_args(SeedArgs::new().set("name", "Jo")))
//!     .await?;
//!
//! // Reuse an existing row as a foreign key.
//! let channel = seeder.seed("channel", SeedArgs::new()).await?;
//! seeder.seed("user", SeedArgs::new().set("channelID", &channel)).await?;
//! ```
//!
//! # Reference resolution
//!
//! For every ref of the seeded factory, in declaration order:
//!
//! - an explicit argument wins: a row object contributes its primary key, a
//!   number is used as is, `null` is accepted for optional refs
//! - otherwise, a row of the referenced factory already produced in this call
//!   is reused
//! - otherwise the referenced factory is seeded recursively
//!
//! Passing `reuse_refs = false` skips the reuse step so every dependency gets
//! a fresh row.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod args;
pub mod error;
pub mod factory;
pub mod prelude;
pub mod record;
pub mod seeder;
pub mod writer;

// Re-export commonly used types at crate root
pub use args::{Arg, Deferred, SeedArgs};
pub use error::{SeedingError, SeedingResult};
pub use factory::{Factory, FactoryDefinition, FactoryRegistry, Ref, to_record};
pub use record::{Context, Record, SeedId, SeedResult};
pub use seeder::{ResolvedRefs, SeedOptions, Seeder};
pub use writer::{MemoryWriter, Writer};
