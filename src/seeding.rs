//! Seeding module.
//!
//! Factories, reference resolution and writers for seeding related rows.
//!
//! # Examples
//!
//! ```rust,no_run
//! use graine::seeding::{FactoryDefinition, Ref, Seeder};
//! ```

#[cfg(feature = "seeding")]
pub use graine_seeding::*;
