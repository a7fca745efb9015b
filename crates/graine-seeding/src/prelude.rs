//! Convenience re-exports for common usage.
//!
//! # Example
//!
//! ```ignore
//! use graine_seeding::prelude::*;
//! ```

// Error types
pub use crate::error::{SeedingError, SeedingResult};

// Factory types
pub use crate::factory::{Factory, FactoryDefinition, Ref, to_record};

// Seeding
pub use crate::args::SeedArgs;
pub use crate::record::{Context, Record, SeedId, SeedResult};
pub use crate::seeder::{SeedOptions, Seeder};

// Writers
pub use crate::writer::{MemoryWriter, Writer};

// Commonly needed alongside factory definitions
pub use async_trait::async_trait;
pub use serde_json::{Value, json};
pub use std::sync::Arc;
