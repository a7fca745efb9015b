//! Factory definitions, references and the per-seeder registry.

mod definition;
mod reference;
mod registry;

pub use definition::{Factory, FactoryDefinition, to_record};
pub use reference::Ref;
pub use registry::FactoryRegistry;
