//! The resolution side: resolved values, constructor bindings and the
//! resolution engine itself.

mod registry;
mod resolver;
mod value;

pub use registry::{AnyBinder, FixtureModel, ModelRegistry, register_model};
pub use resolver::FixtureResolver;
pub use value::{ResolvedFields, ResolvedValue};
