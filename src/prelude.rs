//! Convenience re-exports for common usage.
//!
//! This module provides a single import for the most commonly used items
//! from the fixtura crate.
//!
//! # Example
//!
//! ```
//! use fixtura::prelude::*;
//! ```

// Error types
pub use crate::error::{FixtureError, FixtureResult};

// Store types
pub use crate::fixtures::{
	DEFAULT_VARIANT, FixtureData, FixtureDefinition, FixtureFormat, FixtureKey, FixtureParser,
	FixtureRecord, FixtureRef, FixtureSerializer, FixtureStore, FixtureValue,
};

// Resolution types
pub use crate::resolve::{
	FixtureModel, FixtureResolver, ModelRegistry, ResolvedFields, ResolvedValue, register_model,
};

// Facade
pub use crate::builder::{Fixture, fixture, install_store, installed_store};
