//! Error types for fixture loading and resolution.
//!
//! This module defines the error types used throughout the fixtura crate.

use thiserror::Error;

use crate::fixtures::FixtureKey;

/// Errors that can occur while loading fixture sources or resolving fixtures.
#[derive(Debug, Error)]
pub enum FixtureError {
	/// Source data could not be parsed into fixture records at load time.
	#[error("Malformed fixture source: {0}")]
	MalformedSource(String),

	/// Two fixture records declare the same (model, variant) key at load time.
	#[error("Duplicate fixture key: {0}")]
	DuplicateKey(FixtureKey),

	/// No fixture definition exists for the requested key.
	#[error("Fixture not found: {0}")]
	NotFound(FixtureKey),

	/// The reference graph contains a cycle.
	#[error("Cyclic fixture reference: {chain}")]
	CyclicReference {
		/// The chain of keys that closed the cycle, outermost first.
		chain: String,
	},

	/// A fixture value cannot be coerced to the target field's type.
	#[error("Cannot coerce field `{field}`: expected {expected}, found {actual}")]
	TypeCoercion {
		/// Field being bound.
		field: String,
		/// Type the constructor slot expects.
		expected: String,
		/// What the resolved value actually was.
		actual: String,
	},

	/// The resolved field set does not match the model's canonical constructor.
	#[error("No matching constructor for `{model}`: {detail}")]
	NoMatchingConstructor {
		/// Model identifier being constructed.
		model: String,
		/// Which parameter was missing or unexpected.
		detail: String,
	},

	/// No constructor binding is registered for a referenced model identifier.
	#[error("Model not registered: {0}")]
	ModelNotRegistered(String),

	/// The process-wide fixture store has not been installed yet.
	#[error("Fixture store not initialized; call install_store first")]
	StoreNotInitialized,

	/// Fixture file not found.
	#[error("Fixture file not found: {0}")]
	FileNotFound(String),

	/// Unsupported file extension.
	#[error("Unsupported file extension: {0}")]
	UnsupportedExtension(String),

	/// I/O operation failed.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	/// JSON serialization error.
	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	/// YAML serialization error (when the yaml feature is enabled).
	#[cfg(feature = "yaml")]
	#[error("YAML error: {0}")]
	Yaml(#[from] serde_yaml::Error),
}

/// Result type alias for fixture operations.
pub type FixtureResult<T> = Result<T, FixtureError>;
