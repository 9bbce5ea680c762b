//! The fixture store.
//!
//! Owns the mapping from fixture keys to definitions. Loaded once, then
//! read-only for the lifetime of the process or test run.

use std::collections::HashMap;
use std::path::Path;

use super::{FixtureData, FixtureDefinition, FixtureKey, FixtureParser};
use crate::error::{FixtureError, FixtureResult};

/// Immutable lookup over the universe of fixture definitions.
///
/// A store is built once from parsed [`FixtureData`] and never mutated
/// afterwards; it is therefore safe to share behind an `Arc` for
/// concurrent resolution without locking.
///
/// # Example
///
/// ```no_run
/// use fixtura::fixtures::FixtureStore;
/// use std::path::Path;
///
/// let store = FixtureStore::load_from_path(Path::new("tests/fixtures/data/billing.json"))?;
/// # Ok::<(), fixtura::FixtureError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct FixtureStore {
	definitions: HashMap<FixtureKey, FixtureDefinition>,
}

impl FixtureStore {
	/// Builds a store from parsed fixture data.
	///
	/// # Errors
	///
	/// Returns `DuplicateKey` if two records declare the same
	/// (model, variant) key.
	pub fn from_data(data: FixtureData) -> FixtureResult<Self> {
		let mut definitions = HashMap::with_capacity(data.len());
		for record in data {
			let key = record.key();
			if definitions.contains_key(&key) {
				return Err(FixtureError::DuplicateKey(key));
			}
			definitions.insert(key, record.fields);
		}

		tracing::debug!(count = definitions.len(), "fixture store loaded");
		Ok(Self { definitions })
	}

	/// Parses a fixture file and builds a store from it.
	pub fn load_from_path(path: &Path) -> FixtureResult<Self> {
		Self::from_data(FixtureParser::new().parse_file(path)?)
	}

	/// Parses multiple fixture files and builds one combined store.
	pub fn load_from_paths(paths: &[&Path]) -> FixtureResult<Self> {
		Self::from_data(FixtureParser::new().parse_files(paths)?)
	}

	/// Looks up the definition for the exact key.
	///
	/// There is no fallback to a different variant; callers wanting the
	/// default variant must build the key with `"default"` explicitly.
	///
	/// # Errors
	///
	/// Returns `NotFound` when no definition exists for the key.
	pub fn lookup(&self, key: &FixtureKey) -> FixtureResult<&FixtureDefinition> {
		self.definitions
			.get(key)
			.ok_or_else(|| FixtureError::NotFound(key.clone()))
	}

	/// Returns true if a definition exists for the key.
	pub fn contains(&self, key: &FixtureKey) -> bool {
		self.definitions.contains_key(key)
	}

	/// Returns the number of definitions.
	pub fn len(&self) -> usize {
		self.definitions.len()
	}

	/// Returns true if the store holds no definitions.
	pub fn is_empty(&self) -> bool {
		self.definitions.is_empty()
	}

	/// Returns an iterator over all keys in the store.
	pub fn keys(&self) -> impl Iterator<Item = &FixtureKey> {
		self.definitions.keys()
	}
}
