//! Test data loader helper.
//!
//! Provides convenient methods for loading fixture data files from the
//! tests/fixtures/data directory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use fixtura::prelude::*;

/// Test data loader for fixture files.
pub struct TestDataLoader {
	base_path: PathBuf,
}

impl TestDataLoader {
	/// Create a loader over the default test fixtures data directory.
	pub fn new() -> Self {
		Self {
			base_path: PathBuf::from("tests/fixtures/data"),
		}
	}

	/// Create a loader with a custom base path.
	pub fn with_base<P: AsRef<Path>>(base_path: P) -> Self {
		Self {
			base_path: base_path.as_ref().to_path_buf(),
		}
	}

	/// Get the full path to a test data file.
	pub fn path(&self, name: &str) -> PathBuf {
		self.base_path.join(name)
	}

	/// Load a store from a single test data file.
	///
	/// # Panics
	///
	/// Panics if the file cannot be loaded.
	pub fn store(&self, name: &str) -> FixtureStore {
		let path = self.path(name);
		FixtureStore::load_from_path(&path)
			.unwrap_or_else(|e| panic!("Failed to load test data {:?}: {}", path, e))
	}

	/// Build a resolver over a single test data file.
	pub fn resolver(&self, name: &str) -> FixtureResolver {
		FixtureResolver::new(Arc::new(self.store(name)))
	}
}

impl Default for TestDataLoader {
	fn default() -> Self {
		Self::new()
	}
}
