//! The fluent caller-facing facade.
//!
//! A [`Fixture`] is an immutable binding of a model type to a variant name;
//! it stores nothing else and delegates resolution to the engine:
//!
//! ```ignore
//! let invoice: Invoice = fixture::<Invoice>()
//!     .with_variant("invoice for john and jane")
//!     .get()?;
//! ```

use std::marker::PhantomData;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use crate::error::{FixtureError, FixtureResult};
use crate::fixtures::{DEFAULT_VARIANT, FixtureStore};
use crate::resolve::{FixtureModel, FixtureResolver};

/// Process-wide store used by [`Fixture::get`].
static INSTALLED_STORE: Lazy<RwLock<Option<Arc<FixtureStore>>>> = Lazy::new(|| RwLock::new(None));

/// Installs the process-wide fixture store used by [`Fixture::get`].
///
/// Loading must complete before resolution starts; installing freezes the
/// store behind an `Arc` so concurrent resolutions share it without
/// locking. Installing again replaces the previous store.
pub fn install_store(store: FixtureStore) -> Arc<FixtureStore> {
	let store = Arc::new(store);
	*INSTALLED_STORE.write() = Some(Arc::clone(&store));
	store
}

/// Returns the process-wide store, if one has been installed.
///
/// # Errors
///
/// Returns `StoreNotInitialized` when [`install_store`] has not been
/// called yet.
pub fn installed_store() -> FixtureResult<Arc<FixtureStore>> {
	INSTALLED_STORE
		.read()
		.clone()
		.ok_or(FixtureError::StoreNotInitialized)
}

/// Starts a fixture request for `M`, bound to the `"default"` variant.
pub fn fixture<M: FixtureModel>() -> Fixture<M> {
	Fixture::new()
}

/// An immutable binding of a model type to a variant name.
///
/// Rebinding with [`with_variant`](Self::with_variant) produces a new
/// binding; the original is never mutated and shares no state with it.
pub struct Fixture<M: FixtureModel> {
	variant: String,
	_marker: PhantomData<fn() -> M>,
}

impl<M: FixtureModel> Fixture<M> {
	/// Creates a binding to the `"default"` variant.
	pub fn new() -> Self {
		Self {
			variant: DEFAULT_VARIANT.to_string(),
			_marker: PhantomData,
		}
	}

	/// Returns an equivalent binding for a different variant.
	pub fn with_variant(&self, variant: impl Into<String>) -> Self {
		Self {
			variant: variant.into(),
			_marker: PhantomData,
		}
	}

	/// Returns the bound variant name.
	pub fn variant(&self) -> &str {
		&self.variant
	}

	/// Resolves the bound fixture through the process-wide store.
	///
	/// # Errors
	///
	/// Returns `StoreNotInitialized` if no store has been installed, and
	/// otherwise whatever [`FixtureResolver::resolve`] surfaces.
	pub fn get(&self) -> FixtureResult<M> {
		let resolver = FixtureResolver::new(installed_store()?);
		resolver.resolve(&self.variant)
	}

	/// Resolves the bound fixture through an explicit resolver.
	pub fn get_with(&self, resolver: &FixtureResolver) -> FixtureResult<M> {
		resolver.resolve(&self.variant)
	}
}

impl<M: FixtureModel> Default for Fixture<M> {
	fn default() -> Self {
		Self::new()
	}
}

impl<M: FixtureModel> Clone for Fixture<M> {
	fn clone(&self) -> Self {
		Self {
			variant: self.variant.clone(),
			_marker: PhantomData,
		}
	}
}
