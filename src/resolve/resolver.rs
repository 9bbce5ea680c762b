//! The fixture resolution engine.
//!
//! Turns a (model type, variant) request into a concrete instance: looks up
//! the raw definition in the store, walks it resolving nested definitions
//! and references recursively, then binds the resolved fields through the
//! model's canonical constructor.

use std::any::Any;
use std::sync::Arc;

use super::registry::{FixtureModel, ModelRegistry};
use super::value::{ResolvedFields, ResolvedValue};
use crate::error::{FixtureError, FixtureResult};
use crate::fixtures::{DEFAULT_VARIANT, FixtureDefinition, FixtureKey, FixtureRef, FixtureStore, FixtureValue};

/// Resolves fixture definitions into constructed model instances.
///
/// The resolver holds no mutable state across calls; the per-call
/// cycle-detection stack is local to each `resolve` invocation, so a
/// resolver can serve concurrent resolutions over its shared store.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use std::sync::Arc;
/// use fixtura::prelude::*;
/// # struct Invoice;
/// # impl FixtureModel for Invoice {
/// #     fn model_id() -> &'static str { "billing.Invoice" }
/// #     fn from_fields(_: &mut ResolvedFields) -> FixtureResult<Self> { Ok(Self) }
/// # }
///
/// let store = Arc::new(FixtureStore::load_from_path(Path::new("fixtures/billing.json"))?);
/// let resolver = FixtureResolver::new(store);
/// let invoice: Invoice = resolver.resolve("invoice for john and jane")?;
/// # Ok::<(), FixtureError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FixtureResolver {
	store: Arc<FixtureStore>,
	registry: ModelRegistry,
}

impl FixtureResolver {
	/// Creates a resolver over a loaded store.
	pub fn new(store: Arc<FixtureStore>) -> Self {
		Self {
			store,
			registry: ModelRegistry::new(),
		}
	}

	/// Returns the store this resolver reads from.
	pub fn store(&self) -> &Arc<FixtureStore> {
		&self.store
	}

	/// Resolves the named variant of `M` into a fresh instance.
	///
	/// # Errors
	///
	/// Propagates `NotFound` unchanged when the key has no definition, and
	/// surfaces `CyclicReference`, `TypeCoercion`, `NoMatchingConstructor`
	/// and `ModelNotRegistered` from the walk. Any failure aborts the whole
	/// call; no partial instance is returned.
	pub fn resolve<M: FixtureModel>(&self, variant: &str) -> FixtureResult<M> {
		let key = FixtureKey::new(M::model_id(), variant);
		tracing::debug!(model = M::model_id(), variant, "resolving fixture");

		let mut stack = ResolutionStack::default();
		stack.enter(key.clone())?;
		let definition = self.store.lookup(&key)?;
		let mut fields = self.resolve_definition(M::model_id(), definition, &mut stack)?;
		let instance = M::from_fields(&mut fields)?;
		fields.finish()?;
		stack.leave();

		Ok(instance)
	}

	/// Resolves the `"default"` variant of `M`.
	///
	/// Equivalent to `resolve(DEFAULT_VARIANT)`.
	pub fn resolve_default<M: FixtureModel>(&self) -> FixtureResult<M> {
		self.resolve(DEFAULT_VARIANT)
	}

	/// Resolves a reference to another fixture into a constructed instance.
	fn resolve_reference(
		&self,
		reference: &FixtureRef,
		stack: &mut ResolutionStack,
	) -> FixtureResult<Box<dyn Any + Send>> {
		let key = reference.key();
		stack.enter(key.clone())?;

		let definition = self.store.lookup(&key)?;
		let mut fields = self.resolve_definition(&reference.model, definition, stack)?;
		if !reference.overrides.is_empty() {
			let overrides = self.resolve_definition(&reference.model, &reference.overrides, stack)?;
			fields.merge(overrides);
		}

		let instance = self.registry.construct(&reference.model, &mut fields)?;
		tracing::trace!(%key, "resolved fixture reference");

		stack.leave();
		Ok(instance)
	}

	/// Resolves a definition field by field.
	fn resolve_definition(
		&self,
		model: &str,
		definition: &FixtureDefinition,
		stack: &mut ResolutionStack,
	) -> FixtureResult<ResolvedFields> {
		let mut fields = ResolvedFields::new(model);
		for (name, value) in definition.iter() {
			fields.insert(name.clone(), self.resolve_value(model, value, stack)?);
		}
		Ok(fields)
	}

	/// Resolves a single fixture value.
	fn resolve_value(
		&self,
		model: &str,
		value: &FixtureValue,
		stack: &mut ResolutionStack,
	) -> FixtureResult<ResolvedValue> {
		match value {
			FixtureValue::Null => Ok(ResolvedValue::Null),
			FixtureValue::Bool(b) => Ok(ResolvedValue::Bool(*b)),
			FixtureValue::Number(n) => Ok(ResolvedValue::Number(n.clone())),
			FixtureValue::String(s) => Ok(ResolvedValue::String(s.clone())),
			FixtureValue::Sequence(items) => {
				let mut resolved = Vec::with_capacity(items.len());
				for item in items {
					resolved.push(self.resolve_value(model, item, stack)?);
				}
				Ok(ResolvedValue::Sequence(resolved))
			}
			FixtureValue::Definition(definition) => Ok(ResolvedValue::Fields(
				self.resolve_definition(model, definition, stack)?,
			)),
			FixtureValue::Reference(reference) => Ok(ResolvedValue::Instance(
				self.resolve_reference(reference, stack)?,
			)),
		}
	}
}

/// In-progress resolution keys, used to detect reference cycles.
///
/// Local to one top-level `resolve` call; never shared across concurrent
/// resolutions.
#[derive(Debug, Default)]
struct ResolutionStack {
	keys: Vec<FixtureKey>,
}

impl ResolutionStack {
	/// Pushes a key, failing if it is already being resolved.
	fn enter(&mut self, key: FixtureKey) -> FixtureResult<()> {
		if self.keys.contains(&key) {
			let chain = self
				.keys
				.iter()
				.map(ToString::to_string)
				.chain(std::iter::once(key.to_string()))
				.collect::<Vec<_>>()
				.join(" -> ");
			return Err(FixtureError::CyclicReference { chain });
		}
		self.keys.push(key);
		Ok(())
	}

	/// Pops the most recently entered key.
	fn leave(&mut self) {
		self.keys.pop();
	}
}
