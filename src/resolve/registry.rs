//! Model registry for fixture resolution.
//!
//! In a statically-typed target, constructor binding cannot be discovered
//! by reflection; each model type registers an explicit, compile-time
//! checked factory instead. The registry maps model identifiers to those
//! factories so references inside fixture definitions can be constructed.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use super::value::ResolvedFields;
use crate::error::{FixtureError, FixtureResult};

/// A model type constructible from resolved fixture fields.
///
/// Implementing this trait is the per-type registration that replaces
/// runtime reflection: `from_fields` is the canonical constructor, binding
/// the resolved field set to an instance.
///
/// # Example
///
/// ```
/// use fixtura::prelude::*;
///
/// struct Order {
///     customer: String,
///     total: f64,
/// }
///
/// impl FixtureModel for Order {
///     fn model_id() -> &'static str {
///         "billing.Order"
///     }
///
///     fn from_fields(fields: &mut ResolvedFields) -> FixtureResult<Self> {
///         Ok(Self {
///             customer: fields.string("customer")?,
///             total: fields.f64("total")?,
///         })
///     }
/// }
/// ```
pub trait FixtureModel: Sized + Send + 'static {
	/// Returns the model identifier (e.g., "billing.Order").
	fn model_id() -> &'static str;

	/// Binds resolved field values to a new instance.
	///
	/// Accessors consume fields from the map; the resolver verifies
	/// afterwards that the field set matched exactly.
	fn from_fields(fields: &mut ResolvedFields) -> FixtureResult<Self>;
}

/// Type-erased constructor binding stored in the registry.
pub trait AnyBinder: Send + Sync {
	/// Returns the model identifier this binder constructs.
	fn model_id(&self) -> &str;

	/// Constructs a boxed instance from resolved fields.
	///
	/// Fails with `NoMatchingConstructor` if the field set does not match
	/// the canonical constructor's parameter set exactly.
	fn construct(&self, fields: &mut ResolvedFields) -> FixtureResult<Box<dyn Any + Send>>;
}

/// Binder entry tying a registered model type to its constructor.
struct BinderEntry<M: FixtureModel> {
	_marker: PhantomData<fn() -> M>,
}

impl<M: FixtureModel> AnyBinder for BinderEntry<M> {
	fn model_id(&self) -> &str {
		M::model_id()
	}

	fn construct(&self, fields: &mut ResolvedFields) -> FixtureResult<Box<dyn Any + Send>> {
		let instance = M::from_fields(fields)?;
		fields.finish()?;
		Ok(Box::new(instance))
	}
}

/// Global registry of constructor bindings.
static MODEL_REGISTRY: Lazy<RwLock<HashMap<String, Arc<dyn AnyBinder>>>> =
	Lazy::new(|| RwLock::new(HashMap::new()));

/// Type ID registry for lookups by model type.
static TYPE_ID_REGISTRY: Lazy<RwLock<HashMap<TypeId, String>>> =
	Lazy::new(|| RwLock::new(HashMap::new()));

/// Registers a model's constructor binding in the global registry.
///
/// Registration is idempotent; registering the same model twice replaces
/// the previous binding.
///
/// # Example
///
/// ```ignore
/// register_model::<Order>();
/// register_model::<Invoice>();
/// ```
pub fn register_model<M: FixtureModel>() {
	let model_id = M::model_id().to_string();
	TYPE_ID_REGISTRY
		.write()
		.insert(TypeId::of::<M>(), model_id.clone());
	MODEL_REGISTRY.write().insert(
		model_id,
		Arc::new(BinderEntry::<M> {
			_marker: PhantomData,
		}),
	);
}

/// Model registry handle providing access to registered bindings.
#[derive(Debug, Default, Clone)]
pub struct ModelRegistry;

impl ModelRegistry {
	/// Creates a new registry handle.
	pub fn new() -> Self {
		Self
	}

	/// Gets the binder for the specified model identifier.
	pub fn get(&self, model_id: &str) -> Option<Arc<dyn AnyBinder>> {
		MODEL_REGISTRY.read().get(model_id).cloned()
	}

	/// Gets the binder registered for a model type.
	pub fn get_for_type<M: 'static>(&self) -> Option<Arc<dyn AnyBinder>> {
		let model_id = TYPE_ID_REGISTRY.read().get(&TypeId::of::<M>()).cloned()?;
		self.get(&model_id)
	}

	/// Checks if a binder is registered for the model identifier.
	pub fn has(&self, model_id: &str) -> bool {
		MODEL_REGISTRY.read().contains_key(model_id)
	}

	/// Returns all registered model identifiers.
	pub fn model_ids(&self) -> Vec<String> {
		MODEL_REGISTRY.read().keys().cloned().collect()
	}

	/// Returns the number of registered bindings.
	pub fn len(&self) -> usize {
		MODEL_REGISTRY.read().len()
	}

	/// Returns true if no bindings are registered.
	pub fn is_empty(&self) -> bool {
		MODEL_REGISTRY.read().is_empty()
	}

	/// Clears all registered bindings.
	///
	/// This is primarily useful for testing.
	pub fn clear(&self) {
		MODEL_REGISTRY.write().clear();
		TYPE_ID_REGISTRY.write().clear();
	}

	/// Constructs an instance of the identified model from resolved fields.
	///
	/// # Errors
	///
	/// Returns `ModelNotRegistered` if no binding exists for the model.
	pub fn construct(
		&self,
		model_id: &str,
		fields: &mut ResolvedFields,
	) -> FixtureResult<Box<dyn Any + Send>> {
		let binder = self
			.get(model_id)
			.ok_or_else(|| FixtureError::ModelNotRegistered(model_id.to_string()))?;
		binder.construct(fields)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	use crate::resolve::ResolvedValue;

	#[derive(Debug, PartialEq)]
	struct Widget {
		label: String,
	}

	impl FixtureModel for Widget {
		fn model_id() -> &'static str {
			"registry.Widget"
		}

		fn from_fields(fields: &mut ResolvedFields) -> FixtureResult<Self> {
			Ok(Self {
				label: fields.string("label")?,
			})
		}
	}

	#[rstest]
	fn test_register_and_get() {
		register_model::<Widget>();

		let registry = ModelRegistry::new();
		assert!(registry.has("registry.Widget"));
		assert!(!registry.has("registry.Other"));

		let binder = registry.get("registry.Widget").unwrap();
		assert_eq!(binder.model_id(), "registry.Widget");
	}

	#[rstest]
	fn test_get_for_type() {
		register_model::<Widget>();

		let registry = ModelRegistry::new();
		let binder = registry.get_for_type::<Widget>().unwrap();
		assert_eq!(binder.model_id(), "registry.Widget");
	}

	#[rstest]
	fn test_construct() {
		register_model::<Widget>();

		let mut fields = ResolvedFields::new("registry.Widget");
		fields.insert("label", ResolvedValue::String("gear".to_string()));

		let registry = ModelRegistry::new();
		let boxed = registry.construct("registry.Widget", &mut fields).unwrap();
		let widget = boxed.downcast::<Widget>().unwrap();
		assert_eq!(widget.label, "gear");
	}

	#[rstest]
	fn test_construct_unregistered_model() {
		let registry = ModelRegistry::new();
		let mut fields = ResolvedFields::new("registry.Ghost");

		let result = registry.construct("registry.Ghost", &mut fields);
		assert!(matches!(result, Err(FixtureError::ModelNotRegistered(_))));
	}

	#[rstest]
	fn test_construct_rejects_leftover_fields() {
		register_model::<Widget>();

		let mut fields = ResolvedFields::new("registry.Widget");
		fields.insert("label", ResolvedValue::String("gear".to_string()));
		fields.insert("color", ResolvedValue::String("red".to_string()));

		let registry = ModelRegistry::new();
		let result = registry.construct("registry.Widget", &mut fields);
		assert!(matches!(
			result,
			Err(FixtureError::NoMatchingConstructor { .. })
		));
	}
}
