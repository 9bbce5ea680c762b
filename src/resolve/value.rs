//! Resolved values.
//!
//! After the resolver walks a fixture definition, every reference has been
//! turned into a constructed instance and every scalar is ready to bind.
//! [`ResolvedFields`] is the field map handed to a model's canonical
//! constructor; its take-style accessors perform the minimal coercion
//! needed to bind values to constructor slots.

use std::any::{Any, type_name};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{FixtureError, FixtureResult};
use crate::resolve::FixtureModel;

/// A fully-resolved fixture field value.
pub enum ResolvedValue {
	/// Explicit null.
	Null,
	/// Boolean scalar.
	Bool(bool),
	/// Numeric scalar.
	Number(serde_json::Number),
	/// String scalar.
	String(String),
	/// Ordered sequence of resolved values.
	Sequence(Vec<ResolvedValue>),
	/// Nested inline definition, resolved field by field.
	Fields(ResolvedFields),
	/// A constructed instance of a referenced model.
	Instance(Box<dyn Any + Send>),
}

impl ResolvedValue {
	/// Returns a short description of the value's kind for error messages.
	pub fn kind(&self) -> &'static str {
		match self {
			Self::Null => "null",
			Self::Bool(_) => "boolean",
			Self::Number(_) => "number",
			Self::String(_) => "string",
			Self::Sequence(_) => "sequence",
			Self::Fields(_) => "nested definition",
			Self::Instance(_) => "model instance",
		}
	}
}

impl fmt::Debug for ResolvedValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Null => write!(f, "Null"),
			Self::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
			Self::Number(n) => f.debug_tuple("Number").field(n).finish(),
			Self::String(s) => f.debug_tuple("String").field(s).finish(),
			Self::Sequence(items) => f.debug_tuple("Sequence").field(items).finish(),
			Self::Fields(fields) => f.debug_tuple("Fields").field(fields).finish(),
			Self::Instance(_) => write!(f, "Instance(..)"),
		}
	}
}

/// The resolved field map a canonical constructor consumes.
///
/// Accessors take fields out of the map; after construction the resolver
/// calls [`finish`](Self::finish), so a field set that does not match the
/// constructor's parameter set exactly fails with `NoMatchingConstructor`.
///
/// # Example
///
/// ```
/// use fixtura::resolve::{ResolvedFields, ResolvedValue};
///
/// let mut fields = ResolvedFields::new("billing.Order");
/// fields.insert("customer", ResolvedValue::String("john".to_string()));
/// assert_eq!(fields.string("customer").unwrap(), "john");
/// fields.finish().unwrap();
/// ```
#[derive(Debug)]
pub struct ResolvedFields {
	model: String,
	values: HashMap<String, ResolvedValue>,
}

impl ResolvedFields {
	/// Creates an empty field map for the given model identifier.
	///
	/// The model identifier is only used for error reporting.
	pub fn new(model: impl Into<String>) -> Self {
		Self {
			model: model.into(),
			values: HashMap::new(),
		}
	}

	/// Returns the model identifier these fields are bound for.
	pub fn model(&self) -> &str {
		&self.model
	}

	pub(crate) fn set_model(&mut self, model: impl Into<String>) {
		self.model = model.into();
	}

	/// Inserts a resolved value under a field name.
	pub fn insert(&mut self, name: impl Into<String>, value: ResolvedValue) {
		self.values.insert(name.into(), value);
	}

	/// Overlays another field map on top of this one.
	pub(crate) fn merge(&mut self, other: ResolvedFields) {
		self.values.extend(other.values);
	}

	/// Returns the number of unconsumed fields.
	pub fn len(&self) -> usize {
		self.values.len()
	}

	/// Returns true if every field has been consumed.
	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	/// Takes a required field out of the map.
	///
	/// # Errors
	///
	/// Returns `NoMatchingConstructor` when the field is absent.
	pub fn take(&mut self, name: &str) -> FixtureResult<ResolvedValue> {
		self.values
			.remove(name)
			.ok_or_else(|| FixtureError::NoMatchingConstructor {
				model: self.model.clone(),
				detail: format!("missing parameter `{}`", name),
			})
	}

	/// Takes an optional field out of the map; `Null` counts as absent.
	pub fn take_opt(&mut self, name: &str) -> Option<ResolvedValue> {
		match self.values.remove(name) {
			Some(ResolvedValue::Null) | None => None,
			Some(value) => Some(value),
		}
	}

	/// Takes a string field.
	pub fn string(&mut self, name: &str) -> FixtureResult<String> {
		match self.take(name)? {
			ResolvedValue::String(s) => Ok(s),
			other => Err(self.coercion(name, "string", other.kind())),
		}
	}

	/// Takes an optional string field.
	pub fn opt_string(&mut self, name: &str) -> FixtureResult<Option<String>> {
		match self.take_opt(name) {
			None => Ok(None),
			Some(ResolvedValue::String(s)) => Ok(Some(s)),
			Some(other) => Err(self.coercion(name, "string", other.kind())),
		}
	}

	/// Takes a signed integer field.
	pub fn i64(&mut self, name: &str) -> FixtureResult<i64> {
		match self.take(name)? {
			ResolvedValue::Number(n) => n
				.as_i64()
				.ok_or_else(|| self.coercion(name, "integer", format!("number {}", n))),
			other => Err(self.coercion(name, "integer", other.kind())),
		}
	}

	/// Takes an optional signed integer field.
	pub fn opt_i64(&mut self, name: &str) -> FixtureResult<Option<i64>> {
		match self.take_opt(name) {
			None => Ok(None),
			Some(ResolvedValue::Number(n)) => n
				.as_i64()
				.map(Some)
				.ok_or_else(|| self.coercion(name, "integer", format!("number {}", n))),
			Some(other) => Err(self.coercion(name, "integer", other.kind())),
		}
	}

	/// Takes an unsigned integer field.
	pub fn u64(&mut self, name: &str) -> FixtureResult<u64> {
		match self.take(name)? {
			ResolvedValue::Number(n) => n
				.as_u64()
				.ok_or_else(|| self.coercion(name, "unsigned integer", format!("number {}", n))),
			other => Err(self.coercion(name, "unsigned integer", other.kind())),
		}
	}

	/// Takes a float field. Integer values widen to `f64`; nothing else does.
	pub fn f64(&mut self, name: &str) -> FixtureResult<f64> {
		match self.take(name)? {
			ResolvedValue::Number(n) => n
				.as_f64()
				.ok_or_else(|| self.coercion(name, "float", format!("number {}", n))),
			other => Err(self.coercion(name, "float", other.kind())),
		}
	}

	/// Takes an optional float field.
	pub fn opt_f64(&mut self, name: &str) -> FixtureResult<Option<f64>> {
		match self.take_opt(name) {
			None => Ok(None),
			Some(ResolvedValue::Number(n)) => n
				.as_f64()
				.map(Some)
				.ok_or_else(|| self.coercion(name, "float", format!("number {}", n))),
			Some(other) => Err(self.coercion(name, "float", other.kind())),
		}
	}

	/// Takes a boolean field.
	pub fn bool(&mut self, name: &str) -> FixtureResult<bool> {
		match self.take(name)? {
			ResolvedValue::Bool(b) => Ok(b),
			other => Err(self.coercion(name, "boolean", other.kind())),
		}
	}

	/// Takes an optional boolean field.
	pub fn opt_bool(&mut self, name: &str) -> FixtureResult<Option<bool>> {
		match self.take_opt(name) {
			None => Ok(None),
			Some(ResolvedValue::Bool(b)) => Ok(Some(b)),
			Some(other) => Err(self.coercion(name, "boolean", other.kind())),
		}
	}

	/// Takes a string field and parses it, typically into an enum.
	pub fn parsed<T>(&mut self, name: &str) -> FixtureResult<T>
	where
		T: FromStr,
	{
		let raw = self.string(name)?;
		raw.parse().map_err(|_| {
			self.coercion(name, type_name::<T>(), format!("unparsable string \"{}\"", raw))
		})
	}

	/// Takes a sequence of string scalars.
	pub fn strings(&mut self, name: &str) -> FixtureResult<Vec<String>> {
		match self.take(name)? {
			ResolvedValue::Sequence(items) => items
				.into_iter()
				.map(|item| match item {
					ResolvedValue::String(s) => Ok(s),
					other => Err(self.coercion(name, "sequence of strings", other.kind())),
				})
				.collect(),
			other => Err(self.coercion(name, "sequence of strings", other.kind())),
		}
	}

	/// Takes a resolved sub-instance of a referenced model.
	pub fn instance<T: Any>(&mut self, name: &str) -> FixtureResult<T> {
		match self.take(name)? {
			ResolvedValue::Instance(boxed) => self.downcast(name, boxed),
			other => Err(self.coercion(name, type_name::<T>(), other.kind())),
		}
	}

	/// Takes an optional resolved sub-instance.
	pub fn opt_instance<T: Any>(&mut self, name: &str) -> FixtureResult<Option<T>> {
		match self.take_opt(name) {
			None => Ok(None),
			Some(ResolvedValue::Instance(boxed)) => self.downcast(name, boxed).map(Some),
			Some(other) => Err(self.coercion(name, type_name::<T>(), other.kind())),
		}
	}

	/// Takes an ordered sequence of resolved sub-instances.
	pub fn instances<T: Any>(&mut self, name: &str) -> FixtureResult<Vec<T>> {
		match self.take(name)? {
			ResolvedValue::Sequence(items) => items
				.into_iter()
				.map(|item| match item {
					ResolvedValue::Instance(boxed) => self.downcast(name, boxed),
					other => Err(self.coercion(name, type_name::<T>(), other.kind())),
				})
				.collect(),
			other => Err(self.coercion(name, "sequence", other.kind())),
		}
	}

	/// Constructs a model from a nested inline definition.
	///
	/// The field's declared type is the target; the inline fields are the
	/// anonymous definition body. A resolved reference is also accepted.
	pub fn nested<T: FixtureModel>(&mut self, name: &str) -> FixtureResult<T> {
		match self.take(name)? {
			ResolvedValue::Fields(mut fields) => {
				fields.set_model(T::model_id());
				let value = T::from_fields(&mut fields)?;
				fields.finish()?;
				Ok(value)
			}
			ResolvedValue::Instance(boxed) => self.downcast(name, boxed),
			other => Err(self.coercion(name, type_name::<T>(), other.kind())),
		}
	}

	/// Fails with `NoMatchingConstructor` if any field was not consumed.
	pub fn finish(&mut self) -> FixtureResult<()> {
		if self.values.is_empty() {
			return Ok(());
		}
		let mut names: Vec<String> = self.values.keys().map(|n| format!("`{}`", n)).collect();
		names.sort();
		Err(FixtureError::NoMatchingConstructor {
			model: self.model.clone(),
			detail: format!("unexpected parameter(s): {}", names.join(", ")),
		})
	}

	fn downcast<T: Any>(&self, name: &str, boxed: Box<dyn Any + Send>) -> FixtureResult<T> {
		boxed.downcast::<T>().map(|value| *value).map_err(|_| {
			self.coercion(name, type_name::<T>(), "an instance of a different model")
		})
	}

	fn coercion(
		&self,
		field: &str,
		expected: impl Into<String>,
		actual: impl Into<String>,
	) -> FixtureError {
		FixtureError::TypeCoercion {
			field: field.to_string(),
			expected: expected.into(),
			actual: actual.into(),
		}
	}
}
