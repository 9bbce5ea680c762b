//! Fixture format definitions.
//!
//! This module defines the data structures that make up the universe of
//! fixture definitions: keys, values, definitions and parsed records.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use serde_json::Value;

use crate::error::{FixtureError, FixtureResult};

/// The variant name used when a caller does not specify one.
pub const DEFAULT_VARIANT: &str = "default";

/// Reserved field key marking a value object as a fixture reference.
pub(crate) const REF_MODEL_KEY: &str = "$fixture";

/// Reserved field key selecting the referenced fixture's variant.
pub(crate) const REF_VARIANT_KEY: &str = "$variant";

/// Identity of a fixture definition: a target model plus a variant name.
///
/// Two keys are equal iff both components match exactly (case-sensitive).
///
/// # Example
///
/// ```
/// use fixtura::fixtures::FixtureKey;
///
/// let key = FixtureKey::new("billing.Invoice", "invoice for john and jane");
/// assert_eq!(key.model(), "billing.Invoice");
/// assert_ne!(key, FixtureKey::default_variant("billing.Invoice"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FixtureKey {
	model: String,
	variant: String,
}

impl FixtureKey {
	/// Creates a key for the given model and variant.
	pub fn new(model: impl Into<String>, variant: impl Into<String>) -> Self {
		Self {
			model: model.into(),
			variant: variant.into(),
		}
	}

	/// Creates a key for the given model with the `"default"` variant.
	pub fn default_variant(model: impl Into<String>) -> Self {
		Self::new(model, DEFAULT_VARIANT)
	}

	/// Returns the model identifier (e.g., "billing.Invoice").
	pub fn model(&self) -> &str {
		&self.model
	}

	/// Returns the variant name.
	pub fn variant(&self) -> &str {
		&self.variant
	}
}

impl fmt::Display for FixtureKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} (variant `{}`)", self.model, self.variant)
	}
}

/// A reference to another fixture, resolved recursively during resolution.
///
/// In source data a reference is an object carrying the reserved
/// `"$fixture"` key, optionally a `"$variant"` key, and any number of
/// override fields applied on top of the referenced definition:
///
/// ```json
/// {"$fixture": "billing.Order", "$variant": "order for john", "total": 99.0}
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FixtureRef {
	/// Referenced model identifier.
	pub model: String,
	/// Referenced variant; `"default"` when the source omits it.
	pub variant: String,
	/// Fields overlaid on the referenced definition before construction.
	pub overrides: FixtureDefinition,
}

impl FixtureRef {
	/// Creates a reference to the given model and variant with no overrides.
	pub fn new(model: impl Into<String>, variant: impl Into<String>) -> Self {
		Self {
			model: model.into(),
			variant: variant.into(),
			overrides: FixtureDefinition::new(),
		}
	}

	/// Returns the store key this reference points at.
	pub fn key(&self) -> FixtureKey {
		FixtureKey::new(self.model.clone(), self.variant.clone())
	}
}

/// A single fixture field value.
///
/// Tagged variant over scalars, ordered sequences, nested inline
/// definitions and references to other fixtures.
#[derive(Debug, Clone, PartialEq)]
pub enum FixtureValue {
	/// Explicit null.
	Null,
	/// Boolean scalar.
	Bool(bool),
	/// Numeric scalar (integer or float).
	Number(serde_json::Number),
	/// String scalar.
	String(String),
	/// Ordered sequence of values.
	Sequence(Vec<FixtureValue>),
	/// Nested inline definition.
	Definition(FixtureDefinition),
	/// Reference to another fixture key.
	Reference(FixtureRef),
}

impl FixtureValue {
	/// Converts a raw JSON value into a fixture value.
	///
	/// Objects carrying the reserved `"$fixture"` key become references;
	/// any other object becomes a nested inline definition. Reserved
	/// `$`-prefixed keys are rejected outside of the reference form.
	pub fn from_json(value: Value) -> FixtureResult<Self> {
		match value {
			Value::Null => Ok(Self::Null),
			Value::Bool(b) => Ok(Self::Bool(b)),
			Value::Number(n) => Ok(Self::Number(n)),
			Value::String(s) => Ok(Self::String(s)),
			Value::Array(items) => {
				let mut sequence = Vec::with_capacity(items.len());
				for item in items {
					sequence.push(Self::from_json(item)?);
				}
				Ok(Self::Sequence(sequence))
			}
			Value::Object(mut map) => match map.remove(REF_MODEL_KEY) {
				Some(model) => Self::reference_from_json(model, map),
				None => Ok(Self::Definition(FixtureDefinition::from_json_map(map)?)),
			},
		}
	}

	/// Converts this value back into raw JSON.
	pub fn to_json(&self) -> Value {
		match self {
			Self::Null => Value::Null,
			Self::Bool(b) => Value::Bool(*b),
			Self::Number(n) => Value::Number(n.clone()),
			Self::String(s) => Value::String(s.clone()),
			Self::Sequence(items) => Value::Array(items.iter().map(Self::to_json).collect()),
			Self::Definition(definition) => definition.to_json(),
			Self::Reference(reference) => {
				let mut map = serde_json::Map::new();
				map.insert(
					REF_MODEL_KEY.to_string(),
					Value::String(reference.model.clone()),
				);
				if reference.variant != DEFAULT_VARIANT {
					map.insert(
						REF_VARIANT_KEY.to_string(),
						Value::String(reference.variant.clone()),
					);
				}
				if let Value::Object(overrides) = reference.overrides.to_json() {
					map.extend(overrides);
				}
				Value::Object(map)
			}
		}
	}

	/// Parses the reference form of a value object.
	fn reference_from_json(
		model: Value,
		mut map: serde_json::Map<String, Value>,
	) -> FixtureResult<Self> {
		let Value::String(model) = model else {
			return Err(FixtureError::MalformedSource(format!(
				"`{}` must be a string, found {}",
				REF_MODEL_KEY, model
			)));
		};
		validate_model_id(&model)?;

		let variant = match map.remove(REF_VARIANT_KEY) {
			Some(Value::String(variant)) => variant,
			Some(other) => {
				return Err(FixtureError::MalformedSource(format!(
					"`{}` must be a string, found {}",
					REF_VARIANT_KEY, other
				)));
			}
			None => DEFAULT_VARIANT.to_string(),
		};

		let overrides = FixtureDefinition::from_json_map(map)?;
		Ok(Self::Reference(FixtureRef {
			model,
			variant,
			overrides,
		}))
	}
}

/// An order-irrelevant mapping from field names to fixture values.
///
/// Owned by the store and immutable once loaded.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FixtureDefinition {
	fields: HashMap<String, FixtureValue>,
}

impl FixtureDefinition {
	/// Creates an empty definition.
	pub fn new() -> Self {
		Self::default()
	}

	/// Converts a raw JSON object into a definition.
	///
	/// # Errors
	///
	/// Returns `MalformedSource` if the value is not an object or if a
	/// plain definition carries a reserved `$`-prefixed key.
	pub fn from_json(value: Value) -> FixtureResult<Self> {
		match value {
			Value::Object(map) => Self::from_json_map(map),
			other => Err(FixtureError::MalformedSource(format!(
				"fixture fields must be an object, found {}",
				other
			))),
		}
	}

	pub(crate) fn from_json_map(map: serde_json::Map<String, Value>) -> FixtureResult<Self> {
		let mut fields = HashMap::with_capacity(map.len());
		for (name, value) in map {
			if name.starts_with('$') {
				return Err(FixtureError::MalformedSource(format!(
					"reserved key `{}` is only valid in a fixture reference",
					name
				)));
			}
			fields.insert(name, FixtureValue::from_json(value)?);
		}
		Ok(Self { fields })
	}

	/// Converts the definition back into a raw JSON object.
	pub fn to_json(&self) -> Value {
		let map: serde_json::Map<String, Value> = self
			.fields
			.iter()
			.map(|(name, value)| (name.clone(), value.to_json()))
			.collect();
		Value::Object(map)
	}

	/// Returns the value of a field, if present.
	pub fn get(&self, name: &str) -> Option<&FixtureValue> {
		self.fields.get(name)
	}

	/// Returns an iterator over the fields.
	pub fn iter(&self) -> impl Iterator<Item = (&String, &FixtureValue)> {
		self.fields.iter()
	}

	/// Returns the number of fields.
	pub fn len(&self) -> usize {
		self.fields.len()
	}

	/// Returns true if the definition has no fields.
	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}
}

/// One parsed fixture source entry.
///
/// # Example
///
/// ```json
/// {
///   "model": "billing.Invoice",
///   "variant": "invoice for john and jane",
///   "fields": {
///     "number": 1,
///     "orders": [{"$fixture": "billing.Order", "$variant": "order for john"}]
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FixtureRecord {
	/// Model identifier in "app.Model" format (e.g., "billing.Invoice").
	pub model: String,

	/// Variant name; `"default"` when the source omits it.
	pub variant: String,

	/// Field values for this fixture.
	pub fields: FixtureDefinition,
}

impl FixtureRecord {
	/// Creates a record for the default variant.
	pub fn new(model: impl Into<String>, fields: FixtureDefinition) -> Self {
		Self::with_variant(model, DEFAULT_VARIANT, fields)
	}

	/// Creates a record for a named variant.
	pub fn with_variant(
		model: impl Into<String>,
		variant: impl Into<String>,
		fields: FixtureDefinition,
	) -> Self {
		Self {
			model: model.into(),
			variant: variant.into(),
			fields,
		}
	}

	/// Returns the store key for this record.
	pub fn key(&self) -> FixtureKey {
		FixtureKey::new(self.model.clone(), self.variant.clone())
	}

	/// Returns the app label portion of the model identifier.
	pub fn app_label(&self) -> Option<&str> {
		self.model.split('.').next()
	}

	/// Returns the model name portion of the model identifier.
	pub fn model_name(&self) -> Option<&str> {
		self.model.split('.').nth(1)
	}
}

/// Supported fixture file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum FixtureFormat {
	/// JSON format (default).
	#[default]
	Json,

	/// YAML format (requires the `yaml` feature).
	Yaml,
}

impl FixtureFormat {
	/// Determines the fixture format from a file extension.
	///
	/// # Example
	///
	/// ```
	/// # use fixtura::fixtures::FixtureFormat;
	/// assert_eq!(FixtureFormat::from_extension("json"), Some(FixtureFormat::Json));
	/// assert_eq!(FixtureFormat::from_extension("yml"), Some(FixtureFormat::Yaml));
	/// assert_eq!(FixtureFormat::from_extension("xml"), None);
	/// ```
	pub fn from_extension(ext: &str) -> Option<Self> {
		match ext.to_lowercase().as_str() {
			"json" => Some(Self::Json),
			"yaml" | "yml" => Some(Self::Yaml),
			_ => None,
		}
	}

	/// Determines the fixture format from a file path.
	pub fn from_path(path: &Path) -> Option<Self> {
		path.extension()
			.and_then(|ext| ext.to_str())
			.and_then(Self::from_extension)
	}

	/// Returns the default file extension for this format.
	pub fn extension(&self) -> &'static str {
		match self {
			Self::Json => "json",
			Self::Yaml => "yaml",
		}
	}

	/// Returns the MIME type for this format.
	pub fn mime_type(&self) -> &'static str {
		match self {
			Self::Json => "application/json",
			Self::Yaml => "application/x-yaml",
		}
	}
}

impl fmt::Display for FixtureFormat {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Json => write!(f, "JSON"),
			Self::Yaml => write!(f, "YAML"),
		}
	}
}

/// Parsed fixture data containing multiple records.
#[derive(Debug, Clone)]
pub struct FixtureData {
	/// Collection of fixture records.
	pub records: Vec<FixtureRecord>,

	/// Format the data was parsed from.
	pub format: FixtureFormat,

	/// Optional source file path.
	pub source: Option<String>,
}

impl FixtureData {
	/// Creates a new empty fixture data container.
	pub fn new(format: FixtureFormat) -> Self {
		Self {
			records: Vec::new(),
			format,
			source: None,
		}
	}

	/// Creates fixture data from a vector of records.
	pub fn from_records(records: Vec<FixtureRecord>, format: FixtureFormat) -> Self {
		Self {
			records,
			format,
			source: None,
		}
	}

	/// Sets the source file path.
	pub fn with_source(mut self, source: impl Into<String>) -> Self {
		self.source = Some(source.into());
		self
	}

	/// Returns the number of records.
	pub fn len(&self) -> usize {
		self.records.len()
	}

	/// Returns true if there are no records.
	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}

	/// Adds a record to the collection.
	pub fn push(&mut self, record: FixtureRecord) {
		self.records.push(record);
	}

	/// Returns an iterator over the records.
	pub fn iter(&self) -> impl Iterator<Item = &FixtureRecord> {
		self.records.iter()
	}
}

impl IntoIterator for FixtureData {
	type Item = FixtureRecord;
	type IntoIter = std::vec::IntoIter<FixtureRecord>;

	fn into_iter(self) -> Self::IntoIter {
		self.records.into_iter()
	}
}

impl<'a> IntoIterator for &'a FixtureData {
	type Item = &'a FixtureRecord;
	type IntoIter = std::slice::Iter<'a, FixtureRecord>;

	fn into_iter(self) -> Self::IntoIter {
		self.records.iter()
	}
}

/// Validates a model identifier: it must be in "app.Model" format.
pub(crate) fn validate_model_id(model: &str) -> FixtureResult<()> {
	if !model.contains('.') {
		return Err(FixtureError::MalformedSource(format!(
			"model identifier `{}` must be in `app.Model` format",
			model
		)));
	}
	Ok(())
}
