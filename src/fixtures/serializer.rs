//! Fixture serialization.
//!
//! This module converts fixture records back into source format, the
//! counterpart of [`FixtureParser`](super::FixtureParser).

use serde_json::Value;

use super::format::DEFAULT_VARIANT;
use super::{FixtureFormat, FixtureRecord};
use crate::error::FixtureResult;

/// Serializer for exporting fixture records.
#[derive(Debug, Clone)]
pub struct FixtureSerializer {
	/// Output format.
	format: FixtureFormat,

	/// Indentation level for pretty printing; 0 emits compact output.
	indent: usize,
}

impl FixtureSerializer {
	/// Creates a new fixture serializer with default settings.
	pub fn new() -> Self {
		Self {
			format: FixtureFormat::Json,
			indent: 2,
		}
	}

	/// Sets the output format.
	pub fn with_format(mut self, format: FixtureFormat) -> Self {
		self.format = format;
		self
	}

	/// Sets the indentation level.
	pub fn with_indent(mut self, indent: usize) -> Self {
		self.indent = indent;
		self
	}

	/// Serializes fixture records to a string.
	pub fn serialize(&self, records: &[FixtureRecord]) -> FixtureResult<String> {
		let value = Value::Array(records.iter().map(record_to_json).collect());
		match self.format {
			FixtureFormat::Json => self.serialize_json(&value),
			FixtureFormat::Yaml => self.serialize_yaml(&value),
		}
	}

	/// Writes serialized fixture records to a file.
	pub fn write_to_file(
		&self,
		records: &[FixtureRecord],
		path: &std::path::Path,
	) -> FixtureResult<()> {
		let content = self.serialize(records)?;
		std::fs::write(path, content)?;
		Ok(())
	}

	/// Returns the configured output format.
	pub fn format(&self) -> FixtureFormat {
		self.format
	}

	/// Returns the configured indentation level.
	pub fn indent(&self) -> usize {
		self.indent
	}

	fn serialize_json(&self, value: &Value) -> FixtureResult<String> {
		if self.indent > 0 {
			Ok(serde_json::to_string_pretty(value)?)
		} else {
			Ok(serde_json::to_string(value)?)
		}
	}

	#[cfg(feature = "yaml")]
	fn serialize_yaml(&self, value: &Value) -> FixtureResult<String> {
		Ok(serde_yaml::to_string(value)?)
	}

	/// Stub for YAML serialization when the feature is not enabled.
	#[cfg(not(feature = "yaml"))]
	fn serialize_yaml(&self, _value: &Value) -> FixtureResult<String> {
		Err(crate::error::FixtureError::UnsupportedExtension(
			"YAML support requires the 'yaml' feature".to_string(),
		))
	}
}

impl Default for FixtureSerializer {
	fn default() -> Self {
		Self::new()
	}
}

/// Converts one record into its source-format JSON shape.
fn record_to_json(record: &FixtureRecord) -> Value {
	let mut map = serde_json::Map::new();
	map.insert("model".to_string(), Value::String(record.model.clone()));
	if record.variant != DEFAULT_VARIANT {
		map.insert("variant".to_string(), Value::String(record.variant.clone()));
	}
	map.insert("fields".to_string(), record.fields.to_json());
	Value::Object(map)
}
