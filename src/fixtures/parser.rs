//! Fixture source parsing.
//!
//! This module handles parsing of fixture sources in JSON and YAML formats
//! into [`FixtureData`].

use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use super::format::{DEFAULT_VARIANT, validate_model_id};
use super::{FixtureData, FixtureDefinition, FixtureFormat, FixtureRecord};
use crate::error::{FixtureError, FixtureResult};

/// Raw record shape as it appears in source files, before value conversion.
#[derive(Debug, Deserialize)]
struct RawRecord {
	model: String,
	#[serde(default)]
	variant: Option<String>,
	fields: Value,
}

/// Parser for fixture sources.
///
/// Supports both JSON and YAML formats (YAML requires the `yaml` feature).
#[derive(Debug, Default)]
pub struct FixtureParser;

impl FixtureParser {
	/// Creates a new fixture parser.
	pub fn new() -> Self {
		Self
	}

	/// Parses a fixture file from the given path.
	///
	/// The format is automatically detected from the file extension.
	///
	/// # Errors
	///
	/// Returns an error if the file cannot be read, the extension is not
	/// recognized, or the content is malformed.
	pub fn parse_file(&self, path: &Path) -> FixtureResult<FixtureData> {
		let format = FixtureFormat::from_path(path).ok_or_else(|| {
			FixtureError::UnsupportedExtension(
				path.extension()
					.and_then(|e| e.to_str())
					.unwrap_or("(none)")
					.to_string(),
			)
		})?;

		let content = std::fs::read_to_string(path).map_err(|e| {
			if e.kind() == std::io::ErrorKind::NotFound {
				FixtureError::FileNotFound(path.display().to_string())
			} else {
				FixtureError::Io(e)
			}
		})?;

		let mut data = self.parse_str(&content, format)?;
		data.source = Some(path.display().to_string());
		Ok(data)
	}

	/// Parses fixture data from a string.
	///
	/// The source may be an array of records or a single record object.
	///
	/// # Errors
	///
	/// Returns `MalformedSource` if the content cannot be decoded or any
	/// record is structurally invalid.
	pub fn parse_str(&self, content: &str, format: FixtureFormat) -> FixtureResult<FixtureData> {
		let value = self.decode(content, format)?;
		let records = self.convert(value)?;
		Ok(FixtureData::from_records(records, format))
	}

	/// Decodes raw content into a JSON value tree.
	fn decode(&self, content: &str, format: FixtureFormat) -> FixtureResult<Value> {
		match format {
			FixtureFormat::Json => serde_json::from_str(content)
				.map_err(|e| FixtureError::MalformedSource(format!("invalid JSON: {}", e))),
			FixtureFormat::Yaml => self.decode_yaml(content),
		}
	}

	#[cfg(feature = "yaml")]
	fn decode_yaml(&self, content: &str) -> FixtureResult<Value> {
		serde_yaml::from_str(content)
			.map_err(|e| FixtureError::MalformedSource(format!("invalid YAML: {}", e)))
	}

	/// Stub for YAML decoding when the feature is not enabled.
	#[cfg(not(feature = "yaml"))]
	fn decode_yaml(&self, _content: &str) -> FixtureResult<Value> {
		Err(FixtureError::UnsupportedExtension(
			"YAML support requires the 'yaml' feature".to_string(),
		))
	}

	/// Converts a decoded value tree into fixture records.
	fn convert(&self, value: Value) -> FixtureResult<Vec<FixtureRecord>> {
		match value {
			Value::Array(items) => {
				let mut records = Vec::with_capacity(items.len());
				for (idx, item) in items.into_iter().enumerate() {
					records.push(self.convert_record(item).map_err(|e| {
						FixtureError::MalformedSource(format!("record at index {}: {}", idx, e))
					})?);
				}
				Ok(records)
			}
			Value::Object(_) => Ok(vec![self.convert_record(value)?]),
			_ => Err(FixtureError::MalformedSource(
				"expected an array of records or a single record object".to_string(),
			)),
		}
	}

	/// Converts a single decoded record.
	fn convert_record(&self, value: Value) -> FixtureResult<FixtureRecord> {
		let raw: RawRecord = serde_json::from_value(value)
			.map_err(|e| FixtureError::MalformedSource(e.to_string()))?;
		validate_model_id(&raw.model)?;

		let fields = FixtureDefinition::from_json(raw.fields)?;
		Ok(FixtureRecord {
			model: raw.model,
			variant: raw.variant.unwrap_or_else(|| DEFAULT_VARIANT.to_string()),
			fields,
		})
	}

	/// Parses multiple fixture files into one combined batch.
	pub fn parse_files(&self, paths: &[&Path]) -> FixtureResult<FixtureData> {
		let mut all_records = Vec::new();
		let format = paths
			.first()
			.and_then(|p| FixtureFormat::from_path(p))
			.unwrap_or_default();

		for path in paths {
			let data = self.parse_file(path)?;
			all_records.extend(data.records);
		}

		Ok(FixtureData::from_records(all_records, format))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::io::Write;
	use tempfile::NamedTempFile;

	use crate::fixtures::FixtureValue;

	#[rstest]
	fn test_parse_array() {
		let parser = FixtureParser::new();
		let content = r#"[
            {
                "model": "billing.Invoice",
                "variant": "invoice for john and jane",
                "fields": {"number": 1}
            },
            {
                "model": "billing.Invoice",
                "fields": {"number": 2}
            }
        ]"#;

		let data = parser.parse_str(content, FixtureFormat::Json).unwrap();
		assert_eq!(data.len(), 2);
		assert_eq!(data.records[0].variant, "invoice for john and jane");
		assert_eq!(data.records[1].variant, DEFAULT_VARIANT);
	}

	#[rstest]
	fn test_parse_single_object() {
		let parser = FixtureParser::new();
		let content = r#"{
            "model": "billing.Invoice",
            "fields": {"number": 1}
        }"#;

		let data = parser.parse_str(content, FixtureFormat::Json).unwrap();
		assert_eq!(data.len(), 1);
	}

	#[rstest]
	fn test_parse_reference_field() {
		let parser = FixtureParser::new();
		let content = r#"[{
            "model": "billing.Invoice",
            "fields": {
                "orders": [{"$fixture": "billing.Order", "$variant": "order for john"}]
            }
        }]"#;

		let data = parser.parse_str(content, FixtureFormat::Json).unwrap();
		let orders = data.records[0].fields.get("orders").unwrap();
		let FixtureValue::Sequence(items) = orders else {
			panic!("expected a sequence");
		};
		assert!(matches!(items[0], FixtureValue::Reference(_)));
	}

	#[rstest]
	fn test_parse_invalid_json() {
		let parser = FixtureParser::new();
		let result = parser.parse_str("not json at all", FixtureFormat::Json);
		assert!(matches!(result, Err(FixtureError::MalformedSource(_))));
	}

	#[rstest]
	fn test_parse_wrong_top_level_shape() {
		let parser = FixtureParser::new();
		let result = parser.parse_str("\"just a string\"", FixtureFormat::Json);
		assert!(matches!(result, Err(FixtureError::MalformedSource(_))));
	}

	#[rstest]
	fn test_parse_invalid_model_format() {
		let parser = FixtureParser::new();
		let content = r#"[{"model": "Invoice", "fields": {}}]"#;
		let result = parser.parse_str(content, FixtureFormat::Json);
		assert!(matches!(result, Err(FixtureError::MalformedSource(_))));
	}

	#[rstest]
	fn test_parse_invalid_fields_type() {
		let parser = FixtureParser::new();
		let content = r#"[{"model": "billing.Invoice", "fields": "not an object"}]"#;
		let result = parser.parse_str(content, FixtureFormat::Json);
		assert!(matches!(result, Err(FixtureError::MalformedSource(_))));
	}

	#[rstest]
	fn test_parse_file() {
		let parser = FixtureParser::new();
		let mut file = NamedTempFile::with_suffix(".json").unwrap();
		writeln!(
			file,
			r#"[{{"model": "billing.Invoice", "fields": {{"number": 7}}}}]"#
		)
		.unwrap();

		let data = parser.parse_file(file.path()).unwrap();
		assert_eq!(data.len(), 1);
		assert!(data.source.is_some());
	}

	#[rstest]
	fn test_parse_file_not_found() {
		let parser = FixtureParser::new();
		let result = parser.parse_file(Path::new("/nonexistent/file.json"));
		assert!(matches!(result, Err(FixtureError::FileNotFound(_))));
	}

	#[rstest]
	fn test_parse_unsupported_extension() {
		let parser = FixtureParser::new();
		let result = parser.parse_file(Path::new("file.xml"));
		assert!(matches!(result, Err(FixtureError::UnsupportedExtension(_))));
	}

	#[cfg(feature = "yaml")]
	#[rstest]
	fn test_parse_yaml() {
		let parser = FixtureParser::new();
		let content = r#"
- model: billing.Invoice
  variant: paid
  fields:
    number: 1
- model: billing.Invoice
  fields:
    number: 2
"#;

		let data = parser.parse_str(content, FixtureFormat::Yaml).unwrap();
		assert_eq!(data.len(), 2);
		assert_eq!(data.records[0].variant, "paid");
	}

	#[rstest]
	fn test_parse_multiple_files() {
		let parser = FixtureParser::new();

		let mut file1 = NamedTempFile::with_suffix(".json").unwrap();
		writeln!(
			file1,
			r#"[{{"model": "billing.Invoice", "fields": {{"number": 1}}}}]"#
		)
		.unwrap();

		let mut file2 = NamedTempFile::with_suffix(".json").unwrap();
		writeln!(
			file2,
			r#"[{{"model": "billing.Order", "fields": {{"total": 2.5}}}}]"#
		)
		.unwrap();

		let data = parser.parse_files(&[file1.path(), file2.path()]).unwrap();
		assert_eq!(data.len(), 2);
	}
}
