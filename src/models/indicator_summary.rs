//! Enrichment summaries of an indicator as reported by a single source.

// crates.io
use serde_json::Value;
// self
use crate::{
	_prelude::*,
	models::{IndicatorType, IntelligenceSource, JsonModel, ModelError, json},
};

/// Highest normalized severity a source may assign.
pub const MAX_SEVERITY_LEVEL: u8 = 3;

/// Source-specific score of an indicator.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorScore {
	/// Score name as defined by the source.
	pub name: Option<String>,
	/// Raw score value; sources send strings or numbers.
	pub value: Option<Value>,
}
impl JsonModel for IndicatorScore {
	const NAME: &'static str = "IndicatorScore";
}

/// A single attribute the source reports about an indicator.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorAttribute {
	/// Attribute name.
	pub name: Option<String>,
	/// Attribute value.
	pub value: Option<Value>,
	/// Logical type of the value (e.g. `"timestamp"`).
	pub logical_type: Option<String>,
	/// Attribute description.
	pub description: Option<String>,
}
impl JsonModel for IndicatorAttribute {
	const NAME: &'static str = "IndicatorAttribute";
}

/// Summary of one indicator within one report.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorSummary {
	/// Indicator value.
	pub value: Option<String>,
	/// Indicator type as sent by the API.
	pub indicator_type: Option<String>,
	/// Report the summary belongs to.
	pub report_id: Option<String>,
	/// Enclave of the report.
	pub enclave_id: Option<String>,
	/// Source the summary came from.
	pub source: Option<IntelligenceSource>,
	/// Score assigned by the source.
	pub score: Option<IndicatorScore>,
	/// First seen, epoch milliseconds.
	pub created: Option<i64>,
	/// Last updated, epoch milliseconds.
	pub updated: Option<i64>,
	/// Description according to the source.
	pub description: Option<String>,
	/// Attributes reported by the source.
	pub attributes: Option<Vec<IndicatorAttribute>>,
	/// Normalized score between `0` (lowest) and [`MAX_SEVERITY_LEVEL`].
	pub severity_level: Option<u8>,
}
impl IndicatorSummary {
	/// Creates a summary for `value`.
	pub fn new(value: impl Into<String>) -> Self {
		Self { value: Some(value.into()), ..Default::default() }
	}

	/// Sets the indicator type.
	pub fn with_type(mut self, kind: IndicatorType) -> Self {
		self.indicator_type = Some(kind.as_str().into());

		self
	}

	/// Sets the source.
	pub fn with_source(mut self, source: IntelligenceSource) -> Self {
		self.source = Some(source);

		self
	}

	/// Sets the normalized severity.
	pub fn with_severity_level(mut self, level: u8) -> Self {
		self.severity_level = Some(level);

		self
	}

	/// Returns the type when it is one of the known [`IndicatorType`] values.
	pub fn kind(&self) -> Option<IndicatorType> {
		self.indicator_type.as_deref().and_then(|value| value.parse().ok())
	}
}
impl JsonModel for IndicatorSummary {
	const NAME: &'static str = "IndicatorSummary";

	fn validate(&self) -> Result<(), ModelError> {
		match self.severity_level {
			Some(level) if level > MAX_SEVERITY_LEVEL => Err(json::invalid(
				Self::NAME,
				"severityLevel",
				format!("expected 0..={MAX_SEVERITY_LEVEL}, got {level}"),
			)),
			_ => Ok(()),
		}
	}
}
