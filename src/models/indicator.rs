//! Indicators of compromise.

// self
use crate::{
	_prelude::*,
	models::{IndicatorType, JsonModel, ModelError, PriorityLevel, Tag, json},
};

/// An observable such as an IP, URL, or file hash, with its correlation context.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Indicator {
	/// Indicator value, e.g. `"www.evil.com"`.
	pub value: String,
	/// Indicator type as sent by the API; see [`Indicator::kind`].
	#[serde(rename = "type")]
	pub indicator_type: Option<String>,
	/// Priority level as sent by the API; see [`Indicator::priority`].
	pub priority_level: Option<String>,
	/// Number of other indicators correlated with this one.
	pub correlation_count: Option<u64>,
	/// Whether the indicator is whitelisted.
	#[serde(rename = "whiteListed")]
	pub whitelisted: Option<bool>,
	/// `1` when the value is an indicator in its context, `0` otherwise.
	pub weight: Option<u8>,
	/// Why the weight is `0`, when it is.
	pub reason: Option<String>,
	/// First sighting, epoch milliseconds.
	pub first_seen: Option<i64>,
	/// Last sighting, epoch milliseconds.
	pub last_seen: Option<i64>,
	/// Number of sightings.
	pub sightings: Option<u64>,
	/// Source the indicator was observed in.
	pub source: Option<String>,
	/// Free-form notes.
	pub notes: Option<String>,
	/// Tags attached to the indicator.
	pub tags: Option<Vec<Tag>>,
	/// Enclaves the indicator is found in.
	pub enclave_ids: Option<Vec<String>>,
}
impl Indicator {
	/// Creates an indicator with only a value.
	pub fn new(value: impl Into<String>) -> Self {
		Self {
			value: value.into(),
			indicator_type: None,
			priority_level: None,
			correlation_count: None,
			whitelisted: None,
			weight: None,
			reason: None,
			first_seen: None,
			last_seen: None,
			sightings: None,
			source: None,
			notes: None,
			tags: None,
			enclave_ids: None,
		}
	}

	/// Sets the indicator type.
	pub fn with_type(mut self, kind: IndicatorType) -> Self {
		self.indicator_type = Some(kind.as_str().into());

		self
	}

	/// Sets the priority level.
	pub fn with_priority(mut self, priority: PriorityLevel) -> Self {
		self.priority_level = Some(priority.as_str().into());

		self
	}

	/// Sets the first/last sighting window (epoch milliseconds).
	pub fn with_seen(mut self, first_seen: i64, last_seen: i64) -> Self {
		self.first_seen = Some(first_seen);
		self.last_seen = Some(last_seen);

		self
	}

	/// Appends a tag.
	pub fn with_tag(mut self, tag: Tag) -> Self {
		self.tags.get_or_insert_with(Vec::new).push(tag);

		self
	}

	/// Replaces the enclave list.
	pub fn with_enclave_ids<I, S>(mut self, ids: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.enclave_ids = Some(ids.into_iter().map(Into::into).collect());

		self
	}

	/// Returns the type when it is one of the known [`IndicatorType`] values.
	pub fn kind(&self) -> Option<IndicatorType> {
		self.indicator_type.as_deref().and_then(|value| value.parse().ok())
	}

	/// Returns the priority when it is one of the known [`PriorityLevel`] values.
	pub fn priority(&self) -> Option<PriorityLevel> {
		self.priority_level.as_deref().and_then(|value| value.parse().ok())
	}
}
impl JsonModel for Indicator {
	const NAME: &'static str = "Indicator";

	fn validate(&self) -> Result<(), ModelError> {
		match self.weight {
			Some(weight) if weight > 1 =>
				Err(json::invalid(Self::NAME, "weight", format!("expected 0 or 1, got {weight}"))),
			_ => Ok(()),
		}
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;

	#[test]
	fn indicator_builds_nested_tags() {
		let text = json!({
			"value": "8.8.8.8",
			"type": "IP",
			"priorityLevel": "HIGH",
			"whiteListed": false,
			"weight": 1,
			"tags": [
				{ "name": "Bad Indicator BAD!!", "enclaveId": "111e-222d-333c-444b-555a" },
				{ "name": "Worse Indicator!" },
			],
		})
		.to_string();
		let indicator = Indicator::from_json(&text).expect("Indicator JSON should parse.");
		let tags = indicator.tags.as_deref().expect("Tags should be decoded.");

		assert_eq!(indicator.kind(), Some(IndicatorType::Ip));
		assert_eq!(indicator.priority(), Some(PriorityLevel::High));
		assert_eq!(indicator.whitelisted, Some(false));
		assert_eq!(tags.len(), 2);
		assert_eq!(tags[0].enclave_id.as_deref(), Some("111e-222d-333c-444b-555a"));
		assert_eq!(tags[1], Tag::new("Worse Indicator!"));
	}

	#[test]
	fn indicator_rejects_non_binary_weight() {
		let err = Indicator::from_json(r#"{"value":"evil.com","weight":7}"#)
			.expect_err("Weight outside 0/1 should be rejected.");

		assert!(matches!(err, ModelError::Invalid { field: "weight", .. }));
	}

	#[test]
	fn builder_serializes_wire_names() {
		let value = Indicator::new("evil.com")
			.with_type(IndicatorType::Url)
			.with_tag(Tag::new("phishing"))
			.with_enclave_ids(["e-1"])
			.to_json_value()
			.expect("Indicator should serialize.");

		assert_eq!(
			value,
			json!({
				"value": "evil.com",
				"type": "URL",
				"tags": [{ "name": "phishing" }],
				"enclaveIds": ["e-1"],
			})
		);
	}
}
