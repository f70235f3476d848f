//! Incident reports and their field normalization.

// crates.io
use serde::{Deserializer, Serializer};
use time::{
	Date, PrimitiveDateTime, format_description::well_known::Rfc3339, macros::format_description,
};
// self
use crate::{
	_prelude::*,
	models::{DistributionType, JsonModel},
};

/// A report describing an incident, distributed to enclaves or the community.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
	/// TruSTAR-assigned identifier.
	pub id: Option<String>,
	/// Report title.
	pub title: Option<String>,
	/// Report body.
	pub body: Option<String>,
	/// When the described incident began.
	///
	/// Accepts RFC 3339 text, a bare ISO-8601 date-time (read as UTC), or epoch milliseconds,
	/// defaults to the current time, and is always sent as epoch milliseconds.
	#[serde(default = "OffsetDateTime::now_utc", with = "time_began")]
	pub time_began: OffsetDateTime,
	/// Identifier assigned by the source system.
	pub external_id: Option<String>,
	/// Link to the report in the source system.
	pub external_url: Option<String>,
	/// Whether the report is restricted to its enclaves.
	pub is_enclave: Option<bool>,
	/// Enclaves the report belongs to; a single string on the wire becomes one entry.
	#[serde(default, deserialize_with = "one_or_many")]
	pub enclave_ids: Option<Vec<String>>,
	/// Creation time, epoch milliseconds.
	pub created: Option<i64>,
	/// Last update, epoch milliseconds.
	pub updated: Option<i64>,
}
impl Report {
	/// Creates a report with a title and body that began now.
	pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
		Self { title: Some(title.into()), body: Some(body.into()), ..Default::default() }
	}

	/// Sets the incident start time.
	pub fn with_time_began(mut self, time_began: OffsetDateTime) -> Self {
		self.time_began = time_began;

		self
	}

	/// Sets the source-system identifier.
	pub fn with_external_id(mut self, external_id: impl Into<String>) -> Self {
		self.external_id = Some(external_id.into());

		self
	}

	/// Sets the source-system link.
	pub fn with_external_url(mut self, external_url: impl Into<String>) -> Self {
		self.external_url = Some(external_url.into());

		self
	}

	/// Appends an enclave and marks the report as enclave-distributed.
	pub fn with_enclave_id(mut self, enclave_id: impl Into<String>) -> Self {
		self.enclave_ids.get_or_insert_with(Vec::new).push(enclave_id.into());
		self.is_enclave = Some(true);

		self
	}

	/// Replaces the enclave list and marks the report as enclave-distributed.
	pub fn with_enclave_ids<I, S>(mut self, ids: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.enclave_ids = Some(ids.into_iter().map(Into::into).collect());
		self.is_enclave = Some(true);

		self
	}

	/// Marks the report as shared with the whole community.
	pub fn with_community_distribution(mut self) -> Self {
		self.is_enclave = Some(false);

		self
	}

	/// Returns [`DistributionType::Enclave`] only when `isEnclave` is explicitly true.
	pub fn distribution_type(&self) -> DistributionType {
		if self.is_enclave == Some(true) {
			DistributionType::Enclave
		} else {
			DistributionType::Community
		}
	}

	/// Incident start as epoch milliseconds.
	pub fn time_began_millis(&self) -> i64 {
		time_began::to_millis(self.time_began)
	}
}
impl Default for Report {
	fn default() -> Self {
		Self {
			id: None,
			title: None,
			body: None,
			time_began: OffsetDateTime::now_utc(),
			external_id: None,
			external_url: None,
			is_enclave: None,
			enclave_ids: None,
			created: None,
			updated: None,
		}
	}
}
impl JsonModel for Report {
	const NAME: &'static str = "Report";
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
	One(String),
	Many(Vec<String>),
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
	D: Deserializer<'de>,
{
	Ok(Option::<OneOrMany>::deserialize(deserializer)?.map(|ids| match ids {
		OneOrMany::One(id) => vec![id],
		OneOrMany::Many(ids) => ids,
	}))
}

mod time_began {
	// crates.io
	use serde::de::Error as _;
	// self
	use super::*;

	#[derive(Deserialize)]
	#[serde(untagged)]
	enum Wire {
		Millis(i64),
		FractionalMillis(f64),
		Text(String),
	}

	pub(super) fn to_millis(time: OffsetDateTime) -> i64 {
		i64::try_from(time.unix_timestamp_nanos() / 1_000_000).unwrap_or(i64::MAX)
	}

	pub(super) fn serialize<S>(time: &OffsetDateTime, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_i64(to_millis(*time))
	}

	pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<OffsetDateTime, D::Error>
	where
		D: Deserializer<'de>,
	{
		match Option::<Wire>::deserialize(deserializer)? {
			None => Ok(OffsetDateTime::now_utc()),
			Some(Wire::Millis(ms)) => from_millis(i128::from(ms)).map_err(D::Error::custom),
			Some(Wire::FractionalMillis(ms)) =>
				from_millis(ms.round() as i128).map_err(D::Error::custom),
			Some(Wire::Text(text)) => parse_text(&text).map_err(D::Error::custom),
		}
	}

	fn from_millis(ms: i128) -> Result<OffsetDateTime, time::error::ComponentRange> {
		OffsetDateTime::from_unix_timestamp_nanos(ms.saturating_mul(1_000_000))
	}

	fn parse_text(text: &str) -> Result<OffsetDateTime, String> {
		let text = text.trim();

		if let Ok(time) = OffsetDateTime::parse(text, &Rfc3339) {
			return Ok(time);
		}
		if let Ok(time) = PrimitiveDateTime::parse(
			text,
			format_description!(
				"[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]"
			),
		) {
			return Ok(time.assume_utc());
		}
		if let Ok(date) = Date::parse(text, format_description!("[year]-[month]-[day]")) {
			return Ok(date.midnight().assume_utc());
		}

		Err(format!("`{text}` is not an ISO-8601 timestamp"))
	}
}
