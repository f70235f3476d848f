//! Buffered API responses and their retry classification.

// crates.io
use http::{HeaderMap, StatusCode};
use serde_json::Value;
// self
use crate::{
	_prelude::*,
	error::ApiError,
	models::{JsonModel, ModelError},
	transport::HttpResponse,
};

/// `error_description` values that mean the bearer token must be replaced.
pub const INVALID_TOKEN_ERRORS: [&str; 2] =
	["Expired oauth2 access token", "Invalid oauth2 access token"];

/// Response header carrying the server-side request identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";

/// How the executor should react to a response.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ResponseClass {
	Success,
	ExpiredToken,
	/// `wait_ms` is the ceiling-rounded `waitTime`, absent when the body did not carry a number.
	RateLimited {
		wait_ms: Option<u64>,
	},
	Failure,
}

/// Status, headers, and raw body of an API response.
///
/// Bodies are kept as bytes; decode them on demand with [`ApiResponse::text`],
/// [`ApiResponse::json_value`], or [`ApiResponse::model`].
#[derive(Clone, Debug)]
pub struct ApiResponse {
	status: StatusCode,
	headers: HeaderMap,
	body: Vec<u8>,
}
impl ApiResponse {
	/// HTTP status code.
	pub fn status(&self) -> u16 {
		self.status.as_u16()
	}

	/// Response headers.
	pub fn headers(&self) -> &HeaderMap {
		&self.headers
	}

	/// Value of the `trace-id` header, if present and printable.
	pub fn trace_id(&self) -> Option<&str> {
		self.headers.get(TRACE_ID_HEADER).and_then(|value| value.to_str().ok())
	}

	/// Raw body bytes.
	pub fn body(&self) -> &[u8] {
		&self.body
	}

	/// Body decoded as UTF-8, replacing invalid sequences.
	pub fn text(&self) -> String {
		String::from_utf8_lossy(&self.body).into_owned()
	}

	/// Body decoded as untyped JSON.
	pub fn json_value(&self) -> Result<Value, ModelError> {
		let de = &mut serde_json::Deserializer::from_slice(&self.body);

		serde_path_to_error::deserialize(de)
			.map_err(|source| ModelError::Parse { model: "ApiResponse", source })
	}

	/// Body decoded and validated as `T`.
	pub fn model<T>(&self) -> Result<T, ModelError>
	where
		T: JsonModel,
	{
		let de = &mut serde_json::Deserializer::from_slice(&self.body);
		let model: T = serde_path_to_error::deserialize(de)
			.map_err(|source| ModelError::Parse { model: T::NAME, source })?;

		model.validate()?;

		Ok(model)
	}

	pub(crate) fn classify(&self) -> ResponseClass {
		if self.status.is_success() {
			return ResponseClass::Success;
		}

		match self.status.as_u16() {
			400 if self.reports_invalid_token() => ResponseClass::ExpiredToken,
			429 => ResponseClass::RateLimited { wait_ms: self.wait_ms() },
			_ => ResponseClass::Failure,
		}
	}

	pub(crate) fn into_api_error(self) -> ApiError {
		let mut err = ApiError::new(self.status()).with_body_preview(&self.text());

		if let Some(trace_id) = self.trace_id() {
			err = err.with_trace_id(trace_id);
		}
		if let (429, Some(wait_ms)) = (self.status.as_u16(), self.wait_ms()) {
			err = err.with_retry_after(Duration::milliseconds(
				i64::try_from(wait_ms).unwrap_or(i64::MAX),
			));
		}

		err
	}

	fn reports_invalid_token(&self) -> bool {
		self.json_value()
			.ok()
			.as_ref()
			.and_then(|body| body.get("error_description"))
			.and_then(Value::as_str)
			.is_some_and(|description| INVALID_TOKEN_ERRORS.contains(&description))
	}

	fn wait_ms(&self) -> Option<u64> {
		let wait = self.json_value().ok()?.get("waitTime")?.as_f64()?;

		if !wait.is_finite() {
			return None;
		}

		Some(wait.ceil().max(0.) as u64)
	}
}
impl From<HttpResponse> for ApiResponse {
	fn from(response: HttpResponse) -> Self {
		let (parts, body) = response.into_parts();

		Self { status: parts.status, headers: parts.headers, body }
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::models::{Indicator, Tag};

	fn response(status: u16, body: &str) -> ApiResponse {
		http::Response::builder()
			.status(status)
			.header(TRACE_ID_HEADER, "TEST-trace-id")
			.body(body.as_bytes().to_vec())
			.expect("Response should build.")
			.into()
	}

	#[test]
	fn expired_and_invalid_tokens_are_detected() {
		for description in INVALID_TOKEN_ERRORS {
			let body = format!(r#"{{"error":"invalid_token","error_description":"{description}"}}"#);

			assert_eq!(response(400, &body).classify(), ResponseClass::ExpiredToken);
		}

		assert_eq!(
			response(400, r#"{"error_description":"Missing field"}"#).classify(),
			ResponseClass::Failure
		);
		assert_eq!(response(400, "not json").classify(), ResponseClass::Failure);
		assert_eq!(
			response(401, r#"{"error_description":"Expired oauth2 access token"}"#).classify(),
			ResponseClass::Failure
		);
	}

	#[test]
	fn wait_time_is_ceiled_and_clamped() {
		assert_eq!(
			response(429, r#"{"waitTime":0.2}"#).classify(),
			ResponseClass::RateLimited { wait_ms: Some(1) }
		);
		assert_eq!(
			response(429, r#"{"waitTime":-50}"#).classify(),
			ResponseClass::RateLimited { wait_ms: Some(0) }
		);
		assert_eq!(
			response(429, r#"{"waitTime":"soon"}"#).classify(),
			ResponseClass::RateLimited { wait_ms: None }
		);
		assert_eq!(response(429, "").classify(), ResponseClass::RateLimited { wait_ms: None });
	}

	#[test]
	fn api_error_carries_trace_and_wait() {
		let err = response(429, r#"{"waitTime":90000}"#).into_api_error();

		assert_eq!(err.to_string(), "429 Client Error (Trade-Id: TEST-trace-id)");
		assert_eq!(err.retry_after, Some(Duration::seconds(90)));
		assert_eq!(err.body_preview, r#"{"waitTime":90000}"#);
	}

	#[test]
	fn bodies_decode_on_demand() {
		let ok = response(200, r#"{"name":"malicious","enclaveId":"e-1"}"#);

		assert_eq!(ok.classify(), ResponseClass::Success);
		assert_eq!(ok.trace_id(), Some("TEST-trace-id"));
		assert_eq!(
			ok.model::<Tag>().expect("Tag body should parse."),
			Tag::new("malicious").with_enclave_id("e-1")
		);
		assert_eq!(response(200, "pong").text(), "pong");
		assert!(response(200, "pong").json_value().is_err());
	}

	#[test]
	fn decoded_values_convert_into_models() {
		let value = response(200, r#"[{"name":"a"},{"name":"b","enclaveId":"e-1"}]"#)
			.json_value()
			.expect("Tag list should decode.");
		let tags = value
			.as_array()
			.expect("Body should be an array.")
			.iter()
			.cloned()
			.map(Tag::from_value)
			.collect::<Result<Vec<_>, _>>()
			.expect("Each entry should convert into a tag.");

		assert_eq!(tags, [Tag::new("a"), Tag::new("b").with_enclave_id("e-1")]);

		let err = Indicator::from_value(
			response(200, r#"{"value":"x","weight":2}"#).json_value().expect("Body should decode."),
		)
		.expect_err("Converted values are validated.");

		assert!(matches!(err, ModelError::Invalid { model: "Indicator", field: "weight", .. }));
	}
}
