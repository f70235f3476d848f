//! Bearer token wrapper that redacts sensitive material.

// self
use crate::_prelude::*;

/// Opaque bearer token issued by the auth endpoint.
///
/// No expiry is tracked client-side; staleness is only discovered from API responses.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);
impl AccessToken {
	/// Wraps a new token string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner token value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Renders the `Authorization: Bearer` header value.
	pub fn bearer_header(&self) -> String {
		format!("Bearer {}", self.0)
	}
}
impl AsRef<str> for AccessToken {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for AccessToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("AccessToken").field(&"<redacted>").finish()
	}
}
impl Display for AccessToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Body returned by the auth endpoint.
///
/// Some deployments answer with a numeric `access_token`; it is kept as its decimal text.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
	access_token: TokenValue,
}
impl TokenResponse {
	/// Parses an auth endpoint body, reporting the JSON path on failure.
	pub(crate) fn parse(
		body: &[u8],
	) -> Result<Self, serde_path_to_error::Error<serde_json::Error>> {
		let de = &mut serde_json::Deserializer::from_slice(body);

		serde_path_to_error::deserialize(de)
	}

	/// Returns the token when it is non-empty.
	pub(crate) fn into_token(self) -> Option<AccessToken> {
		let raw = match self.access_token {
			TokenValue::Text(value) => value,
			TokenValue::Number(value) => value.to_string(),
		};

		if raw.trim().is_empty() { None } else { Some(AccessToken::new(raw)) }
	}
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TokenValue {
	Text(String),
	Number(serde_json::Number),
}
