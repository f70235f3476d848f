//! API key + secret pair used for the client-credentials grant.

// crates.io
use base64::{Engine, engine::general_purpose::STANDARD};
// self
use crate::_prelude::*;

/// API key and secret; immutable for the lifetime of a client.
///
/// The secret never appears in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiCredentials {
	key: String,
	secret: String,
}
impl ApiCredentials {
	/// Wraps a key/secret pair.
	pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
		Self { key: key.into(), secret: secret.into() }
	}

	/// Returns the API key.
	pub fn key(&self) -> &str {
		&self.key
	}

	/// Returns the API secret. Callers must avoid logging this string.
	pub fn expose_secret(&self) -> &str {
		&self.secret
	}

	/// Renders the `Authorization: Basic` header value for the pair.
	pub fn basic_auth_header(&self) -> String {
		let encoded = STANDARD.encode(format!("{}:{}", self.key, self.secret));

		format!("Basic {encoded}")
	}
}
impl Debug for ApiCredentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ApiCredentials")
			.field("key", &self.key)
			.field("secret", &"<redacted>")
			.finish()
	}
}
