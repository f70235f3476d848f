//! Client configuration: credentials, endpoints, client identification, and retry policy.
//!
//! Configuration is immutable once built. [`ClientConfig::builder`] seeds every optional value
//! with the vendor defaults and [`ClientConfigBuilder::build`] validates credentials and
//! endpoints up front, so request-time failures are limited to the network and server.

/// Builder API for assembling client configuration.
pub mod builder;

pub use builder::*;

// self
use crate::{_prelude::*, auth::ApiCredentials, error::ConfigError};

/// Immutable configuration consumed by [`ApiClient`](crate::client::ApiClient).
#[derive(Clone, Debug)]
pub struct ClientConfig {
	/// API key + secret used for the client-credentials grant.
	pub credentials: ApiCredentials,
	/// OAuth2 token endpoint.
	pub auth_endpoint: Url,
	/// Base URL every request path is joined onto.
	pub api_endpoint: Url,
	/// Value of the `Client-Type` header; skipped when empty.
	pub client_type: String,
	/// Optional `Client-Metatag` header identifying the calling app or user.
	pub client_metatag: Option<String>,
	/// Optional `Client-Version` header.
	pub client_version: Option<String>,
	/// Whether TLS certificates are verified by the default transport.
	pub verify_tls: bool,
	/// Whether 429 responses are waited out and retried.
	pub retry: bool,
	/// Longest server-requested 429 wait the client accepts.
	pub max_wait_time: Duration,
	/// Re-authentications allowed per request when the server reports an expired token.
	pub max_token_refreshes: u32,
}
impl ClientConfig {
	/// Default OAuth2 token endpoint.
	pub const DEFAULT_AUTH_ENDPOINT: &'static str = "https://api.trustar.co/oauth/token";
	/// Default API base endpoint.
	pub const DEFAULT_API_ENDPOINT: &'static str = "https://api.trustar.co/api/1.3";
	/// Default `Client-Type` header.
	pub const DEFAULT_CLIENT_TYPE: &'static str = "RUST_SDK";
	/// Default 429 wait ceiling.
	pub const DEFAULT_MAX_WAIT_TIME: Duration = Duration::seconds(60);
	/// Default re-authentication budget per request.
	pub const DEFAULT_MAX_TOKEN_REFRESHES: u32 = 3;

	/// Creates a new builder for the provided API key and secret.
	pub fn builder(api_key: impl Into<String>, api_secret: impl Into<String>) -> ClientConfigBuilder {
		ClientConfigBuilder::new(api_key, api_secret)
	}

	/// Joins `path` onto the API endpoint and appends `query` pairs.
	///
	/// Exactly one `/` separates the endpoint from the path regardless of how either side was
	/// written.
	pub fn endpoint_url(&self, path: &str, query: &[(String, String)]) -> Result<Url> {
		let base = self.api_endpoint.as_str().trim_end_matches('/');
		let path = path.trim_start_matches('/');
		let raw = format!("{base}/{path}");
		let mut url = Url::parse(&raw).map_err(|source| ConfigError::InvalidEndpoint {
			endpoint: "api",
			value: raw.clone(),
			source,
		})?;

		if !query.is_empty() {
			url.query_pairs_mut().extend_pairs(query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
		}

		Ok(url)
	}

	/// Returns the auth endpoint with the client-credentials grant attached as a query parameter.
	pub fn token_url(&self) -> Url {
		let mut url = self.auth_endpoint.clone();

		url.query_pairs_mut().append_pair("grant_type", "client_credentials");

		url
	}

	/// Converts a server-requested wait (milliseconds) into a duration when it fits within
	/// [`ClientConfig::max_wait_time`].
	pub fn accepts_wait(&self, wait_ms: u64) -> Option<Duration> {
		let ceiling_ms = self.max_wait_time.whole_milliseconds().max(0);

		if i128::from(wait_ms) <= ceiling_ms {
			Some(Duration::milliseconds(i64::try_from(wait_ms).unwrap_or(i64::MAX)))
		} else {
			None
		}
	}
}
