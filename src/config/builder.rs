// self
use crate::{
	_prelude::*,
	auth::ApiCredentials,
	config::ClientConfig,
	error::ConfigError,
};

/// Builder for [`ClientConfig`] values.
///
/// Endpoints are kept as raw strings until [`ClientConfigBuilder::build`] so that invalid values
/// surface as a single [`ConfigError`] instead of panicking at the call site.
#[derive(Debug)]
pub struct ClientConfigBuilder {
	/// API key used as the basic-auth user.
	pub api_key: String,
	/// API secret used as the basic-auth password.
	pub api_secret: String,
	/// OAuth2 token endpoint.
	pub auth_endpoint: String,
	/// API base endpoint.
	pub api_endpoint: String,
	/// `Client-Type` header value.
	pub client_type: String,
	/// `Client-Metatag` header value.
	pub client_metatag: Option<String>,
	/// `Client-Version` header value.
	pub client_version: Option<String>,
	/// TLS verification flag.
	pub verify_tls: bool,
	/// 429 retry flag.
	pub retry: bool,
	/// 429 wait ceiling.
	pub max_wait_time: Duration,
	/// Re-authentication budget per request.
	pub max_token_refreshes: u32,
}
impl ClientConfigBuilder {
	/// Creates a new builder seeded with the provided credentials and default settings.
	pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
		Self {
			api_key: api_key.into(),
			api_secret: api_secret.into(),
			auth_endpoint: ClientConfig::DEFAULT_AUTH_ENDPOINT.into(),
			api_endpoint: ClientConfig::DEFAULT_API_ENDPOINT.into(),
			client_type: ClientConfig::DEFAULT_CLIENT_TYPE.into(),
			client_metatag: None,
			client_version: Some(env!("CARGO_PKG_VERSION").into()),
			verify_tls: true,
			retry: true,
			max_wait_time: ClientConfig::DEFAULT_MAX_WAIT_TIME,
			max_token_refreshes: ClientConfig::DEFAULT_MAX_TOKEN_REFRESHES,
		}
	}

	/// Sets the OAuth2 token endpoint.
	pub fn auth_endpoint(mut self, url: impl Into<String>) -> Self {
		self.auth_endpoint = url.into();

		self
	}

	/// Sets the API base endpoint.
	pub fn api_endpoint(mut self, url: impl Into<String>) -> Self {
		self.api_endpoint = url.into();

		self
	}

	/// Sets the `Client-Type` header; an empty value suppresses the header.
	pub fn client_type(mut self, client_type: impl Into<String>) -> Self {
		self.client_type = client_type.into();

		self
	}

	/// Sets the `Client-Metatag` header.
	pub fn client_metatag(mut self, metatag: impl Into<String>) -> Self {
		self.client_metatag = Some(metatag.into());

		self
	}

	/// Sets the `Client-Version` header, replacing the crate version default.
	pub fn client_version(mut self, version: impl Into<String>) -> Self {
		self.client_version = Some(version.into());

		self
	}

	/// Omits the `Client-Version` header entirely.
	pub fn without_client_version(mut self) -> Self {
		self.client_version = None;

		self
	}

	/// Toggles TLS certificate verification for the default transport.
	pub fn verify_tls(mut self, verify: bool) -> Self {
		self.verify_tls = verify;

		self
	}

	/// Toggles waiting out and retrying 429 responses.
	pub fn retry(mut self, retry: bool) -> Self {
		self.retry = retry;

		self
	}

	/// Sets the 429 wait ceiling; negative values clamp to zero.
	pub fn max_wait_time(mut self, wait: Duration) -> Self {
		self.max_wait_time = if wait.is_negative() { Duration::ZERO } else { wait };

		self
	}

	/// Sets the re-authentication budget per request.
	pub fn max_token_refreshes(mut self, refreshes: u32) -> Self {
		self.max_token_refreshes = refreshes;

		self
	}

	/// Validates the collected values and produces a [`ClientConfig`].
	pub fn build(self) -> Result<ClientConfig, ConfigError> {
		if self.api_key.trim().is_empty() {
			return Err(ConfigError::MissingField { field: "api_key" });
		}
		if self.api_secret.trim().is_empty() {
			return Err(ConfigError::MissingField { field: "api_secret" });
		}

		let auth_endpoint = parse_endpoint("auth", &self.auth_endpoint)?;
		let api_endpoint = parse_endpoint("api", &self.api_endpoint)?;

		Ok(ClientConfig {
			credentials: ApiCredentials::new(self.api_key, self.api_secret),
			auth_endpoint,
			api_endpoint,
			client_type: self.client_type,
			client_metatag: self.client_metatag.filter(|value| !value.is_empty()),
			client_version: self.client_version.filter(|value| !value.is_empty()),
			verify_tls: self.verify_tls,
			retry: self.retry,
			max_wait_time: self.max_wait_time,
			max_token_refreshes: self.max_token_refreshes,
		})
	}
}

fn parse_endpoint(name: &'static str, value: &str) -> Result<Url, ConfigError> {
	Url::parse(value).map_err(|source| ConfigError::InvalidEndpoint {
		endpoint: name,
		value: value.to_owned(),
		source,
	})
}
