//! Authenticated request execution against the TruSTAR API.
//!
//! [`ApiClient::execute`] attaches a bearer token (fetching one on first use), sends the request,
//! and recovers from two server answers on its own:
//!
//! - HTTP 400 with an expired/invalid token description triggers a single-flight refresh and a
//!   retry, at most [`ClientConfig::max_token_refreshes`] times per call.
//! - HTTP 429 (when [`ClientConfig::retry`] is set) sleeps for the server-provided `waitTime` and
//!   retries, provided the wait fits within [`ClientConfig::max_wait_time`].
//!
//! Every other non-2xx response becomes an [`ApiError`](crate::error::ApiError).

/// In-process counters for request execution.
pub mod metrics;
pub mod request;
pub mod response;

pub use metrics::*;
pub use request::*;
pub use response::*;

// crates.io
use http::{
	HeaderMap, HeaderName, HeaderValue,
	header::{AUTHORIZATION, CONTENT_TYPE},
};
// self
use crate::{
	_prelude::*,
	auth::{AccessToken, TokenManager},
	config::ClientConfig,
	error::{ConfigError, TransportError},
	obs::{self, RequestOutcome, RequestSpan},
	transport::ApiHttpClient,
};
#[cfg(feature = "reqwest")] use crate::transport::ReqwestHttpClient;

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestApiClient = ApiClient<ReqwestHttpClient>;

const CLIENT_TYPE: &str = "client-type";
const CLIENT_METATAG: &str = "client-metatag";
const CLIENT_VERSION: &str = "client-version";

/// TruSTAR API client.
///
/// Clones share the transport, the cached token, and the metrics counters.
pub struct ApiClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Configuration the client was built with.
	pub config: Arc<ClientConfig>,
	http_client: Arc<C>,
	tokens: Arc<TokenManager<C>>,
	metrics: Arc<ClientMetrics>,
}
impl<C> ApiClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Creates a client that reuses the caller-provided transport.
	pub fn with_http_client(config: ClientConfig, http_client: impl Into<Arc<C>>) -> Self {
		let http_client = http_client.into();
		let tokens = TokenManager::new(http_client.clone(), &config);

		Self {
			config: Arc::new(config),
			http_client,
			tokens: Arc::new(tokens),
			metrics: Default::default(),
		}
	}

	/// Token manager backing this client.
	pub fn token_manager(&self) -> &TokenManager<C> {
		&self.tokens
	}

	/// Execution counters shared by every clone of this client.
	pub fn metrics(&self) -> &ClientMetrics {
		&self.metrics
	}

	/// Returns the default header set, fetching a token first when none is cached.
	pub async fn headers(&self, is_json: bool) -> Result<HeaderMap> {
		let token = self.tokens.get_token().await?;

		self.build_headers(&token.token, is_json, &[])
	}

	/// Sends `request`, refreshing the token and waiting out rate limits as configured.
	pub async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
		let span = RequestSpan::new(request.method.as_str(), &request.path);
		let result = span.instrument(self.execute_inner(&request)).await;

		match &result {
			Ok(_) => {
				self.metrics.record_success();
				obs::record_request_outcome(RequestOutcome::Success);
			},
			Err(_) => {
				self.metrics.record_failure();
				obs::record_request_outcome(RequestOutcome::Failure);
			},
		}

		result
	}

	/// Sends a `GET` request.
	pub async fn get(&self, path: impl Into<String>) -> Result<ApiResponse> {
		self.execute(ApiRequest::get(path)).await
	}

	/// Sends a `POST` request with `body` serialized as JSON.
	pub async fn post<T>(&self, path: impl Into<String>, body: &T) -> Result<ApiResponse>
	where
		T: ?Sized + Serialize,
	{
		self.execute(ApiRequest::post(path).with_json(body)?).await
	}

	/// Sends a `PUT` request with `body` serialized as JSON.
	pub async fn put<T>(&self, path: impl Into<String>, body: &T) -> Result<ApiResponse>
	where
		T: ?Sized + Serialize,
	{
		self.execute(ApiRequest::put(path).with_json(body)?).await
	}

	/// Sends a `DELETE` request.
	pub async fn delete(&self, path: impl Into<String>) -> Result<ApiResponse> {
		self.execute(ApiRequest::delete(path)).await
	}

	/// Calls `GET ping` and returns the body text, `"pong"` on a healthy deployment.
	pub async fn ping(&self) -> Result<String> {
		Ok(self.get("ping").await?.text())
	}

	async fn execute_inner(&self, request: &ApiRequest) -> Result<ApiResponse> {
		let url = self.config.endpoint_url(&request.path, &request.query)?;
		let body = request.encoded_body()?;
		let mut token = self.tokens.get_token().await?;
		let mut refreshes = 0;

		loop {
			let mut outbound = http::Request::builder()
				.method(request.method.clone())
				.uri(url.as_str())
				.body(body.clone())
				.map_err(ConfigError::from)?;

			*outbound.headers_mut() =
				self.build_headers(&token.token, request.is_json(), &request.headers)?;

			self.metrics.record_attempt();
			obs::record_request_outcome(RequestOutcome::Attempt);

			let response = ApiResponse::from(
				self.http_client.execute(outbound).await.map_err(TransportError::network)?,
			);

			match response.classify() {
				ResponseClass::Success => return Ok(response),
				ResponseClass::ExpiredToken if refreshes < self.config.max_token_refreshes => {
					refreshes += 1;

					self.metrics.record_token_refresh();
					obs::record_request_outcome(RequestOutcome::TokenRefresh);
					obs::emit_retry(RequestOutcome::TokenRefresh, response.status(), None);

					token = self.tokens.refresh_stale(token.generation).await?;
				},
				ResponseClass::RateLimited { wait_ms: Some(wait_ms) } if self.config.retry => {
					let Some(wait) = self.config.accepts_wait(wait_ms) else {
						return Err(response.into_api_error().into());
					};

					self.metrics.record_rate_limit_wait();
					obs::record_request_outcome(RequestOutcome::RateLimited);
					obs::emit_retry(RequestOutcome::RateLimited, response.status(), Some(wait));

					tokio::time::sleep(wait.unsigned_abs()).await;
				},
				_ => return Err(Error::Api(response.into_api_error())),
			}
		}
	}

	fn build_headers(
		&self,
		token: &AccessToken,
		is_json: bool,
		extra: &[(String, String)],
	) -> Result<HeaderMap> {
		let mut headers = HeaderMap::new();

		headers.insert(AUTHORIZATION, header_value("Authorization", &token.bearer_header())?);

		if !self.config.client_type.is_empty() {
			headers.insert(
				HeaderName::from_static(CLIENT_TYPE),
				header_value("Client-Type", &self.config.client_type)?,
			);
		}
		if let Some(metatag) = &self.config.client_metatag {
			headers.insert(
				HeaderName::from_static(CLIENT_METATAG),
				header_value("Client-Metatag", metatag)?,
			);
		}
		if let Some(version) = &self.config.client_version {
			headers.insert(
				HeaderName::from_static(CLIENT_VERSION),
				header_value("Client-Version", version)?,
			);
		}
		if is_json {
			headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
		}

		for (name, value) in extra {
			let header = HeaderName::from_bytes(name.as_bytes())
				.map_err(|_| ConfigError::InvalidHeader { name: name.clone() })?;

			headers.insert(header, header_value(name, value)?);
		}

		Ok(headers)
	}
}
#[cfg(feature = "reqwest")]
impl ApiClient<ReqwestHttpClient> {
	/// Creates a client backed by a reqwest transport honoring [`ClientConfig::verify_tls`].
	pub fn new(config: ClientConfig) -> Result<Self> {
		let http_client = ReqwestHttpClient::with_tls_verification(config.verify_tls)?;

		Ok(Self::with_http_client(config, http_client))
	}
}
impl<C> Clone for ApiClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn clone(&self) -> Self {
		Self {
			config: self.config.clone(),
			http_client: self.http_client.clone(),
			tokens: self.tokens.clone(),
			metrics: self.metrics.clone(),
		}
	}
}
impl<C> Debug for ApiClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ApiClient")
			.field("config", &self.config)
			.field("tokens", &self.tokens)
			.field("metrics", &self.metrics)
			.finish()
	}
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue> {
	HeaderValue::from_str(value)
		.map_err(|_| ConfigError::InvalidHeader { name: name.to_owned() }.into())
}
