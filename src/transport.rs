//! Transport primitives for auth and API calls.
//!
//! The module exposes [`ApiHttpClient`], the client's only dependency on an HTTP stack.
//! Requests and responses use the plain [`http`] crate types with owned byte bodies, so a
//! custom transport only has to move bytes; header construction, basic auth, retries, and
//! error classification all stay in the client.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// self
use crate::_prelude::*;

/// Outbound request handed to a transport.
pub type HttpRequest = http::Request<Vec<u8>>;
/// Fully buffered response returned by a transport.
pub type HttpResponse = http::Response<Vec<u8>>;
/// Boxed future returned by [`ApiHttpClient::execute`].
pub type HttpFuture<'a, E> = Pin<Box<dyn Future<Output = Result<HttpResponse, E>> + 'a + Send>>;

/// Abstraction over HTTP transports capable of executing a single request.
///
/// Implementations must be `Send + Sync + 'static` so one transport can be shared (behind
/// `Arc<T>`) by the API client and its token manager, and the returned future must be `Send`
/// so client futures can hop executors. Any status code, including 4xx/5xx, is a successful
/// transport outcome; only failures to obtain a response belong in
/// [`ApiHttpClient::TransportError`].
pub trait ApiHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// Sends `request` and buffers the full response.
	fn execute(&self, request: HttpRequest) -> HttpFuture<'_, Self::TransportError>;
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Builds a client honoring the TLS verification flag.
	///
	/// Disabling verification accepts self-signed certificates and mismatched hostnames; it is
	/// meant for lab deployments only.
	pub fn with_tls_verification(verify: bool) -> Result<Self> {
		let client = ReqwestClient::builder()
			.danger_accept_invalid_certs(!verify)
			.danger_accept_invalid_hostnames(!verify)
			.build()
			.map_err(crate::error::ConfigError::from)?;

		Ok(Self(client))
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl ApiHttpClient for ReqwestHttpClient {
	type TransportError = ReqwestError;

	fn execute(&self, request: HttpRequest) -> HttpFuture<'_, Self::TransportError> {
		let client = self.0.clone();

		Box::pin(async move {
			let response = client.execute(request.try_into()?).await?;
			let status = response.status();
			let headers = response.headers().to_owned();
			let mut response_new = HttpResponse::new(response.bytes().await?.to_vec());

			*response_new.status_mut() = status;
			*response_new.headers_mut() = headers;

			Ok(response_new)
		})
	}
}

#[cfg(all(test, feature = "reqwest"))]
mod tests {
	// crates.io
	use httpmock::prelude::*;
	// self
	use super::*;

	#[tokio::test]
	async fn reqwest_transport_buffers_status_headers_and_body() {
		let server = MockServer::start_async().await;
		let mock = server
			.mock_async(|when, then| {
				when.method(GET).path("/echo");
				then.status(418).header("trace-id", "teapot").body("short and stout");
			})
			.await;
		let request = http::Request::get(server.url("/echo"))
			.body(Vec::new())
			.expect("Echo request should build.");
		let response = ReqwestHttpClient::default()
			.execute(request)
			.await
			.expect("Transport should return non-2xx responses as values.");

		assert_eq!(response.status().as_u16(), 418);
		assert_eq!(
			response.headers().get("trace-id").and_then(|value| value.to_str().ok()),
			Some("teapot")
		);
		assert_eq!(response.body().as_slice(), b"short and stout");

		mock.assert_async().await;
	}

	#[test]
	fn tls_flag_builds_client() {
		assert!(ReqwestHttpClient::with_tls_verification(false).is_ok());
		assert!(ReqwestHttpClient::with_tls_verification(true).is_ok());
	}
}
