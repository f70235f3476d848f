#![allow(dead_code)]

// std
use std::{collections::VecDeque, sync::Arc};
// crates.io
use parking_lot::Mutex;
use tokio::time::Instant;
// self
use trustar::{
	client::ApiClient,
	config::{ClientConfig, ClientConfigBuilder},
	http,
	transport::{ApiHttpClient, HttpFuture, HttpRequest, HttpResponse},
};

pub const API_KEY: &str = "TEST_API_KEY";
pub const API_SECRET: &str = "TEST_API_SECRET";
pub const BASIC_AUTH: &str = "Basic VEVTVF9BUElfS0VZOlRFU1RfQVBJX1NFQ1JFVA==";
pub const TRACE_ID: &str = "TEST-trace-id";
pub const EXPIRED_TOKEN_BODY: &str =
	r#"{"error":"invalid_token","error_description":"Expired oauth2 access token"}"#;

/// Snapshot of a request handed to [`ScriptedHttpClient`].
#[derive(Clone, Debug)]
pub struct RecordedRequest {
	pub method: http::Method,
	pub uri: String,
	pub headers: http::HeaderMap,
	pub body: Vec<u8>,
	pub sent_at: Instant,
}
impl RecordedRequest {
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers.get(name).and_then(|value| value.to_str().ok())
	}

	pub fn json(&self) -> serde_json::Value {
		serde_json::from_slice(&self.body).expect("Recorded body should be JSON.")
	}
}

#[derive(Debug, thiserror::Error)]
#[error("Scripted transport has no response left.")]
pub struct ScriptExhausted;

/// Transport that replays canned responses in order and records every request it receives.
#[derive(Default)]
pub struct ScriptedHttpClient {
	responses: Mutex<VecDeque<HttpResponse>>,
	requests: Mutex<Vec<RecordedRequest>>,
}
impl ScriptedHttpClient {
	pub fn new(responses: impl IntoIterator<Item = HttpResponse>) -> Arc<Self> {
		Arc::new(Self {
			responses: Mutex::new(responses.into_iter().collect()),
			..Default::default()
		})
	}

	pub fn requests(&self) -> Vec<RecordedRequest> {
		self.requests.lock().clone()
	}

	pub fn request(&self, index: usize) -> RecordedRequest {
		self.requests.lock().get(index).cloned().expect("Requested request index should exist.")
	}

	pub fn remaining(&self) -> usize {
		self.responses.lock().len()
	}
}
impl ApiHttpClient for ScriptedHttpClient {
	type TransportError = ScriptExhausted;

	fn execute(&self, request: HttpRequest) -> HttpFuture<'_, Self::TransportError> {
		let (parts, body) = request.into_parts();

		self.requests.lock().push(RecordedRequest {
			method: parts.method,
			uri: parts.uri.to_string(),
			headers: parts.headers,
			body,
			sent_at: Instant::now(),
		});

		let next = self.responses.lock().pop_front().ok_or(ScriptExhausted);

		Box::pin(async move { next })
	}
}

pub fn response(status: u16, body: &str) -> HttpResponse {
	http::Response::builder()
		.status(status)
		.header("content-type", "application/json")
		.header("trace-id", TRACE_ID)
		.body(body.as_bytes().to_vec())
		.expect("Scripted response should build.")
}

pub fn token_response(token: &str) -> HttpResponse {
	response(200, &format!(r#"{{"access_token":"{token}","token_type":"bearer"}}"#))
}

pub fn builder() -> ClientConfigBuilder {
	ClientConfig::builder(API_KEY, API_SECRET)
		.auth_endpoint("https://auth.test/oauth/token")
		.api_endpoint("https://api.test/api/1.3")
}

pub fn scripted_client(
	config: ClientConfigBuilder,
	responses: impl IntoIterator<Item = HttpResponse>,
) -> (ApiClient<ScriptedHttpClient>, Arc<ScriptedHttpClient>) {
	let transport = ScriptedHttpClient::new(responses);
	let config = config.build().expect("Test configuration should build.");

	(ApiClient::with_http_client(config, transport.clone()), transport)
}
