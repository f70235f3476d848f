#![cfg(feature = "reqwest")]

mod common;

// std
use std::time::Duration as StdDuration;
// crates.io
use httpmock::prelude::*;
// self
use common::*;
use trustar::{
	auth::AccessToken,
	client::{ApiClient, ReqwestApiClient},
	config::ClientConfig,
	error::Error,
};

const TOKEN_PATH: &str = "/oauth/token";

fn build_client(server: &MockServer) -> ReqwestApiClient {
	let config = ClientConfig::builder(API_KEY, API_SECRET)
		.auth_endpoint(server.url(TOKEN_PATH))
		.api_endpoint(server.url("/api/1.3"))
		.build()
		.expect("Mock server configuration should build.");

	ApiClient::new(config).expect("Reqwest-backed client should build.")
}

#[tokio::test]
async fn token_is_fetched_with_basic_auth_and_cached() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path(TOKEN_PATH)
				.query_param("grant_type", "client_credentials")
				.header("authorization", BASIC_AUTH);
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"access_token":"TEST-token","token_type":"bearer","expires_in":3599}"#);
		})
		.await;
	let client = build_client(&server);
	let first =
		client.token_manager().get_token().await.expect("First token fetch should succeed.");
	let second =
		client.token_manager().get_token().await.expect("Cached token lookup should succeed.");

	assert_eq!(first.token.expose(), "TEST-token");
	assert_eq!(first, second);

	mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn numeric_token_is_sent_as_bearer_text() {
	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path(TOKEN_PATH);
			then.status(200).body(r#"{"access_token":1234567890}"#);
		})
		.await;
	let ping_mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/api/1.3/ping")
				.header("authorization", "Bearer 1234567890")
				.header("client-type", "RUST_SDK");
			then.status(200).body("pong");
		})
		.await;
	let client = build_client(&server);

	assert_eq!(client.ping().await.expect("Ping should succeed."), "pong");

	token_mock.assert_calls_async(1).await;
	ping_mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn rejected_credentials_surface_token_unavailable() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path(TOKEN_PATH);
			then.status(401)
				.body(r#"{"error":"unauthorized","error_description":"Bad credentials"}"#);
		})
		.await;
	let client = build_client(&server);
	let err = client.ping().await.expect_err("Rejected credentials should fail.");

	assert!(matches!(err, Error::TokenUnavailable { status: Some(401), .. }));
	assert_eq!(err.to_string(), "Unable to obtain token.");
	assert!(client.token_manager().cached().is_none());

	mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn concurrent_first_calls_share_one_fetch() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path(TOKEN_PATH);
			then.status(200)
				.delay(StdDuration::from_millis(150))
				.body(r#"{"access_token":"shared"}"#);
		})
		.await;
	let client = build_client(&server);
	let handles = (0..8)
		.map(|_| {
			let client = client.clone();

			tokio::spawn(async move { client.token_manager().get_token().await })
		})
		.collect::<Vec<_>>();

	for handle in handles {
		let token = handle
			.await
			.expect("Token task should not panic.")
			.expect("Concurrent token fetch should succeed.");

		assert_eq!(token.token.expose(), "shared");
	}

	assert_eq!(client.token_manager().fetch_count(), 1);

	mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn concurrent_expiry_triggers_one_refresh() {
	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path(TOKEN_PATH);
			then.status(200)
				.delay(StdDuration::from_millis(100))
				.body(r#"{"access_token":"fresh"}"#);
		})
		.await;
	let _stale_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/1.3/ping").header("authorization", "Bearer stale");
			then.status(400).header("trace-id", TRACE_ID).body(EXPIRED_TOKEN_BODY);
		})
		.await;
	let fresh_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/1.3/ping").header("authorization", "Bearer fresh");
			then.status(200).body("pong");
		})
		.await;
	let client = build_client(&server);

	client.token_manager().seed_token(AccessToken::new("stale"));

	let handles = (0..6)
		.map(|_| {
			let client = client.clone();

			tokio::spawn(async move { client.ping().await })
		})
		.collect::<Vec<_>>();

	for handle in handles {
		let body = handle
			.await
			.expect("Ping task should not panic.")
			.expect("Ping should recover from the expired token.");

		assert_eq!(body, "pong");
	}

	token_mock.assert_calls_async(1).await;
	fresh_mock.assert_calls_async(6).await;
}
