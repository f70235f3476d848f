//! Demonstrates client-credentials auth against a local mock server: a stale token is replaced
//! transparently, then a page of indicators is fetched and decoded.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use trustar::{
	auth::AccessToken,
	client::{ApiClient, ApiRequest},
	config::ClientConfig,
	models::{Indicator, NumberedPage},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/token").query_param("grant_type", "client_credentials");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"access_token\":\"demo-access\",\"token_type\":\"bearer\",\"expires_in\":3599}");
		})
		.await;
	let expired_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/1.3/ping").header("authorization", "Bearer yesterday");
			then.status(400)
				.header("trace-id", "demo-trace")
				.body("{\"error_description\":\"Expired oauth2 access token\"}");
		})
		.await;
	let ping_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/1.3/ping").header("authorization", "Bearer demo-access");
			then.status(200).body("pong");
		})
		.await;
	let indicators_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/1.3/indicators").query_param("pageSize", "2");
			then.status(200).header("content-type", "application/json").body(
				"{\"items\":[{\"value\":\"8.8.8.8\",\"type\":\"IP\"},{\"value\":\"evil.com\",\"type\":\"URL\"}],\
				 \"pageNumber\":0,\"pageSize\":2,\"totalElements\":5}",
			);
		})
		.await;
	let config = ClientConfig::builder("demo-key", "demo-secret")
		.auth_endpoint(server.url("/oauth/token"))
		.api_endpoint(server.url("/api/1.3"))
		.client_metatag("demo")
		.build()?;
	let client = ApiClient::new(config)?;

	// Pretend a token survived from a previous run.
	client.token_manager().seed_token(AccessToken::new("yesterday"));

	println!("Ping answered: {}.", client.ping().await?);

	let page = client
		.execute(ApiRequest::get("indicators").with_query("pageSize", "2"))
		.await?
		.model::<NumberedPage<Indicator>>()?;

	for indicator in page.items() {
		println!("Indicator {} ({:?}).", indicator.value, indicator.kind());
	}

	println!(
		"Page 1 of {:?}, more pages: {:?}; {} attempts, {} token refreshes.",
		page.total_pages(),
		page.has_more_pages(),
		client.metrics().attempts(),
		client.metrics().token_refreshes(),
	);

	token_mock.assert_async().await;
	expired_mock.assert_async().await;
	ping_mock.assert_async().await;
	indicators_mock.assert_async().await;

	Ok(())
}
