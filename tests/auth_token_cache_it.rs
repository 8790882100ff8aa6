mod support;

// crates.io
use httpmock::prelude::*;
use time::{Duration, OffsetDateTime};
// self
use mtn_momo::{
	Client, Config, Environment, Error, Product, Result,
	auth::Secret,
	error::AuthError,
};
use support::test_client;

const BASIC_AUTH: &str = "Basic YXBpLXVzZXI6YXBpLWtleQ==";

fn build_client(server: &MockServer) -> Client {
	let config = Config::builder(Environment::Sandbox)
		.subscription_key("collection-key")
		.disbursement_key("disbursement-key")
		.host(server.base_url())
		.api_user("api-user")
		.api_key("api-key")
		.build()
		.expect("Sandbox config with credentials should build.");

	test_client(server, config)
}

fn token_body(token: &str, expires_in: i64) -> String {
	serde_json::json!({
		"access_token": token,
		"token_type": "access_token",
		"expires_in": expires_in,
	})
	.to_string()
}

#[tokio::test]
async fn cached_token_is_reused_within_its_lifetime() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/collection/token/")
				.header("authorization", BASIC_AUTH)
				.header("ocp-apim-subscription-key", "collection-key");
			then.status(200)
				.header("content-type", "application/json")
				.body(token_body("collection-token", 3600));
		})
		.await;
	let client = build_client(&server);
	let before = OffsetDateTime::now_utc();
	let first = client
		.authenticator()
		.access_token(Product::Collection)
		.await
		.expect("Initial token fetch should succeed.");
	let second = client
		.authenticator()
		.access_token(Product::Collection)
		.await
		.expect("Cached token lookup should succeed.");

	assert_eq!(first.expose(), "collection-token");
	assert_eq!(first, second);

	mock.assert_calls_async(1).await;

	let cached = client
		.authenticator()
		.cached(Product::Collection)
		.await
		.expect("Token should be cached after the exchange.");
	let lifetime = cached.expires_at - before;

	assert!(lifetime >= Duration::seconds(3539) && lifetime <= Duration::seconds(3541));
}

#[tokio::test]
async fn tokens_are_cached_per_product() {
	let server = MockServer::start_async().await;
	let collection = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/collection/token/")
				.header("ocp-apim-subscription-key", "collection-key");
			then.status(200)
				.header("content-type", "application/json")
				.body(token_body("collection-token", 3600));
		})
		.await;
	let disbursement = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/disbursement/token/")
				.header("authorization", BASIC_AUTH)
				.header("ocp-apim-subscription-key", "disbursement-key");
			then.status(200)
				.header("content-type", "application/json")
				.body(token_body("disbursement-token", 3600));
		})
		.await;
	let client = build_client(&server);
	let authenticator = client.authenticator();

	for _ in 0..2 {
		let c = authenticator
			.access_token(Product::Collection)
			.await
			.expect("Collection token should be available.");
		let d = authenticator
			.access_token(Product::Disbursement)
			.await
			.expect("Disbursement token should be available.");

		assert_eq!(c.expose(), "collection-token");
		assert_eq!(d.expose(), "disbursement-token");
	}

	collection.assert_calls_async(1).await;
	disbursement.assert_calls_async(1).await;
}

#[tokio::test]
async fn concurrent_callers_share_one_exchange() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/collection/token/");
			then.status(200)
				.header("content-type", "application/json")
				.body(token_body("shared-token", 3600));
		})
		.await;
	let client = build_client(&server);
	let authenticator = client.authenticator();
	let (first, second): (Result<Secret>, Result<Secret>) = tokio::join!(
		authenticator.access_token(Product::Collection),
		authenticator.access_token(Product::Collection),
	);

	assert_eq!(first.expect("First concurrent call should succeed.").expose(), "shared-token");
	assert_eq!(second.expect("Second concurrent call should succeed.").expose(), "shared-token");

	mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn unknown_products_fail_without_network_calls() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST);
			then.status(200)
				.header("content-type", "application/json")
				.body(token_body("unused", 3600));
		})
		.await;
	let client = build_client(&server);
	let err = client
		.authenticator()
		.access_token_for("remittance")
		.await
		.expect_err("Unknown products should be rejected.");

	assert!(matches!(err, Error::UnknownProduct { ref product } if product == "remittance"));

	let token = client
		.authenticator()
		.access_token_for("disbursement")
		.await
		.expect("Known product names should be accepted.");

	assert_eq!(token.expose(), "unused");

	mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn short_lived_tokens_are_fetched_again() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/collection/token/");
			then.status(200)
				.header("content-type", "application/json")
				.body(token_body("short-token", 30));
		})
		.await;
	let client = build_client(&server);

	for _ in 0..2 {
		client
			.authenticator()
			.access_token(Product::Collection)
			.await
			.expect("Token fetch should succeed.");
	}

	mock.assert_calls_async(2).await;
}

#[tokio::test]
async fn invalidated_tokens_are_fetched_again() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/collection/token/");
			then.status(200)
				.header("content-type", "application/json")
				.body(token_body("collection-token", 3600));
		})
		.await;
	let client = build_client(&server);
	let authenticator = client.authenticator();

	authenticator.access_token(Product::Collection).await.expect("Token fetch should succeed.");
	authenticator.invalidate(Product::Collection).await;

	assert!(authenticator.cached(Product::Collection).await.is_none());

	authenticator.access_token(Product::Collection).await.expect("Token fetch should succeed.");
	authenticator.clear().await;
	authenticator.access_token(Product::Collection).await.expect("Token fetch should succeed.");

	mock.assert_calls_async(3).await;
}

#[tokio::test]
async fn token_endpoint_failures_are_wrapped() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/disbursement/token/");
			then.status(401)
				.header("content-type", "application/json")
				.body("{\"error\":\"login_failed\"}");
		})
		.await;
	let client = build_client(&server);
	let err = client
		.authenticator()
		.access_token(Product::Disbursement)
		.await
		.expect_err("401 from the token endpoint should fail.");

	assert!(matches!(
		err,
		Error::Auth(AuthError::TokenExchange { product: Product::Disbursement, .. })
	));
	assert_eq!(err.status(), Some(401));
	assert!(client.authenticator().cached(Product::Disbursement).await.is_none());

	mock.assert_async().await;
}
