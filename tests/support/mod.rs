//! Helpers shared by the integration tests.

#![allow(dead_code)]

// crates.io
use httpmock::MockServer;
// self
use mtn_momo::{
	Client, Config,
	http::{Dispatcher, REQUEST_TIMEOUT},
	reqwest::Client as ReqwestClient,
};

/// Builds a reqwest client that accepts the self-signed certificates produced by `httpmock`.
pub fn test_reqwest_client() -> ReqwestClient {
	ReqwestClient::builder()
		.danger_accept_invalid_certs(true)
		.timeout(REQUEST_TIMEOUT)
		.build()
		.expect("Failed to build insecure Reqwest client for tests.")
}

/// Dispatcher pointed at `server` through the insecure test client.
pub fn test_dispatcher(server: &MockServer) -> Dispatcher {
	Dispatcher::with_client(&server.base_url(), test_reqwest_client())
		.expect("Dispatcher should build for the mock server.")
}

/// Client for `config` whose requests all go to `server`.
pub fn test_client(server: &MockServer, config: Config) -> Client {
	Client::with_dispatcher(config, test_dispatcher(server))
}
