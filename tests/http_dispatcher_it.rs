mod support;

// std
use std::{
	io::{Read, Write},
	net::TcpListener,
	thread,
};
// crates.io
use httpmock::prelude::*;
// self
use mtn_momo::{
	Error,
	error::{ApiError, TransportError},
	http::{ApiRequest, Dispatcher},
};
use support::test_dispatcher as dispatcher;

#[tokio::test]
async fn no_content_responses_are_not_decoded() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/collection/v1_0/requesttopay");
			then.status(204);
		})
		.await;
	let response = dispatcher(&server)
		.send(ApiRequest::post("/collection/v1_0/requesttopay"))
		.await
		.expect("204 responses should succeed.");

	assert_eq!(response.status, 204);
	assert!(
		response
			.decode::<serde_json::Value>()
			.expect("Empty responses must not be decoded.")
			.is_none()
	);

	mock.assert_async().await;
}

#[tokio::test]
async fn error_statuses_keep_the_body_verbatim() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/collection/v1_0/account/balance");
			then.status(403)
				.header("content-type", "application/json")
				.body("{\"code\":\"NOT_ALLOWED\",\"message\":\"Authorization failed.\"}");
		})
		.await;
	let err = dispatcher(&server)
		.send(ApiRequest::get("/collection/v1_0/account/balance"))
		.await
		.expect_err("403 responses should fail.");

	assert_eq!(err.status(), Some(403));

	let Error::Api(ApiError { status, body, code, message }) = &err else {
		panic!("Expected an API error, got {err:?}.");
	};

	assert_eq!(*status, 403);
	assert_eq!(body, "{\"code\":\"NOT_ALLOWED\",\"message\":\"Authorization failed.\"}");
	assert_eq!(code.as_deref(), Some("NOT_ALLOWED"));
	assert_eq!(message.as_deref(), Some("Authorization failed."));

	mock.assert_async().await;
}

#[tokio::test]
async fn default_content_type_and_query_are_sent() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/disbursement/v1_0/account/balance")
				.header("content-type", "application/json")
				.header("x-target-environment", "sandbox")
				.query_param("currency", "EUR");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"availableBalance\":\"10.00\",\"currency\":\"EUR\"}");
		})
		.await;
	let response = dispatcher(&server)
		.send(
			ApiRequest::get("/disbursement/v1_0/account/balance")
				.header("x-target-environment", "sandbox")
				.query("currency", "EUR"),
		)
		.await
		.expect("Balance request should succeed.");
	let body = response.json::<serde_json::Value>().expect("Balance body should decode.");

	assert_eq!(body["availableBalance"], "10.00");

	mock.assert_async().await;
}

#[tokio::test]
async fn caller_content_type_replaces_the_default() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/echo").header("content-type", "text/plain");
			then.status(202);
		})
		.await;

	dispatcher(&server)
		.send(ApiRequest::post("/echo").header("Content-Type", "text/plain"))
		.await
		.expect("Request with a custom content type should succeed.");

	mock.assert_async().await;
}

#[tokio::test]
async fn undecodable_bodies_report_the_json_path() {
	let server = MockServer::start_async().await;
	let _mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/collection/v1_0/account/balance");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"availableBalance\":7,\"currency\":\"EUR\"}");
		})
		.await;
	let response = dispatcher(&server)
		.send(ApiRequest::get("/collection/v1_0/account/balance"))
		.await
		.expect("Request should succeed.");
	let err = response
		.json::<mtn_momo::model::Balance>()
		.expect_err("Numeric balances do not match the string field.");

	assert!(matches!(err, Error::Response(_)));
	assert_eq!(err.status(), Some(200));
}

#[tokio::test]
async fn connection_failures_map_to_transport_errors() {
	let dispatcher =
		Dispatcher::new("http://127.0.0.1:1").expect("Dispatcher should build for a dead port.");
	let err = dispatcher
		.send(ApiRequest::get("/collection/v1_0/account/balance"))
		.await
		.expect_err("Nothing listens on port 1.");

	assert!(matches!(err, Error::Transport(TransportError::Network { .. })));
	assert!(err.status().is_none());
}

#[tokio::test]
async fn error_status_survives_an_unreadable_body() {
	let listener = TcpListener::bind("127.0.0.1:0").expect("Loopback listener should bind.");
	let address = listener.local_addr().expect("Listener should have an address.");
	let server = thread::spawn(move || {
		let (mut stream, _) = listener.accept().expect("Client should connect.");
		let mut request = [0_u8; 4096];
		let _ = stream.read(&mut request);
		let _ = stream.write_all(
			b"HTTP/1.1 500 Internal Server Error\r\ncontent-length: 64\r\n\r\ntruncated",
		);
	});
	let dispatcher = Dispatcher::new(&format!("http://{address}"))
		.expect("Dispatcher should build for the loopback listener.");
	let err = dispatcher
		.send(ApiRequest::get("/collection/v1_0/account/balance"))
		.await
		.expect_err("500 responses should fail.");

	server.join().expect("Listener thread should finish.");

	assert_eq!(err.status(), Some(500));
	assert!(matches!(err, Error::Api(ApiError { status: 500, ref body, .. }) if body.is_empty()));
}
