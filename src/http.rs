//! Request dispatch for the MoMo REST surface.
//!
//! Callers describe a call with [`ApiRequest`] (method, path, headers, query, optional JSON
//! body) and hand it to [`Dispatcher::send`]. The dispatcher joins the path onto the
//! configured host, sets `Content-Type: application/json` (callers may override it), makes a
//! single attempt with a fixed timeout, and turns any non-2xx status into an
//! [`ApiError`] carrying the raw body. Successful bodies stay undecoded in
//! [`ApiResponse`] until the caller asks for a type.

// std
use std::time::Duration as StdDuration;
// crates.io
use reqwest::{
	Method, StatusCode,
	header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue},
};
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	error::{ApiError, ConfigError, ResponseError, TransportError},
};

/// Per-request timeout applied by [`Dispatcher::new`].
pub const REQUEST_TIMEOUT: StdDuration = StdDuration::from_secs(30);

/// Declarative description of a single API call.
#[derive(Clone)]
pub struct ApiRequest {
	/// HTTP method.
	pub method: Method,
	/// Path appended to the host, starting with `/`.
	pub path: String,
	/// Caller-supplied path segments appended after `path`, each percent-encoded.
	pub segments: Vec<String>,
	/// Serialized JSON body, if any.
	pub body: Option<Vec<u8>>,
	/// Headers layered over the defaults.
	pub headers: BTreeMap<String, String>,
	/// Query parameters.
	pub query: BTreeMap<String, String>,
}
impl ApiRequest {
	/// Creates a request with no body, headers, or query.
	pub fn new(method: Method, path: impl Into<String>) -> Self {
		Self {
			method,
			path: path.into(),
			segments: Vec::new(),
			body: None,
			headers: BTreeMap::new(),
			query: BTreeMap::new(),
		}
	}

	/// Shorthand for a `GET` request.
	pub fn get(path: impl Into<String>) -> Self {
		Self::new(Method::GET, path)
	}

	/// Shorthand for a `POST` request.
	pub fn post(path: impl Into<String>) -> Self {
		Self::new(Method::POST, path)
	}

	/// Appends one percent-encoded path segment; the value cannot leave the route it is
	/// placed in.
	pub fn segment(mut self, segment: impl Into<String>) -> Self {
		self.segments.push(segment.into());

		self
	}

	/// Serializes `body` as the JSON payload.
	pub fn json<T>(mut self, body: &T) -> Result<Self>
	where
		T: ?Sized + Serialize,
	{
		self.body = Some(serde_json::to_vec(body).map_err(ConfigError::RequestBody)?);

		Ok(self)
	}

	/// Adds or replaces a header.
	pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers.insert(name.into(), value.into());

		self
	}

	/// Adds a header only when `value` is present.
	pub fn header_opt(self, name: impl Into<String>, value: Option<impl Into<String>>) -> Self {
		match value {
			Some(value) => self.header(name, value),
			None => self,
		}
	}

	/// Adds or replaces a query parameter.
	pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.query.insert(name.into(), value.into());

		self
	}
}
impl Debug for ApiRequest {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		let headers = self
			.headers
			.iter()
			.map(|(name, value)| {
				let shown = if name.eq_ignore_ascii_case(AUTHORIZATION.as_str())
					|| name.eq_ignore_ascii_case(SUBSCRIPTION_KEY_HEADER)
				{
					"<redacted>"
				} else {
					value.as_str()
				};

				(name.as_str(), shown)
			})
			.collect::<BTreeMap<_, _>>();

		f.debug_struct("ApiRequest")
			.field("method", &self.method)
			.field("path", &self.path)
			.field("segments", &self.segments)
			.field("body_len", &self.body.as_ref().map(Vec::len))
			.field("headers", &headers)
			.field("query", &self.query)
			.finish()
	}
}

/// Header carrying the product subscription key.
pub const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";
/// Header carrying the caller- or client-chosen reference identifier.
pub const REFERENCE_ID_HEADER: &str = "X-Reference-Id";
/// Header carrying the target environment.
pub const TARGET_ENVIRONMENT_HEADER: &str = "X-Target-Environment";
/// Header carrying the optional idempotency key.
pub const IDEMPOTENCY_KEY_HEADER: &str = "X-Idempotency-Key";

/// Successful (2xx) response with its body still undecoded.
#[derive(Clone, Debug)]
pub struct ApiResponse {
	/// HTTP status code.
	pub status: u16,
	/// Raw body bytes.
	pub body: Vec<u8>,
}
impl ApiResponse {
	/// Returns `true` when there is nothing to decode: `204 No Content` or a blank body.
	pub fn is_empty(&self) -> bool {
		self.status == StatusCode::NO_CONTENT.as_u16()
			|| self.body.iter().all(u8::is_ascii_whitespace)
	}

	/// Decodes the body into `T`, or returns `None` without decoding when
	/// [`is_empty`](Self::is_empty).
	pub fn decode<T>(&self) -> Result<Option<T>>
	where
		T: DeserializeOwned,
	{
		if self.is_empty() {
			return Ok(None);
		}

		let mut de = serde_json::Deserializer::from_slice(&self.body);

		serde_path_to_error::deserialize(&mut de)
			.map(Some)
			.map_err(|source| ResponseError::Decode { source, status: self.status }.into())
	}

	/// Decodes the body into `T`, treating an empty body as an error.
	pub fn json<T>(&self) -> Result<T>
	where
		T: DeserializeOwned,
	{
		self.decode()?.ok_or_else(|| ResponseError::EmptyBody { status: self.status }.into())
	}

	/// Body as lossy UTF-8 text.
	pub fn text(&self) -> String {
		String::from_utf8_lossy(&self.body).into_owned()
	}
}

/// Sends [`ApiRequest`]s to one MoMo host.
///
/// Cloning is cheap: the underlying reqwest client shares its connection pool.
#[derive(Clone)]
pub struct Dispatcher {
	client: ReqwestClient,
	base_url: String,
}
impl Dispatcher {
	/// Builds a dispatcher with its own reqwest client and the default 30 s timeout.
	pub fn new(host: &str) -> Result<Self, ConfigError> {
		let client = ReqwestClient::builder().timeout(REQUEST_TIMEOUT).build()?;

		Self::with_client(host, client)
	}

	/// Wraps an existing reqwest client; its own timeout settings apply.
	///
	/// A bare host gets an `https://` scheme; a host that already carries a scheme is used
	/// as-is.
	pub fn with_client(host: &str, client: ReqwestClient) -> Result<Self, ConfigError> {
		let host = host.trim();

		if host.is_empty() {
			return Err(ConfigError::MissingField { field: "host" });
		}

		let base_url = if host.contains("://") {
			host.trim_end_matches('/').to_owned()
		} else {
			format!("https://{}", host.trim_end_matches('/'))
		};

		Url::parse(&base_url)
			.map_err(|source| ConfigError::InvalidHost { host: host.to_owned(), source })?;

		Ok(Self { client, base_url })
	}

	/// Base URL every path is appended to.
	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	/// Full URL for `request`, query included.
	pub fn url_for(&self, request: &ApiRequest) -> Result<Url, ConfigError> {
		let raw = format!("{}{}", self.base_url, request.path);
		let mut url = Url::parse(&raw).map_err(ConfigError::InvalidUrl)?;

		if !request.segments.is_empty() {
			url.path_segments_mut()
				.map_err(|_| {
					ConfigError::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase)
				})?
				.pop_if_empty()
				.extend(&request.segments);
		}
		if !request.query.is_empty() {
			url.query_pairs_mut().extend_pairs(request.query.iter());
		}

		Ok(url)
	}

	/// Sends `request` once and returns the response if its status is 2xx.
	///
	/// A non-2xx status is reported even when its body cannot be read; the body is then empty.
	pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
		let url = self.url_for(&request)?;
		let headers = build_headers(&request.headers)?;
		let mut builder = self.client.request(request.method, url).headers(headers);

		if let Some(body) = request.body {
			builder = builder.body(body);
		}

		let response = builder.send().await.map_err(TransportError::from)?;
		let status = response.status();
		let body = response.bytes().await;

		if !status.is_success() {
			let text = body
				.map(|body| String::from_utf8_lossy(&body).into_owned())
				.unwrap_or_default();

			return Err(ApiError::new(status.as_u16(), text).into());
		}

		let body = body.map_err(TransportError::from)?;

		Ok(ApiResponse { status: status.as_u16(), body: body.to_vec() })
	}
}
impl Debug for Dispatcher {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Dispatcher").field("base_url", &self.base_url).finish()
	}
}

fn build_headers(extra: &BTreeMap<String, String>) -> Result<HeaderMap, ConfigError> {
	let mut headers = HeaderMap::new();

	headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

	for (name, value) in extra {
		let invalid = || ConfigError::InvalidHeader { name: name.clone() };
		let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
		let header_value = HeaderValue::from_str(value).map_err(|_| invalid())?;

		headers.insert(header_name, header_value);
	}

	Ok(headers)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn bare_hosts_get_https_and_schemes_are_kept() {
		let dispatcher = Dispatcher::new("sandbox.momodeveloper.mtn.com/")
			.expect("Bare host should build a dispatcher.");

		assert_eq!(dispatcher.base_url(), "https://sandbox.momodeveloper.mtn.com");

		let dispatcher =
			Dispatcher::new("http://127.0.0.1:8080").expect("Host with scheme should be kept.");

		assert_eq!(dispatcher.base_url(), "http://127.0.0.1:8080");
		assert!(matches!(Dispatcher::new("  "), Err(ConfigError::MissingField { field: "host" })));
	}

	#[test]
	fn url_includes_path_and_query() {
		let dispatcher = Dispatcher::new("api.example.com").expect("Dispatcher should build.");
		let request = ApiRequest::get("/collection/v1_0/account/balance").query("currency", "EUR");
		let url = dispatcher.url_for(&request).expect("URL should build.");

		assert_eq!(
			url.as_str(),
			"https://api.example.com/collection/v1_0/account/balance?currency=EUR"
		);
	}

	#[test]
	fn segments_are_escaped_and_stay_in_their_route() {
		let dispatcher = Dispatcher::new("api.example.com").expect("Dispatcher should build.");
		let request = ApiRequest::get("/collection/v1_0/requesttopay").segment("../a/b?c#d");
		let url = dispatcher.url_for(&request).expect("URL should build.");

		assert_eq!(
			url.as_str(),
			"https://api.example.com/collection/v1_0/requesttopay/..%2Fa%2Fb%3Fc%23d"
		);

		let request = ApiRequest::post("/v1_0/apiuser").segment("user-1").segment("apikey");
		let url = dispatcher.url_for(&request).expect("URL should build.");

		assert_eq!(url.path(), "/v1_0/apiuser/user-1/apikey");
	}

	#[test]
	fn caller_headers_replace_defaults() {
		let extra = BTreeMap::from([("content-type".to_owned(), "text/plain".to_owned())]);
		let headers = build_headers(&extra).expect("Headers should build.");

		assert_eq!(headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()), Some("text/plain"));
		assert_eq!(headers.len(), 1);

		let bad = BTreeMap::from([("bad header".to_owned(), "x".to_owned())]);

		assert!(matches!(build_headers(&bad), Err(ConfigError::InvalidHeader { .. })));
	}

	#[test]
	fn empty_and_no_content_responses_skip_decoding() {
		let no_content = ApiResponse { status: 204, body: b"not json".to_vec() };
		let blank = ApiResponse { status: 202, body: Vec::new() };

		assert!(
			no_content
				.decode::<serde_json::Value>()
				.expect("204 must not be decoded.")
				.is_none()
		);
		assert!(blank.decode::<serde_json::Value>().expect("Blank body is fine.").is_none());
		assert!(matches!(
			blank.json::<serde_json::Value>(),
			Err(Error::Response(ResponseError::EmptyBody { status: 202 }))
		));
	}

	#[test]
	fn request_debug_redacts_credentials() {
		let request = ApiRequest::post("/collection/token/")
			.header("Authorization", "Basic c2VjcmV0")
			.header(SUBSCRIPTION_KEY_HEADER, "sub-key");
		let rendered = format!("{request:?}");

		assert!(!rendered.contains("c2VjcmV0"));
		assert!(!rendered.contains("sub-key"));
	}
}
