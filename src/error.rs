//! Client-level error types shared across the dispatcher, authenticator, and product services.

// self
use crate::{_prelude::*, product::Product};

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Token acquisition or sandbox-only misuse.
	#[error(transparent)]
	Auth(#[from] AuthError),
	/// Remote API answered with a non-2xx status.
	#[error(transparent)]
	Api(#[from] ApiError),
	/// Remote API answered with a body that could not be decoded.
	#[error(transparent)]
	Response(#[from] ResponseError),
	/// Transport failure (DNS, TCP, TLS, timeout).
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// Token fetch was requested for a product this client does not know.
	#[error("Unknown product: {product}.")]
	UnknownProduct {
		/// Product name supplied by the caller.
		product: String,
	},
}
impl Error {
	/// Returns the HTTP status carried by an API failure, looking through authentication
	/// wrappers.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Api(e) => Some(e.status),
			Self::Response(e) => e.status(),
			Self::Auth(AuthError::TokenExchange { source, .. })
			| Self::Auth(AuthError::Provisioning { source, .. }) => source.status(),
			_ => None,
		}
	}
}

/// Configuration and validation failures raised while building or using a client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// A required configuration field is empty.
	#[error("The {field} is required.")]
	MissingField {
		/// Human-readable field label.
		field: &'static str,
	},
	/// Production mode needs an explicit API user and key.
	#[error("API user and key are required for production.")]
	MissingCredentials,
	/// A configured identifier (e.g. the API user) is malformed.
	#[error("Configured identifier is invalid.")]
	InvalidIdentifier(#[from] crate::model::IdentifierError),
	/// Configured host cannot be turned into a base URL.
	#[error("Host `{host}` is not a valid base URL.")]
	InvalidHost {
		/// Host as configured.
		host: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// A request path or query produced an invalid URL.
	#[error("Request URL is invalid.")]
	InvalidUrl(#[source] url::ParseError),
	/// A header name or value cannot be sent over HTTP.
	#[error("Header `{name}` has an invalid name or value.")]
	InvalidHeader {
		/// Offending header name.
		name: String,
	},
	/// Request body could not be serialized to JSON.
	#[error("Request body could not be serialized.")]
	RequestBody(#[source] serde_json::Error),
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Environment selector is neither `sandbox` nor `production`.
	#[error("Unknown environment `{value}`; expected `sandbox` or `production`.")]
	UnknownEnvironment {
		/// Value that failed to parse.
		value: String,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Authentication failures.
#[derive(Debug, ThisError)]
pub enum AuthError {
	/// Credential exchange against the product token endpoint failed.
	#[error("Failed to fetch an access token for {product}.")]
	TokenExchange {
		/// Product whose token endpoint was called.
		product: Product,
		/// Underlying dispatcher failure.
		#[source]
		source: Box<Error>,
	},
	/// Sandbox API user or key creation failed.
	#[error("Failed to {step} in the sandbox.")]
	Provisioning {
		/// Provisioning step label.
		step: &'static str,
		/// Underlying dispatcher failure.
		#[source]
		source: Box<Error>,
	},
	/// A sandbox-only operation was invoked against production.
	#[error("Operation `{operation}` is only available in sandbox mode.")]
	SandboxOnly {
		/// Operation label.
		operation: &'static str,
	},
}

/// Non-2xx response from the remote API.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("API request failed with status code {status}: {body}")]
pub struct ApiError {
	/// HTTP status code.
	pub status: u16,
	/// Raw response body text, verbatim.
	pub body: String,
	/// Remote error code, when the body is a JSON object carrying `code`.
	pub code: Option<String>,
	/// Remote error message, when the body is a JSON object carrying `message`.
	pub message: Option<String>,
}
impl ApiError {
	/// Builds an error from a status and raw body, lifting `code`/`message` out of JSON
	/// bodies when present.
	pub fn new(status: u16, body: impl Into<String>) -> Self {
		#[derive(Deserialize)]
		struct Detail {
			code: Option<String>,
			message: Option<String>,
		}

		let body = body.into();
		let detail = serde_json::from_str::<Detail>(&body).ok();
		let (code, message) = detail.map(|d| (d.code, d.message)).unwrap_or_default();

		Self { status, body, code, message }
	}
}

/// Response bodies that could not be turned into the expected type.
#[derive(Debug, ThisError)]
pub enum ResponseError {
	/// Body is not valid JSON for the expected type.
	#[error("Response body could not be decoded (status {status}).")]
	Decode {
		/// Structured parsing failure, including the JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code of the response.
		status: u16,
	},
	/// A body was expected but none was returned.
	#[error("Response body is empty (status {status}).")]
	EmptyBody {
		/// HTTP status code of the response.
		status: u16,
	},
}
impl ResponseError {
	/// Returns the HTTP status of the offending response.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Decode { status, .. } | Self::EmptyBody { status } => Some(*status),
		}
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the MoMo API.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn api_error_keeps_body_verbatim_and_lifts_details() {
		let err = ApiError::new(403, "{\"code\":\"NOT_ALLOWED\",\"message\":\"Denied\"}");

		assert_eq!(err.status, 403);
		assert_eq!(err.body, "{\"code\":\"NOT_ALLOWED\",\"message\":\"Denied\"}");
		assert_eq!(err.code.as_deref(), Some("NOT_ALLOWED"));
		assert_eq!(err.message.as_deref(), Some("Denied"));

		let plain = ApiError::new(500, "upstream down");

		assert_eq!(plain.body, "upstream down");
		assert!(plain.code.is_none());
		assert!(plain.to_string().contains("500"));
		assert!(plain.to_string().contains("upstream down"));
	}

	#[test]
	fn token_exchange_error_exposes_source_and_status() {
		let err: Error = AuthError::TokenExchange {
			product: Product::Disbursement,
			source: Box::new(ApiError::new(401, "denied").into()),
		}
		.into();

		assert_eq!(err.status(), Some(401));
		assert!(err.to_string().contains("disbursement"));

		let source = StdError::source(&err)
			.expect("Token exchange errors should expose the dispatcher failure as source.");

		assert!(source.to_string().contains("401"));
	}
}
