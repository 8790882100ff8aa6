//! Token endpoint payloads and cached token entries.

// crates.io
use base64::{Engine, engine::general_purpose::STANDARD};
// self
use crate::{_prelude::*, auth::Secret};

/// Body returned by the product token endpoints.
#[derive(Clone, Deserialize)]
pub struct TokenResponse {
	/// Bearer token.
	pub access_token: String,
	/// Token type, `access_token` in practice.
	#[serde(default)]
	pub token_type: String,
	/// Lifetime in seconds.
	pub expires_in: i64,
}
impl Debug for TokenResponse {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenResponse")
			.field("access_token", &"<redacted>")
			.field("token_type", &self.token_type)
			.field("expires_in", &self.expires_in)
			.finish()
	}
}

/// Bearer token cached for one product.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CachedToken {
	/// Bearer token secret.
	pub token: Secret,
	/// Token type reported by the endpoint.
	pub token_type: String,
	/// Instant after which the token is fetched again.
	pub expires_at: OffsetDateTime,
}
impl CachedToken {
	/// Seconds shaved off `expires_in` so tokens are renewed before the server expires them.
	pub const EXPIRY_MARGIN_SECS: i64 = 60;

	/// Builds a cache entry from a token response received at `now`.
	///
	/// Lifetimes of 60 seconds or less produce an expiry in the past, so the next lookup
	/// fetches again.
	pub fn from_response(response: TokenResponse, now: OffsetDateTime) -> Self {
		let lifetime =
			Duration::seconds(response.expires_in.saturating_sub(Self::EXPIRY_MARGIN_SECS));

		Self {
			token: Secret::new(response.access_token),
			token_type: response.token_type,
			expires_at: now.saturating_add(lifetime),
		}
	}

	/// Returns `true` while `instant` is strictly before the expiry.
	pub fn is_valid_at(&self, instant: OffsetDateTime) -> bool {
		instant < self.expires_at
	}
}

/// Builds `Basic base64(user:key)`.
pub fn basic_auth_header(api_user: &str, api_key: &str) -> String {
	format!("Basic {}", STANDARD.encode(format!("{api_user}:{api_key}")))
}
