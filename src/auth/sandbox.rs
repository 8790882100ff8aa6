//! Sandbox-only API user and key provisioning.

// self
use crate::{
	_prelude::*,
	auth::Secret,
	config::{Config, Credentials},
	error::AuthError,
	http::{ApiRequest, Dispatcher, REFERENCE_ID_HEADER, SUBSCRIPTION_KEY_HEADER},
	model::ApiUserId,
	obs::{self, Operation},
};

const API_USER_PATH: &str = "/v1_0/apiuser";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiUserPayload<'a> {
	provider_callback_host: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiKeyResponse {
	api_key: String,
}

/// Creates sandbox API users and keys with the collection subscription key.
///
/// Every call fails with [`AuthError::SandboxOnly`] before touching the network when the
/// configuration targets production.
#[derive(Clone, Debug)]
pub struct Sandbox {
	config: Arc<Config>,
	dispatcher: Dispatcher,
}
impl Sandbox {
	/// Creates a provisioner sharing the client's configuration and dispatcher.
	pub fn new(config: Arc<Config>, dispatcher: Dispatcher) -> Self {
		Self { config, dispatcher }
	}

	/// Registers a freshly generated API user and returns its identifier.
	pub async fn create_api_user(&self) -> Result<ApiUserId> {
		self.ensure_sandbox("create_api_user")?;

		obs::observe(None, Operation::CreateApiUser, async {
			let api_user = ApiUserId::generate();
			let request = ApiRequest::post(API_USER_PATH)
				.header(REFERENCE_ID_HEADER, api_user.as_str())
				.header(SUBSCRIPTION_KEY_HEADER, self.config.subscription_key.expose())
				.json(&ApiUserPayload { provider_callback_host: &self.config.callback_host })?;

			self.dispatcher
				.send(request)
				.await
				.map_err(|e| provisioning_error("create an API user", e))?;

			Ok(api_user)
		})
		.await
	}

	/// Creates an API key for `api_user`.
	pub async fn create_api_key(&self, api_user: &ApiUserId) -> Result<Secret> {
		self.ensure_sandbox("create_api_key")?;

		obs::observe(None, Operation::CreateApiKey, async {
			let request = ApiRequest::post(API_USER_PATH)
				.segment(api_user.as_str())
				.segment("apikey")
				.header(SUBSCRIPTION_KEY_HEADER, self.config.subscription_key.expose());
			let response = self
				.dispatcher
				.send(request)
				.await
				.and_then(|response| response.json::<ApiKeyResponse>())
				.map_err(|e| provisioning_error("create an API key", e))?;

			Ok(Secret::new(response.api_key))
		})
		.await
	}

	/// Creates an API user, then a key for it.
	pub async fn provision(&self) -> Result<Credentials> {
		let api_user = self.create_api_user().await?;
		let api_key = self.create_api_key(&api_user).await?;

		obs::record_provisioned(api_user.as_str());

		Ok(Credentials::new(api_user, api_key))
	}

	fn ensure_sandbox(&self, operation: &'static str) -> Result<()> {
		if self.config.is_sandbox() {
			Ok(())
		} else {
			Err(AuthError::SandboxOnly { operation }.into())
		}
	}
}

fn provisioning_error(step: &'static str, source: Error) -> Error {
	AuthError::Provisioning { step, source: Box::new(source) }.into()
}
