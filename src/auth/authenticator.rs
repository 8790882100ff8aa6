//! Per-product bearer token cache with lazy sandbox provisioning.
//!
//! One [`Authenticator`] belongs to one client session. Lookups take a single async lock for
//! the whole check-fetch-store sequence, so concurrent callers asking for the same product
//! wait for the in-flight exchange instead of issuing their own.

// self
use crate::{
	_prelude::*,
	auth::{CachedToken, Sandbox, Secret, TokenResponse, basic_auth_header},
	config::{Config, Credentials},
	error::{AuthError, ConfigError},
	http::{ApiRequest, Dispatcher, SUBSCRIPTION_KEY_HEADER},
	obs::{self, Operation},
	product::Product,
};

#[derive(Debug, Default)]
struct SessionState {
	tokens: HashMap<Product, CachedToken>,
	provisioned: Option<Credentials>,
}

/// Issues bearer tokens for each [`Product`], caching them until shortly before expiry.
pub struct Authenticator {
	config: Arc<Config>,
	dispatcher: Dispatcher,
	sandbox: Sandbox,
	state: AsyncMutex<SessionState>,
}
impl Authenticator {
	/// Creates an authenticator with an empty cache.
	pub fn new(config: Arc<Config>, dispatcher: Dispatcher) -> Self {
		let sandbox = Sandbox::new(config.clone(), dispatcher.clone());

		Self { config, dispatcher, sandbox, state: AsyncMutex::new(SessionState::default()) }
	}

	/// Sandbox provisioner used when no credentials are configured.
	pub fn sandbox(&self) -> &Sandbox {
		&self.sandbox
	}

	/// Returns a valid bearer token for `product`, fetching one when the cache has none.
	///
	/// In the sandbox, a missing API user or key is provisioned once per session and reused
	/// for every later exchange.
	pub async fn access_token(&self, product: Product) -> Result<Secret> {
		obs::observe(Some(product), Operation::AccessToken, async move {
			let mut state = self.state.lock().await;
			let now = OffsetDateTime::now_utc();

			if let Some(cached) = state.tokens.get(&product).filter(|t| t.is_valid_at(now)) {
				obs::record_token_cache(product, true);

				return Ok(cached.token.clone());
			}

			obs::record_token_cache(product, false);

			let credentials = self.credentials(&mut state).await?;
			let cached = self
				.exchange(product, &credentials)
				.await
				.map_err(|e| AuthError::TokenExchange { product, source: Box::new(e) })?;
			let token = cached.token.clone();

			state.tokens.insert(product, cached);

			Ok(token)
		})
		.await
	}

	/// Same as [`access_token`](Self::access_token) for a product given by name.
	///
	/// Unknown names fail before any lock or network call.
	pub async fn access_token_for(&self, product: &str) -> Result<Secret> {
		let product = product.parse::<Product>()?;

		self.access_token(product).await
	}

	/// Returns the cached entry for `product`, valid or not.
	pub async fn cached(&self, product: Product) -> Option<CachedToken> {
		self.state.lock().await.tokens.get(&product).cloned()
	}

	/// Drops the cached token for `product`.
	pub async fn invalidate(&self, product: Product) {
		self.state.lock().await.tokens.remove(&product);
	}

	/// Drops every cached token. Provisioned sandbox credentials are kept.
	pub async fn clear(&self) {
		self.state.lock().await.tokens.clear();
	}

	/// Credentials provisioned by this session, if any.
	pub async fn provisioned(&self) -> Option<Credentials> {
		self.state.lock().await.provisioned.clone()
	}

	async fn credentials(&self, state: &mut SessionState) -> Result<Credentials> {
		if let Some(credentials) = self.config.credentials() {
			return Ok(credentials);
		}
		if !self.config.is_sandbox() {
			return Err(ConfigError::MissingCredentials.into());
		}
		if let Some(credentials) = &state.provisioned {
			return Ok(credentials.clone());
		}

		let credentials = self.sandbox.provision().await?;

		state.provisioned = Some(credentials.clone());

		Ok(credentials)
	}

	async fn exchange(&self, product: Product, credentials: &Credentials) -> Result<CachedToken> {
		let request = ApiRequest::post(product.token_path())
			.header(
				"Authorization",
				basic_auth_header(credentials.api_user.as_str(), credentials.api_key.expose()),
			)
			.header(SUBSCRIPTION_KEY_HEADER, product.subscription_key(&self.config));
		let response = self.dispatcher.send(request).await?.json::<TokenResponse>()?;

		Ok(CachedToken::from_response(response, OffsetDateTime::now_utc()))
	}
}
impl Debug for Authenticator {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Authenticator")
			.field("environment", &self.config.environment)
			.field("dispatcher", &self.dispatcher)
			.finish_non_exhaustive()
	}
}
