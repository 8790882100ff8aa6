//! Client facade tying configuration, dispatcher, and authenticator together.

// self
use crate::{
	_prelude::*,
	auth::{Authenticator, Sandbox},
	config::{Config, ENV_ENVIRONMENT, Environment},
	http::Dispatcher,
	model::{CountryCodeNormalizer, MsisdnNormalizer},
	product::Product,
	services::{Collection, Disbursement, common::ProductService},
};

/// Entry point to the MoMo API.
///
/// Cloning is cheap and clones share the token cache, so a single session can be handed to
/// many tasks.
#[derive(Clone)]
pub struct Client {
	config: Arc<Config>,
	dispatcher: Dispatcher,
	authenticator: Arc<Authenticator>,
	normalizer: Arc<dyn MsisdnNormalizer>,
}
impl Client {
	/// Creates a client with its own HTTP transport.
	pub fn new(config: Config) -> Result<Self> {
		let dispatcher = Dispatcher::new(&config.host)?;

		Ok(Self::with_dispatcher(config, dispatcher))
	}

	/// Creates a client around an existing dispatcher.
	pub fn with_dispatcher(config: Config, dispatcher: Dispatcher) -> Self {
		let config = Arc::new(config);
		let authenticator = Arc::new(Authenticator::new(config.clone(), dispatcher.clone()));

		Self {
			config,
			dispatcher,
			authenticator,
			normalizer: Arc::new(CountryCodeNormalizer::default()),
		}
	}

	/// Builds a client for `environment` from the `MOMO_*` environment variables.
	pub fn from_env(environment: Environment) -> Result<Self> {
		Self::new(Config::from_env(environment)?)
	}

	/// Builds a client for the environment named by `MOMO_ENVIRONMENT`, defaulting to the
	/// sandbox when the variable is unset or empty.
	pub fn from_env_selected() -> Result<Self> {
		let environment = match std::env::var(ENV_ENVIRONMENT) {
			Ok(value) if !value.is_empty() => value.parse::<Environment>()?,
			_ => Environment::default(),
		};

		Self::from_env(environment)
	}

	/// Replaces the phone normalizer used by both product services.
	pub fn with_normalizer<N>(mut self, normalizer: N) -> Self
	where
		N: 'static + MsisdnNormalizer,
	{
		self.normalizer = Arc::new(normalizer);

		self
	}

	/// Collection service sharing this client's session.
	pub fn collection(&self) -> Collection {
		Collection::new(self.service(Product::Collection))
	}

	/// Disbursement service sharing this client's session.
	pub fn disbursement(&self) -> Disbursement {
		Disbursement::new(self.service(Product::Disbursement))
	}

	/// Sandbox provisioner; fails with a sandbox-only error in production.
	pub fn sandbox(&self) -> &Sandbox {
		self.authenticator.sandbox()
	}

	/// Session token cache.
	pub fn authenticator(&self) -> &Arc<Authenticator> {
		&self.authenticator
	}

	/// Immutable configuration.
	pub fn config(&self) -> &Config {
		&self.config
	}

	fn service(&self, product: Product) -> ProductService {
		ProductService {
			product,
			config: self.config.clone(),
			dispatcher: self.dispatcher.clone(),
			authenticator: self.authenticator.clone(),
			normalizer: self.normalizer.clone(),
		}
	}
}
impl Debug for Client {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Client")
			.field("config", &self.config)
			.field("dispatcher", &self.dispatcher)
			.finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn client() -> Client {
		let config = Config::builder(Environment::Sandbox)
			.subscription_key("sub")
			.build()
			.expect("Sandbox config should build.");

		Client::new(config).expect("Client should build.")
	}

	#[test]
	fn services_share_one_session() {
		let client = client();
		let clone = client.clone();

		assert!(Arc::ptr_eq(client.authenticator(), clone.authenticator()));
		assert_eq!(client.config().host, Environment::SANDBOX_HOST);
	}

	#[test]
	fn custom_normalizer_is_installed() {
		let client = client().with_normalizer(|raw: &str| format!("x{raw}"));

		assert_eq!(client.normalizer.normalize("1"), "x1");
	}

	#[test]
	fn debug_output_redacts_keys() {
		let rendered = format!("{:?}", client());

		assert!(!rendered.contains("\"sub\""));
	}
}
