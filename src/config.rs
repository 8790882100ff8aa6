//! Immutable client configuration and the environment it targets.

pub mod builder;

pub use builder::*;

// self
use crate::{_prelude::*, auth::Secret, error::ConfigError, model::ApiUserId};

/// Environment variable holding the collection subscription key.
pub const ENV_SUBSCRIPTION_KEY: &str = "MOMO_SUBSCRIPTION_KEY";
/// Environment variable holding the disbursement subscription key.
pub const ENV_DISBURSEMENT_KEY: &str = "MOMO_DISBURSEMENT_KEY";
/// Environment variable holding the `X-Target-Environment` value.
pub const ENV_TARGET_ENVIRONMENT: &str = "MOMO_TARGET_ENVIRONMENT";
/// Environment variable holding the provider callback host.
pub const ENV_CALLBACK_HOST: &str = "MOMO_CALLBACK_HOST";
/// Environment variable holding the API host.
pub const ENV_HOST: &str = "MOMO_HOST";
/// Environment variable holding the API user.
pub const ENV_API_USER: &str = "MOMO_API_USER";
/// Environment variable holding the API key.
pub const ENV_API_KEY: &str = "MOMO_API_KEY";
/// Environment variable holding the default currency.
pub const ENV_CURRENCY: &str = "MOMO_CURRENCY";
/// Environment variable selecting `sandbox` or `production`.
pub const ENV_ENVIRONMENT: &str = "MOMO_ENVIRONMENT";

/// MoMo deployment a client talks to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
	/// Developer sandbox; credentials can be provisioned on the fly.
	#[default]
	Sandbox,
	/// Live environment; credentials must be configured.
	Production,
}
impl Environment {
	/// Sandbox API host.
	pub const SANDBOX_HOST: &'static str = "sandbox.momodeveloper.mtn.com";
	/// Sandbox target environment and default currency.
	pub const SANDBOX_TARGET: &'static str = "sandbox";
	/// Currency the sandbox accepts.
	pub const SANDBOX_CURRENCY: &'static str = "EUR";

	/// Returns a stable label.
	pub const fn as_str(self) -> &'static str {
		match self {
			Environment::Sandbox => "sandbox",
			Environment::Production => "production",
		}
	}

	/// Environment-specific defaults, the first configuration layer.
	pub fn defaults(self) -> ConfigOverrides {
		match self {
			Environment::Sandbox => ConfigOverrides {
				host: Some(Self::SANDBOX_HOST.into()),
				target_environment: Some(Self::SANDBOX_TARGET.into()),
				currency: Some(Self::SANDBOX_CURRENCY.into()),
				..Default::default()
			},
			Environment::Production => ConfigOverrides::default(),
		}
	}
}
impl Display for Environment {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for Environment {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"sandbox" => Ok(Environment::Sandbox),
			"production" => Ok(Environment::Production),
			_ => Err(ConfigError::UnknownEnvironment { value: s.to_owned() }),
		}
	}
}

/// API user + key pair used for the token exchange.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
	/// API user identifier.
	pub api_user: ApiUserId,
	/// API key of that user.
	pub api_key: Secret,
}
impl Credentials {
	/// Creates a credential pair.
	pub fn new(api_user: ApiUserId, api_key: impl Into<Secret>) -> Self {
		Self { api_user, api_key: api_key.into() }
	}
}

/// Validated client configuration. Built once through [`ConfigBuilder`], then shared
/// immutably.
#[derive(Clone, Debug)]
pub struct Config {
	/// Target deployment.
	pub environment: Environment,
	/// Collection subscription key (`Ocp-Apim-Subscription-Key`).
	pub subscription_key: Secret,
	/// Disbursement subscription key; equals the collection key unless configured.
	pub disbursement_key: Secret,
	/// `X-Target-Environment` header value.
	pub target_environment: String,
	/// Host announced when provisioning sandbox users.
	pub callback_host: String,
	/// Configured API user, if any.
	pub api_user: Option<ApiUserId>,
	/// Configured API key, if any.
	pub api_key: Option<Secret>,
	/// API host, with or without scheme.
	pub host: String,
	/// Currency used when a call does not override it.
	pub currency: String,
}
impl Config {
	/// Starts a builder seeded with the defaults for `environment`.
	pub fn builder(environment: Environment) -> ConfigBuilder {
		ConfigBuilder::new(environment)
	}

	/// Builds a configuration from defaults overlaid with `MOMO_*` environment variables.
	pub fn from_env(environment: Environment) -> Result<Self, ConfigError> {
		ConfigBuilder::new(environment).from_env().build()
	}

	/// Returns the configured credential pair when both halves are present.
	pub fn credentials(&self) -> Option<Credentials> {
		match (&self.api_user, &self.api_key) {
			(Some(user), Some(key)) if !key.is_empty() =>
				Some(Credentials::new(user.clone(), key.clone())),
			_ => None,
		}
	}

	/// Returns `true` for the sandbox environment.
	pub fn is_sandbox(&self) -> bool {
		matches!(self.environment, Environment::Sandbox)
	}
}
