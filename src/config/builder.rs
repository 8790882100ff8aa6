//! Layered configuration builder.
//!
//! Values resolve in a fixed order no matter how the builder is driven: environment
//! defaults, then `MOMO_*` environment variables, then explicit setter calls.

// self
use crate::{
	_prelude::*,
	auth::Secret,
	config::{
		Config, ENV_API_KEY, ENV_API_USER, ENV_CALLBACK_HOST, ENV_CURRENCY, ENV_DISBURSEMENT_KEY,
		ENV_HOST, ENV_SUBSCRIPTION_KEY, ENV_TARGET_ENVIRONMENT, Environment,
	},
	error::ConfigError,
	model::ApiUserId,
};

/// One configuration layer. Every recognized option is listed; `None` leaves the value
/// from the layer below untouched.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
	/// Collection subscription key.
	pub subscription_key: Option<String>,
	/// Disbursement subscription key.
	pub disbursement_key: Option<String>,
	/// `X-Target-Environment` value.
	pub target_environment: Option<String>,
	/// Callback host announced during sandbox provisioning.
	pub callback_host: Option<String>,
	/// API host.
	pub host: Option<String>,
	/// API user.
	pub api_user: Option<String>,
	/// API key.
	pub api_key: Option<String>,
	/// Default currency.
	pub currency: Option<String>,
}
impl ConfigOverrides {
	/// Reads the `MOMO_*` variables from the process environment.
	pub fn from_env() -> Self {
		Self::from_lookup(|name| std::env::var(name).ok())
	}

	/// Reads variables through `lookup`; empty values count as unset.
	pub fn from_lookup<F>(mut lookup: F) -> Self
	where
		F: FnMut(&str) -> Option<String>,
	{
		let mut read = |name: &str| lookup(name).filter(|value| !value.is_empty());

		Self {
			subscription_key: read(ENV_SUBSCRIPTION_KEY),
			disbursement_key: read(ENV_DISBURSEMENT_KEY),
			target_environment: read(ENV_TARGET_ENVIRONMENT),
			callback_host: read(ENV_CALLBACK_HOST),
			host: read(ENV_HOST),
			api_user: read(ENV_API_USER),
			api_key: read(ENV_API_KEY),
			currency: read(ENV_CURRENCY),
		}
	}

	/// Returns `self` with every value set in `upper` replacing its own.
	pub fn overlay(self, upper: ConfigOverrides) -> Self {
		Self {
			subscription_key: upper.subscription_key.or(self.subscription_key),
			disbursement_key: upper.disbursement_key.or(self.disbursement_key),
			target_environment: upper.target_environment.or(self.target_environment),
			callback_host: upper.callback_host.or(self.callback_host),
			host: upper.host.or(self.host),
			api_user: upper.api_user.or(self.api_user),
			api_key: upper.api_key.or(self.api_key),
			currency: upper.currency.or(self.currency),
		}
	}
}
impl Debug for ConfigOverrides {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ConfigOverrides")
			.field("subscription_key_set", &self.subscription_key.is_some())
			.field("disbursement_key_set", &self.disbursement_key.is_some())
			.field("target_environment", &self.target_environment)
			.field("callback_host", &self.callback_host)
			.field("host", &self.host)
			.field("api_user", &self.api_user)
			.field("api_key_set", &self.api_key.is_some())
			.field("currency", &self.currency)
			.finish()
	}
}

/// Builder for [`Config`] values.
#[derive(Clone, Debug)]
pub struct ConfigBuilder {
	/// Target deployment; selects the default layer.
	pub environment: Environment,
	/// Environment-variable layer.
	pub env: ConfigOverrides,
	/// Explicit caller layer.
	pub explicit: ConfigOverrides,
}
impl ConfigBuilder {
	/// Creates a builder for `environment` with empty override layers.
	pub fn new(environment: Environment) -> Self {
		Self { environment, env: ConfigOverrides::default(), explicit: ConfigOverrides::default() }
	}

	/// Fills the environment-variable layer from the process environment.
	pub fn from_env(self) -> Self {
		self.env_overrides(ConfigOverrides::from_env())
	}

	/// Replaces the environment-variable layer.
	pub fn env_overrides(mut self, overrides: ConfigOverrides) -> Self {
		self.env = overrides;

		self
	}

	/// Sets the collection subscription key.
	pub fn subscription_key(mut self, key: impl Into<String>) -> Self {
		self.explicit.subscription_key = Some(key.into());

		self
	}

	/// Sets the disbursement subscription key.
	pub fn disbursement_key(mut self, key: impl Into<String>) -> Self {
		self.explicit.disbursement_key = Some(key.into());

		self
	}

	/// Sets the `X-Target-Environment` value.
	pub fn target_environment(mut self, target: impl Into<String>) -> Self {
		self.explicit.target_environment = Some(target.into());

		self
	}

	/// Sets the callback host.
	pub fn callback_host(mut self, host: impl Into<String>) -> Self {
		self.explicit.callback_host = Some(host.into());

		self
	}

	/// Sets the API host.
	pub fn host(mut self, host: impl Into<String>) -> Self {
		self.explicit.host = Some(host.into());

		self
	}

	/// Sets the API user.
	pub fn api_user(mut self, user: impl Into<String>) -> Self {
		self.explicit.api_user = Some(user.into());

		self
	}

	/// Sets the API key.
	pub fn api_key(mut self, key: impl Into<String>) -> Self {
		self.explicit.api_key = Some(key.into());

		self
	}

	/// Sets the default currency.
	pub fn currency(mut self, currency: impl Into<String>) -> Self {
		self.explicit.currency = Some(currency.into());

		self
	}

	/// Resolves all layers and validates the result.
	pub fn build(self) -> Result<Config, ConfigError> {
		let resolved = self.environment.defaults().overlay(self.env).overlay(self.explicit);
		let subscription_key = required(resolved.subscription_key, "subscription key")?;
		let target_environment = required(resolved.target_environment, "target environment")?;
		let host = required(resolved.host, "host")?;
		let api_user = resolved.api_user.filter(|value| !value.is_empty());
		let api_key = resolved.api_key.filter(|value| !value.is_empty());

		if matches!(self.environment, Environment::Production)
			&& (api_user.is_none() || api_key.is_none())
		{
			return Err(ConfigError::MissingCredentials);
		}

		let currency = required(resolved.currency, "currency")?;
		let disbursement_key = resolved
			.disbursement_key
			.filter(|value| !value.is_empty())
			.unwrap_or_else(|| subscription_key.clone());
		let api_user = api_user.map(ApiUserId::new).transpose()?;

		Ok(Config {
			environment: self.environment,
			subscription_key: Secret::new(subscription_key),
			disbursement_key: Secret::new(disbursement_key),
			target_environment,
			callback_host: resolved.callback_host.unwrap_or_default(),
			api_user,
			api_key: api_key.map(Secret::new),
			host,
			currency,
		})
	}
}

fn required(value: Option<String>, field: &'static str) -> Result<String, ConfigError> {
	value.filter(|value| !value.trim().is_empty()).ok_or(ConfigError::MissingField { field })
}
