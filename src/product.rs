//! MoMo API products and the per-product routing they imply.

// self
use crate::{_prelude::*, config::Config, model::PartyRole};

/// API product a call is made against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Product {
	/// Receiving payments from subscribers.
	Collection,
	/// Sending payments to subscribers.
	Disbursement,
}
impl Product {
	/// All products, in a stable order.
	pub const ALL: [Product; 2] = [Product::Collection, Product::Disbursement];

	/// Returns the stable lowercase label, which is also the URL prefix.
	pub const fn as_str(self) -> &'static str {
		match self {
			Product::Collection => "collection",
			Product::Disbursement => "disbursement",
		}
	}

	/// Path of the token endpoint for this product.
	pub const fn token_path(self) -> &'static str {
		match self {
			Product::Collection => "/collection/token/",
			Product::Disbursement => "/disbursement/token/",
		}
	}

	/// Resource segment used to initiate and poll transactions.
	pub const fn transaction_resource(self) -> &'static str {
		match self {
			Product::Collection => "requesttopay",
			Product::Disbursement => "transfer",
		}
	}

	/// Role the counterparty plays in a transaction of this product.
	pub const fn counterparty_role(self) -> PartyRole {
		match self {
			Product::Collection => PartyRole::Payer,
			Product::Disbursement => PartyRole::Payee,
		}
	}

	/// Payer message used when the caller does not supply one.
	pub const fn default_payer_message(self) -> &'static str {
		match self {
			Product::Collection => "Payment request",
			Product::Disbursement => "Disbursement payment",
		}
	}

	/// Payee note used when the caller does not supply one.
	pub const fn default_payee_note(self) -> &'static str {
		match self {
			Product::Collection => "Thank you for your payment",
			Product::Disbursement => "Funds received",
		}
	}

	/// Builds a versioned API path under this product, e.g. `/collection/v1_0/account/balance`.
	pub fn api_path(self, suffix: &str) -> String {
		format!("/{}/v1_0/{}", self.as_str(), suffix.trim_start_matches('/'))
	}

	/// Subscription key presented for this product.
	pub fn subscription_key(self, config: &Config) -> &str {
		match self {
			Product::Collection => config.subscription_key.expose(),
			Product::Disbursement => config.disbursement_key.expose(),
		}
	}
}
impl Display for Product {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for Product {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"collection" => Ok(Product::Collection),
			"disbursement" => Ok(Product::Disbursement),
			other => Err(Error::UnknownProduct { product: other.to_owned() }),
		}
	}
}
