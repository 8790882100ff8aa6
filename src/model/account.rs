//! Account balance and account-holder records.

// self
use crate::_prelude::*;

/// Available balance of the product account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
	/// Balance as rendered by the API.
	pub available_balance: String,
	/// ISO 4217 currency code.
	pub currency: String,
}
impl Balance {
	/// Parses the rendered balance into a decimal.
	pub fn amount(&self) -> Option<Decimal> {
		self.available_balance.trim().parse().ok()
	}
}

/// Basic information about a subscriber.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountHolderInfo {
	/// Given name.
	#[serde(default)]
	pub given_name: String,
	/// Family name.
	#[serde(default)]
	pub family_name: String,
	/// Birth date as rendered by the API.
	#[serde(default)]
	pub birthdate: String,
	/// Locale tag.
	#[serde(default)]
	pub locale: String,
	/// Gender.
	#[serde(default)]
	pub gender: String,
	/// Account status.
	#[serde(default)]
	pub status: String,
}
impl AccountHolderInfo {
	/// Given and family name joined by a space, skipping empty parts.
	pub fn full_name(&self) -> String {
		[self.given_name.as_str(), self.family_name.as_str()]
			.into_iter()
			.filter(|part| !part.is_empty())
			.collect::<Vec<_>>()
			.join(" ")
	}
}
