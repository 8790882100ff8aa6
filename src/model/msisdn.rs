//! Phone number (MSISDN) normalization strategies.

// self
use crate::_prelude::*;

/// Strategy turning caller-supplied phone input into the canonical MSISDN the API expects.
pub trait MsisdnNormalizer
where
	Self: Send + Sync,
{
	/// Returns the canonical form of `raw`.
	fn normalize(&self, raw: &str) -> String;
}
impl<F> MsisdnNormalizer for F
where
	F: Send + Sync + Fn(&str) -> String,
{
	fn normalize(&self, raw: &str) -> String {
		self(raw)
	}
}

/// Normalizer for a single national numbering plan.
///
/// Non-digits are stripped. A leading trunk prefix is replaced by the country code;
/// otherwise the country code is prepended unless the number already starts with it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CountryCodeNormalizer {
	/// Country calling code without `+`, e.g. `231`.
	pub country_code: String,
	/// Domestic trunk prefix, usually `0`.
	pub trunk_prefix: char,
}
impl CountryCodeNormalizer {
	/// Country code applied by [`Default`].
	pub const DEFAULT_COUNTRY_CODE: &'static str = "231";

	/// Creates a normalizer for `country_code` with the usual `0` trunk prefix.
	pub fn new(country_code: impl Into<String>) -> Self {
		Self { country_code: country_code.into(), trunk_prefix: '0' }
	}

	/// Overrides the trunk prefix.
	pub fn with_trunk_prefix(mut self, prefix: char) -> Self {
		self.trunk_prefix = prefix;

		self
	}
}
impl Default for CountryCodeNormalizer {
	fn default() -> Self {
		Self::new(Self::DEFAULT_COUNTRY_CODE)
	}
}
impl MsisdnNormalizer for CountryCodeNormalizer {
	fn normalize(&self, raw: &str) -> String {
		let digits = raw.chars().filter(char::is_ascii_digit).collect::<String>();

		if let Some(national) = digits.strip_prefix(self.trunk_prefix) {
			return format!("{}{national}", self.country_code);
		}
		if digits.starts_with(&self.country_code) {
			return digits;
		}

		format!("{}{digits}", self.country_code)
	}
}
