//! Transaction payloads, options, and status records.

// self
use crate::{
	_prelude::*,
	model::{ExternalId, ReferenceId},
};

/// Kind of identifier a [`Party`] carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartyIdType {
	/// Mobile number in international format.
	#[serde(rename = "MSISDN")]
	Msisdn,
	/// Email address.
	#[serde(rename = "EMAIL")]
	Email,
	/// Opaque party code.
	#[serde(rename = "PARTY_CODE")]
	PartyCode,
}

/// Payer or payee of a transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Party {
	/// Identifier kind.
	pub party_id_type: PartyIdType,
	/// Identifier value.
	pub party_id: String,
}
impl Party {
	/// Party identified by a mobile number; normalized before sending.
	pub fn msisdn(phone: impl Into<String>) -> Self {
		Self { party_id_type: PartyIdType::Msisdn, party_id: phone.into() }
	}

	/// Party identified by an email address.
	pub fn email(address: impl Into<String>) -> Self {
		Self { party_id_type: PartyIdType::Email, party_id: address.into() }
	}

	/// Party identified by a party code.
	pub fn party_code(code: impl Into<String>) -> Self {
		Self { party_id_type: PartyIdType::PartyCode, party_id: code.into() }
	}
}

/// Whether the counterparty pays (collections) or is paid (disbursements).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PartyRole {
	/// Counterparty is debited.
	Payer,
	/// Counterparty is credited.
	Payee,
}

/// Body of a request-to-pay or transfer call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPayload {
	/// Amount rendered with two fraction digits.
	pub amount: String,
	/// ISO 4217 currency code.
	pub currency: String,
	/// Caller-side identifier.
	pub external_id: ExternalId,
	/// Debited party, for collections.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub payer: Option<Party>,
	/// Credited party, for disbursements.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub payee: Option<Party>,
	/// Message shown to the payer.
	pub payer_message: String,
	/// Note shown to the payee.
	pub payee_note: String,
}
impl TransactionPayload {
	/// Renders an amount the way the API expects it (`"12.50"`).
	pub fn format_amount(amount: Decimal) -> String {
		format!("{:.2}", amount.round_dp(2))
	}
}

/// Optional knobs for initiating a transaction; unset fields fall back to generated values
/// or product defaults.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransactionOptions {
	/// Sent as `X-Idempotency-Key` when present.
	pub idempotency_key: Option<String>,
	/// Generated when absent.
	pub external_id: Option<ExternalId>,
	/// Generated when absent.
	pub reference_id: Option<ReferenceId>,
	/// Overrides the configured currency.
	pub currency: Option<String>,
	/// Message to the payer.
	pub payer_message: Option<String>,
	/// Note to the payee.
	pub payee_note: Option<String>,
}
impl TransactionOptions {
	/// Sets the idempotency key.
	pub fn idempotency_key(mut self, key: impl Into<String>) -> Self {
		self.idempotency_key = Some(key.into());

		self
	}

	/// Sets the external identifier.
	pub fn external_id(mut self, id: ExternalId) -> Self {
		self.external_id = Some(id);

		self
	}

	/// Sets the reference identifier.
	pub fn reference_id(mut self, id: ReferenceId) -> Self {
		self.reference_id = Some(id);

		self
	}

	/// Overrides the currency.
	pub fn currency(mut self, currency: impl Into<String>) -> Self {
		self.currency = Some(currency.into());

		self
	}

	/// Sets the payer message.
	pub fn payer_message(mut self, message: impl Into<String>) -> Self {
		self.payer_message = Some(message.into());

		self
	}

	/// Sets the payee note.
	pub fn payee_note(mut self, note: impl Into<String>) -> Self {
		self.payee_note = Some(note.into());

		self
	}
}

/// Remote status of a transaction. Authoritative; the client never transitions it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionStatus {
	/// Still being processed.
	Pending,
	/// Completed.
	Successful,
	/// Failed.
	Failed,
	/// Rejected by the counterparty.
	Rejected,
	/// Timed out waiting for the counterparty.
	Timeout,
}
impl TransactionStatus {
	/// Returns `true` once the status can no longer change.
	pub const fn is_final(self) -> bool {
		!matches!(self, TransactionStatus::Pending)
	}
}

/// Status record returned when polling a transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionStatusRecord {
	/// Amount as echoed by the API.
	#[serde(default)]
	pub amount: String,
	/// Currency as echoed by the API.
	#[serde(default)]
	pub currency: String,
	/// Caller-side identifier as echoed by the API.
	#[serde(default)]
	pub external_id: String,
	/// Debited party (collections).
	#[serde(default)]
	pub payer: Option<Party>,
	/// Credited party (disbursements).
	#[serde(default)]
	pub payee: Option<Party>,
	/// Message shown to the payer.
	#[serde(default)]
	pub payer_message: Option<String>,
	/// Note shown to the payee.
	#[serde(default)]
	pub payee_note: Option<String>,
	/// Current status.
	pub status: TransactionStatus,
	/// Failure reason, when any.
	#[serde(default)]
	pub reason: Option<String>,
	/// Ledger identifier once the transaction settled.
	#[serde(default)]
	pub financial_transaction_id: Option<String>,
}
