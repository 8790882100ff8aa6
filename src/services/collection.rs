//! Collections: requesting payments from subscribers.

// self
use crate::{
	_prelude::*,
	model::{
		AccountHolderInfo, Balance, Party, ReferenceId, TransactionOptions, TransactionStatusRecord,
	},
	services::common::ProductService,
};

/// Collection product service. Obtained from [`Client::collection`](crate::Client::collection).
#[derive(Clone, Debug)]
pub struct Collection {
	inner: ProductService,
}
impl Collection {
	pub(crate) fn new(inner: ProductService) -> Self {
		Self { inner }
	}

	/// Asks `payer` to pay `amount` and returns the reference ID to poll with.
	///
	/// MSISDN payers are normalized first. Unset options fall back to generated
	/// identifiers, the configured currency, and the default collection messages.
	pub async fn request_to_pay(
		&self,
		payer: Party,
		amount: Decimal,
		options: TransactionOptions,
	) -> Result<ReferenceId> {
		self.inner.initiate(payer, amount, options).await
	}

	/// Fetches the current status of a request-to-pay.
	pub async fn request_to_pay_status(
		&self,
		reference_id: &ReferenceId,
	) -> Result<TransactionStatusRecord> {
		self.inner.status(reference_id).await
	}

	/// Fetches the collection account balance.
	pub async fn balance(&self) -> Result<Balance> {
		self.inner.balance().await
	}

	/// Looks up basic information about the subscriber behind `phone`.
	pub async fn account_holder(&self, phone: &str) -> Result<AccountHolderInfo> {
		self.inner.account_holder(phone).await
	}
}
