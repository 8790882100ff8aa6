//! Disbursements: sending funds to subscribers.

// self
use crate::{
	_prelude::*,
	model::{
		AccountHolderInfo, Balance, Party, ReferenceId, TransactionOptions, TransactionStatusRecord,
	},
	services::common::ProductService,
};

/// Disbursement product service. Obtained from
/// [`Client::disbursement`](crate::Client::disbursement).
#[derive(Clone, Debug)]
pub struct Disbursement {
	inner: ProductService,
}
impl Disbursement {
	pub(crate) fn new(inner: ProductService) -> Self {
		Self { inner }
	}

	/// Transfers `amount` to `payee` and returns the reference ID to poll with.
	pub async fn transfer(
		&self,
		payee: Party,
		amount: Decimal,
		options: TransactionOptions,
	) -> Result<ReferenceId> {
		self.inner.initiate(payee, amount, options).await
	}

	/// Fetches the current status of a transfer.
	pub async fn transfer_status(
		&self,
		reference_id: &ReferenceId,
	) -> Result<TransactionStatusRecord> {
		self.inner.status(reference_id).await
	}

	/// Fetches the disbursement account balance.
	pub async fn balance(&self) -> Result<Balance> {
		self.inner.balance().await
	}

	/// Looks up basic information about the subscriber behind `phone`.
	pub async fn account_holder(&self, phone: &str) -> Result<AccountHolderInfo> {
		self.inner.account_holder(phone).await
	}
}
