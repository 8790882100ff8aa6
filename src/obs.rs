//! Optional observability helpers for client calls.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `momo.call` with the `product` and
//!   `operation` fields, plus `debug` events for token-cache decisions.
//! - Enable `metrics` to increment the `momo_client_call_total` counter for every
//!   attempt/success/failure, labeled by `product`, `operation`, and `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::{_prelude::*, product::Product};

/// Client operations observed by the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
	/// Token fetch (cache hit or credential exchange).
	AccessToken,
	/// Sandbox API user creation.
	CreateApiUser,
	/// Sandbox API key creation.
	CreateApiKey,
	/// Request-to-pay or transfer.
	Initiate,
	/// Transaction status poll.
	TransactionStatus,
	/// Account balance lookup.
	Balance,
	/// Account-holder lookup.
	AccountHolder,
}
impl Operation {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Operation::AccessToken => "access_token",
			Operation::CreateApiUser => "create_api_user",
			Operation::CreateApiKey => "create_api_key",
			Operation::Initiate => "initiate",
			Operation::TransactionStatus => "transaction_status",
			Operation::Balance => "balance",
			Operation::AccountHolder => "account_holder",
		}
	}
}
impl Display for Operation {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallOutcome {
	/// Entry to a client operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl CallOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallOutcome::Attempt => "attempt",
			CallOutcome::Success => "success",
			CallOutcome::Failure => "failure",
		}
	}
}
impl Display for CallOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Label used for calls that are not tied to a product (sandbox provisioning).
pub const NO_PRODUCT: &str = "none";

/// Product label for spans and metrics.
pub fn product_label(product: Option<Product>) -> &'static str {
	product.map(Product::as_str).unwrap_or(NO_PRODUCT)
}

/// Runs `fut` inside a `momo.call` span and records attempt/success/failure around it.
pub async fn observe<T, Fut>(product: Option<Product>, operation: Operation, fut: Fut) -> Result<T>
where
	Fut: Future<Output = Result<T>>,
{
	let span = CallSpan::new(product, operation);

	record_call_outcome(product, operation, CallOutcome::Attempt);

	let result = span.instrument(fut).await;

	match &result {
		Ok(_) => record_call_outcome(product, operation, CallOutcome::Success),
		Err(_) => record_call_outcome(product, operation, CallOutcome::Failure),
	}

	result
}
