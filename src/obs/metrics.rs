// self
use crate::{
	obs::{CallOutcome, Operation},
	product::Product,
};

/// Records a call outcome via the global metrics recorder (when enabled).
pub fn record_call_outcome(product: Option<Product>, operation: Operation, outcome: CallOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"momo_client_call_total",
			"product" => crate::obs::product_label(product),
			"operation" => operation.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (product, operation, outcome);
	}
}
