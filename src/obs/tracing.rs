// self
use crate::{_prelude::*, obs::Operation, product::Product};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedCall<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedCall<F> = F;

/// A span builder used by client operations.
#[derive(Clone, Debug)]
pub struct CallSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl CallSpan {
	/// Creates a new span tagged with the provided product + operation.
	pub fn new(product: Option<Product>, operation: Operation) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!(
				"momo.call",
				product = crate::obs::product_label(product),
				operation = operation.as_str()
			);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (product, operation);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedCall<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Emits a `debug` event describing a token-cache decision.
pub fn record_token_cache(product: Product, hit: bool) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(product = product.as_str(), hit, "token cache lookup");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (product, hit);
	}
}

/// Emits a `debug` event when sandbox credentials are provisioned for a session.
pub fn record_provisioned(api_user: &str) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(
			api_user,
			product = crate::obs::NO_PRODUCT,
			"sandbox credentials provisioned"
		);
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = api_user;
	}
}
