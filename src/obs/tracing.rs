// self
use crate::{_prelude::*, locator::ResolveRequest};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedResolve<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedResolve<F> = F;

/// Span attached to a single resolve attempt.
#[derive(Clone, Debug)]
pub struct ResolveSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl ResolveSpan {
	/// Creates a new span tagged with the request's key and access level.
	pub fn new(request: &ResolveRequest) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!(
				"storage_url.resolve",
				key = request.key.as_str(),
				access_level = request.options.access_level.as_str()
			);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = request;

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedResolve<Fut>
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

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{key::StorageKey, locator::ResolveOptions};

	#[tokio::test]
	async fn instrument_wraps_future() {
		let request = ResolveRequest::new(
			StorageKey::new("public/hero.jpg").expect("Key fixture should be valid."),
			ResolveOptions::default(),
		);
		let span = ResolveSpan::new(&request);
		let value = span.instrument(async { 42 }).await;

		assert_eq!(value, 42);
	}
}
