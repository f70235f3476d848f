// self
use crate::{_prelude::*, obs::RequestOutcome};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedRequest<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedRequest<F> = F;

/// A span builder used around each executed request.
#[derive(Clone, Debug)]
pub struct RequestSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl RequestSpan {
	/// Creates a new span tagged with the HTTP method and request path.
	pub fn new(method: &str, path: &str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("trustar.request", method, path);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (method, path);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedRequest<Fut>
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

/// Emits a `warn` event describing why a request is about to be retried.
pub fn emit_retry(reason: RequestOutcome, status: u16, wait: Option<Duration>) {
	#[cfg(feature = "tracing")]
	{
		let wait_ms = wait.map(|value| value.whole_milliseconds());

		tracing::warn!(reason = reason.as_str(), status, ?wait_ms, "Retrying request.");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (reason, status, wait);
	}
}

/// Emits a `debug` event once the auth endpoint answers.
pub fn emit_token_fetch(status: Option<u16>, success: bool) {
	#[cfg(feature = "tracing")]
	{
		if success {
			tracing::debug!(?status, "Obtained access token.");
		} else {
			tracing::warn!(?status, "Unable to obtain access token.");
		}
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (status, success);
	}
}
