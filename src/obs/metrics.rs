// self
use crate::obs::RequestOutcome;

/// Records a request outcome via the global metrics recorder (when enabled).
pub fn record_request_outcome(outcome: RequestOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!("trustar_request_total", "outcome" => outcome.as_str()).increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = outcome;
	}
}

/// Records the result of a token fetch against the auth endpoint (when enabled).
pub fn record_token_fetch(success: bool) {
	#[cfg(feature = "metrics")]
	{
		let outcome = if success { "success" } else { "failure" };

		metrics::counter!("trustar_token_fetch_total", "outcome" => outcome).increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = success;
	}
}
