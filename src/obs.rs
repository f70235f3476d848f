//! Optional observability helpers for request execution.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `trustar.request` with the `method` and
//!   `path` fields, plus `warn`-level events whenever a request is retried.
//! - Enable `metrics` to increment the `trustar_request_total` counter for every
//!   attempt/success/failure/retry, labeled by `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Outcome labels recorded while executing a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RequestOutcome {
	/// One HTTP attempt was dispatched.
	Attempt,
	/// The request returned a 2xx response.
	Success,
	/// A failure was propagated back to the caller.
	Failure,
	/// The request was retried after a token refresh.
	TokenRefresh,
	/// The request was retried after waiting out a 429.
	RateLimited,
}
impl RequestOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			RequestOutcome::Attempt => "attempt",
			RequestOutcome::Success => "success",
			RequestOutcome::Failure => "failure",
			RequestOutcome::TokenRefresh => "token_refresh",
			RequestOutcome::RateLimited => "rate_limited",
		}
	}
}
impl Display for RequestOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
