// std
use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters for request execution, shared by every clone of a client.
#[derive(Debug, Default)]
pub struct ClientMetrics {
	attempts: AtomicU64,
	successes: AtomicU64,
	failures: AtomicU64,
	token_refreshes: AtomicU64,
	rate_limit_waits: AtomicU64,
}
impl ClientMetrics {
	/// Returns the number of HTTP attempts dispatched, retries included.
	pub fn attempts(&self) -> u64 {
		self.attempts.load(Ordering::Relaxed)
	}

	/// Returns the number of calls that ended in a 2xx response.
	pub fn successes(&self) -> u64 {
		self.successes.load(Ordering::Relaxed)
	}

	/// Returns the number of calls that ended in an error.
	pub fn failures(&self) -> u64 {
		self.failures.load(Ordering::Relaxed)
	}

	/// Returns the number of re-authentications triggered by expired tokens.
	pub fn token_refreshes(&self) -> u64 {
		self.token_refreshes.load(Ordering::Relaxed)
	}

	/// Returns the number of 429 waits that were slept through.
	pub fn rate_limit_waits(&self) -> u64 {
		self.rate_limit_waits.load(Ordering::Relaxed)
	}

	pub(crate) fn record_attempt(&self) {
		self.attempts.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_success(&self) {
		self.successes.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_failure(&self) {
		self.failures.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_token_refresh(&self) {
		self.token_refreshes.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_rate_limit_wait(&self) {
		self.rate_limit_waits.fetch_add(1, Ordering::Relaxed);
	}
}
