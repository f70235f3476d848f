//! API request quota counters.

// self
use crate::{_prelude::*, models::JsonModel};

/// Usage counter for one rate-limit window.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestQuota {
	/// Counter identifier.
	pub guid: String,
	/// Requests allowed during the window.
	pub max_requests: u64,
	/// Requests already used during the window.
	pub used_requests: u64,
	/// Window length in milliseconds.
	pub time_window: u64,
	/// Last reset, epoch milliseconds.
	pub last_reset_time: i64,
	/// Next reset, epoch milliseconds.
	pub next_reset_time: i64,
}
impl RequestQuota {
	/// Requests still available in the current window.
	pub fn remaining_requests(&self) -> u64 {
		self.max_requests.saturating_sub(self.used_requests)
	}

	/// Returns `true` once every request in the window has been used.
	pub fn is_exhausted(&self) -> bool {
		self.remaining_requests() == 0
	}
}
impl JsonModel for RequestQuota {
	const NAME: &'static str = "RequestQuota";
}
