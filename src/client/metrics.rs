// std
use std::sync::atomic::{AtomicU64, Ordering};

/// Point-in-time copy of [`RefreshMetrics`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RefreshMetricsSnapshot {
	/// Refresh endpoint calls issued.
	pub attempts: u64,
	/// Refreshes that produced and stored a new credential pair.
	pub successes: u64,
	/// Refreshes that failed, including a 401 with no stored refresh token.
	pub failures: u64,
	/// Requests that waited on a refresh led by another request.
	pub coalesced: u64,
	/// Queued requests released by settled refreshes, whatever the outcome.
	pub released: u64,
}

/// Counters describing how the client recovered from expired access tokens.
///
/// Shared by every clone of a client; see [`crate::client::ApiClient::refresh_metrics`].
#[derive(Debug, Default)]
pub struct RefreshMetrics {
	attempts: AtomicU64,
	successes: AtomicU64,
	failures: AtomicU64,
	coalesced: AtomicU64,
	released: AtomicU64,
}
impl RefreshMetrics {
	/// Refresh endpoint calls issued.
	pub fn attempts(&self) -> u64 {
		self.attempts.load(Ordering::Relaxed)
	}

	/// Refreshes that produced and stored a new credential pair.
	pub fn successes(&self) -> u64 {
		self.successes.load(Ordering::Relaxed)
	}

	/// Refreshes that failed, including a 401 with no stored refresh token.
	pub fn failures(&self) -> u64 {
		self.failures.load(Ordering::Relaxed)
	}

	/// Requests that waited on a refresh led by another request.
	pub fn coalesced(&self) -> u64 {
		self.coalesced.load(Ordering::Relaxed)
	}

	/// Copies all counters at once.
	pub fn snapshot(&self) -> RefreshMetricsSnapshot {
		RefreshMetricsSnapshot {
			attempts: self.attempts(),
			successes: self.successes(),
			failures: self.failures(),
			coalesced: self.coalesced(),
			released: self.released.load(Ordering::Relaxed),
		}
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

	pub(crate) fn record_coalesced(&self) {
		self.coalesced.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_released(&self, waiters: usize) {
		self.released.fetch_add(waiters as u64, Ordering::Relaxed);
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn snapshot_reflects_recorded_events() {
		let metrics = RefreshMetrics::default();

		metrics.record_attempt();
		metrics.record_success();
		metrics.record_coalesced();
		metrics.record_coalesced();
		metrics.record_released(2);

		assert_eq!(
			metrics.snapshot(),
			RefreshMetricsSnapshot {
				attempts: 1,
				successes: 1,
				failures: 0,
				coalesced: 2,
				released: 2,
			}
		);
	}
}
