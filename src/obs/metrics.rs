// self
use crate::{
	auth::InvalidationReason,
	obs::{CallKind, CallOutcome},
};

/// Counter incremented for every attempt, success, and failure of a client call.
pub const CALL_TOTAL: &str = "platform_api_client_call_total";
/// Histogram of queued requests released each time a refresh settles.
pub const REFRESH_RELEASED: &str = "platform_api_client_refresh_released_requests";
/// Counter of sessions given up on, labeled by reason.
pub const SESSION_INVALIDATED_TOTAL: &str = "platform_api_client_session_invalidated_total";

/// Records a call outcome via the global metrics recorder (when enabled).
pub fn record_call_outcome(kind: CallKind, outcome: CallOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(CALL_TOTAL, "call" => kind.as_str(), "outcome" => outcome.as_str())
			.increment(1);
	}
	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}

/// Records how many queued requests a settled refresh released.
pub fn record_refresh_released(outcome: CallOutcome, waiters: usize) {
	#[cfg(feature = "metrics")]
	{
		metrics::histogram!(REFRESH_RELEASED, "outcome" => outcome.as_str()).record(waiters as f64);
	}
	#[cfg(not(feature = "metrics"))]
	{
		let _ = (outcome, waiters);
	}
}

/// Records a session invalidation.
pub fn record_session_invalidated(reason: InvalidationReason) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(SESSION_INVALIDATED_TOTAL, "reason" => reason.as_str()).increment(1);
	}
	#[cfg(not(feature = "metrics"))]
	{
		let _ = reason;
	}
}
