// self
use crate::{
	_prelude::*,
	auth::InvalidationReason,
	obs::{CallKind, CallOutcome},
};

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
	/// Creates a new span tagged with the provided call kind + stage.
	pub fn new(kind: CallKind, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("platform_api_client.call", call = kind.as_str(), stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, stage);

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

/// Emits an event when a refresh settles, noting how many queued requests it released.
pub fn trace_refresh_settled(outcome: CallOutcome, waiters: usize) {
	#[cfg(feature = "tracing")]
	{
		match outcome {
			CallOutcome::Failure =>
				tracing::warn!(outcome = outcome.as_str(), waiters, "token refresh failed"),
			_ => tracing::debug!(outcome = outcome.as_str(), waiters, "token refresh settled"),
		}
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (outcome, waiters);
	}
}

/// Emits an event when the client gives up on the current session.
pub fn trace_session_invalidated(reason: InvalidationReason) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(reason = reason.as_str(), "session invalidated; credentials cleared");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = reason;
	}
}

/// Emits an event for failures the client deliberately does not propagate.
pub fn trace_swallowed_error(kind: CallKind, error: &dyn StdError) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(call = kind.as_str(), error = %error, "ignoring error");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (kind, error);
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn event_helpers_are_noops_without_subscriber() {
		trace_refresh_settled(CallOutcome::Success, 3);
		trace_session_invalidated(InvalidationReason::RefreshFailed);
		trace_swallowed_error(CallKind::Logout, &Error::RefreshAborted);
	}

	#[tokio::test]
	async fn instrument_wraps_future() {
		let span = CallSpan::new(CallKind::Refresh, "instrument_wraps_future");
		let value = span.instrument(async { 42 }).await;

		assert_eq!(value, 42);
	}
}
