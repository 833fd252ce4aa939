//! Session invalidation events emitted when credentials can no longer be recovered.
//!
//! The client never navigates anywhere itself. When a refresh fails or no refresh token is
//! stored, it clears the credential store and hands a [`SessionInvalidated`] event to the
//! configured [`SessionObserver`]; the embedding application decides how to send the user back
//! to its login entry point.

// self
use crate::_prelude::*;

/// Why the client gave up on the current session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InvalidationReason {
	/// A 401 arrived and storage held no refresh token.
	MissingRefreshToken,
	/// The refresh endpoint call failed.
	RefreshFailed,
}
impl InvalidationReason {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::MissingRefreshToken => "missing_refresh_token",
			Self::RefreshFailed => "refresh_failed",
		}
	}
}
impl Display for InvalidationReason {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Event describing an unrecoverable authentication failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionInvalidated {
	/// Cause of the invalidation.
	pub reason: InvalidationReason,
	/// Login entry point the application should route the user to.
	pub login_path: String,
}

/// Receives session invalidation events from the client.
pub trait SessionObserver
where
	Self: Send + Sync,
{
	/// Called once per unrecoverable authentication failure, after credentials were cleared.
	fn session_invalidated(&self, event: &SessionInvalidated);
}

/// Observer that ignores every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;
impl SessionObserver for NoopObserver {
	fn session_invalidated(&self, _: &SessionInvalidated) {}
}

/// Adapts a closure into a [`SessionObserver`].
pub struct FnObserver<F>(pub F);
impl<F> SessionObserver for FnObserver<F>
where
	F: Fn(&SessionInvalidated) + Send + Sync,
{
	fn session_invalidated(&self, event: &SessionInvalidated) {
		(self.0)(event)
	}
}
impl<F> Debug for FnObserver<F> {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("FnObserver(..)")
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::sync::atomic::{AtomicUsize, Ordering};
	// self
	use super::*;

	#[test]
	fn fn_observer_forwards_events() {
		let calls = Arc::new(AtomicUsize::new(0));
		let seen = calls.clone();
		let observer = FnObserver(move |event: &SessionInvalidated| {
			assert_eq!(event.reason, InvalidationReason::RefreshFailed);
			seen.fetch_add(1, Ordering::SeqCst);
		});

		observer.session_invalidated(&SessionInvalidated {
			reason: InvalidationReason::RefreshFailed,
			login_path: "/login".into(),
		});

		assert_eq!(calls.load(Ordering::SeqCst), 1);
	}

	#[test]
	fn reason_labels_are_stable() {
		assert_eq!(InvalidationReason::MissingRefreshToken.to_string(), "missing_refresh_token");
		assert_eq!(InvalidationReason::RefreshFailed.as_str(), "refresh_failed");
	}
}
