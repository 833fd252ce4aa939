//! Optional observability helpers for client calls.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `platform_api_client.call` with the `call`
//!   and `stage` (call site) fields, plus events when a refresh settles or a session is
//!   invalidated.
//! - Enable `metrics` to increment the `platform_api_client_call_total` counter for every
//!   attempt/success/failure (labeled by `call` and `outcome`), record how many queued requests
//!   each settled refresh released, and count session invalidations by reason.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Client operations observed by the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallKind {
	/// Any request routed through [`crate::client::ApiClient::send`].
	Request,
	/// Refresh endpoint exchange triggered by a 401.
	Refresh,
	/// Login exchange.
	Login,
	/// Logout call (server outcome ignored).
	Logout,
}
impl CallKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallKind::Request => "request",
			CallKind::Refresh => "refresh",
			CallKind::Login => "login",
			CallKind::Logout => "logout",
		}
	}
}
impl Display for CallKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallOutcome {
	/// Entry to a client operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl CallOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallOutcome::Attempt => "attempt",
			CallOutcome::Success => "success",
			CallOutcome::Failure => "failure",
		}
	}
}
impl Display for CallOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
