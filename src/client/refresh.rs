//! Single-flight credential refresh with ordered release of queued requests.
//!
//! Every [`ApiClient`] owns a small state machine, `Idle | Refreshing { pending }`. The first
//! request that sees a `401` moves it to `Refreshing` and becomes the leader: it exchanges the
//! stored refresh token, persists the rotated pair, and settles every queued request with the
//! same outcome in the order they queued. Requests hitting a `401` while a refresh is in flight
//! only enqueue a oneshot continuation and wait for that outcome; they never call the refresh
//! endpoint themselves.
//!
//! The "refreshing?" check and the enqueue happen under one lock acquisition that never spans an
//! `.await`, so exactly one refresh call is in flight per client at any time. If the leader's
//! future is dropped mid-refresh the state returns to `Idle` and waiters fail with
//! [`Error::RefreshAborted`].

// std
use std::mem;
// crates.io
use tokio::sync::oneshot;
// self
use crate::{
	_prelude::*,
	auth::{CredentialPair, InvalidationReason, TokenSecret},
	client::{ApiClient, ApiRequest},
	error,
	http::ApiHttpClient,
	model::{RefreshResponse, RefreshTokenRequest},
	obs::{self, CallKind, CallOutcome, CallSpan},
};

/// Endpoint exchanging a refresh token for a new credential pair.
pub const REFRESH_PATH: &str = "/auth/refresh";

type RefreshOutcome = Result<TokenSecret>;

#[derive(Debug, Default)]
enum RefreshState {
	#[default]
	Idle,
	Refreshing {
		pending: Vec<oneshot::Sender<RefreshOutcome>>,
	},
}

/// Per-client refresh state shared by all clones of the client.
#[derive(Debug, Default)]
pub(crate) struct RefreshCoordinator(Mutex<RefreshState>);
impl RefreshCoordinator {
	/// Either claims leadership of a new refresh or queues behind the one in flight.
	pub(crate) fn join(&self) -> RefreshTicket<'_> {
		let mut state = self.0.lock();

		if let RefreshState::Refreshing { pending } = &mut *state {
			let (tx, rx) = oneshot::channel();

			pending.push(tx);

			return RefreshTicket::Wait(rx);
		}

		*state = RefreshState::Refreshing { pending: Vec::new() };

		RefreshTicket::Lead(RefreshLease { coordinator: self, settled: false })
	}

	pub(crate) fn is_refreshing(&self) -> bool {
		matches!(*self.0.lock(), RefreshState::Refreshing { .. })
	}

	pub(crate) fn waiters(&self) -> usize {
		match &*self.0.lock() {
			RefreshState::Refreshing { pending } => pending.len(),
			RefreshState::Idle => 0,
		}
	}

	fn drain(&self) -> Vec<oneshot::Sender<RefreshOutcome>> {
		match mem::take(&mut *self.0.lock()) {
			RefreshState::Refreshing { pending } => pending,
			RefreshState::Idle => Vec::new(),
		}
	}
}

/// Result of [`RefreshCoordinator::join`].
pub(crate) enum RefreshTicket<'a> {
	/// The caller must perform the refresh and settle the lease.
	Lead(RefreshLease<'a>),
	/// The caller waits for the leader's outcome.
	Wait(oneshot::Receiver<RefreshOutcome>),
}

/// Leadership of the in-flight refresh. Dropping it unsettled releases waiters with
/// [`Error::RefreshAborted`].
pub(crate) struct RefreshLease<'a> {
	coordinator: &'a RefreshCoordinator,
	settled: bool,
}
impl RefreshLease<'_> {
	/// Returns the state to `Idle` and hands `outcome` to every waiter in enqueue order.
	pub(crate) fn settle(mut self, outcome: &RefreshOutcome) -> usize {
		self.settled = true;

		let pending = self.coordinator.drain();
		let released = pending.len();

		for waiter in pending {
			// A waiter whose request was dropped no longer listens.
			let _ = waiter.send(outcome.clone());
		}

		released
	}
}
impl Drop for RefreshLease<'_> {
	fn drop(&mut self) {
		if !self.settled {
			drop(self.coordinator.drain());
		}
	}
}

impl<C> ApiClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Recovers from `unauthorized` by refreshing credentials (or waiting on the refresh already
	/// in flight) and returns the access token to replay with.
	pub(crate) async fn recover_session(&self, unauthorized: Error) -> Result<TokenSecret> {
		let lease = match self.refresh.join() {
			RefreshTicket::Lead(lease) => lease,
			RefreshTicket::Wait(waiter) => {
				self.refresh_metrics.record_coalesced();

				return waiter.await.unwrap_or(Err(Error::RefreshAborted));
			},
		};
		let Some(refresh_token) = self.store.refresh_token() else {
			self.refresh_metrics.record_failure();
			self.clear_credentials(CallKind::Refresh);

			let outcome = Err(unauthorized);

			self.settle_refresh(lease, &outcome);
			self.invalidate_session(InvalidationReason::MissingRefreshToken);

			return outcome;
		};
		let outcome = self.refresh_credentials(refresh_token).await;

		if outcome.is_err() {
			self.clear_credentials(CallKind::Refresh);
			self.settle_refresh(lease, &outcome);
			self.invalidate_session(InvalidationReason::RefreshFailed);
		} else {
			self.settle_refresh(lease, &outcome);
		}

		outcome
	}

	fn settle_refresh(&self, lease: RefreshLease<'_>, outcome: &RefreshOutcome) {
		let call_outcome = if outcome.is_ok() { CallOutcome::Success } else { CallOutcome::Failure };
		let released = lease.settle(outcome);

		self.refresh_metrics.record_released(released);
		obs::record_refresh_released(call_outcome, released);
		obs::trace_refresh_settled(call_outcome, released);
	}

	/// Exchanges `refresh_token` and persists the rotated pair, returning the new access token.
	async fn refresh_credentials(&self, refresh_token: TokenSecret) -> Result<TokenSecret> {
		const KIND: CallKind = CallKind::Refresh;

		let span = CallSpan::new(KIND, "refresh_credentials");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);
		self.refresh_metrics.record_attempt();

		let result = span
			.instrument(async move {
				let pair = self.exchange_refresh_token(refresh_token).await?;

				self.store.save(&pair)?;

				Ok(pair.access_token)
			})
			.await;

		match &result {
			Ok(_) => {
				self.refresh_metrics.record_success();
				obs::record_call_outcome(KIND, CallOutcome::Success);
			},
			Err(_) => {
				self.refresh_metrics.record_failure();
				obs::record_call_outcome(KIND, CallOutcome::Failure);
			},
		}

		result
	}

	async fn exchange_refresh_token(&self, refresh_token: TokenSecret) -> Result<CredentialPair> {
		let mut request =
			ApiRequest::post(REFRESH_PATH).with_json(&RefreshTokenRequest { refresh_token })?;

		request.timeout = self.config.refresh_timeout;

		// Sent without a bearer and outside the 401 protocol.
		let response = self.dispatch(&request, None).await?;
		let body: RefreshResponse =
			error::decode_json(REFRESH_PATH, response.status, &response.body)?;

		Ok(body.into())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::error::HttpError;

	fn expect_lease(ticket: RefreshTicket<'_>) -> RefreshLease<'_> {
		match ticket {
			RefreshTicket::Lead(lease) => lease,
			RefreshTicket::Wait(_) => panic!("Expected to lead the refresh."),
		}
	}

	fn expect_waiter(ticket: RefreshTicket<'_>) -> oneshot::Receiver<RefreshOutcome> {
		match ticket {
			RefreshTicket::Wait(rx) => rx,
			RefreshTicket::Lead(_) => panic!("Expected to wait on the in-flight refresh."),
		}
	}

	#[tokio::test]
	async fn first_join_leads_and_later_joins_wait() {
		let coordinator = RefreshCoordinator::default();
		let lease = expect_lease(coordinator.join());
		let first = expect_waiter(coordinator.join());
		let second = expect_waiter(coordinator.join());

		assert!(coordinator.is_refreshing());
		assert_eq!(coordinator.waiters(), 2);
		assert_eq!(lease.settle(&Ok(TokenSecret::new("T2"))), 2);
		assert!(!coordinator.is_refreshing());
		assert_eq!(coordinator.waiters(), 0);

		for waiter in [first, second] {
			let token = waiter
				.await
				.expect("Waiter should receive an outcome.")
				.expect("Outcome should be the refreshed token.");

			assert_eq!(token.expose(), "T2");
		}
	}

	#[tokio::test]
	async fn failures_reach_every_waiter() {
		let coordinator = RefreshCoordinator::default();
		let lease = expect_lease(coordinator.join());
		let waiter = expect_waiter(coordinator.join());
		let failure: Error = HttpError::from_response(400, b"", None).into();

		lease.settle(&Err(failure));

		let outcome = waiter.await.expect("Waiter should receive an outcome.");

		assert_eq!(outcome.expect_err("Outcome should be the failure.").status(), Some(400));
	}

	#[tokio::test]
	async fn dropped_lease_resets_state_and_releases_waiters() {
		let coordinator = RefreshCoordinator::default();
		let lease = expect_lease(coordinator.join());
		let waiter = expect_waiter(coordinator.join());

		drop(lease);

		assert!(!coordinator.is_refreshing());
		assert!(waiter.await.is_err(), "Sender must be dropped with the lease.");

		// A fresh 401 can lead a new refresh afterwards.
		let lease = expect_lease(coordinator.join());

		assert_eq!(lease.settle(&Ok(TokenSecret::new("T3"))), 0);
	}
}
