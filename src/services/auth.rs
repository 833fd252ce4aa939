//! `/auth` endpoints: login, logout, registration, and the current user.

// self
use crate::{
	_prelude::*,
	client::{ApiClient, ApiRequest},
	http::ApiHttpClient,
	model::{LoginRequest, RegisterRequest, TokenResponse, User},
	obs::{self, CallKind, CallOutcome, CallSpan},
};

/// Endpoint exchanging email and password for a credential pair.
pub const LOGIN_PATH: &str = "/auth/login";
/// Endpoint revoking the current session server-side.
pub const LOGOUT_PATH: &str = "/auth/logout";
/// Endpoint returning the authenticated user.
pub const ME_PATH: &str = "/auth/me";
/// Endpoint creating an account.
pub const REGISTER_PATH: &str = "/auth/register";

/// Result of [`ApiClient::logout`], which never fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LogoutOutcome {
	/// The server answered the logout call with a success status.
	pub server_acknowledged: bool,
	/// Both stored tokens were removed.
	pub credentials_cleared: bool,
}

impl<C> ApiClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Logs in and persists the returned credential pair.
	///
	/// The call is routed through [`ApiClient::send`] like every other request, so a `401` here
	/// goes through the refresh protocol before surfacing.
	pub async fn login(&self, request: &LoginRequest) -> Result<TokenResponse> {
		const KIND: CallKind = CallKind::Login;

		let span = CallSpan::new(KIND, "login");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span
			.instrument(async move {
				let response: TokenResponse =
					self.send_json(ApiRequest::post(LOGIN_PATH).with_json(request)?).await?;

				self.store.save(&response.credentials())?;

				Ok(response)
			})
			.await;

		match &result {
			Ok(_) => obs::record_call_outcome(KIND, CallOutcome::Success),
			Err(_) => obs::record_call_outcome(KIND, CallOutcome::Failure),
		}

		result
	}

	/// Fetches the authenticated user.
	pub async fn current_user(&self) -> Result<User> {
		self.send_json(ApiRequest::get(ME_PATH)).await
	}

	/// Calls the server logout endpoint, then clears stored credentials.
	///
	/// Server failures are logged and reported through [`LogoutOutcome`] but never returned;
	/// local credentials are cleared whatever the server answered.
	pub async fn logout(&self) -> LogoutOutcome {
		const KIND: CallKind = CallKind::Logout;

		let span = CallSpan::new(KIND, "logout");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let server_acknowledged = match span.instrument(self.send(ApiRequest::post(LOGOUT_PATH))).await {
			Ok(_) => true,
			Err(err) => {
				obs::trace_swallowed_error(KIND, &err);

				false
			},
		};
		let credentials_cleared = self.clear_credentials(KIND);

		obs::record_call_outcome(
			KIND,
			if server_acknowledged { CallOutcome::Success } else { CallOutcome::Failure },
		);

		LogoutOutcome { server_acknowledged, credentials_cleared }
	}

	/// Creates an account. Credentials are not stored; call [`ApiClient::login`] afterwards.
	pub async fn register(&self, request: &RegisterRequest) -> Result<User> {
		self.send_json(ApiRequest::post(REGISTER_PATH).with_json(request)?).await
	}
}
