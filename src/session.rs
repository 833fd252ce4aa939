//! Authentication session: who is signed in, and the transitions between states.
//!
//! [`AuthSession`] tracks the current user on top of an [`ApiClient`]. Transitions run one at a
//! time behind an async mutex, so a `logout` issued while `restore` is still fetching the user
//! waits for it instead of being overwritten by its late result.

// self
use crate::{
	_prelude::*,
	client::ApiClient,
	http::ApiHttpClient,
	model::{LoginRequest, User},
	obs::{self, CallKind},
	services::LogoutOutcome,
};

/// Authentication state exposed to the embedding application.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthState {
	/// Stored credentials are being validated; initial state.
	Restoring,
	/// No usable session.
	SignedOut,
	/// A user is signed in.
	SignedIn(User),
}

/// Current-user tracking over an [`ApiClient`].
pub struct AuthSession<C>
where
	C: ?Sized + ApiHttpClient,
{
	client: ApiClient<C>,
	state: RwLock<AuthState>,
	transition: AsyncMutex<()>,
}
impl<C> AuthSession<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Wraps `client`; the session starts in [`AuthState::Restoring`] until
	/// [`AuthSession::restore`] runs.
	pub fn new(client: ApiClient<C>) -> Self {
		Self { client, state: RwLock::new(AuthState::Restoring), transition: AsyncMutex::new(()) }
	}

	/// Underlying API client.
	pub fn client(&self) -> &ApiClient<C> {
		&self.client
	}

	/// Snapshot of the current state.
	pub fn state(&self) -> AuthState {
		self.state.read().clone()
	}

	/// Signed-in user, if any.
	pub fn user(&self) -> Option<User> {
		match &*self.state.read() {
			AuthState::SignedIn(user) => Some(user.clone()),
			_ => None,
		}
	}

	/// Returns `true` while a user is signed in.
	pub fn is_authenticated(&self) -> bool {
		matches!(*self.state.read(), AuthState::SignedIn(_))
	}

	/// Returns `true` until the stored session has been validated.
	pub fn is_loading(&self) -> bool {
		matches!(*self.state.read(), AuthState::Restoring)
	}

	/// Validates stored credentials by fetching the current user.
	///
	/// Without a stored access token the session signs out without touching the network. Any
	/// failure leaves the session signed out.
	pub async fn restore(&self) -> AuthState {
		let _transition = self.transition.lock().await;
		let next = if self.client.store.access_token().is_none() {
			AuthState::SignedOut
		} else {
			self.fetch_user().await
		};

		self.set_state(next)
	}

	/// Logs in, then loads the signed-in user.
	pub async fn login(&self, email: &str, password: &str) -> Result<User> {
		let _transition = self.transition.lock().await;

		self.client.login(&LoginRequest::new(email, password)).await?;

		let user = self.client.current_user().await?;

		self.set_state(AuthState::SignedIn(user.clone()));

		Ok(user)
	}

	/// Logs out server-side (failures ignored), clears credentials, and signs out.
	pub async fn logout(&self) -> LogoutOutcome {
		let _transition = self.transition.lock().await;
		let outcome = self.client.logout().await;

		self.set_state(AuthState::SignedOut);

		outcome
	}

	/// Re-fetches the current user; a failure signs the session out.
	pub async fn refresh_user(&self) -> Option<User> {
		let _transition = self.transition.lock().await;

		match self.set_state(self.fetch_user().await) {
			AuthState::SignedIn(user) => Some(user),
			_ => None,
		}
	}

	async fn fetch_user(&self) -> AuthState {
		match self.client.current_user().await {
			Ok(user) => AuthState::SignedIn(user),
			Err(err) => {
				obs::trace_swallowed_error(CallKind::Request, &err);

				AuthState::SignedOut
			},
		}
	}

	fn set_state(&self, next: AuthState) -> AuthState {
		*self.state.write() = next.clone();

		next
	}
}
impl<C> Debug for AuthSession<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AuthSession")
			.field("client", &self.client)
			.field("state", &*self.state.read())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{
		auth::CredentialPair,
		client::ClientConfig,
		http::{HttpFuture, HttpRequest, HttpResponse},
		store::{CredentialStore, MemoryStore},
	};

	const USER_JSON: &str = r#"{
		"id": "u-1",
		"email": "ada@example.com",
		"full_name": "Ada",
		"avatar_url": null,
		"role": "member",
		"is_active": true,
		"created_at": "2025-01-01T00:00:00Z",
		"updated_at": "2025-01-01T00:00:00Z"
	}"#;

	/// Answers every call with the same canned response and counts calls.
	#[derive(Debug)]
	struct CannedHttpClient {
		response: HttpResponse,
		calls: Mutex<Vec<String>>,
	}
	impl CannedHttpClient {
		fn new(status: u16, body: &str) -> Self {
			Self { response: HttpResponse::new(status, body), calls: Default::default() }
		}
	}
	impl ApiHttpClient for CannedHttpClient {
		type TransportError = std::io::Error;

		fn execute(&self, request: HttpRequest) -> HttpFuture<'_, Self::TransportError> {
			self.calls.lock().push(request.url.path().to_owned());

			let response = self.response.clone();

			Box::pin(async move { Ok(response) })
		}
	}

	fn session(
		status: u16,
		body: &str,
		credentials: Option<CredentialPair>,
	) -> (AuthSession<CannedHttpClient>, Arc<CannedHttpClient>) {
		let http = Arc::new(CannedHttpClient::new(status, body));
		let store: Arc<dyn CredentialStore> = Arc::new(match credentials {
			Some(pair) => MemoryStore::with_credentials(pair),
			None => MemoryStore::default(),
		});
		let config = ClientConfig::with_api_root("http://localhost:8000/api/v1/")
			.expect("Fixture API root is valid.");
		let client = ApiClient::<CannedHttpClient>::with_http_client(store, config, http.clone());

		(AuthSession::new(client), http)
	}

	#[tokio::test]
	async fn restore_without_token_skips_network() {
		let (session, http) = session(200, USER_JSON, None);

		assert!(session.is_loading());
		assert_eq!(session.restore().await, AuthState::SignedOut);
		assert!(!session.is_loading());
		assert!(http.calls.lock().is_empty());
	}

	#[tokio::test]
	async fn restore_with_token_loads_user() {
		let (session, http) = session(200, USER_JSON, Some(CredentialPair::new("a", "r")));

		session.restore().await;

		assert!(session.is_authenticated());
		assert_eq!(session.user().map(|user| user.email), Some("ada@example.com".into()));
		assert_eq!(http.calls.lock().as_slice(), ["/api/v1/auth/me"]);
	}

	#[tokio::test]
	async fn failed_user_refresh_signs_out() {
		let (session, _) = session(500, r#"{"detail":"boom","status_code":500}"#, None);

		assert_eq!(session.refresh_user().await, None);
		assert_eq!(session.state(), AuthState::SignedOut);
	}

	#[tokio::test]
	async fn logout_signs_out_even_when_server_fails() {
		let (session, _) = session(503, "", Some(CredentialPair::new("a", "r")));
		let outcome = session.logout().await;

		assert!(!outcome.server_acknowledged);
		assert!(outcome.credentials_cleared);
		assert_eq!(session.state(), AuthState::SignedOut);
		assert!(session.client().credentials().is_none());
	}
}
