//! Authenticated API client with transparent token refresh.

pub mod config;
pub mod refresh;
pub mod request;

mod metrics;

pub use config::*;
pub use metrics::{RefreshMetrics, RefreshMetricsSnapshot};
pub use request::ApiRequest;

// self
use crate::{
	_prelude::*,
	auth::{
		CredentialPair, InvalidationReason, NoopObserver, SessionInvalidated, SessionObserver,
		TokenSecret,
	},
	client::refresh::RefreshCoordinator,
	error::{self, HttpError},
	http::{ApiHttpClient, HttpRequest, HttpResponse},
	obs::{self, CallKind, CallOutcome, CallSpan},
	store::CredentialStore,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestApiClient = ApiClient<ReqwestHttpClient>;

/// Issues requests against the platform API, attaching stored credentials and recovering from
/// access token expiry once per request.
///
/// The client owns the transport, the credential store, and the refresh state machine. Clones
/// share all three, so every clone coalesces its refreshes with the others; independently
/// constructed clients never share refresh state.
pub struct ApiClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// HTTP transport used for every outbound call.
	pub http_client: Arc<C>,
	/// Durable storage for the credential pair.
	pub store: Arc<dyn CredentialStore>,
	/// API root, login entry point, and timeouts.
	pub config: ClientConfig,
	/// Receiver of session invalidation events.
	pub observer: Arc<dyn SessionObserver>,
	/// Shared counters for refresh coordination.
	pub refresh_metrics: Arc<RefreshMetrics>,
	refresh: Arc<RefreshCoordinator>,
}
impl<C> ApiClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Creates a client over the caller-provided transport.
	pub fn with_http_client(
		store: Arc<dyn CredentialStore>,
		config: ClientConfig,
		http_client: impl Into<Arc<C>>,
	) -> Self {
		Self {
			http_client: http_client.into(),
			store,
			config,
			observer: Arc::new(NoopObserver),
			refresh_metrics: Default::default(),
			refresh: Default::default(),
		}
	}

	/// Sets the observer notified when the session becomes unrecoverable.
	pub fn with_observer(mut self, observer: Arc<dyn SessionObserver>) -> Self {
		self.observer = observer;

		self
	}

	/// Returns the stored credential pair, if any.
	pub fn credentials(&self) -> Option<CredentialPair> {
		self.store.load()
	}

	/// Returns `true` while a refresh call is in flight.
	pub fn is_refreshing(&self) -> bool {
		self.refresh.is_refreshing()
	}

	/// Number of requests currently suspended behind the in-flight refresh.
	pub fn refresh_waiters(&self) -> usize {
		self.refresh.waiters()
	}

	/// Sends `request`, returning the successful response.
	///
	/// The stored access token, when present, is attached as a bearer credential. A `401` on the
	/// first attempt triggers (or joins) a refresh and the request is replayed once with the new
	/// token; every other failure is returned unchanged.
	pub async fn send(&self, request: ApiRequest) -> Result<HttpResponse> {
		const KIND: CallKind = CallKind::Request;

		let span = CallSpan::new(KIND, "send");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span.instrument(self.send_with_recovery(request)).await;

		match &result {
			Ok(_) => obs::record_call_outcome(KIND, CallOutcome::Success),
			Err(_) => obs::record_call_outcome(KIND, CallOutcome::Failure),
		}

		result
	}

	/// Sends `request` and decodes the JSON response body.
	pub async fn send_json<T>(&self, request: ApiRequest) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let endpoint = request.path.clone();
		let response = self.send(request).await?;

		error::decode_json(&endpoint, response.status, &response.body)
	}

	/// Sends `request` and discards the response body.
	pub async fn send_empty(&self, request: ApiRequest) -> Result<()> {
		self.send(request).await.map(|_| ())
	}

	async fn send_with_recovery(&self, mut request: ApiRequest) -> Result<HttpResponse> {
		let unauthorized = match self.dispatch(&request, self.store.access_token()).await {
			Err(err) if err.is_unauthorized() && !request.is_retried() => err,
			other => return other,
		};

		request.mark_retried();

		let token = self.recover_session(unauthorized).await?;

		self.dispatch(&request, Some(token)).await
	}

	/// Performs a single exchange without any refresh handling.
	pub(crate) async fn dispatch(
		&self,
		request: &ApiRequest,
		bearer: Option<TokenSecret>,
	) -> Result<HttpResponse> {
		let url = self.config.endpoint(&request.path, &request.query)?;
		let http_request = HttpRequest {
			method: request.method,
			url,
			bearer,
			body: request.body.clone(),
			timeout: request.timeout.or(self.config.request_timeout),
		};
		let response = self
			.http_client
			.execute(http_request)
			.await
			.map_err(|err| self.http_client.map_transport_error(err))?;

		if response.is_success() {
			Ok(response)
		} else {
			Err(HttpError::from_response(response.status, &response.body, response.retry_after)
				.into())
		}
	}

	pub(crate) fn clear_credentials(&self, kind: CallKind) -> bool {
		match self.store.clear() {
			Ok(()) => true,
			Err(err) => {
				obs::trace_swallowed_error(kind, &err);

				false
			},
		}
	}

	pub(crate) fn invalidate_session(&self, reason: InvalidationReason) {
		obs::trace_session_invalidated(reason);
		obs::record_session_invalidated(reason);
		self.observer.session_invalidated(&SessionInvalidated {
			reason,
			login_path: self.config.login_path.clone(),
		});
	}
}
#[cfg(feature = "reqwest")]
impl ApiClient<ReqwestHttpClient> {
	/// Creates a client backed by a default reqwest transport.
	pub fn new(store: Arc<dyn CredentialStore>, config: ClientConfig) -> Self {
		Self::with_http_client(store, config, ReqwestHttpClient::default())
	}
}
impl<C> Clone for ApiClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn clone(&self) -> Self {
		Self {
			http_client: self.http_client.clone(),
			store: self.store.clone(),
			config: self.config.clone(),
			observer: self.observer.clone(),
			refresh_metrics: self.refresh_metrics.clone(),
			refresh: self.refresh.clone(),
		}
	}
}
impl<C> Debug for ApiClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ApiClient")
			.field("api_root", &self.config.api_root.as_str())
			.field("credentials_set", &self.store.load().is_some())
			.field("refreshing", &self.is_refreshing())
			.finish()
	}
}
