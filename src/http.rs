//! Transport primitives for API calls.
//!
//! The module exposes [`ApiHttpClient`] alongside the [`HttpRequest`] and [`HttpResponse`]
//! values it exchanges, so downstream crates can plug in a custom HTTP stack (or a scripted
//! fake in tests) without touching the refresh coordinator. Implementations render the bearer
//! secret as an `Authorization` header and report every completed exchange as an
//! [`HttpResponse`], whatever its status; only failures to obtain a response are errors.

// std
use std::ops::Deref;
#[cfg(feature = "reqwest")] use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, RETRY_AFTER};
#[cfg(feature = "reqwest")] use time::format_description::well_known::Rfc2822;
// self
use crate::{_prelude::*, auth::TokenSecret, error::TransportError};

/// Boxed future returned by [`ApiHttpClient::execute`].
pub type HttpFuture<'a, E> = Pin<Box<dyn Future<Output = Result<HttpResponse, E>> + 'a + Send>>;

/// HTTP methods used by the platform API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
	/// `GET`
	Get,
	/// `POST`
	Post,
	/// `PUT`
	Put,
	/// `PATCH`
	Patch,
	/// `DELETE`
	Delete,
}
impl Method {
	/// Returns the method token as sent on the wire.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Get => "GET",
			Self::Post => "POST",
			Self::Put => "PUT",
			Self::Patch => "PATCH",
			Self::Delete => "DELETE",
		}
	}
}
impl Display for Method {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
#[cfg(feature = "reqwest")]
impl From<Method> for reqwest::Method {
	fn from(value: Method) -> Self {
		match value {
			Method::Get => Self::GET,
			Method::Post => Self::POST,
			Method::Put => Self::PUT,
			Method::Patch => Self::PATCH,
			Method::Delete => Self::DELETE,
		}
	}
}

/// Fully resolved request handed to the transport.
#[derive(Clone, Debug)]
pub struct HttpRequest {
	/// HTTP method.
	pub method: Method,
	/// Absolute request URL including the query string.
	pub url: Url,
	/// Bearer secret to send as `Authorization: Bearer <token>`.
	pub bearer: Option<TokenSecret>,
	/// JSON-encoded body; sent with `Content-Type: application/json`.
	pub body: Option<Vec<u8>>,
	/// Per-request timeout.
	pub timeout: Option<StdDuration>,
}
impl HttpRequest {
	/// Value of the `Authorization` header this request carries, if any.
	pub fn authorization(&self) -> Option<String> {
		self.bearer.as_ref().map(TokenSecret::bearer_header)
	}
}

/// Completed HTTP exchange, successful or not.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HttpResponse {
	/// HTTP status code.
	pub status: u16,
	/// Retry-After hint expressed as a relative duration.
	pub retry_after: Option<Duration>,
	/// Raw response body.
	pub body: Vec<u8>,
}
impl HttpResponse {
	/// Builds a response with the given status and body.
	pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
		Self { status, retry_after: None, body: body.into() }
	}

	/// Returns `true` for 2xx statuses.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}
}

/// Abstraction over HTTP transports capable of executing API calls.
///
/// The trait is the client's only dependency on an HTTP stack. Implementations must be
/// `Send + Sync + 'static` so one transport can be shared across client clones, and the
/// futures they return must be `Send` so client calls can hop executor threads.
pub trait ApiHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// Executes `request` and returns the response, whatever its status.
	fn execute(&self, request: HttpRequest) -> HttpFuture<'_, Self::TransportError>;

	/// Classifies a transport failure; defaults to [`TransportError::Network`].
	fn map_transport_error(&self, error: Self::TransportError) -> TransportError {
		TransportError::network(error)
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Debug for ReqwestHttpClient {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("ReqwestHttpClient(..)")
	}
}
#[cfg(feature = "reqwest")]
impl ApiHttpClient for ReqwestHttpClient {
	type TransportError = ReqwestError;

	fn execute(&self, request: HttpRequest) -> HttpFuture<'_, Self::TransportError> {
		let client = self.0.clone();

		Box::pin(async move {
			let HttpRequest { method, url, bearer, body, timeout } = request;
			let mut builder =
				client.request(method.into(), url).header(ACCEPT, "application/json");

			if let Some(token) = bearer {
				builder = builder.bearer_auth(token.expose());
			}
			if let Some(body) = body {
				builder = builder.header(CONTENT_TYPE, "application/json").body(body);
			}
			if let Some(timeout) = timeout {
				builder = builder.timeout(timeout);
			}

			let response = builder.send().await?;
			let status = response.status().as_u16();
			let retry_after = parse_retry_after(response.headers());
			let body = response.bytes().await?.to_vec();

			Ok(HttpResponse { status, retry_after, body })
		})
	}

	fn map_transport_error(&self, error: Self::TransportError) -> TransportError {
		error.into()
	}
}

#[cfg(feature = "reqwest")]
fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
	let value = headers.get(RETRY_AFTER)?;
	let raw = value.to_str().ok()?.trim();

	if let Ok(secs) = raw.parse::<u32>() {
		return Some(Duration::seconds(secs.into()));
	}
	if let Ok(moment) = OffsetDateTime::parse(raw, &Rfc2822) {
		let delta = moment - OffsetDateTime::now_utc();

		if delta.is_positive() {
			return Some(delta);
		}
	}

	None
}
