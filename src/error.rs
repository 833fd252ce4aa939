//! Client-level error types shared across the transport, refresh coordinator, services, and
//! stores.
//!
//! [`Error`] is `Clone` because a single refresh failure is delivered to every request that was
//! queued behind it; boxed sources are therefore held in [`Arc`]s.

// self
use crate::{_prelude::*, model::ApiErrorBody};

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type SharedError = Arc<dyn StdError + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Clone, Debug, ThisError)]
pub enum Error {
	/// Credential storage failure.
	#[error("{0}")]
	Storage(
		#[from]
		#[source]
		crate::store::StoreError,
	),
	/// Local configuration or request construction problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// The API answered with a non-success status.
	#[error(transparent)]
	Http(#[from] HttpError),
	/// Transport failure (DNS, TCP, TLS, timeout).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// The API answered successfully but the body did not match the expected shape.
	#[error(transparent)]
	Decode(#[from] DecodeError),

	/// The refresh this request was queued behind was dropped before it settled.
	#[error("Token refresh was abandoned before it settled.")]
	RefreshAborted,
}
impl Error {
	/// Returns the HTTP status carried by the error, if any.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Http(err) => Some(err.status),
			Self::Decode(err) => Some(err.status),
			_ => None,
		}
	}

	/// Returns `true` when the API rejected the request with `401 Unauthorized`.
	pub fn is_unauthorized(&self) -> bool {
		matches!(self, Self::Http(err) if err.is_unauthorized())
	}
}

/// Non-success response surfaced verbatim to the caller.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("API responded with HTTP {status}: {}.", .detail.as_deref().unwrap_or("no detail"))]
pub struct HttpError {
	/// HTTP status code.
	pub status: u16,
	/// `detail` field of the API error body, when the body followed the error contract.
	pub detail: Option<String>,
	/// Raw response body (lossy UTF-8).
	pub body: String,
	/// Retry-After hint from upstream, if supplied.
	pub retry_after: Option<Duration>,
}
impl HttpError {
	/// Builds an error from a raw response, extracting `detail` when the body parses as
	/// [`ApiErrorBody`].
	pub fn from_response(status: u16, body: &[u8], retry_after: Option<Duration>) -> Self {
		let detail = serde_json::from_slice::<ApiErrorBody>(body).ok().map(|parsed| parsed.detail);

		Self { status, detail, body: String::from_utf8_lossy(body).into_owned(), retry_after }
	}

	/// Returns `true` for `401 Unauthorized`.
	pub fn is_unauthorized(&self) -> bool {
		self.status == 401
	}

	/// Parses the body as the API's structured error payload.
	pub fn api_error(&self) -> Option<ApiErrorBody> {
		serde_json::from_str(&self.body).ok()
	}
}

/// Configuration and request construction failures.
#[derive(Clone, Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: SharedError,
	},
	/// The configured API root is not a valid absolute URL.
	#[error("API root `{value}` is not a valid URL.")]
	InvalidBaseUrl {
		/// Rejected input.
		value: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// The configured API root cannot carry relative endpoint paths.
	#[error("API root `{value}` cannot be used as a base URL.")]
	CannotBeABase {
		/// Rejected input.
		value: String,
	},
	/// Endpoint path escapes the API root or is not relative.
	#[error("Endpoint path `{path}` is not a relative API path.")]
	InvalidEndpoint {
		/// Rejected path.
		path: String,
	},
	/// Request body could not be serialized to JSON.
	#[error("Request body could not be serialized.")]
	RequestBody {
		/// Underlying serializer failure.
		#[source]
		source: Arc<serde_json::Error>,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::HttpClientBuild { source: Arc::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, timeouts). Never retried by the client.
#[derive(Clone, Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the API.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: SharedError,
	},
	/// The request exceeded its configured timeout.
	#[error("Request to the API timed out.")]
	Timeout {
		/// Transport-specific timeout error.
		#[source]
		source: SharedError,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::Network { source: Arc::new(src) }
	}

	/// Wraps a transport-specific timeout error.
	pub fn timeout(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::Timeout { source: Arc::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		if e.is_timeout() { Self::timeout(e) } else { Self::network(e) }
	}
}

/// Successful response whose body did not match the expected schema.
#[derive(Clone, Debug, ThisError)]
#[error("Response from `{endpoint}` could not be decoded at `{path}`.")]
pub struct DecodeError {
	/// Endpoint path that produced the body.
	pub endpoint: String,
	/// HTTP status of the response.
	pub status: u16,
	/// JSON path at which decoding failed.
	pub path: String,
	/// Structured parsing failure.
	#[source]
	pub source: Arc<serde_path_to_error::Error<serde_json::Error>>,
}
impl DecodeError {
	pub(crate) fn new(
		endpoint: impl Into<String>,
		status: u16,
		source: serde_path_to_error::Error<serde_json::Error>,
	) -> Self {
		Self {
			endpoint: endpoint.into(),
			status,
			path: source.path().to_string(),
			source: Arc::new(source),
		}
	}
}

/// Decodes a JSON body, recording the failing path on error.
pub(crate) fn decode_json<T>(endpoint: &str, status: u16, body: &[u8]) -> Result<T>
where
	T: DeserializeOwned,
{
	let mut deserializer = serde_json::Deserializer::from_slice(body);

	serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|source| DecodeError::new(endpoint, status, source).into())
}
