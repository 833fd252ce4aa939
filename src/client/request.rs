//! Client-level request description, replayable after a token refresh.

// self
use crate::{_prelude::*, error::ConfigError, http::Method};

/// A request against an API path, independent of credentials.
///
/// The body is serialized once at construction so a replay after a refresh sends exactly the
/// bytes of the first attempt. Only the bearer token changes between attempts.
#[derive(Clone)]
pub struct ApiRequest {
	/// HTTP method.
	pub method: Method,
	/// Endpoint path relative to the API root, starting with `/`.
	pub path: String,
	/// Query string pairs.
	pub query: Vec<(String, String)>,
	/// JSON-encoded body.
	pub body: Option<Vec<u8>>,
	/// Per-request timeout overriding the client default.
	pub timeout: Option<StdDuration>,
	retried: bool,
}
impl ApiRequest {
	/// Creates a request without query or body.
	pub fn new(method: Method, path: impl Into<String>) -> Self {
		Self { method, path: path.into(), query: Vec::new(), body: None, timeout: None, retried: false }
	}

	/// `GET` request.
	pub fn get(path: impl Into<String>) -> Self {
		Self::new(Method::Get, path)
	}

	/// `POST` request.
	pub fn post(path: impl Into<String>) -> Self {
		Self::new(Method::Post, path)
	}

	/// `PUT` request.
	pub fn put(path: impl Into<String>) -> Self {
		Self::new(Method::Put, path)
	}

	/// `PATCH` request.
	pub fn patch(path: impl Into<String>) -> Self {
		Self::new(Method::Patch, path)
	}

	/// `DELETE` request.
	pub fn delete(path: impl Into<String>) -> Self {
		Self::new(Method::Delete, path)
	}

	/// Appends one query pair.
	pub fn with_query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
		self.query.push((key.into(), value.to_string()));

		self
	}

	/// Appends several query pairs.
	pub fn with_query_pairs(mut self, pairs: impl IntoIterator<Item = (String, String)>) -> Self {
		self.query.extend(pairs);

		self
	}

	/// Serializes `body` as the JSON payload.
	pub fn with_json<T>(mut self, body: &T) -> Result<Self>
	where
		T: ?Sized + Serialize,
	{
		let bytes = serde_json::to_vec(body)
			.map_err(|source| ConfigError::RequestBody { source: Arc::new(source) })?;

		self.body = Some(bytes);

		Ok(self)
	}

	/// Sets a per-request timeout.
	pub fn with_timeout(mut self, timeout: StdDuration) -> Self {
		self.timeout = Some(timeout);

		self
	}

	/// Returns `true` once the request has been replayed after a refresh.
	pub fn is_retried(&self) -> bool {
		self.retried
	}

	pub(crate) fn mark_retried(&mut self) {
		self.retried = true;
	}
}
impl Debug for ApiRequest {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ApiRequest")
			.field("method", &self.method)
			.field("path", &self.path)
			.field("query", &self.query)
			.field("body_len", &self.body.as_ref().map(Vec::len))
			.field("timeout", &self.timeout)
			.field("retried", &self.retried)
			.finish()
	}
}
