//! Client configuration: API root, login entry point, and timeouts.

// std
use std::env;
// self
use crate::{_prelude::*, error::ConfigError};

/// Environment variable naming the API origin.
pub const API_URL_ENV: &str = "PLATFORM_API_URL";
/// Environment variable naming the API version segment.
pub const API_VERSION_ENV: &str = "PLATFORM_API_VERSION";
/// Origin used when [`API_URL_ENV`] is unset.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";
/// Version used when [`API_VERSION_ENV`] is unset.
pub const DEFAULT_API_VERSION: &str = "v1";

/// Settings shared by every call a client makes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
	/// Base URL every endpoint path is resolved against; always ends with `/`.
	pub api_root: Url,
	/// Login entry point reported in session invalidation events.
	pub login_path: String,
	/// Timeout applied to refresh endpoint calls. `None` waits indefinitely.
	pub refresh_timeout: Option<StdDuration>,
	/// Default timeout for regular requests that do not set their own.
	pub request_timeout: Option<StdDuration>,
}
impl ClientConfig {
	const DEFAULT_LOGIN_PATH: &'static str = "/login";
	const DEFAULT_REFRESH_TIMEOUT: StdDuration = StdDuration::from_secs(30);

	/// Builds a config rooted at `{api_url}/api/{api_version}/`.
	pub fn new(api_url: &str, api_version: &str) -> Result<Self> {
		let root =
			format!("{}/api/{}/", api_url.trim_end_matches('/'), api_version.trim_matches('/'));

		Self::with_api_root(&root)
	}

	/// Builds a config from an explicit API root URL.
	pub fn with_api_root(api_root: &str) -> Result<Self> {
		let mut root = Url::parse(api_root).map_err(|source| ConfigError::InvalidBaseUrl {
			value: api_root.to_owned(),
			source,
		})?;

		if root.cannot_be_a_base() {
			return Err(ConfigError::CannotBeABase { value: api_root.to_owned() }.into());
		}
		if !root.path().ends_with('/') {
			let path = format!("{}/", root.path());

			root.set_path(&path);
		}

		root.set_query(None);
		root.set_fragment(None);

		Ok(Self {
			api_root: root,
			login_path: Self::DEFAULT_LOGIN_PATH.into(),
			refresh_timeout: Some(Self::DEFAULT_REFRESH_TIMEOUT),
			request_timeout: None,
		})
	}

	/// Reads [`API_URL_ENV`] and [`API_VERSION_ENV`], falling back to local defaults.
	pub fn from_env() -> Result<Self> {
		Self::from_lookup(|key| env::var(key).ok())
	}

	fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
		let api_url = lookup(API_URL_ENV)
			.filter(|value| !value.trim().is_empty())
			.unwrap_or_else(|| DEFAULT_API_URL.into());
		let api_version = lookup(API_VERSION_ENV)
			.filter(|value| !value.trim().is_empty())
			.unwrap_or_else(|| DEFAULT_API_VERSION.into());

		Self::new(api_url.trim(), api_version.trim())
	}

	/// Overrides the login entry point reported on session invalidation.
	pub fn with_login_path(mut self, login_path: impl Into<String>) -> Self {
		self.login_path = login_path.into();

		self
	}

	/// Overrides the refresh call timeout (defaults to 30 seconds).
	pub fn with_refresh_timeout(mut self, timeout: Option<StdDuration>) -> Self {
		self.refresh_timeout = timeout;

		self
	}

	/// Sets a default timeout for regular requests.
	pub fn with_request_timeout(mut self, timeout: Option<StdDuration>) -> Self {
		self.request_timeout = timeout;

		self
	}

	/// Resolves an endpoint path such as `/workspaces/ws-1` plus query pairs against the API
	/// root.
	pub fn endpoint(&self, path: &str, query: &[(String, String)]) -> Result<Url> {
		let relative = path.strip_prefix('/').ok_or_else(|| invalid_endpoint(path))?;

		if relative.starts_with('/')
			|| relative.contains(['?', '#', '\\'])
			|| relative.split('/').any(|segment| segment == ".." || segment == ".")
		{
			return Err(invalid_endpoint(path));
		}

		let mut url = self.api_root.join(relative).map_err(|_| invalid_endpoint(path))?;

		if !query.is_empty() {
			url.query_pairs_mut().extend_pairs(query);
		}

		Ok(url)
	}
}

fn invalid_endpoint(path: &str) -> Error {
	ConfigError::InvalidEndpoint { path: path.to_owned() }.into()
}
