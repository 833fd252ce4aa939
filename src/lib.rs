//! Typed async client for the platform API: bearer injection, single-flight token refresh with
//! request replay, and durable credential storage in one crate.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod client;
pub mod error;
pub mod http;
pub mod model;
pub mod obs;
pub mod services;
pub mod session;
pub mod store;
#[doc(hidden)]
pub mod _preludet {
	//! Convenience re-exports and helpers shared by unit and integration tests.

	pub use crate::_prelude::*;

	// self
	use crate::auth::{SessionInvalidated, SessionObserver};
	#[cfg(feature = "reqwest")]
	use crate::{
		client::{ClientConfig, ReqwestApiClient},
		http::ReqwestHttpClient,
		store::{CredentialStore, MemoryStore},
	};

	/// Observer that records every session invalidation it receives.
	#[derive(Debug, Default)]
	pub struct RecordingObserver(Mutex<Vec<SessionInvalidated>>);
	impl RecordingObserver {
		/// Returns a snapshot of the recorded invalidations in arrival order.
		pub fn events(&self) -> Vec<SessionInvalidated> {
			self.0.lock().clone()
		}
	}
	impl SessionObserver for RecordingObserver {
		fn session_invalidated(&self, event: &SessionInvalidated) {
			self.0.lock().push(event.clone());
		}
	}

	/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
	/// `httpmock` during tests.
	#[cfg(feature = "reqwest")]
	pub fn test_reqwest_http_client() -> ReqwestHttpClient {
		let client = ReqwestClient::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()
			.unwrap_or_default();

		ReqwestHttpClient::with_client(client)
	}

	/// Constructs a [`ReqwestApiClient`] rooted at `api_root`, backed by an in-memory store and a
	/// recording observer.
	#[cfg(feature = "reqwest")]
	pub fn build_reqwest_test_client(
		api_root: &str,
	) -> Result<(ReqwestApiClient, Arc<MemoryStore>, Arc<RecordingObserver>)> {
		let store_backend = Arc::new(MemoryStore::default());
		let store: Arc<dyn CredentialStore> = store_backend.clone();
		let observer = Arc::new(RecordingObserver::default());
		let config = ClientConfig::with_api_root(api_root)?;
		let client = ReqwestApiClient::with_http_client(store, config, test_reqwest_http_client())
			.with_observer(observer.clone());

		Ok((client, store_backend, observer))
	}
}

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
		time::Duration as StdDuration,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::{Mutex, RwLock};
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize, de::DeserializeOwned};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(all(test, feature = "reqwest"))] use {color_eyre as _, httpmock as _};
