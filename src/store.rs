//! Storage contracts and built-in backends for the persisted credential pair.
//!
//! Storage is synchronous: reads and writes never suspend, so the refresh coordinator can
//! consult and update credentials without yielding between its decision and its write.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

// self
use crate::{
	_prelude::*,
	auth::{CredentialPair, TokenSecret},
};

/// Durable storage for the access/refresh token pair.
///
/// Implementations must write both tokens together or not at all; a reader never observes a
/// pair mixing old and new tokens.
pub trait CredentialStore
where
	Self: Send + Sync,
{
	/// Returns the stored pair, if any.
	fn load(&self) -> Option<CredentialPair>;

	/// Replaces the stored pair atomically.
	fn save(&self, pair: &CredentialPair) -> Result<(), StoreError>;

	/// Removes both tokens.
	fn clear(&self) -> Result<(), StoreError>;

	/// Returns the stored access token, if any.
	fn access_token(&self) -> Option<TokenSecret> {
		self.load().map(|pair| pair.access_token)
	}

	/// Returns the stored refresh token, if any.
	fn refresh_token(&self) -> Option<TokenSecret> {
		self.load().map(|pair| pair.refresh_token)
	}
}

/// Error type produced by [`CredentialStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Serialization failures surfaced by the backend.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}
