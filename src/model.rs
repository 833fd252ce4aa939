//! Wire-level records exchanged with the platform API.
//!
//! These are plain data-transfer types: they mirror server records, are created from API
//! responses, and carry no lifecycle of their own.

pub mod auth;
pub mod id;
pub mod pagination;
pub mod project;
pub mod user;
pub mod workspace;

pub use auth::*;
pub use id::*;
pub use pagination::*;
pub use project::*;
pub use user::*;
pub use workspace::*;

// self
use crate::_prelude::*;

/// Structured error payload returned by the API for every failure status.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
	/// Human-readable error message.
	pub detail: String,
	/// HTTP status echoed by the server.
	pub status_code: u16,
}
