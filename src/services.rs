//! Typed wrappers for every platform API endpoint.
//!
//! Each service call is an inherent method on [`ApiClient`], so all of them share the bearer
//! injection and single-flight refresh protocol of [`ApiClient::send`].

pub mod auth;
pub mod projects;
pub mod workspaces;

pub use auth::{LOGIN_PATH, LOGOUT_PATH, LogoutOutcome, ME_PATH, REGISTER_PATH};
