//! Credential material and the session-invalidation seam.

pub mod credentials;
pub mod invalidation;
pub mod secret;

pub use credentials::*;
pub use invalidation::*;
pub use secret::*;
