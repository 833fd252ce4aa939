//! The access/refresh token pair persisted between runs.

// self
use crate::{_prelude::*, auth::TokenSecret};

/// Access and refresh tokens that are always stored and cleared together.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialPair {
	/// Short-lived bearer credential attached to every authenticated request.
	pub access_token: TokenSecret,
	/// Longer-lived credential exchanged for a new pair when the access token expires.
	pub refresh_token: TokenSecret,
}
impl CredentialPair {
	/// Builds a pair from raw token strings.
	pub fn new(access_token: impl Into<TokenSecret>, refresh_token: impl Into<TokenSecret>) -> Self {
		Self { access_token: access_token.into(), refresh_token: refresh_token.into() }
	}
}
impl Debug for CredentialPair {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("CredentialPair")
			.field("access_token", &"<redacted>")
			.field("refresh_token", &"<redacted>")
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn debug_output_redacts_both_tokens() {
		let pair = CredentialPair::new("access-1", "refresh-1");
		let rendered = format!("{pair:?}");

		assert!(!rendered.contains("access-1"));
		assert!(!rendered.contains("refresh-1"));
	}

	#[test]
	fn stored_shape_uses_fixed_key_names() {
		let pair = CredentialPair::new("a", "r");
		let value = serde_json::to_value(&pair).expect("Pair should serialize.");

		assert_eq!(value, serde_json::json!({ "access_token": "a", "refresh_token": "r" }));
	}
}
