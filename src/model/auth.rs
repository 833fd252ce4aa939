//! Request and response bodies of the `/auth` endpoints.

// self
use crate::{
	_prelude::*,
	auth::{CredentialPair, TokenSecret},
};

/// Body of `POST /auth/login`.
#[derive(Clone, Serialize, Deserialize)]
pub struct LoginRequest {
	/// Account email.
	pub email: String,
	/// Account password.
	pub password: String,
}
impl LoginRequest {
	/// Builds a login request.
	pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
		Self { email: email.into(), password: password.into() }
	}
}
impl Debug for LoginRequest {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("LoginRequest")
			.field("email", &self.email)
			.field("password", &"<redacted>")
			.finish()
	}
}

/// Body of `POST /auth/register`.
#[derive(Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
	/// Account email.
	pub email: String,
	/// Account password.
	pub password: String,
	/// Display name.
	pub full_name: String,
}
impl Debug for RegisterRequest {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("RegisterRequest")
			.field("email", &self.email)
			.field("password", &"<redacted>")
			.field("full_name", &self.full_name)
			.finish()
	}
}

/// Token scheme announced by the login endpoint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
	/// RFC 6750 bearer tokens.
	#[default]
	Bearer,
}

/// Response of `POST /auth/login`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenResponse {
	/// Newly issued access token.
	pub access_token: TokenSecret,
	/// Newly issued refresh token.
	pub refresh_token: TokenSecret,
	/// Token scheme; always `bearer`.
	pub token_type: TokenType,
	/// Access token lifetime in seconds.
	pub expires_in: i64,
}
impl TokenResponse {
	/// Access token lifetime as a [`Duration`].
	pub fn lifetime(&self) -> Duration {
		Duration::seconds(self.expires_in)
	}

	/// Extracts the credential pair to persist.
	pub fn credentials(&self) -> CredentialPair {
		CredentialPair {
			access_token: self.access_token.clone(),
			refresh_token: self.refresh_token.clone(),
		}
	}
}

/// Body of `POST /auth/refresh`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RefreshTokenRequest {
	/// Refresh token being exchanged.
	pub refresh_token: TokenSecret,
}

/// Response of `POST /auth/refresh`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RefreshResponse {
	/// Rotated access token.
	pub access_token: TokenSecret,
	/// Rotated refresh token.
	pub refresh_token: TokenSecret,
}
impl From<RefreshResponse> for CredentialPair {
	fn from(value: RefreshResponse) -> Self {
		Self { access_token: value.access_token, refresh_token: value.refresh_token }
	}
}
