//! User records returned by `/auth/me` and `/auth/register`.

// self
use crate::{_prelude::*, model::UserId};

/// Platform-wide role of a user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
	/// Operator of the whole platform.
	SuperAdmin,
	/// Administrator.
	Admin,
	/// Regular member.
	Member,
	/// Read-only access.
	Viewer,
}

/// A platform user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
	/// User identifier.
	pub id: UserId,
	/// Login email.
	pub email: String,
	/// Display name.
	pub full_name: String,
	/// Avatar image location.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub avatar_url: Option<String>,
	/// Platform role.
	pub role: UserRole,
	/// Whether the account is enabled.
	pub is_active: bool,
	/// Creation instant.
	#[serde(with = "time::serde::rfc3339")]
	pub created_at: OffsetDateTime,
	/// Last update instant.
	#[serde(with = "time::serde::rfc3339")]
	pub updated_at: OffsetDateTime,
}
