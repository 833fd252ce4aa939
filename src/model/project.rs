//! Project records served under `/workspaces/{id}/projects`.

// self
use crate::{
	_prelude::*,
	model::{Pagination, ProjectId, User, UserId, WorkspaceId},
};

/// Lifecycle label of a project.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
	/// In use.
	Active,
	/// Retained read-only.
	Archived,
	/// Not yet published.
	Draft,
}

/// A project inside a workspace.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
	/// Project identifier.
	pub id: ProjectId,
	/// Display name.
	pub name: String,
	/// Optional description.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	/// Lifecycle label.
	pub status: ProjectStatus,
	/// Owning workspace.
	pub workspace_id: WorkspaceId,
	/// Owning user.
	pub owner_id: UserId,
	/// Expanded owner record, present when requested with `include_owner`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub owner: Option<User>,
	/// Creation instant.
	#[serde(with = "time::serde::rfc3339")]
	pub created_at: OffsetDateTime,
	/// Last update instant.
	#[serde(with = "time::serde::rfc3339")]
	pub updated_at: OffsetDateTime,
}

/// One page of projects.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectList {
	/// Projects on this page.
	pub projects: Vec<Project>,
	/// Total number of projects in the workspace.
	pub total: u64,
	/// Page number.
	pub page: u32,
	/// Page size.
	pub page_size: u32,
}

/// Body of `POST /workspaces/{id}/projects`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectCreate {
	/// Display name.
	pub name: String,
	/// Optional description.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	/// Initial status; the server picks its default when absent.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub status: Option<ProjectStatus>,
}
impl ProjectCreate {
	/// Builds a request carrying only a name.
	pub fn new(name: impl Into<String>) -> Self {
		Self { name: name.into(), description: None, status: None }
	}
}

/// Body of `PATCH /workspaces/{id}/projects/{id}`; only set fields are sent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectUpdate {
	/// New display name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// New description.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	/// New status.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub status: Option<ProjectStatus>,
}

/// Query options for listing projects.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProjectListQuery {
	/// Page selection.
	pub pagination: Pagination,
	/// Expands each project's owner record when set.
	pub include_owner: Option<bool>,
}
impl ProjectListQuery {
	pub(crate) fn query_pairs(&self) -> Vec<(String, String)> {
		let mut pairs = self.pagination.query_pairs();

		if let Some(include_owner) = self.include_owner {
			pairs.push(("include_owner".into(), include_owner.to_string()));
		}

		pairs
	}
}
