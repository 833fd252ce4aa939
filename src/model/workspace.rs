//! Workspace records served under `/workspaces`.

// self
use crate::{_prelude::*, model::WorkspaceId};

/// A workspace grouping projects.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
	/// Workspace identifier.
	pub id: WorkspaceId,
	/// Display name.
	pub name: String,
	/// URL-friendly name.
	pub slug: String,
	/// Optional description.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	/// Creation instant.
	#[serde(with = "time::serde::rfc3339")]
	pub created_at: OffsetDateTime,
	/// Last update instant.
	#[serde(with = "time::serde::rfc3339")]
	pub updated_at: OffsetDateTime,
}

/// One page of workspaces.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceList {
	/// Workspaces on this page.
	pub workspaces: Vec<Workspace>,
	/// Total number of workspaces visible to the caller.
	pub total: u64,
	/// Page number.
	pub page: u32,
	/// Page size.
	pub page_size: u32,
}

/// Body of `POST /workspaces`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceCreate {
	/// Display name.
	pub name: String,
	/// URL-friendly name.
	pub slug: String,
	/// Optional description.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
}
impl WorkspaceCreate {
	/// Builds a request without a description.
	pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
		Self { name: name.into(), slug: slug.into(), description: None }
	}

	/// Attaches a description.
	pub fn with_description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());

		self
	}
}
