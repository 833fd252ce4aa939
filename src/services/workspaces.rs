//! `/workspaces` endpoints.

// self
use crate::{
	_prelude::*,
	client::{ApiClient, ApiRequest},
	http::ApiHttpClient,
	model::{Pagination, Workspace, WorkspaceCreate, WorkspaceId, WorkspaceList},
};

pub(crate) const WORKSPACES_PATH: &str = "/workspaces";

pub(crate) fn workspace_path(workspace: &WorkspaceId) -> String {
	format!("{WORKSPACES_PATH}/{workspace}")
}

impl<C> ApiClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Lists workspaces visible to the current user.
	pub async fn list_workspaces(&self, pagination: Pagination) -> Result<WorkspaceList> {
		let request = ApiRequest::get(WORKSPACES_PATH).with_query_pairs(pagination.query_pairs());

		self.send_json(request).await
	}

	/// Fetches one workspace.
	pub async fn workspace(&self, workspace: &WorkspaceId) -> Result<Workspace> {
		self.send_json(ApiRequest::get(workspace_path(workspace))).await
	}

	/// Creates a workspace.
	pub async fn create_workspace(&self, request: &WorkspaceCreate) -> Result<Workspace> {
		self.send_json(ApiRequest::post(WORKSPACES_PATH).with_json(request)?).await
	}
}
