//! `/workspaces/{id}/projects` endpoints.

// self
use crate::{
	_prelude::*,
	client::{ApiClient, ApiRequest},
	http::ApiHttpClient,
	model::{
		Project, ProjectCreate, ProjectId, ProjectList, ProjectListQuery, ProjectUpdate,
		WorkspaceId,
	},
	services::workspaces,
};

fn projects_path(workspace: &WorkspaceId) -> String {
	format!("{}/projects", workspaces::workspace_path(workspace))
}

fn project_path(workspace: &WorkspaceId, project: &ProjectId) -> String {
	format!("{}/{project}", projects_path(workspace))
}

impl<C> ApiClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Lists projects of a workspace.
	pub async fn list_projects(
		&self,
		workspace: &WorkspaceId,
		query: &ProjectListQuery,
	) -> Result<ProjectList> {
		let request = ApiRequest::get(projects_path(workspace)).with_query_pairs(query.query_pairs());

		self.send_json(request).await
	}

	/// Fetches one project, optionally expanding its owner record.
	pub async fn project(
		&self,
		workspace: &WorkspaceId,
		project: &ProjectId,
		include_owner: bool,
	) -> Result<Project> {
		let mut request = ApiRequest::get(project_path(workspace, project));

		if include_owner {
			request = request.with_query("include_owner", true);
		}

		self.send_json(request).await
	}

	/// Creates a project inside a workspace.
	pub async fn create_project(
		&self,
		workspace: &WorkspaceId,
		request: &ProjectCreate,
	) -> Result<Project> {
		self.send_json(ApiRequest::post(projects_path(workspace)).with_json(request)?).await
	}

	/// Applies a partial update; only set fields are sent.
	pub async fn update_project(
		&self,
		workspace: &WorkspaceId,
		project: &ProjectId,
		update: &ProjectUpdate,
	) -> Result<Project> {
		self.send_json(ApiRequest::patch(project_path(workspace, project)).with_json(update)?).await
	}

	/// Deletes a project.
	pub async fn delete_project(&self, workspace: &WorkspaceId, project: &ProjectId) -> Result<()> {
		self.send_empty(ApiRequest::delete(project_path(workspace, project))).await
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn project_paths_nest_under_workspace() {
		let workspace = WorkspaceId::new("ws-1").expect("Fixture identifier is valid.");
		let project = ProjectId::new("p-9").expect("Fixture identifier is valid.");

		assert_eq!(projects_path(&workspace), "/workspaces/ws-1/projects");
		assert_eq!(project_path(&workspace, &project), "/workspaces/ws-1/projects/p-9");
	}
}
