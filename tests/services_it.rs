#![cfg(feature = "reqwest")]

// crates.io
use httpmock::prelude::*;
// self
use platform_api_client::{
	_preludet::*,
	auth::CredentialPair,
	model::{
		LoginRequest, Pagination, ProjectId, ProjectListQuery, ProjectStatus, ProjectUpdate,
		RegisterRequest, UserRole, WorkspaceId,
	},
	store::CredentialStore,
};

const USER_JSON: &str = r#"{"id":"u-1","email":"ada@example.com","full_name":"Ada","role":"admin","is_active":true,"created_at":"2025-01-01T00:00:00Z","updated_at":"2025-01-01T00:00:00Z"}"#;
const PROJECT_JSON: &str = r#"{"id":"p-1","name":"Apollo","status":"archived","workspace_id":"ws-1","owner_id":"u-1","created_at":"2025-01-01T00:00:00Z","updated_at":"2025-01-03T00:00:00Z"}"#;

fn ids() -> (WorkspaceId, ProjectId) {
	(
		WorkspaceId::new("ws-1").expect("Fixture workspace identifier is valid."),
		ProjectId::new("p-1").expect("Fixture project identifier is valid."),
	)
}

#[tokio::test]
async fn login_persists_credentials_and_authorizes_follow_ups() {
	let server = MockServer::start_async().await;
	let (client, store, _) = build_reqwest_test_client(&server.url("/api/v1/"))
		.expect("Test client should build against the mock server.");
	let login = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/api/v1/auth/login")
				.body(r#"{"email":"ada@example.com","password":"hunter2"}"#);
			then.status(200).header("content-type", "application/json").body(
				r#"{"access_token":"T1","refresh_token":"R1","token_type":"bearer","expires_in":1800}"#,
			);
		})
		.await;
	let me = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/v1/auth/me").header("authorization", "Bearer T1");
			then.status(200).header("content-type", "application/json").body(USER_JSON);
		})
		.await;
	let tokens = client
		.login(&LoginRequest::new("ada@example.com", "hunter2"))
		.await
		.expect("Login should succeed.");

	assert_eq!(tokens.lifetime(), Duration::minutes(30));
	assert_eq!(store.load(), Some(CredentialPair::new("T1", "R1")));

	let user = client.current_user().await.expect("Current user should load with the new token.");

	assert_eq!(user.role, UserRole::Admin);

	login.assert_async().await;
	me.assert_async().await;
}

#[tokio::test]
async fn register_does_not_store_credentials() {
	let server = MockServer::start_async().await;
	let (client, store, _) = build_reqwest_test_client(&server.url("/api/v1/"))
		.expect("Test client should build against the mock server.");
	let register = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/v1/auth/register");
			then.status(201).header("content-type", "application/json").body(USER_JSON);
		})
		.await;
	let user = client
		.register(&RegisterRequest {
			email: "ada@example.com".into(),
			password: "hunter2".into(),
			full_name: "Ada".into(),
		})
		.await
		.expect("Registration should succeed.");

	register.assert_async().await;

	assert_eq!(user.full_name, "Ada");
	assert!(store.load().is_none());
}

#[tokio::test]
async fn logout_clears_credentials_when_server_acknowledges() {
	let server = MockServer::start_async().await;
	let (client, store, observer) = build_reqwest_test_client(&server.url("/api/v1/"))
		.expect("Test client should build against the mock server.");

	store.save(&CredentialPair::new("T1", "R1")).expect("Seeding the store should succeed.");

	let logout = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/v1/auth/logout").header("authorization", "Bearer T1");
			then.status(204);
		})
		.await;
	let outcome = client.logout().await;

	logout.assert_async().await;

	assert!(outcome.server_acknowledged);
	assert!(outcome.credentials_cleared);
	assert!(store.load().is_none());
	assert!(observer.events().is_empty());
}

#[tokio::test]
async fn logout_with_unreachable_server_still_clears_credentials() {
	// Nothing listens on port 1; the connection is refused immediately.
	let (client, store, observer) = build_reqwest_test_client("http://127.0.0.1:1/api/v1/")
		.expect("Test client should build.");

	store.save(&CredentialPair::new("T1", "R1")).expect("Seeding the store should succeed.");

	let outcome = client.logout().await;

	assert!(!outcome.server_acknowledged);
	assert!(outcome.credentials_cleared);
	assert!(store.load().is_none());
	assert!(observer.events().is_empty());
}

#[tokio::test]
async fn workspace_listing_forwards_pagination() {
	let server = MockServer::start_async().await;
	let (client, _, _) = build_reqwest_test_client(&server.url("/api/v1/"))
		.expect("Test client should build against the mock server.");
	let list = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/api/v1/workspaces")
				.query_param("page", "2")
				.query_param("page_size", "5");
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"workspaces":[],"total":6,"page":2,"page_size":5}"#);
		})
		.await;
	let page = client
		.list_workspaces(Pagination::new(2, 5))
		.await
		.expect("Workspace listing should succeed.");

	list.assert_async().await;

	assert_eq!((page.total, page.page, page.page_size), (6, 2, 5));
}

#[tokio::test]
async fn project_calls_hit_nested_paths() {
	let server = MockServer::start_async().await;
	let (client, store, _) = build_reqwest_test_client(&server.url("/api/v1/"))
		.expect("Test client should build against the mock server.");
	let (workspace, project) = ids();

	store.save(&CredentialPair::new("T1", "R1")).expect("Seeding the store should succeed.");

	let list = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/api/v1/workspaces/ws-1/projects")
				.query_param("include_owner", "true");
			then.status(200)
				.header("content-type", "application/json")
				.body(format!(r#"{{"projects":[{PROJECT_JSON}],"total":1,"page":1,"page_size":20}}"#));
		})
		.await;
	let update = server
		.mock_async(|when, then| {
			when.method(PATCH)
				.path("/api/v1/workspaces/ws-1/projects/p-1")
				.header("authorization", "Bearer T1")
				.body(r#"{"status":"archived"}"#);
			then.status(200).header("content-type", "application/json").body(PROJECT_JSON);
		})
		.await;
	let delete = server
		.mock_async(|when, then| {
			when.method(DELETE).path("/api/v1/workspaces/ws-1/projects/p-1");
			then.status(204);
		})
		.await;
	let listed = client
		.list_projects(&workspace, &ProjectListQuery { include_owner: Some(true), ..Default::default() })
		.await
		.expect("Project listing should succeed.");

	assert_eq!(listed.projects.len(), 1);

	let updated = client
		.update_project(
			&workspace,
			&project,
			&ProjectUpdate { status: Some(ProjectStatus::Archived), ..Default::default() },
		)
		.await
		.expect("Project update should succeed.");

	assert_eq!(updated.status, ProjectStatus::Archived);

	client.delete_project(&workspace, &project).await.expect("Project deletion should succeed.");

	list.assert_async().await;
	update.assert_async().await;
	delete.assert_async().await;
}

#[tokio::test]
async fn api_errors_expose_detail_and_decode_errors_name_the_endpoint() {
	let server = MockServer::start_async().await;
	let (client, _, _) = build_reqwest_test_client(&server.url("/api/v1/"))
		.expect("Test client should build against the mock server.");
	let (workspace, project) = ids();

	server
		.mock_async(|when, then| {
			when.method(GET).path("/api/v1/workspaces/ws-1/projects/p-1");
			then.status(404)
				.header("content-type", "application/json")
				.body(r#"{"detail":"Project not found","status_code":404}"#);
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/api/v1/workspaces/ws-1");
			then.status(200).header("content-type", "application/json").body(r#"{"id":"ws-1"}"#);
		})
		.await;

	let missing = client
		.project(&workspace, &project, false)
		.await
		.expect_err("Missing project should surface as an HTTP error.");

	assert!(matches!(
		&missing,
		Error::Http(http) if http.status == 404 && http.detail.as_deref() == Some("Project not found")
	));

	let malformed =
		client.workspace(&workspace).await.expect_err("Truncated payload should fail to decode.");

	match malformed {
		Error::Decode(decode) => {
			assert_eq!(decode.endpoint, "/workspaces/ws-1");
			assert_eq!(decode.status, 200);
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}
}
