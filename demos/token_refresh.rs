//! Demonstrates transparent token refresh: an expired access token is rotated once and the
//! original request is replayed, with the rotated pair persisted to a JSON file.

// std
use std::{env, sync::Arc};
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use platform_api_client::{
	auth::{CredentialPair, FnObserver, SessionInvalidated},
	client::{ApiClient, ClientConfig},
	http::ReqwestHttpClient,
	model::Pagination,
	reqwest::Client,
	store::{CredentialStore, FileStore},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let expired = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/v1/workspaces").header("authorization", "Bearer stale");
			then.status(401)
				.header("content-type", "application/json")
				.body(r#"{"detail":"Token expired","status_code":401}"#);
		})
		.await;
	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/v1/auth/refresh");
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"access_token":"fresh","refresh_token":"fresh-refresh"}"#);
		})
		.await;
	let listed = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/v1/workspaces").header("authorization", "Bearer fresh");
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"workspaces":[],"total":0,"page":1,"page_size":20}"#);
		})
		.await;
	let path = env::temp_dir().join("platform_api_client_demo.json");
	let file_store = FileStore::open(&path)?;

	file_store.save(&CredentialPair::new("stale", "stale-refresh"))?;

	let store: Arc<dyn CredentialStore> = Arc::new(file_store);
	let http_client = ReqwestHttpClient::with_client(Client::builder().build()?);
	let config = ClientConfig::with_api_root(&server.url("/api/v1/"))?;
	let client = <ApiClient<ReqwestHttpClient>>::with_http_client(store, config, http_client)
		.with_observer(Arc::new(FnObserver(|event: &SessionInvalidated| {
			println!("Session invalidated; route the user to {}.", event.login_path);
		})));
	let page = client.list_workspaces(Pagination::new(1, 20)).await?;

	println!(
		"Listed {} workspaces after {} refresh call(s).",
		page.total,
		client.refresh_metrics.attempts()
	);
	println!("Rotated credentials persisted to {}.", path.display());

	expired.assert_async().await;
	refresh.assert_async().await;
	listed.assert_async().await;

	client.logout().await;

	Ok(())
}
