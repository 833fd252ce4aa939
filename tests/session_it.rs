#![cfg(feature = "reqwest")]

// std
use std::{env, process};
// crates.io
use httpmock::prelude::*;
// self
use platform_api_client::{
	_preludet::*,
	auth::{CredentialPair, InvalidationReason},
	client::{ClientConfig, ReqwestApiClient},
	session::{AuthSession, AuthState},
	store::{CredentialStore, FileStore},
};

const USER_JSON: &str = r#"{"id":"u-1","email":"ada@example.com","full_name":"Ada","role":"member","is_active":true,"created_at":"2025-01-01T00:00:00Z","updated_at":"2025-01-01T00:00:00Z"}"#;

#[tokio::test]
async fn login_then_logout_walks_the_session_states() {
	let server = MockServer::start_async().await;
	let (client, store, _) = build_reqwest_test_client(&server.url("/api/v1/"))
		.expect("Test client should build against the mock server.");

	server
		.mock_async(|when, then| {
			when.method(POST).path("/api/v1/auth/login");
			then.status(200).header("content-type", "application/json").body(
				r#"{"access_token":"T1","refresh_token":"R1","token_type":"bearer","expires_in":1800}"#,
			);
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/api/v1/auth/me").header("authorization", "Bearer T1");
			then.status(200).header("content-type", "application/json").body(USER_JSON);
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(POST).path("/api/v1/auth/logout");
			then.status(500);
		})
		.await;

	let session = AuthSession::new(client);

	assert_eq!(session.restore().await, AuthState::SignedOut);

	let user =
		session.login("ada@example.com", "hunter2").await.expect("Login should sign the user in.");

	assert_eq!(user.email, "ada@example.com");
	assert!(session.is_authenticated());
	assert_eq!(session.user(), Some(user));

	let outcome = session.logout().await;

	assert!(!outcome.server_acknowledged);
	assert_eq!(session.state(), AuthState::SignedOut);
	assert!(store.load().is_none());
}

#[tokio::test]
async fn wrong_password_keeps_session_signed_out() {
	let server = MockServer::start_async().await;
	let (client, store, observer) = build_reqwest_test_client(&server.url("/api/v1/"))
		.expect("Test client should build against the mock server.");

	server
		.mock_async(|when, then| {
			when.method(POST).path("/api/v1/auth/login");
			then.status(401)
				.header("content-type", "application/json")
				.body(r#"{"detail":"Incorrect email or password","status_code":401}"#);
		})
		.await;

	let session = AuthSession::new(client);

	session.restore().await;

	let err = session
		.login("ada@example.com", "wrong")
		.await
		.expect_err("Rejected credentials should surface.");

	assert!(matches!(
		&err,
		Error::Http(http) if http.detail.as_deref() == Some("Incorrect email or password")
	));
	assert!(!session.is_authenticated());
	assert!(store.load().is_none());
	// Login goes through the regular 401 protocol; with nothing stored it gives up immediately.
	assert_eq!(
		observer.events().iter().map(|event| event.reason).collect::<Vec<_>>(),
		[InvalidationReason::MissingRefreshToken]
	);
}

#[tokio::test]
async fn file_backed_session_restores_after_restart() {
	let server = MockServer::start_async().await;
	let path = env::temp_dir().join(format!(
		"platform_api_client_session_{}_{}.json",
		process::id(),
		OffsetDateTime::now_utc().unix_timestamp_nanos(),
	));

	server
		.mock_async(|when, then| {
			when.method(GET).path("/api/v1/auth/me").header("authorization", "Bearer T1");
			then.status(200).header("content-type", "application/json").body(USER_JSON);
		})
		.await;

	{
		let store = FileStore::open(&path).expect("File store should open.");

		store.save(&CredentialPair::new("T1", "R1")).expect("Seeding the store should succeed.");
	}

	let store: Arc<dyn CredentialStore> =
		Arc::new(FileStore::open(&path).expect("File store should reopen."));
	let config =
		ClientConfig::with_api_root(&server.url("/api/v1/")).expect("Mock API root is valid.");
	let client = ReqwestApiClient::with_http_client(store, config, test_reqwest_http_client());
	let session = AuthSession::new(client);

	assert!(session.is_loading());

	let state = session.restore().await;

	assert!(matches!(state, AuthState::SignedIn(ref user) if user.full_name == "Ada"));

	session.logout().await;

	assert!(!path.exists(), "Logout must remove the persisted credentials.");
}
