#![cfg(all(feature = "reqwest", feature = "test"))]

// crates.io
use httpmock::prelude::*;
// self
use homecare_client::{
	_preludet::*,
	auth::CredentialPair,
	error::SessionExpired,
	http::ApiRequest,
	store::{MemoryStore, TokenStore},
};

const ACCESS_OLD: &str = "Bearer access-old";
const REFRESH_OLD: &str = "Bearer refresh-old";
const ACCESS_NEW: &str = "Bearer access-new";
const REFRESH_NEW: &str = "Bearer refresh-new";

async fn seed_pair(store: &MemoryStore, access: &str, refresh: &str) {
	let pair = CredentialPair::new(access, refresh).expect("Credential fixture should be valid.");

	store.save(pair).await.expect("Failed to seed credential pair into the store.");
}

fn bookings_request(server: &MockServer) -> ApiRequest {
	ApiRequest::get(
		Url::parse(&server.url("/v1/bookings")).expect("Mock bookings URL should parse."),
	)
}

#[tokio::test]
async fn first_dispatch_success_skips_refresh() {
	let server = MockServer::start_async().await;
	let (client, store) = build_reqwest_test_client(&server.url("/auth/refresh"));

	seed_pair(&store, ACCESS_OLD, REFRESH_OLD).await;

	let bookings = server
		.mock_async(|when, then| {
			when.method(GET).path("/v1/bookings").header("authorization", ACCESS_OLD);
			then.status(200).header("content-type", "application/json").body("[]");
		})
		.await;
	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path("/auth/refresh");
			then.status(200);
		})
		.await;
	let response =
		client.send(bookings_request(&server)).await.expect("Authorized request should succeed.");

	assert!(response.is_success());
	assert_eq!(response.text(), "[]");

	bookings.assert_calls_async(1).await;
	refresh.assert_calls_async(0).await;

	assert_eq!(client.refresh_metrics.attempts(), 0);
}

#[tokio::test]
async fn single_unauthorized_refreshes_and_retries_once() {
	let server = MockServer::start_async().await;
	let (client, store) = build_reqwest_test_client(&server.url("/auth/refresh"));

	seed_pair(&store, ACCESS_OLD, REFRESH_OLD).await;

	let rejected = server
		.mock_async(|when, then| {
			when.method(GET).path("/v1/bookings").header("authorization", ACCESS_OLD);
			then.status(401);
		})
		.await;
	let accepted = server
		.mock_async(|when, then| {
			when.method(GET).path("/v1/bookings").header("authorization", ACCESS_NEW);
			then.status(200).body("[{\"id\":7}]");
		})
		.await;
	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path("/auth/refresh").header("authorization", REFRESH_OLD);
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"access_token\":\"access-new\",\"refresh_token\":\"refresh-new\"}");
		})
		.await;
	let response =
		client.send(bookings_request(&server)).await.expect("Refreshed request should succeed.");

	assert!(response.is_success());

	rejected.assert_calls_async(1).await;
	refresh.assert_calls_async(1).await;
	accepted.assert_calls_async(1).await;

	let stored = store
		.load()
		.await
		.expect("Token store load should succeed.")
		.expect("Refreshed pair should be persisted.");

	assert_eq!(stored.access_token().expose(), ACCESS_NEW);
	assert_eq!(stored.refresh_token().expose(), REFRESH_NEW);
	assert_eq!(client.refresh_metrics.successes(), 1);
}

#[tokio::test]
async fn unauthorized_retry_never_refreshes_twice() {
	let server = MockServer::start_async().await;
	let (client, store) = build_reqwest_test_client(&server.url("/auth/refresh"));

	seed_pair(&store, ACCESS_OLD, REFRESH_OLD).await;

	let bookings = server
		.mock_async(|when, then| {
			when.method(GET).path("/v1/bookings");
			then.status(401);
		})
		.await;
	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path("/auth/refresh");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"access_token\":\"access-new\",\"refresh_token\":\"refresh-new\"}");
		})
		.await;
	let err = client
		.send(bookings_request(&server))
		.await
		.expect_err("A second 401 should end the session.");

	assert!(matches!(err, Error::SessionExpired(SessionExpired::UnauthorizedAfterRetry)));

	bookings.assert_calls_async(2).await;
	refresh.assert_calls_async(1).await;
}

#[tokio::test]
async fn access_token_only_entry_expires_without_refresh_call() {
	let server = MockServer::start_async().await;
	let store = Arc::new(MemoryStore::with_raw_entry("{\"accessToken\":\"Bearer access-old\"}"));
	let client = build_reqwest_test_client_with_store(&server.url("/auth/refresh"), store);
	let bookings = server
		.mock_async(|when, then| {
			when.method(GET).path("/v1/bookings");
			then.status(401);
		})
		.await;
	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path("/auth/refresh");
			then.status(200);
		})
		.await;
	let err = client
		.send(bookings_request(&server))
		.await
		.expect_err("Missing refresh tokens should end the session.");

	assert!(matches!(err, Error::SessionExpired(SessionExpired::MissingRefreshToken)));

	bookings.assert_calls_async(1).await;
	refresh.assert_calls_async(0).await;
}

#[tokio::test]
async fn rejected_refresh_is_terminal_and_keeps_store() {
	let server = MockServer::start_async().await;
	let (client, store) = build_reqwest_test_client(&server.url("/auth/refresh"));

	seed_pair(&store, ACCESS_OLD, REFRESH_OLD).await;

	let bookings = server
		.mock_async(|when, then| {
			when.method(GET).path("/v1/bookings");
			then.status(401);
		})
		.await;
	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path("/auth/refresh");
			then.status(401).body("{\"message\":\"refresh token expired\"}");
		})
		.await;
	let err = client
		.send(bookings_request(&server))
		.await
		.expect_err("Refresh rejection should end the session.");

	assert!(matches!(
		err,
		Error::SessionExpired(SessionExpired::RefreshRejected { status: 401 })
	));
	assert!(err.is_session_expired());

	bookings.assert_calls_async(1).await;
	refresh.assert_calls_async(1).await;

	let stored = store
		.load()
		.await
		.expect("Token store load should succeed.")
		.expect("Failed refreshes must not clear the store.");

	assert_eq!(stored.access_token().expose(), ACCESS_OLD);
	assert_eq!(client.refresh_metrics.failures(), 1);
}

#[tokio::test]
async fn incomplete_refresh_payload_is_terminal() {
	let server = MockServer::start_async().await;
	let (client, store) = build_reqwest_test_client(&server.url("/auth/refresh"));

	seed_pair(&store, ACCESS_OLD, REFRESH_OLD).await;

	server
		.mock_async(|when, then| {
			when.method(GET).path("/v1/bookings");
			then.status(401);
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(POST).path("/auth/refresh");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"access_token\":\"access-new\"}");
		})
		.await;

	let err = client
		.send(bookings_request(&server))
		.await
		.expect_err("Incomplete refresh payloads should end the session.");

	assert!(matches!(
		err,
		Error::SessionExpired(SessionExpired::IncompleteRefreshResponse { field: "refresh_token" })
	));
}

#[tokio::test]
async fn other_error_statuses_pass_through_unchanged() {
	let server = MockServer::start_async().await;
	let (client, store) = build_reqwest_test_client(&server.url("/auth/refresh"));

	seed_pair(&store, ACCESS_OLD, REFRESH_OLD).await;

	server
		.mock_async(|when, then| {
			when.method(GET).path("/v1/bookings");
			then.status(403).body("{\"message\":\"forbidden\"}");
		})
		.await;

	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path("/auth/refresh");
			then.status(200);
		})
		.await;
	let response = client
		.send(bookings_request(&server))
		.await
		.expect("Non-401 statuses should be returned to the caller.");

	assert_eq!(response.status.as_u16(), 403);
	assert_eq!(response.text(), "{\"message\":\"forbidden\"}");

	refresh.assert_calls_async(0).await;
}

#[tokio::test]
async fn concurrent_unauthorized_requests_share_one_refresh() {
	let server = MockServer::start_async().await;
	let (client, store) = build_reqwest_test_client(&server.url("/auth/refresh"));

	seed_pair(&store, ACCESS_OLD, REFRESH_OLD).await;

	server
		.mock_async(|when, then| {
			when.method(GET).path("/v1/bookings").header("authorization", ACCESS_OLD);
			then.status(401);
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/v1/bookings").header("authorization", ACCESS_NEW);
			then.status(200).body("[]");
		})
		.await;

	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path("/auth/refresh").header("authorization", REFRESH_OLD);
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"access_token\":\"access-new\",\"refresh_token\":\"refresh-new\"}");
		})
		.await;
	let (first, second): (Result<_>, Result<_>) = tokio::join!(
		client.send(bookings_request(&server)),
		client.send(bookings_request(&server)),
	);

	assert!(first.expect("First concurrent request should succeed.").is_success());
	assert!(second.expect("Second concurrent request should succeed.").is_success());

	refresh.assert_calls_async(1).await;
}
