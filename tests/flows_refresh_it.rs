#![cfg(feature = "reqwest")]

mod common;

// crates.io
use httpmock::prelude::*;
// self
use oauth2_rbtv::error::Error;

#[tokio::test]
async fn refresh_rotates_tokens() {
	let server = MockServer::start_async().await;
	let client = common::build_test_client(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/v1/oauth2/token")
				.form_urlencoded_tuple("grant_type", "refresh_token")
				.form_urlencoded_tuple("refresh_token", "refresh-old");
			then.status(200)
				.header("content-type", "application/json")
				.body(
					"{\"access_token\":\"access-new\",\"refresh_token\":\"refresh-new\",\"token_type\":\"bearer\",\"expires_in\":1800,\"userId\":\"42\"}",
				);
		})
		.await;
	let token = client
		.refresh_access_token("refresh-old")
		.await
		.expect("Refresh token rotation should succeed.");

	mock.assert_async().await;

	assert_eq!(token.access_token.expose(), "access-new");
	assert_eq!(token.refresh_token.as_ref().map(|secret| secret.expose()), Some("refresh-new"));
	assert_eq!(token.resource_owner_id.as_deref(), Some("42"));
}

#[tokio::test]
async fn refresh_keeps_refresh_token_when_not_rotated() {
	let server = MockServer::start_async().await;
	let client = common::build_test_client(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/v1/oauth2/token");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"access_token\":\"access-new\",\"token_type\":\"bearer\"}");
		})
		.await;
	let token = client
		.refresh_access_token("refresh-kept")
		.await
		.expect("Refresh without rotation should succeed.");

	mock.assert_calls_async(1).await;

	assert_eq!(token.refresh_token.as_ref().map(|secret| secret.expose()), Some("refresh-kept"));
	assert_eq!(token.expires_at, None);
	assert_eq!(token.resource_owner_id, None);
}

#[tokio::test]
async fn refresh_invalid_grant_is_a_provider_error() {
	let server = MockServer::start_async().await;
	let client = common::build_test_client(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/v1/oauth2/token");
			then.status(400)
				.header("content-type", "application/json")
				.body("{\"error\":\"invalid_grant\",\"error_description\":\"refresh token revoked\"}");
		})
		.await;
	let err = client
		.refresh_access_token("refresh-revoked")
		.await
		.expect_err("Revoked refresh token should be rejected.");

	mock.assert_async().await;

	match err {
		Error::IdentityProvider(err) => {
			assert_eq!(err.message, "400 - refresh token revoked: invalid_grant");
			assert_eq!(err.response.status, Some(400));
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}
}
