#![cfg(feature = "reqwest")]

mod common;

// crates.io
use httpmock::prelude::*;
// self
use oauth2_rbtv::{auth::AccessToken, error::Error, owner::ResourceOwner, serde_json::json};

fn token() -> AccessToken {
	AccessToken::builder()
		.access_token("access-profile")
		.build()
		.expect("Token fixture should build successfully.")
}

#[tokio::test]
async fn fetch_resource_owner_reads_profile() {
	let server = MockServer::start_async().await;
	let client = common::build_test_client(&server);
	let body = json!({
		"success": true,
		"data": { "id": 1337, "displayName": "Budi", "email": "budi@rocketbeans.tv" }
	});
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/v1/user/self")
				.header("authorization", "Bearer access-profile")
				.header("accept", "application/json");
			then.status(200).header("content-type", "application/json").json_body(body.clone());
		})
		.await;
	let owner = client
		.fetch_resource_owner(&token())
		.await
		.expect("Profile request should succeed.");

	mock.assert_async().await;

	assert_eq!(owner.id().as_deref(), Some("1337"));
	assert_eq!(owner.name(), Some("Budi"));
	assert_eq!(owner.email(), Some("budi@rocketbeans.tv"));
	assert_eq!(ResourceOwner::to_value(&owner), &body);
}

#[tokio::test]
async fn fetch_resource_owner_reports_error_bodies() {
	let server = MockServer::start_async().await;
	let client = common::build_test_client(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/v1/user/self");
			then.status(401).header("content-type", "application/json").json_body(json!({
				"error": "invalid_token",
				"error_description": "The access token expired"
			}));
		})
		.await;
	let err = client
		.fetch_resource_owner(&token())
		.await
		.expect_err("Expired token should be rejected.");

	mock.assert_async().await;

	match err {
		Error::IdentityProvider(err) => {
			assert_eq!(err.to_string(), "401 - The access token expired: invalid_token");
			assert_eq!(err.status, 401);
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}
}
