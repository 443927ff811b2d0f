//! Helpers shared by the integration tests.

#![allow(dead_code)]

// crates.io
use httpmock::MockServer;
// self
use oauth2_rbtv::{
	flows::ReqwestProviderClient,
	http::ReqwestHttpClient,
	oauth::ReqwestTransportErrorMapper,
	provider::{ProviderEndpoints, Rbtv},
	reqwest::Client as ReqwestClient,
	url::Url,
};

pub const CLIENT_ID: &str = "client-it";
pub const CLIENT_SECRET: &str = "secret-it";
pub const REDIRECT_URI: &str = "https://app.example.com/callback";

/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
/// `httpmock` during tests.
pub fn test_reqwest_http_client() -> ReqwestHttpClient {
	let client = ReqwestClient::builder()
		.danger_accept_invalid_certs(true)
		.danger_accept_invalid_hostnames(true)
		.build()
		.expect("Failed to build insecure Reqwest client for tests.");

	ReqwestHttpClient::with_client(client)
}

/// RBTV adapter whose endpoints point at `server`.
pub fn mock_rbtv(server: &MockServer) -> Rbtv {
	let url = |path: &str| {
		Url::parse(&server.url(path)).expect("Mock endpoint should parse successfully.")
	};
	let descriptor = Rbtv::descriptor_for(ProviderEndpoints {
		authorization: url("/oauth2/authorize"),
		token: url("/v1/oauth2/token"),
		resource_owner_details: url("/v1/user/self"),
	})
	.expect("Mock RBTV descriptor should build successfully.");

	Rbtv::with_descriptor(descriptor)
}

/// Client for the mock RBTV server using the test transport and registration details.
pub fn build_test_client(server: &MockServer) -> ReqwestProviderClient<Rbtv> {
	ReqwestProviderClient::with_http_client(
		mock_rbtv(server),
		CLIENT_ID,
		test_reqwest_http_client(),
		ReqwestTransportErrorMapper,
	)
	.with_client_secret(CLIENT_SECRET)
	.with_redirect_uri(Url::parse(REDIRECT_URI).expect("Redirect URI should parse successfully."))
}
