//! Rocket Beans TV adapter.

// self
use crate::{
	_prelude::*,
	auth::{AccessToken, ProviderId, ScopeList},
	error::IdentityProviderError,
	http::ResponseMetadata,
	owner::RbtvResourceOwner,
	provider::{
		ClientAuthMethod, OAuthProvider, ProviderDescriptor, ProviderDescriptorError,
		ProviderEndpoints,
	},
};

/// Page the end user is sent to for authentication.
pub const AUTHORIZATION_ENDPOINT: &str = "https://rocketbeans.tv/oauth2/authorize";
/// Token endpoint for code exchanges and refreshes.
pub const TOKEN_ENDPOINT: &str = "https://api.rocketbeans.tv/v1/oauth2/token";
/// Profile endpoint of the authenticated user.
pub const RESOURCE_OWNER_DETAILS_ENDPOINT: &str = "https://api.rocketbeans.tv/v1/user/self";
/// Scopes requested when the caller does not choose any.
pub const DEFAULT_SCOPES: &[&str] = &["user.info"];
/// Separator placed between scopes in the authorization URL.
pub const SCOPE_SEPARATOR: &str = " ";
/// Token-response key carrying the resource owner identifier.
pub const ACCESS_TOKEN_RESOURCE_OWNER_ID: &str = "userId";

const PROVIDER_ID: &str = "rbtv";

/// Rocket Beans TV identity provider.
///
/// ```
/// use oauth2_rbtv::provider::{OAuthProvider, Rbtv};
///
/// let rbtv = Rbtv::new().expect("Production endpoints are valid.");
///
/// assert_eq!(rbtv.base_authorization_url().as_str(), "https://rocketbeans.tv/oauth2/authorize");
/// assert_eq!(rbtv.scope_separator(), " ");
/// ```
#[derive(Clone, Debug)]
pub struct Rbtv {
	descriptor: ProviderDescriptor,
}
impl Rbtv {
	/// Creates the adapter against the production RBTV endpoints.
	pub fn new() -> Result<Self, ProviderDescriptorError> {
		let endpoints = ProviderEndpoints {
			authorization: parse_endpoint("authorization", AUTHORIZATION_ENDPOINT)?,
			token: parse_endpoint("token", TOKEN_ENDPOINT)?,
			resource_owner_details: parse_endpoint(
				"resource owner details",
				RESOURCE_OWNER_DETAILS_ENDPOINT,
			)?,
		};

		Ok(Self::with_descriptor(Self::descriptor_for(endpoints)?))
	}

	/// Builds an RBTV descriptor that targets custom endpoints.
	///
	/// Scopes, separator, client authentication, and the resource owner id key keep their
	/// RBTV values. Useful for staging hosts and local mock servers.
	pub fn descriptor_for(
		endpoints: ProviderEndpoints,
	) -> Result<ProviderDescriptor, ProviderDescriptorError> {
		ProviderDescriptor::builder(ProviderId::new(PROVIDER_ID)?)
			.authorization_endpoint(endpoints.authorization)
			.token_endpoint(endpoints.token)
			.resource_owner_details_endpoint(endpoints.resource_owner_details)
			.default_scopes(ScopeList::new(DEFAULT_SCOPES.iter().copied())?)
			.client_auth_method(ClientAuthMethod::ClientSecretPost)
			.resource_owner_id_key(ACCESS_TOKEN_RESOURCE_OWNER_ID)
			.scope_separator(SCOPE_SEPARATOR)
			.build()
	}

	/// Wraps an already validated descriptor.
	pub fn with_descriptor(descriptor: ProviderDescriptor) -> Self {
		Self { descriptor }
	}
}
impl OAuthProvider for Rbtv {
	type ResourceOwner = RbtvResourceOwner;

	fn name(&self) -> &'static str {
		PROVIDER_ID
	}

	fn descriptor(&self) -> &ProviderDescriptor {
		&self.descriptor
	}

	fn base_authorization_url(&self) -> &Url {
		&self.descriptor.endpoints.authorization
	}

	fn base_access_token_url(&self, _: &BTreeMap<String, String>) -> &Url {
		&self.descriptor.endpoints.token
	}

	fn resource_owner_details_url(&self, _: &AccessToken) -> &Url {
		&self.descriptor.endpoints.resource_owner_details
	}

	fn default_scopes(&self) -> &ScopeList {
		&self.descriptor.default_scopes
	}

	fn scope_separator(&self) -> &str {
		&self.descriptor.quirks.scope_separator
	}

	fn check_response(
		&self,
		response: &ResponseMetadata,
		body: &Value,
	) -> Result<(), IdentityProviderError> {
		let Some(error) = body.get("error").filter(|error| !error.is_null()) else {
			return Ok(());
		};
		let status = response.status.unwrap_or_default();
		let description = body.get("error_description").map(render).unwrap_or_default();
		let mut message = format!("{status} - {description}: {}", render(error));

		if let Some(uri) = body.get("error_uri").map(render).filter(|uri| !uri.is_empty()) {
			message.push_str(&format!(" (see: {uri})"));
		}

		Err(IdentityProviderError::new(message, status, response.clone()))
	}

	fn create_resource_owner(&self, response: Value, _: &AccessToken) -> Self::ResourceOwner {
		RbtvResourceOwner::new(response)
	}
}

fn parse_endpoint(endpoint: &'static str, raw: &str) -> Result<Url, ProviderDescriptorError> {
	Url::parse(raw).map_err(|source| ProviderDescriptorError::InvalidEndpoint { endpoint, source })
}

// Strings render bare, null renders empty, anything else renders as JSON text.
fn render(value: &Value) -> String {
	match value {
		Value::String(text) => text.clone(),
		Value::Null => String::new(),
		other => other.to_string(),
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;

	fn rbtv() -> Rbtv {
		Rbtv::new().expect("Production descriptor should build.")
	}

	fn meta(status: u16) -> ResponseMetadata {
		ResponseMetadata { status: Some(status), retry_after: None }
	}

	fn token() -> AccessToken {
		AccessToken::builder().access_token("t").build().expect("Token fixture should build.")
	}

	#[test]
	fn endpoints_and_defaults_match_production() {
		let rbtv = rbtv();

		assert_eq!(rbtv.name(), "rbtv");
		assert_eq!(rbtv.base_authorization_url().as_str(), AUTHORIZATION_ENDPOINT);
		assert_eq!(rbtv.base_access_token_url(&BTreeMap::new()).as_str(), TOKEN_ENDPOINT);
		assert_eq!(
			rbtv.base_access_token_url(&BTreeMap::from([(
				"grant_type".to_owned(),
				"refresh_token".to_owned()
			)]))
			.as_str(),
			TOKEN_ENDPOINT
		);
		assert_eq!(
			rbtv.resource_owner_details_url(&token()).as_str(),
			RESOURCE_OWNER_DETAILS_ENDPOINT
		);
		assert_eq!(rbtv.default_scopes().as_slice(), ["user.info".to_owned()]);
		assert_eq!(rbtv.scope_separator(), " ");
		assert_eq!(rbtv.resource_owner_id_key(), Some("userId"));
		assert_eq!(rbtv.descriptor().client_auth_method, ClientAuthMethod::ClientSecretPost);
	}

	#[test]
	fn accepts_bodies_without_error_key() {
		let rbtv = rbtv();

		assert!(rbtv.check_response(&meta(200), &json!({ "access_token": "t" })).is_ok());
		assert!(rbtv.check_response(&meta(500), &json!({})).is_ok());
		assert!(rbtv.check_response(&meta(200), &json!({ "error": null })).is_ok());
		assert!(rbtv.check_response(&meta(200), &json!(["error"])).is_ok());
	}

	#[test]
	fn composes_message_with_error_uri() {
		let err = rbtv()
			.check_response(
				&meta(400),
				&json!({
					"error": "invalid_grant",
					"error_description": "bad code",
					"error_uri": "http://x"
				}),
			)
			.expect_err("Error body must be rejected.");

		assert_eq!(err.message, "400 - bad code: invalid_grant (see: http://x)");
		assert_eq!(err.status, 400);
		assert_eq!(err.response, meta(400));
	}

	#[test]
	fn composes_message_without_error_uri() {
		let err = rbtv()
			.check_response(
				&meta(401),
				&json!({ "error": "invalid_token", "error_description": "token expired" }),
			)
			.expect_err("Error body must be rejected.");

		assert_eq!(err.message, "401 - token expired: invalid_token");

		let err = rbtv()
			.check_response(
				&meta(401),
				&json!({ "error": "invalid_token", "error_description": "x", "error_uri": "" }),
			)
			.expect_err("Error body must be rejected.");

		assert_eq!(err.message, "401 - x: invalid_token");
	}

	#[test]
	fn missing_description_and_status_degrade() {
		let err = rbtv()
			.check_response(&ResponseMetadata::default(), &json!({ "error": 17 }))
			.expect_err("Error body must be rejected.");

		assert_eq!(err.message, "0 - : 17");
		assert_eq!(err.status, 0);
	}

	#[test]
	fn resource_owner_wraps_response() {
		let response = json!({ "data": { "id": 42, "displayName": "Bob" } });
		let owner = rbtv().create_resource_owner(response.clone(), &token());

		assert_eq!(owner.id().as_deref(), Some("42"));
		assert_eq!(owner.name(), Some("Bob"));
		assert_eq!(owner.to_value(), &response);
	}

	#[test]
	fn custom_endpoints_keep_rbtv_defaults() {
		let url = |raw: &str| Url::parse(raw).expect("Fixture URL should parse.");
		let descriptor = Rbtv::descriptor_for(ProviderEndpoints {
			authorization: url("https://localhost:8443/oauth2/authorize"),
			token: url("https://localhost:8443/v1/oauth2/token"),
			resource_owner_details: url("https://localhost:8443/v1/user/self"),
		})
		.expect("Custom descriptor should build.");
		let rbtv = Rbtv::with_descriptor(descriptor);

		assert_eq!(rbtv.base_authorization_url().port(), Some(8443));
		assert_eq!(rbtv.resource_owner_id_key(), Some(ACCESS_TOKEN_RESOURCE_OWNER_ID));
		assert!(rbtv.default_scopes().contains("user.info"));
	}
}
