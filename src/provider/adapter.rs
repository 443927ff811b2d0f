//! Provider adapter contract consumed by the flows.
//!
//! An adapter supplies the provider-specific pieces of an authorization-code flow
//! (endpoint URLs, default scopes, scope separator, error detection, resource-owner
//! construction) while the flows and the `oauth2` crate perform the HTTP work. Hooks are
//! synchronous, side-effect free, and use crate-owned types so adapters never depend on
//! a particular HTTP client.

// self
use crate::{
	_prelude::*,
	auth::{AccessToken, ScopeList},
	error::IdentityProviderError,
	http::ResponseMetadata,
	owner::ResourceOwner,
	provider::ProviderDescriptor,
};

/// Hook set describing one OAuth 2.0 identity provider.
pub trait OAuthProvider: Send + Sync {
	/// Resource owner type built from profile responses.
	type ResourceOwner: ResourceOwner;

	/// Human-readable provider name.
	fn name(&self) -> &'static str;

	/// Validated descriptor backing the adapter.
	fn descriptor(&self) -> &ProviderDescriptor;

	/// Endpoint the end user is sent to for authentication.
	fn base_authorization_url(&self) -> &Url;

	/// Token endpoint for the given form parameters.
	fn base_access_token_url(&self, params: &BTreeMap<String, String>) -> &Url;

	/// Profile endpoint for the given token; the token travels in headers, never in the URL.
	fn resource_owner_details_url(&self, token: &AccessToken) -> &Url;

	/// Scopes requested when the caller does not choose any.
	fn default_scopes(&self) -> &ScopeList;

	/// Separator used to join multiple scopes.
	fn scope_separator(&self) -> &str;

	/// Token-response key that identifies the resource owner, if any.
	fn resource_owner_id_key(&self) -> Option<&str> {
		self.descriptor().resource_owner_id_key.as_deref()
	}

	/// Headers that authorize a resource request with `token`.
	///
	/// Defaults to `Authorization: Bearer <access token>`.
	fn authorization_headers(&self, token: &AccessToken) -> Vec<(&'static str, String)> {
		vec![("Authorization", format!("Bearer {}", token.access_token.expose()))]
	}

	/// Inspects a decoded response body and fails when it describes a provider error.
	///
	/// Called for every token endpoint and profile response before the body is used.
	fn check_response(
		&self,
		response: &ResponseMetadata,
		body: &Value,
	) -> Result<(), IdentityProviderError>;

	/// Wraps a decoded profile response.
	fn create_resource_owner(&self, response: Value, token: &AccessToken) -> Self::ResourceOwner;
}
