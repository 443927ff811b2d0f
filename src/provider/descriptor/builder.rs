// self
use crate::{
	_prelude::*,
	auth::{IdentifierError, ProviderId, ScopeList, ScopeValidationError},
	provider::{ClientAuthMethod, ProviderDescriptor, ProviderEndpoints, ProviderQuirks},
};

/// Errors raised while constructing or validating descriptors.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ProviderDescriptorError {
	/// Descriptor identifier is invalid.
	#[error(transparent)]
	InvalidIdentifier(#[from] IdentifierError),
	/// Default scopes are invalid.
	#[error(transparent)]
	InvalidDefaultScopes(#[from] ScopeValidationError),
	/// Authorization endpoint is required.
	#[error("Missing authorization endpoint.")]
	MissingAuthorizationEndpoint,
	/// Token endpoint is required.
	#[error("Missing token endpoint.")]
	MissingTokenEndpoint,
	/// Resource owner details endpoint is required.
	#[error("Missing resource owner details endpoint.")]
	MissingResourceOwnerDetailsEndpoint,
	/// An endpoint literal could not be parsed.
	#[error("The {endpoint} endpoint is not a valid URL.")]
	InvalidEndpoint {
		/// Which endpoint failed to parse.
		endpoint: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Endpoints must use HTTPS.
	#[error("The {endpoint} endpoint must use HTTPS: {url}.")]
	InsecureEndpoint {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Endpoint URL that failed validation.
		url: String,
	},
	/// Scope separators must be non-empty and printable.
	#[error("Scope separator must be a non-empty printable string.")]
	InvalidScopeSeparator {
		/// Invalid separator that was supplied.
		separator: String,
	},
	/// The resource owner id key was set to an empty string.
	#[error("Resource owner id key cannot be empty.")]
	EmptyResourceOwnerIdKey,
}

/// Builder for [`ProviderDescriptor`] values.
#[derive(Debug)]
pub struct ProviderDescriptorBuilder {
	/// Identifier for the descriptor being constructed.
	pub id: ProviderId,
	/// Authorization endpoint.
	pub authorization_endpoint: Option<Url>,
	/// Token endpoint.
	pub token_endpoint: Option<Url>,
	/// Resource owner details (profile) endpoint.
	pub resource_owner_details_endpoint: Option<Url>,
	/// Scopes requested when callers do not choose any.
	pub default_scopes: ScopeList,
	/// Client authentication method for the token endpoint.
	pub client_auth_method: ClientAuthMethod,
	/// Token-response key carrying the resource owner identifier.
	pub resource_owner_id_key: Option<String>,
	/// Provider-specific quirks.
	pub quirks: ProviderQuirks,
}
impl ProviderDescriptorBuilder {
	/// Creates a new builder seeded with the provided identifier.
	pub fn new(id: ProviderId) -> Self {
		Self {
			id,
			authorization_endpoint: None,
			token_endpoint: None,
			resource_owner_details_endpoint: None,
			default_scopes: ScopeList::default(),
			client_auth_method: ClientAuthMethod::default(),
			resource_owner_id_key: None,
			quirks: ProviderQuirks::default(),
		}
	}

	/// Sets the authorization endpoint.
	pub fn authorization_endpoint(mut self, url: Url) -> Self {
		self.authorization_endpoint = Some(url);

		self
	}

	/// Sets the token endpoint.
	pub fn token_endpoint(mut self, url: Url) -> Self {
		self.token_endpoint = Some(url);

		self
	}

	/// Sets the resource owner details endpoint.
	pub fn resource_owner_details_endpoint(mut self, url: Url) -> Self {
		self.resource_owner_details_endpoint = Some(url);

		self
	}

	/// Sets the default scopes.
	pub fn default_scopes(mut self, scopes: ScopeList) -> Self {
		self.default_scopes = scopes;

		self
	}

	/// Overrides the client authentication method.
	pub fn client_auth_method(mut self, method: ClientAuthMethod) -> Self {
		self.client_auth_method = method;

		self
	}

	/// Declares the token-response key that identifies the resource owner.
	pub fn resource_owner_id_key(mut self, key: impl Into<String>) -> Self {
		self.resource_owner_id_key = Some(key.into());

		self
	}

	/// Overrides the scope separator.
	pub fn scope_separator(mut self, separator: impl Into<String>) -> Self {
		self.quirks.scope_separator = separator.into();

		self
	}

	/// Overrides the provider quirks.
	pub fn quirks(mut self, quirks: ProviderQuirks) -> Self {
		self.quirks = quirks;

		self
	}

	/// Consumes the builder and validates the resulting descriptor.
	pub fn build(self) -> Result<ProviderDescriptor, ProviderDescriptorError> {
		let authorization = self
			.authorization_endpoint
			.ok_or(ProviderDescriptorError::MissingAuthorizationEndpoint)?;
		let token = self.token_endpoint.ok_or(ProviderDescriptorError::MissingTokenEndpoint)?;
		let resource_owner_details = self
			.resource_owner_details_endpoint
			.ok_or(ProviderDescriptorError::MissingResourceOwnerDetailsEndpoint)?;
		let descriptor = ProviderDescriptor {
			id: self.id,
			endpoints: ProviderEndpoints { authorization, token, resource_owner_details },
			default_scopes: self.default_scopes,
			client_auth_method: self.client_auth_method,
			resource_owner_id_key: self.resource_owner_id_key,
			quirks: self.quirks,
		};

		descriptor.validate()?;

		Ok(descriptor)
	}
}

impl ProviderDescriptor {
	fn validate(&self) -> Result<(), ProviderDescriptorError> {
		validate_endpoint("authorization", &self.endpoints.authorization)?;
		validate_endpoint("token", &self.endpoints.token)?;
		validate_endpoint("resource owner details", &self.endpoints.resource_owner_details)?;
		validate_scope_separator(&self.quirks.scope_separator)?;

		if self.resource_owner_id_key.as_deref().is_some_and(str::is_empty) {
			return Err(ProviderDescriptorError::EmptyResourceOwnerIdKey);
		}

		Ok(())
	}
}

fn validate_endpoint(name: &'static str, url: &Url) -> Result<(), ProviderDescriptorError> {
	if url.scheme() != "https" {
		Err(ProviderDescriptorError::InsecureEndpoint { endpoint: name, url: url.to_string() })
	} else {
		Ok(())
	}
}

fn validate_scope_separator(separator: &str) -> Result<(), ProviderDescriptorError> {
	if separator.is_empty() || separator.chars().any(char::is_control) {
		Err(ProviderDescriptorError::InvalidScopeSeparator { separator: separator.to_owned() })
	} else {
		Ok(())
	}
}
