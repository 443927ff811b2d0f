//! Crate-level error types shared by the provider adapter, transports, and flows.

// self
use crate::{_prelude::*, http::ResponseMetadata};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// The identity provider answered with an OAuth error body.
	#[error(transparent)]
	IdentityProvider(#[from] IdentityProviderError),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Temporary upstream failure or malformed upstream payload.
	#[error(transparent)]
	Transient(#[from] TransientError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// The `state` returned to the redirect handler does not match the session.
	#[error("Authorization state mismatch.")]
	StateMismatch,
}

/// Failure signalled by the provider through an `error` key in a response body.
///
/// Raised by [`OAuthProvider::check_response`](crate::provider::OAuthProvider::check_response)
/// for both token endpoint and resource-owner responses. The message is already composed
/// as `"<status> - <error_description>: <error>"`, optionally suffixed with
/// `" (see: <error_uri>)"`.
#[derive(Clone, Debug, ThisError)]
#[error("{message}")]
pub struct IdentityProviderError {
	/// Human-readable message composed from the error body.
	pub message: String,
	/// HTTP status code of the failing response (`0` when unknown).
	pub status: u16,
	/// Metadata of the failing response, kept for caller inspection.
	pub response: ResponseMetadata,
}
impl IdentityProviderError {
	/// Creates a new provider error.
	pub fn new(message: impl Into<String>, status: u16, response: ResponseMetadata) -> Self {
		Self { message: message.into(), status, response }
	}
}

/// Configuration and validation failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
	/// Provider descriptor contains a URL the OAuth client rejects.
	#[error("Descriptor contains an invalid URL.")]
	InvalidDescriptor {
		/// Underlying parsing failure.
		#[source]
		source: oauth2::url::ParseError,
	},
	/// Redirect URI cannot be parsed.
	#[error("Redirect URI is invalid.")]
	InvalidRedirect {
		/// Underlying parsing failure.
		#[source]
		source: oauth2::url::ParseError,
	},

	/// Requested or returned scopes cannot be normalized.
	#[error("Scopes are invalid.")]
	InvalidScope(#[from] crate::auth::ScopeValidationError),
	/// Access token builder validation failed.
	#[error("Unable to build access token.")]
	TokenBuild(#[from] crate::auth::AccessTokenBuilderError),
	/// Token endpoint returned an excessively large `expires_in`.
	#[error("The expires_in value exceeds the supported range.")]
	ExpiresInOutOfRange,
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Temporary or payload-level upstream failures.
#[derive(Debug, ThisError)]
pub enum TransientError {
	/// Provider request failed without an error body the adapter recognizes.
	#[error("Upstream request failed: {message}.")]
	Upstream {
		/// Message summarizing the failure.
		message: String,
		/// HTTP status code, when available.
		status: Option<u16>,
		/// Retry-After hint from upstream, if supplied.
		retry_after: Option<Duration>,
	},
	/// Token endpoint responded with JSON that is not a token response.
	#[error("Token endpoint returned malformed JSON.")]
	TokenResponseParse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
	/// Resource owner endpoint responded with a body that is not JSON.
	#[error("Resource owner endpoint returned malformed JSON.")]
	ResourceOwnerParse {
		/// Decoding failure.
		#[source]
		source: serde_json::Error,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the provider.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the provider.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn identity_provider_error_displays_composed_message() {
		let meta = ResponseMetadata { status: Some(401), retry_after: None };
		let err: Error =
			IdentityProviderError::new("401 - token expired: invalid_token", 401, meta).into();

		assert_eq!(err.to_string(), "401 - token expired: invalid_token");
		assert!(matches!(err, Error::IdentityProvider(IdentityProviderError { status: 401, .. })));
	}
}
