//! Flow orchestrators that drive a provider adapter through the `oauth2` crate.

pub mod authorization;

mod exchange;
mod refresh;
mod resource_owner;

pub use authorization::*;

// self
use crate::{
	_prelude::*,
	http::ProviderHttpClient,
	oauth::{ClientCredentials, TransportErrorMapper},
	provider::OAuthProvider,
};
#[cfg(feature = "reqwest")]
use crate::{http::ReqwestHttpClient, oauth::ReqwestTransportErrorMapper};

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport stack.
pub type ReqwestProviderClient<P> =
	ProviderClient<P, ReqwestHttpClient, ReqwestTransportErrorMapper>;

/// Runs authorization-code flows against a single provider adapter.
///
/// The client owns the adapter, the HTTP transport, and the OAuth client credentials so
/// individual flows only deal with grant-specific logic. Every token endpoint and
/// profile response passes through the adapter's
/// [`check_response`](OAuthProvider::check_response) before it is used.
#[derive(Clone)]
pub struct ProviderClient<P, C, M>
where
	P: OAuthProvider,
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Provider adapter supplying endpoints, scopes, and error detection.
	pub provider: Arc<P>,
	/// HTTP client wrapper used for every outbound provider request.
	pub http_client: Arc<C>,
	/// Mapper applied to transport-layer errors before surfacing them to callers.
	pub transport_mapper: Arc<M>,
	/// OAuth 2.0 client identifier.
	pub client_id: String,
	/// Client secret sent to the token endpoint.
	pub client_secret: Option<String>,
	/// Redirect URI registered with the provider.
	pub redirect_uri: Option<Url>,
}
impl<P, C, M> ProviderClient<P, C, M>
where
	P: OAuthProvider,
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Creates a client that reuses the caller-provided transport + mapper pair.
	pub fn with_http_client(
		provider: impl Into<Arc<P>>,
		client_id: impl Into<String>,
		http_client: impl Into<Arc<C>>,
		mapper: impl Into<Arc<M>>,
	) -> Self {
		Self {
			provider: provider.into(),
			http_client: http_client.into(),
			transport_mapper: mapper.into(),
			client_id: client_id.into(),
			client_secret: None,
			redirect_uri: None,
		}
	}

	/// Sets or replaces the client secret.
	pub fn with_client_secret(mut self, secret: impl Into<String>) -> Self {
		self.client_secret = Some(secret.into());

		self
	}

	/// Sets or replaces the redirect URI sent with authorization and token requests.
	pub fn with_redirect_uri(mut self, redirect_uri: Url) -> Self {
		self.redirect_uri = Some(redirect_uri);

		self
	}

	fn credentials(&self) -> ClientCredentials<'_> {
		ClientCredentials {
			client_id: &self.client_id,
			client_secret: self.client_secret.as_deref(),
			redirect_uri: self.redirect_uri.as_ref(),
		}
	}
}
#[cfg(feature = "reqwest")]
impl<P> ProviderClient<P, ReqwestHttpClient, ReqwestTransportErrorMapper>
where
	P: OAuthProvider,
{
	/// Creates a new client for the provided adapter and client identifier.
	///
	/// The client provisions its own reqwest-backed transport. Use
	/// [`ProviderClient::with_client_secret`] and [`ProviderClient::with_redirect_uri`] to
	/// complete the registration details.
	pub fn new(provider: impl Into<Arc<P>>, client_id: impl Into<String>) -> Self {
		Self::with_http_client(
			provider,
			client_id,
			ReqwestHttpClient::default(),
			ReqwestTransportErrorMapper,
		)
	}
}
impl<P, C, M> Debug for ProviderClient<P, C, M>
where
	P: OAuthProvider,
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ProviderClient")
			.field("provider", &self.provider.name())
			.field("client_id", &self.client_id)
			.field("client_secret_set", &self.client_secret.is_some())
			.field("redirect_uri", &self.redirect_uri)
			.finish()
	}
}
