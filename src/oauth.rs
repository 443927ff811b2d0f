//! Internal OAuth client facade around the `oauth2` crate.
//!
//! The facade builds an `oauth2` client from an [`OAuthProvider`], performs token endpoint
//! requests through a [`ProviderHttpClient`] handle, and converts responses into
//! [`AccessToken`] values. Every token response body, successful or not, is routed through
//! [`OAuthProvider::check_response`], so the adapter stays the single place that decides
//! what a provider error looks like.

pub use oauth2;

// crates.io
use oauth2::{
	AsyncHttpClient, AuthType, AuthUrl, AuthorizationCode, Client, ClientId, ClientSecret,
	EndpointNotSet, EndpointSet, ExtraTokenFields, HttpClientError, HttpRequest, HttpResponse,
	PkceCodeVerifier, RedirectUrl, RefreshToken, RequestTokenError, StandardRevocableToken,
	StandardTokenResponse, TokenResponse, TokenUrl,
	basic::{
		BasicErrorResponse, BasicRevocationErrorResponse, BasicTokenIntrospectionResponse,
		BasicTokenType,
	},
};
// self
use crate::{
	_prelude::*,
	auth::{AccessToken, ScopeList},
	error::{ConfigError, TransientError, TransportError},
	http::{ProviderHttpClient, ResponseMetadata, ResponseMetadataSlot},
	obs::{self, FlowKind},
	provider::{ClientAuthMethod, OAuthProvider},
};

/// Token response carrying every non-standard field the provider sent.
pub type ProviderTokenResponse = StandardTokenResponse<ProviderTokenFields, BasicTokenType>;

type ConfiguredClient = Client<
	BasicErrorResponse,
	ProviderTokenResponse,
	BasicTokenIntrospectionResponse,
	StandardRevocableToken,
	BasicRevocationErrorResponse,
	EndpointSet,
	EndpointNotSet,
	EndpointNotSet,
	EndpointNotSet,
	EndpointSet,
>;
type TokenRequestError<E> = RequestTokenError<HttpClientError<E>, BasicErrorResponse>;

/// Extra token response fields, such as the RBTV `userId`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderTokenFields {
	/// Fields outside the standard OAuth 2.0 token response.
	#[serde(flatten)]
	pub values: BTreeMap<String, Value>,
}
impl ExtraTokenFields for ProviderTokenFields {}

/// Maps HTTP transport failures into crate [`Error`] values.
pub trait TransportErrorMapper<E>
where
	Self: 'static + Send + Sync,
	E: 'static + Send + Sync + StdError,
{
	/// Converts an [`HttpClientError`] emitted by the transport into a crate error.
	fn map_transport_error(
		&self,
		kind: FlowKind,
		metadata: Option<&ResponseMetadata>,
		error: HttpClientError<E>,
	) -> Error;
}

/// Default mapper for reqwest-backed transports.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransportErrorMapper;
#[cfg(feature = "reqwest")]
impl TransportErrorMapper<ReqwestError> for ReqwestTransportErrorMapper {
	fn map_transport_error(
		&self,
		kind: FlowKind,
		meta: Option<&ResponseMetadata>,
		err: HttpClientError<ReqwestError>,
	) -> Error {
		match err {
			HttpClientError::Reqwest(inner) => map_reqwest_error(kind, meta, *inner),
			HttpClientError::Http(inner) => ConfigError::from(inner).into(),
			HttpClientError::Io(inner) => TransportError::Io(inner).into(),
			HttpClientError::Other(message) => upstream_error(meta, message),
			_ => upstream_error(meta, format!("HTTP client failed during {kind}")),
		}
	}
}

/// Token endpoint client for a single provider request.
pub(crate) struct TokenFacade<'a, P, C, M>
where
	P: ?Sized + OAuthProvider,
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	provider: &'a P,
	oauth_client: ConfiguredClient,
	http_client: &'a C,
	error_mapper: &'a M,
}
impl<'a, P, C, M> TokenFacade<'a, P, C, M>
where
	P: ?Sized + OAuthProvider,
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Builds an `oauth2` client against the token URL the provider picks for `params`.
	pub(crate) fn new(
		provider: &'a P,
		params: &BTreeMap<String, String>,
		credentials: ClientCredentials<'_>,
		http_client: &'a C,
		error_mapper: &'a M,
	) -> Result<Self> {
		let auth_url = AuthUrl::new(provider.base_authorization_url().to_string())
			.map_err(|source| ConfigError::InvalidDescriptor { source })?;
		let token_url = TokenUrl::new(provider.base_access_token_url(params).to_string())
			.map_err(|source| ConfigError::InvalidDescriptor { source })?;
		let mut oauth_client = Client::new(ClientId::new(credentials.client_id.to_owned()))
			.set_auth_uri(auth_url)
			.set_token_uri(token_url);

		if let Some(secret) = credentials.client_secret {
			oauth_client = oauth_client.set_client_secret(ClientSecret::new(secret.to_owned()));
		}
		if let Some(redirect) = credentials.redirect_uri {
			let redirect_url = RedirectUrl::new(redirect.to_string())
				.map_err(|source| ConfigError::InvalidRedirect { source })?;

			oauth_client = oauth_client.set_redirect_uri(redirect_url);
		}

		if matches!(provider.descriptor().client_auth_method, ClientAuthMethod::ClientSecretPost) {
			oauth_client = oauth_client.set_auth_type(AuthType::RequestBody);
		}

		Ok(Self { provider, oauth_client, http_client, error_mapper })
	}

	/// Performs `grant_type=authorization_code`.
	pub(crate) async fn exchange_code(
		&self,
		code: &str,
		pkce_verifier: Option<&str>,
		requested_scope: &ScopeList,
	) -> Result<AccessToken> {
		let meta = ResponseMetadataSlot::default();
		let handle = BodyCapture::new(self.http_client.with_metadata(meta.clone()));
		let mut request = self.oauth_client.exchange_code(AuthorizationCode::new(code.to_owned()));

		if let Some(verifier) = pkce_verifier {
			request = request.set_pkce_verifier(PkceCodeVerifier::new(verifier.to_owned()));
		}

		let response = request.request_async(&handle).await.map_err(|err| {
			self.map_request_error(FlowKind::CodeExchange, meta.take(), handle.take_body(), err)
		})?;

		self.check_token_response(meta.take(), &response)?;

		map_token_response(self.provider, response, requested_scope, None)
	}

	/// Performs `grant_type=refresh_token`, keeping `refresh_token` when the provider
	/// does not rotate it.
	pub(crate) async fn refresh_token(&self, refresh_token: &str) -> Result<AccessToken> {
		let meta = ResponseMetadataSlot::default();
		let handle = BodyCapture::new(self.http_client.with_metadata(meta.clone()));
		let refresh_secret = RefreshToken::new(refresh_token.to_owned());
		let response = self
			.oauth_client
			.exchange_refresh_token(&refresh_secret)
			.request_async(&handle)
			.await
			.map_err(|err| {
				self.map_request_error(FlowKind::Refresh, meta.take(), handle.take_body(), err)
			})?;

		self.check_token_response(meta.take(), &response)?;

		map_token_response(self.provider, response, &ScopeList::default(), Some(refresh_token))
	}

	// Successful responses may still carry an error body, e.g. `200` with `error` set.
	fn check_token_response(
		&self,
		meta: Option<ResponseMetadata>,
		response: &ProviderTokenResponse,
	) -> Result<()> {
		let body = serde_json::to_value(response).unwrap_or_default();

		check_provider_response(self.provider, &meta.unwrap_or_default(), &body)
	}

	fn map_request_error(
		&self,
		kind: FlowKind,
		meta: Option<ResponseMetadata>,
		body: Option<Vec<u8>>,
		err: TokenRequestError<C::TransportError>,
	) -> Error {
		match err {
			RequestTokenError::ServerResponse(response) => {
				let meta = meta.unwrap_or_default();
				let body = serde_json::to_value(&response).unwrap_or_default();

				if let Err(err) = check_provider_response(self.provider, &meta, &body) {
					return err;
				}

				upstream_error(
					Some(&meta),
					format!("token endpoint answered with {}", response.error().as_ref()),
				)
			},
			RequestTokenError::Parse(source, body) => {
				let meta = meta.unwrap_or_default();
				// Bodies that are not JSON at all stay parse failures.
				let decoded = serde_json::from_slice::<Value>(&body).unwrap_or_default();

				if let Err(err) = check_provider_response(self.provider, &meta, &decoded) {
					return err;
				}

				TransientError::TokenResponseParse { source, status: meta.status }.into()
			},
			RequestTokenError::Request(error) =>
				self.error_mapper.map_transport_error(kind, meta.as_ref(), error),
			RequestTokenError::Other(message) => {
				// Wrong content type or empty body; the payload may still be a JSON error.
				let meta = meta.unwrap_or_default();
				let decoded = body
					.and_then(|body| serde_json::from_slice::<Value>(&body).ok())
					.unwrap_or_default();

				if let Err(err) = check_provider_response(self.provider, &meta, &decoded) {
					return err;
				}

				upstream_error(Some(&meta), message)
			},
		}
	}
}

/// Token endpoint handle that keeps the last response body for error detection.
///
/// `oauth2` drops the body when it rejects a response before decoding it, for example on
/// a non-JSON content type.
struct BodyCapture<H> {
	inner: H,
	body: Mutex<Option<Vec<u8>>>,
}
impl<H> BodyCapture<H> {
	fn new(inner: H) -> Self {
		Self { inner, body: Mutex::new(None) }
	}

	fn take_body(&self) -> Option<Vec<u8>> {
		self.body.lock().take()
	}
}
impl<'c, H> AsyncHttpClient<'c> for BodyCapture<H>
where
	H: 'c + Sync + for<'a> AsyncHttpClient<'a, Future: Send>,
{
	type Error = <H as AsyncHttpClient<'c>>::Error;
	type Future = Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'c + Send>>;

	fn call(&'c self, request: HttpRequest) -> Self::Future {
		Box::pin(async move {
			let response = self.inner.call(request).await?;

			*self.body.lock() = Some(response.body().clone());

			Ok(response)
		})
	}
}

/// Client credentials shared by every token endpoint request.
#[derive(Clone, Copy)]
pub(crate) struct ClientCredentials<'a> {
	pub(crate) client_id: &'a str,
	pub(crate) client_secret: Option<&'a str>,
	pub(crate) redirect_uri: Option<&'a Url>,
}

/// Runs the adapter's error detection on a decoded body and logs rejected responses.
pub(crate) fn check_provider_response<P>(
	provider: &P,
	meta: &ResponseMetadata,
	body: &Value,
) -> Result<()>
where
	P: ?Sized + OAuthProvider,
{
	provider.check_response(meta, body).map_err(|err| {
		obs::record_provider_error(provider.name(), &err);

		err.into()
	})
}

fn map_token_response<P>(
	provider: &P,
	response: ProviderTokenResponse,
	requested_scope: &ScopeList,
	previous_refresh: Option<&str>,
) -> Result<AccessToken>
where
	P: ?Sized + OAuthProvider,
{
	let scope = match response.scopes() {
		Some(scopes) => ScopeList::new(scopes.iter().map(|scope| scope.as_str()))
			.map_err(ConfigError::from)?,
		None => requested_scope.clone(),
	};
	let values = response.extra_fields().values.clone();
	let mut builder = AccessToken::builder()
		.access_token(response.access_token().secret().to_owned())
		.token_type(response.token_type().as_ref())
		.scope(scope)
		.issued_at(OffsetDateTime::now_utc());

	if let Some(expires_in) = response.expires_in() {
		let secs =
			i64::try_from(expires_in.as_secs()).map_err(|_| ConfigError::ExpiresInOutOfRange)?;

		builder = builder.expires_in(Duration::seconds(secs));
	}
	match (response.refresh_token(), previous_refresh) {
		(Some(refresh), _) => builder = builder.refresh_token(refresh.secret().to_owned()),
		(None, Some(previous)) => builder = builder.refresh_token(previous),
		(None, None) => {},
	}
	if let Some(id) =
		provider.resource_owner_id_key().and_then(|key| values.get(key)).and_then(render_id)
	{
		builder = builder.resource_owner_id(id);
	}

	builder.values(values).build().map_err(|err| ConfigError::from(err).into())
}

fn render_id(value: &Value) -> Option<String> {
	match value {
		Value::String(id) => Some(id.clone()),
		Value::Number(id) => Some(id.to_string()),
		_ => None,
	}
}

#[cfg(feature = "reqwest")]
fn map_reqwest_error(kind: FlowKind, meta: Option<&ResponseMetadata>, err: ReqwestError) -> Error {
	if err.is_builder() {
		return ConfigError::from(err).into();
	}
	if err.is_timeout() {
		return TransientError::Upstream {
			message: format!("request timed out during {kind}"),
			status: meta_status(meta).or_else(|| err.status().map(|code| code.as_u16())),
			retry_after: meta.and_then(|value| value.retry_after),
		}
		.into();
	}

	TransportError::from(err).into()
}

fn upstream_error(meta: Option<&ResponseMetadata>, message: impl Display) -> Error {
	TransientError::Upstream {
		message: message.to_string(),
		status: meta_status(meta),
		retry_after: meta.and_then(|value| value.retry_after),
	}
	.into()
}

fn meta_status(meta: Option<&ResponseMetadata>) -> Option<u16> {
	meta.and_then(|value| value.status)
}
