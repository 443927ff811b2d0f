// crates.io
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};
// self
use crate::{_prelude::*, auth::ScopeList, provider::OAuthProvider};

const STATE_LEN: usize = 32;
const PKCE_VERIFIER_LEN: usize = 64;

/// Supported PKCE challenge methods surfaced via [`AuthorizationSession`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PkceCodeChallengeMethod {
	/// SHA-256 based PKCE (RFC 7636 S256).
	S256,
}
impl PkceCodeChallengeMethod {
	/// Returns the RFC 7636 identifier for the challenge method.
	pub fn as_str(self) -> &'static str {
		match self {
			PkceCodeChallengeMethod::S256 => "S256",
		}
	}
}

/// Authorization-code handshake returned by
/// [`ProviderClient::start_authorization`](crate::flows::ProviderClient::start_authorization).
///
/// Keep the session until the redirect comes back, check the returned `state` with
/// [`validate_state`](Self::validate_state), then hand it to
/// [`ProviderClient::exchange_code`](crate::flows::ProviderClient::exchange_code).
#[derive(Clone)]
pub struct AuthorizationSession {
	/// Scopes placed in the authorization URL.
	pub scope: ScopeList,
	/// Opaque state value that must round-trip via the redirect handler.
	pub state: String,
	/// Redirect URI supplied when constructing the authorize URL, if any.
	pub redirect_uri: Option<Url>,
	/// Fully-formed authorize URL that callers should send end users to.
	pub authorize_url: Url,
	pkce: Option<PkcePair>,
}
impl AuthorizationSession {
	pub(super) fn new(
		scope: ScopeList,
		redirect_uri: Option<Url>,
		authorize_url: Url,
		state: String,
		pkce: Option<PkcePair>,
	) -> Self {
		Self { scope, state, redirect_uri, authorize_url, pkce }
	}

	/// PKCE code challenge, when the provider requires PKCE.
	pub fn code_challenge(&self) -> Option<&str> {
		self.pkce.as_ref().map(|pkce| pkce.challenge.as_str())
	}

	/// PKCE challenge method, when the provider requires PKCE.
	pub fn code_challenge_method(&self) -> Option<PkceCodeChallengeMethod> {
		self.pkce.as_ref().map(|pkce| pkce.method)
	}

	/// Validates the returned `state` parameter after the authorization redirect.
	pub fn validate_state(&self, returned_state: &str) -> Result<()> {
		if returned_state == self.state { Ok(()) } else { Err(Error::StateMismatch) }
	}

	pub(crate) fn pkce_verifier(&self) -> Option<&str> {
		self.pkce.as_ref().map(|pkce| pkce.verifier.as_str())
	}
}
impl Debug for AuthorizationSession {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AuthorizationSession")
			.field("scope", &self.scope)
			.field("state", &self.state)
			.field("redirect_uri", &self.redirect_uri)
			.field("authorize_url", &self.authorize_url)
			.field("code_challenge", &self.code_challenge())
			.field("code_challenge_method", &self.code_challenge_method())
			.finish()
	}
}

#[derive(Clone)]
pub(super) struct PkcePair {
	verifier: String,
	challenge: String,
	method: PkceCodeChallengeMethod,
}
impl PkcePair {
	pub(super) fn generate() -> Self {
		let verifier = random_string(PKCE_VERIFIER_LEN);
		let challenge = compute_pkce_challenge(&verifier);

		Self { verifier, challenge, method: PkceCodeChallengeMethod::S256 }
	}
}

pub(super) fn build_session<P>(
	provider: &P,
	client_id: &str,
	scope: ScopeList,
	redirect_uri: Option<Url>,
) -> AuthorizationSession
where
	P: ?Sized + OAuthProvider,
{
	let state = random_string(STATE_LEN);
	let pkce = provider.descriptor().quirks.pkce_required.then(PkcePair::generate);
	let authorize_url = build_authorize_url(
		provider,
		client_id,
		redirect_uri.as_ref(),
		&scope,
		&state,
		pkce.as_ref(),
	);

	AuthorizationSession::new(scope, redirect_uri, authorize_url, state, pkce)
}

fn build_authorize_url<P>(
	provider: &P,
	client_id: &str,
	redirect_uri: Option<&Url>,
	scope: &ScopeList,
	state: &str,
	pkce: Option<&PkcePair>,
) -> Url
where
	P: ?Sized + OAuthProvider,
{
	let mut url = provider.base_authorization_url().clone();
	let mut pairs = url.query_pairs_mut();

	pairs.append_pair("response_type", "code");
	pairs.append_pair("client_id", client_id);

	if let Some(redirect_uri) = redirect_uri {
		pairs.append_pair("redirect_uri", redirect_uri.as_str());
	}
	if let Some(scope_value) = scope.join(provider.scope_separator()) {
		pairs.append_pair("scope", &scope_value);
	}

	pairs.append_pair("state", state);

	if let Some(pkce) = pkce {
		pairs.append_pair("code_challenge", &pkce.challenge);
		pairs.append_pair("code_challenge_method", pkce.method.as_str());
	}

	drop(pairs);

	url
}

fn random_string(len: usize) -> String {
	rand::rng().sample_iter(Alphanumeric).take(len).map(char::from).collect()
}

fn compute_pkce_challenge(verifier: &str) -> String {
	let mut hasher = Sha256::new();

	hasher.update(verifier.as_bytes());

	URL_SAFE_NO_PAD.encode(hasher.finalize())
}
