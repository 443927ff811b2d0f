//! Authorization URL construction and state handling.

mod session;

pub use session::{AuthorizationSession, PkceCodeChallengeMethod};

// self
use crate::{
	auth::ScopeList,
	flows::ProviderClient,
	http::ProviderHttpClient,
	oauth::TransportErrorMapper,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	provider::OAuthProvider,
};

impl<P, C, M> ProviderClient<P, C, M>
where
	P: OAuthProvider,
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Starts an authorization-code handshake.
	///
	/// `None` requests the provider's default scopes. The session carries a random
	/// 32-character `state` and, when the descriptor requires it, an S256 PKCE pair.
	pub fn start_authorization(&self, scopes: Option<ScopeList>) -> AuthorizationSession {
		const KIND: FlowKind = FlowKind::Authorization;

		let _guard = FlowSpan::new(KIND, "start_authorization").entered();

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let scope = scopes.unwrap_or_else(|| self.provider.default_scopes().clone());
		let session = session::build_session(
			&*self.provider,
			&self.client_id,
			scope,
			self.redirect_uri.clone(),
		);

		obs::record_flow_outcome(KIND, FlowOutcome::Success);

		session
	}
}
