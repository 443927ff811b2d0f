// self
use crate::{
	_prelude::*,
	auth::AccessToken,
	flows::{AuthorizationSession, ProviderClient},
	http::ProviderHttpClient,
	oauth::{TokenFacade, TransportErrorMapper},
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	provider::OAuthProvider,
};

impl<P, C, M> ProviderClient<P, C, M>
where
	P: OAuthProvider,
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Exchanges the authorization `code` returned to the redirect handler.
	///
	/// Validate the returned `state` with [`AuthorizationSession::validate_state`] first.
	/// When the provider's response carries an `error` key the adapter turns it into
	/// [`Error::IdentityProvider`].
	pub async fn exchange_code(
		&self,
		session: &AuthorizationSession,
		code: &str,
	) -> Result<AccessToken> {
		const KIND: FlowKind = FlowKind::CodeExchange;

		let span = FlowSpan::new(KIND, "exchange_code");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let params = BTreeMap::from([
					("grant_type".to_owned(), "authorization_code".to_owned()),
					("code".to_owned(), code.to_owned()),
				]);
				let facade = <TokenFacade<P, C, M>>::new(
					&*self.provider,
					&params,
					self.credentials(),
					&*self.http_client,
					&*self.transport_mapper,
				)?;

				facade.exchange_code(code, session.pkce_verifier(), &session.scope).await
			})
			.await;

		match &result {
			Ok(_) => obs::record_flow_outcome(KIND, FlowOutcome::Success),
			Err(_) => obs::record_flow_outcome(KIND, FlowOutcome::Failure),
		}

		result
	}
}
