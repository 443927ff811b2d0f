// self
use crate::{
	_prelude::*,
	auth::AccessToken,
	flows::ProviderClient,
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
	/// Exchanges a refresh token for a new access token.
	///
	/// The returned token keeps `refresh_token` when the provider does not rotate it.
	pub async fn refresh_access_token(&self, refresh_token: &str) -> Result<AccessToken> {
		const KIND: FlowKind = FlowKind::Refresh;

		let span = FlowSpan::new(KIND, "refresh_access_token");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let params = BTreeMap::from([
					("grant_type".to_owned(), "refresh_token".to_owned()),
					("refresh_token".to_owned(), refresh_token.to_owned()),
				]);
				let facade = <TokenFacade<P, C, M>>::new(
					&*self.provider,
					&params,
					self.credentials(),
					&*self.http_client,
					&*self.transport_mapper,
				)?;

				facade.refresh_token(refresh_token).await
			})
			.await;

		match &result {
			Ok(_) => obs::record_flow_outcome(KIND, FlowOutcome::Success),
			Err(_) => obs::record_flow_outcome(KIND, FlowOutcome::Failure),
		}

		result
	}
}
