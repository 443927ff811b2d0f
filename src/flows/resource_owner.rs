// crates.io
use oauth2::{
	AsyncHttpClient,
	http::{Method, Request, header::ACCEPT},
};
// self
use crate::{
	_prelude::*,
	auth::AccessToken,
	error::{ConfigError, TransientError},
	flows::ProviderClient,
	http::{ProviderHttpClient, ResponseMetadataSlot},
	oauth::{self, TransportErrorMapper},
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	provider::OAuthProvider,
};

impl<P, C, M> ProviderClient<P, C, M>
where
	P: OAuthProvider,
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Fetches the profile of the user that `token` belongs to.
	///
	/// Sends `GET` to the adapter's profile URL with its authorization headers, decodes
	/// the body as JSON regardless of the status code, runs
	/// [`check_response`](OAuthProvider::check_response), and wraps the body with
	/// [`create_resource_owner`](OAuthProvider::create_resource_owner).
	pub async fn fetch_resource_owner(&self, token: &AccessToken) -> Result<P::ResourceOwner> {
		const KIND: FlowKind = FlowKind::ResourceOwner;

		let span = FlowSpan::new(KIND, "fetch_resource_owner");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let url = self.provider.resource_owner_details_url(token);
				let mut builder = Request::builder()
					.method(Method::GET)
					.uri(url.as_str())
					.header(ACCEPT, "application/json");

				for (name, value) in self.provider.authorization_headers(token) {
					builder = builder.header(name, value);
				}

				let request = builder.body(Vec::new()).map_err(ConfigError::from)?;
				let meta = ResponseMetadataSlot::default();
				let handle = self.http_client.with_metadata(meta.clone());
				let response = handle.call(request).await.map_err(|err| {
					self.transport_mapper.map_transport_error(KIND, meta.take().as_ref(), err)
				})?;
				let meta = meta.take().unwrap_or_default();
				let body = serde_json::from_slice::<Value>(response.body()).map_err(|source| {
					TransientError::ResourceOwnerParse { source, status: meta.status }
				})?;

				oauth::check_provider_response(&*self.provider, &meta, &body)?;

				Ok(self.provider.create_resource_owner(body, token))
			})
			.await;

		match &result {
			Ok(_) => obs::record_flow_outcome(KIND, FlowOutcome::Success),
			Err(_) => obs::record_flow_outcome(KIND, FlowOutcome::Failure),
		}

		result
	}
}
