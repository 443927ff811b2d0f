//! Exchanges an authorization code and prints the RBTV profile of the signed-in user.
//!
//! Usage: `cargo run --example fetch_profile -- <client-id> <client-secret> <redirect-uri>
//! <expected-state> <returned-state> <code>` where `expected-state` is the `state` printed when
//! the authorization started, and `returned-state` and `code` are the query parameters RBTV
//! appended to the redirect.

// std
use std::env;
// crates.io
use color_eyre::{Result, eyre::eyre};
use url::Url;
// self
use oauth2_rbtv::{flows::ReqwestProviderClient, provider::Rbtv};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let mut args = env::args().skip(1);
	let mut next = |name: &str| args.next().ok_or_else(|| eyre!("Missing `{name}` argument."));
	let client_id = next("client-id")?;
	let client_secret = next("client-secret")?;
	let redirect_uri = Url::parse(&next("redirect-uri")?)?;
	let expected_state = next("expected-state")?;
	let returned_state = next("returned-state")?;
	let code = next("code")?;
	let client = ReqwestProviderClient::new(Rbtv::new()?, client_id)
		.with_client_secret(client_secret)
		.with_redirect_uri(redirect_uri);
	// A real handler restores the session saved by `start_authorization`; this one only
	// restores its `state`.
	let mut session = client.start_authorization(None);

	session.state = expected_state;
	session.validate_state(&returned_state)?;

	let token = client.exchange_code(&session, &code).await?;

	println!("Received token for user {:?}: {token:?}.", token.resource_owner_id);

	let owner = client.fetch_resource_owner(&token).await?;

	println!("Id: {:?}.", owner.id());
	println!("Name: {:?}.", owner.name());
	println!("Email: {:?}.", owner.email());

	Ok(())
}
