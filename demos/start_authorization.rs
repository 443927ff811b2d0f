//! Launches an RBTV authorization-code session and validates the returned state the way
//! a redirect handler would.

// std
use std::collections::HashMap;
// crates.io
use color_eyre::Result;
use url::Url;
// self
use oauth2_rbtv::{auth::ScopeList, flows::ReqwestProviderClient, provider::Rbtv};

fn main() -> Result<()> {
	color_eyre::install()?;

	let client = ReqwestProviderClient::new(Rbtv::new()?, "demo-client")
		.with_client_secret("demo-secret")
		.with_redirect_uri(Url::parse("https://app.example.com/oauth/callback")?);
	let session = client.start_authorization(Some(ScopeList::new(["user.info"])?));

	println!("Send your user to {}.", &session.authorize_url);

	let mut sessions: HashMap<String, _> = HashMap::new();

	sessions.insert(session.state.clone(), session.clone());

	// Simulate the redirect handler looking up the stored session by `state`.
	let returned_state = session.state.clone();

	if let Some(stashed) = sessions.remove(&returned_state) {
		stashed.validate_state(&returned_state)?;
		println!("Validated state for scopes `{}`.", &stashed.scope);
		println!("Keep this session to call ProviderClient::exchange_code during the callback.");
	} else {
		eprintln!("State `{returned_state}` was not recognized.");
	}

	Ok(())
}
