// self
use crate::_prelude::*;

/// Provider-specific quirks that influence how flows behave.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderQuirks {
	/// Indicates whether authorization requests must carry an S256 PKCE challenge.
	pub pkce_required: bool,
	/// String used to join scopes when constructing `scope` parameters.
	pub scope_separator: String,
}
impl Default for ProviderQuirks {
	fn default() -> Self {
		Self { pkce_required: false, scope_separator: " ".into() }
	}
}
