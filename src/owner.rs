//! Resource owners built from decoded profile responses.
//!
//! [`value_by_key`] is the shared dot-path accessor; provider-specific owners such as
//! [`RbtvResourceOwner`] compose it instead of reimplementing lookups.

mod accessor;
mod rbtv;

pub use accessor::*;
pub use rbtv::*;

// self
use crate::_prelude::*;

/// Authenticated end user as described by a provider's profile endpoint.
pub trait ResourceOwner: Send + Sync {
	/// Provider-assigned identifier of the owner.
	fn id(&self) -> Option<String>;

	/// The complete decoded response the owner was built from.
	fn to_value(&self) -> &Value;
}
