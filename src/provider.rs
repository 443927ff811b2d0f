//! Provider adapters: descriptors (data) and the [`OAuthProvider`] contract (behavior).
//!
//! `descriptor` holds validated metadata: HTTPS-only endpoints, default scopes, the
//! scope separator, client authentication preference, and the token-response key that
//! identifies the resource owner. `adapter` defines [`OAuthProvider`], the hook set the
//! flows call to build URLs, detect provider errors, and wrap profile responses.
//! `rbtv` is the Rocket Beans TV implementation.

pub mod adapter;
pub mod descriptor;
pub mod rbtv;

pub use adapter::*;
pub use descriptor::*;
pub use rbtv::*;
