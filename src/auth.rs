//! Identifiers, scope lists, and access tokens shared by providers and flows.

pub mod id;
pub mod scope;
pub mod token;

pub use id::*;
pub use scope::*;
pub use token::{access::*, secret::*};
