//! Access tokens issued by providers and their secret wrappers.

pub mod access;
pub mod secret;
