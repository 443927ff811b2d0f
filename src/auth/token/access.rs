//! Access token issued by a provider's token endpoint, plus its builder.

// self
use crate::{
	_prelude::*,
	auth::{ScopeList, token::secret::TokenSecret},
};

/// Lifecycle status for an access token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenStatus {
	/// Token is not yet valid because the issued-at instant is in the future.
	Pending,
	/// Token is currently valid (or the provider did not announce an expiry).
	Active,
	/// Token exceeded its expiry instant.
	Expired,
}

/// Errors produced by [`AccessTokenBuilder`].
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum AccessTokenBuilderError {
	/// Issued when no access token value was provided.
	#[error("Access token is required.")]
	MissingAccessToken,
}

/// Tokens returned by a successful authorization-code or refresh exchange.
#[derive(Clone, Serialize, Deserialize)]
pub struct AccessToken {
	/// Access token secret; presented as a bearer credential.
	pub access_token: TokenSecret,
	/// Refresh token secret, if the provider issued one.
	pub refresh_token: Option<TokenSecret>,
	/// Token type announced by the provider (usually `bearer`).
	pub token_type: Option<String>,
	/// Scopes granted by the provider, or the requested scopes when none were echoed.
	pub scope: ScopeList,
	/// Resource owner identifier carried in the token response, if any.
	pub resource_owner_id: Option<String>,
	/// Remaining non-standard fields of the token response.
	pub values: BTreeMap<String, Value>,
	/// Instant the token was received.
	pub issued_at: OffsetDateTime,
	/// Expiry instant derived from `expires_in`, when the provider sent one.
	pub expires_at: Option<OffsetDateTime>,
}
impl AccessToken {
	/// Returns a builder for constructing tokens.
	pub fn builder() -> AccessTokenBuilder {
		AccessTokenBuilder::default()
	}

	/// Computes the lifecycle status at a given instant.
	pub fn status_at(&self, instant: OffsetDateTime) -> TokenStatus {
		if instant < self.issued_at {
			return TokenStatus::Pending;
		}

		match self.expires_at {
			Some(expires_at) if instant >= expires_at => TokenStatus::Expired,
			_ => TokenStatus::Active,
		}
	}

	/// Returns `true` if the token is expired relative to the current clock.
	pub fn is_expired(&self) -> bool {
		matches!(self.status_at(OffsetDateTime::now_utc()), TokenStatus::Expired)
	}
}
impl Debug for AccessToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AccessToken")
			.field("access_token", &"<redacted>")
			.field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
			.field("token_type", &self.token_type)
			.field("scope", &self.scope)
			.field("resource_owner_id", &self.resource_owner_id)
			.field("issued_at", &self.issued_at)
			.field("expires_at", &self.expires_at)
			.finish()
	}
}

/// Builder for [`AccessToken`].
#[derive(Clone, Debug, Default)]
pub struct AccessTokenBuilder {
	access_token: Option<TokenSecret>,
	refresh_token: Option<TokenSecret>,
	token_type: Option<String>,
	scope: ScopeList,
	resource_owner_id: Option<String>,
	values: BTreeMap<String, Value>,
	issued_at: Option<OffsetDateTime>,
	expires_at: Option<OffsetDateTime>,
	expires_in: Option<Duration>,
}
impl AccessTokenBuilder {
	/// Provides the access token value.
	pub fn access_token(mut self, token: impl Into<String>) -> Self {
		self.access_token = Some(TokenSecret::new(token));

		self
	}

	/// Provides the refresh token value.
	pub fn refresh_token(mut self, token: impl Into<String>) -> Self {
		self.refresh_token = Some(TokenSecret::new(token));

		self
	}

	/// Sets the token type.
	pub fn token_type(mut self, token_type: impl Into<String>) -> Self {
		self.token_type = Some(token_type.into());

		self
	}

	/// Sets the granted scopes.
	pub fn scope(mut self, scope: ScopeList) -> Self {
		self.scope = scope;

		self
	}

	/// Sets the resource owner identifier.
	pub fn resource_owner_id(mut self, id: impl Into<String>) -> Self {
		self.resource_owner_id = Some(id.into());

		self
	}

	/// Sets the additional raw fields.
	pub fn values(mut self, values: BTreeMap<String, Value>) -> Self {
		self.values = values;

		self
	}

	/// Sets the issued-at instant.
	pub fn issued_at(mut self, instant: OffsetDateTime) -> Self {
		self.issued_at = Some(instant);

		self
	}

	/// Sets an absolute expiry instant.
	pub fn expires_at(mut self, instant: OffsetDateTime) -> Self {
		self.expires_at = Some(instant);

		self
	}

	/// Sets a relative expiry duration from the issued instant.
	pub fn expires_in(mut self, duration: Duration) -> Self {
		self.expires_in = Some(duration);

		self
	}

	/// Consumes the builder and produces an [`AccessToken`].
	pub fn build(self) -> Result<AccessToken, AccessTokenBuilderError> {
		let access_token =
			self.access_token.ok_or(AccessTokenBuilderError::MissingAccessToken)?;
		let issued_at = self.issued_at.unwrap_or_else(OffsetDateTime::now_utc);
		let expires_at = self.expires_at.or_else(|| self.expires_in.map(|delta| issued_at + delta));

		Ok(AccessToken {
			access_token,
			refresh_token: self.refresh_token,
			token_type: self.token_type,
			scope: self.scope,
			resource_owner_id: self.resource_owner_id,
			values: self.values,
			issued_at,
			expires_at,
		})
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;

	#[test]
	fn status_follows_issue_and_expiry() {
		let token = AccessToken::builder()
			.access_token("access")
			.issued_at(macros::datetime!(2025-01-01 00:00 UTC))
			.expires_in(Duration::hours(1))
			.build()
			.expect("Token builder should succeed.");

		assert_eq!(token.expires_at, Some(macros::datetime!(2025-01-01 01:00 UTC)));
		assert_eq!(token.status_at(macros::datetime!(2024-12-31 23:59 UTC)), TokenStatus::Pending);
		assert_eq!(token.status_at(macros::datetime!(2025-01-01 00:30 UTC)), TokenStatus::Active);
		assert_eq!(token.status_at(macros::datetime!(2025-01-01 01:00 UTC)), TokenStatus::Expired);
		assert!(token.is_expired());
	}

	#[test]
	fn tokens_without_expiry_stay_active() {
		let token = AccessToken::builder()
			.access_token("access")
			.build()
			.expect("Token builder should succeed without expiry.");

		assert_eq!(token.expires_at, None);
		assert!(!token.is_expired());
	}

	#[test]
	fn builder_requires_access_token() {
		let err = AccessToken::builder()
			.refresh_token("refresh")
			.build()
			.expect_err("Missing access token must be rejected.");

		assert_eq!(err, AccessTokenBuilderError::MissingAccessToken);
	}

	#[test]
	fn debug_redacts_secrets() {
		let token = AccessToken::builder()
			.access_token("access-secret")
			.refresh_token("refresh-secret")
			.resource_owner_id("42")
			.build()
			.expect("Token builder should succeed.");
		let rendered = format!("{token:?}");

		assert!(!rendered.contains("access-secret"));
		assert!(!rendered.contains("refresh-secret"));
		assert!(rendered.contains("42"));
	}
}
