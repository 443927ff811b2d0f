// self
use crate::{
	_prelude::*,
	owner::{ResourceOwner, str_by_key, value_by_key},
};

const DATA_KEY: &str = "data";

/// RBTV user profile returned by `GET /v1/user/self`.
///
/// The provider nests the user inside a `data` object:
///
/// ```json
/// { "data": { "id": 42, "displayName": "Bob", "email": "b@x.com" } }
/// ```
///
/// All accessors read from `data` and degrade to `None` when it, or the requested key,
/// is missing. The wrapped response is never modified.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RbtvResourceOwner {
	response: Value,
}
impl RbtvResourceOwner {
	/// Wraps a decoded profile response.
	pub fn new(response: Value) -> Self {
		Self { response }
	}

	/// `data.id`, with numeric identifiers rendered as decimal text.
	pub fn id(&self) -> Option<String> {
		match self.attribute("id")? {
			Value::String(id) => Some(id.clone()),
			Value::Number(id) => Some(id.to_string()),
			_ => None,
		}
	}

	/// `data.displayName`.
	pub fn name(&self) -> Option<&str> {
		str_by_key(self.data()?, "displayName")
	}

	/// `data.email`.
	pub fn email(&self) -> Option<&str> {
		str_by_key(self.data()?, "email")
	}

	/// Looks up `key` inside `data`; dots descend into nested objects.
	pub fn attribute(&self, key: &str) -> Option<&Value> {
		value_by_key(self.data()?, key)
	}

	/// The complete original response, including keys outside `data`.
	pub fn to_value(&self) -> &Value {
		&self.response
	}

	/// Consumes the owner and returns the original response.
	pub fn into_value(self) -> Value {
		self.response
	}

	fn data(&self) -> Option<&Value> {
		self.response.get(DATA_KEY)
	}
}
impl ResourceOwner for RbtvResourceOwner {
	fn id(&self) -> Option<String> {
		RbtvResourceOwner::id(self)
	}

	fn to_value(&self) -> &Value {
		RbtvResourceOwner::to_value(self)
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;

	#[test]
	fn accessors_read_from_data() {
		let response = json!({ "data": { "id": "42", "displayName": "Bob", "email": "b@x.com" } });
		let owner = RbtvResourceOwner::new(response.clone());

		assert_eq!(owner.id().as_deref(), Some("42"));
		assert_eq!(owner.name(), Some("Bob"));
		assert_eq!(owner.email(), Some("b@x.com"));
		assert_eq!(owner.attribute("email"), Some(&json!("b@x.com")));
		assert_eq!(owner.attribute("missing.path"), None);
		assert_eq!(owner.to_value(), &response);
	}

	#[test]
	fn numeric_ids_are_rendered_as_text() {
		let owner = RbtvResourceOwner::new(json!({ "data": { "id": 1337 } }));

		assert_eq!(owner.id().as_deref(), Some("1337"));
		assert_eq!(ResourceOwner::id(&owner).as_deref(), Some("1337"));
	}

	#[test]
	fn missing_data_degrades_to_none() {
		let owner = RbtvResourceOwner::new(json!({ "success": true }));

		assert_eq!(owner.id(), None);
		assert_eq!(owner.name(), None);
		assert_eq!(owner.email(), None);
		assert_eq!(owner.attribute("id"), None);
		assert_eq!(owner.to_value(), &json!({ "success": true }));
	}

	#[test]
	fn attribute_resolves_dot_paths() {
		let owner = RbtvResourceOwner::new(json!({ "data": { "a": { "b": { "c": 7 } } } }));

		assert_eq!(owner.attribute("a.b.c"), Some(&json!(7)));

		let owner = RbtvResourceOwner::new(json!({ "data": { "a": { "b": {} } } }));

		assert_eq!(owner.attribute("a.b.c"), None);
	}

	#[test]
	fn to_value_keeps_keys_outside_data() {
		let response = json!({ "data": { "id": "1" }, "meta": { "version": 2 } });
		let owner = RbtvResourceOwner::new(response.clone());

		assert_eq!(owner.into_value(), response);
	}

	#[test]
	fn serializes_as_the_original_response() {
		let response = json!({ "data": { "id": "7", "displayName": "Eddy" } });
		let owner = RbtvResourceOwner::new(response.clone());

		assert_eq!(serde_json::to_value(&owner).expect("Owner should serialize."), response);
	}
}
