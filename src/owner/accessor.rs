// self
use crate::_prelude::*;

/// Resolves `key` against `data`, treating `.` as a path separator.
///
/// Keys without a dot are looked up directly. Otherwise every segment indexes one level
/// deeper into nested objects; a missing segment or a non-object intermediate yields
/// `None`. Empty keys and JSON `null` leaves are reported as absent.
pub fn value_by_key<'a>(data: &'a Value, key: &str) -> Option<&'a Value> {
	if key.is_empty() {
		return None;
	}

	let mut current = data;

	for segment in key.split('.') {
		current = current.as_object()?.get(segment)?;
	}

	(!current.is_null()).then_some(current)
}

/// Like [`value_by_key`], but only yields string leaves.
pub fn str_by_key<'a>(data: &'a Value, key: &str) -> Option<&'a str> {
	value_by_key(data, key).and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;

	#[test]
	fn resolves_nested_paths() {
		let data = json!({ "a": { "b": { "c": 7 } }, "email": "b@x.com" });

		assert_eq!(value_by_key(&data, "a.b.c"), Some(&json!(7)));
		assert_eq!(value_by_key(&data, "a.b"), Some(&json!({ "c": 7 })));
		assert_eq!(str_by_key(&data, "email"), Some("b@x.com"));
	}

	#[test]
	fn missing_segments_and_scalars_stop_traversal() {
		let data = json!({ "a": { "b": {} }, "n": 1, "list": [{ "x": 1 }] });

		assert_eq!(value_by_key(&data, "a.b.c"), None);
		assert_eq!(value_by_key(&data, "missing.path"), None);
		assert_eq!(value_by_key(&data, "n.inner"), None);
		assert_eq!(value_by_key(&data, "list.0.x"), None);
		assert_eq!(str_by_key(&data, "n"), None);
	}

	#[test]
	fn empty_keys_null_leaves_and_non_objects_are_absent() {
		let data = json!({ "gone": null, "": 1 });

		assert_eq!(value_by_key(&data, ""), None);
		assert_eq!(value_by_key(&data, "gone"), None);
		assert_eq!(value_by_key(&json!("scalar"), "id"), None);
		assert_eq!(value_by_key(&Value::Null, "id"), None);
	}
}
