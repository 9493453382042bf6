use serde::de::IgnoredAny;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::errors::APIError;
use crate::responses::JSONWrapper;

/// Drops the kind prefix of a fullname, e.g. `t3_4te6jf` becomes `4te6jf`. Fullnames shorter
/// than a prefix give an empty id.
pub fn strip_kind_prefix(fullname: &str) -> &str {
    fullname.get(3..).unwrap_or("")
}

/// Returns a copy of `record` where the value of `old_key` is stored under `new_key` instead.
/// A missing `old_key` removes `new_key`, and renaming a key to itself removes it.
///
/// ```
/// use rawr_graph::util::rename_key;
/// use serde_json::json;
/// let record = json!({"x": 1, "y": 2});
/// let renamed = rename_key(record.as_object(), "x", "z");
/// assert_eq!(renamed.map(serde_json::Value::Object), Some(json!({"y": 2, "z": 1})));
/// assert_eq!(rename_key(None, "x", "z"), None);
/// ```
pub fn rename_key(record: Option<&Map<String, Value>>,
                  old_key: &str,
                  new_key: &str)
                  -> Option<Map<String, Value>> {
    record.map(|record| {
        let mut renamed = record.clone();
        match record.get(old_key) {
            Some(value) => renamed.insert(new_key.to_owned(), value.clone()),
            None => renamed.remove(new_key),
        };
        renamed.remove(old_key);
        renamed
    })
}

/// Builds a response check for `api_type=json` endpoints: it yields `return_value` when the
/// response reports no errors, and the first reported error otherwise.
///
/// ```
/// use rawr_graph::util::handle_json_errors;
/// use serde_json::json;
/// assert_eq!(handle_json_errors(42)(&json!({"json": {"errors": []}})).ok(), Some(42));
/// let err = handle_json_errors(42)(&json!({"json": {"errors": ["bad"]}})).unwrap_err();
/// assert_eq!(err.to_string(), "bad");
/// ```
pub fn handle_json_errors<T>(return_value: T) -> impl FnOnce(&Value) -> Result<T, APIError> {
    move |response: &Value| {
        if is_empty_response(response) {
            return Ok(return_value);
        }
        let errors = JSONWrapper::<IgnoredAny>::deserialize(response)
            .map(|wrapper| wrapper.json.errors)
            .unwrap_or_default();
        match errors.first() {
            None => Ok(return_value),
            Some(error) => Err(APIError::RedditError(error_message(error))),
        }
    }
}

/// Reddit reports errors as `[CODE, message, field]` triples; those are joined with commas.
fn error_message(error: &Value) -> String {
    match *error {
        Value::String(ref message) => message.to_owned(),
        Value::Array(ref parts) => {
            parts.iter()
                .map(|part| match *part {
                    Value::String(ref s) => s.to_owned(),
                    Value::Null => String::new(),
                    ref other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(",")
        }
        ref other => other.to_string(),
    }
}

/// Only non-empty objects, arrays and strings count as a response body.
pub(crate) fn is_empty_response(response: &Value) -> bool {
    match *response {
        Value::Object(ref map) => map.is_empty(),
        Value::Array(ref items) => items.is_empty(),
        Value::String(ref s) => s.is_empty(),
        _ => true,
    }
}
