//! Action result payloads
//!
//! The remote service reports asynchronous action results as loosely shaped
//! JSON objects. The distinction between a `result` key that is present but
//! null and one that is absent is meaningful to polling clients, so the
//! payload is kept as a raw JSON map rather than a struct with an `Option`.

use serde_json::{Map, Value};

/// Type discriminator the remote service places on file-shaped results
pub const FILE_TYPE: &str = "io.murano.File";

/// An asynchronous action result payload
#[derive(Debug, Clone, PartialEq)]
pub struct ActionResult(Map<String, Value>);

impl ActionResult {
    /// Wrap a JSON object. Non-object values and empty objects both mean
    /// the action has not produced a result yet.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) if !map.is_empty() => Some(Self(map)),
            _ => None,
        }
    }

    /// Whether the action finished with an exception
    pub fn is_exception(&self) -> bool {
        self.0
            .get("isException")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Whether the `result` key is present and non-null
    pub fn has_delivered_result(&self) -> bool {
        matches!(self.0.get("result"), Some(v) if !v.is_null())
    }

    /// Remove the heavy `result` payload, leaving metadata only
    pub fn strip_result(&mut self) {
        self.0.remove("result");
    }

    /// The inner result document, null when absent
    pub fn inner_result(&self) -> Value {
        self.0.get("result").cloned().unwrap_or(Value::Null)
    }

    /// Whether the inner result is a file descriptor. Missing or malformed
    /// nested keys mean "not a file", never an error.
    pub fn is_file_returned(&self) -> bool {
        self.0
            .get("result")
            .and_then(|r| r.get("?"))
            .and_then(|meta| meta.get("type"))
            .and_then(Value::as_str)
            .map(|t| t == FILE_TYPE)
            .unwrap_or(false)
    }

    /// Consume the payload as a JSON value for serialization
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    /// Borrow the underlying map
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_file_discriminator_tolerates_malformed_shapes() {
        for value in [
            json!({"result": null}),
            json!({"result": {"?": "not-an-object"}}),
            json!({"result": {"?": {"type": 42}}}),
            json!({"result": [1, 2, 3]}),
        ] {
            let result = ActionResult::from_value(value).unwrap();
            assert!(!result.is_file_returned());
        }
    }

    #[test]
    fn test_missing_results_have_no_payload() {
        assert!(ActionResult::from_value(Value::Null).is_none());
        assert!(ActionResult::from_value(json!({})).is_none());
        assert!(ActionResult::from_value(json!("done")).is_none());
    }

    #[test]
    fn test_file_discriminator_matches() {
        let result = ActionResult::from_value(json!({
            "result": {"?": {"type": "io.murano.File"}, "base64Content": "aGk="}
        }))
        .unwrap();
        assert!(result.is_file_returned());
    }

    #[test]
    fn test_null_result_is_present_but_not_delivered() {
        let result = ActionResult::from_value(json!({"result": null})).unwrap();
        assert!(!result.has_delivered_result());
        assert!(result.as_map().contains_key("result"));
    }
}
