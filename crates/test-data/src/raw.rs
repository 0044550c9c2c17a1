//! Loosely-typed payloads for negative scenarios.
//!
//! A [`RawPayload`] is sent as-is. Nothing here validates field names or
//! types, which is the point: the suite uses it to drop fields, blank them or
//! swap in values of the wrong type.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::GenerationError;

/// Arbitrary JSON request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RawPayload(Value);

impl RawPayload {
    /// Wraps an arbitrary JSON value.
    #[must_use]
    pub const fn new(value: Value) -> Self {
        Self(value)
    }

    /// An empty JSON object.
    #[must_use]
    pub fn empty_object() -> Self {
        Self(Value::Object(Map::new()))
    }

    /// Converts a typed payload into its raw JSON form.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Serialisation`] if the payload cannot be
    /// represented as JSON.
    pub fn from_payload<P: Serialize>(payload: &P) -> Result<Self, GenerationError> {
        serde_json::to_value(payload)
            .map(Self)
            .map_err(|err| GenerationError::Serialisation {
                payload: std::any::type_name::<P>(),
                message: err.to_string(),
            })
    }

    /// Removes a field. Non-object payloads are returned unchanged.
    #[must_use]
    pub fn without(mut self, key: &str) -> Self {
        if let Value::Object(map) = &mut self.0 {
            map.remove(key);
        }
        self
    }

    /// Sets a field to an arbitrary value, adding it if absent.
    #[must_use]
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        if let Value::Object(map) = &mut self.0 {
            map.insert(key.to_owned(), value.into());
        }
        self
    }

    /// Sets a field to the empty string.
    #[must_use]
    pub fn with_empty(self, key: &str) -> Self {
        self.with(key, "")
    }

    /// Sets every existing field to the empty string.
    #[must_use]
    pub fn with_all_empty(mut self) -> Self {
        if let Value::Object(map) = &mut self.0 {
            for value in map.values_mut() {
                *value = Value::String(String::new());
            }
        }
        self
    }

    /// Borrows the underlying JSON.
    #[must_use]
    pub const fn as_value(&self) -> &Value {
        &self.0
    }

    /// Consumes the payload, returning the underlying JSON.
    #[must_use]
    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for RawPayload {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};
    use serde_json::json;

    use super::*;
    use crate::payloads::LoginUser;

    #[fixture]
    fn login() -> RawPayload {
        RawPayload::from_payload(&LoginUser::new("a@b.cd", "Secret123")).expect("serialisable")
    }

    #[rstest]
    fn without_removes_field(login: RawPayload) {
        assert_eq!(login.without("email").into_value(), json!({"password": "Secret123"}));
    }

    #[rstest]
    fn with_empty_blanks_field(login: RawPayload) {
        assert_eq!(
            login.with_empty("password").into_value(),
            json!({"email": "a@b.cd", "password": ""})
        );
    }

    #[rstest]
    fn with_all_empty_blanks_every_field(login: RawPayload) {
        assert_eq!(
            login.with_all_empty().into_value(),
            json!({"email": "", "password": ""})
        );
    }

    #[rstest]
    fn with_replaces_type(login: RawPayload) {
        assert_eq!(
            login.with("email", 42).into_value(),
            json!({"email": 42, "password": "Secret123"})
        );
    }

    #[test]
    fn non_object_payloads_are_left_alone() {
        let payload = RawPayload::new(json!([1, 2])).without("x").with("y", 1);
        assert_eq!(payload.into_value(), json!([1, 2]));
    }

    #[test]
    fn serialises_transparently() {
        let payload = RawPayload::new(Value::Null);
        assert_eq!(serde_json::to_string(&payload).expect("serialisable"), "null");
    }
}
