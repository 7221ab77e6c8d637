//! Normalized view of a web API response.
//!
//! # Design
//! Every call yields one `Response`, whatever the outcome:
//! - non-200: `payload` is empty and no decode is attempted, so HTML error
//!   pages never reach the JSON parser;
//! - 200 with `success: true`: the envelope is exposed as-is;
//! - 200 otherwise: `error_message` is filled in by the connection.
//!
//! A 200 body that is not a JSON object breaks the vendor contract and is
//! reported as `ApiError::Payload` instead.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::ApiError;
use crate::http::RawResponse;

/// The outcome of one request/response cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    status_code: u16,
    url: String,
    payload: Map<String, Value>,
    error_message: Option<String>,
}

impl Response {
    /// Decode a raw transport result. The body is only parsed on status 200.
    pub fn from_raw(raw: RawResponse) -> Result<Self, ApiError> {
        let payload = if raw.status_code == 200 {
            serde_json::from_slice(&raw.content)?
        } else {
            Map::new()
        };
        Ok(Self {
            status_code: raw.status_code,
            url: raw.url,
            payload,
            error_message: None,
        })
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn payload(&self) -> &Map<String, Value> {
        &self.payload
    }

    /// Human-readable message for an application-level failure.
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub(crate) fn set_error_message(&mut self, message: String) {
        self.error_message = Some(message);
    }

    /// True only when `success` is the JSON boolean `true`.
    pub fn is_success(&self) -> bool {
        matches!(self.payload.get("success"), Some(Value::Bool(true)))
    }

    /// `error.code`, when `error` is present and non-empty.
    pub fn error_code(&self) -> Option<i64> {
        let error = self.payload.get("error").filter(|e| is_truthy(e))?;
        error.get("code")?.as_i64()
    }

    pub fn data(&self) -> Option<&Value> {
        self.payload.get("data")
    }

    /// Deserialize `data` into `T`. `Ok(None)` when the envelope has no `data`.
    pub fn data_as<T: DeserializeOwned>(&self) -> Result<Option<T>, ApiError> {
        match self.data() {
            Some(data) => Ok(Some(T::deserialize(data)?)),
            None => Ok(None),
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
