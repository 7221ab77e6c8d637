//! Session credential and its wire encoding.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::ApiError;
use crate::http::Params;

/// How the session id travels with a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SidFormat {
    /// As a cookie named `id`.
    #[default]
    Cookie,
    /// As a request parameter named `_id`, next to the other query or form fields.
    Sid,
}

impl SidFormat {
    /// The parameter or cookie name the session id is sent under.
    pub fn key(&self) -> &'static str {
        match self {
            SidFormat::Cookie => "id",
            SidFormat::Sid => "_id",
        }
    }
}

impl FromStr for SidFormat {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cookie" => Ok(SidFormat::Cookie),
            "sid" => Ok(SidFormat::Sid),
            _ => Err(ApiError::InvalidSidFormat(s.to_string())),
        }
    }
}

/// An established session. Immutable once built.
#[derive(Clone, PartialEq, Eq)]
pub struct Authentication {
    sid: String,
    format: SidFormat,
}

impl Authentication {
    /// Build a credential, validating `format` (`"cookie"` or `"sid"`).
    pub fn new(sid: impl Into<String>, format: &str) -> Result<Self, ApiError> {
        Ok(Self::with_format(sid, format.parse()?))
    }

    pub fn with_format(sid: impl Into<String>, format: SidFormat) -> Self {
        Self {
            sid: sid.into(),
            format,
        }
    }

    pub fn sid(&self) -> &str {
        &self.sid
    }

    pub fn format(&self) -> SidFormat {
        self.format
    }

    /// `{id: sid}` for cookie sessions, `{_id: sid}` for parameter sessions.
    pub fn build_params(&self) -> Params {
        let mut params = Params::new();
        params.insert(self.format.key().to_string(), self.sid.clone());
        params
    }
}

// The sid is a bearer credential; keep it out of logs.
impl fmt::Debug for Authentication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Authentication")
            .field("sid", &"<redacted>")
            .field("format", &self.format)
            .finish()
    }
}
