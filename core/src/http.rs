//! HTTP transport types and the transport capability.
//!
//! # Design
//! The connection never talks to the network itself. It builds a URL and a
//! set of `RequestOptions`, then hands them to a `Transport`, which returns
//! the raw status, URL and body as a `RawResponse`. The default transport is
//! `UreqTransport`; tests substitute a recording fake.
//!
//! Parameters are plain string pairs kept in a `BTreeMap` so requests are
//! built deterministically.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::ApiError;

/// Query, form or cookie parameters.
pub type Params = BTreeMap<String, String>;

/// Build a `Params` map from `key => value` pairs. Values may be anything
/// implementing `ToString`.
///
/// ```
/// let params = synapi_core::params! { "account" => "admin", "offset" => 0 };
/// assert_eq!(params["offset"], "0");
/// ```
#[macro_export]
macro_rules! params {
    () => { $crate::Params::new() };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut params = $crate::Params::new();
        $( params.insert(($key).to_string(), ($value).to_string()); )+
        params
    }};
}

/// HTTP method accepted by the web API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl FromStr for HttpMethod {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "get" => Ok(HttpMethod::Get),
            "post" => Ok(HttpMethod::Post),
            _ => Err(ApiError::InvalidHttpMethod(s.to_string())),
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-request options built by `Connection::build_request_options`.
///
/// Exactly one of `query` (GET) or `data` (POST) is set. `cookies` is only
/// set when a cookie-format session is attached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    pub query: Option<Params>,
    pub data: Option<Params>,
    pub cookies: Option<Params>,
}

/// An HTTP response described as plain data, as returned by a `Transport`.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status_code: u16,
    /// The URL that was requested, including any encoded query string.
    pub url: String,
    pub content: Vec<u8>,
}

/// Blocking HTTP capability used by `Connection::send`.
///
/// Implementations must return non-2xx statuses as a `RawResponse`, and
/// reserve `Err` for requests that never produced a response.
pub trait Transport: Send + Sync {
    fn get(&self, url: &str, query: &Params, cookies: Option<&Params>) -> Result<RawResponse, ApiError>;

    fn post(&self, url: &str, data: &Params, cookies: Option<&Params>) -> Result<RawResponse, ApiError>;
}
