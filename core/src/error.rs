//! Error types for the NAS web API client.
//!
//! # Design
//! Only conditions a caller cannot inspect as a normal `Response` become
//! errors: invalid construction parameters, a method that needs a session on
//! a connection without one, transport failures, and a 200 body that is not a
//! JSON object. A 200 response carrying `success: false` is returned as a
//! `Response` with an error message, never as an `ApiError`.

use thiserror::Error;

/// Errors returned while configuring a connection or executing an API call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The protocol is neither `http` nor `https`.
    #[error("invalid protocol {0:?}, expected \"http\" or \"https\"")]
    InvalidProtocol(String),

    /// The port is not a non-zero integer.
    #[error("invalid port {0:?}, expected a non-zero integer")]
    InvalidPort(String),

    /// The session id format is neither `cookie` nor `sid`.
    #[error("invalid sid format {0:?}, expected \"cookie\" or \"sid\"")]
    InvalidSidFormat(String),

    /// Only GET and POST are supported by the web API.
    #[error("invalid http method {0:?}, expected GET or POST")]
    InvalidHttpMethod(String),

    /// The API version is not a non-zero integer.
    #[error("invalid api version {0:?}, expected a non-zero integer")]
    InvalidVersion(String),

    /// A method declared with `use_auth: true` was called on a connection
    /// holding no `Authentication`.
    #[error("method requires authentication but the connection has none")]
    MissingAuthentication,

    /// `ApiModule::call` was given a name absent from the module's table.
    #[error("unknown api method {0:?}")]
    UnknownMethod(String),

    /// A required configuration value was not provided.
    #[error("missing configuration value {0}")]
    MissingConfig(&'static str),

    /// The connection parameters or request path do not form a valid URL.
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The request never produced an HTTP response (DNS, refused connection, I/O).
    #[error("transport failed: {0}")]
    Transport(String),

    /// A 200 body was not a JSON object, or `data` did not match the requested type.
    #[error("malformed payload: {0}")]
    Payload(#[from] serde_json::Error),
}
