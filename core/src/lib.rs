//! Client binding for the NAS web API.
//!
//! # Overview
//! Authenticates with a session id, builds namespaced requests for declared
//! API methods and normalizes the vendor's JSON envelope (`success`,
//! `error.code`, `data`) into a single `Response` shape.
//!
//! # Design
//! - `Connection` owns the endpoint and an optional `Authentication`, builds
//!   URLs and per-request options, and delegates the round-trip to a
//!   `Transport` (`UreqTransport` by default).
//! - `Response` never fails on an application-level error: a 200 with
//!   `success: false` carries a resolved `error_message` instead.
//! - API families are declared with `api_module!`, which expands a static
//!   method table into named methods sharing one dispatch routine.
//! - Everything is blocking and stateless between calls.

pub mod api;
pub mod apis;
pub mod auth;
pub mod config;
pub mod connection;
pub mod error;
pub mod http;
pub mod messages;
pub mod response;
pub mod transport;
pub mod types;

#[cfg(test)]
mod testing;

pub use api::{ApiBase, ApiModule, MethodSpec, WEBAPI_PREFIX};
pub use auth::{Authentication, SidFormat};
pub use config::ConnectionConfig;
pub use connection::{Connection, Protocol, DEFAULT_PORT};
pub use error::ApiError;
pub use http::{HttpMethod, Params, RawResponse, RequestOptions, Transport};
pub use messages::format_error;
pub use response::Response;
pub use transport::UreqTransport;
