//! Network endpoint, URL building and request dispatch.
//!
//! # Design
//! `Connection` holds the endpoint, an optional session and a shared
//! `Transport`. It carries no mutable state, so one instance can be cloned
//! into every API module and used from several threads at once, as long as
//! the transport allows it.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, warn};
use url::{Position, Url};

use crate::auth::{Authentication, SidFormat};
use crate::error::ApiError;
use crate::http::{HttpMethod, Params, RawResponse, RequestOptions, Transport};
use crate::messages::format_error;
use crate::response::Response;
use crate::transport::UreqTransport;

/// Port used when none is configured.
pub const DEFAULT_PORT: u16 = 80;

/// URL scheme of the endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Http,
    #[default]
    Https,
}

impl Protocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Http => "http",
            Protocol::Https => "https",
        }
    }
}

impl FromStr for Protocol {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "http" => Ok(Protocol::Http),
            "https" => Ok(Protocol::Https),
            _ => Err(ApiError::InvalidProtocol(s.to_string())),
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A NAS endpoint plus the session used to talk to it.
#[derive(Clone)]
pub struct Connection {
    protocol: Protocol,
    domain: String,
    port: String,
    auth: Option<Authentication>,
    transport: Arc<dyn Transport>,
}

impl Connection {
    /// Validate `protocol` and `port` and build a connection using the
    /// default `UreqTransport`.
    pub fn new(
        protocol: &str,
        domain: impl Into<String>,
        auth: Option<Authentication>,
        port: impl fmt::Display,
    ) -> Result<Self, ApiError> {
        let protocol = protocol.parse()?;
        let port = port.to_string();
        match port.parse::<u16>() {
            Ok(p) if p != 0 => {}
            _ => return Err(ApiError::InvalidPort(port)),
        }
        Ok(Self {
            protocol,
            domain: domain.into(),
            port,
            auth,
            transport: Arc::new(UreqTransport::new()),
        })
    }

    /// Typed counterpart of `new`.
    pub fn from_parts(
        protocol: Protocol,
        domain: impl Into<String>,
        auth: Option<Authentication>,
        port: u16,
    ) -> Result<Self, ApiError> {
        Self::new(protocol.as_str(), domain, auth, port)
    }

    /// Replace the transport used by `send`.
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = transport;
        self
    }

    /// Attach or replace the session, e.g. after a successful login.
    pub fn with_auth(mut self, auth: Authentication) -> Self {
        self.auth = Some(auth);
        self
    }

    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn port(&self) -> &str {
        &self.port
    }

    pub fn auth(&self) -> Option<&Authentication> {
        self.auth.as_ref()
    }

    /// Resolve `path` against `protocol://domain:port` using URL-join rules:
    /// an absolute path replaces the base path, a relative one is appended.
    /// The port is always kept in the result, even when it is the scheme default.
    pub fn build_url(&self, path: &str) -> Result<String, ApiError> {
        let base = Url::parse(&format!("{}://{}:{}", self.protocol, self.domain, self.port))?;
        let joined = base.join(path)?;
        let (Some(host), Some(port)) = (joined.host_str(), joined.port_or_known_default()) else {
            return Ok(joined.to_string());
        };
        // `Url` lowercases the host; keep the caller's spelling when the authority is unchanged.
        let host = if base.host_str() == Some(host) { self.domain.as_str() } else { host };
        Ok(format!(
            "{}://{}:{}{}",
            joined.scheme(),
            host,
            port,
            &joined[Position::BeforePath..]
        ))
    }

    /// Place `params` in the query (GET) or form body (POST) and attach the
    /// session when `use_auth` is set: `sid` sessions join the same params,
    /// cookie sessions go into `cookies` whatever the verb.
    pub fn build_request_options(
        &self,
        http_method: HttpMethod,
        mut params: Params,
        use_auth: bool,
    ) -> Result<RequestOptions, ApiError> {
        let mut cookies = None;
        if use_auth {
            let auth = self.auth.as_ref().ok_or(ApiError::MissingAuthentication)?;
            match auth.format() {
                SidFormat::Sid => params.extend(auth.build_params()),
                SidFormat::Cookie => cookies = Some(auth.build_params()),
            }
        }

        let mut options = RequestOptions {
            cookies,
            ..RequestOptions::default()
        };
        match http_method {
            HttpMethod::Get => options.query = Some(params),
            HttpMethod::Post => options.data = Some(params),
        }
        Ok(options)
    }

    /// Send one request. `http_method` is matched case-insensitively and must
    /// be GET or POST.
    pub fn send(
        &self,
        path: &str,
        http_method: &str,
        namespace: &str,
        params: Params,
        use_auth: bool,
    ) -> Result<Response, ApiError> {
        self.dispatch(path, http_method.parse()?, namespace, params, use_auth)
    }

    /// `send` with an already validated method.
    pub fn dispatch(
        &self,
        path: &str,
        http_method: HttpMethod,
        namespace: &str,
        params: Params,
        use_auth: bool,
    ) -> Result<Response, ApiError> {
        let url = self.build_url(path)?;
        let RequestOptions { query, data, cookies } =
            self.build_request_options(http_method, params, use_auth)?;

        debug!(%http_method, %url, namespace, use_auth, "sending request");
        let raw = match http_method {
            HttpMethod::Get => self
                .transport
                .get(&url, &query.unwrap_or_default(), cookies.as_ref())?,
            HttpMethod::Post => self
                .transport
                .post(&url, &data.unwrap_or_default(), cookies.as_ref())?,
        };
        self.handle_response(raw, namespace)
    }

    /// Normalize a raw result. A 200 that does not report success gets its
    /// error message resolved for `namespace`.
    pub fn handle_response(&self, raw: RawResponse, namespace: &str) -> Result<Response, ApiError> {
        let mut response = Response::from_raw(raw)?;
        debug!(status = response.status_code(), url = response.url(), "received response");

        if response.status_code() == 200 && !response.is_success() {
            let code = response.error_code();
            warn!(?code, namespace, "api call reported failure");
            response.set_error_message(format_error(code, namespace));
        }
        Ok(response)
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("protocol", &self.protocol)
            .field("domain", &self.domain)
            .field("port", &self.port)
            .field("auth", &self.auth)
            .finish_non_exhaustive()
    }
}
