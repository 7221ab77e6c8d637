//! Connection settings loaded from a serde source or the environment.

use serde::Deserialize;

use crate::auth::{Authentication, SidFormat};
use crate::connection::{Connection, Protocol};
use crate::error::ApiError;

/// Port of the NAS HTTPS web interface.
pub const DEFAULT_HTTPS_PORT: u16 = 5001;

/// Everything needed to build a `Connection`.
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectionConfig {
    #[serde(default)]
    pub protocol: Protocol,
    pub domain: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub sid: Option<String>,
    #[serde(default)]
    pub sid_format: SidFormat,
}

fn default_port() -> u16 {
    DEFAULT_HTTPS_PORT
}

impl ConnectionConfig {
    /// Read `SYNO_PROTOCOL`, `SYNO_DOMAIN`, `SYNO_PORT`, `SYNO_SID` and
    /// `SYNO_SID_FORMAT`. Only `SYNO_DOMAIN` is required.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, with variables resolved through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ApiError> {
        let domain = lookup("SYNO_DOMAIN").ok_or(ApiError::MissingConfig("SYNO_DOMAIN"))?;
        let protocol = match lookup("SYNO_PROTOCOL") {
            Some(p) => p.parse()?,
            None => Protocol::default(),
        };
        let port = match lookup("SYNO_PORT") {
            Some(p) => p.parse().map_err(|_| ApiError::InvalidPort(p))?,
            None => default_port(),
        };
        let sid_format = match lookup("SYNO_SID_FORMAT") {
            Some(f) => f.parse()?,
            None => SidFormat::default(),
        };

        Ok(Self {
            protocol,
            domain,
            port,
            sid: lookup("SYNO_SID"),
            sid_format,
        })
    }

    /// Validate and build a `Connection` on the default transport.
    pub fn into_connection(self) -> Result<Connection, ApiError> {
        let auth = self
            .sid
            .map(|sid| Authentication::with_format(sid, self.sid_format));
        Connection::from_parts(self.protocol, self.domain, auth, self.port)
    }
}
