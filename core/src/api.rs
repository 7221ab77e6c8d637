//! Declarative API modules.
//!
//! # Design
//! Each web API family (`SYNO.API.Auth`, `SYNO.DownloadStation.Task`, ...) is
//! declared once with `api_module!`: a CGI path, a namespace and a table of
//! methods. The macro expands the table into a static `METHODS` slice and one
//! named method per entry. Every generated method funnels into
//! `ApiBase::send_command`, which merges the base params and hands the request
//! to the `Connection`.
//!
//! `use_auth` has no default. A method entry without it matches no macro arm,
//! so a missing declaration fails at compile time rather than at call time.

use std::fmt;

use crate::connection::Connection;
use crate::error::ApiError;
use crate::http::{HttpMethod, Params};
use crate::response::Response;

/// Path segment placed in front of every module path unless overridden.
pub const WEBAPI_PREFIX: &str = "webapi";

/// One declared vendor method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodSpec {
    /// Name of the generated Rust method.
    pub func_name: &'static str,
    /// Value sent as the `method` parameter.
    pub vendor_method: &'static str,
    pub http_method: HttpMethod,
    pub use_auth: bool,
}

/// State shared by every declared module: connection, version and final path.
#[derive(Debug, Clone)]
pub struct ApiBase {
    conn: Connection,
    version: String,
    prefix: String,
    path: String,
    namespace: &'static str,
}

impl ApiBase {
    /// `namespace_prefix` of `None` uses `WEBAPI_PREFIX`; `Some("")` drops it.
    pub fn new(
        conn: Connection,
        version: impl fmt::Display,
        namespace_prefix: Option<&str>,
        declared_path: &str,
        namespace: &'static str,
    ) -> Result<Self, ApiError> {
        let version = version.to_string();
        match version.parse::<i64>() {
            Ok(v) if v != 0 => {}
            _ => return Err(ApiError::InvalidVersion(version)),
        }

        let prefix = namespace_prefix.unwrap_or(WEBAPI_PREFIX).to_string();
        let path = format!("{prefix}/{declared_path}");
        Ok(Self {
            conn,
            version,
            prefix,
            path,
            namespace,
        })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn namespace(&self) -> &'static str {
        self.namespace
    }

    /// `{api: namespace, version}`.
    pub fn base_params(&self) -> Params {
        let mut params = Params::new();
        params.insert("api".to_string(), self.namespace.to_string());
        params.insert("version".to_string(), self.version.clone());
        params
    }

    /// Merge base params, then the caller's, then `method`, and send.
    /// Callers may override `api` and `version` but never `method`.
    pub fn send_command(&self, spec: &MethodSpec, params: Params) -> Result<Response, ApiError> {
        let mut all = self.base_params();
        all.extend(params);
        all.insert("method".to_string(), spec.vendor_method.to_string());
        self.conn
            .dispatch(&self.path, spec.http_method, self.namespace, all, spec.use_auth)
    }
}

/// Implemented by every `api_module!` type.
pub trait ApiModule {
    fn base(&self) -> &ApiBase;

    fn methods(&self) -> &'static [MethodSpec];

    /// Look up a method by generated or vendor name and invoke it.
    fn call(&self, name: &str, params: Params) -> Result<Response, ApiError> {
        let methods = self.methods();
        let spec = methods
            .iter()
            .find(|spec| spec.func_name == name)
            .or_else(|| methods.iter().find(|spec| spec.vendor_method == name))
            .ok_or_else(|| ApiError::UnknownMethod(name.to_string()))?;
        self.base().send_command(spec, params)
    }
}

/// Declare a web API module.
///
/// ```
/// synapi_core::api_module! {
///     /// Session management.
///     pub struct Sessions {
///         path: "auth.cgi",
///         namespace: "SYNO.API.Auth",
///         methods: {
///             login { use_auth: false },
///             keep_alive { method: "keepalive", http_method: POST, use_auth: true },
///         }
///     }
/// }
///
/// assert_eq!(Sessions::METHODS[1].vendor_method, "keepalive");
/// ```
///
/// Leaving out `use_auth` does not compile:
///
/// ```compile_fail
/// synapi_core::api_module! {
///     pub struct Tasks {
///         path: "task.cgi",
///         namespace: "SYNO.DownloadStation.Task",
///         methods: {
///             list { },
///         }
///     }
/// }
/// ```
///
/// Neither does any verb other than `GET` or `POST`:
///
/// ```compile_fail
/// synapi_core::api_module! {
///     pub struct Tasks {
///         path: "task.cgi",
///         namespace: "SYNO.DownloadStation.Task",
///         methods: {
///             edit { http_method: PUT, use_auth: true },
///         }
///     }
/// }
/// ```
///
/// Per method: `method` (vendor name, defaults to the Rust name) and
/// `http_method` (`GET` or `POST`, defaults to `GET`) are optional and must
/// come in that order; `use_auth` is required.
#[macro_export]
macro_rules! api_module {
    (@spec $func:ident [$($vendor:literal)?] [$($verb:ident)?] $use_auth:literal) => {
        $crate::api::MethodSpec {
            func_name: stringify!($func),
            vendor_method: $crate::api_module!(@vendor $func $($vendor)?),
            http_method: $crate::api_module!(@verb $($verb)?),
            use_auth: $use_auth,
        }
    };
    (@vendor $func:ident) => { stringify!($func) };
    (@vendor $func:ident $vendor:literal) => { $vendor };
    (@verb) => { $crate::HttpMethod::Get };
    (@verb GET) => { $crate::HttpMethod::Get };
    (@verb POST) => { $crate::HttpMethod::Post };
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            path: $path:literal,
            namespace: $namespace:literal,
            methods: {
                $(
                    $(#[$fn_meta:meta])*
                    $func:ident {
                        $(method: $vendor:literal,)?
                        $(http_method: $verb:ident,)?
                        use_auth: $use_auth:literal $(,)?
                    }
                ),* $(,)?
            } $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        $vis struct $name {
            base: $crate::api::ApiBase,
        }

        impl $name {
            pub const PATH: &'static str = $path;
            pub const NAMESPACE: &'static str = $namespace;
            pub const METHODS: &'static [$crate::api::MethodSpec] = &[
                $( $crate::api_module!(@spec $func [$($vendor)?] [$($verb)?] $use_auth), )*
            ];

            /// Bind to `conn` at `version`, under the default `webapi` prefix.
            pub fn new(
                conn: $crate::Connection,
                version: impl ::std::fmt::Display,
            ) -> ::std::result::Result<Self, $crate::ApiError> {
                Self::with_prefix(conn, version, ::std::option::Option::None)
            }

            pub fn with_prefix(
                conn: $crate::Connection,
                version: impl ::std::fmt::Display,
                namespace_prefix: ::std::option::Option<&str>,
            ) -> ::std::result::Result<Self, $crate::ApiError> {
                let base = $crate::api::ApiBase::new(
                    conn,
                    version,
                    namespace_prefix,
                    Self::PATH,
                    Self::NAMESPACE,
                )?;
                ::std::result::Result::Ok(Self { base })
            }

            $(
                $(#[$fn_meta])*
                pub fn $func(
                    &self,
                    params: $crate::Params,
                ) -> ::std::result::Result<$crate::Response, $crate::ApiError> {
                    let spec = $crate::api_module!(@spec $func [$($vendor)?] [$($verb)?] $use_auth);
                    self.base.send_command(&spec, params)
                }
            )*
        }

        impl $crate::api::ApiModule for $name {
            fn base(&self) -> &$crate::api::ApiBase {
                &self.base
            }

            fn methods(&self) -> &'static [$crate::api::MethodSpec] {
                Self::METHODS
            }
        }
    };
}
