//! Default blocking transport backed by `ureq`.
//!
//! Status-code-as-error is disabled so 4xx/5xx responses come back as data
//! and the connection decides how to interpret them.

use std::fmt;

use tracing::trace;
use ureq::http::Response;
use ureq::{Agent, Body};
use url::{Position, Url};

use crate::error::ApiError;
use crate::http::{Params, RawResponse, Transport};

/// `Transport` implementation using a shared `ureq::Agent`.
#[derive(Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UreqTransport").finish_non_exhaustive()
    }
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn get(&self, url: &str, query: &Params, cookies: Option<&Params>) -> Result<RawResponse, ApiError> {
        let mut full = Url::parse(url)?;
        if !query.is_empty() {
            let mut pairs = full.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }

        let mut request = self.agent.get(full.as_str());
        if let Some(cookies) = cookies {
            request = request.header("Cookie", cookie_header(cookies));
        }
        trace!(url = without_query(&full), params = query.len(), "GET");
        let response = request.call().map_err(|e| ApiError::Transport(e.to_string()))?;
        read_response(full.to_string(), response)
    }

    fn post(&self, url: &str, data: &Params, cookies: Option<&Params>) -> Result<RawResponse, ApiError> {
        let mut request = self.agent.post(url);
        if let Some(cookies) = cookies {
            request = request.header("Cookie", cookie_header(cookies));
        }
        trace!(url, fields = data.len(), "POST");
        let response = request
            .send_form(data.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        read_response(url.to_string(), response)
    }
}

/// The URL up to its path. Query strings may carry `_id=<sid>`.
fn without_query(url: &Url) -> &str {
    &url[..Position::AfterPath]
}

/// Render cookies as a single `Cookie` header value.
fn cookie_header(cookies: &Params) -> String {
    cookies
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("; ")
}

fn read_response(url: String, mut response: Response<Body>) -> Result<RawResponse, ApiError> {
    let status_code = response.status().as_u16();
    let content = response
        .body_mut()
        .read_to_vec()
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    Ok(RawResponse {
        status_code,
        url,
        content,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_header_joins_pairs() {
        let cookies = crate::params! { "id" => "abc", "lang" => "en" };
        assert_eq!(cookie_header(&cookies), "id=abc; lang=en");
    }

    #[test]
    fn logged_url_drops_query() {
        let url = Url::parse("http://nas:5000/webapi/task.cgi?method=list&_id=abc123").unwrap();
        assert_eq!(without_query(&url), "http://nas:5000/webapi/task.cgi");
    }

    #[test]
    fn get_rejects_unparseable_url() {
        let err = UreqTransport::new()
            .get("not a url", &Params::new(), None)
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl(_)));
    }
}
