//! Recording transport shared by the unit tests.

use std::sync::Mutex;

use crate::error::ApiError;
use crate::http::{HttpMethod, Params, RawResponse, Transport};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RecordedCall {
    pub method: HttpMethod,
    pub url: String,
    pub params: Params,
    pub cookies: Option<Params>,
}

/// Records every call and answers each with the same canned response.
pub(crate) struct RecordingTransport {
    status_code: u16,
    body: String,
    calls: Mutex<Vec<RecordedCall>>,
}

impl RecordingTransport {
    pub fn replying(status_code: u16, body: &str) -> Self {
        Self {
            status_code,
            body: body.to_string(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_call(&self) -> RecordedCall {
        self.calls().pop().expect("no request was sent")
    }

    fn record(&self, method: HttpMethod, url: &str, params: &Params, cookies: Option<&Params>) -> RawResponse {
        self.calls.lock().unwrap().push(RecordedCall {
            method,
            url: url.to_string(),
            params: params.clone(),
            cookies: cookies.cloned(),
        });
        RawResponse {
            status_code: self.status_code,
            url: url.to_string(),
            content: self.body.as_bytes().to_vec(),
        }
    }
}

impl Transport for RecordingTransport {
    fn get(&self, url: &str, query: &Params, cookies: Option<&Params>) -> Result<RawResponse, ApiError> {
        Ok(self.record(HttpMethod::Get, url, query, cookies))
    }

    fn post(&self, url: &str, data: &Params, cookies: Option<&Params>) -> Result<RawResponse, ApiError> {
        Ok(self.record(HttpMethod::Post, url, data, cookies))
    }
}
