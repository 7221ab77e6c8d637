//! Typed views of common `data` payloads, for use with `Response::data_as`.
//!
//! # Design
//! These mirror the mock server's schema but are defined independently;
//! integration tests catch drift between the two crates. Unknown fields are
//! ignored so newer firmware does not break decoding.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// `data` of a successful `SYNO.API.Auth` login.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginData {
    pub sid: String,
}

/// One entry of a `SYNO.API.Info` query result, keyed by namespace.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiInfoEntry {
    pub path: String,
    #[serde(rename = "minVersion")]
    pub min_version: u32,
    #[serde(rename = "maxVersion")]
    pub max_version: u32,
}

pub type ApiInfoMap = BTreeMap<String, ApiInfoEntry>;

/// A Download Station task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub username: String,
    pub title: String,
    pub size: u64,
    pub status: String,
}

/// `data` of `SYNO.DownloadStation.Task` `list`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskList {
    pub total: u64,
    pub offset: u64,
    pub tasks: Vec<Task>,
}

/// `data` of `SYNO.DownloadStation.Task` `getinfo`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskInfo {
    pub tasks: Vec<Task>,
}

/// Per-task outcome returned by `delete`, `pause` and `resume`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskActionResult {
    pub id: String,
    pub error: i64,
}
