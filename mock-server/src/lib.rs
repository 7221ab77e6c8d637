//! In-memory fake of the NAS web API.
//!
//! Serves the auth, API-info and Download Station task endpoints under
//! `/webapi` with the vendor's JSON envelope. Parameters are read from the
//! query string on GET and from the form body on POST. Task endpoints accept
//! the session either as cookie `id` or as parameter `_id`.

use std::{
    collections::{BTreeMap, HashMap, HashSet},
    sync::Arc,
};

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse},
    routing::get,
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::debug;
use uuid::Uuid;

pub const ACCOUNT: &str = "admin";
pub const PASSWORD: &str = "secret";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub username: String,
    pub title: String,
    pub size: u64,
    pub status: String,
}

#[derive(Debug, Default)]
pub struct Nas {
    sessions: HashSet<String>,
    tasks: BTreeMap<String, Task>,
    next_task: u64,
}

pub type Db = Arc<RwLock<Nas>>;

type Params = HashMap<String, String>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Nas::default()));
    Router::new()
        .route("/webapi/query.cgi", get(query).post(query))
        .route("/webapi/auth.cgi", get(auth).post(auth))
        .route("/webapi/DownloadStation/task.cgi", get(task).post(task))
        .route("/webapi/broken.cgi", get(broken))
        .fallback(not_found)
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn ok(data: Value) -> Json<Value> {
    Json(json!({ "success": true, "data": data }))
}

fn ok_empty() -> Json<Value> {
    Json(json!({ "success": true }))
}

fn fail(code: i64) -> Json<Value> {
    Json(json!({ "success": false, "error": { "code": code } }))
}

/// Session id from the `_id` parameter or the `id` cookie.
fn session_id(headers: &HeaderMap, params: &Params) -> Option<String> {
    if let Some(sid) = params.get("_id") {
        return Some(sid.clone());
    }
    headers
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|cookies| {
            cookies
                .split(';')
                .filter_map(|pair| pair.trim().split_once('='))
                .find(|(name, _)| *name == "id")
                .map(|(_, sid)| sid.to_string())
        })
}

/// Comma-separated task ids from the `id` parameter.
fn task_ids(params: &Params) -> Vec<String> {
    params
        .get("id")
        .map(|ids| ids.split(',').map(str::to_string).collect())
        .unwrap_or_default()
}

fn method(params: &Params) -> &str {
    params.get("method").map(String::as_str).unwrap_or_default()
}

async fn query(Form(params): Form<Params>) -> Json<Value> {
    if params.get("api").map(String::as_str) != Some("SYNO.API.Info") {
        return fail(102);
    }
    if method(&params) != "query" {
        return fail(103);
    }
    ok(json!({
        "SYNO.API.Info": { "path": "query.cgi", "minVersion": 1, "maxVersion": 1 },
        "SYNO.API.Auth": { "path": "auth.cgi", "minVersion": 1, "maxVersion": 3 },
        "SYNO.DownloadStation.Task": { "path": "DownloadStation/task.cgi", "minVersion": 1, "maxVersion": 1 },
    }))
}

async fn auth(State(db): State<Db>, headers: HeaderMap, Form(params): Form<Params>) -> Json<Value> {
    match method(&params) {
        "login" => {
            let account = params.get("account").map(String::as_str);
            let passwd = params.get("passwd").map(String::as_str);
            if account != Some(ACCOUNT) || passwd != Some(PASSWORD) {
                return fail(400);
            }
            let sid = Uuid::new_v4().simple().to_string();
            db.write().await.sessions.insert(sid.clone());
            debug!(%sid, "session opened");
            ok(json!({ "sid": sid }))
        }
        "logout" => {
            if let Some(sid) = session_id(&headers, &params) {
                db.write().await.sessions.remove(&sid);
            }
            ok_empty()
        }
        _ => fail(103),
    }
}

async fn task(State(db): State<Db>, headers: HeaderMap, Form(params): Form<Params>) -> Json<Value> {
    let mut nas = db.write().await;
    let authorized = session_id(&headers, &params).is_some_and(|sid| nas.sessions.contains(&sid));
    if !authorized {
        return fail(105);
    }

    match method(&params) {
        "list" => {
            let tasks: Vec<Task> = nas.tasks.values().cloned().collect();
            ok(json!({ "total": tasks.len(), "offset": 0, "tasks": tasks }))
        }
        "getinfo" => {
            let mut tasks = Vec::new();
            for id in task_ids(&params) {
                match nas.tasks.get(&id) {
                    Some(task) => tasks.push(task.clone()),
                    None => return fail(404),
                }
            }
            ok(json!({ "tasks": tasks }))
        }
        "create" => {
            let Some(uri) = params.get("uri") else {
                return fail(101);
            };
            nas.next_task += 1;
            let id = format!("dbid_{}", nas.next_task);
            let title = uri.rsplit('/').next().unwrap_or(uri).to_string();
            let kind = uri.split_once("://").map(|(scheme, _)| scheme).unwrap_or("http").to_string();
            nas.tasks.insert(
                id.clone(),
                Task {
                    id,
                    kind,
                    username: ACCOUNT.to_string(),
                    title,
                    size: 0,
                    status: "waiting".to_string(),
                },
            );
            ok_empty()
        }
        action @ ("delete" | "pause" | "resume") => {
            let ids = task_ids(&params);
            if ids.is_empty() || ids.iter().any(|id| !nas.tasks.contains_key(id)) {
                return fail(404);
            }
            for id in &ids {
                match action {
                    "delete" => {
                        nas.tasks.remove(id);
                    }
                    "pause" => set_status(&mut nas, id, "paused"),
                    _ => set_status(&mut nas, id, "waiting"),
                }
            }
            let results: Vec<Value> = ids.iter().map(|id| json!({ "id": id, "error": 0 })).collect();
            ok(json!(results))
        }
        _ => fail(103),
    }
}

fn set_status(nas: &mut Nas, id: &str, status: &str) {
    if let Some(task) = nas.tasks.get_mut(id) {
        task.status = status.to_string();
    }
}

/// A 200 whose body is not JSON.
async fn broken() -> &'static str {
    "<html><body>Internal Server Error</body></html>"
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Html("<html><body><h1>404 Not Found</h1></body></html>"))
}
