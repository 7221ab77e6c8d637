//! End-to-end calls against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives the declared API
//! modules over real HTTP through the default `UreqTransport`. Validates URL
//! building, session encoding and envelope normalization end-to-end.

use std::net::SocketAddr;

use synapi_core::apis::{ApiInfo, Auth, DownloadStationTask};
use synapi_core::types::{ApiInfoMap, LoginData, TaskActionResult, TaskInfo, TaskList};
use synapi_core::{params, ApiError, ApiModule, Authentication, Connection, Params};

fn start_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

fn connection(addr: SocketAddr, auth: Option<Authentication>) -> Connection {
    Connection::new("http", addr.ip().to_string(), auth, addr.port()).unwrap()
}

fn login(conn: &Connection) -> String {
    let response = Auth::new(conn.clone(), 3)
        .unwrap()
        .login(params! {
            "account" => mock_server::ACCOUNT,
            "passwd" => mock_server::PASSWORD,
            "session" => "DownloadStation",
            "format" => "sid",
        })
        .unwrap();
    assert!(response.is_success(), "login failed: {:?}", response.error_message());
    response.data_as::<LoginData>().unwrap().unwrap().sid
}

#[test]
fn api_info_query() {
    let addr = start_server();
    let conn = connection(addr, None);

    let response = ApiInfo::new(conn, 1).unwrap().query(params! { "query" => "all" }).unwrap();

    assert_eq!(response.status_code(), 200);
    assert!(response.is_success());
    assert!(response.url().starts_with(&format!("http://{addr}/webapi/query.cgi?")));
    let info: ApiInfoMap = response.data_as().unwrap().unwrap();
    assert_eq!(info["SYNO.API.Auth"].path, "auth.cgi");
    assert_eq!(info["SYNO.API.Auth"].max_version, 3);
}

#[test]
fn wrong_password_is_a_normal_response() {
    let addr = start_server();
    let conn = connection(addr, None);

    let response = Auth::new(conn, 3)
        .unwrap()
        .login(params! { "account" => mock_server::ACCOUNT, "passwd" => "wrong" })
        .unwrap();

    assert_eq!(response.status_code(), 200);
    assert!(!response.is_success());
    assert_eq!(response.error_code(), Some(400));
    assert_eq!(response.error_message(), Some("No such account or incorrect password"));
}

#[test]
fn task_lifecycle_with_cookie_session() {
    let addr = start_server();
    let sid = login(&connection(addr, None));
    let auth = Authentication::new(sid, "cookie").unwrap();
    let tasks = DownloadStationTask::new(connection(addr, Some(auth)), 1).unwrap();

    // Step 1: empty list.
    let list: TaskList = tasks.list(Params::new()).unwrap().data_as().unwrap().unwrap();
    assert_eq!(list.total, 0);

    // Step 2: create over POST.
    let response = tasks
        .create(params! { "uri" => "https://example.com/debian.iso" })
        .unwrap();
    assert!(response.is_success());

    // Step 3: list shows the task.
    let list: TaskList = tasks.list(Params::new()).unwrap().data_as().unwrap().unwrap();
    assert_eq!(list.total, 1);
    let task = &list.tasks[0];
    assert_eq!(task.title, "debian.iso");
    assert_eq!(task.kind, "https");
    assert_eq!(task.username, mock_server::ACCOUNT);

    // Step 4: pause, then check status.
    let results: Vec<TaskActionResult> = tasks
        .pause(params! { "id" => &task.id })
        .unwrap()
        .data_as()
        .unwrap()
        .unwrap();
    assert_eq!(results[0].error, 0);
    let info: TaskInfo = tasks
        .get_info(params! { "id" => &task.id })
        .unwrap()
        .data_as()
        .unwrap()
        .unwrap();
    assert_eq!(info.tasks[0].status, "paused");

    // Step 5: resume through the generic entry point.
    let response = tasks.call("resume", params! { "id" => &task.id }).unwrap();
    assert!(response.is_success());

    // Step 6: delete, then getinfo reports an invalid task id.
    assert!(tasks.delete(params! { "id" => &task.id }).unwrap().is_success());
    let response = tasks.get_info(params! { "id" => &task.id }).unwrap();
    assert!(!response.is_success());
    assert_eq!(response.error_code(), Some(404));
    assert_eq!(response.error_message(), Some("Invalid task id"));
}

#[test]
fn sid_session_travels_as_parameter() {
    let addr = start_server();
    let sid = login(&connection(addr, None));
    let auth = Authentication::new(sid.clone(), "sid").unwrap();
    let tasks = DownloadStationTask::new(connection(addr, Some(auth)), 1).unwrap();

    let response = tasks.list(Params::new()).unwrap();

    assert!(response.is_success());
    assert!(response.url().contains(&format!("_id={sid}")));
}

#[test]
fn logout_ends_session() {
    let addr = start_server();
    let sid = login(&connection(addr, None));
    let conn = connection(addr, Some(Authentication::new(sid, "cookie").unwrap()));

    let response = Auth::new(conn.clone(), 3).unwrap().logout(params! { "session" => "DownloadStation" }).unwrap();
    assert!(response.is_success());

    let response = DownloadStationTask::new(conn, 1).unwrap().list(Params::new()).unwrap();
    assert_eq!(response.error_code(), Some(105));
    assert_eq!(response.error_message(), Some("The logged in session does not have permission"));
}

#[test]
fn unknown_session_gets_permission_message() {
    let addr = start_server();
    let auth = Authentication::new("bogus", "cookie").unwrap();
    let tasks = DownloadStationTask::new(connection(addr, Some(auth)), 1).unwrap();

    let response = tasks.list(Params::new()).unwrap();

    assert!(!response.is_success());
    assert_eq!(response.error_code(), Some(105));
}

#[test]
fn auth_method_without_session_is_rejected_locally() {
    let addr = start_server();
    let tasks = DownloadStationTask::new(connection(addr, None), 1).unwrap();

    let err = tasks.list(Params::new()).unwrap_err();
    assert!(matches!(err, ApiError::MissingAuthentication));
}

#[test]
fn non_200_yields_empty_payload() {
    let addr = start_server();
    let conn = connection(addr, None);

    let response = conn
        .send("/webapi/missing.cgi", "get", "SYNO.Test", Params::new(), false)
        .unwrap();

    assert_eq!(response.status_code(), 404);
    assert!(response.payload().is_empty());
    assert!(response.error_message().is_none());
}

#[test]
fn malformed_200_is_an_error() {
    let addr = start_server();
    let conn = connection(addr, None);

    let err = conn
        .send("/webapi/broken.cgi", "GET", "SYNO.Test", Params::new(), false)
        .unwrap_err();
    assert!(matches!(err, ApiError::Payload(_)));
}

#[test]
fn refused_connection_is_a_transport_error() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let conn = Connection::new("http", "127.0.0.1", None, port).unwrap();

    let err = conn
        .send("/webapi/query.cgi", "get", "SYNO.API.Info", Params::new(), false)
        .unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}
