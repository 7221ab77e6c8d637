//! Error-code to message lookup.
//!
//! Codes 100-199 are shared by every API; codes from 400 up are defined per
//! API family, so the namespace picks the table consulted first.

/// Translate an `error.code` into a user-facing message for `namespace`.
pub fn format_error(code: Option<i64>, namespace: &str) -> String {
    let Some(code) = code else {
        return "Unknown error".to_string();
    };

    namespace_message(code, namespace)
        .or_else(|| common_message(code))
        .map(str::to_string)
        .unwrap_or_else(|| format!("Unknown error code {code}"))
}

fn namespace_message(code: i64, namespace: &str) -> Option<&'static str> {
    if namespace == "SYNO.API.Auth" {
        auth_message(code)
    } else if namespace.starts_with("SYNO.DownloadStation.") {
        download_station_message(code)
    } else if namespace.starts_with("SYNO.FileStation.") {
        file_station_message(code)
    } else {
        None
    }
}

fn common_message(code: i64) -> Option<&'static str> {
    let message = match code {
        100 => "Unknown error",
        101 => "Invalid parameter",
        102 => "The requested API does not exist",
        103 => "The requested method does not exist",
        104 => "The requested version does not support the functionality",
        105 => "The logged in session does not have permission",
        106 => "Session timeout",
        107 => "Session interrupted by duplicate login",
        _ => return None,
    };
    Some(message)
}

fn auth_message(code: i64) -> Option<&'static str> {
    let message = match code {
        400 => "No such account or incorrect password",
        401 => "Account disabled",
        402 => "Permission denied",
        403 => "2-step verification code required",
        404 => "Failed to authenticate 2-step verification code",
        _ => return None,
    };
    Some(message)
}

fn download_station_message(code: i64) -> Option<&'static str> {
    let message = match code {
        400 => "File upload failed",
        401 => "Max number of tasks reached",
        402 => "Destination denied",
        403 => "Destination does not exist",
        404 => "Invalid task id",
        405 => "Invalid task action",
        406 => "No default destination",
        407 => "Set destination failed",
        408 => "File does not exist",
        _ => return None,
    };
    Some(message)
}

fn file_station_message(code: i64) -> Option<&'static str> {
    let message = match code {
        400 => "Invalid parameter of file operation",
        401 => "Unknown error of file operation",
        402 => "System is too busy",
        407 => "Operation not permitted",
        408 => "No such file or directory",
        _ => return None,
    };
    Some(message)
}
