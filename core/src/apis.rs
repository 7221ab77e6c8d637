//! Declared web API modules.

crate::api_module! {
    /// `SYNO.API.Info`: discovers which APIs the NAS exposes and at which path.
    pub struct ApiInfo {
        path: "query.cgi",
        namespace: "SYNO.API.Info",
        methods: {
            query { use_auth: false },
        }
    }
}

crate::api_module! {
    /// `SYNO.API.Auth`: opens and closes sessions.
    ///
    /// `login` takes `account`, `passwd`, `session` and `format`
    /// (`cookie` or `sid`); the returned `data.sid` feeds an `Authentication`.
    /// `logout` ends the session attached to the connection.
    pub struct Auth {
        path: "auth.cgi",
        namespace: "SYNO.API.Auth",
        methods: {
            login { use_auth: false },
            logout { use_auth: true },
        }
    }
}

crate::api_module! {
    /// `SYNO.DownloadStation.Info`: Download Station version and settings.
    pub struct DownloadStationInfo {
        path: "DownloadStation/info.cgi",
        namespace: "SYNO.DownloadStation.Info",
        methods: {
            get_info { method: "getinfo", use_auth: true },
            get_config { method: "getconfig", use_auth: true },
            set_server_config { method: "setserverconfig", http_method: POST, use_auth: true },
        }
    }
}

crate::api_module! {
    /// `SYNO.DownloadStation.Task`: download task management.
    pub struct DownloadStationTask {
        path: "DownloadStation/task.cgi",
        namespace: "SYNO.DownloadStation.Task",
        methods: {
            list { use_auth: true },
            get_info { method: "getinfo", use_auth: true },
            create { http_method: POST, use_auth: true },
            delete { use_auth: true },
            pause { use_auth: true },
            resume { use_auth: true },
            edit { http_method: POST, use_auth: true },
        }
    }
}

crate::api_module! {
    /// `SYNO.FileStation.List`: shared folders and their contents.
    pub struct FileStationList {
        path: "entry.cgi",
        namespace: "SYNO.FileStation.List",
        methods: {
            list_share { use_auth: true },
            list { use_auth: true },
            get_info { method: "getinfo", use_auth: true },
        }
    }
}
