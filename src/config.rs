use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Application-level constants
pub const APP_NAME: &str = "Symcheck";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Session tokens issued at login stay valid this long.
pub const SESSION_TTL_DAYS: i64 = 7;

/// Get the application data directory
/// ~/.symcheck/ unless SYMCHECK_DATA_DIR overrides it
pub fn app_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("SYMCHECK_DATA_DIR") {
        return PathBuf::from(dir);
    }
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join(".symcheck")
}

/// Get the SQLite database path
pub fn database_path() -> PathBuf {
    if let Ok(path) = std::env::var("SYMCHECK_DB") {
        return PathBuf::from(path);
    }
    app_data_dir().join("symcheck.db")
}

/// Address the API server binds to
pub fn bind_addr() -> SocketAddr {
    std::env::var("SYMCHECK_BIND")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 8000)))
}

/// Base URL of the external model scoring service
pub fn model_service_url() -> String {
    std::env::var("ML_API_URL").unwrap_or_else(|_| "http://127.0.0.1:5000".to_string())
}

/// Timeout toward the model scoring service
pub fn model_service_timeout() -> Duration {
    let secs = std::env::var("ML_API_TIMEOUT_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(30);
    Duration::from_secs(secs)
}

/// Default tracing filter when RUST_LOG is unset
pub fn default_log_filter() -> String {
    "info,symcheck=debug".to_string()
}
