//! Environment configuration for the server binary.

/// Read `ZOOMINGO_PORT` (default 8080).
pub fn server_port() -> u16 {
    std::env::var("ZOOMINGO_PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080)
}

/// Read `ZOOMINGO_DB` (default `zoomingo.db` in the working directory).
pub fn database_path() -> String {
    std::env::var("ZOOMINGO_DB").unwrap_or_else(|_| "zoomingo.db".to_string())
}
