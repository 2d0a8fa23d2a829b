use std::net::SocketAddr;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub project_id: String,
    pub credentials_path: String,
    pub log_filter: String,
    pub bind_addr: SocketAddr,
}

impl AppConfig {
    /// Absent variables flow through as empty strings; a bad value only
    /// surfaces at the connection attempt.
    pub fn from_env() -> Self {
        let project_id = std::env::var("PROJECT_ID").unwrap_or_default();
        let credentials_path =
            std::env::var("GOOGLE_APPLICATION_CREDENTIALS").unwrap_or_default();
        let log_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info,mailroom=debug".into());
        Self {
            project_id,
            credentials_path,
            log_filter,
            // Cloud Run contract: the service always listens on 8080.
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
        }
    }
}
