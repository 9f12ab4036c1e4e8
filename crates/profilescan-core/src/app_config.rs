use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Origin that profile paths are appended to, e.g. `https://www.instagram.com`.
    pub profile_base_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub max_concurrent_fetches: usize,
    /// Profile fetches the server may start per 60-second window. Each
    /// analyze request spends one unit per distinct handle it submits.
    pub fetch_budget_per_minute: usize,
}
