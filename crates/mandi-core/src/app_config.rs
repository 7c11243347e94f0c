use std::path::PathBuf;

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
    pub log_level: String,
    pub search_base_url: String,
    pub search_timeout_secs: u64,
    pub search_user_agent: String,
    pub search_result_limit: u32,
    pub search_debounce_ms: u64,
    pub auth_delay_ms: u64,
    pub demo_auth_delay_ms: u64,
    pub geolocation_timeout_ms: u64,
    pub categories_path: Option<PathBuf>,
    pub seed_places_per_category: usize,
    /// Fixed RNG seed for the mock dataset; `None` seeds from entropy.
    pub seed_rng: Option<u64>,
    pub default_locality: String,
}
