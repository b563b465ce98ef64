use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Contact providers
    pub hunter_api_key: String,
    /// Provider #2 is optional; without it the resolver runs single-source.
    pub pdl_api_key: Option<String>,

    // Search
    pub serper_api_key: String,

    // Text generation (query generation, outreach copy). Optional; the
    // engine's deterministic fallbacks cover both uses.
    pub anthropic_api_key: Option<String>,

    // Web server
    pub web_host: String,
    pub web_port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    /// Panics with a clear message if required vars are missing.
    pub fn from_env() -> Self {
        Self {
            hunter_api_key: required_env("HUNTER_API_KEY"),
            pdl_api_key: env::var("PEOPLE_DATA_LABS_API_KEY").ok(),
            serper_api_key: required_env("SERPER_API_KEY"),
            anthropic_api_key: env::var("ANTHROPIC_API_KEY").ok(),
            web_host: env::var("WEB_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            web_port: env::var("WEB_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .expect("WEB_PORT must be a number"),
        }
    }
}

fn required_env(key: &str) -> String {
    env::var(key).unwrap_or_else(|_| panic!("{key} environment variable is required"))
}
