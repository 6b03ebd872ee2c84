// Server configuration, loaded once from the environment at startup
//
// Handlers never touch the environment: the Config is built in main and
// handed to the server, which turns it into shared state.

use std::path::PathBuf;

pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-5.1";
pub const DEFAULT_BIND: &str = "0.0.0.0:3000";

#[derive(Debug, Clone)]
pub struct Config {
    /// Provider credential. `None` when unset or blank.
    pub api_key: Option<String>,
    /// Chat-completion endpoint of the provider.
    pub api_url: String,
    pub model: String,
    /// TCP address to bind (default: `"0.0.0.0:3000"`).
    pub bind_address: String,
    /// Built frontend to serve next to the API, if any.
    pub static_dir: Option<PathBuf>,
    /// `tracing` filter string, e.g. `"info"` or `"debug,tower_http=warn"`.
    pub log_level: String,
    /// When `true`, emit log records as newline-delimited JSON.
    pub log_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            bind_address: DEFAULT_BIND.to_string(),
            static_dir: None,
            log_level: "info".to_string(),
            log_json: false,
        }
    }
}

impl Config {
    /// Build [`Config`] from `.env` (if present) and the process environment.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build [`Config`] from an arbitrary key lookup, falling back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            api_key: non_blank("OPENAI_API_KEY").map(|v| v.trim().to_string()),
            api_url: non_blank("OPENAI_API_URL").unwrap_or(defaults.api_url),
            model: non_blank("OPENAI_MODEL").unwrap_or(defaults.model),
            bind_address: non_blank("LIVEMIX_BIND").unwrap_or(defaults.bind_address),
            static_dir: non_blank("LIVEMIX_STATIC_DIR").map(PathBuf::from),
            log_level: non_blank("LIVEMIX_LOG").unwrap_or(defaults.log_level),
            log_json: lookup("LIVEMIX_LOG_JSON")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        }
    }
}
