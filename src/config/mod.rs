use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

pub const DEFAULT_API_URL: &str = "http://localhost:8082";
pub const DEFAULT_PAGE_SIZE: usize = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub api: ApiConfig,
    pub content: ContentConfig,
    pub site: SiteConfig,
    pub cli: CliConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Backend base URL without a trailing slash
    pub base_url: String,
    /// Outbound request timeout; `None` leaves requests unbounded
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    pub page_size: usize,
    pub latest_projects: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub port: u16,
    pub enable_cors: bool,
    pub enable_request_logging: bool,
    pub track_visits: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    pub config_dir: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    /// Configuration pointing at an explicit backend, used by tests and `--api-url`.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let mut config = Self::development();
        config.api.base_url = normalize_base_url(&base_url.into());
        config
    }

    fn with_env_overrides(mut self) -> Self {
        // API overrides
        if let Ok(v) = env::var("PORTFOLIO_API_URL").or_else(|_| env::var("NEXT_PUBLIC_API_URL")) {
            if !v.trim().is_empty() {
                self.api.base_url = normalize_base_url(&v);
            }
        }
        if let Ok(v) = env::var("PORTFOLIO_API_TIMEOUT_SECS") {
            self.api.timeout_secs = v.parse().ok().filter(|secs| *secs > 0);
        }

        // Content overrides
        if let Ok(v) = env::var("PORTFOLIO_PAGE_SIZE") {
            self.content.page_size = v.parse().ok().filter(|n| *n > 0).unwrap_or(self.content.page_size);
        }

        // Site overrides
        if let Ok(v) = env::var("PORTFOLIO_SITE_PORT").or_else(|_| env::var("PORT")) {
            self.site.port = v.parse().unwrap_or(self.site.port);
        }
        if let Ok(v) = env::var("SITE_ENABLE_CORS") {
            self.site.enable_cors = v.parse().unwrap_or(self.site.enable_cors);
        }
        if let Ok(v) = env::var("SITE_TRACK_VISITS") {
            self.site.track_visits = v.parse().unwrap_or(self.site.track_visits);
        }

        // CLI overrides
        if let Ok(v) = env::var("PORTFOLIO_CLI_CONFIG_DIR") {
            self.cli.config_dir = Some(PathBuf::from(v));
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            api: ApiConfig {
                base_url: DEFAULT_API_URL.to_string(),
                timeout_secs: None,
            },
            content: ContentConfig {
                page_size: DEFAULT_PAGE_SIZE,
                latest_projects: 6,
            },
            site: SiteConfig {
                port: 3000,
                enable_cors: true,
                enable_request_logging: true,
                track_visits: false,
            },
            cli: CliConfig { config_dir: None },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            api: ApiConfig {
                base_url: DEFAULT_API_URL.to_string(),
                timeout_secs: Some(30),
            },
            content: ContentConfig {
                page_size: DEFAULT_PAGE_SIZE,
                latest_projects: 6,
            },
            site: SiteConfig {
                port: 3000,
                enable_cors: true,
                enable_request_logging: true,
                track_visits: true,
            },
            cli: CliConfig { config_dir: None },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            api: ApiConfig {
                base_url: DEFAULT_API_URL.to_string(),
                timeout_secs: Some(15),
            },
            content: ContentConfig {
                page_size: DEFAULT_PAGE_SIZE,
                latest_projects: 6,
            },
            site: SiteConfig {
                port: 3000,
                enable_cors: false,
                enable_request_logging: false,
                track_visits: true,
            },
            cli: CliConfig { config_dir: None },
        }
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}
