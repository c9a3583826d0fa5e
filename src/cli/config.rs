use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::admin::AdminClient;
use crate::api::ApiClient;
use crate::auth::{FileTokenStore, GuardDecision, RouteGuard, SessionStore, TokenStore};
use crate::config::{config, AppConfig};

/// Resolves the CLI config directory, creating it when missing.
pub fn get_config_dir(app: &AppConfig) -> anyhow::Result<PathBuf> {
    let config_dir = if let Some(custom_dir) = &app.cli.config_dir {
        custom_dir.clone()
    } else {
        let home = std::env::var("HOME").map_err(|_| anyhow::anyhow!("HOME environment variable not set"))?;
        PathBuf::from(home).join(".config").join("portfolio").join("cli")
    };

    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)?;
    }

    Ok(config_dir)
}

/// Everything a command needs, built once per invocation.
pub struct CliContext {
    pub config: AppConfig,
    pub session: Arc<SessionStore>,
    pub admin: AdminClient,
    pub token_store: Arc<FileTokenStore>,
}

impl CliContext {
    pub fn new(api_url: Option<&str>) -> anyhow::Result<Self> {
        let mut app = config().clone();
        if let Some(url) = api_url {
            let overridden = AppConfig::with_base_url(url);
            app.api.base_url = overridden.api.base_url;
        }

        let config_dir = get_config_dir(&app)?;
        Self::from_parts(app, &config_dir)
    }

    /// Context over an explicit config and session directory.
    pub fn from_parts(app: AppConfig, config_dir: &Path) -> anyhow::Result<Self> {
        let token_store = Arc::new(FileTokenStore::in_dir(config_dir));
        let api = ApiClient::new(&app.api)?;
        let tokens: Arc<dyn TokenStore> = token_store.clone();
        let session = Arc::new(SessionStore::new(api, tokens));
        let admin = AdminClient::new(session.clone(), app.content.page_size);

        tracing::debug!("using API {} with session file {}", app.api.base_url, token_store.path().display());

        Ok(Self {
            config: app,
            session,
            admin,
            token_store,
        })
    }

    pub fn api(&self) -> &ApiClient {
        self.session.api()
    }

    /// Verifies the stored session and refuses to continue without one.
    pub async fn require_admin(&self, path: &str) -> anyhow::Result<()> {
        self.session.init().await;
        match RouteGuard::new(&self.session).settle(path).await {
            GuardDecision::Render => Ok(()),
            GuardDecision::RedirectToLogin { .. } | GuardDecision::Placeholder => Err(anyhow::anyhow!(
                "Not logged in or session expired. Use 'folio auth login <username>' first"
            )),
        }
    }
}
