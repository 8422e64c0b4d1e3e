use std::sync::Arc;

use crate::db::article_repository::ArticleRepository;
use crate::db::option_repository::OptionRepository;
use crate::db::subscriber_repository::SubscriberRepository;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub article_repo: Arc<dyn ArticleRepository>,
    pub subscriber_repo: Arc<dyn SubscriberRepository>,
    pub option_repo: Arc<dyn OptionRepository>,
    pub config: AppConfig,
}

/// Runtime configuration, read from the environment with development
/// defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Username accepted by the admin login.
    pub admin_username: String,
    /// Password accepted by the admin login.
    pub admin_password: String,
    /// HMAC secret used to sign session tokens.
    pub session_secret: String,
    /// Session token lifetime in seconds.
    pub session_ttl_secs: i64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            admin_username: std::env::var("ADMIN_USERNAME")
                .unwrap_or_else(|_| "admin".to_string()),
            admin_password: std::env::var("ADMIN_PASSWORD")
                .unwrap_or_else(|_| "password123".to_string()),
            session_secret: std::env::var("SESSION_SECRET")
                .unwrap_or_else(|_| "dev-session-secret".to_string()),
            session_ttl_secs: std::env::var("SESSION_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8 * 60 * 60),
        }
    }
}
