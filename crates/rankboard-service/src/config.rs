//! Service configuration.

use serde::{Deserialize, Serialize};

/// How many recent sales the dashboard activity feed shows by default.
pub const DEFAULT_RECENT_LIMIT: usize = 5;

/// Configuration for the rankboard service layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Email of the back-office administrator.
    pub admin_email: String,

    /// Login secret of the back-office administrator.
    pub admin_secret: String,

    /// Number of sales shown in the dashboard activity feed.
    pub recent_limit: usize,

    /// Registration webhook, if notifications are enabled.
    pub notifier: Option<NotifierConfig>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            admin_email: "admin@rankboard.local".to_string(),
            admin_secret: String::new(),
            recent_limit: DEFAULT_RECENT_LIMIT,
            notifier: None,
        }
    }
}

/// Configuration for the registration notification webhook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifierConfig {
    /// Endpoint the registration notice is POSTed to.
    pub endpoint: String,

    /// Secret used to sign the notice payload (HMAC-SHA256, hex).
    pub signing_secret: String,
}
