//! Registration notifications.
//!
//! When a store registers, the service dispatches a notice to an
//! external endpoint. Dispatch is fire-and-forget: the registrar logs
//! failures and never lets them block or fail registration.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::time::Duration;

use rankboard_core::StoreAccount;

use crate::config::NotifierConfig;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the hex HMAC-SHA256 signature of the notice body.
pub const SIGNATURE_HEADER: &str = "x-rankboard-signature";

/// The payload sent for each new registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationNotice {
    /// Display name of the new store.
    pub store_name: String,
    /// Contact email of the new store.
    pub store_email: String,
    /// Storefront URL of the new store.
    pub store_url: String,
    /// When the store registered.
    pub registration_date: DateTime<Utc>,
}

impl RegistrationNotice {
    /// Build a notice from a freshly created store account.
    #[must_use]
    pub fn for_store(account: &StoreAccount) -> Self {
        Self {
            store_name: account.name.clone(),
            store_email: account.email.clone(),
            store_url: account.url.clone(),
            registration_date: account.created_at,
        }
    }
}

/// Errors that can occur while dispatching a notice.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// The HTTP request failed.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("endpoint returned status {status}")]
    Status {
        /// The HTTP status code returned.
        status: u16,
    },

    /// The notice could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Dispatches registration notices.
#[async_trait]
pub trait RegistrationNotifier: Send + Sync {
    /// Deliver one notice.
    ///
    /// # Errors
    ///
    /// Returns an error if delivery fails; callers treat this as
    /// log-and-continue.
    async fn notify(&self, notice: &RegistrationNotice) -> Result<(), NotifyError>;
}

/// POSTs each notice as JSON to a configured endpoint, signing the body
/// with HMAC-SHA256.
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    client: Client,
    endpoint: String,
    signing_secret: String,
}

impl WebhookNotifier {
    /// Create a notifier from configuration.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built (does not happen with
    /// default settings).
    #[must_use]
    pub fn new(config: &NotifierConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            signing_secret: config.signing_secret.clone(),
        }
    }
}

#[async_trait]
impl RegistrationNotifier for WebhookNotifier {
    async fn notify(&self, notice: &RegistrationNotice) -> Result<(), NotifyError> {
        let body = serde_json::to_vec(notice)?;
        let signature = hmac_sha256_hex(&self.signing_secret, &body);

        let response = self
            .client
            .post(&self.endpoint)
            .header("content-type", "application/json")
            .header(SIGNATURE_HEADER, signature)
            .body(body)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(NotifyError::Status {
                status: response.status().as_u16(),
            })
        }
    }
}

/// A notifier that drops every notice, for configurations without an
/// endpoint.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

#[async_trait]
impl RegistrationNotifier for NullNotifier {
    async fn notify(&self, _notice: &RegistrationNotice) -> Result<(), NotifyError> {
        Ok(())
    }
}

/// Compute HMAC-SHA256 over `message` and return it hex-encoded.
#[must_use]
pub fn hmac_sha256_hex(secret: &str, message: &[u8]) -> String {
    // HMAC-SHA256 accepts keys of any size per RFC 2104, so
    // `new_from_slice` cannot fail here.
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC-SHA256 accepts any key size");
    mac.update(message);
    hex::encode(mac.finalize().into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn notice() -> RegistrationNotice {
        RegistrationNotice {
            store_name: "TechWorld Store".into(),
            store_email: "demo@techworld.com".into(),
            store_url: "https://techworld.com".into(),
            registration_date: Utc::now(),
        }
    }

    #[test]
    fn hmac_is_deterministic() {
        let a = hmac_sha256_hex("secret", b"message");
        let b = hmac_sha256_hex("secret", b"message");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn hmac_differs_per_secret() {
        assert_ne!(
            hmac_sha256_hex("secret-a", b"message"),
            hmac_sha256_hex("secret-b", b"message")
        );
    }

    #[tokio::test]
    async fn webhook_posts_signed_notice() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/registrations"))
            .and(header_exists(SIGNATURE_HEADER))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let notifier = WebhookNotifier::new(&NotifierConfig {
            endpoint: format!("{}/registrations", server.uri()),
            signing_secret: "shhh".into(),
        });

        notifier.notify(&notice()).await.unwrap();
    }

    #[tokio::test]
    async fn webhook_surfaces_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let notifier = WebhookNotifier::new(&NotifierConfig {
            endpoint: server.uri(),
            signing_secret: "shhh".into(),
        });

        let result = notifier.notify(&notice()).await;
        assert!(matches!(result, Err(NotifyError::Status { status: 500 })));
    }

    #[tokio::test]
    async fn null_notifier_accepts_everything() {
        NullNotifier.notify(&notice()).await.unwrap();
    }
}
