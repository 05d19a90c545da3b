//! The service operations behind the storefront leaderboard.
//!
//! [`BoardService`] is the caller the data-layer contract assumes: it
//! enforces email uniqueness at registration, authenticates logins,
//! gates the admin back-office, and assembles the dashboard and
//! leaderboard views.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use rankboard_core::{
    build_standings, Leaderboard, NewStore, Sale, SortKey, StoreAccount, StoreId, StorePatch,
    StoreStats,
};
use rankboard_store::RecordStore;

use crate::auth::{constant_time_eq, Role, Session};
use crate::config::ServiceConfig;
use crate::error::{Result, ServiceError};
use crate::notify::{NullNotifier, RegistrationNotice, RegistrationNotifier, WebhookNotifier};

/// Everything a store's dashboard shows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dashboard {
    /// The store being viewed.
    pub store: StoreAccount,
    /// Revenue, orders, average order value, and leaderboard rank.
    pub stats: StoreStats,
    /// The activity feed: most recent sales, newest first.
    pub recent_sales: Vec<Sale>,
}

/// Registration, login, admin, and leaderboard operations over a
/// Record Store.
pub struct BoardService<S: RecordStore> {
    store: S,
    config: ServiceConfig,
    notifier: Arc<dyn RegistrationNotifier>,
}

impl<S: RecordStore> BoardService<S> {
    /// Create a service over `store`. A webhook notifier is built when
    /// the configuration carries one; otherwise notices are dropped.
    #[must_use]
    pub fn new(store: S, config: ServiceConfig) -> Self {
        let notifier: Arc<dyn RegistrationNotifier> = match &config.notifier {
            Some(notifier_config) => Arc::new(WebhookNotifier::new(notifier_config)),
            None => {
                tracing::warn!("no notifier configured - registration notices will be dropped");
                Arc::new(NullNotifier)
            }
        };
        Self {
            store,
            config,
            notifier,
        }
    }

    /// Create a service with an explicit notifier (tests, custom
    /// transports).
    #[must_use]
    pub fn with_notifier(
        store: S,
        config: ServiceConfig,
        notifier: Arc<dyn RegistrationNotifier>,
    ) -> Self {
        Self {
            store,
            config,
            notifier,
        }
    }

    /// The underlying Record Store.
    pub fn record_store(&self) -> &S {
        &self.store
    }

    // =========================================================================
    // Registration and Login
    // =========================================================================

    /// Register a new store.
    ///
    /// Email uniqueness is enforced here, at creation time. On success
    /// a registration notice is dispatched fire-and-forget: a delivery
    /// failure is logged and never fails the registration.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::DuplicateEmail`] if the email is taken.
    /// - [`ServiceError::Storage`] if a read or write fails.
    pub async fn register(&self, new_store: NewStore) -> Result<(StoreAccount, Session)> {
        if self.store.store_by_email(&new_store.email)?.is_some() {
            return Err(ServiceError::DuplicateEmail {
                email: new_store.email,
            });
        }

        let account = self.store.add_store(new_store)?;

        let notice = RegistrationNotice::for_store(&account);
        if let Err(e) = self.notifier.notify(&notice).await {
            tracing::warn!(
                store_id = %account.id,
                error = %e,
                "registration notification failed"
            );
        }

        let session = Session {
            store_id: Some(account.id),
            role: Role::Store,
        };
        Ok((account, session))
    }

    /// Authenticate an email/secret pair.
    ///
    /// The admin credentials from the configuration are checked first;
    /// an admin session borrows the newest store as its dashboard
    /// context when one exists.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::InvalidCredentials`] if nothing matches.
    /// - [`ServiceError::Storage`] if a read fails.
    pub fn login(&self, email: &str, secret: &str) -> Result<Session> {
        if email == self.config.admin_email
            && !self.config.admin_secret.is_empty()
            && constant_time_eq(secret, &self.config.admin_secret)
        {
            let context = self.store.all_stores()?.into_iter().next();
            return Ok(Session {
                store_id: context.map(|s| s.id),
                role: Role::Admin,
            });
        }

        let Some(account) = self.store.store_by_email(email)? else {
            return Err(ServiceError::InvalidCredentials);
        };
        if !constant_time_eq(secret, &account.secret) {
            return Err(ServiceError::InvalidCredentials);
        }

        Ok(Session {
            store_id: Some(account.id),
            role: Role::Store,
        })
    }

    // =========================================================================
    // Store Views
    // =========================================================================

    /// Assemble the dashboard for a store.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::StoreNotFound`] if the id is unknown.
    /// - [`ServiceError::Storage`] if a read fails.
    pub fn dashboard(&self, store_id: &StoreId) -> Result<Dashboard> {
        let store = self
            .store
            .store_by_id(store_id)?
            .ok_or_else(|| ServiceError::StoreNotFound {
                store_id: store_id.to_string(),
            })?;

        let stats = self.store.store_stats(store_id)?;
        let recent_sales = self.store.recent_sales(store_id, self.config.recent_limit)?;

        Ok(Dashboard {
            store,
            stats,
            recent_sales,
        })
    }

    /// Capture a sale for a store (the checkout-simulation entry
    /// point). The sale is immutable once recorded.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::StoreNotFound`] if the id is unknown.
    /// - [`ServiceError::Storage`] if a write fails.
    pub fn record_sale(&self, store_id: &StoreId, amount_cents: i64) -> Result<Sale> {
        if self.store.store_by_id(store_id)?.is_none() {
            return Err(ServiceError::StoreNotFound {
                store_id: store_id.to_string(),
            });
        }

        let sale = Sale::new(*store_id, amount_cents);
        self.store.add_sale(&sale)?;
        Ok(sale)
    }

    /// Build the leaderboard, ranked by `key`.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Storage`] if a read fails.
    pub fn leaderboard(&self, key: SortKey) -> Result<Leaderboard> {
        let stores = self.store.all_stores()?;
        let sales = self.store.all_sales()?;
        let standings = build_standings(&stores, &sales, Utc::now());
        Ok(Leaderboard::rank(standings, key))
    }

    // =========================================================================
    // Admin Back-Office
    // =========================================================================

    /// All stores for the admin table, newest registration first.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::AdminRequired`] without an admin session.
    /// - [`ServiceError::Storage`] if a read fails.
    pub fn admin_table(&self, session: &Session) -> Result<Vec<StoreAccount>> {
        self.require_admin(session)?;
        Ok(self.store.all_stores()?)
    }

    /// Apply an admin edit to a store. Editing an unknown store is a
    /// silent no-op, matching the data layer.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::AdminRequired`] without an admin session.
    /// - [`ServiceError::Storage`] if a write fails.
    pub fn edit_store(
        &self,
        session: &Session,
        store_id: &StoreId,
        patch: &StorePatch,
    ) -> Result<()> {
        self.require_admin(session)?;
        Ok(self.store.update_store(store_id, patch)?)
    }

    /// Delete a store and, through the cascade, all its sales.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::AdminRequired`] without an admin session.
    /// - [`ServiceError::Storage`] if a write fails.
    pub fn remove_store(&self, session: &Session, store_id: &StoreId) -> Result<()> {
        self.require_admin(session)?;
        Ok(self.store.delete_store(store_id)?)
    }

    /// Wipe every store and sale, returning the system to its initial
    /// state.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::AdminRequired`] without an admin session.
    /// - [`ServiceError::Storage`] if a write fails.
    pub fn reset(&self, session: &Session) -> Result<()> {
        self.require_admin(session)?;
        self.store.clear()?;
        tracing::info!("leaderboard data reset by admin");
        Ok(())
    }

    fn require_admin(&self, session: &Session) -> Result<()> {
        if session.is_admin() {
            Ok(())
        } else {
            Err(ServiceError::AdminRequired)
        }
    }
}
