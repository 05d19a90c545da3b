//! `RocksDB` persistence layer for rankboard.
//!
//! This crate owns the two record collections — store accounts and
//! sales — and is the only component that mutates them. Every mutating
//! call persists synchronously before returning.
//!
//! # Architecture
//!
//! Three column families:
//!
//! - `stores`: store accounts, keyed by `store_id` (UUID bytes)
//! - `sales`: sale records, keyed by `tx_id` (ULID bytes)
//! - `sales_by_store`: index for listing a store's sales, keyed by
//!   `store_id || tx_id`; ULID time-ordering makes "newest first" a
//!   reverse prefix scan
//!
//! Values are CBOR-encoded.
//!
//! # Example
//!
//! ```no_run
//! use rankboard_store::{RecordStore, RocksRecordStore};
//! use rankboard_core::NewStore;
//!
//! let store = RocksRecordStore::open("/tmp/rankboard-db").unwrap();
//!
//! let created = store
//!     .add_store(NewStore {
//!         name: "TechWorld Store".into(),
//!         email: "demo@techworld.com".into(),
//!         url: "https://techworld.com".into(),
//!         secret: "password123".into(),
//!     })
//!     .unwrap();
//!
//! let stats = store.store_stats(&created.id).unwrap();
//! assert_eq!(stats.total_orders, 0);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod keys;
pub mod rocks;
pub mod schema;

pub use error::{Result, StoreError};
pub use rocks::RocksRecordStore;

use rankboard_core::{NewStore, Sale, StoreAccount, StoreId, StorePatch, StoreStats, Totals};

/// The Record Store contract.
///
/// Lookups that find nothing return `Ok(None)`; updating or deleting an
/// absent store is a silent no-op. Only persistence failures are errors.
pub trait RecordStore: Send + Sync {
    // =========================================================================
    // Store Operations
    // =========================================================================

    /// Create a store: assigns a fresh id, a fresh API key, and the
    /// current timestamp, then persists. Field contents are not
    /// validated (empty name/url permitted, duplicate email not checked
    /// here).
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn add_store(&self, new_store: NewStore) -> Result<StoreAccount>;

    /// Write a complete store record as-is, keeping its identity and
    /// timestamps. Used for demo seeding and backfill; registration
    /// goes through [`RecordStore::add_store`].
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn import_store(&self, account: &StoreAccount) -> Result<()>;

    /// Merge the patch into the matching store and persist. Silent
    /// no-op if the id is unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn update_store(&self, store_id: &StoreId, patch: &StorePatch) -> Result<()>;

    /// Delete a store and every sale attributed to it, in one batch.
    /// Silent no-op if the id is unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn delete_store(&self, store_id: &StoreId) -> Result<()>;

    /// All stores, newest registration first.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    fn all_stores(&self) -> Result<Vec<StoreAccount>>;

    /// First store with the given email, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    fn store_by_email(&self, email: &str) -> Result<Option<StoreAccount>>;

    /// Store with the given id, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    fn store_by_id(&self, store_id: &StoreId) -> Result<Option<StoreAccount>>;

    // =========================================================================
    // Sale Operations
    // =========================================================================

    /// Record a sale and its index entry in one batch. Sales are
    /// immutable once written.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn add_sale(&self, sale: &Sale) -> Result<()>;

    /// The store's most recent sales, newest first, at most `limit`.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    fn recent_sales(&self, store_id: &StoreId, limit: usize) -> Result<Vec<Sale>>;

    /// Every sale attributed to the store, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    fn sales_for_store(&self, store_id: &StoreId) -> Result<Vec<Sale>>;

    /// Every sale across all stores, in unspecified order.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    fn all_sales(&self) -> Result<Vec<Sale>>;

    // =========================================================================
    // Derived Views
    // =========================================================================

    /// Dashboard metrics for one store, recomputed from the current
    /// collections on every call.
    ///
    /// # Errors
    ///
    /// Returns an error if a read fails.
    fn store_stats(&self, store_id: &StoreId) -> Result<StoreStats>;

    /// Headline counts: number of stores and number of sales.
    ///
    /// # Errors
    ///
    /// Returns an error if a read fails.
    fn totals(&self) -> Result<Totals>;

    /// Whether no store has ever been registered (demo-seeding guard).
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    fn is_empty(&self) -> Result<bool>;

    /// Remove every store and sale (admin reset).
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn clear(&self) -> Result<()>;
}
