//! Sale records.
//!
//! A sale is one captured checkout, attributed to a store. Amounts are
//! integer cents so revenue sums are exact. Sales are immutable once
//! recorded; they disappear only when their store is deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{StoreId, TxId};

/// A single recorded sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sale {
    /// Unique, time-ordered sale identifier.
    pub id: TxId,

    /// The store this sale belongs to.
    pub store_id: StoreId,

    /// Sale amount in cents. The data layer stores what it is given;
    /// amounts are expected to be non-negative but are not validated.
    pub amount_cents: i64,

    /// When the sale was captured.
    pub recorded_at: DateTime<Utc>,
}

impl Sale {
    /// Record a sale now.
    #[must_use]
    pub fn new(store_id: StoreId, amount_cents: i64) -> Self {
        Self {
            id: TxId::generate(),
            store_id,
            amount_cents,
            recorded_at: Utc::now(),
        }
    }

    /// Record a sale with an explicit timestamp (demo seeding, backfill).
    ///
    /// The identifier embeds the same timestamp so storage-index order
    /// matches `recorded_at` order.
    #[must_use]
    pub fn recorded_at(store_id: StoreId, amount_cents: i64, at: DateTime<Utc>) -> Self {
        Self {
            id: TxId::generate_at(at),
            store_id,
            amount_cents,
            recorded_at: at,
        }
    }
}
