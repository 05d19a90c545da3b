//! Per-store metric aggregation.
//!
//! Everything here is a pure function over in-memory slices; the store
//! layer loads current collections and delegates. There is no caching —
//! metrics are recomputed on demand from whatever the caller passes in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Sale, StoreAccount, StoreId};

/// Scale of the performance score: the top-grossing store scores exactly
/// this many points.
pub const PERFORMANCE_SCALE: i64 = 10_000;

/// Dashboard metrics for a single store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreStats {
    /// Exact sum of the store's sale amounts, in cents.
    pub total_revenue_cents: i64,

    /// Number of sales attributed to the store.
    pub total_orders: u64,

    /// Average order value in cents; `0.0` when there are no orders.
    pub avg_order_value_cents: f64,

    /// 1-based position in the revenue-descending leaderboard.
    pub rank: usize,
}

/// Sum the amounts of the sales belonging to `store_id`.
#[must_use]
pub fn revenue_for(sales: &[Sale], store_id: StoreId) -> i64 {
    sales
        .iter()
        .filter(|s| s.store_id == store_id)
        .map(|s| s.amount_cents)
        .sum()
}

/// Compute dashboard metrics for one store against the full collections.
///
/// Rank is the store's 1-based position when all stores are ordered by
/// revenue descending. A store missing from that ordering (which cannot
/// happen when `store_id` is drawn from `stores`) falls back to last
/// place rather than erroring.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn compute_stats(stores: &[StoreAccount], sales: &[Sale], store_id: StoreId) -> StoreStats {
    let total_revenue_cents = revenue_for(sales, store_id);
    let total_orders = sales.iter().filter(|s| s.store_id == store_id).count() as u64;
    let avg_order_value_cents = if total_orders > 0 {
        total_revenue_cents as f64 / total_orders as f64
    } else {
        0.0
    };

    let mut board: Vec<(StoreId, i64)> = stores
        .iter()
        .map(|store| (store.id, revenue_for(sales, store.id)))
        .collect();
    // Revenue descending, id ascending on ties for a stable ordering.
    board.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let rank = board
        .iter()
        .position(|(id, _)| *id == store_id)
        .map_or(stores.len(), |pos| pos + 1);

    StoreStats {
        total_revenue_cents,
        total_orders,
        avg_order_value_cents,
        rank,
    }
}

/// Revenue normalized against the top-grossing store, scaled to
/// [`PERFORMANCE_SCALE`]. Zero when no store has earned anything.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::similar_names
)]
pub fn performance_score(revenue_cents: i64, top_revenue_cents: i64) -> i64 {
    if top_revenue_cents > 0 {
        (revenue_cents as f64 / top_revenue_cents as f64 * PERFORMANCE_SCALE as f64).round() as i64
    } else {
        0
    }
}

/// Average daily revenue since the store was created, in cents per day.
///
/// This is a proxy for growth, not a trend: total revenue divided by
/// whole days active, with a floor of one day for fresh stores.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn growth_rate(revenue_cents: i64, created_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let days_active = (now - created_at).num_days().max(1);
    revenue_cents as f64 / days_active as f64
}
