//! Core types and ranking engine for rankboard.
//!
//! This crate provides the foundational pieces of the storefront
//! leaderboard:
//!
//! - **Identifiers**: [`StoreId`], [`TxId`]
//! - **Records**: [`StoreAccount`], [`Sale`]
//! - **Aggregation**: per-store metrics in [`stats`]
//! - **Ranking**: the leaderboard in [`leaderboard`]
//!
//! # Money
//!
//! Monetary amounts are stored as `i64` integer cents so revenue sums
//! are exact; derived metrics (average order value, growth rate) are
//! `f64`.
//!
//! Everything here is pure computation over in-memory collections.
//! Persistence lives in `rankboard-store`, and the registration/login
//! flows that call both live in `rankboard-service`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod account;
pub mod ids;
pub mod leaderboard;
pub mod sale;
pub mod stats;

pub use account::{ApiKey, NewStore, StoreAccount, StorePatch};
pub use ids::{IdError, StoreId, TxId};
pub use leaderboard::{build_standings, Leaderboard, SortKey, Standing, Totals, PODIUM_SIZE};
pub use sale::Sale;
pub use stats::{
    compute_stats, growth_rate, performance_score, revenue_for, StoreStats, PERFORMANCE_SCALE,
};
