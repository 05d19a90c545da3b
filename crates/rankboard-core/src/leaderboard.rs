//! Leaderboard ranking.
//!
//! A [`Standing`] joins a store with its aggregate metrics; a
//! [`Leaderboard`] is the ranked sequence, split for presentation into a
//! podium (top three) and a table (everyone else, labelled from rank 4).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::stats::{growth_rate, performance_score, revenue_for};
use crate::{Sale, StoreAccount};

/// How many standings the podium holds.
pub const PODIUM_SIZE: usize = 3;

/// The metric a leaderboard is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Performance score (equivalently revenue, which the score is
    /// monotonic in).
    #[default]
    Performance,
    /// Number of orders.
    Orders,
    /// Average daily revenue since creation.
    Growth,
}

/// A store joined with the metrics the leaderboard ranks by.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Standing {
    /// The store itself.
    pub store: StoreAccount,
    /// Total revenue in cents.
    pub revenue_cents: i64,
    /// Number of orders.
    pub orders: u64,
    /// Average daily revenue in cents per day.
    pub growth: f64,
    /// Revenue relative to the top store, scaled to 10 000.
    pub performance_score: i64,
}

/// Headline counts shown above the leaderboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    /// Number of registered stores.
    pub stores: u64,
    /// Number of recorded sales across all stores.
    pub orders: u64,
}

/// Join every store with its metrics, computing the top revenue once.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn build_standings(
    stores: &[StoreAccount],
    sales: &[Sale],
    now: DateTime<Utc>,
) -> Vec<Standing> {
    let revenues: Vec<i64> = stores
        .iter()
        .map(|store| revenue_for(sales, store.id))
        .collect();
    let top_revenue = revenues.iter().copied().max().unwrap_or(0);

    stores
        .iter()
        .zip(revenues)
        .map(|(store, revenue_cents)| Standing {
            orders: sales.iter().filter(|s| s.store_id == store.id).count() as u64,
            growth: growth_rate(revenue_cents, store.created_at, now),
            performance_score: performance_score(revenue_cents, top_revenue),
            store: store.clone(),
            revenue_cents,
        })
        .collect()
}

/// A ranked sequence of standings.
#[derive(Debug, Clone)]
pub struct Leaderboard {
    standings: Vec<Standing>,
    totals: Totals,
}

impl Leaderboard {
    /// Rank standings by `key`, descending, with ascending store id as
    /// the deterministic tie-break.
    #[must_use]
    pub fn rank(mut standings: Vec<Standing>, key: SortKey) -> Self {
        standings.sort_by(|a, b| {
            let ordering = match key {
                SortKey::Performance => b.revenue_cents.cmp(&a.revenue_cents),
                SortKey::Orders => b.orders.cmp(&a.orders),
                SortKey::Growth => b
                    .growth
                    .partial_cmp(&a.growth)
                    .unwrap_or(std::cmp::Ordering::Equal),
            };
            ordering.then_with(|| a.store.id.cmp(&b.store.id))
        });

        let totals = Totals {
            stores: standings.len() as u64,
            orders: standings.iter().map(|s| s.orders).sum(),
        };

        Self { standings, totals }
    }

    /// The full ranked sequence, best first.
    #[must_use]
    pub fn standings(&self) -> &[Standing] {
        &self.standings
    }

    /// The top three places. Absent places are `None`, not errors.
    #[must_use]
    pub fn podium(&self) -> [Option<&Standing>; PODIUM_SIZE] {
        [
            self.standings.first(),
            self.standings.get(1),
            self.standings.get(2),
        ]
    }

    /// Standings below the podium, paired with their 1-based overall
    /// rank (the first table row is rank 4).
    pub fn table(&self) -> impl Iterator<Item = (usize, &Standing)> {
        self.standings
            .iter()
            .enumerate()
            .skip(PODIUM_SIZE)
            .map(|(i, standing)| (i + 1, standing))
    }

    /// Headline counts for the leaderboard view.
    #[must_use]
    pub fn totals(&self) -> Totals {
        self.totals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ApiKey, StoreId};
    use chrono::Duration;

    fn store_created(name: &str, days_ago: i64) -> StoreAccount {
        StoreAccount {
            id: StoreId::generate(),
            name: name.into(),
            email: format!("{name}@example.com"),
            url: String::new(),
            secret: String::new(),
            api_key: ApiKey::new("rk_test"),
            created_at: Utc::now() - Duration::days(days_ago),
        }
    }

    fn sales_for(store: &StoreAccount, amounts: &[i64]) -> Vec<Sale> {
        amounts.iter().map(|&a| Sale::new(store.id, a)).collect()
    }

    #[test]
    fn performance_ranking_follows_revenue() {
        let a = store_created("a", 10);
        let b = store_created("b", 10);
        let c = store_created("c", 10);
        let mut sales = sales_for(&a, &[1000]);
        sales.extend(sales_for(&b, &[5000]));
        sales.extend(sales_for(&c, &[3000]));

        let standings = build_standings(&[a, b.clone(), c], &sales, Utc::now());
        let board = Leaderboard::rank(standings, SortKey::Performance);

        let names: Vec<_> = board
            .standings()
            .iter()
            .map(|s| s.store.name.as_str())
            .collect();
        assert_eq!(names, vec!["b", "c", "a"]);
        assert_eq!(board.standings()[0].performance_score, 10_000);
        assert_eq!(board.standings()[0].store.id, b.id);
    }

    #[test]
    fn orders_ranking_ignores_revenue() {
        let a = store_created("a", 10);
        let b = store_created("b", 10);
        // a: one big sale; b: three small ones.
        let mut sales = sales_for(&a, &[100_000]);
        sales.extend(sales_for(&b, &[100, 100, 100]));

        let standings = build_standings(&[a, b.clone()], &sales, Utc::now());
        let board = Leaderboard::rank(standings, SortKey::Orders);
        assert_eq!(board.standings()[0].store.id, b.id);
    }

    #[test]
    fn growth_favours_younger_stores_with_equal_revenue() {
        let old = store_created("old", 30);
        let young = store_created("young", 3);
        let mut sales = sales_for(&old, &[9000]);
        sales.extend(sales_for(&young, &[9000]));

        let standings = build_standings(&[old, young.clone()], &sales, Utc::now());
        let board = Leaderboard::rank(standings, SortKey::Growth);
        assert_eq!(board.standings()[0].store.id, young.id);
    }

    #[test]
    fn equal_metrics_tie_break_by_store_id() {
        let a = store_created("a", 10);
        let b = store_created("b", 10);
        let standings = build_standings(&[a.clone(), b.clone()], &[], Utc::now());
        let board = Leaderboard::rank(standings, SortKey::Performance);

        let expected_first = a.id.min(b.id);
        assert_eq!(board.standings()[0].store.id, expected_first);
    }

    #[test]
    fn podium_pads_missing_places() {
        let a = store_created("a", 10);
        let standings = build_standings(&[a], &[], Utc::now());
        let board = Leaderboard::rank(standings, SortKey::Performance);

        let podium = board.podium();
        assert!(podium[0].is_some());
        assert!(podium[1].is_none());
        assert!(podium[2].is_none());
    }

    #[test]
    fn table_starts_at_rank_four() {
        let stores: Vec<_> = (0..5).map(|i| store_created(&format!("s{i}"), 10)).collect();
        let sales: Vec<_> = stores
            .iter()
            .enumerate()
            .map(|(i, s)| Sale::new(s.id, 100 * (i64::try_from(i).unwrap() + 1)))
            .collect();

        let standings = build_standings(&stores, &sales, Utc::now());
        let board = Leaderboard::rank(standings, SortKey::Performance);

        let table: Vec<_> = board.table().collect();
        assert_eq!(table.len(), 2);
        assert_eq!(table[0].0, 4);
        assert_eq!(table[1].0, 5);
    }

    #[test]
    fn totals_count_stores_and_orders() {
        let a = store_created("a", 10);
        let b = store_created("b", 10);
        let mut sales = sales_for(&a, &[100, 200]);
        sales.extend(sales_for(&b, &[300]));

        let standings = build_standings(&[a, b], &sales, Utc::now());
        let board = Leaderboard::rank(standings, SortKey::Performance);
        assert_eq!(board.totals(), Totals { stores: 2, orders: 3 });
    }
}
