//! Leaderboard and dashboard integration tests.

mod common;

use common::{new_store, TestHarness, ADMIN_EMAIL, ADMIN_SECRET};

use rankboard_core::SortKey;
use rankboard_service::DemoSeeder;
use rankboard_store::RecordStore;

#[tokio::test]
async fn stats_scenario_two_stores() {
    let harness = TestHarness::new();
    let (a, _) = harness.service.register(new_store("a")).await.unwrap();
    let (b, _) = harness.service.register(new_store("b")).await.unwrap();

    // Store A: $10.00 and $20.00; store B: $5.00.
    harness.service.record_sale(&a.id, 1000).unwrap();
    harness.service.record_sale(&a.id, 2000).unwrap();
    harness.service.record_sale(&b.id, 500).unwrap();

    let dash_a = harness.service.dashboard(&a.id).unwrap();
    assert_eq!(dash_a.stats.total_revenue_cents, 3000);
    assert_eq!(dash_a.stats.total_orders, 2);
    assert!((dash_a.stats.avg_order_value_cents - 1500.0).abs() < f64::EPSILON);
    assert_eq!(dash_a.stats.rank, 1);

    let dash_b = harness.service.dashboard(&b.id).unwrap();
    assert_eq!(dash_b.stats.total_revenue_cents, 500);
    assert_eq!(dash_b.stats.total_orders, 1);
    assert!((dash_b.stats.avg_order_value_cents - 500.0).abs() < f64::EPSILON);
    assert_eq!(dash_b.stats.rank, 2);

    let board = harness.service.leaderboard(SortKey::Performance).unwrap();
    assert_eq!(board.podium()[0].unwrap().performance_score, 10_000);
    assert_eq!(board.podium()[1].unwrap().performance_score, 1_667);
}

#[tokio::test]
async fn deleting_a_store_reranks_the_rest() {
    let harness = TestHarness::new();
    let (a, _) = harness.service.register(new_store("a")).await.unwrap();
    let (b, _) = harness.service.register(new_store("b")).await.unwrap();

    harness.service.record_sale(&a.id, 1000).unwrap();
    harness.service.record_sale(&b.id, 9000).unwrap();
    assert_eq!(harness.service.dashboard(&a.id).unwrap().stats.rank, 2);

    let admin = harness.service.login(ADMIN_EMAIL, ADMIN_SECRET).unwrap();
    harness.service.remove_store(&admin, &b.id).unwrap();

    let table = harness.service.admin_table(&admin).unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(harness.service.dashboard(&a.id).unwrap().stats.rank, 1);
    assert_eq!(harness.service.record_store().totals().unwrap().orders, 1);
}

#[tokio::test]
async fn seeded_leaderboard_fills_podium_and_table() {
    let harness = TestHarness::new();
    DemoSeeder::new(42)
        .seed_if_empty(harness.service.record_store())
        .unwrap();

    let board = harness.service.leaderboard(SortKey::Performance).unwrap();
    assert_eq!(board.totals().stores, 5);
    assert!(board.totals().orders >= 100);

    let podium = board.podium();
    assert!(podium.iter().all(Option::is_some));
    assert_eq!(podium[0].unwrap().performance_score, 10_000);

    // Five stores: two rows below the podium, labelled 4 and 5.
    let table: Vec<_> = board.table().collect();
    assert_eq!(table.len(), 2);
    assert_eq!(table[0].0, 4);
    assert_eq!(table[1].0, 5);

    // Scores never decrease down the board.
    let scores: Vec<_> = board
        .standings()
        .iter()
        .map(|s| s.performance_score)
        .collect();
    assert!(scores.windows(2).all(|pair| pair[0] >= pair[1]));
}

#[tokio::test]
async fn sort_keys_produce_their_own_orders() {
    let harness = TestHarness::new();
    DemoSeeder::new(42)
        .seed_if_empty(harness.service.record_store())
        .unwrap();

    let by_orders = harness.service.leaderboard(SortKey::Orders).unwrap();
    let counts: Vec<_> = by_orders.standings().iter().map(|s| s.orders).collect();
    assert!(counts.windows(2).all(|pair| pair[0] >= pair[1]));

    let by_growth = harness.service.leaderboard(SortKey::Growth).unwrap();
    let growth: Vec<_> = by_growth.standings().iter().map(|s| s.growth).collect();
    assert!(growth.windows(2).all(|pair| pair[0] >= pair[1]));
}
