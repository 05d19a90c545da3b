//! Deterministic demo data.
//!
//! A fresh installation has nothing to rank, so the service can seed a
//! handful of demo stores with a month of fabricated sales. The
//! generator runs off a caller-supplied seed: the same seed always
//! produces the same stores and sales, which keeps tests reproducible.

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use rankboard_core::{ApiKey, Sale, StoreAccount, StoreId};
use rankboard_store::RecordStore;

use crate::error::Result;

/// Demo storefronts, oldest registration first.
const DEMO_STORES: [(&str, &str, &str); 5] = [
    ("TechWorld Store", "demo@techworld.com", "https://techworld.com"),
    ("Fashion Hub", "demo@fashionhub.com", "https://fashionhub.com"),
    (
        "Home Essentials",
        "demo@homeessentials.com",
        "https://homeessentials.com",
    ),
    (
        "Sports Central",
        "demo@sportscentral.com",
        "https://sportscentral.com",
    ),
    ("Beauty Corner", "demo@beautycorner.com", "https://beautycorner.com"),
];

/// Demo store login secret.
const DEMO_SECRET: &str = "password123";

const SALES_WINDOW_DAYS: i64 = 30;
const MIN_SALES: u32 = 20;
const MAX_SALES: u32 = 70;
const MIN_AMOUNT_CENTS: i64 = 1_000;
const MAX_AMOUNT_CENTS: i64 = 21_000;

/// Seeded generator for the demo dataset.
pub struct DemoSeeder {
    rng: StdRng,
}

impl DemoSeeder {
    /// Create a seeder; the same seed yields the same dataset.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generate the demo stores and their sales as of `now`.
    ///
    /// Stores register 30, 25, 20, 15 and 10 days before `now`; each
    /// gets 20–69 sales of $10.00–$209.99 spread over the last 30 days.
    #[must_use]
    pub fn generate(&mut self, now: DateTime<Utc>) -> (Vec<StoreAccount>, Vec<Sale>) {
        let mut stores = Vec::with_capacity(DEMO_STORES.len());
        let mut sales = Vec::new();

        for (i, (name, email, url)) in DEMO_STORES.iter().enumerate() {
            let days_ago = SALES_WINDOW_DAYS - i64::try_from(i).unwrap_or(0) * 5;
            let account = StoreAccount {
                id: self.next_store_id(),
                name: (*name).to_string(),
                email: (*email).to_string(),
                url: (*url).to_string(),
                secret: DEMO_SECRET.to_string(),
                api_key: self.next_api_key(),
                created_at: now - Duration::days(days_ago),
            };

            let count = self.rng.gen_range(MIN_SALES..MAX_SALES);
            for _ in 0..count {
                let amount_cents = self.rng.gen_range(MIN_AMOUNT_CENTS..MAX_AMOUNT_CENTS);
                let age = Duration::seconds(
                    self.rng
                        .gen_range(0..SALES_WINDOW_DAYS * 24 * 60 * 60),
                );
                sales.push(Sale::recorded_at(account.id, amount_cents, now - age));
            }

            stores.push(account);
        }

        (stores, sales)
    }

    /// Populate `store` with the demo dataset if it holds no stores
    /// yet. Returns whether seeding happened.
    ///
    /// # Errors
    ///
    /// Returns an error if a storage write fails.
    pub fn seed_if_empty<S: RecordStore>(&mut self, store: &S) -> Result<bool> {
        if !store.is_empty()? {
            return Ok(false);
        }

        let (accounts, sales) = self.generate(Utc::now());
        for account in &accounts {
            store.import_store(account)?;
        }
        for sale in &sales {
            store.add_sale(sale)?;
        }

        tracing::info!(
            stores = accounts.len(),
            sales = sales.len(),
            "seeded demo data"
        );
        Ok(true)
    }

    fn next_store_id(&mut self) -> StoreId {
        let bytes: [u8; 16] = self.rng.gen();
        StoreId::from_uuid(uuid_from_random_bytes(bytes))
    }

    fn next_api_key(&mut self) -> ApiKey {
        let bytes: [u8; 12] = self.rng.gen();
        ApiKey::new(format!("rk_{}", hex::encode(bytes)))
    }
}

fn uuid_from_random_bytes(bytes: [u8; 16]) -> uuid::Uuid {
    uuid::Builder::from_random_bytes(bytes).into_uuid()
}
