//! Column family layout for the rankboard database.

/// Column family names.
pub mod cf {
    /// Store accounts, keyed by `store_id` (UUID bytes).
    pub const STORES: &str = "stores";

    /// Sales, keyed by `tx_id` (ULID bytes, time-ordered).
    pub const SALES: &str = "sales";

    /// Index: sales by store, keyed by `store_id || tx_id`.
    /// Value is empty (index only).
    pub const SALES_BY_STORE: &str = "sales_by_store";
}

/// Returns all column family names for database initialization.
#[must_use]
pub fn all_column_families() -> Vec<&'static str> {
    vec![cf::STORES, cf::SALES, cf::SALES_BY_STORE]
}
