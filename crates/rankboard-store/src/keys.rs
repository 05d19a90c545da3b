//! Binary key encoding for the rankboard column families.
//!
//! Store keys are raw UUID bytes; sale keys are raw ULID bytes. The
//! per-store sale index concatenates the two, so a prefix scan over a
//! store id yields that store's sales in chronological key order.

use rankboard_core::{StoreId, TxId};

/// Key for a store record.
#[must_use]
pub fn store_key(store_id: &StoreId) -> Vec<u8> {
    store_id.as_bytes().to_vec()
}

/// Key for a sale record.
#[must_use]
pub fn sale_key(tx_id: TxId) -> Vec<u8> {
    tx_id.to_bytes().to_vec()
}

/// Index key for a sale under its store.
///
/// Format: `store_id (16 bytes) || tx_id (16 bytes)`. ULIDs are
/// time-ordered, so within a store prefix the keys sort oldest-first.
#[must_use]
pub fn store_sale_key(store_id: &StoreId, tx_id: TxId) -> Vec<u8> {
    let mut key = Vec::with_capacity(32);
    key.extend_from_slice(store_id.as_bytes());
    key.extend_from_slice(&tx_id.to_bytes());
    key
}

/// Prefix covering every sale index entry for a store.
#[must_use]
pub fn store_sales_prefix(store_id: &StoreId) -> Vec<u8> {
    store_id.as_bytes().to_vec()
}

/// Extract the sale id from a `sales_by_store` index key.
///
/// Returns `None` if the key is shorter than the 32-byte index format.
#[must_use]
pub fn tx_id_from_index_key(key: &[u8]) -> Option<TxId> {
    let bytes: [u8; 16] = key.get(16..32)?.try_into().ok()?;
    Some(TxId::from_bytes(bytes))
}
