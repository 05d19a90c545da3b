//! `RocksDB` implementation of the Record Store.

use std::path::Path;
use std::sync::Arc;

use rocksdb::{
    BoundColumnFamily, ColumnFamilyDescriptor, DBWithThreadMode, Direction, IteratorMode,
    MultiThreaded, Options, WriteBatch,
};

use rankboard_core::{
    compute_stats, ApiKey, NewStore, Sale, StoreAccount, StoreId, StorePatch, StoreStats, Totals,
};

use crate::error::{Result, StoreError};
use crate::keys;
use crate::schema::{all_column_families, cf};
use crate::RecordStore;

/// RocksDB-backed Record Store.
pub struct RocksRecordStore {
    db: Arc<DBWithThreadMode<MultiThreaded>>,
}

impl RocksRecordStore {
    /// Open or create the database at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_descriptors: Vec<_> = all_column_families()
            .into_iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()))
            .collect();

        let db = DBWithThreadMode::open_cf_descriptors(&opts, path, cf_descriptors)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(Self { db: Arc::new(db) })
    }

    fn cf(&self, name: &str) -> Result<Arc<BoundColumnFamily<'_>>> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| StoreError::Database(format!("column family not found: {name}")))
    }

    /// Serialize a value using CBOR.
    fn serialize<T: serde::Serialize>(value: &T) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        ciborium::into_writer(value, &mut buf)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(buf)
    }

    /// Deserialize a value from CBOR.
    fn deserialize<T: serde::de::DeserializeOwned>(data: &[u8]) -> Result<T> {
        ciborium::from_reader(data).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    /// Index keys for every sale attributed to `store_id`, in key
    /// (oldest-first) order.
    fn sale_index_keys(&self, store_id: &StoreId) -> Result<Vec<Vec<u8>>> {
        let cf_index = self.cf(cf::SALES_BY_STORE)?;
        let prefix = keys::store_sales_prefix(store_id);

        let iter = self.db.iterator_cf(
            &cf_index,
            IteratorMode::From(&prefix, Direction::Forward),
        );

        let mut index_keys = Vec::new();
        for item in iter {
            let (key, _) = item.map_err(|e| StoreError::Database(e.to_string()))?;
            if !key.starts_with(&prefix) {
                break;
            }
            index_keys.push(key.to_vec());
        }

        Ok(index_keys)
    }

    fn sale_by_id(&self, tx_id: rankboard_core::TxId) -> Result<Option<Sale>> {
        let cf_sales = self.cf(cf::SALES)?;
        self.db
            .get_cf(&cf_sales, keys::sale_key(tx_id))
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    fn count_cf(&self, name: &str) -> Result<u64> {
        let handle = self.cf(name)?;
        let mut count = 0u64;
        for item in self.db.iterator_cf(&handle, IteratorMode::Start) {
            item.map_err(|e| StoreError::Database(e.to_string()))?;
            count += 1;
        }
        Ok(count)
    }

    fn clear_cf(&self, name: &str, batch: &mut WriteBatch) -> Result<()> {
        let handle = self.cf(name)?;
        for item in self.db.iterator_cf(&handle, IteratorMode::Start) {
            let (key, _) = item.map_err(|e| StoreError::Database(e.to_string()))?;
            batch.delete_cf(&handle, key);
        }
        Ok(())
    }
}

impl RecordStore for RocksRecordStore {
    // =========================================================================
    // Store Operations
    // =========================================================================

    fn add_store(&self, new_store: NewStore) -> Result<StoreAccount> {
        let account = StoreAccount {
            id: StoreId::generate(),
            name: new_store.name,
            email: new_store.email,
            url: new_store.url,
            secret: new_store.secret,
            api_key: ApiKey::generate(),
            created_at: chrono::Utc::now(),
        };

        let cf_stores = self.cf(cf::STORES)?;
        let value = Self::serialize(&account)?;
        self.db
            .put_cf(&cf_stores, keys::store_key(&account.id), value)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        tracing::info!(store_id = %account.id, name = %account.name, "store registered");
        Ok(account)
    }

    fn import_store(&self, account: &StoreAccount) -> Result<()> {
        let cf_stores = self.cf(cf::STORES)?;
        let value = Self::serialize(account)?;
        self.db
            .put_cf(&cf_stores, keys::store_key(&account.id), value)
            .map_err(|e| StoreError::Database(e.to_string()))?;
        Ok(())
    }

    fn update_store(&self, store_id: &StoreId, patch: &StorePatch) -> Result<()> {
        let Some(mut account) = self.store_by_id(store_id)? else {
            tracing::debug!(store_id = %store_id, "update for unknown store ignored");
            return Ok(());
        };

        account.apply(patch);

        let cf_stores = self.cf(cf::STORES)?;
        let value = Self::serialize(&account)?;
        self.db
            .put_cf(&cf_stores, keys::store_key(store_id), value)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    fn delete_store(&self, store_id: &StoreId) -> Result<()> {
        if self.store_by_id(store_id)?.is_none() {
            tracing::debug!(store_id = %store_id, "delete for unknown store ignored");
            return Ok(());
        }

        let cf_stores = self.cf(cf::STORES)?;
        let cf_sales = self.cf(cf::SALES)?;
        let cf_index = self.cf(cf::SALES_BY_STORE)?;

        // Cascade: the store, its sales, and the index entries go in one
        // batch so no orphan records survive a partial failure.
        let index_keys = self.sale_index_keys(store_id)?;
        let mut batch = WriteBatch::default();
        batch.delete_cf(&cf_stores, keys::store_key(store_id));
        for index_key in &index_keys {
            if let Some(tx_id) = keys::tx_id_from_index_key(index_key) {
                batch.delete_cf(&cf_sales, keys::sale_key(tx_id));
            }
            batch.delete_cf(&cf_index, index_key);
        }

        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        tracing::info!(
            store_id = %store_id,
            cascaded_sales = index_keys.len(),
            "store deleted"
        );
        Ok(())
    }

    fn all_stores(&self) -> Result<Vec<StoreAccount>> {
        let cf_stores = self.cf(cf::STORES)?;
        let mut stores: Vec<StoreAccount> = Vec::new();
        for item in self.db.iterator_cf(&cf_stores, IteratorMode::Start) {
            let (_, value) = item.map_err(|e| StoreError::Database(e.to_string()))?;
            stores.push(Self::deserialize(&value)?);
        }

        // Newest registration first; id breaks created_at ties so the
        // order is reproducible.
        stores.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(stores)
    }

    fn store_by_email(&self, email: &str) -> Result<Option<StoreAccount>> {
        let cf_stores = self.cf(cf::STORES)?;
        for item in self.db.iterator_cf(&cf_stores, IteratorMode::Start) {
            let (_, value) = item.map_err(|e| StoreError::Database(e.to_string()))?;
            let account: StoreAccount = Self::deserialize(&value)?;
            if account.email == email {
                return Ok(Some(account));
            }
        }
        Ok(None)
    }

    fn store_by_id(&self, store_id: &StoreId) -> Result<Option<StoreAccount>> {
        let cf_stores = self.cf(cf::STORES)?;
        self.db
            .get_cf(&cf_stores, keys::store_key(store_id))
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    // =========================================================================
    // Sale Operations
    // =========================================================================

    fn add_sale(&self, sale: &Sale) -> Result<()> {
        let cf_sales = self.cf(cf::SALES)?;
        let cf_index = self.cf(cf::SALES_BY_STORE)?;

        let value = Self::serialize(sale)?;
        let mut batch = WriteBatch::default();
        batch.put_cf(&cf_sales, keys::sale_key(sale.id), &value);
        batch.put_cf(&cf_index, keys::store_sale_key(&sale.store_id, sale.id), []);

        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    fn recent_sales(&self, store_id: &StoreId, limit: usize) -> Result<Vec<Sale>> {
        let mut index_keys = self.sale_index_keys(store_id)?;
        index_keys.reverse(); // newest first

        let mut sales = Vec::with_capacity(limit.min(index_keys.len()));
        for index_key in index_keys.iter().take(limit) {
            let Some(tx_id) = keys::tx_id_from_index_key(index_key) else {
                continue;
            };
            if let Some(sale) = self.sale_by_id(tx_id)? {
                sales.push(sale);
            }
        }

        Ok(sales)
    }

    fn sales_for_store(&self, store_id: &StoreId) -> Result<Vec<Sale>> {
        let mut sales = Vec::new();
        for index_key in self.sale_index_keys(store_id)? {
            let Some(tx_id) = keys::tx_id_from_index_key(&index_key) else {
                continue;
            };
            if let Some(sale) = self.sale_by_id(tx_id)? {
                sales.push(sale);
            }
        }
        Ok(sales)
    }

    fn all_sales(&self) -> Result<Vec<Sale>> {
        let cf_sales = self.cf(cf::SALES)?;
        let mut sales = Vec::new();
        for item in self.db.iterator_cf(&cf_sales, IteratorMode::Start) {
            let (_, value) = item.map_err(|e| StoreError::Database(e.to_string()))?;
            sales.push(Self::deserialize(&value)?);
        }
        Ok(sales)
    }

    // =========================================================================
    // Derived Views
    // =========================================================================

    fn store_stats(&self, store_id: &StoreId) -> Result<StoreStats> {
        let stores = self.all_stores()?;
        let sales = self.all_sales()?;
        Ok(compute_stats(&stores, &sales, *store_id))
    }

    fn totals(&self) -> Result<Totals> {
        Ok(Totals {
            stores: self.count_cf(cf::STORES)?,
            orders: self.count_cf(cf::SALES)?,
        })
    }

    fn is_empty(&self) -> Result<bool> {
        Ok(self.count_cf(cf::STORES)? == 0)
    }

    fn clear(&self) -> Result<()> {
        let mut batch = WriteBatch::default();
        for name in all_column_families() {
            self.clear_cf(name, &mut batch)?;
        }
        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        tracing::info!("record store cleared");
        Ok(())
    }
}
