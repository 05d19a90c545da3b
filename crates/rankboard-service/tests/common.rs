//! Shared test harness for the service integration tests.

use tempfile::TempDir;

use rankboard_core::NewStore;
use rankboard_service::{BoardService, NotifierConfig, ServiceConfig};
use rankboard_store::RocksRecordStore;

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_SECRET: &str = "admin-secret";

pub struct TestHarness {
    pub service: BoardService<RocksRecordStore>,
    // Held so the database directory outlives the test.
    _dir: TempDir,
}

impl TestHarness {
    /// A harness without a notification endpoint.
    pub fn new() -> Self {
        Self::with_notifier(None)
    }

    /// A harness whose registrations POST to `endpoint`.
    pub fn with_notifier(endpoint: Option<String>) -> Self {
        let dir = TempDir::new().unwrap();
        let store = RocksRecordStore::open(dir.path()).unwrap();
        let config = ServiceConfig {
            admin_email: ADMIN_EMAIL.into(),
            admin_secret: ADMIN_SECRET.into(),
            notifier: endpoint.map(|endpoint| NotifierConfig {
                endpoint,
                signing_secret: "test-signing-secret".into(),
            }),
            ..ServiceConfig::default()
        };

        Self {
            service: BoardService::new(store, config),
            _dir: dir,
        }
    }
}

pub fn new_store(name: &str) -> NewStore {
    NewStore {
        name: name.into(),
        email: format!("{name}@example.com"),
        url: format!("https://{name}.example.com"),
        secret: "password123".into(),
    }
}
