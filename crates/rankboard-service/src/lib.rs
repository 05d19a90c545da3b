//! Registration, login, admin, and leaderboard operations for
//! rankboard.
//!
//! This crate is the caller layer on top of `rankboard-store`: it
//! enforces the invariants the data layer deliberately leaves to its
//! callers (duplicate-email rejection at registration), authenticates
//! logins, gates the admin back-office, dispatches fire-and-forget
//! registration notices, and seeds demo data into empty installations.
//!
//! # Example
//!
//! ```no_run
//! use rankboard_core::{NewStore, SortKey};
//! use rankboard_service::{BoardService, ServiceConfig};
//! use rankboard_store::RocksRecordStore;
//!
//! # async fn demo() {
//! let store = RocksRecordStore::open("/tmp/rankboard-db").unwrap();
//! let service = BoardService::new(store, ServiceConfig::default());
//!
//! let (account, _session) = service
//!     .register(NewStore {
//!         name: "TechWorld Store".into(),
//!         email: "demo@techworld.com".into(),
//!         url: "https://techworld.com".into(),
//!         secret: "password123".into(),
//!     })
//!     .await
//!     .unwrap();
//!
//! service.record_sale(&account.id, 2599).unwrap();
//! let board = service.leaderboard(SortKey::Performance).unwrap();
//! assert!(board.podium()[0].is_some());
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod auth;
pub mod board;
pub mod config;
pub mod error;
pub mod notify;
pub mod seed;

pub use auth::{Role, Session};
pub use board::{BoardService, Dashboard};
pub use config::{NotifierConfig, ServiceConfig, DEFAULT_RECENT_LIMIT};
pub use error::{Result, ServiceError};
pub use notify::{
    NotifyError, NullNotifier, RegistrationNotice, RegistrationNotifier, WebhookNotifier,
};
pub use seed::DemoSeeder;
