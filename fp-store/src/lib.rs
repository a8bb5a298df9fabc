//! Station persistence behind a single trait.
//!
//! The application never talks to a backend directly: it receives a
//! [`StationStore`] at startup and uses only list/insert/update plus change
//! subscriptions. Two implementations are provided:
//!
//! - [`LocalStore`] (feature `local`, default): SQLite via `rusqlite`, in memory
//!   or on disk. Used by the CLI's offline mode and by tests.
//! - [`RemoteStore`] (feature `api`): the hosted PostgREST table over `reqwest`.
//!
//! # Example
//!
//! ```rust
//! # #[cfg(feature = "local")]
//! # futures::executor::block_on(async {
//! use fp_core::{NewStation, StationStatus};
//! use fp_store::{ListQuery, LocalStore, StationStore};
//!
//! let store = LocalStore::open_in_memory().unwrap();
//! store
//!     .insert(&NewStation {
//!         title: "Comedouro da praça".to_string(),
//!         status: StationStatus::NeedsFood,
//!         latitude: -23.55,
//!         longitude: -46.63,
//!         notes: None,
//!     })
//!     .await
//!     .unwrap();
//! let stations = store.list(&ListQuery::default()).await.unwrap();
//! assert_eq!(stations.len(), 1);
//! # });
//! ```

pub mod config;
pub mod query;
pub mod subscription;

#[cfg(feature = "local")]
mod local;
#[cfg(feature = "local")]
pub mod schema;
#[cfg(feature = "api")]
mod remote;

pub use config::{BackendConfig, ConfigError};
pub use query::{ListQuery, Order, OrderColumn};
pub use subscription::{ChangeKind, ChangeSender, StationChange, SubscriptionHandle};

#[cfg(feature = "local")]
pub use local::LocalStore;
#[cfg(feature = "api")]
pub use remote::RemoteStore;

use fp_core::{NewStation, Station, StationPatch};
use thiserror::Error;

/// Failures surfaced by a store. Nothing here is retried by the store itself.
#[derive(Debug, Error)]
pub enum StoreError {
    #[cfg(feature = "api")]
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("backend returned {code}: {message}")]
    Status { code: u16, message: String },

    #[error("could not decode rows: {0}")]
    Decode(String),

    #[cfg(feature = "local")]
    #[error("database error: {0}")]
    Sql(#[from] rusqlite::Error),

    #[error("station {0} not found")]
    NotFound(String),
}

/// Table storage for feeding points.
///
/// Futures returned by the async methods are not required to be `Send`; the
/// application drives them on a single-threaded event loop.
#[allow(async_fn_in_trait)]
pub trait StationStore {
    /// Rows matching `query`, in the requested order.
    async fn list(&self, query: &ListQuery) -> Result<Vec<Station>, StoreError>;

    /// Insert a row and return it as stored.
    async fn insert(&self, station: &NewStation) -> Result<Station, StoreError>;

    /// Apply a partial update to the row `id`.
    async fn update(&self, id: &str, patch: &StationPatch) -> Result<(), StoreError>;

    /// Deliver change notifications for `table` into `sender`.
    fn subscribe(&self, table: &str, sender: ChangeSender) -> SubscriptionHandle;

    /// Stop delivering to a subscription. Unknown handles are ignored.
    fn unsubscribe(&self, handle: SubscriptionHandle);
}
