//! `storefront-store` — read-side storage for the catalog.
//!
//! The [`CatalogStore`] trait is the seam between resolvers and storage. Its
//! lookup methods are batch-shaped on purpose: the GraphQL layer feeds them
//! from dataloaders, so one call covers every key collected in a batching
//! window. Two implementations live here: an in-memory store for dev/tests
//! and a Postgres-backed one.

pub mod catalog_store;
pub mod memory;
pub mod postgres;

pub use catalog_store::{CatalogStore, ProductChannelKey, StoreError};
pub use memory::InMemoryCatalogStore;
pub use postgres::PostgresCatalogStore;
