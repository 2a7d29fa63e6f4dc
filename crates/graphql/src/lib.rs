//! `storefront-graphql` — GraphQL presentation layer over the catalog store.
//!
//! Thin by intent: object types project domain entities, resolvers delegate
//! related-entity lookups to per-request dataloaders, and the cost/margin
//! fields run the pure computations from `storefront-catalog` behind a
//! soft-fail permission gate.

pub mod loaders;
pub mod objects;
pub mod query;
pub mod requester;
pub mod schema;

pub use loaders::CatalogLoaders;
pub use query::QueryRoot;
pub use requester::Requester;
pub use schema::{CatalogSchema, build_schema, schema_sdl};
