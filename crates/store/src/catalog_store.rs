use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

use storefront_catalog::{Channel, ProductChannelListing, VariantChannelListing};
use storefront_core::{ChannelId, ProductId, ProductListingId, VariantListingId};

/// Composite key for "all variant listings of one product in one channel".
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ProductChannelKey {
    pub product_id: ProductId,
    pub channel_id: ChannelId,
}

/// Storage failure surfaced to resolvers.
///
/// `Clone` matters here: a dataloader batch shares one result among every
/// pending caller, errors included.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("store backend error: {0}")]
    Backend(String),
}

/// Read-side access to channels, listings and their joins.
///
/// Batch methods return a map keyed by the requested ids; keys with no
/// match are simply absent, never an error. Callers translate absence into
/// a null field.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// All channels, ordered by slug.
    async fn channels(&self) -> Result<Vec<Channel>, StoreError>;

    /// Channel of each given product listing.
    async fn channels_by_product_listing(
        &self,
        ids: &[ProductListingId],
    ) -> Result<HashMap<ProductListingId, Channel>, StoreError>;

    /// Channel of each given variant listing.
    async fn channels_by_variant_listing(
        &self,
        ids: &[VariantListingId],
    ) -> Result<HashMap<VariantListingId, Channel>, StoreError>;

    /// Variant listings grouped per (product, channel) key, ordered by id.
    async fn variant_listings_by_product_channel(
        &self,
        keys: &[ProductChannelKey],
    ) -> Result<HashMap<ProductChannelKey, Vec<VariantChannelListing>>, StoreError>;

    /// One product listing by id.
    async fn product_listing(
        &self,
        id: ProductListingId,
    ) -> Result<Option<ProductChannelListing>, StoreError>;

    /// All product listings in the channel with the given slug, ordered by
    /// id. An unknown slug yields an empty list.
    async fn product_listings_in_channel(
        &self,
        channel_slug: &str,
    ) -> Result<Vec<ProductChannelListing>, StoreError>;

    /// One variant listing by id.
    async fn variant_listing(
        &self,
        id: VariantListingId,
    ) -> Result<Option<VariantChannelListing>, StoreError>;
}
