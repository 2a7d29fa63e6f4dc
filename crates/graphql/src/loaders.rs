//! Dataloaders batching related-entity lookups within one request.
//!
//! Field resolvers run concurrently during a resolution pass; without
//! batching, every `channel` field would cost its own store round trip (the
//! N+1 problem). Each loader here collects the keys requested during one
//! pass and feeds them to a single batch-shaped [`CatalogStore`] call.
//!
//! [`CatalogLoaders`] is built per incoming request and dropped with it, so
//! the `HashMapCache` behind each loader can never leak results across
//! requests.

use std::collections::HashMap;
use std::sync::Arc;

use async_graphql::dataloader::{DataLoader, HashMapCache, Loader};

use storefront_catalog::{Channel, VariantChannelListing};
use storefront_core::{ProductListingId, VariantListingId};
use storefront_store::{CatalogStore, ProductChannelKey, StoreError};

/// `ProductListingId -> Channel`.
pub struct ChannelByProductListingLoader {
    store: Arc<dyn CatalogStore>,
}

impl ChannelByProductListingLoader {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }
}

impl Loader<ProductListingId> for ChannelByProductListingLoader {
    type Value = Channel;
    type Error = StoreError;

    async fn load(
        &self,
        keys: &[ProductListingId],
    ) -> Result<HashMap<ProductListingId, Channel>, Self::Error> {
        self.store.channels_by_product_listing(keys).await
    }
}

/// `VariantListingId -> Channel`.
pub struct ChannelByVariantListingLoader {
    store: Arc<dyn CatalogStore>,
}

impl ChannelByVariantListingLoader {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }
}

impl Loader<VariantListingId> for ChannelByVariantListingLoader {
    type Value = Channel;
    type Error = StoreError;

    async fn load(
        &self,
        keys: &[VariantListingId],
    ) -> Result<HashMap<VariantListingId, Channel>, Self::Error> {
        self.store.channels_by_variant_listing(keys).await
    }
}

/// `(product, channel) -> variant listings`.
///
/// Feeds every derived pricing field of a product listing (discounted
/// price, purchase cost, margin), so one fetch serves all three.
pub struct VariantListingsByProductChannelLoader {
    store: Arc<dyn CatalogStore>,
}

impl VariantListingsByProductChannelLoader {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }
}

impl Loader<ProductChannelKey> for VariantListingsByProductChannelLoader {
    type Value = Vec<VariantChannelListing>;
    type Error = StoreError;

    async fn load(
        &self,
        keys: &[ProductChannelKey],
    ) -> Result<HashMap<ProductChannelKey, Vec<VariantChannelListing>>, Self::Error> {
        self.store.variant_listings_by_product_channel(keys).await
    }
}

/// All loaders of one request.
///
/// Constructed in the HTTP handler, injected as request data, and dropped
/// when the response is written.
pub struct CatalogLoaders {
    pub channel_by_product_listing: DataLoader<ChannelByProductListingLoader, HashMapCache>,
    pub channel_by_variant_listing: DataLoader<ChannelByVariantListingLoader, HashMapCache>,
    pub variant_listings: DataLoader<VariantListingsByProductChannelLoader, HashMapCache>,
}

impl CatalogLoaders {
    pub fn for_request(store: Arc<dyn CatalogStore>) -> Self {
        Self {
            channel_by_product_listing: DataLoader::with_cache(
                ChannelByProductListingLoader::new(store.clone()),
                tokio::spawn,
                HashMapCache::default(),
            ),
            channel_by_variant_listing: DataLoader::with_cache(
                ChannelByVariantListingLoader::new(store.clone()),
                tokio::spawn,
                HashMapCache::default(),
            ),
            variant_listings: DataLoader::with_cache(
                VariantListingsByProductChannelLoader::new(store),
                tokio::spawn,
                HashMapCache::default(),
            ),
        }
    }
}
