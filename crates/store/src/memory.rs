//! In-memory catalog store for dev/tests.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use storefront_catalog::{Channel, Product, ProductChannelListing, ProductVariant, VariantChannelListing};
use storefront_core::{
    ChannelId, DomainError, DomainResult, ProductId, ProductListingId, VariantId, VariantListingId,
};

use crate::catalog_store::{CatalogStore, ProductChannelKey, StoreError};

#[derive(Debug, Default)]
struct Tables {
    channels: HashMap<ChannelId, Channel>,
    products: HashMap<ProductId, Product>,
    variants: HashMap<VariantId, ProductVariant>,
    product_listings: HashMap<ProductListingId, ProductChannelListing>,
    variant_listings: HashMap<VariantListingId, VariantChannelListing>,
}

/// Catalog store backed by process-local hash maps.
///
/// Insertion enforces the same referential and uniqueness rules the
/// Postgres schema enforces with constraints, so tests exercise realistic
/// failure modes.
#[derive(Debug, Default)]
pub struct InMemoryCatalogStore {
    inner: RwLock<Tables>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> RwLockReadGuard<'_, Tables> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn tables_mut(&self) -> RwLockWriteGuard<'_, Tables> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }

    pub fn insert_channel(&self, channel: Channel) -> DomainResult<()> {
        let mut tables = self.tables_mut();

        if tables.channels.values().any(|c| c.slug == channel.slug) {
            return Err(DomainError::conflict(format!(
                "channel slug '{}' already exists",
                channel.slug
            )));
        }

        tables.channels.insert(channel.id, channel);
        Ok(())
    }

    pub fn insert_product(&self, product: Product) -> DomainResult<()> {
        let mut tables = self.tables_mut();

        if tables.products.contains_key(&product.id) {
            return Err(DomainError::conflict("product already exists"));
        }

        tables.products.insert(product.id, product);
        Ok(())
    }

    pub fn insert_variant(&self, variant: ProductVariant) -> DomainResult<()> {
        let mut tables = self.tables_mut();

        if !tables.products.contains_key(&variant.product_id) {
            return Err(DomainError::not_found());
        }

        tables.variants.insert(variant.id, variant);
        Ok(())
    }

    pub fn insert_product_listing(&self, listing: ProductChannelListing) -> DomainResult<()> {
        let mut tables = self.tables_mut();

        if !tables.products.contains_key(&listing.product_id)
            || !tables.channels.contains_key(&listing.channel_id)
        {
            return Err(DomainError::not_found());
        }

        let duplicate = tables
            .product_listings
            .values()
            .any(|l| l.product_id == listing.product_id && l.channel_id == listing.channel_id);
        if duplicate {
            return Err(DomainError::conflict(
                "product is already listed in this channel",
            ));
        }

        tables.product_listings.insert(listing.id, listing);
        Ok(())
    }

    pub fn insert_variant_listing(&self, listing: VariantChannelListing) -> DomainResult<()> {
        let mut tables = self.tables_mut();

        if !tables.variants.contains_key(&listing.variant_id) {
            return Err(DomainError::not_found());
        }

        let Some(channel) = tables.channels.get(&listing.channel_id) else {
            return Err(DomainError::not_found());
        };

        if *listing.price.currency() != channel.currency {
            return Err(DomainError::currency_mismatch(format!(
                "listing priced in {} but channel '{}' uses {}",
                listing.price.currency(),
                channel.slug,
                channel.currency
            )));
        }

        let duplicate = tables
            .variant_listings
            .values()
            .any(|l| l.variant_id == listing.variant_id && l.channel_id == listing.channel_id);
        if duplicate {
            return Err(DomainError::conflict(
                "variant is already listed in this channel",
            ));
        }

        tables.variant_listings.insert(listing.id, listing);
        Ok(())
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn channels(&self) -> Result<Vec<Channel>, StoreError> {
        let tables = self.tables();
        let mut channels: Vec<Channel> = tables.channels.values().cloned().collect();
        channels.sort_by(|a, b| a.slug.cmp(&b.slug));
        Ok(channels)
    }

    async fn channels_by_product_listing(
        &self,
        ids: &[ProductListingId],
    ) -> Result<HashMap<ProductListingId, Channel>, StoreError> {
        let tables = self.tables();
        let mut out = HashMap::with_capacity(ids.len());

        for id in ids {
            let Some(listing) = tables.product_listings.get(id) else {
                continue;
            };
            if let Some(channel) = tables.channels.get(&listing.channel_id) {
                out.insert(*id, channel.clone());
            }
        }

        Ok(out)
    }

    async fn channels_by_variant_listing(
        &self,
        ids: &[VariantListingId],
    ) -> Result<HashMap<VariantListingId, Channel>, StoreError> {
        let tables = self.tables();
        let mut out = HashMap::with_capacity(ids.len());

        for id in ids {
            let Some(listing) = tables.variant_listings.get(id) else {
                continue;
            };
            if let Some(channel) = tables.channels.get(&listing.channel_id) {
                out.insert(*id, channel.clone());
            }
        }

        Ok(out)
    }

    async fn variant_listings_by_product_channel(
        &self,
        keys: &[ProductChannelKey],
    ) -> Result<HashMap<ProductChannelKey, Vec<VariantChannelListing>>, StoreError> {
        let tables = self.tables();
        let mut out = HashMap::with_capacity(keys.len());

        for key in keys {
            let mut listings: Vec<VariantChannelListing> = tables
                .variant_listings
                .values()
                .filter(|l| {
                    l.channel_id == key.channel_id
                        && tables
                            .variants
                            .get(&l.variant_id)
                            .is_some_and(|v| v.product_id == key.product_id)
                })
                .cloned()
                .collect();

            if listings.is_empty() {
                continue;
            }

            listings.sort_by_key(|l| *l.id.as_uuid());
            out.insert(*key, listings);
        }

        Ok(out)
    }

    async fn product_listing(
        &self,
        id: ProductListingId,
    ) -> Result<Option<ProductChannelListing>, StoreError> {
        Ok(self.tables().product_listings.get(&id).cloned())
    }

    async fn product_listings_in_channel(
        &self,
        channel_slug: &str,
    ) -> Result<Vec<ProductChannelListing>, StoreError> {
        let tables = self.tables();

        let Some(channel) = tables.channels.values().find(|c| c.slug == channel_slug) else {
            return Ok(Vec::new());
        };

        let mut listings: Vec<ProductChannelListing> = tables
            .product_listings
            .values()
            .filter(|l| l.channel_id == channel.id)
            .cloned()
            .collect();
        listings.sort_by_key(|l| *l.id.as_uuid());

        Ok(listings)
    }

    async fn variant_listing(
        &self,
        id: VariantListingId,
    ) -> Result<Option<VariantChannelListing>, StoreError> {
        Ok(self.tables().variant_listings.get(&id).cloned())
    }
}
