//! Query root.

use std::sync::Arc;

use async_graphql::{Context, ID, Object, Result};

use storefront_core::{ProductListingId, VariantListingId};
use storefront_store::CatalogStore;

use crate::objects::{Channel, ProductChannelListing, ProductVariantChannelListing};

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// All sales channels, ordered by slug.
    async fn channels(&self, ctx: &Context<'_>) -> Result<Vec<Channel>> {
        let store = ctx.data::<Arc<dyn CatalogStore>>()?;
        Ok(store.channels().await?.into_iter().map(Channel::from).collect())
    }

    /// One product channel listing by id, or null if it does not exist.
    async fn product_channel_listing(
        &self,
        ctx: &Context<'_>,
        id: ID,
    ) -> Result<Option<ProductChannelListing>> {
        let id: ProductListingId = id.parse()?;

        let store = ctx.data::<Arc<dyn CatalogStore>>()?;
        Ok(store
            .product_listing(id)
            .await?
            .map(ProductChannelListing::from))
    }

    /// Product channel listings of the channel with the given slug. An
    /// unknown slug yields an empty list.
    async fn product_channel_listings(
        &self,
        ctx: &Context<'_>,
        channel: String,
    ) -> Result<Vec<ProductChannelListing>> {
        let store = ctx.data::<Arc<dyn CatalogStore>>()?;
        Ok(store
            .product_listings_in_channel(&channel)
            .await?
            .into_iter()
            .map(ProductChannelListing::from)
            .collect())
    }

    /// One variant channel listing by id, or null if it does not exist.
    async fn product_variant_channel_listing(
        &self,
        ctx: &Context<'_>,
        id: ID,
    ) -> Result<Option<ProductVariantChannelListing>> {
        let id: VariantListingId = id.parse()?;

        let store = ctx.data::<Arc<dyn CatalogStore>>()?;
        Ok(store
            .variant_listing(id)
            .await?
            .map(ProductVariantChannelListing::from))
    }
}
