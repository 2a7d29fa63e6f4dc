//! GraphQL object types projecting the catalog domain.
//!
//! Each type wraps its domain struct; resolvers read stored attributes
//! directly and derive the rest through the per-request loaders and the
//! pure cost computations. Cost-side fields (`purchaseCost`, `margin`,
//! `costPrice`) are gated on the `products.manage` permission and resolve
//! to null for callers without it.

use async_graphql::{Context, ID, Object, Result};
use chrono::{DateTime, Utc};

use storefront_catalog::costs::{self, MissingCostPolicy};
use storefront_store::ProductChannelKey;

use crate::loaders::CatalogLoaders;
use crate::requester::Requester;

fn can_manage_products(ctx: &Context<'_>) -> bool {
    // No requester data means nobody vouched for the caller; gate closed.
    ctx.data_opt::<Requester>()
        .is_some_and(Requester::can_manage_products)
}

fn missing_cost_policy(ctx: &Context<'_>) -> MissingCostPolicy {
    ctx.data_opt::<MissingCostPolicy>().copied().unwrap_or_default()
}

/// An amount of money in minor units of its currency.
pub struct Money(storefront_core::Money);

#[Object]
impl Money {
    /// Amount in the smallest currency unit (e.g. cents).
    async fn amount(&self) -> i64 {
        self.0.amount()
    }

    /// ISO 4217 currency code.
    async fn currency(&self) -> &str {
        self.0.currency().as_str()
    }
}

impl From<storefront_core::Money> for Money {
    fn from(money: storefront_core::Money) -> Self {
        Self(money)
    }
}

/// An inclusive money range, `start <= stop`, one currency.
pub struct MoneyRange(storefront_core::MoneyRange);

#[Object]
impl MoneyRange {
    async fn start(&self) -> Money {
        Money(self.0.start().clone())
    }

    async fn stop(&self) -> Money {
        Money(self.0.stop().clone())
    }
}

impl From<storefront_core::MoneyRange> for MoneyRange {
    fn from(range: storefront_core::MoneyRange) -> Self {
        Self(range)
    }
}

/// Margin percentage range over a product's variants.
pub struct Margin(costs::Margin);

#[Object]
impl Margin {
    /// Lowest variant margin, in whole percent.
    async fn start(&self) -> i32 {
        self.0.start
    }

    /// Highest variant margin, in whole percent.
    async fn stop(&self) -> i32 {
        self.0.stop
    }
}

impl From<costs::Margin> for Margin {
    fn from(margin: costs::Margin) -> Self {
        Self(margin)
    }
}

/// A sales channel.
pub struct Channel(storefront_catalog::Channel);

#[Object]
impl Channel {
    async fn id(&self) -> ID {
        ID(self.0.id.to_string())
    }

    async fn slug(&self) -> &str {
        &self.0.slug
    }

    async fn name(&self) -> &str {
        &self.0.name
    }

    async fn currency_code(&self) -> &str {
        self.0.currency.as_str()
    }

    async fn is_active(&self) -> bool {
        self.0.is_active
    }
}

impl From<storefront_catalog::Channel> for Channel {
    fn from(channel: storefront_catalog::Channel) -> Self {
        Self(channel)
    }
}

/// Publication and pricing state of a product within one channel.
pub struct ProductChannelListing(storefront_catalog::ProductChannelListing);

impl ProductChannelListing {
    /// Variant listings of this product in this channel, loader-backed so
    /// the three derived pricing fields share one fetch.
    async fn variant_listings(
        &self,
        ctx: &Context<'_>,
    ) -> Result<Vec<storefront_catalog::VariantChannelListing>> {
        let loaders = ctx.data::<CatalogLoaders>()?;
        let key = ProductChannelKey {
            product_id: self.0.product_id,
            channel_id: self.0.channel_id,
        };

        Ok(loaders.variant_listings.load_one(key).await?.unwrap_or_default())
    }
}

#[Object]
impl ProductChannelListing {
    async fn id(&self) -> ID {
        ID(self.0.id.to_string())
    }

    async fn channel(&self, ctx: &Context<'_>) -> Result<Option<Channel>> {
        let loaders = ctx.data::<CatalogLoaders>()?;
        let channel = loaders
            .channel_by_product_listing
            .load_one(self.0.id)
            .await?;

        Ok(channel.map(Channel::from))
    }

    async fn is_published(&self) -> bool {
        self.0.is_published
    }

    async fn published_at(&self) -> Option<DateTime<Utc>> {
        self.0.published_at
    }

    /// Price of the cheapest variant in the channel.
    async fn discounted_price(&self, ctx: &Context<'_>) -> Result<Option<Money>> {
        let listings = self.variant_listings(ctx).await?;
        Ok(costs::cheapest_variant_price(&listings).map(Money::from))
    }

    /// Range of the variants' cost prices. Requires `products.manage`.
    async fn purchase_cost(&self, ctx: &Context<'_>) -> Result<Option<MoneyRange>> {
        if !can_manage_products(ctx) {
            return Ok(None);
        }

        let listings = self.variant_listings(ctx).await?;
        let policy = missing_cost_policy(ctx);
        Ok(costs::purchase_cost_range(&listings, policy).map(MoneyRange::from))
    }

    /// Range of the variants' margin percentages. Requires `products.manage`.
    async fn margin(&self, ctx: &Context<'_>) -> Result<Option<Margin>> {
        if !can_manage_products(ctx) {
            return Ok(None);
        }

        let listings = self.variant_listings(ctx).await?;
        let policy = missing_cost_policy(ctx);
        Ok(costs::margin_range(&listings, policy).map(Margin::from))
    }
}

impl From<storefront_catalog::ProductChannelListing> for ProductChannelListing {
    fn from(listing: storefront_catalog::ProductChannelListing) -> Self {
        Self(listing)
    }
}

/// Price state of one product variant within one channel.
pub struct ProductVariantChannelListing(storefront_catalog::VariantChannelListing);

#[Object]
impl ProductVariantChannelListing {
    async fn id(&self) -> ID {
        ID(self.0.id.to_string())
    }

    async fn channel(&self, ctx: &Context<'_>) -> Result<Option<Channel>> {
        let loaders = ctx.data::<CatalogLoaders>()?;
        let channel = loaders
            .channel_by_variant_listing
            .load_one(self.0.id)
            .await?;

        Ok(channel.map(Channel::from))
    }

    async fn price(&self) -> Money {
        Money(self.0.price.clone())
    }

    /// What the merchant pays for the variant. Requires `products.manage`.
    async fn cost_price(&self, ctx: &Context<'_>) -> Option<Money> {
        if !can_manage_products(ctx) {
            return None;
        }

        self.0.cost_price.clone().map(Money::from)
    }

    /// Margin percentage of this variant. Requires `products.manage`.
    async fn margin(&self, ctx: &Context<'_>) -> Option<i32> {
        if !can_manage_products(ctx) {
            return None;
        }

        costs::variant_margin(&self.0)
    }
}

impl From<storefront_catalog::VariantChannelListing> for ProductVariantChannelListing {
    fn from(listing: storefront_catalog::VariantChannelListing) -> Self {
        Self(listing)
    }
}
