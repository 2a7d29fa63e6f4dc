//! Postgres-backed catalog store.
//!
//! Expected schema (owned by the deployment's migrations, not this crate):
//!
//! | Table | Columns |
//! |-------|---------|
//! | `channel` | `id uuid PK, slug text UNIQUE, name text, currency_code text, is_active bool` |
//! | `product` | `id uuid PK, name text, slug text UNIQUE` |
//! | `product_variant` | `id uuid PK, product_id uuid REFERENCES product, sku text` |
//! | `product_channel_listing` | `id uuid PK, product_id uuid, channel_id uuid, is_published bool, published_at timestamptz NULL, UNIQUE (product_id, channel_id)` |
//! | `product_variant_channel_listing` | `id uuid PK, variant_id uuid, channel_id uuid, currency text, price_amount bigint, cost_price_amount bigint NULL, UNIQUE (variant_id, channel_id)` |
//!
//! Monetary amounts are stored in minor units; `currency` on a variant
//! listing always equals the channel's `currency_code` (enforced on write by
//! the owning service).
//!
//! All lookup methods are plain reads; batch methods use `= ANY($1)` /
//! `UNNEST` so one round trip serves a whole dataloader batch.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::instrument;
use uuid::Uuid;

use storefront_catalog::{Channel, ProductChannelListing, VariantChannelListing};
use storefront_core::{CurrencyCode, Money, ProductListingId, VariantListingId};

use crate::catalog_store::{CatalogStore, ProductChannelKey, StoreError};

/// Catalog store reading from PostgreSQL via a shared connection pool.
#[derive(Debug, Clone)]
pub struct PostgresCatalogStore {
    pool: Arc<PgPool>,
}

impl PostgresCatalogStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }
}

#[derive(FromRow)]
struct ChannelRow {
    id: Uuid,
    slug: String,
    name: String,
    currency_code: String,
    is_active: bool,
}

impl From<ChannelRow> for Channel {
    fn from(row: ChannelRow) -> Self {
        Channel {
            id: row.id.into(),
            slug: row.slug,
            name: row.name,
            currency: CurrencyCode::from(row.currency_code),
            is_active: row.is_active,
        }
    }
}

/// Channel joined through a listing; `listing_id` carries the batch key.
#[derive(FromRow)]
struct ListingChannelRow {
    listing_id: Uuid,
    id: Uuid,
    slug: String,
    name: String,
    currency_code: String,
    is_active: bool,
}

impl ListingChannelRow {
    fn into_channel(self) -> (Uuid, Channel) {
        (
            self.listing_id,
            Channel {
                id: self.id.into(),
                slug: self.slug,
                name: self.name,
                currency: CurrencyCode::from(self.currency_code),
                is_active: self.is_active,
            },
        )
    }
}

#[derive(FromRow)]
struct ProductListingRow {
    id: Uuid,
    product_id: Uuid,
    channel_id: Uuid,
    is_published: bool,
    published_at: Option<DateTime<Utc>>,
}

impl From<ProductListingRow> for ProductChannelListing {
    fn from(row: ProductListingRow) -> Self {
        ProductChannelListing {
            id: row.id.into(),
            product_id: row.product_id.into(),
            channel_id: row.channel_id.into(),
            is_published: row.is_published,
            published_at: row.published_at,
        }
    }
}

#[derive(FromRow)]
struct VariantListingRow {
    id: Uuid,
    variant_id: Uuid,
    channel_id: Uuid,
    currency: String,
    price_amount: i64,
    cost_price_amount: Option<i64>,
}

impl From<VariantListingRow> for VariantChannelListing {
    fn from(row: VariantListingRow) -> Self {
        let currency = CurrencyCode::from(row.currency);
        VariantChannelListing {
            id: row.id.into(),
            variant_id: row.variant_id.into(),
            channel_id: row.channel_id.into(),
            price: Money::new(row.price_amount, currency.clone()),
            cost_price: row.cost_price_amount.map(|a| Money::new(a, currency)),
        }
    }
}

/// Variant listing joined with its product, for grouping by composite key.
#[derive(FromRow)]
struct KeyedVariantListingRow {
    product_id: Uuid,
    id: Uuid,
    variant_id: Uuid,
    channel_id: Uuid,
    currency: String,
    price_amount: i64,
    cost_price_amount: Option<i64>,
}

#[async_trait]
impl CatalogStore for PostgresCatalogStore {
    #[instrument(skip(self), err)]
    async fn channels(&self) -> Result<Vec<Channel>, StoreError> {
        let rows: Vec<ChannelRow> = sqlx::query_as(
            r#"
            SELECT id, slug, name, currency_code, is_active
            FROM channel
            ORDER BY slug ASC
            "#,
        )
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("channels", e))?;

        Ok(rows.into_iter().map(Channel::from).collect())
    }

    #[instrument(skip(self, ids), fields(key_count = ids.len()), err)]
    async fn channels_by_product_listing(
        &self,
        ids: &[ProductListingId],
    ) -> Result<HashMap<ProductListingId, Channel>, StoreError> {
        let raw: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();

        let rows: Vec<ListingChannelRow> = sqlx::query_as(
            r#"
            SELECT l.id AS listing_id, c.id, c.slug, c.name, c.currency_code, c.is_active
            FROM product_channel_listing l
            JOIN channel c ON c.id = l.channel_id
            WHERE l.id = ANY($1)
            "#,
        )
        .bind(&raw)
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("channels_by_product_listing", e))?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let (listing_id, channel) = row.into_channel();
                (ProductListingId::from(listing_id), channel)
            })
            .collect())
    }

    #[instrument(skip(self, ids), fields(key_count = ids.len()), err)]
    async fn channels_by_variant_listing(
        &self,
        ids: &[VariantListingId],
    ) -> Result<HashMap<VariantListingId, Channel>, StoreError> {
        let raw: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();

        let rows: Vec<ListingChannelRow> = sqlx::query_as(
            r#"
            SELECT l.id AS listing_id, c.id, c.slug, c.name, c.currency_code, c.is_active
            FROM product_variant_channel_listing l
            JOIN channel c ON c.id = l.channel_id
            WHERE l.id = ANY($1)
            "#,
        )
        .bind(&raw)
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("channels_by_variant_listing", e))?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let (listing_id, channel) = row.into_channel();
                (VariantListingId::from(listing_id), channel)
            })
            .collect())
    }

    #[instrument(skip(self, keys), fields(key_count = keys.len()), err)]
    async fn variant_listings_by_product_channel(
        &self,
        keys: &[ProductChannelKey],
    ) -> Result<HashMap<ProductChannelKey, Vec<VariantChannelListing>>, StoreError> {
        let product_ids: Vec<Uuid> = keys.iter().map(|k| *k.product_id.as_uuid()).collect();
        let channel_ids: Vec<Uuid> = keys.iter().map(|k| *k.channel_id.as_uuid()).collect();

        let rows: Vec<KeyedVariantListingRow> = sqlx::query_as(
            r#"
            SELECT pv.product_id, l.id, l.variant_id, l.channel_id,
                   l.currency, l.price_amount, l.cost_price_amount
            FROM product_variant_channel_listing l
            JOIN product_variant pv ON pv.id = l.variant_id
            WHERE (pv.product_id, l.channel_id) IN (SELECT * FROM UNNEST($1::uuid[], $2::uuid[]))
            ORDER BY l.id ASC
            "#,
        )
        .bind(&product_ids)
        .bind(&channel_ids)
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("variant_listings_by_product_channel", e))?;

        let mut out: HashMap<ProductChannelKey, Vec<VariantChannelListing>> =
            HashMap::with_capacity(keys.len());
        for row in rows {
            let key = ProductChannelKey {
                product_id: row.product_id.into(),
                channel_id: row.channel_id.into(),
            };
            let listing = VariantChannelListing::from(VariantListingRow {
                id: row.id,
                variant_id: row.variant_id,
                channel_id: row.channel_id,
                currency: row.currency,
                price_amount: row.price_amount,
                cost_price_amount: row.cost_price_amount,
            });
            out.entry(key).or_default().push(listing);
        }

        Ok(out)
    }

    #[instrument(skip(self), fields(listing_id = %id), err)]
    async fn product_listing(
        &self,
        id: ProductListingId,
    ) -> Result<Option<ProductChannelListing>, StoreError> {
        let row: Option<ProductListingRow> = sqlx::query_as(
            r#"
            SELECT id, product_id, channel_id, is_published, published_at
            FROM product_channel_listing
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("product_listing", e))?;

        Ok(row.map(ProductChannelListing::from))
    }

    #[instrument(skip(self), err)]
    async fn product_listings_in_channel(
        &self,
        channel_slug: &str,
    ) -> Result<Vec<ProductChannelListing>, StoreError> {
        let rows: Vec<ProductListingRow> = sqlx::query_as(
            r#"
            SELECT l.id, l.product_id, l.channel_id, l.is_published, l.published_at
            FROM product_channel_listing l
            JOIN channel c ON c.id = l.channel_id
            WHERE c.slug = $1
            ORDER BY l.id ASC
            "#,
        )
        .bind(channel_slug)
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("product_listings_in_channel", e))?;

        Ok(rows.into_iter().map(ProductChannelListing::from).collect())
    }

    #[instrument(skip(self), fields(listing_id = %id), err)]
    async fn variant_listing(
        &self,
        id: VariantListingId,
    ) -> Result<Option<VariantChannelListing>, StoreError> {
        let row: Option<VariantListingRow> = sqlx::query_as(
            r#"
            SELECT id, variant_id, channel_id, currency, price_amount, cost_price_amount
            FROM product_variant_channel_listing
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("variant_listing", e))?;

        Ok(row.map(VariantChannelListing::from))
    }
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    StoreError::Backend(format!("{operation}: {err}"))
}
