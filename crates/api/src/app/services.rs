//! Store selection and schema wiring.

use std::sync::Arc;

use anyhow::Context as _;
use chrono::Utc;

use storefront_catalog::costs::MissingCostPolicy;
use storefront_catalog::{
    Channel, Product, ProductChannelListing, ProductVariant, VariantChannelListing,
};
use storefront_core::{
    ChannelId, CurrencyCode, Money, ProductId, ProductListingId, VariantId, VariantListingId,
};
use storefront_graphql::{CatalogSchema, build_schema};
use storefront_store::{CatalogStore, InMemoryCatalogStore, PostgresCatalogStore};

pub struct AppServices {
    pub store: Arc<dyn CatalogStore>,
    pub schema: CatalogSchema,
}

impl AppServices {
    pub fn new(store: Arc<dyn CatalogStore>, policy: MissingCostPolicy) -> Self {
        let schema = build_schema(store.clone(), policy);
        Self { store, schema }
    }
}

/// Build services from the environment.
///
/// `USE_PERSISTENT_STORE=true` selects the Postgres store (requires
/// `DATABASE_URL`); otherwise an in-memory store is used, seeded with a demo
/// catalog when `SEED_DEMO_CATALOG=true`. `MISSING_COST_POLICY` picks the
/// cost aggregation policy (default `null_range`).
pub async fn build_services() -> anyhow::Result<AppServices> {
    let policy = match std::env::var("MISSING_COST_POLICY") {
        Ok(raw) => raw.parse::<MissingCostPolicy>()?,
        Err(_) => MissingCostPolicy::default(),
    };

    let use_persistent = std::env::var("USE_PERSISTENT_STORE")
        .unwrap_or_else(|_| "false".to_string())
        .parse::<bool>()
        .unwrap_or(false);

    let store: Arc<dyn CatalogStore> = if use_persistent {
        let url = std::env::var("DATABASE_URL")
            .context("USE_PERSISTENT_STORE=true requires DATABASE_URL")?;
        let pool = sqlx::PgPool::connect(&url)
            .await
            .context("failed to connect to postgres")?;

        tracing::info!("using postgres catalog store");
        Arc::new(PostgresCatalogStore::new(pool))
    } else {
        let store = InMemoryCatalogStore::new();

        let seed = std::env::var("SEED_DEMO_CATALOG")
            .unwrap_or_else(|_| "false".to_string())
            .parse::<bool>()
            .unwrap_or(false);
        if seed {
            seed_demo_catalog(&store)?;
            tracing::info!("seeded demo catalog");
        }

        tracing::info!("using in-memory catalog store");
        Arc::new(store)
    };

    Ok(AppServices::new(store, policy))
}

/// A small catalog for poking at the API without a database: one channel,
/// one product, two variants with distinct costs.
fn seed_demo_catalog(store: &InMemoryCatalogStore) -> anyhow::Result<()> {
    let usd = CurrencyCode::from("USD");

    let channel = Channel::new(ChannelId::new(), "us-web", "US Web Store", usd.clone())?;
    store.insert_channel(channel.clone())?;

    let product = Product::new(ProductId::new(), "Monospace Tee", "monospace-tee")?;
    store.insert_product(product.clone())?;

    for (sku, price, cost) in [("TEE-S", 10_000, 5_000), ("TEE-M", 12_000, 7_000)] {
        let variant = ProductVariant::new(VariantId::new(), product.id, sku)?;
        store.insert_variant(variant.clone())?;
        store.insert_variant_listing(VariantChannelListing::new(
            VariantListingId::new(),
            variant.id,
            channel.id,
            Money::new(price, usd.clone()),
            Some(Money::new(cost, usd.clone())),
        )?)?;
    }

    store.insert_product_listing(ProductChannelListing::published(
        ProductListingId::new(),
        product.id,
        channel.id,
        Utc::now(),
    ))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn demo_seed_is_internally_consistent() {
        let store = InMemoryCatalogStore::new();
        seed_demo_catalog(&store).unwrap();

        let listings = store.product_listings_in_channel("us-web").await.unwrap();
        assert_eq!(listings.len(), 1);

        let key = storefront_store::ProductChannelKey {
            product_id: listings[0].product_id,
            channel_id: listings[0].channel_id,
        };
        let grouped = store
            .variant_listings_by_product_channel(&[key])
            .await
            .unwrap();
        assert_eq!(grouped[&key].len(), 2);
    }
}
