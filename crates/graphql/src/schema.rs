//! Schema construction.

use std::sync::Arc;

use async_graphql::{EmptyMutation, EmptySubscription, Schema};

use storefront_catalog::costs::MissingCostPolicy;
use storefront_store::CatalogStore;

use crate::query::QueryRoot;

pub type CatalogSchema = Schema<QueryRoot, EmptyMutation, EmptySubscription>;

/// Build the schema over a catalog store.
///
/// The store and the missing-cost policy live in schema data; the
/// per-request pieces ([`crate::CatalogLoaders`], [`crate::Requester`]) are
/// injected as request data by the HTTP layer. Depth and complexity limits
/// bound what a single query may ask for.
pub fn build_schema(store: Arc<dyn CatalogStore>, policy: MissingCostPolicy) -> CatalogSchema {
    Schema::build(QueryRoot, EmptyMutation, EmptySubscription)
        .limit_depth(8)
        .limit_complexity(200)
        .data(store)
        .data(policy)
        .finish()
}

/// Export the schema in SDL form, for tooling and client codegen.
pub fn schema_sdl() -> String {
    Schema::build(QueryRoot, EmptyMutation, EmptySubscription)
        .finish()
        .sdl()
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_graphql::Request;
    use serde_json::{Value, json};

    use storefront_auth::{Permission, Principal, PrincipalId, Role};
    use storefront_catalog::{
        Channel, Product, ProductChannelListing, ProductVariant, VariantChannelListing,
    };
    use storefront_core::{
        ChannelId, CurrencyCode, Money, ProductId, ProductListingId, VariantId, VariantListingId,
    };
    use storefront_store::InMemoryCatalogStore;

    use crate::loaders::CatalogLoaders;
    use crate::requester::Requester;

    struct Fixture {
        store: Arc<InMemoryCatalogStore>,
        product_listing: ProductListingId,
        variant_listings: Vec<VariantListingId>,
    }

    /// One channel, one product, variants priced/costed per `variants`.
    fn fixture(variants: &[(i64, Option<i64>)]) -> Fixture {
        let store = InMemoryCatalogStore::new();

        let channel = Channel::new(
            ChannelId::new(),
            "us-web",
            "US Web Store",
            CurrencyCode::from("USD"),
        )
        .unwrap();
        store.insert_channel(channel.clone()).unwrap();

        let product = Product::new(ProductId::new(), "Monospace Tee", "monospace-tee").unwrap();
        store.insert_product(product.clone()).unwrap();

        let mut variant_listings = Vec::new();
        for (i, (price, cost)) in variants.iter().enumerate() {
            let variant =
                ProductVariant::new(VariantId::new(), product.id, format!("TEE-{i}")).unwrap();
            store.insert_variant(variant.clone()).unwrap();

            let listing = VariantChannelListing::new(
                VariantListingId::new(),
                variant.id,
                channel.id,
                Money::new(*price, CurrencyCode::from("USD")),
                cost.map(|c| Money::new(c, CurrencyCode::from("USD"))),
            )
            .unwrap();
            store.insert_variant_listing(listing.clone()).unwrap();
            variant_listings.push(listing.id);
        }

        let product_listing =
            ProductChannelListing::new(ProductListingId::new(), product.id, channel.id);
        store.insert_product_listing(product_listing.clone()).unwrap();

        Fixture {
            store: Arc::new(store),
            product_listing: product_listing.id,
            variant_listings,
        }
    }

    fn merchandiser() -> Requester {
        Requester::Authenticated(Principal {
            principal_id: PrincipalId::new(),
            roles: vec![Role::new("merchandiser")],
            permissions: vec![Permission::manage_products()],
        })
    }

    async fn execute(f: &Fixture, requester: Requester, query: String) -> serde_json::Value {
        let store: Arc<dyn storefront_store::CatalogStore> = f.store.clone();
        let schema = build_schema(store.clone(), MissingCostPolicy::NullRange);

        let response = schema
            .execute(
                Request::new(query)
                    .data(requester)
                    .data(CatalogLoaders::for_request(store)),
            )
            .await;
        assert!(response.errors.is_empty(), "errors: {:?}", response.errors);

        match response.data.into_json() {
            Ok(data) => data,
            Err(e) => panic!("non-JSON response data: {e}"),
        }
    }

    #[tokio::test]
    async fn variant_margin_is_relative_to_price() {
        let f = fixture(&[(10_000, Some(8_000))]);
        let query = format!(
            r#"{{ productVariantChannelListing(id: "{}") {{ margin costPrice {{ amount }} }} }}"#,
            f.variant_listings[0]
        );

        let data = execute(&f, merchandiser(), query).await;
        assert_eq!(data["productVariantChannelListing"]["margin"], json!(20));
        assert_eq!(
            data["productVariantChannelListing"]["costPrice"]["amount"],
            json!(8_000)
        );
    }

    #[tokio::test]
    async fn zero_price_variant_margin_is_null() {
        let f = fixture(&[(0, Some(0))]);
        let query = format!(
            r#"{{ productVariantChannelListing(id: "{}") {{ margin }} }}"#,
            f.variant_listings[0]
        );

        let data = execute(&f, merchandiser(), query).await;
        assert_eq!(data["productVariantChannelListing"]["margin"], Value::Null);
    }

    #[tokio::test]
    async fn product_aggregates_span_the_variants() {
        // Costs 5_000 and 7_000 against prices 10_000 and 12_000: margins
        // 50% and 42%.
        let f = fixture(&[(10_000, Some(5_000)), (12_000, Some(7_000))]);
        let query = format!(
            r#"{{ productChannelListing(id: "{}") {{
                discountedPrice {{ amount currency }}
                purchaseCost {{ start {{ amount }} stop {{ amount }} }}
                margin {{ start stop }}
            }} }}"#,
            f.product_listing
        );

        let data = execute(&f, merchandiser(), query).await;
        let listing = &data["productChannelListing"];
        assert_eq!(listing["discountedPrice"]["amount"], json!(10_000));
        assert_eq!(listing["discountedPrice"]["currency"], json!("USD"));
        assert_eq!(listing["purchaseCost"]["start"]["amount"], json!(5_000));
        assert_eq!(listing["purchaseCost"]["stop"]["amount"], json!(7_000));
        assert_eq!(listing["margin"], json!({ "start": 42, "stop": 50 }));
    }

    #[tokio::test]
    async fn missing_cost_blanks_aggregates_under_default_policy() {
        let f = fixture(&[(10_000, Some(5_000)), (12_000, None)]);
        let query = format!(
            r#"{{ productChannelListing(id: "{}") {{
                purchaseCost {{ start {{ amount }} }}
                margin {{ start stop }}
            }} }}"#,
            f.product_listing
        );

        let data = execute(&f, merchandiser(), query).await;
        let listing = &data["productChannelListing"];
        assert_eq!(listing["purchaseCost"], Value::Null);
        assert_eq!(listing["margin"], Value::Null);
    }

    #[tokio::test]
    async fn gated_fields_are_null_without_permission_not_errors() {
        let f = fixture(&[(10_000, Some(8_000))]);
        let query = format!(
            r#"{{
                productChannelListing(id: "{}") {{
                    isPublished
                    discountedPrice {{ amount }}
                    purchaseCost {{ start {{ amount }} }}
                    margin {{ start }}
                }}
                productVariantChannelListing(id: "{}") {{
                    price {{ amount }}
                    costPrice {{ amount }}
                    margin
                }}
            }}"#,
            f.product_listing, f.variant_listings[0]
        );

        let data = execute(&f, Requester::Anonymous, query).await;

        // Ungated fields resolve for everyone.
        let listing = &data["productChannelListing"];
        assert_eq!(listing["isPublished"], json!(false));
        assert_eq!(listing["discountedPrice"]["amount"], json!(10_000));
        let variant = &data["productVariantChannelListing"];
        assert_eq!(variant["price"]["amount"], json!(10_000));

        // Gated fields soft-fail to null.
        assert_eq!(listing["purchaseCost"], Value::Null);
        assert_eq!(listing["margin"], Value::Null);
        assert_eq!(variant["costPrice"], Value::Null);
        assert_eq!(variant["margin"], Value::Null);
    }

    #[tokio::test]
    async fn unrelated_permission_does_not_open_the_gate() {
        let f = fixture(&[(10_000, Some(8_000))]);
        let requester = Requester::Authenticated(Principal {
            principal_id: PrincipalId::new(),
            roles: vec![Role::new("support")],
            permissions: vec![Permission::new("orders.view")],
        });

        let query = format!(
            r#"{{ productVariantChannelListing(id: "{}") {{ margin }} }}"#,
            f.variant_listings[0]
        );
        let data = execute(&f, requester, query).await;
        assert_eq!(data["productVariantChannelListing"]["margin"], Value::Null);
    }

    #[tokio::test]
    async fn unknown_listing_resolves_to_null() {
        let f = fixture(&[(10_000, None)]);
        let query = format!(
            r#"{{ productChannelListing(id: "{}") {{ id }} }}"#,
            ProductListingId::new()
        );

        let data = execute(&f, Requester::Anonymous, query).await;
        assert_eq!(data["productChannelListing"], Value::Null);
    }

    #[tokio::test]
    async fn malformed_id_is_an_input_error() {
        let f = fixture(&[(10_000, None)]);
        let store: Arc<dyn storefront_store::CatalogStore> = f.store.clone();
        let schema = build_schema(store.clone(), MissingCostPolicy::NullRange);

        let response = schema
            .execute(
                Request::new(r#"{ productChannelListing(id: "not-a-uuid") { id } }"#)
                    .data(Requester::Anonymous)
                    .data(CatalogLoaders::for_request(store)),
            )
            .await;

        assert!(!response.errors.is_empty());
    }

    #[tokio::test]
    async fn channel_field_resolves_through_the_loader() {
        let f = fixture(&[(10_000, None)]);
        let query = format!(
            r#"{{ productChannelListing(id: "{}") {{ channel {{ slug currencyCode isActive }} }} }}"#,
            f.product_listing
        );

        let data = execute(&f, Requester::Anonymous, query).await;
        assert_eq!(
            data["productChannelListing"]["channel"],
            json!({ "slug": "us-web", "currencyCode": "USD", "isActive": true })
        );
    }

    #[tokio::test]
    async fn listings_filter_by_channel_slug() {
        let f = fixture(&[(10_000, None)]);

        let data = execute(
            &f,
            Requester::Anonymous,
            r#"{ productChannelListings(channel: "us-web") { id } }"#.to_string(),
        )
        .await;
        assert_eq!(
            data["productChannelListings"][0]["id"],
            json!(f.product_listing.to_string())
        );

        let data = execute(
            &f,
            Requester::Anonymous,
            r#"{ productChannelListings(channel: "eu-web") { id } }"#.to_string(),
        )
        .await;
        assert_eq!(data["productChannelListings"], json!([]));
    }

    #[test]
    fn sdl_exposes_the_catalog_types() {
        let sdl = schema_sdl();
        for name in [
            "type ProductChannelListing",
            "type ProductVariantChannelListing",
            "type Channel",
            "type Money",
            "type MoneyRange",
            "type Margin",
        ] {
            assert!(sdl.contains(name), "SDL missing `{name}`:\n{sdl}");
        }
    }
}
