//! Channel listings: the per-channel state of products and variants.
//!
//! A product appears in a channel through a [`ProductChannelListing`]; each of
//! its variants gets its own [`VariantChannelListing`] carrying the price. At
//! most one listing may exist per (product, channel) and per (variant,
//! channel); stores enforce that uniqueness on insert.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storefront_core::{
    ChannelId, DomainError, DomainResult, Money, ProductId, ProductListingId, VariantId,
    VariantListingId,
};

/// Publication state of a product within one channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductChannelListing {
    pub id: ProductListingId,
    pub product_id: ProductId,
    pub channel_id: ChannelId,
    pub is_published: bool,
    pub published_at: Option<DateTime<Utc>>,
}

impl ProductChannelListing {
    /// Create an unpublished listing.
    pub fn new(id: ProductListingId, product_id: ProductId, channel_id: ChannelId) -> Self {
        Self {
            id,
            product_id,
            channel_id,
            is_published: false,
            published_at: None,
        }
    }

    /// Create a listing already published at `published_at`.
    pub fn published(
        id: ProductListingId,
        product_id: ProductId,
        channel_id: ChannelId,
        published_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            product_id,
            channel_id,
            is_published: true,
            published_at: Some(published_at),
        }
    }
}

/// Price data of one variant within one channel.
///
/// `cost_price` is what the merchant pays for the variant; it is optional
/// because not every merchant tracks costs. Both amounts are denominated in
/// the channel currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantChannelListing {
    pub id: VariantListingId,
    pub variant_id: VariantId,
    pub channel_id: ChannelId,
    pub price: Money,
    pub cost_price: Option<Money>,
}

impl VariantChannelListing {
    pub fn new(
        id: VariantListingId,
        variant_id: VariantId,
        channel_id: ChannelId,
        price: Money,
        cost_price: Option<Money>,
    ) -> DomainResult<Self> {
        if price.amount() < 0 {
            return Err(DomainError::validation("price cannot be negative"));
        }

        if let Some(cost) = &cost_price {
            if cost.amount() < 0 {
                return Err(DomainError::validation("cost price cannot be negative"));
            }
            if !cost.same_currency(&price) {
                return Err(DomainError::currency_mismatch(format!(
                    "cost price in {} but price in {}",
                    cost.currency(),
                    price.currency()
                )));
            }
        }

        Ok(Self {
            id,
            variant_id,
            channel_id,
            price,
            cost_price,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::CurrencyCode;

    fn usd(amount: i64) -> Money {
        Money::new(amount, CurrencyCode::from("USD"))
    }

    #[test]
    fn accepts_listing_without_cost() {
        let listing = VariantChannelListing::new(
            VariantListingId::new(),
            VariantId::new(),
            ChannelId::new(),
            usd(10_000),
            None,
        )
        .unwrap();
        assert!(listing.cost_price.is_none());
    }

    #[test]
    fn rejects_negative_price() {
        let err = VariantChannelListing::new(
            VariantListingId::new(),
            VariantId::new(),
            ChannelId::new(),
            usd(-1),
            None,
        )
        .unwrap_err();
        match err {
            DomainError::Validation(_) => {}
            _ => panic!("Expected Validation error for negative price"),
        }
    }

    #[test]
    fn rejects_cost_in_another_currency() {
        let err = VariantChannelListing::new(
            VariantListingId::new(),
            VariantId::new(),
            ChannelId::new(),
            usd(10_000),
            Some(Money::new(8_000, CurrencyCode::from("EUR"))),
        )
        .unwrap_err();
        match err {
            DomainError::CurrencyMismatch(_) => {}
            _ => panic!("Expected CurrencyMismatch error"),
        }
    }

    #[test]
    fn published_listing_carries_timestamp() {
        let at = Utc::now();
        let listing =
            ProductChannelListing::published(ProductListingId::new(), ProductId::new(), ChannelId::new(), at);
        assert!(listing.is_published);
        assert_eq!(listing.published_at, Some(at));
    }
}
