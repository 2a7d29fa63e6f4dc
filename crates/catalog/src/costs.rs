//! Purchase-cost and margin computations over variant channel listings.
//!
//! These are pure functions: callers fetch the variant listings for one
//! product in one channel and hand them here. Anything undefined (no
//! variants, zero price, mixed currencies) comes back as `None` rather than
//! an error; the API renders that as an absent field.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, Money, MoneyRange, ValueObject};

use crate::listing::VariantChannelListing;

/// How cost aggregation treats variants without a recorded cost price.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingCostPolicy {
    /// Any variant without a cost makes the product-level aggregates absent.
    #[default]
    NullRange,

    /// Variants without a cost are left out of the aggregates.
    Exclude,

    /// Missing costs count as zero in the cost range. Margins still skip
    /// them: a fabricated 100% margin helps nobody.
    TreatAsZero,
}

impl FromStr for MissingCostPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "null_range" => Ok(Self::NullRange),
            "exclude" => Ok(Self::Exclude),
            "treat_as_zero" => Ok(Self::TreatAsZero),
            other => Err(DomainError::validation(format!(
                "unknown missing-cost policy '{other}' (expected null_range, exclude or treat_as_zero)"
            ))),
        }
    }
}

/// Relative margin of a variant or product, in whole percent.
///
/// For a product this is a range over its variants; a single variant
/// collapses to `start == stop`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Margin {
    pub start: i32,
    pub stop: i32,
}

impl ValueObject for Margin {}

/// Cost-side aggregates of one product in one channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCosts {
    pub purchase_cost: Option<MoneyRange>,
    pub margin: Option<Margin>,
}

/// Margin of a single variant listing, in whole percent.
///
/// Computed as `round(100 * (price - cost) / price)`, rounding half away
/// from zero. Absent when the cost is missing, the price is not positive,
/// or price and cost are in different currencies.
pub fn variant_margin(listing: &VariantChannelListing) -> Option<i32> {
    let cost = listing.cost_price.as_ref()?;
    let price = &listing.price;

    if price.amount() <= 0 || !price.same_currency(cost) {
        return None;
    }

    let ratio = (price.amount() - cost.amount()) as f64 / price.amount() as f64;
    Some((ratio * 100.0).round() as i32)
}

/// Range spanned by the variants' cost prices, lowest to highest.
///
/// Absent for an empty listing set, for mixed currencies, and (under
/// [`MissingCostPolicy::NullRange`]) whenever any variant lacks a cost.
pub fn purchase_cost_range(
    listings: &[VariantChannelListing],
    policy: MissingCostPolicy,
) -> Option<MoneyRange> {
    if listings.is_empty() {
        return None;
    }

    let mut costs: Vec<Money> = Vec::with_capacity(listings.len());
    for listing in listings {
        match (&listing.cost_price, policy) {
            (Some(cost), _) => costs.push(cost.clone()),
            (None, MissingCostPolicy::NullRange) => return None,
            (None, MissingCostPolicy::Exclude) => {}
            (None, MissingCostPolicy::TreatAsZero) => {
                costs.push(Money::zero(listing.price.currency().clone()));
            }
        }
    }

    let currency = costs.first()?.currency().clone();
    if costs.iter().any(|c| *c.currency() != currency) {
        return None;
    }

    let start = costs.iter().map(|c| c.amount()).min()?;
    let stop = costs.iter().map(|c| c.amount()).max()?;

    MoneyRange::new(Money::new(start, currency.clone()), Money::new(stop, currency)).ok()
}

/// Range spanned by the variants' margins, lowest to highest percent.
///
/// Variants whose margin is undefined (zero price, currency mismatch) are
/// skipped; if none remain, the range is absent. Under
/// [`MissingCostPolicy::NullRange`] a single missing cost blanks the range.
pub fn margin_range(
    listings: &[VariantChannelListing],
    policy: MissingCostPolicy,
) -> Option<Margin> {
    if listings.is_empty() {
        return None;
    }

    if policy == MissingCostPolicy::NullRange && listings.iter().any(|l| l.cost_price.is_none()) {
        return None;
    }

    let margins: Vec<i32> = listings.iter().filter_map(variant_margin).collect();
    let start = *margins.iter().min()?;
    let stop = *margins.iter().max()?;

    Some(Margin { start, stop })
}

/// Both aggregates in one call, the shape the product resolvers need.
pub fn product_costs(listings: &[VariantChannelListing], policy: MissingCostPolicy) -> ProductCosts {
    ProductCosts {
        purchase_cost: purchase_cost_range(listings, policy),
        margin: margin_range(listings, policy),
    }
}

/// Price of the cheapest variant in the channel.
///
/// This is what product cards display as "from" pricing. Absent for an
/// empty set or mixed currencies.
pub fn cheapest_variant_price(listings: &[VariantChannelListing]) -> Option<Money> {
    let first = listings.first()?;
    if listings.iter().any(|l| !l.price.same_currency(&first.price)) {
        return None;
    }

    listings
        .iter()
        .map(|l| &l.price)
        .min_by_key(|p| p.amount())
        .cloned()
}
