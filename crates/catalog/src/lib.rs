//! `storefront-catalog` — catalog domain model and pricing computations.
//!
//! Channels, products, variants and their channel listings, plus the pure
//! cost/margin computations the API exposes. No IO lives here.

pub mod channel;
pub mod costs;
pub mod listing;
pub mod product;

pub use channel::Channel;
pub use costs::{Margin, MissingCostPolicy, ProductCosts};
pub use listing::{ProductChannelListing, VariantChannelListing};
pub use product::{Product, ProductVariant};
