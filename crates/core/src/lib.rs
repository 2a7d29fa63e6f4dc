//! `storefront-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod error;
pub mod id;
pub mod money;
pub mod value_object;

pub use error::{DomainError, DomainResult};
pub use id::{ChannelId, ProductId, ProductListingId, VariantId, VariantListingId};
pub use money::{CurrencyCode, Money, MoneyRange};
pub use value_object::ValueObject;
