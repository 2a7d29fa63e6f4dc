use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult, ProductId, VariantId};

/// A sellable product. Channel-specific state (publication, pricing) lives on
/// the listings, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub slug: String,
}

impl Product {
    pub fn new(id: ProductId, name: impl Into<String>, slug: impl Into<String>) -> DomainResult<Self> {
        let name = name.into();
        let slug = slug.into();

        if name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if slug.trim().is_empty() {
            return Err(DomainError::validation("slug cannot be empty"));
        }

        Ok(Self { id, name, slug })
    }
}

/// A concrete purchasable variant of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductVariant {
    pub id: VariantId,
    pub product_id: ProductId,
    pub sku: String,
}

impl ProductVariant {
    pub fn new(id: VariantId, product_id: ProductId, sku: impl Into<String>) -> DomainResult<Self> {
        let sku = sku.into();

        if sku.trim().is_empty() {
            return Err(DomainError::validation("SKU cannot be empty"));
        }

        Ok(Self { id, product_id, sku })
    }
}
