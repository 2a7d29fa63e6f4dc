use serde::{Deserialize, Serialize};

use storefront_core::{ChannelId, CurrencyCode, DomainError, DomainResult};

/// A sales channel: the storefront/region context a product is listed in.
///
/// Every channel carries exactly one currency; listing prices in that channel
/// are denominated in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub id: ChannelId,
    pub slug: String,
    pub name: String,
    pub currency: CurrencyCode,
    pub is_active: bool,
}

impl Channel {
    /// Create an active channel. Slug and name must be non-empty.
    pub fn new(
        id: ChannelId,
        slug: impl Into<String>,
        name: impl Into<String>,
        currency: CurrencyCode,
    ) -> DomainResult<Self> {
        let slug = slug.into();
        let name = name.into();

        if slug.trim().is_empty() {
            return Err(DomainError::validation("slug cannot be empty"));
        }
        if name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }

        Ok(Self {
            id,
            slug,
            name,
            currency,
            is_active: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_channel_is_active() {
        let channel = Channel::new(
            ChannelId::new(),
            "us-web",
            "US Web Store",
            CurrencyCode::from("USD"),
        )
        .unwrap();
        assert!(channel.is_active);
        assert_eq!(channel.currency.as_str(), "USD");
    }

    #[test]
    fn rejects_blank_slug() {
        let err = Channel::new(ChannelId::new(), "  ", "US", CurrencyCode::from("USD")).unwrap_err();
        match err {
            DomainError::Validation(_) => {}
            _ => panic!("Expected Validation error for blank slug"),
        }
    }
}
