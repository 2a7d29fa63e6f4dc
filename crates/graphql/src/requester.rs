//! The identity a GraphQL request executes as.
//!
//! Sensitive fields soft-fail: lacking a permission turns the field into an
//! absent value instead of an error, matching GraphQL partial-response
//! semantics. [`Requester`] carries exactly what that decision needs.

use storefront_auth::{Permission, Principal, is_authorized};

/// Request identity injected into the GraphQL context by the HTTP layer.
///
/// No token on the request means [`Requester::Anonymous`]: the query still
/// runs, gated fields come back null.
#[derive(Debug, Clone)]
pub enum Requester {
    Anonymous,
    Authenticated(Principal),
}

impl Requester {
    pub fn can(&self, required: &Permission) -> bool {
        match self {
            Requester::Anonymous => false,
            Requester::Authenticated(principal) => is_authorized(principal, required),
        }
    }

    pub fn can_manage_products(&self) -> bool {
        self.can(&Permission::manage_products())
    }
}
