//! API-side mapping from request identity to an authorization principal.
//!
//! Tokens carry roles, not permissions; the role→permission mapping is
//! policy owned by this boundary. Resolution happens once per request, so
//! field gates inside the schema are pure lookups.

use storefront_auth::{Permission, Principal, Role};
use storefront_graphql::Requester;

use crate::context::RequestIdentity;

/// Resolve the identity attached by the middleware into the requester the
/// GraphQL layer gates on.
pub fn requester_for(identity: &RequestIdentity) -> Requester {
    match identity {
        RequestIdentity::Anonymous => Requester::Anonymous,
        RequestIdentity::Authenticated(principal) => Requester::Authenticated(Principal {
            principal_id: principal.principal_id(),
            roles: principal.roles().to_vec(),
            permissions: permissions_from_roles(principal.roles()),
        }),
    }
}

/// Minimal role→permission mapping.
///
/// This is intentionally simple until a real policy source exists (e.g.
/// DB-backed): "admin" grants everything, "merchandiser" grants catalog
/// management.
fn permissions_from_roles(roles: &[Role]) -> Vec<Permission> {
    if roles.iter().any(|r| r.as_str() == "admin") {
        return vec![Permission::wildcard()];
    }

    if roles.iter().any(|r| r.as_str() == "merchandiser") {
        return vec![Permission::manage_products()];
    }

    Vec::new()
}
