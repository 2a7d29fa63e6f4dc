use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use storefront_auth::JwtValidator;

use crate::context::{PrincipalContext, RequestIdentity};

#[derive(Clone)]
pub struct AuthState {
    pub jwt: Arc<dyn JwtValidator>,
}

/// Attach a [`RequestIdentity`] to every request.
///
/// No `Authorization` header means the request proceeds anonymously; a
/// malformed header or an invalid token is rejected outright.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::extract::Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let identity = match extract_bearer(req.headers())? {
        None => RequestIdentity::Anonymous,
        Some(token) => {
            let claims = state
                .jwt
                .validate(token, Utc::now())
                .map_err(|_e| StatusCode::UNAUTHORIZED)?;

            RequestIdentity::Authenticated(PrincipalContext::new(claims.sub, claims.roles))
        }
    };

    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}

fn extract_bearer(headers: &HeaderMap) -> Result<Option<&str>, StatusCode> {
    let Some(header) = headers.get(axum::http::header::AUTHORIZATION) else {
        return Ok(None);
    };

    let header = header.to_str().map_err(|_| StatusCode::UNAUTHORIZED)?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or(StatusCode::UNAUTHORIZED)?
        .trim();

    if token.is_empty() {
        return Err(StatusCode::UNAUTHORIZED);
    }

    Ok(Some(token))
}
