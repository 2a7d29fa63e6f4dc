use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};

use crate::app::errors::json_error;
use crate::context::RequestIdentity;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn whoami(Extension(identity): Extension<RequestIdentity>) -> impl IntoResponse {
    match identity {
        RequestIdentity::Anonymous => {
            json_error(StatusCode::UNAUTHORIZED, "unauthorized", "missing bearer token")
        }
        RequestIdentity::Authenticated(principal) => Json(serde_json::json!({
            "principal_id": principal.principal_id().to_string(),
            "roles": principal.roles().iter().map(|r| r.as_str()).collect::<Vec<_>>(),
        }))
        .into_response(),
    }
}
