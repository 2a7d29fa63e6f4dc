use axum::{Router, routing::get};

pub mod graphql;
pub mod system;

/// Router for all identity-aware endpoints (everything behind the auth
/// middleware; anonymous requests still pass through it).
pub fn router() -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .route("/graphql", get(graphql::graphiql).post(graphql::graphql))
        .route("/graphql/sdl", get(graphql::sdl))
}
