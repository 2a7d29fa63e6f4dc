//! GraphQL transport: POST for queries, GET for GraphiQL, plus SDL export.

use std::sync::Arc;

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{extract::Extension, response::Html};

use storefront_graphql::CatalogLoaders;

use crate::app::services::AppServices;
use crate::authz;
use crate::context::RequestIdentity;

/// Execute a GraphQL request.
///
/// The requester and a fresh set of dataloaders are injected as request
/// data: the loaders (and their caches) live exactly as long as this one
/// request, so batched results never leak across requests.
pub async fn graphql(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<RequestIdentity>,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let requester = authz::requester_for(&identity);
    let loaders = CatalogLoaders::for_request(services.store.clone());

    let req = req.into_inner().data(requester).data(loaders);
    services.schema.execute(req).await.into()
}

pub async fn graphiql() -> Html<String> {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}

pub async fn sdl(Extension(services): Extension<Arc<AppServices>>) -> String {
    services.schema.sdl()
}
