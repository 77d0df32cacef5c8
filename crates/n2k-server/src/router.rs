use std::sync::Arc;

use axum::routing::get;
use axum::Router;

use n2k_resolver::Resolver;

use crate::handler;

/// Build the axum router: one route, GET and POST.
pub fn build_router(resolver: Resolver) -> Router {
    Router::new()
        .route("/", get(handler::resolve_get).post(handler::resolve_post))
        .with_state(Arc::new(resolver))
}
