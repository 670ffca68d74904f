pub mod unauthed_ping;

use crate::AppState;
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /api/test endpoints (mounted at /api/test)
pub fn router() -> Router<AppState> {
    Router::new().route("/unauthed-ping", get(unauthed_ping::handler))
}

#[derive(OpenApi)]
#[openapi(
    paths(unauthed_ping::handler),
    components(schemas(unauthed_ping::Response))
)]
pub struct ApiDoc;
