pub mod actors;
pub mod films;
pub mod users;

use axum::{
    middleware,
    routing::{delete, get, patch, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use uuid::Uuid;

use common::types::Health;

use crate::auth;
use crate::openapi::ApiDoc;
use crate::state::ServerState;

/// Body of a `201 Created` response.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct Created {
    pub id: Uuid,
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the application router: public health and docs, everything else
/// behind basic auth.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route("/films", get(films::list).post(films::create))
        .route("/films/:id", get(films::get).patch(films::update).delete(films::delete))
        .route("/actors", get(actors::list).post(actors::create))
        .route("/actors/:id", get(actors::get).patch(actors::update).delete(actors::delete))
        .route("/users", post(users::create))
        .route("/users/:id", delete(users::delete))
        .route("/users/:id/role", patch(users::change_role))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_basic_auth));

    Router::new()
        .route("/health", get(health))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(api)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx responses and transport failures
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
