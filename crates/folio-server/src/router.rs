//! Axum router construction.
//!
//! Builds the application router with the content routes, static serving of
//! the upload root, OpenAPI docs, and middleware layers.

use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use folio_store::UPLOADS_PREFIX;

use crate::context::AppContext;
use crate::middleware::request_id::request_id_middleware;
use crate::routes;

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::content::create_content,
        routes::content::list_content,
        routes::content::get_content,
        routes::content::delete_content,
    ),
    components(schemas(
        folio_core::ContentRecord,
        routes::content::CreateContentForm,
        routes::content::DeleteResponse,
    ))
)]
pub struct ApiDoc;

/// Build the complete Axum router.
pub fn build_router(ctx: AppContext) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let uploads = ServeDir::new(ctx.content.assets().root());
    tracing::debug!(
        "Serving uploads from {:?} at {UPLOADS_PREFIX}",
        ctx.content.assets().root()
    );

    let content_routes = get(routes::content::list_content).post(routes::content::create_content);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/content", content_routes.clone())
        .route("/content/", content_routes)
        .route(
            "/content/{id}",
            get(routes::content::get_content).delete(routes::content::delete_content),
        )
        .nest_service(UPLOADS_PREFIX, uploads)
        .merge(SwaggerUi::new("/api-docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(DefaultBodyLimit::max(ctx.config.storage.max_upload_bytes))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}
