pub mod error;
pub mod routes;
pub mod state;

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Site Deployer API",
        version = "0.1.0",
        description = "Accepts site briefs, publishes generated sites and reports back to the evaluator"
    ),
    paths(routes::health_check, routes::liveness, routes::submit_task),
    components(schemas(
        routes::HealthResponse,
        routes::LivenessResponse,
        routes::TaskAccepted,
        deployer_core::TaskRequest,
        deployer_core::Attachment,
    )),
    tags(
        (name = "health", description = "Liveness endpoints"),
        (name = "tasks", description = "Task intake"),
    )
)]
pub struct ApiDoc;

pub fn create_router(state: AppState) -> Router {
    let body_limit = state.config.max_body_bytes;

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api/openapi.json", ApiDoc::openapi()))
        .route("/", get(routes::health_check))
        .route(
            "/api-endpoint",
            get(routes::liveness).post(routes::submit_task),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
