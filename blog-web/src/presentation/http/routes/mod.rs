use axum::{Json, Router, routing::get};
use serde::Serialize;
use tower_http::services::ServeDir;

use crate::presentation::AppState;

pub(crate) mod auth;
pub(crate) mod posts;

pub(crate) const UPLOADS_PATH: &str = "/static/uploads";

pub(crate) fn routes(state: AppState) -> Router {
    let uploads = ServeDir::new(state.uploads.dir());

    Router::new()
        .route("/healthz", get(health_handler))
        .merge(auth::router())
        .merge(posts::router(state.clone()))
        .nest_service(UPLOADS_PATH, uploads)
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct HealthzResponse {
    status: &'static str,
}

async fn health_handler() -> Json<HealthzResponse> {
    Json(HealthzResponse { status: "ok" })
}
