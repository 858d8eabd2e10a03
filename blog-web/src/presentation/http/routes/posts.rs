use axum::Router;
use axum::middleware;
use axum::routing::get;

use crate::presentation::AppState;
use crate::presentation::http::handlers::posts::{create_post, dashboard, index, new_post_page};
use crate::presentation::http::middleware::session::session_auth_middleware;

pub(crate) fn router(state: AppState) -> Router<AppState> {
    let public = Router::new().route("/", get(index));

    let protected = Router::new()
        .route("/dashboard", get(dashboard))
        .route("/new_post", get(new_post_page).post(create_post))
        .layer(middleware::from_fn_with_state(
            state,
            session_auth_middleware,
        ));

    public.merge(protected)
}
