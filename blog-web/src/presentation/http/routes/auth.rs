use axum::{Router, routing::get};

use crate::presentation::AppState;
use crate::presentation::http::handlers::auth::{
    login, login_page, logout, register, register_page,
};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/register", get(register_page).post(register))
        .route("/login", get(login_page).post(login))
        .route("/logout", get(logout))
}
