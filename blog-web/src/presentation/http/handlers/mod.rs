use axum::response::Html;
use tera::Context;

use crate::presentation::AppState;
use crate::presentation::http::app_error::AppResult;
use crate::presentation::http::middleware::session::AuthenticatedUser;

pub(crate) mod auth;
pub(crate) mod posts;

/// Renders a page, exposing the visitor's name to the navigation bar when logged in.
pub(crate) fn render_page(
    state: &AppState,
    name: &str,
    user: Option<&AuthenticatedUser>,
    mut context: Context,
) -> AppResult<Html<String>> {
    if let Some(user) = user {
        context.insert("user_name", &user.user_name);
    }
    Ok(Html(state.templates.render(name, &context)?))
}
