use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::domain::session::SessionUser;
use crate::presentation::AppState;
use crate::presentation::http::app_error::AppError;
use crate::presentation::http::cookies::session_token;

/// The logged-in user of a protected route. Only present behind
/// [`session_auth_middleware`].
#[derive(Debug, Clone)]
pub(crate) struct AuthenticatedUser {
    pub(crate) user_id: i64,
    pub(crate) user_name: String,
}

impl From<SessionUser> for AuthenticatedUser {
    fn from(user: SessionUser) -> Self {
        Self {
            user_id: user.user_id,
            user_name: user.user_name,
        }
    }
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

/// Session lookup for pages that render differently for logged-in visitors
/// but never require it.
#[derive(Debug, Clone)]
pub(crate) struct MaybeAuthenticated(pub(crate) Option<AuthenticatedUser>);

impl FromRequestParts<AppState> for MaybeAuthenticated {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = session_token(&parts.headers) else {
            return Ok(Self(None));
        };
        let user = state.session_service.resolve(&token).await?;
        Ok(Self(user.map(AuthenticatedUser::from)))
    }
}

pub(crate) async fn session_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(token) = session_token(request.headers()) else {
        debug!(path = %request.uri().path(), "no session cookie, redirecting to login");
        return Err(AppError::Unauthorized);
    };

    let user = state
        .session_service
        .resolve(&token)
        .await?
        .ok_or(AppError::Unauthorized)?;

    request
        .extensions_mut()
        .insert(AuthenticatedUser::from(user));

    Ok(next.run(request).await)
}
