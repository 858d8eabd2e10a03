use axum::{
    Form,
    extract::{State, rejection::FormRejection},
    http::{HeaderMap, header},
    response::{Html, IntoResponse, Redirect},
};
use serde::Deserialize;
use tera::Context;
use tracing::warn;

use crate::domain::error::DomainError;
use crate::domain::user::{LoginRequest, RegisterRequest};
use crate::presentation::AppState;
use crate::presentation::http::app_error::AppResult;
use crate::presentation::http::cookies::{expired_session_cookie, session_cookie, session_token};
use crate::presentation::http::handlers::render_page;
use crate::presentation::http::middleware::session::MaybeAuthenticated;

/// Raw register form; every rule is checked by `RegisterRequest::validate`.
#[derive(Debug, Deserialize)]
pub(crate) struct RegisterDto {
    pub(crate) name: String,
    pub(crate) national_id: String,
    pub(crate) email: String,
    pub(crate) password: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginDto {
    pub(crate) email: String,
    pub(crate) password: String,
}

pub(crate) async fn register_page(
    State(state): State<AppState>,
    MaybeAuthenticated(user): MaybeAuthenticated,
) -> AppResult<Html<String>> {
    render_page(&state, "register.html", user.as_ref(), Context::new())
}

pub(crate) async fn register(
    State(state): State<AppState>,
    form: Result<Form<RegisterDto>, FormRejection>,
) -> AppResult<Redirect> {
    let Form(dto) = form?;
    let req = RegisterRequest {
        name: dto.name,
        national_id: dto.national_id,
        email: dto.email,
        password: dto.password,
    };

    match state.auth_service.register(req).await {
        Ok(_) => Ok(Redirect::to("/login")),
        Err(err @ DomainError::AlreadyExists(_)) => {
            warn!(reason = %err, "registration rejected");
            Err(err.into())
        }
        Err(err) => Err(err.into()),
    }
}

pub(crate) async fn login_page(
    State(state): State<AppState>,
    MaybeAuthenticated(user): MaybeAuthenticated,
) -> AppResult<Html<String>> {
    render_page(&state, "login.html", user.as_ref(), Context::new())
}

pub(crate) async fn login(
    State(state): State<AppState>,
    form: Result<Form<LoginDto>, FormRejection>,
) -> AppResult<impl IntoResponse> {
    let Form(dto) = form?;
    let req = LoginRequest {
        email: dto.email,
        password: dto.password,
    };

    let user = match state.auth_service.login(req).await {
        Ok(user) => user,
        Err(err @ DomainError::InvalidCredentials) => {
            warn!("failed login attempt");
            return Err(err.into());
        }
        Err(err) => return Err(err.into()),
    };

    let session = state.session_service.create_session(&user).await?;
    let cookie = session_cookie(&session.token, state.session_service.ttl_seconds());

    Ok(([(header::SET_COOKIE, cookie)], Redirect::to("/dashboard")))
}

/// Ends the session if there is one; always lands on the index.
pub(crate) async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<impl IntoResponse> {
    if let Some(token) = session_token(&headers) {
        state.session_service.destroy(&token).await?;
    }

    Ok((
        [(header::SET_COOKIE, expired_session_cookie())],
        Redirect::to("/"),
    ))
}
