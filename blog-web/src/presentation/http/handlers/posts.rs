use axum::{
    body::Bytes,
    extract::{Multipart, State},
    response::{Html, Redirect},
};
use tera::Context;

use crate::domain::post::CreatePostRequest;
use crate::presentation::AppState;
use crate::presentation::http::app_error::AppResult;
use crate::presentation::http::handlers::render_page;
use crate::presentation::http::middleware::session::{AuthenticatedUser, MaybeAuthenticated};

struct ImageUpload {
    file_name: String,
    bytes: Bytes,
}

pub(crate) async fn index(
    State(state): State<AppState>,
    MaybeAuthenticated(user): MaybeAuthenticated,
) -> AppResult<Html<String>> {
    let posts = state.blog_service.list_public_posts().await?;

    let mut context = Context::new();
    context.insert("posts", &posts);
    render_page(&state, "index.html", user.as_ref(), context)
}

pub(crate) async fn dashboard(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
) -> AppResult<Html<String>> {
    let posts = state.blog_service.list_author_posts(auth.user_id).await?;

    let mut context = Context::new();
    context.insert("posts", &posts);
    render_page(&state, "dashboard.html", Some(&auth), context)
}

pub(crate) async fn new_post_page(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
) -> AppResult<Html<String>> {
    render_page(&state, "new_post.html", Some(&auth), Context::new())
}

/// Multipart form with `title`, `content` and an optional `image` file.
pub(crate) async fn create_post(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    mut multipart: Multipart,
) -> AppResult<Redirect> {
    let mut title = String::new();
    let mut content = String::new();
    let mut image: Option<ImageUpload> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("title") => title = field.text().await?,
            Some("content") => content = field.text().await?,
            Some("image") => {
                let file_name = field.file_name().unwrap_or_default().to_owned();
                let bytes = field.bytes().await?;
                // browsers send an empty, unnamed part when no file was picked
                if !file_name.is_empty() {
                    image = Some(ImageUpload { file_name, bytes });
                }
            }
            _ => {}
        }
    }

    // reject bad text before anything touches the disk
    let req = CreatePostRequest { title, content }.validate()?;

    let stored_image = match image {
        Some(upload) => Some(state.uploads.save(&upload.file_name, &upload.bytes).await?),
        None => None,
    };

    let created = state
        .blog_service
        .create_post(auth.user_id, req, stored_image.clone())
        .await;

    if let Err(err) = created {
        if let Some(stored) = stored_image {
            state.uploads.remove(&stored).await;
        }
        return Err(err.into());
    }

    Ok(Redirect::to("/dashboard"))
}
