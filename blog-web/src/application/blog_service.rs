use tracing::info;

use crate::data::post_repository::{NewPost, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::post::{CreatePostRequest, Post, PostWithAuthor};

pub(crate) struct BlogService<R: PostRepository> {
    repo: R,
}

impl<R: PostRepository> BlogService<R> {
    pub(crate) fn new(repo: R) -> Self {
        Self { repo }
    }

    /// `image` must already be a stored, validated upload name.
    pub(crate) async fn create_post(
        &self,
        author_id: i64,
        req: CreatePostRequest,
        image: Option<String>,
    ) -> Result<Post, DomainError> {
        let req = req.validate()?;

        let new_post = NewPost {
            title: req.title,
            content: req.content,
            image,
            author_id,
        };
        let post = self.repo.create_post(new_post).await?;

        info!(post_id = post.id, author_id, "post created");
        Ok(post)
    }

    pub(crate) async fn list_public_posts(&self) -> Result<Vec<PostWithAuthor>, DomainError> {
        self.repo.list_posts_with_authors().await
    }

    pub(crate) async fn list_author_posts(&self, author_id: i64) -> Result<Vec<Post>, DomainError> {
        self.repo.list_posts_by_author(author_id).await
    }
}
