use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::post::{Post, PostWithAuthor};

#[derive(Debug, Clone)]
pub(crate) struct NewPost {
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) image: Option<String>,
    pub(crate) author_id: i64,
}

/// Listings are newest first (descending id).
#[async_trait]
pub(crate) trait PostRepository: Send + Sync {
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError>;
    async fn list_posts_with_authors(&self) -> Result<Vec<PostWithAuthor>, DomainError>;
    async fn list_posts_by_author(&self, author_id: i64) -> Result<Vec<Post>, DomainError>;
}
