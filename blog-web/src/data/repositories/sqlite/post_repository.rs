use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use crate::data::post_repository::{NewPost, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::post::{Post, PostWithAuthor};

#[derive(Debug, Clone)]
pub(crate) struct SqlitePostRepository {
    pool: SqlitePool,
}

impl SqlitePostRepository {
    pub(crate) fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct PostRow {
    id: i64,
    titulo: String,
    conteudo: String,
    imagem: Option<String>,
    autor_id: i64,
    created_at: DateTime<Utc>,
}

#[derive(FromRow)]
struct PostWithAuthorRow {
    #[sqlx(flatten)]
    post: PostRow,
    autor_nome: String,
}

#[async_trait]
impl PostRepository for SqlitePostRepository {
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            INSERT INTO posts (titulo, conteudo, imagem, autor_id, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            RETURNING id, titulo, conteudo, imagem, autor_id, created_at
            "#,
        )
        .bind(&input.title)
        .bind(&input.content)
        .bind(&input.image)
        .bind(input.author_id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        map_row_to_post(row)
    }

    async fn list_posts_with_authors(&self) -> Result<Vec<PostWithAuthor>, DomainError> {
        let rows = sqlx::query_as::<_, PostWithAuthorRow>(
            r#"
            SELECT
                p.id,
                p.titulo,
                p.conteudo,
                p.imagem,
                p.autor_id,
                p.created_at,
                u.nome AS autor_nome
            FROM posts p
            JOIN usuarios u ON p.autor_id = u.id
            ORDER BY p.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        rows.into_iter()
            .map(|row| {
                Ok(PostWithAuthor {
                    post: map_row_to_post(row.post)?,
                    author_name: row.autor_nome,
                })
            })
            .collect()
    }

    async fn list_posts_by_author(&self, author_id: i64) -> Result<Vec<Post>, DomainError> {
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT
                id,
                titulo,
                conteudo,
                imagem,
                autor_id,
                created_at
            FROM posts
            WHERE autor_id = ?1
            ORDER BY id DESC
            "#,
        )
        .bind(author_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        rows.into_iter().map(map_row_to_post).collect()
    }
}

fn map_row_to_post(row: PostRow) -> Result<Post, DomainError> {
    Post::new(
        row.id,
        row.titulo,
        row.conteudo,
        row.imagem,
        row.autor_id,
        row.created_at,
    )
    .map_err(|err| DomainError::Unexpected(err.to_string()))
}

fn map_post_db_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.is_foreign_key_violation()
    {
        return DomainError::NotFound("author".to_string());
    }
    DomainError::Unexpected(err.to_string())
}
