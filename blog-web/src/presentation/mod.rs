use sqlx::SqlitePool;
use std::sync::Arc;

use crate::application::auth_service::AuthService;
use crate::application::blog_service::BlogService;
use crate::application::session_service::SessionService;
use crate::data::repositories::sqlite::post_repository::SqlitePostRepository;
use crate::data::repositories::sqlite::session_repository::SqliteSessionRepository;
use crate::data::repositories::sqlite::user_repository::SqliteUserRepository;
use crate::infrastructure::templates::Templates;
use crate::infrastructure::uploads::UploadStore;

pub(crate) mod http;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) auth_service: Arc<AuthService<SqliteUserRepository>>,
    pub(crate) blog_service: Arc<BlogService<SqlitePostRepository>>,
    pub(crate) session_service: Arc<SessionService<SqliteSessionRepository>>,
    pub(crate) templates: Arc<Templates>,
    pub(crate) uploads: Arc<UploadStore>,
}

impl AppState {
    pub(crate) fn new(
        pool: SqlitePool,
        templates: Templates,
        uploads: UploadStore,
        session_ttl_seconds: i64,
    ) -> Self {
        Self {
            auth_service: Arc::new(AuthService::new(SqliteUserRepository::new(pool.clone()))),
            blog_service: Arc::new(BlogService::new(SqlitePostRepository::new(pool.clone()))),
            session_service: Arc::new(SessionService::new(
                SqliteSessionRepository::new(pool),
                session_ttl_seconds,
            )),
            templates: Arc::new(templates),
            uploads: Arc::new(uploads),
        }
    }
}
