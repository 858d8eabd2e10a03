use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::error::DomainError;
use crate::domain::session::Session;

#[async_trait]
pub(crate) trait SessionRepository: Send + Sync {
    async fn insert_session(&self, session: Session) -> Result<(), DomainError>;
    async fn find_session(&self, token: &str) -> Result<Option<Session>, DomainError>;
    async fn delete_session(&self, token: &str) -> Result<bool, DomainError>;
    /// Removes every session whose expiry is at or before `now`; returns how many.
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DomainError>;
}
