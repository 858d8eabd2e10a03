use argon2::password_hash::rand_core::{OsRng, RngCore};
use chrono::{Duration, Utc};
use tracing::{debug, info};

use crate::data::session_repository::SessionRepository;
use crate::domain::error::DomainError;
use crate::domain::session::{Session, SessionUser};
use crate::domain::user::User;

const TOKEN_BYTES: usize = 32;

pub(crate) struct SessionService<R: SessionRepository> {
    repo: R,
    ttl: Duration,
}

impl<R: SessionRepository> SessionService<R> {
    const DEFAULT_TTL_SECONDS: i64 = 24 * 60 * 60;

    pub(crate) fn new(repo: R, ttl_seconds: i64) -> Self {
        let ttl_seconds = if ttl_seconds > 0 {
            ttl_seconds
        } else {
            Self::DEFAULT_TTL_SECONDS
        };

        Self {
            repo,
            ttl: Duration::seconds(ttl_seconds),
        }
    }

    pub(crate) fn ttl_seconds(&self) -> i64 {
        self.ttl.num_seconds()
    }

    /// Starts a session for `user`. Sessions already past their expiry are
    /// purged first so abandoned logins do not accumulate.
    pub(crate) async fn create_session(&self, user: &User) -> Result<Session, DomainError> {
        let now = Utc::now();

        let purged = self.repo.delete_expired(now).await?;
        if purged > 0 {
            debug!(purged, "expired sessions removed");
        }

        let session = Session {
            token: generate_token(),
            user: SessionUser {
                user_id: user.id,
                user_name: user.name.clone(),
            },
            created_at: now,
            expires_at: now + self.ttl,
        };

        self.repo.insert_session(session.clone()).await?;

        info!(user_id = user.id, "session created");
        Ok(session)
    }

    /// Looks up a live session. Expired sessions are removed and reported as absent.
    pub(crate) async fn resolve(&self, token: &str) -> Result<Option<SessionUser>, DomainError> {
        if !is_well_formed(token) {
            return Ok(None);
        }

        let Some(session) = self.repo.find_session(token).await? else {
            return Ok(None);
        };

        if session.is_expired_at(Utc::now()) {
            debug!(user_id = session.user.user_id, "dropping expired session");
            self.repo.delete_session(token).await?;
            return Ok(None);
        }

        Ok(Some(session.user))
    }

    pub(crate) async fn destroy(&self, token: &str) -> Result<(), DomainError> {
        if !is_well_formed(token) {
            return Ok(());
        }
        if self.repo.delete_session(token).await? {
            info!("session destroyed");
        }
        Ok(())
    }
}

fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

fn is_well_formed(token: &str) -> bool {
    token.len() == TOKEN_BYTES * 2 && token.bytes().all(|b| b.is_ascii_hexdigit())
}
