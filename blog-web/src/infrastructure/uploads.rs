use std::io;
use std::path::{Path, PathBuf};

use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::upload::validate_image;

/// Writes accepted images into a single directory served under `/static/uploads`.
#[derive(Debug, Clone)]
pub(crate) struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub(crate) fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub(crate) fn dir(&self) -> &Path {
        &self.dir
    }

    pub(crate) async fn ensure_dir(&self) -> io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await
    }

    /// Validates the upload and stores it as `<uuid>_<sanitized name>`.
    /// Returns the stored file name.
    pub(crate) async fn save(&self, original_name: &str, bytes: &[u8]) -> Result<String, DomainError> {
        let sanitized = validate_image(original_name, bytes)?;
        let stored_name = format!("{}_{}", Uuid::new_v4().simple(), sanitized);

        tokio::fs::write(self.dir.join(&stored_name), bytes)
            .await
            .map_err(|err| DomainError::Unexpected(format!("failed to store upload: {err}")))?;

        info!(file = %stored_name, size = bytes.len(), "image stored");
        Ok(stored_name)
    }

    /// Deletes a file previously returned by [`UploadStore::save`]. A missing
    /// file is only logged.
    pub(crate) async fn remove(&self, stored_name: &str) {
        if let Err(err) = tokio::fs::remove_file(self.dir.join(stored_name)).await {
            warn!(file = %stored_name, error = %err, "failed to remove upload");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::UploadStore;
    use crate::domain::error::DomainError;
    use crate::domain::upload::fixtures::TINY_PNG;

    #[tokio::test]
    async fn save_writes_file_under_sanitized_name() {
        let dir = tempfile::tempdir().expect("tempdir must be created");
        let store = UploadStore::new(dir.path());

        let stored = store
            .save("../My Photo.PNG", TINY_PNG)
            .await
            .expect("png must be stored");

        assert!(stored.ends_with("_My_Photo.PNG"));
        assert!(!stored.contains('/'));
        let written = std::fs::read(dir.path().join(&stored)).expect("file must exist");
        assert_eq!(written, TINY_PNG);
    }

    #[tokio::test]
    async fn remove_deletes_stored_file() {
        let dir = tempfile::tempdir().expect("tempdir must be created");
        let store = UploadStore::new(dir.path());

        let stored = store
            .save("cat.png", TINY_PNG)
            .await
            .expect("png must be stored");
        store.remove(&stored).await;
        store.remove(&stored).await;

        assert!(!dir.path().join(&stored).exists());
    }

    #[tokio::test]
    async fn save_rejects_exe_and_writes_nothing() {
        let dir = tempfile::tempdir().expect("tempdir must be created");
        let store = UploadStore::new(dir.path());

        let err = store
            .save("photo.EXE", b"MZ")
            .await
            .expect_err("exe must be rejected");

        assert!(matches!(err, DomainError::Validation { field: "image", .. }));
        let entries = std::fs::read_dir(dir.path()).expect("dir must be readable").count();
        assert_eq!(entries, 0);
    }
}
