//! Upload storage for multipart file fields.
//!
//! Files are written under the configured uploads directory with generated
//! names; the returned `/uploads/<name>` path is what gets stored in
//! documents and served back by the static file route.

use std::path::{Path, PathBuf};

use thiserror::Error;
use uuid::Uuid;

/// Longest extension carried over from the client-supplied filename.
const MAX_EXTENSION_LENGTH: usize = 8;

/// Errors that can occur while storing uploads.
#[derive(Debug, Error)]
pub enum UploadError {
    /// Filesystem operation failed.
    #[error("upload I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Filesystem-backed store for uploaded files.
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    /// Create an upload store rooted at `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Create the uploads directory if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `UploadError::Io` if the directory cannot be created.
    pub async fn ensure_dir(&self) -> Result<(), UploadError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        Ok(())
    }

    /// Persist uploaded bytes under a generated filename.
    ///
    /// Returns the public `/uploads/<name>` path to store in documents.
    ///
    /// # Errors
    ///
    /// Returns `UploadError::Io` if the file cannot be written.
    pub async fn save(
        &self,
        original_name: Option<&str>,
        bytes: &[u8],
    ) -> Result<String, UploadError> {
        let filename = generate_filename(original_name);
        tokio::fs::write(self.dir.join(&filename), bytes).await?;

        Ok(format!("/uploads/{filename}"))
    }

    /// The directory uploads are stored in.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

/// Generate a unique filename, carrying over a safe client extension.
fn generate_filename(original_name: Option<&str>) -> String {
    let stem = Uuid::new_v4().simple().to_string();

    match original_name.and_then(safe_extension) {
        Some(extension) => format!("{stem}.{extension}"),
        None => stem,
    }
}

/// Extract a filename extension that is safe to reuse verbatim.
///
/// Anything beyond short ASCII alphanumerics is dropped; the extension is
/// client-controlled input and ends up in a filesystem path.
fn safe_extension(name: &str) -> Option<String> {
    let extension = Path::new(name).extension()?.to_str()?;

    if extension.is_empty()
        || extension.len() > MAX_EXTENSION_LENGTH
        || !extension.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return None;
    }

    Some(extension.to_ascii_lowercase())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_filename_keeps_safe_extension() {
        let name = generate_filename(Some("photo.JPG"));
        assert!(name.ends_with(".jpg"));
    }

    #[test]
    fn test_generate_filename_drops_unsafe_extension() {
        assert!(!generate_filename(Some("evil.j/../pg")).contains('/'));
        assert!(!generate_filename(Some("weird.päg")).contains('.'));
        assert!(!generate_filename(Some("long.superlongext")).contains('.'));
    }

    #[test]
    fn test_generate_filename_without_original() {
        let name = generate_filename(None);
        assert!(!name.is_empty());
        assert!(!name.contains('.'));
    }

    #[test]
    fn test_generated_filenames_are_unique() {
        assert_ne!(generate_filename(None), generate_filename(None));
    }

    #[tokio::test]
    async fn test_save_writes_file_and_returns_public_path() {
        let dir = std::env::temp_dir().join(format!("artemia-uploads-{}", Uuid::new_v4()));
        let store = UploadStore::new(&dir);
        store.ensure_dir().await.unwrap();

        let path = store.save(Some("logo.png"), b"fake image bytes").await.unwrap();
        assert!(path.starts_with("/uploads/"));
        assert!(path.ends_with(".png"));

        let filename = path.strip_prefix("/uploads/").unwrap();
        let written = tokio::fs::read(dir.join(filename)).await.unwrap();
        assert_eq!(written, b"fake image bytes");

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
