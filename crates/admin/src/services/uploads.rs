//! Local file storage for uploaded images.
//!
//! Product and category images land under `public/productos/` and
//! `public/categorias/`; the payment QR is a single well-known file,
//! `public/qr-pago.jpg`, replaced on every upload. The storefront serves
//! the same tree.
//!
//! Stored names are `{uuid}.{ext}` - client filenames are kept only for
//! the extension, so two uploads can never clobber each other and a crafted
//! name cannot escape the upload directory. Deletes sanitize the incoming
//! path to its final component for the same reason.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// The payment QR file name, shared with the storefront.
pub const QR_FILE_NAME: &str = "qr-pago.jpg";

/// Errors from local file storage.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Which upload directory a file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadKind {
    Categoria,
    /// Unrecognized `type` values fall back to the product directory, as
    /// the historical delete endpoint did.
    #[serde(other)]
    Producto,
}

impl UploadKind {
    #[must_use]
    pub const fn dir(self) -> &'static str {
        match self {
            Self::Producto => "productos",
            Self::Categoria => "categorias",
        }
    }
}

/// A stored file, as reported back to the admin form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredFile {
    /// Path relative to the public tree, e.g. `/productos/{name}`.
    pub path: String,
    /// Bare stored file name.
    pub filename: String,
}

/// File storage rooted at the configured public directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    public_dir: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(public_dir: PathBuf) -> Self {
        Self { public_dir }
    }

    /// Store an uploaded image under the kind's directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the file
    /// cannot be written.
    pub async fn save(
        &self,
        kind: UploadKind,
        original_name: &str,
        bytes: &[u8],
    ) -> Result<StoredFile, UploadError> {
        let dir = self.public_dir.join(kind.dir());
        tokio::fs::create_dir_all(&dir).await?;

        let filename = stored_name(original_name);
        tokio::fs::write(dir.join(&filename), bytes).await?;

        Ok(StoredFile {
            path: format!("/{}/{filename}", kind.dir()),
            filename,
        })
    }

    /// Delete a stored image. Returns whether a file was actually removed;
    /// a missing file is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be removed.
    pub async fn delete(&self, kind: UploadKind, path: &str) -> Result<bool, UploadError> {
        // Only the final component counts; `path` may arrive as
        // "/productos/x.jpg" or a bare file name.
        let Some(name) = Path::new(path).file_name() else {
            return Ok(false);
        };
        let full = self.public_dir.join(kind.dir()).join(name);

        match tokio::fs::remove_file(&full).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Replace the payment QR image.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub async fn save_qr(&self, bytes: &[u8]) -> Result<(), UploadError> {
        tokio::fs::create_dir_all(&self.public_dir).await?;
        tokio::fs::write(self.public_dir.join(QR_FILE_NAME), bytes).await?;
        Ok(())
    }

    /// Whether a payment QR is currently stored.
    pub async fn qr_exists(&self) -> bool {
        tokio::fs::try_exists(self.public_dir.join(QR_FILE_NAME))
            .await
            .unwrap_or(false)
    }

    /// Delete the payment QR. Returns whether one existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be removed.
    pub async fn delete_qr(&self) -> Result<bool, UploadError> {
        match tokio::fs::remove_file(self.public_dir.join(QR_FILE_NAME)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

/// Collision-free stored name keeping only the client extension.
fn stored_name(original_name: &str) -> String {
    let id = Uuid::new_v4();
    match Path::new(original_name)
        .extension()
        .and_then(|ext| ext.to_str())
    {
        Some(ext) if !ext.is_empty() => format!("{id}.{}", ext.to_lowercase()),
        _ => id.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn temp_store() -> FileStore {
        let dir = std::env::temp_dir().join(format!("ne-uploads-{}", Uuid::new_v4()));
        FileStore::new(dir)
    }

    #[test]
    fn test_stored_name_keeps_extension_only() {
        let name = stored_name("Foto de Perfil.JPG");
        assert!(name.ends_with(".jpg"));
        assert!(!name.contains(' '));

        let bare = stored_name("sin-extension");
        assert!(!bare.contains('.'));
    }

    #[tokio::test]
    async fn test_save_and_delete_roundtrip() {
        let store = temp_store();

        let stored = store
            .save(UploadKind::Producto, "montura.jpg", b"fake image")
            .await
            .unwrap();
        assert!(stored.path.starts_with("/productos/"));

        let removed = store.delete(UploadKind::Producto, &stored.path).await.unwrap();
        assert!(removed);

        // Second delete is a no-op, not an error
        let removed_again = store.delete(UploadKind::Producto, &stored.path).await.unwrap();
        assert!(!removed_again);
    }

    #[tokio::test]
    async fn test_delete_ignores_directory_components() {
        let store = temp_store();
        let stored = store
            .save(UploadKind::Categoria, "lentes.png", b"img")
            .await
            .unwrap();

        // A traversal-looking path resolves to the same final component
        let sneaky = format!("../../categorias/{}", stored.filename);
        let removed = store.delete(UploadKind::Categoria, &sneaky).await.unwrap();
        assert!(removed);
    }

    #[tokio::test]
    async fn test_qr_lifecycle() {
        let store = temp_store();
        assert!(!store.qr_exists().await);

        store.save_qr(b"qr bytes").await.unwrap();
        assert!(store.qr_exists().await);

        // Replacing is just another write
        store.save_qr(b"new qr").await.unwrap();

        assert!(store.delete_qr().await.unwrap());
        assert!(!store.qr_exists().await);
        assert!(!store.delete_qr().await.unwrap());
    }

    #[test]
    fn test_upload_kind_from_wire() {
        let kind: UploadKind = serde_json::from_str("\"categoria\"").unwrap();
        assert_eq!(kind, UploadKind::Categoria);

        // Unknown type falls back to producto
        let kind: UploadKind = serde_json::from_str("\"banner\"").unwrap();
        assert_eq!(kind, UploadKind::Producto);
    }
}
