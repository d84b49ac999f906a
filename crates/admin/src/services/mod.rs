//! Admin services.

pub mod uploads;

pub use uploads::{FileStore, StoredFile, UploadError, UploadKind};
