use std::fs;
use std::path::{Path, PathBuf};

use actix_multipart::form::tempfile::TempFile;
use uuid::Uuid;

use crate::types::error::AppError;

const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif"];

/// Stores uploaded profile pictures under server-generated names. The
/// client-supplied filename contributes nothing but its extension.
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, AppError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .map_err(|e| AppError::Internal(format!("creating upload dir failed: {e}")))?;
        Ok(UploadStore { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn save_picture(&self, picture: &TempFile) -> Result<String, AppError> {
        let ext = picture
            .file_name
            .as_deref()
            .and_then(|name| name.rsplit('.').next())
            .map(|ext| ext.to_ascii_lowercase())
            .filter(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
            .ok_or_else(|| {
                AppError::Validation("Pictures must be a jpg, png or gif file.".to_string())
            })?;

        let filename = format!("{}.{}", Uuid::new_v4().simple(), ext);
        let dest = self.dir.join(&filename);
        // copy instead of rename: the tempfile may live on another filesystem
        fs::copy(picture.file.path(), &dest)
            .map_err(|e| AppError::Internal(format!("storing upload failed: {e}")))?;
        Ok(filename)
    }
}
