// ============================================================
// UPLOADED FILE
// ============================================================
// A file handed in through the uploader for a single render cycle

use std::path::Path;

use crate::domain::error::{AppError, Result};

/// Extensions the uploader accepts
pub const ACCEPTED_EXTENSIONS: &[&str] = &["csv"];

/// Bytes of an upload plus the name the browser declared for it.
///
/// Lives only for the request that carried it.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }

    /// Lowercased extension of the declared file name, if any
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
    }

    /// Reject names whose extension the uploader does not accept
    pub fn ensure_accepted(&self) -> Result<()> {
        match self.extension() {
            Some(ext) if ACCEPTED_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
            _ => Err(AppError::ValidationError(format!(
                "File '{}' is not allowed; accepted types: {}",
                self.file_name,
                ACCEPTED_EXTENSIONS
                    .iter()
                    .map(|ext| format!(".{}", ext))
                    .collect::<Vec<_>>()
                    .join(", ")
            ))),
        }
    }
}
