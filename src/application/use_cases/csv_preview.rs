// ============================================================
// CSV PREVIEW USE CASE
// ============================================================
// Parse an upload and keep only the first rows for display

use crate::domain::csv::{Preview, PreviewConfig, UploadedFile};
use crate::domain::error::{AppError, Result};
use crate::infrastructure::csv::CsvParser;

/// CSV preview use case
#[derive(Debug, Clone)]
pub struct CsvPreview {
    config: PreviewConfig,
}

impl CsvPreview {
    pub fn new(config: PreviewConfig) -> Self {
        Self { config }
    }

    /// Parse `bytes` and return at most `max_rows` rows with every column.
    ///
    /// A `ParseError` from the parser is returned as-is. The full table is
    /// dropped once the preview is cut from it.
    pub fn preview_bytes(&self, bytes: &[u8]) -> Result<Preview> {
        self.config.validate().map_err(|e| {
            AppError::ValidationError(format!("Invalid preview config: {}", e))
        })?;

        let table = CsvParser::from_config(&self.config).parse_bytes(bytes)?;
        Ok(table.into_preview(self.config.max_rows))
    }

    /// Check the upload's declared type, then preview its contents
    pub fn preview_upload(&self, file: &UploadedFile) -> Result<Preview> {
        file.ensure_accepted()?;
        self.preview_bytes(&file.bytes)
    }
}

impl Default for CsvPreview {
    fn default() -> Self {
        Self::new(PreviewConfig::default())
    }
}
