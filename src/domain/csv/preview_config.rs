// ============================================================
// PREVIEW CONFIGURATION
// ============================================================
// Knobs for CSV parsing and preview truncation

use serde::{Deserialize, Serialize};

/// Number of rows shown when nothing else is configured
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

/// Configuration for CSV preview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewConfig {
    /// Maximum number of data rows to keep (default: 5)
    pub max_rows: usize,

    /// Field delimiter; `None` sniffs one from the first lines
    pub delimiter: Option<u8>,

    /// Reject rows with fewer fields than the header instead of padding them
    pub strict: bool,

    /// Trim surrounding whitespace from every cell
    pub trim: bool,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            max_rows: DEFAULT_PREVIEW_ROWS,
            delimiter: Some(b','),
            strict: false,
            trim: false,
        }
    }
}

impl PreviewConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = max_rows;
        self
    }

    /// Config that rejects any ragged row
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Self::default()
        }
    }

    /// Config that guesses the delimiter from the content
    pub fn auto_detect() -> Self {
        Self {
            delimiter: None,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.max_rows == 0 {
            return Err("max_rows must be at least 1".to_string());
        }
        if let Some(delimiter) = self.delimiter {
            if delimiter == b'"' || delimiter == b'\n' || delimiter == b'\r' {
                return Err(format!(
                    "delimiter {:?} cannot be a quote or line break",
                    delimiter as char
                ));
            }
        }
        Ok(())
    }
}
