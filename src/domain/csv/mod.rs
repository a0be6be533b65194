// ============================================================
// CSV DOMAIN LAYER
// ============================================================
// Core types for CSV preview
// No I/O, no async, no external dependencies

mod csv_table;
mod preview_config;
mod uploaded_file;

pub use csv_table::{CsvTable, Preview, PreviewRow};
pub use preview_config::{PreviewConfig, DEFAULT_PREVIEW_ROWS};
pub use uploaded_file::{UploadedFile, ACCEPTED_EXTENSIONS};
