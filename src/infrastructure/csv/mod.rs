// ============================================================
// CSV INFRASTRUCTURE LAYER
// ============================================================
// Upload decoding and CSV parsing

mod csv_parser;
mod encoding;

pub use csv_parser::CsvParser;
pub use encoding::decode_upload;
