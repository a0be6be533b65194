pub mod use_cases;

pub use use_cases::csv_preview::CsvPreview;
pub use use_cases::render_cycle::RenderCycle;
