pub mod csv_preview;
pub mod render_cycle;
