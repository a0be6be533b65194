pub mod error;
pub mod frame;
pub mod widgets;

// CSV preview module
pub mod csv;
