//! postab - positional table reconstruction from PDF word coordinates.
//!
//! Rebuilds tables that exist only as aligned text: words are assigned to
//! caller-defined column x-ranges and clustered into rows by their `top`.

pub mod api;
pub mod config;
pub mod error;
pub mod table;

// Re-export the page-level API for convenience
pub use api::high_level;

pub use config::ExtractionConfig;
pub use error::{Result, TableError};
pub use table::{ColumnSet, ExtractSettings, ExtractedTable, Word, extract_positional_table};
