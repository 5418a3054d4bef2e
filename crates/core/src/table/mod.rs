//! Positional table extraction.
//!
//! Rebuilds a rows × columns grid from word coordinates alone: columns are
//! caller-defined x-ranges, rows are clusters of word `top` values.

mod clustering;
mod columns;
mod finder;
mod grid;
mod picker;
mod types;

// Re-export public types
pub use clustering::{RowBuckets, RowSlot, assign_row};
pub use columns::{ColumnSet, ColumnSpec};
pub use grid::{ExtractedTable, Record, TableRow};
pub use picker::{ColumnPicker, DEFAULT_RENDER_SCALE, PickOutcome};
pub use types::{
    CellText, Cutoffs, DEFAULT_FOOTER_CUTOFF, DEFAULT_HEADER_CUTOFF, DEFAULT_Y_TOLERANCE,
    ExtractSettings, RawWord, Word,
};

// Re-export public API functions
pub use finder::{extract_positional_table, extract_raw_words, validate_words};
