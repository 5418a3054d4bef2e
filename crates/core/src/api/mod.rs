//! Page-level API for positional table extraction.
//!
//! # Example
//!
//! ```ignore
//! use postab_core::api::{BatchOptions, combine_pages, extract_pages, load_pages};
//! use postab_core::table::{ColumnSet, ExtractSettings};
//!
//! let pages = load_pages("words.json".as_ref())?;
//! let tables = extract_pages(&pages, &ColumnSet::borelog_preset(), &ExtractSettings::default(), &BatchOptions::default())?;
//! let records = combine_pages(&tables, true);
//! ```

pub mod dump;
pub mod high_level;

// Re-export for convenience
pub use dump::{load_pages, pages_from_json_str, pages_from_reader};
pub use high_level::{
    BatchOptions, CancelToken, PAGE_FIELD, PageTable, PageWords, combine_pages, extract_page,
    extract_pages, select_page,
};
