//! Multi-page extraction API.
//!
//! Provides the page-level entry points:
//! - `extract_page()` - Extract one page ("current page")
//! - `extract_pages()` - Extract every page on a rayon pool ("all pages")
//! - `combine_pages()` - Concatenate page tables into page-tagged records

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use rayon::ThreadPoolBuilder;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{Result, TableError};
use crate::table::{ColumnSet, ExtractSettings, ExtractedTable, RawWord, Record, extract_raw_words};

/// Field added to every combined record naming its source page.
pub const PAGE_FIELD: &str = "Page";

pub(crate) fn default_thread_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// The words of one page, as produced by an external PDF layer.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PageWords {
    /// 1-based page number.
    #[serde(rename = "page")]
    pub page_number: usize,
    pub words: Vec<RawWord>,
}

/// The table extracted from one page.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PageTable {
    pub page_number: usize,
    pub table: ExtractedTable,
}

/// Shared flag that stops a batch from starting further pages.
///
/// Pages already running finish normally; cancellation only affects pages
/// not yet started.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Options for multi-page extraction.
#[derive(Clone, Debug, Default)]
pub struct BatchOptions {
    /// Worker threads. None uses the available parallelism.
    pub threads: Option<usize>,
    pub cancel: Option<CancelToken>,
}

/// Find the page with the given 1-based number.
pub fn select_page(pages: &[PageWords], page_number: usize) -> Option<&PageWords> {
    pages.iter().find(|p| p.page_number == page_number)
}

/// Extract a single page.
pub fn extract_page(
    page: &PageWords,
    columns: &ColumnSet,
    settings: &ExtractSettings,
) -> Result<PageTable> {
    let table = extract_raw_words(&page.words, columns, settings)?;
    if table.is_empty() {
        info!(page = page.page_number, "no data extracted from page");
    }
    Ok(PageTable {
        page_number: page.page_number,
        table,
    })
}

/// Extract every page in parallel. Results keep the input page order.
///
/// Settings are validated once up front, so a bad tolerance fails before
/// any page runs. When `options.cancel` fires, pages not yet started are
/// left out of the result.
pub fn extract_pages(
    pages: &[PageWords],
    columns: &ColumnSet,
    settings: &ExtractSettings,
    options: &BatchOptions,
) -> Result<Vec<PageTable>> {
    settings.validate()?;
    let thread_count = options.threads.unwrap_or_else(default_thread_count).max(1);
    let pool = ThreadPoolBuilder::new()
        .num_threads(thread_count)
        .build()
        .map_err(|e| TableError::ThreadPool(e.to_string()))?;

    let results: Vec<Option<Result<PageTable>>> = pool.install(|| {
        pages
            .par_iter()
            .map(|page| {
                if options.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
                    return None;
                }
                Some(extract_page(page, columns, settings))
            })
            .collect()
    });

    let tables = results.into_iter().flatten().collect::<Result<Vec<_>>>()?;
    debug!(
        pages = pages.len(),
        extracted = tables.len(),
        threads = thread_count,
        "batch extraction finished"
    );
    Ok(tables)
}

/// Concatenate page tables into records tagged with [`PAGE_FIELD`].
///
/// Pages with no rows contribute nothing.
pub fn combine_pages(tables: &[PageTable], fill_missing: bool) -> Vec<Record> {
    tables
        .iter()
        .filter(|t| !t.table.is_empty())
        .flat_map(|t| {
            t.table.records(fill_missing).into_iter().map(|mut record| {
                record.insert(PAGE_FIELD.to_string(), Value::from(t.page_number));
                record
            })
        })
        .collect()
}
