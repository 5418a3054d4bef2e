//! Positional table extraction.
//!
//! Words are filtered by the header/footer cutoffs, routed to the first
//! column whose x-range holds their left edge, grouped into rows by
//! [`RowBuckets`], and their text appended to the matching cell. Rows are
//! emitted sorted by bucket key.

use indexmap::IndexMap;
use tracing::{debug, trace, warn};

use super::clustering::RowBuckets;
use super::columns::ColumnSet;
use super::grid::{ExtractedTable, TableRow};
use super::types::{CellText, ExtractSettings, RawWord, Word, key_f64};
use crate::error::Result;

/// Extract a table from one page's words.
///
/// Word order matters: it fixes row creation order (and so which row wins
/// when several are within tolerance) and the order of words within a cell.
/// Words with a non-finite `x0` or `top` are skipped.
pub fn extract_positional_table(
    words: &[Word],
    columns: &ColumnSet,
    settings: &ExtractSettings,
) -> Result<ExtractedTable> {
    settings.validate()?;
    let column_names: Vec<String> = columns.names().map(str::to_string).collect();

    if settings.cutoffs.is_inverted() {
        warn!(
            header = settings.cutoffs.header,
            footer = settings.cutoffs.footer,
            "header cutoff is below footer cutoff; no word can pass"
        );
    }
    if words.is_empty() || columns.is_empty() {
        return Ok(ExtractedTable::empty(column_names));
    }

    let mut buckets = RowBuckets::new(settings.y_tolerance)?;
    // cells[row creation index][column index]
    let mut cells: Vec<Vec<Option<String>>> = Vec::new();
    let mut kept = 0usize;

    for (index, word) in words.iter().enumerate() {
        if !word.has_finite_anchor() {
            warn!(
                index,
                x0 = word.x0,
                top = word.top,
                "skipping word with non-finite position"
            );
            continue;
        }
        if !settings.cutoffs.contains(word.top) {
            trace!(index, top = word.top, "word outside header/footer cutoffs");
            continue;
        }
        let Some((col, _)) = columns.column_for_x(word.x0) else {
            trace!(index, x0 = word.x0, "word matches no column");
            continue;
        };

        let slot = buckets.resolve(word.top);
        if slot.created {
            cells.push(vec![None; column_names.len()]);
        }
        let cell = cells[slot.index][col].get_or_insert_with(String::new);
        cell.push(' ');
        cell.push_str(&word.text);
        kept += 1;
    }

    let mut order: Vec<usize> = (0..buckets.len()).collect();
    order.sort_by_key(|&i| key_f64(buckets.keys()[i]));

    let rows: Vec<TableRow> = order
        .into_iter()
        .map(|i| TableRow {
            y: buckets.keys()[i],
            cells: finish_row(
                &column_names,
                std::mem::take(&mut cells[i]),
                settings.cell_text,
            ),
        })
        .collect();

    debug!(
        words = words.len(),
        kept,
        rows = rows.len(),
        columns = column_names.len(),
        "positional extraction finished"
    );

    Ok(ExtractedTable {
        columns: column_names,
        rows,
    })
}

fn finish_row(
    column_names: &[String],
    cells: Vec<Option<String>>,
    policy: CellText,
) -> IndexMap<String, String> {
    column_names
        .iter()
        .zip(cells)
        .filter_map(|(name, text)| {
            text.map(|text| match policy {
                CellText::Verbatim => (name.clone(), text),
                CellText::Trimmed => (name.clone(), text.trim().to_string()),
            })
        })
        .collect()
}

/// Extract from raw word records, skipping (and logging) malformed ones.
pub fn extract_raw_words(
    words: &[RawWord],
    columns: &ColumnSet,
    settings: &ExtractSettings,
) -> Result<ExtractedTable> {
    let valid = validate_words(words);
    extract_positional_table(&valid, columns, settings)
}

/// Keep the well-formed records of a page, warning about the rest.
pub fn validate_words(words: &[RawWord]) -> Vec<Word> {
    words
        .iter()
        .cloned()
        .enumerate()
        .filter_map(|(index, raw)| match raw.into_word(index) {
            Ok(word) => Some(word),
            Err(err) => {
                warn!("{err}; skipping");
                None
            }
        })
        .collect()
}
