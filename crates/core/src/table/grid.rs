//! Extracted table grid.

use std::fmt;

use indexmap::IndexMap;
use itertools::Itertools;
use serde::Serialize;
use serde_json::{Map, Value};

/// A record as handed to an export layer: column name to cell text.
pub type Record = Map<String, Value>;

/// One output row: the populated cells of a row bucket, in column order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TableRow {
    /// Representative `top` of the row bucket.
    pub y: f64,
    pub cells: IndexMap<String, String>,
}

impl TableRow {
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }
}

/// Rows of one page ordered top to bottom.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ExtractedTable {
    /// Column names of the extraction call, in column order.
    pub columns: Vec<String>,
    pub rows: Vec<TableRow>,
}

impl ExtractedTable {
    pub fn empty(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Rows as records. With `fill_missing` every column is present and
    /// unpopulated cells are empty strings.
    pub fn records(&self, fill_missing: bool) -> Vec<Record> {
        self.rows
            .iter()
            .map(|row| {
                if fill_missing {
                    self.columns
                        .iter()
                        .map(|col| {
                            let text = row.get(col).unwrap_or_default();
                            (col.clone(), Value::String(text.to_string()))
                        })
                        .collect()
                } else {
                    row.cells
                        .iter()
                        .map(|(col, text)| (col.clone(), Value::String(text.clone())))
                        .collect()
                }
            })
            .collect()
    }
}

impl fmt::Display for ExtractedTable {
    /// One line per row: `y | name=text | ...`, cell text shown verbatim.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines = self.rows.iter().map(|row| {
            let cells = row
                .cells
                .iter()
                .map(|(name, text)| format!("{name}={text}"))
                .join(" | ");
            format!("{} | {}", row.y, cells)
        });
        write!(f, "{}", lines.format("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ExtractedTable {
        let mut a = IndexMap::new();
        a.insert("SoilType".to_string(), " Sand".to_string());
        a.insert("SampleID".to_string(), " S-1".to_string());
        let mut b = IndexMap::new();
        b.insert("SoilType".to_string(), " Clay".to_string());
        ExtractedTable {
            columns: vec!["SoilType".into(), "SampleID".into()],
            rows: vec![
                TableRow { y: 200.0, cells: a },
                TableRow { y: 260.0, cells: b },
            ],
        }
    }

    #[test]
    fn records_omit_missing_cells_by_default() {
        let records = sample().records(false);
        assert_eq!(records.len(), 2);
        assert!(!records[1].contains_key("SampleID"));
    }

    #[test]
    fn records_fill_missing_in_column_order() {
        let records = sample().records(true);
        let keys: Vec<&String> = records[1].keys().collect();
        assert_eq!(keys, vec!["SoilType", "SampleID"]);
        assert_eq!(records[1]["SampleID"], Value::String(String::new()));
    }

    #[test]
    fn display_lists_rows() {
        insta::assert_snapshot!(sample().to_string(), @r"
        200 | SoilType= Sand | SampleID= S-1
        260 | SoilType= Clay
        ");
    }
}
