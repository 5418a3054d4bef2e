//! Extraction configuration files.
//!
//! A configuration is the saved state of a column editing session: the
//! column set plus cutoffs and row tolerance. Every field is optional in
//! JSON and falls back to the defaults of the borelog layout.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::table::{
    CellText, ColumnSet, Cutoffs, DEFAULT_FOOTER_CUTOFF, DEFAULT_HEADER_CUTOFF,
    DEFAULT_Y_TOLERANCE, ExtractSettings,
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    pub columns: ColumnSet,
    pub header_cutoff: f64,
    pub footer_cutoff: f64,
    pub y_tolerance: f64,
    /// Trim the leading space every non-empty cell otherwise carries.
    pub trim_cells: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            columns: ColumnSet::borelog_preset(),
            header_cutoff: DEFAULT_HEADER_CUTOFF,
            footer_cutoff: DEFAULT_FOOTER_CUTOFF,
            y_tolerance: DEFAULT_Y_TOLERANCE,
            trim_cells: false,
        }
    }
}

impl ExtractionConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Settings for one extraction call. Validated by the extractor.
    pub fn settings(&self) -> ExtractSettings {
        ExtractSettings {
            y_tolerance: self.y_tolerance,
            cutoffs: Cutoffs::new(self.header_cutoff, self.footer_cutoff),
            cell_text: if self.trim_cells {
                CellText::Trimmed
            } else {
                CellText::Verbatim
            },
        }
    }
}
