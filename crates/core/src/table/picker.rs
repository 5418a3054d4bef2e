//! Two-click column definition on a rendered page image.
//!
//! The page image is rendered at `scale` pixels per PDF unit. The first
//! click marks one boundary, the second completes the column.

use super::columns::ColumnSet;
use crate::error::{Result, TableError};

pub const DEFAULT_RENDER_SCALE: f64 = 2.0;

/// Result of a [`ColumnPicker::click`].
#[derive(Clone, Debug, PartialEq)]
pub enum PickOutcome {
    /// First boundary recorded, in PDF units.
    Pending(f64),
    /// A column was added to the set.
    Added { name: String, xmin: f64, xmax: f64 },
}

#[derive(Clone, Debug)]
pub struct ColumnPicker {
    scale: f64,
    pending_px: Option<f64>,
}

impl Default for ColumnPicker {
    fn default() -> Self {
        Self {
            scale: DEFAULT_RENDER_SCALE,
            pending_px: None,
        }
    }
}

impl ColumnPicker {
    pub fn new(scale: f64) -> Result<Self> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(TableError::InvalidArgument(format!(
                "render scale must be positive, got {scale}"
            )));
        }
        Ok(Self {
            scale,
            pending_px: None,
        })
    }

    pub fn pending(&self) -> Option<f64> {
        self.pending_px.map(|px| px / self.scale)
    }

    pub fn cancel(&mut self) {
        self.pending_px = None;
    }

    /// Register a click at image x-coordinate `x_px`.
    pub fn click(&mut self, x_px: f64, columns: &mut ColumnSet) -> Result<PickOutcome> {
        if !x_px.is_finite() {
            return Err(TableError::InvalidArgument(format!(
                "click position must be finite, got {x_px}"
            )));
        }
        let Some(first) = self.pending_px.take() else {
            self.pending_px = Some(x_px);
            return Ok(PickOutcome::Pending(x_px / self.scale));
        };
        let (lo, hi) = if first <= x_px { (first, x_px) } else { (x_px, first) };
        let (xmin, xmax) = (lo / self.scale, hi / self.scale);
        let name = columns.add_range(xmin, xmax)?;
        Ok(PickOutcome::Added { name, xmin, xmax })
    }
}
