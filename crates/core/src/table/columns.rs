//! Named column x-ranges.
//!
//! A [`ColumnSet`] keeps columns in insertion order. Order matters twice:
//! the first matching column receives a word when ranges overlap, and
//! output cells follow it.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TableError};

const NEW_COLUMN_PREFIX: &str = "NewColumn";
const PLACEHOLDER_RANGE: (f64, f64) = (10.0, 50.0);

/// One named horizontal band, always stored with `xmin <= xmax`.
#[derive(Clone, Debug, PartialEq)]
pub struct ColumnSpec {
    pub name: String,
    pub xmin: f64,
    pub xmax: f64,
}

impl ColumnSpec {
    /// Build a column, swapping reversed bounds.
    pub fn new(name: impl Into<String>, xmin: f64, xmax: f64) -> Result<Self> {
        let (xmin, xmax) = normalize_range(xmin, xmax)?;
        Ok(Self {
            name: name.into(),
            xmin,
            xmax,
        })
    }

    pub fn contains(&self, x: f64) -> bool {
        self.xmin <= x && x <= self.xmax
    }
}

fn normalize_range(xmin: f64, xmax: f64) -> Result<(f64, f64)> {
    if !xmin.is_finite() || !xmax.is_finite() {
        return Err(TableError::InvalidArgument(format!(
            "column bounds must be finite, got ({xmin}, {xmax})"
        )));
    }
    Ok(if xmin > xmax { (xmax, xmin) } else { (xmin, xmax) })
}

/// Ordered mapping from column name to `(xmin, xmax)`.
///
/// Serializes as a JSON object `{"name": [xmin, xmax], ...}`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "IndexMap<String, (f64, f64)>", into = "IndexMap<String, (f64, f64)>")]
pub struct ColumnSet {
    ranges: IndexMap<String, (f64, f64)>,
}

impl From<IndexMap<String, (f64, f64)>> for ColumnSet {
    fn from(ranges: IndexMap<String, (f64, f64)>) -> Self {
        let ranges = ranges
            .into_iter()
            .map(|(name, (a, b))| (name, if a > b { (b, a) } else { (a, b) }))
            .collect();
        Self { ranges }
    }
}

impl From<ColumnSet> for IndexMap<String, (f64, f64)> {
    fn from(set: ColumnSet) -> Self {
        set.ranges
    }
}

impl ColumnSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// The column layout of the borelog sheets the tool was first built for.
    pub fn borelog_preset() -> Self {
        let ranges = [
            ("SoilType", 45.0, 50.0),
            ("SampleID", 85.0, 95.0),
            ("BlowCounts", 150.0, 190.0),
            ("CasingDepth_m", 195.0, 221.0),
            ("RodLength_m", 223.0, 245.0),
            ("EnergyRatio_%", 250.0, 272.0),
            ("PocketPen_kPa", 390.0, 410.0),
            ("Torvane_kPa", 410.0, 440.0),
            ("Moisture_%", 440.0, 460.0),
        ];
        Self {
            ranges: ranges
                .into_iter()
                .map(|(name, xmin, xmax)| (name.to_string(), (xmin, xmax)))
                .collect(),
        }
    }

    /// Build from specs in order. Later duplicates replace earlier ones in place.
    pub fn from_specs(specs: impl IntoIterator<Item = ColumnSpec>) -> Self {
        let mut set = Self::new();
        for spec in specs {
            set.insert(spec);
        }
        set
    }

    /// Add a column, or replace the range of an existing one without moving it.
    pub fn insert(&mut self, spec: ColumnSpec) {
        self.ranges.insert(spec.name, (spec.xmin, spec.xmax));
    }

    /// Add a `NewColumn{n}` with the placeholder range and return its name.
    pub fn add_placeholder(&mut self) -> String {
        let name = self.next_new_name();
        self.ranges.insert(name.clone(), PLACEHOLDER_RANGE);
        name
    }

    /// Add a `NewColumn{n}` covering the given range and return its name.
    pub fn add_range(&mut self, xmin: f64, xmax: f64) -> Result<String> {
        let range = normalize_range(xmin, xmax)?;
        let name = self.next_new_name();
        self.ranges.insert(name.clone(), range);
        Ok(name)
    }

    fn next_new_name(&self) -> String {
        (1..)
            .map(|n| format!("{NEW_COLUMN_PREFIX}{n}"))
            .find(|name| !self.ranges.contains_key(name))
            .unwrap_or_else(|| NEW_COLUMN_PREFIX.to_string())
    }

    /// Rename a column in place. A blank new name leaves the column as is.
    pub fn rename(&mut self, old: &str, new: &str) -> Result<()> {
        let new = new.trim();
        if !self.ranges.contains_key(old) {
            return Err(TableError::UnknownColumn(old.to_string()));
        }
        if new.is_empty() || new == old {
            return Ok(());
        }
        if self.ranges.contains_key(new) {
            return Err(TableError::InvalidArgument(format!(
                "cannot rename {old:?} to {new:?}: name already in use"
            )));
        }
        if let Some((idx, _, range)) = self.ranges.shift_remove_full(old) {
            self.ranges.shift_insert(idx, new.to_string(), range);
        }
        Ok(())
    }

    /// Move a column's bounds, swapping them if reversed.
    pub fn set_range(&mut self, name: &str, xmin: f64, xmax: f64) -> Result<()> {
        let range = normalize_range(xmin, xmax)?;
        match self.ranges.get_mut(name) {
            Some(slot) => {
                *slot = range;
                Ok(())
            }
            None => Err(TableError::UnknownColumn(name.to_string())),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<ColumnSpec> {
        self.ranges
            .shift_remove(name)
            .map(|(xmin, xmax)| ColumnSpec {
                name: name.to_string(),
                xmin,
                xmax,
            })
    }

    pub fn get(&self, name: &str) -> Option<(f64, f64)> {
        self.ranges.get(name).copied()
    }

    /// First column, in order, whose inclusive range contains `x`.
    pub fn column_for_x(&self, x: f64) -> Option<(usize, &str)> {
        self.ranges
            .iter()
            .enumerate()
            .find(|(_, (_, (xmin, xmax)))| *xmin <= x && x <= *xmax)
            .map(|(idx, (name, _))| (idx, name.as_str()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.ranges.keys().map(String::as_str)
    }

    pub fn specs(&self) -> impl Iterator<Item = ColumnSpec> + '_ {
        self.ranges.iter().map(|(name, &(xmin, xmax))| ColumnSpec {
            name: name.clone(),
            xmin,
            xmax,
        })
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}
