//! Row clustering for positional extraction.
//!
//! Words are grouped into rows by comparing their `top` against the row
//! keys already created in the current extraction pass. Keys are scanned in
//! creation order and the first one within tolerance wins, so a later,
//! nearer row never takes a word from an earlier one.

use super::types::validate_tolerance;
use crate::error::Result;

/// Resolve `y` against existing row keys.
///
/// Returns the first key `ry` (in creation order) with `|y - ry| <= tolerance`,
/// or `y` itself when none qualifies. The caller owns inserting new keys.
pub fn assign_row(y: f64, existing_rows: &[f64], tolerance: f64) -> Result<f64> {
    validate_tolerance(tolerance)?;
    Ok(first_within(y, existing_rows, tolerance).map_or(y, |idx| existing_rows[idx]))
}

fn first_within(y: f64, rows: &[f64], tolerance: f64) -> Option<usize> {
    rows.iter().position(|ry| (y - ry).abs() <= tolerance)
}

/// Where a word landed in [`RowBuckets::resolve`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RowSlot {
    /// Creation index of the row.
    pub index: usize,
    pub key: f64,
    pub created: bool,
}

/// Row keys of one extraction pass, kept in creation order.
#[derive(Clone, Debug)]
pub struct RowBuckets {
    keys: Vec<f64>,
    tolerance: f64,
}

impl RowBuckets {
    pub fn new(tolerance: f64) -> Result<Self> {
        validate_tolerance(tolerance)?;
        Ok(Self {
            keys: Vec::new(),
            tolerance,
        })
    }

    /// Find the row for `y`, creating a new one keyed at `y` if needed.
    pub fn resolve(&mut self, y: f64) -> RowSlot {
        match first_within(y, &self.keys, self.tolerance) {
            Some(index) => RowSlot {
                index,
                key: self.keys[index],
                created: false,
            },
            None => {
                self.keys.push(y);
                RowSlot {
                    index: self.keys.len() - 1,
                    key: y,
                    created: true,
                }
            }
        }
    }

    pub fn keys(&self) -> &[f64] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_row_when_nothing_close() {
        assert_eq!(assign_row(150.0, &[100.0], 2.0).unwrap(), 150.0);
        assert_eq!(assign_row(42.0, &[], 2.0).unwrap(), 42.0);
    }

    #[test]
    fn tolerance_is_inclusive() {
        assert_eq!(assign_row(102.0, &[100.0], 2.0).unwrap(), 100.0);
        assert_eq!(assign_row(102.5, &[100.0], 2.0).unwrap(), 102.5);
    }

    #[test]
    fn first_created_wins_over_nearest() {
        assert_eq!(assign_row(101.5, &[100.0, 103.0], 2.0).unwrap(), 100.0);
        // creation order, not numeric order
        assert_eq!(assign_row(101.5, &[103.0, 100.0], 2.0).unwrap(), 103.0);
    }

    #[test]
    fn negative_tolerance_rejected() {
        assert!(assign_row(1.0, &[1.0], -1.0).is_err());
        assert!(RowBuckets::new(-0.1).is_err());
    }

    #[test]
    fn zero_tolerance_groups_exact_matches_only() {
        let mut rows = RowBuckets::new(0.0).unwrap();
        assert!(rows.resolve(10.0).created);
        assert!(!rows.resolve(10.0).created);
        assert!(rows.resolve(10.0001).created);
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn buckets_record_creation_order() {
        let mut rows = RowBuckets::new(2.0).unwrap();
        let a = rows.resolve(150.0);
        let b = rows.resolve(100.0);
        let c = rows.resolve(101.0);
        assert_eq!((a.index, a.created), (0, true));
        assert_eq!((b.index, b.created), (1, true));
        assert_eq!(
            c,
            RowSlot {
                index: 1,
                key: 100.0,
                created: false
            }
        );
        assert_eq!(rows.keys(), &[150.0, 100.0]);
    }
}
