//! Word, cutoff and settings types for positional extraction.

use ordered_float::OrderedFloat;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Result, TableError};

// Default constants
pub const DEFAULT_Y_TOLERANCE: f64 = 2.0;
pub const DEFAULT_HEADER_CUTOFF: f64 = 160.0;
pub const DEFAULT_FOOTER_CUTOFF: f64 = 570.0;

// Key type for ordered float maps
pub(crate) type KeyF64 = OrderedFloat<f64>;

pub(crate) fn key_f64(v: f64) -> KeyF64 {
    OrderedFloat(v)
}

/// A positioned text token on a page, in top-left origin PDF units.
///
/// `x1` and `bottom` are carried for callers that draw word boxes; the
/// extractor only looks at `x0`, `top` and `text`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Word {
    pub text: String,
    pub x0: f64,
    pub top: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x1: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom: Option<f64>,
}

impl Word {
    pub fn new(text: impl Into<String>, x0: f64, top: f64) -> Self {
        Self {
            text: text.into(),
            x0,
            top,
            x1: None,
            bottom: None,
        }
    }

    pub fn with_extent(mut self, x1: f64, bottom: f64) -> Self {
        self.x1 = Some(x1);
        self.bottom = Some(bottom);
        self
    }

    /// Whether the fields extraction depends on are usable numbers.
    pub(crate) fn has_finite_anchor(&self) -> bool {
        self.x0.is_finite() && self.top.is_finite()
    }
}

/// A word record as dumped by an external PDF layer, with every field optional.
///
/// Fields that are absent, null or of the wrong JSON type all read as `None`,
/// so one bad record never fails the whole dump.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawWord {
    #[serde(default, deserialize_with = "lenient")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub x0: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub top: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub x1: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub bottom: Option<f64>,
}

fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

impl RawWord {
    /// Validate the record, `index` being its position in the page's word list.
    pub fn into_word(self, index: usize) -> Result<Word> {
        let malformed = |reason: &str| TableError::MalformedWord {
            index,
            reason: reason.to_string(),
        };
        let text = self.text.ok_or_else(|| malformed("missing or invalid text"))?;
        let x0 = self.x0.ok_or_else(|| malformed("missing or invalid x0"))?;
        let top = self.top.ok_or_else(|| malformed("missing or invalid top"))?;
        if !x0.is_finite() || !top.is_finite() {
            return Err(malformed("non-finite x0/top"));
        }
        Ok(Word {
            text,
            x0,
            top,
            x1: self.x1,
            bottom: self.bottom,
        })
    }
}

impl From<Word> for RawWord {
    fn from(w: Word) -> Self {
        Self {
            text: Some(w.text),
            x0: Some(w.x0),
            top: Some(w.top),
            x1: w.x1,
            bottom: w.bottom,
        }
    }
}

/// Header and footer y-thresholds. A word is kept iff `header <= top <= footer`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cutoffs {
    pub header: f64,
    pub footer: f64,
}

impl Default for Cutoffs {
    fn default() -> Self {
        Self {
            header: DEFAULT_HEADER_CUTOFF,
            footer: DEFAULT_FOOTER_CUTOFF,
        }
    }
}

impl Cutoffs {
    pub fn new(header: f64, footer: f64) -> Self {
        Self { header, footer }
    }

    /// Both thresholds must be finite; a NaN would let every word through.
    pub fn validate(&self) -> Result<()> {
        if !self.header.is_finite() || !self.footer.is_finite() {
            return Err(TableError::InvalidArgument(format!(
                "cutoffs must be finite, got header {} and footer {}",
                self.header, self.footer
            )));
        }
        Ok(())
    }

    pub fn contains(&self, top: f64) -> bool {
        !(top < self.header || top > self.footer)
    }

    /// True when no `top` value can pass both thresholds.
    pub fn is_inverted(&self) -> bool {
        self.header > self.footer
    }
}

/// How accumulated cell text is finished.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CellText {
    /// Every word is prefixed with one space, including the first.
    #[default]
    Verbatim,
    /// Same accumulation, with surrounding whitespace trimmed at the end.
    Trimmed,
}

/// Parameters for one positional extraction call.
#[derive(Clone, Debug, PartialEq)]
pub struct ExtractSettings {
    pub y_tolerance: f64,
    pub cutoffs: Cutoffs,
    pub cell_text: CellText,
}

impl Default for ExtractSettings {
    fn default() -> Self {
        Self {
            y_tolerance: DEFAULT_Y_TOLERANCE,
            cutoffs: Cutoffs::default(),
            cell_text: CellText::default(),
        }
    }
}

impl ExtractSettings {
    pub fn new(y_tolerance: f64, header_cutoff: f64, footer_cutoff: f64) -> Self {
        Self {
            y_tolerance,
            cutoffs: Cutoffs::new(header_cutoff, footer_cutoff),
            cell_text: CellText::Verbatim,
        }
    }

    pub fn trimmed(mut self) -> Self {
        self.cell_text = CellText::Trimmed;
        self
    }

    /// Reject settings that cannot produce a meaningful row grouping.
    pub fn validate(&self) -> Result<()> {
        validate_tolerance(self.y_tolerance)?;
        self.cutoffs.validate()
    }
}

pub(crate) fn validate_tolerance(tolerance: f64) -> Result<()> {
    if tolerance.is_nan() || tolerance < 0.0 {
        return Err(TableError::InvalidArgument(format!(
            "y tolerance must be a non-negative number, got {tolerance}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_word_missing_fields_are_malformed() {
        let raw = RawWord {
            text: Some("Sand".into()),
            x0: None,
            top: Some(200.0),
            ..Default::default()
        };
        match raw.into_word(3) {
            Err(TableError::MalformedWord { index, reason }) => {
                assert_eq!(index, 3);
                assert_eq!(reason, "missing or invalid x0");
            }
            other => panic!("expected MalformedWord, got {other:?}"),
        }
    }

    #[test]
    fn raw_word_rejects_nan_top() {
        let raw = RawWord {
            text: Some("x".into()),
            x0: Some(1.0),
            top: Some(f64::NAN),
            ..Default::default()
        };
        assert!(raw.into_word(0).is_err());
    }

    #[test]
    fn cutoffs_are_inclusive() {
        let c = Cutoffs::new(160.0, 570.0);
        assert!(c.contains(160.0));
        assert!(c.contains(570.0));
        assert!(!c.contains(159.99));
        assert!(!c.contains(570.01));
        assert!(!c.is_inverted());
        assert!(Cutoffs::new(600.0, 100.0).is_inverted());
    }

    #[test]
    fn tolerance_validation() {
        assert!(ExtractSettings::new(0.0, 0.0, 1.0).validate().is_ok());
        assert!(ExtractSettings::new(-0.5, 0.0, 1.0).validate().is_err());
        assert!(ExtractSettings::new(f64::NAN, 0.0, 1.0).validate().is_err());
    }

    #[test]
    fn non_finite_cutoffs_are_rejected() {
        assert!(ExtractSettings::new(2.0, f64::NAN, 570.0).validate().is_err());
        assert!(ExtractSettings::new(2.0, 160.0, f64::NAN).validate().is_err());
        assert!(ExtractSettings::new(2.0, 160.0, f64::INFINITY).validate().is_err());
        assert!(ExtractSettings::new(2.0, 600.0, 100.0).validate().is_ok());
    }

    #[test]
    fn mistyped_fields_read_as_none() {
        let raw: RawWord =
            serde_json::from_str(r#"{"text": 5, "x0": "87", "top": 200, "x1": null}"#).unwrap();
        assert_eq!(raw.text, None);
        assert_eq!(raw.x0, None);
        assert_eq!(raw.top, Some(200.0));
        assert_eq!(raw.x1, None);
        match raw.into_word(1) {
            Err(TableError::MalformedWord { reason, .. }) => {
                assert_eq!(reason, "missing or invalid text")
            }
            other => panic!("expected MalformedWord, got {other:?}"),
        }
    }
}
