//! Word dumps produced by an external PDF layer.
//!
//! Three JSON shapes are accepted:
//! - `{"pages": [{"page": 1, "words": [...]}, ...]}`
//! - `[{"page": 1, "words": [...]}, ...]`
//! - `[{"text": ..., "x0": ..., "top": ...}, ...]` (a single page, numbered 1)
//!
//! A bare `[]` is read as page 1 with no words.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use super::high_level::PageWords;
use crate::error::Result;
use crate::table::RawWord;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WordDump {
    Document { pages: Vec<PageWords> },
    Pages(Vec<PageWords>),
    Words(Vec<RawWord>),
}

impl WordDump {
    fn into_pages(self) -> Vec<PageWords> {
        match self {
            WordDump::Pages(pages) if pages.is_empty() => vec![PageWords {
                page_number: 1,
                words: Vec::new(),
            }],
            WordDump::Document { pages } | WordDump::Pages(pages) => pages,
            WordDump::Words(words) => vec![PageWords {
                page_number: 1,
                words,
            }],
        }
    }
}

/// Parse a word dump from JSON text.
pub fn pages_from_json_str(json: &str) -> Result<Vec<PageWords>> {
    let dump: WordDump = serde_json::from_str(json)?;
    Ok(dump.into_pages())
}

/// Parse a word dump from a reader.
pub fn pages_from_reader<R: Read>(reader: R) -> Result<Vec<PageWords>> {
    let dump: WordDump = serde_json::from_reader(reader)?;
    Ok(dump.into_pages())
}

/// Read and parse a word dump file.
pub fn load_pages(path: &Path) -> Result<Vec<PageWords>> {
    let file = std::fs::File::open(path)?;
    pages_from_reader(std::io::BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::validate_words;

    #[test]
    fn bare_word_list_is_page_one() {
        let pages = pages_from_json_str(
            r#"[{"text": "Sand", "x0": 46, "top": 200, "x1": 60, "bottom": 210}]"#,
        )
        .unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].page_number, 1);
        assert_eq!(pages[0].words[0].text.as_deref(), Some("Sand"));
        assert_eq!(pages[0].words[0].x1, Some(60.0));
    }

    #[test]
    fn page_list_and_document_forms() {
        let list = r#"[{"page": 3, "words": [{"text": "a", "x0": 1, "top": 2}]}]"#;
        let doc = r#"{"pages": [{"page": 3, "words": [{"text": "a", "x0": 1, "top": 2}]}]}"#;
        let a = pages_from_json_str(list).unwrap();
        let b = pages_from_json_str(doc).unwrap();
        assert_eq!(a, b);
        assert_eq!(a[0].page_number, 3);
    }

    #[test]
    fn malformed_words_survive_parsing() {
        let pages = pages_from_json_str(r#"[{"text": "no coords"}, {"x0": 1, "top": 2}]"#).unwrap();
        assert_eq!(pages[0].words.len(), 2);
        assert!(pages[0].words[0].x0.is_none());
    }

    #[test]
    fn mistyped_word_keeps_its_neighbours() {
        let pages = pages_from_json_str(
            r#"[
                {"text": "Sand", "x0": 46, "top": 200},
                {"text": "S-1", "x0": "87", "top": 200},
                {"text": "Clay", "x0": 46, "top": 260}
            ]"#,
        )
        .unwrap();
        assert_eq!(pages.len(), 1);
        let words = &pages[0].words;
        assert_eq!(words.len(), 3);
        assert_eq!(words[1].text.as_deref(), Some("S-1"));
        assert!(words[1].x0.is_none());
        assert!(words[1].clone().into_word(1).is_err());
        assert_eq!(validate_words(words).len(), 2);
    }

    #[test]
    fn empty_word_list_is_an_empty_page_one() {
        let pages = pages_from_json_str("[]").unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].page_number, 1);
        assert!(pages[0].words.is_empty());
        assert!(pages_from_json_str(r#"{"pages": []}"#).unwrap().is_empty());
    }

    #[test]
    fn garbage_is_a_json_error() {
        assert!(pages_from_json_str("{\"pages\": 5}").is_err());
    }
}
