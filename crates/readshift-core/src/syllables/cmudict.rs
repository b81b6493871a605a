//! Pronunciation lexicon in CMU Pronouncing Dictionary format.
//!
//! Each line holds a word followed by its ARPAbet phones. Vowel phones carry
//! a trailing stress digit (`AH0`, `EH1`, `OW2`), so the number of
//! stress-marked phones equals the number of syllables.
//!
//! ```text
//! ;;; comment
//! HELLO  HH AH0 L OW1
//! HELLO(2)  HH EH0 L OW1
//! ```

use std::collections::HashMap;
use std::str::FromStr;

use camino::Utf8Path;

use super::SyllableSource;
use crate::error::{LexiconError, LexiconResult};

/// Word → pronunciations, in the order they appear in the source.
#[derive(Debug, Clone, Default)]
pub struct PronouncingDictionary {
    entries: HashMap<String, Vec<Vec<String>>>,
}

impl PronouncingDictionary {
    /// Create an empty lexicon.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a lexicon file from disk.
    #[tracing::instrument(skip_all, fields(path = %path))]
    pub fn load(path: &Utf8Path) -> LexiconResult<Self> {
        let source =
            std::fs::read_to_string(path.as_std_path()).map_err(|source| LexiconError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        let dict = Self::parse(&source, path)?;
        tracing::debug!(words = dict.len(), "pronunciation lexicon loaded");
        Ok(dict)
    }

    fn parse(source: &str, origin: &Utf8Path) -> LexiconResult<Self> {
        let mut dict = Self::new();

        for (idx, raw) in source.lines().enumerate() {
            let line = raw.split(" #").next().unwrap_or_default().trim();
            if line.is_empty() || line.starts_with(";;;") || line.starts_with('#') {
                continue;
            }

            let mut fields = line.split_whitespace();
            let Some(head) = fields.next() else {
                continue;
            };
            let phones: Vec<String> = fields.map(str::to_string).collect();
            if phones.is_empty() {
                return Err(LexiconError::Parse {
                    path: origin.to_path_buf(),
                    line: idx + 1,
                    message: format!("entry `{head}` has no phones"),
                });
            }

            dict.insert(strip_variant(head), phones);
        }

        Ok(dict)
    }

    /// Add a pronunciation for `word`, after any it already has.
    pub fn insert(&mut self, word: &str, phones: Vec<String>) {
        self.entries
            .entry(word.to_lowercase())
            .or_default()
            .push(phones);
    }

    /// All pronunciations listed for `word`, in source order.
    pub fn pronunciations(&self, word: &str) -> Option<&[Vec<String>]> {
        self.entries
            .get(word.to_lowercase().as_str())
            .map(Vec::as_slice)
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the lexicon has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromStr for PronouncingDictionary {
    type Err = LexiconError;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        Self::parse(source, Utf8Path::new("<inline>"))
    }
}

impl SyllableSource for PronouncingDictionary {
    fn name(&self) -> &'static str {
        "pronunciation lexicon"
    }

    fn syllables(&self, word: &str) -> Option<usize> {
        let first = self.entries.get(word)?.first()?;
        Some(stress_count(first))
    }
}

/// Number of phones ending in a stress digit.
pub fn stress_count<S: AsRef<str>>(phones: &[S]) -> usize {
    phones
        .iter()
        .filter(|p| p.as_ref().ends_with(|c: char| c.is_ascii_digit()))
        .count()
}

/// `WORD(2)` → `WORD`.
fn strip_variant(head: &str) -> &str {
    match head.find('(') {
        Some(open) if open > 0 && head.ends_with(')') => &head[..open],
        _ => head,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
;;; sample entries
HELLO  HH AH0 L OW1
HELLO(2)  HH EH0 L OW1
CHOCOLATE  CH AA1 K L AH0 T
CHOCOLATE(2)  CH AO1 K AH0 L AH0 T
dog D AO1 G # lowercase entries occur in newer releases
";

    #[test]
    fn parses_entries_and_variants() {
        let dict: PronouncingDictionary = SAMPLE.parse().unwrap();
        assert_eq!(dict.len(), 3);
        assert_eq!(dict.pronunciations("hello").unwrap().len(), 2);
        assert_eq!(dict.pronunciations("Dog").unwrap()[0], vec!["D", "AO1", "G"]);
    }

    #[test]
    fn syllables_come_from_first_pronunciation() {
        let dict: PronouncingDictionary = SAMPLE.parse().unwrap();
        // First listing has 2 stressed vowels, the alternate has 3.
        assert_eq!(dict.syllables("chocolate"), Some(2));
        assert_eq!(dict.syllables("hello"), Some(2));
        assert_eq!(dict.syllables("cat"), None);
    }

    #[test]
    fn stress_count_counts_digit_suffixes() {
        assert_eq!(stress_count(&["AH0", "B", "AW1", "T"]), 2);
        assert_eq!(stress_count::<&str>(&[]), 0);
        assert_eq!(stress_count(&["K", "S"]), 0);
    }

    #[test]
    fn entry_without_phones_is_an_error() {
        let err = "HELLO  HH AH0 L OW1\nORPHAN\n"
            .parse::<PronouncingDictionary>()
            .unwrap_err();
        assert!(matches!(err, LexiconError::Parse { line: 2, .. }));
    }

    #[test]
    fn load_from_disk() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("cmudict.dict");
        std::fs::write(&path, SAMPLE).unwrap();
        let path = camino::Utf8PathBuf::try_from(path).unwrap();

        let dict = PronouncingDictionary::load(&path).unwrap();
        assert_eq!(dict.len(), 3);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = PronouncingDictionary::load(Utf8Path::new("/nonexistent/cmudict.dict"))
            .unwrap_err();
        assert!(matches!(err, LexiconError::Io { .. }));
    }

    #[test]
    fn strip_variant_suffix() {
        assert_eq!(strip_variant("READ(2)"), "READ");
        assert_eq!(strip_variant("READ"), "READ");
        assert_eq!(strip_variant("(PAREN"), "(PAREN");
    }
}
