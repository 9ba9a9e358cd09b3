use std::collections::HashSet;
use std::fmt;

pub const WORD_LENGTH: usize = 5;

pub const EMBEDDED_WORDS: &str = include_str!("resources/words.txt");

/// A catalog entry failed validation at construction time.
#[derive(Debug, PartialEq, Eq)]
pub enum CatalogError {
    Empty,
    InvalidWord(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "word catalog is empty"),
            Self::InvalidWord(word) => {
                write!(f, "invalid catalog entry '{word}': expected {WORD_LENGTH} letters A-Z")
            }
        }
    }
}

impl std::error::Error for CatalogError {}

/// Ordered, immutable list of answer words.
///
/// The same list doubles as the allowed-guess vocabulary, so lookups by
/// index (daily selection) and by word (guess validation) both have to be
/// cheap. Entries are validated once at construction and never mutated.
pub struct WordCatalog {
    words: Vec<String>,
    allowed: HashSet<String>,
}

fn is_catalog_word(word: &str) -> bool {
    word.len() == WORD_LENGTH && word.bytes().all(|b| b.is_ascii_uppercase())
}

impl WordCatalog {
    /// Builds a catalog, rejecting empty input and malformed entries.
    pub fn new(words: Vec<String>) -> Result<Self, CatalogError> {
        if words.is_empty() {
            return Err(CatalogError::Empty);
        }
        if let Some(bad) = words.iter().find(|w| !is_catalog_word(w)) {
            return Err(CatalogError::InvalidWord(bad.clone()));
        }
        let allowed = words.iter().cloned().collect();
        Ok(Self { words, allowed })
    }

    /// The compiled-in answer list.
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_str_data(EMBEDDED_WORDS)
    }

    /// Parses a newline-delimited word list. Lines are trimmed and
    /// uppercased; blank lines are skipped.
    pub fn from_str_data(data: &str) -> Result<Self, CatalogError> {
        let words = data
            .lines()
            .map(|line| line.trim().to_uppercase())
            .filter(|word| !word.is_empty())
            .collect();
        Self::new(words)
    }

    pub fn get(&self, index: usize) -> &str {
        &self.words[index]
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Whether a word may be submitted as a guess.
    pub fn contains(&self, word: &str) -> bool {
        self.allowed.contains(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(words: &[&str]) -> WordCatalog {
        WordCatalog::new(words.iter().map(|w| w.to_string()).collect()).unwrap()
    }

    #[test]
    fn test_embedded_catalog_loads() {
        let catalog = WordCatalog::embedded().unwrap();
        assert!(catalog.len() > 365, "need at least a year of answers");
        assert!(catalog.contains("APPLE"));
    }

    #[test]
    fn test_embedded_catalog_entries_are_valid() {
        let catalog = WordCatalog::embedded().unwrap();
        for i in 0..catalog.len() {
            let word = catalog.get(i);
            assert_eq!(word.len(), WORD_LENGTH, "bad length: {word}");
            assert!(word.bytes().all(|b| b.is_ascii_uppercase()), "bad chars: {word}");
        }
    }

    #[test]
    fn test_empty_catalog_rejected() {
        assert_eq!(WordCatalog::new(Vec::new()).err(), Some(CatalogError::Empty));
    }

    #[test]
    fn test_wrong_length_entry_rejected() {
        let result = WordCatalog::new(vec!["APPLE".to_string(), "PEAR".to_string()]);
        assert_eq!(result.err(), Some(CatalogError::InvalidWord("PEAR".to_string())));
    }

    #[test]
    fn test_non_alphabetic_entry_rejected() {
        let result = WordCatalog::new(vec!["CR4NE".to_string()]);
        assert!(result.is_err());
    }

    #[test]
    fn test_from_str_data_normalizes_case_and_whitespace() {
        let catalog = WordCatalog::from_str_data("apple\n  crane  \n\nSLATE\n").unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.get(0), "APPLE");
        assert!(catalog.contains("CRANE"));
        assert!(catalog.contains("SLATE"));
    }

    #[test]
    fn test_contains_is_exact() {
        let catalog = catalog(&["APPLE", "CRANE"]);
        assert!(catalog.contains("APPLE"));
        assert!(!catalog.contains("apple"));
        assert!(!catalog.contains("GRAPE"));
    }

    #[test]
    fn test_get_preserves_order() {
        let catalog = catalog(&["FIRST", "LATER", "THIRD"]);
        assert_eq!(catalog.get(0), "FIRST");
        assert_eq!(catalog.get(1), "LATER");
        assert_eq!(catalog.get(2), "THIRD");
    }
}
