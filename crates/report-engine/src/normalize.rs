//! Text normalization into canonical token sequences.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;
use std::sync::Arc;

lazy_static! {
    // Token alphabet: lowercase Latin and Cyrillic letters, digits, periods.
    // The Cyrillic range stops at 'я', so 'ё' is stripped like punctuation.
    static ref NON_TOKEN_CHARS: Regex = Regex::new(r"[^a-zа-я.\d]").unwrap();
}

/// Maps one cleaned word to its canonical form.
///
/// Implementations must be deterministic and total; they see words after
/// case folding and character filtering but before period stripping.
pub trait Lemmatizer: Send + Sync {
    fn lemma(&self, word: &str) -> String;
}

/// Identity lemmatizer for texts that need no morphological folding.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLemmatizer;

impl Lemmatizer for NoopLemmatizer {
    fn lemma(&self, word: &str) -> String {
        word.to_string()
    }
}

/// Dictionary-backed lemmatizer mapping inflected forms to canonical ones.
///
/// Words absent from the dictionary pass through unchanged.
#[derive(Debug, Default, Clone)]
pub struct DictionaryLemmatizer {
    forms: HashMap<String, String>,
}

impl DictionaryLemmatizer {
    pub fn new(forms: HashMap<String, String>) -> Self {
        Self { forms }
    }

    pub fn insert(&mut self, form: impl Into<String>, lemma: impl Into<String>) {
        self.forms.insert(form.into(), lemma.into());
    }
}

impl Lemmatizer for DictionaryLemmatizer {
    fn lemma(&self, word: &str) -> String {
        self.forms
            .get(word)
            .cloned()
            .unwrap_or_else(|| word.to_string())
    }
}

/// Immutable ordered token sequence representing one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedDocument {
    tokens: Vec<String>,
}

impl NormalizedDocument {
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Separator-less concatenation of `tokens[start..end)`.
    ///
    /// Out-of-range or inverted bounds clamp to the empty slice.
    pub fn concat(&self, start: usize, end: usize) -> String {
        let end = end.min(self.tokens.len());
        if start >= end {
            return String::new();
        }
        self.tokens[start..end].concat()
    }

    pub fn concat_all(&self) -> String {
        self.tokens.concat()
    }
}

/// Turns raw text into a [`NormalizedDocument`].
///
/// Pipeline per whitespace-separated word: lowercase, strip characters
/// outside the token alphabet, lemmatize, strip periods, drop empty results.
#[derive(Clone)]
pub struct Normalizer {
    lemmatizer: Arc<dyn Lemmatizer>,
}

impl Normalizer {
    pub fn new(lemmatizer: Arc<dyn Lemmatizer>) -> Self {
        Self { lemmatizer }
    }

    pub fn normalize(&self, text: &str) -> NormalizedDocument {
        let text = text.to_lowercase();
        let tokens = text
            .split_whitespace()
            .filter_map(|word| {
                let cleaned = NON_TOKEN_CHARS.replace_all(word, "");
                let token = self.lemmatizer.lemma(&cleaned).replace('.', "");
                if token.is_empty() {
                    None
                } else {
                    Some(token)
                }
            })
            .collect();
        NormalizedDocument { tokens }
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(Arc::new(NoopLemmatizer))
    }
}
