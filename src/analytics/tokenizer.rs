//! Post text normalization into candidate keywords
//!
//! Text is lowercased, URLs / @mentions / #hashtags are cut out, and every
//! standalone run of three or more ASCII letters becomes a token unless it
//! is a stopword. Tokens are produced lazily and keep their multiplicity.

use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

/// English function words and platform noise excluded from keyword counts
pub const STOPWORDS: &[&str] = &[
    "the", "and", "for", "are", "with", "this", "that", "from", "was", "has", "have", "been",
    "not", "but", "can", "will", "all", "more", "https", "com", "via", "new", "get", "one", "now",
    "use",
];

fn noise_regex() -> &'static Regex {
    static NOISE_RE: OnceLock<Regex> = OnceLock::new();
    NOISE_RE.get_or_init(|| Regex::new(r"http\S+|www\S+|@\S+|#\S+").expect("Invalid regex pattern"))
}

fn word_regex() -> &'static Regex {
    static WORD_RE: OnceLock<Regex> = OnceLock::new();
    WORD_RE.get_or_init(|| Regex::new(r"\b[a-z]{3,}\b").expect("Invalid regex pattern"))
}

/// Lowercase `text` and strip URLs, mentions and hashtags
pub fn clean_text(text: &str) -> String {
    let lowered = text.to_lowercase();
    noise_regex().replace_all(&lowered, "").into_owned()
}

/// Keyword tokenizer with a fixed stopword set
#[derive(Debug, Clone)]
pub struct Tokenizer {
    stopwords: HashSet<String>,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self {
            stopwords: STOPWORDS.iter().map(|w| (*w).to_string()).collect(),
        }
    }
}

impl Tokenizer {
    /// Tokenizer with the built-in stopwords
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokenizer with the built-in stopwords plus `extra`
    pub fn with_extra_stopwords<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tokenizer = Self::default();
        tokenizer
            .stopwords
            .extend(extra.into_iter().map(|w| w.as_ref().trim().to_lowercase()));
        tokenizer
    }

    /// Check a lowercased token against the stopword set
    pub fn is_stopword(&self, token: &str) -> bool {
        self.stopwords.contains(token)
    }

    /// Tokenize one document's text; absent text yields nothing
    pub fn tokenize(&self, text: Option<&str>) -> Tokens<'_> {
        Tokens {
            cleaned: text.map(clean_text).unwrap_or_default(),
            pos: 0,
            stopwords: &self.stopwords,
        }
    }
}

/// Lazy token sequence over one cleaned document
#[derive(Debug)]
pub struct Tokens<'a> {
    cleaned: String,
    pos: usize,
    stopwords: &'a HashSet<String>,
}

impl Iterator for Tokens<'_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(m) = word_regex().find_at(&self.cleaned, self.pos) {
            self.pos = m.end();
            if !self.stopwords.contains(m.as_str()) {
                return Some(m.as_str().to_string());
            }
        }
        self.pos = self.cleaned.len();
        None
    }
}

/// Tokenize with the default stopword set
pub fn tokenize(text: Option<&str>) -> Vec<String> {
    Tokenizer::default().tokenize(text).collect()
}
