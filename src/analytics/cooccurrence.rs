//! Keyword co-occurrence counting
//!
//! For a fixed set of tracked keywords, counts in how many documents each
//! unordered pair of keywords appears together. A document contributes at
//! most once to any pair, and only when it holds two or more tracked words.

use super::counter::OrderedCounter;
use super::tokenizer::Tokenizer;
use super::{ensure_top_n, AnalysisResult};
use crate::models::{CooccurrencePair, Document, KeywordCount};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// Collect the words of a ranking into a tracked-keyword set
pub fn tracked_set(keywords: &[KeywordCount]) -> HashSet<String> {
    keywords.iter().map(|k| k.word.clone()).collect()
}

/// Top `top_n` keyword pairs by document co-occurrence, default stopwords
pub fn keyword_cooccurrence<'a, I>(
    documents: I,
    tracked: &HashSet<String>,
    top_n: usize,
) -> AnalysisResult<Vec<CooccurrencePair>>
where
    I: IntoIterator<Item = &'a Document>,
{
    keyword_cooccurrence_with(&Tokenizer::default(), documents, tracked, top_n)
}

/// Top `top_n` keyword pairs by document co-occurrence
///
/// Pairs with equal counts keep the order in which they were first seen.
/// An empty tracked set gives an empty result.
pub fn keyword_cooccurrence_with<'a, I>(
    tokenizer: &Tokenizer,
    documents: I,
    tracked: &HashSet<String>,
    top_n: usize,
) -> AnalysisResult<Vec<CooccurrencePair>>
where
    I: IntoIterator<Item = &'a Document>,
{
    ensure_top_n(top_n)?;

    if tracked.len() < 2 {
        return Ok(Vec::new());
    }

    let mut counter: OrderedCounter<(String, String)> = OrderedCounter::new();
    let mut qualifying = 0usize;
    for document in documents {
        // BTreeSet dedups and sorts, so every pair comes out canonical
        let found: BTreeSet<String> = tokenizer
            .tokenize(document.text())
            .filter(|token| tracked.contains(token))
            .collect();
        if found.len() < 2 {
            continue;
        }
        qualifying += 1;

        let found: Vec<String> = found.into_iter().collect();
        for (i, first) in found.iter().enumerate() {
            for second in &found[i + 1..] {
                counter.add((first.clone(), second.clone()));
            }
        }
    }

    tracing::debug!(
        tracked = tracked.len(),
        qualifying,
        pairs = counter.len(),
        top_n,
        "Counted keyword co-occurrence"
    );

    Ok(counter
        .most_common(top_n)
        .into_iter()
        .map(|((first, second), count)| CooccurrencePair {
            first,
            second,
            count,
        })
        .collect())
}

/// Symmetric co-occurrence matrix over the words of the leading pairs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CooccurrenceMatrix {
    /// Row/column labels in first-appearance order
    pub words: Vec<String>,

    /// `counts[i][j]` is the pair count of `words[i]` and `words[j]`; zero diagonal
    pub counts: Vec<Vec<u64>>,
}

impl CooccurrenceMatrix {
    /// Build from the first `max_pairs` entries of a pair ranking
    #[must_use]
    pub fn from_pairs(pairs: &[CooccurrencePair], max_pairs: usize) -> Self {
        let mut words: Vec<String> = Vec::new();
        for pair in pairs.iter().take(max_pairs) {
            for word in [&pair.first, &pair.second] {
                if !words.contains(word) {
                    words.push(word.clone());
                }
            }
        }

        let counts = words
            .iter()
            .map(|a| {
                words
                    .iter()
                    .map(|b| {
                        if a == b {
                            0
                        } else {
                            pairs
                                .iter()
                                .find(|p| p.joins(a, b))
                                .map_or(0, |p| p.count)
                        }
                    })
                    .collect()
            })
            .collect();

        Self { words, counts }
    }

    /// Count for the pair `a`, `b` in either order; zero if absent
    #[must_use]
    pub fn get(&self, a: &str, b: &str) -> u64 {
        let i = self.words.iter().position(|w| w == a);
        let j = self.words.iter().position(|w| w == b);
        match (i, j) {
            (Some(i), Some(j)) => self.counts[i][j],
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::AnalysisError;
    use chrono::Utc;

    fn docs(texts: &[&str]) -> Vec<Document> {
        let now = Utc::now();
        texts.iter().map(|t| Document::with_text(*t, now)).collect()
    }

    fn set(words: &[&str]) -> HashSet<String> {
        words.iter().map(|w| (*w).to_string()).collect()
    }

    #[test]
    fn test_pair_counted_once_per_document() {
        let documents = docs(&[
            "npm package attack detected",
            "malicious npm package found",
            "security patch released for npm",
        ]);
        let pairs = keyword_cooccurrence(&documents, &set(&["npm", "package"]), 10).unwrap();
        assert_eq!(pairs, vec![CooccurrencePair::new("npm", "package", 2)]);
    }

    #[test]
    fn test_repeated_words_do_not_inflate() {
        let documents = docs(&["worm worm npm npm worm npm"]);
        let pairs = keyword_cooccurrence(&documents, &set(&["worm", "npm"]), 10).unwrap();
        assert_eq!(pairs, vec![CooccurrencePair::new("npm", "worm", 1)]);
    }

    #[test]
    fn test_single_tracked_word_contributes_nothing() {
        let documents = docs(&["npm only here", "and package alone"]);
        let pairs = keyword_cooccurrence(&documents, &set(&["npm", "package"]), 10).unwrap();
        assert!(pairs.is_empty());
    }

    #[test]
    fn test_three_words_give_three_pairs_in_sorted_order() {
        let documents = docs(&["worm attack npm"]);
        let pairs =
            keyword_cooccurrence(&documents, &set(&["worm", "attack", "npm"]), 10).unwrap();
        let labels: Vec<_> = pairs.iter().map(CooccurrencePair::label).collect();
        assert_eq!(labels, vec!["attack + npm", "attack + worm", "npm + worm"]);
    }

    #[test]
    fn test_top_n_and_ordering() {
        let documents = docs(&["npm worm", "npm attack", "npm worm", "attack worm"]);
        let pairs =
            keyword_cooccurrence(&documents, &set(&["npm", "worm", "attack"]), 2).unwrap();
        assert_eq!(
            pairs,
            vec![
                CooccurrencePair::new("npm", "worm", 2),
                CooccurrencePair::new("attack", "npm", 1),
            ]
        );
    }

    #[test]
    fn test_empty_tracked_set_and_zero_top_n() {
        let documents = docs(&["npm worm"]);
        assert!(keyword_cooccurrence(&documents, &HashSet::new(), 5)
            .unwrap()
            .is_empty());
        assert!(matches!(
            keyword_cooccurrence(&documents, &set(&["npm", "worm"]), 0),
            Err(AnalysisError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_matrix_is_symmetric() {
        let pairs = vec![
            CooccurrencePair::new("npm", "worm", 4),
            CooccurrencePair::new("attack", "npm", 2),
            CooccurrencePair::new("attack", "patch", 1),
        ];
        let matrix = CooccurrenceMatrix::from_pairs(&pairs, 2);
        assert_eq!(matrix.words, vec!["npm", "worm", "attack"]);
        assert_eq!(matrix.get("worm", "npm"), 4);
        assert_eq!(matrix.get("npm", "worm"), 4);
        assert_eq!(matrix.get("attack", "worm"), 0);
        assert_eq!(matrix.get("npm", "npm"), 0);
        assert_eq!(matrix.get("patch", "attack"), 0);
    }
}
