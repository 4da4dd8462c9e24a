//! Keyword frequency ranking across a document collection

use super::counter::OrderedCounter;
use super::tokenizer::Tokenizer;
use super::{ensure_top_n, AnalysisResult};
use crate::models::{Document, KeywordCount};

/// Rank the `top_n` most frequent keywords using the default stopwords
///
/// Equal counts keep the order in which words were first encountered.
pub fn rank_keywords<'a, I>(documents: I, top_n: usize) -> AnalysisResult<Vec<KeywordCount>>
where
    I: IntoIterator<Item = &'a Document>,
{
    rank_keywords_with(&Tokenizer::default(), documents, top_n)
}

/// Rank the `top_n` most frequent keywords with a caller-provided tokenizer
pub fn rank_keywords_with<'a, I>(
    tokenizer: &Tokenizer,
    documents: I,
    top_n: usize,
) -> AnalysisResult<Vec<KeywordCount>>
where
    I: IntoIterator<Item = &'a Document>,
{
    ensure_top_n(top_n)?;

    let mut counter = OrderedCounter::new();
    let mut document_count = 0usize;
    for document in documents {
        counter.extend(tokenizer.tokenize(document.text()));
        document_count += 1;
    }

    tracing::debug!(
        documents = document_count,
        distinct = counter.len(),
        top_n,
        "Ranked keywords"
    );

    Ok(counter
        .most_common(top_n)
        .into_iter()
        .map(|(word, count)| KeywordCount::new(word, count))
        .collect())
}
