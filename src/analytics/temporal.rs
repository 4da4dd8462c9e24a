//! Per-day keyword rankings
//!
//! Documents are grouped by UTC calendar day and each day is ranked on its
//! own. Days without documents are absent unless the caller fills them in.

use super::frequency::rank_keywords_with;
use super::tokenizer::Tokenizer;
use super::{ensure_top_n, AnalysisResult};
use crate::models::{DailyKeywordSet, Document};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Group documents by UTC calendar day
///
/// Every input document lands in exactly one group.
pub fn group_by_date<'a, I>(documents: I) -> BTreeMap<NaiveDate, Vec<&'a Document>>
where
    I: IntoIterator<Item = &'a Document>,
{
    let mut groups: BTreeMap<NaiveDate, Vec<&'a Document>> = BTreeMap::new();
    for document in documents {
        groups.entry(document.date()).or_default().push(document);
    }
    groups
}

/// Top `top_n` keywords for each day, default stopwords
pub fn daily_top_keywords<'a, I>(documents: I, top_n: usize) -> AnalysisResult<DailyKeywordSet>
where
    I: IntoIterator<Item = &'a Document>,
{
    daily_top_keywords_with(&Tokenizer::default(), documents, top_n)
}

/// Top `top_n` keywords for each day
pub fn daily_top_keywords_with<'a, I>(
    tokenizer: &Tokenizer,
    documents: I,
    top_n: usize,
) -> AnalysisResult<DailyKeywordSet>
where
    I: IntoIterator<Item = &'a Document>,
{
    ensure_top_n(top_n)?;

    let mut daily = DailyKeywordSet::new();
    for (date, group) in group_by_date(documents) {
        let ranked = rank_keywords_with(tokenizer, group, top_n)?;
        daily.insert(date, ranked);
    }

    tracing::debug!(days = daily.len(), top_n, "Ranked daily keywords");
    Ok(daily)
}

/// Add an empty ranking for every day in `start..=end` that has none
pub fn fill_date_range(daily: &mut DailyKeywordSet, start: NaiveDate, end: NaiveDate) {
    let mut day = start;
    while day <= end {
        daily.entry(day).or_default();
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }
}

/// A tracked keyword's count on one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub word: String,
    pub count: u64,
}

/// True daily counts of `words` for every day in `start..=end`
///
/// Nothing is cut by a per-day ranking: a word gets a point on each day
/// of the range, zero when it was not used.
pub fn keyword_daily_counts<'a, I>(
    tokenizer: &Tokenizer,
    documents: I,
    words: &[String],
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<SeriesPoint>
where
    I: IntoIterator<Item = &'a Document>,
{
    let groups = group_by_date(documents);
    let mut points = Vec::new();
    for date in start.iter_days().take_while(|d| *d <= end) {
        let mut counts = vec![0u64; words.len()];
        for document in groups.get(&date).into_iter().flatten() {
            for token in tokenizer.tokenize(document.text()) {
                if let Some(i) = words.iter().position(|w| *w == token) {
                    counts[i] += 1;
                }
            }
        }
        points.extend(words.iter().zip(counts).map(|(word, count)| SeriesPoint {
            date,
            word: word.clone(),
            count,
        }));
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::KeywordCount;
    use chrono::{TimeZone, Utc};

    fn doc(day: u32, hour: u32, text: &str) -> Document {
        Document::with_text(text, Utc.with_ymd_and_hms(2025, 9, day, hour, 0, 0).unwrap())
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, day).unwrap()
    }

    #[test]
    fn test_days_ranked_independently() {
        let documents = vec![
            doc(8, 1, "npm worm"),
            doc(8, 23, "worm spreads"),
            doc(10, 12, "patch released"),
        ];
        let daily = daily_top_keywords(&documents, 1).unwrap();
        assert_eq!(daily.len(), 2);
        assert_eq!(daily[&date(8)], vec![KeywordCount::new("worm", 2)]);
        assert_eq!(daily[&date(10)], vec![KeywordCount::new("patch", 1)]);
        assert!(!daily.contains_key(&date(9)));
    }

    #[test]
    fn test_group_by_date_partitions() {
        let documents = vec![doc(8, 1, "a"), doc(9, 2, "b"), doc(8, 3, "c")];
        let groups = group_by_date(&documents);
        let total: usize = groups.values().map(Vec::len).sum();
        assert_eq!(total, documents.len());
        assert_eq!(groups[&date(8)].len(), 2);
    }

    #[test]
    fn test_fill_date_range() {
        let documents = vec![doc(8, 1, "npm"), doc(10, 1, "npm")];
        let mut daily = daily_top_keywords(&documents, 3).unwrap();
        fill_date_range(&mut daily, date(7), date(11));
        assert_eq!(daily.len(), 5);
        assert!(daily[&date(9)].is_empty());
        assert_eq!(daily[&date(8)], vec![KeywordCount::new("npm", 1)]);
    }

    #[test]
    fn test_keyword_daily_counts_are_dense() {
        let documents = vec![
            doc(8, 1, "npm worm npm"),
            doc(8, 2, "worm"),
            doc(10, 1, "npm"),
        ];
        let words = vec!["worm".to_string(), "npm".to_string()];
        let points =
            keyword_daily_counts(&Tokenizer::default(), &documents, &words, date(8), date(11));
        assert_eq!(points.len(), 8);

        let count = |day: u32, word: &str| {
            points
                .iter()
                .find(|p| p.date == date(day) && p.word == word)
                .map(|p| p.count)
        };
        // worm ties with npm on the 8th but both are counted
        assert_eq!(count(8, "worm"), Some(2));
        assert_eq!(count(8, "npm"), Some(2));
        assert_eq!(count(9, "npm"), Some(0));
        assert_eq!(count(10, "worm"), Some(0));
        assert_eq!(count(11, "npm"), Some(0));
    }

    #[test]
    fn test_empty_input() {
        assert!(daily_top_keywords(&Vec::<Document>::new(), 5)
            .unwrap()
            .is_empty());
    }
}
