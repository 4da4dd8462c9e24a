//! Memoized analysis session over one loaded corpus
//!
//! [`Analyzer`] holds the documents, the configured tokenizer and an
//! [`AnalysisCache`], and exposes every analysis the CLI renders. Repeated
//! keyword requests with the same parameters are served from the cache.
//! Volume, engagement and hashtag figures carry floats and are recomputed
//! in a single pass instead.

use crate::analytics::{
    categorize_keywords, daily_sentiment, daily_top_keywords_with, engagement_stats,
    fill_date_range, keyword_cooccurrence_with, keyword_daily_counts, keyword_shares,
    post_volume, rank_hashtags, rank_keywords_with, sentiment_distribution, summarize,
    tracked_set, CategorizedKeywords, CooccurrenceMatrix, EngagementStats, HashtagRanking,
    KeywordShare, KeywordSummary, PostVolume, SentimentDistribution, SeriesPoint, Spike,
    Tokenizer, TrendAnalyzer, TrendDirection,
};
use crate::cache::AnalysisCache;
use crate::config::AnalysisConfig;
use crate::dataset::DateRange;
use crate::error::Result;
use crate::models::{CooccurrencePair, DailyKeywordSet, Document, KeywordCount, Sentiment};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Global keyword ranking with its derived views
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordReport {
    pub keywords: Vec<KeywordShare>,
    pub categories: CategorizedKeywords,
    pub summary: KeywordSummary,
}

/// Co-occurrence pairs and their matrix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CooccurrenceReport {
    pub pairs: Vec<CooccurrencePair>,
    pub matrix: CooccurrenceMatrix,
}

/// Direction and spikes for one followed keyword
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordTrendReport {
    pub keyword: String,
    pub direction: Option<TrendDirection>,
    pub velocity: Option<f64>,
    pub spikes: Vec<Spike>,
}

/// Daily evolution of the leading keywords
///
/// `series` holds a point for every followed word on every day of the
/// period, zero on days the word was not used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendReport {
    pub series: Vec<SeriesPoint>,
    pub trends: Vec<KeywordTrendReport>,
}

/// Sentiment overall and per day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentReport {
    pub distribution: SentimentDistribution,
    pub daily: BTreeMap<NaiveDate, BTreeMap<Sentiment, usize>>,
}

/// Every analysis in one document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FullReport {
    pub documents: usize,
    pub period: Option<DateRange>,
    pub keywords: KeywordReport,
    pub cooccurrence: CooccurrenceReport,
    pub daily: DailyKeywordSet,
    pub trends: TrendReport,
    pub sentiment: SentimentReport,
    pub volume: Option<PostVolume>,
    pub engagement: EngagementStats,
    pub hashtags: HashtagRanking,
}

/// Analysis session over a fixed document collection
#[derive(Debug)]
pub struct Analyzer {
    documents: Vec<Document>,
    fingerprint: String,
    settings: AnalysisConfig,
    tokenizer: Tokenizer,
    cache: AnalysisCache,
    period: Option<DateRange>,
}

impl Analyzer {
    /// Start a session; the documents are fingerprinted once here
    pub fn new(documents: Vec<Document>, settings: AnalysisConfig) -> Self {
        let fingerprint = AnalysisCache::fingerprint(&documents);
        let tokenizer = Tokenizer::with_extra_stopwords(&settings.extra_stopwords);
        tracing::debug!(
            documents = documents.len(),
            fingerprint = %fingerprint,
            "Created analyzer"
        );
        Self {
            documents,
            fingerprint,
            settings,
            tokenizer,
            cache: AnalysisCache::new(),
            period: None,
        }
    }

    /// Report over `range` instead of the corpus span
    ///
    /// Filled daily rankings, trends and volume then cover every day of
    /// the range, including days before the first post and after the last.
    #[must_use]
    pub fn with_period(mut self, range: DateRange) -> Self {
        self.period = Some(range);
        self
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn settings(&self) -> &AnalysisConfig {
        &self.settings
    }

    pub fn cache(&self) -> &AnalysisCache {
        &self.cache
    }

    /// The configured period, or else the earliest and latest UTC day in the corpus
    pub fn period(&self) -> Option<DateRange> {
        if let Some(range) = self.period {
            return Some(range);
        }
        let start = self.documents.iter().map(Document::date).min()?;
        let end = self.documents.iter().map(Document::date).max()?;
        Some(DateRange { start, end })
    }

    fn key(&self, kind: &str, params: &[usize]) -> String {
        AnalysisCache::key(kind, &self.fingerprint, params)
    }

    /// Global keyword ranking
    pub fn top_keywords(&mut self, top_n: usize) -> Result<Vec<KeywordCount>> {
        let key = self.key("keywords", &[top_n]);
        let (tokenizer, documents) = (&self.tokenizer, &self.documents);
        self.cache
            .get_or_compute(&key, || rank_keywords_with(tokenizer, documents, top_n))
    }

    /// Ranking with shares, categories and summary figures
    pub fn keyword_report(&mut self, top_n: usize) -> Result<KeywordReport> {
        let keywords = self.top_keywords(top_n)?;
        Ok(KeywordReport {
            keywords: keyword_shares(&keywords),
            categories: categorize_keywords(&keywords),
            summary: summarize(&self.documents, &keywords),
        })
    }

    /// Co-occurrence among the top `tracked` keywords
    pub fn cooccurrence(&mut self, tracked: usize, top_n: usize) -> Result<Vec<CooccurrencePair>> {
        let keywords = self.top_keywords(tracked)?;
        let key = self.key("cooccurrence", &[tracked, top_n]);
        let tracked = tracked_set(&keywords);
        let (tokenizer, documents) = (&self.tokenizer, &self.documents);
        self.cache.get_or_compute(&key, || {
            keyword_cooccurrence_with(tokenizer, documents, &tracked, top_n)
        })
    }

    /// Pairs plus the matrix over the leading pairs
    pub fn cooccurrence_report(&mut self, tracked: usize, top_n: usize) -> Result<CooccurrenceReport> {
        let pairs = self.cooccurrence(tracked, top_n)?;
        let matrix = CooccurrenceMatrix::from_pairs(&pairs, self.settings.matrix_pairs);
        Ok(CooccurrenceReport { pairs, matrix })
    }

    /// Per-day rankings; with `fill`, every day of [`Self::period`] is present
    pub fn daily_keywords(&mut self, top_n: usize, fill: bool) -> Result<DailyKeywordSet> {
        let key = self.key("daily", &[top_n]);
        let (tokenizer, documents) = (&self.tokenizer, &self.documents);
        let mut daily = self
            .cache
            .get_or_compute(&key, || daily_top_keywords_with(tokenizer, documents, top_n))?;
        if fill {
            if let Some(period) = self.period() {
                fill_date_range(&mut daily, period.start, period.end);
            }
        }
        Ok(daily)
    }

    /// Daily series, direction and spikes for the leading `keywords` words
    pub fn trend_report(
        &mut self,
        keywords: usize,
        window: usize,
        threshold: f64,
    ) -> Result<TrendReport> {
        let followed: Vec<String> = self
            .top_keywords(keywords)?
            .into_iter()
            .map(|k| k.word)
            .collect();
        let series = match self.period() {
            Some(period) => keyword_daily_counts(
                &self.tokenizer,
                &self.documents,
                &followed,
                period.start,
                period.end,
            ),
            None => Vec::new(),
        };
        let analyzer = TrendAnalyzer::from_series(&series, window)?;

        let trends = followed
            .iter()
            .map(|word| {
                let trend = analyzer.get_trend(word);
                let fitted = trend.and_then(|t| t.trend_direction(None).ok());
                KeywordTrendReport {
                    keyword: word.clone(),
                    direction: fitted.map(|(direction, _)| direction),
                    velocity: fitted.map(|(_, velocity)| velocity),
                    spikes: trend.map(|t| t.detect_spikes(threshold)).unwrap_or_default(),
                }
            })
            .collect();

        Ok(TrendReport { series, trends })
    }

    /// Post volume over [`Self::period`]; `None` without a period
    pub fn volume_report(&self, window: usize, threshold: f64) -> Result<Option<PostVolume>> {
        let Some(period) = self.period() else {
            return Ok(None);
        };
        let volume = post_volume(&self.documents, period.start, period.end, window, threshold)?;
        Ok(Some(volume))
    }

    /// Likes and retweets with the `top_posts` most engaged posts
    pub fn engagement_report(&self, top_posts: usize) -> Result<EngagementStats> {
        Ok(engagement_stats(&self.documents, top_posts)?)
    }

    /// The `top_n` most used hashtags
    pub fn hashtag_report(&self, top_n: usize) -> Result<HashtagRanking> {
        Ok(rank_hashtags(&self.documents, top_n)?)
    }

    /// Sentiment distribution and daily counts
    pub fn sentiment_report(&mut self) -> Result<SentimentReport> {
        let key = self.key("sentiment", &[]);
        let documents = &self.documents;
        self.cache.get_or_compute(&key, || {
            Ok::<_, crate::error::Error>(SentimentReport {
                distribution: sentiment_distribution(documents),
                daily: daily_sentiment(documents),
            })
        })
    }

    /// Every analysis with the configured sizes
    pub fn full_report(&mut self) -> Result<FullReport> {
        let s = self.settings.clone();
        Ok(FullReport {
            documents: self.documents.len(),
            period: self.period(),
            keywords: self.keyword_report(s.top_keywords)?,
            cooccurrence: self.cooccurrence_report(s.top_keywords, s.cooccurrence_top)?,
            daily: self.daily_keywords(s.daily_top, false)?,
            trends: self.trend_report(s.trend_keywords, s.trend_window, s.spike_threshold)?,
            sentiment: self.sentiment_report()?,
            volume: self.volume_report(s.trend_window, s.spike_threshold)?,
            engagement: self.engagement_report(s.top_posts)?,
            hashtags: self.hashtag_report(s.hashtag_top)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn analyzer() -> Analyzer {
        let day = |d| Utc.with_ymd_and_hms(2025, 9, d, 12, 0, 0).unwrap();
        let documents = vec![
            Document::with_text("npm package attack detected", day(8)),
            Document::with_text("malicious npm package found", day(8)),
            Document::with_text("security patch released for npm", day(10)),
        ];
        Analyzer::new(documents, AnalysisConfig::default())
    }

    #[test]
    fn test_repeated_requests_hit_cache() {
        let mut analyzer = analyzer();
        let first = analyzer.top_keywords(3).unwrap();
        let second = analyzer.top_keywords(3).unwrap();
        assert_eq!(first, second);
        assert_eq!(analyzer.cache().stats().hits, 1);
    }

    #[test]
    fn test_cooccurrence_report() {
        let mut analyzer = analyzer();
        let report = analyzer.cooccurrence_report(2, 5).unwrap();
        assert_eq!(report.pairs, vec![CooccurrencePair::new("npm", "package", 2)]);
        assert_eq!(report.matrix.get("package", "npm"), 2);
    }

    #[test]
    fn test_daily_fill() {
        let mut analyzer = analyzer();
        assert_eq!(analyzer.daily_keywords(2, false).unwrap().len(), 2);
        let filled = analyzer.daily_keywords(2, true).unwrap();
        assert_eq!(filled.len(), 3);
        assert!(filled[&NaiveDate::from_ymd_opt(2025, 9, 9).unwrap()].is_empty());
    }

    #[test]
    fn test_fill_covers_configured_period() {
        let date = |d| NaiveDate::from_ymd_opt(2025, 9, d).unwrap();
        let range = DateRange::new(date(1), date(14)).unwrap();
        let mut analyzer = analyzer().with_period(range);
        assert_eq!(analyzer.period(), Some(range));

        let filled = analyzer.daily_keywords(2, true).unwrap();
        assert_eq!(filled.len(), 14);
        assert!(filled[&date(1)].is_empty());
        assert!(filled[&date(14)].is_empty());
        assert!(!filled[&date(8)].is_empty());
    }

    #[test]
    fn test_trend_series_keeps_days_outside_daily_top() {
        let day = |d| Utc.with_ymd_and_hms(2025, 9, d, 12, 0, 0).unwrap();
        let mut documents: Vec<Document> = (1..=7)
            .map(|d| Document::with_text("worm patch patch", day(d)))
            .collect();
        documents.extend((0..8).map(|_| Document::with_text("worm", day(21))));
        let settings = AnalysisConfig {
            daily_top: 1,
            ..AnalysisConfig::default()
        };
        let mut analyzer = Analyzer::new(documents, settings);

        let report = analyzer.trend_report(2, 7, 2.0).unwrap();
        // worm never wins a day of the first week but still has a point there
        let worm: Vec<&SeriesPoint> = report.series.iter().filter(|p| p.word == "worm").collect();
        assert_eq!(worm.len(), 21);
        assert!(worm[..7].iter().all(|p| p.count == 1));
        assert!(worm[7..20].iter().all(|p| p.count == 0));

        let worm = report.trends.iter().find(|t| t.keyword == "worm").unwrap();
        assert_eq!(worm.spikes.len(), 1);
        assert_eq!(worm.spikes[0].date, NaiveDate::from_ymd_opt(2025, 9, 21).unwrap());
        assert!((worm.spikes[0].expected - 8.0 / 7.0).abs() < 1e-9);
        assert!((worm.spikes[0].magnitude - 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_volume_engagement_and_hashtags() {
        let day = |d| Utc.with_ymd_and_hms(2025, 9, d, 9, 0, 0).unwrap();
        let mut first = Document::with_text("#NPM worm #npm", day(8));
        first.favorite_count = 5;
        first.retweet_count = 1;
        let documents = vec![first, Document::with_text("#worm patch", day(10))];
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 9, 30).unwrap(),
        )
        .unwrap();
        let analyzer = Analyzer::new(documents, AnalysisConfig::default()).with_period(range);

        let volume = analyzer.volume_report(7, 2.0).unwrap().unwrap();
        assert_eq!(volume.daily.len(), 30);
        assert_eq!(volume.posts, 2);
        assert_eq!(volume.peak_hour, Some(9));

        let engagement = analyzer.engagement_report(10).unwrap();
        assert_eq!(engagement.total_engagement, 6);
        assert!((engagement.engagement_rate - 50.0).abs() < 1e-9);

        let hashtags = analyzer.hashtag_report(15).unwrap();
        assert_eq!(hashtags.tags[0], KeywordCount::new("npm", 2));
        assert_eq!(hashtags.distinct, 2);

        let empty = Analyzer::new(Vec::new(), AnalysisConfig::default());
        assert_eq!(empty.volume_report(7, 2.0).unwrap(), None);
    }

    #[test]
    fn test_full_report() {
        let mut analyzer = analyzer();
        let report = analyzer.full_report().unwrap();
        assert_eq!(report.documents, 3);
        assert_eq!(report.keywords.keywords[0].word, "npm");
        assert_eq!(report.sentiment.distribution.total, 3);
        assert_eq!(report.trends.trends.len(), 5);
        assert_eq!(report.period.unwrap().days(), 3);
        assert_eq!(report.trends.series.len(), 15);
        assert_eq!(report.volume.unwrap().posts, 3);
        assert_eq!(report.engagement.posts, 3);
        assert!(report.hashtags.tags.is_empty());
    }

    #[test]
    fn test_zero_top_n_is_error() {
        let mut analyzer = analyzer();
        assert!(analyzer.top_keywords(0).is_err());
    }
}
