//! Review enrichment pipeline.
//!
//! Each record is enriched independently: normalization, both sentiment
//! strategies on the raw text, and topic extraction on the raw text.
//! Output order always matches input order.

use serde::Serialize;
use tracing::{info, warn};

use crate::config::AnalyzerConfig;
use crate::data::{EnrichedReview, ReviewRecord, SentimentMethod};
use crate::errors::AnalyzerError;
use crate::sentiment::{CompoundClassifier, PolarityClassifier, SentimentClassifier};
use crate::topics::TopicTable;
use crate::types::CourseCode;
use crate::utils::normalize_str;

/// A record that could not be enriched, reported instead of aborting the batch.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RecordFailure {
    /// Position of the record in the input sequence.
    pub index: usize,
    /// Course code of the record (may be blank, which is usually the reason).
    pub course_code: CourseCode,
    /// Human-readable failure description.
    pub reason: String,
}

/// Result of an isolated batch run.
#[derive(Clone, Debug, Default)]
pub struct AnalysisBatch {
    /// Successfully enriched reviews in input order.
    pub reviews: Vec<EnrichedReview>,
    /// Records that were skipped.
    pub failures: Vec<RecordFailure>,
}

impl AnalysisBatch {
    /// Whether every record was enriched.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Drives normalization, classification, and topic extraction over records.
pub struct ReviewAnalyzer {
    lexicon: Box<dyn SentimentClassifier>,
    polarity: Box<dyn SentimentClassifier>,
    topics: TopicTable,
}

impl ReviewAnalyzer {
    /// Analyzer with the embedded lexicons and the default topic table.
    pub fn builtin() -> Self {
        Self {
            lexicon: Box::new(CompoundClassifier::builtin()),
            polarity: Box::new(PolarityClassifier::builtin()),
            topics: TopicTable::default(),
        }
    }

    /// Build an analyzer from configuration, loading any external lexicons.
    ///
    /// Lexicon load failures surface here as `ClassifierUnavailable`, once,
    /// before any record is processed.
    pub fn from_config(config: &AnalyzerConfig) -> Result<Self, AnalyzerError> {
        config.validate()?;
        let compound = match &config.lexicon_path {
            Some(path) => CompoundClassifier::from_lexicon_file(path)?,
            None => CompoundClassifier::builtin(),
        }
        .with_thresholds(config.lexicon_thresholds);
        let polarity = match &config.polarity_lexicon_path {
            Some(path) => PolarityClassifier::from_lexicon_file(path)?,
            None => PolarityClassifier::builtin(),
        }
        .with_thresholds(config.polarity_thresholds);
        let topics = match &config.topic_table {
            Some(table) => TopicTable::from_pairs(table.clone())?,
            None => TopicTable::default(),
        };
        Ok(Self {
            lexicon: Box::new(compound),
            polarity: Box::new(polarity),
            topics,
        })
    }

    /// Replace the lexicon-strategy classifier.
    pub fn with_lexicon_classifier(
        mut self,
        classifier: Box<dyn SentimentClassifier>,
    ) -> Result<Self, AnalyzerError> {
        expect_method(classifier.as_ref(), SentimentMethod::Lexicon)?;
        self.lexicon = classifier;
        Ok(self)
    }

    /// Replace the polarity-strategy classifier.
    pub fn with_polarity_classifier(
        mut self,
        classifier: Box<dyn SentimentClassifier>,
    ) -> Result<Self, AnalyzerError> {
        expect_method(classifier.as_ref(), SentimentMethod::Polarity)?;
        self.polarity = classifier;
        Ok(self)
    }

    /// Replace the topic table.
    pub fn with_topic_table(mut self, topics: TopicTable) -> Self {
        self.topics = topics;
        self
    }

    /// Topic table in use.
    pub fn topic_table(&self) -> &TopicTable {
        &self.topics
    }

    /// Enrich a single record.
    pub fn enrich(&self, record: &ReviewRecord) -> Result<EnrichedReview, AnalyzerError> {
        if record.course_code.trim().is_empty() {
            return Err(AnalyzerError::input(
                "record",
                "course_code must not be empty",
            ));
        }
        let raw = record.review_text.as_str();
        Ok(EnrichedReview {
            record: record.clone(),
            cleaned_text: normalize_str(raw),
            sentiment_lexicon: self.lexicon.classify(raw),
            sentiment_polarity: self.polarity.classify(raw),
            topics: self.topics.extract_topics(raw),
        })
    }

    /// Enrich every record, failing before any work if one lacks a course code.
    pub fn analyze(&self, records: &[ReviewRecord]) -> Result<Vec<EnrichedReview>, AnalyzerError> {
        if let Some(idx) = records
            .iter()
            .position(|record| record.course_code.trim().is_empty())
        {
            return Err(AnalyzerError::input(
                "records",
                format!("record {idx} has an empty course_code"),
            ));
        }
        let reviews = records
            .iter()
            .map(|record| self.enrich(record))
            .collect::<Result<Vec<_>, _>>()?;
        info!(records = reviews.len(), "analyzed reviews");
        Ok(reviews)
    }

    /// Enrich every record, skipping and reporting the ones that fail.
    pub fn analyze_isolated(&self, records: &[ReviewRecord]) -> AnalysisBatch {
        let mut batch = AnalysisBatch::default();
        for (index, record) in records.iter().enumerate() {
            match self.enrich(record) {
                Ok(review) => batch.reviews.push(review),
                Err(err) => {
                    warn!(
                        index,
                        course_code = %record.course_code,
                        error = %err,
                        "skipping review that failed analysis"
                    );
                    batch.failures.push(RecordFailure {
                        index,
                        course_code: record.course_code.clone(),
                        reason: err.to_string(),
                    });
                }
            }
        }
        info!(
            analyzed = batch.reviews.len(),
            failed = batch.failures.len(),
            "analyzed reviews"
        );
        batch
    }
}

impl Default for ReviewAnalyzer {
    fn default() -> Self {
        Self::builtin()
    }
}

fn expect_method(
    classifier: &dyn SentimentClassifier,
    expected: SentimentMethod,
) -> Result<(), AnalyzerError> {
    if classifier.method() != expected {
        return Err(AnalyzerError::Configuration(format!(
            "expected a {expected} classifier, got {}",
            classifier.method()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Thresholds;
    use crate::data::Sentiment;

    struct FixedScore {
        method: SentimentMethod,
        score: f64,
    }

    impl SentimentClassifier for FixedScore {
        fn method(&self) -> SentimentMethod {
            self.method
        }

        fn thresholds(&self) -> Thresholds {
            Thresholds::lexicon()
        }

        fn score(&self, _text: &str) -> f64 {
            self.score
        }
    }

    fn record(code: &str, text: &str) -> ReviewRecord {
        ReviewRecord::new(code, text).unwrap()
    }

    #[test]
    fn enrich_classifies_raw_text_and_cleans_for_display() {
        let analyzer = ReviewAnalyzer::builtin();
        let review = analyzer
            .enrich(&record("CS225", "The lectures were NOT good!!"))
            .unwrap();
        assert_eq!(review.cleaned_text, "the lectures were not good");
        assert_eq!(review.sentiment_lexicon, Sentiment::Negative);
        assert_eq!(review.topics, vec!["teaching"]);
    }

    #[test]
    fn empty_review_text_is_tolerated() {
        let analyzer = ReviewAnalyzer::builtin();
        let review = analyzer.enrich(&record("CS124", "")).unwrap();
        assert_eq!(review.cleaned_text, "");
        assert_eq!(review.sentiment_lexicon, Sentiment::Neutral);
        assert_eq!(review.sentiment_polarity, Sentiment::Neutral);
        assert_eq!(review.topics, vec!["general"]);
    }

    #[test]
    fn analyze_validates_before_processing() {
        let analyzer = ReviewAnalyzer::builtin();
        let mut bad = record("CS124", "text");
        bad.course_code = String::new();
        let err = analyzer
            .analyze(&[record("CS225", "fine"), bad])
            .unwrap_err();
        assert!(err.to_string().contains("record 1"));
    }

    #[test]
    fn analyze_isolated_reports_failures_and_keeps_the_rest() {
        let analyzer = ReviewAnalyzer::builtin();
        let mut bad = record("CS124", "text");
        bad.course_code = "  ".into();
        let batch = analyzer.analyze_isolated(&[
            record("CS225", "great"),
            bad,
            record("CS374", "awful"),
        ]);
        assert!(!batch.is_complete());
        assert_eq!(batch.reviews.len(), 2);
        assert_eq!(batch.reviews[1].course_code(), "CS374");
        assert_eq!(batch.failures.len(), 1);
        assert_eq!(batch.failures[0].index, 1);
    }

    #[test]
    fn classifiers_can_be_swapped_for_stubs() {
        let analyzer = ReviewAnalyzer::builtin()
            .with_lexicon_classifier(Box::new(FixedScore {
                method: SentimentMethod::Lexicon,
                score: -0.9,
            }))
            .unwrap()
            .with_polarity_classifier(Box::new(FixedScore {
                method: SentimentMethod::Polarity,
                score: 0.9,
            }))
            .unwrap();
        let review = analyzer.enrich(&record("CS225", "anything")).unwrap();
        assert_eq!(review.sentiment_lexicon, Sentiment::Negative);
        assert_eq!(review.sentiment_polarity, Sentiment::Positive);

        let mismatched = ReviewAnalyzer::builtin().with_lexicon_classifier(Box::new(FixedScore {
            method: SentimentMethod::Polarity,
            score: 0.0,
        }));
        assert!(mismatched.is_err());
    }

    #[test]
    fn from_config_surfaces_missing_lexicon() {
        let config = AnalyzerConfig::default().with_lexicon_path("/definitely/missing/lexicon.txt");
        let err = ReviewAnalyzer::from_config(&config).err().unwrap();
        assert!(matches!(
            err,
            AnalyzerError::ClassifierUnavailable {
                strategy: SentimentMethod::Lexicon,
                ..
            }
        ));
    }
}
