//! Analyzer configuration: sentiment cut-offs, topic settings, and lexicon
//! overrides, loadable from a JSON file.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;

use crate::constants::sentiment::{
    LEXICON_NEGATIVE_THRESHOLD, LEXICON_POSITIVE_THRESHOLD, POLARITY_NEGATIVE_THRESHOLD,
    POLARITY_POSITIVE_THRESHOLD,
};
use crate::constants::topics::{TOP_TOPIC_LIMIT, TOPIC_DELIMITER};
use crate::data::{Sentiment, SentimentMethod};
use crate::errors::AnalyzerError;
use crate::types::{Keyword, TopicTag};

/// Score cut-offs that turn a continuous score into a three-way label.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct Thresholds {
    /// Scores above (or at, when `inclusive`) this value are `Positive`.
    pub positive: f64,
    /// Scores below (or at, when `inclusive`) this value are `Negative`.
    pub negative: f64,
    /// Whether the bounds themselves belong to the outer labels.
    pub inclusive: bool,
}

impl Thresholds {
    /// Lexicon-compound bounds: `>= 0.05` positive, `<= -0.05` negative.
    pub const fn lexicon() -> Self {
        Self {
            positive: LEXICON_POSITIVE_THRESHOLD,
            negative: LEXICON_NEGATIVE_THRESHOLD,
            inclusive: true,
        }
    }

    /// Polarity bounds: `> 0.1` positive, `< -0.1` negative.
    pub const fn polarity() -> Self {
        Self {
            positive: POLARITY_POSITIVE_THRESHOLD,
            negative: POLARITY_NEGATIVE_THRESHOLD,
            inclusive: false,
        }
    }

    /// Map a score onto a label.
    pub fn label(&self, score: f64) -> Sentiment {
        let (is_positive, is_negative) = if self.inclusive {
            (score >= self.positive, score <= self.negative)
        } else {
            (score > self.positive, score < self.negative)
        };
        if is_positive {
            Sentiment::Positive
        } else if is_negative {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }
}

/// Top-level analyzer configuration.
///
/// Every field has a default, so a JSON config file only needs the keys it
/// overrides.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Cut-offs for the lexicon-compound strategy.
    pub lexicon_thresholds: Thresholds,
    /// Cut-offs for the polarity strategy.
    pub polarity_thresholds: Thresholds,
    /// Number of topics kept per course summary.
    pub top_topics: usize,
    /// Label used wherever summaries group by sentiment.
    pub group_by: SentimentMethod,
    /// Optional ordered topic table replacing the built-in one.
    pub topic_table: Option<IndexMap<TopicTag, Vec<Keyword>>>,
    /// Optional VADER-format lexicon file replacing the embedded lexicon.
    pub lexicon_path: Option<PathBuf>,
    /// Optional polarity lexicon file replacing the embedded lexicon.
    pub polarity_lexicon_path: Option<PathBuf>,
    /// Separator used for the topics cell of exported tables.
    pub topic_delimiter: String,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            lexicon_thresholds: Thresholds::lexicon(),
            polarity_thresholds: Thresholds::polarity(),
            top_topics: TOP_TOPIC_LIMIT,
            group_by: SentimentMethod::Lexicon,
            topic_table: None,
            lexicon_path: None,
            polarity_lexicon_path: None,
            topic_delimiter: TOPIC_DELIMITER.to_string(),
        }
    }
}

impl AnalyzerConfig {
    /// Read a JSON config file and validate it.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, AnalyzerError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|err| {
            AnalyzerError::Configuration(format!(
                "failed to read config '{}': {err}",
                path.display()
            ))
        })?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Override the grouping label.
    pub fn with_group_by(mut self, group_by: SentimentMethod) -> Self {
        self.group_by = group_by;
        self
    }

    /// Override the number of reported topics.
    pub fn with_top_topics(mut self, top_topics: usize) -> Self {
        self.top_topics = top_topics;
        self
    }

    /// Use an external VADER-format lexicon.
    pub fn with_lexicon_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.lexicon_path = Some(path.into());
        self
    }

    /// Use an external polarity lexicon.
    pub fn with_polarity_lexicon_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.polarity_lexicon_path = Some(path.into());
        self
    }

    /// Replace the topic table.
    pub fn with_topic_table(mut self, table: IndexMap<TopicTag, Vec<Keyword>>) -> Self {
        self.topic_table = Some(table);
        self
    }

    /// Reject settings that would make summaries meaningless.
    pub fn validate(&self) -> Result<(), AnalyzerError> {
        if self.top_topics == 0 {
            return Err(AnalyzerError::Configuration(
                "top_topics must be greater than zero".into(),
            ));
        }
        for (name, thresholds) in [
            ("lexicon_thresholds", &self.lexicon_thresholds),
            ("polarity_thresholds", &self.polarity_thresholds),
        ] {
            if thresholds.negative > thresholds.positive {
                return Err(AnalyzerError::Configuration(format!(
                    "{name}: negative bound {} exceeds positive bound {}",
                    thresholds.negative, thresholds.positive
                )));
            }
        }
        if self.topic_delimiter.is_empty() {
            return Err(AnalyzerError::Configuration(
                "topic_delimiter must not be empty".into(),
            ));
        }
        Ok(())
    }
}
