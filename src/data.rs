use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::columns::UNKNOWN_SOURCE;
use crate::errors::AnalyzerError;

pub use crate::types::{CourseCode, CourseName, SourceTag, TopicTag};

/// Three-way sentiment label shared by both classification strategies.
///
/// Ordering follows label spelling (`Negative < Neutral < Positive`), which is
/// the order used when summaries group ratings by label.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sentiment {
    /// Score at or past the negative cut-off.
    Negative,
    /// Score between the cut-offs, or blank text.
    Neutral,
    /// Score at or past the positive cut-off.
    Positive,
}

impl Sentiment {
    /// All labels in display order used by reports (`Positive`, `Neutral`, `Negative`).
    pub const REPORT_ORDER: [Sentiment; 3] =
        [Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative];

    /// Canonical label text.
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
            Sentiment::Positive => "Positive",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = AnalyzerError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim() {
            "Positive" => Ok(Sentiment::Positive),
            "Neutral" => Ok(Sentiment::Neutral),
            "Negative" => Ok(Sentiment::Negative),
            other => Err(AnalyzerError::Configuration(format!(
                "unknown sentiment label '{other}'"
            ))),
        }
    }
}

/// Which classification strategy a label came from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentMethod {
    /// Lexicon-compound scoring; the canonical label for summaries.
    #[default]
    Lexicon,
    /// General-purpose polarity scoring.
    Polarity,
}

impl fmt::Display for SentimentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SentimentMethod::Lexicon => f.write_str("lexicon"),
            SentimentMethod::Polarity => f.write_str("polarity"),
        }
    }
}

/// One review row as supplied by the acquisition step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReviewRecord {
    /// Grouping key; never empty.
    pub course_code: CourseCode,
    /// Display name (equals `course_code` when unmapped).
    pub course_name: CourseName,
    /// Raw review text; missing input is stored as `""`.
    #[serde(rename = "review")]
    pub review_text: String,
    /// Optional numeric rating (sources such as forums have none).
    pub rating: Option<f64>,
    /// Provenance tag.
    pub source: SourceTag,
    /// Optional semester label carried through from the input table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semester: Option<String>,
    /// Optional forum vote score carried through from the input table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<i64>,
}

impl ReviewRecord {
    /// Build a record, rejecting an empty course code.
    ///
    /// The display name defaults to the course code and the source to `unknown`.
    pub fn new(
        course_code: impl Into<CourseCode>,
        review_text: impl Into<String>,
    ) -> Result<Self, AnalyzerError> {
        let course_code = course_code.into().trim().to_string();
        if course_code.is_empty() {
            return Err(AnalyzerError::input(
                "record",
                "course_code must not be empty",
            ));
        }
        Ok(Self {
            course_name: course_code.clone(),
            course_code,
            review_text: review_text.into(),
            rating: None,
            source: UNKNOWN_SOURCE.to_string(),
            semester: None,
            score: None,
        })
    }

    /// Set the display name.
    pub fn with_course_name(mut self, course_name: impl Into<CourseName>) -> Self {
        self.course_name = course_name.into();
        self
    }

    /// Set the numeric rating. Non-finite values leave the rating unset.
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating).filter(|value| value.is_finite());
        self
    }

    /// Set the provenance tag.
    pub fn with_source(mut self, source: impl Into<SourceTag>) -> Self {
        self.source = source.into();
        self
    }

    /// Set the semester label.
    pub fn with_semester(mut self, semester: impl Into<String>) -> Self {
        self.semester = Some(semester.into());
        self
    }

    /// Set the forum vote score.
    pub fn with_score(mut self, score: i64) -> Self {
        self.score = Some(score);
        self
    }
}

/// A review with every computed field attached. Immutable once built.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnrichedReview {
    /// The source row.
    #[serde(flatten)]
    pub record: ReviewRecord,
    /// Normalized text for display and word statistics (never fed to classifiers).
    pub cleaned_text: String,
    /// Label from the lexicon-compound strategy.
    pub sentiment_lexicon: Sentiment,
    /// Label from the polarity strategy.
    pub sentiment_polarity: Sentiment,
    /// Topic tags in topic-table order; never empty.
    pub topics: Vec<TopicTag>,
}

impl EnrichedReview {
    /// Grouping key of the underlying record.
    pub fn course_code(&self) -> &str {
        &self.record.course_code
    }

    /// Rating of the underlying record, if present and finite.
    pub fn rating(&self) -> Option<f64> {
        self.record.rating.filter(|value| value.is_finite())
    }

    /// Label produced by the requested strategy.
    pub fn sentiment(&self, method: SentimentMethod) -> Sentiment {
        match method {
            SentimentMethod::Lexicon => self.sentiment_lexicon,
            SentimentMethod::Polarity => self.sentiment_polarity,
        }
    }
}
