#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Review enrichment pipeline.
pub mod analyzer;
/// Command-line runner shared by the `analyze_reviews` binary.
pub mod apps;
/// Analyzer configuration and sentiment thresholds.
pub mod config;
/// Centralized constants used across classifiers, topics, and tables.
pub mod constants;
/// Review record and label types.
pub mod data;
/// Enriched table and JSON report writers.
pub mod export;
/// Review table parsing.
pub mod ingestion;
/// Reporting datasets (agreement, rankings, word frequencies).
pub mod metrics;
/// Sentiment classification strategies and lexicons.
pub mod sentiment;
/// Review source traits and built-in sources.
pub mod source;
/// Per-course and corpus summaries.
pub mod summary;
/// Keyword topic extraction.
pub mod topics;
/// Shared type aliases.
pub mod types;
/// Text normalization helpers.
pub mod utils;

mod errors;

pub use analyzer::{AnalysisBatch, RecordFailure, ReviewAnalyzer};
pub use config::{AnalyzerConfig, Thresholds};
pub use data::{EnrichedReview, ReviewRecord, Sentiment, SentimentMethod};
pub use errors::AnalyzerError;
pub use export::{AnalysisReport, read_enriched_csv, write_enriched_csv, write_report_json};
pub use sentiment::{CompoundClassifier, PolarityClassifier, SentimentClassifier};
pub use source::{CsvReviewSource, CsvSourceConfig, InMemorySource, ReviewSource};
pub use summary::{
    CorpusSummary, CourseSummary, summarize_all_courses, summarize_corpus, summarize_corpus_by,
    summarize_course, summarize_course_by,
};
pub use topics::TopicTable;
pub use types::{CourseCode, CourseName, Keyword, SourceTag, TopicTag};
pub use utils::normalize;
