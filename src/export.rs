//! Output table and JSON report writers.
//!
//! The enriched table keeps every input column and appends the computed ones.
//! Topic lists are stored in one cell joined by the configured delimiter.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use serde::Serialize;
use tracing::info;

use crate::analyzer::RecordFailure;
use crate::constants::columns::{
    CLEANED_REVIEW, COURSE_CODE, COURSE_NAME, RATING, REVIEW, SCORE, SEMESTER,
    SENTIMENT_LEXICON, SENTIMENT_POLARITY, SOURCE, TOPICS,
};
use crate::constants::topics::GENERAL_TOPIC;
use crate::data::{EnrichedReview, Sentiment, SentimentMethod};
use crate::errors::AnalyzerError;
use crate::ingestion::{ColumnLayout, parse_row};
use crate::metrics::{MethodAgreement, method_agreement, topic_distribution};
use crate::summary::{
    CorpusSummary, CourseSummary, summarize_all_courses_by, summarize_corpus_by,
};
use crate::types::TopicTag;

const OUTPUT_COLUMNS: [&str; 11] = [
    COURSE_CODE,
    COURSE_NAME,
    REVIEW,
    RATING,
    SEMESTER,
    SOURCE,
    SCORE,
    CLEANED_REVIEW,
    SENTIMENT_LEXICON,
    SENTIMENT_POLARITY,
    TOPICS,
];

/// Everything the reporting layer needs, in one serializable document.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AnalysisReport {
    /// Label the summaries group by.
    pub group_by: SentimentMethod,
    /// Corpus-wide statistics.
    pub corpus: CorpusSummary,
    /// One summary per course, first-seen order.
    pub courses: Vec<CourseSummary>,
    /// Agreement between the two strategies (`None` for an empty corpus).
    pub agreement: Option<MethodAgreement>,
    /// Corpus-wide topic counts, highest first.
    pub topic_distribution: Vec<(TopicTag, usize)>,
    /// Records skipped during isolated analysis.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<RecordFailure>,
}

impl AnalysisReport {
    /// Compute every report section from enriched reviews.
    pub fn build(enriched: &[EnrichedReview], group_by: SentimentMethod, top_topics: usize) -> Self {
        Self {
            group_by,
            corpus: summarize_corpus_by(enriched, group_by),
            courses: summarize_all_courses_by(enriched, group_by, top_topics),
            agreement: method_agreement(enriched),
            topic_distribution: topic_distribution(enriched),
            failures: Vec::new(),
        }
    }

    /// Attach the failures of an isolated run.
    pub fn with_failures(mut self, failures: Vec<RecordFailure>) -> Self {
        self.failures = failures;
        self
    }
}

/// Write the enriched table to any writer.
pub fn write_enriched<W: Write>(
    writer: W,
    reviews: &[EnrichedReview],
    delimiter: &str,
) -> Result<(), AnalyzerError> {
    let mut csv_writer = WriterBuilder::new().from_writer(writer);
    csv_writer.write_record(OUTPUT_COLUMNS)?;
    for review in reviews {
        let record = &review.record;
        let rating = record.rating.map(|r| r.to_string()).unwrap_or_default();
        let score = record.score.map(|s| s.to_string()).unwrap_or_default();
        csv_writer.write_record([
            record.course_code.as_str(),
            record.course_name.as_str(),
            record.review_text.as_str(),
            rating.as_str(),
            record.semester.as_deref().unwrap_or_default(),
            record.source.as_str(),
            score.as_str(),
            review.cleaned_text.as_str(),
            review.sentiment_lexicon.as_str(),
            review.sentiment_polarity.as_str(),
            review.topics.join(delimiter).as_str(),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write the enriched table to `path`, creating parent directories.
pub fn write_enriched_csv(
    path: impl AsRef<Path>,
    reviews: &[EnrichedReview],
    delimiter: &str,
) -> Result<(), AnalyzerError> {
    let path = path.as_ref();
    create_parent_dirs(path)?;
    write_enriched(File::create(path)?, reviews, delimiter)?;
    info!(path = %path.display(), rows = reviews.len(), "wrote enriched reviews");
    Ok(())
}

/// Parse an enriched table previously produced by [`write_enriched`].
pub fn read_enriched<R: Read>(
    reader: R,
    origin: &str,
    delimiter: &str,
) -> Result<Vec<EnrichedReview>, AnalyzerError> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let layout = ColumnLayout::from_headers(&headers, origin)?;
    let column = |name: &str| {
        headers
            .iter()
            .position(|header| header == name)
            .ok_or_else(|| AnalyzerError::input(origin, format!("missing '{name}' column")))
    };
    let cleaned = column(CLEANED_REVIEW)?;
    let lexicon = column(SENTIMENT_LEXICON)?;
    let polarity = column(SENTIMENT_POLARITY)?;
    let topics = column(TOPICS)?;

    let mut reviews = Vec::new();
    for (idx, row) in csv_reader.records().enumerate() {
        let row = row?;
        let label = |pos: usize| -> Result<Sentiment, AnalyzerError> {
            cell(&row, pos).parse().map_err(|err: AnalyzerError| {
                AnalyzerError::input(origin, format!("record {idx}: {err}"))
            })
        };
        reviews.push(EnrichedReview {
            record: parse_row(&row, &layout, origin, idx)?,
            cleaned_text: cell(&row, cleaned).to_string(),
            sentiment_lexicon: label(lexicon)?,
            sentiment_polarity: label(polarity)?,
            topics: split_topics(cell(&row, topics), delimiter),
        });
    }
    Ok(reviews)
}

/// Read an enriched table from `path`.
pub fn read_enriched_csv(
    path: impl AsRef<Path>,
    delimiter: &str,
) -> Result<Vec<EnrichedReview>, AnalyzerError> {
    let path = path.as_ref();
    let reviews = read_enriched(File::open(path)?, &path.display().to_string(), delimiter)?;
    info!(path = %path.display(), rows = reviews.len(), "read enriched reviews");
    Ok(reviews)
}

/// Write `report` as pretty-printed JSON, creating parent directories.
pub fn write_report_json(
    path: impl AsRef<Path>,
    report: &AnalysisReport,
) -> Result<(), AnalyzerError> {
    let path = path.as_ref();
    create_parent_dirs(path)?;
    let mut file = File::create(path)?;
    serde_json::to_writer_pretty(&mut file, report)?;
    file.write_all(b"\n")?;
    info!(path = %path.display(), courses = report.courses.len(), "wrote analysis report");
    Ok(())
}

fn create_parent_dirs(path: &Path) -> Result<(), AnalyzerError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

fn cell(row: &StringRecord, pos: usize) -> &str {
    row.get(pos).map(str::trim).unwrap_or_default()
}

fn split_topics(raw: &str, delimiter: &str) -> Vec<TopicTag> {
    let topics: Vec<TopicTag> = raw
        .split(delimiter)
        .map(str::trim)
        .filter(|topic| !topic.is_empty())
        .map(str::to_string)
        .collect();
    if topics.is_empty() {
        vec![GENERAL_TOPIC.to_string()]
    } else {
        topics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::ReviewAnalyzer;
    use crate::data::ReviewRecord;
    use tempfile::tempdir;

    fn sample() -> Vec<EnrichedReview> {
        let records = vec![
            ReviewRecord::new("CS225", "The exams were brutal, so hard.")
                .unwrap()
                .with_course_name("Data Structures")
                .with_rating(2.0)
                .with_source("survey")
                .with_semester("Fall 2023"),
            ReviewRecord::new("CS225", "Loved the lectures, \"great\" professor")
                .unwrap()
                .with_source("reddit")
                .with_score(12),
        ];
        ReviewAnalyzer::builtin().analyze(&records).unwrap()
    }

    #[test]
    fn enriched_table_has_expected_header_and_topic_cell() {
        let mut buffer = Vec::new();
        write_enriched(&mut buffer, &sample(), ";").unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let header = text.lines().next().unwrap();
        assert_eq!(
            header,
            "course_code,course_name,review,rating,semester,source,score,cleaned_review,sentiment_vader,sentiment_textblob,topics"
        );
        assert!(text.contains("difficulty;exams"));
    }

    #[test]
    fn enriched_table_reads_back() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("results").join("analyzed.csv");
        let reviews = sample();
        write_enriched_csv(&path, &reviews, ";").unwrap();
        let loaded = read_enriched_csv(&path, ";").unwrap();
        assert_eq!(loaded, reviews);
    }

    #[test]
    fn empty_topic_cell_reads_as_general() {
        let data = "\
course_code,review,cleaned_review,sentiment_vader,sentiment_textblob,topics
CS124,ok,ok,Neutral,Neutral,
";
        let loaded = read_enriched(data.as_bytes(), "inline", ";").unwrap();
        assert_eq!(loaded[0].topics, vec!["general"]);
    }

    #[test]
    fn unknown_label_is_an_input_error() {
        let data = "\
course_code,cleaned_review,sentiment_vader,sentiment_textblob,topics
CS124,ok,Happy,Neutral,general
";
        let err = read_enriched(data.as_bytes(), "inline", ";").unwrap_err();
        assert!(matches!(err, AnalyzerError::Input { .. }));
        assert!(err.to_string().contains("record 0"));
    }

    #[test]
    fn report_json_is_written_with_parent_dirs() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("nested").join("report.json");
        let report = AnalysisReport::build(&sample(), SentimentMethod::Lexicon, 5);
        write_report_json(&path, &report).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["corpus"]["total_reviews"], 2);
        assert_eq!(value["courses"][0]["course_code"], "CS225");
        assert_eq!(value["group_by"], "lexicon");
        assert!(value.get("failures").is_none());
    }
}
