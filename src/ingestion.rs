//! Parsing of the interchange review table.
//!
//! Only `course_code` is required. Every other column may be absent, and a
//! missing or malformed optional cell falls back to its default instead of
//! failing the load.

use std::io::Read;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use crate::constants::columns::{
    COURSE_CODE, COURSE_NAME, RATING, REVIEW, REVIEW_ALIAS, SCORE, SEMESTER, SOURCE,
    UNKNOWN_SOURCE,
};
use crate::data::ReviewRecord;
use crate::errors::AnalyzerError;

/// Column positions resolved from a header row.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ColumnLayout {
    /// Position of the required `course_code` column.
    pub course_code: usize,
    /// Position of `course_name`, when present.
    pub course_name: Option<usize>,
    /// Position of `review` (or `text`), when present.
    pub review: Option<usize>,
    /// Position of `rating`, when present.
    pub rating: Option<usize>,
    /// Position of `semester`, when present.
    pub semester: Option<usize>,
    /// Position of `source`, when present.
    pub source: Option<usize>,
    /// Position of `score`, when present.
    pub score: Option<usize>,
}

impl ColumnLayout {
    /// Resolve columns by name; fails when `course_code` is missing.
    pub fn from_headers(headers: &StringRecord, origin: &str) -> Result<Self, AnalyzerError> {
        let find = |name: &str| headers.iter().position(|header| header == name);
        let course_code = find(COURSE_CODE).ok_or_else(|| {
            AnalyzerError::input(
                origin,
                format!("missing required '{COURSE_CODE}' column"),
            )
        })?;
        Ok(Self {
            course_code,
            course_name: find(COURSE_NAME),
            review: find(REVIEW).or_else(|| find(REVIEW_ALIAS)),
            rating: find(RATING),
            semester: find(SEMESTER),
            source: find(SOURCE),
            score: find(SCORE),
        })
    }
}

/// Read every review row from CSV data.
///
/// `origin` names the input in errors and logs (usually the file path).
pub fn read_reviews<R: Read>(reader: R, origin: &str) -> Result<Vec<ReviewRecord>, AnalyzerError> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(reader);
    let headers = csv_reader
        .headers()
        .map_err(|err| AnalyzerError::input(origin, format!("unreadable header: {err}")))?
        .clone();
    let layout = ColumnLayout::from_headers(&headers, origin)?;

    let mut records = Vec::new();
    for (idx, row) in csv_reader.records().enumerate() {
        let row = row.map_err(|err| {
            AnalyzerError::input(origin, format!("record {idx} is not valid CSV: {err}"))
        })?;
        records.push(parse_row(&row, &layout, origin, idx)?);
    }
    Ok(records)
}

/// Build a record from one data row.
pub fn parse_row(
    row: &StringRecord,
    layout: &ColumnLayout,
    origin: &str,
    idx: usize,
) -> Result<ReviewRecord, AnalyzerError> {
    let course_code = cell(row, Some(layout.course_code)).unwrap_or_default();
    if course_code.is_empty() {
        return Err(AnalyzerError::input(
            origin,
            format!("record {idx} has an empty '{COURSE_CODE}'"),
        ));
    }
    let course_name = cell(row, layout.course_name).unwrap_or(course_code);
    let review_text = layout
        .review
        .and_then(|pos| row.get(pos))
        .unwrap_or_default();

    Ok(ReviewRecord {
        course_code: course_code.to_string(),
        course_name: course_name.to_string(),
        review_text: review_text.to_string(),
        rating: parse_rating(cell(row, layout.rating), origin, idx),
        source: cell(row, layout.source)
            .unwrap_or(UNKNOWN_SOURCE)
            .to_string(),
        semester: cell(row, layout.semester).map(str::to_string),
        score: parse_score(cell(row, layout.score), origin, idx),
    })
}

fn cell(row: &StringRecord, pos: Option<usize>) -> Option<&str> {
    pos.and_then(|pos| row.get(pos))
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

fn parse_rating(raw: Option<&str>, origin: &str, idx: usize) -> Option<f64> {
    let raw = raw?;
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => {
            debug!(origin, record = idx, value = raw, "ignoring malformed rating");
            None
        }
    }
}

fn parse_score(raw: Option<&str>, origin: &str, idx: usize) -> Option<i64> {
    let raw = raw?;
    if let Ok(value) = raw.parse::<i64>() {
        return Some(value);
    }
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() && value.fract() == 0.0 => Some(value as i64),
        _ => {
            debug!(origin, record = idx, value = raw, "ignoring malformed score");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_full_interchange_table() {
        let data = "\
course_code,course_name,review,rating,semester,source,score
CS124,Intro to CS,\"Great professor, learned a lot\",5,Fall 2023,survey,
CS225,Data Structures,\"So hard!\",2.5,,reddit,17
";
        let records = read_reviews(data.as_bytes(), "inline").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].course_name, "Intro to CS");
        assert_eq!(records[0].review_text, "Great professor, learned a lot");
        assert_eq!(records[0].rating, Some(5.0));
        assert_eq!(records[0].semester.as_deref(), Some("Fall 2023"));
        assert_eq!(records[0].score, None);
        assert_eq!(records[1].rating, Some(2.5));
        assert_eq!(records[1].source, "reddit");
        assert_eq!(records[1].semester, None);
        assert_eq!(records[1].score, Some(17));
    }

    #[test]
    fn optional_fields_default_instead_of_failing() {
        let data = "course_code,review,rating\nCS374,,\nCS374,fine,n/a\nCS374,ok,NaN\n";
        let records = read_reviews(data.as_bytes(), "inline").unwrap();
        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| r.rating.is_none()));
        assert_eq!(records[0].review_text, "");
        assert_eq!(records[0].course_name, "CS374");
        assert_eq!(records[0].source, "unknown");
    }

    #[test]
    fn text_column_is_accepted_as_review_alias() {
        let data = "course_code,text,score\nCS225,comment body,3.0\n";
        let records = read_reviews(data.as_bytes(), "inline").unwrap();
        assert_eq!(records[0].review_text, "comment body");
        assert_eq!(records[0].score, Some(3));
    }

    #[test]
    fn missing_course_code_column_is_fatal() {
        let data = "course,review\nCS124,text\n";
        let err = read_reviews(data.as_bytes(), "reviews.csv").unwrap_err();
        match err {
            AnalyzerError::Input { origin, details } => {
                assert_eq!(origin, "reviews.csv");
                assert!(details.contains("course_code"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(read_reviews("".as_bytes(), "empty.csv").is_err());
    }

    #[test]
    fn empty_course_code_names_the_record() {
        let data = "course_code,review\nCS124,fine\n  ,orphan\n";
        let err = read_reviews(data.as_bytes(), "inline").unwrap_err();
        assert!(err.to_string().contains("record 1"));
    }
}
