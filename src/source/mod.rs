//! Review source interfaces.
//!
//! Ownership model:
//! - `ReviewSource` is the analyzer-facing provider of a flat review table.
//! - Sources validate required input while loading, so every record they
//!   return already has a non-empty course code.

use crate::data::ReviewRecord;
use crate::errors::AnalyzerError;
use crate::types::SourceId;

/// Source implementation modules.
pub mod sources;

pub use sources::csv_source::{CsvReviewSource, CsvSourceConfig};

/// Provider of review rows.
///
/// Implementations either return every row or fail as a whole; a missing
/// required column or course code is an `Input` error raised before any row
/// reaches the analyzer.
pub trait ReviewSource: Send + Sync {
    /// Stable source identifier used in logs and error messages.
    fn id(&self) -> &str;

    /// Load all rows in source order.
    fn load(&self) -> Result<Vec<ReviewRecord>, AnalyzerError>;
}

/// Source over records already held in memory.
pub struct InMemorySource {
    id: SourceId,
    records: Vec<ReviewRecord>,
}

impl InMemorySource {
    /// Create an in-memory source from prebuilt records.
    pub fn new(id: impl Into<SourceId>, records: Vec<ReviewRecord>) -> Self {
        Self {
            id: id.into(),
            records,
        }
    }
}

impl ReviewSource for InMemorySource {
    fn id(&self) -> &str {
        &self.id
    }

    fn load(&self) -> Result<Vec<ReviewRecord>, AnalyzerError> {
        if let Some(idx) = self
            .records
            .iter()
            .position(|record| record.course_code.trim().is_empty())
        {
            return Err(AnalyzerError::input(
                self.id.clone(),
                format!("record {idx} has an empty course_code"),
            ));
        }
        Ok(self.records.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_source_returns_records_in_order() {
        let records = vec![
            ReviewRecord::new("CS124", "first").unwrap(),
            ReviewRecord::new("CS225", "second").unwrap(),
        ];
        let source = InMemorySource::new("memory", records.clone());
        assert_eq!(source.id(), "memory");
        assert_eq!(source.load().unwrap(), records);
    }

    #[test]
    fn in_memory_source_rejects_blank_course_codes() {
        let mut broken = ReviewRecord::new("CS124", "text").unwrap();
        broken.course_code = " ".into();
        let source = InMemorySource::new(
            "memory",
            vec![ReviewRecord::new("CS225", "ok").unwrap(), broken],
        );
        let err = source.load().unwrap_err();
        assert!(err.to_string().contains("record 1"));
    }
}
