use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};

use tracing::info;
use walkdir::WalkDir;

use crate::constants::columns::UNKNOWN_SOURCE;
use crate::data::ReviewRecord;
use crate::errors::AnalyzerError;
use crate::ingestion::read_reviews;
use crate::source::ReviewSource;
use crate::types::{CourseCode, CourseName, SourceId, SourceTag};

/// Configuration for a CSV-backed review source.
#[derive(Clone, Debug)]
pub struct CsvSourceConfig {
    /// Stable source identifier used in logs.
    pub source_id: SourceId,
    /// A single CSV file, or a directory scanned for `*.csv` files.
    pub path: PathBuf,
    /// Whether to follow symlinks while scanning a directory.
    pub follow_links: bool,
    /// Provenance assigned to rows whose table has no `source` value.
    pub default_source: Option<SourceTag>,
    /// Display names for rows whose name is missing or equals the code.
    pub course_names: HashMap<CourseCode, CourseName>,
}

impl CsvSourceConfig {
    /// Create a config for `path` with a source id derived from it.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            source_id: format!("csv:{}", path.display()),
            path,
            follow_links: true,
            default_source: None,
            course_names: HashMap::new(),
        }
    }

    /// Override the source id.
    pub fn with_source_id(mut self, source_id: impl Into<SourceId>) -> Self {
        self.source_id = source_id.into();
        self
    }

    /// Override whether symlinks are followed during directory scans.
    pub fn with_follow_links(mut self, follow_links: bool) -> Self {
        self.follow_links = follow_links;
        self
    }

    /// Provenance for rows that do not carry one.
    pub fn with_default_source(mut self, source: impl Into<SourceTag>) -> Self {
        self.default_source = Some(source.into());
        self
    }

    /// Map a course code to its display name.
    pub fn with_course_name(
        mut self,
        course_code: impl Into<CourseCode>,
        course_name: impl Into<CourseName>,
    ) -> Self {
        self.course_names
            .insert(course_code.into(), course_name.into());
        self
    }
}

/// Review source reading one CSV file or every CSV file under a directory.
///
/// Directory files are read in sorted path order so row order is stable
/// across runs.
pub struct CsvReviewSource {
    config: CsvSourceConfig,
}

impl CsvReviewSource {
    /// Create a source from configuration.
    pub fn new(config: CsvSourceConfig) -> Self {
        Self { config }
    }

    /// Shorthand for a source over `path` with default settings.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::new(CsvSourceConfig::new(path))
    }

    /// CSV files this source will read, in read order.
    pub fn csv_files(&self) -> Result<Vec<PathBuf>, AnalyzerError> {
        let root = &self.config.path;
        if root.is_file() {
            return Ok(vec![root.clone()]);
        }
        if !root.is_dir() {
            return Err(AnalyzerError::input(
                root.display().to_string(),
                "input path does not exist",
            ));
        }
        let mut files: Vec<PathBuf> = WalkDir::new(root)
            .follow_links(self.config.follow_links)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file() && is_csv(entry.path()))
            .map(|entry| entry.into_path())
            .collect();
        files.sort();
        if files.is_empty() {
            return Err(AnalyzerError::input(
                root.display().to_string(),
                "directory contains no .csv files",
            ));
        }
        Ok(files)
    }

    fn apply_defaults(&self, record: &mut ReviewRecord) {
        if let Some(source) = &self.config.default_source
            && record.source == UNKNOWN_SOURCE
        {
            record.source = source.clone();
        }
        if record.course_name == record.course_code
            && let Some(name) = self.config.course_names.get(&record.course_code)
        {
            record.course_name = name.clone();
        }
    }
}

impl ReviewSource for CsvReviewSource {
    fn id(&self) -> &str {
        &self.config.source_id
    }

    fn load(&self) -> Result<Vec<ReviewRecord>, AnalyzerError> {
        let mut records = Vec::new();
        for path in self.csv_files()? {
            let origin = path.display().to_string();
            let file = File::open(&path)?;
            let mut loaded = read_reviews(file, &origin)?;
            for record in &mut loaded {
                self.apply_defaults(record);
            }
            info!(
                source = %self.config.source_id,
                file = %origin,
                records = loaded.len(),
                "loaded review table"
            );
            records.extend(loaded);
        }
        Ok(records)
    }
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}
