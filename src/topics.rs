//! Keyword-driven topic extraction.
//!
//! The topic table is ordered data: topics are reported in declaration order,
//! never in the order their keywords happen to appear in the text.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;

use crate::constants::topics::GENERAL_TOPIC;
use crate::errors::AnalyzerError;
use crate::types::{Keyword, TopicTag};

const DEFAULT_TOPICS: &[(&str, &[&str])] = &[
    (
        "difficulty",
        &[
            "hard",
            "difficult",
            "easy",
            "challenging",
            "tough",
            "struggle",
            "simple",
        ],
    ),
    (
        "workload",
        &[
            "homework",
            "assignments",
            "projects",
            "work",
            "time",
            "workload",
            "labs",
        ],
    ),
    (
        "teaching",
        &[
            "professor",
            "instructor",
            "lecture",
            "teaching",
            "explains",
            "teacher",
            "lectures",
        ],
    ),
    (
        "exams",
        &["exam", "test", "midterm", "final", "quiz", "exams", "tests"],
    ),
    (
        "helpful",
        &[
            "helpful",
            "useful",
            "practical",
            "applicable",
            "TAs",
            "office hours",
            "resources",
        ],
    ),
];

/// Ordered mapping of topic tag to keyword list.
///
/// Keywords are stored lowercased; matching is a case-insensitive substring
/// test against the whole text.
#[derive(Clone, Debug, PartialEq)]
pub struct TopicTable {
    topics: IndexMap<TopicTag, Vec<Keyword>>,
}

impl Default for TopicTable {
    fn default() -> Self {
        let topics = DEFAULT_TOPICS
            .iter()
            .map(|(topic, keywords)| {
                (
                    topic.to_string(),
                    keywords.iter().map(|kw| kw.to_lowercase()).collect(),
                )
            })
            .collect();
        Self { topics }
    }
}

impl TopicTable {
    /// Build a table from ordered `(topic, keywords)` pairs.
    pub fn from_pairs<I, T, K>(pairs: I) -> Result<Self, AnalyzerError>
    where
        I: IntoIterator<Item = (T, Vec<K>)>,
        T: Into<TopicTag>,
        K: AsRef<str>,
    {
        let mut table = Self {
            topics: IndexMap::new(),
        };
        for (topic, keywords) in pairs {
            table = table.with_topic(topic, keywords)?;
        }
        if table.topics.is_empty() {
            return Err(AnalyzerError::Configuration(
                "topic table must declare at least one topic".into(),
            ));
        }
        Ok(table)
    }

    /// Read an ordered JSON object `{ "topic": ["kw", ...], ... }`.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, AnalyzerError> {
        let raw = fs::read_to_string(path.as_ref())?;
        let parsed: IndexMap<TopicTag, Vec<Keyword>> = serde_json::from_str(&raw)?;
        Self::from_pairs(parsed)
    }

    /// Append a topic (or extend an existing one, keeping its position).
    pub fn with_topic<K: AsRef<str>>(
        mut self,
        topic: impl Into<TopicTag>,
        keywords: Vec<K>,
    ) -> Result<Self, AnalyzerError> {
        let topic = topic.into().trim().to_string();
        if topic.is_empty() {
            return Err(AnalyzerError::Configuration(
                "topic names must not be empty".into(),
            ));
        }
        let keywords: Vec<Keyword> = keywords
            .iter()
            .map(|kw| kw.as_ref().trim().to_lowercase())
            .filter(|kw| !kw.is_empty())
            .collect();
        if keywords.is_empty() {
            return Err(AnalyzerError::Configuration(format!(
                "topic '{topic}' has no keywords"
            )));
        }
        let entry = self.topics.entry(topic).or_default();
        for keyword in keywords {
            if !entry.contains(&keyword) {
                entry.push(keyword);
            }
        }
        Ok(self)
    }

    /// Topic tags in declaration order.
    pub fn topic_names(&self) -> impl Iterator<Item = &str> {
        self.topics.keys().map(String::as_str)
    }

    /// Keywords registered for `topic`.
    pub fn keywords(&self, topic: &str) -> Option<&[Keyword]> {
        self.topics.get(topic).map(Vec::as_slice)
    }

    /// Tag `text` with every topic that has at least one keyword hit.
    ///
    /// Returns `["general"]` for empty text or when nothing matches.
    pub fn extract_topics(&self, text: &str) -> Vec<TopicTag> {
        if text.is_empty() {
            return vec![GENERAL_TOPIC.to_string()];
        }
        let haystack = text.to_lowercase();
        let found: Vec<TopicTag> = self
            .topics
            .iter()
            .filter(|(_, keywords)| keywords.iter().any(|kw| haystack.contains(kw.as_str())))
            .map(|(topic, _)| topic.clone())
            .collect();
        if found.is_empty() {
            vec![GENERAL_TOPIC.to_string()]
        } else {
            found
        }
    }
}
