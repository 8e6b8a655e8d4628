//! Per-course and corpus-wide summaries over enriched reviews.
//!
//! Aggregation is read-only. Every ordering tie is broken by first
//! appearance in the input sequence.

use std::collections::HashSet;
use std::hash::Hash;

use indexmap::IndexMap;
use serde::Serialize;

use crate::constants::topics::TOP_TOPIC_LIMIT;
use crate::data::{EnrichedReview, Sentiment, SentimentMethod};
use crate::types::{CourseCode, CourseName, TopicTag};

/// Summary of every review for one course.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CourseSummary {
    /// Grouping key.
    pub course_code: CourseCode,
    /// Display name taken from the first matching review.
    pub course_name: CourseName,
    /// Number of matching reviews.
    pub total_reviews: usize,
    /// Mean over present ratings; `None` when no review carries one.
    pub avg_rating: Option<f64>,
    /// Label counts, highest first.
    pub sentiment_distribution: IndexMap<Sentiment, usize>,
    /// Most frequent topics, highest first.
    pub common_topics: IndexMap<TopicTag, usize>,
}

/// Summary over the whole corpus.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CorpusSummary {
    /// Number of reviews.
    pub total_reviews: usize,
    /// Number of distinct course codes.
    pub total_courses: usize,
    /// Mean over present ratings; `None` when no review carries one.
    pub avg_rating: Option<f64>,
    /// Label counts, highest first.
    pub sentiment_distribution: IndexMap<Sentiment, usize>,
    /// Mean rating per label (`Negative`, `Neutral`, `Positive` order).
    pub rating_by_sentiment: IndexMap<Sentiment, Option<f64>>,
}

/// Summarize `course_code` grouping by the lexicon label.
pub fn summarize_course(enriched: &[EnrichedReview], course_code: &str) -> Option<CourseSummary> {
    summarize_course_by(enriched, course_code, SentimentMethod::Lexicon, TOP_TOPIC_LIMIT)
}

/// Summarize `course_code` with an explicit label and topic limit.
///
/// Returns `None` when no review matches.
pub fn summarize_course_by(
    enriched: &[EnrichedReview],
    course_code: &str,
    method: SentimentMethod,
    top_topics: usize,
) -> Option<CourseSummary> {
    let matching: Vec<&EnrichedReview> = enriched
        .iter()
        .filter(|review| review.course_code() == course_code)
        .collect();
    let first = matching.first()?;

    let mut common_topics = ranked_counts(
        matching
            .iter()
            .flat_map(|review| review.topics.iter().cloned()),
    );
    common_topics.truncate(top_topics);

    Some(CourseSummary {
        course_code: first.record.course_code.clone(),
        course_name: first.record.course_name.clone(),
        total_reviews: matching.len(),
        avg_rating: mean_rating(matching.iter().copied()),
        sentiment_distribution: ranked_counts(
            matching.iter().map(|review| review.sentiment(method)),
        ),
        common_topics,
    })
}

/// Summarize every course in first-seen order.
pub fn summarize_all_courses(enriched: &[EnrichedReview]) -> Vec<CourseSummary> {
    summarize_all_courses_by(enriched, SentimentMethod::Lexicon, TOP_TOPIC_LIMIT)
}

/// Summarize every course with an explicit label and topic limit.
pub fn summarize_all_courses_by(
    enriched: &[EnrichedReview],
    method: SentimentMethod,
    top_topics: usize,
) -> Vec<CourseSummary> {
    course_codes(enriched)
        .into_iter()
        .filter_map(|code| summarize_course_by(enriched, code, method, top_topics))
        .collect()
}

/// Summarize the corpus grouping by the lexicon label.
pub fn summarize_corpus(enriched: &[EnrichedReview]) -> CorpusSummary {
    summarize_corpus_by(enriched, SentimentMethod::Lexicon)
}

/// Summarize the corpus grouping by the requested label.
pub fn summarize_corpus_by(enriched: &[EnrichedReview], method: SentimentMethod) -> CorpusSummary {
    let mut grouped: IndexMap<Sentiment, Vec<&EnrichedReview>> = IndexMap::new();
    for review in enriched {
        grouped.entry(review.sentiment(method)).or_default().push(review);
    }
    grouped.sort_keys();
    let rating_by_sentiment = grouped
        .into_iter()
        .map(|(label, reviews)| (label, mean_rating(reviews.into_iter())))
        .collect();

    CorpusSummary {
        total_reviews: enriched.len(),
        total_courses: course_codes(enriched).len(),
        avg_rating: mean_rating(enriched.iter()),
        sentiment_distribution: ranked_counts(enriched.iter().map(|review| review.sentiment(method))),
        rating_by_sentiment,
    }
}

/// Distinct course codes in first-seen order.
pub fn course_codes(enriched: &[EnrichedReview]) -> Vec<&str> {
    let mut seen = HashSet::new();
    enriched
        .iter()
        .map(EnrichedReview::course_code)
        .filter(|code| seen.insert(*code))
        .collect()
}

/// Mean over present ratings, `None` when there are none.
pub(crate) fn mean_rating<'a>(reviews: impl Iterator<Item = &'a EnrichedReview>) -> Option<f64> {
    let (sum, count) = reviews
        .filter_map(EnrichedReview::rating)
        .fold((0.0, 0usize), |(sum, count), rating| (sum + rating, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Count items, ordered by descending count with first-seen tie-break.
pub(crate) fn ranked_counts<T: Hash + Eq>(items: impl Iterator<Item = T>) -> IndexMap<T, usize> {
    let mut counts: IndexMap<T, usize> = IndexMap::new();
    for item in items {
        *counts.entry(item).or_default() += 1;
    }
    // Stable sort keeps insertion (first-seen) order among equal counts.
    counts.sort_by(|_, a, _, b| b.cmp(a));
    counts
}
