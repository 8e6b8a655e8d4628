//! Reporting datasets computed from enriched reviews.
//!
//! These are the plain records behind comparison charts and word clouds;
//! nothing here draws.

use indexmap::IndexMap;
use serde::Serialize;

use crate::constants::metrics::MIN_WORD_LEN;
use crate::data::{EnrichedReview, Sentiment, SentimentMethod};
use crate::summary::{course_codes, mean_rating, ranked_counts};
use crate::types::{CourseCode, CourseName, TopicTag};

const STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "few",
    "for", "from", "further", "get", "got", "had", "has", "have", "having", "he", "her", "here",
    "hers", "herself", "him", "himself", "his", "how", "i", "if", "in", "into", "is", "it", "its",
    "itself", "just", "me", "more", "most", "my", "myself", "no", "nor", "not", "now", "of",
    "off", "on", "once", "only", "or", "other", "our", "ours", "ourselves", "out", "over", "own",
    "really", "same", "she", "should", "so", "some", "such", "than", "that", "the", "their",
    "theirs", "them", "themselves", "then", "there", "these", "they", "this", "those", "through",
    "to", "too", "under", "until", "up", "very", "was", "we", "were", "what", "when", "where",
    "which", "while", "who", "whom", "why", "will", "with", "would", "you", "your", "yours",
    "yourself", "yourselves",
];

/// How often the two strategies produce the same label.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MethodAgreement {
    /// Number of reviews compared.
    pub total: usize,
    /// Reviews where both labels match.
    pub agree: usize,
    /// `agree / total`.
    pub share: f64,
    /// Counts indexed by `[lexicon][polarity]` in `Negative, Neutral, Positive` order.
    pub confusion: [[usize; 3]; 3],
}

impl MethodAgreement {
    /// Count of reviews labeled `lexicon` by the lexicon strategy and
    /// `polarity` by the polarity strategy.
    pub fn count(&self, lexicon: Sentiment, polarity: Sentiment) -> usize {
        self.confusion[label_index(lexicon)][label_index(polarity)]
    }
}

/// Per-course label shares for side-by-side comparison.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CourseSentimentShare {
    /// Grouping key.
    pub course_code: CourseCode,
    /// Number of reviews for the course.
    pub total: usize,
    /// Percentages in `Positive, Neutral, Negative` order; sums to 100.
    pub shares: IndexMap<Sentiment, f64>,
}

/// Average rating of one course.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CourseRating {
    /// Grouping key.
    pub course_code: CourseCode,
    /// Display name taken from the first review of the course.
    pub course_name: CourseName,
    /// Mean over the course's finite ratings.
    pub avg_rating: f64,
    /// Number of reviews that carried a rating.
    pub rated_reviews: usize,
}

/// Compare the two strategies' labels. `None` for empty input.
pub fn method_agreement(enriched: &[EnrichedReview]) -> Option<MethodAgreement> {
    if enriched.is_empty() {
        return None;
    }
    let mut confusion = [[0usize; 3]; 3];
    for review in enriched {
        confusion[label_index(review.sentiment_lexicon)][label_index(review.sentiment_polarity)] +=
            1;
    }
    let agree: usize = (0..3).map(|idx| confusion[idx][idx]).sum();
    let total = enriched.len();
    Some(MethodAgreement {
        total,
        agree,
        share: agree as f64 / total as f64,
        confusion,
    })
}

/// Label percentages per course in first-seen course order.
pub fn course_sentiment_shares(
    enriched: &[EnrichedReview],
    method: SentimentMethod,
) -> Vec<CourseSentimentShare> {
    course_codes(enriched)
        .into_iter()
        .map(|code| {
            let labels: Vec<Sentiment> = enriched
                .iter()
                .filter(|review| review.course_code() == code)
                .map(|review| review.sentiment(method))
                .collect();
            let total = labels.len();
            let shares = Sentiment::REPORT_ORDER
                .iter()
                .map(|label| {
                    let count = labels.iter().filter(|seen| *seen == label).count();
                    (*label, 100.0 * count as f64 / total as f64)
                })
                .collect();
            CourseSentimentShare {
                course_code: code.to_string(),
                total,
                shares,
            }
        })
        .collect()
}

/// Courses ranked by average rating, highest first.
///
/// Courses without any rating are omitted; equal averages fall back to code order.
pub fn course_rating_ranking(enriched: &[EnrichedReview]) -> Vec<CourseRating> {
    let mut ranking: Vec<CourseRating> = course_codes(enriched)
        .into_iter()
        .filter_map(|code| {
            let reviews: Vec<&EnrichedReview> = enriched
                .iter()
                .filter(|review| review.course_code() == code)
                .collect();
            let avg_rating = mean_rating(reviews.iter().copied())?;
            Some(CourseRating {
                course_code: code.to_string(),
                course_name: reviews[0].record.course_name.clone(),
                avg_rating,
                rated_reviews: reviews.iter().filter(|r| r.rating().is_some()).count(),
            })
        })
        .collect();
    ranking.sort_by(|a, b| {
        b.avg_rating
            .total_cmp(&a.avg_rating)
            .then_with(|| a.course_code.cmp(&b.course_code))
    });
    ranking
}

/// Corpus-wide topic counts, highest first.
pub fn topic_distribution(enriched: &[EnrichedReview]) -> Vec<(TopicTag, usize)> {
    ranked_counts(
        enriched
            .iter()
            .flat_map(|review| review.topics.iter().cloned()),
    )
    .into_iter()
    .collect()
}

/// Most frequent words in the cleaned text of reviews with `sentiment`.
///
/// Stopwords and words shorter than three letters are skipped.
pub fn word_frequencies(
    enriched: &[EnrichedReview],
    sentiment: Sentiment,
    method: SentimentMethod,
    limit: usize,
) -> Vec<(String, usize)> {
    let words = enriched
        .iter()
        .filter(|review| review.sentiment(method) == sentiment)
        .flat_map(|review| review.cleaned_text.split_whitespace())
        .filter(|word| word.chars().count() >= MIN_WORD_LEN && !is_stopword(word))
        .map(str::to_string);
    let mut ranked: Vec<(String, usize)> = ranked_counts(words).into_iter().collect();
    ranked.truncate(limit);
    ranked
}

/// Whether `word` is on the built-in English stopword list.
pub fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(&word)
}

fn label_index(label: Sentiment) -> usize {
    match label {
        Sentiment::Negative => 0,
        Sentiment::Neutral => 1,
        Sentiment::Positive => 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ReviewRecord;

    fn review(
        code: &str,
        rating: Option<f64>,
        lexicon: Sentiment,
        polarity: Sentiment,
        cleaned: &str,
        topics: &[&str],
    ) -> EnrichedReview {
        let mut record = ReviewRecord::new(code, cleaned).unwrap();
        record.rating = rating;
        EnrichedReview {
            record,
            cleaned_text: cleaned.into(),
            sentiment_lexicon: lexicon,
            sentiment_polarity: polarity,
            topics: topics.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn method_agreement_reports_share_and_confusion() {
        assert!(method_agreement(&[]).is_none());
        let reviews = vec![
            review("A", None, Sentiment::Positive, Sentiment::Positive, "", &["general"]),
            review("A", None, Sentiment::Positive, Sentiment::Neutral, "", &["general"]),
            review("B", None, Sentiment::Negative, Sentiment::Negative, "", &["general"]),
            review("B", None, Sentiment::Neutral, Sentiment::Positive, "", &["general"]),
        ];
        let agreement = method_agreement(&reviews).unwrap();
        assert_eq!(agreement.total, 4);
        assert_eq!(agreement.agree, 2);
        assert!((agreement.share - 0.5).abs() < 1e-6);
        assert_eq!(agreement.count(Sentiment::Positive, Sentiment::Neutral), 1);
        assert_eq!(agreement.count(Sentiment::Neutral, Sentiment::Negative), 0);
    }

    #[test]
    fn course_shares_sum_to_one_hundred() {
        let reviews = vec![
            review("CS225", None, Sentiment::Positive, Sentiment::Neutral, "", &["general"]),
            review("CS124", None, Sentiment::Negative, Sentiment::Neutral, "", &["general"]),
            review("CS225", None, Sentiment::Negative, Sentiment::Neutral, "", &["general"]),
        ];
        let shares = course_sentiment_shares(&reviews, SentimentMethod::Lexicon);
        assert_eq!(shares.len(), 2);
        assert_eq!(shares[0].course_code, "CS225");
        assert!((shares[0].shares[&Sentiment::Positive] - 50.0).abs() < 1e-6);
        assert!((shares[0].shares[&Sentiment::Neutral]).abs() < 1e-6);
        let sum: f64 = shares[1].shares.values().sum();
        assert!((sum - 100.0).abs() < 1e-6);

        let by_polarity = course_sentiment_shares(&reviews, SentimentMethod::Polarity);
        assert!((by_polarity[0].shares[&Sentiment::Neutral] - 100.0).abs() < 1e-6);
    }

    #[test]
    fn rating_ranking_skips_unrated_and_breaks_ties_by_code() {
        let reviews = vec![
            review("CS374", Some(2.0), Sentiment::Neutral, Sentiment::Neutral, "", &["general"]),
            review("CS225", Some(4.0), Sentiment::Neutral, Sentiment::Neutral, "", &["general"]),
            review("CS124", Some(4.0), Sentiment::Neutral, Sentiment::Neutral, "", &["general"]),
            review("CS411", None, Sentiment::Neutral, Sentiment::Neutral, "", &["general"]),
            review("CS374", None, Sentiment::Neutral, Sentiment::Neutral, "", &["general"]),
        ];
        let ranking = course_rating_ranking(&reviews);
        let codes: Vec<&str> = ranking.iter().map(|r| r.course_code.as_str()).collect();
        assert_eq!(codes, vec!["CS124", "CS225", "CS374"]);
        assert_eq!(ranking[2].rated_reviews, 1);
    }

    #[test]
    fn rating_ranking_ignores_non_finite_ratings() {
        let rated = |code: &str, rating: f64| {
            review(
                code,
                Some(rating),
                Sentiment::Neutral,
                Sentiment::Neutral,
                "",
                &["general"],
            )
        };
        let reviews = vec![
            rated("CS1", f64::NAN),
            rated("CS2", 5.0),
            rated("CS2", f64::NEG_INFINITY),
        ];
        let ranking = course_rating_ranking(&reviews);
        assert_eq!(ranking.len(), 1);
        assert_eq!(ranking[0].course_code, "CS2");
        assert!((ranking[0].avg_rating - 5.0).abs() < 1e-6);
        assert_eq!(ranking[0].rated_reviews, 1);
    }

    #[test]
    fn topic_distribution_counts_corpus_wide() {
        let reviews = vec![
            review("A", None, Sentiment::Neutral, Sentiment::Neutral, "", &["teaching"]),
            review("B", None, Sentiment::Neutral, Sentiment::Neutral, "", &["exams", "teaching"]),
            review("C", None, Sentiment::Neutral, Sentiment::Neutral, "", &["workload"]),
        ];
        assert_eq!(
            topic_distribution(&reviews),
            vec![
                ("teaching".to_string(), 2),
                ("exams".to_string(), 1),
                ("workload".to_string(), 1),
            ]
        );
    }

    #[test]
    fn word_frequencies_filter_by_label_stopwords_and_length() {
        let reviews = vec![
            review(
                "A",
                None,
                Sentiment::Positive,
                Sentiment::Neutral,
                "the professor was great and the labs were great",
                &["general"],
            ),
            review(
                "B",
                None,
                Sentiment::Negative,
                Sentiment::Neutral,
                "exams were awful",
                &["general"],
            ),
        ];
        let words = word_frequencies(&reviews, Sentiment::Positive, SentimentMethod::Lexicon, 2);
        assert_eq!(
            words,
            vec![("great".to_string(), 2), ("professor".to_string(), 1)]
        );
        let neutral =
            word_frequencies(&reviews, Sentiment::Neutral, SentimentMethod::Polarity, 10);
        assert_eq!(neutral.len(), 5);
        assert!(neutral.iter().all(|(word, _)| !is_stopword(word)));
    }
}
