/// Constants used by the sentiment classification thresholds.
pub mod sentiment {
    /// Compound score at or above which the lexicon strategy reports `Positive`.
    pub const LEXICON_POSITIVE_THRESHOLD: f64 = 0.05;
    /// Compound score at or below which the lexicon strategy reports `Negative`.
    pub const LEXICON_NEGATIVE_THRESHOLD: f64 = -0.05;
    /// Polarity strictly above which the polarity strategy reports `Positive`.
    pub const POLARITY_POSITIVE_THRESHOLD: f64 = 0.1;
    /// Polarity strictly below which the polarity strategy reports `Negative`.
    pub const POLARITY_NEGATIVE_THRESHOLD: f64 = -0.1;
}

/// Constants used by topic extraction and topic ranking.
pub mod topics {
    /// Tag assigned when no topic keyword matches (or the text is empty).
    pub const GENERAL_TOPIC: &str = "general";
    /// Number of topics reported per course summary.
    pub const TOP_TOPIC_LIMIT: usize = 5;
    /// Separator used when a topic list is stored in a single table cell.
    pub const TOPIC_DELIMITER: &str = ";";
}

/// Column names of the input and output review tables.
pub mod columns {
    /// Required grouping column.
    pub const COURSE_CODE: &str = "course_code";
    /// Optional display-name column.
    pub const COURSE_NAME: &str = "course_name";
    /// Raw review text column.
    pub const REVIEW: &str = "review";
    /// Alternate raw text column emitted by comment scrapes.
    pub const REVIEW_ALIAS: &str = "text";
    /// Optional numeric rating column.
    pub const RATING: &str = "rating";
    /// Optional semester column.
    pub const SEMESTER: &str = "semester";
    /// Provenance column.
    pub const SOURCE: &str = "source";
    /// Optional forum vote score column.
    pub const SCORE: &str = "score";
    /// Output column holding the normalized review text.
    pub const CLEANED_REVIEW: &str = "cleaned_review";
    /// Output column holding the lexicon (compound) label.
    pub const SENTIMENT_LEXICON: &str = "sentiment_vader";
    /// Output column holding the polarity label.
    pub const SENTIMENT_POLARITY: &str = "sentiment_textblob";
    /// Output column holding the delimited topic list.
    pub const TOPICS: &str = "topics";
    /// Provenance assigned when the input has no source column.
    pub const UNKNOWN_SOURCE: &str = "unknown";
}

/// Constants used by the compound (VADER-style) scorer.
pub mod compound {
    /// Empirically derived increment applied by booster words.
    pub const BOOSTER_INCREMENT: f64 = 0.293;
    /// Empirically derived decrement applied by dampener words.
    pub const BOOSTER_DECREMENT: f64 = -0.293;
    /// Increment applied to ALL-CAPS sentiment words in mixed-case text.
    pub const CAPS_INCREMENT: f64 = 0.733;
    /// Scalar applied to a valence when a negation precedes it.
    pub const NEGATION_SCALAR: f64 = -0.74;
    /// Normalization constant approximating the max expected valence sum.
    pub const NORMALIZATION_ALPHA: f64 = 15.0;
    /// Number of preceding tokens inspected for boosters and negations.
    pub const LOOKBACK_WINDOW: usize = 3;
    /// Per-position damping of booster effects (distance 1, 2, 3).
    pub const BOOSTER_DAMPING: [f64; 3] = [1.0, 0.95, 0.9];
    /// Emphasis added per exclamation mark.
    pub const EXCLAMATION_EMPHASIS: f64 = 0.292;
    /// Maximum counted exclamation marks.
    pub const EXCLAMATION_LIMIT: usize = 4;
    /// Emphasis added per question mark when there is more than one.
    pub const QUESTION_EMPHASIS: f64 = 0.18;
    /// Emphasis used when there are more than three question marks.
    pub const QUESTION_EMPHASIS_CAP: f64 = 0.96;
    /// Weight applied to sentiment before a contrastive "but".
    pub const BUT_BEFORE_WEIGHT: f64 = 0.5;
    /// Weight applied to sentiment after a contrastive "but".
    pub const BUT_AFTER_WEIGHT: f64 = 1.5;
}

/// Constants used by the polarity (pattern-style) scorer.
pub mod polarity {
    /// Multiplier applied to a word preceded by a negation.
    pub const NEGATION_FACTOR: f64 = -0.5;
    /// Multiplier applied to the previous scored word when followed by `!`.
    pub const EXCLAMATION_FACTOR: f64 = 1.25;
}

/// Constants used by the reporting datasets.
pub mod metrics {
    /// Minimum word length kept in word-frequency tables.
    pub const MIN_WORD_LEN: usize = 3;
}
