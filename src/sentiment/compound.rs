//! Lexicon-compound (VADER-style) scoring.

use std::path::Path;

use crate::config::Thresholds;
use crate::constants::compound::{
    BOOSTER_DAMPING, BOOSTER_DECREMENT, BOOSTER_INCREMENT, BUT_AFTER_WEIGHT, BUT_BEFORE_WEIGHT,
    CAPS_INCREMENT, EXCLAMATION_EMPHASIS, EXCLAMATION_LIMIT, LOOKBACK_WINDOW, NEGATION_SCALAR,
    NORMALIZATION_ALPHA, QUESTION_EMPHASIS, QUESTION_EMPHASIS_CAP,
};
use crate::data::SentimentMethod;
use crate::errors::AnalyzerError;
use crate::sentiment::SentimentClassifier;
use crate::sentiment::lexicon::{ValenceLexicon, is_negation};

/// Compound-score classifier over a word valence lexicon.
///
/// Negation, boosters, capitalization, contrastive "but", and `!`/`?`
/// emphasis all shift the summed valence before it is squashed into [-1, 1],
/// which is why it must see the raw review text.
#[derive(Clone, Debug)]
pub struct CompoundClassifier {
    lexicon: ValenceLexicon,
    thresholds: Thresholds,
}

struct Token {
    raw: String,
    lower: String,
}

impl Token {
    fn is_shouting(&self) -> bool {
        self.raw.chars().any(|ch| ch.is_alphabetic())
            && !self.raw.chars().any(|ch| ch.is_lowercase())
    }
}

impl CompoundClassifier {
    /// Classifier over the embedded lexicon.
    pub fn builtin() -> Self {
        Self::new(ValenceLexicon::builtin())
    }

    /// Classifier over a VADER-format lexicon file.
    pub fn from_lexicon_file(path: impl AsRef<Path>) -> Result<Self, AnalyzerError> {
        Ok(Self::new(ValenceLexicon::from_file(path)?))
    }

    /// Classifier over an already-loaded lexicon.
    pub fn new(lexicon: ValenceLexicon) -> Self {
        Self {
            lexicon,
            thresholds: Thresholds::lexicon(),
        }
    }

    /// Override the label cut-offs.
    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Compound score in [-1, 1].
    pub fn compound(&self, text: &str) -> f64 {
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return 0.0;
        }
        let any_shouting = tokens.iter().any(Token::is_shouting);
        let all_shouting = tokens.iter().all(Token::is_shouting);
        let caps_differ = any_shouting && !all_shouting;

        let mut sentiments = Vec::with_capacity(tokens.len());
        for idx in 0..tokens.len() {
            sentiments.push(self.token_valence(&tokens, idx, caps_differ));
        }
        apply_but_weighting(&tokens, &mut sentiments);

        let mut sum: f64 = sentiments.iter().sum();
        let emphasis = punctuation_emphasis(text);
        if sum > 0.0 {
            sum += emphasis;
        } else if sum < 0.0 {
            sum -= emphasis;
        }
        normalize_score(sum)
    }

    fn token_valence(&self, tokens: &[Token], idx: usize, caps_differ: bool) -> f64 {
        let token = &tokens[idx];
        if self.lexicon.booster(&token.lower).is_some() {
            return 0.0;
        }
        if token.lower == "kind" && tokens.get(idx + 1).is_some_and(|next| next.lower == "of") {
            return 0.0;
        }
        let Some(mut valence) = self.lexicon.valence(&token.lower) else {
            return 0.0;
        };
        if caps_differ && token.is_shouting() {
            valence += CAPS_INCREMENT.copysign(valence);
        }

        for distance in 0..LOOKBACK_WINDOW {
            if idx <= distance {
                break;
            }
            let previous = &tokens[idx - distance - 1];
            if self.lexicon.valence(&previous.lower).is_some() {
                continue;
            }
            let boost = self.booster_scalar(previous, valence, caps_differ);
            valence += boost * BOOSTER_DAMPING[distance];
            valence = negation_adjusted(tokens, idx, distance, valence);
        }
        least_adjusted(tokens, idx, valence)
    }

    fn booster_scalar(&self, token: &Token, valence: f64, caps_differ: bool) -> f64 {
        let Some(direction) = self.lexicon.booster(&token.lower) else {
            return 0.0;
        };
        let mut scalar = if direction > 0.0 {
            BOOSTER_INCREMENT
        } else {
            BOOSTER_DECREMENT
        };
        if valence < 0.0 {
            scalar = -scalar;
        }
        if caps_differ && token.is_shouting() {
            scalar += CAPS_INCREMENT.copysign(valence);
        }
        scalar
    }
}

impl Default for CompoundClassifier {
    fn default() -> Self {
        Self::builtin()
    }
}

impl SentimentClassifier for CompoundClassifier {
    fn method(&self) -> SentimentMethod {
        SentimentMethod::Lexicon
    }

    fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    fn score(&self, text: &str) -> f64 {
        self.compound(text)
    }
}

fn tokenize(text: &str) -> Vec<Token> {
    text.split_whitespace()
        .filter_map(|piece| {
            let stripped = piece.trim_matches(|ch: char| ch.is_ascii_punctuation());
            // Short emoticon-like pieces keep their punctuation.
            let raw = if stripped.chars().count() <= 2 {
                piece
            } else {
                stripped
            };
            (raw.chars().count() > 1).then(|| Token {
                raw: raw.to_string(),
                lower: raw.to_lowercase(),
            })
        })
        .collect()
}

fn negation_adjusted(tokens: &[Token], idx: usize, distance: usize, valence: f64) -> f64 {
    let word_at = |back: usize| tokens[idx - back].lower.as_str();
    match distance {
        0 => {
            if is_negation(word_at(1)) {
                valence * NEGATION_SCALAR
            } else {
                valence
            }
        }
        1 => {
            if word_at(2) == "never" && matches!(word_at(1), "so" | "this") {
                valence * 1.25
            } else if word_at(2) == "without" && word_at(1) == "doubt" {
                valence
            } else if is_negation(word_at(2)) {
                valence * NEGATION_SCALAR
            } else {
                valence
            }
        }
        _ => {
            if word_at(3) == "never"
                && (matches!(word_at(2), "so" | "this") || matches!(word_at(1), "so" | "this"))
            {
                valence * 1.25
            } else if word_at(3) == "without"
                && (word_at(2) == "doubt" || word_at(1) == "doubt")
            {
                valence
            } else if is_negation(word_at(3)) {
                valence * NEGATION_SCALAR
            } else {
                valence
            }
        }
    }
}

fn least_adjusted(tokens: &[Token], idx: usize, valence: f64) -> f64 {
    if idx == 0 || tokens[idx - 1].lower != "least" {
        return valence;
    }
    if idx > 1 && matches!(tokens[idx - 2].lower.as_str(), "at" | "very") {
        return valence;
    }
    valence * NEGATION_SCALAR
}

fn apply_but_weighting(tokens: &[Token], sentiments: &mut [f64]) {
    let Some(but_idx) = tokens.iter().position(|token| token.lower == "but") else {
        return;
    };
    for (idx, sentiment) in sentiments.iter_mut().enumerate() {
        if idx < but_idx {
            *sentiment *= BUT_BEFORE_WEIGHT;
        } else if idx > but_idx {
            *sentiment *= BUT_AFTER_WEIGHT;
        }
    }
}

fn punctuation_emphasis(text: &str) -> f64 {
    let exclamations = text.matches('!').count().min(EXCLAMATION_LIMIT);
    let questions = text.matches('?').count();
    let question_emphasis = match questions {
        0 | 1 => 0.0,
        2..=3 => questions as f64 * QUESTION_EMPHASIS,
        _ => QUESTION_EMPHASIS_CAP,
    };
    exclamations as f64 * EXCLAMATION_EMPHASIS + question_emphasis
}

fn normalize_score(sum: f64) -> f64 {
    let normalized = sum / (sum * sum + NORMALIZATION_ALPHA).sqrt();
    normalized.clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Sentiment;

    fn classifier() -> CompoundClassifier {
        CompoundClassifier::builtin()
    }

    #[test]
    fn blank_text_is_neutral_without_scoring() {
        assert_eq!(classifier().classify(""), Sentiment::Neutral);
        assert_eq!(classifier().classify("   \n"), Sentiment::Neutral);
        assert_eq!(classifier().compound(""), 0.0);
    }

    #[test]
    fn single_word_scores_match_normalization() {
        let score = classifier().compound("great");
        let expected = 3.1 / (3.1_f64 * 3.1 + 15.0).sqrt();
        assert!((score - expected).abs() < 1e-9);
    }

    #[test]
    fn negation_flips_polarity() {
        let c = classifier();
        assert!(c.compound("The lectures were good") > 0.05);
        assert!(c.compound("The lectures were not good") < -0.05);
        assert!(c.compound("The lectures weren't good at all") < 0.0);
    }

    #[test]
    fn boosters_and_caps_intensify() {
        let c = classifier();
        let plain = c.compound("The course was good");
        let boosted = c.compound("The course was very good");
        let shouted = c.compound("The course was GOOD");
        assert!(boosted > plain);
        assert!(shouted > plain);
        let dampened = c.compound("The course was slightly good");
        assert!(dampened < plain && dampened > 0.0);
    }

    #[test]
    fn exclamations_add_emphasis_in_the_scored_direction() {
        let c = classifier();
        assert!(c.compound("great!!!") > c.compound("great"));
        assert!(c.compound("terrible!!!") < c.compound("terrible"));
        assert_eq!(c.compound("the syllabus!!!"), 0.0);
    }

    #[test]
    fn but_shifts_weight_to_the_second_clause() {
        let c = classifier();
        let score = c.compound("The professor is great but the exams are terrible");
        assert!(score < 0.0, "score was {score}");
    }

    #[test]
    fn review_examples_classify_as_expected() {
        let c = classifier();
        assert_ne!(
            c.classify("This class is so hard, the exams are brutal"),
            Sentiment::Positive
        );
        assert_eq!(
            c.classify("Great professor, learned a lot"),
            Sentiment::Positive
        );
    }

    #[test]
    fn scores_stay_within_bounds() {
        let c = classifier();
        let text = "BEST BEST BEST amazing wonderful perfect love love love!!!!!!";
        let score = c.compound(text);
        assert!(score <= 1.0 && score > 0.9);
    }
}
