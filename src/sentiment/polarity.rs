//! Polarity scoring: the mean of per-word polarities, adjusted by intensifiers,
//! negations, and exclamation marks.

use std::path::Path;

use crate::config::Thresholds;
use crate::constants::polarity::{EXCLAMATION_FACTOR, NEGATION_FACTOR};
use crate::data::SentimentMethod;
use crate::errors::AnalyzerError;
use crate::sentiment::SentimentClassifier;
use crate::sentiment::lexicon::{PolarityLexicon, is_negation};

/// Polarity classifier over a polarity/intensity lexicon.
#[derive(Clone, Debug)]
pub struct PolarityClassifier {
    lexicon: PolarityLexicon,
    thresholds: Thresholds,
}

#[derive(Debug, PartialEq)]
enum Token {
    Word(String),
    Exclamation,
    ClauseBreak,
}

impl PolarityClassifier {
    /// Classifier over the embedded lexicon.
    pub fn builtin() -> Self {
        Self::new(PolarityLexicon::builtin())
    }

    /// Classifier over a `word<TAB>polarity[<TAB>intensity]` file.
    pub fn from_lexicon_file(path: impl AsRef<Path>) -> Result<Self, AnalyzerError> {
        Ok(Self::new(PolarityLexicon::from_file(path)?))
    }

    /// Classifier over an already-loaded lexicon.
    pub fn new(lexicon: PolarityLexicon) -> Self {
        Self {
            lexicon,
            thresholds: Thresholds::polarity(),
        }
    }

    /// Override the label cut-offs.
    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Polarity in [-1, 1]; `0.0` when no word carries polarity.
    pub fn polarity(&self, text: &str) -> f64 {
        let tokens = tokenize(text);
        let mut assessments: Vec<f64> = Vec::new();
        let mut intensity = 1.0;
        let mut negated = false;

        for (idx, token) in tokens.iter().enumerate() {
            match token {
                Token::Exclamation => {
                    if let Some(last) = assessments.last_mut() {
                        *last = (*last * EXCLAMATION_FACTOR).clamp(-1.0, 1.0);
                    }
                }
                Token::ClauseBreak => {
                    intensity = 1.0;
                    negated = false;
                }
                Token::Word(word) => {
                    if is_negation(word) {
                        negated = true;
                        continue;
                    }
                    let Some(entry) = self.lexicon.entry(word) else {
                        intensity = 1.0;
                        continue;
                    };
                    if entry.is_modifier() && self.next_is_scored(&tokens[idx + 1..]) {
                        intensity *= entry.intensity;
                        continue;
                    }
                    if entry.polarity != 0.0 {
                        let mut value = entry.polarity * intensity;
                        if negated {
                            value *= NEGATION_FACTOR;
                        }
                        assessments.push(value.clamp(-1.0, 1.0));
                    }
                    intensity = 1.0;
                    negated = false;
                }
            }
        }

        if assessments.is_empty() {
            return 0.0;
        }
        let mean = assessments.iter().sum::<f64>() / assessments.len() as f64;
        mean.clamp(-1.0, 1.0)
    }

    fn next_is_scored(&self, rest: &[Token]) -> bool {
        match rest.first() {
            Some(Token::Word(next)) => self.lexicon.entry(next).is_some(),
            _ => false,
        }
    }
}

impl Default for PolarityClassifier {
    fn default() -> Self {
        Self::builtin()
    }
}

impl SentimentClassifier for PolarityClassifier {
    fn method(&self) -> SentimentMethod {
        SentimentMethod::Polarity
    }

    fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    fn score(&self, text: &str) -> f64 {
        self.polarity(text)
    }
}

fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    for piece in text.split_whitespace() {
        let word: String = piece
            .trim_matches(|ch: char| !ch.is_alphanumeric())
            .to_lowercase();
        if !word.is_empty() {
            tokens.push(Token::Word(word));
        }
        let trailing = &piece[piece.trim_end_matches(|ch: char| !ch.is_alphanumeric()).len()..];
        for ch in trailing.chars() {
            match ch {
                '!' => tokens.push(Token::Exclamation),
                '.' | ',' | ';' | ':' | '?' => {
                    if tokens.last() != Some(&Token::ClauseBreak) {
                        tokens.push(Token::ClauseBreak);
                    }
                }
                _ => {}
            }
        }
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Sentiment;

    fn classifier() -> PolarityClassifier {
        PolarityClassifier::builtin()
    }

    #[test]
    fn blank_text_is_neutral() {
        assert_eq!(classifier().classify(""), Sentiment::Neutral);
        assert_eq!(classifier().classify("\t"), Sentiment::Neutral);
        assert_eq!(classifier().polarity("nothing scored here"), 0.0);
    }

    #[test]
    fn polarity_is_the_mean_of_scored_words() {
        let score = classifier().polarity("good and bad");
        assert!(score.abs() < 1e-9);
        let score = classifier().polarity("great professor, excellent notes");
        assert!((score - 0.9).abs() < 1e-9);
    }

    #[test]
    fn intensifiers_scale_the_next_word() {
        let plain = classifier().polarity("good lectures");
        let boosted = classifier().polarity("very good lectures");
        assert!((boosted - 0.91).abs() < 1e-9, "boosted was {boosted}");
        assert!(boosted > plain);
        // Used alone, an intensifier scores with its own polarity.
        assert!((classifier().polarity("very") - 0.2).abs() < 1e-9);
    }

    #[test]
    fn negation_halves_and_flips() {
        let score = classifier().polarity("not good");
        assert!((score + 0.35).abs() < 1e-9);
        // The clause break ends the negation scope.
        let score = classifier().polarity("not really, good");
        assert!(score > 0.0);
    }

    #[test]
    fn exclamation_emphasizes_previous_assessment() {
        let score = classifier().polarity("good!");
        assert!((score - 0.875).abs() < 1e-9);
        assert!(classifier().polarity("perfect!!!") <= 1.0);
    }

    #[test]
    fn review_examples_classify_as_expected() {
        let c = classifier();
        assert_eq!(
            c.classify("This class is so hard, the exams are brutal"),
            Sentiment::Negative
        );
        assert_eq!(c.classify("Great professor, learned a lot"), Sentiment::Positive);
        assert_eq!(c.classify("The syllabus lists weekly readings."), Sentiment::Neutral);
    }

    #[test]
    fn tokenizer_marks_clause_breaks_and_exclamations() {
        let tokens = tokenize("Wow!! fine, ok.");
        assert_eq!(
            tokens,
            vec![
                Token::Word("wow".into()),
                Token::Exclamation,
                Token::Exclamation,
                Token::Word("fine".into()),
                Token::ClauseBreak,
                Token::Word("ok".into()),
                Token::ClauseBreak,
            ]
        );
    }
}
