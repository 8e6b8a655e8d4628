//! Sentiment classification strategies.
//!
//! Ownership model:
//! - `SentimentClassifier` is the analyzer-facing capability: text in, label out.
//! - `CompoundClassifier` and `PolarityClassifier` own their lexicons, loaded
//!   once at construction; per-record classification never touches disk.

use crate::config::Thresholds;
use crate::data::{Sentiment, SentimentMethod};
use crate::utils::is_blank;

/// Lexicon-compound (VADER-style) strategy.
pub mod compound;
/// Word lists and lexicon file loaders.
pub mod lexicon;
/// Polarity (averaged word polarity) strategy.
pub mod polarity;

pub use compound::CompoundClassifier;
pub use lexicon::{PolarityLexicon, ValenceLexicon};
pub use polarity::PolarityClassifier;

/// A swappable sentiment strategy.
///
/// Implementations provide a continuous score; `classify` turns it into a
/// label with the strategy's thresholds. Classification is pure and
/// deterministic for a given instance.
pub trait SentimentClassifier: Send + Sync {
    /// Which strategy this is (used to route labels into the right field).
    fn method(&self) -> SentimentMethod;

    /// Cut-offs applied by `classify`.
    fn thresholds(&self) -> Thresholds;

    /// Continuous score in [-1, 1].
    fn score(&self, text: &str) -> f64;

    /// Label for `text`. Blank text is `Neutral` and is never scored.
    fn classify(&self, text: &str) -> Sentiment {
        if is_blank(text) {
            return Sentiment::Neutral;
        }
        self.thresholds().label(self.score(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingClassifier {
        calls: AtomicUsize,
    }

    impl SentimentClassifier for CountingClassifier {
        fn method(&self) -> SentimentMethod {
            SentimentMethod::Polarity
        }

        fn thresholds(&self) -> Thresholds {
            Thresholds::polarity()
        }

        fn score(&self, _text: &str) -> f64 {
            self.calls.fetch_add(1, Ordering::SeqCst);
            0.5
        }
    }

    #[test]
    fn blank_text_skips_scoring() {
        let classifier = CountingClassifier {
            calls: AtomicUsize::new(0),
        };
        assert_eq!(classifier.classify("  "), Sentiment::Neutral);
        assert_eq!(classifier.calls.load(Ordering::SeqCst), 0);
        assert_eq!(classifier.classify("anything"), Sentiment::Positive);
        assert_eq!(classifier.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn strategies_are_usable_as_trait_objects() {
        let strategies: Vec<Box<dyn SentimentClassifier>> = vec![
            Box::new(CompoundClassifier::builtin()),
            Box::new(PolarityClassifier::builtin()),
        ];
        let methods: Vec<SentimentMethod> = strategies.iter().map(|s| s.method()).collect();
        assert_eq!(
            methods,
            vec![SentimentMethod::Lexicon, SentimentMethod::Polarity]
        );
        for strategy in &strategies {
            assert_eq!(strategy.classify(""), Sentiment::Neutral);
        }
    }
}
