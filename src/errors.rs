use std::io;

use thiserror::Error;

use crate::data::SentimentMethod;
use crate::types::InputOrigin;

/// Error type for ingestion, classifier initialization, configuration, and IO failures.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("invalid input from '{origin}': {details}")]
    Input {
        origin: InputOrigin,
        details: String,
    },
    #[error("{strategy} sentiment classifier is unavailable: {reason}")]
    ClassifierUnavailable {
        strategy: SentimentMethod,
        reason: String,
    },
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl AnalyzerError {
    pub(crate) fn input(origin: impl Into<InputOrigin>, details: impl Into<String>) -> Self {
        Self::Input {
            origin: origin.into(),
            details: details.into(),
        }
    }

    pub(crate) fn classifier_unavailable(
        strategy: SentimentMethod,
        reason: impl Into<String>,
    ) -> Self {
        Self::ClassifierUnavailable {
            strategy,
            reason: reason.into(),
        }
    }
}
