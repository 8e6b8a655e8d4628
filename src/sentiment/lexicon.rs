//! Word lists and lexicon loaders backing both sentiment strategies.
//!
//! Embedded tables cover the vocabulary that shows up in course reviews.
//! Larger lexicons (for example the full VADER `vader_lexicon.txt`) can be
//! loaded from disk; load failures surface as `ClassifierUnavailable`.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::data::SentimentMethod;
use crate::errors::AnalyzerError;
use crate::types::LexiconWord;

/// Largest valence magnitude on the VADER scale.
const VALENCE_LIMIT: f64 = 4.0;

/// Valences on the VADER [-4, 4] scale.
const VALENCES: &[(&str, f64)] = &[
    // positive
    ("amazing", 2.8),
    ("awesome", 3.1),
    ("beautiful", 2.9),
    ("best", 3.2),
    ("better", 1.9),
    ("brilliant", 2.8),
    ("clear", 1.6),
    ("comfortable", 1.5),
    ("cool", 1.3),
    ("easy", 1.9),
    ("engaging", 1.4),
    ("enjoy", 2.2),
    ("enjoyable", 1.9),
    ("enjoyed", 2.3),
    ("excellent", 2.7),
    ("excited", 1.4),
    ("fair", 1.3),
    ("fantastic", 2.6),
    ("favorite", 2.0),
    ("fun", 2.3),
    ("glad", 2.0),
    ("good", 1.9),
    ("great", 3.1),
    ("happy", 2.7),
    ("help", 1.7),
    ("helped", 1.6),
    ("helpful", 1.8),
    ("helps", 1.6),
    ("incredible", 2.7),
    ("interesting", 1.7),
    ("kind", 2.4),
    ("learned", 1.0),
    ("like", 1.5),
    ("liked", 1.8),
    ("love", 3.2),
    ("loved", 2.9),
    ("nice", 1.8),
    ("organized", 1.2),
    ("passionate", 2.4),
    ("perfect", 2.7),
    ("pleasant", 2.3),
    ("recommend", 1.5),
    ("recommended", 1.8),
    ("rewarding", 2.2),
    ("solid", 1.2),
    ("success", 2.7),
    ("supportive", 2.1),
    ("thank", 1.5),
    ("thanks", 1.9),
    ("useful", 1.9),
    ("valuable", 2.1),
    ("well", 1.1),
    ("win", 2.8),
    ("wonderful", 2.7),
    ("worth", 0.9),
    ("yes", 1.7),
    // negative
    ("annoying", -1.7),
    ("anxious", -1.0),
    ("awful", -2.0),
    ("bad", -2.5),
    ("boring", -1.3),
    ("broken", -2.1),
    ("brutal", -3.1),
    ("complain", -1.5),
    ("confused", -1.3),
    ("confusing", -0.9),
    ("crap", -1.6),
    ("dead", -3.3),
    ("disappointed", -1.9),
    ("disappointing", -2.2),
    ("disaster", -3.1),
    ("dull", -1.7),
    ("fail", -2.5),
    ("failed", -2.3),
    ("failing", -2.3),
    ("frustrated", -2.4),
    ("frustrating", -1.9),
    ("hard", -0.4),
    ("harsh", -1.9),
    ("hate", -2.7),
    ("hated", -3.2),
    ("hell", -3.6),
    ("horrible", -2.5),
    ("lost", -1.3),
    ("mess", -1.5),
    ("miserable", -2.2),
    ("nightmare", -3.0),
    ("no", -1.2),
    ("pain", -2.3),
    ("painful", -2.4),
    ("pointless", -1.5),
    ("poor", -2.1),
    ("poorly", -1.5),
    ("problem", -1.7),
    ("regret", -1.8),
    ("rude", -2.0),
    ("sad", -2.1),
    ("stress", -1.8),
    ("stressed", -1.4),
    ("stressful", -2.3),
    ("struggle", -1.3),
    ("struggled", -1.4),
    ("stupid", -2.4),
    ("suck", -1.9),
    ("sucks", -1.5),
    ("terrible", -2.1),
    ("tired", -1.9),
    ("tough", -0.5),
    ("unclear", -1.0),
    ("unfair", -2.1),
    ("unhelpful", -1.9),
    ("useless", -1.8),
    ("waste", -1.8),
    ("weak", -1.9),
    ("worse", -2.1),
    ("worst", -3.1),
    ("wrong", -2.1),
];

/// Booster (`+`) and dampener (`-`) words; the sign picks the direction.
const BOOSTERS: &[(&str, f64)] = &[
    ("absolutely", 1.0),
    ("amazingly", 1.0),
    ("completely", 1.0),
    ("considerably", 1.0),
    ("deeply", 1.0),
    ("enormously", 1.0),
    ("entirely", 1.0),
    ("especially", 1.0),
    ("exceptionally", 1.0),
    ("extremely", 1.0),
    ("greatly", 1.0),
    ("hella", 1.0),
    ("highly", 1.0),
    ("hugely", 1.0),
    ("incredibly", 1.0),
    ("intensely", 1.0),
    ("insanely", 1.0),
    ("majorly", 1.0),
    ("more", 1.0),
    ("most", 1.0),
    ("particularly", 1.0),
    ("quite", 1.0),
    ("really", 1.0),
    ("remarkably", 1.0),
    ("so", 1.0),
    ("super", 1.0),
    ("thoroughly", 1.0),
    ("too", 1.0),
    ("totally", 1.0),
    ("tremendously", 1.0),
    ("unbelievably", 1.0),
    ("utterly", 1.0),
    ("very", 1.0),
    ("almost", -1.0),
    ("barely", -1.0),
    ("hardly", -1.0),
    ("kinda", -1.0),
    ("less", -1.0),
    ("little", -1.0),
    ("marginally", -1.0),
    ("occasionally", -1.0),
    ("partly", -1.0),
    ("scarcely", -1.0),
    ("slightly", -1.0),
    ("somewhat", -1.0),
    ("sorta", -1.0),
];

const NEGATIONS: &[&str] = &[
    "aint", "arent", "cannot", "cant", "couldnt", "didnt", "doesnt", "dont", "hadnt", "hasnt",
    "havent", "isnt", "mightnt", "mustnt", "neither", "neednt", "never", "none", "nope", "nor",
    "not", "nothing", "nowhere", "shant", "shouldnt", "wasnt", "werent", "without", "wont",
    "wouldnt", "rarely", "seldom", "despite",
];

/// Polarity entries `(word, polarity in [-1, 1], intensity)`.
///
/// Words with an intensity other than `1.0` modify the polarity of the next
/// scored word instead of being scored themselves.
const POLARITIES: &[(&str, f64, f64)] = &[
    ("absolutely", 0.2, 1.4),
    ("amazing", 0.6, 1.0),
    ("awesome", 1.0, 1.0),
    ("awful", -1.0, 1.0),
    ("bad", -0.7, 1.0),
    ("best", 1.0, 1.0),
    ("better", 0.5, 1.0),
    ("boring", -1.0, 1.0),
    ("brilliant", 0.9, 1.0),
    ("brutal", -0.875, 1.0),
    ("clear", 0.1, 1.0),
    ("confusing", -0.3, 1.0),
    ("cool", 0.35, 1.0),
    ("difficult", -0.5, 1.0),
    ("disappointing", -0.6, 1.0),
    ("dull", -0.3125, 1.0),
    ("easy", 0.433, 1.0),
    ("engaging", 0.4, 1.0),
    ("enjoyable", 0.4, 1.0),
    ("excellent", 1.0, 1.0),
    ("extremely", -0.125, 1.6),
    ("fair", 0.7, 1.0),
    ("fantastic", 0.4, 1.0),
    ("fun", 0.3, 1.0),
    ("good", 0.7, 1.0),
    ("great", 0.8, 1.0),
    ("happy", 0.8, 1.0),
    ("hard", -0.291_666_666_7, 1.0),
    ("harsh", -0.35, 1.0),
    ("helpful", 0.2, 1.0),
    ("horrible", -1.0, 1.0),
    ("incredibly", 0.9, 1.3),
    ("interesting", 0.5, 1.0),
    ("lost", 0.0, 1.0),
    ("nice", 0.6, 1.0),
    ("perfect", 1.0, 1.0),
    ("poor", -0.4, 1.0),
    ("pretty", 0.25, 1.1),
    ("quite", 0.0, 1.1),
    ("really", 0.2, 1.2),
    ("slightly", -0.166_666_666_7, 0.7),
    ("so", 0.0, 1.2),
    ("somewhat", 0.0, 0.8),
    ("stressful", -0.4, 1.0),
    ("stupid", -0.8, 1.0),
    ("super", 0.333_333_333_3, 1.3),
    ("terrible", -1.0, 1.0),
    ("totally", 0.0, 1.3),
    ("tough", -0.388_888_888_9, 1.0),
    ("unclear", -0.1, 1.0),
    ("unfair", -0.5, 1.0),
    ("unhelpful", -0.5, 1.0),
    ("useful", 0.3, 1.0),
    ("useless", -0.5, 1.0),
    ("very", 0.2, 1.3),
    ("wonderful", 1.0, 1.0),
    ("worse", -0.4, 1.0),
    ("worst", -1.0, 1.0),
    ("wrong", -0.5, 1.0),
];

/// Word valences plus the booster and negation lists used by compound scoring.
#[derive(Clone, Debug)]
pub struct ValenceLexicon {
    valences: HashMap<LexiconWord, f64>,
    boosters: HashMap<LexiconWord, f64>,
}

impl ValenceLexicon {
    /// Lexicon built from the embedded tables.
    pub fn builtin() -> Self {
        Self {
            valences: VALENCES
                .iter()
                .map(|(word, valence)| (word.to_string(), *valence))
                .collect(),
            boosters: builtin_boosters(),
        }
    }

    /// Load a VADER-format lexicon (`word<TAB>mean[<TAB>...]` per line).
    ///
    /// Booster and negation lists stay built in.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, AnalyzerError> {
        let path = path.as_ref();
        let raw = read_lexicon(path, SentimentMethod::Lexicon)?;
        let mut valences = HashMap::new();
        for (line_no, line) in raw.lines().enumerate() {
            let Some(mut fields) = lexicon_fields(line) else {
                continue;
            };
            let word = fields.next().unwrap_or_default();
            let valence = parse_field(fields.next(), path, line_no, SentimentMethod::Lexicon)?;
            if !(-VALENCE_LIMIT..=VALENCE_LIMIT).contains(&valence) {
                return Err(AnalyzerError::classifier_unavailable(
                    SentimentMethod::Lexicon,
                    format!(
                        "{}:{}: valence {valence} is outside [-4, 4]",
                        path.display(),
                        line_no + 1
                    ),
                ));
            }
            valences.insert(word.to_lowercase(), valence);
        }
        if valences.is_empty() {
            return Err(AnalyzerError::classifier_unavailable(
                SentimentMethod::Lexicon,
                format!("lexicon '{}' contains no entries", path.display()),
            ));
        }
        Ok(Self {
            valences,
            boosters: builtin_boosters(),
        })
    }

    /// Valence of a lowercase word.
    pub fn valence(&self, word: &str) -> Option<f64> {
        self.valences.get(word).copied()
    }

    /// Booster direction (`1.0` or `-1.0`) of a lowercase word.
    pub fn booster(&self, word: &str) -> Option<f64> {
        self.boosters.get(word).copied()
    }

    /// Number of scored words.
    pub fn len(&self) -> usize {
        self.valences.len()
    }

    /// Whether the lexicon has no scored words.
    pub fn is_empty(&self) -> bool {
        self.valences.is_empty()
    }
}

/// Polarity/intensity table used by polarity scoring.
#[derive(Clone, Debug)]
pub struct PolarityLexicon {
    entries: HashMap<LexiconWord, PolarityEntry>,
}

/// One polarity lexicon entry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PolarityEntry {
    /// Polarity in [-1, 1].
    pub polarity: f64,
    /// Multiplier applied to the next scored word (`1.0` = not a modifier).
    pub intensity: f64,
}

impl PolarityEntry {
    /// Whether this word modifies its successor rather than scoring alone.
    pub fn is_modifier(&self) -> bool {
        (self.intensity - 1.0).abs() > f64::EPSILON
    }
}

impl PolarityLexicon {
    /// Lexicon built from the embedded table.
    pub fn builtin() -> Self {
        Self {
            entries: POLARITIES
                .iter()
                .map(|(word, polarity, intensity)| {
                    (
                        word.to_string(),
                        PolarityEntry {
                            polarity: *polarity,
                            intensity: *intensity,
                        },
                    )
                })
                .collect(),
        }
    }

    /// Load `word<TAB>polarity[<TAB>intensity]` lines.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, AnalyzerError> {
        let path = path.as_ref();
        let raw = read_lexicon(path, SentimentMethod::Polarity)?;
        let mut entries = HashMap::new();
        for (line_no, line) in raw.lines().enumerate() {
            let Some(mut fields) = lexicon_fields(line) else {
                continue;
            };
            let word = fields.next().unwrap_or_default();
            let polarity = parse_field(fields.next(), path, line_no, SentimentMethod::Polarity)?;
            let intensity = match fields.next() {
                Some(raw) => parse_field(Some(raw), path, line_no, SentimentMethod::Polarity)?,
                None => 1.0,
            };
            if !(-1.0..=1.0).contains(&polarity) {
                return Err(AnalyzerError::classifier_unavailable(
                    SentimentMethod::Polarity,
                    format!(
                        "{}:{}: polarity {polarity} is outside [-1, 1]",
                        path.display(),
                        line_no + 1
                    ),
                ));
            }
            entries.insert(
                word.to_lowercase(),
                PolarityEntry {
                    polarity,
                    intensity,
                },
            );
        }
        if entries.is_empty() {
            return Err(AnalyzerError::classifier_unavailable(
                SentimentMethod::Polarity,
                format!("lexicon '{}' contains no entries", path.display()),
            ));
        }
        Ok(Self { entries })
    }

    /// Entry for a lowercase word.
    pub fn entry(&self, word: &str) -> Option<PolarityEntry> {
        self.entries.get(word).copied()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the lexicon has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Whether a lowercase token negates what follows it.
pub fn is_negation(word: &str) -> bool {
    NEGATIONS.contains(&word) || word.contains("n't")
}

fn builtin_boosters() -> HashMap<LexiconWord, f64> {
    BOOSTERS
        .iter()
        .map(|(word, direction)| (word.to_string(), *direction))
        .collect()
}

fn read_lexicon(path: &Path, strategy: SentimentMethod) -> Result<String, AnalyzerError> {
    fs::read_to_string(path).map_err(|err| {
        AnalyzerError::classifier_unavailable(
            strategy,
            format!("failed to read lexicon '{}': {err}", path.display()),
        )
    })
}

fn lexicon_fields(line: &str) -> Option<std::str::Split<'_, char>> {
    let trimmed = line.trim_end_matches(['\r', '\n']);
    if trimmed.trim().is_empty() || trimmed.starts_with('#') {
        return None;
    }
    Some(trimmed.split('\t'))
}

fn parse_field(
    raw: Option<&str>,
    path: &Path,
    line_no: usize,
    strategy: SentimentMethod,
) -> Result<f64, AnalyzerError> {
    let raw = raw.map(str::trim).unwrap_or_default();
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(AnalyzerError::classifier_unavailable(
            strategy,
            format!(
                "{}:{}: expected a finite numeric score, found '{raw}'",
                path.display(),
                line_no + 1
            ),
        )),
    }
}
