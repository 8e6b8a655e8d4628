/// Short course identifier used as the grouping key for every summary.
/// Examples: `CS124`, `CS225`, `STAT400`
pub type CourseCode = String;
/// Human-readable course title; falls back to the course code when unmapped.
/// Examples: `Data Structures`, `CS374`
pub type CourseName = String;
/// Provenance tag for a review row.
/// Examples: `reddit`, `survey`
pub type SourceTag = String;
/// Coarse topic category assigned by keyword presence.
/// Examples: `difficulty`, `exams`, `general`
pub type TopicTag = String;
/// Keyword matched (as a lowercase substring) against review text.
/// Examples: `homework`, `office hours`
pub type Keyword = String;
/// Human-readable description of where input came from, used in errors.
/// Examples: `data/sample_reviews.csv`, `in-memory`
pub type InputOrigin = String;
/// Identifier of a review provider.
/// Examples: `csv:data/sample_reviews.csv`, `memory`
pub type SourceId = String;
/// Lexicon word (lowercase) mapped to a valence or polarity.
/// Examples: `great`, `brutal`, `kind of`
pub type LexiconWord = String;
