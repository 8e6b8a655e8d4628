use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, ValueEnum, error::ErrorKind};
use tracing::info;

use crate::analyzer::ReviewAnalyzer;
use crate::config::AnalyzerConfig;
use crate::data::{EnrichedReview, SentimentMethod};
use crate::export::{AnalysisReport, write_enriched_csv, write_report_json};
use crate::source::{CsvReviewSource, ReviewSource};
use crate::summary::CorpusSummary;

const RULE_WIDTH: usize = 60;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum GroupByArg {
    Lexicon,
    Polarity,
}

impl From<GroupByArg> for SentimentMethod {
    fn from(value: GroupByArg) -> Self {
        match value {
            GroupByArg::Lexicon => SentimentMethod::Lexicon,
            GroupByArg::Polarity => SentimentMethod::Polarity,
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "analyze_reviews",
    disable_help_subcommand = true,
    about = "Analyze course reviews for sentiment and topics",
    long_about = "Classify every review with both sentiment strategies, tag topics, write the enriched table, and print corpus and per-course summaries.",
    after_help = "Set RUST_LOG (for example RUST_LOG=debug) to change log verbosity."
)]
struct AnalyzeReviewsCli {
    #[arg(
        long,
        value_name = "PATH",
        default_value = "data/sample_reviews.csv",
        help = "Review table, or a directory scanned for .csv files"
    )]
    input: PathBuf,
    #[arg(
        long,
        value_name = "PATH",
        default_value = "results/analyzed_reviews.csv",
        help = "Where the enriched review table is written"
    )]
    output: PathBuf,
    #[arg(long, value_name = "PATH", help = "Optional JSON report destination")]
    report: Option<PathBuf>,
    #[arg(long, value_name = "PATH", help = "Optional JSON analyzer config")]
    config: Option<PathBuf>,
    #[arg(
        long,
        value_name = "PATH",
        help = "VADER-format lexicon replacing the embedded one"
    )]
    lexicon: Option<PathBuf>,
    #[arg(
        long = "polarity-lexicon",
        value_name = "PATH",
        help = "Polarity lexicon replacing the embedded one"
    )]
    polarity_lexicon: Option<PathBuf>,
    #[arg(
        long = "group-by",
        value_enum,
        help = "Sentiment label used by the summaries (overrides the config)"
    )]
    group_by: Option<GroupByArg>,
    #[arg(
        long,
        default_value_t = 5,
        value_parser = parse_positive_usize,
        help = "Number of analyzed reviews shown in the sample table"
    )]
    samples: usize,
}

/// Run the review analysis CLI.
///
/// `args_iter` excludes the program name. `--help` prints usage and returns `Ok`.
pub fn run_analyze_reviews<I>(args_iter: I) -> Result<(), Box<dyn Error>>
where
    I: Iterator<Item = String>,
{
    let Some(cli) = parse_cli::<AnalyzeReviewsCli, _>(
        std::iter::once("analyze_reviews".to_string()).chain(args_iter),
    )?
    else {
        return Ok(());
    };

    let mut config = match &cli.config {
        Some(path) => AnalyzerConfig::from_json_file(path)?,
        None => AnalyzerConfig::default(),
    };
    if let Some(path) = cli.lexicon {
        config = config.with_lexicon_path(path);
    }
    if let Some(path) = cli.polarity_lexicon {
        config = config.with_polarity_lexicon_path(path);
    }
    if let Some(group_by) = cli.group_by {
        config = config.with_group_by(group_by.into());
    }
    let analyzer = ReviewAnalyzer::from_config(&config)?;

    print_banner("Course Review Sentiment Analyzer");
    let source = CsvReviewSource::from_path(&cli.input);
    let records = source.load()?;
    println!("Loaded {} reviews from {}", records.len(), cli.input.display());
    println!("\nAnalyzing reviews...");

    let batch = analyzer.analyze_isolated(&records);
    write_enriched_csv(&cli.output, &batch.reviews, &config.topic_delimiter)?;
    println!(
        "\nAnalysis complete! Results saved to {}",
        cli.output.display()
    );

    let report = AnalysisReport::build(&batch.reviews, config.group_by, config.top_topics)
        .with_failures(batch.failures);

    print_sample_results(&batch.reviews, cli.samples, &config.topic_delimiter);
    print_overall_statistics(&report.corpus);

    print_banner("COURSE SUMMARIES");
    for summary in &report.courses {
        println!("\n{} - {}", summary.course_code, summary.course_name);
        println!(
            "  Reviews: {}, Avg Rating: {}",
            summary.total_reviews,
            format_rating(summary.avg_rating)
        );
        println!(
            "  Sentiment: {}",
            format_counts(summary.sentiment_distribution.iter())
        );
        println!("  Topics: {}", format_counts(summary.common_topics.iter()));
    }

    if let Some(agreement) = &report.agreement {
        println!(
            "\nStrategy agreement: {}/{} ({:.1}%)",
            agreement.agree,
            agreement.total,
            agreement.share * 100.0
        );
    }

    if let Some(path) = &cli.report {
        write_report_json(path, &report)?;
        println!("Report saved to {}", path.display());
    }
    info!(
        reviews = report.corpus.total_reviews,
        courses = report.corpus.total_courses,
        "review analysis finished"
    );
    Ok(())
}

fn print_banner(title: &str) {
    println!("\n{}", "=".repeat(RULE_WIDTH));
    println!("{title}");
    println!("{}", "=".repeat(RULE_WIDTH));
}

fn print_sample_results(reviews: &[EnrichedReview], n: usize, delimiter: &str) {
    print_banner("SAMPLE RESULTS");
    println!("\nFirst {} analyzed reviews:", n.min(reviews.len()));
    println!(
        "{:<10} {:<28} {:>6} {:<10} topics",
        "course", "name", "rating", "sentiment"
    );
    for review in reviews.iter().take(n) {
        println!(
            "{:<10} {:<28} {:>6} {:<10} {}",
            review.record.course_code,
            truncate(&review.record.course_name, 28),
            format_rating(review.rating()),
            review.sentiment_lexicon,
            review.topics.join(delimiter)
        );
    }
}

fn print_overall_statistics(corpus: &CorpusSummary) {
    print_banner("OVERALL STATISTICS");
    println!("total_reviews: {}", corpus.total_reviews);
    println!("total_courses: {}", corpus.total_courses);
    println!("avg_rating: {}", format_rating(corpus.avg_rating));
    println!(
        "sentiment_distribution: {}",
        format_counts(corpus.sentiment_distribution.iter())
    );
    let by_label: Vec<String> = corpus
        .rating_by_sentiment
        .iter()
        .map(|(label, avg)| format!("{label}={}", format_rating(*avg)))
        .collect();
    println!("rating_by_sentiment: {}", by_label.join(", "));
}

fn format_counts<'a, K, I>(entries: I) -> String
where
    K: std::fmt::Display + 'a,
    I: Iterator<Item = (&'a K, &'a usize)>,
{
    entries
        .map(|(key, count)| format!("{key}={count}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_rating(rating: Option<f64>) -> String {
    rating
        .map(|value| format!("{value:.2}"))
        .unwrap_or_else(|| "n/a".to_string())
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut out: String = value.chars().take(width.saturating_sub(3)).collect();
    out.push_str("...");
    out
}

fn parse_positive_usize(raw: &str) -> Result<usize, String> {
    let parsed = raw.parse::<usize>().map_err(|_| {
        format!(
            "Could not parse --samples value '{}' as a positive integer",
            raw
        )
    })?;
    if parsed == 0 {
        return Err("--samples must be greater than zero".to_string());
    }
    Ok(parsed)
}

fn parse_cli<T, I>(args: I) -> Result<Option<T>, Box<dyn Error>>
where
    T: Parser,
    I: IntoIterator,
    I::Item: Into<std::ffi::OsString> + Clone,
{
    match T::try_parse_from(args) {
        Ok(cli) => Ok(Some(cli)),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                err.print()?;
                Ok(None)
            }
            _ => Err(err.into()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_exits_cleanly() {
        assert!(run_analyze_reviews(vec!["--help".to_string()].into_iter()).is_ok());
    }

    #[test]
    fn samples_must_be_positive() {
        assert!(parse_positive_usize("0").is_err());
        assert!(parse_positive_usize("abc").is_err());
        assert_eq!(parse_positive_usize("3").unwrap(), 3);
        let parsed = parse_cli::<AnalyzeReviewsCli, _>(["analyze_reviews", "--samples", "0"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn group_by_maps_to_sentiment_method() {
        let cli = parse_cli::<AnalyzeReviewsCli, _>([
            "analyze_reviews",
            "--group-by",
            "polarity",
            "--input",
            "reviews.csv",
        ])
        .unwrap()
        .unwrap();
        assert_eq!(
            cli.group_by.map(SentimentMethod::from),
            Some(SentimentMethod::Polarity)
        );
        assert_eq!(cli.input, PathBuf::from("reviews.csv"));
        assert_eq!(cli.samples, 5);
        assert_eq!(cli.output, PathBuf::from("results/analyzed_reviews.csv"));
    }

    #[test]
    fn format_helpers_render_missing_ratings() {
        assert_eq!(format_rating(None), "n/a");
        assert_eq!(format_rating(Some(3.456)), "3.46");
        assert_eq!(truncate("Data Structures", 8), "Data ...");
    }

    #[test]
    fn full_run_writes_table_and_report() {
        let temp = tempfile::tempdir().unwrap();
        let input = temp.path().join("reviews.csv");
        std::fs::write(
            &input,
            "course_code,course_name,review,rating\nCS225,Data Structures,Hard exams but great professor,4\nCS124,Intro,,\n",
        )
        .unwrap();
        let output = temp.path().join("out").join("analyzed.csv");
        let report = temp.path().join("out").join("report.json");
        let args = vec![
            "--input".to_string(),
            input.display().to_string(),
            "--output".to_string(),
            output.display().to_string(),
            "--report".to_string(),
            report.display().to_string(),
            "--samples".to_string(),
            "1".to_string(),
        ];
        run_analyze_reviews(args.into_iter()).unwrap();
        assert!(output.exists());
        let json = std::fs::read_to_string(&report).unwrap();
        assert!(json.contains("\"total_courses\": 2"));
    }
}
