//! End-to-end tests for the load-score-report pipeline.

use std::fs;
use std::path::Path;

use discourse::pipeline::SUMMARY_FILE;
use discourse::report::{export_high_intensity, COMPOSITION_CHART, TREND_CHART};
use discourse::{AnalysisConfig, AnalysisRun, DiscourseError, EventReport, OutputPlan, Period};

const CORPUS: &str = "\
id,timeParsed,text,likes,retweets,replies
1,2023-04-10 14:30:00,La casta tiene miedo. Terrorismo fiscal y crisis.,100,20,5
2,2023-11-19 21:00:00,Viva la libertad carajo,5000,1200,300
3,2024-01-15 09:00:00,Es una guerra contra la casta política,,,
4,,Texto sin fecha sobre la inflación,10,2,1
";

fn write_corpus(dir: &Path) -> std::path::PathBuf {
    let input = dir.join("tweets.csv");
    fs::write(&input, CORPUS).expect("write corpus");
    input
}

#[test]
fn test_analyze_writes_all_artifacts() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = write_corpus(dir.path());
    let config = AnalysisConfig::default();

    let run = AnalysisRun::load(&config, &input).expect("load corpus");
    assert_eq!(run.table().len(), 4);
    assert_eq!(run.table().undated(), 1);

    let plan = OutputPlan::for_input(&input);
    let summary = run.write(&config, &plan).expect("write artifacts");

    assert_eq!(plan.table, dir.path().join("tweets_analyzed.csv"));
    assert!(plan.table.exists());
    assert!(dir.path().join(SUMMARY_FILE).exists());
    assert!(dir.path().join(TREND_CHART).exists());
    assert!(dir.path().join(COMPOSITION_CHART).exists());

    // Undated tweets are counted but never grouped.
    assert_eq!(summary.grouped.period, Period::Year);
    assert_eq!(summary.grouped.excluded, 1);
    let labels: Vec<_> = summary.grouped.groups.iter().map(|g| g.label.as_str()).collect();
    assert_eq!(labels, vec!["2023", "2024"]);

    let quarters: Vec<_> = summary.quarterly.groups.iter().map(|g| g.label.as_str()).collect();
    assert_eq!(quarters, vec!["2023-Q2", "2023-Q4", "2024-Q1"]);

    assert_eq!(summary.corpus.tweets, 4);
    assert_eq!(summary.corpus.undated, 1);
}

#[test]
fn test_augmented_table_keeps_rows_and_appends_score() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = write_corpus(dir.path());
    let config = AnalysisConfig::default();

    let run = AnalysisRun::load(&config, &input).expect("load corpus");
    let plan = OutputPlan {
        charts: false,
        ..OutputPlan::for_input(&input)
    };
    run.write(&config, &plan).expect("write artifacts");
    assert!(!dir.path().join(TREND_CHART).exists());

    let mut reader = csv::Reader::from_path(&plan.table).expect("open table");
    let headers = reader.headers().expect("headers").clone();
    assert_eq!(&headers[0], "id");
    assert_eq!(headers.iter().last(), Some("security_intensity"));
    assert!(headers.iter().any(|h| h == "la_casta"));
    assert!(headers.iter().any(|h| h == "total_enemies"));

    let score_idx = headers.len() - 1;
    let scores: Vec<u32> = reader
        .records()
        .map(|r| r.expect("record")[score_idx].parse().expect("score"))
        .collect();
    assert_eq!(scores.len(), 4);
    // "viva la libertad" only touches the liberty bucket.
    assert_eq!(scores[1], 0);
    assert!(scores[0] >= 3);
}

#[test]
fn test_summary_json_is_readable() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = write_corpus(dir.path());
    let config = AnalysisConfig::default();

    let run = AnalysisRun::load(&config, &input).expect("load corpus");
    run.write(&config, &OutputPlan::for_input(&input))
        .expect("write artifacts");

    let raw = fs::read_to_string(dir.path().join(SUMMARY_FILE)).expect("read summary");
    let value: serde_json::Value = serde_json::from_str(&raw).expect("json");
    assert_eq!(value["corpus"]["tweets"], 4);
    assert_eq!(value["grouped"]["period"], "year");
    assert_eq!(value["grouped"]["excluded"], 1);
}

#[test]
fn test_event_window_is_inclusive() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = write_corpus(dir.path());
    let run = AnalysisRun::load(&AnalysisConfig::default(), &input).expect("load corpus");

    let start = chrono::NaiveDate::from_ymd_opt(2023, 4, 10).expect("date");
    let end = chrono::NaiveDate::from_ymd_opt(2023, 11, 19).expect("date");
    let report = EventReport::build(
        run.scored(),
        run.categorizer().lexicon(),
        "Campaign",
        start,
        end,
    );

    assert_eq!(report.tweets, 2);
    assert_eq!(report.name, "Campaign");
    assert!(report.mean_engagement.is_some());
}

#[test]
fn test_export_high_intensity() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = write_corpus(dir.path());
    let run = AnalysisRun::load(&AnalysisConfig::default(), &input).expect("load corpus");

    let output = dir.path().join("qualitative").join("high.csv");
    let exported = export_high_intensity(&output, run.scored(), 3).expect("export");

    assert!(exported >= 1);
    let content = fs::read_to_string(&output).expect("read export");
    assert_eq!(content.lines().count(), exported + 1);
}

#[test]
fn test_missing_input_is_io_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let result = AnalysisRun::load(&AnalysisConfig::default(), &dir.path().join("absent.csv"));
    assert!(matches!(result, Err(DiscourseError::Io { .. })));
}

#[test]
fn test_missing_text_column_is_reported() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = dir.path().join("bad.csv");
    fs::write(&input, "id,timeParsed\n1,2023-01-01\n").expect("write");

    let result = AnalysisRun::load(&AnalysisConfig::default(), &input);
    assert!(matches!(result, Err(DiscourseError::MissingColumn(ref c)) if c == "text"));
}

#[test]
fn test_json_lines_input() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = dir.path().join("tweets.jsonl");
    fs::write(
        &input,
        "{\"id\":\"7\",\"timeParsed\":\"2023-05-01T10:00:00Z\",\"text\":\"la casta\",\"likes\":3}\n\
         \n\
         {\"id\":\"8\",\"timeParsed\":\"2023-05-02T10:00:00Z\",\"text\":\"guerra\"}\n",
    )
    .expect("write");

    let run = AnalysisRun::load(&AnalysisConfig::default(), &input).expect("load corpus");
    let scores: Vec<u32> = run.scored().iter().map(|s| s.security_intensity()).collect();
    assert_eq!(scores, vec![1, 1]);
    assert_eq!(run.scored()[0].tweet().engagement.total(), Some(3));
}
