use std::collections::HashMap;

use crate::client::Submission;
use crate::scoreboard::Scoreboard;
use crate::verdict::{self, Verdict};

#[test]
fn classify_covers_the_full_rule_table() {
    let cases = [
        ("done", "Accept", "#D4EDC9"),
        ("check", "First blood", "#80ff80"),
        ("hidden", "N/A", "#E5E5E5"),
        ("banana", "Runtime Error", "#FFE3E3"),
        ("d2", "Memory Limit Exceeded", "#FFE3E3"),
        ("a1", "Time Limit Exceeded", "#FFE3E3"),
        ("f4", "Output Limit Exceeded", "#FFE3E3"),
        ("xyz", "Wrong Answer", "#FFE3E3"),
    ];
    for (text, label, color) in cases {
        let style = verdict::classify(text);
        assert_eq!(style.label, label, "text {text:?}");
        assert_eq!(style.color, color, "text {text:?}");
    }
}

#[test]
fn classify_empty_text_falls_to_default() {
    let style = verdict::classify("");
    assert_eq!(style.label, "Wrong Answer");
    assert_eq!(style.color, verdict::COLOR_REJECTED);
}

#[test]
fn problem_url_matches_header_navigation_contract() {
    assert_eq!(
        crate::output::problem_url("https://oj.nctu.me", "A"),
        "https://oj.nctu.me/problems/A/"
    );
}

#[test]
fn submissions_url_matches_cell_navigation_contract() {
    assert_eq!(
        crate::output::submissions_url("https://oj.nctu.me", "G1", "alice", "B"),
        "https://oj.nctu.me/groups/G1/submissions/?count=100000&name=alice&problem_id=B"
    );
}

#[test]
fn url_builders_insert_identifiers_as_raw_text() {
    // no percent-encoding of identifiers
    assert_eq!(
        crate::output::submissions_url("https://oj.nctu.me", "11", "a b", "7&1"),
        "https://oj.nctu.me/groups/11/submissions/?count=100000&name=a b&problem_id=7&1"
    );
}

fn submission(id: u64, user_id: u64, verdict_id: u32) -> Submission {
    Submission {
        id,
        user_id,
        verdict_id,
    }
}

fn sample_roster() -> HashMap<u64, String> {
    HashMap::from([
        (1, "0416001".to_string()),
        (2, "0416002".to_string()),
        (3, "0416003".to_string()),
    ])
}

#[test]
fn replay_assigns_first_blood_to_the_earliest_solver() {
    let mut board = Scoreboard::new(&[714]);
    let roster = sample_roster();
    board.apply(
        714,
        &[
            submission(10, 2, 9),
            submission(11, 1, 10),
            submission(12, 2, 10),
        ],
        &roster,
    );
    let rows = board.rows();
    let first = rows.iter().find(|r| r.name == "0416001").unwrap();
    let second = rows.iter().find(|r| r.name == "0416002").unwrap();
    assert_eq!(first.cells[0], "check");
    assert_eq!(second.cells[0], "done");
}

#[test]
fn replay_skips_unknown_users_and_uncounted_verdicts() {
    let mut board = Scoreboard::new(&[714]);
    let roster = sample_roster();
    let counted = board.apply(
        714,
        &[
            submission(10, 42, 10), // not on the roster
            submission(11, 1, 1),   // pending, outside 4..=10
            submission(12, 1, 9),
        ],
        &roster,
    );
    assert_eq!(counted, 1);
    let rows = board.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].cells[0], "w1");
}

#[test]
fn penalty_counts_through_the_accepting_submission() {
    let mut board = Scoreboard::new(&[714]);
    let roster = sample_roster();
    board.apply(
        714,
        &[
            submission(10, 1, 9),
            submission(11, 1, 7),
            submission(12, 1, 10),
            submission(13, 1, 9), // after accept, ignored
        ],
        &roster,
    );
    let rows = board.rows();
    assert_eq!(rows[0].attempts, 3);
    assert_eq!(rows[0].solved, 1);
}

#[test]
fn rejected_cells_encode_worst_verdict_and_attempts() {
    let mut board = Scoreboard::new(&[714, 715]);
    let roster = sample_roster();
    board.apply(714, &[submission(10, 1, 7), submission(11, 1, 5)], &roster);
    let rows = board.rows();
    // TLE (7) outranks RE (5); two attempts so far, nothing on 715
    assert_eq!(rows[0].cells[0], "a2");
    assert_eq!(rows[0].cells[1], "h0");
    assert_eq!(verdict::classify(&rows[0].cells[0]).label, "Time Limit Exceeded");
    assert_eq!(verdict::classify(&rows[0].cells[1]).label, "N/A");
}

#[test]
fn rows_sort_by_solved_then_name() {
    let mut board = Scoreboard::new(&[714, 715]);
    let roster = sample_roster();
    board.apply(714, &[submission(10, 3, 10), submission(11, 1, 10)], &roster);
    board.apply(715, &[submission(12, 1, 10)], &roster);
    board.record(714, "0416002", Verdict::WrongAnswer);
    let names: Vec<String> = board.rows().into_iter().map(|r| r.name).collect();
    assert_eq!(names, vec!["0416001", "0416003", "0416002"]);
}

#[test]
fn report_aligns_cells_with_header_columns() {
    let mut board = Scoreboard::new(&[714, 715]);
    let roster = sample_roster();
    board.apply(714, &[submission(10, 1, 10)], &roster);
    let names = HashMap::from([(714, "A".to_string()), (715, "B".to_string())]);
    let report = crate::output::build_report(
        &board.rows(),
        board.problems(),
        &names,
        "https://oj.nctu.me",
        11,
    );

    assert_eq!(report.headers.len(), 2);
    assert_eq!(report.headers[0].title, "A");
    assert_eq!(report.headers[0].link, "https://oj.nctu.me/problems/A/");

    let row = &report.rows[0];
    assert_eq!(row.cells[0].label, "First blood");
    assert_eq!(
        row.cells[1].link,
        "https://oj.nctu.me/groups/11/submissions/?count=100000&name=0416001&problem_id=B"
    );
}

#[test]
fn report_falls_back_to_numeric_header_titles() {
    let board = Scoreboard::new(&[714]);
    let report = crate::output::build_report(
        &board.rows(),
        board.problems(),
        &HashMap::new(),
        "https://oj.nctu.me",
        11,
    );
    assert_eq!(report.headers[0].title, "714");
    assert_eq!(report.headers[0].link, "https://oj.nctu.me/problems/714/");
}

#[test]
fn html_render_decorates_and_wires_cells() {
    let mut board = Scoreboard::new(&[714]);
    let roster = sample_roster();
    board.apply(714, &[submission(10, 1, 10), submission(11, 2, 9)], &roster);
    let names = HashMap::from([(714, "A".to_string())]);
    let report = crate::output::build_report(
        &board.rows(),
        board.problems(),
        &names,
        "https://oj.nctu.me",
        11,
    );
    let html = String::from_utf8(crate::output::render_html(&report)).unwrap();

    assert!(html.contains(
        "onclick=\"window.open(&#39;https://oj.nctu.me/problems/A/&#39;, &#39;_blank&#39;)\""
    ));
    assert!(html.contains("title=\"First blood\" bgcolor=\"#80ff80\""));
    assert!(html.contains("title=\"Wrong Answer\" bgcolor=\"#FFE3E3\""));
    assert!(html.contains(
        "https://oj.nctu.me/groups/11/submissions/?count=100000&amp;name=0416001&amp;problem_id=A"
    ));
}

#[test]
fn html_render_escapes_display_text() {
    let mut board = Scoreboard::new(&[714]);
    let roster = HashMap::from([(1, "<img>".to_string())]);
    board.apply(714, &[submission(10, 1, 9)], &roster);
    let report = crate::output::build_report(
        &board.rows(),
        board.problems(),
        &HashMap::new(),
        "https://oj.nctu.me",
        11,
    );
    let html = String::from_utf8(crate::output::render_html(&report)).unwrap();
    assert!(!html.contains("<img>"));
    assert!(html.contains("&lt;img&gt;"));
}

#[test]
fn text_render_keeps_column_order() {
    let mut board = Scoreboard::new(&[714, 715]);
    let roster = sample_roster();
    board.apply(715, &[submission(10, 1, 10)], &roster);
    let report = crate::output::build_report(
        &board.rows(),
        board.problems(),
        &HashMap::new(),
        "https://oj.nctu.me",
        11,
    );
    let text = String::from_utf8(crate::output::render_text(&report)).unwrap();
    let mut lines = text.lines();
    let header = lines.next().unwrap();
    let row = lines.next().unwrap();
    assert!(header.starts_with("name"));
    assert!(header.contains("714"));
    assert!(header.contains("solved"));
    assert!(row.starts_with("0416001"));
    assert!(row.contains("h0"));
    assert!(row.contains("check"));
}

#[test]
fn json_render_round_trips_cell_fields() {
    let mut board = Scoreboard::new(&[714]);
    let roster = sample_roster();
    board.apply(714, &[submission(10, 1, 10)], &roster);
    let report = crate::output::build_report(
        &board.rows(),
        board.problems(),
        &HashMap::new(),
        "https://oj.nctu.me",
        11,
    );
    let value: serde_json::Value =
        serde_json::from_slice(&crate::output::render_json(&report)).unwrap();
    assert_eq!(value["group_id"], 11);
    assert_eq!(value["rows"][0]["cells"][0]["code"], "check");
    assert_eq!(value["rows"][0]["cells"][0]["color"], "#80ff80");
}

#[test]
fn output_format_parse_and_inference() {
    use crate::output::OutputFormat;

    assert_eq!(OutputFormat::parse("HTML"), Some(OutputFormat::Html));
    assert_eq!(OutputFormat::parse("txt"), Some(OutputFormat::Text));
    assert_eq!(OutputFormat::parse("yaml"), None);

    assert_eq!(
        crate::output::infer_format_from_path("./board.json"),
        Some(OutputFormat::Json)
    );
    assert_eq!(
        crate::output::infer_format_from_path("./board.htm"),
        Some(OutputFormat::Html)
    );
    assert_eq!(crate::output::infer_format_from_path("./board"), None);
}

#[test]
fn default_config_template_parses() {
    let cfg: crate::config::ConfigFile =
        serde_yaml::from_str(&crate::config::default_config_yaml()).unwrap();
    assert_eq!(cfg.count, Some(1_048_576));
    assert_eq!(cfg.name_filter.as_deref(), Some(r"^\d{7}$"));
    assert!(cfg.group_id.is_none());
}

#[test]
fn runner_rejects_incomplete_options() {
    use crate::runner::{Options, Runner, RunnerError};

    let err = Runner::new(Options::default()).unwrap_err();
    assert!(matches!(err, RunnerError::MissingGroup));

    let err = Runner::new(Options {
        group_id: 11,
        ..Options::default()
    })
    .unwrap_err();
    assert!(matches!(err, RunnerError::MissingToken));

    let err = Runner::new(Options {
        group_id: 11,
        token: "secret".to_string(),
        ..Options::default()
    })
    .unwrap_err();
    assert!(matches!(err, RunnerError::EmptyProblems));

    let err = Runner::new(Options {
        group_id: 11,
        token: "secret".to_string(),
        problems: vec![714],
        name_filter: Some("(".to_string()),
        ..Options::default()
    })
    .unwrap_err();
    assert!(matches!(err, RunnerError::InvalidNameFilter { .. }));

    assert!(Runner::new(Options {
        group_id: 11,
        token: "secret".to_string(),
        problems: vec![714],
        ..Options::default()
    })
    .is_ok());
}
