//! CLI integration tests using assert_cmd.

use std::path::Path;

use assert_cmd::Command;
use mathdrill_core::{Generator, Operation, Problem, SessionRecord, TestBatch};
use predicates::prelude::*;
use tempfile::TempDir;

/// Runs inside `dir` with no config file or seed leaking in from the environment.
fn mathdrill(dir: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("mathdrill").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env_remove("MATHDRILL_SEED")
        .env_remove("RUST_LOG");
    cmd
}

fn write_batch(dir: &Path, args: &[&str]) -> TestBatch {
    mathdrill(dir)
        .arg("test")
        .args(args)
        .args(["--output", "batch.json", "--seed", "7"])
        .assert()
        .success();
    let content = std::fs::read_to_string(dir.join("batch.json")).unwrap();
    serde_json::from_str(&content).unwrap()
}

fn all_answers(batch: &TestBatch) -> String {
    batch
        .problems
        .iter()
        .map(|p| p.result.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

#[test]
fn help_output() {
    let dir = TempDir::new().unwrap();
    mathdrill(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Arithmetic drills for young learners"));
}

#[test]
fn version_output() {
    let dir = TempDir::new().unwrap();
    mathdrill(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("mathdrill"));
}

#[test]
fn practice_prints_requested_count() {
    let dir = TempDir::new().unwrap();
    let output = mathdrill(dir.path())
        .args(["practice", "--operation", "addition", "--count", "30", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let problems: Vec<Problem> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(problems.len(), 30);
    assert!(problems.iter().all(|p| p.result < 20 && p.operation == Operation::Addition));
}

#[test]
fn practice_is_reproducible_with_seed() {
    let dir = TempDir::new().unwrap();
    let run = || {
        mathdrill(dir.path())
            .args(["practice", "--operation", "times", "--seed", "3", "--answers"])
            .output()
            .unwrap()
            .stdout
    };
    let first = run();
    assert_eq!(first, run());
    assert!(String::from_utf8(first).unwrap().contains(" × "));
}

#[test]
fn practice_rejects_unknown_operation() {
    let dir = TempDir::new().unwrap();
    mathdrill(dir.path())
        .args(["practice", "--operation", "division"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown operation"));
}

#[test]
fn test_batch_by_five() {
    let dir = TempDir::new().unwrap();
    let batch = write_batch(dir.path(), &["--operation", "multiplication", "--number", "5"]);

    assert_eq!(batch.len(), 16);
    let mut seen = std::collections::HashSet::new();
    for p in &batch.problems {
        assert_eq!(p.second_operand, 5);
        assert_eq!(p.result, p.first_operand * 5);
        assert!(seen.insert(p.first_operand));
    }
}

#[test]
fn test_prints_grid() {
    let dir = TempDir::new().unwrap();
    mathdrill(dir.path())
        .args(["test", "--operation", "subtraction", "--number", "3", "--seed", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Subtraction test: 16 problems with 3"))
        .stdout(predicate::str::contains(" - 3 = "));
}

#[test]
fn test_rejects_out_of_range_number() {
    let dir = TempDir::new().unwrap();
    mathdrill(dir.path())
        .args(["test", "--operation", "multiplication", "--number", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"))
        .stderr(predicate::str::contains("out of range"));
}

#[test]
fn strict_policy_refuses_small_pool() {
    let dir = TempDir::new().unwrap();
    mathdrill(dir.path())
        .args(["test", "--operation", "addition", "--number", "9", "--policy", "strict"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot fill a batch of 16"));
}

#[test]
fn test_batch_is_always_sixteen() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("mathdrill.toml"), "batch_size = 8\n").unwrap();
    let batch = write_batch(dir.path(), &["--operation", "addition", "--number", "2"]);
    assert_eq!(batch.len(), 16);
}

#[test]
fn test_has_no_size_flag() {
    let dir = TempDir::new().unwrap();
    mathdrill(dir.path())
        .args(["test", "--operation", "multiplication", "--number", "3"])
        .args(["--size", "18446744073709551615"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--size"))
        .stderr(predicate::str::contains("panicked").not());
}

#[test]
fn config_file_sets_policy() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("mathdrill.toml"), "uniqueness = \"strict\"\n").unwrap();
    mathdrill(dir.path())
        .args(["test", "--operation", "addition", "--number", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot fill a batch of 16"));
}

#[test]
fn missing_config_file_fails() {
    let dir = TempDir::new().unwrap();
    mathdrill(dir.path())
        .args(["--config", "nope.toml", "practice", "--operation", "addition"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn grade_perfect_score() {
    let dir = TempDir::new().unwrap();
    let batch = write_batch(dir.path(), &["--operation", "multiplication", "--number", "6"]);

    mathdrill(dir.path())
        .args(["grade", "--batch", "batch.json", "--answers", &all_answers(&batch)])
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 16/16 (100%) Perfect Score!"))
        .stdout(predicate::str::contains("Missed").not());
}

#[test]
fn grade_lists_missed_problems() {
    let dir = TempDir::new().unwrap();
    let batch = write_batch(dir.path(), &["--operation", "addition", "--number", "4"]);
    let first = batch.problems[0];
    let wrong = format!("{}", first.result + 1);

    let mut answers: Vec<String> = batch.problems.iter().map(|p| p.result.to_string()).collect();
    answers[0] = wrong.clone();
    answers[1] = String::new();

    mathdrill(dir.path())
        .args(["grade", "--batch", "batch.json", "--answers", &answers.join(",")])
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 14/16 (88%) Great Job!"))
        .stdout(predicate::str::contains(format!(
            "{first} = {} (you said {wrong})",
            first.result
        )))
        .stdout(predicate::str::contains("(blank)"));
}

#[test]
fn grade_writes_report_log_and_session() {
    let dir = TempDir::new().unwrap();
    let batch = write_batch(dir.path(), &["--operation", "subtraction", "--number", "7"]);

    mathdrill(dir.path())
        .args([
            "grade",
            "--batch",
            "batch.json",
            "--answers",
            &all_answers(&batch),
            "--duration",
            "95",
            "--report",
            "out/report.json",
            "--log",
            "out/attempts.jsonl",
            "--sessions",
            "sessions.json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Time: 1:35"));

    assert!(dir.path().join("out/report.json").exists());
    let log = std::fs::read_to_string(dir.path().join("out/attempts.jsonl")).unwrap();
    assert_eq!(log.lines().count(), 16);

    let sessions: Vec<SessionRecord> =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("sessions.json")).unwrap())
            .unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].correct_count, 16);
}

#[test]
fn grade_rejects_huge_duration() {
    let dir = TempDir::new().unwrap();
    let batch = write_batch(dir.path(), &["--operation", "multiplication", "--number", "2"]);

    mathdrill(dir.path())
        .args(["grade", "--batch", "batch.json", "--answers", &all_answers(&batch)])
        .args(["--duration", "10000000000000", "--sessions", "sessions.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--duration"))
        .stderr(predicate::str::contains("panicked").not());

    assert!(!dir.path().join("sessions.json").exists());
}

#[test]
fn grade_missing_batch_fails() {
    let dir = TempDir::new().unwrap();
    mathdrill(dir.path())
        .args(["grade", "--batch", "no_such_batch.json", "--answers", "1,2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load batch"));
}

#[test]
fn drill_completes_with_right_answers() {
    let dir = TempDir::new().unwrap();
    let mut generator = Generator::seeded(5);
    let answers: String = (0..3)
        .map(|_| format!("{}\n", generator.problem(Operation::Subtraction).result))
        .collect();

    mathdrill(dir.path())
        .args([
            "drill",
            "--operation",
            "subtraction",
            "--goal",
            "3",
            "--seed",
            "5",
            "--sessions",
            "sessions.json",
        ])
        .write_stdin(answers)
        .assert()
        .success()
        .stdout(predicate::str::contains("ROAR! 3/3"))
        .stdout(predicate::str::contains("Session complete! 3 correct in 3 tries"));

    assert!(dir.path().join("sessions.json").exists());
}

#[test]
fn drill_stops_at_end_of_input() {
    let dir = TempDir::new().unwrap();
    mathdrill(dir.path())
        .args(["drill", "--operation", "addition", "--goal", "3", "--log", "attempts.jsonl"])
        .write_stdin("-1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Try again!"))
        .stdout(predicate::str::contains("Stopped at 0/3 correct"));

    let log = std::fs::read_to_string(dir.path().join("attempts.jsonl")).unwrap();
    assert_eq!(log.lines().count(), 1);
}

#[test]
fn stats_summarizes_sessions() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("sessions.json"), SESSIONS_JSON).unwrap();

    mathdrill(dir.path())
        .args(["stats", "--sessions", "sessions.json", "--now", "2025-01-10T12:00:00Z"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sessions: 3 (2 completed)"))
        .stdout(predicate::str::contains("This week: 2"))
        .stdout(predicate::str::contains("Average accuracy: 80%"))
        .stdout(predicate::str::contains("multiplication"))
        .stdout(predicate::str::contains("Today"))
        .stdout(predicate::str::contains("Yesterday"));
}

#[test]
fn stats_json_output() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("sessions.json"), SESSIONS_JSON).unwrap();

    let output = mathdrill(dir.path())
        .args([
            "stats",
            "--sessions",
            "sessions.json",
            "--now",
            "2025-01-10T12:00:00Z",
            "--format",
            "json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["total_sessions"], 3);
    assert_eq!(summary["modules"][0]["module"], "multiplication");
}

#[test]
fn stats_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    mathdrill(dir.path())
        .args(["stats", "--sessions", "none.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("sessions file not found"));
}

#[test]
fn init_creates_config() {
    let dir = TempDir::new().unwrap();

    mathdrill(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created mathdrill.toml"));

    assert!(dir.path().join("mathdrill.toml").exists());
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    mathdrill(dir.path()).arg("init").assert().success();

    mathdrill(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

// 20/25 = 80%, 9/10 = 90%, 7/10 = 70%: mean 80%
const SESSIONS_JSON: &str = r#"[
    {
        "id": "a",
        "module": "multiplication",
        "mode": "test",
        "started_at": "2025-01-10T09:00:00Z",
        "completed_at": "2025-01-10T09:05:00Z",
        "duration_seconds": 300,
        "correct_count": 20,
        "total_attempts": 25,
        "completed": true
    },
    {
        "id": "b",
        "module": "multiplication",
        "started_at": "2025-01-09T09:00:00Z",
        "completed_at": "2025-01-09T09:04:00Z",
        "duration_seconds": 240,
        "correct_count": 9,
        "total_attempts": 10,
        "completed": true
    },
    {
        "id": "c",
        "module": "spelling",
        "started_at": "2024-12-01T09:00:00Z",
        "correct_count": 7,
        "total_attempts": 10
    }
]"#;
