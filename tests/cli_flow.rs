// End-to-end flows across multiple invocations: answers recorded by
// `rate` must survive into later `score` and `show` runs, and `reset`
// must return the assessment to its template defaults.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn compass(state: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("aliya-compass").expect("binary should exist");
    cmd.arg("--state-dir").arg(state.path());
    cmd
}

#[test]
fn ratings_persist_across_invocations() {
    let state = TempDir::new().expect("temp dir");

    compass(&state)
        .args(["rate", "community-finder", "1=9", "8=9"])
        .assert()
        .success()
        .stdout(predicate::str::contains("question 1 = 9/10"));

    // A later run sees the saved answers.
    compass(&state)
        .args(["show", "community-finder"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[ 9/10]"));

    // With English community and schools both at 9, the top match moves
    // to Beit Shemesh and picks up the anglo bonus.
    compass(&state)
        .args(["score", "community-finder"])
        .assert()
        .stdout(
            predicate::str::contains("### 1. Beit Shemesh (RBS A/G)")
                .and(predicate::str::contains("Anglo Community +12")),
        );
}

#[test]
fn reset_returns_to_defaults() {
    let state = TempDir::new().expect("temp dir");

    compass(&state)
        .args(["rate", "buy-readiness", "1=10", "2=10", "3=10"])
        .assert()
        .success();
    assert!(state.path().join("buy-readiness.json").exists());

    compass(&state)
        .args(["reset", "buy-readiness"])
        .assert()
        .success()
        .stdout(predicate::str::contains("reset to defaults"));
    assert!(!state.path().join("buy-readiness.json").exists());

    // Back to the mid-scale default outcome.
    compass(&state)
        .args(["score", "buy-readiness"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("**50%**"));
}

#[test]
fn non_persisting_assessment_never_writes_state() {
    let state = TempDir::new().expect("temp dir");

    compass(&state)
        .args(["rate", "aliya-readiness", "1=10"])
        .assert()
        .success()
        .stderr(predicate::str::contains("does not save answers"));
    assert!(!state.path().join("aliya-readiness.json").exists());

    // The rating was not retained, so scoring still uses defaults.
    compass(&state)
        .args(["score", "aliya-readiness"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("**50%**"));
}

#[test]
fn corrupt_state_blob_is_ignored() {
    let state = TempDir::new().expect("temp dir");
    std::fs::write(state.path().join("community-finder.json"), "{not json")
        .expect("write blob");

    compass(&state)
        .args(["score", "community-finder"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("**50%**"));
}

#[test]
fn scoring_marks_results_and_rate_still_updates() {
    let state = TempDir::new().expect("temp dir");

    compass(&state)
        .args(["score", "real-estate-readiness"])
        .assert()
        .code(1);

    // Re-rating after a score run works and feeds the next score.
    let sets: Vec<String> = (1..=20).map(|id| format!("{id}=10")).collect();
    let mut cmd = compass(&state);
    cmd.args(["rate", "real-estate-readiness"]);
    cmd.args(&sets);
    cmd.assert().success();

    compass(&state)
        .args(["score", "real-estate-readiness"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Ready to Purchase"));
}
