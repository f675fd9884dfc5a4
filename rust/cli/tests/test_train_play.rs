use std::fs;

use blackjack_cli::run;
use blackjack_engine::logger::RoundRecord;

fn run_cli(args: &[&str]) -> (i32, String, String) {
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    let mut argv = vec!["blackjack"];
    argv.extend_from_slice(args);
    let code = run(argv, &mut out, &mut err);
    (
        code,
        String::from_utf8_lossy(&out).into_owned(),
        String::from_utf8_lossy(&err).into_owned(),
    )
}

#[test]
fn train_then_play_round_trips_through_a_model_file() {
    let dir = tempfile::tempdir().unwrap();
    let model = dir.path().join("nested").join("q.json");
    let model_s = model.to_string_lossy().to_string();

    let (code, out, err) = run_cli(&[
        "train",
        "--episodes",
        "3000",
        "--seed",
        "42",
        "--log-interval",
        "0",
        "--output",
        &model_s,
    ]);
    assert_eq!(code, 0, "stderr: {}", err);
    assert!(out.contains("Trained 3000 episodes (seed 42)"), "{}", out);
    assert!(out.contains("Model saved to"));
    assert!(model.exists());

    let doc: serde_json::Value = serde_json::from_str(&fs::read_to_string(&model).unwrap()).unwrap();
    assert_eq!(doc["format"], "blackjack-qtable");
    assert_eq!(doc["version"], 1);
    assert_eq!(doc["meta"]["episodes"], 3000);
    assert_eq!(doc["entries"].as_array().unwrap().len(), 720);

    let (code, out, err) = run_cli(&["play", "--model", &model_s, "--games", "25", "--seed", "7"]);
    assert_eq!(code, 0, "stderr: {}", err);
    let game_lines = out.lines().filter(|l| l.contains("player:")).count();
    assert_eq!(game_lines, 25);
    assert!(out.contains("Games: 25 (seed 7)"));
    assert!(out.contains("Net reward:"));
}

#[test]
fn play_writes_jsonl_records() {
    let dir = tempfile::tempdir().unwrap();
    let model = dir.path().join("q.json").to_string_lossy().to_string();
    let records = dir.path().join("logs").join("games.jsonl");
    let records_s = records.to_string_lossy().to_string();

    let (code, _, err) = run_cli(&[
        "train", "--episodes", "500", "--seed", "1", "--log-interval", "0", "--output", &model,
    ]);
    assert_eq!(code, 0, "{}", err);

    let (code, out, err) = run_cli(&[
        "play", "--model", &model, "--games", "12", "--seed", "3", "--output", &records_s,
    ]);
    assert_eq!(code, 0, "{}", err);
    assert!(out.contains("Records written to"));

    let text = fs::read_to_string(&records).unwrap();
    let parsed: Vec<RoundRecord> = text
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(parsed.len(), 12);
    assert!(parsed.iter().all(|r| r.ts.is_some() && r.seed == Some(3)));
    assert!(parsed[0].game_id.ends_with("-000001"));
}

#[test]
fn play_is_deterministic_with_same_seed() {
    let dir = tempfile::tempdir().unwrap();
    let model = dir.path().join("q.json").to_string_lossy().to_string();
    let (code, _, _) = run_cli(&[
        "train", "--episodes", "800", "--seed", "9", "--log-interval", "0", "--output", &model,
    ]);
    assert_eq!(code, 0);

    let a = run_cli(&["play", "--model", &model, "--games", "40", "--seed", "5"]);
    let b = run_cli(&["play", "--model", &model, "--games", "40", "--seed", "5"]);
    assert_eq!(a.0, 0);
    // Game ids carry today's date; compare everything after the id.
    let strip = |s: &str| -> Vec<String> {
        s.lines()
            .map(|l| l.split_once("  ").map_or(l, |(_, rest)| rest).to_string())
            .collect()
    };
    assert_eq!(strip(&a.1), strip(&b.1));
}

#[test]
fn play_with_missing_model_exits_two_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let model = dir.path().join("missing.json").to_string_lossy().to_string();
    let records = dir.path().join("games.jsonl");
    let records_s = records.to_string_lossy().to_string();

    let (code, out, err) = run_cli(&["play", "--model", &model, "--output", &records_s]);
    assert_eq!(code, 2);
    assert!(out.is_empty(), "stdout should be empty, got {}", out);
    assert!(err.contains("Error: Model file not found"), "{}", err);
    assert!(!records.exists());
}

#[test]
fn play_with_corrupt_model_exits_two() {
    let dir = tempfile::tempdir().unwrap();
    let model = dir.path().join("q.json");
    fs::write(&model, "not a model").unwrap();
    let model_s = model.to_string_lossy().to_string();
    let (code, out, err) = run_cli(&["play", "--model", &model_s]);
    assert_eq!(code, 2);
    assert!(out.is_empty());
    assert!(err.contains("malformed"), "{}", err);
}

#[test]
fn hits_soft_17_is_recorded_in_the_model() {
    let dir = tempfile::tempdir().unwrap();
    let model = dir.path().join("h17.json");
    let model_s = model.to_string_lossy().to_string();
    let (code, _, _) = run_cli(&[
        "train",
        "--episodes",
        "200",
        "--hits-soft-17",
        "--schedule",
        "linear",
        "--log-interval",
        "0",
        "--output",
        &model_s,
    ]);
    assert_eq!(code, 0);
    let doc: serde_json::Value = serde_json::from_str(&fs::read_to_string(&model).unwrap()).unwrap();
    assert_eq!(doc["meta"]["dealer_hits_soft_17"], true);
}
