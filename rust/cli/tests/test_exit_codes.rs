//! Exit code contract: 0 success, 2 error, 130 interrupted.
//! Errors go to stderr, never stdout.

use blackjack_cli::run;
use serial_test::serial;

fn codes(args: &[&str]) -> (i32, Vec<u8>, Vec<u8>) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let mut argv = vec!["blackjack"];
    argv.extend_from_slice(args);
    let code = run(argv, &mut out, &mut err);
    (code, out, err)
}

#[test]
fn deal_succeeds() {
    let (code, out, err) = codes(&["deal", "--seed", "42"]);
    assert_eq!(code, 0);
    assert!(!out.is_empty());
    assert!(err.is_empty());
}

#[test]
fn help_goes_to_stdout_with_zero() {
    let (code, out, _) = codes(&["--help"]);
    assert_eq!(code, 0);
    let s = String::from_utf8(out).unwrap();
    assert!(s.contains("train"));
    assert!(s.contains("policy"));
}

#[test]
fn unknown_command_lists_commands_on_stderr() {
    let (code, out, err) = codes(&["fly"]);
    assert_eq!(code, 2);
    assert!(out.is_empty());
    let s = String::from_utf8(err).unwrap();
    assert!(s.contains("Commands:"));
    for c in ["train", "play", "eval", "policy", "deal", "cfg"] {
        assert!(s.contains(&format!("  {}", c)), "missing {}", c);
    }
}

#[test]
#[serial]
fn invalid_hyperparameters_return_two() {
    let dir = tempfile::tempdir().unwrap();
    let model = dir.path().join("q.json").to_string_lossy().to_string();
    for bad in [
        vec!["--alpha", "0"],
        vec!["--alpha", "1.5"],
        vec!["--gamma", "2"],
        vec!["--epsilon-start", "0.1", "--epsilon-floor", "0.5"],
        vec!["--episodes", "0"],
        vec!["--decay", "1.5"],
    ] {
        let mut args = vec!["train", "--output", model.as_str(), "--log-interval", "0"];
        args.extend(bad.iter().copied());
        let (code, out, err) = codes(&args);
        assert_eq!(code, 2, "{:?} should fail", bad);
        assert!(out.is_empty(), "{:?} wrote to stdout", bad);
        assert!(String::from_utf8(err).unwrap().starts_with("Error: "));
    }
    assert!(!std::path::Path::new(&model).exists());
}

#[test]
fn zero_games_returns_two() {
    let (code, _, err) = codes(&["play", "--games", "0"]);
    assert_eq!(code, 2);
    assert!(String::from_utf8(err).unwrap().contains("games must be >= 1"));
}

#[test]
#[serial]
fn interrupted_training_saves_partial_model_and_returns_130() {
    let dir = tempfile::tempdir().unwrap();
    let model = dir.path().join("partial.json");
    let model_s = model.to_string_lossy().to_string();
    unsafe {
        std::env::set_var("BLACKJACK_TRAIN_BREAK_AFTER", "250");
    }
    let (code, out, err) = codes(&[
        "train", "--episodes", "1000", "--seed", "4", "--log-interval", "0", "--output", &model_s,
    ]);
    unsafe {
        std::env::remove_var("BLACKJACK_TRAIN_BREAK_AFTER");
    }
    assert_eq!(code, 130);
    assert!(String::from_utf8(out).unwrap().contains("Trained 250 episodes"));
    assert!(String::from_utf8(err).unwrap().contains("saved 250/1000 episodes"));

    let doc: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&model).unwrap()).unwrap();
    assert_eq!(doc["meta"]["episodes"], 250);
}
