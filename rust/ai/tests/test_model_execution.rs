use std::fs;

use blackjack_ai::errors::{ExecutionError, ModelError};
use blackjack_ai::executor::{ExecutionConfig, load_and_play, play_games};
use blackjack_ai::greedy::GreedyPolicy;
use blackjack_ai::model::{Model, ModelMeta};
use blackjack_ai::qtable::QTable;
use blackjack_ai::trainer::{Trainer, TrainingConfig};

fn exec(games: u64) -> ExecutionConfig {
    ExecutionConfig {
        games,
        seed: Some(314),
        ..ExecutionConfig::default()
    }
}

#[test]
fn missing_model_plays_no_games() {
    let dir = tempfile::tempdir().unwrap();
    let mut rounds = 0;
    let err = load_and_play(dir.path().join("absent.json"), &exec(10), |_| rounds += 1).unwrap_err();
    assert!(matches!(err, ExecutionError::Model(ModelError::NotFound { .. })), "{err}");
    assert_eq!(rounds, 0);
}

#[test]
fn corrupt_model_plays_no_games() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("q.json");
    fs::write(&path, "{\"format\":\"blackjack-qtable\",\"version\":1,\"entries\":[").unwrap();
    let mut rounds = 0;
    let err = load_and_play(&path, &exec(10), |_| rounds += 1).unwrap_err();
    assert!(matches!(err, ExecutionError::Model(ModelError::Malformed { .. })), "{err}");
    assert_eq!(rounds, 0);
}

#[test]
fn saved_model_replays_like_the_in_memory_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out").join("q.json");

    let config = TrainingConfig {
        episodes: 4_000,
        seed: Some(8),
        log_interval: 0,
        ..TrainingConfig::default()
    };
    let mut table = QTable::new();
    let report = Trainer::new(config.clone()).train(&mut table).unwrap();
    Model::new(table.clone(), report.model_meta(&config))
        .save(&path)
        .unwrap();

    let loaded = Model::load(&path).unwrap();
    assert_eq!(loaded.table, table);
    assert_eq!(loaded.meta.episodes, 4_000);
    assert_eq!(loaded.meta.seed, Some(8));

    let direct = play_games(&GreedyPolicy::new(&table), &exec(500), |_| {}).unwrap();
    let from_disk = load_and_play(&path, &exec(500), |_| {}).unwrap();
    assert_eq!(direct.tally, from_disk.tally);
    assert_eq!(direct.net_reward, from_disk.net_reward);
}

#[test]
fn round_records_carry_sequential_ids() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("q.json");
    Model::new(QTable::new(), ModelMeta::default()).save(&path).unwrap();

    let mut ids = Vec::new();
    let report = load_and_play(&path, &exec(3), |r| ids.push(r.game_id.clone())).unwrap();
    assert_eq!(report.games(), 3);
    assert!(ids[0].ends_with("-000001"));
    assert!(ids[2].ends_with("-000003"));
}
