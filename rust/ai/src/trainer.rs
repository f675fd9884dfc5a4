//! Q-learning training loop.
//!
//! Each episode is one round against the dealer. At every decision point the
//! agent picks an action epsilon-greedily, observes the next state (or the
//! terminal outcome), and applies the one-step TD update to the table.
//! Rounds settled on the deal (either side holds a natural) carry no
//! decision and leave the table untouched.

use blackjack_engine::engine::Engine;
use blackjack_engine::errors::GameError;
use blackjack_engine::game::{Outcome, Tally};
use blackjack_engine::player::PlayerAction;
use blackjack_engine::rules::DealerRules;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::model::ModelMeta;
use crate::qtable::QTable;
use crate::reward::RewardConfig;
use crate::schedule::EpsilonSchedule;
use crate::state::State;

// Keeps exploration draws independent of the deck's stream for the same seed.
const EXPLORATION_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Optional early stop: halt once the per-window win rate stops moving.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConvergenceCheck {
    /// Episodes per measurement window
    pub window: u64,
    /// Largest change in window win rate still counted as flat
    pub tolerance: f64,
    /// Consecutive flat windows required to stop
    pub patience: u32,
}

impl Default for ConvergenceCheck {
    fn default() -> Self {
        Self {
            window: 5_000,
            tolerance: 0.005,
            patience: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingConfig {
    pub episodes: u64,
    /// Alpha
    pub learning_rate: f64,
    /// Gamma
    pub discount: f64,
    pub schedule: EpsilonSchedule,
    pub rules: DealerRules,
    pub rewards: RewardConfig,
    /// `None` draws a random seed; the one used is reported back.
    pub seed: Option<u64>,
    /// Emit a progress event every N episodes (0 disables).
    pub log_interval: u64,
    pub convergence: Option<ConvergenceCheck>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            episodes: 50_000,
            learning_rate: 0.1,
            discount: 1.0,
            schedule: EpsilonSchedule::default(),
            rules: DealerRules::default(),
            rewards: RewardConfig::default(),
            seed: None,
            log_interval: 10_000,
            convergence: None,
        }
    }
}

/// Summary of a finished training run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    /// Episodes actually simulated
    pub episodes: u64,
    pub seed: u64,
    pub tally: Tally,
    pub final_epsilon: f64,
    /// Episode count at which the convergence check fired, if it did
    pub converged_at: Option<u64>,
}

impl TrainingReport {
    /// Provenance block for the saved model.
    pub fn model_meta(&self, config: &TrainingConfig) -> ModelMeta {
        ModelMeta {
            episodes: self.episodes,
            learning_rate: config.learning_rate,
            discount: config.discount,
            seed: Some(self.seed),
            dealer_hits_soft_17: config.rules.hits_soft_17,
            trained_at: None,
        }
    }
}

/// Drives training episodes. Owns the engine and the exploration RNG; the
/// table is borrowed mutably for the length of a run.
#[derive(Debug)]
pub struct Trainer {
    config: TrainingConfig,
    seed: u64,
    engine: Engine,
    rng: ChaCha20Rng,
}

impl Trainer {
    pub fn new(config: TrainingConfig) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        let engine = Engine::new(Some(seed), config.rules);
        let rng = ChaCha20Rng::seed_from_u64(seed ^ EXPLORATION_SALT);
        Self {
            config,
            seed,
            engine,
            rng,
        }
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Runs the configured number of episodes (or until convergence).
    pub fn train(&mut self, table: &mut QTable) -> Result<TrainingReport, GameError> {
        let mut tally = Tally::default();
        let mut detector = self.config.convergence.map(PlateauDetector::new);
        let mut converged_at = None;
        let mut episodes = 0;
        let mut epsilon = self.config.schedule.epsilon_at(0);

        tracing::info!(
            episodes = self.config.episodes,
            learning_rate = self.config.learning_rate,
            discount = self.config.discount,
            seed = self.seed,
            "training started"
        );

        for episode in 0..self.config.episodes {
            epsilon = self.config.schedule.epsilon_at(episode);
            let outcome = self.run_episode(table, epsilon)?;
            tally.record(outcome);
            episodes = episode + 1;

            if self.config.log_interval > 0 && episodes % self.config.log_interval == 0 {
                tracing::info!(
                    episode = episodes,
                    win_rate = tally.win_rate(),
                    epsilon,
                    "training progress"
                );
            }

            if let Some(d) = detector.as_mut()
                && d.observe(outcome)
            {
                tracing::info!(episode = episodes, "win rate plateaued; stopping early");
                converged_at = Some(episodes);
                break;
            }
        }

        tracing::info!(
            episodes,
            win_rate = tally.win_rate(),
            reshuffles = self.engine.reshuffles(),
            "training finished"
        );

        Ok(TrainingReport {
            episodes,
            seed: self.seed,
            tally,
            final_epsilon: epsilon,
            converged_at,
        })
    }

    /// Plays one round, updating `table` at every decision.
    pub fn run_episode(&mut self, table: &mut QTable, epsilon: f64) -> Result<Outcome, GameError> {
        if let Some(outcome) = self.engine.start_round()? {
            return Ok(outcome);
        }
        let alpha = self.config.learning_rate;
        let gamma = self.config.discount;
        let upcard = self
            .engine
            .dealer_upcard()
            .ok_or(GameError::NoRoundInProgress)?;
        let mut state = State::encode(&self.engine.player_hand().value(), upcard)?;

        loop {
            match self.select_action(table, &state, epsilon) {
                PlayerAction::Hit => {
                    let v = self.engine.player_hit()?;
                    if v.bust {
                        let outcome = self.engine.outcome().ok_or(GameError::NoRoundInProgress)?;
                        let reward = self.config.rewards.reward(outcome);
                        table.update(&state, PlayerAction::Hit, reward, None, alpha, gamma);
                        return Ok(outcome);
                    }
                    let next = State::encode(&v, upcard)?;
                    table.update(&state, PlayerAction::Hit, 0.0, Some(&next), alpha, gamma);
                    state = next;
                }
                PlayerAction::Stand => {
                    let outcome = self.engine.player_stand()?;
                    let reward = self.config.rewards.reward(outcome);
                    table.update(&state, PlayerAction::Stand, reward, None, alpha, gamma);
                    return Ok(outcome);
                }
            }
        }
    }

    fn select_action(&mut self, table: &QTable, state: &State, epsilon: f64) -> PlayerAction {
        if epsilon > 0.0 && self.rng.random::<f64>() < epsilon {
            if self.rng.random_bool(0.5) {
                PlayerAction::Hit
            } else {
                PlayerAction::Stand
            }
        } else {
            table.best_action(state)
        }
    }
}

/// Tracks per-window win rates for [`ConvergenceCheck`].
#[derive(Debug)]
struct PlateauDetector {
    check: ConvergenceCheck,
    window: Tally,
    last_rate: Option<f64>,
    flat_windows: u32,
}

impl PlateauDetector {
    fn new(check: ConvergenceCheck) -> Self {
        Self {
            check,
            window: Tally::default(),
            last_rate: None,
            flat_windows: 0,
        }
    }

    /// Returns true once enough consecutive windows were flat.
    fn observe(&mut self, outcome: Outcome) -> bool {
        if self.check.window == 0 {
            return false;
        }
        self.window.record(outcome);
        if self.window.rounds() < self.check.window {
            return false;
        }
        let rate = self.window.win_rate();
        self.window = Tally::default();
        match self.last_rate {
            Some(prev) if (rate - prev).abs() < self.check.tolerance => self.flat_windows += 1,
            _ => self.flat_windows = 0,
        }
        self.last_rate = Some(rate);
        self.flat_windows >= self.check.patience
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small(seed: u64, episodes: u64) -> TrainingConfig {
        TrainingConfig {
            episodes,
            seed: Some(seed),
            log_interval: 0,
            ..TrainingConfig::default()
        }
    }

    #[test]
    fn runs_exact_episode_count_without_convergence() {
        let mut q = QTable::new();
        let report = Trainer::new(small(1, 1_000)).train(&mut q).unwrap();
        assert_eq!(report.episodes, 1_000);
        assert_eq!(report.tally.rounds(), 1_000);
        assert_eq!(report.seed, 1);
        assert!(report.converged_at.is_none());
        assert_ne!(q, QTable::new(), "training should touch the table");
    }

    #[test]
    fn same_seed_produces_same_table() {
        let mut a = QTable::new();
        let mut b = QTable::new();
        let ra = Trainer::new(small(77, 2_000)).train(&mut a).unwrap();
        let rb = Trainer::new(small(77, 2_000)).train(&mut b).unwrap();
        assert_eq!(a, b);
        assert_eq!(ra, rb);
    }

    #[test]
    fn full_exploration_visits_both_actions() {
        let mut q = QTable::new();
        let mut cfg = small(5, 5_000);
        cfg.schedule = EpsilonSchedule::constant(1.0).unwrap();
        Trainer::new(cfg).train(&mut q).unwrap();
        let s = State::new(12, 10, false).unwrap();
        assert_ne!(q.get(&s, PlayerAction::Hit), 0.0);
        assert_ne!(q.get(&s, PlayerAction::Stand), 0.0);
    }

    #[test]
    fn plateau_detector_fires_after_patience_flat_windows() {
        let mut d = PlateauDetector::new(ConvergenceCheck {
            window: 2,
            tolerance: 0.01,
            patience: 2,
        });
        let seq = [
            Outcome::Win,
            Outcome::Loss, // window 1: 0.5
            Outcome::Loss,
            Outcome::Win, // window 2: 0.5, flat 1
        ];
        for o in seq {
            assert!(!d.observe(o));
        }
        assert!(!d.observe(Outcome::Blackjack));
        assert!(d.observe(Outcome::Push), "third window at 0.5 is the second flat one");
    }

    #[test]
    fn convergence_check_can_stop_early() {
        let mut q = QTable::new();
        let mut cfg = small(3, 200_000);
        cfg.convergence = Some(ConvergenceCheck {
            window: 1_000,
            tolerance: 1.0,
            patience: 1,
        });
        let report = Trainer::new(cfg).train(&mut q).unwrap();
        assert_eq!(report.converged_at, Some(2_000));
        assert_eq!(report.episodes, 2_000);
    }
}
