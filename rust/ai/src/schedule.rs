//! Exploration-rate schedules.

use serde::{Deserialize, Serialize};

use crate::errors::ScheduleError;

/// Shape of the epsilon curve across training episodes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DecayKind {
    /// Epsilon stays at `start`.
    Constant,
    /// Straight line from `start` to `floor` over `decay_episodes`.
    Linear { decay_episodes: u64 },
    /// `start * rate^episode`, clamped at `floor`. `rate` lies in (0, 1].
    Exponential { rate: f64 },
}

/// Epsilon as a pure function of the episode index.
///
/// Only valid schedules can be built, so `epsilon_at` never increases and
/// never drops below the floor.
///
/// # Examples
///
/// ```
/// use blackjack_ai::schedule::{DecayKind, EpsilonSchedule};
///
/// let s = EpsilonSchedule::new(1.0, 0.1, DecayKind::Linear { decay_episodes: 100 }).unwrap();
/// assert_eq!(s.epsilon_at(0), 1.0);
/// assert!((s.epsilon_at(50) - 0.55).abs() < 1e-12);
/// assert_eq!(s.epsilon_at(1_000), 0.1);
///
/// assert!(EpsilonSchedule::new(1.0, 0.1, DecayKind::Exponential { rate: 1.01 }).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSchedule")]
pub struct EpsilonSchedule {
    start: f64,
    floor: f64,
    kind: DecayKind,
}

#[derive(Deserialize)]
struct RawSchedule {
    start: f64,
    floor: f64,
    kind: DecayKind,
}

impl TryFrom<RawSchedule> for EpsilonSchedule {
    type Error = ScheduleError;

    fn try_from(raw: RawSchedule) -> Result<Self, Self::Error> {
        Self::new(raw.start, raw.floor, raw.kind)
    }
}

impl Default for EpsilonSchedule {
    fn default() -> Self {
        Self {
            start: 1.0,
            floor: 0.05,
            kind: DecayKind::Exponential { rate: 0.9995 },
        }
    }
}

fn is_probability(p: f64) -> bool {
    (0.0..=1.0).contains(&p)
}

impl EpsilonSchedule {
    /// # Errors
    ///
    /// `start` and `floor` must lie in [0, 1] with `floor <= start`, and an
    /// exponential `rate` must lie in (0, 1].
    pub fn new(start: f64, floor: f64, kind: DecayKind) -> Result<Self, ScheduleError> {
        if !is_probability(start) {
            return Err(ScheduleError::OutOfRange { name: "start", value: start });
        }
        if !is_probability(floor) {
            return Err(ScheduleError::OutOfRange { name: "floor", value: floor });
        }
        if floor > start {
            return Err(ScheduleError::FloorAboveStart { start, floor });
        }
        if let DecayKind::Exponential { rate } = kind {
            if !(rate > 0.0 && rate <= 1.0) {
                return Err(ScheduleError::InvalidRate(rate));
            }
        }
        Ok(Self { start, floor, kind })
    }

    /// Fixed epsilon, e.g. `0.0` for greedy play.
    pub fn constant(epsilon: f64) -> Result<Self, ScheduleError> {
        Self::new(epsilon, epsilon, DecayKind::Constant)
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn floor(&self) -> f64 {
        self.floor
    }

    pub fn kind(&self) -> DecayKind {
        self.kind
    }

    pub fn epsilon_at(&self, episode: u64) -> f64 {
        let raw = match self.kind {
            DecayKind::Constant => self.start,
            DecayKind::Linear { decay_episodes } => {
                if decay_episodes == 0 {
                    self.floor
                } else {
                    let progress = (episode as f64 / decay_episodes as f64).min(1.0);
                    self.start - (self.start - self.floor) * progress
                }
            }
            DecayKind::Exponential { rate } => {
                // powi takes i32; past that many episodes the curve is flat anyway
                let n = episode.min(i32::MAX as u64) as i32;
                self.start * rate.powi(n)
            }
        };
        raw.max(self.floor)
    }
}
