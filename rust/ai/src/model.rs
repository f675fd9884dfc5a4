//! Versioned JSON persistence for trained tables.
//!
//! ```json
//! {
//!   "format": "blackjack-qtable",
//!   "version": 1,
//!   "meta": { "episodes": 50000, "learning_rate": 0.1, ... },
//!   "entries": [
//!     { "player_total": 20, "dealer_upcard": 10, "usable_ace": false,
//!       "action": "stand", "value": 0.43 }
//!   ]
//! }
//! ```
//!
//! Entries must be unique and inside the state domain. Omitted entries load
//! as `0.0`.

use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use blackjack_engine::player::PlayerAction;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::qtable::QTable;
use crate::state::State;

pub const MODEL_FORMAT: &str = "blackjack-qtable";
pub const MODEL_VERSION: u32 = 1;

/// How a model was produced. Informational only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelMeta {
    pub episodes: u64,
    pub learning_rate: f64,
    pub discount: f64,
    pub seed: Option<u64>,
    pub dealer_hits_soft_17: bool,
    /// RFC3339; filled at save time when absent
    #[serde(default)]
    pub trained_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct ModelEntry {
    player_total: u8,
    dealer_upcard: u8,
    usable_ace: bool,
    action: PlayerAction,
    value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ModelFile {
    format: String,
    version: u32,
    #[serde(default)]
    meta: ModelMeta,
    entries: Vec<ModelEntry>,
}

/// A table together with its provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    pub table: QTable,
    pub meta: ModelMeta,
}

impl Model {
    pub fn new(table: QTable, meta: ModelMeta) -> Self {
        Self { table, meta }
    }

    /// Writes the model as pretty-printed JSON, creating parent directories.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ModelError> {
        let path = path.as_ref();
        let io_err = |source: std::io::Error| ModelError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let mut meta = self.meta.clone();
        if meta.trained_at.is_none() {
            meta.trained_at = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let file = ModelFile {
            format: MODEL_FORMAT.to_string(),
            version: MODEL_VERSION,
            meta,
            entries: self
                .table
                .iter()
                .map(|(s, action, value)| ModelEntry {
                    player_total: s.player_total(),
                    dealer_upcard: s.dealer_upcard(),
                    usable_ace: s.usable_ace(),
                    action,
                    value,
                })
                .collect(),
        };
        let json = serde_json::to_string_pretty(&file)
            .map_err(std::io::Error::other)
            .map_err(io_err)?;
        fs::write(path, json).map_err(io_err)
    }

    /// Reads and validates a model file.
    ///
    /// # Errors
    ///
    /// - [`ModelError::NotFound`] when the path does not exist
    /// - [`ModelError::Malformed`] for empty, non-JSON, wrong-format, duplicate,
    ///   out-of-domain, or non-finite content
    /// - [`ModelError::UnsupportedVersion`] for any version other than 1
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let text = match fs::read_to_string(path) {
            Ok(t) => t,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(ModelError::NotFound {
                    path: path.to_path_buf(),
                });
            }
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                return Err(ModelError::Malformed {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                });
            }
            Err(e) => {
                return Err(ModelError::Io {
                    path: path.to_path_buf(),
                    source: e,
                });
            }
        };
        let malformed = |reason: String| ModelError::Malformed {
            path: path.to_path_buf(),
            reason,
        };
        if text.trim().is_empty() {
            return Err(malformed("file is empty".into()));
        }

        let file: ModelFile = serde_json::from_str(&text).map_err(|e| malformed(e.to_string()))?;
        if file.format != MODEL_FORMAT {
            return Err(malformed(format!(
                "unexpected format tag {:?}",
                file.format
            )));
        }
        if file.version != MODEL_VERSION {
            return Err(ModelError::UnsupportedVersion {
                path: path.to_path_buf(),
                found: file.version,
                expected: MODEL_VERSION,
            });
        }

        let mut table = QTable::new();
        let mut seen = HashSet::new();
        for e in &file.entries {
            let state = State::new(e.player_total, e.dealer_upcard, e.usable_ace)
                .map_err(|err| malformed(err.to_string()))?;
            if !e.value.is_finite() {
                return Err(malformed(format!("non-finite value at {} {}", state, e.action)));
            }
            if !seen.insert((state, e.action)) {
                return Err(malformed(format!("duplicate entry for {} {}", state, e.action)));
            }
            table.set(&state, e.action, e.value);
        }

        Ok(Self {
            table,
            meta: file.meta,
        })
    }
}
