use serde::{Deserialize, Serialize};
use std::fs;

pub const DEFAULT_MODEL_PATH: &str = "models/qtable.json";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub seed: Option<u64>,
    pub episodes: u64,
    pub games: u64,
    pub learning_rate: f64,
    pub discount: f64,
    pub epsilon_start: f64,
    pub epsilon_floor: f64,
    pub hits_soft_17: bool,
    pub model: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub seed: ValueSource,
    pub episodes: ValueSource,
    pub games: ValueSource,
    pub learning_rate: ValueSource,
    pub discount: ValueSource,
    pub epsilon_start: ValueSource,
    pub epsilon_floor: ValueSource,
    pub hits_soft_17: ValueSource,
    pub model: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            seed: ValueSource::Default,
            episodes: ValueSource::Default,
            games: ValueSource::Default,
            learning_rate: ValueSource::Default,
            discount: ValueSource::Default,
            epsilon_start: ValueSource::Default,
            epsilon_floor: ValueSource::Default,
            hits_soft_17: ValueSource::Default,
            model: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            episodes: 50_000,
            games: 1_000,
            learning_rate: 0.1,
            discount: 1.0,
            epsilon_start: 1.0,
            epsilon_floor: 0.05,
            hits_soft_17: false,
            model: DEFAULT_MODEL_PATH.into(),
        }
    }
}

impl Config {
    /// Checks hyperparameter ranges. Also used after flag overrides.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "learning_rate must be in (0, 1], got {}",
                self.learning_rate
            )));
        }
        if !(0.0..=1.0).contains(&self.discount) {
            return Err(ConfigError::Invalid(format!(
                "discount must be in [0, 1], got {}",
                self.discount
            )));
        }
        for (name, v) in [
            ("epsilon_start", self.epsilon_start),
            ("epsilon_floor", self.epsilon_floor),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(ConfigError::Invalid(format!(
                    "{} must be in [0, 1], got {}",
                    name, v
                )));
            }
        }
        if self.epsilon_floor > self.epsilon_start {
            return Err(ConfigError::Invalid(format!(
                "epsilon_floor ({}) must not exceed epsilon_start ({})",
                self.epsilon_floor, self.epsilon_start
            )));
        }
        if self.episodes == 0 {
            return Err(ConfigError::Invalid("episodes must be >= 1".into()));
        }
        if self.games == 0 {
            return Err(ConfigError::Invalid("games must be >= 1".into()));
        }
        if self.model.trim().is_empty() {
            return Err(ConfigError::Invalid("model path must not be empty".into()));
        }
        Ok(())
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => write!(f, "{}", msg),
        }
    }
}

pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

/// Resolves defaults, then the `BLACKJACK_CONFIG` file, then `BLACKJACK_*`
/// environment variables. Command-line flags are applied by each command.
pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var("BLACKJACK_CONFIG")
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        apply_file(&mut cfg, &mut sources, f);
    }

    if let Some(v) = env_parsed::<u64>("BLACKJACK_SEED", "seed")? {
        cfg.seed = Some(v);
        sources.seed = ValueSource::Env;
    }
    if let Some(v) = env_parsed("BLACKJACK_EPISODES", "episodes")? {
        cfg.episodes = v;
        sources.episodes = ValueSource::Env;
    }
    if let Some(v) = env_parsed("BLACKJACK_GAMES", "games")? {
        cfg.games = v;
        sources.games = ValueSource::Env;
    }
    if let Some(v) = env_parsed("BLACKJACK_LEARNING_RATE", "learning_rate")? {
        cfg.learning_rate = v;
        sources.learning_rate = ValueSource::Env;
    }
    if let Some(v) = env_parsed("BLACKJACK_DISCOUNT", "discount")? {
        cfg.discount = v;
        sources.discount = ValueSource::Env;
    }
    if let Some(v) = env_parsed("BLACKJACK_EPSILON_START", "epsilon_start")? {
        cfg.epsilon_start = v;
        sources.epsilon_start = ValueSource::Env;
    }
    if let Some(v) = env_parsed("BLACKJACK_EPSILON_FLOOR", "epsilon_floor")? {
        cfg.epsilon_floor = v;
        sources.epsilon_floor = ValueSource::Env;
    }
    if let Ok(h17) = std::env::var("BLACKJACK_HITS_SOFT_17")
        && !h17.is_empty()
    {
        cfg.hits_soft_17 =
            parse_bool(&h17).ok_or_else(|| ConfigError::Invalid("Invalid hits_soft_17".into()))?;
        sources.hits_soft_17 = ValueSource::Env;
    }
    if let Ok(model) = std::env::var("BLACKJACK_MODEL")
        && !model.is_empty()
    {
        cfg.model = model;
        sources.model = ValueSource::Env;
    }

    cfg.validate()?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    episodes: Option<u64>,
    #[serde(default)]
    games: Option<u64>,
    #[serde(default)]
    learning_rate: Option<f64>,
    #[serde(default)]
    discount: Option<f64>,
    #[serde(default)]
    epsilon_start: Option<f64>,
    #[serde(default)]
    epsilon_floor: Option<f64>,
    #[serde(default)]
    hits_soft_17: Option<bool>,
    #[serde(default)]
    model: Option<String>,
}

fn apply_file(cfg: &mut Config, sources: &mut ConfigSources, f: FileConfig) {
    if let Some(v) = f.seed {
        cfg.seed = Some(v);
        sources.seed = ValueSource::File;
    }
    if let Some(v) = f.episodes {
        cfg.episodes = v;
        sources.episodes = ValueSource::File;
    }
    if let Some(v) = f.games {
        cfg.games = v;
        sources.games = ValueSource::File;
    }
    if let Some(v) = f.learning_rate {
        cfg.learning_rate = v;
        sources.learning_rate = ValueSource::File;
    }
    if let Some(v) = f.discount {
        cfg.discount = v;
        sources.discount = ValueSource::File;
    }
    if let Some(v) = f.epsilon_start {
        cfg.epsilon_start = v;
        sources.epsilon_start = ValueSource::File;
    }
    if let Some(v) = f.epsilon_floor {
        cfg.epsilon_floor = v;
        sources.epsilon_floor = ValueSource::File;
    }
    if let Some(v) = f.hits_soft_17 {
        cfg.hits_soft_17 = v;
        sources.hits_soft_17 = ValueSource::File;
    }
    if let Some(v) = f.model {
        cfg.model = v;
        sources.model = ValueSource::File;
    }
}

/// Reads and parses an environment variable; unset or empty means `None`.
fn env_parsed<T: std::str::FromStr>(var: &str, name: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(var) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(format!("Invalid {}: {:?}", name, raw))),
        _ => Ok(None),
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}
