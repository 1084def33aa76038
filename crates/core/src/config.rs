use serde::{Deserialize, Serialize};

pub const DEFAULT_WINDOW_SECS: f64 = 0.025;
pub const DEFAULT_HOP_SECS: f64 = 0.010;
pub const DEFAULT_SILENCE_THRESHOLD: f64 = 0.1;
pub const DEFAULT_MIN_PAUSE_SECS: f64 = 0.3;
pub const DEFAULT_REMARK_THRESHOLD: f64 = 7.0;
pub const DEFAULT_PRAISE_THRESHOLD: f64 = 8.0;
pub const ENV_SILENCE_THRESHOLD: &str = "TALK_REVIEW_SILENCE_THRESHOLD";
pub const ENV_MIN_PAUSE_SECS: &str = "TALK_REVIEW_MIN_PAUSE_SECS";
pub const ENV_REMARK_THRESHOLD: &str = "TALK_REVIEW_REMARK_THRESHOLD";
pub const ENV_PRAISE_THRESHOLD: &str = "TALK_REVIEW_PRAISE_THRESHOLD";

/// Short-time energy pause detection parameters.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct PauseConfig {
    pub window_secs: f64,
    pub hop_secs: f64,
    /// Normalized RMS below this marks a frame as silent.
    pub silence_threshold: f64,
    pub min_pause_secs: f64,
}

impl PauseConfig {
    pub fn new(silence_threshold: f64, min_pause_secs: f64) -> Result<Self, ConfigError> {
        if !(silence_threshold > 0.0 && silence_threshold < 1.0) {
            return Err(ConfigError::InvalidSilenceThreshold(silence_threshold));
        }
        if !(min_pause_secs.is_finite() && min_pause_secs > 0.0) {
            return Err(ConfigError::InvalidPauseDuration(min_pause_secs));
        }
        Ok(Self {
            silence_threshold,
            min_pause_secs,
            ..Self::default()
        })
    }
}

impl Default for PauseConfig {
    fn default() -> Self {
        Self {
            window_secs: DEFAULT_WINDOW_SECS,
            hop_secs: DEFAULT_HOP_SECS,
            silence_threshold: DEFAULT_SILENCE_THRESHOLD,
            min_pause_secs: DEFAULT_MIN_PAUSE_SECS,
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct RecommendationConfig {
    /// Sub-scores and raw metrics below this trigger a remark.
    pub remark_threshold: f64,
    /// Minimum overall score for the generic positive remark.
    pub praise_threshold: f64,
}

impl RecommendationConfig {
    pub fn new(remark_threshold: f64, praise_threshold: f64) -> Result<Self, ConfigError> {
        check_score_range("remark_threshold", remark_threshold)?;
        check_score_range("praise_threshold", praise_threshold)?;
        Ok(Self {
            remark_threshold,
            praise_threshold,
        })
    }
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            remark_threshold: DEFAULT_REMARK_THRESHOLD,
            praise_threshold: DEFAULT_PRAISE_THRESHOLD,
        }
    }
}

fn check_score_range(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if !(0.0..=10.0).contains(&value) {
        return Err(ConfigError::ThresholdOutOfRange { name, value });
    }
    Ok(())
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct AnalysisConfig {
    pub pauses: PauseConfig,
    pub recommendations: RecommendationConfig,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("silence threshold must be in (0, 1), got {0}")]
    InvalidSilenceThreshold(f64),
    #[error("minimum pause duration must be > 0 s, got {0}")]
    InvalidPauseDuration(f64),
    #[error("{name} must be within [0, 10], got {value}")]
    ThresholdOutOfRange { name: &'static str, value: f64 },
    #[error("{key} is not a number: {value:?}")]
    InvalidNumber { key: String, value: String },
}

pub trait Env {
    fn var(&self, key: &str) -> Option<String>;
}

#[derive(Clone, Debug, Default)]
pub struct StdEnv;

impl Env for StdEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

#[derive(Clone, Debug, Default)]
pub struct MapEnv {
    vars: std::collections::BTreeMap<String, String>,
}

impl MapEnv {
    pub fn with_var(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_owned(), value.to_owned());
        self
    }
}

impl Env for MapEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

/// CLI value first, then the environment, then `default`.
pub fn resolve_f64_with_default(
    cli_value: Option<f64>,
    env_key: &str,
    env: &impl Env,
    default: f64,
) -> Result<f64, ConfigError> {
    if let Some(v) = cli_value {
        return Ok(v);
    }
    match env.var(env_key) {
        Some(raw) => raw
            .trim()
            .parse::<f64>()
            .map_err(|_| ConfigError::InvalidNumber {
                key: env_key.to_owned(),
                value: raw,
            }),
        None => Ok(default),
    }
}
