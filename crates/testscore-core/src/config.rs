//! Global scoring weights and the named presets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Tolerance used when checking that the weights sum to 1.0.
pub const WEIGHT_SUM_TOLERANCE: f64 = 0.001;

/// The three weights that blend the components of a question's score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringConfig {
    pub time_weight: f64,
    pub difficulty_weight: f64,
    pub accuracy_weight: f64,
}

impl ScoringConfig {
    pub const STANDARD: Self = Self::new(0.3, 0.5, 0.2);
    pub const SPEED_FOCUSED: Self = Self::new(0.5, 0.3, 0.2);
    pub const ACCURACY_FOCUSED: Self = Self::new(0.2, 0.3, 0.5);
    pub const DIFFICULTY_FOCUSED: Self = Self::new(0.2, 0.6, 0.2);
    pub const BALANCED_SPEED: Self = Self::new(0.4, 0.4, 0.2);

    pub const fn new(time_weight: f64, difficulty_weight: f64, accuracy_weight: f64) -> Self {
        Self {
            time_weight,
            difficulty_weight,
            accuracy_weight,
        }
    }

    pub fn total(&self) -> f64 {
        self.time_weight + self.difficulty_weight + self.accuracy_weight
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// A named scoring preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoringPreset {
    Standard,
    SpeedFocused,
    AccuracyFocused,
    DifficultyFocused,
    BalancedSpeed,
}

impl ScoringPreset {
    pub const ALL: [ScoringPreset; 5] = [
        ScoringPreset::Standard,
        ScoringPreset::SpeedFocused,
        ScoringPreset::AccuracyFocused,
        ScoringPreset::DifficultyFocused,
        ScoringPreset::BalancedSpeed,
    ];

    pub fn config(self) -> ScoringConfig {
        match self {
            ScoringPreset::Standard => ScoringConfig::STANDARD,
            ScoringPreset::SpeedFocused => ScoringConfig::SPEED_FOCUSED,
            ScoringPreset::AccuracyFocused => ScoringConfig::ACCURACY_FOCUSED,
            ScoringPreset::DifficultyFocused => ScoringConfig::DIFFICULTY_FOCUSED,
            ScoringPreset::BalancedSpeed => ScoringConfig::BALANCED_SPEED,
        }
    }
}

impl fmt::Display for ScoringPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoringPreset::Standard => write!(f, "standard"),
            ScoringPreset::SpeedFocused => write!(f, "speed-focused"),
            ScoringPreset::AccuracyFocused => write!(f, "accuracy-focused"),
            ScoringPreset::DifficultyFocused => write!(f, "difficulty-focused"),
            ScoringPreset::BalancedSpeed => write!(f, "balanced-speed"),
        }
    }
}

impl FromStr for ScoringPreset {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "standard" => Ok(ScoringPreset::Standard),
            "speed-focused" => Ok(ScoringPreset::SpeedFocused),
            "accuracy-focused" => Ok(ScoringPreset::AccuracyFocused),
            "difficulty-focused" => Ok(ScoringPreset::DifficultyFocused),
            "balanced-speed" => Ok(ScoringPreset::BalancedSpeed),
            _ => Err(CoreError::UnknownPreset(s.to_string())),
        }
    }
}

/// Outcome of [`validate_scoring_config`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigValidation {
    /// Whether the weights sum to 1.0 and each lies in `[0, 1]`.
    pub is_valid: bool,
    /// The actual sum of the three weights.
    pub total: f64,
    /// Names of weights outside `[0, 1]`.
    #[serde(default)]
    pub out_of_range: Vec<String>,
}

/// Check a config against the intended constraints without enforcing them.
///
/// Non-normalized weights are still usable for scoring; this only reports.
pub fn validate_scoring_config(config: &ScoringConfig) -> ConfigValidation {
    let total = config.total();

    let out_of_range: Vec<String> = [
        ("timeWeight", config.time_weight),
        ("difficultyWeight", config.difficulty_weight),
        ("accuracyWeight", config.accuracy_weight),
    ]
    .iter()
    .filter(|(_, w)| !(0.0..=1.0).contains(w))
    .map(|(name, _)| name.to_string())
    .collect();

    let is_valid = (total - 1.0).abs() < WEIGHT_SUM_TOLERANCE && out_of_range.is_empty();
    if !is_valid {
        tracing::debug!(total, ?out_of_range, "scoring config does not conform");
    }

    ConfigValidation {
        is_valid,
        total,
        out_of_range,
    }
}
