use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::logging::LogConfig;
use crate::models::TrainingDay;
use crate::progression::round_to_half;
use crate::schedule;
use crate::session::FALLBACK_REST_SECONDS;
use crate::timer::DEFAULT_GRACE_TICKS;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application metadata
    pub metadata: ConfigMetadata,

    /// Rest timer behaviour
    #[serde(default)]
    pub timer: TimerSettings,

    /// Program display defaults
    #[serde(default)]
    pub program: ProgramSettings,

    /// Logging output
    #[serde(default)]
    pub logging: LogConfig,
}

/// Configuration metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigMetadata {
    /// Configuration format version
    pub version: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

/// Rest timer settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerSettings {
    /// Play a sound when the rest is over
    pub sound_enabled: bool,

    /// Vibrate when the rest is over
    pub vibration_enabled: bool,

    /// Start the rest timer as soon as a set is logged
    pub auto_start: bool,

    /// Seconds the completed timer stays visible
    pub grace_seconds: u32,

    /// Rest used for exercises without a rest time
    pub default_rest_seconds: u32,
}

impl Default for TimerSettings {
    fn default() -> Self {
        TimerSettings {
            sound_enabled: true,
            vibration_enabled: true,
            auto_start: true,
            grace_seconds: DEFAULT_GRACE_TICKS,
            default_rest_seconds: FALLBACK_REST_SECONDS,
        }
    }
}

/// Weight unit shown next to loads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    Kg,
    Lb,
}

/// Pounds per kilogram
pub const LB_PER_KG: Decimal = dec!(2.2046);

impl WeightUnit {
    /// Convert a program load (authored in kg) for display.
    ///
    /// Pounds snap to the same 0.5 grid as the program.
    pub fn from_kg(self, kg: Decimal) -> Decimal {
        match self {
            WeightUnit::Kg => kg,
            WeightUnit::Lb => round_to_half(kg * LB_PER_KG),
        }
    }

    /// Convert an aggregate load (sets x reps x weight) to a whole unit
    pub fn total_from_kg(self, kg: Decimal) -> Decimal {
        match self {
            WeightUnit::Kg => kg,
            WeightUnit::Lb => (kg * LB_PER_KG)
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero),
        }
    }

    /// Convert a user-entered weight back to kg for storage
    pub fn to_kg(self, value: Decimal) -> Decimal {
        match self {
            WeightUnit::Kg => value,
            WeightUnit::Lb => (value / LB_PER_KG).round_dp(2),
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeightUnit::Kg => write!(f, "kg"),
            WeightUnit::Lb => write!(f, "lb"),
        }
    }
}

/// Program display defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgramSettings {
    /// Week shown when none is given
    pub current_week: u32,

    /// Day shown when none is given
    pub default_day: TrainingDay,

    pub weight_unit: WeightUnit,

    /// Where workout sessions are saved
    pub session_dir: PathBuf,
}

impl Default for ProgramSettings {
    fn default() -> Self {
        ProgramSettings {
            current_week: schedule::FIRST_WEEK,
            default_day: TrainingDay::Sunday,
            weight_unit: WeightUnit::Kg,
            session_dir: AppConfig::config_dir().join("sessions"),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        let now = Utc::now();

        AppConfig {
            metadata: ConfigMetadata {
                version: "1.0".to_string(),
                created_at: now,
                updated_at: now,
            },
            timer: TimerSettings::default(),
            program: ProgramSettings::default(),
            logging: LogConfig::default(),
        }
    }
}

/// Configuration management implementation
impl AppConfig {
    /// Load configuration from TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: AppConfig =
            toml::from_str(&content).with_context(|| "Failed to parse TOML configuration")?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save_to_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.metadata.updated_at = Utc::now();

        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        let toml_content = toml::to_string_pretty(self)
            .with_context(|| "Failed to serialize configuration to TOML")?;

        fs::write(&path, toml_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        Ok(())
    }

    /// Reject settings the program cannot honour
    pub fn validate(&self) -> Result<()> {
        schedule::ensure_week(self.program.current_week)
            .with_context(|| "Invalid program.current_week")?;

        if self.timer.default_rest_seconds == 0 {
            anyhow::bail!("timer.default_rest_seconds must be greater than zero");
        }

        Ok(())
    }

    /// `~/.liftrs`
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".liftrs")
    }

    /// Get default configuration file path
    pub fn default_config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Load from `path` (or the default location), falling back to defaults
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let config_path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::default_config_path);

        match Self::load_from_file(&config_path) {
            Ok(config) => config,
            Err(e) => {
                tracing::debug!(
                    path = %config_path.display(),
                    error = %e,
                    "Using default configuration"
                );
                Self::default()
            }
        }
    }
}
