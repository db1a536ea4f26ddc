//! Named configuration presets compared by the benchmark.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::evaluators::ConsistencyMode;

use super::{Config, ConfigError};

/// A named bundle of TTLs, thresholds, and concurrency limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    #[default]
    Default,
    /// Shorter timeout, stricter gate, long-lived caches.
    Fast,
    /// No early exit, strict consistency, short-lived caches.
    Precision,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::Default, Preset::Fast, Preset::Precision];

    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::Default => "default",
            Preset::Fast => "fast",
            Preset::Precision => "precision",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "default" => Ok(Preset::Default),
            "fast" => Ok(Preset::Fast),
            "precision" => Ok(Preset::Precision),
            _ => Err(ConfigError::UnknownPreset {
                value: s.to_string(),
            }),
        }
    }
}

impl Config {
    /// Configuration for a named preset.
    pub fn preset(preset: Preset) -> Self {
        match preset {
            Preset::Default => Self::default(),
            Preset::Fast => Self {
                stage_gate_threshold: 50.0,
                max_processing_time: Duration::from_millis(2_000),
                assessment_cache_ttl: Duration::from_secs(15 * 60),
                domain_cache_ttl: Duration::from_secs(4 * 60 * 60),
                max_cache_entries: 5_000,
                cache_key_prefix_chars: 500,
                ..Self::default()
            },
            Preset::Precision => Self {
                enable_stage_gating: false,
                max_processing_time: Duration::from_millis(10_000),
                max_concurrency: 2,
                assessment_cache_ttl: Duration::from_secs(60),
                domain_cache_ttl: Duration::from_secs(15 * 60),
                cache_key_prefix_chars: 4_000,
                consistency_mode: ConsistencyMode::Strict,
                ..Self::default()
            },
        }
    }
}
