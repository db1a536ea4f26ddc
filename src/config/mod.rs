//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `ASSAY_*` environment variables, or
//! start from a named [`Preset`].

pub mod error;
pub mod preset;

#[cfg(test)]
mod tests;

pub use error::ConfigError;
pub use preset::Preset;

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::constants::{
    DEFAULT_ASSESSMENT_TTL, DEFAULT_CACHE_KEY_PREFIX_CHARS, DEFAULT_CLEANUP_INTERVAL,
    DEFAULT_DOMAIN_TTL, DEFAULT_MAX_CACHE_ENTRIES, DEFAULT_MAX_CONCURRENCY,
    DEFAULT_MAX_PROCESSING_TIME, DEFAULT_STAGE_GATE_THRESHOLD, MAX_SCORE, MIN_SCORE,
};
use crate::evaluators::ConsistencyMode;
use crate::source::{AnalyzerConfig, DomainCacheMode};

/// Engine configuration.
///
/// Use [`Config::from_env`] to read `ASSAY_*` overrides on top of defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Run the four evaluators concurrently. Default: `true`.
    pub enable_parallel_processing: bool,

    /// Stop after source reliability when it scores below the threshold. Default: `true`.
    pub enable_stage_gating: bool,

    /// Early-exit threshold in `[0, 100]`. Default: `40`.
    pub stage_gate_threshold: f64,

    /// Enables both the per-domain and the whole-assessment cache. Default: `true`.
    pub enable_caching: bool,

    /// Budget for the parallel fan-out before falling back to sequential. Default: `5s`.
    pub max_processing_time: Duration,

    /// Evaluators allowed to run at once in parallel mode. Default: `4`.
    pub max_concurrency: usize,

    /// Lifetime of a memoized assessment. Default: `5 min`.
    pub assessment_cache_ttl: Duration,

    /// Lifetime of a memoized domain score. Default: `1 h`.
    pub domain_cache_ttl: Duration,

    /// Capacity of each cache. Default: `1000`.
    pub max_cache_entries: u64,

    /// Characters of content that feed the assessment cache key. Default: `1000`.
    pub cache_key_prefix_chars: usize,

    /// What the domain cache stores. Default: [`DomainCacheMode::Composite`].
    pub domain_cache_mode: DomainCacheMode,

    /// Base score used by the consistency evaluator. Default: [`ConsistencyMode::Standard`].
    pub consistency_mode: ConsistencyMode,

    /// Period of the background cache sweep. Default: `60s`.
    pub cleanup_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enable_parallel_processing: true,
            enable_stage_gating: true,
            stage_gate_threshold: DEFAULT_STAGE_GATE_THRESHOLD,
            enable_caching: true,
            max_processing_time: DEFAULT_MAX_PROCESSING_TIME,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            assessment_cache_ttl: DEFAULT_ASSESSMENT_TTL,
            domain_cache_ttl: DEFAULT_DOMAIN_TTL,
            max_cache_entries: DEFAULT_MAX_CACHE_ENTRIES,
            cache_key_prefix_chars: DEFAULT_CACHE_KEY_PREFIX_CHARS,
            domain_cache_mode: DomainCacheMode::default(),
            consistency_mode: ConsistencyMode::default(),
            cleanup_interval: DEFAULT_CLEANUP_INTERVAL,
        }
    }
}

impl Config {
    const ENV_PARALLEL: &'static str = "ASSAY_PARALLEL";
    const ENV_STAGE_GATING: &'static str = "ASSAY_STAGE_GATING";
    const ENV_STAGE_GATE_THRESHOLD: &'static str = "ASSAY_STAGE_GATE_THRESHOLD";
    const ENV_CACHING: &'static str = "ASSAY_CACHING";
    const ENV_MAX_PROCESSING_MS: &'static str = "ASSAY_MAX_PROCESSING_MS";
    const ENV_MAX_CONCURRENCY: &'static str = "ASSAY_MAX_CONCURRENCY";
    const ENV_ASSESSMENT_TTL_SECS: &'static str = "ASSAY_ASSESSMENT_TTL_SECS";
    const ENV_DOMAIN_TTL_SECS: &'static str = "ASSAY_DOMAIN_TTL_SECS";
    const ENV_MAX_CACHE_ENTRIES: &'static str = "ASSAY_MAX_CACHE_ENTRIES";
    const ENV_CACHE_KEY_PREFIX: &'static str = "ASSAY_CACHE_KEY_PREFIX";
    const ENV_DOMAIN_CACHE_MODE: &'static str = "ASSAY_DOMAIN_CACHE_MODE";
    const ENV_CONSISTENCY_MODE: &'static str = "ASSAY_CONSISTENCY_MODE";
    const ENV_CLEANUP_INTERVAL_SECS: &'static str = "ASSAY_CLEANUP_INTERVAL_SECS";

    /// Loads configuration from environment variables (falling back to defaults).
    ///
    /// A malformed threshold or timeout is an error; other malformed values are ignored.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let stage_gate_threshold = Self::parse_threshold_from_env(defaults.stage_gate_threshold)?;
        let max_processing_time = Self::parse_timeout_from_env(defaults.max_processing_time)?;

        Ok(Self {
            enable_parallel_processing: Self::parse_bool_from_env(
                Self::ENV_PARALLEL,
                defaults.enable_parallel_processing,
            ),
            enable_stage_gating: Self::parse_bool_from_env(
                Self::ENV_STAGE_GATING,
                defaults.enable_stage_gating,
            ),
            stage_gate_threshold,
            enable_caching: Self::parse_bool_from_env(Self::ENV_CACHING, defaults.enable_caching),
            max_processing_time,
            max_concurrency: Self::parse_from_env(
                Self::ENV_MAX_CONCURRENCY,
                defaults.max_concurrency,
            ),
            assessment_cache_ttl: Self::parse_secs_from_env(
                Self::ENV_ASSESSMENT_TTL_SECS,
                defaults.assessment_cache_ttl,
            ),
            domain_cache_ttl: Self::parse_secs_from_env(
                Self::ENV_DOMAIN_TTL_SECS,
                defaults.domain_cache_ttl,
            ),
            max_cache_entries: Self::parse_from_env(
                Self::ENV_MAX_CACHE_ENTRIES,
                defaults.max_cache_entries,
            ),
            cache_key_prefix_chars: Self::parse_from_env(
                Self::ENV_CACHE_KEY_PREFIX,
                defaults.cache_key_prefix_chars,
            ),
            domain_cache_mode: Self::parse_from_env(
                Self::ENV_DOMAIN_CACHE_MODE,
                defaults.domain_cache_mode,
            ),
            consistency_mode: Self::parse_from_env(
                Self::ENV_CONSISTENCY_MODE,
                defaults.consistency_mode,
            ),
            cleanup_interval: Self::parse_secs_from_env(
                Self::ENV_CLEANUP_INTERVAL_SECS,
                defaults.cleanup_interval,
            ),
        })
    }

    /// Checks ranges and non-zero invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_SCORE..=MAX_SCORE).contains(&self.stage_gate_threshold) {
            return Err(ConfigError::InvalidThreshold {
                value: self.stage_gate_threshold,
            });
        }

        let zero_checks = [
            ("max_processing_time", self.max_processing_time.is_zero()),
            ("max_concurrency", self.max_concurrency == 0),
            ("assessment_cache_ttl", self.assessment_cache_ttl.is_zero()),
            ("domain_cache_ttl", self.domain_cache_ttl.is_zero()),
            ("max_cache_entries", self.max_cache_entries == 0),
            ("cache_key_prefix_chars", self.cache_key_prefix_chars == 0),
            ("cleanup_interval", self.cleanup_interval.is_zero()),
        ];
        if let Some(&(field, _)) = zero_checks.iter().find(|(_, is_zero)| *is_zero) {
            return Err(ConfigError::ZeroValue { field });
        }

        Ok(())
    }

    /// Settings for the per-domain reliability cache.
    pub fn analyzer_config(&self) -> AnalyzerConfig {
        AnalyzerConfig {
            caching_enabled: self.enable_caching,
            cache_mode: self.domain_cache_mode,
            ttl: self.domain_cache_ttl,
            capacity: self.max_cache_entries,
        }
    }

    fn parse_threshold_from_env(default: f64) -> Result<f64, ConfigError> {
        match env::var(Self::ENV_STAGE_GATE_THRESHOLD) {
            Ok(value) => {
                let threshold: f64 =
                    value
                        .trim()
                        .parse()
                        .map_err(|e| ConfigError::ThresholdParseError {
                            value: value.clone(),
                            source: e,
                        })?;

                if !(MIN_SCORE..=MAX_SCORE).contains(&threshold) {
                    return Err(ConfigError::InvalidThreshold { value: threshold });
                }

                Ok(threshold)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_timeout_from_env(default: Duration) -> Result<Duration, ConfigError> {
        match env::var(Self::ENV_MAX_PROCESSING_MS) {
            Ok(value) => {
                let millis: u64 =
                    value
                        .trim()
                        .parse()
                        .map_err(|e| ConfigError::InvalidDuration {
                            value: value.clone(),
                            source: e,
                        })?;

                if millis == 0 {
                    return Err(ConfigError::ZeroValue {
                        field: "max_processing_time",
                    });
                }

                Ok(Duration::from_millis(millis))
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bool_from_env(var_name: &str, default: bool) -> bool {
        match env::var(var_name)
            .map(|v| v.trim().to_lowercase())
            .as_deref()
        {
            Ok("1" | "true" | "yes" | "on") => true,
            Ok("0" | "false" | "no" | "off") => false,
            _ => default,
        }
    }

    fn parse_secs_from_env(var_name: &str, default: Duration) -> Duration {
        env::var(var_name)
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(default)
    }

    fn parse_from_env<T: FromStr>(var_name: &str, default: T) -> T {
        env::var(var_name)
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }
}
