use super::*;
use serial_test::serial;
use std::env;
use std::time::Duration;

fn with_env_vars<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, value) in vars {
        unsafe { env::set_var(key, value) };
    }

    let result = f();

    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, _) in vars {
        unsafe { env::remove_var(key) };
    }

    result
}

fn clear_assay_env() {
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    unsafe {
        env::remove_var("ASSAY_PARALLEL");
        env::remove_var("ASSAY_STAGE_GATING");
        env::remove_var("ASSAY_STAGE_GATE_THRESHOLD");
        env::remove_var("ASSAY_CACHING");
        env::remove_var("ASSAY_MAX_PROCESSING_MS");
        env::remove_var("ASSAY_MAX_CONCURRENCY");
        env::remove_var("ASSAY_ASSESSMENT_TTL_SECS");
        env::remove_var("ASSAY_DOMAIN_TTL_SECS");
        env::remove_var("ASSAY_MAX_CACHE_ENTRIES");
        env::remove_var("ASSAY_CACHE_KEY_PREFIX");
        env::remove_var("ASSAY_DOMAIN_CACHE_MODE");
        env::remove_var("ASSAY_CONSISTENCY_MODE");
        env::remove_var("ASSAY_CLEANUP_INTERVAL_SECS");
    }
}

#[test]
fn test_default_config() {
    let config = Config::default();

    assert!(config.enable_parallel_processing);
    assert!(config.enable_stage_gating);
    assert_eq!(config.stage_gate_threshold, 40.0);
    assert!(config.enable_caching);
    assert_eq!(config.max_processing_time, Duration::from_millis(5_000));
    assert_eq!(config.max_concurrency, 4);
    assert_eq!(config.assessment_cache_ttl, Duration::from_secs(300));
    assert_eq!(config.domain_cache_ttl, Duration::from_secs(3_600));
    assert_eq!(config.max_cache_entries, 1_000);
    assert_eq!(config.domain_cache_mode, DomainCacheMode::Composite);
    assert_eq!(config.consistency_mode, ConsistencyMode::Standard);
    assert!(config.validate().is_ok());
}

#[test]
#[serial]
fn test_from_env_with_defaults() {
    clear_assay_env();

    let config = Config::from_env().expect("should parse with defaults");
    assert_eq!(config, Config::default());
}

#[test]
#[serial]
fn test_from_env_overrides() {
    clear_assay_env();

    with_env_vars(
        &[
            ("ASSAY_PARALLEL", "false"),
            ("ASSAY_STAGE_GATING", "0"),
            ("ASSAY_STAGE_GATE_THRESHOLD", "55.5"),
            ("ASSAY_CACHING", "off"),
            ("ASSAY_MAX_PROCESSING_MS", "1500"),
            ("ASSAY_MAX_CONCURRENCY", "2"),
            ("ASSAY_ASSESSMENT_TTL_SECS", "30"),
            ("ASSAY_DOMAIN_TTL_SECS", "600"),
            ("ASSAY_MAX_CACHE_ENTRIES", "64"),
            ("ASSAY_CACHE_KEY_PREFIX", "200"),
            ("ASSAY_DOMAIN_CACHE_MODE", "authority"),
            ("ASSAY_CONSISTENCY_MODE", "strict"),
            ("ASSAY_CLEANUP_INTERVAL_SECS", "5"),
        ],
        || {
            let config = Config::from_env().expect("should parse");

            assert!(!config.enable_parallel_processing);
            assert!(!config.enable_stage_gating);
            assert_eq!(config.stage_gate_threshold, 55.5);
            assert!(!config.enable_caching);
            assert_eq!(config.max_processing_time, Duration::from_millis(1_500));
            assert_eq!(config.max_concurrency, 2);
            assert_eq!(config.assessment_cache_ttl, Duration::from_secs(30));
            assert_eq!(config.domain_cache_ttl, Duration::from_secs(600));
            assert_eq!(config.max_cache_entries, 64);
            assert_eq!(config.cache_key_prefix_chars, 200);
            assert_eq!(config.domain_cache_mode, DomainCacheMode::AuthorityOnly);
            assert_eq!(config.consistency_mode, ConsistencyMode::Strict);
            assert_eq!(config.cleanup_interval, Duration::from_secs(5));
        },
    );
}

#[test]
#[serial]
fn test_invalid_threshold_not_number() {
    clear_assay_env();

    with_env_vars(&[("ASSAY_STAGE_GATE_THRESHOLD", "forty")], || {
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::ThresholdParseError { .. }));
        assert!(err.to_string().contains("failed to parse stage gate threshold"));
    });
}

#[test]
#[serial]
fn test_invalid_threshold_out_of_range() {
    clear_assay_env();

    with_env_vars(&[("ASSAY_STAGE_GATE_THRESHOLD", "140")], || {
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidThreshold { .. }));
    });
}

#[test]
#[serial]
fn test_invalid_timeout() {
    clear_assay_env();

    with_env_vars(&[("ASSAY_MAX_PROCESSING_MS", "soon")], || {
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDuration { .. }));
    });

    with_env_vars(&[("ASSAY_MAX_PROCESSING_MS", "0")], || {
        let err = Config::from_env().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ZeroValue {
                field: "max_processing_time"
            }
        ));
    });
}

#[test]
#[serial]
fn test_malformed_values_fall_back_to_defaults() {
    clear_assay_env();

    with_env_vars(
        &[
            ("ASSAY_PARALLEL", "maybe"),
            ("ASSAY_MAX_CONCURRENCY", "lots"),
            ("ASSAY_DOMAIN_CACHE_MODE", "everything"),
            ("ASSAY_CONSISTENCY_MODE", "lenient"),
        ],
        || {
            let config = Config::from_env().expect("should parse with fallback");
            assert!(config.enable_parallel_processing);
            assert_eq!(config.max_concurrency, 4);
            assert_eq!(config.domain_cache_mode, DomainCacheMode::Composite);
            assert_eq!(config.consistency_mode, ConsistencyMode::Standard);
        },
    );
}

#[test]
fn test_validate_rejects_threshold_out_of_range() {
    for value in [-1.0, 100.5, f64::NAN] {
        let config = Config {
            stage_gate_threshold: value,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidThreshold { .. })
        ));
    }
}

#[test]
fn test_validate_rejects_zero_values() {
    let cases: Vec<(Config, &str)> = vec![
        (
            Config {
                max_processing_time: Duration::ZERO,
                ..Default::default()
            },
            "max_processing_time",
        ),
        (
            Config {
                max_concurrency: 0,
                ..Default::default()
            },
            "max_concurrency",
        ),
        (
            Config {
                assessment_cache_ttl: Duration::ZERO,
                ..Default::default()
            },
            "assessment_cache_ttl",
        ),
        (
            Config {
                max_cache_entries: 0,
                ..Default::default()
            },
            "max_cache_entries",
        ),
        (
            Config {
                cache_key_prefix_chars: 0,
                ..Default::default()
            },
            "cache_key_prefix_chars",
        ),
    ];

    for (config, expected) in cases {
        match config.validate() {
            Err(ConfigError::ZeroValue { field }) => assert_eq!(field, expected),
            other => panic!("expected ZeroValue for {expected}, got {other:?}"),
        }
    }
}

#[test]
fn test_presets_are_valid_and_distinct() {
    for preset in Preset::ALL {
        assert!(Config::preset(preset).validate().is_ok(), "{preset} invalid");
    }

    assert_eq!(Config::preset(Preset::Default), Config::default());
    assert!(!Config::preset(Preset::Precision).enable_stage_gating);
    assert_eq!(
        Config::preset(Preset::Precision).consistency_mode,
        ConsistencyMode::Strict
    );
    assert!(
        Config::preset(Preset::Fast).max_processing_time
            < Config::preset(Preset::Default).max_processing_time
    );
}

#[test]
fn test_preset_from_str() {
    assert_eq!("fast".parse::<Preset>().unwrap(), Preset::Fast);
    assert_eq!(" Precision ".parse::<Preset>().unwrap(), Preset::Precision);
    assert_eq!(Preset::Default.to_string(), "default");

    let err = "turbo".parse::<Preset>().unwrap_err();
    assert!(err.to_string().contains("turbo"));
}

#[test]
fn test_analyzer_config_follows_caching_flag() {
    let config = Config {
        enable_caching: false,
        domain_cache_ttl: Duration::from_secs(42),
        ..Default::default()
    };
    let analyzer = config.analyzer_config();

    assert!(!analyzer.caching_enabled);
    assert_eq!(analyzer.ttl, Duration::from_secs(42));
    assert_eq!(analyzer.capacity, config.max_cache_entries);
}

#[test]
fn test_error_messages_are_descriptive() {
    let err = ConfigError::InvalidThreshold { value: 120.0 };
    assert!(err.to_string().contains("120"));
    assert!(err.to_string().contains("between 0 and 100"));

    let err = ConfigError::ZeroValue {
        field: "max_concurrency",
    };
    assert!(err.to_string().contains("max_concurrency"));
}
