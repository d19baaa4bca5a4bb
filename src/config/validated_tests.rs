//! Tests for validated configuration.

use std::io::Write;
use std::time::Duration;

use tempfile::{NamedTempFile, tempdir};

use crate::debounce::{EdgeMode, EdgeSetting};

use super::ConfigError;
use super::cli::Cli;
use super::toml::TomlConfig;
use super::validated::{ValidatedConfig, write_default_config};

/// Helper to create CLI args from a slice
fn cli(args: &[&str]) -> Cli {
    let mut full_args = vec!["quiesce"];
    full_args.extend(args);
    Cli::parse_from_iter(full_args)
}

/// Helper to parse TOML config
fn toml(content: &str) -> TomlConfig {
    TomlConfig::parse(content).unwrap()
}

mod required_fields {
    use super::*;

    #[test]
    fn missing_interval_returns_error() {
        let result = ValidatedConfig::from_raw(&cli(&[]), None);

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequired {
                field: "interval",
                ..
            })
        ));
    }

    #[test]
    fn interval_from_cli() {
        let config = ValidatedConfig::from_raw(&cli(&["--interval", "100"]), None).unwrap();

        assert_eq!(config.options.interval, Duration::from_millis(100));
        assert_eq!(config.mode, EdgeMode::TrailingOnly);
        assert!(!config.options.reset_on_activity);
    }

    #[test]
    fn interval_from_toml() {
        let toml = toml("[debounce]\ninterval_ms = 40");
        let config = ValidatedConfig::from_raw(&cli(&[]), Some(&toml)).unwrap();

        assert_eq!(config.options.interval, Duration::from_millis(40));
    }
}

mod validation {
    use super::*;

    #[test]
    fn negative_interval_is_rejected() {
        let result = ValidatedConfig::from_raw(&cli(&["--interval", "-1"]), None);

        assert!(matches!(
            result,
            Err(ConfigError::InvalidDuration {
                field: "interval",
                ..
            })
        ));
    }

    #[test]
    fn infinite_interval_is_rejected() {
        let toml = toml("[debounce]\ninterval_ms = inf");
        let result = ValidatedConfig::from_raw(&cli(&[]), Some(&toml));

        assert!(matches!(result, Err(ConfigError::InvalidDuration { .. })));
    }

    #[test]
    fn zero_interval_is_accepted() {
        let config = ValidatedConfig::from_raw(&cli(&["--interval", "0"]), None).unwrap();
        assert_eq!(config.options.interval, Duration::ZERO);
    }

    #[test]
    fn both_edges_disabled_is_rejected() {
        let args = ["--interval", "10", "--leading", "false", "--trailing", "false"];
        let result = ValidatedConfig::from_raw(&cli(&args), None);

        assert!(matches!(result, Err(ConfigError::Debounce(_))));
    }
}

mod precedence {
    use super::*;

    #[test]
    fn cli_interval_overrides_toml() {
        let toml = toml("[debounce]\ninterval_ms = 40");
        let config =
            ValidatedConfig::from_raw(&cli(&["--interval", "15"]), Some(&toml)).unwrap();

        assert_eq!(config.options.interval, Duration::from_millis(15));
    }

    #[test]
    fn edges_merge_independently() {
        let toml = toml("[debounce]\ninterval_ms = 40\nleading = true\ntrailing = true");
        let config =
            ValidatedConfig::from_raw(&cli(&["--trailing", "false"]), Some(&toml)).unwrap();

        assert_eq!(config.options.leading, EdgeSetting::On);
        assert_eq!(config.options.trailing, EdgeSetting::Off);
        assert_eq!(config.mode, EdgeMode::LeadingOnly);
    }

    #[test]
    fn unset_edges_stay_unset() {
        let config =
            ValidatedConfig::from_raw(&cli(&["--interval", "5", "--trailing", "false"]), None)
                .unwrap();

        assert_eq!(config.options.leading, EdgeSetting::Unset);
        assert_eq!(config.mode, EdgeMode::LeadingOnly);
    }

    #[test]
    fn reset_flag_uses_or_semantics() {
        let toml = toml("[debounce]\ninterval_ms = 40\nreset_on_activity = true");

        let from_toml = ValidatedConfig::from_raw(&cli(&[]), Some(&toml)).unwrap();
        assert!(from_toml.options.reset_on_activity);

        let from_cli =
            ValidatedConfig::from_raw(&cli(&["--interval", "1", "--reset-on-activity"]), None)
                .unwrap();
        assert!(from_cli.options.reset_on_activity);
    }
}

mod loading {
    use super::*;

    #[test]
    fn load_reads_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[debounce]\ninterval_ms = 75\nleading = true").unwrap();

        let path = file.path().to_str().unwrap();
        let config = ValidatedConfig::load(&cli(&["--config", path])).unwrap();

        assert_eq!(config.options.interval, Duration::from_millis(75));
        assert_eq!(config.mode, EdgeMode::LeadingOnly);
    }

    #[test]
    fn load_without_config_uses_cli_only() {
        let config = ValidatedConfig::load(&cli(&["--interval", "3"])).unwrap();
        assert_eq!(config.options.interval, Duration::from_millis(3));
    }

    #[test]
    fn load_missing_file_fails() {
        let result = ValidatedConfig::load(&cli(&["--config", "/nonexistent/quiesce.toml"]));
        assert!(matches!(result, Err(ConfigError::FileRead { .. })));
    }

    #[test]
    fn written_template_loads() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("quiesce.toml");

        write_default_config(&path).unwrap();
        let path_str = path.to_str().unwrap();
        let config = ValidatedConfig::load(&cli(&["--config", path_str])).unwrap();

        assert_eq!(config.options.interval, Duration::from_millis(250));
        assert_eq!(config.mode, EdgeMode::TrailingOnly);
    }

    #[test]
    fn write_to_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("quiesce.toml");

        let result = write_default_config(&path);
        assert!(matches!(result, Err(ConfigError::FileWrite { .. })));
    }
}

#[test]
fn display_summarizes_config() {
    let config = ValidatedConfig::from_raw(&cli(&["--interval", "20", "--leading", "true"]), None)
        .unwrap();
    let display = config.to_string();

    assert!(display.contains("interval: 20ms"));
    assert!(display.contains("mode: leading"));
}
