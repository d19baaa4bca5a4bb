//! Tests for TOML configuration parsing.

use super::toml::{TomlConfig, default_config_template};

mod parsing {
    use super::*;

    #[test]
    fn parse_minimal_config() {
        let toml = r"
            [debounce]
            interval_ms = 100
        ";

        let config = TomlConfig::parse(toml).unwrap();
        assert_eq!(config.debounce.interval_ms, Some(100.0));
        assert_eq!(config.debounce.leading, None);
        assert_eq!(config.debounce.trailing, None);
        assert!(!config.debounce.reset_on_activity);
    }

    #[test]
    fn parse_full_section() {
        let toml = r"
            [debounce]
            interval_ms = 12.5
            leading = true
            trailing = false
            reset_on_activity = true
        ";

        let config = TomlConfig::parse(toml).unwrap();
        let section = &config.debounce;

        assert_eq!(section.interval_ms, Some(12.5));
        assert_eq!(section.leading, Some(true));
        assert_eq!(section.trailing, Some(false));
        assert!(section.reset_on_activity);
    }

    #[test]
    fn reset_timeout_is_an_alias() {
        let toml = r"
            [debounce]
            reset_timeout = true
        ";

        let config = TomlConfig::parse(toml).unwrap();
        assert!(config.debounce.reset_on_activity);
    }

    #[test]
    fn empty_config_is_valid() {
        let config = TomlConfig::parse("").unwrap();
        assert!(config.debounce.interval_ms.is_none());
    }
}

mod errors {
    use super::*;

    #[test]
    fn unknown_section_is_rejected() {
        let toml = r"
            [throttle]
            interval_ms = 10
        ";

        assert!(TomlConfig::parse(toml).is_err());
    }

    #[test]
    fn unknown_field_is_rejected() {
        let toml = r"
            [debounce]
            max_wait = 10
        ";

        assert!(TomlConfig::parse(toml).is_err());
    }

    #[test]
    fn wrong_type_is_rejected() {
        let toml = r#"
            [debounce]
            leading = "yes"
        "#;

        assert!(TomlConfig::parse(toml).is_err());
    }

    #[test]
    fn missing_file_reports_path() {
        let error = TomlConfig::load(std::path::Path::new("/nonexistent/quiesce.toml")).unwrap_err();
        assert!(error.to_string().contains("/nonexistent/quiesce.toml"));
    }
}

mod template {
    use super::*;

    #[test]
    fn template_parses() {
        let config = TomlConfig::parse(&default_config_template()).unwrap();

        assert_eq!(config.debounce.interval_ms, Some(250.0));
        assert_eq!(config.debounce.leading, None);
        assert_eq!(config.debounce.trailing, None);
        assert!(!config.debounce.reset_on_activity);
    }
}
