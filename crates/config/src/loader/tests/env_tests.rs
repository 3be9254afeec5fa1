//! Environment variable tests for the configuration loader.

use std::time::Duration;

use serial_test::serial;

use super::env_lock;
use crate::loader::builder::ConfigLoader;
use crate::loader::env::env_var_or_none;
use crate::loader::error::ConfigError;

#[test]
#[serial]
fn test_env_populates_config() {
    let _lock = env_lock().lock().unwrap();

    temp_env::with_vars(
        [
            ("TRANSIT_BASE_URL", Some("https://env.example.com")),
            ("TRANSIT_TIMEOUT", Some("45")),
            ("TRANSIT_EXPIRY_BUFFER", Some("60")),
            ("TRANSIT_TOKEN_LIFETIME", Some("600")),
            ("TRANSIT_TENANT_ID", Some("metro")),
            ("TRANSIT_LOCALE", Some("fr-CA")),
        ],
        || {
            let config = ConfigLoader::new().from_env().unwrap().build().unwrap();
            assert_eq!(config.connection.base_url, "https://env.example.com");
            assert_eq!(config.connection.timeout, Duration::from_secs(45));
            assert_eq!(config.session.expiry_buffer_seconds, 60);
            assert_eq!(config.session.default_token_lifetime_seconds, 600);
            assert_eq!(config.identity.tenant_id, "metro");
            assert_eq!(config.identity.locale, "fr-CA");
        },
    );
}

#[test]
#[serial]
fn test_builder_overrides_env_when_applied_after() {
    let _lock = env_lock().lock().unwrap();

    temp_env::with_var("TRANSIT_BASE_URL", Some("https://env.example.com"), || {
        let config = ConfigLoader::new()
            .from_env()
            .unwrap()
            .with_base_url("https://cli.example.com".to_string())
            .build()
            .unwrap();
        assert_eq!(config.connection.base_url, "https://cli.example.com");
    });
}

#[test]
#[serial]
fn test_invalid_numeric_env_var() {
    let _lock = env_lock().lock().unwrap();

    temp_env::with_var("TRANSIT_TIMEOUT", Some("soon"), || {
        let result = ConfigLoader::new().from_env();
        match result {
            Err(ConfigError::InvalidValue { var, .. }) => assert_eq!(var, "TRANSIT_TIMEOUT"),
            other => panic!("expected InvalidValue, got {:?}", other),
        }
    });
}

#[test]
#[serial]
fn test_invalid_bool_env_var() {
    let _lock = env_lock().lock().unwrap();

    temp_env::with_var("TRANSIT_SKIP_VERIFY", Some("maybe"), || {
        let result = ConfigLoader::new().from_env();
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    });
}

#[test]
#[serial]
fn test_whitespace_only_env_var_treated_as_unset() {
    let _lock = env_lock().lock().unwrap();

    temp_env::with_var("TRANSIT_TENANT_ID", Some("   "), || {
        assert_eq!(env_var_or_none("TRANSIT_TENANT_ID"), None);
    });
}

#[test]
#[serial]
fn test_env_var_value_is_trimmed() {
    let _lock = env_lock().lock().unwrap();

    temp_env::with_var("TRANSIT_TENANT_ID", Some("  metro  "), || {
        assert_eq!(
            env_var_or_none("TRANSIT_TENANT_ID"),
            Some("metro".to_string())
        );
    });
}
