//! Tests for the configuration module.
//!
//! This module contains tests for configuration loading, validation, and usage.

use super::TestFixture;
use crate::config::{
    limits::LimitsConfig, server::ServerConfig, ConfigLoader, RaptorConfig, Validate,
};
use crate::error::config::ConfigError;
use crate::transport::CarrierKind;
use std::net::{IpAddr, Ipv4Addr};

/// Test that default configuration can be created and is valid.
#[test]
fn test_default_config_is_valid() {
    let config = RaptorConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.server.carrier_kind().unwrap(), CarrierKind::Stream);
}

/// Test that configuration validation catches invalid values.
#[test]
fn test_config_validation() {
    let mut config = RaptorConfig::default();

    // Invalid server configuration
    config.server.worker_threads = 0;
    assert!(config.validate().is_err());

    // Fix and test another invalid value
    config.server.worker_threads = 4;
    config.server.carrier = "smoke-signal".to_string();
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ValidationError(ref msg)) if msg.contains("smoke-signal")
    ));

    // Fix and test another invalid value
    config.server.carrier = "dgram".to_string();
    config.limits.max_datagram_size = 70_000;
    assert!(config.validate().is_err());

    config.limits.max_datagram_size = 1500;
    config.log.level = "loud".to_string();
    assert!(config.validate().is_err());

    config.log.level = "debug".to_string();
    assert!(config.validate().is_ok());
}

/// Test loading configuration from a file.
#[test]
fn test_load_config_from_file() {
    let fixture = TestFixture::new().unwrap();
    let config_path = fixture
        .create_file(
            "config_file_test.toml",
            r#"
    [server]
    name = "test-server"
    carrier = "http"
    port = 8088
    worker_threads = 2

    [limits]
    max_connections = 16
    "#,
        )
        .unwrap();

    // Load the configuration with a unique prefix
    let loader = ConfigLoader::new(Some(&config_path), "TEST_FILE");
    let config = loader.load().unwrap();

    // Verify values were loaded correctly
    assert_eq!(config.server.name, "test-server");
    assert_eq!(config.server.carrier_kind().unwrap(), CarrierKind::Http);
    assert_eq!(config.server.port, 8088);
    assert_eq!(config.server.worker_threads, 2);
    assert_eq!(config.limits.max_connections, 16);

    // Other values should be defaults
    assert_eq!(config.server.host, IpAddr::V4(Ipv4Addr::LOCALHOST));
    assert_eq!(
        config.limits.max_datagram_size,
        LimitsConfig::default().max_datagram_size
    );
}

/// Test loading a JSON configuration file.
#[test]
fn test_load_json_config() {
    let fixture = TestFixture::new().unwrap();
    let config_path = fixture
        .create_file(
            "config.json",
            r#"{"server": {"carrier": "datagram", "port": 9999}, "log": {"json": true}}"#,
        )
        .unwrap();

    let config = ConfigLoader::new(Some(&config_path), "TEST_JSON").load().unwrap();
    assert_eq!(config.server.carrier_kind().unwrap(), CarrierKind::Datagram);
    assert_eq!(config.server.port, 9999);
    assert!(config.log.json);
}

/// Test loading configuration with environment variable overrides.
#[test]
fn test_env_var_override() {
    let mut fixture = TestFixture::new().unwrap();
    let config_path = fixture
        .create_file(
            "config_env_test.toml",
            r#"
    [server]
    name = "test-server"
    worker_threads = 2
    "#,
        )
        .unwrap();

    // Set environment variables with a unique prefix
    fixture.set_env("TEST_ENV__SERVER__NAME", "env-server");
    fixture.set_env("TEST_ENV__SERVER__PORT", "7100");

    let loader = ConfigLoader::new(Some(&config_path), "TEST_ENV");
    let config = loader.load().unwrap();

    // Verify environment variables took precedence
    assert_eq!(config.server.name, "env-server");
    assert_eq!(config.server.port, 7100);
    assert_eq!(config.server.worker_threads, 2);
}

/// Test that loading an invalid configuration file returns an error.
#[test]
fn test_load_invalid_config() {
    let fixture = TestFixture::new().unwrap();
    let config_path = fixture
        .create_file(
            "invalid.toml",
            r#"
    [server
    name = test-server"
    "#,
        )
        .unwrap();

    let loader = ConfigLoader::new(Some(&config_path), "TEST_INVALID");
    assert!(loader.load().is_err());
}

/// Test that a missing file and an unknown extension are reported as such.
#[test]
fn test_load_missing_or_unsupported_file() {
    let fixture = TestFixture::new().unwrap();

    let missing = fixture.temp_dir.path().join("nope.toml");
    let err = ConfigLoader::new(Some(&missing), "TEST_MISSING").load().unwrap_err();
    assert!(matches!(err, ConfigError::FileNotFound(_)));

    let ini = fixture.create_file("config.ini", "[server]").unwrap();
    let err = ConfigLoader::new(Some(&ini), "TEST_INI").load().unwrap_err();
    assert!(matches!(err, ConfigError::ParseError(_)));
}

/// Test that the default configuration survives a TOML round trip through the loader.
#[test]
fn test_generated_config_loads() {
    let fixture = TestFixture::new().unwrap();
    let toml = RaptorConfig::default().to_toml().unwrap();
    let path = fixture.create_file("generated.toml", toml).unwrap();

    let config = ConfigLoader::new(Some(&path), "TEST_GENERATED").load().unwrap();
    let defaults = RaptorConfig::default();
    assert_eq!(config.server.name, defaults.server.name);
    assert_eq!(config.server.port, defaults.server.port);
    assert_eq!(config.limits.max_message_size, defaults.limits.max_message_size);
}

/// Test that validation fails for various invalid configurations.
#[test]
fn test_specific_validation_rules() {
    let mut server = ServerConfig::default();
    server.name = "  ".to_string();
    assert!(server.validate().is_err());

    let mut limits = LimitsConfig::default();
    limits.max_message_size = 0;
    assert!(limits.validate().is_err());

    let mut limits = LimitsConfig::default();
    limits.max_connections = 0;
    assert!(limits.validate().is_err());
}
